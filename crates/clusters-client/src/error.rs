use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("failed to send {method} {url}")]
    Http {
        method: reqwest::Method,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode response of {path}")]
    Decode {
        path: String,
        #[source]
        source: clusters_model::Error,
    },
    #[error("failed to encode request body")]
    Encode(#[source] clusters_model::Error),
    #[error("invalid URL")]
    Url(#[from] url::ParseError),
    #[error("{0}")]
    Auth(String),
    #[error("there is no cluster with identifier or name '{0}'")]
    NotFound(String),
    #[error("there are {count} clusters with identifier or name '{key}'")]
    Ambiguous { key: String, count: i64 },
    #[error("invalid cluster count {0}")]
    InvalidCount(i64),
    #[error("label '{key}' has invalid boolean value '{value}'")]
    InvalidLabel { key: String, value: String },
    #[error("timed out after {elapsed:?} polling {path}")]
    Timeout {
        path: String,
        elapsed: std::time::Duration,
    },
    #[error("failed to access configuration file {path:?}")]
    ConfigIo {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file {path:?}")]
    ConfigParse {
        path: std::path::PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// HTTP status of the failed request, if the server answered it.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Error::Api(err) => Some(err.status),
            Error::Http { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// ApiError is the error body returned by the API for unsuccessful requests.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub href: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub reason: String,
    #[serde(default)]
    pub operation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// HTTP status of the response which carried the error.
    #[serde(skip)]
    pub status: reqwest::StatusCode,
}

impl ApiError {
    /// Builds an error from an unsuccessful response. Bodies which aren't an
    /// error object are kept as the reason.
    pub fn from_response(status: reqwest::StatusCode, body: &[u8]) -> Self {
        let mut err = match serde_json::from_slice::<ApiError>(body) {
            Ok(err) if err.kind == "Error" => err,
            _ => ApiError {
                kind: "Error".to_string(),
                reason: String::from_utf8_lossy(body).trim().to_string(),
                ..Default::default()
            },
        };
        err.status = status;
        err
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status is {}", self.status.as_u16())?;
        if !self.id.is_empty() {
            write!(f, ", identifier is '{}'", self.id)?;
        }
        if !self.code.is_empty() {
            write!(f, ", code is '{}'", self.code)?;
        }
        if !self.operation_id.is_empty() {
            write!(f, ", operation identifier is '{}'", self.operation_id)?;
        }
        if !self.reason.is_empty() {
            write!(f, ": {}", self.reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod test {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_api_error_parsing() {
        let err = ApiError::from_response(
            StatusCode::NOT_FOUND,
            br#"{
                "kind": "Error",
                "id": "404",
                "href": "/api/clusters_mgmt/v1/errors/404",
                "code": "CLUSTERS-MGMT-404",
                "reason": "Cluster 'abc' not found",
                "operation_id": "op-1"
            }"#,
        );
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "CLUSTERS-MGMT-404");
        assert_eq!(
            err.to_string(),
            "status is 404, identifier is '404', code is 'CLUSTERS-MGMT-404', operation identifier is 'op-1': Cluster 'abc' not found"
        );

        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, b"upstream connect error\n");
        assert_eq!(err.to_string(), "status is 502: upstream connect error");
        assert_eq!(Error::from(err).status(), Some(StatusCode::BAD_GATEWAY));

        // JSON which isn't an error object is kept verbatim.
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, br#"{"kind":"Cluster"}"#);
        assert_eq!(err.reason, r#"{"kind":"Cluster"}"#);
        assert_eq!(err.kind, "Error");
    }
}
