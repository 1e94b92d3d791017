use crate::{ApiError, Error, Tokens};
use reqwest::{Method, StatusCode};
use std::sync::Arc;

/// Client of the clusters management API. It's cheaply cloneable, and clones
/// share their connection pool and tokens.
#[derive(Clone, Debug)]
pub struct Client {
    // Base URL of the API gateway.
    base_url: url::Url,
    // HTTP client to use for REST requests.
    http_client: reqwest::Client,
    user_agent: String,
    // User's tokens, if authenticated.
    tokens: Option<Arc<Tokens>>,
}

/// Response of a request which was answered successfully.
#[derive(Debug, Clone)]
pub struct Response<T> {
    pub status: StatusCode,
    pub body: T,
}

impl Client {
    /// Create a new client of the API at `base_url`, identifying itself as `user_agent`.
    pub fn new(base_url: &url::Url, user_agent: &str) -> Self {
        Self {
            base_url: base_url.clone(),
            http_client: new_http_client(user_agent.to_string(), false),
            user_agent: user_agent.to_string(),
            tokens: None,
        }
    }

    /// Skip verification of the TLS certificates of the gateway.
    pub fn with_insecure_tls(self, insecure: bool) -> Self {
        Self {
            http_client: new_http_client(self.user_agent.clone(), insecure),
            ..self
        }
    }

    /// Use a fixed access token, which is never refreshed.
    pub fn with_access_token(self, access_token: impl Into<String>) -> Self {
        self.with_tokens(Tokens::new(Some(access_token.into()), None))
    }

    pub fn with_tokens(self, tokens: Tokens) -> Self {
        Self {
            tokens: Some(Arc::new(tokens)),
            ..self
        }
    }

    pub fn base_url(&self) -> &url::Url {
        &self.base_url
    }

    pub fn tokens(&self) -> Option<&Tokens> {
        self.tokens.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.tokens.is_some()
    }

    /// Sends a request and returns the status and body of a successful
    /// response. Unsuccessful responses are returned as `Error::Api`.
    pub async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
    ) -> Result<(StatusCode, Vec<u8>), Error> {
        let url = self.base_url.join(path)?;
        let mut builder = self
            .http_client
            .request(method.clone(), url.clone())
            .query(query)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(tokens) = &self.tokens {
            builder = builder.bearer_auth(tokens.access_token(&self.http_client).await?);
        }
        if let Some(body) = body {
            builder = builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }
        let http_err = |source: reqwest::Error| Error::Http {
            method: method.clone(),
            url: url.to_string(),
            source,
        };

        let request = builder.build().map_err(http_err)?;
        tracing::debug!(url = %request.url(), method = %request.method(), "sending request");

        let response = self.http_client.execute(request).await.map_err(http_err)?;
        let status = response.status();
        let body = response.bytes().await.map_err(http_err)?;

        if status.is_success() {
            tracing::trace!(%status, len = body.len(), "got successful response");
            Ok((status, body.to_vec()))
        } else {
            Err(ApiError::from_response(status, &body).into())
        }
    }

    /// Sends a request and decodes the body of its response.
    pub(crate) async fn send<T: serde::de::DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
    ) -> Result<Response<T>, Error> {
        let (status, body) = self.execute(method, path, query, body).await?;
        let body = clusters_model::unmarshal_slice(&body).map_err(|source| Error::Decode {
            path: path.to_string(),
            source,
        })?;
        Ok(Response { status, body })
    }

    /// Sends a request whose response body isn't of interest.
    pub(crate) async fn send_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<String>,
    ) -> Result<Response<()>, Error> {
        let (status, _body) = self.execute(method, path, query, body).await?;
        Ok(Response { status, body: () })
    }
}

pub fn new_http_client(user_agent: String, insecure: bool) -> reqwest::Client {
    reqwest::ClientBuilder::new()
        .user_agent(user_agent)
        .danger_accept_invalid_certs(insecure)
        .build()
        .expect("failed to build http client")
}
