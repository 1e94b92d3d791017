use crate::{Error, Tokens};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config is the persisted configuration of a user: the API gateway to use
/// and the tokens to authenticate with. Its file is shared with the other
/// command-line tools of the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client_secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_url: Option<url::Url>,
    /// URL of the API gateway.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<url::Url>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub scopes: Vec<String>,
    /// Skip verification of the TLS certificates of the gateway.
    #[serde(default)]
    pub insecure: bool,
}

impl Config {
    /// Location of the configuration file: `$OCM_CONFIG` if it's set, or
    /// `ocm/ocm.json` under the user's configuration directory.
    pub fn path() -> Result<PathBuf, Error> {
        if let Some(path) = std::env::var_os("OCM_CONFIG") {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().ok_or_else(|| Error::ConfigIo {
            path: PathBuf::from("ocm/ocm.json"),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "couldn't determine the user's configuration directory",
            ),
        })?;
        Ok(dir.join("ocm").join("ocm.json"))
    }

    /// Loads the configuration at `Config::path()`.
    pub fn load() -> Result<Self, Error> {
        Self::load_from(&Self::path()?)
    }

    /// Loads the configuration at `path`, which is the default configuration
    /// if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self, Error> {
        let contents = match std::fs::read(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(?path, "configuration file doesn't exist, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(Error::ConfigIo {
                    path: path.to_owned(),
                    source,
                })
            }
        };
        serde_json::from_slice(&contents).map_err(|source| Error::ConfigParse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn write(&self) -> Result<(), Error> {
        self.write_to(&Self::path()?)
    }

    /// Writes the configuration to `path`, creating its parent directories.
    pub fn write_to(&self, path: &Path) -> Result<(), Error> {
        let io_err = |source: std::io::Error| Error::ConfigIo {
            path: path.to_owned(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let contents = serde_json::to_vec_pretty(self).map_err(|source| Error::ConfigParse {
            path: path.to_owned(),
            source,
        })?;
        std::fs::write(path, contents).map_err(io_err)?;
        tracing::debug!(?path, "wrote configuration file");
        Ok(())
    }

    /// True if the configuration holds a token to authenticate with.
    pub fn is_armed(&self) -> bool {
        self.access_token.as_deref().map_or(false, |t| !t.is_empty())
            || self.refresh_token.as_deref().map_or(false, |t| !t.is_empty())
    }

    pub fn api_url(&self) -> url::Url {
        self.url.clone().unwrap_or_else(|| crate::DEFAULT_URL.clone())
    }

    /// Builds the Tokens described by this configuration.
    pub fn tokens(&self) -> Tokens {
        Tokens::new(self.access_token.clone(), self.refresh_token.clone())
            .with_token_url(
                self.token_url
                    .clone()
                    .unwrap_or_else(|| crate::DEFAULT_TOKEN_URL.clone()),
            )
            .with_client(
                self.client_id
                    .clone()
                    .unwrap_or_else(|| crate::DEFAULT_CLIENT_ID.to_string()),
                self.client_secret.clone(),
            )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_load_and_write() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("ocm.json");

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
        assert!(!Config::default().is_armed());

        let config = Config {
            access_token: Some("access".to_string()),
            url: Some(crate::resolve_url("staging").unwrap()),
            scopes: vec!["openid".to_string()],
            ..Default::default()
        };
        config.write_to(&path).unwrap();
        assert!(config.is_armed());

        let contents: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(
            contents,
            serde_json::json!({
                "access_token": "access",
                "url": "https://api.stage.openshift.com/",
                "scopes": ["openid"],
                "insecure": false,
            })
        );
        assert_eq!(Config::load_from(&path).unwrap(), config);
        assert_eq!(config.api_url().as_str(), "https://api.stage.openshift.com/");
    }

    #[test]
    fn test_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ocm.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }), "{err:?}");
    }
}
