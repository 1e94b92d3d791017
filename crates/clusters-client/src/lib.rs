//! REST client of the clusters management API.

pub mod client;
pub use client::{Client, Response};
pub use reqwest::{Method, StatusCode};

mod clusters;
pub use clusters::{BreakGlassCredentials, CloudProviderClient, ClusterClient};

mod config;
pub use config::Config;

mod error;
pub use error::{ApiError, Error};

pub mod pagination;

mod poll;
pub use poll::Poll;

mod resources;
pub use resources::{
    AddRequest, Collection, DeleteRequest, Item, ListRequest, ListResponse, UpdateRequest,
};

mod tokens;
pub use tokens::Tokens;

/// Path prefix of the clusters management API.
pub const API_PREFIX: &str = "/api/clusters_mgmt/v1";

/// Client identifier used with the token URL when none is configured.
pub const DEFAULT_CLIENT_ID: &str = "cloud-services";

/// External configuration label which disables legacy ingress support when false.
pub const LEGACY_INGRESS_SUPPORT_LABEL: &str = "ext-managed.openshift.io/legacy-ingress-support";

lazy_static::lazy_static! {
    pub static ref DEFAULT_URL: url::Url = url::Url::parse("https://api.openshift.com").unwrap();
    pub static ref STAGING_URL: url::Url = url::Url::parse("https://api.stage.openshift.com").unwrap();
    pub static ref INTEGRATION_URL: url::Url = url::Url::parse("https://api.integration.openshift.com").unwrap();
    pub static ref DEFAULT_TOKEN_URL: url::Url = url::Url::parse(
        "https://sso.redhat.com/auth/realms/redhat-external/protocol/openid-connect/token"
    ).unwrap();
}

/// Resolves a gateway alias (`production`, `staging` or `integration`) or
/// parses `url` as-is.
pub fn resolve_url(url: &str) -> Result<url::Url, Error> {
    match url {
        "production" | "prod" => Ok(DEFAULT_URL.clone()),
        "staging" | "stage" => Ok(STAGING_URL.clone()),
        "integration" | "int" => Ok(INTEGRATION_URL.clone()),
        _ => Ok(url::Url::parse(url)?),
    }
}

/// Decodes the claims of a JWT, without verifying its signature.
pub fn parse_jwt_claims<T: serde::de::DeserializeOwned>(token: &str) -> Result<T, Error> {
    let claims = token
        .split('.')
        .nth(1)
        .ok_or_else(|| Error::Auth("malformed token".to_string()))?;
    let claims = base64::decode_config(claims, base64::URL_SAFE_NO_PAD)
        .map_err(|err| Error::Auth(format!("malformed token: {err}")))?;
    serde_json::from_slice(&claims).map_err(|err| Error::Auth(format!("malformed token claims: {err}")))
}

/// Quotes `value` as a string literal of the search language.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
