use crate::{parse_jwt_claims, Error};
use serde::Deserialize;

/// Access tokens which are refreshed within this many seconds of their expiry.
const REFRESH_MARGIN_SECS: i64 = 60;

/// Tokens holds the access and refresh tokens of a user, and refreshes the
/// access token through the token URL as it nears expiry.
#[derive(Debug)]
pub struct Tokens {
    token_url: url::Url,
    client_id: String,
    client_secret: Option<String>,
    state: tokio::sync::Mutex<State>,
}

#[derive(Debug, Clone, Default)]
struct State {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

#[derive(Deserialize)]
struct Claims {
    exp: Option<i64>,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: Option<String>,
}

impl Tokens {
    pub fn new(access_token: Option<String>, refresh_token: Option<String>) -> Self {
        Self {
            token_url: crate::DEFAULT_TOKEN_URL.clone(),
            client_id: crate::DEFAULT_CLIENT_ID.to_string(),
            client_secret: None,
            state: tokio::sync::Mutex::new(State {
                access_token: access_token.filter(|t| !t.is_empty()),
                refresh_token: refresh_token.filter(|t| !t.is_empty()),
            }),
        }
    }

    pub fn with_token_url(self, token_url: url::Url) -> Self {
        Self { token_url, ..self }
    }

    pub fn with_client(self, client_id: impl Into<String>, client_secret: Option<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret,
            ..self
        }
    }

    /// Current access and refresh tokens, which may have been refreshed
    /// since this Tokens was built.
    pub async fn current(&self) -> (Option<String>, Option<String>) {
        let state = self.state.lock().await;
        (state.access_token.clone(), state.refresh_token.clone())
    }

    /// Returns an access token which is valid for at least another minute,
    /// refreshing it through `http_client` if required.
    pub async fn access_token(&self, http_client: &reqwest::Client) -> Result<String, Error> {
        let mut state = self.state.lock().await;
        let now = chrono::Utc::now().timestamp();

        let expires_at = match &state.access_token {
            Some(token) => Some(expires_at(token)?),
            None => None,
        };

        match (&state.access_token, expires_at) {
            (Some(token), Some(exp)) if exp.map_or(true, |exp| exp - now > REFRESH_MARGIN_SECS) => {
                return Ok(token.clone());
            }
            _ => (),
        }

        if let Some(refresh_token) = state.refresh_token.clone() {
            let refreshed = self.refresh(http_client, &refresh_token).await?;
            state.access_token = Some(refreshed.access_token.clone());
            if let Some(refresh_token) = refreshed.refresh_token {
                state.refresh_token = Some(refresh_token);
            }
            return Ok(refreshed.access_token);
        }

        match (&state.access_token, expires_at) {
            (Some(token), Some(Some(exp))) if exp > now => {
                tracing::warn!(
                    expires_in = exp - now,
                    "access token expires soon and there is no refresh token"
                );
                Ok(token.clone())
            }
            (Some(_), _) => Err(Error::Auth(
                "access token is expired and there is no refresh token, please log in again"
                    .to_string(),
            )),
            (None, _) => Err(Error::Auth(
                "there are no tokens, please log in first".to_string(),
            )),
        }
    }

    async fn refresh(
        &self,
        http_client: &reqwest::Client,
        refresh_token: &str,
    ) -> Result<TokenResponse, Error> {
        let mut form = vec![
            ("grant_type", "refresh_token"),
            ("client_id", self.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];
        if let Some(secret) = &self.client_secret {
            form.push(("client_secret", secret.as_str()));
        }
        tracing::debug!(url = %self.token_url, "refreshing access token");

        let response = http_client
            .post(self.token_url.clone())
            .form(&form)
            .send()
            .await
            .map_err(|source| Error::Http {
                method: reqwest::Method::POST,
                url: self.token_url.to_string(),
                source,
            })?;
        let status = response.status();
        let body = response.text().await.map_err(|source| Error::Http {
            method: reqwest::Method::POST,
            url: self.token_url.to_string(),
            source,
        })?;

        if !status.is_success() {
            return Err(Error::Auth(format!(
                "failed to refresh access token: {status}: {body}"
            )));
        }
        serde_json::from_str(&body)
            .map_err(|err| Error::Auth(format!("failed to parse refreshed token: {err}")))
    }
}

// Expiry of a JWT in unix seconds, or None if it doesn't expire.
fn expires_at(token: &str) -> Result<Option<i64>, Error> {
    let claims: Claims = parse_jwt_claims(token)?;
    Ok(claims.exp.filter(|exp| *exp != 0))
}

#[cfg(test)]
mod test {
    use super::*;

    pub fn make_token(exp: Option<i64>) -> String {
        let claims = match exp {
            Some(exp) => format!(r#"{{"exp":{exp},"typ":"Bearer"}}"#),
            None => r#"{"typ":"Bearer"}"#.to_string(),
        };
        format!(
            "e30.{}.c2ln",
            base64::encode_config(claims, base64::URL_SAFE_NO_PAD)
        )
    }

    #[tokio::test]
    async fn test_valid_tokens_are_used_as_is() {
        let http_client = reqwest::Client::new();
        let now = chrono::Utc::now().timestamp();

        let token = make_token(Some(now + 3600));
        let tokens = Tokens::new(Some(token.clone()), Some(String::new()));
        assert_eq!(tokens.access_token(&http_client).await.unwrap(), token);
        assert_eq!(tokens.current().await, (Some(token), None));

        let token = make_token(None);
        let tokens = Tokens::new(Some(token.clone()), None);
        assert_eq!(tokens.access_token(&http_client).await.unwrap(), token);

        // Expiring soon, but there's nothing to refresh with.
        let token = make_token(Some(now + 30));
        let tokens = Tokens::new(Some(token.clone()), None);
        assert_eq!(tokens.access_token(&http_client).await.unwrap(), token);
    }

    #[tokio::test]
    async fn test_expired_tokens() {
        let http_client = reqwest::Client::new();
        let now = chrono::Utc::now().timestamp();

        let tokens = Tokens::new(Some(make_token(Some(now - 10))), None);
        let err = tokens.access_token(&http_client).await.unwrap_err();
        assert!(err.to_string().contains("access token is expired"), "{err}");

        let err = Tokens::new(None, None).access_token(&http_client).await.unwrap_err();
        assert_eq!(err.to_string(), "there are no tokens, please log in first");

        let err = Tokens::new(Some("opaque".to_string()), None)
            .access_token(&http_client)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Auth(_)));
    }
}
