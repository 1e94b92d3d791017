use anyhow::Context;

#[derive(Debug, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct Login {
    /// Offline or access token to log in with.
    ///
    /// Offline tokens are kept as refresh tokens and exchanged for access
    /// tokens as needed.
    #[clap(long, env = "OCM_TOKEN", hide_env_values = true)]
    token: String,
    /// URL of the API gateway, or one of `production`, `staging` and `integration`.
    ///
    /// Defaults to the global `--url`, and otherwise to `production`.
    #[clap(long)]
    url: Option<String>,
    /// OpenID client identifier used to refresh tokens.
    #[clap(long)]
    client_id: Option<String>,
    /// OpenID client secret used to refresh tokens.
    #[clap(long)]
    client_secret: Option<String>,
    /// OpenID token URL used to refresh tokens.
    #[clap(long)]
    token_url: Option<url::Url>,
    /// Skip verification of the TLS certificates of the gateway.
    #[clap(long)]
    insecure: bool,
}

#[derive(serde::Deserialize)]
struct Claims {
    #[serde(default)]
    typ: String,
}

/// Where a token is kept in the configuration.
#[derive(Debug, PartialEq)]
enum TokenKind {
    Access,
    Refresh,
}

fn token_kind(token: &str) -> anyhow::Result<TokenKind> {
    let claims: Claims =
        clusters_client::parse_jwt_claims(token).context("the token isn't a valid JWT")?;

    match claims.typ.as_str() {
        "" | "Bearer" => Ok(TokenKind::Access),
        "Refresh" | "Offline" => Ok(TokenKind::Refresh),
        other => anyhow::bail!("tokens of type '{other}' aren't supported"),
    }
}

impl Login {
    pub async fn run(&self, ctx: &mut crate::CliContext) -> anyhow::Result<()> {
        let url = match &self.url {
            Some(url) => clusters_client::resolve_url(url).context("parsing --url")?,
            None => ctx
                .url
                .clone()
                .unwrap_or_else(|| clusters_client::DEFAULT_URL.clone()),
        };
        let (access_token, refresh_token) = match token_kind(&self.token)? {
            TokenKind::Access => (Some(self.token.clone()), None),
            TokenKind::Refresh => (None, Some(self.token.clone())),
        };

        let config = ctx.config_mut();
        let scopes = std::mem::take(&mut config.scopes);
        *config = clusters_client::Config {
            access_token,
            refresh_token,
            client_id: self.client_id.clone(),
            client_secret: self.client_secret.clone(),
            token_url: self.token_url.clone(),
            url: Some(url.clone()),
            scopes,
            insecure: self.insecure,
        };
        ctx.url = Some(url);
        ctx.access_token = None;
        ctx.client = None;

        // Verify the tokens against the saved gateway before saving them.
        let client = ctx.client()?;
        client
            .clusters()
            .list()
            .size(1)
            .send()
            .await
            .context("failed to verify the token")?;

        ctx.write_config()?;
        println!("Logged in to {}.", client.base_url());
        Ok(())
    }
}

pub fn do_logout(ctx: &mut crate::CliContext) -> anyhow::Result<()> {
    let config = ctx.config_mut();
    config.access_token = None;
    config.refresh_token = None;
    config.client_secret = None;

    ctx.write_config()?;
    println!("Logged out.");
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    fn make_token(claims: &str) -> String {
        format!(
            "e30.{}.c2ln",
            base64::encode_config(claims, base64::URL_SAFE_NO_PAD)
        )
    }

    #[test]
    fn test_token_kinds() {
        assert_eq!(
            token_kind(&make_token(r#"{"typ":"Bearer","exp":1}"#)).unwrap(),
            TokenKind::Access
        );
        assert_eq!(
            token_kind(&make_token(r#"{"typ":"Offline"}"#)).unwrap(),
            TokenKind::Refresh
        );
        assert_eq!(
            token_kind(&make_token(r#"{"typ":"Refresh"}"#)).unwrap(),
            TokenKind::Refresh
        );
        assert_eq!(token_kind(&make_token("{}")).unwrap(), TokenKind::Access);

        let err = token_kind(&make_token(r#"{"typ":"ID"}"#)).unwrap_err();
        assert_eq!(err.to_string(), "tokens of type 'ID' aren't supported");
        assert!(token_kind("opaque").is_err());
    }
}
