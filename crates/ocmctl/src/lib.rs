use anyhow::Context;
use clap::Parser;
use clusters_client::{Client, Config};

mod clusters;
mod login;
mod machine_pools;
mod output;
mod versions;

use output::{Output, OutputType};

/// User agent sent with each request of the tool.
pub const USER_AGENT: &str = concat!("ocmctl/", env!("CARGO_PKG_VERSION"));

/// A command-line tool for working with managed OpenShift clusters.
#[derive(Debug, Parser)]
#[clap(author, about, version)]
pub struct Cli {
    /// URL of the API gateway, overriding the configured one.
    ///
    /// Accepts the aliases `production`, `staging` and `integration`.
    #[clap(long, env = "OCM_URL")]
    url: Option<String>,

    /// Access token to authenticate with, instead of the configured tokens.
    #[clap(long, env = "OCM_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    #[clap(subcommand)]
    cmd: Command,

    #[clap(flatten)]
    output: Output,
}

#[derive(Debug, clap::Subcommand)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// Log in, saving the tokens to the configuration file.
    Login(login::Login),
    /// Log out, removing the tokens from the configuration file.
    Logout,
    /// Work with clusters.
    Clusters(clusters::Clusters),
    /// Work with the machine pools of a cluster.
    MachinePools(machine_pools::MachinePools),
    /// Work with the OpenShift versions clusters can run.
    Versions(versions::Versions),
}

#[derive(Debug)]
pub struct CliContext {
    config: Config,
    config_path: std::path::PathBuf,
    output: Output,
    url: Option<url::Url>,
    access_token: Option<String>,
    client: Option<Client>,
}

impl CliContext {
    /// Returns a client of the API, creating a new one if necessary.
    /// This function returns an error if there are no credentials to use.
    pub fn client(&mut self) -> anyhow::Result<Client> {
        if let Some(client) = &self.client {
            return Ok(client.clone());
        }
        let url = self.url.clone().unwrap_or_else(|| self.config.api_url());
        let client = Client::new(&url, USER_AGENT).with_insecure_tls(self.config.insecure);

        let client = match &self.access_token {
            Some(token) => client.with_access_token(token.clone()),
            None if self.config.is_armed() => client.with_tokens(self.config.tokens()),
            None => anyhow::bail!("not logged in, run `ocmctl login` first"),
        };
        tracing::debug!(%url, "created API client");

        self.client = Some(client.clone());
        Ok(client)
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Writes the configuration file.
    pub fn write_config(&self) -> anyhow::Result<()> {
        self.config
            .write_to(&self.config_path)
            .context("writing configuration")
    }

    pub fn write_all<I, T>(&mut self, items: I, table_alt: T::TableAlt) -> anyhow::Result<()>
    where
        T: output::CliOutput,
        I: IntoIterator<Item = T>,
    {
        match self.get_output_type() {
            OutputType::Json => output::print_json(items),
            OutputType::Yaml => output::print_yaml(items),
            OutputType::Table => output::print_table(table_alt, items),
        }
    }

    pub fn get_output_type(&mut self) -> OutputType {
        use crossterm::tty::IsTty;

        if let Some(ty) = self.output.output {
            ty
        } else if std::io::stdout().is_tty() {
            OutputType::Table
        } else {
            OutputType::Yaml
        }
    }

    // Tokens are refreshed as they near expiry, and the refreshed tokens are
    // kept for the next invocation.
    async fn save_refreshed_tokens(&mut self) -> anyhow::Result<()> {
        if self.access_token.is_some() {
            return Ok(());
        }
        let Some(tokens) = self.client.as_ref().and_then(Client::tokens) else {
            return Ok(());
        };
        let (access_token, refresh_token) = tokens.current().await;

        if access_token != self.config.access_token || refresh_token != self.config.refresh_token {
            tracing::debug!("saving refreshed tokens");
            self.config.access_token = access_token;
            self.config.refresh_token = refresh_token;
            self.write_config()?;
        }
        Ok(())
    }
}

impl Cli {
    pub async fn run(&self) -> anyhow::Result<()> {
        let config_path = Config::path()?;
        let config = Config::load_from(&config_path)?;
        let url = self
            .url
            .as_deref()
            .map(clusters_client::resolve_url)
            .transpose()
            .context("parsing --url")?;

        let mut context = CliContext {
            config,
            config_path,
            output: self.output.clone(),
            url,
            access_token: self.access_token.clone(),
            client: None,
        };

        match &self.cmd {
            Command::Login(login) => login.run(&mut context).await,
            Command::Logout => login::do_logout(&mut context),
            Command::Clusters(clusters) => clusters.run(&mut context).await,
            Command::MachinePools(pools) => pools.run(&mut context).await,
            Command::Versions(versions) => versions.run(&mut context).await,
        }?;

        context.save_refreshed_tokens().await
    }
}

// new_table builds a comfy_table with UTF8 styling.
fn new_table(headers: Vec<&str>) -> comfy_table::Table {
    let mut table = comfy_table::Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .apply_modifier(comfy_table::modifiers::UTF8_SOLID_INNER_BORDERS);

    table.set_header(headers);
    table
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_global_flags() {
        let cli = Cli::try_parse_from([
            "ocmctl",
            "--url",
            "staging",
            "-o",
            "json",
            "clusters",
            "list",
        ])
        .unwrap();
        assert_eq!(cli.url.as_deref(), Some("staging"));
        assert_eq!(cli.output.output, Some(OutputType::Json));
        assert!(matches!(cli.cmd, Command::Clusters(_)));

        // --output is global, so it's also accepted after the subcommand.
        let cli = Cli::try_parse_from(["ocmctl", "versions", "list", "--output", "yaml"]).unwrap();
        assert_eq!(cli.output.output, Some(OutputType::Yaml));

        assert!(Cli::try_parse_from(["ocmctl", "-o", "xml", "logout"]).is_err());
        assert!(Cli::try_parse_from(["ocmctl"]).is_err());
    }

    #[test]
    fn test_client_requires_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let mut context = CliContext {
            config: Config::default(),
            config_path: dir.path().join("ocm.json"),
            output: Output::default(),
            url: None,
            access_token: None,
            client: None,
        };
        let err = context.client().unwrap_err();
        assert_eq!(err.to_string(), "not logged in, run `ocmctl login` first");

        context.config_mut().refresh_token = Some("refresh".to_string());
        context.url = Some(clusters_client::resolve_url("http://localhost:8000").unwrap());
        let client = context.client().unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8000/");
        assert!(client.is_authenticated());
    }
}
