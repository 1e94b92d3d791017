use crate::output::{to_table_row, CliOutput, JsonCell};
use anyhow::Context;
use clusters_client::quote;
use clusters_model::Version;
use futures::TryStreamExt;

#[derive(Debug, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct Versions {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// List the enabled OpenShift versions.
    List(List),
}

#[derive(Debug, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct List {
    /// Only list versions of this channel group, such as `stable` or `candidate`.
    #[clap(long)]
    channel_group: Option<String>,
    /// Also list versions which are disabled.
    #[clap(long)]
    all: bool,
}

impl List {
    fn search(&self) -> Option<String> {
        let mut terms = Vec::new();
        if !self.all {
            terms.push("enabled = 'true'".to_string());
        }
        if let Some(group) = &self.channel_group {
            terms.push(format!("channel_group = {}", quote(group)));
        }
        if terms.is_empty() {
            None
        } else {
            Some(terms.join(" AND "))
        }
    }
}

impl CliOutput for Version {
    type TableAlt = ();
    type CellValue = JsonCell;

    fn table_headers(_alt: Self::TableAlt) -> Vec<&'static str> {
        vec!["ID", "Version", "Channel Group", "Default", "Enabled", "End of Life"]
    }

    fn into_table_row(self, _alt: Self::TableAlt) -> Vec<Self::CellValue> {
        to_table_row(
            self,
            &[
                "/id",
                "/raw_id",
                "/channel_group",
                "/default",
                "/enabled",
                "/end_of_life_timestamp",
            ],
        )
    }
}

impl Versions {
    pub async fn run(&self, ctx: &mut crate::CliContext) -> anyhow::Result<()> {
        match &self.cmd {
            Command::List(list) => {
                let mut request = ctx.client()?.versions().list().order("default desc, id asc");
                if let Some(search) = list.search() {
                    request = request.search(search);
                }
                let versions: Vec<Version> = request
                    .items()
                    .try_collect()
                    .await
                    .context("listing versions")?;

                ctx.write_all(versions, ())
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Cli;
    use clap::Parser;

    fn parse_list(args: &[&str]) -> List {
        let cli = Cli::try_parse_from(["ocmctl", "versions", "list"].iter().chain(args)).unwrap();
        match cli.cmd {
            crate::Command::Versions(Versions {
                cmd: Command::List(list),
            }) => list,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_search() {
        assert_eq!(parse_list(&[]).search().as_deref(), Some("enabled = 'true'"));
        assert_eq!(
            parse_list(&["--channel-group", "candidate"]).search().as_deref(),
            Some("enabled = 'true' AND channel_group = 'candidate'")
        );
        assert_eq!(
            parse_list(&["--all", "--channel-group", "o'dd"]).search().as_deref(),
            Some("channel_group = 'o''dd'")
        );
        assert_eq!(parse_list(&["--all"]).search(), None);
    }

    #[test]
    fn test_version_rows() {
        let version = Version::builder()
            .id("openshift-v4.15.2")
            .raw_id("4.15.2")
            .channel_group("stable")
            .default_(true)
            .enabled(true)
            .build();

        let row: Vec<_> = version.into_table_row(()).into_iter().map(|c| c.0).collect();
        insta::assert_json_snapshot!(row, @r###"
        [
          "openshift-v4.15.2",
          "4.15.2",
          "stable",
          true,
          true,
          null
        ]
        "###);
    }
}
