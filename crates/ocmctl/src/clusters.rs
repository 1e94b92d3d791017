use crate::output::{to_table_row, CliOutput, JsonCell};
use anyhow::Context;
use clusters_model::Cluster;
use futures::TryStreamExt;
use std::time::Duration;

#[derive(Debug, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct Clusters {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// List clusters.
    List(List),
    /// Show the details of a cluster.
    ///
    /// The cluster is found by its identifier, name or external identifier.
    Describe(Describe),
    /// Print the current state of a cluster.
    State(ClusterId),
    /// Hibernate a cluster, stopping its nodes until it's resumed.
    Hibernate(ClusterId),
    /// Resume a hibernating cluster.
    Resume(ClusterId),
    /// Delete a cluster and its cloud resources.
    Delete(Delete),
}

#[derive(Debug, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct List {
    /// Search expression to filter clusters, such as `state = 'ready'`.
    #[clap(long)]
    search: Option<String>,
    /// Number of clusters to fetch per request.
    #[clap(long, default_value = "100", value_parser = clap::value_parser!(i64).range(1..))]
    size: i64,
}

#[derive(Debug, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct Describe {
    /// Identifier, name or external identifier of the cluster.
    key: String,
}

#[derive(Debug, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct ClusterId {
    /// Identifier of the cluster.
    id: String,
}

#[derive(Debug, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct Delete {
    /// Identifier of the cluster.
    id: String,
    /// Carry on with the deletion even if some cloud resources can't be removed.
    #[clap(long)]
    best_effort: bool,
    /// Wait until the cluster is gone.
    #[clap(long)]
    watch: bool,
    /// Seconds between checks of the cluster while watching.
    #[clap(long, default_value = "30")]
    watch_interval: u64,
}

/// Columns of cluster tables.
#[derive(Debug, Copy, Clone)]
pub enum Columns {
    Summary,
    Detailed,
}

impl CliOutput for Cluster {
    type TableAlt = Columns;
    type CellValue = JsonCell;

    fn table_headers(alt: Self::TableAlt) -> Vec<&'static str> {
        let mut headers = vec!["ID", "Name", "State", "Version", "Provider", "Region"];
        if let Columns::Detailed = alt {
            headers.extend(["External ID", "API URL", "Console URL", "Multi AZ", "Hosted CP"]);
        }
        headers
    }

    fn into_table_row(self, alt: Self::TableAlt) -> Vec<Self::CellValue> {
        let mut pointers = vec![
            "/id",
            "/name",
            "/state",
            "/openshift_version",
            "/cloud_provider/id",
            "/region/id",
        ];
        if let Columns::Detailed = alt {
            pointers.extend(["/external_id", "/api/url", "/console/url", "/multi_az"]);
        }
        let hypershift = self.is_hypershift();
        let mut row = to_table_row(self, &pointers);

        if let Columns::Detailed = alt {
            row.push(JsonCell(Some(serde_json::Value::Bool(hypershift))));
        }
        row
    }
}

impl Clusters {
    pub async fn run(&self, ctx: &mut crate::CliContext) -> anyhow::Result<()> {
        match &self.cmd {
            Command::List(list) => do_list(ctx, list).await,
            Command::Describe(Describe { key }) => do_describe(ctx, key).await,
            Command::State(ClusterId { id }) => do_state(ctx, id).await,
            Command::Hibernate(ClusterId { id }) => {
                ctx.client()?
                    .cluster(id)
                    .hibernate()
                    .await
                    .context("hibernating cluster")?;
                println!("Cluster '{id}' is hibernating.");
                Ok(())
            }
            Command::Resume(ClusterId { id }) => {
                ctx.client()?
                    .cluster(id)
                    .resume()
                    .await
                    .context("resuming cluster")?;
                println!("Cluster '{id}' is resuming.");
                Ok(())
            }
            Command::Delete(delete) => do_delete(ctx, delete).await,
        }
    }
}

async fn do_list(ctx: &mut crate::CliContext, List { search, size }: &List) -> anyhow::Result<()> {
    let client = ctx.client()?;

    let mut request = client.clusters().list().size(*size);
    if let Some(search) = search {
        request = request.search(search.clone());
    }
    let clusters: Vec<Cluster> = request
        .items()
        .try_collect()
        .await
        .context("listing clusters")?;

    ctx.write_all(clusters, Columns::Summary)
}

async fn do_describe(ctx: &mut crate::CliContext, key: &str) -> anyhow::Result<()> {
    let cluster = ctx
        .client()?
        .find_cluster(key, None)
        .await
        .with_context(|| format!("finding cluster '{key}'"))?;

    ctx.write_all(Some(cluster), Columns::Detailed)
}

async fn do_state(ctx: &mut crate::CliContext, id: &str) -> anyhow::Result<()> {
    let state = ctx
        .client()?
        .cluster_state(id)
        .await
        .context("fetching cluster status")?;

    match state {
        Some(state) => println!("{state}"),
        None => println!("unknown"),
    }
    Ok(())
}

async fn do_delete(ctx: &mut crate::CliContext, delete: &Delete) -> anyhow::Result<()> {
    let client = ctx.client()?;
    let cluster = client.cluster(&delete.id);

    cluster
        .delete()
        .best_effort(delete.best_effort)
        .send()
        .await
        .context("deleting cluster")?;

    if !delete.watch {
        println!("Cluster '{}' will be deleted.", delete.id);
        return Ok(());
    }
    tracing::info!(id = %delete.id, "waiting for the cluster to be deleted");

    cluster
        .poll()
        .interval(Duration::from_secs(delete.watch_interval))
        .status(clusters_client::StatusCode::NOT_FOUND)
        .start()
        .await
        .context("watching cluster deletion")?;

    println!("Cluster '{}' was deleted.", delete.id);
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Cli;
    use clap::Parser;

    fn fixture() -> Cluster {
        clusters_model::unmarshal_str(
            r#"{
                "kind": "Cluster",
                "id": "1a2b3c",
                "name": "prod",
                "external_id": "ext-1",
                "state": "ready",
                "openshift_version": "4.15.2",
                "cloud_provider": {"kind": "CloudProviderLink", "id": "aws"},
                "region": {"kind": "CloudRegionLink", "id": "us-east-1"},
                "api": {"url": "https://api.prod.example.com:6443"},
                "hypershift": {"enabled": true},
                "multi_az": true
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_cluster_rows() {
        let row: Vec<_> = fixture()
            .into_table_row(Columns::Summary)
            .into_iter()
            .map(|cell| cell.0)
            .collect();
        insta::assert_json_snapshot!(row, @r###"
        [
          "1a2b3c",
          "prod",
          "ready",
          "4.15.2",
          "aws",
          "us-east-1"
        ]
        "###);

        let row: Vec<_> = fixture()
            .into_table_row(Columns::Detailed)
            .into_iter()
            .map(|cell| cell.0)
            .collect();
        assert_eq!(row.len(), Cluster::table_headers(Columns::Detailed).len());
        insta::assert_json_snapshot!(&row[6..], @r###"
        [
          "ext-1",
          "https://api.prod.example.com:6443",
          null,
          true,
          true
        ]
        "###);
    }

    #[test]
    fn test_parse_delete() {
        let cli = Cli::try_parse_from([
            "ocmctl",
            "clusters",
            "delete",
            "1a2b3c",
            "--best-effort",
            "--watch",
        ])
        .unwrap();

        let crate::Command::Clusters(Clusters {
            cmd: Command::Delete(delete),
        }) = cli.cmd
        else {
            panic!("expected clusters delete");
        };
        assert_eq!(delete.id, "1a2b3c");
        assert!(delete.best_effort);
        assert!(delete.watch);
        assert_eq!(delete.watch_interval, 30);

        assert!(Cli::try_parse_from(["ocmctl", "clusters", "delete"]).is_err());
        assert!(Cli::try_parse_from(["ocmctl", "clusters", "list", "--size", "ten"]).is_err());
    }

    #[test]
    fn test_list_size_is_positive() {
        for size in ["--size=0", "--size=-5"] {
            let err = Cli::try_parse_from(["ocmctl", "clusters", "list", size]).unwrap_err();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation, "{err}");
        }
        let cli = Cli::try_parse_from(["ocmctl", "clusters", "list", "--size", "1"]).unwrap();
        let crate::Command::Clusters(Clusters {
            cmd: Command::List(list),
        }) = cli.cmd
        else {
            panic!("expected clusters list");
        };
        assert_eq!(list.size, 1);
    }
}
