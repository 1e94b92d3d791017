use crate::output::{to_table_row, CliOutput, JsonCell};
use anyhow::Context;
use clusters_model::MachinePool;
use futures::TryStreamExt;

#[derive(Debug, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct MachinePools {
    #[clap(subcommand)]
    cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
#[clap(rename_all = "kebab-case")]
pub enum Command {
    /// List the machine pools of a cluster.
    List(List),
}

#[derive(Debug, clap::Args)]
#[clap(rename_all = "kebab-case")]
pub struct List {
    /// Identifier, name or external identifier of the cluster.
    #[clap(long)]
    cluster: String,
}

impl CliOutput for MachinePool {
    type TableAlt = ();
    type CellValue = JsonCell;

    fn table_headers(_alt: Self::TableAlt) -> Vec<&'static str> {
        vec!["ID", "Replicas", "Instance Type", "Availability Zones", "Subnets"]
    }

    fn into_table_row(self, _alt: Self::TableAlt) -> Vec<Self::CellValue> {
        let replicas = self.replicas_summary();
        let zones = self.availability_zones().map(|z| z.join(", "));
        let subnets = self.subnets().map(|s| s.join(", "));

        let mut row = to_table_row(&self, &["/id"]);
        row.push(replicas.into());
        row.extend(to_table_row(&self, &["/instance_type"]));
        row.push(JsonCell(zones.map(Into::into)));
        row.push(JsonCell(subnets.map(Into::into)));
        row
    }
}

impl MachinePools {
    pub async fn run(&self, ctx: &mut crate::CliContext) -> anyhow::Result<()> {
        match &self.cmd {
            Command::List(List { cluster }) => {
                let client = ctx.client()?;
                let found = client
                    .find_cluster(cluster, None)
                    .await
                    .with_context(|| format!("finding cluster '{cluster}'"))?;
                let id = found.id().unwrap_or_default();

                let pools: Vec<MachinePool> = client
                    .cluster(id)
                    .machine_pools()
                    .list()
                    .items()
                    .try_collect()
                    .await
                    .context("listing machine pools")?;

                ctx.write_all(pools, ())
            }
        }
    }
}
