use crate::{quote, Client, Collection, Error, Item, Response, API_PREFIX};
use clusters_model::{
    BreakGlassCredential, CloudProvider, CloudRegion, Cluster, ClusterMigration, ClusterState,
    ClusterStatus, DeleteProtection, ExternalAuth, Ingress, Label, MachinePool, MachineType,
    NodePool, Version,
};
use std::ops::Deref;

/// Client of a single cluster and its sub-resources. It dereferences to
/// the [`Item`] of the cluster itself, for `get`, `update`, `delete` and `poll`.
#[derive(Clone)]
pub struct ClusterClient(Item<Cluster>);

impl Deref for ClusterClient {
    type Target = Item<Cluster>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl ClusterClient {
    fn collection<T>(&self, name: &str) -> Collection<T> {
        Collection::new(self.client(), format!("{}/{name}", self.path()))
    }

    fn item<T>(&self, name: &str) -> Item<T> {
        Item::new(self.client(), format!("{}/{name}", self.path()))
    }

    /// Moves the cluster into hibernation, stopping its nodes.
    pub async fn hibernate(&self) -> Result<Response<()>, Error> {
        self.action("hibernate").await
    }

    /// Resumes a hibernating cluster.
    pub async fn resume(&self) -> Result<Response<()>, Error> {
        self.action("resume").await
    }

    pub fn status(&self) -> Item<ClusterStatus> {
        self.item("status")
    }

    pub fn delete_protection(&self) -> Item<DeleteProtection> {
        self.item("delete_protection")
    }

    pub fn machine_pools(&self) -> Collection<MachinePool> {
        self.collection("machine_pools")
    }

    pub fn node_pools(&self) -> Collection<NodePool> {
        self.collection("node_pools")
    }

    pub fn ingresses(&self) -> Collection<Ingress> {
        self.collection("ingresses")
    }

    pub fn external_configuration_labels(&self) -> Collection<Label> {
        self.collection("external_configuration/labels")
    }

    pub fn migrations(&self) -> Collection<ClusterMigration> {
        self.collection("migrations")
    }

    pub fn break_glass_credentials(&self) -> BreakGlassCredentials {
        BreakGlassCredentials(self.collection("break_glass_credentials"))
    }

    pub fn external_auths(&self) -> Collection<ExternalAuth> {
        self.collection("external_auth_config/external_auths")
    }
}

/// Collection of the break glass credentials of a cluster.
#[derive(Clone)]
pub struct BreakGlassCredentials(Collection<BreakGlassCredential>);

impl Deref for BreakGlassCredentials {
    type Target = Collection<BreakGlassCredential>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl BreakGlassCredentials {
    /// Revokes every credential of the cluster.
    pub async fn revoke(&self) -> Result<Response<()>, Error> {
        self.client()
            .send_empty(reqwest::Method::DELETE, self.path(), &[], None)
            .await
    }
}

/// Client of a single cloud provider and its regions.
#[derive(Clone)]
pub struct CloudProviderClient(Item<CloudProvider>);

impl Deref for CloudProviderClient {
    type Target = Item<CloudProvider>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl CloudProviderClient {
    pub fn regions(&self) -> Collection<CloudRegion> {
        Collection::new(self.client(), format!("{}/regions", self.path()))
    }
}

impl Client {
    pub fn clusters(&self) -> Collection<Cluster> {
        Collection::new(self, format!("{API_PREFIX}/clusters"))
    }

    pub fn cluster(&self, id: &str) -> ClusterClient {
        ClusterClient(self.clusters().item(id))
    }

    pub fn versions(&self) -> Collection<Version> {
        Collection::new(self, format!("{API_PREFIX}/versions"))
    }

    pub fn machine_types(&self) -> Collection<MachineType> {
        Collection::new(self, format!("{API_PREFIX}/machine_types"))
    }

    pub fn cloud_providers(&self) -> Collection<CloudProvider> {
        Collection::new(self, format!("{API_PREFIX}/cloud_providers"))
    }

    pub fn cloud_provider(&self, id: &str) -> CloudProviderClient {
        CloudProviderClient(self.cloud_providers().item(id))
    }

    /// Finds the cluster whose identifier, name or external identifier is `key`,
    /// among the clusters matching the optional search `filter`.
    #[tracing::instrument(skip(self), err)]
    pub async fn find_cluster(&self, key: &str, filter: Option<&str>) -> Result<Cluster, Error> {
        let key_search = format!(
            "(id = {key} OR name = {key} OR external_id = {key})",
            key = quote(key)
        );
        let search = match filter {
            Some(filter) if !filter.is_empty() => format!("{filter} AND {key_search}"),
            _ => key_search,
        };

        let response = self
            .clusters()
            .list()
            .search(search)
            .page(1)
            .size(1)
            .send()
            .await?;

        match (response.total, response.items.into_items().pop()) {
            (0, _) | (_, None) => Err(Error::NotFound(key.to_string())),
            (1, Some(cluster)) => Ok(cluster),
            (count, Some(_)) => Err(Error::Ambiguous {
                key: key.to_string(),
                count,
            }),
        }
    }

    /// Current state of a cluster, as reported by its status.
    #[tracing::instrument(skip(self), err)]
    pub async fn cluster_state(&self, id: &str) -> Result<Option<ClusterState>, Error> {
        let response = self.cluster(id).status().get().await?;
        Ok(response.body.state().cloned())
    }

    /// Fetches every cluster matching `search`, page by page. A non-zero
    /// `count` sets the page size, while zero uses the server's default.
    /// Negative counts are rejected.
    #[tracing::instrument(skip(self), err)]
    pub async fn query_clusters(&self, search: &str, count: i64) -> Result<Vec<Cluster>, Error> {
        if count < 0 {
            return Err(Error::InvalidCount(count));
        }
        let mut clusters = Vec::new();
        let mut page = 1;

        loop {
            let mut request = self.clusters().list().search(search).page(page);
            if count > 0 {
                request = request.size(count);
            }
            let response = request.send().await?;
            let done = response.size != count || response.items.is_empty();
            clusters.extend(response.items.into_items());

            if done {
                break;
            }
            page += 1;
        }
        Ok(clusters)
    }

    /// True unless the cluster's external configuration disables legacy
    /// ingress support through its label.
    #[tracing::instrument(skip(self, cluster), fields(cluster = cluster.id()), err)]
    pub async fn has_legacy_ingress_support(&self, cluster: &Cluster) -> Result<bool, Error> {
        let id = cluster.id().unwrap_or_default();
        let labels = self
            .cluster(id)
            .external_configuration_labels()
            .list()
            .send()
            .await?;

        for label in labels.items.iter() {
            if label.key() == Some(crate::LEGACY_INGRESS_SUPPORT_LABEL) {
                return label.bool_value().ok_or_else(|| Error::InvalidLabel {
                    key: crate::LEGACY_INGRESS_SUPPORT_LABEL.to_string(),
                    value: label.value().unwrap_or_default().to_string(),
                });
            }
        }
        Ok(true)
    }
}
