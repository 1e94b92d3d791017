use crate::{
    Aws, BillingModel, ClusterHealthState, ClusterState, ExternalAuthConfig,
    ExternalConfiguration, IngressList, ListBuilder, ListeningMethod, MachinePoolAutoscaling,
    MachinePoolList, MachineType, NodePoolList,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

types! {
    /// Cluster is an OpenShift cluster managed by the service.
    resource Cluster (builder ClusterBuilder, list ClusterList, kind "Cluster") {
        /// Information about the API of the cluster.
        3 => api ("api"): ClusterApi = ClusterApiBuilder, ref;
        /// Amazon Web Services settings of the cluster.
        4 => aws ("aws"): Aws = crate::AwsBuilder, ref;
        /// Customer Cloud Subscription settings of the cluster.
        5 => ccs ("ccs"): Ccs = CcsBuilder, ref;
        6 => dns ("dns"): Dns = DnsBuilder, ref;
        /// True if FIPS mode is enabled for the cluster.
        7 => fips ("fips"): bool = bool, copy;
        8 => additional_trust_bundle ("additional_trust_bundle"): String = String, str;
        9 => auto_node ("auto_node"): ClusterAutoNode = ClusterAutoNodeBuilder, ref;
        10 => billing_model ("billing_model"): BillingModel = BillingModel, ref;
        11 => cloud_provider ("cloud_provider"): CloudProvider = CloudProviderBuilder, ref;
        /// Information about the console of the cluster.
        12 => console ("console"): ClusterConsole = ClusterConsoleBuilder, ref;
        13 => creation_timestamp ("creation_timestamp"): DateTime<Utc> = DateTime<Utc>, copy;
        14 => delete_protection ("delete_protection"): DeleteProtection = DeleteProtectionBuilder, ref;
        15 => disable_user_workload_monitoring ("disable_user_workload_monitoring"): bool = bool, copy;
        16 => domain_prefix ("domain_prefix"): String = String, str;
        17 => etcd_encryption ("etcd_encryption"): bool = bool, copy;
        /// Date and time when the cluster will be automatically deleted.
        18 => expiration_timestamp ("expiration_timestamp"): DateTime<Utc> = DateTime<Utc>, copy;
        /// Identifier of the cluster generated by the installer.
        19 => external_id ("external_id"): String = String, str;
        20 => external_auth_config ("external_auth_config"): ExternalAuthConfig = crate::ExternalAuthConfigBuilder, ref;
        21 => external_configuration ("external_configuration"): ExternalConfiguration = crate::ExternalConfigurationBuilder, ref;
        22 => flavour ("flavour"): Flavour = FlavourBuilder, ref;
        23 => health_state ("health_state"): ClusterHealthState = ClusterHealthState, ref;
        24 => hypershift ("hypershift"): Hypershift = HypershiftBuilder, ref;
        25 => infra_id ("infra_id"): String = String, str;
        26 => ingresses ("ingresses"): IngressList = ListBuilder<crate::IngressBuilder>, ref;
        27 => load_balancer_quota ("load_balancer_quota"): i64 = i64, copy;
        28 => machine_pools ("machine_pools"): MachinePoolList = ListBuilder<crate::MachinePoolBuilder>, ref;
        /// True if the cluster is managed by the service.
        29 => managed ("managed"): bool = bool, copy;
        30 => multi_az ("multi_az"): bool = bool, copy;
        31 => multi_arch_enabled ("multi_arch_enabled"): bool = bool, copy;
        /// Name of the cluster, unique within its organization.
        32 => name ("name"): String = String, str;
        33 => network ("network"): Network = NetworkBuilder, ref;
        34 => node_drain_grace_period ("node_drain_grace_period"): Value = ValueBuilder, ref;
        35 => node_pools ("node_pools"): NodePoolList = ListBuilder<crate::NodePoolBuilder>, ref;
        36 => nodes ("nodes"): ClusterNodes = ClusterNodesBuilder, ref;
        37 => openshift_version ("openshift_version"): String = String, str;
        38 => product ("product"): Product = ProductBuilder, ref;
        /// User defined properties for tagging and querying.
        39 => properties ("properties"): BTreeMap<String, String> = BTreeMap<String, String>, ref;
        40 => proxy ("proxy"): Proxy = ProxyBuilder, ref;
        41 => region ("region"): CloudRegion = CloudRegionBuilder, ref;
        /// Overall state of the cluster.
        42 => state ("state"): ClusterState = ClusterState, ref;
        43 => status ("status"): ClusterStatus = ClusterStatusBuilder, ref;
        44 => storage_quota ("storage_quota"): Value = ValueBuilder, ref;
        45 => subscription ("subscription"): Subscription = SubscriptionBuilder, ref;
        46 => version ("version"): Version = VersionBuilder, ref;
    }

    /// Detailed status of a cluster.
    resource ClusterStatus (builder ClusterStatusBuilder, list ClusterStatusList, kind "ClusterStatus") {
        3 => dns_ready ("dns_ready"): bool = bool, copy;
        4 => oidc_ready ("oidc_ready"): bool = bool, copy;
        5 => configuration_mode ("configuration_mode"): String = String, str;
        6 => current_compute ("current_compute"): i64 = i64, copy;
        7 => description ("description"): String = String, str;
        8 => limited_support_reason_count ("limited_support_reason_count"): i64 = i64, copy;
        9 => provision_error_code ("provision_error_code"): String = String, str;
        10 => provision_error_message ("provision_error_message"): String = String, str;
        11 => state ("state"): ClusterState = ClusterState, ref;
    }

    resource Product (builder ProductBuilder, list ProductList, kind "Product") {
        3 => name ("name"): String = String, str;
    }

    /// Set of predefined properties of a cluster.
    resource Flavour (builder FlavourBuilder, list FlavourList, kind "Flavour") {
        3 => name ("name"): String = String, str;
        4 => network ("network"): Network = NetworkBuilder, ref;
    }

    resource Subscription (builder SubscriptionBuilder, list SubscriptionList, kind "Subscription") {}

    /// Version of OpenShift which clusters can be created with or upgraded to.
    resource Version (builder VersionBuilder, list VersionList, kind "Version") {
        3 => available_upgrades ("available_upgrades"): Vec<String> = Vec<String>, ref;
        4 => channel_group ("channel_group"): String = String, str;
        /// True if this is the default version for new clusters.
        5 => default_ ("default"): bool = bool, copy;
        6 => enabled ("enabled"): bool = bool, copy;
        7 => end_of_life_timestamp ("end_of_life_timestamp"): DateTime<Utc> = DateTime<Utc>, copy;
        8 => hosted_control_plane_enabled ("hosted_control_plane_enabled"): bool = bool, copy;
        9 => raw_id ("raw_id"): String = String, str;
        10 => release_image ("release_image"): String = String, str;
        11 => rosa_enabled ("rosa_enabled"): bool = bool, copy;
    }

    resource Ccs (builder CcsBuilder, list CcsList, kind "CCS") {
        3 => disable_scp_checks ("disable_scp_checks"): bool = bool, copy;
        4 => enabled ("enabled"): bool = bool, copy;
    }

    /// Cloud provider, such as `aws` or `gcp`.
    resource CloudProvider (builder CloudProviderBuilder, list CloudProviderList, kind "CloudProvider") {
        3 => display_name ("display_name"): String = String, str;
        4 => name ("name"): String = String, str;
        5 => regions ("regions"): CloudRegionList = ListBuilder<CloudRegionBuilder>, ref;
    }

    resource CloudRegion (builder CloudRegionBuilder, list CloudRegionList, kind "CloudRegion") {
        3 => ccs_only ("ccs_only"): bool = bool, copy;
        4 => cloud_provider ("cloud_provider"): CloudProvider = CloudProviderBuilder, ref;
        5 => display_name ("display_name"): String = String, str;
        6 => enabled ("enabled"): bool = bool, copy;
        7 => govcloud ("govcloud"): bool = bool, copy;
        8 => kms_location_id ("kms_location_id"): String = String, str;
        9 => name ("name"): String = String, str;
        10 => supports_hypershift ("supports_hypershift"): bool = bool, copy;
        11 => supports_multi_az ("supports_multi_az"): bool = bool, copy;
    }

    /// Information about the API of a cluster.
    struct ClusterApi (builder ClusterApiBuilder) {
        0 => url ("url"): String = String, str;
        1 => listening ("listening"): ListeningMethod = ListeningMethod, ref;
    }

    struct ClusterConsole (builder ClusterConsoleBuilder) {
        0 => url ("url"): String = String, str;
    }

    /// Counts and types of the nodes of a cluster.
    struct ClusterNodes (builder ClusterNodesBuilder) {
        0 => autoscale_compute ("autoscale_compute"): MachinePoolAutoscaling = crate::MachinePoolAutoscalingBuilder, ref;
        1 => availability_zones ("availability_zones"): Vec<String> = Vec<String>, ref;
        2 => compute ("compute"): i64 = i64, copy;
        3 => compute_labels ("compute_labels"): BTreeMap<String, String> = BTreeMap<String, String>, ref;
        4 => compute_machine_type ("compute_machine_type"): MachineType = crate::MachineTypeBuilder, ref;
        5 => infra ("infra"): i64 = i64, copy;
        6 => master ("master"): i64 = i64, copy;
    }

    struct ClusterAutoNode (builder ClusterAutoNodeBuilder) {
        0 => mode ("mode"): String = String, str;
    }

    struct DeleteProtection (builder DeleteProtectionBuilder) {
        0 => enabled ("enabled"): bool = bool, copy;
    }

    struct Hypershift (builder HypershiftBuilder) {
        0 => enabled ("enabled"): bool = bool, copy;
    }

    /// Numeric amount with a unit, such as `10 GiB` or `30 minutes`.
    struct Value (builder ValueBuilder) {
        0 => unit ("unit"): String = String, str;
        1 => value ("value"): f64 = f64, copy;
    }

    struct Dns (builder DnsBuilder) {
        0 => base_domain ("base_domain"): String = String, str;
    }

    struct Proxy (builder ProxyBuilder) {
        0 => http_proxy ("http_proxy"): String = String, str;
        1 => https_proxy ("https_proxy"): String = String, str;
        2 => no_proxy ("no_proxy"): String = String, str;
    }

    /// Network configuration of a cluster.
    struct Network (builder NetworkBuilder) {
        0 => host_prefix ("host_prefix"): i64 = i64, copy;
        1 => machine_cidr ("machine_cidr"): String = String, str;
        2 => pod_cidr ("pod_cidr"): String = String, str;
        3 => service_cidr ("service_cidr"): String = String, str;
        /// Network plugin, such as `OVNKubernetes`.
        4 => type_ ("type"): String = String, str;
    }
}

impl Cluster {
    /// True if the control plane of the cluster is hosted outside of it.
    pub fn is_hypershift(&self) -> bool {
        self.hypershift()
            .and_then(Hypershift::enabled)
            .unwrap_or(false)
    }

    /// True if the cluster uses short lived credentials obtained through STS.
    pub fn is_sts(&self) -> bool {
        self.aws()
            .and_then(Aws::sts)
            .and_then(|sts| sts.role_arn())
            .map_or(false, |arn| !arn.is_empty())
    }

    pub fn is_console_available(&self) -> bool {
        self.console()
            .and_then(ClusterConsole::url)
            .map_or(false, |url| !url.is_empty())
    }

    /// True if the OIDC configuration of the cluster may be shared with other clusters.
    pub fn is_oidc_config_reusable(&self) -> bool {
        self.aws()
            .and_then(Aws::sts)
            .and_then(|sts| sts.oidc_config())
            .and_then(|oidc| oidc.reusable())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{AwsBuilder, MachinePool, OidcConfig, Resource, Sts};
    use serde_json::json;

    fn fixture() -> Cluster {
        Cluster::builder()
            .id("123")
            .href("/api/clusters_mgmt/v1/clusters/123")
            .name("my-cluster")
            .state(ClusterState::Ready)
            .multi_az(true)
            .creation_timestamp("2024-03-01T10:00:00Z".parse::<DateTime<Utc>>().unwrap())
            .region(CloudRegion::builder().id("us-east-1").link(true))
            .api(
                ClusterApi::builder()
                    .url("https://api.my-cluster.example.com:6443")
                    .listening(ListeningMethod::External),
            )
            .nodes(
                ClusterNodes::builder()
                    .compute(3)
                    .availability_zones(vec!["us-east-1a".to_string()]),
            )
            .properties(BTreeMap::from([("owner".to_string(), "me".to_string())]))
            .machine_pools(
                ListBuilder::new()
                    .push(MachinePool::builder().id("worker").replicas(3))
                    .href("/api/clusters_mgmt/v1/clusters/123/machine_pools"),
            )
            .build()
    }

    #[test]
    fn test_accessors_track_presence() {
        let cluster = fixture();

        assert_eq!(cluster.kind(), "Cluster");
        assert!(!cluster.link());
        assert!(!cluster.empty());
        assert_eq!(cluster.id(), Some("123"));
        assert_eq!(cluster.name(), Some("my-cluster"));
        assert_eq!(cluster.state(), Some(&ClusterState::Ready));
        assert_eq!(cluster.multi_az(), Some(true));
        assert_eq!(cluster.nodes().and_then(ClusterNodes::compute), Some(3));
        assert_eq!(cluster.nodes().and_then(ClusterNodes::master), None);
        assert_eq!(cluster.region().map(CloudRegion::kind), Some("CloudRegionLink"));

        // Unset attributes are absent, even where their zero value would be meaningful.
        assert_eq!(cluster.fips(), None);
        assert_eq!(cluster.external_id(), None);
        assert!(cluster.aws().is_none());
        assert!(cluster.ingresses().is_none());
    }

    #[test]
    fn test_empty_and_link() {
        assert!(Cluster::builder().empty());
        assert!(Cluster::builder().link(true).empty());
        assert!(!Cluster::builder().id("1").empty());
        assert!(Cluster::builder().build().empty());
        assert!(Value::builder().build().empty());
        assert!(!Value::builder().value(1.5).build().empty());

        let link = Cluster::builder().link(true).link(false).id("1").build();
        assert!(!link.link());
        assert_eq!(<Cluster as Resource>::LIST_LINK_KIND, "ClusterListLink");
        assert_eq!(<Ccs as Resource>::LINK_KIND, "CCSLink");
    }

    #[test]
    fn test_copy_then_build_is_identity() {
        let cluster = fixture();
        assert_eq!(ClusterBuilder::copy(&cluster).build(), cluster);

        let renamed = ClusterBuilder::copy(&cluster).name("renamed").build();
        assert_eq!(renamed.name(), Some("renamed"));
        assert_eq!(renamed.id(), cluster.id());
        assert_eq!(renamed.machine_pools(), cluster.machine_pools());
    }

    #[test]
    fn test_cluster_encoding() {
        insta::assert_json_snapshot!(fixture(), @r###"
        {
          "kind": "Cluster",
          "id": "123",
          "href": "/api/clusters_mgmt/v1/clusters/123",
          "api": {
            "url": "https://api.my-cluster.example.com:6443",
            "listening": "external"
          },
          "creation_timestamp": "2024-03-01T10:00:00Z",
          "machine_pools": {
            "kind": "MachinePoolList",
            "href": "/api/clusters_mgmt/v1/clusters/123/machine_pools",
            "items": [
              {
                "kind": "MachinePool",
                "id": "worker",
                "replicas": 3
              }
            ]
          },
          "multi_az": true,
          "name": "my-cluster",
          "nodes": {
            "availability_zones": [
              "us-east-1a"
            ],
            "compute": 3
          },
          "properties": {
            "owner": "me"
          },
          "region": {
            "kind": "CloudRegionLink",
            "id": "us-east-1"
          },
          "state": "ready"
        }
        "###);
    }

    #[test]
    fn test_cluster_decoding() {
        let cluster: Cluster = serde_json::from_value(json!({
            "state": "installing",
            "kind": "ClusterLink",
            "name": "decoded",
            "external_id": null,
            "dns": {"base_domain": "example.com", "unknown": [1, 2, 3]},
            "hypershift": {"enabled": true},
            "version": {"kind": "Version", "id": "openshift-v4.15.2", "raw_id": "4.15.2"},
            "expiration_timestamp": "2024-05-01T00:00:00.5+02:00",
            "some_future_field": {"a": "b"},
        }))
        .unwrap();

        assert!(cluster.link());
        assert_eq!(cluster.kind(), "ClusterLink");
        assert_eq!(cluster.id(), None);
        assert_eq!(cluster.name(), Some("decoded"));
        assert_eq!(cluster.external_id(), None);
        assert_eq!(cluster.state(), Some(&ClusterState::Installing));
        assert_eq!(cluster.dns().and_then(Dns::base_domain), Some("example.com"));
        assert_eq!(cluster.version().and_then(Version::raw_id), Some("4.15.2"));
        assert_eq!(
            cluster.expiration_timestamp().map(|ts| ts.to_rfc3339()),
            Some("2024-04-30T22:00:00.500+00:00".to_string())
        );
        assert!(cluster.is_hypershift());
    }

    #[test]
    fn test_helpers() {
        let cluster = Cluster::builder().build();
        assert!(!cluster.is_hypershift());
        assert!(!cluster.is_sts());
        assert!(!cluster.is_console_available());
        assert!(!cluster.is_oidc_config_reusable());

        let cluster = Cluster::builder()
            .console(ClusterConsole::builder().url("https://console.example.com"))
            .aws(
                AwsBuilder::new().sts(
                    Sts::builder()
                        .role_arn("arn:aws:iam::123:role/Installer")
                        .oidc_config(OidcConfig::builder().id("oidc").reusable(true)),
                ),
            )
            .build();
        assert!(cluster.is_sts());
        assert!(cluster.is_console_available());
        assert!(cluster.is_oidc_config_reusable());

        let cluster = Cluster::builder()
            .console(ClusterConsole::builder().url(""))
            .aws(AwsBuilder::new().sts(Sts::builder().role_arn("")))
            .build();
        assert!(!cluster.is_sts());
        assert!(!cluster.is_console_available());
    }
}
