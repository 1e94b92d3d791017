string_enums! {
    /// Overall state of a cluster.
    pub enum ClusterState {
        Error = "error",
        Hibernating = "hibernating",
        Installing = "installing",
        Pending = "pending",
        PoweringDown = "powering_down",
        Ready = "ready",
        Resuming = "resuming",
        Uninstalling = "uninstalling",
        Unknown = "unknown",
        Validating = "validating",
        Waiting = "waiting",
    }

    /// Whether an API or ingress listens on a public or a private address.
    pub enum ListeningMethod {
        External = "external",
        Internal = "internal",
    }

    pub enum BillingModel {
        Marketplace = "marketplace",
        MarketplaceAws = "marketplace-aws",
        MarketplaceAzure = "marketplace-azure",
        MarketplaceGcp = "marketplace-gcp",
        MarketplaceRhm = "marketplace-rhm",
        Standard = "standard",
    }

    pub enum ClusterHealthState {
        Healthy = "healthy",
        Unhealthy = "unhealthy",
        Unknown = "unknown",
    }

    pub enum ClusterMigrationType {
        SdnToOvn = "sdnToOvn",
    }

    pub enum ClusterMigrationStateValue {
        Completed = "completed",
        InProgress = "in_progress",
        Scheduled = "scheduled",
    }

    /// Lifecycle of a break glass credential.
    pub enum BreakGlassCredentialStatus {
        AwaitingRevocation = "awaiting_revocation",
        Created = "created",
        Expired = "expired",
        Failed = "failed",
        Issued = "issued",
        Revoked = "revoked",
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_known_and_unknown_values() {
        assert_eq!(ClusterState::from("ready"), ClusterState::Ready);
        assert_eq!(
            "powering_down".parse::<ClusterState>().unwrap(),
            ClusterState::PoweringDown
        );
        assert_eq!(
            ClusterState::from("frozen"),
            ClusterState::Other("frozen".to_string())
        );
        assert_eq!(ClusterState::Other("frozen".to_string()).as_str(), "frozen");
        assert_eq!(BillingModel::MarketplaceAws.to_string(), "marketplace-aws");
        assert_eq!(ClusterMigrationType::SdnToOvn.as_str(), "sdnToOvn");
        assert_eq!(ListeningMethod::default().as_str(), "");
    }

    #[test]
    fn test_serde() {
        let states: Vec<ClusterState> =
            serde_json::from_str(r#"["installing", "waiting", "melting"]"#).unwrap();
        assert_eq!(
            states,
            vec![
                ClusterState::Installing,
                ClusterState::Waiting,
                ClusterState::Other("melting".to_string()),
            ]
        );
        assert_eq!(
            serde_json::to_string(&states).unwrap(),
            r#"["installing","waiting","melting"]"#
        );
    }
}
