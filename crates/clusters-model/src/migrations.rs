use crate::{ClusterMigrationStateValue, ClusterMigrationType};
use chrono::{DateTime, Utc};

types! {
    /// Migration of a cluster to a different configuration, such as a
    /// different network plugin.
    resource ClusterMigration (builder ClusterMigrationBuilder, list ClusterMigrationList, kind "ClusterMigration") {
        3 => cluster_id ("cluster_id"): String = String, str;
        4 => creation_timestamp ("creation_timestamp"): DateTime<Utc> = DateTime<Utc>, copy;
        5 => sdn_to_ovn ("sdn_to_ovn"): SdnToOvnClusterMigration = SdnToOvnClusterMigrationBuilder, ref;
        6 => state ("state"): ClusterMigrationState = ClusterMigrationStateBuilder, ref;
        7 => type_ ("type"): ClusterMigrationType = ClusterMigrationType, ref;
        8 => updated_timestamp ("updated_timestamp"): DateTime<Utc> = DateTime<Utc>, copy;
    }

    struct ClusterMigrationState (builder ClusterMigrationStateBuilder) {
        0 => description ("description"): String = String, str;
        1 => value ("value"): ClusterMigrationStateValue = ClusterMigrationStateValue, ref;
    }

    /// Subnets reserved for the internal networks of OVN-Kubernetes.
    struct SdnToOvnClusterMigration (builder SdnToOvnClusterMigrationBuilder) {
        0 => join_ipv4 ("join_ipv4"): String = String, str;
        1 => masquerade_ipv4 ("masquerade_ipv4"): String = String, str;
        2 => transit_ipv4 ("transit_ipv4"): String = String, str;
    }
}
