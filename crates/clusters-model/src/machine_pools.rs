use crate::{AwsVolume, AwsVolumeBuilder, Version, VersionBuilder};
use std::collections::BTreeMap;

types! {
    /// Group of worker nodes of a cluster which share a configuration.
    resource MachinePool (builder MachinePoolBuilder, list MachinePoolList, kind "MachinePool") {
        3 => autoscaling ("autoscaling"): MachinePoolAutoscaling = MachinePoolAutoscalingBuilder, ref;
        4 => availability_zones ("availability_zones"): Vec<String> = Vec<String>, ref;
        5 => instance_type ("instance_type"): String = String, str;
        6 => labels ("labels"): BTreeMap<String, String> = BTreeMap<String, String>, ref;
        /// Number of nodes, when the pool isn't autoscaled.
        7 => replicas ("replicas"): i64 = i64, copy;
        8 => root_volume ("root_volume"): RootVolume = RootVolumeBuilder, ref;
        9 => subnets ("subnets"): Vec<String> = Vec<String>, ref;
        10 => taints ("taints"): Vec<Taint> = Vec<TaintBuilder>, ref;
    }

    resource MachinePoolAutoscaling (builder MachinePoolAutoscalingBuilder, list MachinePoolAutoscalingList, kind "MachinePoolAutoscaling") {
        3 => max_replicas ("max_replicas"): i64 = i64, copy;
        4 => min_replicas ("min_replicas"): i64 = i64, copy;
    }

    /// Kubernetes taint applied to the nodes of a pool.
    struct Taint (builder TaintBuilder) {
        0 => effect ("effect"): String = String, str;
        1 => key ("key"): String = String, str;
        2 => value ("value"): String = String, str;
    }

    struct RootVolume (builder RootVolumeBuilder) {
        0 => aws ("aws"): AwsVolume = AwsVolumeBuilder, ref;
    }

    /// Type of cloud instance which nodes can run on.
    resource MachineType (builder MachineTypeBuilder, list MachineTypeList, kind "MachineType") {
        3 => category ("category"): String = String, str;
        4 => cpu ("cpu"): crate::Value = crate::ValueBuilder, ref;
        5 => generic_name ("generic_name"): String = String, str;
        6 => memory ("memory"): crate::Value = crate::ValueBuilder, ref;
        7 => name ("name"): String = String, str;
        8 => size ("size"): String = String, str;
    }

    /// Group of nodes of a hosted control plane cluster.
    resource NodePool (builder NodePoolBuilder, list NodePoolList, kind "NodePool") {
        3 => aws_node_pool ("aws_node_pool"): AwsNodePool = AwsNodePoolBuilder, ref;
        4 => auto_repair ("auto_repair"): bool = bool, copy;
        5 => autoscaling ("autoscaling"): NodePoolAutoscaling = NodePoolAutoscalingBuilder, ref;
        6 => availability_zone ("availability_zone"): String = String, str;
        7 => labels ("labels"): BTreeMap<String, String> = BTreeMap<String, String>, ref;
        8 => replicas ("replicas"): i64 = i64, copy;
        9 => status ("status"): NodePoolStatus = NodePoolStatusBuilder, ref;
        10 => subnet ("subnet"): String = String, str;
        11 => taints ("taints"): Vec<Taint> = Vec<TaintBuilder>, ref;
        12 => version ("version"): Version = VersionBuilder, ref;
    }

    resource NodePoolAutoscaling (builder NodePoolAutoscalingBuilder, list NodePoolAutoscalingList, kind "NodePoolAutoscaling") {
        3 => max_replica ("max_replica"): i64 = i64, copy;
        4 => min_replica ("min_replica"): i64 = i64, copy;
    }

    resource AwsNodePool (builder AwsNodePoolBuilder, list AwsNodePoolList, kind "AWSNodePool") {
        3 => additional_security_group_ids ("additional_security_group_ids"): Vec<String> = Vec<String>, ref;
        4 => instance_profile ("instance_profile"): String = String, str;
        5 => instance_type ("instance_type"): String = String, str;
        6 => root_volume ("root_volume"): AwsVolume = AwsVolumeBuilder, ref;
        7 => tags ("tags"): BTreeMap<String, String> = BTreeMap<String, String>, ref;
    }

    resource NodePoolStatus (builder NodePoolStatusBuilder, list NodePoolStatusList, kind "NodePoolStatus") {
        3 => current_replicas ("current_replicas"): i64 = i64, copy;
        4 => message ("message"): String = String, str;
    }
}

impl MachinePool {
    /// Describes the size of the pool: its replica count, or its autoscaling bounds.
    pub fn replicas_summary(&self) -> String {
        match (self.autoscaling(), self.replicas()) {
            (Some(autoscaling), _) => format!(
                "{}-{}",
                autoscaling.min_replicas().unwrap_or_default(),
                autoscaling.max_replicas().unwrap_or_default(),
            ),
            (None, Some(replicas)) => replicas.to_string(),
            (None, None) => String::new(),
        }
    }
}
