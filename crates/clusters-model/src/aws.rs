use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

types! {
    /// Amazon Web Services specific settings of a cluster.
    struct Aws (builder AwsBuilder) {
        0 => access_key_id ("access_key_id"): String = String, str;
        1 => account_id ("account_id"): String = String, str;
        2 => additional_allowed_principals ("additional_allowed_principals"): Vec<String> = Vec<String>, ref;
        3 => audit_log ("audit_log"): AuditLog = AuditLogBuilder, ref;
        4 => auto_node ("auto_node"): AwsAutoNode = AwsAutoNodeBuilder, ref;
        5 => billing_account_id ("billing_account_id"): String = String, str;
        6 => etcd_encryption ("etcd_encryption"): AwsEtcdEncryption = AwsEtcdEncryptionBuilder, ref;
        7 => hcp_internal_communication_hosted_zone_id ("hcp_internal_communication_hosted_zone_id"): String = String, str;
        8 => private_hosted_zone_id ("private_hosted_zone_id"): String = String, str;
        9 => private_hosted_zone_role_arn ("private_hosted_zone_role_arn"): String = String, str;
        /// True if the API and ingresses are only reachable through a private link.
        10 => private_link ("private_link"): bool = bool, copy;
        11 => secret_access_key ("secret_access_key"): String = String, str;
        12 => sts ("sts"): Sts = StsBuilder, ref;
        13 => subnet_ids ("subnet_ids"): Vec<String> = Vec<String>, ref;
        /// Tags applied to the resources created in the account.
        14 => tags ("tags"): BTreeMap<String, String> = BTreeMap<String, String>, ref;
    }

    /// Security Token Service settings of a cluster.
    struct Sts (builder StsBuilder) {
        0 => oidc_endpoint_url ("oidc_endpoint_url"): String = String, str;
        1 => auto_mode ("auto_mode"): bool = bool, copy;
        2 => enabled ("enabled"): bool = bool, copy;
        3 => external_id ("external_id"): String = String, str;
        4 => instance_iam_roles ("instance_iam_roles"): InstanceIamRoles = InstanceIamRolesBuilder, ref;
        5 => managed_policies ("managed_policies"): bool = bool, copy;
        6 => oidc_config ("oidc_config"): OidcConfig = OidcConfigBuilder, ref;
        7 => operator_iam_roles ("operator_iam_roles"): Vec<OperatorIamRole> = Vec<OperatorIamRoleBuilder>, ref;
        8 => operator_role_prefix ("operator_role_prefix"): String = String, str;
        9 => permission_boundary ("permission_boundary"): String = String, str;
        /// Installer role assumed by the service.
        10 => role_arn ("role_arn"): String = String, str;
        11 => support_role_arn ("support_role_arn"): String = String, str;
    }

    struct InstanceIamRoles (builder InstanceIamRolesBuilder) {
        0 => master_role_arn ("master_role_arn"): String = String, str;
        1 => worker_role_arn ("worker_role_arn"): String = String, str;
    }

    /// Role assumed by a cluster operator through its service account.
    struct OperatorIamRole (builder OperatorIamRoleBuilder) {
        0 => name ("name"): String = String, str;
        1 => namespace ("namespace"): String = String, str;
        2 => role_arn ("role_arn"): String = String, str;
        3 => service_account ("service_account"): String = String, str;
    }

    /// OpenID Connect configuration which clusters use to federate identities.
    resource OidcConfig (builder OidcConfigBuilder, list OidcConfigList, kind "OidcConfig") {
        3 => creation_timestamp ("creation_timestamp"): DateTime<Utc> = DateTime<Utc>, copy;
        4 => installer_role_arn ("installer_role_arn"): String = String, str;
        5 => issuer_url ("issuer_url"): String = String, str;
        6 => last_update_timestamp ("last_update_timestamp"): DateTime<Utc> = DateTime<Utc>, copy;
        7 => last_used_timestamp ("last_used_timestamp"): DateTime<Utc> = DateTime<Utc>, copy;
        8 => managed ("managed"): bool = bool, copy;
        9 => organization_id ("organization_id"): String = String, str;
        10 => reusable ("reusable"): bool = bool, copy;
        11 => secret_arn ("secret_arn"): String = String, str;
    }

    struct AuditLog (builder AuditLogBuilder) {
        0 => role_arn ("role_arn"): String = String, str;
    }

    struct AwsAutoNode (builder AwsAutoNodeBuilder) {
        0 => role_arn ("role_arn"): String = String, str;
    }

    struct AwsEtcdEncryption (builder AwsEtcdEncryptionBuilder) {
        0 => kms_key_arn ("kms_key_arn"): String = String, str;
    }

    /// Settings of an AWS EBS volume.
    struct AwsVolume (builder AwsVolumeBuilder) {
        0 => iops ("iops"): i64 = i64, copy;
        1 => size ("size"): i64 = i64, copy;
    }
}

impl Sts {
    /// Returns the role of the given operator, if one is configured.
    pub fn operator_iam_role(&self, namespace: &str, name: &str) -> Option<&OperatorIamRole> {
        self.operator_iam_roles()?
            .iter()
            .find(|role| role.namespace() == Some(namespace) && role.name() == Some(name))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sts_round_trip() {
        let aws = Aws::builder()
            .account_id("123456789012")
            .private_link(false)
            .subnet_ids(vec!["subnet-a".to_string(), "subnet-b".to_string()])
            .sts(
                Sts::builder()
                    .role_arn("arn:aws:iam::123456789012:role/Installer")
                    .instance_iam_roles(
                        InstanceIamRoles::builder()
                            .master_role_arn("arn:aws:iam::123456789012:role/ControlPlane"),
                    )
                    .operator_iam_roles(vec![
                        OperatorIamRole::builder()
                            .namespace("openshift-ingress-operator")
                            .name("cloud-credentials")
                            .role_arn("arn:aws:iam::123456789012:role/Ingress"),
                        OperatorIamRole::builder()
                            .namespace("openshift-image-registry")
                            .name("installer-cloud-credentials"),
                    ]),
            )
            .build();

        let encoded = serde_json::to_value(&aws).unwrap();
        assert_eq!(
            encoded,
            json!({
                "account_id": "123456789012",
                "private_link": false,
                "sts": {
                    "instance_iam_roles": {
                        "master_role_arn": "arn:aws:iam::123456789012:role/ControlPlane",
                    },
                    "operator_iam_roles": [
                        {
                            "name": "cloud-credentials",
                            "namespace": "openshift-ingress-operator",
                            "role_arn": "arn:aws:iam::123456789012:role/Ingress",
                        },
                        {
                            "name": "installer-cloud-credentials",
                            "namespace": "openshift-image-registry",
                        },
                    ],
                    "role_arn": "arn:aws:iam::123456789012:role/Installer",
                },
                "subnet_ids": ["subnet-a", "subnet-b"],
            })
        );

        let decoded: Aws = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, aws);
        // An explicit `false` is present, unlike an unset attribute.
        assert_eq!(decoded.private_link(), Some(false));
        assert_eq!(decoded.secret_access_key(), None);

        let sts = decoded.sts().unwrap();
        assert_eq!(
            sts.operator_iam_role("openshift-ingress-operator", "cloud-credentials")
                .and_then(OperatorIamRole::role_arn),
            Some("arn:aws:iam::123456789012:role/Ingress")
        );
        assert!(sts.operator_iam_role("openshift-ingress-operator", "other").is_none());
    }
}
