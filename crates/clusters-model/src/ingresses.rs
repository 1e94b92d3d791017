use crate::{ListBuilder, ListeningMethod};
use std::collections::BTreeMap;

types! {
    /// Ingress router of a cluster.
    resource Ingress (builder IngressBuilder, list IngressList, kind "Ingress") {
        3 => dns_name ("dns_name"): String = String, str;
        /// True if this is the default ingress of the cluster.
        4 => default_ ("default"): bool = bool, copy;
        5 => excluded_namespaces ("excluded_namespaces"): Vec<String> = Vec<String>, ref;
        6 => listening ("listening"): ListeningMethod = ListeningMethod, ref;
        7 => load_balancer_type ("load_balancer_type"): String = String, str;
        8 => route_namespace_ownership_policy ("route_namespace_ownership_policy"): String = String, str;
        9 => route_selectors ("route_selectors"): BTreeMap<String, String> = BTreeMap<String, String>, ref;
        10 => route_wildcard_policy ("route_wildcard_policy"): String = String, str;
    }

    resource Label (builder LabelBuilder, list LabelList, kind "Label") {
        3 => internal ("internal"): bool = bool, copy;
        4 => key ("key"): String = String, str;
        5 => value ("value"): String = String, str;
    }

    /// Configuration of a cluster which is managed outside of the service.
    struct ExternalConfiguration (builder ExternalConfigurationBuilder) {
        0 => labels ("labels"): LabelList = ListBuilder<LabelBuilder>, ref;
    }
}

impl Label {
    /// Interprets the value of the label as a boolean, accepting the same
    /// spellings as the upstream command-line tooling.
    pub fn bool_value(&self) -> Option<bool> {
        match self.value()? {
            "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
            "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_label_values() {
        let cases = [
            ("true", Some(true)),
            ("T", Some(true)),
            ("1", Some(true)),
            ("False", Some(false)),
            ("0", Some(false)),
            ("yes", None),
        ];
        for (value, expect) in cases {
            let label = Label::builder().key("k").value(value).build();
            assert_eq!(label.bool_value(), expect, "{value}");
        }
        assert_eq!(Label::builder().key("k").build().bool_value(), None);
    }

    #[test]
    fn test_external_configuration() {
        let config: ExternalConfiguration = serde_json::from_value(json!({
            "labels": {
                "kind": "LabelListLink",
                "href": "/api/clusters_mgmt/v1/clusters/123/external_configuration/labels",
            },
        }))
        .unwrap();

        let labels = config.labels().unwrap();
        assert!(labels.link());
        assert!(labels.is_empty());
        assert_eq!(
            serde_json::to_value(&config).unwrap(),
            json!({
                "labels": {
                    "kind": "LabelListLink",
                    "href": "/api/clusters_mgmt/v1/clusters/123/external_configuration/labels",
                    "items": [],
                },
            })
        );
    }

    #[test]
    fn test_ingress_default() {
        let ingress: Ingress = serde_json::from_value(json!({
            "kind": "Ingress",
            "id": "abc",
            "default": true,
            "listening": "internal",
        }))
        .unwrap();
        assert_eq!(ingress.default_(), Some(true));
        assert_eq!(ingress.listening(), Some(&ListeningMethod::Internal));
        assert_eq!(
            serde_json::to_value(&ingress).unwrap(),
            json!({"kind": "Ingress", "id": "abc", "default": true, "listening": "internal"})
        );
    }
}
