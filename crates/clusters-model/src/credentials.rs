use crate::BreakGlassCredentialStatus;
use chrono::{DateTime, Utc};

types! {
    /// Temporary credential which grants access to a cluster when its external
    /// authentication is unavailable.
    resource BreakGlassCredential (builder BreakGlassCredentialBuilder, list BreakGlassCredentialList, kind "BreakGlassCredential") {
        3 => expiration_timestamp ("expiration_timestamp"): DateTime<Utc> = DateTime<Utc>, copy;
        4 => kubeconfig ("kubeconfig"): String = String, str;
        5 => revocation_timestamp ("revocation_timestamp"): DateTime<Utc> = DateTime<Utc>, copy;
        6 => status ("status"): BreakGlassCredentialStatus = BreakGlassCredentialStatus, ref;
        7 => username ("username"): String = String, str;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_credential_decoding() {
        let credential: BreakGlassCredential = serde_json::from_value(json!({
            "kind": "BreakGlassCredential",
            "id": "2a7b",
            "username": "admin",
            "status": "issued",
            "expiration_timestamp": "2024-06-01T12:00:00Z",
            "kubeconfig": null,
        }))
        .unwrap();

        assert_eq!(credential.username(), Some("admin"));
        assert_eq!(credential.status(), Some(&BreakGlassCredentialStatus::Issued));
        assert_eq!(credential.kubeconfig(), None);
        assert_eq!(credential.revocation_timestamp(), None);
        assert_eq!(
            credential.expiration_timestamp(),
            Some("2024-06-01T12:00:00Z".parse().unwrap())
        );
    }
}
