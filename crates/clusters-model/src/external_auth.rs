types! {
    /// External authentication settings of a hosted control plane cluster.
    struct ExternalAuthConfig (builder ExternalAuthConfigBuilder) {
        0 => enabled ("enabled"): bool = bool, copy;
        1 => external_auths ("external_auths"): ExternalAuthList = crate::ListBuilder<ExternalAuthBuilder>, ref;
    }

    /// External OIDC provider which issues tokens accepted by a cluster.
    resource ExternalAuth (builder ExternalAuthBuilder, list ExternalAuthList, kind "ExternalAuth") {
        3 => claim ("claim"): ExternalAuthClaim = ExternalAuthClaimBuilder, ref;
        4 => clients ("clients"): Vec<ExternalAuthClientConfig> = Vec<ExternalAuthClientConfigBuilder>, ref;
        5 => issuer ("issuer"): TokenIssuer = TokenIssuerBuilder, ref;
    }

    struct TokenIssuer (builder TokenIssuerBuilder) {
        /// PEM encoded certificate authority of the issuer.
        0 => ca ("ca"): String = String, str;
        1 => audiences ("audiences"): Vec<String> = Vec<String>, ref;
        2 => url ("url"): String = String, str;
    }

    struct ExternalAuthClientConfig (builder ExternalAuthClientConfigBuilder) {
        0 => component ("component"): ClientComponent = ClientComponentBuilder, ref;
        1 => extra_scopes ("extra_scopes"): Vec<String> = Vec<String>, ref;
        2 => id ("id"): String = String, str;
        3 => secret ("secret"): String = String, str;
    }

    struct ClientComponent (builder ClientComponentBuilder) {
        0 => name ("name"): String = String, str;
        1 => namespace ("namespace"): String = String, str;
    }

    struct ExternalAuthClaim (builder ExternalAuthClaimBuilder) {
        0 => mappings ("mappings"): TokenClaimMappings = TokenClaimMappingsBuilder, ref;
        1 => validation_rules ("validation_rules"): Vec<TokenClaimValidationRule> = Vec<TokenClaimValidationRuleBuilder>, ref;
    }

    struct TokenClaimMappings (builder TokenClaimMappingsBuilder) {
        0 => groups ("groups"): GroupsClaim = GroupsClaimBuilder, ref;
        1 => user_name ("username"): UsernameClaim = UsernameClaimBuilder, ref;
    }

    struct UsernameClaim (builder UsernameClaimBuilder) {
        0 => claim ("claim"): String = String, str;
        1 => prefix ("prefix"): String = String, str;
        2 => prefix_policy ("prefix_policy"): String = String, str;
    }

    struct GroupsClaim (builder GroupsClaimBuilder) {
        0 => claim ("claim"): String = String, str;
        1 => prefix ("prefix"): String = String, str;
    }

    struct TokenClaimValidationRule (builder TokenClaimValidationRuleBuilder) {
        0 => claim ("claim"): String = String, str;
        1 => required_value ("required_value"): String = String, str;
    }
}
