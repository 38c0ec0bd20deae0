//! Identity token handling
//!
//! The marketplace never authenticates users itself. The identity provider
//! issues bearer tokens; this module only verifies them and extracts the
//! two facts the core consumes: a stable user id and the admin role flag.

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// JWT verification configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Shared secret the identity provider signs with
    pub secret: String,
    /// Expected issuer claim
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "super-secret-key-change-in-production".to_string()),
            issuer: "carlane-identity".to_string(),
        }
    }
}

/// Claims carried by an identity token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct TokenClaims {
    /// Subject (stable external user ID)
    pub sub: String,
    /// User role
    pub role: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

impl TokenClaims {
    /// Check if the user has admin role
    pub fn is_admin(&self) -> bool {
        self.role == "admin"
    }
}

/// Verify and decode an identity token
pub fn verify_token(
    token: &str,
    config: &JwtConfig,
) -> Result<TokenClaims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.set_issuer(&[&config.issuer]);

    let token_data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".into(),
            issuer: "carlane-identity".into(),
        }
    }

    fn issue(claims: &TokenClaims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(role: &str) -> TokenClaims {
        TokenClaims {
            sub: "user-1".into(),
            role: role.into(),
            exp: chrono::Utc::now().timestamp() + 3600,
            iss: "carlane-identity".into(),
        }
    }

    #[test]
    fn verifies_valid_token() {
        let cfg = config();
        let token = issue(&claims("admin"), &cfg.secret);
        let decoded = verify_token(&token, &cfg).unwrap();
        assert_eq!(decoded.sub, "user-1");
        assert!(decoded.is_admin());
    }

    #[test]
    fn rejects_wrong_secret() {
        let cfg = config();
        let token = issue(&claims("user"), "other-secret");
        assert!(verify_token(&token, &cfg).is_err());
    }

    #[test]
    fn rejects_wrong_issuer() {
        let cfg = config();
        let mut c = claims("user");
        c.iss = "someone-else".into();
        let token = issue(&c, &cfg.secret);
        assert!(verify_token(&token, &cfg).is_err());
    }

    #[test]
    fn non_admin_role_is_not_admin() {
        assert!(!claims("user").is_admin());
    }
}
