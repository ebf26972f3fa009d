use super::model::AuthenticatedUser;
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, Validation};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use super::jwks::JwksClient;

/// Validates RS256 access tokens issued by the identity provider
pub struct JwtValidator {
    jwks_client: Arc<JwksClient>,
    issuer: String,
    audience: String,
    leeway: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct Claims {
    // Standard claims; iss/aud/exp are checked by jsonwebtoken itself
    sub: String,

    #[serde(rename = "accountId", alias = "account_id", default)]
    account_id: Option<String>,

    #[serde(default)]
    roles: Vec<String>,
}

impl JwtValidator {
    pub fn new(
        jwks_client: Arc<JwksClient>,
        issuer: String,
        audience: String,
        leeway: Duration,
    ) -> Self {
        Self {
            jwks_client,
            issuer,
            audience,
            leeway: leeway.as_secs(),
        }
    }

    pub async fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::RS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only RS256 is allowed",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| AppError::Auth("Missing kid in token header".to_string()))?;

        let decoding_key = self
            .jwks_client
            .get_key(&kid)
            .await
            .map_err(|e| AppError::Auth(e.to_string()))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.leeway = self.leeway;
        validation.validate_nbf = true;

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| AppError::Auth(e.to_string()))?;

        Ok(claims_to_user(token_data.claims))
    }
}

/// Tokens without an explicit account id fall back to `sub`
fn claims_to_user(claims: Claims) -> AuthenticatedUser {
    let account_id = claims.account_id.unwrap_or_else(|| claims.sub.clone());

    AuthenticatedUser {
        account_id,
        sub: claims.sub,
        roles: claims.roles,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_id_falls_back_to_sub() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "user-1",
            "iss": "https://issuer.example",
            "aud": "catalog",
            "exp": 0
        }))
        .unwrap();

        let user = claims_to_user(claims);
        assert_eq!(user.account_id, "user-1");
        assert!(user.roles.is_empty());
    }

    #[test]
    fn test_explicit_account_id_and_roles() {
        let claims: Claims = serde_json::from_value(serde_json::json!({
            "sub": "user-1",
            "accountId": "acct-9",
            "roles": ["admin"]
        }))
        .unwrap();

        let user = claims_to_user(claims);
        assert_eq!(user.account_id, "acct-9");
        assert!(user.is_admin());
    }
}
