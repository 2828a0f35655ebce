//! Session token issuance and verification

use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Claims, Role},
};

/// Issues and verifies the signed session tokens that carry identity and role.
///
/// Tokens are self-contained HS256 JWTs: there is no server-side session
/// state and no revocation, so a token stays valid for its whole window
/// even if the account changes or disappears.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl_days: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
            ttl_days: config.token_ttl_days as i64,
        }
    }

    /// Sign a token for the given identity, valid for the configured window
    pub fn issue(&self, user_id: Uuid, role: Role, email: &str) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            role,
            email: email.to_string(),
            exp: now + self.ttl_days * 86_400,
            iat: now,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    /// Check signature and expiry; every failure collapses into the same
    /// authentication error so callers cannot tell the cases apart
    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|_| AppError::Authentication("Invalid or expired token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: "test-secret".to_string(),
            token_ttl_days: 30,
        })
    }

    #[test]
    fn issue_then_verify_round_trips_the_identity() {
        let svc = service();
        let id = Uuid::new_v4();

        let token = svc.issue(id, Role::Subadmin, "sub@example.com").unwrap();
        let claims = svc.verify(&token).unwrap();

        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, Role::Subadmin);
        assert_eq!(claims.email, "sub@example.com");
        assert_eq!(claims.exp - claims.iat, 30 * 86_400);
    }

    #[test]
    fn tampered_payload_is_rejected() {
        let svc = service();
        let token = svc.issue(Uuid::new_v4(), Role::User, "a@example.com").unwrap();

        // Alter one character of the claims segment; the signature no
        // longer matches whatever the payload now decodes to.
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        let mut payload = parts[1].clone().into_bytes();
        payload[0] = if payload[0] == b'e' { b'f' } else { b'e' };
        parts[1] = String::from_utf8(payload).unwrap();

        assert!(svc.verify(&parts.join(".")).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let svc = service();

        // Expiry must sit beyond the decoder's default 60s leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: Uuid::new_v4(),
            role: Role::User,
            email: "a@example.com".to_string(),
            exp: now - 300,
            iat: now - 600,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret".as_bytes()),
        )
        .unwrap();

        assert!(svc.verify(&token).is_err());
    }

    #[test]
    fn token_signed_with_another_secret_is_rejected() {
        let svc = service();
        let other = TokenService::new(&AuthConfig {
            jwt_secret: "other-secret".to_string(),
            token_ttl_days: 30,
        });

        let token = other.issue(Uuid::new_v4(), Role::Superadmin, "root@example.com").unwrap();
        assert!(svc.verify(&token).is_err());
    }

    #[test]
    fn garbage_input_is_rejected() {
        assert!(service().verify("not-a-jwt").is_err());
    }
}
