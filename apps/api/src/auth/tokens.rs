use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// Claims carried by a session token from the authentication provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The principal.
    pub sub: Uuid,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: usize,
    /// Identifies the sign-in, so it can be revoked on sign-out.
    #[serde(default)]
    pub session_id: Option<Uuid>,
}

/// Validates HS256 session tokens signed with the provider's shared secret.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Provider tokens carry an audience we do not pin.
        validation.validate_aud = false;
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("rejected session token: {e}");
                AppError::Unauthenticated
            })
    }
}

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}


#[cfg(test)]
mod tests {
    use super::testing::{sign, SECRET};
    use super::*;

    #[test]
    fn test_verify_accepts_provider_token() {
        let principal = Uuid::new_v4();
        let session_id = Uuid::new_v4();
        let token = sign(principal, Some(session_id), 30, SECRET);

        let claims = TokenVerifier::new(SECRET).verify(&token).unwrap();
        assert_eq!(claims.sub, principal);
        assert_eq!(claims.session_id, Some(session_id));
        assert_eq!(claims.email.as_deref(), Some("someone@example.com"));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let token = sign(Uuid::new_v4(), None, -30, SECRET);
        assert!(matches!(
            TokenVerifier::new(SECRET).verify(&token),
            Err(AppError::Unauthenticated)
        ));
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let token = sign(Uuid::new_v4(), None, 30, "some-other-secret-entirely");
        assert!(TokenVerifier::new(SECRET).verify(&token).is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(TokenVerifier::new(SECRET).verify("not.a.token").is_err());
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Basic abc"), None);
    }
}
