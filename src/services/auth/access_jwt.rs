use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use thiserror::Error;

use crate::api::v1::extractors::{AuthCtx, Role};

// Errors returned by access-token verification + strict claim validation.
// These stay server-side; the gate maps all of them to InvalidCredential.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("invalid 'id' claim (expected positive integer): {0}")]
    InvalidUserId(i64),
    #[error("verification secret is empty")]
    EmptySecret,
}

/// Access token (JWT) claims.
///
/// `role` is decoded straight into [`Role`], so unknown role ids fail here
/// as a malformed payload.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub id: i64,
    pub role: Role,
    pub exp: u64,
}

/// HS256 access-token verifier built around the shared secret.
///
/// - Key material is intentionally not printable via Debug.
/// - Holds no mutable state: verifying the same token twice gives the same result.
#[derive(Clone)]
pub struct AccessTokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for AccessTokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AccessTokenVerifier")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}

impl AccessTokenVerifier {
    pub fn new(secret: &[u8], leeway_seconds: u64) -> Result<Self, AccessJwtError> {
        if secret.is_empty() {
            return Err(AccessJwtError::EmptySecret);
        }

        // Only HS256 is accepted; tokens claiming another alg (or `none`) are rejected.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_exp = true;
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        })
    }

    // Check signature + exp and decode the claims.
    pub fn decode_claims(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }

    /// Verify, then convert claims into the context handlers see.
    ///
    /// This is the entry-point for the access middleware.
    pub fn verify(&self, token: &str) -> Result<AuthCtx, AccessJwtError> {
        let claims = self.decode_claims(token)?;

        if claims.id <= 0 {
            return Err(AccessJwtError::InvalidUserId(claims.id));
        }

        Ok(AuthCtx::new(claims.id, claims.role))
    }
}


#[cfg(test)]
mod tests {
    use base64::Engine;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use jsonwebtoken::Algorithm;
    use jsonwebtoken::errors::ErrorKind;
    use serde_json::json;

    use super::testing::{SECRET, claims, sign_with, token};
    use super::*;

    fn verifier() -> AccessTokenVerifier {
        AccessTokenVerifier::new(SECRET, 0).unwrap()
    }

    #[test]
    fn valid_token_yields_context() {
        let ctx = verifier().verify(&token(42, 1)).unwrap();
        assert_eq!(ctx, AuthCtx::new(42, Role::Administrator));
    }

    #[test]
    fn verification_is_idempotent() {
        let v = verifier();
        let t = token(7, 2);
        assert_eq!(v.verify(&t).unwrap(), v.verify(&t).unwrap());
    }

    #[test]
    fn empty_secret_is_rejected() {
        assert!(matches!(
            AccessTokenVerifier::new(b"", 0),
            Err(AccessJwtError::EmptySecret)
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            verifier().verify("garbage"),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let t = sign_with(SECRET, Algorithm::HS256, &claims(1, 1, -3600));
        match verifier().verify(&t) {
            Err(AccessJwtError::Jwt(e)) => assert!(matches!(e.kind(), ErrorKind::ExpiredSignature)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn leeway_tolerates_small_clock_skew() {
        let t = sign_with(SECRET, Algorithm::HS256, &claims(1, 1, -5));
        let lenient = AccessTokenVerifier::new(SECRET, 120).unwrap();
        assert!(lenient.verify(&t).is_ok());
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let t = sign_with(b"someone-else", Algorithm::HS256, &claims(1, 1, 600));
        match verifier().verify(&t) {
            Err(AccessJwtError::Jwt(e)) => assert!(matches!(e.kind(), ErrorKind::InvalidSignature)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn swapped_payload_is_rejected() {
        let tech = token(5, 2);
        let admin = token(5, 1);
        let tech_parts: Vec<&str> = tech.split('.').collect();
        let admin_parts: Vec<&str> = admin.split('.').collect();
        let forged = format!("{}.{}.{}", tech_parts[0], admin_parts[1], tech_parts[2]);

        assert!(verifier().verify(&forged).is_err());
    }

    #[test]
    fn other_algorithms_are_rejected() {
        let t = sign_with(SECRET, Algorithm::HS512, &claims(1, 1, 600));
        assert!(verifier().verify(&t).is_err());

        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims(1, 1, 600).to_string());
        let unsigned = format!("{header}.{payload}.");
        assert!(verifier().verify(&unsigned).is_err());
    }

    #[test]
    fn missing_exp_is_rejected() {
        let t = sign_with(SECRET, Algorithm::HS256, &json!({ "id": 1, "role": 1 }));
        assert!(verifier().verify(&t).is_err());
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(verifier().verify(&token(1, 99)).is_err());
    }

    #[test]
    fn non_positive_user_id_is_rejected() {
        assert!(matches!(
            verifier().verify(&token(0, 1)),
            Err(AccessJwtError::InvalidUserId(0))
        ));
    }

    #[test]
    fn debug_output_hides_key() {
        let rendered = format!("{:?}", verifier());
        assert!(rendered.starts_with("AccessTokenVerifier"));
        assert!(!rendered.contains("unit-test-secret"));
    }
}
