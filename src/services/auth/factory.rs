/// Factory: build `AccessTokenVerifier` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AccessJwtError, AccessTokenVerifier};

pub fn build_access_verifier(config: &Config) -> Result<Arc<AccessTokenVerifier>, AccessJwtError> {
    let verifier = AccessTokenVerifier::new(
        config.jwt_secret.as_bytes(),
        config.access_token_leeway_seconds,
    )?;

    Ok(Arc::new(verifier))
}
