pub mod access_jwt;
pub mod factory;

pub use access_jwt::{AccessJwtError, AccessTokenVerifier};
pub use factory::build_access_verifier;
