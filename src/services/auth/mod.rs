pub mod access_jwt;
pub mod bearer;
pub mod claims;
pub mod error;
pub mod factory;
pub mod jwks;
pub mod permissions;

#[cfg(test)]
pub(crate) mod test_support;

pub use access_jwt::{AuthService, AuthSettings};
pub use bearer::extract_bearer;
pub use claims::VerifiedClaims;
pub use error::AuthError;
pub use factory::build_auth_service;
pub use permissions::check_permission;
