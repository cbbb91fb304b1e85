use crate::services::auth::error::AuthError;

/// Pull the bearer token out of an `Authorization` header value.
///
/// The header must be exactly `Bearer <token>`: two parts separated by a single
/// space, scheme matched case-sensitively.
pub fn extract_bearer(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingHeader)?;

    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(AuthError::MalformedHeader),
    }
}
