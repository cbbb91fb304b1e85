use crate::services::auth::{claims::VerifiedClaims, error::AuthError};

/// Check that `claims` grants `required` (exact, case-sensitive match).
///
/// - no permission claim at all: `Unauthorized`
/// - claim present but without `required`: `Forbidden`
pub fn check_permission(claims: &VerifiedClaims, required: &str) -> Result<(), AuthError> {
    let permissions = claims.permissions().ok_or(AuthError::Unauthorized)?;

    if permissions.iter().any(|p| p == required) {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn granted_permission_passes() {
        let claims = VerifiedClaims::for_tests("producer", Some(&["post:actors"]));
        assert_eq!(check_permission(&claims, "post:actors"), Ok(()));
    }

    #[test]
    fn missing_permission_is_forbidden() {
        let claims = VerifiedClaims::for_tests("assistant", Some(&["get:actors", "get:movies"]));
        assert_eq!(
            check_permission(&claims, "post:actors"),
            Err(AuthError::Forbidden)
        );
    }

    #[test]
    fn absent_permission_claim_is_unauthorized() {
        let claims = VerifiedClaims::for_tests("machine", None);
        assert_eq!(
            check_permission(&claims, "get:actors"),
            Err(AuthError::Unauthorized)
        );
    }

    #[test]
    fn empty_permission_list_is_forbidden() {
        let claims = VerifiedClaims::for_tests("nobody", Some(&[]));
        assert_eq!(
            check_permission(&claims, "get:actors"),
            Err(AuthError::Forbidden)
        );
    }

    #[test]
    fn match_is_exact_and_case_sensitive() {
        let claims = VerifiedClaims::for_tests("director", Some(&["GET:actors", "get:actors:all"]));
        assert_eq!(
            check_permission(&claims, "get:actors"),
            Err(AuthError::Forbidden)
        );
    }
}
