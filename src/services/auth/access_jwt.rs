use jsonwebtoken::{Algorithm, Validation, errors::ErrorKind};
use tracing::debug;

use crate::services::auth::{
    bearer::extract_bearer,
    claims::{RawClaims, VerifiedClaims},
    error::AuthError,
    jwks::JwksCache,
    permissions::check_permission,
};

/// What a valid access token must look like.
#[derive(Debug, Clone)]
pub struct AuthSettings {
    pub issuer: String,
    pub audience: String,
    pub algorithms: Vec<Algorithm>,
    pub leeway_seconds: u64,
    pub permissions_claim: String,
}

/// Access-token verifier backed by the issuer's published signing keys.
///
/// Cheap to clone; the key cache is shared between clones.
#[derive(Debug, Clone)]
pub struct AuthService {
    jwks: JwksCache,
    validation: Validation,
    permissions_claim: String,
}

impl AuthService {
    pub fn new(settings: AuthSettings, jwks: JwksCache) -> Self {
        let mut validation = Validation::default();
        validation.algorithms = settings.algorithms;
        validation.set_issuer(&[settings.issuer]);
        validation.set_audience(&[settings.audience]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_nbf = true;
        validation.leeway = settings.leeway_seconds;

        Self {
            jwks,
            validation,
            permissions_claim: settings.permissions_claim,
        }
    }

    /// Verify signature and standard claims of a raw access token.
    ///
    /// The signature is checked before any claim, so a token signed by an
    /// unknown key is `InvalidKey` whatever it claims.
    pub async fn verify(&self, token: &str) -> Result<VerifiedClaims, AuthError> {
        if !is_compact_jws(token) {
            return Err(AuthError::InvalidHeader);
        }

        let header = jsonwebtoken::decode_header(token).map_err(|err| {
            debug!(error = %err, "token header does not decode");
            AuthError::InvalidKey
        })?;

        if !self.validation.algorithms.contains(&header.alg) {
            debug!(alg = ?header.alg, "token algorithm not allowed");
            return Err(AuthError::InvalidKey);
        }

        let kid = header.kid.ok_or(AuthError::InvalidHeader)?;
        let key = self.jwks.find(&kid).await?.ok_or_else(|| {
            debug!(kid = %kid, "no signing key matches kid");
            AuthError::InvalidKey
        })?;

        // jsonwebtoken rejects a key whose family differs from any allowed
        // algorithm, so decode against the one algorithm already vetted above.
        let mut validation = self.validation.clone();
        validation.algorithms = vec![header.alg];

        let data = jsonwebtoken::decode::<RawClaims>(token, &key, &validation).map_err(|err| {
            debug!(error = %err, "access token rejected");
            classify(err.kind())
        })?;

        VerifiedClaims::from_raw(data.claims, &self.permissions_claim)
    }

    /// Run the whole gate for one request: extract, verify, check `required`.
    pub async fn authorize(
        &self,
        authorization: Option<&str>,
        required: &str,
    ) -> Result<VerifiedClaims, AuthError> {
        let token = extract_bearer(authorization)?;
        let claims = self.verify(token).await?;
        check_permission(&claims, required)?;
        Ok(claims)
    }
}

// Three non-empty base64url segments.
fn is_compact_jws(token: &str) -> bool {
    let segments: Vec<&str> = token.split('.').collect();
    segments.len() == 3
        && segments.iter().all(|s| {
            !s.is_empty()
                && s.bytes()
                    .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        })
}

fn classify(kind: &ErrorKind) -> AuthError {
    match kind {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer
        | ErrorKind::InvalidAudience
        | ErrorKind::ImmatureSignature
        | ErrorKind::MissingRequiredClaim(_)
        | ErrorKind::Json(_) => AuthError::InvalidClaims,
        ErrorKind::InvalidToken | ErrorKind::Base64(_) => AuthError::InvalidHeader,
        _ => AuthError::InvalidKey,
    }
}
