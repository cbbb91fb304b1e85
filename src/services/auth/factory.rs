/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::AuthService;
use crate::services::auth::access_jwt::AuthSettings;
use crate::services::auth::jwks::{HttpJwksSource, JwksCache, JwksCachePolicy, JwksError};

pub fn build_auth_service(config: &Config) -> Result<AuthService, JwksError> {
    let source = HttpJwksSource::new(config.auth_jwks_url.clone(), config.jwks_fetch_timeout)?;

    let jwks = JwksCache::new(
        Arc::new(source),
        JwksCachePolicy {
            ttl: config.jwks_cache_ttl,
            fetch_timeout: config.jwks_fetch_timeout,
            min_refresh_interval: config.jwks_min_refresh_interval,
        },
    );

    let settings = AuthSettings {
        issuer: config.auth_issuer.clone(),
        audience: config.auth_audience.clone(),
        algorithms: config.auth_algorithms.clone(),
        leeway_seconds: config.access_token_leeway_seconds,
        permissions_claim: config.auth_permissions_claim.clone(),
    };

    Ok(AuthService::new(settings, jwks))
}
