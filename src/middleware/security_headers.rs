//! Security-related response headers.
//!
//! handler 側で同名 header を付けた場合はそちらを優先する (`if_not_present`)。
//! API は JSON しか返さないので CSP は `default-src 'none'` まで絞る。

use axum::Router;
use axum::http::header::{HeaderName, HeaderValue};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::config::Config;

const HEADERS: [(&str, &str); 6] = [
    ("x-frame-options", "DENY"),
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    ),
    ("x-content-type-options", "nosniff"),
    ("referrer-policy", "no-referrer"),
    (
        "permissions-policy",
        "camera=(), microphone=(), geolocation=()",
    ),
    // Responses carry per-user data.
    ("cache-control", "no-store"),
];

const HSTS: &str = "max-age=31536000; includeSubDomains";

pub fn apply(router: Router, config: &Config) -> Router {
    let mut router = HEADERS.into_iter().fold(router, |router, (name, value)| {
        router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        ))
    });

    // Only meaningful behind TLS, which production terminates in front of us.
    if config.app_env.is_production() {
        router = router.layer(SetResponseHeaderLayer::if_not_present(
            HeaderName::from_static("strict-transport-security"),
            HeaderValue::from_static(HSTS),
        ));
    }

    router
}
