//! Fixtures for minting tokens and serving key sets without an identity provider.
use std::{
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header, jwk::JwkSet};
use serde_json::{Value, json};

use crate::services::auth::jwks::{JwksError, JwksSource};

pub(crate) const KID: &str = "casting-test-key";
pub(crate) const ISSUER: &str = "https://casting.test.auth0.com/";
pub(crate) const AUDIENCE: &str = "casting-agency";

const TRUSTED_RSA_PEM: &str = include_str!("testdata/trusted_rsa.pem");
const UNTRUSTED_RSA_PEM: &str = include_str!("testdata/untrusted_rsa.pem");
const TRUSTED_N: &str = "rOwLKB2_rrBBsYkeOpadjx5ydChX7aXGf5Vi2pEpvzlLHm6-FoDy3AsDySC6bAjy6-EUkmXJthhbls0m4o2f1at_qguatu2AW92zdVxV6wR8P2U_8jffot86EAxwqizM2gL5el2vjk9N_WWZuvy7EMg0VDtZAoNYcbgJiXdSkld1Bbbc5eM4PHtWUUh-Yrsl7V-jOaor9bqJYEhUsjrE6v9yIWzHXRZQuMEr4Xfrj6pd7L9hMqKvTud0d1NQ9ISx4gZfgHaPaGAy3dha5WklF5z9sdGCq4M0EpWZSIfEJJ7QNbcTLmGEf-LROqTzbsapTWD7WUX8u2rbSeAM8e03oQ";

pub(crate) fn trusted_jwks() -> JwkSet {
    serde_json::from_value(json!({
        "keys": [{
            "kty": "RSA",
            "use": "sig",
            "alg": "RS256",
            "kid": KID,
            "n": TRUSTED_N,
            "e": "AQAB",
        }]
    }))
    .unwrap()
}

pub(crate) fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Claims shaped like an Auth0 RBAC access token, valid for an hour.
pub(crate) fn claims_with_permissions(permissions: &[&str]) -> Value {
    let mut claims = base_claims();
    claims["permissions"] = json!(permissions);
    claims
}

pub(crate) fn base_claims() -> Value {
    let now = now();
    json!({
        "iss": ISSUER,
        "sub": "auth0|65cb19f62013bcb8d2ff08bf",
        "aud": [AUDIENCE, format!("{ISSUER}userinfo")],
        "iat": now,
        "exp": now + 3600,
    })
}

fn sign_with(pem: &str, kid: Option<&str>, claims: &Value) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = kid.map(str::to_string);
    let key = EncodingKey::from_rsa_pem(pem.as_bytes()).unwrap();
    jsonwebtoken::encode(&header, claims, &key).unwrap()
}

/// Token signed by the key published in `trusted_jwks`.
pub(crate) fn sign(claims: &Value) -> String {
    sign_with(TRUSTED_RSA_PEM, Some(KID), claims)
}

pub(crate) fn sign_with_kid(kid: Option<&str>, claims: &Value) -> String {
    sign_with(TRUSTED_RSA_PEM, kid, claims)
}

/// Token claiming the trusted `kid` but signed by a key nobody published.
pub(crate) fn sign_untrusted(claims: &Value) -> String {
    sign_with(UNTRUSTED_RSA_PEM, Some(KID), claims)
}

/// In-memory `JwksSource` that counts fetches.
pub(crate) struct StaticJwksSource {
    set: Mutex<Option<JwkSet>>,
    delay: Duration,
    fetches: AtomicUsize,
}

impl StaticJwksSource {
    pub(crate) fn new(set: JwkSet) -> Self {
        Self {
            set: Mutex::new(Some(set)),
            delay: Duration::ZERO,
            fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            set: Mutex::new(None),
            delay: Duration::ZERO,
            fetches: AtomicUsize::new(0),
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn replace(&self, set: Option<JwkSet>) {
        *self.set.lock().unwrap() = set;
    }

    pub(crate) fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JwksSource for StaticJwksSource {
    fn describe(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<JwkSet, JwksError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let set = self.set.lock().unwrap().clone();
        set.ok_or(JwksError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }
}
