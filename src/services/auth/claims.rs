use serde::Deserialize;
use serde_json::{Map, Value};

use crate::services::auth::error::AuthError;

/// Access token claims as they arrive on the wire.
///
/// `aud` may be a string or an array, so it is kept as `Value`; `jsonwebtoken`
/// validates it against the configured audience. The permission claim name is
/// configurable, so everything not named here lands in `extra`.
#[derive(Debug, Clone, Deserialize)]
pub(super) struct RawClaims {
    pub iss: String,
    pub sub: String,
    #[serde(default)]
    pub aud: Value,
    pub exp: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Claims of a token whose signature and standard claims were verified.
///
/// Only the verifier builds this type. `permissions` is `None` when the token
/// carries no permission claim at all, which is not the same as an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedClaims {
    issuer: String,
    subject: String,
    audience: Vec<String>,
    expires_at: i64,
    permissions: Option<Vec<String>>,
}

impl VerifiedClaims {
    pub(super) fn from_raw(raw: RawClaims, permissions_claim: &str) -> Result<Self, AuthError> {
        let permissions = read_permissions(raw.extra.get(permissions_claim))?;

        Ok(Self {
            issuer: raw.iss,
            subject: raw.sub,
            audience: read_audience(&raw.aud),
            expires_at: raw.exp,
            permissions,
        })
    }

    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn audience(&self) -> &[String] {
        &self.audience
    }

    pub fn expires_at(&self) -> i64 {
        self.expires_at
    }

    pub fn permissions(&self) -> Option<&[String]> {
        self.permissions.as_deref()
    }

    #[cfg(test)]
    pub(crate) fn for_tests(subject: &str, permissions: Option<&[&str]>) -> Self {
        Self {
            issuer: "https://issuer.test/".to_string(),
            subject: subject.to_string(),
            audience: vec!["casting-agency".to_string()],
            expires_at: i64::MAX,
            permissions: permissions.map(|p| p.iter().map(|s| s.to_string()).collect()),
        }
    }
}

fn read_audience(aud: &Value) -> Vec<String> {
    match aud {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

// Array of strings (Auth0 RBAC `permissions`) or a space-separated string (`scope`).
fn read_permissions(value: Option<&Value>) -> Result<Option<Vec<String>>, AuthError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.split_whitespace().map(str::to_string).collect())),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| v.as_str().map(str::to_string).ok_or(AuthError::InvalidClaims))
            .collect::<Result<Vec<_>, _>>()
            .map(Some),
        Some(_) => Err(AuthError::InvalidClaims),
    }
}
