//! Memoized signing keys shared by every request.
//!
//! Readers clone an `Arc` snapshot under a read lock. Only one fetch runs at
//! a time (refresh mutex); tasks that queued behind it reuse its outcome,
//! success or failure, instead of fetching again. Once the TTL passes, the
//! previous snapshot keeps being served for another TTL while a background
//! task refreshes it, so readers do not wait on the network. Past that grace
//! period, or with no snapshot at all, callers wait for the fetch and fail
//! closed if it fails.
use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use jsonwebtoken::{
    DecodingKey,
    jwk::{JwkSet, PublicKeyUse},
};
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{debug, info, warn};

use crate::services::auth::error::AuthError;
use crate::services::auth::jwks::source::JwksSource;

#[derive(Debug, Clone, Copy)]
pub struct JwksCachePolicy {
    // How long a fetched key set is served before it is fetched again.
    pub ttl: Duration,
    // Upper bound for a single fetch; exceeding it fails closed.
    pub fetch_timeout: Duration,
    // Minimum age of the key set before an unknown `kid` may trigger a re-fetch.
    // Also how long a failed fetch is remembered before the source is tried again.
    pub min_refresh_interval: Duration,
}

#[derive(Clone)]
pub struct JwksCache {
    inner: Arc<Inner>,
}

struct Inner {
    source: Arc<dyn JwksSource>,
    policy: JwksCachePolicy,
    state: RwLock<State>,
    refresh: Arc<Mutex<()>>,
}

#[derive(Default)]
struct State {
    snapshot: Option<Arc<KeySnapshot>>,
    // Number of completed fetch attempts, successful or not.
    attempts: u64,
    // Set when the latest attempt failed.
    failed_at: Option<Instant>,
}

struct KeySnapshot {
    keys: HashMap<String, DecodingKey>,
    fetched_at: Instant,
    // Attempt that produced this snapshot.
    attempt: u64,
}

impl KeySnapshot {
    fn build(set: JwkSet, attempt: u64) -> Self {
        let mut keys = HashMap::with_capacity(set.keys.len());

        for jwk in &set.keys {
            let Some(kid) = jwk.common.key_id.as_deref() else {
                warn!("skipping jwk without kid");
                continue;
            };
            if matches!(jwk.common.public_key_use, Some(PublicKeyUse::Encryption)) {
                debug!(kid, "skipping encryption jwk");
                continue;
            }
            match DecodingKey::from_jwk(jwk) {
                Ok(key) => {
                    keys.insert(kid.to_string(), key);
                }
                Err(err) => warn!(kid, error = %err, "skipping unusable jwk"),
            }
        }

        Self {
            keys,
            fetched_at: Instant::now(),
            attempt,
        }
    }
}

impl std::fmt::Debug for JwksCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwksCache")
            .field("source", &self.inner.source.describe())
            .field("policy", &self.inner.policy)
            .finish()
    }
}

impl JwksCache {
    pub fn new(source: Arc<dyn JwksSource>, policy: JwksCachePolicy) -> Self {
        Self {
            inner: Arc::new(Inner {
                source,
                policy,
                state: RwLock::new(State::default()),
                refresh: Arc::new(Mutex::new(())),
            }),
        }
    }

    /// Look up the decoding key for `kid`.
    ///
    /// Returns `Ok(None)` when no trusted key matches, after at most one
    /// re-fetch. Fetch failures surface as `AuthError::KeyFetchFailed`.
    pub async fn find(&self, kid: &str) -> Result<Option<DecodingKey>, AuthError> {
        let snapshot = self.current().await?;
        if let Some(key) = snapshot.keys.get(kid) {
            return Ok(Some(key.clone()));
        }

        if snapshot.fetched_at.elapsed() < self.inner.policy.min_refresh_interval {
            debug!(kid, "unknown kid, key set is fresh; not re-fetching");
            return Ok(None);
        }

        debug!(kid, "unknown kid, re-fetching key set once");
        let refreshed = self.refresh(snapshot.attempt).await?;
        Ok(refreshed.keys.get(kid).cloned())
    }

    async fn current(&self) -> Result<Arc<KeySnapshot>, AuthError> {
        let ttl = self.inner.policy.ttl;
        let (snapshot, attempts) = {
            let state = self.inner.state.read().await;
            (state.snapshot.clone(), state.attempts)
        };

        match snapshot {
            Some(snapshot) if snapshot.fetched_at.elapsed() < ttl => Ok(snapshot),
            Some(snapshot) if snapshot.fetched_at.elapsed() < ttl.saturating_mul(2) => {
                self.refresh_in_background(attempts);
                Ok(snapshot)
            }
            _ => self.refresh(attempts).await,
        }
    }

    // At most one background refresh; if a fetch is already running, its
    // result lands in the shared state anyway.
    fn refresh_in_background(&self, seen: u64) {
        let Ok(guard) = Arc::clone(&self.inner.refresh).try_lock_owned() else {
            return;
        };

        let cache = self.clone();
        tokio::spawn(async move {
            {
                let state = cache.inner.state.read().await;
                let failed_recently = state
                    .failed_at
                    .is_some_and(|at| at.elapsed() < cache.inner.policy.min_refresh_interval);
                if state.attempts != seen || failed_recently {
                    return;
                }
            }
            debug!("jwks ttl passed, refreshing in background");
            // Failure is already logged and recorded; readers keep the stale keys.
            let _ = cache.fetch_locked(guard).await;
        });
    }

    // `seen` is the attempt count the caller found wanting. If a fetch
    // completed while we queued on the refresh mutex, its outcome is reused.
    async fn refresh(&self, seen: u64) -> Result<Arc<KeySnapshot>, AuthError> {
        let guard = Arc::clone(&self.inner.refresh).lock_owned().await;

        {
            let state = self.inner.state.read().await;
            if state.attempts != seen {
                return match (&state.failed_at, &state.snapshot) {
                    (None, Some(snapshot)) => Ok(Arc::clone(snapshot)),
                    _ => Err(AuthError::KeyFetchFailed),
                };
            }
            if let Some(failed_at) = state.failed_at
                && failed_at.elapsed() < self.inner.policy.min_refresh_interval
            {
                debug!("jwks fetch failed recently; not retrying yet");
                return Err(AuthError::KeyFetchFailed);
            }
        }

        self.fetch_locked(guard).await
    }

    // Caller holds the refresh mutex; it is released when this returns.
    async fn fetch_locked(
        &self,
        _guard: OwnedMutexGuard<()>,
    ) -> Result<Arc<KeySnapshot>, AuthError> {
        let policy = self.inner.policy;
        let source = self.inner.source.as_ref();

        let fetched = match tokio::time::timeout(policy.fetch_timeout, source.fetch()).await {
            Ok(Ok(set)) => Ok(set),
            Ok(Err(err)) => {
                warn!(source = source.describe(), error = %err, "jwks fetch failed");
                Err(AuthError::KeyFetchFailed)
            }
            Err(_) => {
                warn!(
                    source = source.describe(),
                    timeout = ?policy.fetch_timeout,
                    "jwks fetch timed out"
                );
                Err(AuthError::KeyFetchFailed)
            }
        };

        let mut state = self.inner.state.write().await;
        state.attempts += 1;

        match fetched {
            Ok(set) => {
                let next = Arc::new(KeySnapshot::build(set, state.attempts));
                info!(
                    source = source.describe(),
                    keys = next.keys.len(),
                    attempt = state.attempts,
                    "jwks refreshed"
                );
                state.snapshot = Some(Arc::clone(&next));
                state.failed_at = None;
                Ok(next)
            }
            Err(err) => {
                state.failed_at = Some(Instant::now());
                Err(err)
            }
        }
    }
}
