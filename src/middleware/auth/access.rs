//! access token (Auth0 発行の JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - `Authorization: Bearer <jwt>` を取り出し、JWKS の公開鍵で署名 + iss/aud/exp/nbf を検証する
//! - permission の判定はここではしない (handler の `Authorized<P>` が行う)
//! - 失敗時は AppError (401) で即座に返し、handler には到達させない

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::services::auth::{AuthError, extract_bearer};
use crate::state::AppState;

/// 認証が必要な Router に access middleware を掛ける。
///
/// `route_layer` なので、存在しない path は 401 ではなく 404 のまま返る。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.route_layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // Owned so that no borrow of the request is held across the await.
    let verified = match bearer_token(req.headers()) {
        Ok(token) => state.auth.verify(&token).await,
        Err(err) => Err(err),
    };

    let claims = match verified {
        Ok(claims) => claims,
        Err(err) => {
            tracing::warn!(
                code = err.code(),
                method = %req.method(),
                path = %req.uri().path(),
                "access token rejected"
            );
            return Err(err.into());
        }
    };

    tracing::debug!(
        subject = claims.subject(),
        expires_at = claims.expires_at(),
        "access token accepted"
    );

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(AuthCtx::new(claims));

    Ok(next.run(req).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let header = match headers.get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(value.to_str().map_err(|_| AuthError::MalformedHeader)?),
    };

    extract_bearer(header).map(str::to_owned)
}
