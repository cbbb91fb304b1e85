use std::marker::PhantomData;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{AuthError, check_permission};

use super::AuthCtx;
use super::permissions::Permission;

/// Handler で、permission `P` を満たす AuthCtx を受け取るための extractor
/// middleware が AuthCtx を request.extensions() に insert 済みである前提
/// - AuthCtx が無い: 401 (認証がかかってない・ミドルウェア未設定)
/// - permission 無し: 401 unauthorized / 403 forbidden
pub struct Authorized<P> {
    pub ctx: AuthCtx,
    _marker: PhantomData<P>,
}

impl<P> std::fmt::Debug for Authorized<P>
where
    P: Permission,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authorized")
            .field("permission", &P::NAME)
            .field("subject", &self.ctx.subject())
            .finish()
    }
}

impl<S, P> FromRequestParts<S> for Authorized<P>
where
    S: Send + Sync,
    P: Permission + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(ctx) = parts.extensions.get::<AuthCtx>().cloned() else {
            tracing::error!(
                permission = P::NAME,
                "no AuthCtx on request; access middleware not applied"
            );
            return Err(AuthError::Unauthorized.into());
        };

        if let Err(err) = check_permission(&ctx.claims, P::NAME) {
            tracing::warn!(
                code = err.code(),
                subject = ctx.subject(),
                permission = P::NAME,
                "permission check failed"
            );
            return Err(err.into());
        }

        Ok(Self {
            ctx,
            _marker: PhantomData,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::post,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::api::v1::extractors::auth_ctx::permissions::PostActors;
    use crate::services::auth::VerifiedClaims;

    async fn handler(auth: Authorized<PostActors>) -> String {
        auth.ctx.subject().to_string()
    }

    async fn call(ctx: Option<AuthCtx>) -> StatusCode {
        let app = Router::new().route("/", post(handler));
        let mut req = Request::builder().method("POST").uri("/");
        if let Some(ctx) = ctx {
            req = req.extension(ctx);
        }
        app.oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn granted_permission_reaches_handler() {
        let claims = VerifiedClaims::for_tests("producer", Some(&["post:actors"]));
        assert_eq!(call(Some(AuthCtx::new(claims))).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn read_only_role_is_forbidden() {
        let claims = VerifiedClaims::for_tests("assistant", Some(&["get:actors", "get:movies"]));
        assert_eq!(call(Some(AuthCtx::new(claims))).await, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn token_without_permissions_is_unauthorized() {
        let claims = VerifiedClaims::for_tests("machine", None);
        assert_eq!(
            call(Some(AuthCtx::new(claims))).await,
            StatusCode::UNAUTHORIZED
        );
    }

    #[tokio::test]
    async fn missing_context_is_unauthorized() {
        assert_eq!(call(None).await, StatusCode::UNAUTHORIZED);
    }
}
