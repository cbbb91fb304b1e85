/*
 * Responsibility
 * - Handler から見える「認証済みコンテキスト」の型
 * - middleware が検証して request extensions に格納し、handler はこの型だけを受け取る
 *
 * Notes
 * - JWT の署名検証や JWKS 取得は middleware/services 側の責務
 */
use crate::services::auth::VerifiedClaims;

/// 認証済みのリクエストに付与されるコンテキスト
#[derive(Debug, Clone)]
pub struct AuthCtx {
    pub claims: VerifiedClaims,
}

impl AuthCtx {
    pub fn new(claims: VerifiedClaims) -> Self {
        Self { claims }
    }

    pub fn subject(&self) -> &str {
        self.claims.subject()
    }
}
