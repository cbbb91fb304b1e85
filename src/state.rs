/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - db: PgPool, auth: AuthService (JWKS cache を内部で共有)
 * - Clone 前提で持つ (PgPool も AuthService も内部は Arc で clone は安い)
 */
use sqlx::PgPool;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub db: PgPool,
    pub auth: AuthService,
}

impl AppState {
    pub fn new(db: PgPool, auth: AuthService) -> Self {
        Self { db, auth }
    }
}
