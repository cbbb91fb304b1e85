/*!
 * Authentication context extractor
 *
 * Responsibility:
 * - 認証済みリクエストのコンテキスト（AuthCtx）を handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types / permissions に分離する
 *
 * Public API:
 * - AuthCtx
 * - Authorized<P>
 * - permission タグ (GetActors, PostMovies, ...)
 */

mod core;
pub mod permissions;
mod types;

pub use self::core::Authorized;
pub use permissions::*;
pub use types::AuthCtx;
