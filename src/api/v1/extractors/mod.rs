/*
 * Responsibility
 * - handler が使う extractor の公開
 */
pub mod auth_ctx;
pub mod entity_id;
pub mod json;

pub use auth_ctx::{AuthCtx, Authorized};
pub use entity_id::{ActorId, MovieId};
pub use json::ValidJson;
