mod cache;
mod source;

pub use cache::{JwksCache, JwksCachePolicy};
pub use source::{HttpJwksSource, JwksError, JwksSource};
