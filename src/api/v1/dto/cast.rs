/*
 * Responsibility
 * - movie_cast (出演) の request/response DTO
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct AddCastRequest {
    pub actor_id: Option<i32>,
}

impl AddCastRequest {
    pub fn validate(&self) -> Result<i32, &'static str> {
        self.actor_id.ok_or("actor_id is required")
    }
}

#[derive(Debug, Serialize)]
pub struct CastResponse {
    pub success: bool,
    pub movie_id: i32,
    pub actor_id: i32,
}
