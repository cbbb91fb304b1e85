/*
 * Responsibility
 * - request/response DTO
 * - 成功レスポンスは `{ "success": true, ... }` の形に揃える
 */
use serde::Serialize;

pub mod actors;
pub mod cast;
pub mod movies;

#[derive(Debug, Serialize)]
pub struct DeletedResponse {
    pub success: bool,
    pub deleted: i32,
}

impl DeletedResponse {
    pub fn new(id: i32) -> Self {
        Self {
            success: true,
            deleted: id,
        }
    }
}
