/*
 * Responsibility
 * - GET /health (疎通用、認証なし)
 * - DB には触らない (DB 障害時も process の生存確認に使える)
 */
use axum::Json;
use serde_json::{Value, json};

pub async fn health() -> Json<Value> {
    Json(json!({"success": true, "status": "ok"}))
}
