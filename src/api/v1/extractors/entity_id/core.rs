/*
 * Responsibility
 * - Path パラメータ (文字列) を resource ごとの ID 型として受け、i32 に変換する
 * - 失敗時 (数値でない / 範囲外 / 0 以下) は 404 へ変換
 * 置くもの
 *  - EntityId<T> の定義（ジェネリック本体）
 *  - impl FromRequestParts for EntityId<T>
 * 置かないもの
 *  - Actor / Movie といった具体リソース名 (types.rs)
 */
use std::collections::HashMap;
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;

/// A resource addressed by an integer id in the path.
pub trait Entity {
    // Path parameter name, e.g. `actor_id` for `/actors/{actor_id}`.
    const PARAM: &'static str;
    // Resource name used in "not found" messages.
    const NAME: &'static str;
}

#[derive(Clone, Copy)]
pub struct EntityId<T> {
    pub id: i32,
    _marker: PhantomData<T>,
}

impl<T> EntityId<T> {
    fn new(id: i32) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

fn parse_id(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().filter(|id| *id > 0)
}

impl<S, T> FromRequestParts<S> for EntityId<T>
where
    S: Send + Sync,
    T: Entity + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Read by name so several ids can be extracted from one path.
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(T::NAME))?;

        params
            .get(T::PARAM)
            .and_then(|raw| parse_id(raw))
            .map(Self::new)
            .ok_or(AppError::not_found(T::NAME))
    }
}

impl<T> std::fmt::Debug for EntityId<T>
where
    T: Entity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntityId")
            .field("entity", &T::NAME)
            .field("id", &self.id)
            .finish()
    }
}
