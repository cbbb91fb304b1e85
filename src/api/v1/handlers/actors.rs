/*
 * Responsibility
 * - /actors 系 CRUD handler
 * - 先頭引数の Authorized<P> で permission を確認してから Path/Json を読む
 * - Path の {actor_id} は extractor で i32 に変換して受け取る (不正値は 404)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::{
            DeletedResponse,
            actors::{
                ActorCreatedResponse, ActorDetailResponse, ActorListResponse,
                ActorUpdatedResponse, CreateActorRequest, UpdateActorRequest,
            },
        },
        extractors::{
            ActorId, Authorized, ValidJson,
            auth_ctx::{DeleteActors, GetActors, PatchActors, PostActors},
        },
    },
    error::AppError,
    repos::actor_repo,
    state::AppState,
};

pub async fn list_actors(
    _auth: Authorized<GetActors>,
    State(state): State<AppState>,
) -> Result<Json<ActorListResponse>, AppError> {
    let rows = actor_repo::list(&state.db).await?;

    Ok(Json(ActorListResponse {
        success: true,
        actors: rows.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_actor(
    _auth: Authorized<GetActors>,
    State(state): State<AppState>,
    actor_id: ActorId,
) -> Result<Json<ActorDetailResponse>, AppError> {
    let row = actor_repo::get(&state.db, actor_id.id)
        .await?
        .ok_or(AppError::not_found("actor"))?;

    Ok(Json(ActorDetailResponse {
        success: true,
        actor: row.into(),
    }))
}

pub async fn create_actor(
    auth: Authorized<PostActors>,
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateActorRequest>,
) -> Result<(StatusCode, Json<ActorCreatedResponse>), AppError> {
    let actor = req.validate().map_err(AppError::unprocessable)?;

    let row = actor_repo::create(&state.db, &actor.name, actor.age, actor.gender).await?;
    tracing::info!(actor_id = row.id, subject = auth.ctx.subject(), "actor created");

    Ok((
        StatusCode::CREATED,
        Json(ActorCreatedResponse {
            success: true,
            created: row.into(),
        }),
    ))
}

pub async fn update_actor(
    auth: Authorized<PatchActors>,
    State(state): State<AppState>,
    actor_id: ActorId,
    ValidJson(req): ValidJson<UpdateActorRequest>,
) -> Result<Json<ActorUpdatedResponse>, AppError> {
    req.validate().map_err(AppError::unprocessable)?;

    let row = actor_repo::update(
        &state.db,
        actor_id.id,
        req.name.as_deref().map(str::trim),
        req.age,
        req.gender,
    )
    .await?
    .ok_or(AppError::not_found("actor"))?;
    tracing::info!(actor_id = row.id, subject = auth.ctx.subject(), "actor updated");

    Ok(Json(ActorUpdatedResponse {
        success: true,
        updated: row.into(),
    }))
}

pub async fn delete_actor(
    auth: Authorized<DeleteActors>,
    State(state): State<AppState>,
    actor_id: ActorId,
) -> Result<Json<DeletedResponse>, AppError> {
    if !actor_repo::delete(&state.db, actor_id.id).await? {
        return Err(AppError::not_found("actor"));
    }
    tracing::info!(actor_id = actor_id.id, subject = auth.ctx.subject(), "actor deleted");

    Ok(Json(DeletedResponse::new(actor_id.id)))
}
