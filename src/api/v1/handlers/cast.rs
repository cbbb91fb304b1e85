/*
 * Responsibility
 * - /movies/{movie_id}/actors (出演者) の handler
 * - 出演者の追加/削除は movie の更新扱い (patch:movies)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::{
            actors::ActorListResponse,
            cast::{AddCastRequest, CastResponse},
        },
        extractors::{
            ActorId, Authorized, MovieId, ValidJson,
            auth_ctx::{GetMovies, PatchMovies},
        },
    },
    error::AppError,
    repos::{
        cast_repo::{self, CastOutcome},
        movie_repo,
    },
    state::AppState,
};

pub async fn list_cast(
    _auth: Authorized<GetMovies>,
    State(state): State<AppState>,
    movie_id: MovieId,
) -> Result<Json<ActorListResponse>, AppError> {
    // An empty cast and an unknown movie must not look the same.
    if movie_repo::get(&state.db, movie_id.id).await?.is_none() {
        return Err(AppError::not_found("movie"));
    }

    let rows = cast_repo::list_actors(&state.db, movie_id.id).await?;

    Ok(Json(ActorListResponse {
        success: true,
        actors: rows.into_iter().map(Into::into).collect(),
    }))
}

pub async fn add_cast(
    auth: Authorized<PatchMovies>,
    State(state): State<AppState>,
    movie_id: MovieId,
    ValidJson(req): ValidJson<AddCastRequest>,
) -> Result<(StatusCode, Json<CastResponse>), AppError> {
    let actor_id = req.validate().map_err(AppError::unprocessable)?;

    match cast_repo::add(&state.db, movie_id.id, actor_id).await? {
        CastOutcome::Added => {}
        CastOutcome::AlreadyCast => {
            return Err(AppError::conflict("actor is already cast in this movie"));
        }
        CastOutcome::MovieMissing => return Err(AppError::not_found("movie")),
        CastOutcome::ActorMissing => return Err(AppError::not_found("actor")),
    }
    tracing::info!(
        movie_id = movie_id.id,
        actor_id,
        subject = auth.ctx.subject(),
        "actor cast"
    );

    Ok((
        StatusCode::CREATED,
        Json(CastResponse {
            success: true,
            movie_id: movie_id.id,
            actor_id,
        }),
    ))
}

pub async fn remove_cast(
    auth: Authorized<PatchMovies>,
    State(state): State<AppState>,
    movie_id: MovieId,
    actor_id: ActorId,
) -> Result<Json<CastResponse>, AppError> {
    if !cast_repo::remove(&state.db, movie_id.id, actor_id.id).await? {
        return Err(AppError::not_found("cast entry"));
    }
    tracing::info!(
        movie_id = movie_id.id,
        actor_id = actor_id.id,
        subject = auth.ctx.subject(),
        "actor removed from cast"
    );

    Ok(Json(CastResponse {
        success: true,
        movie_id: movie_id.id,
        actor_id: actor_id.id,
    }))
}
