/*
 * Responsibility
 * - /movies 系 CRUD handler
 * - actors.rs と同じ並び (Authorized → State → Path → Json)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::{
            DeletedResponse,
            movies::{
                CreateMovieRequest, MovieCreatedResponse, MovieDetailResponse, MovieListResponse,
                MovieUpdatedResponse, UpdateMovieRequest,
            },
        },
        extractors::{
            Authorized, MovieId, ValidJson,
            auth_ctx::{DeleteMovies, GetMovies, PatchMovies, PostMovies},
        },
    },
    error::AppError,
    repos::movie_repo,
    state::AppState,
};

pub async fn list_movies(
    _auth: Authorized<GetMovies>,
    State(state): State<AppState>,
) -> Result<Json<MovieListResponse>, AppError> {
    let rows = movie_repo::list(&state.db).await?;

    Ok(Json(MovieListResponse {
        success: true,
        movies: rows.into_iter().map(Into::into).collect(),
    }))
}

pub async fn get_movie(
    _auth: Authorized<GetMovies>,
    State(state): State<AppState>,
    movie_id: MovieId,
) -> Result<Json<MovieDetailResponse>, AppError> {
    let row = movie_repo::get(&state.db, movie_id.id)
        .await?
        .ok_or(AppError::not_found("movie"))?;

    Ok(Json(MovieDetailResponse {
        success: true,
        movie: row.into(),
    }))
}

pub async fn create_movie(
    auth: Authorized<PostMovies>,
    State(state): State<AppState>,
    ValidJson(req): ValidJson<CreateMovieRequest>,
) -> Result<(StatusCode, Json<MovieCreatedResponse>), AppError> {
    let movie = req.validate().map_err(AppError::unprocessable)?;

    let row = movie_repo::create(&state.db, &movie.title, movie.release_date).await?;
    tracing::info!(movie_id = row.id, subject = auth.ctx.subject(), "movie created");

    Ok((
        StatusCode::CREATED,
        Json(MovieCreatedResponse {
            success: true,
            created: row.into(),
        }),
    ))
}

pub async fn update_movie(
    auth: Authorized<PatchMovies>,
    State(state): State<AppState>,
    movie_id: MovieId,
    ValidJson(req): ValidJson<UpdateMovieRequest>,
) -> Result<Json<MovieUpdatedResponse>, AppError> {
    req.validate().map_err(AppError::unprocessable)?;

    let row = movie_repo::update(
        &state.db,
        movie_id.id,
        req.title.as_deref().map(str::trim),
        req.release_date,
    )
    .await?
    .ok_or(AppError::not_found("movie"))?;
    tracing::info!(movie_id = row.id, subject = auth.ctx.subject(), "movie updated");

    Ok(Json(MovieUpdatedResponse {
        success: true,
        updated: row.into(),
    }))
}

pub async fn delete_movie(
    auth: Authorized<DeleteMovies>,
    State(state): State<AppState>,
    movie_id: MovieId,
) -> Result<Json<DeletedResponse>, AppError> {
    if !movie_repo::delete(&state.db, movie_id.id).await? {
        return Err(AppError::not_found("movie"));
    }
    tracing::info!(movie_id = movie_id.id, subject = auth.ctx.subject(), "movie deleted");

    Ok(Json(DeletedResponse::new(movie_id.id)))
}
