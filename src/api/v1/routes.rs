/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /health は認証なし、/actors, /movies, /movies/{movie_id}/actors は access middleware の内側
 * - 必要な permission は各 handler の Authorized<P> が宣言する
 */
use axum::{Router, routing::get};

use crate::middleware::auth::access;
use crate::state::AppState;

use crate::api::v1::handlers::{
    actors::{create_actor, delete_actor, get_actor, list_actors, update_actor},
    cast::{add_cast, list_cast, remove_cast},
    health::health,
    movies::{create_movie, delete_movie, get_movie, list_movies, update_movie},
};

pub fn routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/actors", get(list_actors).post(create_actor))
        .route(
            "/actors/{actor_id}",
            get(get_actor).patch(update_actor).delete(delete_actor),
        )
        .route("/movies", get(list_movies).post(create_movie))
        .route(
            "/movies/{movie_id}",
            get(get_movie).patch(update_movie).delete(delete_movie),
        )
        .route("/movies/{movie_id}/actors", get(list_cast).post(add_cast))
        .route(
            "/movies/{movie_id}/actors/{actor_id}",
            axum::routing::delete(remove_cast),
        );

    Router::new()
        .route("/health", get(health))
        .merge(access::apply(protected, state))
}
