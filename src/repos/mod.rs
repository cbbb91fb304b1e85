pub mod actor_repo;
pub mod cast_repo;
pub mod error;
pub mod movie_repo;
