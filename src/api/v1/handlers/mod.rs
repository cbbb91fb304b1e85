pub mod actors;
pub mod cast;
pub mod health;
pub mod movies;
