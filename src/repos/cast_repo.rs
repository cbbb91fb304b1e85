/*
 * Responsibility
 * - movie_cast (movie <-> actor) の関連付け
 * - 追加は単発の INSERT。存在確認と重複判定は PK / FK 制約に任せ、違反を CastOutcome に変換する
 */
use sqlx::PgPool;

use crate::repos::actor_repo::ActorRow;
use crate::repos::error::{RepoError, RepoResult};

// Named in the init migration.
const MOVIE_FK: &str = "movie_cast_movie_id_fkey";
const ACTOR_FK: &str = "movie_cast_actor_id_fkey";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastOutcome {
    Added,
    AlreadyCast,
    MovieMissing,
    ActorMissing,
}

pub async fn list_actors(db: &PgPool, movie_id: i32) -> RepoResult<Vec<ActorRow>> {
    let rows = sqlx::query_as::<_, ActorRow>(
        r#"
        SELECT a.id, a.name, a.age, a.gender
        FROM movie_cast c
        JOIN actors a ON a.id = c.actor_id
        WHERE c.movie_id = $1
        ORDER BY a.id
        "#,
    )
    .bind(movie_id)
    .fetch_all(db)
    .await?;

    Ok(rows)
}

// When both sides are missing, which FK Postgres reports first is unspecified.
pub async fn add(db: &PgPool, movie_id: i32, actor_id: i32) -> RepoResult<CastOutcome> {
    let inserted = sqlx::query(
        r#"
        INSERT INTO movie_cast (movie_id, actor_id)
        VALUES ($1, $2)
        "#,
    )
    .bind(movie_id)
    .bind(actor_id)
    .execute(db)
    .await
    .map_err(RepoError::from_sqlx);

    match inserted {
        Ok(_) => Ok(CastOutcome::Added),
        Err(RepoError::Conflict { .. }) => Ok(CastOutcome::AlreadyCast),
        Err(RepoError::MissingReference { constraint }) if constraint == MOVIE_FK => {
            Ok(CastOutcome::MovieMissing)
        }
        Err(RepoError::MissingReference { constraint }) if constraint == ACTOR_FK => {
            Ok(CastOutcome::ActorMissing)
        }
        Err(err) => Err(err),
    }
}

pub async fn remove(db: &PgPool, movie_id: i32, actor_id: i32) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM movie_cast
        WHERE movie_id = $1 AND actor_id = $2
        "#,
    )
    .bind(movie_id)
    .bind(actor_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

// Needs DATABASE_URL; run with `--features db-tests`.
#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::repos::actor_repo::{self, Gender};
    use crate::repos::movie_repo;

    async fn seed(pool: &PgPool) -> (i32, i32) {
        let release = NaiveDate::from_ymd_opt(2000, 12, 22).unwrap();
        let movie = movie_repo::create(pool, "Cast Away", release).await.unwrap();
        let actor = actor_repo::create(pool, "Tom Hanks", 67, Gender::Male);
        (movie.id, actor.await.unwrap().id)
    }

    async fn cast_rows(pool: &PgPool) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM movie_cast")
            .fetch_one(pool)
            .await
            .unwrap()
    }

    #[sqlx::test]
    async fn add_classifies_every_outcome(pool: PgPool) {
        let (movie, actor) = seed(&pool).await;

        let outcomes = [
            add(&pool, movie, actor).await.unwrap(),
            add(&pool, movie, actor).await.unwrap(),
            add(&pool, 4242, actor).await.unwrap(),
            add(&pool, movie, 4242).await.unwrap(),
        ];
        assert_eq!(
            outcomes,
            [
                CastOutcome::Added,
                CastOutcome::AlreadyCast,
                CastOutcome::MovieMissing,
                CastOutcome::ActorMissing,
            ]
        );
        assert_eq!(cast_rows(&pool).await, 1);
    }

    #[sqlx::test]
    async fn list_and_remove(pool: PgPool) {
        let (movie, actor) = seed(&pool).await;
        assert!(list_actors(&pool, movie).await.unwrap().is_empty());

        add(&pool, movie, actor).await.unwrap();
        let cast = list_actors(&pool, movie).await.unwrap();
        assert_eq!(cast.len(), 1);
        assert_eq!(cast[0].id, actor);

        assert!(remove(&pool, movie, actor).await.unwrap());
        assert!(!remove(&pool, movie, actor).await.unwrap());
    }

    #[sqlx::test]
    async fn deleting_either_side_drops_the_cast_row(pool: PgPool) {
        let (movie, actor) = seed(&pool).await;
        add(&pool, movie, actor).await.unwrap();
        assert!(actor_repo::delete(&pool, actor).await.unwrap());
        assert_eq!(cast_rows(&pool).await, 0);

        let (movie_b, actor_b) = seed(&pool).await;
        add(&pool, movie_b, actor_b).await.unwrap();
        assert!(movie_repo::delete(&pool, movie_b).await.unwrap());
        assert_eq!(cast_rows(&pool).await, 0);
        let kept = actor_repo::get(&pool, actor_b).await.unwrap();
        assert!(kept.is_some());
    }
}
