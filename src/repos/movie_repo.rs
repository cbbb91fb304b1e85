/*
 * Responsibility
 * - movies テーブル CRUD
 * - movie_cast は ON DELETE CASCADE 前提で削除挙動を意識
 */
use chrono::NaiveDate;
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieRow {
    pub id: i32,
    pub title: String,
    pub release_date: NaiveDate,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<MovieRow>> {
    let rows = sqlx::query_as::<_, MovieRow>(
        r#"
        SELECT id, title, release_date
        FROM movies
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, movie_id: i32) -> RepoResult<Option<MovieRow>> {
    let row = sqlx::query_as::<_, MovieRow>(
        r#"
        SELECT id, title, release_date
        FROM movies
        WHERE id = $1
        "#,
    )
    .bind(movie_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(db: &PgPool, title: &str, release_date: NaiveDate) -> RepoResult<MovieRow> {
    let row = sqlx::query_as::<_, MovieRow>(
        r#"
        INSERT INTO movies (title, release_date)
        VALUES ($1, $2)
        RETURNING id, title, release_date
        "#,
    )
    .bind(title)
    .bind(release_date)
    .fetch_one(db)
    .await?;

    Ok(row)
}

pub async fn update(
    db: &PgPool,
    movie_id: i32,
    title: Option<&str>,
    release_date: Option<NaiveDate>,
) -> RepoResult<Option<MovieRow>> {
    let row = sqlx::query_as::<_, MovieRow>(
        r#"
        UPDATE movies
        SET
            title = COALESCE($2, title),
            release_date = COALESCE($3, release_date)
        WHERE id = $1
        RETURNING id, title, release_date
        "#,
    )
    .bind(movie_id)
    .bind(title)
    .bind(release_date)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, movie_id: i32) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM movies
        WHERE id = $1
        "#,
    )
    .bind(movie_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

// Needs DATABASE_URL; run with `--features db-tests`.
#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn cast_away(pool: &PgPool) -> MovieRow {
        create(pool, "Cast Away", date(2000, 12, 22)).await.unwrap()
    }

    #[sqlx::test]
    async fn create_get_and_list(pool: PgPool) {
        let created = cast_away(&pool).await;
        let found = get(&pool, created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Cast Away");
        assert_eq!(found.release_date, date(2000, 12, 22));

        create(&pool, "Big", date(1988, 6, 3)).await.unwrap();
        assert_eq!(list(&pool).await.unwrap().len(), 2);
    }

    #[sqlx::test]
    async fn update_only_touches_given_columns(pool: PgPool) {
        let created = cast_away(&pool).await;

        let updated = update(&pool, created.id, Some("Big"), None);
        let updated = updated.await.unwrap().unwrap();
        assert_eq!(updated.title, "Big");
        assert_eq!(updated.release_date, date(2000, 12, 22));
    }

    #[sqlx::test]
    async fn unknown_id_is_none_or_false(pool: PgPool) {
        assert!(get(&pool, 4242).await.unwrap().is_none());
        let updated = update(&pool, 4242, None, Some(date(2001, 1, 1))).await;
        assert!(updated.unwrap().is_none());
        assert!(!delete(&pool, 4242).await.unwrap());
    }
}
