/*
 * Responsibility
 * - actors テーブル向け SQLx 操作
 * - PgPool を受け取り CRUD を提供
 * - DB エラーは RepoError に変換して返す
 */
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ActorRow {
    pub id: i32,
    pub name: String,
    pub age: i32,
    pub gender: Gender,
}

pub async fn list(db: &PgPool) -> RepoResult<Vec<ActorRow>> {
    let rows = sqlx::query_as::<_, ActorRow>(
        r#"
        SELECT id, name, age, gender
        FROM actors
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(rows)
}

pub async fn get(db: &PgPool, actor_id: i32) -> RepoResult<Option<ActorRow>> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        SELECT id, name, age, gender
        FROM actors
        WHERE id = $1
        "#,
    )
    .bind(actor_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn create(db: &PgPool, name: &str, age: i32, gender: Gender) -> RepoResult<ActorRow> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        INSERT INTO actors (name, age, gender)
        VALUES ($1, $2, $3)
        RETURNING id, name, age, gender
        "#,
    )
    .bind(name)
    .bind(age)
    .bind(gender)
    .fetch_one(db)
    .await?;

    Ok(row)
}

// None leaves the column untouched.
pub async fn update(
    db: &PgPool,
    actor_id: i32,
    name: Option<&str>,
    age: Option<i32>,
    gender: Option<Gender>,
) -> RepoResult<Option<ActorRow>> {
    let row = sqlx::query_as::<_, ActorRow>(
        r#"
        UPDATE actors
        SET
            name = COALESCE($2, name),
            age = COALESCE($3, age),
            gender = COALESCE($4, gender)
        WHERE id = $1
        RETURNING id, name, age, gender
        "#,
    )
    .bind(actor_id)
    .bind(name)
    .bind(age)
    .bind(gender)
    .fetch_optional(db)
    .await?;

    Ok(row)
}

pub async fn delete(db: &PgPool, actor_id: i32) -> RepoResult<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM actors
        WHERE id = $1
        "#,
    )
    .bind(actor_id)
    .execute(db)
    .await?;

    Ok(result.rows_affected() > 0)
}

// Needs DATABASE_URL; run with `--features db-tests`.
#[cfg(all(test, feature = "db-tests"))]
mod tests {
    use super::*;

    async fn tom(pool: &PgPool) -> ActorRow {
        create(pool, "Tom Hanks", 67, Gender::Male).await.unwrap()
    }

    #[sqlx::test]
    async fn create_get_and_list(pool: PgPool) {
        let created = tom(&pool).await;
        let found = get(&pool, created.id).await.unwrap();
        assert_eq!(found.unwrap().name, "Tom Hanks");

        let meryl = create(&pool, "Meryl Streep", 74, Gender::Female);
        assert_eq!(meryl.await.unwrap().gender, Gender::Female);

        let rows = list(&pool).await.unwrap();
        let names: Vec<_> = rows.into_iter().map(|a| a.name).collect();
        assert_eq!(names, ["Tom Hanks", "Meryl Streep"]);
    }

    #[sqlx::test]
    async fn update_only_touches_given_columns(pool: PgPool) {
        let created = tom(&pool).await;

        let updated = update(&pool, created.id, None, Some(68), None);
        let updated = updated.await.unwrap().unwrap();
        assert_eq!(updated.age, 68);
        assert_eq!(updated.name, "Tom Hanks");
        assert_eq!(updated.gender, Gender::Male);
    }

    #[sqlx::test]
    async fn unknown_id_is_none_or_false(pool: PgPool) {
        assert!(get(&pool, 4242).await.unwrap().is_none());
        let updated = update(&pool, 4242, Some("x"), None, None).await;
        assert!(updated.unwrap().is_none());
        assert!(!delete(&pool, 4242).await.unwrap());
    }

    #[sqlx::test]
    async fn delete_reports_whether_a_row_went(pool: PgPool) {
        let created = tom(&pool).await;

        assert!(delete(&pool, created.id).await.unwrap());
        assert!(!delete(&pool, created.id).await.unwrap());
        assert!(get(&pool, created.id).await.unwrap().is_none());
    }
}
