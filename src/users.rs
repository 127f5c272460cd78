//! Standalone `users` table demo: plain SQL create/read/update/delete, unrelated to students.

use crate::error::AppError;
use sqlx::PgPool;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct UserRow {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub age: Option<i32>,
}

impl fmt::Display for UserRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_null = |v: Option<String>| v.unwrap_or_else(|| "NULL".into());
        write!(
            f,
            "ID: {}, Name: {}, Age: {}",
            or_null(self.id.map(|v| v.to_string())),
            or_null(self.name.clone()),
            or_null(self.age.map(|v| v.to_string())),
        )
    }
}

pub async fn ensure_users_table(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            age INT
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Returns rows affected.
pub async fn create_user(pool: &PgPool, name: &str, age: i32) -> Result<u64, AppError> {
    let result = sqlx::query("INSERT INTO users (name, age) VALUES ($1, $2)")
        .bind(name)
        .bind(age)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn read_users(pool: &PgPool) -> Result<Vec<UserRow>, AppError> {
    let rows = sqlx::query_as::<_, UserRow>("SELECT id, name, age FROM users ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn update_user_age(pool: &PgPool, id: i32, age: i32) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE users SET age = $1 WHERE id = $2")
        .bind(age)
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn delete_user(pool: &PgPool, id: i32) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
