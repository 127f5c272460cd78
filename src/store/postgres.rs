//! Postgres-backed student table and database bootstrap.

use super::StudentRepository;
use crate::error::{AppError, ConfigError};
use crate::model::{Student, StudentId, StudentPayload};
use async_trait::async_trait;
use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgPool};
use std::str::FromStr;

const STUDENTS_TABLE: &str = "students";

/// Returns the table name, schema-qualified when a schema is configured (e.g. "school.students").
pub fn qualified_students_table(schema: Option<&str>) -> String {
    match schema {
        Some(schema) => format!("{}.{}", schema, STUDENTS_TABLE),
        None => STUDENTS_TABLE.to_string(),
    }
}

/// Create the schema (if configured) and the students table if they do not exist.
pub async fn ensure_students_table(pool: &PgPool, schema: Option<&str>) -> Result<(), AppError> {
    if let Some(schema) = schema {
        sqlx::query(&format!("CREATE SCHEMA IF NOT EXISTS {}", schema))
            .execute(pool)
            .await?;
    }
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            email TEXT NOT NULL
        )
        "#,
        qualified_students_table(schema)
    );
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

#[derive(Clone, Debug)]
pub struct PgStudentRepository {
    pool: PgPool,
    table: String,
}

impl PgStudentRepository {
    /// `schema` must already be a validated identifier (see `ServerConfig`).
    pub fn new(pool: PgPool, schema: Option<&str>) -> Self {
        Self {
            pool,
            table: qualified_students_table(schema),
        }
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        let sql = format!("SELECT id, name, email FROM {} ORDER BY id", self.table);
        tracing::debug!(sql = %sql, "query");
        let rows = sqlx::query_as::<_, Student>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, AppError> {
        let sql = format!("SELECT id, name, email FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn insert(&self, payload: &StudentPayload) -> Result<Student, AppError> {
        let sql = format!(
            "INSERT INTO {} (name, email) VALUES ($1, $2) RETURNING id, name, email",
            self.table
        );
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(&payload.name)
            .bind(&payload.email)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn update(
        &self,
        id: StudentId,
        payload: &StudentPayload,
    ) -> Result<Option<Student>, AppError> {
        let sql = format!(
            "UPDATE {} SET name = $1, email = $2 WHERE id = $3 RETURNING id, name, email",
            self.table
        );
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Student>(&sql)
            .bind(&payload.name)
            .bind(&payload.email)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn delete(&self, id: StudentId) -> Result<bool, AppError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", self.table);
        tracing::debug!(sql = %sql, id, "query");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let Some((admin_opts, db_name)) = admin_connect_options(database_url)? else {
        return Ok(());
    };
    let mut conn: sqlx::PgConnection = admin_opts.connect().await?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

/// Options for the `postgres` maintenance database plus the target name.
/// `None` when the URL names no database or names `postgres` itself.
fn admin_connect_options(
    database_url: &str,
) -> Result<Option<(PgConnectOptions, String)>, AppError> {
    let opts = PgConnectOptions::from_str(database_url).map_err(|e| {
        AppError::Config(ConfigError::Invalid {
            key: "DATABASE_URL",
            value: e.to_string(),
        })
    })?;
    let db_name = match opts.get_database() {
        Some(name) if !name.is_empty() && name != "postgres" => name.to_string(),
        _ => return Ok(None),
    };
    Ok(Some((opts.database("postgres"), db_name)))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
