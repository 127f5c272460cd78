//! Student server: picks Postgres when `DATABASE_URL` is set, otherwise the in-memory store,
//! then serves the student and common routes.

use std::sync::Arc;
use student_crud::{
    app, ensure_database_exists, ensure_students_table, AppState, MemoryStudentRepository,
    PgStudentRepository, ServerConfig, StudentRepository,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_crud=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    let repo: Arc<dyn StudentRepository> = match &config.database_url {
        Some(database_url) => {
            ensure_database_exists(database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            ensure_students_table(&pool, config.schema.as_deref()).await?;
            tracing::info!("using postgres student store");
            Arc::new(PgStudentRepository::new(pool, config.schema.as_deref()))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; students are kept in memory");
            Arc::new(MemoryStudentRepository::new())
        }
    };

    let router = app(AppState::new(repo), config.body_limit_bytes);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
