//! Users table demo: create two users, list, update, delete, list again.
//! Each step reports its outcome; a failing step does not stop the rest.

use student_crud::users::{create_user, delete_user, ensure_users_table, read_users, update_user_age};
use sqlx::PgPool;
use tracing_subscriber::EnvFilter;

const USER_ID_TO_CHANGE: i32 = 1;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("student_crud=info")),
        )
        .init();

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "postgres://localhost/postgres".into());
    tracing::info!("connecting to database");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await?;
    ensure_users_table(&pool).await?;

    for (name, age) in [("Alice", 30), ("Bob", 42)] {
        match create_user(&pool, name, age).await {
            Ok(rows) if rows > 0 => println!("User created."),
            Ok(_) => println!("User '{}' creation reported 0 rows affected.", name),
            Err(e) => tracing::error!(error = %e, name, "create user failed"),
        }
    }

    print_users(&pool).await;

    match update_user_age(&pool, USER_ID_TO_CHANGE, 35).await {
        Ok(rows) => println!("{}", if rows > 0 { "User updated." } else { "User not found." }),
        Err(e) => tracing::error!(error = %e, "update user failed"),
    }

    match delete_user(&pool, USER_ID_TO_CHANGE).await {
        Ok(rows) => println!("{}", if rows > 0 { "User deleted." } else { "User not found." }),
        Err(e) => tracing::error!(error = %e, "delete user failed"),
    }

    print_users(&pool).await;
    Ok(())
}

async fn print_users(pool: &PgPool) {
    match read_users(pool).await {
        Ok(users) if users.is_empty() => println!("No users found."),
        Ok(users) => {
            for user in users {
                println!("{}", user);
            }
        }
        Err(e) => tracing::error!(error = %e, "read users failed"),
    }
}
