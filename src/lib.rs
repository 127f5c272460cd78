//! Student records over REST: repository-backed CRUD service with Postgres or in-memory storage.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod routes;
pub mod service;
pub mod state;
pub mod store;
pub mod users;

pub use config::ServerConfig;
pub use error::{AppError, ConfigError};
pub use model::{Student, StudentId, StudentPayload};
pub use routes::{app, common_routes, student_routes};
pub use service::StudentService;
pub use state::AppState;
pub use store::{
    ensure_database_exists, ensure_students_table, MemoryStudentRepository, PgStudentRepository,
    StudentRepository,
};
