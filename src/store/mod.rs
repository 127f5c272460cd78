//! Student persistence: a repository trait with Postgres and in-memory backends.

mod memory;
mod postgres;

pub use memory::MemoryStudentRepository;
pub use postgres::{ensure_database_exists, ensure_students_table, PgStudentRepository};

use crate::error::AppError;
use crate::model::{Student, StudentId, StudentPayload};
use async_trait::async_trait;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students ordered by id.
    async fn find_all(&self) -> Result<Vec<Student>, AppError>;

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, AppError>;

    /// Insert a new row; the store assigns the id.
    async fn insert(&self, payload: &StudentPayload) -> Result<Student, AppError>;

    /// Replace name and email of an existing row. `None` when the id is absent.
    async fn update(
        &self,
        id: StudentId,
        payload: &StudentPayload,
    ) -> Result<Option<Student>, AppError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: StudentId) -> Result<bool, AppError>;

    /// Round trip to storage, used by `/ready`.
    async fn ping(&self) -> Result<(), AppError>;
}
