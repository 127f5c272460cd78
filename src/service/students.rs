//! Student CRUD on top of a `StudentRepository`.

use super::StudentValidator;
use crate::error::AppError;
use crate::model::{Student, StudentId, StudentPayload};
use crate::store::StudentRepository;
use std::sync::Arc;

#[derive(Clone)]
pub struct StudentService {
    repo: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repo: Arc<dyn StudentRepository>) -> Self {
        Self { repo }
    }

    pub fn repository(&self) -> &Arc<dyn StudentRepository> {
        &self.repo
    }

    pub async fn get_all_students(&self) -> Result<Vec<Student>, AppError> {
        self.repo.find_all().await
    }

    pub async fn get_student_by_id(&self, id: StudentId) -> Result<Student, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::StudentNotFound(id))
    }

    pub async fn create_student(&self, payload: StudentPayload) -> Result<Student, AppError> {
        let payload = normalize(payload);
        StudentValidator::validate(&payload)?;
        let student = self.repo.insert(&payload).await?;
        tracing::info!(id = student.id, "student created");
        Ok(student)
    }

    /// Replaces name and email; the id never changes.
    pub async fn update_student(
        &self,
        id: StudentId,
        payload: StudentPayload,
    ) -> Result<Student, AppError> {
        let payload = normalize(payload);
        StudentValidator::validate(&payload)?;
        let student = self
            .repo
            .update(id, &payload)
            .await?
            .ok_or(AppError::StudentNotFound(id))?;
        tracing::info!(id, "student updated");
        Ok(student)
    }

    pub async fn delete_student(&self, id: StudentId) -> Result<(), AppError> {
        if !self.repo.delete(id).await? {
            return Err(AppError::StudentNotFound(id));
        }
        tracing::info!(id, "student deleted");
        Ok(())
    }
}

fn normalize(payload: StudentPayload) -> StudentPayload {
    StudentPayload {
        name: payload.name.trim().to_string(),
        email: payload.email.trim().to_string(),
    }
}
