use super::StudentRepository;
use crate::error::AppError;
use crate::model::{Student, StudentId, StudentPayload};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

/// Process-local store used when no `DATABASE_URL` is configured, and by tests.
/// Ids start at 1 and are never reused, matching a Postgres sequence.
#[derive(Debug)]
pub struct MemoryStudentRepository {
    inner: RwLock<Inner>,
}

#[derive(Debug)]
struct Inner {
    rows: BTreeMap<StudentId, Student>,
    next_id: StudentId,
}

impl Default for MemoryStudentRepository {
    fn default() -> Self {
        Self {
            inner: RwLock::new(Inner {
                rows: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl MemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Inner>, AppError> {
        self.inner
            .read()
            .map_err(|_| AppError::Internal("student store lock poisoned".into()))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Inner>, AppError> {
        self.inner
            .write()
            .map_err(|_| AppError::Internal("student store lock poisoned".into()))
    }
}

#[async_trait]
impl StudentRepository for MemoryStudentRepository {
    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: StudentId) -> Result<Option<Student>, AppError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    async fn insert(&self, payload: &StudentPayload) -> Result<Student, AppError> {
        let mut inner = self.write()?;
        let id = inner.next_id;
        inner.next_id += 1;
        let student = Student::from_payload(id, payload);
        inner.rows.insert(id, student.clone());
        Ok(student)
    }

    async fn update(
        &self,
        id: StudentId,
        payload: &StudentPayload,
    ) -> Result<Option<Student>, AppError> {
        let mut inner = self.write()?;
        Ok(inner.rows.get_mut(&id).map(|row| {
            row.name = payload.name.clone();
            row.email = payload.email.clone();
            row.clone()
        }))
    }

    async fn delete(&self, id: StudentId) -> Result<bool, AppError> {
        Ok(self.write()?.rows.remove(&id).is_some())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.read().map(|_| ())
    }
}
