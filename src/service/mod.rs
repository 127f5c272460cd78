//! StudentService: validated CRUD over the configured repository.

mod students;
mod validation;
pub use students::StudentService;
pub use validation::{StudentValidator, MAX_FIELD_LENGTH};
