//! HTTP handlers for student CRUD and the OpenAPI document.

pub mod openapi;
pub mod students;
pub use students::*;
