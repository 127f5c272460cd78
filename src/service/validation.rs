//! Request validation for student payloads.

use crate::error::AppError;
use crate::model::StudentPayload;
use regex::Regex;
use std::sync::OnceLock;

pub const MAX_FIELD_LENGTH: usize = 255;

fn email_pattern() -> Result<&'static Regex, AppError> {
    static EMAIL: OnceLock<Result<Regex, regex::Error>> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$"))
        .as_ref()
        .map_err(|e| AppError::Internal(format!("email pattern: {}", e)))
}

pub struct StudentValidator;

impl StudentValidator {
    /// Both fields are required on create and update.
    pub fn validate(payload: &StudentPayload) -> Result<(), AppError> {
        validate_text("name", &payload.name)?;
        validate_text("email", &payload.email)?;
        if !email_pattern()?.is_match(payload.email.trim()) {
            return Err(AppError::Validation("email must be a valid email".into()));
        }
        Ok(())
    }
}

fn validate_text(col: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} is required", col)));
    }
    if value.chars().count() > MAX_FIELD_LENGTH {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters",
            col, MAX_FIELD_LENGTH
        )));
    }
    Ok(())
}
