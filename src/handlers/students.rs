//! Student CRUD handlers: list, read, create, update, delete.

use crate::error::AppError;
use crate::model::{Student, StudentId, StudentPayload};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

fn parse_id(id_str: &str) -> Result<StudentId, AppError> {
    id_str
        .trim()
        .parse()
        .map_err(|_| AppError::BadRequest(format!("invalid id '{}'", id_str)))
}

#[utoipa::path(
    get,
    path = "/students",
    responses((status = 200, description = "All students ordered by id", body = [Student])),
    tag = "students"
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Student>>, AppError> {
    Ok(Json(state.students.get_all_students().await?))
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 404, description = "No student with this id", body = String, content_type = "text/plain")
    ),
    tag = "students"
)]
pub async fn read(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(state.students.get_student_by_id(id).await?))
}

#[utoipa::path(
    post,
    path = "/students",
    request_body = StudentPayload,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 422, description = "Invalid name or email")
    ),
    tag = "students"
)]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<StudentPayload>,
) -> Result<(StatusCode, Json<Student>), AppError> {
    let student = state.students.create_student(body).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

#[utoipa::path(
    put,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    request_body = StudentPayload,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 404, description = "No student with this id", body = String, content_type = "text/plain"),
        (status = 422, description = "Invalid name or email")
    ),
    tag = "students"
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    Json(body): Json<StudentPayload>,
) -> Result<Json<Student>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(state.students.update_student(id, body).await?))
}

#[utoipa::path(
    delete,
    path = "/students/{id}",
    params(("id" = i64, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 404, description = "No student with this id", body = String, content_type = "text/plain")
    ),
    tag = "students"
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id_str)?;
    state.students.delete_student(id).await?;
    Ok(StatusCode::OK)
}
