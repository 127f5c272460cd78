//! OpenAPI document for the student routes.

use crate::handlers::students;
use crate::model::{Student, StudentPayload};
use axum::Json;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        students::list,
        students::read,
        students::create,
        students::update,
        students::delete,
    ),
    components(schemas(Student, StudentPayload)),
    tags((name = "students", description = "Student record CRUD"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
