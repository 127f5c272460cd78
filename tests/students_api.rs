//! # Student REST API Tests
//!
//! Runs the real router on an ephemeral port, backed by the in-memory store
//! or by a store that is always offline, and drives it over HTTP.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use student_crud::{
    app, AppError, AppState, MemoryStudentRepository, Student, StudentId, StudentPayload,
    StudentRepository,
};
use tokio::net::TcpListener;

struct TestServer {
    addr: SocketAddr,
    client: reqwest::Client,
}

impl TestServer {
    async fn start() -> Self {
        Self::start_with_limit(64 * 1024).await
    }

    async fn start_with_limit(body_limit_bytes: usize) -> Self {
        Self::start_with(Arc::new(MemoryStudentRepository::new()), body_limit_bytes).await
    }

    async fn start_with(repo: Arc<dyn StudentRepository>, body_limit_bytes: usize) -> Self {
        let state = AppState::new(repo);
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");
        tokio::spawn(async move {
            axum::serve(listener, app(state, body_limit_bytes))
                .await
                .expect("Test server failed");
        });
        Self {
            addr,
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn create(&self, name: &str, email: &str) -> Value {
        let response = self
            .client
            .post(self.url("/students"))
            .json(&json!({ "name": name, "email": email }))
            .send()
            .await
            .expect("Failed to send request");
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("Failed to parse JSON")
    }
}

/// Storage that is never reachable.
struct UnavailableRepository;

#[async_trait]
impl StudentRepository for UnavailableRepository {
    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        Err(AppError::Internal("storage offline".into()))
    }

    async fn find_by_id(&self, _id: StudentId) -> Result<Option<Student>, AppError> {
        Err(AppError::Internal("storage offline".into()))
    }

    async fn insert(&self, _payload: &StudentPayload) -> Result<Student, AppError> {
        Err(AppError::Internal("storage offline".into()))
    }

    async fn update(
        &self,
        _id: StudentId,
        _payload: &StudentPayload,
    ) -> Result<Option<Student>, AppError> {
        Err(AppError::Internal("storage offline".into()))
    }

    async fn delete(&self, _id: StudentId) -> Result<bool, AppError> {
        Err(AppError::Internal("storage offline".into()))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(AppError::Internal("storage offline".into()))
    }
}

#[tokio::test]
async fn test_create_then_get_returns_same_data() {
    let server = TestServer::start().await;
    let created = server.create("Ada", "ada@example.com").await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Ada");
    assert_eq!(created["email"], "ada@example.com");

    let fetched: Value = server
        .client
        .get(server.url("/students/1"))
        .send()
        .await
        .expect("Failed to send request")
        .json()
        .await
        .expect("Failed to parse JSON");
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_list_returns_all_in_id_order() {
    let server = TestServer::start().await;
    server.create("Ada", "ada@example.com").await;
    server.create("Brian", "brian@example.com").await;

    let response = server
        .client
        .get(server.url("/students"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let students: Vec<Value> = response.json().await.expect("Failed to parse JSON");
    let names: Vec<&str> = students.iter().filter_map(|s| s["name"].as_str()).collect();
    assert_eq!(names, vec!["Ada", "Brian"]);
}

#[tokio::test]
async fn test_missing_student_is_plain_text_404() {
    let server = TestServer::start().await;
    let response = server
        .client
        .get(server.url("/students/99"))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response.headers()[reqwest::header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/plain"), "{content_type}");
    assert_eq!(response.text().await.unwrap(), "Could not find student 99");
}

#[tokio::test]
async fn test_update_changes_only_targeted_fields() {
    let server = TestServer::start().await;
    let created = server.create("Ada", "ada@example.com").await;
    let other = server.create("Brian", "brian@example.com").await;

    let response = server
        .client
        .put(server.url("/students/1"))
        .json(&json!({ "id": 500, "name": "Ada L.", "email": "ada@lovelace.org" }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Value = response.json().await.unwrap();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["name"], "Ada L.");
    assert_eq!(updated["email"], "ada@lovelace.org");

    let untouched: Value = server
        .client
        .get(server.url("/students/2"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(untouched, other);
}

#[tokio::test]
async fn test_update_missing_student_is_404() {
    let server = TestServer::start().await;
    let response = server
        .client
        .put(server.url("/students/7"))
        .json(&json!({ "name": "Ada", "email": "ada@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(response.text().await.unwrap(), "Could not find student 7");
}

#[tokio::test]
async fn test_delete_removes_record() {
    let server = TestServer::start().await;
    server.create("Ada", "ada@example.com").await;

    let response = server
        .client
        .delete(server.url("/students/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = server.client.get(server.url("/students/1")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = server
        .client
        .delete(server.url("/students/1"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_payload_is_422_envelope() {
    let server = TestServer::start().await;
    let response = server
        .client
        .post(server.url("/students"))
        .json(&json!({ "name": "Ada", "email": "nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_non_numeric_id_is_400() {
    let server = TestServer::start().await;
    let response = server
        .client
        .get(server.url("/students/abc"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let server = TestServer::start_with_limit(64).await;
    let response = server
        .client
        .post(server.url("/students"))
        .json(&json!({ "name": "x".repeat(200), "email": "ada@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_common_routes() {
    let server = TestServer::start().await;

    let health: Value = server
        .client
        .get(server.url("/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["status"], "ok");

    let ready: Value = server
        .client
        .get(server.url("/ready"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(ready["storage"], "ok");

    let version: Value = server
        .client
        .get(server.url("/version"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(version["name"], "student-crud");

    let doc: Value = server
        .client
        .get(server.url("/api-docs/openapi.json"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(doc["paths"]["/students/{id}"].is_object());
}

#[tokio::test]
async fn test_malformed_json_body_is_rejected() {
    let server = TestServer::start().await;
    server.create("Ada", "ada@example.com").await;

    let response = server
        .client
        .post(server.url("/students"))
        .header(reqwest::header::CONTENT_TYPE, "application/json")
        .body(r#"{"name": "Ada", "email": "#)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = server
        .client
        .put(server.url("/students/1"))
        .json(&json!({ "name": 5, "email": "ada@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let unchanged: Value = server
        .client
        .get(server.url("/students/1"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unchanged["name"], "Ada");
}

#[tokio::test]
async fn test_ready_reports_unavailable_storage() {
    let server = TestServer::start_with(Arc::new(UnavailableRepository), 64 * 1024).await;

    let response = server.client.get(server.url("/ready")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "status": "degraded", "storage": "unavailable" }));

    let response = server.client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = server.client.get(server.url("/students")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"]["code"], "internal_error");
}
