#![allow(dead_code)]

use portal_backend::{
    api::router::create_router,
    background::start_background_worker,
    config::Config,
    domain::ports::EmailService,
    domain::services::auth_service::AuthService,
    domain::services::availability::{AvailabilityCalculator, OperatingWindow},
    domain::services::conflict::ConflictChecker,
    error::AppError,
    infra::factory::load_templates,
    infra::repositories::{
        sqlite_announcement_repo::SqliteAnnouncementRepo, sqlite_auth_repo::SqliteAuthRepo,
        sqlite_booking_repo::SqliteBookingRepo, sqlite_classroom_repo::SqliteClassroomRepo,
        sqlite_job_repo::SqliteJobRepo, sqlite_schedule_repo::SqliteScheduleRepo,
        sqlite_user_repo::SqliteUserRepo,
    },
    state::AppState,
};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

pub struct MockEmailService;

#[async_trait]
impl EmailService for MockEmailService {
    async fn send(
        &self,
        _recipient: &str,
        _subject: &str,
        _html_body: &str,
        _attachment_name: Option<&str>,
        _attachment_data: Option<&[u8]>,
    ) -> Result<(), AppError> {
        Ok(())
    }
}

pub struct AuthSession {
    pub user_id: String,
    pub email: String,
    pub access_token: String,
    pub refresh_token: String,
    pub csrf_token: String,
}

pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let priv_key_pem = include_str!("keys/test_private.pem");
        let pub_key_pem = include_str!("keys/test_public.pem");

        let config = Config {
            database_url: db_url.clone(),
            port: 0,
            mail_service_url: "http://localhost".to_string(),
            mail_service_token: "token".to_string(),
            jwt_secret_key: priv_key_pem.to_string(),
            jwt_public_key: pub_key_pem.to_string(),
            auth_issuer: "test-issuer".to_string(),
            operating_open: 420,
            operating_close: 1260,
        };

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let schedule_repo = Arc::new(SqliteScheduleRepo::new(pool.clone()));
        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let conflict_checker = Arc::new(ConflictChecker::new(schedule_repo.clone(), booking_repo.clone()));
        let availability = Arc::new(AvailabilityCalculator::new(
            schedule_repo.clone(),
            booking_repo.clone(),
            OperatingWindow { start: config.operating_open, end: config.operating_close },
        ));

        let state = Arc::new(AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            classroom_repo: Arc::new(SqliteClassroomRepo::new(pool.clone())),
            schedule_repo,
            booking_repo,
            announcement_repo: Arc::new(SqliteAnnouncementRepo::new(pool.clone())),
            auth_repo,
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            auth_service,
            conflict_checker,
            availability,
            email_service: Arc::new(MockEmailService),
            templates: Arc::new(load_templates()),
        });

        let worker_state = state.clone();
        tokio::spawn(async move {
            start_background_worker(worker_state).await;
        });

        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    /// Registers a fresh account and returns its auth session. Student
    /// accounts get a generated 10-digit student id.
    pub async fn register(&self, full_name: &str, role: &str) -> AuthSession {
        let email = format!("{}@test.example", Uuid::new_v4());
        let mut payload = serde_json::json!({
            "fullName": full_name,
            "email": email,
            "password": "password123",
            "role": role,
        });
        if role == "student" {
            payload["studentId"] = serde_json::json!("0123456789");
        }

        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/auth/register")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(payload.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        if !response.status().is_success() {
            panic!("Register failed in test helper: status {}", response.status());
        }

        let cookies: Vec<String> = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|h| h.to_str().unwrap().to_string())
            .collect();

        let access_token = extract_cookie(&cookies, "access_token");
        let refresh_token = extract_cookie(&cookies, "refresh_token");

        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body_json: Value = serde_json::from_slice(&body_bytes).unwrap();
        let csrf_token = body_json["csrfToken"].as_str().expect("No csrfToken in body").to_string();
        let user_id = body_json["user"]["id"].as_str().expect("No user id in body").to_string();

        AuthSession {
            user_id,
            email,
            access_token,
            refresh_token,
            csrf_token,
        }
    }
}

fn extract_cookie(cookies: &[String], name: &str) -> String {
    let prefix = format!("{}=", name);
    let cookie = cookies
        .iter()
        .find(|c| c.starts_with(&prefix))
        .unwrap_or_else(|| panic!("No {} cookie returned", name));

    let start = prefix.len();
    let end = cookie[start..].find(';').unwrap_or(cookie.len() - start);
    cookie[start..start + end].to_string()
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn authed_get(uri: &str, auth: &AuthSession) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::COOKIE, format!("access_token={}", auth.access_token))
        .body(Body::empty())
        .unwrap()
}

pub fn authed_json(method: &str, uri: &str, auth: &AuthSession, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::COOKIE, format!("access_token={}", auth.access_token))
        .header("X-CSRF-Token", auth.csrf_token.clone())
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn authed_delete(uri: &str, auth: &AuthSession) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .header(header::COOKIE, format!("access_token={}", auth.access_token))
        .header("X-CSRF-Token", auth.csrf_token.clone())
        .body(Body::empty())
        .unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}
