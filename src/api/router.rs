use crate::api::handlers::{announcement, auth, booking, classroom, health, schedule};
use crate::state::AppState;
use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tower_cookies::CookieManagerLayer;
use tower_http::{classify::ServerErrorsFailureClass, trace::TraceLayer};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/refresh", post(auth::refresh))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))

        // Announcements
        .route("/api/announcements", get(announcement::list_announcements).post(announcement::create_announcement))
        .route("/api/announcements/{id}", get(announcement::get_announcement).put(announcement::update_announcement).delete(announcement::delete_announcement))

        // Classrooms
        .route("/api/classrooms", get(classroom::list_classrooms).post(classroom::create_classroom))
        .route("/api/classrooms/{id}", get(classroom::get_classroom).put(classroom::update_classroom).delete(classroom::delete_classroom))
        .route("/api/classrooms/{id}/availability", get(classroom::get_classroom_availability))

        // Regular schedules
        .route("/api/schedules", get(schedule::list_schedules).post(schedule::create_schedule))
        .route("/api/schedules/{id}", get(schedule::get_schedule).put(schedule::update_schedule).delete(schedule::delete_schedule))

        // Bookings
        .route("/api/bookings", get(booking::list_bookings).post(booking::create_booking))
        .route("/api/bookings/calendar", get(booking::get_calendar_events))
        .route("/api/bookings/{id}", get(booking::get_booking).delete(booking::cancel_booking))
        .route("/api/bookings/{id}/approve", put(booking::approve_booking))
        .route("/api/bookings/{id}/reject", put(booking::reject_booking))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                }),
        )
        .layer(CookieManagerLayer::new())
        .with_state(state)
}
