mod common;

use axum::http::StatusCode;
use common::{authed_get, authed_json, parse_body, AuthSession, TestApp};
use serde_json::json;
use tower::ServiceExt;

// 2030-05-06 is a Monday (dayOfWeek 1).
const MONDAY: &str = "2030-05-06";

async fn create_classroom(app: &TestApp, session: &AuthSession, name: &str) -> String {
    let res = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/classrooms",
            session,
            json!({ "name": name, "capacity": 40, "facilities": ["projector"] }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await["data"]["id"].as_str().unwrap().to_string()
}

async fn availability(app: &TestApp, session: &AuthSession, room: &str, date: &str) -> serde_json::Value {
    let res = app
        .router
        .clone()
        .oneshot(authed_get(
            &format!("/api/classrooms/{}/availability?date={}", room, date),
            session,
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    parse_body(res).await
}

#[tokio::test]
async fn test_empty_day_is_one_full_operating_window() {
    let app = TestApp::new().await;
    let staff = app.register("Staff One", "staff").await;
    let room = create_classroom(&app, &staff, "IF-401").await;

    let body = availability(&app, &staff, &room, MONDAY).await;

    assert_eq!(body["success"].as_bool().unwrap(), true);
    assert_eq!(body["dayOfWeek"].as_i64().unwrap(), 1);
    assert_eq!(body["date"].as_str().unwrap(), MONDAY);
    assert!(body["occupiedSlots"].as_array().unwrap().is_empty());

    let free = body["availableSlots"].as_array().unwrap();
    assert_eq!(free.len(), 1);
    assert_eq!(free[0]["start"].as_str().unwrap(), "07:00");
    assert_eq!(free[0]["end"].as_str().unwrap(), "21:00");
}

#[tokio::test]
async fn test_gaps_around_schedule_and_booking() {
    let app = TestApp::new().await;
    let admin = app.register("Admin One", "admin").await;
    let staff = app.register("Staff One", "staff").await;
    let room = create_classroom(&app, &admin, "IF-402").await;

    let res = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/schedules",
            &admin,
            json!({
                "classroomId": room,
                "courseName": "Computer Networks",
                "lecturer": "Dr. Sari",
                "dayOfWeek": 1,
                "startTime": "08:00",
                "endTime": "09:00",
                "semester": "2030-odd"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Auto-approved staff booking occupies 10:00-12:00.
    let res = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/bookings",
            &staff,
            json!({
                "classroomId": room,
                "bookingDate": MONDAY,
                "startTime": "10:00",
                "endTime": "12:00",
                "purpose": "Faculty workshop",
                "numberOfPeople": 20
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = availability(&app, &staff, &room, MONDAY).await;

    let free: Vec<(String, String)> = body["availableSlots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| (
            s["start"].as_str().unwrap().to_string(),
            s["end"].as_str().unwrap().to_string(),
        ))
        .collect();
    assert_eq!(
        free,
        vec![
            ("07:00".to_string(), "08:00".to_string()),
            ("09:00".to_string(), "10:00".to_string()),
            ("12:00".to_string(), "21:00".to_string()),
        ]
    );

    let occupied = body["occupiedSlots"].as_array().unwrap();
    assert_eq!(occupied.len(), 2);

    // Minute offsets, sorted by start. The lecture comes first.
    assert_eq!(occupied[0]["start"].as_i64().unwrap(), 480);
    assert_eq!(occupied[0]["end"].as_i64().unwrap(), 540);
    assert_eq!(occupied[0]["type"].as_str().unwrap(), "regular");
    assert_eq!(occupied[0]["label"].as_str().unwrap(), "Computer Networks");

    assert_eq!(occupied[1]["start"].as_i64().unwrap(), 600);
    assert_eq!(occupied[1]["end"].as_i64().unwrap(), 720);
    assert_eq!(occupied[1]["type"].as_str().unwrap(), "booking");
    assert_eq!(occupied[1]["label"].as_str().unwrap(), "Booked by Staff One");
}

#[tokio::test]
async fn test_pending_bookings_do_not_occupy() {
    let app = TestApp::new().await;
    let admin = app.register("Admin One", "admin").await;
    let student = app.register("Student One", "student").await;
    let room = create_classroom(&app, &admin, "IF-403").await;

    let res = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/bookings",
            &student,
            json!({
                "classroomId": room,
                "bookingDate": MONDAY,
                "startTime": "10:00",
                "endTime": "11:00",
                "purpose": "Club meeting",
                "numberOfPeople": 10
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body = availability(&app, &student, &room, MONDAY).await;
    assert!(body["occupiedSlots"].as_array().unwrap().is_empty());
    assert_eq!(body["availableSlots"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_schedule_on_other_weekday_does_not_occupy() {
    let app = TestApp::new().await;
    let admin = app.register("Admin One", "admin").await;
    let room = create_classroom(&app, &admin, "IF-404").await;

    let res = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/schedules",
            &admin,
            json!({
                "classroomId": room,
                "courseName": "Databases",
                "lecturer": "Dr. Sari",
                "dayOfWeek": 3,
                "startTime": "08:00",
                "endTime": "10:00",
                "semester": "2030-odd"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // Monday is unaffected by a Wednesday lecture.
    let body = availability(&app, &admin, &room, MONDAY).await;
    assert!(body["occupiedSlots"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_date_parameter_is_rejected() {
    let app = TestApp::new().await;
    let staff = app.register("Staff One", "staff").await;
    let room = create_classroom(&app, &staff, "IF-405").await;

    let res = app
        .router
        .clone()
        .oneshot(authed_get(&format!("/api/classrooms/{}/availability", room), &staff))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}
