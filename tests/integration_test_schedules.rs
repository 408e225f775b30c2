mod common;

use axum::http::StatusCode;
use common::{authed_delete, authed_get, authed_json, parse_body, AuthSession, TestApp};
use serde_json::json;
use tower::ServiceExt;

async fn create_classroom(app: &TestApp, session: &AuthSession, name: &str) -> String {
    let res = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/classrooms",
            session,
            json!({ "name": name, "capacity": 40 }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await["data"]["id"].as_str().unwrap().to_string()
}

fn schedule_payload(classroom_id: &str, day_of_week: i32, start: &str, end: &str) -> serde_json::Value {
    json!({
        "classroomId": classroom_id,
        "courseName": "Distributed Systems",
        "courseCode": "CS-402",
        "lecturer": "Dr. Ibrahim",
        "dayOfWeek": day_of_week,
        "startTime": start,
        "endTime": end,
        "semester": "2030-odd"
    })
}

#[tokio::test]
async fn test_admin_creates_schedule() {
    let app = TestApp::new().await;
    let admin = app.register("Admin One", "admin").await;
    let classroom_id = create_classroom(&app, &admin, "IF-201").await;

    let res = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/schedules",
            &admin,
            schedule_payload(&classroom_id, 1, "08:00", "10:00"),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["data"]["courseName"].as_str().unwrap(), "Distributed Systems");
    assert_eq!(body["data"]["dayOfWeek"].as_i64().unwrap(), 1);
}

#[tokio::test]
async fn test_non_admins_cannot_manage_schedules() {
    let app = TestApp::new().await;
    let admin = app.register("Admin One", "admin").await;
    let lecturer = app.register("Lecturer One", "lecturer").await;
    let classroom_id = create_classroom(&app, &admin, "IF-202").await;

    let res = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/schedules",
            &lecturer,
            schedule_payload(&classroom_id, 1, "08:00", "10:00"),
        ))
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_schedule_validation() {
    let app = TestApp::new().await;
    let admin = app.register("Admin One", "admin").await;
    let classroom_id = create_classroom(&app, &admin, "IF-203").await;

    // Day outside 0-6.
    let res = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/schedules",
            &admin,
            schedule_payload(&classroom_id, 7, "08:00", "10:00"),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Inverted time range.
    let res = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/schedules",
            &admin,
            schedule_payload(&classroom_id, 1, "10:00", "08:00"),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Malformed time string.
    let res = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/schedules",
            &admin,
            schedule_payload(&classroom_id, 1, "8h00", "10:00"),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_filters() {
    let app = TestApp::new().await;
    let admin = app.register("Admin One", "admin").await;
    let room_a = create_classroom(&app, &admin, "IF-204").await;
    let room_b = create_classroom(&app, &admin, "IF-205").await;

    for (room, day) in [(&room_a, 1), (&room_a, 3), (&room_b, 1)] {
        let res = app
            .router
            .clone()
            .oneshot(authed_json(
                "POST",
                "/api/schedules",
                &admin,
                schedule_payload(room, day, "08:00", "10:00"),
            ))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app
        .router
        .clone()
        .oneshot(authed_get(&format!("/api/schedules?classroomId={}", room_a), &admin))
        .await
        .unwrap();
    assert_eq!(parse_body(res).await["data"].as_array().unwrap().len(), 2);

    let res = app
        .router
        .clone()
        .oneshot(authed_get("/api/schedules?dayOfWeek=1", &admin))
        .await
        .unwrap();
    assert_eq!(parse_body(res).await["data"].as_array().unwrap().len(), 2);

    let res = app
        .router
        .clone()
        .oneshot(authed_get(&format!("/api/schedules?classroomId={}&dayOfWeek=3", room_a), &admin))
        .await
        .unwrap();
    assert_eq!(parse_body(res).await["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_deactivated_schedule_stops_blocking_bookings() {
    let app = TestApp::new().await;
    let admin = app.register("Admin One", "admin").await;
    let student = app.register("Student One", "student").await;
    let classroom_id = create_classroom(&app, &admin, "IF-206").await;

    // 2030-05-06 is a Monday (dayOfWeek 1).
    let created = app
        .router
        .clone()
        .oneshot(authed_json(
            "POST",
            "/api/schedules",
            &admin,
            schedule_payload(&classroom_id, 1, "08:00", "10:00"),
        ))
        .await
        .unwrap();
    let schedule_id = parse_body(created).await["data"]["id"].as_str().unwrap().to_string();

    let booking = json!({
        "classroomId": classroom_id,
        "bookingDate": "2030-05-06",
        "startTime": "09:00",
        "endTime": "09:45",
        "purpose": "Thesis defense rehearsal",
        "numberOfPeople": 5
    });

    let blocked = app
        .router
        .clone()
        .oneshot(authed_json("POST", "/api/bookings", &student, booking.clone()))
        .await
        .unwrap();
    assert_eq!(blocked.status(), StatusCode::CONFLICT);

    let deleted = app
        .router
        .clone()
        .oneshot(authed_delete(&format!("/api/schedules/{}", schedule_id), &admin))
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::OK);

    let allowed = app
        .router
        .clone()
        .oneshot(authed_json("POST", "/api/bookings", &student, booking))
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::CREATED);
}
