use crate::api::dtos::requests::{CreateScheduleRequest, ListSchedulesQuery, UpdateScheduleRequest};
use crate::api::dtos::responses::{DataResponse, MessageResponse};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::schedule::{NewScheduleParams, RegularSchedule};
use crate::domain::models::user::roles;
use crate::domain::ports::ScheduleFilter;
use crate::domain::services::timeslot::parse_time_to_minutes;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::info;

fn validate_time_range(start_time: &str, end_time: &str) -> Result<(), AppError> {
    let start = parse_time_to_minutes(start_time)?;
    let end = parse_time_to_minutes(end_time)?;
    if end <= start {
        return Err(AppError::Validation("End time must be after start time".into()));
    }
    Ok(())
}

fn validate_day_of_week(day_of_week: i32) -> Result<(), AppError> {
    if !(0..=6).contains(&day_of_week) {
        return Err(AppError::Validation("Day of week must be between 0-6".into()));
    }
    Ok(())
}

pub async fn list_schedules(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<ListSchedulesQuery>,
) -> Result<impl IntoResponse, AppError> {
    if let Some(day) = query.day_of_week {
        validate_day_of_week(day)?;
    }

    let filter = ScheduleFilter {
        classroom_id: query.classroom_id,
        day_of_week: query.day_of_week,
        semester: query.semester,
    };

    let schedules = state.schedule_repo.list(&filter).await?;
    Ok(Json(DataResponse::new(schedules)))
}

pub async fn get_schedule(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let schedule = state.schedule_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Schedule not found".into()))?;
    Ok(Json(DataResponse::new(schedule)))
}

pub async fn create_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if user.0.role != roles::ADMIN {
        return Err(AppError::Forbidden("Only admins can manage schedules".into()));
    }

    validate_day_of_week(payload.day_of_week)?;
    validate_time_range(&payload.start_time, &payload.end_time)?;

    state.classroom_repo.find_by_id(&payload.classroom_id).await?
        .ok_or(AppError::NotFound("Classroom not found".into()))?;

    let schedule = RegularSchedule::new(NewScheduleParams {
        classroom_id: payload.classroom_id,
        course_name: payload.course_name,
        course_code: payload.course_code,
        lecturer: payload.lecturer,
        day_of_week: payload.day_of_week,
        start_time: payload.start_time,
        end_time: payload.end_time,
        semester: payload.semester,
    });
    let created = state.schedule_repo.create(&schedule).await?;

    info!("Regular schedule created: {} ({})", created.course_name, created.id);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message("Regular schedule created successfully", created)),
    ))
}

pub async fn update_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateScheduleRequest>,
) -> Result<impl IntoResponse, AppError> {
    if user.0.role != roles::ADMIN {
        return Err(AppError::Forbidden("Only admins can manage schedules".into()));
    }

    let mut schedule = state.schedule_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Schedule not found".into()))?;

    if let Some(classroom_id) = payload.classroom_id {
        state.classroom_repo.find_by_id(&classroom_id).await?
            .ok_or(AppError::NotFound("Classroom not found".into()))?;
        schedule.classroom_id = classroom_id;
    }
    if let Some(course_name) = payload.course_name {
        schedule.course_name = course_name;
    }
    if let Some(course_code) = payload.course_code {
        schedule.course_code = Some(course_code);
    }
    if let Some(lecturer) = payload.lecturer {
        schedule.lecturer = lecturer;
    }
    if let Some(day_of_week) = payload.day_of_week {
        validate_day_of_week(day_of_week)?;
        schedule.day_of_week = day_of_week;
    }
    if let Some(start_time) = payload.start_time {
        schedule.start_time = start_time;
    }
    if let Some(end_time) = payload.end_time {
        schedule.end_time = end_time;
    }
    validate_time_range(&schedule.start_time, &schedule.end_time)?;
    if let Some(semester) = payload.semester {
        schedule.semester = semester;
    }
    if let Some(is_active) = payload.is_active {
        schedule.is_active = is_active;
    }

    let updated = state.schedule_repo.update(&schedule).await?;

    Ok(Json(DataResponse::with_message("Schedule updated successfully", updated)))
}

pub async fn delete_schedule(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if user.0.role != roles::ADMIN {
        return Err(AppError::Forbidden("Only admins can manage schedules".into()));
    }

    let mut schedule = state.schedule_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Schedule not found".into()))?;

    // Soft delete
    schedule.is_active = false;
    state.schedule_repo.update(&schedule).await?;

    info!("Schedule deactivated: {}", id);

    Ok(Json(MessageResponse {
        success: true,
        message: "Schedule deleted successfully".to_string(),
    }))
}
