use crate::api::dtos::requests::{AvailabilityQuery, CreateClassroomRequest, UpdateClassroomRequest};
use crate::api::dtos::responses::{
    AvailabilityResponse, ClassroomSummary, DataResponse, MessageResponse,
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::classroom::Classroom;
use crate::domain::models::user::{is_staff, roles};
use crate::domain::services::timeslot::weekday_index;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sqlx::types::Json as SqlJson;
use std::sync::Arc;
use tracing::info;

pub async fn list_classrooms(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let classrooms = state.classroom_repo.list_active().await?;
    Ok(Json(DataResponse::new(classrooms)))
}

pub async fn get_classroom(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let classroom = state.classroom_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Classroom not found".into()))?;
    Ok(Json(DataResponse::new(classroom)))
}

/// Availability of one classroom for one day: the free windows between
/// recurring lectures and approved bookings inside operating hours.
pub async fn get_classroom_availability(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    let classroom = state.classroom_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Classroom not found".into()))?;

    let slots = state.availability.get_available_slots(&classroom.id, query.date).await?;

    Ok(Json(AvailabilityResponse {
        success: true,
        classroom: ClassroomSummary {
            id: classroom.id,
            name: classroom.name,
            capacity: classroom.capacity,
            facilities: classroom.facilities,
        },
        date: query.date,
        day_of_week: weekday_index(query.date),
        slots,
    }))
}

pub async fn create_classroom(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateClassroomRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !is_staff(&user.0.role) {
        return Err(AppError::Forbidden("Only staff can manage classrooms".into()));
    }
    if payload.name.trim().is_empty() {
        return Err(AppError::Validation("Classroom name is required".into()));
    }
    if payload.capacity < 1 {
        return Err(AppError::Validation("Capacity must be at least 1".into()));
    }

    let classroom = Classroom::new(
        payload.name,
        payload.building,
        payload.floor,
        payload.capacity,
        payload.facilities.unwrap_or_default(),
    );
    let created = state.classroom_repo.create(&classroom).await?;

    info!("Classroom created: {} ({})", created.name, created.id);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message("Classroom created successfully", created)),
    ))
}

pub async fn update_classroom(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateClassroomRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !is_staff(&user.0.role) {
        return Err(AppError::Forbidden("Only staff can manage classrooms".into()));
    }

    let mut classroom = state.classroom_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Classroom not found".into()))?;

    if let Some(name) = payload.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Classroom name is required".into()));
        }
        classroom.name = name;
    }
    if let Some(building) = payload.building {
        classroom.building = Some(building);
    }
    if let Some(floor) = payload.floor {
        classroom.floor = Some(floor);
    }
    if let Some(capacity) = payload.capacity {
        if capacity < 1 {
            return Err(AppError::Validation("Capacity must be at least 1".into()));
        }
        classroom.capacity = capacity;
    }
    if let Some(facilities) = payload.facilities {
        classroom.facilities = SqlJson(facilities);
    }
    if let Some(is_active) = payload.is_active {
        classroom.is_active = is_active;
    }

    let updated = state.classroom_repo.update(&classroom).await?;

    Ok(Json(DataResponse::with_message("Classroom updated successfully", updated)))
}

pub async fn delete_classroom(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if user.0.role != roles::ADMIN {
        return Err(AppError::Forbidden("Only admins can delete classrooms".into()));
    }

    let mut classroom = state.classroom_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Classroom not found".into()))?;

    // Soft delete
    classroom.is_active = false;
    state.classroom_repo.update(&classroom).await?;

    info!("Classroom deactivated: {}", id);

    Ok(Json(MessageResponse {
        success: true,
        message: "Classroom deleted successfully".to_string(),
    }))
}
