use crate::api::dtos::requests::{
    ApproveBookingRequest, CalendarQuery, CreateBookingRequest, ListBookingsQuery,
    RejectBookingRequest,
};
use crate::api::dtos::responses::{
    CalendarEvent, CalendarEventProps, CalendarResponse, DataResponse, MessageResponse,
    PagedResponse,
};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::booking::{
    status, Booking, NewBookingParams, MAX_DURATION_MINUTES, MIN_DURATION_MINUTES,
};
use crate::domain::models::job::{job_types, Job};
use crate::domain::models::user::{can_auto_approve, is_staff, roles};
use crate::domain::ports::BookingFilter;
use crate::domain::services::conflict::ConflictOutcome;
use crate::domain::services::timeslot::parse_time_to_minutes;
use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

/// 409 payload shared by booking creation and approval. The
/// `conflict.type`/`conflict.details` shape is what the frontend renders.
fn conflict_response(outcome: &ConflictOutcome) -> Response {
    let (kind, details) = outcome
        .conflict_parts()
        .expect("conflict_response called on a clear outcome");

    (
        StatusCode::CONFLICT,
        Json(json!({
            "success": false,
            "message": "Booking conflict detected",
            "conflict": {
                "type": kind,
                "details": details,
            }
        })),
    )
        .into_response()
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Query(query): Query<ListBookingsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);

    // Students only ever see their own bookings; the user filter is reserved
    // for the approval staff.
    let user_id = if user.0.role == roles::STUDENT {
        Some(user.0.sub.clone())
    } else if is_staff(&user.0.role) {
        query.user
    } else {
        None
    };

    let filter = BookingFilter {
        status: query.status,
        classroom_id: query.classroom_id,
        user_id,
        date: query.date,
        limit,
        offset: (page - 1) * limit,
    };

    let total = state.booking_repo.count(&filter).await?;
    let bookings = state.booking_repo.list(&filter).await?;

    Ok(Json(PagedResponse::new(total, page, limit, bookings)))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_detail(&id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.0.sub && user.0.role == roles::STUDENT {
        return Err(AppError::Forbidden("Not authorized to view this booking".into()));
    }

    Ok(Json(DataResponse::new(booking)))
}

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Response, AppError> {
    let classroom = state.classroom_repo.find_by_id(&payload.classroom_id).await?
        .ok_or(AppError::NotFound("Classroom not found".into()))?;
    if !classroom.is_active {
        return Err(AppError::NotFound("Classroom not found".into()));
    }

    if payload.purpose.trim().is_empty() || payload.purpose.len() > 500 {
        return Err(AppError::Validation("Purpose must be 1-500 characters".into()));
    }
    if payload.number_of_people < 1 {
        return Err(AppError::Validation("Number of people must be at least 1".into()));
    }
    if payload.number_of_people > classroom.capacity {
        return Err(AppError::Validation(format!(
            "Number of people ({}) exceeds classroom capacity ({})",
            payload.number_of_people, classroom.capacity
        )));
    }

    let start = parse_time_to_minutes(&payload.start_time)?;
    let end = parse_time_to_minutes(&payload.end_time)?;
    if end <= start {
        return Err(AppError::Validation("End time must be after start time".into()));
    }
    let duration = end - start;
    if duration < MIN_DURATION_MINUTES {
        return Err(AppError::Validation("Booking duration must be at least 30 minutes".into()));
    }
    if duration > MAX_DURATION_MINUTES {
        return Err(AppError::Validation("Booking duration cannot exceed 4 hours".into()));
    }

    if payload.booking_date < Utc::now().date_naive() {
        return Err(AppError::Validation("Cannot book a date in the past".into()));
    }

    let outcome = state
        .conflict_checker
        .check_conflict(
            &payload.classroom_id,
            payload.booking_date,
            &payload.start_time,
            &payload.end_time,
            None,
        )
        .await?;
    if !outcome.is_clear() {
        warn!("Booking rejected, conflict for classroom {}", payload.classroom_id);
        return Ok(conflict_response(&outcome));
    }

    // Lecturers and staff skip the pending queue.
    let auto_approved = can_auto_approve(&user.0.role);
    let initial_status = if auto_approved { status::APPROVED } else { status::PENDING };
    let booking = Booking::new(NewBookingParams {
        classroom_id: payload.classroom_id,
        user_id: user.0.sub.clone(),
        booking_date: payload.booking_date,
        start_time: payload.start_time,
        end_time: payload.end_time,
        purpose: payload.purpose,
        number_of_people: payload.number_of_people,
        status: initial_status.to_string(),
        approved_by: auto_approved.then(|| user.0.sub.clone()),
        approved_at: auto_approved.then(Utc::now),
    });

    let created = state.booking_repo.create(&booking).await?;
    let detail = state.booking_repo.find_detail(&created.id).await?
        .ok_or(AppError::Internal)?;

    info!("Booking created: {} (status {})", detail.id, detail.status);

    let message = if auto_approved {
        "Booking created and automatically approved"
    } else {
        "Booking request submitted, waiting for approval"
    };

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message(message, detail)),
    )
        .into_response())
}

pub async fn approve_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<ApproveBookingRequest>,
) -> Result<Response, AppError> {
    if !is_staff(&user.0.role) {
        return Err(AppError::Forbidden("Only staff can approve bookings".into()));
    }

    let mut booking = state.booking_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.status != status::PENDING {
        return Err(AppError::Validation(format!(
            "Cannot approve booking with status: {}",
            booking.status
        )));
    }

    // Re-check: other bookings may have been approved since this request was
    // filed. The booking must not collide with itself, hence the exclusion.
    let outcome = state
        .conflict_checker
        .check_conflict(
            &booking.classroom_id,
            booking.booking_date,
            &booking.start_time,
            &booking.end_time,
            Some(&booking.id),
        )
        .await?;
    if !outcome.is_clear() {
        return Ok(conflict_response(&outcome));
    }

    booking.status = status::APPROVED.to_string();
    booking.approved_by = Some(user.0.sub.clone());
    booking.approved_at = Some(Utc::now());
    if payload.notes.is_some() {
        booking.notes = payload.notes;
    }

    state.booking_repo.update(&booking).await?;

    let job = Job::new(job_types::BOOKING_APPROVED, booking.id.clone(), Utc::now());
    state.job_repo.create(&job).await?;

    let detail = state.booking_repo.find_detail(&booking.id).await?
        .ok_or(AppError::Internal)?;

    info!("Booking approved: {} by {}", booking.id, user.0.sub);

    Ok(Json(DataResponse::with_message("Booking approved successfully", detail)).into_response())
}

pub async fn reject_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<RejectBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !is_staff(&user.0.role) {
        return Err(AppError::Forbidden("Only staff can reject bookings".into()));
    }

    if payload.rejection_reason.trim().is_empty() {
        return Err(AppError::Validation("Please provide a rejection reason".into()));
    }
    if payload.rejection_reason.len() > 500 {
        return Err(AppError::Validation("Rejection reason cannot exceed 500 characters".into()));
    }

    let mut booking = state.booking_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.status != status::PENDING {
        return Err(AppError::Validation(format!(
            "Cannot reject booking with status: {}",
            booking.status
        )));
    }

    booking.status = status::REJECTED.to_string();
    booking.rejection_reason = Some(payload.rejection_reason);

    state.booking_repo.update(&booking).await?;

    let job = Job::new(job_types::BOOKING_REJECTED, booking.id.clone(), Utc::now());
    state.job_repo.create(&job).await?;

    let detail = state.booking_repo.find_detail(&booking.id).await?
        .ok_or(AppError::Internal)?;

    info!("Booking rejected: {} by {}", booking.id, user.0.sub);

    Ok(Json(DataResponse::with_message("Booking rejected", detail)))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut booking = state.booking_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    if booking.user_id != user.0.sub && user.0.role != roles::ADMIN {
        return Err(AppError::Forbidden("Not authorized to cancel this booking".into()));
    }

    if booking.status != status::PENDING && booking.status != status::APPROVED {
        return Err(AppError::Validation(format!(
            "Cannot cancel booking with status: {}",
            booking.status
        )));
    }

    booking.status = status::CANCELLED.to_string();
    state.booking_repo.update(&booking).await?;
    state.job_repo.cancel_for_booking(&booking.id).await?;

    info!("Booking cancelled: {}", booking.id);

    Ok(Json(MessageResponse {
        success: true,
        message: "Booking cancelled successfully".to_string(),
    }))
}

/// Approved bookings flattened into calendar events for the schedule view.
pub async fn get_calendar_events(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<CalendarQuery>,
) -> Result<impl IntoResponse, AppError> {
    if query.end_date < query.start_date {
        return Err(AppError::Validation("endDate must not be before startDate".into()));
    }

    let bookings = state
        .booking_repo
        .list_approved_between(query.start_date, query.end_date, query.classroom_id.as_deref())
        .await?;

    let events = bookings
        .into_iter()
        .map(|booking| {
            let short_purpose: String = booking.purpose.chars().take(30).collect();
            CalendarEvent {
                title: format!("{} - {}", short_purpose, booking.requester_name),
                start: format!("{}T{}:00", booking.booking_date, booking.start_time),
                end: format!("{}T{}:00", booking.booking_date, booking.end_time),
                kind: "booking",
                status: booking.status,
                extended_props: CalendarEventProps {
                    purpose: booking.purpose,
                    number_of_people: booking.number_of_people,
                    classroom: booking.classroom_name,
                    user: booking.requester_name,
                },
                id: booking.id,
            }
        })
        .collect();

    Ok(Json(CalendarResponse { success: true, events }))
}
