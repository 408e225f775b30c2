use crate::api::dtos::requests::{
    CreateAnnouncementRequest, ListAnnouncementsQuery, UpdateAnnouncementRequest,
};
use crate::api::dtos::responses::{DataResponse, MessageResponse, PagedResponse};
use crate::api::extractors::auth::AuthUser;
use crate::domain::models::announcement::{categories, priorities, Announcement, NewAnnouncementParams};
use crate::domain::models::user::roles;
use crate::domain::ports::AnnouncementFilter;
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

const DEFAULT_PAGE_SIZE: i64 = 10;
const MAX_PAGE_SIZE: i64 = 100;

fn page_window(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit)
}

pub async fn list_announcements(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Query(query): Query<ListAnnouncementsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let (page, limit) = page_window(query.page, query.limit);

    let filter = AnnouncementFilter {
        category: query.category,
        priority: query.priority,
        limit,
        offset: (page - 1) * limit,
    };

    let total = state.announcement_repo.count(&filter).await?;
    let announcements = state.announcement_repo.list(&filter).await?;

    Ok(Json(PagedResponse::new(total, page, limit, announcements)))
}

pub async fn get_announcement(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.announcement_repo.increment_view_count(&id).await?;

    let announcement = state.announcement_repo.find_detail(&id).await?
        .ok_or(AppError::NotFound("Announcement not found".into()))?;

    Ok(Json(DataResponse::new(announcement)))
}

pub async fn create_announcement(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(payload): Json<CreateAnnouncementRequest>,
) -> Result<impl IntoResponse, AppError> {
    if user.0.role == roles::STUDENT {
        return Err(AppError::Forbidden("Students cannot post announcements".into()));
    }

    if payload.title.trim().is_empty() || payload.title.len() > 200 {
        return Err(AppError::Validation("Title must be 1-200 characters".into()));
    }
    if payload.description.trim().is_empty() || payload.description.len() > 2000 {
        return Err(AppError::Validation("Description must be 1-2000 characters".into()));
    }
    if !categories::ALL.contains(&payload.category.as_str()) {
        return Err(AppError::Validation(format!("Unknown category: {}", payload.category)));
    }
    let priority = payload.priority.unwrap_or_else(|| priorities::NORMAL.to_string());
    if !priorities::ALL.contains(&priority.as_str()) {
        return Err(AppError::Validation(format!("Unknown priority: {}", priority)));
    }

    let announcement = Announcement::new(NewAnnouncementParams {
        title: payload.title,
        description: payload.description,
        category: payload.category,
        priority,
        target_roles: payload.target_roles.unwrap_or_else(|| vec!["all".to_string()]),
        created_by: user.0.sub.clone(),
        start_date: payload.start_date,
        end_date: payload.end_date,
    });

    let created = state.announcement_repo.create(&announcement).await?;
    let detail = state.announcement_repo.find_detail(&created.id).await?
        .ok_or(AppError::Internal)?;

    info!("Announcement created: {}", detail.id);

    Ok((
        StatusCode::CREATED,
        Json(DataResponse::with_message("Announcement created successfully", detail)),
    ))
}

pub async fn update_announcement(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAnnouncementRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut announcement = state.announcement_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Announcement not found".into()))?;

    if announcement.created_by != user.0.sub && user.0.role != roles::ADMIN {
        return Err(AppError::Forbidden("Not authorized to update this announcement".into()));
    }

    if let Some(title) = payload.title {
        if title.trim().is_empty() || title.len() > 200 {
            return Err(AppError::Validation("Title must be 1-200 characters".into()));
        }
        announcement.title = title;
    }
    if let Some(description) = payload.description {
        if description.trim().is_empty() || description.len() > 2000 {
            return Err(AppError::Validation("Description must be 1-2000 characters".into()));
        }
        announcement.description = description;
    }
    if let Some(category) = payload.category {
        if !categories::ALL.contains(&category.as_str()) {
            return Err(AppError::Validation(format!("Unknown category: {}", category)));
        }
        announcement.category = category;
    }
    if let Some(priority) = payload.priority {
        if !priorities::ALL.contains(&priority.as_str()) {
            return Err(AppError::Validation(format!("Unknown priority: {}", priority)));
        }
        announcement.priority = priority;
    }
    if let Some(target_roles) = payload.target_roles {
        announcement.target_roles = SqlJson(target_roles);
    }
    if let Some(start_date) = payload.start_date {
        announcement.start_date = start_date;
    }
    if let Some(end_date) = payload.end_date {
        announcement.end_date = Some(end_date);
    }
    if let Some(is_active) = payload.is_active {
        announcement.is_active = is_active;
    }

    state.announcement_repo.update(&announcement).await?;
    let detail = state.announcement_repo.find_detail(&id).await?
        .ok_or(AppError::Internal)?;

    Ok(Json(DataResponse::with_message("Announcement updated successfully", detail)))
}

pub async fn delete_announcement(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let mut announcement = state.announcement_repo.find_by_id(&id).await?
        .ok_or(AppError::NotFound("Announcement not found".into()))?;

    if announcement.created_by != user.0.sub && user.0.role != roles::ADMIN {
        return Err(AppError::Forbidden("Not authorized to delete this announcement".into()));
    }

    // Soft delete
    announcement.is_active = false;
    state.announcement_repo.update(&announcement).await?;

    info!("Announcement deactivated: {}", id);

    Ok(Json(MessageResponse {
        success: true,
        message: "Announcement deleted successfully".to_string(),
    }))
}
