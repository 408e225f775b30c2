use crate::domain::models::booking::BookingDetail;
use crate::domain::models::job::{job_types, Job};
use crate::domain::services::calendar::generate_ics;
use crate::error::AppError;
use crate::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{error, info, info_span, warn, Instrument};

/// Drains the notification job queue: renders the approval/rejection email
/// for each pending job and hands it to the email service.
pub async fn start_background_worker(state: Arc<AppState>) {
    info!("Starting notification job worker...");

    loop {
        match state.job_repo.find_pending(10).await {
            Ok(jobs) => {
                for job in jobs {
                    let span = info_span!(
                        "notification_job",
                        job_id = %job.id,
                        job_type = %job.job_type,
                        booking_id = %job.booking_id,
                    );

                    let state = state.clone();

                    async move {
                        info!("Processing job: {}", job.job_type);
                        match process_job(&state, &job).await {
                            Ok(_) => {
                                info!("Job completed successfully");
                                if let Err(e) = state.job_repo.update_status(&job.id, "COMPLETED", None).await {
                                    error!("Failed to mark job as completed: {:?}", e);
                                }
                            }
                            Err(e) => {
                                let err_msg = format!("{}", e);
                                error!("Job failed with error: {}", err_msg);
                                if let Err(up_err) = state.job_repo.update_status(&job.id, "FAILED", Some(err_msg)).await {
                                    error!("Failed to mark job as failed: {:?}", up_err);
                                }
                            }
                        }
                    }
                    .instrument(span)
                    .await;
                }
            }
            Err(e) => error!("Failed to fetch pending jobs: {:?}", e),
        }
        sleep(Duration::from_secs(5)).await;
    }
}

fn booking_context(booking: &BookingDetail) -> tera::Context {
    let mut context = tera::Context::new();
    context.insert("user_name", &booking.requester_name);
    context.insert("classroom_name", &booking.classroom_name);
    context.insert("booking_date", &booking.booking_date.format("%Y-%m-%d").to_string());
    context.insert("start_time", &booking.start_time);
    context.insert("end_time", &booking.end_time);
    context.insert("purpose", &booking.purpose);
    context
}

async fn process_job(state: &Arc<AppState>, job: &Job) -> Result<(), AppError> {
    let booking = state.booking_repo.find_detail(&job.booking_id).await?
        .ok_or(AppError::NotFound(format!("Booking {} not found", job.booking_id)))?;

    match job.job_type.as_str() {
        job_types::BOOKING_APPROVED => {
            let mut context = booking_context(&booking);
            context.insert("notes", &booking.notes.clone().unwrap_or_default());

            let html = state
                .templates
                .render("booking_approved.html", &context)
                .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {:?}", e)))?;

            let subject = format!(
                "Booking approved: {} on {}",
                booking.classroom_name, booking.booking_date
            );

            let ics = generate_ics(&booking)?;

            info!("Sending approval email to {}", booking.requester_email);
            state
                .email_service
                .send(&booking.requester_email, &subject, &html, Some("booking.ics"), Some(ics.as_bytes()))
                .await?;
        }
        job_types::BOOKING_REJECTED => {
            let mut context = booking_context(&booking);
            context.insert("rejection_reason", &booking.rejection_reason.clone().unwrap_or_default());

            let html = state
                .templates
                .render("booking_rejected.html", &context)
                .map_err(|e| AppError::InternalWithMsg(format!("Template render error: {:?}", e)))?;

            let subject = format!(
                "Booking rejected: {} on {}",
                booking.classroom_name, booking.booking_date
            );

            info!("Sending rejection email to {}", booking.requester_email);
            state
                .email_service
                .send(&booking.requester_email, &subject, &html, None, None)
                .await?;
        }
        other => {
            warn!("Unknown job type {}, skipping", other);
        }
    }

    Ok(())
}
