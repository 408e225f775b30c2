use crate::config::Config;
use crate::domain::ports::{
    AnnouncementRepository, AuthRepository, BookingRepository, ClassroomRepository, EmailService,
    JobRepository, ScheduleRepository, UserRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::availability::AvailabilityCalculator;
use crate::domain::services::conflict::ConflictChecker;
use std::sync::Arc;
use tera::Tera;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub classroom_repo: Arc<dyn ClassroomRepository>,
    pub schedule_repo: Arc<dyn ScheduleRepository>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub announcement_repo: Arc<dyn AnnouncementRepository>,
    pub auth_repo: Arc<dyn AuthRepository>,
    pub job_repo: Arc<dyn JobRepository>,
    pub auth_service: Arc<AuthService>,
    pub conflict_checker: Arc<ConflictChecker>,
    pub availability: Arc<AvailabilityCalculator>,
    pub email_service: Arc<dyn EmailService>,
    pub templates: Arc<Tera>,
}
