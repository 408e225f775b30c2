pub mod postgres_announcement_repo;
pub mod postgres_auth_repo;
pub mod postgres_booking_repo;
pub mod postgres_classroom_repo;
pub mod postgres_job_repo;
pub mod postgres_schedule_repo;
pub mod postgres_user_repo;
pub mod sqlite_announcement_repo;
pub mod sqlite_auth_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_classroom_repo;
pub mod sqlite_job_repo;
pub mod sqlite_schedule_repo;
pub mod sqlite_user_repo;
