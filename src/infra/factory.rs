use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tera::Tera;
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::availability::{AvailabilityCalculator, OperatingWindow};
use crate::domain::services::conflict::ConflictChecker;
use crate::infra::email::http_email_service::HttpEmailService;
use crate::infra::repositories::{
    postgres_announcement_repo::PostgresAnnouncementRepo, postgres_auth_repo::PostgresAuthRepo,
    postgres_booking_repo::PostgresBookingRepo, postgres_classroom_repo::PostgresClassroomRepo,
    postgres_job_repo::PostgresJobRepo, postgres_schedule_repo::PostgresScheduleRepo,
    postgres_user_repo::PostgresUserRepo, sqlite_announcement_repo::SqliteAnnouncementRepo,
    sqlite_auth_repo::SqliteAuthRepo, sqlite_booking_repo::SqliteBookingRepo,
    sqlite_classroom_repo::SqliteClassroomRepo, sqlite_job_repo::SqliteJobRepo,
    sqlite_schedule_repo::SqliteScheduleRepo, sqlite_user_repo::SqliteUserRepo,
};
use crate::state::AppState;

pub fn load_templates() -> Tera {
    let mut tera = Tera::default();
    tera.add_raw_template("booking_approved.html", include_str!("../templates/booking_approved.html"))
        .expect("Failed to load booking_approved template");
    tera.add_raw_template("booking_rejected.html", include_str!("../templates/booking_rejected.html"))
        .expect("Failed to load booking_rejected template");
    tera
}

pub async fn bootstrap_state(config: &Config) -> AppState {
    let database_url = &config.database_url;
    let email_service = Arc::new(HttpEmailService::new(
        config.mail_service_url.clone(),
        config.mail_service_token.clone(),
    ));

    let templates = Arc::new(load_templates());

    let window = OperatingWindow {
        start: config.operating_open,
        end: config.operating_close,
    };

    if database_url.starts_with("postgres://") || database_url.starts_with("postgresql://") {
        info!("Initializing PostgreSQL connection...");

        let mut opts: PgConnectOptions = database_url.parse().expect("Invalid Postgres URL");
        opts = opts
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect_with(opts)
            .await
            .expect("Failed to connect to Postgres");

        run_postgres_migrations(&pool).await;

        let auth_repo = Arc::new(PostgresAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let schedule_repo = Arc::new(PostgresScheduleRepo::new(pool.clone()));
        let booking_repo = Arc::new(PostgresBookingRepo::new(pool.clone()));
        let conflict_checker = Arc::new(ConflictChecker::new(schedule_repo.clone(), booking_repo.clone()));
        let availability = Arc::new(AvailabilityCalculator::new(
            schedule_repo.clone(),
            booking_repo.clone(),
            window,
        ));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(PostgresUserRepo::new(pool.clone())),
            classroom_repo: Arc::new(PostgresClassroomRepo::new(pool.clone())),
            schedule_repo,
            booking_repo,
            announcement_repo: Arc::new(PostgresAnnouncementRepo::new(pool.clone())),
            auth_repo,
            job_repo: Arc::new(PostgresJobRepo::new(pool.clone())),
            auth_service,
            conflict_checker,
            availability,
            email_service,
            templates,
        }
    } else {
        info!("Initializing SQLite connection with WAL Mode...");

        let opts = SqliteConnectOptions::from_str(database_url)
            .expect("Invalid SQLite connection string")
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .log_statements(LevelFilter::Debug)
            .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(opts)
            .await
            .expect("Failed to connect to SQLite");

        run_sqlite_migrations(&pool).await;

        let auth_repo = Arc::new(SqliteAuthRepo::new(pool.clone()));
        let auth_service = Arc::new(AuthService::new(auth_repo.clone(), config.clone()));

        let schedule_repo = Arc::new(SqliteScheduleRepo::new(pool.clone()));
        let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
        let conflict_checker = Arc::new(ConflictChecker::new(schedule_repo.clone(), booking_repo.clone()));
        let availability = Arc::new(AvailabilityCalculator::new(
            schedule_repo.clone(),
            booking_repo.clone(),
            window,
        ));

        AppState {
            config: config.clone(),
            user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
            classroom_repo: Arc::new(SqliteClassroomRepo::new(pool.clone())),
            schedule_repo,
            booking_repo,
            announcement_repo: Arc::new(SqliteAnnouncementRepo::new(pool.clone())),
            auth_repo,
            job_repo: Arc::new(SqliteJobRepo::new(pool.clone())),
            auth_service,
            conflict_checker,
            availability,
            email_service,
            templates,
        }
    }
}

async fn run_postgres_migrations(pool: &PgPool) {
    sqlx::migrate!("./migrations/postgres")
        .run(pool)
        .await
        .expect("Failed to run Postgres migrations");
}

async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
