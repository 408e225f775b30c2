use crate::domain::services::timeslot::parse_time_to_minutes;
use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub mail_service_url: String,
    pub mail_service_token: String,
    pub jwt_secret_key: String, // Ed25519 private key (PEM)
    pub jwt_public_key: String, // Ed25519 public key (PEM)
    pub auth_issuer: String,
    /// Start of the daily booking window, minutes since midnight.
    pub operating_open: u16,
    /// End of the daily booking window, minutes since midnight.
    pub operating_close: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let operating_open = env::var("OPERATING_OPEN").unwrap_or_else(|_| "07:00".to_string());
        let operating_close = env::var("OPERATING_CLOSE").unwrap_or_else(|_| "21:00".to_string());

        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            mail_service_url: env::var("MAIL_SERVICE_URL").unwrap_or_else(|_| "http://localhost:8000/api/v1/send".to_string()),
            mail_service_token: env::var("MAIL_SERVICE_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
            jwt_secret_key: env::var("JWT_SECRET_KEY").expect("JWT_SECRET_KEY must be set (Ed25519 Private Key)"),
            jwt_public_key: env::var("JWT_PUBLIC_KEY").expect("JWT_PUBLIC_KEY must be set (Ed25519 Public Key)"),
            auth_issuer: env::var("AUTH_ISSUER").unwrap_or_else(|_| "https://api.dept-portal.local".to_string()),
            operating_open: parse_time_to_minutes(&operating_open).expect("OPERATING_OPEN must be HH:MM"),
            operating_close: parse_time_to_minutes(&operating_close).expect("OPERATING_CLOSE must be HH:MM"),
        }
    }
}
