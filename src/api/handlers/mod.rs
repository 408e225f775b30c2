pub mod announcement;
pub mod auth;
pub mod booking;
pub mod classroom;
pub mod health;
pub mod schedule;
