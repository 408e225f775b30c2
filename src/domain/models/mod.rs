pub mod announcement;
pub mod auth;
pub mod booking;
pub mod classroom;
pub mod job;
pub mod schedule;
pub mod user;
