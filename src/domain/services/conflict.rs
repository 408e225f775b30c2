use crate::domain::models::{booking::ApprovedBooking, schedule::RegularSchedule};
use crate::domain::ports::{BookingSource, ScheduleSource};
use crate::domain::services::timeslot::{
    day_bounds, intervals_overlap, parse_time_to_minutes, weekday_index,
};
use crate::error::AppError;
use chrono::NaiveDate;
use std::sync::Arc;

/// Wire values for the `conflict.type` field.
pub mod conflict_types {
    pub const REGULAR_SCHEDULE: &str = "regular_schedule";
    pub const BOOKING: &str = "booking";
}

/// Result of a conflict check. A conflict is an expected outcome, not an
/// error; only malformed input or store failures surface as `AppError`.
#[derive(Debug, Clone)]
pub enum ConflictOutcome {
    Clear,
    RegularSchedule {
        schedule: RegularSchedule,
        details: String,
    },
    ExistingBooking {
        booking: ApprovedBooking,
        details: String,
    },
}

impl ConflictOutcome {
    pub fn is_clear(&self) -> bool {
        matches!(self, ConflictOutcome::Clear)
    }

    /// `(type, details)` for the HTTP conflict payload, `None` when clear.
    pub fn conflict_parts(&self) -> Option<(&'static str, &str)> {
        match self {
            ConflictOutcome::Clear => None,
            ConflictOutcome::RegularSchedule { details, .. } => {
                Some((conflict_types::REGULAR_SCHEDULE, details))
            }
            ConflictOutcome::ExistingBooking { details, .. } => {
                Some((conflict_types::BOOKING, details))
            }
        }
    }
}

/// Checks a candidate reservation against recurring schedules and approved
/// bookings. Stateless; reads through the injected stores on every call so
/// each check sees the latest committed data.
pub struct ConflictChecker {
    schedules: Arc<dyn ScheduleSource>,
    bookings: Arc<dyn BookingSource>,
}

impl ConflictChecker {
    pub fn new(schedules: Arc<dyn ScheduleSource>, bookings: Arc<dyn BookingSource>) -> Self {
        Self { schedules, bookings }
    }

    /// Recurring schedules are checked first and win over booking conflicts;
    /// the first colliding record in store order is reported. Pass the
    /// booking's own id as `exclude_booking_id` when re-validating it at
    /// approval time.
    pub async fn check_conflict(
        &self,
        classroom_id: &str,
        date: NaiveDate,
        start_time: &str,
        end_time: &str,
        exclude_booking_id: Option<&str>,
    ) -> Result<ConflictOutcome, AppError> {
        let start = parse_time_to_minutes(start_time)?;
        let end = parse_time_to_minutes(end_time)?;
        let day = weekday_index(date);

        for schedule in self.schedules.find_active_for_day(classroom_id, day).await? {
            let schedule_start = parse_time_to_minutes(&schedule.start_time)?;
            let schedule_end = parse_time_to_minutes(&schedule.end_time)?;

            if intervals_overlap(start, end, schedule_start, schedule_end) {
                let details = format!(
                    "Room is occupied by the {} lecture from {} to {}",
                    schedule.course_name, schedule.start_time, schedule.end_time
                );
                return Ok(ConflictOutcome::RegularSchedule { schedule, details });
            }
        }

        let (day_start, day_end) = day_bounds(date);
        let existing = self
            .bookings
            .find_approved_for_day(classroom_id, day_start, day_end, exclude_booking_id)
            .await?;

        for booking in existing {
            let booking_start = parse_time_to_minutes(&booking.start_time)?;
            let booking_end = parse_time_to_minutes(&booking.end_time)?;

            if intervals_overlap(start, end, booking_start, booking_end) {
                let details = format!(
                    "Room is already booked by {} from {} to {}",
                    booking.requester_name, booking.start_time, booking.end_time
                );
                return Ok(ConflictOutcome::ExistingBooking { booking, details });
            }
        }

        Ok(ConflictOutcome::Clear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use uuid::Uuid;

    struct FixedSchedules(Vec<RegularSchedule>);

    #[async_trait]
    impl ScheduleSource for FixedSchedules {
        async fn find_active_for_day(
            &self,
            classroom_id: &str,
            day_of_week: i32,
        ) -> Result<Vec<RegularSchedule>, AppError> {
            Ok(self
                .0
                .iter()
                .filter(|s| s.classroom_id == classroom_id && s.day_of_week == day_of_week && s.is_active)
                .cloned()
                .collect())
        }
    }

    struct FixedBookings(Vec<ApprovedBooking>);

    #[async_trait]
    impl BookingSource for FixedBookings {
        async fn find_approved_for_day(
            &self,
            classroom_id: &str,
            day_start: NaiveDate,
            day_end: NaiveDate,
            exclude_id: Option<&str>,
        ) -> Result<Vec<ApprovedBooking>, AppError> {
            Ok(self
                .0
                .iter()
                .filter(|b| {
                    b.classroom_id == classroom_id
                        && b.booking_date >= day_start
                        && b.booking_date < day_end
                        && exclude_id != Some(b.id.as_str())
                })
                .cloned()
                .collect())
        }
    }

    fn schedule(classroom_id: &str, day_of_week: i32, start: &str, end: &str) -> RegularSchedule {
        RegularSchedule {
            id: Uuid::new_v4().to_string(),
            classroom_id: classroom_id.to_string(),
            course_name: "Operating Systems".to_string(),
            course_code: Some("CS-301".to_string()),
            lecturer: "Dr. Ibrahim".to_string(),
            day_of_week,
            start_time: start.to_string(),
            end_time: end.to_string(),
            semester: "2024-even".to_string(),
            is_active: true,
            created_at: Utc::now(),
        }
    }

    fn approved(id: &str, classroom_id: &str, date: NaiveDate, start: &str, end: &str) -> ApprovedBooking {
        ApprovedBooking {
            id: id.to_string(),
            classroom_id: classroom_id.to_string(),
            booking_date: date,
            start_time: start.to_string(),
            end_time: end.to_string(),
            requester_name: "Rina Wijaya".to_string(),
        }
    }

    fn checker(schedules: Vec<RegularSchedule>, bookings: Vec<ApprovedBooking>) -> ConflictChecker {
        ConflictChecker::new(Arc::new(FixedSchedules(schedules)), Arc::new(FixedBookings(bookings)))
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    fn friday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
    }

    #[tokio::test]
    async fn empty_stores_mean_no_conflict() {
        let checker = checker(vec![], vec![]);
        let outcome = checker
            .check_conflict("room-a", monday(), "09:00", "10:00", None)
            .await
            .unwrap();
        assert!(outcome.is_clear());
    }

    #[tokio::test]
    async fn overlapping_schedule_wins() {
        let checker = checker(vec![schedule("room-a", 1, "08:00", "10:00")], vec![]);
        let outcome = checker
            .check_conflict("room-a", monday(), "09:00", "09:30", None)
            .await
            .unwrap();
        let (kind, details) = outcome.conflict_parts().unwrap();
        assert_eq!(kind, "regular_schedule");
        assert!(details.contains("Operating Systems"));
    }

    #[tokio::test]
    async fn schedule_on_other_weekday_is_ignored() {
        let checker = checker(vec![schedule("room-a", 1, "08:00", "10:00")], vec![]);
        let outcome = checker
            .check_conflict("room-a", friday(), "09:00", "09:30", None)
            .await
            .unwrap();
        assert!(outcome.is_clear());
    }

    #[tokio::test]
    async fn schedule_conflict_takes_priority_over_booking_conflict() {
        let checker = checker(
            vec![schedule("room-a", 1, "08:00", "10:00")],
            vec![approved("b-1", "room-a", monday(), "09:00", "10:00")],
        );
        let outcome = checker
            .check_conflict("room-a", monday(), "09:00", "09:30", None)
            .await
            .unwrap();
        let (kind, _) = outcome.conflict_parts().unwrap();
        assert_eq!(kind, "regular_schedule");
    }

    #[tokio::test]
    async fn back_to_back_booking_is_allowed() {
        let checker = checker(vec![], vec![approved("b-1", "room-a", friday(), "13:00", "14:00")]);
        let outcome = checker
            .check_conflict("room-a", friday(), "14:00", "15:00", None)
            .await
            .unwrap();
        assert!(outcome.is_clear());
    }

    #[tokio::test]
    async fn overlapping_booking_is_reported() {
        let checker = checker(vec![], vec![approved("b-1", "room-a", friday(), "13:00", "14:00")]);
        let outcome = checker
            .check_conflict("room-a", friday(), "13:30", "14:30", None)
            .await
            .unwrap();
        let (kind, details) = outcome.conflict_parts().unwrap();
        assert_eq!(kind, "booking");
        assert!(details.contains("Rina Wijaya"));
    }

    #[tokio::test]
    async fn exclude_id_suppresses_self_conflict() {
        let checker = checker(vec![], vec![approved("b-1", "room-a", friday(), "13:00", "14:00")]);
        let outcome = checker
            .check_conflict("room-a", friday(), "13:00", "14:00", Some("b-1"))
            .await
            .unwrap();
        assert!(outcome.is_clear());
    }

    #[tokio::test]
    async fn malformed_time_is_an_error_not_a_pass() {
        let checker = checker(vec![], vec![]);
        let result = checker
            .check_conflict("room-a", friday(), "25:00", "26:00", None)
            .await;
        assert!(matches!(result, Err(AppError::InvalidTime(_))));
    }

    #[tokio::test]
    async fn other_classroom_bookings_are_ignored() {
        let checker = checker(vec![], vec![approved("b-1", "room-b", friday(), "13:00", "14:00")]);
        let outcome = checker
            .check_conflict("room-a", friday(), "13:00", "14:00", None)
            .await
            .unwrap();
        assert!(outcome.is_clear());
    }
}
