use crate::domain::ports::{BookingSource, ScheduleSource};
use crate::domain::services::timeslot::{
    day_bounds, format_minutes_to_time, parse_time_to_minutes, weekday_index, SlotKind,
    TimeInterval,
};
use crate::error::AppError;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;

/// The daily window inside which availability is computed, minutes since
/// midnight, half-open.
#[derive(Debug, Clone, Copy)]
pub struct OperatingWindow {
    pub start: u16,
    pub end: u16,
}

impl Default for OperatingWindow {
    fn default() -> Self {
        // 07:00 - 21:00
        Self { start: 420, end: 1260 }
    }
}

/// A maximal free gap, formatted for display.
#[derive(Debug, Clone, Serialize)]
pub struct FreeSlot {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub available_slots: Vec<FreeSlot>,
    pub occupied_slots: Vec<TimeInterval>,
}

/// Computes the occupied and free intervals of a classroom day from active
/// recurring schedules plus approved bookings. Read-only over the injected
/// stores, no caching.
pub struct AvailabilityCalculator {
    schedules: Arc<dyn ScheduleSource>,
    bookings: Arc<dyn BookingSource>,
    window: OperatingWindow,
}

impl AvailabilityCalculator {
    pub fn new(
        schedules: Arc<dyn ScheduleSource>,
        bookings: Arc<dyn BookingSource>,
        window: OperatingWindow,
    ) -> Self {
        Self { schedules, bookings, window }
    }

    pub async fn get_available_slots(
        &self,
        classroom_id: &str,
        date: NaiveDate,
    ) -> Result<DayAvailability, AppError> {
        let day = weekday_index(date);
        let mut occupied = Vec::new();

        for schedule in self.schedules.find_active_for_day(classroom_id, day).await? {
            occupied.push(TimeInterval {
                start: parse_time_to_minutes(&schedule.start_time)?,
                end: parse_time_to_minutes(&schedule.end_time)?,
                kind: SlotKind::Regular,
                label: schedule.course_name,
            });
        }

        let (day_start, day_end) = day_bounds(date);
        for booking in self
            .bookings
            .find_approved_for_day(classroom_id, day_start, day_end, None)
            .await?
        {
            occupied.push(TimeInterval {
                start: parse_time_to_minutes(&booking.start_time)?,
                end: parse_time_to_minutes(&booking.end_time)?,
                kind: SlotKind::Booking,
                label: format!("Booked by {}", booking.requester_name),
            });
        }

        Ok(build_day_availability(occupied, self.window))
    }
}

/// Sweeps the sorted occupied intervals and emits the maximal free gaps
/// inside the operating window. Occupied intervals are sorted by
/// (start, end) ascending; the end-time tie-break keeps the output
/// deterministic. Advancing the cursor with `max` keeps the sweep safe
/// against overlapping occupied intervals: no gap is ever emitted twice and
/// no gap has zero or negative length.
pub fn build_day_availability(
    mut occupied: Vec<TimeInterval>,
    window: OperatingWindow,
) -> DayAvailability {
    occupied.sort_by_key(|slot| (slot.start, slot.end));

    let mut available_slots = Vec::new();
    let mut cursor = window.start;

    for slot in &occupied {
        if cursor < slot.start {
            available_slots.push(FreeSlot {
                start: format_minutes_to_time(cursor),
                end: format_minutes_to_time(slot.start),
            });
        }
        cursor = cursor.max(slot.end);
    }

    if cursor < window.end {
        available_slots.push(FreeSlot {
            start: format_minutes_to_time(cursor),
            end: format_minutes_to_time(window.end),
        });
    }

    DayAvailability { available_slots, occupied_slots: occupied }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn interval(start: u16, end: u16) -> TimeInterval {
        TimeInterval {
            start,
            end,
            kind: SlotKind::Booking,
            label: "Booked by test".to_string(),
        }
    }

    fn minutes(text: &str) -> u16 {
        parse_time_to_minutes(text).unwrap()
    }

    #[test]
    fn empty_day_is_one_full_window() {
        let result = build_day_availability(vec![], OperatingWindow::default());
        assert!(result.occupied_slots.is_empty());
        assert_eq!(result.available_slots.len(), 1);
        assert_eq!(result.available_slots[0].start, "07:00");
        assert_eq!(result.available_slots[0].end, "21:00");
    }

    #[test]
    fn gaps_between_occupied_intervals() {
        let occupied = vec![
            interval(minutes("08:00"), minutes("09:00")),
            interval(minutes("10:00"), minutes("12:00")),
        ];
        let result = build_day_availability(occupied, OperatingWindow::default());

        let free: Vec<(&str, &str)> = result
            .available_slots
            .iter()
            .map(|s| (s.start.as_str(), s.end.as_str()))
            .collect();
        assert_eq!(free, vec![("07:00", "08:00"), ("09:00", "10:00"), ("12:00", "21:00")]);
    }

    #[test]
    fn unsorted_input_is_sorted_by_start_then_end() {
        let occupied = vec![
            interval(minutes("10:00"), minutes("12:00")),
            interval(minutes("08:00"), minutes("09:00")),
            interval(minutes("08:00"), minutes("08:30")),
        ];
        let result = build_day_availability(occupied, OperatingWindow::default());

        let starts: Vec<u16> = result.occupied_slots.iter().map(|s| s.start).collect();
        let ends: Vec<u16> = result.occupied_slots.iter().map(|s| s.end).collect();
        assert_eq!(starts, vec![480, 480, 600]);
        assert_eq!(ends, vec![510, 540, 720]);
    }

    #[test]
    fn overlapping_occupied_intervals_never_produce_bad_gaps() {
        // Two intervals that should never coexist if the conflict checker was
        // applied, but the sweep must still behave.
        let occupied = vec![
            interval(minutes("09:00"), minutes("11:00")),
            interval(minutes("10:00"), minutes("10:30")),
        ];
        let result = build_day_availability(occupied, OperatingWindow::default());

        let free: Vec<(&str, &str)> = result
            .available_slots
            .iter()
            .map(|s| (s.start.as_str(), s.end.as_str()))
            .collect();
        assert_eq!(free, vec![("07:00", "09:00"), ("11:00", "21:00")]);
    }

    #[test]
    fn occupied_interval_covering_window_start_trims_leading_gap() {
        let occupied = vec![interval(minutes("06:00"), minutes("08:00"))];
        let result = build_day_availability(occupied, OperatingWindow::default());
        assert_eq!(result.available_slots.len(), 1);
        assert_eq!(result.available_slots[0].start, "08:00");
        assert_eq!(result.available_slots[0].end, "21:00");
    }

    #[test]
    fn occupied_interval_past_window_end_leaves_no_trailing_gap() {
        let occupied = vec![interval(minutes("20:00"), minutes("22:00"))];
        let result = build_day_availability(occupied, OperatingWindow::default());
        let last = result.available_slots.last().unwrap();
        assert_eq!(last.start, "07:00");
        assert_eq!(last.end, "20:00");
    }

    #[test]
    fn free_plus_merged_occupied_time_covers_the_window() {
        let window = OperatingWindow::default();
        let occupied = vec![
            interval(minutes("08:00"), minutes("09:30")),
            interval(minutes("09:00"), minutes("10:00")),
            interval(minutes("13:00"), minutes("15:00")),
        ];
        let result = build_day_availability(occupied, window);

        let free_total: u16 = result
            .available_slots
            .iter()
            .map(|s| minutes(&s.end) - minutes(&s.start))
            .sum();

        // Merge the occupied intervals clamped to the window.
        let mut merged_total = 0u16;
        let mut cursor = window.start;
        for slot in &result.occupied_slots {
            let start = slot.start.max(cursor).min(window.end);
            let end = slot.end.min(window.end);
            if end > start {
                merged_total += end - start;
                cursor = end;
            }
        }

        assert_eq!(free_total + merged_total, window.end - window.start);
    }

    #[test]
    fn never_emits_zero_length_free_slots() {
        let occupied = vec![
            interval(minutes("07:00"), minutes("09:00")),
            interval(minutes("09:00"), minutes("21:00")),
        ];
        let result = build_day_availability(occupied, OperatingWindow::default());
        assert!(result.available_slots.is_empty());
    }
}
