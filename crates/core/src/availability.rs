//! Appointment slot availability computation.
//!
//! Given a calendar day, a service duration, the shop's open/close hours for
//! that day, and the staff member's already-booked intervals, produce the
//! ordered list of candidate start times, each marked available or blocked.
//! The computation is pure and stateless: identical inputs always yield
//! identical output, and it performs no I/O.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::errors::{BookingError, BookingResult};
use crate::models::slot::{BookedInterval, TimeSlot};

/// Generate the candidate start times for one day.
///
/// Slots start at `open_hour:00` and advance by `interval_min` minutes. A
/// slot is emitted only when its full `service_duration_min` fits before
/// `close_hour:00`; the first slot that would run past closing terminates
/// the sequence. A slot is available when it overlaps none of
/// `existing_bookings` under the half-open interval test: a booking that
/// ends exactly when a slot starts (or starts exactly when it ends) does
/// not block it, so back-to-back appointments are legal.
///
/// Degenerate inputs produce an empty sequence rather than an error:
/// a non-positive duration, or `open_hour >= close_hour` (how a closed day
/// comes out when the caller supplies that weekday's hours anyway).
///
/// # Errors
///
/// Returns [`BookingError::InvalidArgument`] for structurally invalid
/// input: an hour outside `0..24` or a non-positive `interval_min`
/// (a zero interval could never advance past the first slot).
pub fn generate_slots(
    date: NaiveDate,
    service_duration_min: i64,
    existing_bookings: &[BookedInterval],
    open_hour: u32,
    close_hour: u32,
    interval_min: i64,
) -> BookingResult<Vec<TimeSlot>> {
    if open_hour >= 24 || close_hour >= 24 {
        return Err(BookingError::InvalidArgument(format!(
            "shop hours must lie within 0..24, got {open_hour}..{close_hour}"
        )));
    }
    if interval_min <= 0 {
        return Err(BookingError::InvalidArgument(format!(
            "slot interval must be positive, got {interval_min} minutes"
        )));
    }

    let mut slots = Vec::new();
    if service_duration_min <= 0 {
        return Ok(slots);
    }

    let mut cursor = hour_on_day(date, open_hour);
    let closing = hour_on_day(date, close_hour);
    let duration = Duration::minutes(service_duration_min);
    let step = Duration::minutes(interval_min);

    while cursor < closing {
        let slot_end = cursor + duration;
        if slot_end > closing {
            // No later start fits either; the service must end by closing.
            break;
        }

        let available = !existing_bookings
            .iter()
            .any(|booking| overlaps_booking(cursor, slot_end, booking));

        slots.push(TimeSlot {
            time: cursor.format("%H:%M").to_string(),
            available,
        });

        cursor += step;
    }

    Ok(slots)
}

/// Half-open interval intersection: strict inequalities on both ends, so
/// touching endpoints do not count as overlap.
pub fn overlaps_booking(
    slot_start: DateTime<Utc>,
    slot_end: DateTime<Utc>,
    booking: &BookedInterval,
) -> bool {
    slot_start < booking.end_time && slot_end > booking.start_time
}

fn hour_on_day(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    let midnight = Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN));
    midnight + Duration::hours(i64::from(hour))
}
