use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use mockall::predicate;
use pretty_assertions::assert_eq;
use salonbook_api::handlers::availability::{
    day_bounds, parse_date, weekday_index, AvailabilityQuery, SLOT_INTERVAL_MINUTES,
};
use salonbook_api::middleware::error_handling::AppError;
use salonbook_core::availability::generate_slots;
use salonbook_core::errors::BookingError;
use salonbook_core::models::opening_hours::OpeningHours;
use salonbook_core::models::slot::{AvailabilityResponse, BookedInterval};
use salonbook_db::models::{DbBooking, DbOpeningHours, DbService, DbStaff};
use uuid::Uuid;

use crate::test_utils::TestContext;

fn sample_service(id: Uuid, duration_min: i32) -> DbService {
    DbService {
        id,
        name: "Cut & Style".to_string(),
        description: None,
        price_cents: 4500,
        duration_min,
        active: true,
        created_at: Utc::now(),
    }
}

fn sample_staff(id: Uuid) -> DbStaff {
    DbStaff {
        id,
        display_name: "Robin".to_string(),
        active: true,
        created_at: Utc::now(),
    }
}

fn open_day(day_of_week: i16, open: u32, close: u32) -> DbOpeningHours {
    DbOpeningHours {
        day_of_week,
        open_time: NaiveTime::from_hms_opt(open, 0, 0),
        close_time: NaiveTime::from_hms_opt(close, 0, 0),
        is_closed: false,
    }
}

fn sample_booking(staff_id: Uuid, date: NaiveDate, start: (u32, u32), end: (u32, u32)) -> DbBooking {
    let at = |(hour, minute)| {
        Utc.from_utc_datetime(&date.and_time(NaiveTime::from_hms_opt(hour, minute, 0).unwrap()))
    };

    DbBooking {
        id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        staff_id,
        client_name: "Alex".to_string(),
        client_email: None,
        start_time: at(start),
        end_time: at(end),
        status: "confirmed".to_string(),
        created_at: Utc::now(),
    }
}

// Replays the availability handler's flow against the repository mocks
async fn test_availability_wrapper(
    ctx: &mut TestContext,
    query: AvailabilityQuery,
) -> Result<AvailabilityResponse, AppError> {
    let date = parse_date(&query.date)?;

    let service = ctx
        .service_repo
        .get_service_by_id(query.service_id)
        .await?
        .filter(|s| s.active)
        .ok_or_else(|| {
            AppError(BookingError::NotFound(format!(
                "Service with ID {} not found",
                query.service_id
            )))
        })?;

    let staff = ctx
        .staff_repo
        .get_staff_by_id(query.staff_id)
        .await?
        .filter(|s| s.active)
        .ok_or_else(|| {
            AppError(BookingError::NotFound(format!(
                "Staff member with ID {} not found",
                query.staff_id
            )))
        })?;

    let window = ctx
        .opening_hours_repo
        .get_hours_for_day(weekday_index(date))
        .await?
        .and_then(|h| {
            OpeningHours {
                day_of_week: h.day_of_week,
                open_time: h.open_time,
                close_time: h.close_time,
                is_closed: h.is_closed,
            }
            .day_window()
        });

    let Some((open_hour, close_hour)) = window else {
        return Ok(AvailabilityResponse {
            date,
            staff_id: staff.id,
            service_id: service.id,
            slots: Vec::new(),
        });
    };

    let (range_start, range_end) = day_bounds(date);
    let bookings = ctx
        .booking_repo
        .get_bookings_for_staff_in_range(staff.id, range_start, range_end)
        .await?;

    let booked: Vec<BookedInterval> = bookings
        .iter()
        .map(|b| BookedInterval {
            start_time: b.start_time,
            end_time: b.end_time,
        })
        .collect();

    let slots = generate_slots(
        date,
        i64::from(service.duration_min),
        &booked,
        open_hour,
        close_hour,
        SLOT_INTERVAL_MINUTES,
    )?;

    Ok(AvailabilityResponse {
        date,
        staff_id: staff.id,
        service_id: service.id,
        slots,
    })
}

#[test]
fn test_parse_date_accepts_iso_dates() {
    assert_eq!(
        parse_date("2026-03-14").unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    );
}

#[test]
fn test_parse_date_rejects_garbage() {
    assert!(matches!(
        parse_date("14/03/2026"),
        Err(BookingError::InvalidArgument(_))
    ));
    assert!(matches!(
        parse_date("2026-13-40"),
        Err(BookingError::InvalidArgument(_))
    ));
}

#[test]
fn test_weekday_index_starts_on_sunday() {
    // 2026-03-15 is a Sunday, 2026-03-14 a Saturday
    assert_eq!(
        weekday_index(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()),
        0
    );
    assert_eq!(
        weekday_index(NaiveDate::from_ymd_opt(2026, 3, 16).unwrap()),
        1
    );
    assert_eq!(
        weekday_index(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()),
        6
    );
}

#[test]
fn test_day_bounds_cover_one_day() {
    let (start, end) = day_bounds(NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    assert_eq!(end - start, chrono::Duration::days(1));
}

#[tokio::test]
async fn test_availability_rejects_malformed_date() {
    let mut ctx = TestContext::new();

    let query = AvailabilityQuery {
        staff_id: Uuid::new_v4(),
        service_id: Uuid::new_v4(),
        date: "tomorrow".to_string(),
    };

    let result = test_availability_wrapper(&mut ctx, query).await;

    assert!(matches!(
        result,
        Err(AppError(BookingError::InvalidArgument(_)))
    ));
}

#[tokio::test]
async fn test_availability_unknown_service_is_not_found() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();

    ctx.service_repo
        .expect_get_service_by_id()
        .with(predicate::eq(service_id))
        .returning(|_| Ok(None));

    let query = AvailabilityQuery {
        staff_id: Uuid::new_v4(),
        service_id,
        date: "2026-03-14".to_string(),
    };

    let result = test_availability_wrapper(&mut ctx, query).await;

    assert!(matches!(result, Err(AppError(BookingError::NotFound(_)))));
}

#[tokio::test]
async fn test_availability_closed_day_yields_no_slots() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    let staff_id = Uuid::new_v4();

    let service = sample_service(service_id, 30);
    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |_| Ok(Some(service.clone())));

    let staff = sample_staff(staff_id);
    ctx.staff_repo
        .expect_get_staff_by_id()
        .returning(move |_| Ok(Some(staff.clone())));

    // Sunday is flagged closed
    ctx.opening_hours_repo
        .expect_get_hours_for_day()
        .with(predicate::eq(0i16))
        .returning(|day_of_week| {
            Ok(Some(DbOpeningHours {
                day_of_week,
                open_time: None,
                close_time: None,
                is_closed: true,
            }))
        });

    let query = AvailabilityQuery {
        staff_id,
        service_id,
        date: "2026-03-15".to_string(),
    };

    let response = test_availability_wrapper(&mut ctx, query).await.unwrap();

    assert_eq!(response.slots, vec![]);
    assert_eq!(response.staff_id, staff_id);
    assert_eq!(response.service_id, service_id);
}

#[tokio::test]
async fn test_availability_marks_booked_intervals_unavailable() {
    let mut ctx = TestContext::new();
    let service_id = Uuid::new_v4();
    let staff_id = Uuid::new_v4();
    let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();

    let service = sample_service(service_id, 60);
    ctx.service_repo
        .expect_get_service_by_id()
        .returning(move |_| Ok(Some(service.clone())));

    let staff = sample_staff(staff_id);
    ctx.staff_repo
        .expect_get_staff_by_id()
        .returning(move |_| Ok(Some(staff.clone())));

    ctx.opening_hours_repo
        .expect_get_hours_for_day()
        .returning(|day_of_week| Ok(Some(open_day(day_of_week, 9, 17))));

    let booking = sample_booking(staff_id, date, (10, 0), (11, 0));
    ctx.booking_repo
        .expect_get_bookings_for_staff_in_range()
        .returning(move |_, _, _| Ok(vec![booking.clone()]));

    let query = AvailabilityQuery {
        staff_id,
        service_id,
        date: "2026-03-14".to_string(),
    };

    let response = test_availability_wrapper(&mut ctx, query).await.unwrap();

    let availability_of = |label: &str| {
        response
            .slots
            .iter()
            .find(|slot| slot.time == label)
            .unwrap_or_else(|| panic!("no slot {label}"))
            .available
    };

    assert_eq!(response.date, date);
    assert!(availability_of("09:00"));
    assert!(!availability_of("09:45"));
    assert!(!availability_of("10:00"));
    assert!(availability_of("11:00"));
}
