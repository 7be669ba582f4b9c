use chrono::{DateTime, Utc};
use mockall::mock;
use uuid::Uuid;

use crate::models::{DbBooking, DbOpeningHours, DbService, DbStaff};

// Mock repositories for testing
mock! {
    pub BookingRepo {
        pub async fn create_booking(
            &self,
            service_id: Uuid,
            staff_id: Uuid,
            client_name: &'static str,
            client_email: Option<&'static str>,
            start_time: DateTime<Utc>,
            end_time: DateTime<Utc>,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn get_bookings_for_staff_in_range(
            &self,
            staff_id: Uuid,
            range_start: DateTime<Utc>,
            range_end: DateTime<Utc>,
        ) -> eyre::Result<Vec<DbBooking>>;

        pub async fn get_booking_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbBooking>>;

        pub async fn list_bookings(
            &self,
            staff_id: Option<Uuid>,
            day: Option<(DateTime<Utc>, DateTime<Utc>)>,
            status: Option<&'static str>,
        ) -> eyre::Result<Vec<DbBooking>>;

        pub async fn update_booking_status(
            &self,
            id: Uuid,
            status: &'static str,
        ) -> eyre::Result<Option<DbBooking>>;
    }
}

mock! {
    pub ServiceRepo {
        pub async fn list_active_services(&self) -> eyre::Result<Vec<DbService>>;

        pub async fn get_service_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbService>>;
    }
}

mock! {
    pub OpeningHoursRepo {
        pub async fn get_hours_for_day(
            &self,
            day_of_week: i16,
        ) -> eyre::Result<Option<DbOpeningHours>>;

        pub async fn list_opening_hours(&self) -> eyre::Result<Vec<DbOpeningHours>>;

        pub async fn upsert_opening_hours(
            &self,
            rows: Vec<DbOpeningHours>,
        ) -> eyre::Result<Vec<DbOpeningHours>>;
    }
}

mock! {
    pub StaffRepo {
        pub async fn list_active_staff(&self) -> eyre::Result<Vec<DbStaff>>;

        pub async fn get_staff_by_id(
            &self,
            id: Uuid,
        ) -> eyre::Result<Option<DbStaff>>;
    }
}
