use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// Published hours for one weekday (0 = Sunday .. 6 = Saturday). When
/// `is_closed` is set the open/close times are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHours {
    pub day_of_week: i16,
    pub open_time: Option<NaiveTime>,
    pub close_time: Option<NaiveTime>,
    pub is_closed: bool,
}

impl OpeningHours {
    /// Whole-hour open/close window for the slot generator, or `None` when
    /// the day offers no bookable window at all.
    ///
    /// Published times with minute components are narrowed, never widened:
    /// opening rounds up to the next whole hour, closing rounds down.
    pub fn day_window(&self) -> Option<(u32, u32)> {
        if self.is_closed {
            return None;
        }
        let open = self.open_time?;
        let close = self.close_time?;

        let open_hour = if open.minute() == 0 && open.second() == 0 {
            open.hour()
        } else {
            open.hour() + 1
        };
        let close_hour = close.hour();

        if open_hour >= 24 {
            return None;
        }
        Some((open_hour, close_hour))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListOpeningHoursResponse {
    pub hours: Vec<OpeningHours>,
}

/// Full seven-row replacement payload, one entry per weekday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOpeningHoursRequest {
    pub hours: Vec<OpeningHours>,
}
