pub mod availability;
pub mod booking;
pub mod opening_hours;
pub mod service;
pub mod staff;
