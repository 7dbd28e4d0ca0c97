pub mod appointment_service;

pub use appointment_service::{schedule_auto_appointment, ScheduleOutcome};
