//! Error types for timetable generation.
//!
//! Only configuration and data-fetch problems are errors. A section that
//! cannot be placed is reported through [`Timetable::unscheduled`]
//! instead.
//!
//! [`Timetable::unscheduled`]: crate::models::Timetable::unscheduled

use thiserror::Error;

/// Error raised by a [`ScheduleSource`](crate::source::ScheduleSource)
/// implementation.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure of a timetable generation request.
#[derive(Debug, Error)]
pub enum TimetableError {
    #[error("Schedule ID is required")]
    MissingScheduleId,
    #[error("Invalid Schedule ID {0:?}: must be a number")]
    InvalidScheduleId(String),
    #[error("Failed to fetch {entity}: {source}")]
    Fetch {
        entity: &'static str,
        #[source]
        source: SourceError,
    },
    #[error("Unknown day: {0:?}")]
    UnknownDay(String),
    #[error("Invalid time slot: {0:?}")]
    InvalidTimeSlot(String),
}

impl TimetableError {
    /// Whether the request was rejected before any data was read.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingScheduleId | Self::InvalidScheduleId(_) | Self::InvalidTimeSlot(_)
        )
    }
}
