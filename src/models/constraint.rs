//! Instructor unavailability.
//!
//! Instructors declare, per day, the slots in which they cannot teach.
//! The persistence layer stores these as a constraint → day → time-slot
//! hierarchy; collaborators hand them over flattened into
//! [`ConstraintRow`]s, which are grouped here into [`TimeConstraint`]s.
//!
//! Constraints are read-only for the whole scheduling run.

use serde::{Deserialize, Serialize};

use super::{normalize_time_slot, Day, InstructorId};
use crate::error::TimetableError;

/// Slots an instructor cannot teach on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeConstraint {
    pub instructor_id: InstructorId,
    pub day: Day,
    /// Blocked slot start labels, normalized.
    pub time_slots: Vec<String>,
}

/// One flattened unavailability record as stored by the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstraintRow {
    pub instructor_id: InstructorId,
    /// Day name, e.g. "Monday".
    pub day: String,
    /// Raw slot label in any supported format (see [`normalize_time_slot`]).
    pub time_slot: String,
}

impl TimeConstraint {
    /// Creates a constraint; labels are normalized.
    pub fn new<I, S>(instructor_id: InstructorId, day: Day, time_slots: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            instructor_id,
            day,
            time_slots: time_slots
                .into_iter()
                .map(|s| normalize_time_slot(s.as_ref()))
                .collect(),
        }
    }

    /// Groups flattened rows by (instructor, day).
    ///
    /// Groups keep the order in which their first row appears. Fails on
    /// the first row naming a day outside Monday–Saturday.
    pub fn group_rows(rows: &[ConstraintRow]) -> Result<Vec<TimeConstraint>, TimetableError> {
        let mut grouped: Vec<TimeConstraint> = Vec::new();
        for row in rows {
            let day: Day = row.day.parse()?;
            let label = normalize_time_slot(&row.time_slot);
            match grouped
                .iter_mut()
                .find(|c| c.instructor_id == row.instructor_id && c.day == day)
            {
                Some(existing) => {
                    if !existing.time_slots.contains(&label) {
                        existing.time_slots.push(label);
                    }
                }
                None => grouped.push(TimeConstraint {
                    instructor_id: row.instructor_id,
                    day,
                    time_slots: vec![label],
                }),
            }
        }
        Ok(grouped)
    }
}

impl ConstraintRow {
    pub fn new(
        instructor_id: InstructorId,
        day: impl Into<String>,
        time_slot: impl Into<String>,
    ) -> Self {
        Self {
            instructor_id,
            day: day.into(),
            time_slot: time_slot.into(),
        }
    }
}
