//! Timetabling domain models.
//!
//! Input records (courses, sections, classrooms, instructors,
//! unavailability) as supplied by the persistence layer, the slot
//! catalog they are scheduled against, and the timetable produced by a
//! run.
//!
//! # Domain Mappings
//!
//! | u-timetable | Scheduling term |
//! |-------------|-----------------|
//! | Section | Job |
//! | Classroom | Machine |
//! | Instructor | Secondary (human) resource |
//! | TimeConstraint | Resource unavailability |
//! | Assignment | Operation placement |

mod classroom;
mod constraint;
mod course;
mod day;
mod instructor;
mod schedule;
mod time_slot;

pub use classroom::Classroom;
pub use constraint::{ConstraintRow, TimeConstraint};
pub use course::{Course, Section};
pub use day::Day;
pub use instructor::{Instructor, UNKNOWN_NAME};
pub use schedule::{
    Assignment, ScheduleStats, Timetable, UnscheduledReason, UnscheduledSection, Violation,
    ViolationType,
};
pub use time_slot::{
    label_minutes, normalize_time_slot, TimeSlotCatalog, TimeSlotRange, DEFAULT_TIME_SLOTS,
};

/// Classroom identifier.
pub type ClassroomId = u32;
/// Course identifier.
pub type CourseId = u32;
/// Instructor identifier.
pub type InstructorId = u32;
/// Section identifier.
pub type SectionId = u32;
