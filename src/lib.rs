//! Weekly course timetabling.
//!
//! Assigns course sections to classrooms and time slots across a
//! Monday–Saturday week, honoring instructor unavailability and never
//! double-booking a classroom or an instructor. Placement is greedy and
//! first-fit; sections that do not fit are reported, not retried.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Course`, `Section`, `Classroom`,
//!   `Instructor`, `TimeConstraint`, `TimeSlotCatalog`, `Timetable`
//! - **`grid`**: Run state: availability grid, constraint index, busy tracker
//! - **`scheduler`**: Two-pass greedy placement, configuration and KPIs
//! - **`validation`**: Input integrity checks and timetable verification
//! - **`source`**: The record-supply seam and the request-level `generate`
//! - **`error`**: `TimetableError`
//!
//! # Example
//!
//! ```
//! use u_timetable::models::{Classroom, Course, Section, TimeConstraint, Day};
//! use u_timetable::scheduler::{ScheduleRequest, Scheduler};
//! use u_timetable::validation::verify_timetable;
//!
//! let courses = vec![
//!     Course::new(1, "MATH200", 3).with_section(Section::new(1, "01", 1)),
//!     Course::new(2, "PHYS110", 1).with_section(Section::new(2, "01", 1)),
//! ];
//! let request = ScheduleRequest::new(courses, vec![Classroom::new(1, "R1")])
//!     .with_constraints(vec![TimeConstraint::new(1, Day::Monday, ["8:00 AM"])]);
//!
//! let timetable = Scheduler::new().run(&request);
//! assert!(timetable.is_complete());
//! assert!(verify_timetable(&timetable, &request).is_empty());
//! ```
//!
//! # References
//!
//! - Schaerf (1999), "A Survey of Automated Timetabling"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod error;
pub mod grid;
pub mod models;
pub mod scheduler;
pub mod source;
pub mod validation;

pub use error::{SourceError, TimetableError};
pub use source::generate;
