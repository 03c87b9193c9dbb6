//! Per-run placement state.
//!
//! The three structures a scheduling run consults and mutates:
//!
//! - [`AvailabilityGrid`]: classroom occupancy per (day, classroom, slot)
//! - [`ConstraintIndex`]: declared instructor unavailability (read-only)
//! - [`InstructorBusyTracker`]: instructor commitments made this run
//!
//! All three are built fresh for every run and never shared between runs.

mod availability;
mod busy;
mod constraints;

pub use availability::{AvailabilityGrid, Slot};
pub use busy::InstructorBusyTracker;
pub use constraints::ConstraintIndex;
