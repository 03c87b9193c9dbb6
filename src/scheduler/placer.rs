//! Contiguous-window search.
//!
//! # Algorithm
//!
//! For a fixed classroom, walk the given days in order. Skip a day the
//! instructor has blocked entirely, otherwise slide a window of
//! `duration` slots from the start of the catalog and accept the first
//! window whose every slot is
//!
//! 1. free in the grid for (day, classroom),
//! 2. not declared unavailable by the instructor,
//! 3. not already taught by the instructor this run.
//!
//! First fit: once a window passes, no later window is considered.
//!
//! # Complexity
//! O(days × slots × duration) per classroom.

use tracing::trace;

use crate::grid::{AvailabilityGrid, ConstraintIndex, InstructorBusyTracker};
use crate::models::{ClassroomId, Day, InstructorId, Section};

/// A window found by the placer, not yet committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub classroom_id: ClassroomId,
    pub day: Day,
    /// First slot index.
    pub start: usize,
    /// Number of slots.
    pub len: usize,
}

impl Placement {
    /// Last slot index (inclusive).
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len - 1
    }
}

/// Where the second session of a split course ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackStep {
    SameClassroomOtherDay,
    OtherClassroomOtherDay,
    SameClassroomSameDay,
    OtherClassroomSameDay,
}

/// Read-only view over the run state used to search for windows.
#[derive(Debug, Clone, Copy)]
pub struct Placer<'a> {
    grid: &'a AvailabilityGrid,
    constraints: &'a ConstraintIndex,
    busy: &'a InstructorBusyTracker,
}

impl<'a> Placer<'a> {
    pub fn new(
        grid: &'a AvailabilityGrid,
        constraints: &'a ConstraintIndex,
        busy: &'a InstructorBusyTracker,
    ) -> Self {
        Self {
            grid,
            constraints,
            busy,
        }
    }

    /// Whether `[start, start + len)` is usable by the instructor in the
    /// classroom on `day`.
    pub fn window_fits(
        &self,
        instructor_id: InstructorId,
        classroom_id: ClassroomId,
        day: Day,
        start: usize,
        len: usize,
    ) -> bool {
        let catalog = self.grid.catalog();
        if len == 0 || start + len > catalog.len() {
            return false;
        }
        (start..start + len).all(|index| {
            if !self.grid.is_free(day, classroom_id, index) {
                return false;
            }
            let label = catalog.label(index).unwrap_or_default();
            if self.constraints.is_blocked(instructor_id, day, label) {
                trace!(instructor_id, %day, label, "slot blocked by constraint");
                return false;
            }
            if self.busy.is_busy(instructor_id, day, index) {
                trace!(instructor_id, %day, label, "instructor already teaching");
                return false;
            }
            true
        })
    }

    /// First-fit search in one classroom over `days`, in the order given.
    pub fn place(
        &self,
        instructor_id: InstructorId,
        classroom_id: ClassroomId,
        duration: usize,
        days: &[Day],
    ) -> Option<Placement> {
        let slot_count = self.grid.catalog().len();
        if duration == 0 || duration > slot_count {
            return None;
        }
        for &day in days {
            if self.constraints.is_fully_blocked(instructor_id, day) {
                trace!(instructor_id, %day, "instructor unavailable all day, skipping");
                continue;
            }
            for start in 0..=slot_count - duration {
                if self.window_fits(instructor_id, classroom_id, day, start, duration) {
                    return Some(Placement {
                        classroom_id,
                        day,
                        start,
                        len: duration,
                    });
                }
            }
        }
        None
    }

    /// Tries each classroom in order until one yields a window.
    pub fn find_in_classrooms(
        &self,
        instructor_id: InstructorId,
        classrooms: &[ClassroomId],
        duration: usize,
        days: &[Day],
    ) -> Option<Placement> {
        classrooms
            .iter()
            .find_map(|&room| self.place(instructor_id, room, duration, days))
    }

    /// Searches for the second session of a split course.
    ///
    /// Tries, in order: the first session's classroom on other days, the
    /// `other_classrooms` on other days, the first session's classroom on
    /// the same day, and the `other_classrooms` on the same day.
    pub fn place_second_part(
        &self,
        instructor_id: InstructorId,
        duration: usize,
        first: &Placement,
        other_classrooms: &[ClassroomId],
        other_days: &[Day],
    ) -> Option<(Placement, FallbackStep)> {
        let same_day = [first.day];
        let steps: [(FallbackStep, &[ClassroomId], &[Day]); 4] = [
            (
                FallbackStep::SameClassroomOtherDay,
                std::slice::from_ref(&first.classroom_id),
                other_days,
            ),
            (
                FallbackStep::OtherClassroomOtherDay,
                other_classrooms,
                other_days,
            ),
            (
                FallbackStep::SameClassroomSameDay,
                std::slice::from_ref(&first.classroom_id),
                &same_day,
            ),
            (
                FallbackStep::OtherClassroomSameDay,
                other_classrooms,
                &same_day,
            ),
        ];

        let found = steps.into_iter().find_map(|(step, rooms, days)| {
            self.find_in_classrooms(instructor_id, rooms, duration, days)
                .map(|p| (p, step))
        });
        found
    }
}

/// Classrooms a section may use: its pinned classroom, or every
/// classroom in input order.
pub fn candidate_classrooms(section: &Section, all: &[ClassroomId]) -> Vec<ClassroomId> {
    match section.classroom_id {
        Some(pinned) => vec![pinned],
        None => all.to_vec(),
    }
}
