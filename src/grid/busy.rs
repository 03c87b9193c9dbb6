//! Run-local record of instructor commitments.
//!
//! Separate from [`ConstraintIndex`](super::ConstraintIndex): constraints
//! are declared up front, busy entries accumulate as the scheduler
//! commits placements. Entries are never cleared within a run.

use std::collections::HashSet;

use crate::models::{Day, InstructorId, TimeSlotCatalog};

/// Which (instructor, day, slot) cells are already taught this run.
#[derive(Debug, Clone)]
pub struct InstructorBusyTracker {
    catalog: TimeSlotCatalog,
    busy: HashSet<(InstructorId, Day, usize)>,
}

impl InstructorBusyTracker {
    pub fn new(catalog: &TimeSlotCatalog) -> Self {
        Self {
            catalog: catalog.clone(),
            busy: HashSet::new(),
        }
    }

    /// Marks every slot from `start_time` to `end_time` inclusive.
    ///
    /// Returns `false` (and marks nothing) if either label is not in the
    /// catalog.
    pub fn mark_busy(
        &mut self,
        instructor_id: InstructorId,
        day: Day,
        start_time: &str,
        end_time: &str,
    ) -> bool {
        match (self.catalog.index_of(start_time), self.catalog.index_of(end_time)) {
            (Some(start), Some(end)) => {
                self.mark_busy_range(instructor_id, day, start, end);
                true
            }
            _ => false,
        }
    }

    /// Marks slot indices `start..=end`, clamped to the catalog.
    pub fn mark_busy_range(
        &mut self,
        instructor_id: InstructorId,
        day: Day,
        start: usize,
        end: usize,
    ) {
        if self.catalog.is_empty() {
            return;
        }
        let last = end.min(self.catalog.len() - 1);
        for index in start..=last {
            self.busy.insert((instructor_id, day, index));
        }
    }

    /// Whether the instructor already teaches at this slot.
    #[inline]
    pub fn is_busy(&self, instructor_id: InstructorId, day: Day, slot_index: usize) -> bool {
        self.busy.contains(&(instructor_id, day, slot_index))
    }

    /// Total busy cells across all instructors.
    pub fn len(&self) -> usize {
        self.busy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.busy.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_busy_inclusive() {
        let catalog = TimeSlotCatalog::default_catalog();
        let mut tracker = InstructorBusyTracker::new(&catalog);

        assert!(tracker.mark_busy(1, Day::Monday, "9:00", "11:00"));
        assert!(!tracker.is_busy(1, Day::Monday, 0));
        assert!(tracker.is_busy(1, Day::Monday, 1));
        assert!(tracker.is_busy(1, Day::Monday, 2));
        assert!(tracker.is_busy(1, Day::Monday, 3));
        assert!(!tracker.is_busy(1, Day::Monday, 4));
        assert!(!tracker.is_busy(1, Day::Tuesday, 1));
        assert!(!tracker.is_busy(2, Day::Monday, 1));
        assert_eq!(tracker.len(), 3);
    }

    #[test]
    fn test_single_slot() {
        let catalog = TimeSlotCatalog::default_catalog();
        let mut tracker = InstructorBusyTracker::new(&catalog);
        assert!(tracker.mark_busy(3, Day::Saturday, "17:00", "17:00"));
        assert!(tracker.is_busy(3, Day::Saturday, 9));
        assert_eq!(tracker.len(), 1);
    }

    #[test]
    fn test_unknown_labels_mark_nothing() {
        let catalog = TimeSlotCatalog::default_catalog();
        let mut tracker = InstructorBusyTracker::new(&catalog);
        assert!(!tracker.mark_busy(1, Day::Monday, "7:00", "9:00"));
        assert!(tracker.is_empty());
    }

    #[test]
    fn test_range_clamped_to_catalog() {
        let catalog = TimeSlotCatalog::from_labels(["8:00", "9:00"]).unwrap();
        let mut tracker = InstructorBusyTracker::new(&catalog);
        tracker.mark_busy_range(1, Day::Monday, 1, 5);
        assert_eq!(tracker.len(), 1);
        assert!(tracker.is_busy(1, Day::Monday, 1));
    }
}
