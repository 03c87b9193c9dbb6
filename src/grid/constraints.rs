//! Per-instructor, per-day blocked slots.

use std::collections::{BTreeSet, HashMap};

use crate::models::{Day, InstructorId, TimeConstraint, TimeSlotCatalog};

/// Read-only index over the run's [`TimeConstraint`]s.
///
/// Several constraints for the same (instructor, day) are merged. Labels
/// outside the catalog are kept but can never block a window.
#[derive(Debug, Clone, Default)]
pub struct ConstraintIndex {
    blocked: HashMap<(InstructorId, Day), BTreeSet<String>>,
    fully_blocked: HashMap<(InstructorId, Day), bool>,
    applied: usize,
}

impl ConstraintIndex {
    /// Groups constraints and precomputes which days are fully blocked
    /// against `catalog`.
    pub fn from_constraints(constraints: &[TimeConstraint], catalog: &TimeSlotCatalog) -> Self {
        let mut blocked: HashMap<(InstructorId, Day), BTreeSet<String>> = HashMap::new();
        for c in constraints {
            blocked
                .entry((c.instructor_id, c.day))
                .or_default()
                .extend(c.time_slots.iter().cloned());
        }

        let fully_blocked = blocked
            .iter()
            .map(|(key, labels)| {
                let covers = !catalog.is_empty()
                    && catalog.labels().iter().all(|l| labels.contains(l));
                (*key, covers)
            })
            .collect();

        Self {
            blocked,
            fully_blocked,
            applied: constraints.len(),
        }
    }

    /// Blocked labels for an instructor on a day.
    pub fn blocked_slots(
        &self,
        instructor_id: InstructorId,
        day: Day,
    ) -> Option<&BTreeSet<String>> {
        self.blocked.get(&(instructor_id, day))
    }

    /// Whether the instructor declared `time_slot` unavailable on `day`.
    pub fn is_blocked(&self, instructor_id: InstructorId, day: Day, time_slot: &str) -> bool {
        self.blocked_slots(instructor_id, day)
            .is_some_and(|labels| labels.contains(time_slot))
    }

    /// Whether every catalog slot of `day` is blocked for the instructor.
    pub fn is_fully_blocked(&self, instructor_id: InstructorId, day: Day) -> bool {
        self.fully_blocked
            .get(&(instructor_id, day))
            .copied()
            .unwrap_or(false)
    }

    /// Number of constraint records the index was built from.
    ///
    /// Rows fetched through a source are grouped per (instructor, day)
    /// first, so two declarations for the same instructor and day count
    /// once.
    pub fn constraint_count(&self) -> usize {
        self.applied
    }
}
