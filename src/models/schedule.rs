//! Timetable (solution) model.
//!
//! A timetable is the output of one scheduling run: the committed
//! assignments, run statistics, and the sections that could not be
//! placed. Assignments and stats use camelCase on the wire so they can
//! be handed to the persistence layer unchanged.

use serde::{Deserialize, Serialize};

use super::{ClassroomId, Day, InstructorId, SectionId, TimeSlotCatalog};

/// A section (or one session of a split section) placed in a classroom
/// for a contiguous block of slots on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub section_id: SectionId,
    pub course_code: String,
    pub course_title: String,
    pub instructor_id: InstructorId,
    pub instructor_name: String,
    pub day: Day,
    /// Label of the first slot.
    pub start_time: String,
    /// Label of the last slot (inclusive; equals `start_time` for one slot).
    pub end_time: String,
    pub classroom_id: ClassroomId,
    pub classroom_code: String,
    /// Number of consecutive slots covered.
    pub slot_count: u32,
}

impl Assignment {
    /// Inclusive slot-index window within `catalog`.
    ///
    /// Returns `None` if either label is not part of the catalog.
    pub fn window(&self, catalog: &TimeSlotCatalog) -> Option<(usize, usize)> {
        let start = catalog.index_of(&self.start_time)?;
        let end = catalog.index_of(&self.end_time)?;
        Some((start, end))
    }

    /// Whether two assignments on the same day share any slot.
    pub fn overlaps(&self, other: &Assignment, catalog: &TimeSlotCatalog) -> bool {
        if self.day != other.day {
            return false;
        }
        match (self.window(catalog), other.window(catalog)) {
            (Some((s1, e1)), Some((s2, e2))) => s1 <= e2 && s2 <= e1,
            _ => false,
        }
    }
}

/// Run statistics reported alongside the assignments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleStats {
    /// Courses with at least one section.
    pub total_courses: usize,
    pub total_sections: usize,
    /// Committed assignments. A split section contributes up to two.
    pub scheduled_assignments: usize,
    pub constraints_applied: usize,
    /// The resolved slot catalog for the run.
    pub time_slots: Vec<String>,
}

/// Why a section is missing some or all of its teaching time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnscheduledReason {
    /// No (classroom, day, window) combination fit the section.
    NoWindow,
    /// The first session of a split course was placed, the second was not.
    SecondPartUnplaced,
}

/// A section the run could not fully place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnscheduledSection {
    pub section_id: SectionId,
    pub course_code: String,
    pub reason: UnscheduledReason,
}

/// Output of a scheduling run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Timetable {
    /// Committed assignments in commit order.
    pub assignments: Vec<Assignment>,
    pub stats: ScheduleStats,
    /// Sections left without (complete) placement.
    pub unscheduled: Vec<UnscheduledSection>,
}

/// A rule broken by a timetable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Violation {
    pub violation_type: ViolationType,
    /// Section the violation was found on.
    pub section_id: SectionId,
    pub message: String,
    /// Severity (0-100, higher = worse).
    pub severity: i32,
}

/// Classification of timetable violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationType {
    /// Two assignments share a classroom and overlapping slots.
    ClassroomConflict,
    /// One instructor teaches two overlapping assignments.
    InstructorConflict,
    /// An assignment covers a slot its instructor declared unavailable.
    ConstraintBreach,
    /// A section's assignments do not add up to its course duration.
    DurationMismatch,
    /// An assignment refers to a slot outside the catalog.
    UnknownSlot,
}

impl Violation {
    fn new(
        violation_type: ViolationType,
        section_id: SectionId,
        message: impl Into<String>,
        severity: i32,
    ) -> Self {
        Self {
            violation_type,
            section_id,
            message: message.into(),
            severity,
        }
    }

    pub fn classroom_conflict(section_id: SectionId, message: impl Into<String>) -> Self {
        Self::new(ViolationType::ClassroomConflict, section_id, message, 95)
    }

    pub fn instructor_conflict(section_id: SectionId, message: impl Into<String>) -> Self {
        Self::new(ViolationType::InstructorConflict, section_id, message, 95)
    }

    pub fn constraint_breach(section_id: SectionId, message: impl Into<String>) -> Self {
        Self::new(ViolationType::ConstraintBreach, section_id, message, 80)
    }

    pub fn duration_mismatch(section_id: SectionId, message: impl Into<String>) -> Self {
        Self::new(ViolationType::DurationMismatch, section_id, message, 60)
    }

    pub fn unknown_slot(section_id: SectionId, message: impl Into<String>) -> Self {
        Self::new(ViolationType::UnknownSlot, section_id, message, 90)
    }
}

impl Timetable {
    /// Creates an empty timetable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of committed assignments.
    pub fn assignment_count(&self) -> usize {
        self.assignments.len()
    }

    /// Whether every section received its full teaching time.
    pub fn is_complete(&self) -> bool {
        self.unscheduled.is_empty()
    }

    /// Assignments for one section (two for a split course).
    pub fn assignments_for_section(&self, section_id: SectionId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.section_id == section_id)
            .collect()
    }

    /// Assignments placed in one classroom.
    pub fn assignments_for_classroom(&self, classroom_id: ClassroomId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.classroom_id == classroom_id)
            .collect()
    }

    /// Assignments taught by one instructor.
    pub fn assignments_for_instructor(&self, instructor_id: InstructorId) -> Vec<&Assignment> {
        self.assignments
            .iter()
            .filter(|a| a.instructor_id == instructor_id)
            .collect()
    }

    /// Assignments on one day.
    pub fn assignments_on(&self, day: Day) -> Vec<&Assignment> {
        self.assignments.iter().filter(|a| a.day == day).collect()
    }
}
