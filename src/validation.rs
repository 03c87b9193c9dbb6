//! Input validation and timetable verification.
//!
//! [`validate_input`] checks the structural integrity of a request
//! before scheduling. Detects:
//! - Duplicate IDs
//! - Section references to unknown classrooms or instructors
//! - Constraints naming unknown instructors or slots outside the catalog
//! - Courses without sections or with zero duration
//!
//! The result is advisory: the scheduler tolerates every one of these,
//! it just cannot do anything useful with the offending records.
//!
//! [`verify_timetable`] re-checks a finished timetable against the hard
//! rules: no classroom or instructor double booking, no placement inside
//! declared unavailability, and each placed section covering exactly its
//! course duration.

use std::collections::HashSet;

use crate::grid::ConstraintIndex;
use crate::models::{Assignment, Timetable, Violation};
use crate::scheduler::ScheduleRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities share the same ID.
    DuplicateId,
    /// A section is pinned to a classroom that doesn't exist.
    InvalidClassroomReference,
    /// A section or constraint names an instructor that doesn't exist.
    InvalidInstructorReference,
    /// A constraint names a slot outside the catalog.
    UnknownTimeSlot,
    /// A course has no sections.
    EmptyCourse,
    /// A course has a duration of zero slots.
    ZeroDuration,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates the input data of a scheduling request.
///
/// Checks:
/// 1. No duplicate classroom, instructor, course or section IDs
/// 2. Every course has at least one section and a non-zero duration
/// 3. Pinned classrooms exist
/// 4. Section and constraint instructors exist
/// 5. Constraint slots are part of the catalog
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(request: &ScheduleRequest) -> ValidationResult {
    let mut errors = Vec::new();

    let mut classroom_ids = HashSet::new();
    for room in &request.classrooms {
        if !classroom_ids.insert(room.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate classroom ID: {}", room.id),
            ));
        }
    }

    let mut instructor_ids = HashSet::new();
    for instructor in &request.instructors {
        if !instructor_ids.insert(instructor.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate instructor ID: {}", instructor.id),
            ));
        }
    }

    let mut course_ids = HashSet::new();
    let mut section_ids = HashSet::new();
    for course in &request.courses {
        if !course_ids.insert(course.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate course ID: {}", course.id),
            ));
        }
        if !course.has_sections() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyCourse,
                format!("Course '{}' has no sections", course.code),
            ));
        }
        if course.duration == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::ZeroDuration,
                format!("Course '{}' has zero duration", course.code),
            ));
        }

        for section in &course.sections {
            if !section_ids.insert(section.id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::DuplicateId,
                    format!("Duplicate section ID: {}", section.id),
                ));
            }
            if let Some(room) = section.classroom_id {
                if !classroom_ids.contains(&room) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::InvalidClassroomReference,
                        format!("Section {} references unknown classroom {}", section.id, room),
                    ));
                }
            }
            if !instructor_ids.contains(&section.instructor_id) {
                errors.push(ValidationError::new(
                    ValidationErrorKind::InvalidInstructorReference,
                    format!(
                        "Section {} references unknown instructor {}",
                        section.id, section.instructor_id
                    ),
                ));
            }
        }
    }

    for constraint in &request.constraints {
        if !instructor_ids.contains(&constraint.instructor_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidInstructorReference,
                format!(
                    "Constraint on {} references unknown instructor {}",
                    constraint.day, constraint.instructor_id
                ),
            ));
        }
        for label in &constraint.time_slots {
            if request.time_slots.index_of(label).is_none() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::UnknownTimeSlot,
                    format!(
                        "Constraint for instructor {} on {} names unknown slot '{}'",
                        constraint.instructor_id, constraint.day, label
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Checks a timetable against the hard rules of `request`.
///
/// Sections with no assignment at all are not reported; they are listed
/// in [`Timetable::unscheduled`]. A section placed only partially is
/// reported as a duration mismatch.
pub fn verify_timetable(timetable: &Timetable, request: &ScheduleRequest) -> Vec<Violation> {
    let catalog = &request.time_slots;
    let constraints = ConstraintIndex::from_constraints(&request.constraints, catalog);
    let mut violations = Vec::new();

    let mut placed: Vec<(&Assignment, usize, usize)> = Vec::new();
    for a in &timetable.assignments {
        let Some((start, end)) = a.window(catalog) else {
            violations.push(Violation::unknown_slot(
                a.section_id,
                format!(
                    "{} {}-{} is outside the slot catalog",
                    a.day, a.start_time, a.end_time
                ),
            ));
            continue;
        };
        placed.push((a, start, end));

        for index in start..=end {
            let label = catalog.label(index).unwrap_or_default();
            if constraints.is_blocked(a.instructor_id, a.day, label) {
                violations.push(Violation::constraint_breach(
                    a.section_id,
                    format!(
                        "Instructor {} is unavailable on {} at {}",
                        a.instructor_id, a.day, label
                    ),
                ));
            }
        }
    }

    for (i, &(a, s1, e1)) in placed.iter().enumerate() {
        for &(b, s2, e2) in &placed[i + 1..] {
            if a.day != b.day || s1 > e2 || s2 > e1 {
                continue;
            }
            if a.classroom_id == b.classroom_id {
                violations.push(Violation::classroom_conflict(
                    b.section_id,
                    format!(
                        "Classroom {} holds sections {} and {} on {}",
                        a.classroom_code, a.section_id, b.section_id, a.day
                    ),
                ));
            }
            if a.instructor_id == b.instructor_id {
                violations.push(Violation::instructor_conflict(
                    b.section_id,
                    format!(
                        "Instructor {} teaches sections {} and {} at once on {}",
                        a.instructor_name, a.section_id, b.section_id, a.day
                    ),
                ));
            }
        }
    }

    for course in &request.courses {
        for section in &course.sections {
            let parts = timetable.assignments_for_section(section.id);
            if parts.is_empty() {
                continue;
            }
            let covered: u32 = parts.iter().map(|a| a.slot_count).sum();
            if covered != course.duration {
                violations.push(Violation::duration_mismatch(
                    section.id,
                    format!(
                        "Section {} of '{}' covers {} of {} slots",
                        section.id, course.code, covered, course.duration
                    ),
                ));
            }
        }
    }

    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Classroom, Course, Day, Instructor, Section, TimeConstraint, TimeSlotCatalog, ViolationType,
    };
    use crate::scheduler::Scheduler;

    fn sample_request() -> ScheduleRequest {
        let courses = vec![
            Course::new(1, "CS101", 1).with_section(Section::new(10, "01", 1)),
            Course::new(2, "CS201", 3)
                .with_section(Section::new(20, "01", 2).in_classroom(2))
                .with_section(Section::new(21, "02", 1)),
        ];
        ScheduleRequest::new(courses, vec![Classroom::new(1, "A"), Classroom::new(2, "B")])
            .with_instructors(vec![
                Instructor::new(1, "Ada", "Lovelace"),
                Instructor::new(2, "Alan", "Turing"),
            ])
            .with_constraints(vec![TimeConstraint::new(1, Day::Monday, ["8:00"])])
            .with_time_slots(TimeSlotCatalog::from_labels(["8:00", "9:00", "10:00"]).unwrap())
    }

    fn assignment(
        section_id: u32,
        instructor_id: u32,
        classroom_id: u32,
        start: &str,
        end: &str,
    ) -> Assignment {
        Assignment {
            section_id,
            course_code: "X".into(),
            course_title: String::new(),
            instructor_id,
            instructor_name: format!("I{instructor_id}"),
            day: Day::Tuesday,
            start_time: start.into(),
            end_time: end.into(),
            classroom_id,
            classroom_code: format!("R{classroom_id}"),
            slot_count: 1,
        }
    }

    #[test]
    fn test_valid_input() {
        assert!(validate_input(&sample_request()).is_ok());
    }

    #[test]
    fn test_duplicate_classroom_id() {
        let mut request = sample_request();
        request.classrooms.push(Classroom::new(1, "A2"));

        let errors = validate_input(&request).unwrap_err();
        assert!(errors.iter().any(|e| {
            e.kind == ValidationErrorKind::DuplicateId && e.message.contains("classroom")
        }));
    }

    #[test]
    fn test_duplicate_section_id_across_courses() {
        let mut request = sample_request();
        request
            .courses
            .push(Course::new(3, "CS301", 1).with_section(Section::new(10, "01", 2)));

        let errors = validate_input(&request).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("section")));
    }

    #[test]
    fn test_empty_course_and_zero_duration() {
        let mut request = sample_request();
        request.courses.push(Course::new(3, "EMPTY", 0));

        let errors = validate_input(&request).unwrap_err();
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::EmptyCourse));
        assert!(errors.iter().any(|e| e.kind == ValidationErrorKind::ZeroDuration));
    }

    #[test]
    fn test_unknown_references() {
        let mut request = sample_request();
        let stray = Section::new(30, "01", 9).in_classroom(7);
        request
            .courses
            .push(Course::new(3, "CS301", 1).with_section(stray));
        request
            .constraints
            .push(TimeConstraint::new(8, Day::Friday, ["6:00 PM"]));

        let errors = validate_input(&request).unwrap_err();
        let kinds: Vec<_> = errors.iter().map(|e| e.kind.clone()).collect();
        assert!(kinds.contains(&ValidationErrorKind::InvalidClassroomReference));
        assert_eq!(
            kinds
                .iter()
                .filter(|k| **k == ValidationErrorKind::InvalidInstructorReference)
                .count(),
            2
        );
        assert!(kinds.contains(&ValidationErrorKind::UnknownTimeSlot));
    }

    #[test]
    fn test_scheduler_output_verifies_clean() {
        let request = sample_request();
        let timetable = Scheduler::new().run(&request);
        assert!(timetable.is_complete());
        assert!(verify_timetable(&timetable, &request).is_empty());
    }

    #[test]
    fn test_detects_double_booking() {
        let request = sample_request();
        let mut timetable = Timetable::new();
        timetable.assignments.push(assignment(10, 1, 1, "9:00", "9:00"));
        timetable.assignments.push(assignment(20, 1, 1, "9:00", "9:00"));

        let violations = verify_timetable(&timetable, &request);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::ClassroomConflict));
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::InstructorConflict));
    }

    #[test]
    fn test_detects_constraint_breach_and_unknown_slot() {
        let request = sample_request();
        let mut timetable = Timetable::new();
        let mut monday = assignment(10, 1, 1, "8:00", "8:00");
        monday.day = Day::Monday;
        timetable.assignments.push(monday);
        timetable.assignments.push(assignment(21, 2, 2, "7:00", "7:00"));

        let violations = verify_timetable(&timetable, &request);
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::ConstraintBreach && v.section_id == 10));
        assert!(violations
            .iter()
            .any(|v| v.violation_type == ViolationType::UnknownSlot && v.section_id == 21));
    }

    #[test]
    fn test_detects_partial_placement() {
        let request = sample_request();
        let mut timetable = Timetable::new();
        timetable.assignments.push(assignment(21, 1, 1, "9:00", "9:00"));

        let violations = verify_timetable(&timetable, &request);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].violation_type, ViolationType::DurationMismatch);
        assert_eq!(violations[0].severity, 60);
    }
}
