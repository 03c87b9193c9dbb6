//! Two-pass greedy timetabler.
//!
//! # Algorithm
//!
//! 1. Drop courses without sections, then stable-sort the rest by
//!    (duration, section count) descending.
//! 2. Pass 1: every course whose duration is at most the split threshold
//!    is placed as one contiguous block per section.
//! 3. Pass 2: longer courses are split into `ceil(d/2)` and `d - ceil(d/2)`
//!    slots. The first session is placed like a pass 1 block; the second
//!    walks the fallback chain of [`Placer::place_second_part`].
//! 4. Every successful placement is committed to the grid and the busy
//!    tracker before the next search starts. Nothing is ever undone.
//!
//! First fit with no backtracking: a dense input can leave sections
//! unscheduled even when a feasible timetable exists.
//!
//! # Complexity
//! O(s × c × d × t × k) where s=sections, c=classrooms, d=days,
//! t=time slots, k=course duration.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use super::config::{DaySequencer, SchedulerConfig};
use super::placer::{candidate_classrooms, Placement, Placer};
use crate::grid::{AvailabilityGrid, ConstraintIndex, InstructorBusyTracker};
use crate::models::{
    Assignment, Classroom, ClassroomId, Course, Day, Instructor, InstructorId, ScheduleStats,
    Section, TimeConstraint, TimeSlotCatalog, Timetable, UnscheduledReason, UnscheduledSection,
    UNKNOWN_NAME,
};

/// Input container for one scheduling run.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRequest {
    /// Courses with their sections.
    pub courses: Vec<Course>,
    /// Classrooms, in the order they are tried.
    pub classrooms: Vec<Classroom>,
    /// Instructors, used for display names only.
    pub instructors: Vec<Instructor>,
    /// Declared instructor unavailability.
    pub constraints: Vec<TimeConstraint>,
    /// Slot catalog for the week.
    pub time_slots: TimeSlotCatalog,
}

impl ScheduleRequest {
    /// Creates a request over the default slot catalog.
    pub fn new(courses: Vec<Course>, classrooms: Vec<Classroom>) -> Self {
        Self {
            courses,
            classrooms,
            ..Self::default()
        }
    }

    /// Sets the instructors.
    pub fn with_instructors(mut self, instructors: Vec<Instructor>) -> Self {
        self.instructors = instructors;
        self
    }

    /// Sets the availability constraints.
    pub fn with_constraints(mut self, constraints: Vec<TimeConstraint>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Sets the slot catalog.
    pub fn with_time_slots(mut self, time_slots: TimeSlotCatalog) -> Self {
        self.time_slots = time_slots;
        self
    }
}

/// Greedy course timetabler.
///
/// Holds configuration only; every call to [`run`](Self::run) starts
/// from an empty grid.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Classroom, Course, Day, Section};
/// use u_timetable::scheduler::{ScheduleRequest, Scheduler};
///
/// let courses = vec![
///     Course::new(1, "CS101", 1).with_section(Section::new(10, "01", 7)),
/// ];
/// let classrooms = vec![Classroom::new(1, "C1")];
/// let request = ScheduleRequest::new(courses, classrooms);
///
/// let timetable = Scheduler::new().run(&request);
/// assert_eq!(timetable.assignment_count(), 1);
/// assert_eq!(timetable.assignments[0].day, Day::Monday);
/// assert_eq!(timetable.assignments[0].start_time, "8:00");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    config: SchedulerConfig,
}

impl Scheduler {
    /// Creates a scheduler with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the configuration.
    pub fn with_config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    /// Current configuration.
    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Produces a timetable for `request`.
    pub fn run(&self, request: &ScheduleRequest) -> Timetable {
        let mut courses: Vec<&Course> = request
            .courses
            .iter()
            .filter(|c| c.has_sections())
            .collect();
        courses.sort_by(|a, b| {
            (b.duration, b.section_count()).cmp(&(a.duration, a.section_count()))
        });

        info!(
            courses = courses.len(),
            classrooms = request.classrooms.len(),
            constraints = request.constraints.len(),
            time_slots = request.time_slots.len(),
            "starting timetable run"
        );

        let mut run = Run::new(request, &self.config);
        let threshold = self.config.split_threshold;

        for course in courses.iter().filter(|c| c.duration <= threshold) {
            for section in &course.sections {
                run.place_whole(course, section, course.duration);
            }
        }

        for course in courses.iter().filter(|c| c.duration > threshold) {
            let (first, second) = course.split_durations();
            for section in &course.sections {
                if second == 0 {
                    run.place_whole(course, section, first);
                } else {
                    run.place_split(course, section, first, second);
                }
            }
        }

        let stats = ScheduleStats {
            total_courses: courses.len(),
            total_sections: courses.iter().map(|c| c.section_count()).sum(),
            scheduled_assignments: run.timetable.assignments.len(),
            constraints_applied: run.constraints.constraint_count(),
            time_slots: request.time_slots.labels().to_vec(),
        };

        info!(
            assignments = stats.scheduled_assignments,
            unscheduled = run.timetable.unscheduled.len(),
            "timetable run finished"
        );

        let mut timetable = run.timetable;
        timetable.stats = stats;
        timetable
    }
}

/// Mutable state of a single run.
struct Run<'r> {
    request: &'r ScheduleRequest,
    grid: AvailabilityGrid,
    constraints: ConstraintIndex,
    busy: InstructorBusyTracker,
    days: DaySequencer,
    classroom_ids: Vec<ClassroomId>,
    classroom_codes: HashMap<ClassroomId, &'r str>,
    instructor_names: HashMap<InstructorId, String>,
    timetable: Timetable,
}

impl<'r> Run<'r> {
    fn new(request: &'r ScheduleRequest, config: &SchedulerConfig) -> Self {
        let catalog = &request.time_slots;

        let mut classroom_codes = HashMap::new();
        for room in &request.classrooms {
            classroom_codes.entry(room.id).or_insert(room.code.as_str());
        }
        let mut instructor_names = HashMap::new();
        for instructor in &request.instructors {
            instructor_names
                .entry(instructor.id)
                .or_insert_with(|| instructor.full_name());
        }

        Self {
            request,
            grid: AvailabilityGrid::new(catalog, &request.classrooms),
            constraints: ConstraintIndex::from_constraints(&request.constraints, catalog),
            busy: InstructorBusyTracker::new(catalog),
            days: DaySequencer::new(config.day_order),
            classroom_ids: request.classrooms.iter().map(|c| c.id).collect(),
            classroom_codes,
            instructor_names,
            timetable: Timetable::new(),
        }
    }

    fn placer(&self) -> Placer<'_> {
        Placer::new(&self.grid, &self.constraints, &self.busy)
    }

    fn place_whole(&mut self, course: &Course, section: &Section, duration: u32) {
        let rooms = candidate_classrooms(section, &self.classroom_ids);
        let found = self.placer().find_in_classrooms(
            section.instructor_id,
            &rooms,
            duration as usize,
            &Day::ALL,
        );
        match found {
            Some(placement) => self.commit(course, section, placement),
            None => self.give_up(course, section, UnscheduledReason::NoWindow),
        }
    }

    fn place_split(&mut self, course: &Course, section: &Section, first: u32, second: u32) {
        let rooms = candidate_classrooms(section, &self.classroom_ids);
        let found = self.placer().find_in_classrooms(
            section.instructor_id,
            &rooms,
            first as usize,
            &Day::ALL,
        );
        let Some(head) = found else {
            self.give_up(course, section, UnscheduledReason::NoWindow);
            return;
        };
        self.commit(course, section, head);

        let other_days = self.days.other_days(head.day);
        let other_rooms: Vec<ClassroomId> = if section.classroom_id.is_some() {
            Vec::new()
        } else {
            rooms
                .iter()
                .copied()
                .filter(|&id| id != head.classroom_id)
                .collect()
        };

        let tail = self.placer().place_second_part(
            section.instructor_id,
            second as usize,
            &head,
            &other_rooms,
            &other_days,
        );
        match tail {
            Some((placement, step)) => {
                debug!(section_id = section.id, ?step, "second session placed");
                self.commit(course, section, placement);
            }
            None => self.give_up(course, section, UnscheduledReason::SecondPartUnplaced),
        }
    }

    fn commit(&mut self, course: &Course, section: &Section, p: Placement) {
        let catalog = &self.request.time_slots;
        let start_time = catalog.label(p.start).unwrap_or_default().to_string();
        let end_time = catalog.label(p.end()).unwrap_or_default().to_string();

        self.grid
            .occupy(p.day, p.classroom_id, p.start, p.len, section.id);
        self.busy
            .mark_busy_range(section.instructor_id, p.day, p.start, p.end());

        debug!(
            course = %course.code,
            section_id = section.id,
            classroom_id = p.classroom_id,
            day = %p.day,
            start = %start_time,
            end = %end_time,
            "placed"
        );

        let instructor_name = self
            .instructor_names
            .get(&section.instructor_id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let classroom_code = self
            .classroom_codes
            .get(&p.classroom_id)
            .map(|c| c.to_string())
            .unwrap_or_default();

        self.timetable.assignments.push(Assignment {
            section_id: section.id,
            course_code: course.code.clone(),
            course_title: course.title.clone(),
            instructor_id: section.instructor_id,
            instructor_name,
            day: p.day,
            start_time,
            end_time,
            classroom_id: p.classroom_id,
            classroom_code,
            slot_count: p.len as u32,
        });
    }

    fn give_up(&mut self, course: &Course, section: &Section, reason: UnscheduledReason) {
        warn!(
            course = %course.code,
            section_id = section.id,
            ?reason,
            "section not fully scheduled"
        );
        self.timetable.unscheduled.push(UnscheduledSection {
            section_id: section.id,
            course_code: course.code.clone(),
            reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DEFAULT_TIME_SLOTS;
    use crate::scheduler::DayOrder;

    fn three_slots() -> TimeSlotCatalog {
        TimeSlotCatalog::from_labels(["8:00", "9:00", "10:00"]).unwrap()
    }

    fn course(id: u32, code: &str, duration: u32, sections: &[(u32, u32)]) -> Course {
        sections.iter().fold(
            Course::new(id, code, duration).with_title(format!("{code} title")),
            |c, &(section_id, instructor_id)| {
                c.with_section(Section::new(section_id, "01", instructor_id))
            },
        )
    }

    fn rooms(ids: &[u32]) -> Vec<Classroom> {
        ids.iter().map(|&id| Classroom::new(id, format!("C{id}"))).collect()
    }

    fn assert_no_double_booking(timetable: &Timetable, catalog: &TimeSlotCatalog) {
        let a = &timetable.assignments;
        for i in 0..a.len() {
            for j in i + 1..a.len() {
                if !a[i].overlaps(&a[j], catalog) {
                    continue;
                }
                assert_ne!(a[i].classroom_id, a[j].classroom_id, "{:?} vs {:?}", a[i], a[j]);
                assert_ne!(a[i].instructor_id, a[j].instructor_id, "{:?} vs {:?}", a[i], a[j]);
            }
        }
    }

    #[test]
    fn test_single_slot_course_lands_monday_morning() {
        let request = ScheduleRequest::new(vec![course(1, "CS1", 1, &[(10, 1)])], rooms(&[1]))
            .with_instructors(vec![Instructor::new(1, "Ada", "Lovelace")])
            .with_time_slots(three_slots());

        let timetable = Scheduler::new().run(&request);
        assert_eq!(timetable.assignment_count(), 1);
        let a = &timetable.assignments[0];
        assert_eq!(a.day, Day::Monday);
        assert_eq!(a.start_time, "8:00");
        assert_eq!(a.end_time, "8:00");
        assert_eq!(a.classroom_id, 1);
        assert_eq!(a.classroom_code, "C1");
        assert_eq!(a.instructor_name, "Ada Lovelace");
        assert_eq!(a.course_title, "CS1 title");
        assert_eq!(a.slot_count, 1);
        assert!(timetable.is_complete());
    }

    #[test]
    fn test_blocked_monday_moves_to_tuesday() {
        let request = ScheduleRequest::new(vec![course(1, "CS1", 1, &[(10, 1)])], rooms(&[1]))
            .with_constraints(vec![TimeConstraint::new(
                1,
                Day::Monday,
                ["8:00", "9:00", "10:00"],
            )])
            .with_time_slots(three_slots());

        let timetable = Scheduler::new().run(&request);
        let a = &timetable.assignments[0];
        assert_eq!(a.day, Day::Tuesday);
        assert_eq!(a.start_time, "8:00");
        assert_eq!(timetable.stats.constraints_applied, 1);
    }

    #[test]
    fn test_block_longer_than_day_is_unscheduled() {
        let request = ScheduleRequest::new(vec![course(1, "CS1", 4, &[(10, 1)])], rooms(&[1]))
            .with_time_slots(three_slots());

        let timetable = Scheduler::new()
            .with_config(SchedulerConfig::new().with_split_threshold(4))
            .run(&request);
        assert_eq!(timetable.assignment_count(), 0);
        assert_eq!(timetable.unscheduled.len(), 1);
        assert_eq!(timetable.unscheduled[0].reason, UnscheduledReason::NoWindow);
    }

    #[test]
    fn test_long_course_is_split_to_fit_short_day() {
        let request = ScheduleRequest::new(vec![course(1, "CS1", 4, &[(10, 1)])], rooms(&[1]))
            .with_time_slots(three_slots());

        let timetable = Scheduler::new().run(&request);
        let parts = timetable.assignments_for_section(10);
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|a| a.slot_count == 2));
    }

    #[test]
    fn test_split_course_uses_two_days() {
        let request = ScheduleRequest::new(vec![course(1, "CS1", 3, &[(10, 1)])], rooms(&[1]));

        let timetable = Scheduler::new().run(&request);
        let parts = timetable.assignments_for_section(10);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].slot_count, 2);
        assert_eq!((parts[0].start_time.as_str(), parts[0].end_time.as_str()), ("8:00", "9:00"));
        assert_eq!(parts[0].day, Day::Monday);
        assert_eq!(parts[1].slot_count, 1);
        assert_eq!(parts[1].day, Day::Tuesday);
        assert_eq!(parts[1].start_time, "8:00");
    }

    #[test]
    fn test_split_course_falls_back_to_same_day() {
        let constraints = Day::ALL[1..]
            .iter()
            .map(|&d| TimeConstraint::new(1, d, DEFAULT_TIME_SLOTS))
            .collect();
        let request = ScheduleRequest::new(vec![course(1, "CS1", 3, &[(10, 1)])], rooms(&[1, 2]))
            .with_constraints(constraints);

        let timetable = Scheduler::new().run(&request);
        let parts = timetable.assignments_for_section(10);
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|a| a.day == Day::Monday));
        assert_eq!(parts[1].classroom_id, 1);
        assert_eq!(parts[1].start_time, "10:00");
        assert_no_double_booking(&timetable, &request.time_slots);
    }

    #[test]
    fn test_second_part_unplaced() {
        let catalog = TimeSlotCatalog::from_labels(["8:00", "9:00"]).unwrap();
        let constraints = Day::ALL[1..]
            .iter()
            .map(|&d| TimeConstraint::new(1, d, ["8:00", "9:00"]))
            .collect();
        let request = ScheduleRequest::new(vec![course(1, "CS1", 3, &[(10, 1)])], rooms(&[1]))
            .with_constraints(constraints)
            .with_time_slots(catalog);

        let timetable = Scheduler::new().run(&request);
        assert_eq!(timetable.assignment_count(), 1);
        assert_eq!(timetable.unscheduled[0].reason, UnscheduledReason::SecondPartUnplaced);
        assert!(!timetable.is_complete());
    }

    #[test]
    fn test_longer_courses_go_first() {
        let request = ScheduleRequest::new(
            vec![course(1, "SHORT", 1, &[(10, 1)]), course(2, "LONG", 2, &[(20, 2)])],
            rooms(&[1]),
        )
        .with_time_slots(three_slots());

        let timetable = Scheduler::new().run(&request);
        assert_eq!(timetable.assignments[0].course_code, "LONG");
        assert_eq!(timetable.assignments[0].start_time, "8:00");
        assert_eq!(timetable.assignments[1].course_code, "SHORT");
        assert_eq!(timetable.assignments[1].start_time, "10:00");
    }

    #[test]
    fn test_instructor_never_double_booked() {
        let c1 = course(1, "A", 1, &[(10, 1)]);
        let c2 = Course::new(2, "B", 1).with_section(Section::new(20, "01", 1).in_classroom(2));
        let request =
            ScheduleRequest::new(vec![c1, c2], rooms(&[1, 2])).with_time_slots(three_slots());

        let timetable = Scheduler::new().run(&request);
        let b = timetable.assignments_for_section(20)[0];
        assert_eq!(b.classroom_id, 2);
        assert_eq!(b.day, Day::Monday);
        assert_eq!(b.start_time, "9:00");
        assert_no_double_booking(&timetable, &request.time_slots);
    }

    #[test]
    fn test_pinned_classroom_is_kept_for_both_parts() {
        let c = Course::new(1, "LAB", 4).with_section(Section::new(10, "01", 1).in_classroom(2));
        let request = ScheduleRequest::new(vec![c], rooms(&[1, 2]));

        let timetable = Scheduler::new().run(&request);
        let parts = timetable.assignments_for_section(10);
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|a| a.classroom_id == 2));
        assert_ne!(parts[0].day, parts[1].day);
    }

    #[test]
    fn test_pinned_to_unknown_classroom_is_unscheduled() {
        let c = Course::new(1, "X", 1).with_section(Section::new(10, "01", 1).in_classroom(9));
        let request = ScheduleRequest::new(vec![c], rooms(&[1]));

        let timetable = Scheduler::new().run(&request);
        assert_eq!(timetable.assignment_count(), 0);
        assert_eq!(timetable.unscheduled[0].section_id, 10);
    }

    #[test]
    fn test_dense_input_respects_every_rule() {
        let courses: Vec<Course> = (0..12)
            .map(|i| {
                let sections = [(100 + i, i % 3), (200 + i, (i + 1) % 3)];
                course(i, &format!("C{i}"), 1 + i % 4, &sections)
            })
            .collect();
        let constraints = vec![
            TimeConstraint::new(0, Day::Monday, ["8:00 AM", "9:00 AM"]),
            TimeConstraint::new(1, Day::Friday, ["1:00 PM - 2:00 PM"]),
        ];
        let request = ScheduleRequest::new(courses.clone(), rooms(&[1, 2]))
            .with_constraints(constraints.clone());

        let timetable = Scheduler::new().run(&request);
        assert_no_double_booking(&timetable, &request.time_slots);

        for a in &timetable.assignments {
            let blocked: Vec<&str> = constraints
                .iter()
                .filter(|c| c.instructor_id == a.instructor_id && c.day == a.day)
                .flat_map(|c| c.time_slots.iter().map(String::as_str))
                .collect();
            let (s, e) = a.window(&request.time_slots).unwrap();
            for i in s..=e {
                let label = request.time_slots.label(i).unwrap();
                assert!(!blocked.contains(&label), "{a:?} covers blocked {label}");
            }
        }

        for c in &courses {
            for s in &c.sections {
                let parts = timetable.assignments_for_section(s.id);
                if timetable.unscheduled.iter().all(|u| u.section_id != s.id) {
                    let total: u32 = parts.iter().map(|a| a.slot_count).sum();
                    assert_eq!(total, c.duration, "section {}", s.id);
                }
            }
        }
    }

    #[test]
    fn test_stats_skip_courses_without_sections() {
        let request = ScheduleRequest::new(
            vec![course(1, "A", 1, &[(10, 1), (11, 2)]), Course::new(2, "EMPTY", 1)],
            rooms(&[1]),
        );

        let timetable = Scheduler::new().run(&request);
        assert_eq!(timetable.stats.total_courses, 1);
        assert_eq!(timetable.stats.total_sections, 2);
        assert_eq!(timetable.stats.scheduled_assignments, 2);
        assert_eq!(timetable.stats.time_slots.len(), 10);
    }

    #[test]
    fn test_unknown_instructor_name() {
        let request = ScheduleRequest::new(vec![course(1, "A", 1, &[(10, 5)])], rooms(&[1]));
        let timetable = Scheduler::new().run(&request);
        assert_eq!(timetable.assignments[0].instructor_name, UNKNOWN_NAME);
    }

    #[test]
    fn test_split_threshold_keeps_block_whole() {
        let request = ScheduleRequest::new(vec![course(1, "A", 3, &[(10, 1)])], rooms(&[1]));
        let config = SchedulerConfig::new().with_split_threshold(3);

        let timetable = Scheduler::new().with_config(config).run(&request);
        assert_eq!(timetable.assignment_count(), 1);
        assert_eq!(timetable.assignments[0].slot_count, 3);
        assert_eq!(timetable.assignments[0].end_time, "10:00");
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let courses: Vec<Course> = (0..6).map(|i| course(i, "L", 5, &[(i, i)])).collect();
        let request = ScheduleRequest::new(courses, rooms(&[1]));
        let config = SchedulerConfig::new().with_day_order(DayOrder::Seeded(3));
        let scheduler = Scheduler::new().with_config(config);

        let a = scheduler.run(&request);
        let b = scheduler.run(&request);
        assert_eq!(a.assignments, b.assignments);
    }

    #[test]
    fn test_runs_are_independent() {
        let request = ScheduleRequest::new(vec![course(1, "A", 2, &[(10, 1)])], rooms(&[1]));
        let scheduler = Scheduler::new();
        let first = scheduler.run(&request);
        let second = scheduler.run(&request);
        assert_eq!(first.assignments, second.assignments);
        assert_eq!(second.assignments[0].start_time, "8:00");
    }
}
