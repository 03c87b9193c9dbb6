//! Request-level entry point and the input-record seam.
//!
//! A host (HTTP handler, CLI, job runner) owns persistence. It exposes
//! the records of one schedule through [`ScheduleSource`] and calls
//! [`generate`] with the raw schedule id it received. Persisting the
//! returned assignments is the host's job.
//!
//! # Flow
//!
//! 1. Validate the schedule id.
//! 2. Fetch courses, constraint rows, classrooms, instructors and slot
//!    ranges, in that order. The first failing fetch aborts the request.
//! 3. Drop courses without sections and group constraint rows.
//! 4. Resolve the slot catalog and run the [`Scheduler`].

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::error::{SourceError, TimetableError};
use crate::models::{
    Classroom, ConstraintRow, Course, Instructor, TimeConstraint, TimeSlotCatalog, TimeSlotRange,
    Timetable,
};
use crate::scheduler::{ScheduleRequest, Scheduler, SchedulerConfig};

/// Identifier of one schedule (term, program, ...) in the host's store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(pub u32);

impl ScheduleId {
    /// Parses a raw request parameter.
    ///
    /// Leading whitespace is ignored and the leading run of digits is
    /// taken as the id, so `"12"` and `"12abc"` both yield 12. A blank
    /// value is reported as missing.
    pub fn parse(raw: &str) -> Result<Self, TimetableError> {
        let trimmed = raw.trim_start();
        if trimmed.is_empty() {
            return Err(TimetableError::MissingScheduleId);
        }
        let digits_end = trimmed
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(trimmed.len());
        trimmed[..digits_end]
            .parse()
            .map(ScheduleId)
            .map_err(|_| TimetableError::InvalidScheduleId(raw.to_string()))
    }
}

impl fmt::Display for ScheduleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Supplies the input records of one schedule.
pub trait ScheduleSource {
    /// Courses with their sections.
    fn fetch_courses(&self, id: ScheduleId) -> Result<Vec<Course>, SourceError>;
    /// Classrooms, in the order the scheduler should try them.
    fn fetch_classrooms(&self, id: ScheduleId) -> Result<Vec<Classroom>, SourceError>;
    fn fetch_instructors(&self, id: ScheduleId) -> Result<Vec<Instructor>, SourceError>;
    /// Flattened (instructor, day, slot) unavailability rows.
    fn fetch_constraints(&self, id: ScheduleId) -> Result<Vec<ConstraintRow>, SourceError>;
    /// Configured slot ranges; empty selects the default catalog.
    fn fetch_time_slots(&self, id: ScheduleId) -> Result<Vec<TimeSlotRange>, SourceError>;
}

/// All records of one schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScheduleData {
    pub courses: Vec<Course>,
    pub classrooms: Vec<Classroom>,
    pub instructors: Vec<Instructor>,
    pub constraints: Vec<ConstraintRow>,
    pub time_slots: Vec<TimeSlotRange>,
}

/// [`ScheduleSource`] backed by a map. Unknown ids yield no records.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    schedules: HashMap<ScheduleId, ScheduleData>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the records of a schedule.
    pub fn with_schedule(mut self, id: ScheduleId, data: ScheduleData) -> Self {
        self.schedules.insert(id, data);
        self
    }

    fn data(&self, id: ScheduleId) -> Option<&ScheduleData> {
        self.schedules.get(&id)
    }
}

impl ScheduleSource for InMemorySource {
    fn fetch_courses(&self, id: ScheduleId) -> Result<Vec<Course>, SourceError> {
        Ok(self.data(id).map(|d| d.courses.clone()).unwrap_or_default())
    }

    fn fetch_classrooms(&self, id: ScheduleId) -> Result<Vec<Classroom>, SourceError> {
        Ok(self.data(id).map(|d| d.classrooms.clone()).unwrap_or_default())
    }

    fn fetch_instructors(&self, id: ScheduleId) -> Result<Vec<Instructor>, SourceError> {
        Ok(self.data(id).map(|d| d.instructors.clone()).unwrap_or_default())
    }

    fn fetch_constraints(&self, id: ScheduleId) -> Result<Vec<ConstraintRow>, SourceError> {
        Ok(self.data(id).map(|d| d.constraints.clone()).unwrap_or_default())
    }

    fn fetch_time_slots(&self, id: ScheduleId) -> Result<Vec<TimeSlotRange>, SourceError> {
        Ok(self.data(id).map(|d| d.time_slots.clone()).unwrap_or_default())
    }
}

fn fetched<T>(entity: &'static str, result: Result<T, SourceError>) -> Result<T, TimetableError> {
    result.map_err(|source| {
        error!(entity, error = %source, "fetch failed");
        TimetableError::Fetch { entity, source }
    })
}

/// Fetches and prepares the input of one run.
pub fn load_request<S>(source: &S, id: ScheduleId) -> Result<ScheduleRequest, TimetableError>
where
    S: ScheduleSource + ?Sized,
{
    let fetched_courses = fetched("courses", source.fetch_courses(id))?;
    let total = fetched_courses.len();
    let courses: Vec<Course> = fetched_courses
        .into_iter()
        .filter(Course::has_sections)
        .collect();
    info!(
        schedule_id = %id,
        courses = courses.len(),
        skipped = total - courses.len(),
        "fetched courses"
    );

    let rows = fetched("time constraints", source.fetch_constraints(id))?;
    let constraints = TimeConstraint::group_rows(&rows)?;
    info!(
        schedule_id = %id,
        rows = rows.len(),
        constraints = constraints.len(),
        "fetched time constraints"
    );

    let classrooms = fetched("classrooms", source.fetch_classrooms(id))?;
    let instructors = fetched("instructors", source.fetch_instructors(id))?;
    let ranges = fetched("time slots", source.fetch_time_slots(id))?;
    let time_slots = TimeSlotCatalog::from_ranges(&ranges)?;
    info!(
        schedule_id = %id,
        classrooms = classrooms.len(),
        instructors = instructors.len(),
        time_slots = time_slots.len(),
        "fetched resources"
    );

    Ok(ScheduleRequest::new(courses, classrooms)
        .with_instructors(instructors)
        .with_constraints(constraints)
        .with_time_slots(time_slots))
}

/// Generates a timetable for the schedule named by `raw_schedule_id`.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Classroom, Course, Instructor, Section};
/// use u_timetable::scheduler::SchedulerConfig;
/// use u_timetable::source::{generate, InMemorySource, ScheduleData, ScheduleId};
///
/// let data = ScheduleData {
///     courses: vec![Course::new(1, "CS101", 2).with_section(Section::new(1, "01", 1))],
///     classrooms: vec![Classroom::new(1, "R101")],
///     instructors: vec![Instructor::new(1, "Grace", "Hopper")],
///     ..ScheduleData::default()
/// };
/// let source = InMemorySource::new().with_schedule(ScheduleId(7), data);
///
/// let timetable = generate(&source, Some("7"), &SchedulerConfig::default()).unwrap();
/// assert_eq!(timetable.assignments[0].instructor_name, "Grace Hopper");
/// assert_eq!(timetable.assignments[0].end_time, "9:00");
/// ```
pub fn generate<S>(
    source: &S,
    raw_schedule_id: Option<&str>,
    config: &SchedulerConfig,
) -> Result<Timetable, TimetableError>
where
    S: ScheduleSource + ?Sized,
{
    let raw = raw_schedule_id.ok_or(TimetableError::MissingScheduleId)?;
    let id = ScheduleId::parse(raw)?;
    let request = load_request(source, id)?;
    Ok(Scheduler::new().with_config(config.clone()).run(&request))
}
