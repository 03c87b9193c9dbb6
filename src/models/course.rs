//! Course and section models.
//!
//! A course carries the teaching load (its duration, in consecutive
//! slots) and owns one or more sections. Each section is placed
//! independently; a section may be pinned to a classroom ahead of time.

use serde::{Deserialize, Serialize};

use super::{ClassroomId, CourseId, InstructorId, SectionId};

/// A course to be timetabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Unique course identifier.
    pub id: CourseId,
    /// Catalog code (e.g. "CS101").
    pub code: String,
    /// Human-readable title.
    pub title: String,
    /// Weekly teaching time, in consecutive catalog slots.
    pub duration: u32,
    /// Sections that each need their own placement.
    pub sections: Vec<Section>,
}

/// One teaching group of a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Unique section identifier.
    pub id: SectionId,
    /// Section label within the course (e.g. "01").
    pub number: String,
    /// Pre-assigned classroom. `None` = any classroom may be used.
    pub classroom_id: Option<ClassroomId>,
    /// Instructor teaching this section.
    pub instructor_id: InstructorId,
}

impl Course {
    /// Creates a course with no sections.
    pub fn new(id: CourseId, code: impl Into<String>, duration: u32) -> Self {
        Self {
            id,
            code: code.into(),
            title: String::new(),
            duration,
            sections: Vec::new(),
        }
    }

    /// Sets the course title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Adds a section.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Number of sections.
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Whether this course has any sections.
    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }

    /// Durations of the two sessions a long course is split into:
    /// `ceil(d/2)` and the remainder.
    pub fn split_durations(&self) -> (u32, u32) {
        let first = self.duration.div_ceil(2);
        (first, self.duration - first)
    }
}

impl Section {
    /// Creates a section free to use any classroom.
    pub fn new(id: SectionId, number: impl Into<String>, instructor_id: InstructorId) -> Self {
        Self {
            id,
            number: number.into(),
            classroom_id: None,
            instructor_id,
        }
    }

    /// Pins the section to a classroom.
    pub fn in_classroom(mut self, classroom_id: ClassroomId) -> Self {
        self.classroom_id = Some(classroom_id);
        self
    }
}
