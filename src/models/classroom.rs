//! Classroom model.
//!
//! Classrooms are the spatial resource of a timetable. Each one
//! contributes a full week of slots to the availability grid.

use serde::{Deserialize, Serialize};

use super::ClassroomId;

/// A classroom that sections can be placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique classroom identifier.
    pub id: ClassroomId,
    /// Room code shown on the timetable (e.g. "B-204").
    pub code: String,
    /// Seat count. Recorded but not used for placement.
    pub capacity: u32,
}

impl Classroom {
    /// Creates a classroom.
    pub fn new(id: ClassroomId, code: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            capacity: 0,
        }
    }

    /// Sets the seat count.
    pub fn with_capacity(mut self, capacity: u32) -> Self {
        self.capacity = capacity;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classroom_builder() {
        let room = Classroom::new(3, "B-204").with_capacity(40);
        assert_eq!(room.id, 3);
        assert_eq!(room.code, "B-204");
        assert_eq!(room.capacity, 40);
    }
}
