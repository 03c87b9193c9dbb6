//! Instructor model.

use serde::{Deserialize, Serialize};

use super::InstructorId;

/// Display name used when an instructor record is missing.
pub const UNKNOWN_NAME: &str = "Unknown";

/// A person who teaches sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instructor {
    pub id: InstructorId,
    pub first_name: String,
    pub last_name: String,
}

impl Instructor {
    pub fn new(
        id: InstructorId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
