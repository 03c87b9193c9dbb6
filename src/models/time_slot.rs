//! Time-slot labels and the per-schedule slot catalog.
//!
//! A slot is identified by the canonical 24-hour label of its start time
//! (`"8:00"`, `"14:00"`). Durations are measured in consecutive catalog
//! positions, never in wall-clock minutes, so a range such as
//! `"8:00 AM - 9:00 AM"` collapses to its start label.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::TimetableError;

/// Catalog used when a schedule configures no time slots.
pub const DEFAULT_TIME_SLOTS: [&str; 10] = [
    "8:00", "9:00", "10:00", "11:00", "12:00", "13:00", "14:00", "15:00", "16:00", "17:00",
];

/// A configured start/end pair, as stored for a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotRange {
    pub start_time: String,
    pub end_time: String,
}

impl TimeSlotRange {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}

/// Normalizes a time-slot label to canonical 24-hour `H:MM` form.
///
/// - `"8:00 AM - 9:00 AM"` → `"8:00"` (only the start of a range is kept)
/// - `"8:00 AM"` → `"8:00"`
/// - `"2:30 PM"` → `"14:30"`, `"12:00 PM"` → `"12:00"`
/// - `"08:00"` → `"8:00"`
///
/// Labels that do not parse as a clock time are returned with the range
/// tail and every meridiem suffix removed, otherwise untouched. The function is
/// idempotent.
///
/// # Examples
///
/// ```
/// use u_timetable::models::normalize_time_slot;
///
/// assert_eq!(normalize_time_slot("1:00 PM - 2:00 PM"), "13:00");
/// let once = normalize_time_slot("9:00 AM");
/// assert_eq!(normalize_time_slot(&once), once);
/// ```
pub fn normalize_time_slot(raw: &str) -> String {
    let start = raw.split('-').next().unwrap_or(raw).trim();
    let (clock, meridiem) = split_meridiem(start);

    let Some((mut hour, minute)) = parse_clock(clock) else {
        return strip_meridiems(clock).to_string();
    };
    if meridiem == Some(Meridiem::Pm) && hour < 12 {
        hour += 12;
    }
    format!("{hour}:{minute:02}")
}

/// Minutes since midnight for a canonical label, `None` if it is not a
/// clock time.
pub fn label_minutes(label: &str) -> Option<u32> {
    parse_clock(label).map(|(h, m)| h * 60 + m)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Meridiem {
    Am,
    Pm,
}

fn split_meridiem(s: &str) -> (&str, Option<Meridiem>) {
    let upper = s.to_ascii_uppercase();
    let meridiem = if upper.ends_with("AM") {
        Meridiem::Am
    } else if upper.ends_with("PM") {
        Meridiem::Pm
    } else {
        return (s, None);
    };
    (s[..s.len() - 2].trim_end(), Some(meridiem))
}

/// Removes every trailing meridiem suffix ("8:00 AM PM" -> "8:00").
fn strip_meridiems(mut s: &str) -> &str {
    while let (rest, Some(_)) = split_meridiem(s) {
        s = rest;
    }
    s
}

fn parse_clock(s: &str) -> Option<(u32, u32)> {
    let (h, m) = s.trim().split_once(':')?;
    let hour: u32 = h.trim().parse().ok()?;
    let minute: u32 = m.trim().parse().ok()?;
    if hour >= 24 || minute >= 60 || m.trim().len() != 2 {
        return None;
    }
    Some((hour, minute))
}

/// Ordered, de-duplicated list of slot start labels for one schedule.
///
/// The position of a label in the catalog is its slot index; windows are
/// contiguous index ranges.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct TimeSlotCatalog {
    labels: Vec<String>,
    positions: HashMap<String, usize>,
}

impl TimeSlotCatalog {
    /// The ten-slot 8:00–17:00 catalog.
    pub fn default_catalog() -> Self {
        Self::from_sorted(DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect())
    }

    /// Builds a catalog from raw labels.
    ///
    /// Labels are normalized, sorted by start time and de-duplicated.
    /// An empty input yields an empty catalog (nothing can be placed).
    pub fn from_labels<I, S>(labels: I) -> Result<Self, TimetableError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keyed = Vec::new();
        for raw in labels {
            let label = normalize_time_slot(raw.as_ref());
            let minutes = label_minutes(&label)
                .ok_or_else(|| TimetableError::InvalidTimeSlot(raw.as_ref().to_string()))?;
            keyed.push((minutes, label));
        }
        keyed.sort_by_key(|(minutes, _)| *minutes);
        keyed.dedup_by_key(|(minutes, _)| *minutes);

        Ok(Self::from_sorted(keyed.into_iter().map(|(_, l)| l).collect()))
    }

    /// Builds the catalog for a schedule's configured ranges, falling back
    /// to [`default_catalog`](Self::default_catalog) when none exist.
    pub fn from_ranges(ranges: &[TimeSlotRange]) -> Result<Self, TimetableError> {
        if ranges.is_empty() {
            return Ok(Self::default_catalog());
        }
        Self::from_labels(ranges.iter().map(|r| r.start_time.as_str()))
    }

    fn from_sorted(labels: Vec<String>) -> Self {
        let positions = labels
            .iter()
            .enumerate()
            .map(|(i, l)| (l.clone(), i))
            .collect();
        Self { labels, positions }
    }

    /// Number of slots per day.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Label at a slot index.
    pub fn label(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    /// Slot index of a canonical label.
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.positions.get(label).copied()
    }

    /// All labels in slot order.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }
}

impl PartialEq for TimeSlotCatalog {
    fn eq(&self, other: &Self) -> bool {
        self.labels == other.labels
    }
}

impl Eq for TimeSlotCatalog {}

impl TryFrom<Vec<String>> for TimeSlotCatalog {
    type Error = TimetableError;

    fn try_from(labels: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_labels(labels)
    }
}

impl From<TimeSlotCatalog> for Vec<String> {
    fn from(catalog: TimeSlotCatalog) -> Self {
        catalog.labels
    }
}

impl Default for TimeSlotCatalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}
