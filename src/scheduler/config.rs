//! Scheduler configuration.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::models::Day;

/// Courses longer than this many slots are split into two sessions.
pub const DEFAULT_SPLIT_THRESHOLD: u32 = 2;

/// Order in which the days other than the first session's day are tried
/// when placing the second session of a split course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DayOrder {
    /// Start from the day after the first session and wrap around.
    #[default]
    Rotate,
    /// Shuffle with a fixed seed. Same input and seed, same timetable.
    Seeded(u64),
    /// Shuffle with a fresh random seed every run.
    Random,
}

/// Configuration for [`Scheduler`](super::Scheduler).
///
/// # Example
///
/// ```
/// use u_timetable::scheduler::{DayOrder, SchedulerConfig};
///
/// let config = SchedulerConfig::new()
///     .with_split_threshold(3)
///     .with_day_order(DayOrder::Seeded(7));
/// assert_eq!(config.split_threshold, 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Longest duration (in slots) placed as a single block.
    pub split_threshold: u32,
    /// Fallback-day policy for second sessions.
    pub day_order: DayOrder,
}

impl SchedulerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the single-block duration limit.
    pub fn with_split_threshold(mut self, split_threshold: u32) -> Self {
        self.split_threshold = split_threshold;
        self
    }

    /// Sets the fallback-day policy.
    pub fn with_day_order(mut self, day_order: DayOrder) -> Self {
        self.day_order = day_order;
        self
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            split_threshold: DEFAULT_SPLIT_THRESHOLD,
            day_order: DayOrder::default(),
        }
    }
}

/// Run-local generator of "other day" sequences for one [`DayOrder`].
pub(crate) enum DaySequencer {
    Rotate,
    Shuffle(StdRng),
}

impl DaySequencer {
    pub(crate) fn new(order: DayOrder) -> Self {
        match order {
            DayOrder::Rotate => Self::Rotate,
            DayOrder::Seeded(seed) => Self::Shuffle(StdRng::seed_from_u64(seed)),
            DayOrder::Random => Self::Shuffle(StdRng::from_rng(&mut rand::rng())),
        }
    }

    /// Every teaching day except `first`.
    pub(crate) fn other_days(&mut self, first: Day) -> Vec<Day> {
        let mut days: Vec<Day> = (1..Day::COUNT)
            .map(|k| Day::ALL[(first.index() + k) % Day::COUNT])
            .collect();
        if let Self::Shuffle(rng) = self {
            days.shuffle(rng);
        }
        days
    }
}
