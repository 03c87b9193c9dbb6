//! Greedy timetabling and KPI evaluation.
//!
//! # Algorithm
//!
//! [`Scheduler`] runs a two-pass, first-fit, no-backtracking placement
//! over a fresh availability grid: short courses as single blocks, long
//! courses as two sessions preferably on different days. It is not
//! optimal, but deterministic under the default [`DayOrder`] and fast.
//!
//! # KPI
//!
//! [`TimetableKpi`] reports section coverage, classroom utilization and
//! the per-day load of a finished timetable.

mod config;
mod greedy;
mod kpi;
mod placer;

pub use config::{DayOrder, SchedulerConfig, DEFAULT_SPLIT_THRESHOLD};
pub use greedy::{ScheduleRequest, Scheduler};
pub use kpi::TimetableKpi;
pub use placer::{candidate_classrooms, FallbackStep, Placement, Placer};
