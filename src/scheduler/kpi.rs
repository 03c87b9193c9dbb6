//! Timetable quality metrics (KPIs).
//!
//! Computed from a finished run and the request that produced it.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Section coverage | Fraction of sections fully placed |
//! | Classroom utilization | Occupied slots / (days × catalog slots) |
//! | Avg utilization | Mean classroom utilization |
//! | Assignments by day | Committed blocks per teaching day |

use std::collections::{BTreeMap, HashMap, HashSet};

use super::greedy::ScheduleRequest;
use crate::models::{ClassroomId, Day, Timetable};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Sections across courses that have at least one section.
    pub total_sections: usize,
    /// Sections missing some or all of their teaching time.
    pub unscheduled_sections: usize,
    /// Fraction of sections fully placed (0.0..1.0).
    pub section_coverage: f64,
    /// Per-classroom utilization over the week (0.0..1.0).
    pub utilization_by_classroom: HashMap<ClassroomId, f64>,
    /// Average classroom utilization (0.0..1.0).
    pub avg_utilization: f64,
    /// Committed assignments per day. Every teaching day is present.
    pub assignments_by_day: BTreeMap<Day, usize>,
}

impl TimetableKpi {
    /// Computes KPIs for `timetable`.
    pub fn calculate(timetable: &Timetable, request: &ScheduleRequest) -> Self {
        let total_sections: usize = request
            .courses
            .iter()
            .filter(|c| c.has_sections())
            .map(|c| c.section_count())
            .sum();
        let unscheduled_sections = timetable
            .unscheduled
            .iter()
            .map(|u| u.section_id)
            .collect::<HashSet<_>>()
            .len();

        let section_coverage = if total_sections == 0 {
            1.0
        } else {
            total_sections.saturating_sub(unscheduled_sections) as f64 / total_sections as f64
        };

        let week_slots = (Day::COUNT * request.time_slots.len()) as f64;
        let mut utilization_by_classroom = HashMap::new();
        for room in &request.classrooms {
            let used: u32 = timetable
                .assignments
                .iter()
                .filter(|a| a.classroom_id == room.id)
                .map(|a| a.slot_count)
                .sum();
            let utilization = if week_slots > 0.0 {
                used as f64 / week_slots
            } else {
                0.0
            };
            utilization_by_classroom.entry(room.id).or_insert(utilization);
        }

        let avg_utilization = if utilization_by_classroom.is_empty() {
            0.0
        } else {
            let sum: f64 = utilization_by_classroom.values().sum();
            sum / utilization_by_classroom.len() as f64
        };

        let mut assignments_by_day: BTreeMap<Day, usize> =
            Day::ALL.iter().map(|&d| (d, 0)).collect();
        for a in &timetable.assignments {
            *assignments_by_day.entry(a.day).or_default() += 1;
        }

        Self {
            total_sections,
            unscheduled_sections,
            section_coverage,
            utilization_by_classroom,
            avg_utilization,
            assignments_by_day,
        }
    }

    /// Whether the timetable meets the given quality thresholds.
    pub fn meets_thresholds(&self, min_coverage: f64, min_utilization: f64) -> bool {
        self.section_coverage >= min_coverage && self.avg_utilization >= min_utilization
    }
}
