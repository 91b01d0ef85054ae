//! Planner tuning parameters.

use crate::circadian::Direction;

/// Configuration parameters for the adaptation planner.
///
/// The rate ceilings are physiological: the body clock can only delay
/// (westbound) about 1.8 hours per day and advance (eastbound) about
/// 1.2 hours per day, however much layover time is available.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Maximum eastbound adaptation rate in hours per day.
    pub east_rate_ceiling: f64,

    /// Maximum westbound adaptation rate in hours per day.
    pub west_rate_ceiling: f64,

    /// Layovers at or beyond this many hours adapt progressively;
    /// shorter ones anchor to the current schedule.
    pub progressive_threshold_hours: f64,

    /// Baseline local bedtime as fractional hours.
    pub base_bedtime_hours: f64,

    /// Baseline wake time as fractional hours.
    pub anchor_wake_hours: f64,

    /// Target sleep duration in hours.
    pub sleep_duration_hours: f64,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            east_rate_ceiling: 1.2,
            west_rate_ceiling: 1.8,
            progressive_threshold_hours: 24.0,
            base_bedtime_hours: 22.0,
            anchor_wake_hours: 6.0,
            sleep_duration_hours: 8.0,
        }
    }
}

impl PlannerConfig {
    /// Physiological rate ceiling for a travel direction.
    pub fn rate_ceiling(&self, direction: Direction) -> f64 {
        match direction {
            Direction::East => self.east_rate_ceiling,
            Direction::West => self.west_rate_ceiling,
            Direction::None => self.east_rate_ceiling,
        }
    }
}
