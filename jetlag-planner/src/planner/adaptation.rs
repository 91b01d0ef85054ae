//! Adaptation plan types.
//!
//! Output shapes for the planner: one [`LegAdaptation`] per stop, one
//! [`RecoveryDay`] per day at the final destination, and the
//! [`MultiLegJetlagPlan`] that holds them together.

use serde::{Deserialize, Serialize};

use crate::circadian::{Direction, SleepWindow};
use crate::domain::Airport;

/// Sleep strategy at a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdaptationStrategy {
    /// Shift the sleep window toward the destination clock.
    Progressive,
    /// Hold the current schedule; the stop is too short to adapt.
    AnchorSleep,
}

/// Adaptation guidance for one stop of the journey.
///
/// Stop 0 is the pre-departure night at the origin; stop `i + 1`
/// corresponds to layover `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegAdaptation {
    /// Stop position in the journey
    pub stop_index: usize,
    /// Where the traveler sleeps
    pub location: Airport,
    /// Strategy at this stop
    pub strategy: AdaptationStrategy,
    /// Hours of shift applied at this stop
    pub shift_applied_hours: f64,
    /// Total shift achieved so far, including this stop
    pub cumulative_shift_hours: f64,
    /// Shift still owed to the final destination after this stop
    pub remaining_shift_hours: f64,
    /// Recommended sleep window at this stop
    pub sleep: SleepWindow,
    /// Actionable guidance for this stop
    pub recommendations: Vec<String>,
    /// Why this strategy was chosen
    pub reasoning: String,
}

/// Phase of post-arrival recovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryPhase {
    /// Landing day
    ArrivalDay,
    /// Early recovery with active countermeasures
    ActiveRecovery,
    /// Closing the last hours of misalignment
    FinalAdjustment,
}

impl RecoveryPhase {
    /// Display label for the phase.
    pub fn label(self) -> &'static str {
        match self {
            RecoveryPhase::ArrivalDay => "Arrival Day",
            RecoveryPhase::ActiveRecovery => "Active Recovery",
            RecoveryPhase::FinalAdjustment => "Final Adjustment",
        }
    }
}

/// One day of the final-destination recovery plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryDay {
    /// Days since arrival, 0-based
    pub day_index: u32,
    /// Recovery phase this day falls in
    pub phase: RecoveryPhase,
    /// Recommended sleep window for the day
    pub sleep: SleepWindow,
}

/// Complete adaptation plan for a multi-leg journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLegJetlagPlan {
    /// Travel days plus recovery days
    pub total_journey_days: u32,
    /// Days of recovery needed at the final destination
    pub final_recovery_days: u32,
    /// Endpoint timezone shift in hours
    pub total_shift_hours: f64,
    /// Adaptation direction
    pub direction: Direction,
    /// In-transit adaptation rate in hours per day
    pub progression_rate: f64,
    /// Per-stop adaptations in journey order
    pub adaptations: Vec<LegAdaptation>,
    /// Day-by-day plan at the final destination
    pub recovery_days: Vec<RecoveryDay>,
    /// Safety advisories for the trip
    pub safety_notes: Vec<String>,
    /// Light, melatonin, and caffeine guidance
    pub environment_notes: Vec<String>,
}

impl MultiLegJetlagPlan {
    /// Shift achieved in transit, before final-destination recovery.
    pub fn shift_achieved_en_route(&self) -> f64 {
        self.adaptations
            .last()
            .map(|a| a.cumulative_shift_hours)
            .unwrap_or(0.0)
    }

    /// Shift still owed when the traveler lands.
    pub fn remaining_shift_on_arrival(&self) -> f64 {
        self.total_shift_hours - self.shift_achieved_en_route()
    }
}
