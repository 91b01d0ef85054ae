//! Multi-leg adaptation planning.
//!
//! Given a validated journey, the planner produces a per-stop sleep
//! timeline and a day-by-day recovery plan at the final destination.
//!
//! Only the journey endpoints determine the total shift; intermediate
//! legs' own shifts are deliberately ignored. The in-transit adaptation
//! rate is the minimum of the theoretically available rate and the
//! physiological ceiling, so short layovers with large shifts
//! under-adapt in transit and push more recovery to the destination.

mod adaptation;
mod config;

pub use adaptation::{
    AdaptationStrategy, LegAdaptation, MultiLegJetlagPlan, RecoveryDay, RecoveryPhase,
};
pub use config::PlannerConfig;

#[cfg(test)]
mod plan_tests;

use chrono::{Duration, NaiveTime};
use tracing::debug;

use crate::circadian::{
    Direction, SleepWindow, ZoneShift, day_sleep_schedule, recovery_days, zone_shift,
};
use crate::domain::{Layover, MultiLegJourney};

/// Builds adaptation plans for validated journeys.
pub struct MultiLegAdaptationPlanner {
    config: PlannerConfig,
}

impl Default for MultiLegAdaptationPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiLegAdaptationPlanner {
    /// Planner with the default physiological parameters.
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
        }
    }

    /// Planner with explicit parameters.
    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    /// Plan adaptation for a journey.
    ///
    /// Total: journeys are non-empty by construction, and degenerate
    /// zero-shift or zero-layover journeys still get a plan.
    pub fn plan(&self, journey: &MultiLegJourney) -> MultiLegJetlagPlan {
        let shift = zone_shift(
            journey.origin().tz,
            journey.final_destination().tz,
            journey.first_leg().departure(),
        );

        let days_en_route = journey.days_en_route();
        let theoretical_rate = if days_en_route > 0.0 {
            shift.hours / days_en_route
        } else {
            0.0
        };
        let progression_rate = theoretical_rate.min(self.config.rate_ceiling(shift.direction));

        let mut adaptations = vec![self.pre_departure_anchor(journey, shift)];

        let mut cumulative = 0.0;
        for (i, layover) in journey.layovers().iter().enumerate() {
            adaptations.push(self.layover_adaptation(
                i,
                layover,
                shift,
                progression_rate,
                &mut cumulative,
            ));
        }

        let remaining = shift.hours - cumulative;
        let final_recovery_days = recovery_days(remaining, shift.direction, journey.profile());

        let recovery_plan = build_recovery_days(shift.direction, remaining, final_recovery_days);

        let total_journey_days = days_en_route.ceil() as u32 + final_recovery_days;

        debug!(
            total_shift = shift.hours,
            ?shift.direction,
            progression_rate,
            cumulative,
            remaining,
            final_recovery_days,
            "planned journey adaptation"
        );

        MultiLegJetlagPlan {
            total_journey_days,
            final_recovery_days,
            total_shift_hours: shift.hours,
            direction: shift.direction,
            progression_rate,
            adaptations,
            recovery_days: recovery_plan,
            safety_notes: safety_notes(shift),
            environment_notes: environment_notes(shift.direction),
        }
    }

    /// Anchor-sleep night at the origin: an 8h window ending at 06:00
    /// local the night before departure, one night earlier when the
    /// flight leaves before 06:00.
    fn pre_departure_anchor(&self, journey: &MultiLegJourney, shift: ZoneShift) -> LegAdaptation {
        let dep_local = journey.first_leg().departure_local();
        let wake_time = NaiveTime::from_hms_opt(self.config.anchor_wake_hours as u32, 0, 0)
            .unwrap_or(NaiveTime::MIN);

        let mut wake_date = dep_local.date_naive();
        if dep_local.time() < wake_time {
            wake_date = wake_date - Duration::days(1);
        }

        let bedtime_hours = self.config.anchor_wake_hours - self.config.sleep_duration_hours;
        let sleep = SleepWindow::from_hours(
            bedtime_hours,
            self.config.sleep_duration_hours,
            format!("Wake rested at {wake_time} on {wake_date}, before departure"),
        );

        LegAdaptation {
            stop_index: 0,
            location: journey.origin().clone(),
            strategy: AdaptationStrategy::AnchorSleep,
            shift_applied_hours: 0.0,
            cumulative_shift_hours: 0.0,
            remaining_shift_hours: shift.hours,
            sleep,
            recommendations: anchor_recommendations(),
            reasoning: format!(
                "Start the journey fully rested on the {} clock",
                journey.origin().city
            ),
        }
    }

    fn layover_adaptation(
        &self,
        layover_index: usize,
        layover: &Layover,
        shift: ZoneShift,
        progression_rate: f64,
        cumulative: &mut f64,
    ) -> LegAdaptation {
        let hours_here = layover.duration_hours();

        if hours_here < self.config.progressive_threshold_hours {
            // Too short to move the body clock; hold the schedule
            // already achieved.
            let sleep = self.shifted_window(
                *cumulative,
                shift.direction,
                format!("Hold your current schedule during the {hours_here:.0}h stop"),
            );

            return LegAdaptation {
                stop_index: layover_index + 1,
                location: layover.location().clone(),
                strategy: AdaptationStrategy::AnchorSleep,
                shift_applied_hours: 0.0,
                cumulative_shift_hours: *cumulative,
                remaining_shift_hours: shift.hours - *cumulative,
                sleep,
                recommendations: anchor_recommendations(),
                reasoning: format!(
                    "{hours_here:.0}h at {} is under a full day; shifting here \
                     would cost sleep without moving the body clock",
                    layover.location().city
                ),
            };
        }

        let days_here = layover.duration_days();
        let applied = (progression_rate * days_here).min(shift.hours - *cumulative);
        *cumulative += applied;

        let sleep = self.shifted_window(
            *cumulative,
            shift.direction,
            format!("Schedule shifted {:.1}h toward the destination", *cumulative),
        );

        LegAdaptation {
            stop_index: layover_index + 1,
            location: layover.location().clone(),
            strategy: AdaptationStrategy::Progressive,
            shift_applied_hours: applied,
            cumulative_shift_hours: *cumulative,
            remaining_shift_hours: shift.hours - *cumulative,
            sleep,
            recommendations: progressive_recommendations(shift.direction),
            reasoning: format!(
                "{days_here:.1} days at {} allow {applied:.1}h of adaptation at \
                 {progression_rate:.1}h/day",
                layover.location().city
            ),
        }
    }

    /// Base 22:00 bedtime displaced by the cumulative shift: delayed
    /// (later) for westbound travel, advanced (earlier) for eastbound.
    fn shifted_window(
        &self,
        cumulative: f64,
        direction: Direction,
        notes: String,
    ) -> SleepWindow {
        let bedtime_hours = match direction {
            Direction::West => self.config.base_bedtime_hours + cumulative,
            Direction::East => self.config.base_bedtime_hours - cumulative,
            Direction::None => self.config.base_bedtime_hours,
        };

        SleepWindow::from_hours(bedtime_hours, self.config.sleep_duration_hours, notes)
    }
}

fn build_recovery_days(
    direction: Direction,
    remaining_shift: f64,
    final_recovery_days: u32,
) -> Vec<RecoveryDay> {
    (0..=final_recovery_days)
        .map(|day| {
            let phase = if day == 0 {
                RecoveryPhase::ArrivalDay
            } else if day <= final_recovery_days / 2 {
                RecoveryPhase::ActiveRecovery
            } else {
                RecoveryPhase::FinalAdjustment
            };

            RecoveryDay {
                day_index: day,
                phase,
                sleep: day_sleep_schedule(direction, day, remaining_shift),
            }
        })
        .collect()
}

fn anchor_recommendations() -> Vec<String> {
    vec![
        "Keep your current sleep schedule".to_string(),
        "Limit naps to 30 minutes".to_string(),
        "Stay hydrated and avoid alcohol".to_string(),
    ]
}

fn progressive_recommendations(direction: Direction) -> Vec<String> {
    let light = match direction {
        Direction::East => "Seek bright light in the morning, avoid it in the evening",
        Direction::West => "Seek bright light in the evening, avoid it in the early morning",
        Direction::None => "Keep regular daylight exposure",
    };

    vec![
        light.to_string(),
        "Shift meal times together with the sleep window".to_string(),
        "No caffeine within 8 hours of the target bedtime".to_string(),
    ]
}

fn safety_notes(shift: ZoneShift) -> Vec<String> {
    let mut notes = vec![
        "Drink water regularly in flight; cabin air is dehydrating".to_string(),
    ];

    if shift.hours >= 8.0 {
        notes.push(format!(
            "A {:.0}h shift is severe; avoid driving or critical decisions \
             for the first two days after arrival",
            shift.hours
        ));
    }

    if shift.hours > 0.0 {
        notes.push(
            "Consult a clinician before using melatonin with other medication".to_string(),
        );
    }

    notes
}

fn environment_notes(direction: Direction) -> Vec<String> {
    match direction {
        Direction::East => vec![
            "Morning light advances the body clock; get outside after sunrise".to_string(),
            "Consider 0.5mg melatonin about 5 hours before the target bedtime".to_string(),
            "Wear sunglasses in the evening to avoid delaying the clock".to_string(),
        ],
        Direction::West => vec![
            "Evening light delays the body clock; stay in bright light until late".to_string(),
            "Avoid early-morning light for the first days after arrival".to_string(),
            "Caffeine early in the local morning helps stretch the day".to_string(),
        ],
        Direction::None => vec![
            "No circadian adjustment needed; keep regular sleep hours".to_string(),
        ],
    }
}
