//! Multi-leg journey types.
//!
//! A `MultiLegJourney` is an ordered sequence of flight legs with the
//! layovers derived between them, plus an optional traveler profile
//! used to personalize recovery estimates. Journeys are built only
//! after the connection validator has accepted the legs (or the caller
//! has explicitly overridden a confirmation).

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{Airport, DomainError, FlightLeg, Iata, Layover};

/// Self-reported sleep quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Poor,
    #[default]
    Average,
    Good,
}

/// How readily the traveler adapts to new schedules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Adaptability {
    Low,
    #[default]
    Average,
    High,
}

/// How often the traveler exercises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseFrequency {
    Rare,
    #[default]
    Weekly,
    Daily,
}

/// Traveler attributes that influence circadian recovery speed.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TravelerProfile {
    /// Self-reported sleep quality
    pub sleep_quality: SleepQuality,
    /// Schedule adaptability
    pub adaptability: Adaptability,
    /// Exercise frequency
    pub exercise_frequency: ExerciseFrequency,
    /// Age in years, if known
    pub age: Option<u32>,
}

/// A complete multi-leg journey toward a final destination.
///
/// # Invariants
///
/// - At least one leg
/// - Legs are chronologically ordered by departure
/// - Every layover has non-negative duration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultiLegJourney {
    legs: Vec<FlightLeg>,
    layovers: Vec<Layover>,
    profile: Option<TravelerProfile>,
}

impl MultiLegJourney {
    /// Construct a journey from legs, deriving layovers between
    /// connected adjacent pairs.
    ///
    /// Legs are sorted by departure first. A layover is derived between
    /// an adjacent pair only when `is_connected` says the arrival and
    /// next departure airports are reachable by ground transfer and the
    /// gap is non-negative; other pairs are skipped with a warning
    /// rather than rejected, so a journey kept together by an explicit
    /// user confirmation still gets a plan.
    ///
    /// # Errors
    ///
    /// Returns `Err(DomainError::EmptyJourney)` if `legs` is empty.
    pub fn new<F>(
        mut legs: Vec<FlightLeg>,
        profile: Option<TravelerProfile>,
        is_connected: F,
    ) -> Result<Self, DomainError>
    where
        F: Fn(Iata, Iata) -> bool,
    {
        if legs.is_empty() {
            return Err(DomainError::EmptyJourney);
        }

        legs.sort_by_key(|leg| leg.departure());

        let mut layovers = Vec::with_capacity(legs.len().saturating_sub(1));
        for window in legs.windows(2) {
            let (curr, next) = (&window[0], &window[1]);

            if !is_connected(curr.destination_code(), next.origin_code()) {
                warn!(
                    arrival = %curr.destination_code(),
                    departure = %next.origin_code(),
                    "adjacent legs are not ground-connected; skipping layover"
                );
                continue;
            }

            match Layover::new(
                next.origin().clone(),
                curr.arrival(),
                next.departure(),
            ) {
                Ok(layover) => layovers.push(layover),
                Err(err) => {
                    warn!(error = %err, "skipping layover with negative duration");
                }
            }
        }

        Ok(MultiLegJourney {
            legs,
            layovers,
            profile,
        })
    }

    /// Returns the legs in departure order.
    pub fn legs(&self) -> &[FlightLeg] {
        &self.legs
    }

    /// Returns the derived layovers in order.
    pub fn layovers(&self) -> &[Layover] {
        &self.layovers
    }

    /// Returns the traveler profile, if provided.
    pub fn profile(&self) -> Option<&TravelerProfile> {
        self.profile.as_ref()
    }

    /// Returns the first leg.
    pub fn first_leg(&self) -> &FlightLeg {
        // Safe: validated non-empty at construction
        &self.legs[0]
    }

    /// Returns the last leg.
    pub fn last_leg(&self) -> &FlightLeg {
        // Safe: validated non-empty at construction
        self.legs.last().unwrap()
    }

    /// Returns the journey origin airport.
    pub fn origin(&self) -> &Airport {
        self.first_leg().origin()
    }

    /// Returns the final destination airport.
    pub fn final_destination(&self) -> &Airport {
        self.last_leg().destination()
    }

    /// Returns the number of legs.
    pub fn leg_count(&self) -> usize {
        self.legs.len()
    }

    /// Returns the total layover time in fractional days.
    ///
    /// This is the adaptation time available en route; flight time does
    /// not count because sleep timing cannot be meaningfully shifted in
    /// the air.
    pub fn days_en_route(&self) -> f64 {
        self.layovers.iter().map(|l| l.duration_days()).sum()
    }
}
