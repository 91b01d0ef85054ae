//! Layover type.
//!
//! A `Layover` is the ground time between two chronologically-adjacent,
//! geographically-connected legs. Layovers are derived during journey
//! construction; they are never supplied by callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Airport, DomainError};

/// Time spent on the ground between two connected flight legs.
///
/// # Invariants
///
/// - `departure >= arrival` (duration is never negative)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layover {
    location: Airport,
    arrival: DateTime<Utc>,
    departure: DateTime<Utc>,
}

impl Layover {
    /// Construct a layover from the inbound arrival and outbound departure.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the outbound departure is before the inbound arrival.
    pub fn new(
        location: Airport,
        arrival: DateTime<Utc>,
        departure: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if departure < arrival {
            return Err(DomainError::NegativeLayover(location.code));
        }

        Ok(Layover {
            location,
            arrival,
            departure,
        })
    }

    /// Returns the layover location.
    pub fn location(&self) -> &Airport {
        &self.location
    }

    /// Returns the inbound arrival instant.
    pub fn arrival(&self) -> DateTime<Utc> {
        self.arrival
    }

    /// Returns the outbound departure instant.
    pub fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    /// Returns the layover duration in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        (self.departure - self.arrival).num_seconds() as f64 / 3600.0
    }

    /// Returns the layover duration in fractional days.
    pub fn duration_days(&self) -> f64 {
        self.duration_hours() / 24.0
    }
}
