//! Trip bucket type.
//!
//! A `TripBucket` is a user-facing grouping of flights planned and
//! recovered-from as one unit. Buckets are persisted by an external
//! collaborator; this type holds the validated in-memory shape the
//! policy functions reason over.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::circadian::{ZoneShift, zone_shift};
use crate::domain::{DomainError, FlightLeg, Iata};

use super::{RecoveryProtocol, SubscriptionTier, jetlag_difficulty};

/// Lifecycle state of a trip bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketStatus {
    /// Being assembled, not yet counted against tier limits
    #[default]
    Draft,
    /// Contents frozen, awaiting travel
    Locked,
    /// Travel or recovery in progress
    Active,
    /// Recovery finished
    Completed,
}

impl BucketStatus {
    /// Whether a bucket in this state occupies an active-bucket slot
    /// for tier admission. Drafts and completed trips do not.
    pub fn counts_against_limit(self) -> bool {
        matches!(self, BucketStatus::Locked | BucketStatus::Active)
    }
}

/// A grouping of flights treated as one jet-lag event.
///
/// # Invariants
///
/// - At least one leg
/// - Leg count within the creation tier's cap
/// - Legs chronologically ordered by departure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripBucket {
    name: String,
    legs: Vec<FlightLeg>,
    status: BucketStatus,
    protocol: RecoveryProtocol,
    is_return: bool,
    parent: Option<String>,
    recovery_complete: Option<DateTime<Utc>>,
    tier: SubscriptionTier,
    difficulty: f64,
}

impl TripBucket {
    /// Construct a bucket, enforcing the tier's flight-count cap.
    ///
    /// The difficulty score is computed from the endpoint timezone
    /// shift and leg count at construction.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `legs` is empty or exceeds the tier cap.
    pub fn new(
        name: impl Into<String>,
        mut legs: Vec<FlightLeg>,
        tier: SubscriptionTier,
        protocol: RecoveryProtocol,
    ) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::EmptyBucket);
        }

        let max = tier.limits().max_legs_per_bucket;
        if legs.len() > max {
            return Err(DomainError::TooManyFlights {
                count: legs.len(),
                max,
            });
        }

        legs.sort_by_key(|leg| leg.departure());

        let shift = endpoint_shift(&legs);
        let difficulty = jetlag_difficulty(shift.hours, shift.direction, legs.len());

        Ok(TripBucket {
            name: name.into(),
            legs,
            status: BucketStatus::Draft,
            protocol,
            is_return: false,
            parent: None,
            recovery_complete: None,
            tier,
            difficulty,
        })
    }

    /// Returns the bucket name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the legs in departure order.
    pub fn legs(&self) -> &[FlightLeg] {
        &self.legs
    }

    /// Returns the lifecycle status.
    pub fn status(&self) -> BucketStatus {
        self.status
    }

    /// Updates the lifecycle status.
    pub fn set_status(&mut self, status: BucketStatus) {
        self.status = status;
    }

    /// Returns the recovery protocol for this bucket.
    pub fn protocol(&self) -> RecoveryProtocol {
        self.protocol
    }

    /// Returns true if this bucket is a return trip of another.
    pub fn is_return(&self) -> bool {
        self.is_return
    }

    /// Marks this bucket as the return trip of `parent`.
    pub fn set_return_of(&mut self, parent: impl Into<String>) {
        self.is_return = true;
        self.parent = Some(parent.into());
    }

    /// Returns the parent bucket reference, if any.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Returns the creation tier.
    pub fn tier(&self) -> SubscriptionTier {
        self.tier
    }

    /// Returns the difficulty score in [0, 10].
    pub fn difficulty(&self) -> f64 {
        self.difficulty
    }

    /// Records when circadian recovery from this trip completes.
    pub fn set_recovery_complete(&mut self, at: DateTime<Utc>) {
        self.recovery_complete = Some(at);
    }

    /// Returns the recovery-complete instant, if computed.
    pub fn recovery_complete(&self) -> Option<DateTime<Utc>> {
        self.recovery_complete
    }

    /// Returns the first leg's origin airport code.
    pub fn first_origin(&self) -> Iata {
        // Safe: validated non-empty at construction
        self.legs[0].origin_code()
    }

    /// Returns the last leg's destination airport code.
    pub fn final_destination(&self) -> Iata {
        // Safe: validated non-empty at construction
        self.legs.last().unwrap().destination_code()
    }

    /// Returns the first departure instant.
    pub fn departure(&self) -> DateTime<Utc> {
        self.legs[0].departure()
    }

    /// Returns the final arrival instant.
    pub fn arrival(&self) -> DateTime<Utc> {
        self.legs.last().unwrap().arrival()
    }

    /// Returns when the traveler is usable again: the recovery-complete
    /// instant when known, otherwise the final arrival.
    pub fn recovery_complete_or_arrival(&self) -> DateTime<Utc> {
        self.recovery_complete.unwrap_or_else(|| self.arrival())
    }

    /// Returns the endpoint timezone shift for this bucket.
    pub fn endpoint_shift(&self) -> ZoneShift {
        endpoint_shift(&self.legs)
    }
}

fn endpoint_shift(legs: &[FlightLeg]) -> ZoneShift {
    // Safe: callers guarantee non-empty
    let first = &legs[0];
    let last = legs.last().unwrap();
    zone_shift(first.origin().tz, last.destination().tz, first.departure())
}
