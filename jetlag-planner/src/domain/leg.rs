//! Flight leg type.
//!
//! A `FlightLeg` represents a single flight from takeoff to landing.
//! Legs are produced upstream (flight search, manual entry) and are
//! immutable once constructed.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use super::{DomainError, Iata};

/// An airport endpoint: code, city, and IANA timezone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    /// IATA code
    pub code: Iata,
    /// City the airport serves
    pub city: String,
    /// IANA timezone of the airport
    pub tz: Tz,
}

impl Airport {
    /// Creates an airport endpoint.
    pub fn new(code: Iata, city: impl Into<String>, tz: Tz) -> Self {
        Self {
            code,
            city: city.into(),
            tz,
        }
    }
}

/// A single flight from an origin airport to a destination airport.
///
/// Times are stored as UTC instants; each endpoint carries its IANA
/// timezone for local-clock computations.
///
/// # Invariants
///
/// - `arrival` is strictly after `departure`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightLeg {
    origin: Airport,
    destination: Airport,
    departure: DateTime<Utc>,
    arrival: DateTime<Utc>,
}

impl FlightLeg {
    /// Construct a leg, validating that it arrives after it departs.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `arrival <= departure`.
    pub fn new(
        origin: Airport,
        destination: Airport,
        departure: DateTime<Utc>,
        arrival: DateTime<Utc>,
    ) -> Result<Self, DomainError> {
        if arrival <= departure {
            return Err(DomainError::ArrivalNotAfterDeparture {
                origin: origin.code,
                destination: destination.code,
            });
        }

        Ok(FlightLeg {
            origin,
            destination,
            departure,
            arrival,
        })
    }

    /// Returns the origin airport.
    pub fn origin(&self) -> &Airport {
        &self.origin
    }

    /// Returns the destination airport.
    pub fn destination(&self) -> &Airport {
        &self.destination
    }

    /// Returns the origin IATA code.
    pub fn origin_code(&self) -> Iata {
        self.origin.code
    }

    /// Returns the destination IATA code.
    pub fn destination_code(&self) -> Iata {
        self.destination.code
    }

    /// Returns the departure instant (UTC).
    pub fn departure(&self) -> DateTime<Utc> {
        self.departure
    }

    /// Returns the arrival instant (UTC).
    pub fn arrival(&self) -> DateTime<Utc> {
        self.arrival
    }

    /// Returns the departure as a local time at the origin airport.
    pub fn departure_local(&self) -> DateTime<Tz> {
        self.departure.with_timezone(&self.origin.tz)
    }

    /// Returns the arrival as a local time at the destination airport.
    pub fn arrival_local(&self) -> DateTime<Tz> {
        self.arrival.with_timezone(&self.destination.tz)
    }

    /// Returns the flight duration.
    pub fn duration(&self) -> Duration {
        self.arrival - self.departure
    }

    /// Returns the flight duration in fractional hours.
    pub fn duration_hours(&self) -> f64 {
        (self.arrival - self.departure).num_seconds() as f64 / 3600.0
    }
}
