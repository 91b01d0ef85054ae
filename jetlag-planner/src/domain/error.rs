//! Domain error types.
//!
//! These errors represent validation failures in the domain layer.
//! The connection validator never produces these; it reports problems
//! as graded `ValidationIssue`s instead. Construction of legs, journeys,
//! and trip buckets is where hard invariants are enforced.

use super::Iata;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DomainError {
    /// A flight leg arrives at or before its own departure
    #[error("leg {origin}-{destination} arrives at or before it departs")]
    ArrivalNotAfterDeparture {
        /// Origin airport of the offending leg
        origin: Iata,
        /// Destination airport of the offending leg
        destination: Iata,
    },

    /// A derived layover would have negative duration
    #[error("layover at {0} would have negative duration")]
    NegativeLayover(Iata),

    /// Journey has no legs
    #[error("journey must have at least one leg")]
    EmptyJourney,

    /// Trip bucket has no legs
    #[error("trip bucket must contain at least one flight")]
    EmptyBucket,

    /// Trip bucket exceeds the tier's flight-count cap
    #[error("trip bucket holds {count} flights but the tier allows at most {max}")]
    TooManyFlights {
        /// Number of flights in the rejected bucket
        count: usize,
        /// Maximum flights the tier allows per bucket
        max: usize,
    },
}
