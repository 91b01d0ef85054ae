//! Domain types for the jet-lag itinerary planner.
//!
//! This module contains the core domain model types that represent
//! validated itinerary data. All types enforce their invariants at
//! construction time, so code that receives these types can trust
//! their validity.

mod airport;
mod error;
mod journey;
mod layover;
mod leg;

pub use airport::{Iata, InvalidIata};
pub use error::DomainError;
pub use journey::{
    Adaptability, ExerciseFrequency, MultiLegJourney, SleepQuality, TravelerProfile,
};
pub use layover::Layover;
pub use leg::{Airport, FlightLeg};
