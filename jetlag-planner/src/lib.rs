//! Jet-lag recovery planning core.
//!
//! A library that answers: "these are my flights, when and where
//! should I sleep to arrive functional?"
//!
//! Raw legs flow through the [`validator`] gatekeeper, get built into
//! journeys by [`itinerary`] (directly, or split into several), and
//! each journey is turned into a per-stop adaptation timeline plus a
//! recovery plan by the [`planner`]. Independently, [`policy`] reasons
//! over whole trips: merging, tier limits, and conflict detection.

pub mod circadian;
pub mod domain;
pub mod geo;
pub mod grouping;
pub mod itinerary;
pub mod planner;
pub mod policy;
pub mod validator;
