//! Itinerary grouping strategies.
//!
//! Two named strategies split a flat leg sequence into likely trips:
//!
//! - [`ConnectivityGrouping`] keeps adjacent legs together only when
//!   their transfer airports are ground-connected and the gap is short.
//!   Used by the connection validator when recommending a split.
//! - [`RecoveryBufferGrouping`] additionally fuses legs that fall
//!   inside the circadian recovery buffer even when they are not
//!   geographically connected. Used by the trip-bucket policy for
//!   post-hoc grouping suggestions.
//!
//! The two heuristics are deliberately different and must not be
//! unified; their callers depend on the distinction.

use crate::domain::FlightLeg;
use crate::geo::MetroGroups;
use crate::policy::RecoveryProtocol;

/// A strategy for splitting an ordered leg sequence into trip groups.
pub trait GroupingStrategy {
    /// Name of the strategy, for logs and diagnostics.
    fn name(&self) -> &'static str;

    /// Split legs into groups. Legs are sorted by departure first;
    /// groups preserve that order and together cover every leg.
    fn group(&self, legs: &[FlightLeg]) -> Vec<Vec<FlightLeg>>;
}

/// Gap between an adjacent pair in fractional hours.
fn gap_hours(curr: &FlightLeg, next: &FlightLeg) -> f64 {
    (next.departure() - curr.arrival()).num_seconds() as f64 / 3600.0
}

fn greedy_group<F>(legs: &[FlightLeg], same_trip: F) -> Vec<Vec<FlightLeg>>
where
    F: Fn(&FlightLeg, &FlightLeg) -> bool,
{
    if legs.is_empty() {
        return Vec::new();
    }

    let mut sorted = legs.to_vec();
    sorted.sort_by_key(|leg| leg.departure());

    let mut groups = Vec::new();
    let mut current = vec![sorted[0].clone()];

    for leg in sorted.into_iter().skip(1) {
        // Safe: current is never empty
        let prev = current.last().unwrap();
        if same_trip(prev, &leg) {
            current.push(leg);
        } else {
            groups.push(std::mem::replace(&mut current, vec![leg]));
        }
    }
    groups.push(current);

    groups
}

/// Connectivity-only grouping: adjacent legs share a trip iff their
/// transfer airports are the same airport or metro and the gap is
/// non-negative and under the window.
pub struct ConnectivityGrouping<'a> {
    metros: &'a MetroGroups,
    max_gap_hours: f64,
}

impl<'a> ConnectivityGrouping<'a> {
    /// Create a connectivity grouping with the given gap window.
    pub fn new(metros: &'a MetroGroups, max_gap_hours: f64) -> Self {
        Self {
            metros,
            max_gap_hours,
        }
    }
}

impl GroupingStrategy for ConnectivityGrouping<'_> {
    fn name(&self) -> &'static str {
        "connectivity"
    }

    fn group(&self, legs: &[FlightLeg]) -> Vec<Vec<FlightLeg>> {
        greedy_group(legs, |prev, leg| {
            let gap = gap_hours(prev, leg);
            self.metros
                .same_metro(prev.destination_code(), leg.origin_code())
                && (0.0..self.max_gap_hours).contains(&gap)
        })
    }
}

/// Connectivity-or-recovery-buffer grouping: adjacent legs share a trip
/// when connected with a short gap, or when the next departure falls
/// inside the recovery buffer regardless of geography (the traveler
/// won't have re-entrained, so the trips are one circadian event).
pub struct RecoveryBufferGrouping<'a> {
    metros: &'a MetroGroups,
    protocol: RecoveryProtocol,
    max_gap_hours: f64,
}

impl<'a> RecoveryBufferGrouping<'a> {
    /// Create a recovery-buffer grouping for the given protocol.
    pub fn new(metros: &'a MetroGroups, protocol: RecoveryProtocol) -> Self {
        Self {
            metros,
            protocol,
            max_gap_hours: 48.0,
        }
    }
}

impl GroupingStrategy for RecoveryBufferGrouping<'_> {
    fn name(&self) -> &'static str {
        "recovery_buffer"
    }

    fn group(&self, legs: &[FlightLeg]) -> Vec<Vec<FlightLeg>> {
        greedy_group(legs, |prev, leg| {
            let gap = gap_hours(prev, leg);
            let connected = self
                .metros
                .same_metro(prev.destination_code(), leg.origin_code())
                && (0.0..self.max_gap_hours).contains(&gap);

            let within_buffer = gap / 24.0 - (self.protocol.buffer_days() as f64) < 0.0;

            connected || within_buffer
        })
    }
}
