//! Trip bucket policy.
//!
//! Decision rules over [`TripBucket`]s: when two trips should be merged
//! into one recovery plan, whether a tier allows another active bucket,
//! which scheduled trips conflict circadian-wise, and how hard a trip
//! will hit the traveler.
//!
//! The merge ladder is ordered; the first matching rule wins and later
//! rules are not consulted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::circadian::Direction;
use crate::domain::FlightLeg;
use crate::geo::{MetroGroups, default_metro_groups};
use crate::grouping::{GroupingStrategy, RecoveryBufferGrouping};

mod bucket;

pub use bucket::{BucketStatus, TripBucket};

/// How aggressively a traveler works to re-entrain after a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryProtocol {
    /// Light exposure, melatonin timing, strict sleep scheduling.
    #[default]
    Aggressive,
    /// Natural adjustment at the body's own pace.
    Conservative,
}

impl RecoveryProtocol {
    /// Minimum days of recovery before the traveler is usable again.
    pub fn min_recovery_days(self) -> u32 {
        match self {
            RecoveryProtocol::Aggressive => 3,
            RecoveryProtocol::Conservative => 8,
        }
    }

    /// Days of buffer after a trip before the next one is circadian-safe.
    pub fn buffer_days(self) -> u32 {
        match self {
            RecoveryProtocol::Aggressive => 7,
            RecoveryProtocol::Conservative => 14,
        }
    }
}

/// Subscription tier governing bucket limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    #[default]
    Free,
    Pro,
    Business,
}

/// Per-tier limits on bucket usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierLimits {
    /// Maximum buckets in a non-completed state at once.
    pub max_active_buckets: usize,
    /// Maximum flights in a single bucket.
    pub max_legs_per_bucket: usize,
}

impl SubscriptionTier {
    /// Limits for this tier.
    pub fn limits(self) -> TierLimits {
        match self {
            SubscriptionTier::Free => TierLimits {
                max_active_buckets: 1,
                max_legs_per_bucket: 4,
            },
            SubscriptionTier::Pro | SubscriptionTier::Business => TierLimits {
                max_active_buckets: 5,
                max_legs_per_bucket: 10,
            },
        }
    }
}

/// How sure a merge decision is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
}

/// Outcome of asking whether two trips belong in one bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeDecision {
    pub should_merge: bool,
    pub confidence: Confidence,
    pub reason: String,
}

/// Outcome of asking whether a tier admits another active bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketAdmission {
    pub allowed: bool,
    pub active_count: usize,
    pub max_active: usize,
    /// Set when the request was refused.
    pub reason: Option<String>,
}

/// What kind of circadian conflict two scheduled trips have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    /// The second trip departs before recovery from the first completes.
    InsufficientRecovery,
    /// Back-to-back large shifts with no time to re-entrain between.
    TimezoneAccumulation,
    /// The second trip departs before the first one lands.
    OverlappingDates,
}

/// How serious a conflict is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictSeverity {
    High,
    Medium,
}

/// What the traveler should do about a conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictAction {
    /// Plan both trips as one circadian event.
    Merge,
    /// Move one trip to restore the recovery buffer.
    Separate,
    /// Keep both but add recovery days between them.
    AddBuffer,
}

/// A circadian conflict between two scheduled trips.
///
/// Indices refer to the caller's slice, not chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripConflict {
    pub first_trip: usize,
    pub second_trip: usize,
    pub kind: ConflictKind,
    pub severity: ConflictSeverity,
    /// Days from first-trip recovery (or arrival, for overlaps) to the
    /// second departure. Negative means overlap.
    pub days_between: f64,
    pub recommended_action: ConflictAction,
}

/// Policy engine over trip buckets.
///
/// Holds the metro table used for grouping suggestions; the decision
/// rules themselves are table-free.
pub struct TripBucketPolicy {
    metros: MetroGroups,
}

impl Default for TripBucketPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl TripBucketPolicy {
    /// Policy with the built-in metro table.
    pub fn new() -> Self {
        Self {
            metros: default_metro_groups(),
        }
    }

    /// Policy with a caller-supplied metro table.
    pub fn with_metros(metros: MetroGroups) -> Self {
        Self { metros }
    }

    /// Decide whether `second` should be merged into `first`'s bucket.
    ///
    /// Rules, first match wins:
    ///
    /// 1. `second` is the return flight of `first`: merge.
    /// 2. `second` departs inside the recovery buffer: merge.
    /// 3. Gap within half a buffer past the buffer: keep separate, but
    ///    flag the call as borderline.
    /// 4. Gap under three days into a city continuing from `first`'s
    ///    endpoint: merge. Only reachable if a protocol ever sets its
    ///    buffer below three days.
    /// 5. Otherwise keep separate.
    pub fn should_merge_trips(
        &self,
        first: &TripBucket,
        second: &TripBucket,
        protocol: RecoveryProtocol,
    ) -> MergeDecision {
        if is_return_trip(first, second) {
            return MergeDecision {
                should_merge: true,
                confidence: Confidence::High,
                reason: "Return flight of the same trip".to_string(),
            };
        }

        let gap_days = days_between(second.departure(), first.recovery_complete_or_arrival());
        let buffer = protocol.buffer_days() as f64;

        debug!(
            gap_days,
            buffer,
            first = first.name(),
            second = second.name(),
            "evaluating merge"
        );

        if gap_days < buffer {
            return MergeDecision {
                should_merge: true,
                confidence: Confidence::High,
                reason: format!(
                    "Next trip starts {gap_days:.1} days after recovery begins, \
                     inside the {buffer:.0}-day recovery buffer"
                ),
            };
        }

        if gap_days < buffer * 1.5 {
            return MergeDecision {
                should_merge: false,
                confidence: Confidence::Medium,
                reason: format!(
                    "Gap of {gap_days:.1} days is just past the {buffer:.0}-day \
                     buffer; borderline call"
                ),
            };
        }

        if gap_days < 3.0 && second.first_origin() == first.final_destination() {
            return MergeDecision {
                should_merge: true,
                confidence: Confidence::High,
                reason: "Continuation of a multi-city trip".to_string(),
            };
        }

        MergeDecision {
            should_merge: false,
            confidence: Confidence::High,
            reason: format!("Full recovery possible in the {gap_days:.1}-day gap"),
        }
    }

    /// Decide whether `tier` admits another active bucket given the
    /// current active count.
    pub fn can_create_bucket(&self, active_count: usize, tier: SubscriptionTier) -> BucketAdmission {
        let max_active = tier.limits().max_active_buckets;

        if active_count < max_active {
            BucketAdmission {
                allowed: true,
                active_count,
                max_active,
                reason: None,
            }
        } else {
            BucketAdmission {
                allowed: false,
                active_count,
                max_active,
                reason: Some(format!(
                    "Tier allows {max_active} active trip(s); \
                     {active_count} already active"
                )),
            }
        }
    }

    /// Scan scheduled trips for circadian conflicts between adjacent
    /// pairs in chronological order.
    ///
    /// The earlier trip's protocol governs each pair. A pair can raise
    /// more than one conflict.
    pub fn detect_trip_conflicts(&self, trips: &[TripBucket]) -> Vec<TripConflict> {
        let mut order: Vec<usize> = (0..trips.len()).collect();
        order.sort_by_key(|&i| trips[i].departure());

        let mut conflicts = Vec::new();

        for pair in order.windows(2) {
            let (i, j) = (pair[0], pair[1]);
            let (a, b) = (&trips[i], &trips[j]);
            let protocol = a.protocol();

            let overlap_gap = days_between(b.departure(), a.arrival());
            if overlap_gap < 0.0 {
                conflicts.push(TripConflict {
                    first_trip: i,
                    second_trip: j,
                    kind: ConflictKind::OverlappingDates,
                    severity: ConflictSeverity::High,
                    days_between: overlap_gap,
                    recommended_action: ConflictAction::Separate,
                });
            }

            let recovery_gap = days_between(b.departure(), a.recovery_complete_or_arrival());
            let buffer = protocol.buffer_days() as f64;

            if recovery_gap < buffer {
                let severity = if recovery_gap < protocol.min_recovery_days() as f64 {
                    ConflictSeverity::High
                } else {
                    ConflictSeverity::Medium
                };
                conflicts.push(TripConflict {
                    first_trip: i,
                    second_trip: j,
                    kind: ConflictKind::InsufficientRecovery,
                    severity,
                    days_between: recovery_gap,
                    recommended_action: ConflictAction::Merge,
                });
            }

            let combined_shift = a.endpoint_shift().hours + b.endpoint_shift().hours;
            if combined_shift > 12.0 && recovery_gap < buffer {
                conflicts.push(TripConflict {
                    first_trip: i,
                    second_trip: j,
                    kind: ConflictKind::TimezoneAccumulation,
                    severity: ConflictSeverity::High,
                    days_between: recovery_gap,
                    recommended_action: ConflictAction::Merge,
                });
            }
        }

        conflicts
    }

    /// Suggest how a flat flight list should be grouped into buckets,
    /// fusing legs that fall inside the protocol's recovery buffer.
    pub fn suggest_trip_groups(
        &self,
        flights: &[FlightLeg],
        protocol: RecoveryProtocol,
    ) -> Vec<Vec<FlightLeg>> {
        RecoveryBufferGrouping::new(&self.metros, protocol).group(flights)
    }
}

/// Signed days from `earlier` to `later`.
fn days_between(later: DateTime<Utc>, earlier: DateTime<Utc>) -> f64 {
    (later - earlier).num_seconds() as f64 / 86_400.0
}

/// True when `second` flies the reverse of `first`'s endpoints.
pub fn is_return_trip(first: &TripBucket, second: &TripBucket) -> bool {
    second.first_origin() == first.final_destination()
        && second.final_destination() == first.first_origin()
}

/// Difficulty score in [0, 10] for a trip.
///
/// Endpoint shift dominates (12h maps to the full base of 10), eastward
/// travel is weighted 1.2x, and each extra leg adds half a point up to
/// two.
pub fn jetlag_difficulty(shift_hours: f64, direction: Direction, leg_count: usize) -> f64 {
    let base = (shift_hours / 12.0).min(1.0) * 10.0;
    let directional = if direction == Direction::East {
        base * 1.2
    } else {
        base
    };
    let complexity = (leg_count.saturating_sub(1) as f64 * 0.5).min(2.0);

    (directional + complexity).min(10.0)
}
