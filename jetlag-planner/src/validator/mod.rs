//! Connection validation for multi-leg itineraries.
//!
//! The validator is the gatekeeper in front of journey construction.
//! It checks every chronologically-adjacent pair of legs for physical
//! feasibility, grades each finding by severity, classifies the shape
//! of the itinerary, and recommends how the caller should proceed.
//! It never fails: every problem becomes a [`ValidationIssue`] and the
//! caller decides fatality from the overall validity.

mod config;

pub use config::ValidatorConfig;

#[cfg(test)]
mod validate_tests;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{FlightLeg, Iata};
use crate::geo::{
    AirportCoordinates, MetroGroups, default_airport_coordinates, default_metro_groups,
};
use crate::grouping::{ConnectivityGrouping, GroupingStrategy};

/// How serious a validation finding is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Physically impossible; prevents journey construction
    Block,
    /// Almost certainly a mistake, but overridable
    Error,
    /// Unusual; worth confirming
    Warning,
    /// Informational classification
    Info,
}

/// What aspect of the itinerary an issue concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// Timing problems (negative gaps, odd layovers)
    Time,
    /// Ground-transfer feasibility between different cities
    Geography,
    /// Connection-time logistics at or between airports
    Logistics,
    /// Legs that likely belong to separate trips
    Separation,
}

/// A single graded finding about an adjacent pair of legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Severity grade
    pub severity: Severity,
    /// Issue category
    pub category: IssueCategory,
    /// Human-readable description
    pub message: String,
    /// What the traveler should do about it
    pub suggestion: String,
    /// Index of the earlier affected leg (departure order)
    pub first_leg: usize,
    /// Index of the later affected leg
    pub second_leg: usize,
    /// Gap between the legs in fractional hours
    pub gap_hours: f64,
}

/// Recognized unusual itinerary shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeCaseKind {
    /// Short positioning hop feeding a long-haul from the same area
    Positioning,
    /// Itinerary flown for mileage accrual rather than travel
    MileageRun,
    /// Deliberate multi-city trip with multi-day stops
    MultiCity,
    /// Surface sector between arrival and next departure
    OpenJaw,
    /// Nothing unusual
    Normal,
}

/// Classification of the whole itinerary's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeCaseDetection {
    /// Detected shape
    pub kind: EdgeCaseKind,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Why this shape was detected
    pub explanation: String,
}

/// Overall verdict on the leg sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Validity {
    /// Safe to build a single journey
    Valid,
    /// Needs user confirmation before proceeding
    NeedsConfirmation,
    /// Contains a hard error; cannot proceed as-is
    Invalid,
}

/// What the caller should do with the legs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendedAction {
    /// Build one journey from all legs
    SingleJourney,
    /// Split into the suggested groups, one journey each
    SplitTrips,
    /// Fix the blocking errors first
    FixErrors,
    /// Ask the user to confirm the unusual itinerary
    ConfirmUnusual,
}

/// Complete validator output for a leg sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightValidationResult {
    /// Overall verdict
    pub validity: Validity,
    /// Itinerary-shape classification
    pub edge_case: EdgeCaseDetection,
    /// Findings in leg order
    pub issues: Vec<ValidationIssue>,
    /// Recommended next step
    pub recommended_action: RecommendedAction,
    /// Trip groups, present when the recommendation is to split
    pub suggested_groups: Option<Vec<Vec<FlightLeg>>>,
}

impl FlightValidationResult {
    /// Returns true if any issue has the given severity.
    pub fn has_severity(&self, severity: Severity) -> bool {
        self.issues.iter().any(|i| i.severity == severity)
    }

    /// Returns true if any issue has the given category.
    pub fn has_category(&self, category: IssueCategory) -> bool {
        self.issues.iter().any(|i| i.category == category)
    }
}

/// How two adjacent legs relate geographically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairRelation {
    SameAirport,
    SameMetro,
    DifferentCity,
}

/// Pairwise feasibility checker for ordered leg sequences.
pub struct ConnectionValidator {
    metros: MetroGroups,
    coords: AirportCoordinates,
    config: ValidatorConfig,
}

impl Default for ConnectionValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl ConnectionValidator {
    /// Create a validator with the default reference tables and config.
    pub fn new() -> Self {
        Self {
            metros: default_metro_groups(),
            coords: default_airport_coordinates(),
            config: ValidatorConfig::default(),
        }
    }

    /// Create a validator with explicit tables and configuration.
    pub fn with_tables(
        metros: MetroGroups,
        coords: AirportCoordinates,
        config: ValidatorConfig,
    ) -> Self {
        Self {
            metros,
            coords,
            config,
        }
    }

    /// Returns the metro groupings in use.
    pub fn metros(&self) -> &MetroGroups {
        &self.metros
    }

    /// Validate an ordered leg sequence.
    ///
    /// Legs are sorted by departure before checking; issue indices refer
    /// to the sorted order. Never fails: every problem is reported as a
    /// graded issue and summarized in the verdict.
    ///
    /// Decision precedence: a detected separation (legs that likely
    /// belong to separate trips) recommends splitting even when an
    /// unrelated blocking error exists elsewhere in the itinerary; only
    /// then do blocking errors make the result invalid, and only then do
    /// errors or warnings ask for confirmation.
    pub fn validate(&self, legs: &[FlightLeg]) -> FlightValidationResult {
        if legs.is_empty() {
            return FlightValidationResult {
                validity: Validity::Invalid,
                edge_case: normal_edge_case("No legs to validate"),
                issues: Vec::new(),
                recommended_action: RecommendedAction::FixErrors,
                suggested_groups: None,
            };
        }

        let mut sorted = legs.to_vec();
        sorted.sort_by_key(|leg| leg.departure());

        if sorted.len() == 1 {
            return FlightValidationResult {
                validity: Validity::Valid,
                edge_case: normal_edge_case("Single leg"),
                issues: Vec::new(),
                recommended_action: RecommendedAction::SingleJourney,
                suggested_groups: None,
            };
        }

        let mut issues = Vec::new();
        for i in 0..sorted.len() - 1 {
            self.check_pair(&sorted, i, &mut issues);
        }

        let edge_case = self.classify_edge_case(&sorted);

        let has_separation = issues
            .iter()
            .any(|i| i.category == IssueCategory::Separation);
        let has_block = issues.iter().any(|i| i.severity == Severity::Block);
        let has_error_or_warning = issues
            .iter()
            .any(|i| matches!(i.severity, Severity::Error | Severity::Warning));

        // Separation wins over everything, including blocking errors
        // elsewhere in the itinerary: once legs look like separate
        // trips, the right fix is to split, then re-validate each part.
        let (validity, recommended_action, suggested_groups) = if has_separation {
            (
                Validity::NeedsConfirmation,
                RecommendedAction::SplitTrips,
                Some(self.detect_trip_groups(&sorted)),
            )
        } else if has_block {
            (Validity::Invalid, RecommendedAction::FixErrors, None)
        } else if has_error_or_warning {
            (
                Validity::NeedsConfirmation,
                RecommendedAction::ConfirmUnusual,
                None,
            )
        } else {
            (Validity::Valid, RecommendedAction::SingleJourney, None)
        };

        debug!(
            legs = sorted.len(),
            issues = issues.len(),
            ?validity,
            ?recommended_action,
            "validated leg sequence"
        );

        FlightValidationResult {
            validity,
            edge_case,
            issues,
            recommended_action,
            suggested_groups,
        }
    }

    /// Group legs into likely trips by connectivity alone.
    ///
    /// Greedy scan: two adjacent legs stay in the same group iff their
    /// transfer airports are the same airport or same metro and the gap
    /// is within the grouping window. This is intentionally different
    /// from the bucket policy's recovery-buffer grouping, which also
    /// fuses disconnected legs that fall inside the recovery buffer.
    pub fn detect_trip_groups(&self, legs: &[FlightLeg]) -> Vec<Vec<FlightLeg>> {
        ConnectivityGrouping::new(&self.metros, self.config.group_max_gap_hours).group(legs)
    }

    fn relation(&self, arrival: Iata, departure: Iata) -> PairRelation {
        if arrival == departure {
            PairRelation::SameAirport
        } else if self.metros.same_metro(arrival, departure) {
            PairRelation::SameMetro
        } else {
            PairRelation::DifferentCity
        }
    }

    fn check_pair(&self, legs: &[FlightLeg], i: usize, issues: &mut Vec<ValidationIssue>) {
        let curr = &legs[i];
        let next = &legs[i + 1];
        let gap_hours =
            (next.departure() - curr.arrival()).num_seconds() as f64 / 3600.0;

        let mut push = |severity, category, message: String, suggestion: String| {
            issues.push(ValidationIssue {
                severity,
                category,
                message,
                suggestion,
                first_leg: i,
                second_leg: i + 1,
                gap_hours,
            });
        };

        if gap_hours < 0.0 {
            push(
                Severity::Block,
                IssueCategory::Time,
                format!(
                    "Flight {}-{} departs {:.1}h before the previous flight arrives",
                    next.origin_code(),
                    next.destination_code(),
                    -gap_hours
                ),
                "Check the dates and times of both flights".to_string(),
            );
            // No point grading an impossible connection further
            return;
        }

        let arrival = curr.destination_code();
        let departure = next.origin_code();

        match self.relation(arrival, departure) {
            PairRelation::DifferentCity => {
                let distance = self.coords.distance_miles_or_default(arrival, departure);
                let needed = self.config.min_ground_travel_hours(distance);

                if gap_hours < needed {
                    push(
                        Severity::Block,
                        IssueCategory::Geography,
                        format!(
                            "Only {gap_hours:.1}h to travel roughly {distance:.0} miles \
                             from {arrival} to {departure}"
                        ),
                        format!(
                            "Allow at least {needed:.1}h for ground transfer, \
                             or treat these as separate trips"
                        ),
                    );
                } else if gap_hours >= self.config.separation_gap_hours {
                    push(
                        Severity::Info,
                        IssueCategory::Separation,
                        format!(
                            "Flights at {arrival} and {departure} don't connect; \
                             these are likely separate trips"
                        ),
                        "Split the itinerary into separate trips".to_string(),
                    );
                }
            }
            PairRelation::SameAirport => {
                let (min_hours, typical_hours) = self.config.same_airport_mct_hours();

                if gap_hours < min_hours {
                    push(
                        Severity::Error,
                        IssueCategory::Logistics,
                        format!(
                            "{gap_hours:.1}h connection at {arrival} is under the \
                             {min_hours:.1}h minimum connection time"
                        ),
                        format!("Allow at least {typical_hours:.1}h at {arrival}"),
                    );
                } else if gap_hours >= self.config.split_stay_hours() {
                    push(
                        Severity::Info,
                        IssueCategory::Separation,
                        format!(
                            "{:.0}-day stay at {arrival}; this looks like an \
                             outbound/return split",
                            gap_hours / 24.0
                        ),
                        "Split the itinerary into separate trips".to_string(),
                    );
                } else if gap_hours >= self.config.long_layover_warning_hours {
                    push(
                        Severity::Warning,
                        IssueCategory::Time,
                        format!(
                            "Unusually long {:.0}h layover at {arrival}",
                            gap_hours
                        ),
                        "Confirm this long layover is intentional".to_string(),
                    );
                }
            }
            PairRelation::SameMetro => {
                let distance = self.coords.distance_miles(arrival, departure);
                let (min_hours, typical_hours) = self.config.metro_mct_hours(distance);

                if gap_hours < min_hours {
                    push(
                        Severity::Error,
                        IssueCategory::Logistics,
                        format!(
                            "{gap_hours:.1}h is too tight for a cross-town transfer \
                             from {arrival} to {departure}"
                        ),
                        format!(
                            "Allow at least {typical_hours:.1}h to change airports \
                             within the metro area"
                        ),
                    );
                }
            }
        }
    }

    fn classify_edge_case(&self, legs: &[FlightLeg]) -> EdgeCaseDetection {
        // Positioning: a short hop feeding a long-haul from the same area
        if legs.len() == 2
            && legs[0].duration_hours() < 3.0
            && legs[1].duration_hours() > 8.0
            && self
                .metros
                .same_metro(legs[0].destination_code(), legs[1].origin_code())
        {
            return EdgeCaseDetection {
                kind: EdgeCaseKind::Positioning,
                confidence: 0.75,
                explanation: format!(
                    "Short {}-{} hop followed by a long-haul from the same area \
                     looks like a positioning flight",
                    legs[0].origin_code(),
                    legs[0].destination_code()
                ),
            };
        }

        // Multi-city: at least two stops of 2-14 days each
        let multi_day_stops = legs
            .windows(2)
            .filter(|pair| {
                let gap_days = (pair[1].departure() - pair[0].arrival()).num_seconds() as f64
                    / 86_400.0;
                (2.0..14.0).contains(&gap_days)
            })
            .count();
        if multi_day_stops >= 2 {
            return EdgeCaseDetection {
                kind: EdgeCaseKind::MultiCity,
                confidence: 0.85,
                explanation: format!(
                    "{multi_day_stops} stops of several days each suggest a \
                     deliberate multi-city trip"
                ),
            };
        }

        // Open jaw: a surface sector somewhere in the itinerary
        let open_jaw = legs.windows(2).any(|pair| {
            pair[0].destination_code() != pair[1].origin_code()
                && !self
                    .metros
                    .same_metro(pair[0].destination_code(), pair[1].origin_code())
        });
        if open_jaw {
            return EdgeCaseDetection {
                kind: EdgeCaseKind::OpenJaw,
                confidence: 0.8,
                explanation: "Arrival and next departure are in different cities; \
                              the itinerary has a surface sector"
                    .to_string(),
            };
        }

        normal_edge_case("Itinerary shape is ordinary")
    }
}

fn normal_edge_case(explanation: &str) -> EdgeCaseDetection {
    EdgeCaseDetection {
        kind: EdgeCaseKind::Normal,
        confidence: 1.0,
        explanation: explanation.to_string(),
    }
}
