use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::domain::{Airport, FlightLeg, Iata};

use super::*;

fn iata(s: &str) -> Iata {
    Iata::parse(s).unwrap()
}

fn utc(d: u32, h: u32, m: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, d, h, m, 0).unwrap()
}

fn airport(code: &str, tz: Tz) -> Airport {
    Airport::new(iata(code), code.to_string(), tz)
}

fn leg(from: &str, to: &str, dep: DateTime<Utc>, arr: DateTime<Utc>) -> FlightLeg {
    let tz_of = |code: &str| match code {
        "JFK" | "EWR" | "BOS" => chrono_tz::America::New_York,
        "LAX" => chrono_tz::America::Los_Angeles,
        "LHR" | "LGW" => chrono_tz::Europe::London,
        "CDG" => chrono_tz::Europe::Paris,
        "FRA" => chrono_tz::Europe::Berlin,
        "NRT" => chrono_tz::Asia::Tokyo,
        _ => chrono_tz::UTC,
    };
    FlightLeg::new(
        airport(from, tz_of(from)),
        airport(to, tz_of(to)),
        dep,
        arr,
    )
    .unwrap()
}

fn jfk_lhr() -> FlightLeg {
    leg("JFK", "LHR", utc(1, 2, 0), utc(1, 9, 0))
}

#[test]
fn empty_sequence_is_invalid() {
    let result = ConnectionValidator::new().validate(&[]);

    assert_eq!(result.validity, Validity::Invalid);
    assert_eq!(result.recommended_action, RecommendedAction::FixErrors);
    assert!(result.issues.is_empty());
    assert!(result.suggested_groups.is_none());
}

#[test]
fn single_leg_is_valid() {
    let result = ConnectionValidator::new().validate(&[jfk_lhr()]);

    assert_eq!(result.validity, Validity::Valid);
    assert_eq!(result.recommended_action, RecommendedAction::SingleJourney);
    assert_eq!(result.edge_case.kind, EdgeCaseKind::Normal);
    assert!(result.issues.is_empty());
}

#[test]
fn comfortable_connection_is_valid() {
    // 2h at LHR, at the typical MCT
    let result = ConnectionValidator::new().validate(&[
        jfk_lhr(),
        leg("LHR", "CDG", utc(1, 11, 0), utc(1, 12, 0)),
    ]);

    assert_eq!(result.validity, Validity::Valid);
    assert_eq!(result.recommended_action, RecommendedAction::SingleJourney);
    assert!(result.issues.is_empty());
}

#[test]
fn negative_gap_blocks() {
    // Second flight departs an hour before the first lands
    let result = ConnectionValidator::new().validate(&[
        jfk_lhr(),
        leg("LHR", "CDG", utc(1, 8, 0), utc(1, 10, 0)),
    ]);

    assert_eq!(result.validity, Validity::Invalid);
    assert_eq!(result.recommended_action, RecommendedAction::FixErrors);
    assert_eq!(result.issues.len(), 1);

    let issue = &result.issues[0];
    assert_eq!(issue.severity, Severity::Block);
    assert_eq!(issue.category, IssueCategory::Time);
    assert_eq!((issue.first_leg, issue.second_leg), (0, 1));
    assert!((issue.gap_hours - (-1.0)).abs() < 1e-9);
}

#[test]
fn issue_indices_follow_departure_order() {
    // Same itinerary passed in reverse; indices must refer to the
    // sorted sequence
    let result = ConnectionValidator::new().validate(&[
        leg("LHR", "CDG", utc(1, 8, 0), utc(1, 10, 0)),
        jfk_lhr(),
    ]);

    assert_eq!(result.issues.len(), 1);
    assert_eq!(
        (result.issues[0].first_leg, result.issues[0].second_leg),
        (0, 1)
    );
    assert_eq!(result.issues[0].severity, Severity::Block);
}

#[test]
fn tight_same_airport_connection_is_an_error() {
    // 30 minutes at LHR
    let result = ConnectionValidator::new().validate(&[
        jfk_lhr(),
        leg("LHR", "CDG", utc(1, 9, 30), utc(1, 10, 30)),
    ]);

    assert_eq!(result.validity, Validity::NeedsConfirmation);
    assert_eq!(result.recommended_action, RecommendedAction::ConfirmUnusual);
    assert!(result.has_severity(Severity::Error));
    assert!(result.has_category(IssueCategory::Logistics));
}

#[test]
fn long_layover_warns() {
    // 30h at LHR: over the warning threshold, under the split threshold
    let result = ConnectionValidator::new().validate(&[
        jfk_lhr(),
        leg("LHR", "CDG", utc(2, 15, 0), utc(2, 16, 0)),
    ]);

    assert_eq!(result.validity, Validity::NeedsConfirmation);
    assert_eq!(result.recommended_action, RecommendedAction::ConfirmUnusual);
    assert!(result.has_severity(Severity::Warning));
    assert!(result.has_category(IssueCategory::Time));
}

#[test]
fn week_long_stay_suggests_split() {
    // 8 days at LHR: outbound/return shape
    let result = ConnectionValidator::new().validate(&[
        jfk_lhr(),
        leg("LHR", "JFK", utc(9, 10, 0), utc(9, 18, 0)),
    ]);

    assert_eq!(result.validity, Validity::NeedsConfirmation);
    assert_eq!(result.recommended_action, RecommendedAction::SplitTrips);
    assert!(result.has_severity(Severity::Info));
    assert!(result.has_category(IssueCategory::Separation));

    let groups = result.suggested_groups.expect("split must carry groups");
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 1);
    assert_eq!(groups[1].len(), 1);
}

#[test]
fn disconnected_cities_with_days_between_suggest_split() {
    // Arrive LHR, depart CDG three days later: two separate trips
    let result = ConnectionValidator::new().validate(&[
        jfk_lhr(),
        leg("CDG", "JFK", utc(4, 10, 0), utc(4, 18, 0)),
    ]);

    assert_eq!(result.validity, Validity::NeedsConfirmation);
    assert_eq!(result.recommended_action, RecommendedAction::SplitTrips);
    assert!(result.has_category(IssueCategory::Separation));
    assert_eq!(result.edge_case.kind, EdgeCaseKind::OpenJaw);

    let groups = result.suggested_groups.expect("split must carry groups");
    assert_eq!(groups.len(), 2);
}

#[test]
fn infeasible_ground_transfer_blocks() {
    // 2h to get from LHR to CDG overland (~200+ miles)
    let result = ConnectionValidator::new().validate(&[
        jfk_lhr(),
        leg("CDG", "JFK", utc(1, 11, 0), utc(1, 19, 0)),
    ]);

    assert_eq!(result.validity, Validity::Invalid);
    assert_eq!(result.recommended_action, RecommendedAction::FixErrors);
    assert!(result.has_severity(Severity::Block));
    assert!(result.has_category(IssueCategory::Geography));
}

#[test]
fn feasible_surface_sector_passes() {
    // 10h from LHR to CDG: enough for the train, under the separation
    // threshold, so no issue at all
    let result = ConnectionValidator::new().validate(&[
        jfk_lhr(),
        leg("CDG", "JFK", utc(1, 19, 0), utc(2, 3, 0)),
    ]);

    assert_eq!(result.validity, Validity::Valid);
    assert_eq!(result.recommended_action, RecommendedAction::SingleJourney);
    assert!(result.issues.is_empty());
    assert_eq!(result.edge_case.kind, EdgeCaseKind::OpenJaw);
}

#[test]
fn unknown_airports_get_the_conservative_distance() {
    // Neither code is in the coordinate table; the assumed distance
    // makes a 10h ground transfer infeasible
    let result = ConnectionValidator::new().validate(&[
        leg("QQQ", "XXX", utc(1, 2, 0), utc(1, 9, 0)),
        leg("YYY", "QQQ", utc(1, 19, 0), utc(2, 3, 0)),
    ]);

    assert_eq!(result.validity, Validity::Invalid);
    assert!(result.has_category(IssueCategory::Geography));
}

#[test]
fn tight_metro_transfer_is_an_error() {
    // Arrive JFK, depart EWR 1h later: cross-town transfer needs hours
    let result = ConnectionValidator::new().validate(&[
        leg("BOS", "JFK", utc(1, 8, 0), utc(1, 9, 0)),
        leg("EWR", "LHR", utc(1, 10, 0), utc(1, 17, 0)),
    ]);

    assert_eq!(result.validity, Validity::NeedsConfirmation);
    assert_eq!(result.recommended_action, RecommendedAction::ConfirmUnusual);
    assert!(result.has_severity(Severity::Error));
    assert!(result.has_category(IssueCategory::Logistics));
}

#[test]
fn roomy_metro_transfer_passes() {
    // 6h to get from JFK to EWR
    let result = ConnectionValidator::new().validate(&[
        leg("BOS", "JFK", utc(1, 8, 0), utc(1, 9, 0)),
        leg("EWR", "LHR", utc(1, 15, 0), utc(1, 22, 0)),
    ]);

    assert_eq!(result.validity, Validity::Valid);
    assert!(result.issues.is_empty());
}

#[test]
fn separation_wins_over_blocking_errors_elsewhere() {
    // One impossible connection plus a clear trip boundary: the split
    // recommendation takes precedence so each part can be re-validated
    let result = ConnectionValidator::new().validate(&[
        jfk_lhr(),
        // Departs before the previous flight lands
        leg("LHR", "FRA", utc(1, 8, 0), utc(1, 10, 0)),
        // Days later from a different city
        leg("CDG", "JFK", utc(5, 10, 0), utc(5, 18, 0)),
    ]);

    assert!(result.has_severity(Severity::Block));
    assert!(result.has_category(IssueCategory::Separation));
    assert_eq!(result.validity, Validity::NeedsConfirmation);
    assert_eq!(result.recommended_action, RecommendedAction::SplitTrips);
    assert!(result.suggested_groups.is_some());
}

#[test]
fn positioning_flight_detected() {
    // Short hop into JFK feeding a long-haul out of JFK
    let result = ConnectionValidator::new().validate(&[
        leg("BOS", "JFK", utc(1, 8, 0), utc(1, 9, 12)),
        leg("JFK", "NRT", utc(1, 12, 0), utc(2, 2, 0)),
    ]);

    assert_eq!(result.edge_case.kind, EdgeCaseKind::Positioning);
    assert!((result.edge_case.confidence - 0.75).abs() < 1e-9);
    assert_eq!(result.validity, Validity::Valid);
}

#[test]
fn multi_city_trip_detected() {
    // Two stops of three days each
    let result = ConnectionValidator::new().validate(&[
        jfk_lhr(),
        leg("LHR", "CDG", utc(4, 10, 0), utc(4, 11, 0)),
        leg("CDG", "JFK", utc(7, 12, 0), utc(7, 20, 0)),
    ]);

    assert_eq!(result.edge_case.kind, EdgeCaseKind::MultiCity);
    assert!((result.edge_case.confidence - 0.85).abs() < 1e-9);
    // The multi-day stays still warrant confirmation
    assert_eq!(result.validity, Validity::NeedsConfirmation);
}

#[test]
fn ordinary_itinerary_classified_normal() {
    let result = ConnectionValidator::new().validate(&[
        jfk_lhr(),
        leg("LHR", "CDG", utc(1, 12, 0), utc(1, 13, 0)),
    ]);

    assert_eq!(result.edge_case.kind, EdgeCaseKind::Normal);
    assert!((result.edge_case.confidence - 1.0).abs() < 1e-9);
}

#[test]
fn validation_is_idempotent() {
    let validator = ConnectionValidator::new();
    let legs = [
        jfk_lhr(),
        leg("CDG", "JFK", utc(4, 10, 0), utc(4, 18, 0)),
    ];

    assert_eq!(validator.validate(&legs), validator.validate(&legs));
}

#[test]
fn detect_trip_groups_covers_all_legs() {
    let validator = ConnectionValidator::new();
    let legs = [
        jfk_lhr(),
        leg("LHR", "CDG", utc(1, 12, 0), utc(1, 13, 0)),
        leg("CDG", "JFK", utc(9, 10, 0), utc(9, 18, 0)),
    ];

    let groups = validator.detect_trip_groups(&legs);
    let total: usize = groups.iter().map(|g| g.len()).sum();
    assert_eq!(total, legs.len());
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].len(), 2);
}
