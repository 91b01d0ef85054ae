use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::circadian::Direction;
use crate::domain::{Airport, FlightLeg, Iata, MultiLegJourney};

use super::*;

fn iata(s: &str) -> Iata {
    Iata::parse(s).unwrap()
}

fn airport(code: &str, city: &str, tz: Tz) -> Airport {
    Airport::new(iata(code), city, tz)
}

fn jan(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap()
}

fn jun(d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, d, h, 0, 0).unwrap()
}

fn journey(legs: Vec<FlightLeg>) -> MultiLegJourney {
    MultiLegJourney::new(legs, None, |a, b| a == b).unwrap()
}

fn lax() -> Airport {
    airport("LAX", "Los Angeles", chrono_tz::America::Los_Angeles)
}

fn nrt() -> Airport {
    airport("NRT", "Tokyo", chrono_tz::Asia::Tokyo)
}

fn sin() -> Airport {
    airport("SIN", "Singapore", chrono_tz::Asia::Singapore)
}

fn syd() -> Airport {
    airport("SYD", "Sydney", chrono_tz::Australia::Sydney)
}

fn jfk() -> Airport {
    airport("JFK", "New York", chrono_tz::America::New_York)
}

fn lhr() -> Airport {
    airport("LHR", "London", chrono_tz::Europe::London)
}

/// LAX to Sydney in January via Tokyo (12h stop) and Singapore (18h
/// stop): a 19h westbound shift with only 1.25 days en route.
fn pacific_hop() -> MultiLegJourney {
    journey(vec![
        FlightLeg::new(lax(), nrt(), jan(10, 8), jan(10, 19)).unwrap(),
        FlightLeg::new(nrt(), sin(), jan(11, 7), jan(11, 14)).unwrap(),
        FlightLeg::new(sin(), syd(), jan(12, 8), jan(12, 16)).unwrap(),
    ])
}

#[test]
fn single_leg_journey_plans_pure_recovery() {
    // JFK to London, no layovers: everything happens after arrival
    let journey = journey(vec![
        FlightLeg::new(jfk(), lhr(), jun(1, 2), jun(1, 9)).unwrap(),
    ]);
    let plan = MultiLegAdaptationPlanner::new().plan(&journey);

    assert_eq!(plan.total_shift_hours, 5.0);
    assert_eq!(plan.direction, Direction::East);
    assert_eq!(plan.progression_rate, 0.0);

    // Only the pre-departure anchor
    assert_eq!(plan.adaptations.len(), 1);
    assert_eq!(plan.adaptations[0].strategy, AdaptationStrategy::AnchorSleep);
    assert_eq!(plan.shift_achieved_en_route(), 0.0);
    assert_eq!(plan.remaining_shift_on_arrival(), 5.0);

    // 5h east at 1h/day
    assert_eq!(plan.final_recovery_days, 5);
    assert_eq!(plan.total_journey_days, 5);
}

#[test]
fn zero_shift_journey_is_degenerate_but_planned() {
    // London to Gatwick: same timezone
    let journey = journey(vec![
        FlightLeg::new(
            lhr(),
            airport("LGW", "London", chrono_tz::Europe::London),
            jun(1, 9),
            jun(1, 10),
        )
        .unwrap(),
    ]);
    let plan = MultiLegAdaptationPlanner::new().plan(&journey);

    assert_eq!(plan.total_shift_hours, 0.0);
    assert_eq!(plan.direction, Direction::None);
    assert_eq!(plan.final_recovery_days, 0);
    assert_eq!(plan.total_journey_days, 0);
    // Day 0 arrival plan still present
    assert_eq!(plan.recovery_days.len(), 1);
    assert_eq!(plan.recovery_days[0].phase, RecoveryPhase::ArrivalDay);
}

#[test]
fn pre_departure_anchor_window() {
    let journey = journey(vec![
        FlightLeg::new(jfk(), lhr(), jun(1, 2), jun(1, 9)).unwrap(),
    ]);
    let plan = MultiLegAdaptationPlanner::new().plan(&journey);

    let anchor = &plan.adaptations[0];
    assert_eq!(anchor.stop_index, 0);
    assert_eq!(anchor.location.code, iata("JFK"));
    assert_eq!(
        anchor.sleep.bedtime,
        NaiveTime::from_hms_opt(22, 0, 0).unwrap()
    );
    assert_eq!(anchor.sleep.wake, NaiveTime::from_hms_opt(6, 0, 0).unwrap());
    // 22:00 local departure on 31 May: wake that same morning
    assert!(anchor.sleep.notes.contains("2024-05-31"), "{}", anchor.sleep.notes);
}

#[test]
fn early_departure_anchors_the_previous_night() {
    // 09:00 UTC is 05:00 in New York; waking at 06:00 on departure day
    // would be after the flight leaves
    let journey = journey(vec![
        FlightLeg::new(jfk(), lhr(), jun(1, 9), jun(1, 16)).unwrap(),
    ]);
    let plan = MultiLegAdaptationPlanner::new().plan(&journey);

    assert!(
        plan.adaptations[0].sleep.notes.contains("2024-05-31"),
        "{}",
        plan.adaptations[0].sleep.notes
    );
}

#[test]
fn short_layovers_anchor_and_push_recovery_to_destination() {
    let plan = MultiLegAdaptationPlanner::new().plan(&pacific_hop());

    assert_eq!(plan.total_shift_hours, 19.0);
    assert_eq!(plan.direction, Direction::West);
    // 19h over 1.25 days would be 15.2h/day; clamped to the ceiling
    assert_eq!(plan.progression_rate, 1.8);

    // Pre-departure plus two layover stops
    assert_eq!(plan.adaptations.len(), 3);
    for adaptation in &plan.adaptations[1..] {
        assert_eq!(adaptation.strategy, AdaptationStrategy::AnchorSleep);
        assert_eq!(adaptation.shift_applied_hours, 0.0);
    }

    // Both stops are under a day, so the whole shift lands on arrival
    assert_eq!(plan.shift_achieved_en_route(), 0.0);
    assert_eq!(plan.remaining_shift_on_arrival(), 19.0);

    // 19h west at 1.5h/day
    assert_eq!(plan.final_recovery_days, 13);
    // 1.25 travel days round up to 2
    assert_eq!(plan.total_journey_days, 15);
}

#[test]
fn full_day_layover_adapts_progressively() {
    // Exactly 24h in Tokyo
    let journey = journey(vec![
        FlightLeg::new(lax(), nrt(), jun(1, 8), jun(1, 20)).unwrap(),
        FlightLeg::new(nrt(), syd(), jun(2, 20), jun(3, 5)).unwrap(),
    ]);
    let plan = MultiLegAdaptationPlanner::new().plan(&journey);

    assert_eq!(plan.direction, Direction::West);
    let stop = &plan.adaptations[1];
    assert_eq!(stop.strategy, AdaptationStrategy::Progressive);
    assert!((stop.shift_applied_hours - 1.8).abs() < 1e-9);
    assert!((stop.cumulative_shift_hours - 1.8).abs() < 1e-9);
}

#[test]
fn just_under_a_day_still_anchors() {
    // 23h59m in Tokyo
    let journey = journey(vec![
        FlightLeg::new(lax(), nrt(), jun(1, 8), jun(1, 20)).unwrap(),
        FlightLeg::new(
            nrt(),
            syd(),
            Utc.with_ymd_and_hms(2024, 6, 2, 19, 59, 0).unwrap(),
            jun(3, 5),
        )
        .unwrap(),
    ]);
    let plan = MultiLegAdaptationPlanner::new().plan(&journey);

    let stop = &plan.adaptations[1];
    assert_eq!(stop.strategy, AdaptationStrategy::AnchorSleep);
    assert_eq!(stop.shift_applied_hours, 0.0);
}

#[test]
fn westbound_sleep_windows_delay() {
    let journey = journey(vec![
        FlightLeg::new(lax(), nrt(), jun(1, 8), jun(1, 20)).unwrap(),
        FlightLeg::new(nrt(), syd(), jun(3, 20), jun(4, 5)).unwrap(),
    ]);
    let plan = MultiLegAdaptationPlanner::new().plan(&journey);

    // Two days in Tokyo at 1.8h/day: bedtime delayed 3.6h past 22:00
    let stop = &plan.adaptations[1];
    assert!((stop.cumulative_shift_hours - 3.6).abs() < 1e-9);
    assert_eq!(
        stop.sleep.bedtime,
        NaiveTime::from_hms_opt(1, 36, 0).unwrap()
    );
}

#[test]
fn eastbound_sleep_windows_advance() {
    // New York to Paris with two days in London; endpoint shift 6h east
    let journey = journey(vec![
        FlightLeg::new(jfk(), lhr(), jun(1, 2), jun(1, 9)).unwrap(),
        FlightLeg::new(
            lhr(),
            airport("CDG", "Paris", chrono_tz::Europe::Paris),
            jun(3, 9),
            jun(3, 10),
        )
        .unwrap(),
    ]);
    let plan = MultiLegAdaptationPlanner::new().plan(&journey);

    assert_eq!(plan.direction, Direction::East);
    // 6h over 2 days is 3h/day theoretical, clamped to 1.2
    assert_eq!(plan.progression_rate, 1.2);

    let stop = &plan.adaptations[1];
    assert_eq!(stop.strategy, AdaptationStrategy::Progressive);
    assert!((stop.cumulative_shift_hours - 2.4).abs() < 1e-9);
    // Bedtime advanced 2.4h before 22:00
    assert_eq!(
        stop.sleep.bedtime,
        NaiveTime::from_hms_opt(19, 36, 0).unwrap()
    );
}

#[test]
fn recovery_phases_are_labeled() {
    let journey = journey(vec![
        FlightLeg::new(jfk(), lhr(), jun(1, 2), jun(1, 9)).unwrap(),
    ]);
    let plan = MultiLegAdaptationPlanner::new().plan(&journey);

    // 5 recovery days: day 0 arrival, 1-2 active, 3-5 final
    assert_eq!(plan.recovery_days.len(), 6);
    assert_eq!(plan.recovery_days[0].phase, RecoveryPhase::ArrivalDay);
    assert_eq!(plan.recovery_days[1].phase, RecoveryPhase::ActiveRecovery);
    assert_eq!(plan.recovery_days[2].phase, RecoveryPhase::ActiveRecovery);
    assert_eq!(plan.recovery_days[3].phase, RecoveryPhase::FinalAdjustment);
    assert_eq!(plan.recovery_days[5].phase, RecoveryPhase::FinalAdjustment);

    assert_eq!(RecoveryPhase::ArrivalDay.label(), "Arrival Day");
    assert_eq!(RecoveryPhase::ActiveRecovery.label(), "Active Recovery");
    assert_eq!(RecoveryPhase::FinalAdjustment.label(), "Final Adjustment");
}

#[test]
fn severe_shift_gets_a_safety_warning() {
    let plan = MultiLegAdaptationPlanner::new().plan(&pacific_hop());

    assert!(plan.safety_notes.iter().any(|n| n.contains("severe")));
    assert!(!plan.environment_notes.is_empty());
}

#[test]
fn plan_is_idempotent() {
    let journey = pacific_hop();
    let planner = MultiLegAdaptationPlanner::new();

    assert_eq!(planner.plan(&journey), planner.plan(&journey));
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    /// Chain of same-airport connections from New York to Tokyo with
    /// arbitrary layover lengths.
    fn chained_journey(gaps_minutes: &[u32]) -> MultiLegJourney {
        let mut legs = Vec::new();
        let mut t = jun(1, 8);
        let mut from = jfk();

        for (i, gap) in gaps_minutes.iter().enumerate() {
            let code = [b'B' + i as u8; 3];
            let stop = Airport::new(
                Iata::parse(std::str::from_utf8(&code).unwrap()).unwrap(),
                "Stopover",
                chrono_tz::UTC,
            );
            let arr = t + chrono::Duration::hours(8);
            legs.push(FlightLeg::new(from, stop.clone(), t, arr).unwrap());
            t = arr + chrono::Duration::minutes(*gap as i64);
            from = stop;
        }

        let arr = t + chrono::Duration::hours(8);
        legs.push(FlightLeg::new(from, nrt(), t, arr).unwrap());

        journey(legs)
    }

    proptest! {
        #[test]
        fn cumulative_shift_is_monotonic_and_bounded(
            gaps in proptest::collection::vec(0u32..4320, 0..4),
        ) {
            let journey = chained_journey(&gaps);
            let plan = MultiLegAdaptationPlanner::new().plan(&journey);

            let mut prev = 0.0;
            for adaptation in &plan.adaptations {
                prop_assert!(adaptation.cumulative_shift_hours + 1e-9 >= prev);
                prop_assert!(
                    adaptation.cumulative_shift_hours <= plan.total_shift_hours + 1e-9
                );
                let sum = adaptation.cumulative_shift_hours
                    + adaptation.remaining_shift_hours;
                prop_assert!((sum - plan.total_shift_hours).abs() < 1e-9);
                prev = adaptation.cumulative_shift_hours;
            }
        }

        #[test]
        fn journey_days_accounting_holds(
            gaps in proptest::collection::vec(0u32..4320, 0..4),
        ) {
            let journey = chained_journey(&gaps);
            let plan = MultiLegAdaptationPlanner::new().plan(&journey);

            let expected =
                journey.days_en_route().ceil() as u32 + plan.final_recovery_days;
            prop_assert_eq!(plan.total_journey_days, expected);
        }

        #[test]
        fn progression_rate_never_exceeds_the_ceiling(
            gaps in proptest::collection::vec(0u32..4320, 0..4),
        ) {
            let journey = chained_journey(&gaps);
            let plan = MultiLegAdaptationPlanner::new().plan(&journey);

            let ceiling = PlannerConfig::default().rate_ceiling(plan.direction);
            prop_assert!(plan.progression_rate <= ceiling + 1e-9);
        }
    }
}
