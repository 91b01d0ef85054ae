//! Post-arrival recovery estimation.
//!
//! Linear-rate model: the body clock re-entrains roughly 1 hour per day
//! after eastward travel and 1.5 hours per day after westward travel
//! (delaying the clock is physiologically easier than advancing it).
//! Traveler attributes scale the estimate.

use crate::domain::{Adaptability, ExerciseFrequency, SleepQuality, TravelerProfile};

use super::{Direction, SleepWindow};

/// Hours of shift recovered per day after eastward travel.
const EAST_RATE_HOURS_PER_DAY: f64 = 1.0;

/// Hours of shift recovered per day after westward travel.
const WEST_RATE_HOURS_PER_DAY: f64 = 1.5;

/// Shifts below this are treated as fully recovered.
const NEGLIGIBLE_SHIFT_HOURS: f64 = 0.25;

/// Post-arrival re-entrainment rate for a direction, in hours per day.
pub fn reentrain_rate(direction: Direction) -> f64 {
    match direction {
        Direction::East => EAST_RATE_HOURS_PER_DAY,
        Direction::West => WEST_RATE_HOURS_PER_DAY,
        Direction::None => EAST_RATE_HOURS_PER_DAY,
    }
}

/// Estimate the number of recovery days a traveler needs for the shift
/// remaining at the final destination.
///
/// Returns zero for a negligible shift. Otherwise the linear-rate
/// estimate is scaled by the traveler profile and rounded up, with a
/// floor of one day.
pub fn recovery_days(
    remaining_shift_hours: f64,
    direction: Direction,
    profile: Option<&TravelerProfile>,
) -> u32 {
    if remaining_shift_hours < NEGLIGIBLE_SHIFT_HOURS {
        return 0;
    }

    let base = remaining_shift_hours / reentrain_rate(direction);
    let scaled = base * profile_multiplier(profile);

    (scaled.ceil() as u32).max(1)
}

fn profile_multiplier(profile: Option<&TravelerProfile>) -> f64 {
    let Some(profile) = profile else {
        return 1.0;
    };

    let mut multiplier = 1.0;

    multiplier *= match profile.adaptability {
        Adaptability::High => 0.8,
        Adaptability::Average => 1.0,
        Adaptability::Low => 1.2,
    };

    multiplier *= match profile.sleep_quality {
        SleepQuality::Good => 0.9,
        SleepQuality::Average => 1.0,
        SleepQuality::Poor => 1.15,
    };

    multiplier *= match profile.exercise_frequency {
        ExerciseFrequency::Daily => 0.95,
        ExerciseFrequency::Weekly => 1.0,
        ExerciseFrequency::Rare => 1.05,
    };

    if let Some(age) = profile.age {
        if age >= 60 {
            multiplier *= 1.2;
        } else if age < 30 {
            multiplier *= 0.9;
        }
    }

    multiplier
}

/// Sleep window for a given recovery day at the final destination.
///
/// The achievable bedtime starts displaced by the remaining shift and
/// converges toward local 22:00 at the re-entrainment rate: later
/// bedtimes advancing earlier after eastward travel, earlier bedtimes
/// delaying later after westward travel.
pub fn day_sleep_schedule(
    direction: Direction,
    day_index: u32,
    remaining_shift_hours: f64,
) -> SleepWindow {
    let rate = reentrain_rate(direction);
    let left = (remaining_shift_hours - rate * day_index as f64).max(0.0);

    let bedtime_hours = match direction {
        Direction::East => 22.0 + left,
        Direction::West => 22.0 - left,
        Direction::None => 22.0,
    };

    let notes = if left <= 0.0 {
        "Fully aligned with local time".to_string()
    } else {
        match direction {
            Direction::East => format!(
                "Advance bedtime; about {left:.1}h of adjustment left"
            ),
            Direction::West => format!(
                "Delay bedtime; about {left:.1}h of adjustment left"
            ),
            Direction::None => "Keep regular local sleep hours".to_string(),
        }
    };

    SleepWindow::from_hours(bedtime_hours, 8.0, notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn zero_shift_needs_no_recovery() {
        assert_eq!(recovery_days(0.0, Direction::None, None), 0);
        assert_eq!(recovery_days(0.2, Direction::East, None), 0);
    }

    #[test]
    fn eastward_slower_than_westward() {
        let east = recovery_days(6.0, Direction::East, None);
        let west = recovery_days(6.0, Direction::West, None);
        assert_eq!(east, 6);
        assert_eq!(west, 4);
        assert!(east > west);
    }

    #[test]
    fn minimum_one_day_for_real_shift() {
        assert_eq!(recovery_days(0.5, Direction::West, None), 1);
    }

    #[test]
    fn adaptable_young_traveler_recovers_faster() {
        let profile = TravelerProfile {
            adaptability: Adaptability::High,
            sleep_quality: SleepQuality::Good,
            exercise_frequency: ExerciseFrequency::Daily,
            age: Some(25),
        };

        let baseline = recovery_days(8.0, Direction::East, None);
        let tuned = recovery_days(8.0, Direction::East, Some(&profile));
        assert!(tuned < baseline, "{tuned} should be under {baseline}");
    }

    #[test]
    fn older_low_adaptability_traveler_recovers_slower() {
        let profile = TravelerProfile {
            adaptability: Adaptability::Low,
            sleep_quality: SleepQuality::Poor,
            exercise_frequency: ExerciseFrequency::Rare,
            age: Some(65),
        };

        let baseline = recovery_days(8.0, Direction::East, None);
        let tuned = recovery_days(8.0, Direction::East, Some(&profile));
        assert!(tuned > baseline, "{tuned} should exceed {baseline}");
    }

    #[test]
    fn day_schedule_converges_to_local_bedtime() {
        // 3h remaining eastward: day 0 bedtime 01:00, each day 1h earlier
        let day0 = day_sleep_schedule(Direction::East, 0, 3.0);
        assert_eq!(day0.bedtime, NaiveTime::from_hms_opt(1, 0, 0).unwrap());

        let day1 = day_sleep_schedule(Direction::East, 1, 3.0);
        assert_eq!(day1.bedtime, NaiveTime::from_hms_opt(0, 0, 0).unwrap());

        let day3 = day_sleep_schedule(Direction::East, 3, 3.0);
        assert_eq!(day3.bedtime, NaiveTime::from_hms_opt(22, 0, 0).unwrap());

        // Past full convergence the window stays at 22:00
        let day9 = day_sleep_schedule(Direction::East, 9, 3.0);
        assert_eq!(day9.bedtime, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
    }

    #[test]
    fn westward_schedule_starts_early_and_delays() {
        // 3h remaining westward: day 0 bedtime 19:00
        let day0 = day_sleep_schedule(Direction::West, 0, 3.0);
        assert_eq!(day0.bedtime, NaiveTime::from_hms_opt(19, 0, 0).unwrap());

        let day2 = day_sleep_schedule(Direction::West, 2, 3.0);
        assert_eq!(day2.bedtime, NaiveTime::from_hms_opt(22, 0, 0).unwrap());
    }

    #[test]
    fn schedule_always_eight_hours() {
        for day in 0..10 {
            let window = day_sleep_schedule(Direction::West, day, 12.0);
            assert_eq!(window.duration_hours, 8.0);
        }
    }
}
