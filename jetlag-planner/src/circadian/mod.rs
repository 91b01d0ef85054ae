//! Circadian primitives.
//!
//! Timezone-shift resolution over IANA zones, plus the simplified
//! linear-rate recovery model used to size day-by-day adjustment plans.
//! This is deliberately not a phase-response-curve simulation; the
//! planner relies on linear shift rates throughout.

mod recovery;

pub use recovery::{day_sleep_schedule, recovery_days, reentrain_rate};

use chrono::{DateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Direction of circadian shift required by a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Body clock must advance (travel toward earlier local bedtime)
    East,
    /// Body clock must delay (travel toward later local bedtime)
    West,
    /// No shift required
    None,
}

/// The hour shift between two timezones and the direction of adaptation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoneShift {
    /// Magnitude of the shift in hours
    pub hours: f64,
    /// Adaptation direction
    pub direction: Direction,
}

/// Resolve the circadian shift between two IANA timezones at an instant.
///
/// The magnitude is the raw UTC-offset difference at `at`; the
/// direction comes from that difference normalized into (-12, 12], so a
/// trip whose raw difference exceeds half a day adapts the shorter way
/// around the clock. Los Angeles to Sydney in January is a 19-hour
/// shift taken westward (a 5-hour delay repeated across days), not a
/// 19-hour advance.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use jetlag_planner::circadian::{Direction, zone_shift};
///
/// let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
/// let shift = zone_shift(
///     chrono_tz::America::New_York,
///     chrono_tz::Europe::London,
///     at,
/// );
/// assert_eq!(shift.hours, 5.0);
/// assert_eq!(shift.direction, Direction::East);
/// ```
pub fn zone_shift(origin: Tz, destination: Tz, at: DateTime<Utc>) -> ZoneShift {
    let naive = at.naive_utc();
    let origin_offset = origin.offset_from_utc_datetime(&naive).fix().local_minus_utc();
    let dest_offset = destination
        .offset_from_utc_datetime(&naive)
        .fix()
        .local_minus_utc();

    let raw = (dest_offset - origin_offset) as f64 / 3600.0;
    let hours = raw.abs();

    let mut normalized = raw;
    while normalized > 12.0 {
        normalized -= 24.0;
    }
    while normalized <= -12.0 {
        normalized += 24.0;
    }

    let direction = if hours == 0.0 {
        Direction::None
    } else if normalized > 0.0 {
        Direction::East
    } else {
        Direction::West
    };

    ZoneShift { hours, direction }
}

/// A sleep window: bedtime, wake time, and duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepWindow {
    /// Local bedtime
    pub bedtime: NaiveTime,
    /// Local wake time
    pub wake: NaiveTime,
    /// Sleep duration in hours
    pub duration_hours: f64,
    /// Guidance for this window
    pub notes: String,
}

impl SleepWindow {
    /// Build a window from a fractional-hour bedtime and duration.
    ///
    /// Both clock times are normalized into [0, 24).
    pub fn from_hours(bedtime_hours: f64, duration_hours: f64, notes: impl Into<String>) -> Self {
        let bed = wrap_hours(bedtime_hours);
        let wake = wrap_hours(bedtime_hours + duration_hours);
        Self {
            bedtime: time_of_day(bed),
            wake: time_of_day(wake),
            duration_hours,
            notes: notes.into(),
        }
    }
}

/// Normalize fractional hours into [0, 24).
pub fn wrap_hours(hours: f64) -> f64 {
    let r = hours % 24.0;
    if r < 0.0 { r + 24.0 } else { r }
}

/// Convert fractional hours in [0, 24) to a clock time, rounded to the
/// nearest minute.
pub fn time_of_day(hours: f64) -> NaiveTime {
    let total_minutes = (wrap_hours(hours) * 60.0).round() as u32 % (24 * 60);
    NaiveTime::from_hms_opt(total_minutes / 60, total_minutes % 60, 0)
        .unwrap_or(NaiveTime::MIN)
}
