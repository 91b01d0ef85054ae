//! Validation thresholds.

/// Configuration parameters for connection validation.
///
/// All thresholds are in hours unless stated otherwise. The defaults
/// encode common airline minimum-connection-time practice plus the
/// separation heuristics used to spot merged-together trips.
#[derive(Debug, Clone)]
pub struct ValidatorConfig {
    /// Minimum connection time at the same airport (minutes).
    pub same_airport_mct_min_mins: i64,

    /// Typical comfortable connection at the same airport (minutes).
    pub same_airport_mct_typical_mins: i64,

    /// Minimum cross-town transfer time between metro airports (minutes).
    pub metro_mct_min_mins: i64,

    /// Typical cross-town transfer time between metro airports (minutes).
    pub metro_mct_typical_mins: i64,

    /// Same-airport layovers at or beyond this are flagged for
    /// confirmation (hours).
    pub long_layover_warning_hours: f64,

    /// Same-airport stays at or beyond this many days look like an
    /// outbound/return split.
    pub split_stay_days: f64,

    /// Disconnected-city gaps at or beyond this look like separate
    /// trips (hours).
    pub separation_gap_hours: f64,

    /// Maximum gap for two connected legs to share a trip group (hours).
    pub group_max_gap_hours: f64,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            same_airport_mct_min_mins: 60,
            same_airport_mct_typical_mins: 120,
            metro_mct_min_mins: 180,
            metro_mct_typical_mins: 240,
            long_layover_warning_hours: 24.0,
            split_stay_days: 7.0,
            separation_gap_hours: 24.0,
            group_max_gap_hours: 48.0,
        }
    }
}

impl ValidatorConfig {
    /// Same-airport MCT as (minimum, typical) hours.
    pub fn same_airport_mct_hours(&self) -> (f64, f64) {
        (
            self.same_airport_mct_min_mins as f64 / 60.0,
            self.same_airport_mct_typical_mins as f64 / 60.0,
        )
    }

    /// Cross-town MCT as (minimum, typical) hours, scaled up for longer
    /// inter-airport distances when the distance is known.
    pub fn metro_mct_hours(&self, inter_airport_miles: Option<f64>) -> (f64, f64) {
        let min = self.metro_mct_min_mins as f64 / 60.0;
        let typical = self.metro_mct_typical_mins as f64 / 60.0;

        match inter_airport_miles {
            Some(d) if d > 50.0 => (min + 1.0, typical + 1.5),
            Some(d) if d > 25.0 => (min + 0.5, typical + 0.75),
            _ => (min, typical),
        }
    }

    /// Same-airport stays at or beyond this many hours look like an
    /// outbound/return split.
    pub fn split_stay_hours(&self) -> f64 {
        self.split_stay_days * 24.0
    }

    /// Minimum feasible ground-travel time between different cities, in
    /// hours, given the distance between them in miles.
    pub fn min_ground_travel_hours(&self, distance_miles: f64) -> f64 {
        if distance_miles < 50.0 {
            1.5
        } else if distance_miles < 200.0 {
            3.0
        } else if distance_miles < 500.0 {
            5.0
        } else {
            distance_miles / 500.0 + 3.0
        }
    }
}
