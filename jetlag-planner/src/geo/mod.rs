//! Geographic reference tables.
//!
//! Some airports serve the same metropolitan area and are mutually
//! reachable by ground transfer (e.g. the New York trio JFK/LGA/EWR),
//! enabling connections that look disconnected by airport code alone.
//! This module provides lookup for metro airport groupings and airport
//! coordinates. Both are immutable configuration maps loaded once, so
//! they can be updated and tested independently of the algorithms that
//! consume them.

use std::collections::HashMap;

use crate::domain::Iata;

/// Distance assumed for an airport pair with unknown coordinates, in miles.
///
/// Deliberately conservative: an unknown pair is treated as far apart,
/// so a tight gap between disconnected cities is flagged rather than
/// silently accepted.
pub const UNKNOWN_ROUTE_DISTANCE_MILES: f64 = 5000.0;

/// Metro airport groupings.
///
/// Airports in the same cluster are treated as mutually reachable by
/// ground transfer. Membership is symmetric and transitive within a
/// cluster.
#[derive(Debug, Clone, Default)]
pub struct MetroGroups {
    /// Map from airport to its cluster id.
    clusters: HashMap<Iata, u16>,
    next_id: u16,
}

impl MetroGroups {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cluster of airports serving one metropolitan area.
    pub fn add_cluster(&mut self, airports: &[Iata]) {
        let id = self.next_id;
        self.next_id += 1;
        for &airport in airports {
            self.clusters.insert(airport, id);
        }
    }

    /// Returns true if both airports belong to the same metro cluster.
    ///
    /// An airport compared with itself is always the same metro, whether
    /// or not it appears in the table.
    pub fn same_metro(&self, a: Iata, b: Iata) -> bool {
        if a == b {
            return true;
        }
        match (self.clusters.get(&a), self.clusters.get(&b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Returns the number of clusters.
    pub fn cluster_count(&self) -> usize {
        self.next_id as usize
    }

    /// Returns true if no clusters have been added.
    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Create a connectivity predicate suitable for journey construction.
    ///
    /// Two airports are connected when they are the same airport or in
    /// the same metro cluster.
    pub fn as_connectivity(&self) -> impl Fn(Iata, Iata) -> bool + '_ {
        |a, b| self.same_metro(a, b)
    }
}

/// Builder for metro groups.
///
/// Provides a fluent API for adding clusters by code string; invalid
/// codes are ignored.
#[derive(Debug, Default)]
pub struct MetroGroupsBuilder {
    inner: MetroGroups,
}

impl MetroGroupsBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a cluster given airport code strings.
    pub fn cluster(mut self, codes: &[&str]) -> Self {
        let parsed: Vec<Iata> = codes.iter().filter_map(|c| Iata::parse(c).ok()).collect();
        if !parsed.is_empty() {
            self.inner.add_cluster(&parsed);
        }
        self
    }

    /// Build the metro groups.
    pub fn build(self) -> MetroGroups {
        self.inner
    }
}

/// Airport coordinates for great-circle distance estimates.
///
/// Coverage is partial: pairs with a missing airport fall back to
/// [`UNKNOWN_ROUTE_DISTANCE_MILES`].
#[derive(Debug, Clone, Default)]
pub struct AirportCoordinates {
    coords: HashMap<Iata, (f64, f64)>,
}

impl AirportCoordinates {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an airport's latitude and longitude in degrees.
    pub fn add(&mut self, airport: Iata, lat: f64, lon: f64) {
        self.coords.insert(airport, (lat, lon));
    }

    /// Returns the coordinates of an airport, if known.
    pub fn get(&self, airport: Iata) -> Option<(f64, f64)> {
        self.coords.get(&airport).copied()
    }

    /// Returns the great-circle distance between two airports in miles,
    /// if both are known.
    pub fn distance_miles(&self, a: Iata, b: Iata) -> Option<f64> {
        let (lat1, lon1) = self.get(a)?;
        let (lat2, lon2) = self.get(b)?;
        Some(haversine_miles(lat1, lon1, lat2, lon2))
    }

    /// Returns the distance between two airports, falling back to the
    /// conservative default when either airport is unknown.
    pub fn distance_miles_or_default(&self, a: Iata, b: Iata) -> f64 {
        self.distance_miles(a, b)
            .unwrap_or(UNKNOWN_ROUTE_DISTANCE_MILES)
    }

    /// Returns the number of airports with known coordinates.
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    /// Returns true if no coordinates have been added.
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }
}

/// Great-circle distance between two points in miles.
pub fn haversine_miles(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_MILES: f64 = 3958.8;

    let dlat = (lat2 - lat1).to_radians();
    let dlon = (lon2 - lon1).to_radians();

    let a = (dlat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_MILES * c
}

/// Default metro airport groupings.
///
/// Roughly forty clusters covering the metros where multi-airport
/// connections are common.
pub fn default_metro_groups() -> MetroGroups {
    MetroGroupsBuilder::new()
        .cluster(&["JFK", "LGA", "EWR", "HPN"]) // New York
        .cluster(&["LHR", "LGW", "STN", "LTN", "LCY", "SEN"]) // London
        .cluster(&["CDG", "ORY", "BVA"]) // Paris
        .cluster(&["NRT", "HND"]) // Tokyo
        .cluster(&["KIX", "ITM", "UKB"]) // Osaka
        .cluster(&["ORD", "MDW"]) // Chicago
        .cluster(&["IAD", "DCA", "BWI"]) // Washington
        .cluster(&["SFO", "OAK", "SJC"]) // San Francisco Bay
        .cluster(&["LAX", "BUR", "LGB", "SNA", "ONT"]) // Los Angeles
        .cluster(&["MIA", "FLL", "PBI"]) // South Florida
        .cluster(&["IAH", "HOU"]) // Houston
        .cluster(&["DFW", "DAL"]) // Dallas
        .cluster(&["BOS", "PVD", "MHT"]) // Boston
        .cluster(&["YYZ", "YTZ", "YHM"]) // Toronto
        .cluster(&["SVO", "DME", "VKO"]) // Moscow
        .cluster(&["MXP", "LIN", "BGY"]) // Milan
        .cluster(&["FCO", "CIA"]) // Rome
        .cluster(&["ARN", "BMA", "NYO"]) // Stockholm
        .cluster(&["OSL", "TRF"]) // Oslo
        .cluster(&["GRU", "CGH", "VCP"]) // São Paulo
        .cluster(&["GIG", "SDU"]) // Rio de Janeiro
        .cluster(&["EZE", "AEP"]) // Buenos Aires
        .cluster(&["MEX", "NLU", "TLC"]) // Mexico City
        .cluster(&["ICN", "GMP"]) // Seoul
        .cluster(&["PVG", "SHA"]) // Shanghai
        .cluster(&["PEK", "PKX"]) // Beijing
        .cluster(&["BKK", "DMK"]) // Bangkok
        .cluster(&["CGK", "HLP"]) // Jakarta
        .cluster(&["KUL", "SZB"]) // Kuala Lumpur
        .cluster(&["TPE", "TSA"]) // Taipei
        .cluster(&["DXB", "DWC"]) // Dubai
        .cluster(&["IST", "SAW"]) // Istanbul
        .cluster(&["IKA", "THR"]) // Tehran
        .cluster(&["JNB", "HLA"]) // Johannesburg
        .cluster(&["MEL", "AVV"]) // Melbourne
        .cluster(&["GLA", "PIK"]) // Glasgow
        .cluster(&["BRU", "CRL"]) // Brussels
        .cluster(&["FRA", "HHN"]) // Frankfurt
        .cluster(&["WAW", "WMI"]) // Warsaw
        .cluster(&["OTP", "BBU"]) // Bucharest
        .build()
}

/// Default airport coordinates.
///
/// Partial coverage of major international airports; unknown pairs
/// degrade to [`UNKNOWN_ROUTE_DISTANCE_MILES`].
pub fn default_airport_coordinates() -> AirportCoordinates {
    let data: &[(&str, f64, f64)] = &[
        ("JFK", 40.64, -73.78),
        ("LGA", 40.78, -73.87),
        ("EWR", 40.69, -74.17),
        ("LHR", 51.47, -0.45),
        ("LGW", 51.15, -0.18),
        ("STN", 51.89, 0.26),
        ("CDG", 49.01, 2.55),
        ("ORY", 48.72, 2.38),
        ("NRT", 35.77, 140.39),
        ("HND", 35.55, 139.78),
        ("KIX", 34.43, 135.23),
        ("ORD", 41.97, -87.90),
        ("MDW", 41.79, -87.75),
        ("IAD", 38.95, -77.46),
        ("DCA", 38.85, -77.04),
        ("BWI", 39.18, -76.67),
        ("SFO", 37.62, -122.38),
        ("OAK", 37.72, -122.22),
        ("SJC", 37.36, -121.93),
        ("LAX", 33.94, -118.41),
        ("SNA", 33.68, -117.87),
        ("MIA", 25.79, -80.29),
        ("FLL", 26.07, -80.15),
        ("IAH", 29.98, -95.34),
        ("HOU", 29.65, -95.28),
        ("DFW", 32.90, -97.04),
        ("DAL", 32.85, -96.85),
        ("BOS", 42.36, -71.01),
        ("SEA", 47.45, -122.31),
        ("YYZ", 43.68, -79.63),
        ("YVR", 49.19, -123.18),
        ("ATL", 33.64, -84.43),
        ("DEN", 39.86, -104.67),
        ("PHX", 33.43, -112.01),
        ("LAS", 36.08, -115.15),
        ("SAN", 32.73, -117.19),
        ("SVO", 55.97, 37.41),
        ("DME", 55.41, 37.90),
        ("MXP", 45.63, 8.72),
        ("LIN", 45.45, 9.28),
        ("FCO", 41.80, 12.24),
        ("ARN", 59.65, 17.92),
        ("FRA", 50.03, 8.56),
        ("AMS", 52.31, 4.76),
        ("MAD", 40.47, -3.56),
        ("BCN", 41.30, 2.08),
        ("ZRH", 47.46, 8.55),
        ("VIE", 48.11, 16.57),
        ("GRU", -23.43, -46.47),
        ("CGH", -23.63, -46.66),
        ("GIG", -22.81, -43.25),
        ("EZE", -34.82, -58.54),
        ("MEX", 19.44, -99.07),
        ("ICN", 37.46, 126.44),
        ("GMP", 37.56, 126.79),
        ("PVG", 31.14, 121.81),
        ("SHA", 31.20, 121.34),
        ("PEK", 40.08, 116.58),
        ("BKK", 13.69, 100.75),
        ("DMK", 13.91, 100.60),
        ("CGK", -6.13, 106.66),
        ("KUL", 2.75, 101.71),
        ("TPE", 25.08, 121.23),
        ("SIN", 1.36, 103.99),
        ("HKG", 22.31, 113.91),
        ("DXB", 25.25, 55.36),
        ("DOH", 25.27, 51.61),
        ("AUH", 24.43, 54.65),
        ("IST", 41.26, 28.74),
        ("SAW", 40.90, 29.31),
        ("DEL", 28.56, 77.10),
        ("BOM", 19.09, 72.87),
        ("JNB", -26.14, 28.25),
        ("MEL", -37.67, 144.84),
        ("SYD", -33.95, 151.18),
        ("AKL", -37.01, 174.79),
        ("HNL", 21.32, -157.92),
    ];

    let mut coords = AirportCoordinates::new();
    for &(code, lat, lon) in data {
        if let Ok(iata) = Iata::parse(code) {
            coords.add(iata, lat, lon);
        }
    }
    coords
}
