#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Yucatán municipality coordinate table and lookup.
//!
//! A fixed mapping from municipality name to map coordinates, used to
//! place aggregated case counts on the dashboard map. Lookups normalize
//! the name (uppercase + trim) and fall back to the state's geographic
//! center for unknown names, so a spelling mismatch in the source sheet
//! mis-locates a point instead of breaking the whole view.

use serde::{Deserialize, Serialize};

/// Total number of municipalities in Yucatán, used to express outbreak
/// coverage as a percentage of the state.
pub const TOTAL_MUNICIPALITIES: u64 = 106;

/// Geographic center of Yucatán, the fallback position for names not
/// present in the coordinate table.
pub const DEFAULT_CENTER: Coordinates = Coordinates {
    lat: 20.7,
    lon: -89.0,
};

/// A (latitude, longitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lon: f64,
}

/// Municipality coordinates, keyed by uppercase municipality name.
const MUNICIPALITY_COORDINATES: &[(&str, Coordinates)] = &[
    ("MERIDA", Coordinates { lat: 20.9674, lon: -89.5926 }),
    ("TIZIMIN", Coordinates { lat: 21.1442, lon: -88.1538 }),
    ("TZUCACAB", Coordinates { lat: 20.0833, lon: -89.0500 }),
    ("PETO", Coordinates { lat: 20.1333, lon: -88.9167 }),
    ("TEMAX", Coordinates { lat: 21.1833, lon: -89.0167 }),
    ("BUCTZOZ", Coordinates { lat: 21.1167, lon: -89.0500 }),
    ("OXKUTZCAB", Coordinates { lat: 20.3017, lon: -89.4189 }),
    ("IZAMAL", Coordinates { lat: 20.9308, lon: -89.0181 }),
    ("UMAN", Coordinates { lat: 20.8833, lon: -89.7500 }),
    ("TEKAX", Coordinates { lat: 20.2069, lon: -89.2911 }),
    ("SUCILA", Coordinates { lat: 21.0833, lon: -88.4000 }),
    ("VALLADOLID", Coordinates { lat: 20.6897, lon: -88.2011 }),
    ("MOTUL", Coordinates { lat: 21.0931, lon: -89.2911 }),
    ("TICUL", Coordinates { lat: 20.4008, lon: -89.5364 }),
    ("MAXCANU", Coordinates { lat: 20.5833, lon: -90.0167 }),
    ("CELESTUN", Coordinates { lat: 20.8581, lon: -90.3997 }),
    ("CONKAL", Coordinates { lat: 21.0819, lon: -89.5164 }),
    ("KANASIN", Coordinates { lat: 20.9439, lon: -89.5600 }),
    ("PROGRESO", Coordinates { lat: 21.2808, lon: -89.6647 }),
    ("CHICXULUB", Coordinates { lat: 21.2500, lon: -89.5833 }),
    ("CUZAMA", Coordinates { lat: 20.8500, lon: -89.3500 }),
    ("DZILAM", Coordinates { lat: 21.3833, lon: -88.9000 }),
    ("HOCTUN", Coordinates { lat: 20.8667, lon: -89.2000 }),
    ("MAMA", Coordinates { lat: 20.4500, lon: -89.4833 }),
    ("MUNA", Coordinates { lat: 20.4833, lon: -89.7167 }),
    ("PANABA", Coordinates { lat: 21.2833, lon: -88.2667 }),
    ("SEYE", Coordinates { lat: 20.7000, lon: -89.6833 }),
    ("TEPAKAN", Coordinates { lat: 20.2333, lon: -90.0333 }),
    ("TIXKOKOB", Coordinates { lat: 21.0167, lon: -89.4000 }),
    ("TIXMEHUAC", Coordinates { lat: 20.6333, lon: -88.9500 }),
    ("TIXPEHUAL", Coordinates { lat: 21.1000, lon: -89.5333 }),
    ("TUNKAS", Coordinates { lat: 21.0833, lon: -88.8333 }),
    ("CHICHIMILA", Coordinates { lat: 20.6333, lon: -88.2833 }),
    ("CHOCHOLA", Coordinates { lat: 20.9167, lon: -89.8667 }),
    ("ACAKAH", Coordinates { lat: 20.2833, lon: -90.0667 }),
    ("MAYAPAN", Coordinates { lat: 20.3333, lon: -89.4667 }),
    ("MOCEL", Coordinates { lat: 21.2333, lon: -89.4667 }),
    ("CULUCUM", Coordinates { lat: 20.8667, lon: -88.4333 }),
    ("DZINDZANTUN", Coordinates { lat: 21.2333, lon: -89.7833 }),
    ("TEMOZON", Coordinates { lat: 21.2167, lon: -88.0333 }),
    ("TEKANTO", Coordinates { lat: 21.0500, lon: -88.7333 }),
    ("TINUM", Coordinates { lat: 20.6500, lon: -88.6000 }),
    ("UXMAL", Coordinates { lat: 20.3583, lon: -89.7667 }),
    ("YAXCABA", Coordinates { lat: 20.6500, lon: -89.0500 }),
    ("YAXKUKUL", Coordinates { lat: 21.1000, lon: -89.6333 }),
];

/// Normalizes a municipality name for table lookup: uppercase + trim.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Returns the coordinates for a municipality.
///
/// The name is normalized before lookup. Unknown names resolve to
/// [`DEFAULT_CENTER`] rather than failing.
#[must_use]
pub fn lookup(name: &str) -> Coordinates {
    let normalized = normalize_name(name);
    MUNICIPALITY_COORDINATES
        .iter()
        .find(|(key, _)| *key == normalized)
        .map_or(DEFAULT_CENTER, |(_, coords)| *coords)
}

/// Returns `true` if the municipality is present in the coordinate table.
#[must_use]
pub fn is_known(name: &str) -> bool {
    let normalized = normalize_name(name);
    MUNICIPALITY_COORDINATES
        .iter()
        .any(|(key, _)| *key == normalized)
}
