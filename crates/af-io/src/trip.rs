//! Taxi-trip CSV records.
//!
//! A trip is one metered ride: pickup and dropoff coordinates and times plus
//! the metered distance.  The engine itself only ever consumes the four
//! coordinates (to snap endpoints to road nodes); the derived fields — pace,
//! straight-line distance, winding factor — exist for the validation and
//! traffic-estimation stages that sit on top.
//!
//! The threshold battery that classifies trips as valid/bad/error lives in
//! those outer stages, not here; only the winding-factor bounds are published
//! as constants since several of them share the numbers.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use chrono::NaiveDateTime;
use serde::Deserialize;

use af_core::GeoPoint;

use crate::error::{LoadError, LoadResult};

/// Meters per statute mile (the meter reports miles).
pub const METERS_PER_MILE: f64 = 1609.34;

/// A winding factor below this violates Euclidean geometry (modulo GPS
/// noise) — the trip is an error.
pub const MIN_WINDING_FACTOR: f64 = 0.95;

/// Above this the taxi clearly didn't head for its destination; the trip is
/// not representative of its endpoints.
pub const MAX_WINDING_FACTOR: f64 = 5.0;

const UTC_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct TripRecord {
    pickup_datetime: String,
    dropoff_datetime: String,
    trip_distance: f64,
    pickup_longitude: f64,
    pickup_latitude: f64,
    dropoff_longitude: f64,
    dropoff_latitude: f64,
}

// ── Trip ──────────────────────────────────────────────────────────────────────

/// One parsed taxi trip with its derived features.
#[derive(Debug, Clone)]
pub struct Trip {
    pub pickup: GeoPoint,
    pub dropoff: GeoPoint,
    pub pickup_time: NaiveDateTime,
    pub dropoff_time: NaiveDateTime,
    /// Wall-clock duration in seconds.
    pub duration_s: i64,
    /// Metered distance in meters.
    pub metered_dist_m: f64,
    /// Seconds per meter (0 for a zero-distance trip).
    pub pace_s_per_m: f64,
    /// Straight-line pickup→dropoff distance in meters.
    pub straight_line_m: f64,
    /// Metered over straight-line distance (1 when the straight-line
    /// distance is zero).  Typically around 1.5 in a street grid.
    pub winding_factor: f64,
}

impl Trip {
    fn from_record(row: TripRecord) -> LoadResult<Trip> {
        let pickup_time = parse_utc(&row.pickup_datetime)?;
        let dropoff_time = parse_utc(&row.dropoff_datetime)?;
        let duration_s = (dropoff_time - pickup_time).num_seconds();

        let pickup = GeoPoint::new(row.pickup_latitude, row.pickup_longitude);
        let dropoff = GeoPoint::new(row.dropoff_latitude, row.dropoff_longitude);

        let metered_dist_m = row.trip_distance * METERS_PER_MILE;
        let pace_s_per_m = if metered_dist_m == 0.0 {
            0.0
        } else {
            duration_s as f64 / metered_dist_m
        };

        let straight_line_m = pickup.approx_distance_m(dropoff);
        let winding_factor = if straight_line_m <= 0.0 {
            1.0
        } else {
            metered_dist_m / straight_line_m
        };

        Ok(Trip {
            pickup,
            dropoff,
            pickup_time,
            dropoff_time,
            duration_s,
            metered_dist_m,
            pace_s_per_m,
            straight_line_m,
            winding_factor,
        })
    }
}

fn parse_utc(s: &str) -> LoadResult<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), UTC_FORMAT)
        .map_err(|e| LoadError::Parse(format!("bad timestamp {s:?}: {e}")))
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Parse every trip row from a CSV source.
pub fn load_trips<R: Read>(reader: R) -> LoadResult<Vec<Trip>> {
    let mut input = csv::Reader::from_reader(reader);
    let mut trips = Vec::new();
    for result in input.deserialize::<TripRecord>() {
        trips.push(Trip::from_record(result?)?);
    }
    Ok(trips)
}

/// Like [`load_trips`] but opening the file.
pub fn load_trips_path(path: &Path) -> LoadResult<Vec<Trip>> {
    load_trips(File::open(path)?)
}
