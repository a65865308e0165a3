//! Station table generation along a vertical curve.
//!
//! The table covers the closed interval between the curve start and end. The
//! three singular points (start, PIV projection and end) are always present;
//! regular stations fall on multiples of the station interval strictly between
//! them.

use std::fmt;

use crate::alignment::CurveGeometry;
use crate::error::{ProfileError, Result};

/// Spacing between tabulated stations in meters.
pub const DEFAULT_STATION_INTERVAL: f64 = 20.0;

/// Absolute tolerance in meters used when a station multiple coincides with a
/// singular point.
pub const BOUNDARY_TOLERANCE: f64 = 1e-9;

/// Role of a row in the station table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StationRole {
    /// Curve start (PCV).
    Start,
    /// Point on the curve below or above the PIV.
    PivProjection,
    /// Curve end (PTV).
    End,
    /// Station on a multiple of the station interval.
    Regular,
}

impl StationRole {
    pub fn is_singular(self) -> bool {
        !matches!(self, StationRole::Regular)
    }
}

impl fmt::Display for StationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StationRole::Start => "PCV",
            StationRole::PivProjection => "PIV",
            StationRole::End => "PTV",
            StationRole::Regular => "STA",
        };
        write!(f, "{s}")
    }
}

/// One row of the station table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StationRecord {
    pub label: String,
    pub chainage: f64,
    /// Distance from the curve start.
    pub offset_from_start: f64,
    pub elevation: f64,
    pub role: StationRole,
}

/// Absolute chainage of a station index plus an offset past it.
pub fn chainage_from_station(index: u32, offset: f64, interval: f64) -> Result<f64> {
    check_interval(interval)?;
    if !(offset.is_finite() && offset >= 0.0) {
        return Err(ProfileError::InvalidStation(format!(
            "offset {offset} must be a non-negative finite number"
        )));
    }
    Ok(f64::from(index) * interval + offset)
}

/// Formats a chainage as `index+fraction`, e.g. `30+12.50` for 612.5 m at a
/// 20 m interval.
///
/// The index is `floor(chainage / interval)`; it only moves to the next
/// station when the fraction falls short of the interval by float noise.
pub fn station_label(chainage: f64, interval: f64) -> String {
    let mut index = (chainage / interval).floor();
    let mut fraction = chainage - index * interval;
    if interval - fraction < BOUNDARY_TOLERANCE {
        index += 1.0;
        fraction = 0.0;
    }
    format!("{}+{:.2}", index as i64, fraction.max(0.0))
}

fn check_interval(interval: f64) -> Result<()> {
    if interval.is_finite() && interval > 0.0 {
        Ok(())
    } else {
        Err(ProfileError::InvalidInterval(interval))
    }
}

/// Multiples of `interval` strictly between `lo` and `hi`.
fn regular_chainages(lo: f64, hi: f64, interval: f64) -> Vec<f64> {
    let mut out = Vec::new();
    let mut k = (lo / interval).floor() as i64;
    loop {
        let c = k as f64 * interval;
        if c >= hi - BOUNDARY_TOLERANCE {
            break;
        }
        if c > lo + BOUNDARY_TOLERANCE {
            out.push(c);
        }
        k += 1;
    }
    out
}

/// Builds the station table for a curve whose PIV sits at `piv_chainage`.
///
/// Rows are ordered by chainage: start, regular stations, PIV projection,
/// regular stations, end.
pub fn build_station_table(
    geometry: &CurveGeometry,
    piv_chainage: f64,
    length: f64,
    station_interval: f64,
) -> Result<Vec<StationRecord>> {
    check_interval(station_interval)?;
    if !(length.is_finite() && length > 0.0) {
        return Err(ProfileError::InvalidLength(length));
    }
    if (length - geometry.length).abs() > BOUNDARY_TOLERANCE {
        return Err(ProfileError::LengthMismatch {
            geometry: geometry.length,
            requested: length,
        });
    }
    if !piv_chainage.is_finite() {
        return Err(ProfileError::InvalidStation(format!(
            "PIV chainage {piv_chainage} is not finite"
        )));
    }

    let start = piv_chainage - length / 2.0;
    let end = piv_chainage + length / 2.0;

    let record = |chainage: f64, offset: f64, elevation: f64, role: StationRole| StationRecord {
        label: station_label(chainage, station_interval),
        chainage,
        offset_from_start: offset,
        elevation,
        role,
    };
    let regular = |chainage: f64| {
        let offset = chainage - start;
        record(chainage, offset, geometry.elevation_at(offset), StationRole::Regular)
    };

    let mut table = vec![record(start, 0.0, geometry.start_elevation, StationRole::Start)];
    table.extend(
        regular_chainages(start, piv_chainage, station_interval)
            .into_iter()
            .map(&regular),
    );
    table.push(record(
        piv_chainage,
        length / 2.0,
        geometry.piv_on_curve_elevation,
        StationRole::PivProjection,
    ));
    table.extend(
        regular_chainages(piv_chainage, end, station_interval)
            .into_iter()
            .map(&regular),
    );
    table.push(record(end, length, geometry.end_elevation, StationRole::End));

    log::debug!(
        "station table {}..{} every {} m: {} records",
        start,
        end,
        station_interval,
        table.len()
    );
    Ok(table)
}
