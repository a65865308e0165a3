//! Core library for vertical curve profile design.
//!
//! [`alignment::compute_geometry`] derives the parabola of a crest or sag
//! curve, [`stationing::build_station_table`] tabulates elevations at regular
//! stations, and the [`sheet`] and [`reporting`] modules turn both into
//! drawings and reports.

pub mod alignment;
pub mod error;
pub mod geometry;
pub mod io;
pub mod reporting;
pub mod sheet;
pub mod stationing;

pub use alignment::{compute_geometry, CurveGeometry, CurveInput, CurveKind, Vertex};
pub use error::{ProfileError, Result};
pub use stationing::{
    build_station_table, StationRecord, StationRole, BOUNDARY_TOLERANCE, DEFAULT_STATION_INTERVAL,
};
