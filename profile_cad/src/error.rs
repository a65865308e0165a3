//! Error type shared by the profile computations and exporters.

use thiserror::Error;

/// Errors produced while validating curve parameters, building station
/// tables or writing reports.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("curve length must be a positive finite number, got {0}")]
    InvalidLength(f64),

    #[error("station interval must be a positive finite number, got {0}")]
    InvalidInterval(f64),

    #[error("{which} grade must be a non-negative finite percentage, got {value}")]
    InvalidGrade { which: &'static str, value: f64 },

    #[error("invalid station: {0}")]
    InvalidStation(String),

    #[error("station table length {requested} does not match curve length {geometry}")]
    LengthMismatch { geometry: f64, requested: f64 },

    #[error("unknown curve kind: {0}")]
    UnknownCurveKind(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("report error: {0}")]
    Report(String),
}

pub type Result<T> = std::result::Result<T, ProfileError>;
