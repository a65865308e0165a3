//! Parabolic vertical curve joining two grade lines at a PIV.
//!
//! Distances along the curve are measured from the curve start (PCV), so the
//! PIV projects onto `x = L / 2` and the curve end (PTV) lies at `x = L`.

use std::fmt;
use std::str::FromStr;

use crate::error::{ProfileError, Result};
use crate::stationing::DEFAULT_STATION_INTERVAL;

/// Shape of the vertical curve. The kind fixes the sign of both grades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CurveKind {
    /// Concave down: rising grade into a falling grade.
    #[default]
    Crest,
    /// Concave up: falling grade into a rising grade.
    Sag,
}

impl CurveKind {
    /// Converts grade magnitudes in percent into signed decimal grades.
    pub fn signed_grades(self, grade1_percent: f64, grade2_percent: f64) -> (f64, f64) {
        let g1 = grade1_percent / 100.0;
        let g2 = grade2_percent / 100.0;
        match self {
            CurveKind::Crest => (g1, -g2),
            CurveKind::Sag => (-g1, g2),
        }
    }
}

impl fmt::Display for CurveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveKind::Crest => write!(f, "Crest"),
            CurveKind::Sag => write!(f, "Sag"),
        }
    }
}

impl FromStr for CurveKind {
    type Err = ProfileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "crest" | "convex" | "convexa" => Ok(CurveKind::Crest),
            "sag" | "concave" | "concava" => Ok(CurveKind::Sag),
            _ => Err(ProfileError::UnknownCurveKind(s.to_string())),
        }
    }
}

fn default_station_interval() -> f64 {
    DEFAULT_STATION_INTERVAL
}

/// Parameters of a single vertical curve.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveInput {
    pub kind: CurveKind,
    /// Elevation of the grade line intersection in meters.
    pub piv_elevation: f64,
    /// Position of the PIV along the alignment in meters.
    pub piv_chainage: f64,
    /// Magnitude of the incoming grade in percent.
    pub grade1_percent: f64,
    /// Magnitude of the outgoing grade in percent.
    pub grade2_percent: f64,
    /// Total curve length in meters.
    pub length: f64,
    #[serde(default = "default_station_interval")]
    pub station_interval: f64,
}

impl Default for CurveInput {
    fn default() -> Self {
        Self {
            kind: CurveKind::Crest,
            piv_elevation: 200.0,
            piv_chainage: 612.5,
            grade1_percent: 2.5,
            grade2_percent: 1.0,
            length: 120.0,
            station_interval: DEFAULT_STATION_INTERVAL,
        }
    }
}

impl CurveInput {
    /// Checks every field, including the station interval and the PIV
    /// placement which the geometry itself does not need.
    pub fn validate(&self) -> Result<()> {
        check_curve_parameters(self)?;
        if !self.piv_elevation.is_finite() {
            return Err(ProfileError::InvalidStation(format!(
                "PIV elevation {} is not finite",
                self.piv_elevation
            )));
        }
        if !self.piv_chainage.is_finite() {
            return Err(ProfileError::InvalidStation(format!(
                "PIV chainage {} is not finite",
                self.piv_chainage
            )));
        }
        if !(self.station_interval.is_finite() && self.station_interval > 0.0) {
            return Err(ProfileError::InvalidInterval(self.station_interval));
        }
        Ok(())
    }

    /// Chainage of the curve start (PCV).
    pub fn start_chainage(&self) -> f64 {
        self.piv_chainage - self.length / 2.0
    }

    /// Chainage of the curve end (PTV).
    pub fn end_chainage(&self) -> f64 {
        self.piv_chainage + self.length / 2.0
    }
}

fn check_curve_parameters(input: &CurveInput) -> Result<()> {
    if !(input.length.is_finite() && input.length > 0.0) {
        return Err(ProfileError::InvalidLength(input.length));
    }
    for (which, value) in [("incoming", input.grade1_percent), ("outgoing", input.grade2_percent)] {
        if !(value.is_finite() && value >= 0.0) {
            return Err(ProfileError::InvalidGrade { which, value });
        }
    }
    Ok(())
}

/// Extreme point of the parabola, relative to the curve start.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Vertex {
    /// Distance from the curve start, may fall outside `[0, L]`.
    pub position: f64,
    /// Elevation difference between the vertex and the curve start.
    pub rise: f64,
    pub elevation: f64,
}

/// Derived quantities of a vertical curve.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurveGeometry {
    pub kind: CurveKind,
    pub length: f64,
    pub piv_elevation: f64,
    /// Signed incoming grade as a fraction.
    pub grade1: f64,
    /// Signed outgoing grade as a fraction.
    pub grade2: f64,
    /// `grade1 - grade2`.
    pub grade_break: f64,
    /// Vertical offset `e = L / 8 * g`.
    pub mid_offset: f64,
    pub start_elevation: f64,
    pub end_elevation: f64,
    /// Curve elevation at `x = L / 2`.
    pub piv_on_curve_elevation: f64,
    /// `None` when the grade break is zero and the curve is a straight line.
    pub vertex: Option<Vertex>,
}

/// Computes the geometry of the vertical curve described by `input`.
///
/// Fails only for a non-positive length or a negative grade magnitude. A flat
/// profile (zero grade break) is not an error; it yields no vertex.
pub fn compute_geometry(input: &CurveInput) -> Result<CurveGeometry> {
    check_curve_parameters(input)?;

    let l = input.length;
    let (g1, g2) = input.kind.signed_grades(input.grade1_percent, input.grade2_percent);
    let g = g1 - g2;
    let e = l / 8.0 * g;

    let start_elevation = input.piv_elevation - g1 * (l / 2.0) + e;
    let end_elevation = start_elevation + (g1 + g2) / 2.0 * l;
    let piv_on_curve_elevation = start_elevation + g1 * (l / 2.0) - e;

    let vertex = if g.abs() < f64::EPSILON {
        log::warn!("grade break is zero, curve has no vertex");
        None
    } else {
        let rise = g1 * g1 * l / (2.0 * g);
        Some(Vertex {
            position: g1 * l / g,
            rise,
            elevation: start_elevation + rise,
        })
    };

    log::debug!(
        "{} curve L={} g1={} g2={} g={} e={} Z_A={} Z_B={}",
        input.kind,
        l,
        g1,
        g2,
        g,
        e,
        start_elevation,
        end_elevation
    );

    Ok(CurveGeometry {
        kind: input.kind,
        length: l,
        piv_elevation: input.piv_elevation,
        grade1: g1,
        grade2: g2,
        grade_break: g,
        mid_offset: e,
        start_elevation,
        end_elevation,
        piv_on_curve_elevation,
        vertex,
    })
}

impl CurveGeometry {
    /// Elevation of the parabola at distance `x` from the curve start.
    ///
    /// Not clamped to the curve extent.
    pub fn elevation_at(&self, x: f64) -> f64 {
        self.start_elevation + self.grade1 * x - self.grade_break / (2.0 * self.length) * x * x
    }

    /// Elevation of the incoming tangent through the curve start.
    pub fn tangent_in_at(&self, x: f64) -> f64 {
        self.start_elevation + self.grade1 * x
    }

    /// Elevation of the outgoing tangent through the curve end.
    pub fn tangent_out_at(&self, x: f64) -> f64 {
        self.end_elevation + self.grade2 * (x - self.length)
    }

    /// Slope of the parabola at distance `x` from the curve start.
    pub fn grade_at(&self, x: f64) -> f64 {
        self.grade1 - self.grade_break / self.length * x
    }

    pub fn has_vertex(&self) -> bool {
        self.vertex.is_some()
    }

    /// Whether the vertex exists and lies within the physical curve.
    pub fn vertex_on_curve(&self) -> bool {
        self.vertex
            .map(|v| v.position >= 0.0 && v.position <= self.length)
            .unwrap_or(false)
    }
}

/// Formats a signed decimal grade as a percentage, e.g. `+2.50%`.
pub fn format_grade(grade: f64) -> String {
    format!("{:+.2}%", grade * 100.0)
}
