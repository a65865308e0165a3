//! Basic 2D primitives for profile drawings.
//!
//! Profile points use `x` for the distance along the curve (or chainage) and
//! `y` for the elevation.

/// Representation of a 2D point.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Open polyline through a list of vertices.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Point>,
}

impl Polyline {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Samples `f` at `count` evenly spaced abscissae over `[from, to]`,
    /// both ends included.
    pub fn sample<F>(from: f64, to: f64, count: usize, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        if count < 2 {
            return Self::new(vec![Point::new(from, f(from))]);
        }
        let step = (to - from) / (count - 1) as f64;
        let vertices = (0..count)
            .map(|i| {
                let x = if i == count - 1 { to } else { from + step * i as f64 };
                Point::new(x, f(x))
            })
            .collect();
        Self { vertices }
    }
}

/// Axis aligned bounding box as `(min_x, min_y, max_x, max_y)`.
pub fn bbox(points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;
    for p in points.iter().skip(1) {
        if p.x < min_x { min_x = p.x; }
        if p.x > max_x { max_x = p.x; }
        if p.y < min_y { min_y = p.y; }
        if p.y > max_y { max_y = p.y; }
    }
    Some((min_x, min_y, max_x, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_includes_both_ends() {
        let line = Polyline::sample(-10.0, 10.0, 5, |x| 2.0 * x);
        assert_eq!(line.vertices.len(), 5);
        assert!((line.vertices[0].x + 10.0).abs() < 1e-12);
        assert!((line.vertices[4].x - 10.0).abs() < 1e-12);
        assert!((line.vertices[2].y - 0.0).abs() < 1e-12);
    }

    #[test]
    fn bbox_of_points() {
        let pts = vec![Point::new(1.0, 5.0), Point::new(-2.0, 3.0), Point::new(4.0, -1.0)];
        assert_eq!(bbox(&pts), Some((-2.0, -1.0, 4.0, 5.0)));
        assert_eq!(bbox(&[]), None);
    }
}
