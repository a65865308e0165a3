//! Profile sheet generation in SVG format.
//!
//! The sheet shows the parabola over the curve extent, both tangents extended
//! by a third of the curve length past the curve ends, the singular points,
//! the vertex when one exists and a tick for every tabulated station. The
//! drawing is scaled to fit the sheet and is not to scale vertically.

use crate::alignment::{format_grade, CurveGeometry, CurveKind};
use crate::error::Result;
use crate::geometry::{bbox, Point, Polyline};
use crate::stationing::StationRecord;

/// Sheet size and sampling density.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetOptions {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Number of samples along the parabola.
    pub samples: usize,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            width: 900.0,
            height: 500.0,
            margin: 60.0,
            samples: 200,
        }
    }
}

/// Curves and markers of a profile drawing in curve coordinates
/// (`x` from the curve start, `y` elevation).
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileDrawing {
    pub parabola: Polyline,
    pub tangent_in: Polyline,
    pub tangent_out: Polyline,
    pub start: Point,
    pub end: Point,
    pub piv: Point,
    pub vertex: Option<Point>,
}

impl ProfileDrawing {
    pub fn new(geometry: &CurveGeometry, samples: usize) -> Self {
        let l = geometry.length;
        let lead = l / 3.0;
        Self {
            parabola: Polyline::sample(0.0, l, samples, |x| geometry.elevation_at(x)),
            tangent_in: Polyline::sample(-lead, l, 2, |x| geometry.tangent_in_at(x)),
            tangent_out: Polyline::sample(0.0, l + lead, 2, |x| geometry.tangent_out_at(x)),
            start: Point::new(0.0, geometry.start_elevation),
            end: Point::new(l, geometry.end_elevation),
            piv: Point::new(l / 2.0, geometry.piv_on_curve_elevation),
            vertex: geometry.vertex.map(|v| Point::new(v.position, v.elevation)),
        }
    }

    fn all_points(&self) -> Vec<Point> {
        let mut pts = Vec::new();
        pts.extend_from_slice(&self.parabola.vertices);
        pts.extend_from_slice(&self.tangent_in.vertices);
        pts.extend_from_slice(&self.tangent_out.vertices);
        pts.extend([self.start, self.end, self.piv]);
        pts.extend(self.vertex);
        pts
    }
}

/// Maps curve coordinates onto the sheet.
struct Frame {
    min_x: f64,
    min_y: f64,
    scale_x: f64,
    scale_y: f64,
    margin: f64,
    height: f64,
}

impl Frame {
    fn fit(points: &[Point], opts: &SheetOptions) -> Self {
        let (min_x, mut min_y, max_x, mut max_y) = bbox(points).unwrap_or((0.0, 0.0, 1.0, 1.0));
        if (max_y - min_y).abs() < f64::EPSILON {
            min_y -= 1.0;
            max_y += 1.0;
        }
        let span_x = if (max_x - min_x).abs() < f64::EPSILON { 1.0 } else { max_x - min_x };
        Self {
            min_x,
            min_y,
            scale_x: (opts.width - 2.0 * opts.margin) / span_x,
            scale_y: (opts.height - 2.0 * opts.margin) / (max_y - min_y),
            margin: opts.margin,
            height: opts.height,
        }
    }

    fn map(&self, p: Point) -> Point {
        Point::new(
            self.margin + (p.x - self.min_x) * self.scale_x,
            self.height - self.margin - (p.y - self.min_y) * self.scale_y,
        )
    }
}

fn polyline(svg: &mut String, frame: &Frame, line: &Polyline, stroke: &str, extra: &str) {
    svg.push_str("<polyline points='");
    for p in &line.vertices {
        let q = frame.map(*p);
        svg.push_str(&format!("{:.2},{:.2} ", q.x, q.y));
    }
    svg.push_str(&format!("' fill='none' stroke='{stroke}' {extra}/>\n"));
}

fn text(svg: &mut String, at: Point, body: &str, fill: &str) {
    svg.push_str(&format!(
        "<text x='{:.2}' y='{:.2}' text-anchor='middle' font-size='12' fill='{fill}'>{body}</text>\n",
        at.x, at.y
    ));
}

fn star(svg: &mut String, center: Point, radius: f64) {
    svg.push_str("<polygon class='vertex' points='");
    for i in 0..10 {
        let r = if i % 2 == 0 { radius } else { radius * 0.45 };
        let ang = -std::f64::consts::FRAC_PI_2 + i as f64 * std::f64::consts::PI / 5.0;
        svg.push_str(&format!(
            "{:.2},{:.2} ",
            center.x + r * ang.cos(),
            center.y + r * ang.sin()
        ));
    }
    svg.push_str("' fill='blue' />\n");
}

/// Renders the profile sheet to an SVG document.
pub fn profile_svg(
    geometry: &CurveGeometry,
    stations: &[StationRecord],
    opts: &SheetOptions,
) -> String {
    let drawing = ProfileDrawing::new(geometry, opts.samples);
    let frame = Frame::fit(&drawing.all_points(), opts);
    // labels sit outside the curve: above a crest, below a sag
    let label_dy = match geometry.kind {
        CurveKind::Crest => -12.0,
        CurveKind::Sag => 20.0,
    };
    let label_at = |p: Point| {
        let q = frame.map(p);
        Point::new(q.x, q.y + label_dy)
    };

    let mut svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{}' height='{}'>\n",
        opts.width, opts.height
    );
    text(
        &mut svg,
        Point::new(opts.width / 2.0, opts.margin / 2.0),
        &format!("Vertical Curve Profile ({})", geometry.kind),
        "black",
    );

    polyline(&mut svg, &frame, &drawing.tangent_in, "gray", "stroke-dasharray='6,4' ");
    polyline(&mut svg, &frame, &drawing.tangent_out, "orange", "stroke-dasharray='6,4' ");
    polyline(&mut svg, &frame, &drawing.parabola, "black", "stroke-width='2' ");

    for (p, label) in [
        (drawing.start, "A (PCV)"),
        (drawing.end, "B (PTV)"),
        (drawing.piv, "I (PIV)"),
    ] {
        let q = frame.map(p);
        svg.push_str(&format!(
            "<circle cx='{:.2}' cy='{:.2}' r='4' fill='red' />\n",
            q.x, q.y
        ));
        text(&mut svg, label_at(p), label, "black");
    }

    if let Some(v) = drawing.vertex {
        star(&mut svg, frame.map(v), 8.0);
        let at = label_at(v);
        text(&mut svg, Point::new(at.x, at.y + label_dy), "V (Vertex)", "blue");
    }

    let l = geometry.length;
    let x1 = l / 4.0;
    let x2 = 3.0 * l / 4.0;
    text(
        &mut svg,
        label_at(Point::new(x1, geometry.tangent_in_at(x1))),
        &format!("i1 = {}", format_grade(geometry.grade1)),
        "gray",
    );
    text(
        &mut svg,
        label_at(Point::new(x2, geometry.tangent_out_at(x2))),
        &format!("i2 = {}", format_grade(geometry.grade2)),
        "orange",
    );

    let axis_y = opts.height - opts.margin / 2.0;
    for r in stations {
        let q = frame.map(Point::new(r.offset_from_start, r.elevation));
        svg.push_str(&format!(
            "<line class='station' x1='{:.2}' y1='{:.2}' x2='{:.2}' y2='{:.2}' stroke='lightgray' />\n",
            q.x, q.y, q.x, axis_y
        ));
        text(&mut svg, Point::new(q.x, axis_y + 12.0), &r.label, "black");
    }

    svg.push_str("</svg>\n");
    svg
}

/// Writes the profile sheet to `path`.
pub fn write_profile_svg(
    path: &str,
    geometry: &CurveGeometry,
    stations: &[StationRecord],
    opts: &SheetOptions,
) -> Result<()> {
    crate::io::write_string(path, &profile_svg(geometry, stations, opts))?;
    log::info!("wrote profile sheet to {path}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alignment::{compute_geometry, CurveInput};

    #[test]
    fn tangents_extend_past_curve() {
        let geom = compute_geometry(&CurveInput::default()).unwrap();
        let drawing = ProfileDrawing::new(&geom, 50);
        assert!((drawing.tangent_in.vertices[0].x + 40.0).abs() < 1e-9);
        assert!((drawing.tangent_out.vertices[1].x - 160.0).abs() < 1e-9);
        assert_eq!(drawing.parabola.vertices.len(), 50);
    }

    #[test]
    fn frame_flips_elevation() {
        let opts = SheetOptions::default();
        let frame = Frame::fit(&[Point::new(0.0, 0.0), Point::new(10.0, 10.0)], &opts);
        let low = frame.map(Point::new(0.0, 0.0));
        let high = frame.map(Point::new(10.0, 10.0));
        assert!(high.y < low.y);
        assert!((low.x - opts.margin).abs() < 1e-9);
    }
}
