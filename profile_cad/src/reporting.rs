//! Human readable reports of a vertical curve computation.
//!
//! The text rows are always available. PDF and Excel writers need the
//! `reporting` feature.

use chrono::NaiveDate;
#[cfg(feature = "reporting")]
use genpdf::{elements::Paragraph, Alignment, Document};
#[cfg(feature = "reporting")]
use umya_spreadsheet::{self, writer::xlsx, Spreadsheet};

use crate::alignment::{format_grade, CurveGeometry, CurveInput};
#[cfg(feature = "reporting")]
use crate::error::ProfileError;
use crate::error::Result;
use crate::stationing::{station_label, StationRecord};

/// Identification printed at the top of every report.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ReportHeader {
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub user: String,
}

impl ReportHeader {
    pub fn new(project: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            user: user.into(),
        }
    }
}

/// Everything a report needs, computed once by the caller.
#[derive(Debug, Clone)]
pub struct CurveReport<'a> {
    pub header: &'a ReportHeader,
    pub input: &'a CurveInput,
    pub geometry: &'a CurveGeometry,
    pub stations: &'a [StationRecord],
    pub date: Option<NaiveDate>,
    /// Path of the profile sheet written alongside the report.
    pub drawing: Option<String>,
}

impl<'a> CurveReport<'a> {
    pub fn new(
        header: &'a ReportHeader,
        input: &'a CurveInput,
        geometry: &'a CurveGeometry,
        stations: &'a [StationRecord],
    ) -> Self {
        Self {
            header,
            input,
            geometry,
            stations,
            date: None,
            drawing: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn with_drawing(mut self, path: impl Into<String>) -> Self {
        self.drawing = Some(path.into());
        self
    }

    /// Input parameters and computed values, one line each.
    pub fn summary_rows(&self) -> Vec<String> {
        let input = self.input;
        let geom = self.geometry;
        let mut rows = vec![
            format!("Project: {}", self.header.project),
            format!("User: {}", self.header.user),
        ];
        if let Some(date) = self.date {
            rows.push(format!("Date: {}", date.format("%Y-%m-%d")));
        }
        rows.push(String::new());
        rows.push("Input parameters:".to_string());
        rows.push(format!("Curve kind: {}", input.kind));
        rows.push(format!("PIV elevation: {:.3} m", input.piv_elevation));
        rows.push(format!(
            "PIV chainage: {:.3} m ({})",
            input.piv_chainage,
            station_label(input.piv_chainage, input.station_interval)
        ));
        rows.push(format!("i1: {:.2}%", input.grade1_percent));
        rows.push(format!("i2: {:.2}%", input.grade2_percent));
        rows.push(format!("Length L: {:.3} m", input.length));
        rows.push(format!("Station interval: {:.3} m", input.station_interval));
        rows.push(String::new());
        rows.push("Results:".to_string());
        rows.push(format!(
            "Signed grades: i1 = {}, i2 = {}",
            format_grade(geom.grade1),
            format_grade(geom.grade2)
        ));
        rows.push(format!("Grade break (g): {:.5}", geom.grade_break));
        rows.push(format!("Mid offset (e): {:.4} m", geom.mid_offset));
        rows.push(format!("Elevation A (PCV): {:.3} m", geom.start_elevation));
        rows.push(format!("Elevation of PIV on curve: {:.3} m", geom.piv_on_curve_elevation));
        rows.push(format!("Elevation B (PTV): {:.3} m", geom.end_elevation));
        match geom.vertex {
            Some(v) => rows.push(format!("Vertex: x={:.3} m, Z={:.3} m", v.position, v.elevation)),
            None => rows.push("Vertex: none (zero grade break)".to_string()),
        }
        if let Some(drawing) = &self.drawing {
            rows.push(String::new());
            rows.push(format!("Profile drawing: {drawing}"));
        }
        rows
    }

    /// Station table as aligned text lines, header first.
    pub fn station_rows(&self) -> Vec<String> {
        let mut rows = vec![format!(
            "{:<12} {:>12} {:>10} {:>12} {}",
            "Station", "Chainage", "Offset", "Elevation", "Role"
        )];
        rows.extend(self.stations.iter().map(|r| {
            format!(
                "{:<12} {:>12.3} {:>10.3} {:>12.3} {}",
                r.label, r.chainage, r.offset_from_start, r.elevation, r.role
            )
        }));
        rows
    }

    /// Full report: summary followed by the station table.
    pub fn rows(&self) -> Vec<String> {
        let mut rows = self.summary_rows();
        rows.push(String::new());
        rows.push("Stations:".to_string());
        rows.extend(self.station_rows());
        rows
    }

    /// Cells for spreadsheet export.
    pub fn table_cells(&self) -> Vec<Vec<String>> {
        let mut cells = vec![vec![
            "Station".to_string(),
            "Chainage".to_string(),
            "Offset".to_string(),
            "Elevation".to_string(),
            "Role".to_string(),
        ]];
        cells.extend(self.stations.iter().map(|r| {
            vec![
                r.label.clone(),
                format!("{:.3}", r.chainage),
                format!("{:.3}", r.offset_from_start),
                format!("{:.3}", r.elevation),
                r.role.to_string(),
            ]
        }));
        cells
    }
}

/// Writes the full report as plain text.
pub fn write_report_text(path: &str, report: &CurveReport) -> Result<()> {
    let mut text = report.rows().join("\n");
    text.push('\n');
    crate::io::write_string(path, &text)?;
    log::info!("wrote text report to {path}");
    Ok(())
}

#[cfg(feature = "reporting")]
fn font_dir() -> String {
    // The font files are not stored in the repository; place DejaVuSans in
    // `profile_cad/assets` or point PROFILE_CAD_FONT_DIR elsewhere.
    std::env::var("PROFILE_CAD_FONT_DIR")
        .unwrap_or_else(|_| concat!(env!("CARGO_MANIFEST_DIR"), "/assets").to_string())
}

#[cfg(feature = "reporting")]
fn write_pdf(path: &str, title: &str, rows: &[String]) -> Result<()> {
    let font_family = genpdf::fonts::from_files(font_dir(), "DejaVuSans", None)
        .map_err(|e| ProfileError::Report(e.to_string()))?;
    let mut doc = Document::new(font_family);
    doc.set_title(title);
    doc.push(Paragraph::new(title).aligned(Alignment::Center));
    for r in rows {
        doc.push(Paragraph::new(r.as_str()).aligned(Alignment::Left));
    }
    doc.render_to_file(path)
        .map_err(|e| ProfileError::Report(e.to_string()))
}

#[cfg(feature = "reporting")]
fn write_excel(path: &str, rows: &[Vec<String>]) -> Result<()> {
    let mut wb: Spreadsheet = umya_spreadsheet::new_file();
    let ws = wb
        .get_sheet_mut(&0)
        .ok_or_else(|| ProfileError::Report("workbook has no sheet".to_string()))?;
    for (r_idx, row) in rows.iter().enumerate() {
        for (c_idx, val) in row.iter().enumerate() {
            ws.get_cell_mut(((c_idx + 1) as u32, (r_idx + 1) as u32))
                .set_value(val.as_str());
        }
    }
    xlsx::write(&wb, path).map_err(|e| ProfileError::Report(e.to_string()))
}

/// Writes the report to a PDF document.
#[cfg(feature = "reporting")]
pub fn curve_report_pdf(path: &str, report: &CurveReport) -> Result<()> {
    let title = format!("Vertical Curve Profile ({})", report.input.kind);
    write_pdf(path, &title, &report.rows())?;
    log::info!("wrote PDF report to {path}");
    Ok(())
}

/// Writes the station table to an Excel workbook.
#[cfg(feature = "reporting")]
pub fn station_table_excel(path: &str, report: &CurveReport) -> Result<()> {
    write_excel(path, &report.table_cells())?;
    log::info!("wrote station table workbook to {path}");
    Ok(())
}
