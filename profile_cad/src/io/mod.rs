//! File input and output helpers for profile data.

use std::fs::File;
use std::io::{self, Read, Write};

use crate::stationing::StationRecord;

pub mod project;
pub use project::{read_project_json, write_project_json, ProfileProject};

/// Reads a file to string.
pub fn read_to_string(path: &str) -> io::Result<String> {
    let mut buffer = String::new();
    File::open(path)?.read_to_string(&mut buffer)?;
    Ok(buffer)
}

/// Writes a string to a file, replacing any existing content.
pub fn write_string(path: &str, contents: &str) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())
}

/// Header line of the station table CSV.
pub const STATION_CSV_HEADER: &str = "label,chainage,offset,elevation,role";

/// Renders the station table as CSV text with a header row.
pub fn station_table_csv(records: &[StationRecord]) -> String {
    let mut out = String::from(STATION_CSV_HEADER);
    out.push('\n');
    for r in records {
        out.push_str(&format!(
            "{},{:.3},{:.3},{:.3},{}\n",
            r.label, r.chainage, r.offset_from_start, r.elevation, r.role
        ));
    }
    out
}

/// Writes the station table to `path` as CSV.
pub fn write_station_table_csv(path: &str, records: &[StationRecord]) -> io::Result<()> {
    write_string(path, &station_table_csv(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stationing::StationRole;

    #[test]
    fn csv_rows() {
        let records = vec![StationRecord {
            label: "27+12.50".to_string(),
            chainage: 552.5,
            offset_from_start: 0.0,
            elevation: 199.025,
            role: StationRole::Start,
        }];
        let csv = station_table_csv(&records);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some(STATION_CSV_HEADER));
        assert_eq!(lines.next(), Some("27+12.50,552.500,0.000,199.025,PCV"));
        assert_eq!(lines.next(), None);
    }
}
