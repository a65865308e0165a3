use profile_cad::alignment::{compute_geometry, CurveGeometry, CurveInput, CurveKind};
use profile_cad::stationing::{build_station_table, StationRecord, StationRole};
use profile_cad::ProfileError;

fn table(piv: f64, length: f64, interval: f64) -> (CurveGeometry, Vec<StationRecord>) {
    let input = CurveInput {
        piv_chainage: piv,
        length,
        station_interval: interval,
        ..CurveInput::default()
    };
    let geom = compute_geometry(&input).unwrap();
    let records = build_station_table(&geom, piv, length, interval).unwrap();
    (geom, records)
}

fn chainages(records: &[StationRecord]) -> Vec<f64> {
    records.iter().map(|r| r.chainage).collect()
}

#[test]
fn table_covers_curve() {
    let (geom, records) = table(612.5, 120.0, 20.0);
    assert_eq!(
        chainages(&records),
        vec![552.5, 560.0, 580.0, 600.0, 612.5, 620.0, 640.0, 660.0, 672.5]
    );
    let first = &records[0];
    assert_eq!(first.role, StationRole::Start);
    assert_eq!(first.label, "27+12.50");
    assert!((first.elevation - geom.start_elevation).abs() < 1e-12);
    let last = records.last().unwrap();
    assert_eq!(last.role, StationRole::End);
    assert!((last.chainage - 672.5).abs() < 1e-9);
    assert!((last.offset_from_start - 120.0).abs() < 1e-9);
    assert!((last.elevation - geom.end_elevation).abs() < 1e-12);
    let piv = records
        .iter()
        .find(|r| r.role == StationRole::PivProjection)
        .unwrap();
    assert!((piv.chainage - 612.5).abs() < 1e-9);
    assert!((piv.offset_from_start - 60.0).abs() < 1e-9);
    assert!((piv.elevation - geom.piv_on_curve_elevation).abs() < 1e-12);
    assert_eq!(piv.label, "30+12.50");
}

#[test]
fn regular_rows_follow_the_parabola() {
    let (geom, records) = table(612.5, 120.0, 20.0);
    for r in records.iter().filter(|r| r.role == StationRole::Regular) {
        assert!((r.offset_from_start - (r.chainage - 552.5)).abs() < 1e-9);
        assert!((r.elevation - geom.elevation_at(r.offset_from_start)).abs() < 1e-12);
        assert!(((r.chainage / 20.0).round() * 20.0 - r.chainage).abs() < 1e-9);
        assert!(r.label.ends_with("+0.00"));
    }
}

#[test]
fn rows_strictly_ascending_and_in_curve() {
    let (_, records) = table(1234.56, 317.0, 20.0);
    for pair in records.windows(2) {
        assert!(pair[1].chainage > pair[0].chainage);
    }
    for r in &records {
        assert!(r.offset_from_start >= 0.0 && r.offset_from_start <= 317.0);
    }
    let singular = records.iter().filter(|r| r.role.is_singular()).count();
    assert_eq!(singular, 3);
}

#[test]
fn start_on_station_multiple_is_not_duplicated() {
    let (_, records) = table(600.0, 120.0, 20.0);
    assert_eq!(
        chainages(&records),
        vec![540.0, 560.0, 580.0, 600.0, 620.0, 640.0, 660.0]
    );
    assert_eq!(records[0].role, StationRole::Start);
    assert_eq!(records[3].role, StationRole::PivProjection);
    assert_eq!(records[6].role, StationRole::End);
    assert_eq!(
        records.iter().filter(|r| r.role == StationRole::Regular).count(),
        4
    );
}

#[test]
fn coincidence_survives_rounding_noise() {
    let (_, records) = table(0.7, 0.2, 0.1);
    let roles: Vec<StationRole> = records.iter().map(|r| r.role).collect();
    assert_eq!(
        roles,
        vec![StationRole::Start, StationRole::PivProjection, StationRole::End]
    );
}

#[test]
fn short_curve_has_only_singular_points() {
    let (_, records) = table(612.5, 10.0, 20.0);
    assert_eq!(chainages(&records), vec![607.5, 612.5, 617.5]);
}

#[test]
fn negative_start_chainage() {
    let (_, records) = table(30.0, 120.0, 20.0);
    assert_eq!(
        chainages(&records),
        vec![-30.0, -20.0, 0.0, 20.0, 30.0, 40.0, 60.0, 80.0, 90.0]
    );
    assert_eq!(records[0].label, "-2+10.00");
    assert_eq!(records[2].label, "0+0.00");
}

#[test]
fn custom_interval() {
    let (_, records) = table(612.5, 120.0, 25.0);
    assert_eq!(
        chainages(&records),
        vec![552.5, 575.0, 600.0, 612.5, 625.0, 650.0, 672.5]
    );
    assert_eq!(records[1].label, "23+0.00");
}

#[test]
fn repeated_calls_are_identical() {
    let (geom, first) = table(612.5, 120.0, 20.0);
    let second = build_station_table(&geom, 612.5, 120.0, 20.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn sag_table_uses_sag_geometry() {
    let input = CurveInput {
        kind: CurveKind::Sag,
        ..CurveInput::default()
    };
    let geom = compute_geometry(&input).unwrap();
    let records =
        build_station_table(&geom, input.piv_chainage, input.length, input.station_interval)
            .unwrap();
    let lowest = records
        .iter()
        .map(|r| r.elevation)
        .fold(f64::INFINITY, f64::min);
    assert!(lowest < geom.start_elevation);
    assert!(lowest < geom.end_elevation);
}

#[test]
fn rejects_non_positive_interval() {
    let (geom, _) = table(612.5, 120.0, 20.0);
    for interval in [0.0, -20.0, f64::NAN] {
        let err = build_station_table(&geom, 612.5, 120.0, interval).unwrap_err();
        assert!(matches!(err, ProfileError::InvalidInterval(_)));
    }
}

#[test]
fn rejects_bad_length() {
    let (geom, _) = table(612.5, 120.0, 20.0);
    let err = build_station_table(&geom, 612.5, 0.0, 20.0).unwrap_err();
    assert!(matches!(err, ProfileError::InvalidLength(_)));
    let err = build_station_table(&geom, 612.5, 100.0, 20.0).unwrap_err();
    assert!(matches!(err, ProfileError::LengthMismatch { .. }));
}

#[test]
fn rejects_non_finite_piv() {
    let (geom, _) = table(612.5, 120.0, 20.0);
    let err = build_station_table(&geom, f64::NAN, 120.0, 20.0).unwrap_err();
    assert!(matches!(err, ProfileError::InvalidStation(_)));
}
