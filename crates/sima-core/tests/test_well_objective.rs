use sima_core::error::SimaError;
use sima_core::metadata::objective::{pixel_pitch_um, OBJECTIVE_RESOLUTIONS};
use sima_core::metadata::timestamp::normalize_date;
use sima_core::metadata::well::well_to_row_col;

#[test]
fn test_well_examples() {
    let a5 = well_to_row_col("A5").unwrap();
    assert_eq!((a5.row, a5.column), (1, 5));
    let p1 = well_to_row_col("P1").unwrap();
    assert_eq!((p1.row, p1.column), (16, 1));
}

#[test]
fn test_every_row_letter_maps_to_its_position() {
    for (i, letter) in "ABCDEFGHIJKLMNOP".chars().enumerate() {
        for column in [1u32, 12, 24] {
            let well = well_to_row_col(&format!("{letter}{column}")).unwrap();
            assert_eq!(well.row, i as u32 + 1, "row of {letter}{column}");
            assert_eq!(well.column, column);
        }
    }
}

#[test]
fn test_lowercase_well_accepted() {
    let well = well_to_row_col("c7").unwrap();
    assert_eq!((well.row, well.column), (3, 7));
}

#[test]
fn test_invalid_wells_rejected() {
    for bad in ["", "Q1", "A", "A0", "5A", "AA1", "A-3"] {
        assert!(
            matches!(well_to_row_col(bad), Err(SimaError::InvalidWellId(_))),
            "{bad:?} should be rejected"
        );
    }
}

#[test]
fn test_objective_table() {
    let expected = [
        (4, "1.6286"),
        (10, "0.6500"),
        (20, "0.3250"),
        (40, "0.1612"),
        (60, "0.1082"),
    ];
    for (magnification, pitch) in expected {
        assert_eq!(pixel_pitch_um(magnification).unwrap(), pitch);
    }
    assert_eq!(OBJECTIVE_RESOLUTIONS.len(), expected.len());
}

#[test]
fn test_unknown_objective_rejected() {
    for magnification in [0, 5, 25, 63, 100] {
        assert!(matches!(
            pixel_pitch_um(magnification),
            Err(SimaError::UnrecognizedObjective(m)) if m == magnification
        ));
    }
}

#[test]
fn test_instrument_date_is_utc_midnight() {
    let t = normalize_date("09/15/23").unwrap();
    assert_eq!(t.iso, "2023-09-15T00:00:00Z");
    assert_eq!(t.epoch_seconds, 1_694_736_000);
}

#[test]
fn test_dates_one_day_apart() {
    let a = normalize_date("12/31/23").unwrap();
    let b = normalize_date("01/01/24").unwrap();
    assert_eq!(b.epoch_seconds - a.epoch_seconds, 86_400);
    assert_eq!(b.iso, "2024-01-01T00:00:00Z");
}

#[test]
fn test_invalid_dates_rejected() {
    for bad in ["", "2023-09-15", "13/01/23", "02/30/23", "today"] {
        assert!(
            matches!(normalize_date(bad), Err(SimaError::InvalidDate(_))),
            "{bad:?} should be rejected"
        );
    }
}
