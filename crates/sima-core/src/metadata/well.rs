use crate::consts::WELL_ROW_LETTERS;
use crate::error::{Result, SimaError};

/// Plate position of a well, 1-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WellCoordinate {
    pub row: u32,
    pub column: u32,
}

/// Convert a well identifier such as `"A5"` into its row and column.
///
/// The row letter is case-insensitive and must be within A-P; the column must
/// be a positive integer.
pub fn well_to_row_col(well_id: &str) -> Result<WellCoordinate> {
    let invalid = || SimaError::InvalidWellId(well_id.to_string());
    let well = well_id.trim();
    let mut chars = well.chars();
    let letter = chars.next().ok_or_else(invalid)?.to_ascii_uppercase();

    let row = WELL_ROW_LETTERS
        .find(letter)
        .map(|pos| pos as u32 + 1)
        .ok_or_else(invalid)?;
    let column: u32 = chars.as_str().parse().map_err(|_| invalid())?;
    if column == 0 {
        return Err(invalid());
    }

    Ok(WellCoordinate { row, column })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_row() {
        assert_eq!(
            well_to_row_col("c12").unwrap(),
            WellCoordinate { row: 3, column: 12 }
        );
    }

    #[test]
    fn test_rejects_out_of_plate() {
        assert!(well_to_row_col("Q1").is_err());
        assert!(well_to_row_col("A0").is_err());
        assert!(well_to_row_col("A").is_err());
        assert!(well_to_row_col("").is_err());
        assert!(well_to_row_col("5A").is_err());
    }
}
