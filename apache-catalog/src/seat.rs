use serde::Serialize;
use std::fmt;

/// A seat position: a row number and a column letter, e.g. `12B`.
///
/// A `SeatId` only says the token was well formed and in range for the
/// [`SeatMap`](crate::SeatMap) that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SeatId {
    pub row: u32,
    pub column: char,
}

impl SeatId {
    pub fn new(row: u32, column: char) -> Self {
        Self {
            row,
            column: column.to_ascii_uppercase(),
        }
    }
}

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.row, self.column)
    }
}

/// Why a seat token was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeatIdError {
    #[error("Seat '{0}' is not a row number followed by a column letter")]
    Malformed(String),

    #[error("Row {row} is outside 1-{rows}")]
    RowOutOfRange {
        row: String,
        rows: u32,
    },

    #[error("Column '{column}' is not one of {columns}")]
    UnknownColumn {
        column: char,
        columns: String,
    },
}

/// Split a token into its numeric row prefix and upper-cased column letter.
///
/// Only the shape is checked here; range checks need the grid.
pub(crate) fn split_token(token: &str) -> Result<(&str, char), SeatIdError> {
    let malformed = || SeatIdError::Malformed(token.to_string());

    let column = token.chars().last().ok_or_else(malformed)?;
    if !column.is_alphabetic() {
        return Err(malformed());
    }

    let row = &token[..token.len() - column.len_utf8()];
    if row.is_empty() || !row.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    Ok((row, column.to_ascii_uppercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_token() {
        assert_eq!(split_token("12B").unwrap(), ("12", 'B'));
        assert_eq!(split_token("12b").unwrap(), ("12", 'B'));
        assert_eq!(split_token("007A").unwrap(), ("007", 'A'));
    }

    #[test]
    fn test_split_token_rejects_bad_shapes() {
        for token in ["", "B", "12", "B12", "1 2B", "-1A", "12B3", "12?"] {
            assert!(
                matches!(split_token(token), Err(SeatIdError::Malformed(_))),
                "{token} should be malformed"
            );
        }
    }

    #[test]
    fn test_display_round_trips_token() {
        assert_eq!(SeatId::new(12, 'b').to_string(), "12B");
    }
}
