use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Physical configuration of the cabin: how many rows, which column letters,
/// and which block at the back is given over to storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CabinLayout {
    #[serde(default = "default_rows")]
    pub rows: u32,
    #[serde(default = "default_columns")]
    pub columns: String,
    #[serde(default)]
    pub storage: StorageZone,
}

/// Cells at or behind `from_row` in any of `columns` are storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageZone {
    pub from_row: u32,
    pub columns: String,
}

fn default_rows() -> u32 { 80 }
fn default_columns() -> String { "ABCDEF".to_string() }

impl Default for StorageZone {
    fn default() -> Self {
        Self {
            from_row: 77,
            columns: "DEF".to_string(),
        }
    }
}

impl Default for CabinLayout {
    fn default() -> Self {
        Self {
            rows: default_rows(),
            columns: default_columns(),
            storage: StorageZone::default(),
        }
    }
}

impl StorageZone {
    pub fn contains(&self, row: u32, column: char) -> bool {
        row >= self.from_row
            && self
                .columns
                .chars()
                .any(|c| c.eq_ignore_ascii_case(&column))
    }
}

impl CabinLayout {
    /// Column letters in seating order, upper-cased.
    pub fn column_codes(&self) -> Vec<char> {
        self.columns.chars().map(|c| c.to_ascii_uppercase()).collect()
    }

    pub fn is_storage(&self, row: u32, column: char) -> bool {
        self.storage.contains(row, column)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.rows == 0 {
            return Err(LayoutError::NoRows);
        }

        let codes = self.column_codes();
        if codes.is_empty() {
            return Err(LayoutError::NoColumns);
        }

        let mut seen = HashSet::new();
        for code in &codes {
            if !code.is_ascii_alphabetic() {
                return Err(LayoutError::InvalidColumn(*code));
            }
            if !seen.insert(*code) {
                return Err(LayoutError::DuplicateColumn(*code));
            }
        }

        if let Some(code) = self
            .storage
            .columns
            .chars()
            .map(|c| c.to_ascii_uppercase())
            .find(|c| !seen.contains(c))
        {
            return Err(LayoutError::UnknownStorageColumn(code));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("Cabin must have at least one row")]
    NoRows,

    #[error("Cabin must have at least one column")]
    NoColumns,

    #[error("Column code '{0}' is not a letter")]
    InvalidColumn(char),

    #[error("Column code '{0}' appears more than once")]
    DuplicateColumn(char),

    #[error("Storage column '{0}' is not a cabin column")]
    UnknownStorageColumn(char),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = CabinLayout::default();
        assert_eq!(layout.rows, 80);
        assert_eq!(layout.column_codes(), vec!['A', 'B', 'C', 'D', 'E', 'F']);
        assert!(layout.validate().is_ok());

        assert!(layout.is_storage(77, 'D'));
        assert!(layout.is_storage(80, 'f'));
        assert!(!layout.is_storage(76, 'D'));
        assert!(!layout.is_storage(80, 'C'));
    }

    #[test]
    fn test_validate_rejects_bad_layouts() {
        let mut layout = CabinLayout::default();
        layout.rows = 0;
        assert_eq!(layout.validate(), Err(LayoutError::NoRows));

        let mut layout = CabinLayout::default();
        layout.columns = String::new();
        assert_eq!(layout.validate(), Err(LayoutError::NoColumns));

        let mut layout = CabinLayout::default();
        layout.columns = "ABCA".to_string();
        assert_eq!(layout.validate(), Err(LayoutError::DuplicateColumn('A')));

        let mut layout = CabinLayout::default();
        layout.columns = "AB1".to_string();
        assert_eq!(layout.validate(), Err(LayoutError::InvalidColumn('1')));

        let mut layout = CabinLayout::default();
        layout.storage.columns = "XYZ".to_string();
        assert_eq!(layout.validate(), Err(LayoutError::UnknownStorageColumn('X')));
    }

    #[test]
    fn test_partial_layout_uses_defaults() {
        let layout: CabinLayout = serde_json::from_str(r#"{ "rows": 20 }"#).unwrap();
        assert_eq!(layout.rows, 20);
        assert_eq!(layout.columns, "ABCDEF");
        assert_eq!(layout.storage, StorageZone::default());
    }
}
