use std::fmt;

use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TableKind {
    Players,
    Teams,
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableKind::Players => f.write_str("player"),
            TableKind::Teams => f.write_str("team"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required {table} columns: {}", .missing.join(", "))]
pub struct SchemaValidationError {
    pub table: TableKind,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataQualityWarning {
    pub row: usize,
    pub column: String,
    pub raw: String,
}

impl fmt::Display for DataQualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} column {}: {:?}", self.row, self.column, self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_error_lists_every_missing_field() {
        let err = SchemaValidationError {
            table: TableKind::Teams,
            missing: vec!["shots".to_string(), "key_passes".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "missing required team columns: shots, key_passes"
        );
    }
}
