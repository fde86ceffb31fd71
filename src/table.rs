use anyhow::{Context, Result, anyhow};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn from_parts<C, R>(columns: &[C], rows: Vec<Vec<R>>) -> Self
    where
        C: AsRef<str>,
        R: Into<String>,
    {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn from_json_records(raw: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(raw).context("parse table json")?;
        let Some(records) = value.as_array() else {
            return Err(anyhow!("table json must be an array of records"));
        };

        let mut columns: Vec<String> = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            let Some(obj) = record.as_object() else {
                return Err(anyhow!("record {idx} is not an object"));
            };
            for key in obj.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let mut table = RawTable::new(columns);
        for record in records {
            let Some(obj) = record.as_object() else { continue };
            let row = table
                .columns
                .iter()
                .map(|col| obj.get(col).map(cell_text).unwrap_or_default())
                .collect();
            table.rows.push(row);
        }
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn rename_column(&mut self, from: &str, to: &str) -> bool {
        match self.column_index(from) {
            Some(idx) => {
                self.columns[idx] = to.to_string();
                true
            }
            None => false,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Lenient numeric parse for scraped cells ("1,234", "€50.5m").
pub fn parse_number(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() || s == "-" {
        return None;
    }
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-' || *c == ',')
        .collect();
    let cleaned = cleaned.replace(',', "");
    if cleaned.is_empty() || cleaned == "-" {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Like [`parse_number`], but a trailing `%` scales the value to a fraction.
pub fn parse_fraction(raw: &str) -> Option<f64> {
    let s = raw.trim();
    match s.strip_suffix('%') {
        Some(pct) => parse_number(pct).map(|v| v / 100.0),
        None => parse_number(s),
    }
}
