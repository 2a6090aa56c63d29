//! Tabular survey data
//!
//! Every Census Data API endpoint answers with the same wire shape: a JSON
//! array whose first element is the header row and whose remaining elements
//! are data rows. Cells are strings, numbers, or null.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CensusError, Result};

/// A decoded survey table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Build a table from a header and rows, checking row widths
    pub fn new(header: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self> {
        for (i, row) in rows.iter().enumerate() {
            if row.len() != header.len() {
                return Err(CensusError::response(format!(
                    "row {} has {} cells, expected {}",
                    i,
                    row.len(),
                    header.len()
                )));
            }
        }
        Ok(Self { header, rows })
    }

    /// Decode the Census wire format (array of arrays, header first)
    pub fn from_value(value: Value) -> Result<Self> {
        let outer = match value {
            Value::Array(rows) => rows,
            other => {
                return Err(CensusError::response(format!(
                    "expected a JSON array, got {}",
                    type_name(&other)
                )))
            }
        };

        let mut iter = outer.into_iter();
        let header_row = iter
            .next()
            .ok_or_else(|| CensusError::response("empty response body"))?;

        let header = decode_row(&header_row)?
            .into_iter()
            .enumerate()
            .map(|(i, cell)| {
                cell.ok_or_else(|| CensusError::response(format!("null column name at index {}", i)))
            })
            .collect::<Result<Vec<String>>>()?;

        let rows = iter
            .map(|row| decode_row(&row))
            .collect::<Result<Vec<_>>>()?;

        Self::new(header, rows)
    }

    /// Column names, in wire order
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows (header excluded)
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.header.len()
    }

    /// Index of a named column
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h == name)
    }

    /// All values of a named column, in row order
    pub fn column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_deref()).collect())
    }

    /// Rows as JSON objects keyed by column name
    pub fn to_records(&self) -> Value {
        let records: Vec<Value> = self
            .rows
            .iter()
            .map(|row| {
                let mut object = Map::with_capacity(self.header.len());
                for (name, cell) in self.header.iter().zip(row) {
                    let value = match cell {
                        Some(s) => Value::String(s.clone()),
                        None => Value::Null,
                    };
                    object.insert(name.clone(), value);
                }
                Value::Object(object)
            })
            .collect();
        Value::Array(records)
    }

    /// Render as CSV; null cells become empty fields
    pub fn to_csv(&self) -> String {
        let mut out = String::new();
        push_csv_row(&mut out, self.header.iter().map(|h| h.as_str()));
        for row in &self.rows {
            push_csv_row(&mut out, row.iter().map(|c| c.as_deref().unwrap_or("")));
        }
        out
    }
}

fn decode_row(row: &Value) -> Result<Vec<Option<String>>> {
    let cells = row
        .as_array()
        .ok_or_else(|| CensusError::response(format!("expected a row array, got {}", type_name(row))))?;

    cells.iter().map(decode_cell).collect()
}

fn decode_cell(cell: &Value) -> Result<Option<String>> {
    match cell {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        other => Err(CensusError::response(format!(
            "unexpected {} cell in row",
            type_name(other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn push_csv_row<'a>(out: &mut String, cells: impl Iterator<Item = &'a str>) {
    let mut first = true;
    for cell in cells {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&csv_field(cell));
    }
    out.push('\n');
}

/// Quote a CSV field when it contains a delimiter, quote, or newline
fn csv_field(field: &str) -> String {
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        Table::from_value(json!([
            ["NAME", "B01001_001E", "us"],
            ["United States", "328239523", "1"],
            ["Puerto Rico", null, "1"]
        ]))
        .unwrap()
    }

    #[test]
    fn test_from_value() {
        let table = sample();
        assert_eq!(table.width(), 3);
        assert_eq!(table.len(), 2);
        assert_eq!(table.header()[0], "NAME");
        assert_eq!(table.rows()[1][1], None);
    }

    #[test]
    fn test_numbers_stringified() {
        let table = Table::from_value(json!([["YEAR", "EMP"], [2017, 12500]])).unwrap();
        assert_eq!(table.rows()[0][0].as_deref(), Some("2017"));
        assert_eq!(table.rows()[0][1].as_deref(), Some("12500"));
    }

    #[test]
    fn test_column_access() {
        let table = sample();
        let names = table.column("NAME").unwrap();
        assert_eq!(names, vec![Some("United States"), Some("Puerto Rico")]);
        assert!(table.column("MISSING").is_none());
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(Table::from_value(json!({"error": "nope"})).is_err());
        assert!(Table::from_value(json!([])).is_err());
    }

    #[test]
    fn test_rejects_ragged_rows() {
        let result = Table::from_value(json!([["A", "B"], ["only one"]]));
        assert!(result.is_err());
    }

    #[test]
    fn test_to_records() {
        let records = sample().to_records();
        assert_eq!(records[0]["NAME"], "United States");
        assert_eq!(records[1]["B01001_001E"], Value::Null);
    }

    #[test]
    fn test_to_csv_quoting() {
        let table = Table::from_value(json!([
            ["NAME", "VALUE"],
            ["Anchorage, AK", "say \"hi\""],
            ["Plain", null]
        ]))
        .unwrap();

        let csv = table.to_csv();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("NAME,VALUE"));
        assert_eq!(lines.next(), Some("\"Anchorage, AK\",\"say \"\"hi\"\"\""));
        assert_eq!(lines.next(), Some("Plain,"));
    }
}
