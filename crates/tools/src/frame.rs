//! A minimal column-oriented table for the data analysis tool.
//!
//! Parses user-provided data preferring JSON (object-of-columns or
//! array-of-records), falling back to CSV. Just enough statistics for
//! summary / trends / comparison — not a general dataframe.

use std::fmt::Write as _;

/// A single cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Null,
}

impl Cell {
    fn render(&self) -> String {
        match self {
            Cell::Number(n) => format_number(*n),
            Cell::Text(s) => s.clone(),
            Cell::Null => String::new(),
        }
    }
}

/// A named column of cells.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Cell>,
}

impl Column {
    /// Non-null cell count.
    pub fn count(&self) -> usize {
        self.cells.iter().filter(|c| !matches!(c, Cell::Null)).count()
    }

    /// The numeric values of this column, if every non-null cell is numeric
    /// and there is at least one.
    pub fn numeric_values(&self) -> Option<Vec<f64>> {
        let mut values = Vec::new();
        for cell in &self.cells {
            match cell {
                Cell::Number(n) => values.push(*n),
                Cell::Null => {}
                Cell::Text(_) => return None,
            }
        }
        if values.is_empty() { None } else { Some(values) }
    }
}

/// A parsed table: named columns of equal length.
#[derive(Debug, Clone)]
pub struct Frame {
    pub columns: Vec<Column>,
}

impl Frame {
    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.cells.len())
    }

    /// Parse structured text, preferring JSON and falling back to CSV.
    pub fn parse(data: &str) -> Result<Frame, String> {
        match Self::parse_json(data) {
            Ok(frame) => Ok(frame),
            Err(json_err) => Self::parse_csv(data).map_err(|csv_err| {
                format!("not valid JSON ({json_err}) and not valid CSV ({csv_err})")
            }),
        }
    }

    /// Accepts `{"col": [..], ..}` or `[{"col": v, ..}, ..]`.
    pub fn parse_json(data: &str) -> Result<Frame, String> {
        let value: serde_json::Value =
            serde_json::from_str(data).map_err(|e| e.to_string())?;

        match value {
            serde_json::Value::Object(map) => {
                let mut columns = Vec::new();
                let mut len = None;
                for (name, column_value) in map {
                    let array = column_value
                        .as_array()
                        .ok_or_else(|| format!("column '{name}' is not an array"))?;
                    match len {
                        None => len = Some(array.len()),
                        Some(expected) if expected != array.len() => {
                            return Err(format!(
                                "column '{name}' has {} values, expected {expected}",
                                array.len()
                            ));
                        }
                        _ => {}
                    }
                    columns.push(Column {
                        name,
                        cells: array.iter().map(json_cell).collect(),
                    });
                }
                if columns.is_empty() {
                    return Err("no columns found".into());
                }
                Ok(Frame { columns })
            }
            serde_json::Value::Array(records) => {
                if records.is_empty() {
                    return Err("empty record array".into());
                }
                // Column order follows first appearance across records.
                let mut names: Vec<String> = Vec::new();
                for record in &records {
                    let obj = record
                        .as_object()
                        .ok_or_else(|| "record array elements must be objects".to_string())?;
                    for key in obj.keys() {
                        if !names.iter().any(|n| n == key) {
                            names.push(key.clone());
                        }
                    }
                }
                let columns = names
                    .into_iter()
                    .map(|name| {
                        let cells = records
                            .iter()
                            .map(|record| {
                                record
                                    .as_object()
                                    .and_then(|obj| obj.get(&name))
                                    .map_or(Cell::Null, json_cell)
                            })
                            .collect();
                        Column { name, cells }
                    })
                    .collect();
                Ok(Frame { columns })
            }
            _ => Err("expected a JSON object of columns or an array of records".into()),
        }
    }

    /// Parse delimited tabular text with a header row.
    pub fn parse_csv(data: &str) -> Result<Frame, String> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_bytes());

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| e.to_string())?
            .iter()
            .map(|h| h.to_string())
            .collect();
        if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
            return Err("no header row".into());
        }

        let mut rows: Vec<Vec<Cell>> = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| e.to_string())?;
            rows.push(
                (0..headers.len())
                    .map(|i| match record.get(i) {
                        None | Some("") => Cell::Null,
                        Some(field) => field
                            .parse::<f64>()
                            .map(Cell::Number)
                            .unwrap_or_else(|_| Cell::Text(field.to_string())),
                    })
                    .collect(),
            );
        }
        if rows.is_empty() {
            return Err("no data rows".into());
        }

        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(i, name)| Column {
                name,
                cells: rows.iter().map(|r| r[i].clone()).collect(),
            })
            .collect();
        Ok(Frame { columns })
    }

    /// Descriptive statistics over all columns: count everywhere, plus
    /// mean / std / min / max for numeric columns and distinct counts for
    /// text columns.
    pub fn describe(&self) -> String {
        let mut out = String::new();
        for column in &self.columns {
            let _ = writeln!(out, "{}:", column.name);
            let _ = writeln!(out, "  count: {}", column.count());
            if let Some(values) = column.numeric_values() {
                let mean = mean(&values);
                let _ = writeln!(out, "  mean:  {}", format_number(mean));
                let _ = writeln!(out, "  std:   {}", format_number(std_dev(&values)));
                let _ = writeln!(
                    out,
                    "  min:   {}",
                    format_number(values.iter().cloned().fold(f64::INFINITY, f64::min))
                );
                let _ = writeln!(
                    out,
                    "  max:   {}",
                    format_number(values.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
                );
            } else {
                let mut distinct: Vec<String> =
                    column.cells.iter().map(|c| c.render()).collect();
                distinct.sort();
                distinct.dedup();
                let _ = writeln!(out, "  unique: {}", distinct.len());
            }
        }
        out.trim_end().to_string()
    }

    /// Pairwise Pearson correlation matrix over numeric columns.
    ///
    /// Returns `None` when fewer than two columns are numeric — the caller
    /// turns that into an explanatory message, not an error.
    pub fn correlation_matrix(&self) -> Option<String> {
        let numeric: Vec<(&str, Vec<f64>)> = self
            .columns
            .iter()
            .filter_map(|c| c.numeric_values().map(|v| (c.name.as_str(), v)))
            .collect();
        if numeric.len() < 2 {
            return None;
        }

        let mut out = String::new();
        let _ = write!(out, "{:>12}", "");
        for (name, _) in &numeric {
            let _ = write!(out, "{name:>12}");
        }
        out.push('\n');
        for (row_name, row_values) in &numeric {
            let _ = write!(out, "{row_name:>12}");
            for (_, col_values) in &numeric {
                let r = pearson(row_values, col_values);
                let _ = write!(out, "{:>12}", format_number(r));
            }
            out.push('\n');
        }
        Some(out.trim_end().to_string())
    }

    /// Render the first `limit` rows with headers.
    pub fn head(&self, limit: usize) -> String {
        let mut out = String::new();
        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        out.push_str(&names.join(" | "));
        out.push('\n');
        for row in 0..self.row_count().min(limit) {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|c| c.cells[row].render())
                .collect();
            out.push_str(&cells.join(" | "));
            out.push('\n');
        }
        out.trim_end().to_string()
    }
}

fn json_cell(value: &serde_json::Value) -> Cell {
    match value {
        serde_json::Value::Number(n) => {
            n.as_f64().map(Cell::Number).unwrap_or(Cell::Null)
        }
        serde_json::Value::String(s) => Cell::Text(s.clone()),
        serde_json::Value::Bool(b) => Cell::Text(b.to_string()),
        serde_json::Value::Null => Cell::Null,
        other => Cell::Text(other.to_string()),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1 denominator); 0 for a single value.
fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance =
        values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// Pearson correlation coefficient. NaN when either side has zero variance
/// or the lengths differ.
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    if a.len() != b.len() || a.len() < 2 {
        return f64::NAN;
    }
    let (ma, mb) = (mean(a), mean(b));
    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        cov += (x - ma) * (y - mb);
        var_a += (x - ma).powi(2);
        var_b += (y - mb).powi(2);
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}

fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n:.4}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_object_of_columns() {
        let frame = Frame::parse(r#"{"a": [1, 2, 3], "b": [4, 5, 6]}"#).unwrap();
        assert_eq!(frame.columns.len(), 2);
        assert_eq!(frame.row_count(), 3);
    }

    #[test]
    fn json_array_of_records() {
        let frame =
            Frame::parse(r#"[{"x": 1, "y": "a"}, {"x": 2, "y": "b"}, {"x": 3}]"#).unwrap();
        assert_eq!(frame.columns.len(), 2);
        assert_eq!(frame.row_count(), 3);
        let y = frame.columns.iter().find(|c| c.name == "y").unwrap();
        assert_eq!(y.cells[2], Cell::Null);
        assert_eq!(y.count(), 2);
    }

    #[test]
    fn json_unequal_columns_rejected() {
        assert!(Frame::parse_json(r#"{"a": [1, 2], "b": [1]}"#).is_err());
    }

    #[test]
    fn csv_fallback() {
        let frame = Frame::parse("name,score\nalice,90\nbob,85\n").unwrap();
        assert_eq!(frame.columns.len(), 2);
        assert_eq!(frame.row_count(), 2);
        let score = frame.columns.iter().find(|c| c.name == "score").unwrap();
        assert_eq!(score.numeric_values().unwrap(), vec![90.0, 85.0]);
    }

    #[test]
    fn garbage_is_rejected_by_both_parsers() {
        let err = Frame::parse("{{{not data").unwrap_err();
        assert!(err.contains("not valid JSON"));
        assert!(err.contains("not valid CSV") || err.contains("no data rows"));
    }

    #[test]
    fn describe_covers_all_columns() {
        let frame = Frame::parse(r#"{"a": [1, 2, 3], "b": [4, 5, 6]}"#).unwrap();
        let summary = frame.describe();
        assert!(summary.contains("a:"));
        assert!(summary.contains("b:"));
        assert!(summary.contains("mean:  2"));
        assert!(summary.contains("mean:  5"));
    }

    #[test]
    fn describe_handles_text_columns() {
        let frame = Frame::parse("city,temp\noslo,4\noslo,7\nparis,12\n").unwrap();
        let summary = frame.describe();
        assert!(summary.contains("unique: 2"));
        assert!(summary.contains("count: 3"));
    }

    #[test]
    fn correlation_of_identical_columns_is_one() {
        let frame = Frame::parse(r#"{"a": [1, 2, 3], "b": [1, 2, 3]}"#).unwrap();
        let matrix = frame.correlation_matrix().unwrap();
        assert!(matrix.contains('1'));
        assert!(matrix.contains('a'));
        assert!(matrix.contains('b'));
    }

    #[test]
    fn anticorrelated_columns() {
        let r = pearson(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]);
        assert!((r + 1.0).abs() < 1e-10);
    }

    #[test]
    fn correlation_requires_two_numeric_columns() {
        let frame = Frame::parse(r#"{"a": [1, 2, 3]}"#).unwrap();
        assert!(frame.correlation_matrix().is_none());

        let frame = Frame::parse("name,score\nalice,90\nbob,85\n").unwrap();
        assert!(frame.correlation_matrix().is_none());
    }

    #[test]
    fn zero_variance_yields_nan() {
        let r = pearson(&[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
        assert!(r.is_nan());
    }

    #[test]
    fn head_limits_rows() {
        let data: Vec<String> = (0..20).map(|i| format!("{i},{}", i * 2)).collect();
        let csv = format!("a,b\n{}\n", data.join("\n"));
        let frame = Frame::parse(&csv).unwrap();
        let head = frame.head(10);
        // header + 10 rows
        assert_eq!(head.lines().count(), 11);
        assert!(head.starts_with("a | b"));
    }

    #[test]
    fn std_dev_matches_sample_formula() {
        // values 1..=3: sample std = 1
        assert!((std_dev(&[1.0, 2.0, 3.0]) - 1.0).abs() < 1e-10);
        assert_eq!(std_dev(&[5.0]), 0.0);
    }
}
