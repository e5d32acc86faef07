//! Uploaded tables
//!
//! A `Table` is a header row plus string cells, kept verbatim so the
//! exported CSV reproduces the upload exactly with extra columns appended.

mod error;

pub use error::UploadError;

use anyhow::{anyhow, Result};
use serde::Serialize;

/// UTF-8 byte order mark some spreadsheet tools prepend
const BOM: &str = "\u{feff}";

/// A parsed CSV table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// Parse CSV bytes with a header row
    pub fn from_csv(bytes: &[u8]) -> Result<Self, UploadError> {
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(UploadError::Empty);
        }

        let text = std::str::from_utf8(bytes).map_err(|e| UploadError::Encoding {
            offset: e.valid_up_to(),
        })?;
        let text = text.strip_prefix(BOM).unwrap_or(text);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(text.as_bytes());

        let columns: Vec<String> = reader
            .headers()
            .map_err(|e| UploadError::from_csv(&e, 1))?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows: Vec<Vec<String>> = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| UploadError::from_csv(&e, i as u64 + 2))?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        if rows.is_empty() {
            return Err(UploadError::NoRows);
        }

        Ok(Self { columns, rows })
    }

    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Index of a column by exact name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Parse every cell of a required column as a number
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>, UploadError> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| UploadError::MissingColumn(name.to_string()))?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row, cells)| {
                let raw = cells[idx].trim();
                raw.parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| UploadError::InvalidNumber {
                        column: name.to_string(),
                        row: row + 1,
                        value: raw.to_string(),
                    })
            })
            .collect()
    }

    /// Parse an optional column leniently: blank or non-numeric cells become `None`
    pub fn optional_numeric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|cells| cells[idx].trim().parse::<f64>().ok())
                .collect(),
        )
    }

    /// Append a column; the value count must match the row count
    pub fn push_column(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        if values.len() != self.rows.len() {
            return Err(anyhow!(
                "column '{}' has {} values for {} rows",
                name,
                values.len(),
                self.rows.len()
            ));
        }
        if let Some(idx) = self.column_index(name) {
            for (row, value) in self.rows.iter_mut().zip(values) {
                row[idx] = value;
            }
        } else {
            self.columns.push(name.to_string());
            for (row, value) in self.rows.iter_mut().zip(values) {
                row.push(value);
            }
        }
        Ok(())
    }

    /// Encode as CSV text with a header row
    pub fn to_csv(&self) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow!("failed to flush CSV: {}", e))?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SALARIES: &str = "YearsExperience,ActualSalary\n1.1,39343\n2.0,46205\n";

    #[test]
    fn test_parse_table() {
        let table = Table::from_csv(SALARIES.as_bytes()).unwrap();
        assert_eq!(table.columns, vec!["YearsExperience", "ActualSalary"]);
        assert_eq!(table.num_rows(), 2);
        assert_eq!(table.rows[1], vec!["2.0", "46205"]);
    }

    #[test]
    fn test_numeric_column() {
        let table = Table::from_csv(SALARIES.as_bytes()).unwrap();
        assert_eq!(table.numeric_column("YearsExperience").unwrap(), vec![1.1, 2.0]);
        assert_eq!(
            table.numeric_column("Salary"),
            Err(UploadError::MissingColumn("Salary".to_string()))
        );
    }

    #[test]
    fn test_column_name_is_exact() {
        let table = Table::from_csv(b"yearsexperience\n1\n").unwrap();
        assert!(!table.has_column("YearsExperience"));
    }

    #[test]
    fn test_invalid_number_reports_row() {
        let table = Table::from_csv(b"YearsExperience\n1.0\nten\n").unwrap();
        assert_eq!(
            table.numeric_column("YearsExperience"),
            Err(UploadError::InvalidNumber {
                column: "YearsExperience".to_string(),
                row: 2,
                value: "ten".to_string(),
            })
        );
    }

    #[test]
    fn test_optional_column_is_lenient() {
        let table = Table::from_csv(b"YearsExperience,ActualSalary\n1,100\n2,\n3,n/a\n").unwrap();
        assert_eq!(
            table.optional_numeric_column("ActualSalary"),
            Some(vec![Some(100.0), None, None])
        );
        assert_eq!(table.optional_numeric_column("Missing"), None);
    }

    #[test]
    fn test_empty_and_header_only() {
        assert_eq!(Table::from_csv(b""), Err(UploadError::Empty));
        assert_eq!(Table::from_csv(b"  \n"), Err(UploadError::Empty));
        assert_eq!(
            Table::from_csv(b"YearsExperience\n"),
            Err(UploadError::NoRows)
        );
    }

    #[test]
    fn test_blank_header_with_rows_parses() {
        let table = Table::from_csv(b",\n1,2\n").unwrap();
        assert_eq!(table.columns, vec!["", ""]);
        assert_eq!(table.num_rows(), 1);
        assert_eq!(
            table.numeric_column("YearsExperience"),
            Err(UploadError::MissingColumn("YearsExperience".to_string()))
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let err = Table::from_csv(b"YearsExperience\n\xff\xfe\n").unwrap_err();
        assert_eq!(err, UploadError::Encoding { offset: 16 });
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let err = Table::from_csv(b"a,b\n1,2\n3\n").unwrap_err();
        match err {
            UploadError::Malformed { line, detail } => {
                assert_eq!(line, 3);
                assert!(detail.contains("expected 2 fields"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_bom_is_stripped() {
        let table = Table::from_csv("\u{feff}YearsExperience\n1\n".as_bytes()).unwrap();
        assert!(table.has_column("YearsExperience"));
    }

    #[test]
    fn test_push_column_and_export() {
        let mut table = Table::from_csv(SALARIES.as_bytes()).unwrap();
        table
            .push_column("Predicted Salary", vec!["1".into(), "2".into()])
            .unwrap();
        assert_eq!(
            table.to_csv().unwrap(),
            "YearsExperience,ActualSalary,Predicted Salary\n1.1,39343,1\n2.0,46205,2\n"
        );

        assert!(table.push_column("Other", vec!["x".into()]).is_err());
    }

    #[test]
    fn test_export_quotes_fields() {
        let table = Table::from_csv(b"name,YearsExperience\n\"Doe, Jane\",3\n").unwrap();
        assert_eq!(
            table.to_csv().unwrap(),
            "name,YearsExperience\n\"Doe, Jane\",3\n"
        );
    }
}
