//! In-memory tabular wind dataset
//!
//! A `WindDataset` is an ordered set of equally long named columns. Numeric
//! columns keep missing cells as `None`; a column with any non-numeric cell
//! is kept as text so that using it as speed or direction fails loudly
//! instead of producing silently corrupted statistics.

use crate::error::{Result, WindRoseError};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Canonical wind speed column name
pub const SPEED_COLUMN: &str = "speed";

/// Canonical wind direction column name (degrees)
pub const DIRECTION_COLUMN: &str = "direction";

/// Source column name → target column name
pub type ColumnMapping = HashMap<String, String>;

/// Cell markers treated as missing values when parsing text
const MISSING_MARKERS: [&str; 5] = ["", "na", "nan", "null", "none"];

/// A single dataset column
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Numeric(Vec<Option<f64>>),
    Text(Vec<String>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(values) => values.len(),
            Column::Text(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_numeric(&self) -> Option<&[Option<f64>]> {
        match self {
            Column::Numeric(values) => Some(values),
            Column::Text(_) => None,
        }
    }

    /// Build a column from raw text cells, numeric when every cell parses
    pub fn from_text_cells(cells: Vec<String>) -> Self {
        let mut parsed = Vec::with_capacity(cells.len());
        for cell in &cells {
            match parse_cell(cell) {
                Some(value) => parsed.push(value),
                None => return Column::Text(cells),
            }
        }
        Column::Numeric(parsed)
    }
}

impl From<Vec<f64>> for Column {
    fn from(values: Vec<f64>) -> Self {
        Column::Numeric(
            values
                .into_iter()
                .map(|v| if v.is_nan() { None } else { Some(v) })
                .collect(),
        )
    }
}

impl From<Vec<Option<f64>>> for Column {
    fn from(values: Vec<Option<f64>>) -> Self {
        Column::Numeric(values)
    }
}

/// `Some(None)` for a missing marker, `Some(Some(v))` for a number, `None` otherwise
fn parse_cell(cell: &str) -> Option<Option<f64>> {
    let trimmed = cell.trim();
    if MISSING_MARKERS
        .iter()
        .any(|marker| trimmed.eq_ignore_ascii_case(marker))
    {
        return Some(None);
    }
    trimmed.parse::<f64>().ok().map(Some)
}

/// Ordered collection of named, equally long columns
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindDataset {
    names: Vec<String>,
    columns: Vec<Column>,
}

impl WindDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dataset with canonical `speed` and `direction` columns
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let (speed, direction): (Vec<f64>, Vec<f64>) = records.into_iter().unzip();
        Self {
            names: vec![SPEED_COLUMN.to_string(), DIRECTION_COLUMN.to_string()],
            columns: vec![Column::from(speed), Column::from(direction)],
        }
    }

    /// Builder form of [`insert_column`](Self::insert_column)
    pub fn with_column(mut self, name: impl Into<String>, column: impl Into<Column>) -> Result<Self> {
        self.insert_column(name, column)?;
        Ok(self)
    }

    /// Add or replace a column; its length must match the existing rows
    pub fn insert_column(&mut self, name: impl Into<String>, column: impl Into<Column>) -> Result<()> {
        let name = name.into();
        let column = column.into();

        if let Some(expected) = self.columns.first().map(Column::len) {
            if column.len() != expected {
                return Err(WindRoseError::ColumnLength {
                    column: name,
                    expected,
                    actual: column.len(),
                });
            }
        }

        match self.position(&name) {
            Some(idx) => self.columns[idx] = column,
            None => {
                self.names.push(name);
                self.columns.push(column);
            }
        }
        Ok(())
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.position(name).map(|idx| &self.columns[idx])
    }

    /// Numeric values of a column; `NonNumericColumn` for text columns
    pub fn numeric_column(&self, name: &str) -> Result<Option<&[Option<f64>]>> {
        match self.column(name) {
            None => Ok(None),
            Some(column) => column
                .as_numeric()
                .map(Some)
                .ok_or_else(|| WindRoseError::NonNumericColumn {
                    column: name.to_string(),
                }),
        }
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Column::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copy of the dataset with columns renamed by `mapping`.
    ///
    /// Names absent from the mapping are kept. When a renamed column lands on
    /// a name that already exists, the renamed column wins.
    pub fn renamed(&self, mapping: &ColumnMapping) -> Self {
        let mut renamed = WindDataset::new();
        let targets: Vec<&str> = self
            .names
            .iter()
            .filter_map(|n| mapping.get(n).map(String::as_str))
            .collect();

        for (name, column) in self.names.iter().zip(&self.columns) {
            let target = mapping.get(name).map(String::as_str);
            // An unmapped column shadowed by a renamed one is dropped
            if target.is_none() && targets.contains(&name.as_str()) {
                continue;
            }
            let new_name = target.unwrap_or(name);
            match renamed.position(new_name) {
                Some(idx) => renamed.columns[idx] = column.clone(),
                None => {
                    renamed.names.push(new_name.to_string());
                    renamed.columns.push(column.clone());
                }
            }
        }
        renamed
    }

    /// Read a headed CSV table.
    ///
    /// Empty, `NA`, `NaN`, `null` and `None` cells are missing values.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = csv_reader.headers()?.iter().map(str::to_string).collect();
        let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];

        for record in csv_reader.records() {
            let record = record?;
            for (idx, value) in record.iter().enumerate() {
                cells[idx].push(value.to_string());
            }
        }

        let mut dataset = WindDataset::new();
        for (name, column_cells) in headers.into_iter().zip(cells) {
            dataset.insert_column(name, Column::from_text_cells(column_cells))?;
        }

        tracing::debug!(
            rows = dataset.len(),
            columns = dataset.names.len(),
            "loaded CSV dataset"
        );
        Ok(dataset)
    }

    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_csv_reader(BufReader::new(file))
    }

    /// Convert a polars `DataFrame`, casting numeric columns to `f64`
    #[cfg(feature = "dataframe")]
    pub fn from_polars(df: &polars::prelude::DataFrame) -> Result<Self> {
        use polars::prelude::DataType;

        let mut dataset = WindDataset::new();
        for column in df.get_columns() {
            let series = column.as_materialized_series();
            let name = series.name().to_string();
            let converted = if series.dtype().is_primitive_numeric() {
                let floats = series.cast(&DataType::Float64)?;
                Column::Numeric(floats.f64()?.into_iter().collect())
            } else {
                let strings = series.cast(&DataType::String)?;
                Column::Text(
                    strings
                        .str()?
                        .into_iter()
                        .map(|v| v.unwrap_or_default().to_string())
                        .collect(),
                )
            };
            dataset.insert_column(name, converted)?;
        }
        Ok(dataset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_records() {
        let ds = WindDataset::from_records(vec![(1.0, 90.0), (2.0, f64::NAN)]);
        assert_eq!(ds.len(), 2);
        let dir = ds.numeric_column(DIRECTION_COLUMN).unwrap().unwrap();
        assert_eq!(dir, &[Some(90.0), None]);
    }

    #[test]
    fn test_column_length_checked() {
        let err = WindDataset::new()
            .with_column("a", vec![1.0, 2.0])
            .unwrap()
            .with_column("b", vec![1.0])
            .unwrap_err();
        assert!(matches!(
            err,
            WindRoseError::ColumnLength {
                expected: 2,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_renamed_keeps_order_and_unmapped_columns() {
        let ds = WindDataset::new()
            .with_column("ws", vec![1.0])
            .unwrap()
            .with_column("wd", vec![10.0])
            .unwrap()
            .with_column("temp", vec![20.0])
            .unwrap();
        let mapping: ColumnMapping = [
            ("ws".to_string(), SPEED_COLUMN.to_string()),
            ("wd".to_string(), DIRECTION_COLUMN.to_string()),
        ]
        .into_iter()
        .collect();

        let renamed = ds.renamed(&mapping);
        let names: Vec<&str> = renamed.column_names().collect();
        assert_eq!(names, vec!["speed", "direction", "temp"]);
    }

    #[test]
    fn test_renamed_column_shadows_existing_name() {
        let ds = WindDataset::new()
            .with_column("speed", vec![1.0])
            .unwrap()
            .with_column("gust", vec![9.0])
            .unwrap();
        let mapping: ColumnMapping = [("gust".to_string(), "speed".to_string())]
            .into_iter()
            .collect();

        let renamed = ds.renamed(&mapping);
        assert_eq!(renamed.column_names().count(), 1);
        assert_eq!(
            renamed.numeric_column("speed").unwrap().unwrap(),
            &[Some(9.0)]
        );
    }

    #[test]
    fn test_csv_missing_markers_and_text_columns() {
        let data = "station,ws,wd\nA,1.5,90\nB,,NaN\nC,NA,270\n";
        let ds = WindDataset::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(ds.len(), 3);
        assert!(matches!(ds.column("station"), Some(Column::Text(_))));
        assert_eq!(
            ds.numeric_column("ws").unwrap().unwrap(),
            &[Some(1.5), None, None]
        );
        assert_eq!(
            ds.numeric_column("wd").unwrap().unwrap(),
            &[Some(90.0), None, Some(270.0)]
        );
        assert!(matches!(
            ds.numeric_column("station"),
            Err(WindRoseError::NonNumericColumn { .. })
        ));
    }

    #[test]
    fn test_csv_ragged_rows_rejected() {
        let data = "speed,direction\n1,2\n3\n";
        assert!(matches!(
            WindDataset::from_csv_reader(data.as_bytes()),
            Err(WindRoseError::Csv { .. })
        ));
    }

    #[cfg(feature = "dataframe")]
    #[test]
    fn test_from_polars() {
        use crate::stats::compute;
        use polars::prelude::df;

        let df = df!(
            "ws" => [1.0f64, 2.0],
            "wd" => [10i32, 200],
            "station" => ["a", "b"]
        )
        .unwrap();
        let ds = WindDataset::from_polars(&df).unwrap();

        assert_eq!(ds.len(), 2);
        assert_eq!(
            ds.numeric_column("ws").unwrap().unwrap(),
            &[Some(1.0), Some(2.0)]
        );
        assert_eq!(
            ds.numeric_column("wd").unwrap().unwrap(),
            &[Some(10.0), Some(200.0)]
        );
        match ds.column("station") {
            Some(Column::Text(cells)) => assert_eq!(*cells, ["a", "b"]),
            other => panic!("expected text column, got {:?}", other),
        }

        let mapping: ColumnMapping = [
            ("ws".to_string(), SPEED_COLUMN.to_string()),
            ("wd".to_string(), DIRECTION_COLUMN.to_string()),
        ]
        .into_iter()
        .collect();
        let stats = compute(&ds, 2, false, Some(&mapping)).unwrap();
        assert_eq!(stats.total_count(), 2);
        assert_eq!(
            stats.directions(),
            vec![crate::compass::CompassPoint::N, crate::compass::CompassPoint::SSW]
        );
    }
}
