//! Tabular dataset model consumed by every check.
//!
//! A [`Dataset`] is an immutable, header-ordered table of raw string values
//! with one designated label column and a reserved missing-value token.
//! Values stay untyped until a check asks for a number through
//! [`Row::number`], which is where the missing token is honoured and where
//! malformed numeric text is reported.

use crate::config::CheckConfig;
use crate::error::{Result, ResultExt, VerifyError};
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// Offset between a row's position and its reported identifier:
/// one for 1-based numbering and one for the header line.
pub const ROW_ID_OFFSET: usize = 2;

/// Reported identifier of the row at `index`.
#[inline]
pub fn row_id(index: usize) -> usize {
    index + ROW_ID_OFFSET
}

/// An immutable table of raw values.
#[derive(Debug, Clone)]
pub struct Dataset {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    label_column: String,
    missing: String,
    positions: HashMap<String, usize>,
    label_position: usize,
}

static_assertions::assert_impl_all!(Dataset: Send, Sync);

impl Dataset {
    /// Build a dataset from a header and positional rows.
    ///
    /// Fails when a row does not have one value per header column, when the
    /// header repeats a name, or when the label column is not in the header.
    pub fn new(
        header: Vec<String>,
        rows: Vec<Vec<String>>,
        label_column: impl Into<String>,
        missing: impl Into<String>,
    ) -> Result<Self> {
        let label_column = label_column.into();

        let mut positions = HashMap::with_capacity(header.len());
        for (position, name) in header.iter().enumerate() {
            if positions.insert(name.clone(), position).is_some() {
                return Err(VerifyError::DuplicateColumn(name.clone()));
            }
        }

        let label_position = *positions
            .get(&label_column)
            .ok_or_else(|| VerifyError::ColumnNotFound(label_column.clone()))?;

        if let Some((index, row)) = rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.len() != header.len())
        {
            return Err(VerifyError::RaggedRow {
                row: row_id(index),
                expected: header.len(),
                found: row.len(),
            });
        }

        Ok(Self {
            header,
            rows,
            label_column,
            missing: missing.into(),
            positions,
            label_position,
        })
    }

    /// Build a dataset from string-like records.
    pub fn from_records<H, R, V>(
        header: &[H],
        records: &[R],
        label_column: &str,
        missing: &str,
    ) -> Result<Self>
    where
        H: AsRef<str>,
        R: AsRef<[V]>,
        V: AsRef<str>,
    {
        let header = header.iter().map(|h| h.as_ref().to_string()).collect();
        let rows = records
            .iter()
            .map(|record| {
                record
                    .as_ref()
                    .iter()
                    .map(|value| value.as_ref().to_string())
                    .collect()
            })
            .collect();
        Self::new(header, rows, label_column, missing)
    }

    /// Build a dataset from a polars `DataFrame`.
    ///
    /// Every column is cast to text. Nulls become the empty string, which is
    /// what a delimited reader yields for an empty field.
    pub fn from_dataframe(df: &DataFrame, label_column: &str, missing: &str) -> Result<Self> {
        let header: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows: Vec<Vec<String>> = (0..df.height())
            .map(|_| Vec::with_capacity(header.len()))
            .collect();

        for column in df.get_columns() {
            let series = column
                .as_materialized_series()
                .cast(&DataType::String)
                .context(format!("Failed to read column '{}' as text", column.name()))?;
            let values = series.str()?;

            for (row, value) in rows.iter_mut().zip(values.into_iter()) {
                row.push(value.unwrap_or_default().to_string());
            }
        }

        Self::new(header, rows, label_column, missing)
    }

    /// Load a dataset from a CSV file with a header line.
    ///
    /// Schema inference is disabled so that every field keeps its raw text.
    pub fn from_csv(path: impl AsRef<Path>, config: &CheckConfig) -> Result<Self> {
        let path = path.as_ref();
        debug!("Reading CSV file: {}", path.display());

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .context(format!("Failed to open '{}'", path.display()))?
            .finish()
            .context(format!("Failed to parse '{}'", path.display()))?;

        let dataset = Self::from_dataframe(&df, &config.label_column, &config.missing_marker)?;
        info!(
            "Loaded {} rows x {} columns from {}",
            dataset.height(),
            dataset.width(),
            path.display()
        );
        Ok(dataset)
    }

    /// Column names in file order.
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.header.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn label_column(&self) -> &str {
        &self.label_column
    }

    pub fn missing_marker(&self) -> &str {
        &self.missing
    }

    /// Position of the label column in the header.
    pub fn label_position(&self) -> usize {
        self.label_position
    }

    /// Position of `name` in the header.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| VerifyError::ColumnNotFound(name.to_string()))
    }

    /// Positions of all `names`, failing on the first unknown one.
    pub fn column_indices(&self, names: &[&str]) -> Result<Vec<usize>> {
        names.iter().map(|name| self.column_index(name)).collect()
    }

    /// Header positions of every column except the label, in file order.
    pub fn feature_positions(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.header.len()).filter(move |&position| position != self.label_position)
    }

    /// Name of the column at `position`.
    pub fn column_name(&self, position: usize) -> &str {
        &self.header[position]
    }

    /// Whether `value` is the missing token.
    #[inline]
    pub fn is_missing(&self, value: &str) -> bool {
        value == self.missing
    }

    /// Iterate over all rows in order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'_>> + '_ {
        self.rows.iter().enumerate().map(move |(index, values)| Row {
            dataset: self,
            index,
            values,
        })
    }

    /// Row at `index`, if any.
    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|values| Row {
            dataset: self,
            index,
            values,
        })
    }
}

/// Borrowed view of one dataset row.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    dataset: &'a Dataset,
    index: usize,
    values: &'a [String],
}

impl<'a> Row<'a> {
    /// 0-based position in the dataset.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Reported row identifier (see [`ROW_ID_OFFSET`]).
    pub fn id(&self) -> usize {
        row_id(self.index)
    }

    /// Raw value at header `position`.
    pub fn raw(&self, position: usize) -> &'a str {
        &self.values[position]
    }

    /// Raw value of the named column.
    pub fn get(&self, column: &str) -> Result<&'a str> {
        Ok(self.raw(self.dataset.column_index(column)?))
    }

    /// Raw label value.
    pub fn label(&self) -> &'a str {
        self.raw(self.dataset.label_position)
    }

    /// Whether the value at `position` is the missing token.
    pub fn is_missing(&self, position: usize) -> bool {
        self.dataset.is_missing(self.raw(position))
    }

    /// Whether any field of the row is missing.
    pub fn has_missing(&self) -> bool {
        self.values.iter().any(|value| self.dataset.is_missing(value))
    }

    /// Whether any of the fields at `positions` is missing.
    pub fn any_missing(&self, positions: &[usize]) -> bool {
        positions.iter().any(|&position| self.is_missing(position))
    }

    /// Numeric value at `position`; `None` when missing.
    pub fn number(&self, position: usize) -> Result<Option<f64>> {
        let raw = self.raw(position);
        if self.dataset.is_missing(raw) {
            return Ok(None);
        }
        raw.trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| VerifyError::TypeConversionFailed {
                column: self.dataset.column_name(position).to_string(),
                row: self.id(),
                value: raw.to_string(),
            })
    }

    /// Numeric value at `position` for a row already known to be complete.
    ///
    /// The missing token is reported as a conversion failure.
    pub fn required_number(&self, position: usize) -> Result<f64> {
        let raw = self.raw(position);
        raw.trim()
            .parse::<f64>()
            .map_err(|_| VerifyError::TypeConversionFailed {
                column: self.dataset.column_name(position).to_string(),
                row: self.id(),
                value: raw.to_string(),
            })
    }
}
