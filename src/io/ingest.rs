//! CSV ingestion into an immutable [`PatternSet`]
//!
//! Rows, not the whole input, are the unit of rejection: a row with the wrong
//! number of fields or a non-numeric field is recorded and skipped. Ingestion only
//! fails when nothing usable remains.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, info};

use crate::io::configuration::{COMMENT_MARKER, DEFAULT_DELIMITER};
use crate::io::error::{FriezeError, Result};
use crate::io::lattice::{edges_at, parse_mask};
use crate::spatial::pattern::{PatternSet, RowRejection};
use crate::spatial::primitive::{Point, Primitive, Shape};

/// Layout of the CSV rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CsvDialect {
    /// `x,y` points and `x1,y1,x2,y2` segments
    #[default]
    Points,
    /// Rows of edge masks on a unit lattice
    Lattice,
}

/// Parser settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestConfig {
    /// Row layout
    pub dialect: CsvDialect,
    /// Field separator
    pub delimiter: u8,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            dialect: CsvDialect::default(),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

/// Parse a buffer with the default settings
///
/// # Errors
///
/// See [`CsvIngestor::ingest`].
pub fn ingest(content: &[u8]) -> Result<PatternSet> {
    CsvIngestor::new(IngestConfig::default()).ingest(content)
}

/// Turns uploaded CSV bytes into primitives
#[derive(Debug, Clone, Default)]
pub struct CsvIngestor {
    config: IngestConfig,
}

impl CsvIngestor {
    /// Create an ingestor
    pub const fn new(config: IngestConfig) -> Self {
        Self { config }
    }

    /// Parse the buffer into a pattern
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the buffer holds no data rows (`EmptyInput`)
    /// - rows were present but every one was rejected (`MalformedInput`)
    pub fn ingest(&self, content: &[u8]) -> Result<PatternSet> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .comment(Some(COMMENT_MARKER))
            .delimiter(self.config.delimiter)
            .from_reader(content);

        let mut primitives = Vec::new();
        let mut rejections = Vec::new();
        let mut rows_seen = 0usize;

        for (index, result) in reader.records().enumerate() {
            let row = index + 1;
            let record = match result {
                Ok(record) => record,
                Err(err) => {
                    rows_seen += 1;
                    rejections.push(reject(row, err.to_string()));
                    continue;
                }
            };

            if record.iter().all(str::is_empty) {
                continue;
            }
            rows_seen += 1;

            let parsed = match self.config.dialect {
                CsvDialect::Points => parse_point_row(&record).map(|shape| vec![shape]),
                CsvDialect::Lattice => parse_lattice_row(&record, rows_seen - 1),
            };

            match parsed {
                Ok(shapes) => {
                    for shape in shapes {
                        primitives.push(Primitive::new(primitives.len(), shape));
                    }
                }
                Err(reason) => rejections.push(reject(row, reason)),
            }
        }

        if primitives.is_empty() {
            return Err(match rejections.first() {
                Some(first) if rows_seen > 0 && rejections.len() == rows_seen => {
                    FriezeError::MalformedInput {
                        rejected_rows: rejections.len(),
                        first_reason: format!("row {}: {}", first.row, first.reason),
                    }
                }
                _ => FriezeError::EmptyInput,
            });
        }

        info!(
            primitives = primitives.len(),
            rows = rows_seen,
            rejected = rejections.len(),
            "ingested pattern"
        );

        PatternSet::new(primitives, rejections).ok_or(FriezeError::EmptyInput)
    }
}

fn reject(row: usize, reason: String) -> RowRejection {
    debug!(row, %reason, "rejected row");
    RowRejection { row, reason }
}

fn parse_point_row(record: &StringRecord) -> std::result::Result<Shape, String> {
    let values = record
        .iter()
        .map(parse_coordinate)
        .collect::<std::result::Result<Vec<f64>, String>>()?;

    match values.as_slice() {
        &[x, y] => Ok(Shape::Point(Point::new(x, y))),
        &[x1, y1, x2, y2] => Ok(Shape::Segment(Point::new(x1, y1), Point::new(x2, y2))),
        other => Err(format!("expected 2 or 4 fields, found {}", other.len())),
    }
}

fn parse_coordinate(field: &str) -> std::result::Result<f64, String> {
    let value = field
        .parse::<f64>()
        .map_err(|err| format!("'{field}' is not a number: {err}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{field}' is not a finite number"))
    }
}

// Lattice rows keep their row index even when earlier rows were rejected, so the
// geometry of the remaining rows is not shifted.
fn parse_lattice_row(
    record: &StringRecord,
    lattice_row: usize,
) -> std::result::Result<Vec<Shape>, String> {
    let masks = record
        .iter()
        .map(parse_mask)
        .collect::<std::result::Result<Vec<u8>, String>>()?;

    Ok(masks
        .into_iter()
        .enumerate()
        .flat_map(|(column, mask)| edges_at(mask, column, lattice_row))
        .collect())
}
