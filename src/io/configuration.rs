//! Engine constants and runtime configuration defaults

use std::time::Duration;

use crate::algorithm::detector::DetectorConfig;
use crate::io::error::{Result, invalid_parameter};
use crate::io::ingest::{CsvDialect, IngestConfig};
use crate::io::svg::RenderConfig;
use crate::math::tolerance::Tolerance;

// Matching tolerance relative to the bounding-box diagonal
/// Default tolerance as a fraction of the bounding-box diagonal
pub const DEFAULT_TOLERANCE_FRACTION: f64 = 0.01;
/// Upper bound of a relative tolerance as a fraction of the closest spacing
/// between two primitives of the same kind
pub const SPACING_TOLERANCE_FRACTION: f64 = 0.2;

// Repeat search
/// Steepest candidate repeat displacement, as `|dv| / du` in the fitted frame
pub const MAX_REPEAT_SLOPE: f64 = 0.25;

/// Share of primitives a transform must map inside the sampled extent
pub const DEFAULT_MIN_OVERLAP: f64 = 0.5;

/// Default CSV field delimiter
pub const DEFAULT_DELIMITER: u8 = b',';

/// Lines starting with this byte are ignored by the ingestor
pub const COMMENT_MARKER: u8 = b'#';

/// Largest edge mask accepted by the lattice dialect
pub const MAX_LATTICE_MASK: u8 = 0b1111;

// SVG layout, expressed relative to the drawing diagonal
/// Margin around the drawing as a fraction of its diagonal
pub const DEFAULT_MARGIN_FRACTION: f64 = 0.08;
/// Smallest margin in drawing units
pub const MIN_MARGIN: f64 = 1.0;
/// Point marker radius as a fraction of the drawing diagonal
pub const POINT_RADIUS_FRACTION: f64 = 0.006;
/// Stroke width as a fraction of the drawing diagonal
pub const STROKE_FRACTION: f64 = 0.002;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_frieze";
/// Extension of files picked up by the CLI
pub const INPUT_EXTENSION: &str = "csv";
/// Extension of written diagrams
pub const OUTPUT_EXTENSION: &str = "svg";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 30;
/// Number of pipeline stages reported per file
pub const PIPELINE_STAGES: usize = 4;

/// Full configuration of one pipeline run
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    /// CSV parsing settings
    pub ingest: IngestConfig,
    /// Symmetry search settings
    pub detector: DetectorConfig,
    /// Diagram layout settings
    pub render: RenderConfig,
}

impl EngineConfig {
    /// Replace the matching tolerance
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.detector.tolerance = tolerance;
        self
    }

    /// Replace the CSV dialect
    #[must_use]
    pub fn with_dialect(mut self, dialect: CsvDialect) -> Self {
        self.ingest.dialect = dialect;
        self
    }

    /// Limit the wall-clock time spent in symmetry detection
    #[must_use]
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.detector.time_budget = Some(budget);
        self
    }

    /// Check every parameter for a usable value
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when:
    /// - the tolerance is negative or not finite
    /// - the minimum overlap lies outside `(0, 1]`
    /// - the delimiter is not an ASCII character or clashes with the comment marker
    /// - the margin fraction is negative or not finite
    pub fn validate(&self) -> Result<()> {
        let tolerance = self.detector.tolerance.value();
        if !tolerance.is_finite() || tolerance < 0.0 {
            return Err(invalid_parameter(
                "tolerance",
                &tolerance,
                &"must be a finite, non-negative number",
            ));
        }

        let overlap = self.detector.min_overlap;
        if !(overlap > 0.0 && overlap <= 1.0) {
            return Err(invalid_parameter(
                "min_overlap",
                &overlap,
                &"must lie in (0, 1]",
            ));
        }

        let delimiter = self.ingest.delimiter;
        if !delimiter.is_ascii() || delimiter == COMMENT_MARKER || delimiter == b'\n' {
            return Err(invalid_parameter(
                "delimiter",
                &char::from(delimiter).escape_default(),
                &"must be an ASCII character other than '#' or a newline",
            ));
        }

        let margin = self.render.margin_fraction;
        if !margin.is_finite() || margin < 0.0 {
            return Err(invalid_parameter(
                "margin_fraction",
                &margin,
                &"must be a finite, non-negative number",
            ));
        }

        Ok(())
    }
}
