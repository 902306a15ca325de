//! End-to-end analysis: ingest, detect, classify, render
//!
//! Each stage consumes the previous stage's immutable output, and the first
//! failure ends the run.

use tracing::{debug, info_span};

use crate::algorithm::classifier::{FriezeClassification, classify};
use crate::algorithm::detector::SymmetryDetector;
use crate::io::configuration::EngineConfig;
use crate::io::error::Result;
use crate::io::ingest::CsvIngestor;
use crate::io::svg::SvgRenderer;
use crate::spatial::pattern::PatternSet;

/// Pipeline stage names, in execution order
pub const STAGES: [&str; 4] = ["ingest", "detect", "classify", "render"];

/// Output of one successful run
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Ingested primitives
    pub pattern: PatternSet,
    /// Frieze group and supporting symmetries
    pub classification: FriezeClassification,
    /// Annotated diagram
    pub svg: String,
}

/// Analyse a CSV buffer and return the annotated SVG document
///
/// # Errors
///
/// Returns the first stage failure; see [`analyse`].
pub fn analyse_frieze(content: &[u8]) -> Result<String> {
    analyse(content, &EngineConfig::default()).map(|analysis| analysis.svg)
}

/// Run every stage with the given configuration
///
/// # Errors
///
/// Returns an error if:
/// - the configuration is invalid (`InvalidParameter`)
/// - the buffer has no usable rows (`EmptyInput`, `MalformedInput`)
/// - no period is found (`NoPeriodicityFound`)
/// - the symmetries fit no frieze group (`AmbiguousSymmetry`)
/// - the time budget runs out (`Interrupted`)
pub fn analyse(content: &[u8], config: &EngineConfig) -> Result<Analysis> {
    analyse_with_progress(content, config, |_| {})
}

/// Run every stage, calling `on_stage` with the index of each completed stage
///
/// # Errors
///
/// See [`analyse`].
pub fn analyse_with_progress(
    content: &[u8],
    config: &EngineConfig,
    mut on_stage: impl FnMut(usize),
) -> Result<Analysis> {
    config.validate()?;
    let _span = info_span!("analyse", bytes = content.len()).entered();

    let pattern = CsvIngestor::new(config.ingest).ingest(content)?;
    on_stage(0);

    let detection = SymmetryDetector::new(config.detector).detect(&pattern)?;
    on_stage(1);

    let classification = classify(detection)?;
    on_stage(2);

    let svg = SvgRenderer::new(config.render).render(&pattern, &classification);
    on_stage(3);
    debug!(svg_bytes = svg.len(), "rendered diagram");

    Ok(Analysis {
        pattern,
        classification,
        svg,
    })
}
