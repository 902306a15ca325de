//! Frieze pattern symmetry classification and SVG rendering
//!
//! A CSV description of points and segments is ingested, searched for the
//! translation, reflection, half-turn and glide symmetries of a frieze, labeled
//! with one of the seven frieze groups and drawn as an annotated SVG diagram.

#![forbid(unsafe_code)]

/// Symmetry detection, classification and the end-to-end pipeline
pub mod algorithm;
/// Input parsing, SVG output, configuration, CLI and error handling
pub mod io;
/// Tolerance comparisons and principal axis fitting
pub mod math;
/// Primitives, pattern sets and strip coordinates
pub mod spatial;

pub use algorithm::classifier::{FriezeClassification, FriezeGroup, classify};
pub use algorithm::detector::{DetectorConfig, detect};
pub use algorithm::pipeline::{Analysis, analyse, analyse_frieze};
pub use io::configuration::EngineConfig;
pub use io::error::{FriezeError, Result};
pub use io::ingest::ingest;
pub use io::svg::render;
pub use math::tolerance::Tolerance;
