/// Command-line argument parsing and batch file processing
pub mod cli;
/// Engine constants and runtime configuration
pub mod configuration;
/// Error types and result alias
pub mod error;
/// CSV parsing into pattern sets
pub mod ingest;
/// Edge-mask lattice dialect
pub mod lattice;
/// Tracing subscriber installation for the binary
pub mod logging;
/// Terminal progress bars for batch runs
pub mod progress;
/// Annotated SVG output
pub mod svg;
