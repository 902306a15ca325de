/// Pairing of shapes under a candidate isometry
pub mod matching;
/// Detected symmetry transformations and their parameters
pub mod symmetry;
/// Translation and point-symmetry search in strip coordinates
pub mod detector;
/// Decision table from symmetry signatures to frieze groups
pub mod classifier;
/// Optional wall-clock budget for long searches
pub mod deadline;
/// Ingest, detect, classify and render in one call
pub mod pipeline;
