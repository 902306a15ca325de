/// Immutable pattern sets with bounds and strip axis
pub mod pattern;
/// Points, segments and indexed primitives
pub mod primitive;
/// Strip coordinates, extents and frieze isometries
pub mod strip;
