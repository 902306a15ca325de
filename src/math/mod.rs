/// Principal axis fitting for point clouds
pub mod principal;
/// Distance tolerance and float comparison helpers
pub mod tolerance;
