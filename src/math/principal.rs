//! Least-squares line fit of a planar point cloud
//!
//! The dominant direction of a point cloud is the eigenvector of its covariance
//! matrix with the largest eigenvalue. For a strip pattern this is the direction
//! along which the motif repeats.

use ndarray::{Array2, Axis};

/// Principal direction and spread of a point cloud
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxis {
    /// Mean position of the cloud
    pub centroid: [f64; 2],
    /// Unit vector of largest variance, oriented towards increasing x (or y)
    pub direction: [f64; 2],
    /// Variance along the direction
    pub major_variance: f64,
    /// Variance across the direction
    pub minor_variance: f64,
}

/// Fit a line through the rows of an `n x 2` position matrix
///
/// Returns `None` for an empty matrix or one without exactly two columns. An
/// isotropic cloud (including a single position) has no preferred direction and
/// falls back to the x-axis.
pub fn fit_principal_axis(positions: &Array2<f64>) -> Option<PrincipalAxis> {
    let (rows, cols) = positions.dim();
    if rows == 0 || cols != 2 {
        return None;
    }

    let mean = positions.mean_axis(Axis(0))?;
    let centered = positions - &mean;
    let covariance = centered.t().dot(&centered) / rows as f64;

    let sxx = covariance.get((0, 0)).copied().unwrap_or(0.0);
    let syy = covariance.get((1, 1)).copied().unwrap_or(0.0);
    let sxy = covariance.get((0, 1)).copied().unwrap_or(0.0);

    let half_trace = 0.5 * (sxx + syy);
    let half_gap = (0.5 * (sxx - syy)).hypot(sxy);

    let scale = sxx.abs().max(syy.abs()).max(f64::MIN_POSITIVE);
    let direction = if half_gap <= scale * 1e-12 {
        [1.0, 0.0]
    } else {
        let angle = 0.5 * (2.0 * sxy).atan2(sxx - syy);
        canonical_direction([angle.cos(), angle.sin()])
    };

    Some(PrincipalAxis {
        centroid: [
            mean.get(0).copied().unwrap_or(0.0),
            mean.get(1).copied().unwrap_or(0.0),
        ],
        direction,
        major_variance: half_trace + half_gap,
        minor_variance: (half_trace - half_gap).max(0.0),
    })
}

/// Flip a direction so it points towards increasing x, or increasing y when vertical
pub fn canonical_direction(direction: [f64; 2]) -> [f64; 2] {
    let [dx, dy] = direction;
    let length = dx.hypot(dy);
    if length == 0.0 {
        return [1.0, 0.0];
    }
    let (dx, dy) = (dx / length, dy / length);
    if dx.abs() <= 1e-12 {
        [0.0, 1.0]
    } else if dx < 0.0 {
        [-dx, -dy]
    } else {
        [dx, dy]
    }
}
