//! Edge-mask lattice rows
//!
//! Each field of a lattice row is a bit mask of the edges leaving one lattice
//! point. Row `r`, column `c` sits at `(c, -r)` so that north points up.

use crate::io::configuration::MAX_LATTICE_MASK;
use crate::spatial::primitive::{Point, Shape};

/// Edge directions encoded in a lattice mask
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatticeEdge {
    /// Towards the previous row
    North,
    /// Towards the previous row and next column
    NorthEast,
    /// Towards the next column
    East,
    /// Towards the next row and next column
    SouthEast,
}

impl LatticeEdge {
    /// All edges in bit order
    pub const ALL: [Self; 4] = [Self::North, Self::NorthEast, Self::East, Self::SouthEast];

    /// Bit of the edge within a mask
    pub const fn bit(self) -> u8 {
        match self {
            Self::North => 0b0001,
            Self::NorthEast => 0b0010,
            Self::East => 0b0100,
            Self::SouthEast => 0b1000,
        }
    }

    /// Column and row offset of the far end
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
        }
    }
}

/// Parse one lattice field into its mask
///
/// # Errors
///
/// Returns a description of the problem when the field is not an integer in
/// `0..=15`.
pub fn parse_mask(field: &str) -> std::result::Result<u8, String> {
    let mask = field
        .parse::<u8>()
        .map_err(|err| format!("'{field}' is not an edge mask: {err}"))?;
    if mask > MAX_LATTICE_MASK {
        return Err(format!("edge mask {mask} exceeds {MAX_LATTICE_MASK}"));
    }
    Ok(mask)
}

/// Segments described by a mask at lattice position (`column`, `row`)
pub fn edges_at(mask: u8, column: usize, row: usize) -> impl Iterator<Item = Shape> {
    let origin = lattice_point(column as i64, row as i64);
    LatticeEdge::ALL
        .into_iter()
        .filter(move |edge| mask & edge.bit() != 0)
        .map(move |edge| {
            let (dc, dr) = edge.offset();
            Shape::Segment(origin, lattice_point(column as i64 + dc, row as i64 + dr))
        })
}

fn lattice_point(column: i64, row: i64) -> Point {
    Point::new(column as f64, -(row as f64))
}
