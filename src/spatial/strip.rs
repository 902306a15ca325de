//! Strip coordinates and the isometries tested by the detector
//!
//! A strip frame places `u` along the repeat axis and `v` across it. In this frame
//! every frieze symmetry has a one-line formula, which keeps the detector free of
//! rotation matrices:
//!
//! - translation by `t`: `(u + t, v)`
//! - reflection across the central line `v = m`: `(u, 2m - v)`
//! - reflection across the perpendicular line `u = c`: `(2c - u, v)`
//! - half-turn about `(c, m)`: `(2c - u, 2m - v)`
//! - glide along `v = m` by `s`: `(u + s, 2m - v)`

use crate::spatial::primitive::{Point, Shape, ShapeKind};

/// Coordinates relative to a strip frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StripPoint {
    /// Position along the axis
    pub u: f64,
    /// Signed offset across the axis
    pub v: f64,
}

impl StripPoint {
    /// Create strip coordinates
    pub const fn new(u: f64, v: f64) -> Self {
        Self { u, v }
    }

    fn distance(self, other: Self) -> f64 {
        (self.u - other.u).hypot(self.v - other.v)
    }
}

/// Orthonormal frame of a strip axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripFrame {
    /// World position of the frame origin
    pub origin: Point,
    /// Unit vector along the axis
    pub direction: [f64; 2],
}

impl StripFrame {
    /// Create a frame, normalising the direction (a zero vector becomes the x-axis)
    pub fn new(origin: Point, direction: [f64; 2]) -> Self {
        let [dx, dy] = direction;
        let length = dx.hypot(dy);
        let direction = if length > 0.0 && length.is_finite() {
            [dx / length, dy / length]
        } else {
            [1.0, 0.0]
        };
        Self { origin, direction }
    }

    /// Unit vector across the axis, a quarter turn counter-clockwise from it
    pub const fn normal(&self) -> [f64; 2] {
        let [dx, dy] = self.direction;
        [-dy, dx]
    }

    /// Frame with the same origin whose axis is the current normal
    #[must_use]
    pub fn perpendicular(&self) -> Self {
        Self::new(self.origin, crate::math::principal::canonical_direction(self.normal()))
    }

    /// Convert a world point to strip coordinates
    pub fn to_strip(&self, point: Point) -> StripPoint {
        let dx = point.x - self.origin.x;
        let dy = point.y - self.origin.y;
        let [ax, ay] = self.direction;
        let [nx, ny] = self.normal();
        StripPoint::new(dx.mul_add(ax, dy * ay), dx.mul_add(nx, dy * ny))
    }

    /// Convert strip coordinates back to a world point
    pub fn to_world(&self, point: StripPoint) -> Point {
        let [ax, ay] = self.direction;
        let [nx, ny] = self.normal();
        Point::new(
            point.v.mul_add(nx, point.u.mul_add(ax, self.origin.x)),
            point.v.mul_add(ny, point.u.mul_add(ay, self.origin.y)),
        )
    }

    /// Express a shape in strip coordinates
    pub fn shape_to_strip(&self, shape: &Shape) -> StripShape {
        match *shape {
            Shape::Point(p) => StripShape::Point(self.to_strip(p)),
            Shape::Segment(a, b) => StripShape::Segment(self.to_strip(a), self.to_strip(b)),
        }
    }
}

/// A [`Shape`] expressed in strip coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StripShape {
    /// Single sample
    Point(StripPoint),
    /// Undirected segment
    Segment(StripPoint, StripPoint),
}

impl StripShape {
    /// Kind of the shape
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::Segment(..) => ShapeKind::Segment,
        }
    }

    /// Reference position: the point, or the segment midpoint
    pub fn reference(&self) -> StripPoint {
        match *self {
            Self::Point(p) => p,
            Self::Segment(a, b) => StripPoint::new(0.5 * (a.u + b.u), 0.5 * (a.v + b.v)),
        }
    }

    /// Smallest and largest `u` covered by the shape
    pub fn u_range(&self) -> (f64, f64) {
        match *self {
            Self::Point(p) => (p.u, p.u),
            Self::Segment(a, b) => (a.u.min(b.u), a.u.max(b.u)),
        }
    }

    /// Smallest and largest `v` covered by the shape
    pub fn v_range(&self) -> (f64, f64) {
        match *self {
            Self::Point(p) => (p.v, p.v),
            Self::Segment(a, b) => (a.v.min(b.v), a.v.max(b.v)),
        }
    }

    /// Matching distance, with the same rules as [`Shape::distance`]
    pub fn distance(&self, other: &Self) -> f64 {
        match (*self, *other) {
            (Self::Point(p), Self::Point(q)) => p.distance(q),
            (Self::Segment(a1, a2), Self::Segment(b1, b2)) => {
                let straight = a1.distance(b1).max(a2.distance(b2));
                let crossed = a1.distance(b2).max(a2.distance(b1));
                straight.min(crossed)
            }
            _ => f64::INFINITY,
        }
    }

    /// Image of the shape under an isometry
    #[must_use]
    pub fn transformed(&self, isometry: &StripIsometry) -> Self {
        match *self {
            Self::Point(p) => Self::Point(isometry.apply(p)),
            Self::Segment(a, b) => Self::Segment(isometry.apply(a), isometry.apply(b)),
        }
    }
}

/// Span of `u` values occupied by a pattern
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StripExtent {
    /// Smallest `u`
    pub u_min: f64,
    /// Largest `u`
    pub u_max: f64,
    /// Smallest `v`
    pub v_min: f64,
    /// Largest `v`
    pub v_max: f64,
}

impl StripExtent {
    /// Extent covering all shapes, or `None` when there are none
    pub fn of<'a>(shapes: impl IntoIterator<Item = &'a StripShape>) -> Option<Self> {
        shapes.into_iter().fold(None, |extent, shape| {
            let (u_lo, u_hi) = shape.u_range();
            let (v_lo, v_hi) = shape.v_range();
            Some(match extent {
                None => Self {
                    u_min: u_lo,
                    u_max: u_hi,
                    v_min: v_lo,
                    v_max: v_hi,
                },
                Some(e) => Self {
                    u_min: e.u_min.min(u_lo),
                    u_max: e.u_max.max(u_hi),
                    v_min: e.v_min.min(v_lo),
                    v_max: e.v_max.max(v_hi),
                },
            })
        })
    }

    /// Length along the axis
    pub fn length(&self) -> f64 {
        self.u_max - self.u_min
    }

    /// Width across the axis
    pub fn width(&self) -> f64 {
        self.v_max - self.v_min
    }

    /// Central line of the strip, halfway across
    pub fn midline(&self) -> f64 {
        0.5 * (self.v_min + self.v_max)
    }

    /// Midpoint along the axis
    pub fn center_u(&self) -> f64 {
        0.5 * (self.u_min + self.u_max)
    }

    /// Whether a shape lies within the sampled `u` span widened by `slack` at each end
    pub fn covers(&self, shape: &StripShape, slack: f64) -> bool {
        let (lo, hi) = shape.u_range();
        lo >= self.u_min - slack && hi <= self.u_max + slack
    }
}

/// The five frieze isometries in strip coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StripIsometry {
    /// Shift along the axis
    Translate {
        /// Signed shift
        shift: f64,
    },
    /// Mirror across the line `v = offset`
    ReflectAcrossAxis {
        /// `v` of the mirror line
        offset: f64,
    },
    /// Mirror across the line `u = offset`
    ReflectAcrossNormal {
        /// `u` of the mirror line
        offset: f64,
    },
    /// Rotation by 180 degrees
    HalfTurn {
        /// Center of rotation
        center: StripPoint,
    },
    /// Mirror across `v = offset` followed by a shift along the axis
    Glide {
        /// `v` of the glide line
        offset: f64,
        /// Signed shift
        shift: f64,
    },
}

impl StripIsometry {
    /// Map a point
    pub fn apply(&self, p: StripPoint) -> StripPoint {
        match *self {
            Self::Translate { shift } => StripPoint::new(p.u + shift, p.v),
            Self::ReflectAcrossAxis { offset } => {
                StripPoint::new(p.u, 2.0f64.mul_add(offset, -p.v))
            }
            Self::ReflectAcrossNormal { offset } => {
                StripPoint::new(2.0f64.mul_add(offset, -p.u), p.v)
            }
            Self::HalfTurn { center } => StripPoint::new(
                2.0f64.mul_add(center.u, -p.u),
                2.0f64.mul_add(center.v, -p.v),
            ),
            Self::Glide { offset, shift } => {
                StripPoint::new(p.u + shift, 2.0f64.mul_add(offset, -p.v))
            }
        }
    }

    /// Isometry undoing this one
    #[must_use]
    pub fn inverse(&self) -> Self {
        match *self {
            Self::Translate { shift } => Self::Translate { shift: -shift },
            Self::Glide { offset, shift } => Self::Glide {
                offset,
                shift: -shift,
            },
            reflection_or_turn => reflection_or_turn,
        }
    }
}
