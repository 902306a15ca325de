//! Geometric primitives read from the input rows

use std::fmt;

/// Position in the input plane
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (grows upward)
    pub y: f64,
}

impl Point {
    /// Create a point from its coordinates
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Point halfway to another point
    pub fn midpoint(self, other: Self) -> Self {
        Self::new(0.5 * (self.x + other.x), 0.5 * (self.y + other.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Discriminant of a [`Shape`], used to keep matching within one kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Single sample
    Point,
    /// Straight piece of path
    Segment,
}

/// Geometry carried by one input row
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Isolated sample `x,y`
    Point(Point),
    /// Undirected segment `x1,y1,x2,y2`
    Segment(Point, Point),
}

impl Shape {
    /// Kind of the shape
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::Segment(..) => ShapeKind::Segment,
        }
    }

    /// Position used for axis fitting: the point itself or the segment midpoint
    pub fn reference(&self) -> Point {
        match *self {
            Self::Point(p) => p,
            Self::Segment(a, b) => a.midpoint(b),
        }
    }

    /// Endpoints of the shape (a point is its own single endpoint)
    pub fn endpoints(&self) -> impl Iterator<Item = Point> {
        let (first, second) = match *self {
            Self::Point(p) => (p, None),
            Self::Segment(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }

    /// Matching distance between two shapes
    ///
    /// Points compare by Euclidean distance. Segments are undirected, so the
    /// better of the two endpoint pairings is used and the worse endpoint of that
    /// pairing decides. Shapes of different kinds never match.
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
}

/// One ingested shape tagged with its position in the input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primitive {
    /// Zero-based order among accepted rows
    pub index: usize,
    /// Geometry of the row
    pub shape: Shape,
}

impl Primitive {
    /// Create a primitive
    pub const fn new(index: usize, shape: Shape) -> Self {
        Self { index, shape }
    }
}
