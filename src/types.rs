//! Strongly-typed numeric primitives shared by the resolvers and the shape model.
//!
//! Model space uses pixels with the y axis pointing down; the notation uses
//! centimetres with the y axis pointing up. Conversions live in
//! `import::geometry`.

use std::fmt;
use std::ops::{Add, Sub};

use glam::DVec2;

/// Error type for invalid numeric values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumericError {
    /// Value is NaN
    NaN,
    /// Value is infinite
    Infinite,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::NaN => write!(f, "value is NaN"),
            NumericError::Infinite => write!(f, "value is infinite"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Validate a user-provided number (rejects NaN/infinite)
#[inline]
pub fn finite(val: f64) -> Result<f64, NumericError> {
    if val.is_nan() {
        Err(NumericError::NaN)
    } else if val.is_infinite() {
        Err(NumericError::Infinite)
    } else {
        Ok(val)
    }
}

/// A point in model space (pixels, y down). Always finite.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    /// Create a point from trusted components (const-friendly, unchecked).
    /// Use `try_new` for user-provided values.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Create a point with validation (rejects NaN/infinite components)
    pub fn try_new(x: f64, y: f64) -> Result<Self, NumericError> {
        Ok(Point { x: finite(x)?, y: finite(y)? })
    }

    /// Euclidean distance to another point
    pub fn distance(self, other: Point) -> f64 {
        self.vec().distance(other.vec())
    }

    /// Whether two points coincide within `tolerance` on both axes
    pub fn near(self, other: Point, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance && (self.y - other.y).abs() <= tolerance
    }

    /// Rotate this point around `center` by `angle` radians (model space: positive is clockwise on screen)
    pub fn rotate_around(self, center: Point, angle: f64) -> Point {
        let offset = DVec2::from_angle(angle).rotate(self.vec() - center.vec());
        Point::from(center.vec() + offset)
    }

    /// Point reflected through `center`
    pub fn mirror(self, center: Point) -> Point {
        Point::new(2.0 * center.x - self.x, 2.0 * center.y - self.y)
    }

    pub fn translate(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn vec(self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

impl From<DVec2> for Point {
    fn from(v: DVec2) -> Self {
        Point::new(v.x, v.y)
    }
}

/// Displacement between two points
impl Sub for Point {
    type Output = DVec2;
    fn sub(self, rhs: Point) -> DVec2 {
        self.vec() - rhs.vec()
    }
}

impl Add<DVec2> for Point {
    type Output = Point;
    fn add(self, rhs: DVec2) -> Point {
        Point::from(self.vec() + rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Centre of the bounding box of a point list
pub fn bounds_center(points: &[Point]) -> Point {
    let Some(first) = points.first() else {
        return Point::ORIGIN;
    };
    let (mut min, mut max) = (first.vec(), first.vec());
    for p in &points[1..] {
        min = min.min(p.vec());
        max = max.max(p.vec());
    }
    Point::from((min + max) / 2.0)
}
