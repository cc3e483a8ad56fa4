//! Geometry resolution: units, coordinates and the shape-specific fix-ups
//!
//! Notation space is centimetres with y up; model space is pixels with y
//! down. Undimensioned numbers are scaled by the active `unit` and the axis
//! unit, dimensioned ones are absolute.

use std::f64::consts::PI;

use crate::ast::{Coord, Unit, Value};
use crate::model::CircleArc;
use crate::types::{NumericError, Point, finite};

use super::defaults;

/// Centimetres per point
pub const PT_CM: f64 = 2.54 / 72.27;

/// Length of one `unit` in centimetres
pub fn unit_to_cm(unit: Unit) -> f64 {
    match unit {
        Unit::Cm => 1.0,
        Unit::Mm => 0.1,
        Unit::In => 2.54,
        Unit::Pt => PT_CM,
        Unit::Bp => 2.54 / 72.0,
        Unit::Pc => 12.0 * PT_CM,
        Unit::Dd => 1238.0 / 1157.0 * PT_CM,
        Unit::Cc => 12.0 * 1238.0 / 1157.0 * PT_CM,
        Unit::Sp => PT_CM / 65536.0,
        Unit::Em => 0.35,
        Unit::Ex => 0.15,
    }
}

/// The scale factors active in a scope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Units {
    /// Pixels per centimetre
    pub ppc: f64,
    /// `unit`, in centimetres
    pub unit: f64,
    /// `xunit` and `yunit`, in centimetres
    pub x_unit: f64,
    pub y_unit: f64,
}

impl Units {
    pub fn new(ppc: f64) -> Self {
        Self {
            ppc,
            unit: defaults::UNIT_CM,
            x_unit: defaults::UNIT_CM,
            y_unit: defaults::UNIT_CM,
        }
    }

    /// Absolute length in centimetres; plain numbers use `scale`
    fn cm(value: Value, scale: f64) -> f64 {
        match value.unit {
            Some(unit) => value.number * unit_to_cm(unit),
            None => value.number * scale,
        }
    }

    /// A horizontal length, in pixels
    pub fn x(&self, value: Value) -> f64 {
        Self::cm(value, self.unit * self.x_unit) * self.ppc
    }

    /// A vertical length, in pixels (notation direction, not flipped)
    pub fn y(&self, value: Value) -> f64 {
        Self::cm(value, self.unit * self.y_unit) * self.ppc
    }

    /// A length scaled by `unit` only (radii, dimensions), in pixels
    pub fn length(&self, value: Value) -> f64 {
        Self::cm(value, self.unit) * self.ppc
    }

    /// A horizontal coordinate in grid units
    pub fn grid_x(&self, value: Value) -> f64 {
        match value.unit {
            Some(_) => Self::cm(value, 1.0) / (self.unit * self.x_unit),
            None => value.number,
        }
    }

    /// A vertical coordinate in grid units
    pub fn grid_y(&self, value: Value) -> f64 {
        match value.unit {
            Some(_) => Self::cm(value, 1.0) / (self.unit * self.y_unit),
            None => value.number,
        }
    }

    /// Resolve a coordinate into model space
    pub fn point(&self, coord: &Coord) -> Result<Point, NumericError> {
        let (x, y) = match *coord {
            Coord::Cartesian(x, y) => (self.x(x), self.y(y)),
            Coord::Polar { radius, angle } => {
                let r = self.length(radius);
                let a = angle.number.to_radians();
                (r * a.cos(), r * a.sin())
            }
        };
        Point::try_new(finite(x)?, finite(-y)?)
    }

    /// Resolve a coordinate in grid units, y up
    pub fn grid_point(&self, coord: &Coord) -> (f64, f64) {
        match *coord {
            Coord::Cartesian(x, y) => (self.grid_x(x), self.grid_y(y)),
            Coord::Polar { radius, angle } => {
                let r = self.grid_x(radius);
                let a = angle.number.to_radians();
                (r * a.cos(), r * a.sin())
            }
        }
    }
}

/// A notation angle (degrees, counter-clockwise) as a model rotation
pub fn rotation(degrees: f64) -> f64 {
    -degrees * PI / 180.0
}

/// Order two opposite corners into a top-left corner plus a size.
///
/// Either corner may come first; width and height never drop below
/// `MIN_SIZE`.
pub fn normalize_corners(a: Point, b: Point) -> (Point, f64, f64) {
    let top_left = Point::new(a.x.min(b.x), a.y.min(b.y));
    let width = (a.x - b.x).abs().max(defaults::MIN_SIZE);
    let height = (a.y - b.y).abs().max(defaults::MIN_SIZE);
    (top_left, width, height)
}

/// Whether the segment `a`–`b` retraces the chord of `arc`, in either direction
pub fn is_chord(arc: &CircleArc, a: Point, b: Point, tolerance: f64) -> bool {
    let (start, end) = (arc.start_point(), arc.end_point());
    (a.near(start, tolerance) && b.near(end, tolerance))
        || (a.near(end, tolerance) && b.near(start, tolerance))
}

/// Vertices and incoming control points of a bezier path
#[derive(Debug, Clone, PartialEq)]
pub struct BezierSplit {
    pub points: Vec<Point>,
    pub first_ctrls: Vec<Point>,
    pub closed: bool,
}

/// Split the raw point list of `\psbezier` into vertices and control points.
///
/// The list is `p0` followed by `(ctrl_out, ctrl_in, point)` triples. When
/// the point count is a multiple of three, `p0` is missing and the origin is
/// used. Incomplete trailing triples are ignored. Returns `None` when no
/// complete segment remains.
///
/// A path that ends where it starts is closed, even a single segment: it
/// becomes a one-vertex loop whose only control point pair is kept.
pub fn split_bezier(raw: &[Point]) -> Option<BezierSplit> {
    let mut all = Vec::with_capacity(raw.len() + 1);
    if raw.len() % 3 == 0 {
        all.push(Point::ORIGIN);
    }
    all.extend_from_slice(raw);

    let segments = (all.len() - 1) / 3;
    if segments == 0 {
        return None;
    }

    let p0 = all[0];
    let mut points = vec![p0];
    let mut first_ctrls = vec![all[1].mirror(p0)];
    for triple in all[1..].chunks_exact(3).take(segments) {
        first_ctrls.push(triple[1]);
        points.push(triple[2]);
    }

    let last = points[points.len() - 1];
    let closed = last.distance(p0) < defaults::CLOSE_EPSILON;
    if closed {
        points.pop();
        if let Some(ctrl) = first_ctrls.pop() {
            first_ctrls[0] = ctrl;
        }
    }

    Some(BezierSplit {
        points,
        first_ctrls,
        closed,
    })
}

/// Bounding box of a triangle from its base centre and signed height.
///
/// A positive height points the apex up the page, which is the unrotated
/// model orientation. A negative one hangs the triangle below its base and
/// turns it upside down. Returns the top-left corner, the size and the
/// rotation.
///
/// The model triangle has its apex on top, so the notation's "rotate by π
/// when the height is positive" becomes "rotate by π when it is negative".
pub fn triangle_box(base: Point, width: f64, height: f64) -> (Point, f64, f64, f64) {
    let w = width.abs().max(defaults::MIN_SIZE);
    let h = height.abs().max(defaults::MIN_SIZE);
    if height >= 0.0 {
        (base.translate(-w / 2.0, -h), w, h, 0.0)
    } else {
        (base.translate(-w / 2.0, 0.0), w, h, PI)
    }
}
