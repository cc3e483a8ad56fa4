//! Shape types of the imported model
//!
//! Each shape owns its geometry (model pixels, y down) and the style records
//! its capabilities call for. Rotation is stored separately and applied
//! around the shape's gravity centre, never baked into the coordinates.

use std::path::PathBuf;

use crate::types::{Point, bounds_center};

use super::Shape;
use super::ShapeVariant;
use super::style::*;

/// A rectangle (`\psframe`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rectangle {
    /// Top-left corner
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Corner rounding (`framearc`), in `[0, 1]`
    pub line_arc: f64,
    pub rotation: f64,
    pub stroke: Stroke,
    pub filling: Filling,
    pub shadow: Shadow,
    pub double_border: DoubleBorder,
}

impl Shape for Rectangle {
    fn gravity_center(&self) -> Point {
        self.position.translate(self.width / 2.0, self.height / 2.0)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// An ellipse (`\psellipse`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Ellipse {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    pub rotation: f64,
    pub stroke: Stroke,
    pub filling: Filling,
    pub shadow: Shadow,
    pub double_border: DoubleBorder,
}

impl Shape for Ellipse {
    fn gravity_center(&self) -> Point {
        self.center
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// A rhombus (`\psdiamond`), given by its centre and full diagonals
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Rhombus {
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub stroke: Stroke,
    pub filling: Filling,
    pub shadow: Shadow,
    pub double_border: DoubleBorder,
}

impl Shape for Rhombus {
    fn gravity_center(&self) -> Point {
        self.center
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// An isosceles triangle (`\pstriangle`).
///
/// Unrotated, the apex is at the middle of the top edge of the bounding box
/// and the base lies on the bottom edge.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Triangle {
    /// Top-left corner of the bounding box
    pub position: Point,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub stroke: Stroke,
    pub filling: Filling,
    pub shadow: Shadow,
    pub double_border: DoubleBorder,
}

impl Shape for Triangle {
    fn gravity_center(&self) -> Point {
        self.position.translate(self.width / 2.0, self.height / 2.0)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// A circle (`\pscircle`, `\qdisk`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
    pub rotation: f64,
    pub stroke: Stroke,
    pub filling: Filling,
    pub shadow: Shadow,
    pub double_border: DoubleBorder,
}

impl Shape for Circle {
    fn gravity_center(&self) -> Point {
        self.center
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// A circular arc, wedge or chord (`\psarc`, `\psarcn`, `\pswedge`).
///
/// Angles are in radians, counter-clockwise as drawn, measured before
/// `rotation` is applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircleArc {
    pub center: Point,
    pub radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub arc_style: ArcStyle,
    pub rotation: f64,
    pub stroke: Stroke,
    pub filling: Filling,
    pub shadow: Shadow,
    pub double_border: DoubleBorder,
    pub arrows: Arrows,
}

impl CircleArc {
    /// Point on the circle at `angle`, before rotation
    fn point_at(&self, angle: f64) -> Point {
        self.center
            .translate(self.radius * angle.cos(), -self.radius * angle.sin())
    }

    /// Where the arc starts, rotation applied
    pub fn start_point(&self) -> Point {
        self.point_at(self.start_angle)
            .rotate_around(self.center, self.rotation)
    }

    /// Where the arc ends, rotation applied
    pub fn end_point(&self) -> Point {
        self.point_at(self.end_angle)
            .rotate_around(self.center, self.rotation)
    }
}

impl Shape for CircleArc {
    fn gravity_center(&self) -> Point {
        self.center
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.center = self.center.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// A closed polygon (`\pspolygon`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub points: Vec<Point>,
    pub rotation: f64,
    pub show_points: bool,
    pub stroke: Stroke,
    pub filling: Filling,
    pub shadow: Shadow,
    pub double_border: DoubleBorder,
}

impl Shape for Polygon {
    fn gravity_center(&self) -> Point {
        bounds_center(&self.points)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        translate_all(&mut self.points, dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// An open polyline (`\psline`, `\qline`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polyline {
    pub points: Vec<Point>,
    pub rotation: f64,
    pub show_points: bool,
    pub stroke: Stroke,
    pub filling: Filling,
    pub shadow: Shadow,
    pub double_border: DoubleBorder,
    pub arrows: Arrows,
}

impl Shape for Polyline {
    fn gravity_center(&self) -> Point {
        bounds_center(&self.points)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        translate_all(&mut self.points, dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// A cubic Bézier path (`\psbezier`).
///
/// Each point carries one control point; the other one is its reflection
/// through the point, so segment `i` uses `second_ctrl(i)` and `first_ctrls[i + 1]`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BezierCurve {
    pub points: Vec<Point>,
    pub first_ctrls: Vec<Point>,
    pub closed: bool,
    pub rotation: f64,
    pub show_points: bool,
    pub stroke: Stroke,
    pub filling: Filling,
    pub shadow: Shadow,
    pub double_border: DoubleBorder,
    pub arrows: Arrows,
}

impl BezierCurve {
    /// The outgoing control point of vertex `i`
    pub fn second_ctrl(&self, i: usize) -> Option<Point> {
        Some(self.first_ctrls.get(i)?.mirror(*self.points.get(i)?))
    }
}

impl Shape for BezierCurve {
    fn gravity_center(&self) -> Point {
        bounds_center(&self.points)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        translate_all(&mut self.points, dx, dy);
        translate_all(&mut self.first_ctrls, dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// A dot (`\psdot`, `\psdots`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Dot {
    pub position: Point,
    pub style: DotStyle,
    pub diameter: f64,
    pub color: Color,
    /// Interior of hollow styles
    pub fill_color: Color,
    pub rotation: f64,
}

impl Shape for Dot {
    fn gravity_center(&self) -> Point {
        self.position
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// Styling of `\psgrid`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridStyle {
    pub color: Color,
    pub width: f64,
    pub dots: u32,
    pub label_size: f64,
    pub label_color: Color,
    pub subgrid_div: u32,
    pub subgrid_width: f64,
    pub subgrid_color: Color,
    pub subgrid_dots: u32,
}

/// A grid (`\psgrid`).
///
/// `start`/`end` are in grid units; `x_unit`/`y_unit` convert them to pixels.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Grid {
    /// Model position of the grid origin
    pub position: Point,
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub x_unit: f64,
    pub y_unit: f64,
    pub rotation: f64,
    pub style: GridStyle,
}

impl Shape for Grid {
    fn gravity_center(&self) -> Point {
        let cx = (self.start.0 + self.end.0) / 2.0 * self.x_unit;
        let cy = (self.start.1 + self.end.1) / 2.0 * self.y_unit;
        self.position.translate(cx, -cy)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// Settings of `\psaxes`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AxesStyleParams {
    pub style: AxesStyle,
    pub ticks: AxesSelection,
    pub ticks_style: TicksStyle,
    pub ticks_size: f64,
    pub labels: AxesSelection,
    pub show_origin: bool,
    /// Label values at the origin (`Ox`, `Oy`)
    pub origin: (f64, f64),
    /// Label increments (`Dx`, `Dy`)
    pub increment: (f64, f64),
    /// Label distances in grid units (`dx`, `dy`); zero means "use the increment"
    pub distance: (f64, f64),
}

/// Coordinate axes (`\psaxes`)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Axes {
    pub position: Point,
    pub start: (f64, f64),
    pub end: (f64, f64),
    pub x_unit: f64,
    pub y_unit: f64,
    pub rotation: f64,
    pub params: AxesStyleParams,
    pub stroke: Stroke,
    pub arrows: Arrows,
}

impl Shape for Axes {
    fn gravity_center(&self) -> Point {
        let cx = (self.start.0 + self.end.0) / 2.0 * self.x_unit;
        let cy = (self.start.1 + self.end.1) / 2.0 * self.y_unit;
        self.position.translate(cx, -cy)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// A function plot (`\psplot`). The function is kept as source text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Plot {
    pub position: Point,
    pub equation: String,
    pub min_x: f64,
    pub max_x: f64,
    pub nb_points: u32,
    pub style: PlotStyle,
    pub polar: bool,
    pub x_scale: f64,
    pub y_scale: f64,
    pub dot_style: DotStyle,
    pub dot_diameter: f64,
    pub rotation: f64,
    pub stroke: Stroke,
    pub filling: Filling,
    pub shadow: Shadow,
    pub double_border: DoubleBorder,
}

impl Shape for Plot {
    fn gravity_center(&self) -> Point {
        self.position
            .translate((self.min_x + self.max_x) / 2.0 * self.x_scale, 0.0)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// A free-hand path through points, straight or smoothed
/// (`\pscustom`, `\pscurve` and friends)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Freehand {
    pub points: Vec<Point>,
    pub kind: FreehandKind,
    pub opened: bool,
    pub rotation: f64,
    pub show_points: bool,
    pub stroke: Stroke,
    pub filling: Filling,
    pub shadow: Shadow,
    pub double_border: DoubleBorder,
}

impl Shape for Freehand {
    fn gravity_center(&self) -> Point {
        bounds_center(&self.points)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        translate_all(&mut self.points, dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// A text block collected from a scope
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Text {
    pub position: Point,
    pub text: String,
    pub color: Color,
    pub rotation: f64,
}

impl Shape for Text {
    fn gravity_center(&self) -> Point {
        self.position
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// An included image (`\includegraphics`), centred on `position`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Picture {
    pub position: Point,
    pub path: PathBuf,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl Shape for Picture {
    fn gravity_center(&self) -> Point {
        self.position
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.position = self.position.translate(dx, dy);
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, angle: f64) {
        self.rotation = angle;
    }
}

/// Shapes painted as a unit, in order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Group {
    pub shapes: Vec<ShapeVariant>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, shape: ShapeVariant) {
        self.shapes.push(shape);
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl Shape for Group {
    fn gravity_center(&self) -> Point {
        let centers: Vec<Point> = self.shapes.iter().map(|s| s.gravity_center()).collect();
        bounds_center(&centers)
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        for shape in &mut self.shapes {
            shape.translate(dx, dy);
        }
    }

    fn rotation(&self) -> f64 {
        0.0
    }

    fn set_rotation(&mut self, _angle: f64) {}

    fn rotate(&mut self, center: Point, angle: f64) {
        for shape in &mut self.shapes {
            shape.rotate(center, angle);
        }
    }
}

fn translate_all(points: &mut [Point], dx: f64, dy: f64) {
    for p in points {
        *p = p.translate(dx, dy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn rotation_moves_gravity_centre_and_accumulates() {
        let mut rect = Rectangle {
            position: Point::new(10.0, 0.0),
            width: 2.0,
            height: 2.0,
            ..Default::default()
        };
        rect.rotate(Point::ORIGIN, FRAC_PI_2);
        let c = rect.gravity_center();
        assert_abs_diff_eq!(c.x, -1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(rect.rotation, FRAC_PI_2);
        // Size is untouched: rotation is stored, not baked in
        assert_eq!((rect.width, rect.height), (2.0, 2.0));
    }

    #[test]
    fn arc_end_points_follow_rotation() {
        let arc = CircleArc {
            center: Point::ORIGIN,
            radius: 10.0,
            start_angle: 0.0,
            end_angle: FRAC_PI_2,
            rotation: PI,
            ..Default::default()
        };
        let start = arc.start_point();
        assert_abs_diff_eq!(start.x, -10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(start.y, 0.0, epsilon = 1e-9);
        let end = arc.end_point();
        assert_abs_diff_eq!(end.x, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(end.y, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn group_rotation_reaches_children() {
        let mut group = Group::new();
        group.push(
            Circle {
                center: Point::new(5.0, 0.0),
                radius: 1.0,
                ..Default::default()
            }
            .into(),
        );
        group.rotate(Point::ORIGIN, PI);
        let ShapeVariant::Circle(circle) = &group.shapes[0] else {
            panic!("expected a circle");
        };
        assert_abs_diff_eq!(circle.center.x, -5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(circle.rotation, PI);
    }

    #[test]
    fn bezier_second_control_is_mirrored() {
        let curve = BezierCurve {
            points: vec![Point::new(0.0, 0.0)],
            first_ctrls: vec![Point::new(-1.0, 2.0)],
            ..Default::default()
        };
        assert_eq!(curve.second_ctrl(0), Some(Point::new(1.0, -2.0)));
        assert_eq!(curve.second_ctrl(1), None);
    }
}
