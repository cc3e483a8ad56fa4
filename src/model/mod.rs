//! The shape model populated by the importer
//!
//! `ShapeVariant` is a closed union over every shape the notation can
//! produce. Which style records a shape carries is encoded in its struct
//! and exposed through the capability accessors below, so the importer
//! copies only the fields a shape actually supports.

mod shapes;
mod style;

use enum_dispatch::enum_dispatch;

use crate::types::Point;

pub use shapes::*;
pub use style::*;

/// Geometry shared by every shape
#[enum_dispatch]
pub trait Shape {
    /// Reference point that rotations are applied around
    fn gravity_center(&self) -> Point;

    fn translate(&mut self, dx: f64, dy: f64);

    /// Rotation in radians, positive clockwise on screen
    fn rotation(&self) -> f64;

    fn set_rotation(&mut self, angle: f64);

    /// Rotate around an arbitrary `center`.
    ///
    /// The shape's own coordinates only move so that its gravity centre
    /// lands where the rotation takes it; the angle itself accumulates in
    /// `rotation` and stays applied around the gravity centre.
    fn rotate(&mut self, center: Point, angle: f64) {
        let gc = self.gravity_center();
        let moved = gc.rotate_around(center, angle);
        self.translate(moved.x - gc.x, moved.y - gc.y);
        self.set_rotation(self.rotation() + angle);
    }
}

/// Any shape of the model
#[enum_dispatch(Shape)]
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeVariant {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Rhombus(Rhombus),
    Triangle(Triangle),
    Circle(Circle),
    CircleArc(CircleArc),
    Polygon(Polygon),
    Polyline(Polyline),
    BezierCurve(BezierCurve),
    Dot(Dot),
    Grid(Grid),
    Axes(Axes),
    Plot(Plot),
    Freehand(Freehand),
    Text(Text),
    Picture(Picture),
    Group(Group),
}

/// Generates a shared and a mutable accessor for one capability,
/// returning `None` for shapes that lack it.
macro_rules! capability {
    ($get:ident, $get_mut:ident, $field:ident: $ty:ty => $($variant:ident),+ $(,)?) => {
        pub fn $get(&self) -> Option<&$ty> {
            match self {
                $(ShapeVariant::$variant(s) => Some(&s.$field),)+
                _ => None,
            }
        }

        pub fn $get_mut(&mut self) -> Option<&mut $ty> {
            match self {
                $(ShapeVariant::$variant(s) => Some(&mut s.$field),)+
                _ => None,
            }
        }
    };
}

impl ShapeVariant {
    capability!(stroke, stroke_mut, stroke: Stroke =>
        Rectangle, Ellipse, Rhombus, Triangle, Circle, CircleArc, Polygon,
        Polyline, BezierCurve, Axes, Plot, Freehand);

    capability!(filling, filling_mut, filling: Filling =>
        Rectangle, Ellipse, Rhombus, Triangle, Circle, CircleArc, Polygon,
        Polyline, BezierCurve, Plot, Freehand);

    capability!(shadow, shadow_mut, shadow: Shadow =>
        Rectangle, Ellipse, Rhombus, Triangle, Circle, CircleArc, Polygon,
        Polyline, BezierCurve, Plot, Freehand);

    capability!(double_border, double_border_mut, double_border: DoubleBorder =>
        Rectangle, Ellipse, Rhombus, Triangle, Circle, CircleArc, Polygon,
        Polyline, BezierCurve, Freehand);

    capability!(arrows, arrows_mut, arrows: Arrows =>
        CircleArc, Polyline, BezierCurve, Axes);

    capability!(show_points, show_points_mut, show_points: bool =>
        Polygon, Polyline, BezierCurve, Freehand);

    /// Variant name, for diagnostics and snapshots
    pub fn kind(&self) -> &'static str {
        match self {
            ShapeVariant::Rectangle(_) => "Rectangle",
            ShapeVariant::Ellipse(_) => "Ellipse",
            ShapeVariant::Rhombus(_) => "Rhombus",
            ShapeVariant::Triangle(_) => "Triangle",
            ShapeVariant::Circle(_) => "Circle",
            ShapeVariant::CircleArc(_) => "CircleArc",
            ShapeVariant::Polygon(_) => "Polygon",
            ShapeVariant::Polyline(_) => "Polyline",
            ShapeVariant::BezierCurve(_) => "BezierCurve",
            ShapeVariant::Dot(_) => "Dot",
            ShapeVariant::Grid(_) => "Grid",
            ShapeVariant::Axes(_) => "Axes",
            ShapeVariant::Plot(_) => "Plot",
            ShapeVariant::Freehand(_) => "Freehand",
            ShapeVariant::Text(_) => "Text",
            ShapeVariant::Picture(_) => "Picture",
            ShapeVariant::Group(_) => "Group",
        }
    }

    pub fn as_group(&self) -> Option<&Group> {
        match self {
            ShapeVariant::Group(g) => Some(g),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capabilities_follow_shape_kind() {
        let rect: ShapeVariant = Rectangle::default().into();
        assert!(rect.stroke().is_some());
        assert!(rect.shadow().is_some());
        assert!(rect.arrows().is_none());

        let plot: ShapeVariant = Plot::default().into();
        assert!(plot.filling().is_some());
        assert!(plot.double_border().is_none());

        let dot: ShapeVariant = Dot::default().into();
        assert!(dot.stroke().is_none());
        assert!(dot.filling().is_none());

        let mut line: ShapeVariant = Polyline::default().into();
        *line.show_points_mut().unwrap() = true;
        assert_eq!(line.show_points(), Some(&true));
    }

    #[test]
    fn kind_names_the_variant() {
        assert_eq!(ShapeVariant::from(Group::new()).kind(), "Group");
        assert_eq!(ShapeVariant::from(CircleArc::default()).kind(), "CircleArc");
    }
}
