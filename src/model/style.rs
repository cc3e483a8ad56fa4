//! Style records copied from the drawing context onto shapes.
//!
//! Lengths are in model pixels, angles in radians.

use thiserror::Error;

/// Construction error for out-of-range color components
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ColorError {
    #[error("color component {component} must be within [0, 1], got {value}")]
    OutOfRange { component: &'static str, value: f64 },
}

/// An RGBA color, every component in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
    o: f64,
}

impl Color {
    pub const BLACK: Color = Color::rgb_const(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb_const(1.0, 1.0, 1.0);
    pub const RED: Color = Color::rgb_const(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::rgb_const(0.0, 1.0, 0.0);
    pub const BLUE: Color = Color::rgb_const(0.0, 0.0, 1.0);
    pub const CYAN: Color = Color::rgb_const(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb_const(1.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb_const(1.0, 1.0, 0.0);
    pub const GRAY: Color = Color::rgb_const(0.5, 0.5, 0.5);
    pub const LIGHT_GRAY: Color = Color::rgb_const(0.75, 0.75, 0.75);
    pub const DARK_GRAY: Color = Color::rgb_const(0.25, 0.25, 0.25);

    /// Opaque color from trusted constants
    pub(crate) const fn rgb_const(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b, o: 1.0 }
    }

    /// Create a color, failing if any component is outside `[0, 1]`
    pub fn try_new(r: f64, g: f64, b: f64, o: f64) -> Result<Color, ColorError> {
        Ok(Color {
            r: unit_component("r", r)?,
            g: unit_component("g", g)?,
            b: unit_component("b", b)?,
            o: unit_component("o", o)?,
        })
    }

    /// Opaque color, failing if any component is outside `[0, 1]`
    pub fn try_rgb(r: f64, g: f64, b: f64) -> Result<Color, ColorError> {
        Color::try_new(r, g, b, 1.0)
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn g(&self) -> f64 {
        self.g
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    pub fn o(&self) -> f64 {
        self.o
    }

    /// Linear blend: `ratio` of `self`, the rest of `other`. `ratio` is clamped to `[0, 1]`.
    pub fn mix(self, other: Color, ratio: f64) -> Color {
        let t = if ratio.is_finite() { ratio.clamp(0.0, 1.0) } else { 1.0 };
        let blend = |a: f64, b: f64| a * t + b * (1.0 - t);
        Color {
            r: blend(self.r, other.r),
            g: blend(self.g, other.g),
            b: blend(self.b, other.b),
            o: blend(self.o, other.o),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

fn unit_component(component: &'static str, value: f64) -> Result<f64, ColorError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ColorError::OutOfRange { component, value })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    /// `linestyle=none`: the border is not painted
    None,
}

/// Where the stroke sits relative to the geometric border (`dimen`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorderPosition {
    /// `dimen=outer`
    #[default]
    Into,
    /// `dimen=inner`
    Out,
    /// `dimen=middle`
    Mid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillingStyle {
    #[default]
    None,
    Plain,
    Gradient,
    CLines,
    VLines,
    HLines,
    CLinesPlain,
    VLinesPlain,
    HLinesPlain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArrowStyle {
    #[default]
    None,
    /// Head pointing away from the line (`<` on the left, `>` on the right)
    Arrow,
    /// Head pointing back along the line
    ReversedArrow,
    DoubleArrow,
    ReversedDoubleArrow,
    /// `|`
    BarEnd,
    /// `|*`
    BarIn,
    /// `[` / `]`
    SquareBracket,
    ReversedSquareBracket,
    /// `(` / `)`
    RoundBracket,
    ReversedRoundBracket,
    /// `o`
    CircleEnd,
    /// `oo`
    CircleIn,
    /// `*`
    DiskEnd,
    /// `**`
    DiskIn,
    /// `c`
    RoundEnd,
    /// `cc`
    RoundIn,
    /// `C`
    SquareEnd,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DotStyle {
    #[default]
    Dot,
    O,
    Plus,
    X,
    Asterisk,
    OPlus,
    OTimes,
    Bar,
    Square,
    SquareFilled,
    Diamond,
    DiamondFilled,
    Triangle,
    TriangleFilled,
    Pentagon,
    PentagonFilled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArcStyle {
    #[default]
    Arc,
    Wedge,
    Chord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FreehandKind {
    #[default]
    Lines,
    Curves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxesStyle {
    #[default]
    Axes,
    Frame,
    None,
}

/// Which axes carry ticks or labels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AxesSelection {
    #[default]
    All,
    X,
    Y,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TicksStyle {
    #[default]
    Full,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotStyle {
    #[default]
    Line,
    Polygon,
    Curve,
    CCurve,
    ECurve,
    Dots,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub thickness: f64,
    pub style: LineStyle,
    pub dash_black: f64,
    pub dash_white: f64,
    pub dot_sep: f64,
    pub border_position: BorderPosition,
    pub opacity: f64,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            thickness: 1.0,
            style: LineStyle::Solid,
            dash_black: 0.0,
            dash_white: 0.0,
            dot_sep: 0.0,
            border_position: BorderPosition::Into,
            opacity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Gradient {
    pub start: Color,
    pub end: Color,
    pub angle: f64,
    pub mid_point: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Hatching {
    pub angle: f64,
    pub sep: f64,
    pub width: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Filling {
    pub style: FillingStyle,
    pub color: Color,
    pub opacity: f64,
    pub gradient: Gradient,
    pub hatching: Hatching,
}

impl Default for Filling {
    fn default() -> Self {
        Self {
            style: FillingStyle::None,
            color: Color::WHITE,
            opacity: 1.0,
            gradient: Gradient::default(),
            hatching: Hatching::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shadow {
    pub enabled: bool,
    pub color: Color,
    pub angle: f64,
    pub size: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DoubleBorder {
    pub enabled: bool,
    pub color: Color,
    pub sep: f64,
}

/// Size parameters shared by every arrow head style
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArrowParams {
    pub size_dim: f64,
    pub size_num: f64,
    pub length: f64,
    pub inset: f64,
    pub tbar_dim: f64,
    pub tbar_num: f64,
    pub bracket_num: f64,
    pub rbracket_num: f64,
    pub dot_dim: f64,
    pub dot_num: f64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arrows {
    pub left: ArrowStyle,
    pub right: ArrowStyle,
    pub params: ArrowParams,
}
