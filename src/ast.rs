//! Abstract Syntax Tree types for PSTricks documents
//!
//! These types represent the parsed structure of a document: scopes,
//! drawing commands with their raw literals, and text runs.

/// A complete document (PSTricks commands embedded in LaTeX text)
#[derive(Debug, Clone)]
pub struct Document {
    pub items: Vec<Item>,
}

/// Anything that can appear in a document or inside a scope
#[derive(Debug, Clone)]
pub enum Item {
    /// `\begin{pspicture} ... \end{pspicture}`
    Picture(Picture),
    /// Brace group: `{ ... }`
    Block(Vec<Item>),
    /// `\pscustom{ ... }`
    Custom(Custom),
    /// `\rput(x,y){ ... }`
    Rput(Rput),
    /// `\psrotate(x,y){angle}{ ... }`
    Rotate(Rotate),
    /// A leaf drawing or setting command
    Command(Command),
    /// A path primitive (only produced inside `\pscustom`)
    Path(PathOp),
    /// A word, an unrecognised macro or an environment marker
    Text(String),
}

/// A pspicture environment
#[derive(Debug, Clone)]
pub struct Picture {
    pub star: bool,
    pub params: Vec<Param>,
    /// Zero, one or two bounding corners
    pub corners: Vec<Coord>,
    pub body: Vec<Item>,
}

/// A `\pscustom` block
#[derive(Debug, Clone)]
pub struct Custom {
    pub star: bool,
    pub params: Vec<Param>,
    pub body: Vec<Item>,
}

/// A `\rput` block
#[derive(Debug, Clone)]
pub struct Rput {
    pub star: bool,
    pub ref_point: Option<String>,
    pub angle: Option<AngleSpec>,
    pub position: Coord,
    pub body: Vec<Item>,
}

/// A `\psrotate` block
#[derive(Debug, Clone)]
pub struct Rotate {
    pub params: Vec<Param>,
    pub center: Coord,
    pub angle: Value,
    pub body: Vec<Item>,
}

/// Rotation argument of `\rput`: `{45}`, `{*45}` or a letter such as `{L}`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleSpec {
    /// `*` prefix: the angle is absolute rather than relative to the enclosing rotation
    pub absolute: bool,
    pub degrees: f64,
}

/// A `key=value` setting. The value is kept raw; the drawing context interprets it.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub key: String,
    pub value: String,
}

/// Length unit suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Cm,
    Mm,
    Pt,
    In,
    Bp,
    Pc,
    Dd,
    Cc,
    Sp,
    Em,
    Ex,
}

/// A number with an optional unit suffix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Value {
    pub number: f64,
    pub unit: Option<Unit>,
}

impl Value {
    pub const ZERO: Value = Value { number: 0.0, unit: None };

    pub fn plain(number: f64) -> Self {
        Self { number, unit: None }
    }
}

/// A coordinate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Coord {
    /// `(x,y)`
    Cartesian(Value, Value),
    /// `(r;angle)`, angle in degrees
    Polar { radius: Value, angle: Value },
}

impl Coord {
    pub const ORIGIN: Coord = Coord::Cartesian(Value::ZERO, Value::ZERO);
}

/// Arguments shared by most drawing commands
#[derive(Debug, Clone, Default)]
pub struct ShapeCommand {
    pub star: bool,
    pub params: Vec<Param>,
    /// Raw arrow specification such as `<->`
    pub arrows: Option<String>,
    pub coords: Vec<Coord>,
    /// Braced numeric arguments (radius, angles, plot bounds, ...)
    pub args: Vec<Value>,
}

/// Flavour of `\pscurve`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// `\pscurve`
    Open,
    /// `\psccurve`
    Closed,
    /// `\psecurve`: first and last points only steer the curve
    Ends,
}

/// Model argument of the `\new...color` shortcuts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewColorKind {
    Rgb,
    Gray,
    Cmyk,
    Hsb,
}

impl NewColorKind {
    /// The `\definecolor` model name this shortcut stands for
    pub fn model(self) -> &'static str {
        match self {
            NewColorKind::Rgb => "rgb",
            NewColorKind::Gray => "gray",
            NewColorKind::Cmyk => "cmyk",
            NewColorKind::Hsb => "hsb",
        }
    }
}

/// A color argument: `{name}` or `[model]{values}`
#[derive(Debug, Clone, PartialEq)]
pub struct ColorSpec {
    pub model: Option<String>,
    pub values: String,
}

/// Leaf commands
#[derive(Debug, Clone)]
pub enum Command {
    Psset(Vec<Param>),
    Frame(ShapeCommand),
    Diamond(ShapeCommand),
    Triangle(ShapeCommand),
    Ellipse(ShapeCommand),
    Circle(ShapeCommand),
    QDisk(ShapeCommand),
    Wedge(ShapeCommand),
    Arc { command: ShapeCommand, clockwise: bool },
    Line(ShapeCommand),
    QLine(ShapeCommand),
    Polygon(ShapeCommand),
    Bezier(ShapeCommand),
    Dot(ShapeCommand),
    Dots(ShapeCommand),
    Grid(ShapeCommand),
    Axes(ShapeCommand),
    Plot { command: ShapeCommand, function: String },
    Curve { command: ShapeCommand, kind: CurveKind },
    FramedBox { name: String, text: String },
    DefineColor { name: String, model: String, values: String },
    NewColor { kind: NewColorKind, name: String, values: String },
    Color(ColorSpec),
    TextColor { color: ColorSpec, text: String },
    IncludeGraphics { params: Vec<Param>, path: String },
}

/// Path primitives of `\pscustom`
#[derive(Debug, Clone, PartialEq)]
pub enum PathOp {
    MoveTo(Coord),
    LineTo(Vec<Coord>),
    RLineTo(Vec<Coord>),
    CurveTo([Coord; 3]),
    RCurveTo([Coord; 3]),
    ClosePath,
}
