//! The drawing context: every inheritable drawing parameter of a scope
//!
//! A context is a plain value. Opening a scope clones the parent's context,
//! and closing it drops the clone, so nothing set inside a scope leaks out.

use crate::ast::Param;
use crate::errors::ResolveError;
use crate::model::*;
use crate::parse::value_literal;

use super::color::{self, ColorRegistry};
use super::defaults;
use super::geometry::{PT_CM, Units};

/// Inheritable drawing parameters. Lengths are model pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingContext {
    pub units: Units,

    // Line
    pub line_color: Color,
    pub line_width: f64,
    pub line_style: LineStyle,
    pub dash_black: f64,
    pub dash_white: f64,
    pub dot_sep: f64,
    pub border_position: BorderPosition,
    pub stroke_opacity: f64,
    pub frame_arc: f64,

    // Filling
    pub fill_style: FillingStyle,
    pub fill_color: Color,
    pub opacity: f64,
    pub grad_begin: Color,
    pub grad_end: Color,
    pub grad_angle: f64,
    pub grad_midpoint: f64,
    pub hatch_angle: f64,
    pub hatch_sep: f64,
    pub hatch_width: f64,
    pub hatch_color: Color,

    // Double border and shadow
    pub double_line: bool,
    pub double_color: Color,
    /// `None` follows the line width
    pub double_sep: Option<f64>,
    pub shadow: bool,
    pub shadow_color: Color,
    pub shadow_angle: f64,
    pub shadow_size: f64,

    // Arrows
    pub arrow_left: ArrowStyle,
    pub arrow_right: ArrowStyle,
    pub arrow_size: (f64, f64),
    pub arrow_length: f64,
    pub arrow_inset: f64,
    pub tbar_size: (f64, f64),
    pub bracket_length: f64,
    pub rbracket_length: f64,
    pub arrow_dot_size: (f64, f64),

    // Dots
    pub dot_style: DotStyle,
    pub dot_size: (f64, f64),
    pub dot_scale: f64,
    pub dot_angle: f64,
    pub show_points: bool,

    // Grid
    pub grid_width: f64,
    pub grid_color: Color,
    pub grid_dots: u32,
    pub grid_labels: f64,
    pub grid_label_color: Color,
    pub subgrid_div: u32,
    pub subgrid_width: f64,
    pub subgrid_color: Color,
    pub subgrid_dots: u32,

    // Axes
    pub axes_style: AxesStyle,
    pub ticks: AxesSelection,
    pub tick_style: TicksStyle,
    pub tick_size: f64,
    pub labels: AxesSelection,
    pub show_origin: bool,
    pub origin: (f64, f64),
    pub increment: (f64, f64),
    pub distance: (f64, f64),

    // Plot
    pub plot_style: PlotStyle,
    pub plot_points: u32,
    pub polar_plot: bool,

    /// Shape rotation from `gangle`, model radians
    pub gangle: f64,
    /// Accumulated `\rput` rotation in degrees, for absolute `{*angle}`
    pub rput_angle: f64,
    /// Corners of the enclosing pspicture, in grid units
    pub picture_bounds: ((f64, f64), (f64, f64)),

    /// Text collected in this scope; never inherited
    pub text: Vec<String>,
    /// Override from `\color` or `\textcolor`
    pub text_color: Option<Color>,
}

fn pt(ppc: f64, points: f64) -> f64 {
    points * PT_CM * ppc
}

fn gray(level: f64) -> Color {
    Color::rgb_const(level, level, level)
}

impl DrawingContext {
    /// The root context for a given pixels-per-centimetre scale
    pub fn new(ppc: f64) -> Self {
        let (gb, ge) = (defaults::GRADIENT_BEGIN, defaults::GRADIENT_END);
        Self {
            units: Units::new(ppc),
            line_color: Color::BLACK,
            line_width: pt(ppc, defaults::LINE_WIDTH_PT),
            line_style: LineStyle::Solid,
            dash_black: pt(ppc, defaults::DASH_BLACK_PT),
            dash_white: pt(ppc, defaults::DASH_WHITE_PT),
            dot_sep: pt(ppc, defaults::DOT_SEP_PT),
            border_position: BorderPosition::Into,
            stroke_opacity: 1.0,
            frame_arc: defaults::FRAME_ARC,
            fill_style: FillingStyle::None,
            fill_color: Color::WHITE,
            opacity: 1.0,
            grad_begin: Color::rgb_const(gb.0, gb.1, gb.2),
            grad_end: Color::rgb_const(ge.0, ge.1, ge.2),
            grad_angle: defaults::GRADIENT_ANGLE.to_radians(),
            grad_midpoint: defaults::GRADIENT_MIDPOINT,
            hatch_angle: defaults::HATCH_ANGLE.to_radians(),
            hatch_sep: pt(ppc, defaults::HATCH_SEP_PT),
            hatch_width: pt(ppc, defaults::HATCH_WIDTH_PT),
            hatch_color: Color::BLACK,
            double_line: false,
            double_color: Color::WHITE,
            double_sep: None,
            shadow: false,
            shadow_color: Color::DARK_GRAY,
            shadow_angle: defaults::SHADOW_ANGLE.to_radians(),
            shadow_size: pt(ppc, defaults::SHADOW_SIZE_PT),
            arrow_left: ArrowStyle::None,
            arrow_right: ArrowStyle::None,
            arrow_size: (pt(ppc, defaults::ARROW_SIZE_PT), defaults::ARROW_SIZE_NUM),
            arrow_length: defaults::ARROW_LENGTH,
            arrow_inset: defaults::ARROW_INSET,
            tbar_size: (pt(ppc, defaults::TBAR_SIZE_PT), defaults::TBAR_SIZE_NUM),
            bracket_length: defaults::BRACKET_LENGTH,
            rbracket_length: defaults::RBRACKET_LENGTH,
            arrow_dot_size: (pt(ppc, defaults::ARROW_DOT_SIZE_PT), defaults::ARROW_DOT_SIZE_NUM),
            dot_style: DotStyle::Dot,
            dot_size: (pt(ppc, defaults::DOT_SIZE_PT), defaults::DOT_SIZE_NUM),
            dot_scale: defaults::DOT_SCALE,
            dot_angle: defaults::DOT_ANGLE,
            show_points: false,
            grid_width: pt(ppc, defaults::GRID_WIDTH_PT),
            grid_color: Color::BLACK,
            grid_dots: defaults::GRID_DOTS,
            grid_labels: pt(ppc, defaults::GRID_LABELS_PT),
            grid_label_color: Color::BLACK,
            subgrid_div: defaults::SUBGRID_DIV,
            subgrid_width: pt(ppc, defaults::SUBGRID_WIDTH_PT),
            subgrid_color: gray(0.5),
            subgrid_dots: defaults::SUBGRID_DOTS,
            axes_style: AxesStyle::Axes,
            ticks: AxesSelection::All,
            tick_style: TicksStyle::Full,
            tick_size: pt(ppc, defaults::TICK_SIZE_PT),
            labels: AxesSelection::All,
            show_origin: true,
            origin: (0.0, 0.0),
            increment: (defaults::AXES_INCREMENT, defaults::AXES_INCREMENT),
            distance: (0.0, 0.0),
            plot_style: PlotStyle::Line,
            plot_points: defaults::PLOT_POINTS,
            polar_plot: false,
            gangle: 0.0,
            rput_angle: 0.0,
            picture_bounds: defaults::PICTURE_BOUNDS,
            text: Vec::new(),
            text_color: None,
        }
    }

    /// Context for a nested scope: everything inherited except the text buffer
    pub fn child(&self) -> Self {
        Self {
            text: Vec::new(),
            ..self.clone()
        }
    }

    /// Apply each parameter, collecting the failures instead of stopping at the first
    pub fn apply_params(
        &mut self,
        params: &[Param],
        registry: &dyn ColorRegistry,
    ) -> Vec<ResolveError> {
        params
            .iter()
            .filter_map(|p| self.apply_param(&p.key, &p.value, registry).err())
            .collect()
    }

    /// Set one parameter. On error the context is left unchanged.
    pub fn apply_param(
        &mut self,
        key: &str,
        value: &str,
        registry: &dyn ColorRegistry,
    ) -> Result<(), ResolveError> {
        let invalid = || ResolveError::invalid_value(key, value);
        let units = self.units;
        let color = || color::resolve_name(registry, value);
        let length = || value_literal(value).map(|v| units.length(v)).filter(|l| l.is_finite()).ok_or_else(invalid);
        let positive = || length().and_then(|l| if l >= 0.0 { Ok(l) } else { Err(invalid()) });
        let number = || value.trim().parse::<f64>().ok().filter(|n| n.is_finite()).ok_or_else(invalid);
        let count = || value.trim().parse::<u32>().map_err(|_| invalid());
        let angle = || number().map(f64::to_radians);
        let flag = || match value.trim() {
            "" | "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(invalid()),
        };

        match key {
            "unit" => {
                let cm = unit_cm(value).ok_or_else(invalid)?;
                self.units.unit = cm;
            }
            "xunit" => self.units.x_unit = unit_cm(value).ok_or_else(invalid)?,
            "yunit" => self.units.y_unit = unit_cm(value).ok_or_else(invalid)?,

            "linecolor" => self.line_color = color()?,
            "linewidth" => self.line_width = positive()?,
            "linestyle" => {
                self.line_style = match value.trim() {
                    "solid" => LineStyle::Solid,
                    "dashed" => LineStyle::Dashed,
                    "dotted" => LineStyle::Dotted,
                    "none" => LineStyle::None,
                    _ => return Err(invalid()),
                }
            }
            "dash" => {
                let mut parts = value.split_whitespace().map(value_literal);
                match (parts.next(), parts.next(), parts.next()) {
                    (Some(Some(black)), Some(Some(white)), None) => {
                        self.dash_black = units.length(black).abs();
                        self.dash_white = units.length(white).abs();
                    }
                    _ => return Err(invalid()),
                }
            }
            "dotsep" => self.dot_sep = positive()?,
            "dimen" => {
                self.border_position = match value.trim() {
                    "outer" => BorderPosition::Into,
                    "inner" => BorderPosition::Out,
                    "middle" => BorderPosition::Mid,
                    _ => return Err(invalid()),
                }
            }
            // Out-of-range opacities keep the previous value without complaint
            "strokeopacity" => {
                let v = number()?;
                if (0.0..=1.0).contains(&v) {
                    self.stroke_opacity = v;
                }
            }
            "opacity" => {
                let v = number()?;
                if (0.0..=1.0).contains(&v) {
                    self.opacity = v;
                }
            }
            "framearc" => self.frame_arc = number()?.clamp(0.0, 1.0),

            "fillstyle" => {
                self.fill_style = match value.trim() {
                    "none" => FillingStyle::None,
                    "solid" => FillingStyle::Plain,
                    "gradient" => FillingStyle::Gradient,
                    "crosshatch" => FillingStyle::CLines,
                    "crosshatch*" => FillingStyle::CLinesPlain,
                    "vlines" => FillingStyle::VLines,
                    "vlines*" => FillingStyle::VLinesPlain,
                    "hlines" => FillingStyle::HLines,
                    "hlines*" => FillingStyle::HLinesPlain,
                    _ => return Err(invalid()),
                }
            }
            "fillcolor" => self.fill_color = color()?,
            "gradbegin" => self.grad_begin = color()?,
            "gradend" => self.grad_end = color()?,
            "gradangle" => self.grad_angle = angle()?,
            "gradmidpoint" => {
                let v = number()?;
                if !(0.0..=1.0).contains(&v) {
                    return Err(invalid());
                }
                self.grad_midpoint = v;
            }
            "hatchangle" => self.hatch_angle = angle()?,
            "hatchsep" => self.hatch_sep = positive()?,
            "hatchwidth" => self.hatch_width = positive()?,
            "hatchcolor" => self.hatch_color = color()?,

            "doubleline" => self.double_line = flag()?,
            "doublecolor" => self.double_color = color()?,
            "doublesep" => self.double_sep = Some(positive()?),
            "shadow" => self.shadow = flag()?,
            "shadowcolor" => self.shadow_color = color()?,
            "shadowangle" => self.shadow_angle = angle()?,
            "shadowsize" => self.shadow_size = length()?,

            "arrows" => {
                let (left, right) = arrow_styles(value).ok_or_else(invalid)?;
                self.arrow_left = left;
                self.arrow_right = right;
            }
            "arrowsize" => self.arrow_size = dim_num(units, value).ok_or_else(invalid)?,
            "arrowlength" => self.arrow_length = number()?,
            "arrowinset" => self.arrow_inset = number()?,
            "tbarsize" => self.tbar_size = dim_num(units, value).ok_or_else(invalid)?,
            "bracketlength" => self.bracket_length = number()?,
            "rbracketlength" => self.rbracket_length = number()?,

            "dotstyle" => self.dot_style = dot_style(value).ok_or_else(invalid)?,
            "dotsize" => self.dot_size = dim_num(units, value).ok_or_else(invalid)?,
            "dotscale" => self.dot_scale = number()?,
            "dotangle" => self.dot_angle = angle()?,
            "showpoints" => self.show_points = flag()?,

            "gridwidth" => self.grid_width = positive()?,
            "gridcolor" => self.grid_color = color()?,
            "griddots" => self.grid_dots = count()?,
            "gridlabels" => self.grid_labels = positive()?,
            "gridlabelcolor" => self.grid_label_color = color()?,
            "subgriddiv" => self.subgrid_div = count()?,
            "subgridwidth" => self.subgrid_width = positive()?,
            "subgridcolor" => self.subgrid_color = color()?,
            "subgriddots" => self.subgrid_dots = count()?,

            "axesstyle" => {
                self.axes_style = match value.trim() {
                    "axes" => AxesStyle::Axes,
                    "frame" => AxesStyle::Frame,
                    "none" => AxesStyle::None,
                    _ => return Err(invalid()),
                }
            }
            "ticks" => self.ticks = selection(value).ok_or_else(invalid)?,
            "labels" => self.labels = selection(value).ok_or_else(invalid)?,
            "tickstyle" => {
                self.tick_style = match value.trim() {
                    "full" => TicksStyle::Full,
                    "top" => TicksStyle::Top,
                    "bottom" => TicksStyle::Bottom,
                    _ => return Err(invalid()),
                }
            }
            "ticksize" => self.tick_size = length()?,
            "showorigin" => self.show_origin = flag()?,
            "Ox" => self.origin.0 = number()?,
            "Oy" => self.origin.1 = number()?,
            "Dx" => self.increment.0 = number()?,
            "Dy" => self.increment.1 = number()?,
            "dx" => self.distance.0 = number()?,
            "dy" => self.distance.1 = number()?,

            "plotstyle" => {
                self.plot_style = match value.trim() {
                    "line" => PlotStyle::Line,
                    "polygon" => PlotStyle::Polygon,
                    "curve" => PlotStyle::Curve,
                    "ccurve" => PlotStyle::CCurve,
                    "ecurve" => PlotStyle::ECurve,
                    "dots" => PlotStyle::Dots,
                    _ => return Err(invalid()),
                }
            }
            "plotpoints" => self.plot_points = count()?.max(2),
            "polarplot" => self.polar_plot = flag()?,

            "gangle" => self.gangle = super::geometry::rotation(number()?),

            _ => {
                return Err(ResolveError::UnknownParameter {
                    key: key.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn stroke(&self) -> Stroke {
        Stroke {
            color: self.line_color,
            thickness: self.line_width,
            style: self.line_style,
            dash_black: self.dash_black,
            dash_white: self.dash_white,
            dot_sep: self.dot_sep,
            border_position: self.border_position,
            opacity: self.stroke_opacity,
        }
    }

    pub fn filling(&self) -> Filling {
        Filling {
            style: self.fill_style,
            color: self.fill_color,
            opacity: self.opacity,
            gradient: Gradient {
                start: self.grad_begin,
                end: self.grad_end,
                angle: self.grad_angle,
                mid_point: self.grad_midpoint,
            },
            hatching: Hatching {
                angle: self.hatch_angle,
                sep: self.hatch_sep,
                width: self.hatch_width,
                color: self.hatch_color,
            },
        }
    }

    pub fn shadow(&self) -> Shadow {
        Shadow {
            enabled: self.shadow,
            color: self.shadow_color,
            angle: self.shadow_angle,
            size: self.shadow_size,
        }
    }

    pub fn double_border(&self) -> DoubleBorder {
        DoubleBorder {
            enabled: self.double_line,
            color: self.double_color,
            sep: self
                .double_sep
                .unwrap_or(defaults::DOUBLE_SEP_FACTOR * self.line_width),
        }
    }

    pub fn arrows(&self) -> Arrows {
        Arrows {
            left: self.arrow_left,
            right: self.arrow_right,
            params: ArrowParams {
                size_dim: self.arrow_size.0,
                size_num: self.arrow_size.1,
                length: self.arrow_length,
                inset: self.arrow_inset,
                tbar_dim: self.tbar_size.0,
                tbar_num: self.tbar_size.1,
                bracket_num: self.bracket_length,
                rbracket_num: self.rbracket_length,
                dot_dim: self.arrow_dot_size.0,
                dot_num: self.arrow_dot_size.1,
            },
        }
    }

    /// Diameter of a dot: `dotsize` plus its line-width multiple, scaled
    pub fn dot_diameter(&self) -> f64 {
        (self.dot_size.0 + self.dot_size.1 * self.line_width) * self.dot_scale
    }

    pub fn grid_style(&self) -> GridStyle {
        GridStyle {
            color: self.grid_color,
            width: self.grid_width,
            dots: self.grid_dots,
            label_size: self.grid_labels,
            label_color: self.grid_label_color,
            subgrid_div: self.subgrid_div,
            subgrid_width: self.subgrid_width,
            subgrid_color: self.subgrid_color,
            subgrid_dots: self.subgrid_dots,
        }
    }

    pub fn axes_params(&self) -> AxesStyleParams {
        AxesStyleParams {
            style: self.axes_style,
            ticks: self.ticks,
            ticks_style: self.tick_style,
            ticks_size: self.tick_size,
            labels: self.labels,
            show_origin: self.show_origin,
            origin: self.origin,
            increment: self.increment,
            distance: self.distance,
        }
    }

    /// Color of text synthesized for this scope
    pub fn text_color(&self) -> Color {
        self.text_color.unwrap_or(self.line_color)
    }
}

/// `unit`-style values: plain numbers are centimetres
fn unit_cm(value: &str) -> Option<f64> {
    let v = value_literal(value)?;
    let cm = Units::new(1.0).length(v);
    (cm.is_finite() && cm > 0.0).then_some(cm)
}

/// `dimen num` pairs such as `arrowsize=1.5pt 2`; the number is optional
fn dim_num(units: Units, value: &str) -> Option<(f64, f64)> {
    let mut parts = value.split_whitespace();
    let dim = units.length(value_literal(parts.next()?)?);
    let num = match parts.next() {
        Some(n) => n.parse::<f64>().ok()?,
        None => 0.0,
    };
    if parts.next().is_some() || !dim.is_finite() || !num.is_finite() {
        return None;
    }
    Some((dim, num))
}

fn selection(value: &str) -> Option<AxesSelection> {
    Some(match value.trim() {
        "all" => AxesSelection::All,
        "x" => AxesSelection::X,
        "y" => AxesSelection::Y,
        "none" => AxesSelection::None,
        _ => return None,
    })
}

fn dot_style(value: &str) -> Option<DotStyle> {
    Some(match value.trim() {
        "*" => DotStyle::Dot,
        "o" => DotStyle::O,
        "+" => DotStyle::Plus,
        "x" => DotStyle::X,
        "asterisk" => DotStyle::Asterisk,
        "oplus" => DotStyle::OPlus,
        "otimes" => DotStyle::OTimes,
        "|" => DotStyle::Bar,
        "square" => DotStyle::Square,
        "square*" => DotStyle::SquareFilled,
        "diamond" => DotStyle::Diamond,
        "diamond*" => DotStyle::DiamondFilled,
        "triangle" => DotStyle::Triangle,
        "triangle*" => DotStyle::TriangleFilled,
        "pentagon" => DotStyle::Pentagon,
        "pentagon*" => DotStyle::PentagonFilled,
        _ => return None,
    })
}

/// Split an arrow specification such as `<->` or `|*-o` into its two ends
pub fn arrow_styles(spec: &str) -> Option<(ArrowStyle, ArrowStyle)> {
    let spec = spec.trim();
    let dash = spec.find('-')?;
    let (left, right) = (&spec[..dash], &spec[dash + 1..]);
    Some((arrow_end(left, true)?, arrow_end(right, false)?))
}

fn arrow_end(glyph: &str, left: bool) -> Option<ArrowStyle> {
    use ArrowStyle::*;
    // Pointing glyphs read mirrored on the right end
    let pointing = |outward: &str| if left { glyph == outward } else { glyph.chars().rev().map(mirror).collect::<String>() == outward };
    Some(match glyph {
        "" => None,
        _ if pointing("<") => Arrow,
        _ if pointing(">") => ReversedArrow,
        _ if pointing("<<") => DoubleArrow,
        _ if pointing(">>") => ReversedDoubleArrow,
        _ if pointing("[") => SquareBracket,
        _ if pointing("]") => ReversedSquareBracket,
        _ if pointing("(") => RoundBracket,
        _ if pointing(")") => ReversedRoundBracket,
        "|" => BarEnd,
        "|*" => BarIn,
        "o" => CircleEnd,
        "oo" => CircleIn,
        "*" => DiskEnd,
        "**" => DiskIn,
        "c" => RoundEnd,
        "cc" => RoundIn,
        "C" => SquareEnd,
        _ => return Option::None,
    })
}

fn mirror(c: char) -> char {
    match c {
        '<' => '>',
        '>' => '<',
        '[' => ']',
        ']' => '[',
        '(' => ')',
        ')' => '(',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::color::NamedColors;
    use approx::assert_abs_diff_eq;

    fn ctx() -> DrawingContext {
        DrawingContext::new(defaults::PPC)
    }

    #[test]
    fn child_scopes_do_not_leak() {
        let registry = NamedColors::new();
        let mut parent = ctx();
        parent.text.push("outer".into());
        let mut child = parent.child();
        assert!(child.text.is_empty());
        child.apply_param("linecolor", "red", &registry).unwrap();
        assert_eq!(child.line_color, Color::RED);
        assert_eq!(parent.line_color, Color::BLACK);
    }

    #[test]
    fn opacity_out_of_range_is_ignored() {
        let registry = NamedColors::new();
        let mut c = ctx();
        c.apply_param("opacity", "-1", &registry).unwrap();
        c.apply_param("opacity", "2", &registry).unwrap();
        assert_eq!(c.opacity, 1.0);
        c.apply_param("opacity", "0.33", &registry).unwrap();
        assert_eq!(c.opacity, 0.33);
        c.apply_param("strokeopacity", "1.5", &registry).unwrap();
        assert_eq!(c.stroke_opacity, 1.0);
    }

    #[test]
    fn lengths_respect_units() {
        let registry = NamedColors::new();
        let mut c = ctx();
        c.apply_param("linewidth", "2pt", &registry).unwrap();
        assert_abs_diff_eq!(c.line_width, 2.0 * PT_CM * defaults::PPC, epsilon = 1e-9);
        c.apply_param("unit", "2", &registry).unwrap();
        c.apply_param("linewidth", "0.1", &registry).unwrap();
        assert_abs_diff_eq!(c.line_width, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn errors_leave_values_untouched() {
        let registry = NamedColors::new();
        let mut c = ctx();
        let before = c.clone();
        assert!(matches!(
            c.apply_param("linecolor", "nosuchcolor", &registry),
            Err(ResolveError::UnknownColor { .. })
        ));
        assert!(matches!(
            c.apply_param("frobnicate", "1", &registry),
            Err(ResolveError::UnknownParameter { .. })
        ));
        assert!(matches!(
            c.apply_param("linewidth", "-1pt", &registry),
            Err(ResolveError::InvalidValue { .. })
        ));
        assert!(c.apply_param("linestyle", "wavy", &registry).is_err());
        assert_eq!(c, before);
    }

    #[test]
    fn apply_params_collects_failures() {
        let registry = NamedColors::new();
        let mut c = ctx();
        let params = [
            Param { key: "fillstyle".into(), value: "solid".into() },
            Param { key: "fillcolor".into(), value: "mauve".into() },
            Param { key: "shadow".into(), value: "true".into() },
        ];
        let errors = c.apply_params(&params, &registry);
        assert_eq!(errors.len(), 1);
        assert_eq!(c.fill_style, FillingStyle::Plain);
        assert!(c.shadow);
    }

    #[test]
    fn arrow_specifications() {
        assert_eq!(arrow_styles("<->"), Some((ArrowStyle::Arrow, ArrowStyle::Arrow)));
        assert_eq!(arrow_styles("->"), Some((ArrowStyle::None, ArrowStyle::Arrow)));
        assert_eq!(arrow_styles(">-<"), Some((ArrowStyle::ReversedArrow, ArrowStyle::ReversedArrow)));
        assert_eq!(arrow_styles("[-)"), Some((ArrowStyle::SquareBracket, ArrowStyle::RoundBracket)));
        assert_eq!(arrow_styles("|*-oo"), Some((ArrowStyle::BarIn, ArrowStyle::CircleIn)));
        assert_eq!(arrow_styles("<<-"), Some((ArrowStyle::DoubleArrow, ArrowStyle::None)));
        assert_eq!(arrow_styles("?-?"), None);
        assert_eq!(arrow_styles("<>"), None);
    }

    #[test]
    fn dot_diameter_grows_with_line_width() {
        let registry = NamedColors::new();
        let mut c = ctx();
        c.apply_param("dotsize", "4pt", &registry).unwrap();
        assert_abs_diff_eq!(c.dot_diameter(), 4.0 * PT_CM * defaults::PPC, epsilon = 1e-9);
        c.apply_param("dotsize", "0 3", &registry).unwrap();
        c.apply_param("dotscale", "2", &registry).unwrap();
        assert_abs_diff_eq!(c.dot_diameter(), 6.0 * c.line_width, epsilon = 1e-9);
    }
}
