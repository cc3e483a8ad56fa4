//! Parse pest pairs into AST nodes

use crate::ast::*;
use crate::errors::{ParseError, SourceContext};
use crate::{PstricksParser, Rule};
use pest::Parser;
use pest::iterators::{Pair, Pairs};

/// Parse a document into its AST
pub fn parse(source: &str) -> Result<Document, miette::Report> {
    parse_named("<input>", source)
}

/// Parse a document, naming the source in diagnostics
pub fn parse_named(name: &str, source: &str) -> Result<Document, miette::Report> {
    let pairs = PstricksParser::parse(Rule::document, source)
        .map_err(|e| ParseError::from_pest(&SourceContext::new(name, source), &e))?;

    let mut items = Vec::new();
    for pair in pairs {
        if pair.as_rule() == Rule::document {
            items = parse_items(pair.into_inner())?;
        }
    }

    Ok(Document { items })
}

fn parse_items(pairs: Pairs<Rule>) -> Result<Vec<Item>, miette::Report> {
    let mut items = Vec::new();
    for pair in pairs {
        if let Some(item) = parse_item(pair)? {
            items.push(item);
        }
    }
    Ok(items)
}

fn parse_item(pair: Pair<Rule>) -> Result<Option<Item>, miette::Report> {
    let item = match pair.as_rule() {
        Rule::EOI => return Ok(None),
        Rule::text => Item::Text(pair.as_str().to_string()),
        Rule::pspicture => Item::Picture(parse_picture(pair)?),
        Rule::pst_block => Item::Block(parse_body(pair)?),
        Rule::pscustom => Item::Custom(parse_custom(pair)?),
        Rule::rput => Item::Rput(parse_rput(pair)?),
        Rule::psrotate => Item::Rotate(parse_rotate(pair)?),
        Rule::moveto
        | Rule::lineto
        | Rule::rlineto
        | Rule::curveto
        | Rule::rcurveto
        | Rule::closepath => Item::Path(parse_path_op(pair)?),
        _ => Item::Command(parse_command(pair)?),
    };
    Ok(Some(item))
}

/// Items of the `pst_code`/`custom_code` child of a scope pair
fn parse_body(pair: Pair<Rule>) -> Result<Vec<Item>, miette::Report> {
    for inner in pair.into_inner() {
        if matches!(inner.as_rule(), Rule::pst_code | Rule::custom_code) {
            return parse_items(inner.into_inner());
        }
    }
    Ok(Vec::new())
}

fn parse_picture(pair: Pair<Rule>) -> Result<Picture, miette::Report> {
    let mut picture = Picture {
        star: false,
        params: Vec::new(),
        corners: Vec::new(),
        body: Vec::new(),
    };
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::star => picture.star = true,
            Rule::params => picture.params = parse_params(inner),
            Rule::coord => picture.corners.push(parse_coord(inner)?),
            Rule::pst_code => picture.body = parse_items(inner.into_inner())?,
            _ => {}
        }
    }
    Ok(picture)
}

fn parse_custom(pair: Pair<Rule>) -> Result<Custom, miette::Report> {
    let mut custom = Custom {
        star: false,
        params: Vec::new(),
        body: Vec::new(),
    };
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::star => custom.star = true,
            Rule::params => custom.params = parse_params(inner),
            Rule::custom_code => custom.body = parse_items(inner.into_inner())?,
            _ => {}
        }
    }
    Ok(custom)
}

fn parse_rput(pair: Pair<Rule>) -> Result<Rput, miette::Report> {
    let mut rput = Rput {
        star: false,
        ref_point: None,
        angle: None,
        position: Coord::ORIGIN,
        body: Vec::new(),
    };
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::star => rput.star = true,
            Rule::ref_point => {
                rput.ref_point = inner.into_inner().next().map(|p| p.as_str().trim().to_string());
            }
            Rule::rotation => {
                let spec = inner.into_inner().next().map(|p| p.as_str()).unwrap_or("0");
                rput.angle = Some(parse_angle_spec(spec)?);
            }
            Rule::coord => rput.position = parse_coord(inner)?,
            Rule::pst_code => rput.body = parse_items(inner.into_inner())?,
            _ => {}
        }
    }
    Ok(rput)
}

fn parse_rotate(pair: Pair<Rule>) -> Result<Rotate, miette::Report> {
    let mut rotate = Rotate {
        params: Vec::new(),
        center: Coord::ORIGIN,
        angle: Value::ZERO,
        body: Vec::new(),
    };
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::params => rotate.params = parse_params(inner),
            Rule::coord => rotate.center = parse_coord(inner)?,
            Rule::arg_value => rotate.angle = parse_arg_value(inner)?,
            Rule::pst_code => rotate.body = parse_items(inner.into_inner())?,
            _ => {}
        }
    }
    Ok(rotate)
}

fn parse_angle_spec(spec: &str) -> Result<AngleSpec, miette::Report> {
    let absolute = spec.starts_with('*');
    let body = spec.trim_start_matches('*');
    let degrees = match body {
        "U" | "N" => 0.0,
        "L" | "W" => 90.0,
        "D" | "S" => 180.0,
        "R" | "E" => 270.0,
        number => parse_number(number)?,
    };
    Ok(AngleSpec { absolute, degrees })
}

fn parse_command(pair: Pair<Rule>) -> Result<Command, miette::Report> {
    let rule = pair.as_rule();
    let command = match rule {
        Rule::psset => Command::Psset(pair.into_inner().filter(|p| p.as_rule() == Rule::param).map(parse_param).collect()),
        Rule::psframe => Command::Frame(parse_shape_command(pair)?),
        Rule::psdiamond => Command::Diamond(parse_shape_command(pair)?),
        Rule::pstriangle => Command::Triangle(parse_shape_command(pair)?),
        Rule::psellipse => Command::Ellipse(parse_shape_command(pair)?),
        Rule::pscircle => Command::Circle(parse_shape_command(pair)?),
        Rule::qdisk => Command::QDisk(parse_shape_command(pair)?),
        Rule::pswedge => Command::Wedge(parse_shape_command(pair)?),
        Rule::psarc => {
            let clockwise = pair
                .clone()
                .into_inner()
                .any(|p| p.as_rule() == Rule::arc_name && p.as_str() == "\\psarcn");
            Command::Arc {
                command: parse_shape_command(pair)?,
                clockwise,
            }
        }
        Rule::psline => Command::Line(parse_shape_command(pair)?),
        Rule::qline => Command::QLine(parse_shape_command(pair)?),
        Rule::pspolygon => Command::Polygon(parse_shape_command(pair)?),
        Rule::psbezier => Command::Bezier(parse_shape_command(pair)?),
        Rule::psdot => Command::Dot(parse_shape_command(pair)?),
        Rule::psdots => Command::Dots(parse_shape_command(pair)?),
        Rule::psgrid => Command::Grid(parse_shape_command(pair)?),
        Rule::psaxes => Command::Axes(parse_shape_command(pair)?),
        Rule::psplot => {
            let function = pair
                .clone()
                .into_inner()
                .find(|p| p.as_rule() == Rule::braced_text)
                .map(|p| strip_braces(p.as_str()).trim().to_string())
                .unwrap_or_default();
            Command::Plot {
                command: parse_shape_command(pair)?,
                function,
            }
        }
        Rule::pscurve => {
            let kind = match pair.clone().into_inner().next().map(|p| p.as_str()) {
                Some("\\psccurve") => CurveKind::Closed,
                Some("\\psecurve") => CurveKind::Ends,
                _ => CurveKind::Open,
            };
            Command::Curve {
                command: parse_shape_command(pair)?,
                kind,
            }
        }
        Rule::framed_box => {
            let mut name = String::new();
            let mut text = String::new();
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::box_name => name = inner.as_str().trim_start_matches('\\').to_string(),
                    Rule::braced_text => text = strip_braces(inner.as_str()).trim().to_string(),
                    _ => {}
                }
            }
            Command::FramedBox { name, text }
        }
        Rule::definecolor => {
            let mut inner = pair.into_inner();
            let name = next_str(&mut inner, "color name")?;
            let model = next_str(&mut inner, "color model")?;
            let values = next_str(&mut inner, "color values")?;
            Command::DefineColor { name, model, values }
        }
        Rule::newcolor => {
            let mut inner = pair.into_inner();
            let kind = match next_str(&mut inner, "color command")?.as_str() {
                "\\newgray" => NewColorKind::Gray,
                "\\newcmykcolor" => NewColorKind::Cmyk,
                "\\newhsbcolor" => NewColorKind::Hsb,
                _ => NewColorKind::Rgb,
            };
            let name = next_str(&mut inner, "color name")?;
            let values = next_str(&mut inner, "color values")?;
            Command::NewColor { kind, name, values }
        }
        Rule::color_cmd => {
            let spec = pair
                .into_inner()
                .next()
                .ok_or_else(|| miette::miette!("\\color without a color"))?;
            Command::Color(parse_color_spec(spec))
        }
        Rule::textcolor => {
            let mut color = None;
            let mut text = String::new();
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::color_spec => color = Some(parse_color_spec(inner)),
                    Rule::braced_text => text = strip_braces(inner.as_str()).trim().to_string(),
                    _ => {}
                }
            }
            let color = color.ok_or_else(|| miette::miette!("\\textcolor without a color"))?;
            Command::TextColor { color, text }
        }
        Rule::includegraphics => {
            let mut params = Vec::new();
            let mut path = String::new();
            for inner in pair.into_inner() {
                match inner.as_rule() {
                    Rule::params => params = parse_params(inner),
                    Rule::file_path => path = inner.as_str().trim().to_string(),
                    _ => {}
                }
            }
            Command::IncludeGraphics { params, path }
        }
        _ => {
            return Err(miette::miette!("Unexpected rule in command: {:?}", rule));
        }
    };
    Ok(command)
}

fn parse_shape_command(pair: Pair<Rule>) -> Result<ShapeCommand, miette::Report> {
    let mut command = ShapeCommand::default();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::star => command.star = true,
            Rule::params => command.params = parse_params(inner),
            Rule::arrows => command.arrows = Some(inner.as_str().trim_matches(['{', '}']).trim().to_string()),
            Rule::coord => command.coords.push(parse_coord(inner)?),
            Rule::arg_value => command.args.push(parse_arg_value(inner)?),
            _ => {}
        }
    }
    Ok(command)
}

fn parse_path_op(pair: Pair<Rule>) -> Result<PathOp, miette::Report> {
    let rule = pair.as_rule();
    let coords = pair
        .into_inner()
        .filter(|p| p.as_rule() == Rule::coord)
        .map(parse_coord)
        .collect::<Result<Vec<_>, _>>()?;
    let op = match rule {
        Rule::moveto => PathOp::MoveTo(coords.first().copied().unwrap_or(Coord::ORIGIN)),
        Rule::lineto => PathOp::LineTo(coords),
        Rule::rlineto => PathOp::RLineTo(coords),
        Rule::curveto => PathOp::CurveTo(three_coords(&coords)?),
        Rule::rcurveto => PathOp::RCurveTo(three_coords(&coords)?),
        Rule::closepath => PathOp::ClosePath,
        _ => return Err(miette::miette!("Unexpected rule in path: {:?}", rule)),
    };
    Ok(op)
}

fn three_coords(coords: &[Coord]) -> Result<[Coord; 3], miette::Report> {
    match coords {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(miette::miette!("curveto expects three points, got {}", coords.len())),
    }
}

fn parse_params(pair: Pair<Rule>) -> Vec<Param> {
    pair.into_inner()
        .filter(|p| p.as_rule() == Rule::param)
        .map(parse_param)
        .collect()
}

fn parse_param(pair: Pair<Rule>) -> Param {
    let mut key = String::new();
    let mut value = String::new();
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::param_key => key = inner.as_str().to_string(),
            Rule::param_value => value = strip_braces(inner.as_str().trim()).trim().to_string(),
            _ => {}
        }
    }
    Param { key, value }
}

fn parse_color_spec(pair: Pair<Rule>) -> ColorSpec {
    let mut spec = ColorSpec {
        model: None,
        values: String::new(),
    };
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::color_model => spec.model = Some(inner.as_str().to_string()),
            Rule::color_values => spec.values = inner.as_str().trim().to_string(),
            _ => {}
        }
    }
    spec
}

fn parse_coord(pair: Pair<Rule>) -> Result<Coord, miette::Report> {
    let Some(inner) = pair.into_inner().next() else {
        return Ok(Coord::ORIGIN);
    };
    let rule = inner.as_rule();
    let mut values = inner.into_inner();
    let first = parse_value(values.next().ok_or_else(|| miette::miette!("coordinate without values"))?)?;
    let second = parse_value(values.next().ok_or_else(|| miette::miette!("coordinate needs two values"))?)?;
    Ok(match rule {
        Rule::polar_pair => Coord::Polar {
            radius: first,
            angle: second,
        },
        _ => Coord::Cartesian(first, second),
    })
}

fn parse_arg_value(pair: Pair<Rule>) -> Result<Value, miette::Report> {
    let inner = pair
        .into_inner()
        .next()
        .ok_or_else(|| miette::miette!("empty argument"))?;
    parse_value(inner)
}

fn parse_value(pair: Pair<Rule>) -> Result<Value, miette::Report> {
    let mut value = Value::ZERO;
    for inner in pair.into_inner() {
        match inner.as_rule() {
            Rule::number => value.number = parse_number(inner.as_str())?,
            Rule::unit => value.unit = Some(parse_unit(inner.as_str())?),
            _ => {}
        }
    }
    Ok(value)
}

/// Parse a whole string as a number with an optional unit, as found in parameter values
pub(crate) fn value_literal(s: &str) -> Option<Value> {
    let s = s.trim();
    let pair = PstricksParser::parse(Rule::value, s).ok()?.next()?;
    if pair.as_str().len() != s.len() {
        return None;
    }
    parse_value(pair).ok()
}

fn parse_number(s: &str) -> Result<f64, miette::Report> {
    s.parse::<f64>()
        .map_err(|e| miette::miette!("Invalid number {:?}: {}", s, e))
}

fn parse_unit(s: &str) -> Result<Unit, miette::Report> {
    match s {
        "cm" => Ok(Unit::Cm),
        "mm" => Ok(Unit::Mm),
        "pt" => Ok(Unit::Pt),
        "in" => Ok(Unit::In),
        "bp" => Ok(Unit::Bp),
        "pc" => Ok(Unit::Pc),
        "dd" => Ok(Unit::Dd),
        "cc" => Ok(Unit::Cc),
        "sp" => Ok(Unit::Sp),
        "em" => Ok(Unit::Em),
        "ex" => Ok(Unit::Ex),
        _ => Err(miette::miette!("Invalid unit: {}", s)),
    }
}

fn next_str(pairs: &mut Pairs<Rule>, what: &str) -> Result<String, miette::Report> {
    pairs
        .next()
        .map(|p| p.as_str().trim().to_string())
        .ok_or_else(|| miette::miette!("missing {}", what))
}

fn strip_braces(s: &str) -> &str {
    if s.len() >= 2 && s.starts_with('{') && s.ends_with('}') {
        &s[1..s.len() - 1]
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(source: &str) -> Vec<Command> {
        parse(source)
            .unwrap()
            .items
            .into_iter()
            .filter_map(|item| match item {
                Item::Command(c) => Some(c),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn frame_with_params_and_star() {
        let cmds = commands(r"\psframe*[linecolor=red, linewidth=2pt](0,0)(1.5,2)");
        let Command::Frame(frame) = &cmds[0] else {
            panic!("expected a frame, got {:?}", cmds[0]);
        };
        assert!(frame.star);
        assert_eq!(frame.params.len(), 2);
        assert_eq!(frame.params[0], Param { key: "linecolor".into(), value: "red".into() });
        assert_eq!(frame.params[1].value, "2pt");
        assert_eq!(frame.coords.len(), 2);
        assert_eq!(frame.coords[1], Coord::Cartesian(Value::plain(1.5), Value::plain(2.0)));
    }

    #[test]
    fn units_and_polar_coordinates() {
        let cmds = commands(r"\psdot(10pt,-.5cm) \psdot(2;45)");
        let Command::Dot(first) = &cmds[0] else { panic!() };
        assert_eq!(
            first.coords[0],
            Coord::Cartesian(
                Value { number: 10.0, unit: Some(Unit::Pt) },
                Value { number: -0.5, unit: Some(Unit::Cm) }
            )
        );
        let Command::Dot(second) = &cmds[1] else { panic!() };
        assert!(matches!(second.coords[0], Coord::Polar { .. }));
    }

    #[test]
    fn arc_direction_and_arrows() {
        let cmds = commands(r"\psarcn{<->}(1,1){2}{0}{90}");
        let Command::Arc { command, clockwise } = &cmds[0] else { panic!() };
        assert!(*clockwise);
        assert_eq!(command.arrows.as_deref(), Some("<->"));
        assert_eq!(command.args.len(), 3);
    }

    #[test]
    fn braced_param_values_are_unwrapped() {
        let cmds = commands(r"\psset{dash={3pt 2pt}, arrows=->}");
        let Command::Psset(params) = &cmds[0] else { panic!() };
        assert_eq!(params[0].value, "3pt 2pt");
        assert_eq!(params[1].value, "->");
    }

    #[test]
    fn rput_letter_angle() {
        let doc = parse(r"\rput{L}(1,2){\psdot(0,0)}").unwrap();
        let Item::Rput(rput) = &doc.items[0] else { panic!() };
        assert_eq!(rput.angle, Some(AngleSpec { absolute: false, degrees: 90.0 }));
        assert_eq!(rput.body.len(), 1);
    }

    #[test]
    fn custom_path_ops() {
        let doc = parse(r"\pscustom{\moveto(0,0)\lineto(1,0)\curveto(1,1)(2,1)(2,0)\closepath}").unwrap();
        let Item::Custom(custom) = &doc.items[0] else { panic!() };
        assert_eq!(custom.body.len(), 4);
        assert!(matches!(custom.body[3], Item::Path(PathOp::ClosePath)));
    }

    #[test]
    fn value_literals_must_match_whole_string() {
        assert_eq!(value_literal(" 0.8pt "), Some(Value { number: 0.8, unit: Some(Unit::Pt) }));
        assert_eq!(value_literal("-2"), Some(Value::plain(-2.0)));
        assert_eq!(value_literal("2pt 3"), None);
        assert_eq!(value_literal("red"), None);
    }

    #[test]
    fn unknown_macros_become_text() {
        let doc = parse(r"Hello \textbf world").unwrap();
        let texts: Vec<_> = doc
            .items
            .iter()
            .filter_map(|i| match i {
                Item::Text(t) => Some(t.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts, vec!["Hello", "\\textbf", "world"]);
    }

    #[test]
    fn syntax_error_is_reported() {
        assert!(parse(r"\begin{pspicture}(0,0)(1,1) \psframe(0,0)(1,1)").is_err());
    }
}
