//! Depth-first traversal of a parsed document
//!
//! The walker turns the AST back into the event stream a listener expects:
//! `enter_*` before any event of a scope's body, `exit_*` after all of them,
//! and a single `exit_*` per leaf production, in document order.

use crate::ast::*;

/// Receiver of traversal events. Every method defaults to doing nothing.
#[allow(unused_variables)]
pub trait PstListener {
    fn enter_document(&mut self, document: &Document) {}
    fn exit_document(&mut self, document: &Document) {}

    fn enter_pspicture(&mut self, picture: &Picture) {}
    fn exit_pspicture(&mut self, picture: &Picture) {}

    fn enter_pst_block(&mut self) {}
    fn exit_pst_block(&mut self) {}

    fn enter_pscustom(&mut self, custom: &Custom) {}
    fn exit_pscustom(&mut self, custom: &Custom) {}

    fn enter_rput(&mut self, rput: &Rput) {}
    fn exit_rput(&mut self, rput: &Rput) {}

    fn enter_psrotate(&mut self, rotate: &Rotate) {}
    fn exit_psrotate(&mut self, rotate: &Rotate) {}

    fn exit_psset(&mut self, params: &[Param]) {}
    fn exit_psframe(&mut self, command: &ShapeCommand) {}
    fn exit_psdiamond(&mut self, command: &ShapeCommand) {}
    fn exit_pstriangle(&mut self, command: &ShapeCommand) {}
    fn exit_psellipse(&mut self, command: &ShapeCommand) {}
    fn exit_pscircle(&mut self, command: &ShapeCommand) {}
    fn exit_qdisk(&mut self, command: &ShapeCommand) {}
    fn exit_pswedge(&mut self, command: &ShapeCommand) {}
    fn exit_psarc(&mut self, command: &ShapeCommand, clockwise: bool) {}
    fn exit_psline(&mut self, command: &ShapeCommand) {}
    fn exit_qline(&mut self, command: &ShapeCommand) {}
    fn exit_pspolygon(&mut self, command: &ShapeCommand) {}
    fn exit_psbezier(&mut self, command: &ShapeCommand) {}
    fn exit_psdot(&mut self, command: &ShapeCommand) {}
    fn exit_psdots(&mut self, command: &ShapeCommand) {}
    fn exit_psgrid(&mut self, command: &ShapeCommand) {}
    fn exit_psaxes(&mut self, command: &ShapeCommand) {}
    fn exit_psplot(&mut self, command: &ShapeCommand, function: &str) {}
    fn exit_pscurve(&mut self, command: &ShapeCommand, kind: CurveKind) {}
    fn exit_framed_box(&mut self, name: &str, text: &str) {}

    fn exit_definecolor(&mut self, name: &str, model: &str, values: &str) {}
    fn exit_newcolor(&mut self, kind: NewColorKind, name: &str, values: &str) {}
    fn exit_color(&mut self, color: &ColorSpec) {}
    fn exit_textcolor(&mut self, color: &ColorSpec, text: &str) {}
    fn exit_includegraphics(&mut self, params: &[Param], path: &str) {}

    fn exit_moveto(&mut self, point: &Coord) {}
    fn exit_lineto(&mut self, points: &[Coord], relative: bool) {}
    fn exit_curveto(&mut self, points: &[Coord; 3], relative: bool) {}
    fn exit_closepath(&mut self) {}

    fn exit_text(&mut self, text: &str) {}
}

/// Walk `document`, reporting every production to `listener`
pub fn walk<L: PstListener + ?Sized>(listener: &mut L, document: &Document) {
    listener.enter_document(document);
    walk_items(listener, &document.items);
    listener.exit_document(document);
}

fn walk_items<L: PstListener + ?Sized>(listener: &mut L, items: &[Item]) {
    for item in items {
        walk_item(listener, item);
    }
}

fn walk_item<L: PstListener + ?Sized>(listener: &mut L, item: &Item) {
    match item {
        Item::Picture(picture) => {
            listener.enter_pspicture(picture);
            walk_items(listener, &picture.body);
            listener.exit_pspicture(picture);
        }
        Item::Block(body) => {
            listener.enter_pst_block();
            walk_items(listener, body);
            listener.exit_pst_block();
        }
        Item::Custom(custom) => {
            listener.enter_pscustom(custom);
            walk_items(listener, &custom.body);
            listener.exit_pscustom(custom);
        }
        Item::Rput(rput) => {
            listener.enter_rput(rput);
            walk_items(listener, &rput.body);
            listener.exit_rput(rput);
        }
        Item::Rotate(rotate) => {
            listener.enter_psrotate(rotate);
            walk_items(listener, &rotate.body);
            listener.exit_psrotate(rotate);
        }
        Item::Command(command) => walk_command(listener, command),
        Item::Path(op) => match op {
            PathOp::MoveTo(point) => listener.exit_moveto(point),
            PathOp::LineTo(points) => listener.exit_lineto(points, false),
            PathOp::RLineTo(points) => listener.exit_lineto(points, true),
            PathOp::CurveTo(points) => listener.exit_curveto(points, false),
            PathOp::RCurveTo(points) => listener.exit_curveto(points, true),
            PathOp::ClosePath => listener.exit_closepath(),
        },
        Item::Text(text) => listener.exit_text(text),
    }
}

fn walk_command<L: PstListener + ?Sized>(listener: &mut L, command: &Command) {
    match command {
        Command::Psset(params) => listener.exit_psset(params),
        Command::Frame(c) => listener.exit_psframe(c),
        Command::Diamond(c) => listener.exit_psdiamond(c),
        Command::Triangle(c) => listener.exit_pstriangle(c),
        Command::Ellipse(c) => listener.exit_psellipse(c),
        Command::Circle(c) => listener.exit_pscircle(c),
        Command::QDisk(c) => listener.exit_qdisk(c),
        Command::Wedge(c) => listener.exit_pswedge(c),
        Command::Arc { command, clockwise } => listener.exit_psarc(command, *clockwise),
        Command::Line(c) => listener.exit_psline(c),
        Command::QLine(c) => listener.exit_qline(c),
        Command::Polygon(c) => listener.exit_pspolygon(c),
        Command::Bezier(c) => listener.exit_psbezier(c),
        Command::Dot(c) => listener.exit_psdot(c),
        Command::Dots(c) => listener.exit_psdots(c),
        Command::Grid(c) => listener.exit_psgrid(c),
        Command::Axes(c) => listener.exit_psaxes(c),
        Command::Plot { command, function } => listener.exit_psplot(command, function),
        Command::Curve { command, kind } => listener.exit_pscurve(command, *kind),
        Command::FramedBox { name, text } => listener.exit_framed_box(name, text),
        Command::DefineColor { name, model, values } => {
            listener.exit_definecolor(name, model, values)
        }
        Command::NewColor { kind, name, values } => listener.exit_newcolor(*kind, name, values),
        Command::Color(spec) => listener.exit_color(spec),
        Command::TextColor { color, text } => listener.exit_textcolor(color, text),
        Command::IncludeGraphics { params, path } => listener.exit_includegraphics(params, path),
    }
}
