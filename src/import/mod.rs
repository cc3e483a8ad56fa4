//! Shape-tree construction from the parsed command stream
//!
//! [`TreeBuilder`] listens to the walker's events. Every scope pushes a
//! [`Scope`] holding its drawing context and shape group, so the two can
//! never drift apart. Leaf commands resolve geometry and colors against the
//! innermost context and append a shape to the innermost group. Closing a
//! scope synthesizes its text, applies `\rput`/`\psrotate` transforms and
//! hands the group to the parent.
//!
//! Resolution failures are logged and recovered at the command that caused
//! them; only syntax errors abort an import.

mod color;
mod context;
mod defaults;
mod flatten;
mod geometry;
mod path_builder;

use std::path::{Path, PathBuf};

use crate::ast::{
    ColorSpec, Coord, Custom, CurveKind, NewColorKind, Param, Picture as PictureScope, Rotate, Rput,
    ShapeCommand, Value,
};
use crate::errors::ResolveError;
use crate::model::*;
use crate::types::{NumericError, Point, finite};
use crate::walk::PstListener;

pub use color::{ColorRegistry, NamedColors, convert as convert_color, resolve_name as resolve_color};
pub use context::{DrawingContext, arrow_styles};
pub use defaults::PPC;
pub use flatten::{flatten, flatten_shape};
pub use geometry::{PT_CM, Units, unit_to_cm};
pub use path_builder::{MergedPath, PathMerger};

/// Settings of one import run
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOptions {
    /// Pixels per centimetre
    pub ppc: f64,
    /// Pixel tolerance when matching a line against an arc's chord
    pub chord_tolerance: f64,
    /// Directory that relative `\includegraphics` paths are resolved against
    pub picture_dir: Option<PathBuf>,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            ppc: defaults::PPC,
            chord_tolerance: defaults::CHORD_TOLERANCE,
            picture_dir: None,
        }
    }
}

/// Transform applied to a scope's group when the scope closes
#[derive(Debug, Clone, Copy, PartialEq)]
enum ScopeExit {
    Keep,
    /// Rotate about the local origin, then move to the `\rput` position
    Place { dx: f64, dy: f64, angle: f64 },
    /// Rotate about an explicit centre
    Rotate { center: Point, angle: f64 },
}

/// One open scope
#[derive(Debug)]
struct Scope {
    context: DrawingContext,
    group: Group,
    /// The last shape built in this scope, held back so a following line can fuse into it
    pending: Option<ShapeVariant>,
    exit: ScopeExit,
    /// Present in `\pscustom` scopes
    merger: Option<PathMerger>,
    /// Starred `\pscustom`
    star: bool,
}

impl Scope {
    fn new(context: DrawingContext) -> Self {
        Self {
            context,
            group: Group::new(),
            pending: None,
            exit: ScopeExit::Keep,
            merger: None,
            star: false,
        }
    }

    /// Move the pending shape into the group and return the group with the scope's text
    fn into_group(mut self) -> Group {
        if let Some(shape) = self.pending.take() {
            self.group.push(shape);
        }
        if !self.context.text.is_empty() {
            self.group.push(
                Text {
                    position: Point::ORIGIN,
                    text: self.context.text.join(" "),
                    color: self.context.text_color(),
                    rotation: 0.0,
                }
                .into(),
            );
        }
        self.group
    }
}

/// Builds the shape tree while a document is walked
pub struct TreeBuilder<'a> {
    options: &'a ImportOptions,
    registry: &'a mut dyn ColorRegistry,
    root: Scope,
    scopes: Vec<Scope>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(options: &'a ImportOptions, registry: &'a mut dyn ColorRegistry) -> Self {
        Self {
            options,
            registry,
            root: Scope::new(DrawingContext::new(options.ppc)),
            scopes: Vec::new(),
        }
    }

    /// Number of open scopes below the document root
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Close whatever is still open and return the flattened result
    pub fn finish(mut self) -> Vec<ShapeVariant> {
        while !self.scopes.is_empty() {
            self.close_scope();
        }
        flatten(self.root.into_group().shapes)
    }

    fn scope(&self) -> &Scope {
        self.scopes.last().unwrap_or(&self.root)
    }

    fn scope_mut(&mut self) -> &mut Scope {
        innermost(&mut self.root, &mut self.scopes)
    }

    fn context(&self) -> &DrawingContext {
        &self.scope().context
    }

    fn open_scope(&mut self, scope: Scope) {
        self.scopes.push(scope);
        crate::log::debug!(depth = self.scopes.len(), "open scope");
    }

    fn close_scope(&mut self) {
        let Some(scope) = self.scopes.pop() else {
            return;
        };
        let exit = scope.exit;
        let mut group = scope.into_group();
        match exit {
            ScopeExit::Keep => {}
            ScopeExit::Place { dx, dy, angle } => {
                group.rotate(Point::ORIGIN, angle);
                group.translate(dx, dy);
            }
            ScopeExit::Rotate { center, angle } => group.rotate(center, angle),
        }
        crate::log::debug!(depth = self.scopes.len(), shapes = group.len(), "close scope");
        self.emit(ShapeVariant::Group(group));
    }

    /// Child context of the innermost scope with `params` applied
    fn scoped_context(&self, params: &[Param], what: &str) -> DrawingContext {
        let mut context = self.context().child();
        for err in context.apply_params(params, &*self.registry) {
            report(what, &err);
        }
        context
    }

    /// A copy of the innermost context for one command, with its parameters and arrows applied
    fn command_context(&self, command: &ShapeCommand, what: &str) -> DrawingContext {
        let mut context = self.context().clone();
        for err in context.apply_params(&command.params, &*self.registry) {
            report(what, &err);
        }
        if let Some(spec) = &command.arrows {
            match arrow_styles(spec) {
                Some((left, right)) => {
                    context.arrow_left = left;
                    context.arrow_right = right;
                }
                None => report(what, &ResolveError::invalid_value("arrows", spec)),
            }
        }
        context
    }

    /// Append a shape to the innermost group, fusing a closing line into a preceding arc
    fn emit(&mut self, shape: ShapeVariant) {
        let tolerance = self.options.chord_tolerance;
        let scope = self.scope_mut();
        if let (Some(ShapeVariant::CircleArc(arc)), ShapeVariant::Polyline(line)) =
            (scope.pending.as_mut(), &shape)
            && arc.arc_style == ArcStyle::Arc
            && line.points.len() == 2
            && geometry::is_chord(arc, line.points[0], line.points[1], tolerance)
        {
            crate::log::debug!("line closes the preceding arc, using a chord");
            arc.arc_style = ArcStyle::Chord;
            return;
        }
        if let Some(previous) = scope.pending.replace(shape) {
            scope.group.push(previous);
        }
    }

    /// Style a freshly built shape from `context` and emit it
    fn add_shape(&mut self, shape: impl Into<ShapeVariant>, context: &DrawingContext, star: bool) {
        let mut shape = shape.into();
        apply_context(&mut shape, context);
        if star {
            apply_star(&mut shape);
        }
        if context.gangle != 0.0 {
            let center = shape.gravity_center();
            shape.rotate(center, context.gangle);
        }
        self.emit(shape);
    }

    fn point(context: &DrawingContext, coord: &Coord, what: &'static str) -> Result<Point, ResolveError> {
        context.units.point(coord).map_err(|e| invalid_geometry(what, e))
    }

    fn points(context: &DrawingContext, coords: &[Coord], what: &'static str) -> Result<Vec<Point>, ResolveError> {
        coords.iter().map(|c| Self::point(context, c, what)).collect()
    }

    /// Build and add a shape, logging and skipping it on failure
    fn build(
        &mut self,
        command: &ShapeCommand,
        what: &'static str,
        star: bool,
        build: impl FnOnce(&DrawingContext) -> Result<Vec<ShapeVariant>, ResolveError>,
    ) {
        let context = self.command_context(command, what);
        match build(&context) {
            Ok(shapes) => {
                for shape in shapes {
                    self.add_shape(shape, &context, star);
                }
            }
            Err(err) => report(what, &err),
        }
    }

    fn resolve_color_spec(&self, spec: &ColorSpec) -> Result<Color, ResolveError> {
        match &spec.model {
            Some(model) => color::convert(model, &spec.values),
            None => color::resolve_name(&*self.registry, &spec.values),
        }
    }

    fn define_color(&mut self, name: &str, model: &str, values: &str) {
        match color::convert(model, values) {
            Ok(color) => {
                crate::log::debug!(color = name, "define color");
                self.registry.define(name, color);
            }
            Err(err) => report("\\definecolor", &err),
        }
    }

    fn picture_path(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        match &self.options.picture_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }
}

/// The innermost open scope, borrowed apart from the rest of the builder
fn innermost<'s>(root: &'s mut Scope, scopes: &'s mut [Scope]) -> &'s mut Scope {
    scopes.last_mut().unwrap_or(root)
}

fn invalid_geometry(what: &'static str, err: NumericError) -> ResolveError {
    ResolveError::InvalidGeometry {
        command: what,
        reason: err.to_string(),
    }
}

/// A resolved length or coordinate; overflowing values reject the shape
fn checked(value: f64, what: &'static str) -> Result<f64, ResolveError> {
    finite(value).map_err(|e| invalid_geometry(what, e))
}

fn checked_pair(pair: (f64, f64), what: &'static str) -> Result<(f64, f64), ResolveError> {
    Ok((checked(pair.0, what)?, checked(pair.1, what)?))
}

/// Grid origin, start and end corners from 0–3 coordinates, in grid units
fn grid_span(
    context: &DrawingContext,
    coords: &[Coord],
    what: &'static str,
) -> Result<((f64, f64), (f64, f64), (f64, f64)), ResolveError> {
    let units = context.units;
    let p = coords
        .iter()
        .map(|c| checked_pair(units.grid_point(c), what))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(match p.as_slice() {
        [] => ((0.0, 0.0), context.picture_bounds.0, context.picture_bounds.1),
        [end] => ((0.0, 0.0), (0.0, 0.0), *end),
        [start, end] => (*start, *start, *end),
        [origin, start, end, ..] => (*origin, *start, *end),
    })
}

/// Grid placement: model position of the origin, corners relative to it, pixels per grid unit
struct GridFrame {
    position: Point,
    start: (f64, f64),
    end: (f64, f64),
    x_unit: f64,
    y_unit: f64,
}

fn grid_frame(context: &DrawingContext, coords: &[Coord], what: &'static str) -> Result<GridFrame, ResolveError> {
    let (origin, start, end) = grid_span(context, coords, what)?;
    let u = context.units;
    let x_unit = checked(u.unit * u.x_unit * u.ppc, what)?;
    let y_unit = checked(u.unit * u.y_unit * u.ppc, what)?;
    let position = Point::try_new(origin.0 * x_unit, -origin.1 * y_unit).map_err(|e| invalid_geometry(what, e))?;
    let relative = |p: (f64, f64)| checked_pair((p.0 - origin.0, p.1 - origin.1), what);
    Ok(GridFrame {
        position,
        start: relative(start)?,
        end: relative(end)?,
        x_unit,
        y_unit,
    })
}

/// Copy the context onto every style record the shape supports
fn apply_context(shape: &mut ShapeVariant, context: &DrawingContext) {
    if let Some(stroke) = shape.stroke_mut() {
        *stroke = context.stroke();
    }
    if let Some(filling) = shape.filling_mut() {
        *filling = context.filling();
    }
    if let Some(shadow) = shape.shadow_mut() {
        *shadow = context.shadow();
    }
    if let Some(double_border) = shape.double_border_mut() {
        *double_border = context.double_border();
    }
    if let Some(arrows) = shape.arrows_mut() {
        *arrows = context.arrows();
    }
    if let Some(show_points) = shape.show_points_mut() {
        *show_points = context.show_points;
    }
}

/// Starred commands: filled with the line color, solid, no shadow or double border
fn apply_star(shape: &mut ShapeVariant) {
    let line_color = shape.stroke().map(|s| s.color);
    if let Some(stroke) = shape.stroke_mut() {
        stroke.border_position = BorderPosition::Into;
        stroke.style = LineStyle::Solid;
    }
    if let Some(filling) = shape.filling_mut() {
        filling.style = FillingStyle::Plain;
        if let Some(color) = line_color {
            filling.color = color;
        }
    }
    if let Some(shadow) = shape.shadow_mut() {
        shadow.enabled = false;
    }
    if let Some(double_border) = shape.double_border_mut() {
        double_border.enabled = false;
    }
}

/// Log a recovered failure at its severity
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
fn report(what: &str, err: &ResolveError) {
    match err {
        ResolveError::UnknownColor { .. }
        | ResolveError::UnknownColorModel { .. }
        | ResolveError::UnknownParameter { .. }
        | ResolveError::Picture { .. } => {
            crate::log::error!("{what}: {err}");
        }
        _ => {
            crate::log::warn!("{what}: {err}");
        }
    }
}

fn arg(command: &ShapeCommand, index: usize, what: &'static str) -> Result<Value, ResolveError> {
    command
        .args
        .get(index)
        .copied()
        .ok_or_else(|| ResolveError::InvalidGeometry {
            command: what,
            reason: format!("missing argument {}", index + 1),
        })
}

/// First coordinate as centre and second as size, or origin and the only coordinate
fn center_and_size(coords: &[Coord]) -> (Coord, Coord) {
    match coords {
        [size] => (Coord::ORIGIN, *size),
        [center, size, ..] => (*center, *size),
        [] => (Coord::ORIGIN, Coord::ORIGIN),
    }
}

fn size_values(coord: &Coord) -> (Value, Value) {
    match *coord {
        Coord::Cartesian(x, y) => (x, y),
        Coord::Polar { radius, .. } => (radius, radius),
    }
}

fn arc_shape(
    context: &DrawingContext,
    command: &ShapeCommand,
    style: ArcStyle,
    what: &'static str,
) -> Result<CircleArc, ResolveError> {
    let center = match command.coords.first() {
        Some(c) => TreeBuilder::point(context, c, what)?,
        None => Point::ORIGIN,
    };
    let radius = checked(context.units.length(arg(command, 0, what)?).abs(), what)?;
    Ok(CircleArc {
        center,
        radius,
        start_angle: arg(command, 1, what)?.number.to_radians(),
        end_angle: arg(command, 2, what)?.number.to_radians(),
        arc_style: style,
        ..Default::default()
    })
}

impl PstListener for TreeBuilder<'_> {
    fn enter_pspicture(&mut self, picture: &PictureScope) {
        let mut context = self.scoped_context(&picture.params, "pspicture");
        let units = context.units;
        let corners = picture
            .corners
            .iter()
            .map(|c| checked_pair(units.grid_point(c), "pspicture"))
            .collect::<Result<Vec<_>, _>>();
        match corners.as_deref() {
            Ok([]) => {}
            Ok([corner]) => context.picture_bounds = ((0.0, 0.0), *corner),
            Ok([first, second, ..]) => context.picture_bounds = (*first, *second),
            Err(err) => report("pspicture", err),
        }
        if picture.star {
            crate::log::debug!("pspicture* clipping is not represented");
        }
        self.open_scope(Scope::new(context));
    }

    fn exit_pspicture(&mut self, _picture: &PictureScope) {
        self.close_scope();
    }

    fn enter_pst_block(&mut self) {
        let context = self.context().child();
        self.open_scope(Scope::new(context));
    }

    fn exit_pst_block(&mut self) {
        self.close_scope();
    }

    fn enter_pscustom(&mut self, custom: &Custom) {
        let context = self.scoped_context(&custom.params, "\\pscustom");
        let mut scope = Scope::new(context);
        scope.merger = Some(PathMerger::new());
        scope.star = custom.star;
        self.open_scope(scope);
    }

    fn exit_pscustom(&mut self, _custom: &Custom) {
        let scope = self.scope_mut();
        let star = scope.star;
        if let Some(merger) = scope.merger.take() {
            let context = scope.context.clone();
            for path in merger.finish() {
                let freehand = Freehand {
                    points: path.points,
                    kind: path.kind,
                    opened: path.opened,
                    ..Default::default()
                };
                self.add_shape(freehand, &context, star);
            }
        }
        self.close_scope();
    }

    fn enter_rput(&mut self, rput: &Rput) {
        let parent = self.context();
        let (dx, dy) = match parent.units.point(&rput.position) {
            Ok(p) => (p.x, p.y),
            Err(err) => {
                report("\\rput", &ResolveError::InvalidGeometry {
                    command: "\\rput",
                    reason: err.to_string(),
                });
                (0.0, 0.0)
            }
        };
        let mut context = parent.child();
        let degrees = match rput.angle {
            Some(spec) if spec.absolute => spec.degrees - parent.rput_angle,
            Some(spec) => spec.degrees,
            None => 0.0,
        };
        context.rput_angle = parent.rput_angle + degrees;
        if rput.ref_point.is_some() {
            crate::log::debug!(reference = ?rput.ref_point, "\\rput reference point only aligns text");
        }
        let mut scope = Scope::new(context);
        scope.exit = ScopeExit::Place {
            dx,
            dy,
            angle: geometry::rotation(degrees),
        };
        self.open_scope(scope);
    }

    fn exit_rput(&mut self, _rput: &Rput) {
        self.close_scope();
    }

    fn enter_psrotate(&mut self, rotate: &Rotate) {
        let context = self.scoped_context(&rotate.params, "\\psrotate");
        let center = match context.units.point(&rotate.center) {
            Ok(p) => p,
            Err(err) => {
                report("\\psrotate", &ResolveError::InvalidGeometry {
                    command: "\\psrotate",
                    reason: err.to_string(),
                });
                Point::ORIGIN
            }
        };
        let mut scope = Scope::new(context);
        scope.exit = ScopeExit::Rotate {
            center,
            angle: geometry::rotation(rotate.angle.number),
        };
        self.open_scope(scope);
    }

    fn exit_psrotate(&mut self, _rotate: &Rotate) {
        self.close_scope();
    }

    fn exit_psset(&mut self, params: &[Param]) {
        let scope = innermost(&mut self.root, &mut self.scopes);
        for err in scope.context.apply_params(params, &*self.registry) {
            report("\\psset", &err);
        }
    }

    fn exit_psframe(&mut self, command: &ShapeCommand) {
        self.build(command, "\\psframe", command.star, |ctx| {
            let (a, b) = match command.coords.as_slice() {
                [corner] => (Point::ORIGIN, TreeBuilder::point(ctx, corner, "\\psframe")?),
                [a, b, ..] => (
                    TreeBuilder::point(ctx, a, "\\psframe")?,
                    TreeBuilder::point(ctx, b, "\\psframe")?,
                ),
                [] => return Ok(Vec::new()),
            };
            let (position, width, height) = geometry::normalize_corners(a, b);
            Ok(vec![
                Rectangle {
                    position,
                    width,
                    height,
                    line_arc: ctx.frame_arc,
                    ..Default::default()
                }
                .into(),
            ])
        });
    }

    fn exit_psdiamond(&mut self, command: &ShapeCommand) {
        self.build(command, "\\psdiamond", command.star, |ctx| {
            let (center, size) = center_and_size(&command.coords);
            let (w, h) = size_values(&size);
            Ok(vec![
                Rhombus {
                    center: TreeBuilder::point(ctx, &center, "\\psdiamond")?,
                    width: checked(2.0 * ctx.units.x(w).abs(), "\\psdiamond")?,
                    height: checked(2.0 * ctx.units.y(h).abs(), "\\psdiamond")?,
                    ..Default::default()
                }
                .into(),
            ])
        });
    }

    fn exit_pstriangle(&mut self, command: &ShapeCommand) {
        self.build(command, "\\pstriangle", command.star, |ctx| {
            let (base, size) = center_and_size(&command.coords);
            let (w, h) = size_values(&size);
            let base = TreeBuilder::point(ctx, &base, "\\pstriangle")?;
            let (position, width, height, rotation) =
                geometry::triangle_box(
                    base,
                    checked(ctx.units.x(w), "\\pstriangle")?,
                    checked(ctx.units.y(h), "\\pstriangle")?,
                );
            Ok(vec![
                Triangle {
                    position,
                    width,
                    height,
                    rotation,
                    ..Default::default()
                }
                .into(),
            ])
        });
    }

    fn exit_psellipse(&mut self, command: &ShapeCommand) {
        self.build(command, "\\psellipse", command.star, |ctx| {
            let (center, size) = center_and_size(&command.coords);
            let (rx, ry) = size_values(&size);
            Ok(vec![
                Ellipse {
                    center: TreeBuilder::point(ctx, &center, "\\psellipse")?,
                    rx: checked(ctx.units.x(rx).abs(), "\\psellipse")?,
                    ry: checked(ctx.units.y(ry).abs(), "\\psellipse")?,
                    ..Default::default()
                }
                .into(),
            ])
        });
    }

    fn exit_pscircle(&mut self, command: &ShapeCommand) {
        self.build(command, "\\pscircle", command.star, |ctx| circle(ctx, command, "\\pscircle"));
    }

    fn exit_qdisk(&mut self, command: &ShapeCommand) {
        self.build(command, "\\qdisk", true, |ctx| circle(ctx, command, "\\qdisk"));
    }

    fn exit_pswedge(&mut self, command: &ShapeCommand) {
        self.build(command, "\\pswedge", command.star, |ctx| {
            Ok(vec![arc_shape(ctx, command, ArcStyle::Wedge, "\\pswedge")?.into()])
        });
    }

    fn exit_psarc(&mut self, command: &ShapeCommand, clockwise: bool) {
        let what = if clockwise { "\\psarcn" } else { "\\psarc" };
        let context = self.command_context(command, what);
        let mut arc = match arc_shape(&context, command, ArcStyle::Arc, what) {
            Ok(arc) => ShapeVariant::CircleArc(arc),
            Err(err) => return report(what, &err),
        };
        apply_context(&mut arc, &context);
        if command.star {
            apply_star(&mut arc);
        }
        if clockwise && let ShapeVariant::CircleArc(a) = &mut arc {
            std::mem::swap(&mut a.start_angle, &mut a.end_angle);
            std::mem::swap(&mut a.arrows.left, &mut a.arrows.right);
        }
        if context.gangle != 0.0 {
            let center = arc.gravity_center();
            arc.rotate(center, context.gangle);
        }
        self.emit(arc);
    }

    fn exit_psline(&mut self, command: &ShapeCommand) {
        self.build(command, "\\psline", command.star, |ctx| {
            let mut points = TreeBuilder::points(ctx, &command.coords, "\\psline")?;
            if points.len() == 1 {
                points.insert(0, Point::ORIGIN);
            }
            Ok(vec![Polyline { points, ..Default::default() }.into()])
        });
    }

    fn exit_qline(&mut self, command: &ShapeCommand) {
        self.build(command, "\\qline", false, |ctx| {
            let points = TreeBuilder::points(ctx, &command.coords, "\\qline")?;
            Ok(vec![Polyline { points, ..Default::default() }.into()])
        });
    }

    fn exit_pspolygon(&mut self, command: &ShapeCommand) {
        self.build(command, "\\pspolygon", command.star, |ctx| {
            let mut points = TreeBuilder::points(ctx, &command.coords, "\\pspolygon")?;
            if points.len() == 2 {
                points.insert(0, Point::ORIGIN);
            }
            if points.len() < 3 {
                return Err(ResolveError::InvalidGeometry {
                    command: "\\pspolygon",
                    reason: "needs at least two points".into(),
                });
            }
            Ok(vec![Polygon { points, ..Default::default() }.into()])
        });
    }

    fn exit_psbezier(&mut self, command: &ShapeCommand) {
        self.build(command, "\\psbezier", command.star, |ctx| {
            let raw = TreeBuilder::points(ctx, &command.coords, "\\psbezier")?;
            let split = geometry::split_bezier(&raw).ok_or_else(|| ResolveError::InvalidGeometry {
                command: "\\psbezier",
                reason: format!("{} points do not make a segment", raw.len()),
            })?;
            Ok(vec![
                BezierCurve {
                    points: split.points,
                    first_ctrls: split.first_ctrls,
                    closed: split.closed,
                    ..Default::default()
                }
                .into(),
            ])
        });
    }

    fn exit_psdot(&mut self, command: &ShapeCommand) {
        self.build(command, "\\psdot", command.star, |ctx| {
            let position = match command.coords.first() {
                Some(c) => TreeBuilder::point(ctx, c, "\\psdot")?,
                None => Point::ORIGIN,
            };
            Ok(vec![dot(ctx, position).into()])
        });
    }

    fn exit_psdots(&mut self, command: &ShapeCommand) {
        self.build(command, "\\psdots", command.star, |ctx| {
            let points = TreeBuilder::points(ctx, &command.coords, "\\psdots")?;
            Ok(points.into_iter().map(|p| dot(ctx, p).into()).collect())
        });
    }

    fn exit_psgrid(&mut self, command: &ShapeCommand) {
        self.build(command, "\\psgrid", false, |ctx| {
            let frame = grid_frame(ctx, &command.coords, "\\psgrid")?;
            Ok(vec![
                Grid {
                    position: frame.position,
                    start: frame.start,
                    end: frame.end,
                    x_unit: frame.x_unit,
                    y_unit: frame.y_unit,
                    rotation: 0.0,
                    style: ctx.grid_style(),
                }
                .into(),
            ])
        });
    }

    fn exit_psaxes(&mut self, command: &ShapeCommand) {
        self.build(command, "\\psaxes", false, |ctx| {
            let frame = grid_frame(ctx, &command.coords, "\\psaxes")?;
            Ok(vec![
                Axes {
                    position: frame.position,
                    start: frame.start,
                    end: frame.end,
                    x_unit: frame.x_unit,
                    y_unit: frame.y_unit,
                    params: ctx.axes_params(),
                    ..Default::default()
                }
                .into(),
            ])
        });
    }

    fn exit_psplot(&mut self, command: &ShapeCommand, function: &str) {
        self.build(command, "\\psplot", command.star, |ctx| {
            let u = ctx.units;
            let min_x = checked(u.grid_x(arg(command, 0, "\\psplot")?), "\\psplot")?;
            let max_x = checked(u.grid_x(arg(command, 1, "\\psplot")?), "\\psplot")?;
            Ok(vec![
                Plot {
                    position: Point::ORIGIN,
                    equation: function.to_string(),
                    min_x: min_x.min(max_x),
                    max_x: min_x.max(max_x),
                    nb_points: ctx.plot_points,
                    style: ctx.plot_style,
                    polar: ctx.polar_plot,
                    x_scale: checked(u.unit * u.x_unit * u.ppc, "\\psplot")?,
                    y_scale: checked(u.unit * u.y_unit * u.ppc, "\\psplot")?,
                    dot_style: ctx.dot_style,
                    dot_diameter: ctx.dot_diameter(),
                    ..Default::default()
                }
                .into(),
            ])
        });
    }

    fn exit_pscurve(&mut self, command: &ShapeCommand, kind: CurveKind) {
        self.build(command, "\\pscurve", command.star, |ctx| {
            let mut points = TreeBuilder::points(ctx, &command.coords, "\\pscurve")?;
            if kind == CurveKind::Ends && points.len() >= 2 {
                points.pop();
                points.remove(0);
            }
            if points.len() < 2 {
                return Err(ResolveError::InvalidGeometry {
                    command: "\\pscurve",
                    reason: "needs at least two points".into(),
                });
            }
            Ok(vec![
                Freehand {
                    points,
                    kind: FreehandKind::Curves,
                    opened: kind != CurveKind::Closed,
                    ..Default::default()
                }
                .into(),
            ])
        });
    }

    fn exit_framed_box(&mut self, _name: &str, text: &str) {
        crate::log::debug!("framed box contributes its text");
        if !text.is_empty() {
            self.scope_mut().context.text.push(text.to_string());
        }
    }

    fn exit_definecolor(&mut self, name: &str, model: &str, values: &str) {
        self.define_color(name, model, values);
    }

    fn exit_newcolor(&mut self, kind: NewColorKind, name: &str, values: &str) {
        self.define_color(name, kind.model(), values);
    }

    fn exit_color(&mut self, spec: &ColorSpec) {
        match self.resolve_color_spec(spec) {
            Ok(color) => self.scope_mut().context.text_color = Some(color),
            Err(err) => report("\\color", &err),
        }
    }

    fn exit_textcolor(&mut self, spec: &ColorSpec, text: &str) {
        match self.resolve_color_spec(spec) {
            Ok(color) => self.scope_mut().context.text_color = Some(color),
            Err(err) => report("\\textcolor", &err),
        }
        if !text.is_empty() {
            self.scope_mut().context.text.push(text.to_string());
        }
    }

    fn exit_includegraphics(&mut self, params: &[Param], path: &str) {
        let resolved = self.picture_path(path);
        let (width, height) = match image::image_dimensions(&resolved) {
            Ok((w, h)) => (f64::from(w), f64::from(h)),
            Err(source) => {
                return report("\\includegraphics", &ResolveError::Picture {
                    path: resolved.display().to_string(),
                    source,
                });
            }
        };
        let context = self.context().clone();
        let mut picture = Picture {
            position: Point::ORIGIN,
            path: resolved,
            width,
            height,
            rotation: 0.0,
        };
        let ratio = width / height.max(1.0);
        for param in params {
            let value = crate::parse::value_literal(&param.value);
            match (param.key.as_str(), value) {
                ("width", Some(v)) => {
                    picture.width = context.units.length(v).abs();
                    picture.height = picture.width / ratio;
                }
                ("height", Some(v)) => {
                    picture.height = context.units.length(v).abs();
                    picture.width = picture.height * ratio;
                }
                ("scale", Some(v)) => {
                    picture.width *= v.number.abs();
                    picture.height *= v.number.abs();
                }
                ("angle", Some(v)) => picture.rotation = geometry::rotation(v.number),
                (key, _) => report("\\includegraphics", &ResolveError::invalid_value(key, &param.value)),
            }
        }
        if let Err(err) = checked(picture.width, "\\includegraphics")
            .and_then(|_| checked(picture.height, "\\includegraphics"))
        {
            return report("\\includegraphics", &err);
        }
        self.emit(picture.into());
    }

    fn exit_moveto(&mut self, point: &Coord) {
        match Self::point(self.context(), point, "\\moveto") {
            Ok(p) => {
                if let Some(merger) = self.scope_mut().merger.as_mut() {
                    merger.move_to(p);
                }
            }
            Err(err) => report("\\moveto", &err),
        }
    }

    fn exit_lineto(&mut self, points: &[Coord], relative: bool) {
        let what = if relative { "\\rlineto" } else { "\\lineto" };
        let resolved = match Self::points(self.context(), points, what) {
            Ok(p) => p,
            Err(err) => return report(what, &err),
        };
        let Some(merger) = self.scope_mut().merger.as_mut() else {
            return;
        };
        for p in resolved {
            let target = if relative { merger.cursor() + p.vec() } else { p };
            merger.line_to(target);
        }
    }

    fn exit_curveto(&mut self, points: &[Coord; 3], relative: bool) {
        let what = if relative { "\\rcurveto" } else { "\\curveto" };
        let end = match Self::point(self.context(), &points[2], what) {
            Ok(p) => p,
            Err(err) => return report(what, &err),
        };
        if let Some(merger) = self.scope_mut().merger.as_mut() {
            let target = if relative { merger.cursor() + end.vec() } else { end };
            merger.curve_to(target);
        }
    }

    fn exit_closepath(&mut self) {
        if let Some(merger) = self.scope_mut().merger.as_mut() {
            merger.close_path();
        }
    }

    fn exit_text(&mut self, text: &str) {
        self.scope_mut().context.text.push(text.to_string());
    }
}

fn circle(context: &DrawingContext, command: &ShapeCommand, what: &'static str) -> Result<Vec<ShapeVariant>, ResolveError> {
    let center = match command.coords.first() {
        Some(c) => TreeBuilder::point(context, c, what)?,
        None => Point::ORIGIN,
    };
    let radius = checked(context.units.length(arg(command, 0, what)?).abs(), what)?;
    Ok(vec![Circle { center, radius, ..Default::default() }.into()])
}

fn dot(context: &DrawingContext, position: Point) -> Dot {
    Dot {
        position,
        style: context.dot_style,
        diameter: context.dot_diameter(),
        color: context.line_color,
        fill_color: context.fill_color,
        rotation: geometry::rotation(context.dot_angle.to_degrees()),
    }
}
