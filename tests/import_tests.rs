//! End-to-end imports of small documents.

use approx::assert_abs_diff_eq;
use pstricks_import::import::{PT_CM, convert_color, flatten};
use pstricks_import::model::*;
use pstricks_import::types::Point;
use pstricks_import::{ImportOptions, NamedColors, import, import_with};

/// Install a subscriber once so `RUST_LOG=debug` shows the importer's logs
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn kinds(shapes: &[ShapeVariant]) -> Vec<&'static str> {
    shapes.iter().map(|s| s.kind()).collect()
}

#[test]
fn picture_settings_stay_inside_the_picture() {
    init_logging();
    let shapes = import(
        r"\begin{pspicture}(0,0)(2,2)\psset{linecolor=red}\psline(0,0)(1,1)\end{pspicture}
          \psline(0,0)(1,1)",
    )
    .unwrap();
    assert_eq!(kinds(&shapes), ["Polyline", "Polyline"]);
    assert_eq!(shapes[0].stroke().unwrap().color, Color::RED);
    assert_eq!(shapes[1].stroke().unwrap().color, Color::BLACK);
}

#[test]
fn command_parameters_do_not_leak_to_siblings() {
    let shapes = import(r"\pscircle[linewidth=4pt](0,0){1} \pscircle(3,0){1}").unwrap();
    let first = shapes[0].stroke().unwrap().thickness;
    let second = shapes[1].stroke().unwrap().thickness;
    assert!(first > second, "{first} should exceed {second}");
}

#[test]
fn star_overrides_fill_shadow_and_border() {
    let shapes = import(
        r"\psframe*[linecolor=red, fillstyle=vlines, shadow=true, doubleline=true, linestyle=dashed](0,0)(1,1)",
    )
    .unwrap();
    let shape = &shapes[0];
    let filling = shape.filling().unwrap();
    assert_eq!(filling.style, FillingStyle::Plain);
    assert_eq!(filling.color, Color::RED);
    assert!(!shape.shadow().unwrap().enabled);
    assert!(!shape.double_border().unwrap().enabled);
    let stroke = shape.stroke().unwrap();
    assert_eq!(stroke.style, LineStyle::Solid);
    assert_eq!(stroke.border_position, BorderPosition::Into);
}

#[test]
fn frame_corners_are_normalized() {
    let shapes = import(r"\psframe(2,1)(0,3)").unwrap();
    let ShapeVariant::Rectangle(rect) = &shapes[0] else {
        panic!("expected a rectangle, got {}", shapes[0].kind());
    };
    assert_eq!(rect.position, Point::new(0.0, -150.0));
    assert_eq!(rect.width, 100.0);
    assert_eq!(rect.height, 100.0);
}

#[test]
fn frame_geometry_ignores_corner_order() {
    let forward = import(r"\psframe(0.5,0.5)(1.5,1.5)").unwrap();
    let backward = import(r"\psframe(1.5,1.5)(0.5,0.5)").unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn plain_numbers_follow_the_unit_and_dimensions_do_not() {
    let shapes = import(r"\psdot[unit=5](1,1) \psdot(10pt,10pt)").unwrap();
    let ShapeVariant::Dot(scaled) = &shapes[0] else { panic!() };
    assert_eq!(scaled.position, Point::new(250.0, -250.0));

    let ShapeVariant::Dot(absolute) = &shapes[1] else { panic!() };
    let expected = 10.0 * PT_CM * 50.0;
    assert_abs_diff_eq!(absolute.position.x, expected, epsilon = 1e-9);
    assert_abs_diff_eq!(absolute.position.y, -expected, epsilon = 1e-9);
}

#[test]
fn custom_path_merges_into_one_closed_freehand() {
    let shapes = import(r"\pscustom{\moveto(0,0)\lineto(1,0)\lineto(1,1)\closepath}").unwrap();
    assert_eq!(shapes.len(), 1);
    let ShapeVariant::Freehand(freehand) = &shapes[0] else {
        panic!("expected a freehand shape, got {}", shapes[0].kind());
    };
    assert_eq!(freehand.kind, FreehandKind::Lines);
    assert_eq!(
        freehand.points,
        vec![Point::new(0.0, 0.0), Point::new(50.0, 0.0), Point::new(50.0, -50.0)]
    );
    assert!(!freehand.opened);
}

#[test]
fn relative_segments_start_from_the_cursor() {
    let shapes = import(r"\pscustom{\moveto(1,1)\rlineto(1,0)\rlineto(0,1)}").unwrap();
    let ShapeVariant::Freehand(freehand) = &shapes[0] else { panic!() };
    assert_eq!(freehand.points.last(), Some(&Point::new(100.0, -100.0)));
    assert!(freehand.opened);
}

#[test]
fn out_of_range_opacity_keeps_the_default() {
    let shapes = import(r"\pscircle[opacity=3, strokeopacity=-1](0,0){1} \pscircle[opacity=0.25](0,0){1}").unwrap();
    assert_eq!(shapes[0].filling().unwrap().opacity, 1.0);
    assert_eq!(shapes[0].stroke().unwrap().opacity, 1.0);
    assert_eq!(shapes[1].filling().unwrap().opacity, 0.25);
}

#[test]
fn defined_colors_resolve_in_later_commands() {
    let shapes = import(
        r"\definecolor{c}{HTML}{0000FF} \newgray{g}{0.5} \psframe[linecolor=c, fillcolor=g, fillstyle=solid](0,0)(1,1)",
    )
    .unwrap();
    assert_eq!(shapes[0].stroke().unwrap().color, Color::BLUE);
    assert_eq!(shapes[0].filling().unwrap().color, Color::GRAY);
}

#[test]
fn registry_keeps_document_colors() {
    let mut registry = NamedColors::new();
    import_with(r"\newrgbcolor{coral}{1 0.5 0.31}", &ImportOptions::default(), &mut registry).unwrap();
    let shapes = import_with(r"\psline[linecolor=coral](0,0)(1,1)", &ImportOptions::default(), &mut registry)
        .unwrap();
    let color = shapes[0].stroke().unwrap().color;
    assert_abs_diff_eq!(color.g(), 0.5, epsilon = 1e-12);
}

#[test]
fn unknown_color_leaves_the_shape_styled_by_its_scope() {
    let shapes = import(r"\psset{linecolor=blue}\psline[linecolor=nosuchcolor](0,0)(1,1)").unwrap();
    assert_eq!(shapes[0].stroke().unwrap().color, Color::BLUE);
}

#[test]
fn color_models_agree() {
    let red = [
        convert_color("rgb", "1,0,0"),
        convert_color("RGB", "255,0,0"),
        convert_color("HTML", "FF0000"),
        convert_color("cmyk", "0,1,1,0"),
        convert_color("cmy", "0,1,1"),
    ];
    for color in red {
        assert_eq!(color.unwrap(), Color::RED);
    }
    assert_eq!(convert_color("gray", "0").unwrap(), Color::BLACK);
    assert!(convert_color("lab", "1,0,0").is_err());
    assert!(convert_color("rgb", "1,0").is_err());
}

#[test]
fn flattening_an_import_twice_changes_nothing() {
    let shapes = import(
        r"\begin{pspicture}(4,4){\psdot(1,1)}{}{\psline(0,0)(1,1)\psline(1,1)(2,0)}\end{pspicture}",
    )
    .unwrap();
    assert_eq!(kinds(&shapes), ["Dot", "Group"]);
    assert_eq!(flatten(shapes.clone()), shapes);
}

#[test]
fn rotated_rput_turns_its_contents() {
    let shapes = import(r"\rput{90}(0,0){\psline(0,0)(1,0)}").unwrap();
    let line = &shapes[0];
    let center = line.gravity_center();
    assert_abs_diff_eq!(center.x, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(center.y, -25.0, epsilon = 1e-9);
    assert_abs_diff_eq!(line.rotation(), -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn syntax_errors_fail_the_whole_import() {
    assert!(import(r"\begin{pspicture}(1,1) \psdot(0,0)").is_err());
}

#[test]
fn shape_kinds_in_document_order() {
    let shapes = import(
        r"\psframe(0,0)(1,1) \pscircle(1,1){1} \psarc(0,0){1}{0}{90} \psline(1,0)(0,1)
          \psbezier(0,0)(1,1)(2,1)(3,0) \pscurve(0,0)(1,1)(2,0) \psgrid \psaxes(2,2)
          \psplot{0}{1}{x} \pstriangle(0,0)(1,1) \psdiamond(1,1) \psellipse(1,0.5)
          \pswedge{1}{0}{45} \pspolygon(0,0)(1,0)(1,1) Hello",
    )
    .unwrap();
    insta::assert_snapshot!(
        kinds(&shapes).join(" "),
        @"Rectangle Circle CircleArc BezierCurve Freehand Grid Axes Plot Triangle Rhombus Ellipse CircleArc Polygon Text"
    );
}

#[test]
fn pictures_nest_inside_other_scopes() {
    let shapes = import(r"\rput(1,1){\begin{pspicture}(2,2)\psdot(0,0)\end{pspicture}}").unwrap();
    let ShapeVariant::Dot(dot) = &shapes[0] else {
        panic!("expected a dot, got {}", shapes[0].kind());
    };
    assert_eq!(dot.position, Point::new(50.0, -50.0));

    let shapes = import(
        r"{\pspicture(2,2)\psset{linecolor=red}\psline(0,0)(1,1)\endpspicture} \psline(0,0)(1,1)",
    )
    .unwrap();
    assert_eq!(kinds(&shapes), ["Polyline", "Polyline"]);
    assert_eq!(shapes[0].stroke().unwrap().color, Color::RED);
    assert_eq!(shapes[1].stroke().unwrap().color, Color::BLACK);
}

#[test]
fn nested_picture_bounds_apply_to_its_grid() {
    let shapes =
        import(r"\begin{pspicture}(4,4)\begin{pspicture}(2,3)\psgrid\end{pspicture}\psgrid\end{pspicture}").unwrap();
    let [ShapeVariant::Grid(inner), ShapeVariant::Grid(enclosing)] = shapes.as_slice() else {
        panic!("expected two grids, got {:?}", kinds(&shapes));
    };
    assert_eq!(inner.end, (2.0, 3.0));
    assert_eq!(enclosing.end, (4.0, 4.0));
}

#[test]
fn psrotate_turns_the_group_about_its_centre() {
    let shapes = import(r"\psrotate(1,0){90}{\psdot(2,0)}").unwrap();
    let ShapeVariant::Dot(dot) = &shapes[0] else {
        panic!("expected a dot, got {}", shapes[0].kind());
    };
    assert_abs_diff_eq!(dot.position.x, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(dot.position.y, -50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(dot.rotation, -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
}

#[test]
fn grid_coordinates_pick_origin_and_corners() {
    let shapes = import(r"\psgrid \psgrid(2,3) \psgrid(1,1)(4,5) \psgrid(1,1)(0,0)(4,5)").unwrap();
    let grids: Vec<_> = shapes
        .iter()
        .map(|s| match s {
            ShapeVariant::Grid(g) => (g.position, g.start, g.end),
            other => panic!("expected a grid, got {}", other.kind()),
        })
        .collect();
    assert_eq!(grids, [
        (Point::ORIGIN, (0.0, 0.0), (10.0, 10.0)),
        (Point::ORIGIN, (0.0, 0.0), (2.0, 3.0)),
        (Point::new(50.0, -50.0), (0.0, 0.0), (3.0, 4.0)),
        (Point::new(50.0, -50.0), (-1.0, -1.0), (3.0, 4.0)),
    ]);
    let ShapeVariant::Grid(grid) = &shapes[0] else { panic!() };
    assert_eq!((grid.x_unit, grid.y_unit), (50.0, 50.0));
}

#[test]
fn axes_without_coordinates_span_the_picture() {
    let shapes = import(r"\begin{pspicture}(-1,-2)(3,4)\psaxes\end{pspicture}").unwrap();
    let ShapeVariant::Axes(axes) = &shapes[0] else {
        panic!("expected axes, got {}", shapes[0].kind());
    };
    assert_eq!(axes.position, Point::ORIGIN);
    assert_eq!(axes.start, (-1.0, -2.0));
    assert_eq!(axes.end, (3.0, 4.0));
}

#[test]
fn diamond_size_is_twice_its_half_diagonals() {
    let shapes = import(r"\psdiamond(1,1)(0.5,-0.4)").unwrap();
    let ShapeVariant::Rhombus(rhombus) = &shapes[0] else {
        panic!("expected a rhombus, got {}", shapes[0].kind());
    };
    assert_eq!(rhombus.center, Point::new(50.0, -50.0));
    assert_abs_diff_eq!(rhombus.width, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(rhombus.height, 40.0, epsilon = 1e-9);
}

#[test]
fn ellipse_radii_follow_the_axis_units() {
    let shapes = import(r"\psellipse[xunit=2](1,2)(1,0.5)").unwrap();
    let ShapeVariant::Ellipse(ellipse) = &shapes[0] else {
        panic!("expected an ellipse, got {}", shapes[0].kind());
    };
    assert_eq!(ellipse.center, Point::new(100.0, -100.0));
    assert_abs_diff_eq!(ellipse.rx, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(ellipse.ry, 25.0, epsilon = 1e-9);
}

#[test]
fn text_without_a_color_takes_the_line_color() {
    let shapes = import(r"{\psset{linecolor=blue} hello}").unwrap();
    let ShapeVariant::Text(text) = &shapes[0] else {
        panic!("expected text, got {}", shapes[0].kind());
    };
    assert_eq!(text.text, "hello");
    assert_eq!(text.color, Color::BLUE);
}

#[test]
fn every_starred_variant_is_filled_with_the_line_color() {
    let shapes = import(
        r"\psset{linecolor=red, fillstyle=vlines, shadow=true, doubleline=true, linestyle=dashed}
          \qdisk(0,0){1pt} \pscustom*{\moveto(0,0)\lineto(1,0)\lineto(1,1)}
          \psarc*(0,0){1}{0}{90} \psdots*(0,0)(1,1)",
    )
    .unwrap();
    assert_eq!(kinds(&shapes), ["Circle", "Freehand", "CircleArc", "Dot", "Dot"]);
    for shape in &shapes[..3] {
        let filling = shape.filling().unwrap();
        assert_eq!(filling.style, FillingStyle::Plain, "{}", shape.kind());
        assert_eq!(filling.color, Color::RED, "{}", shape.kind());
        assert!(!shape.shadow().unwrap().enabled, "{}", shape.kind());
        assert!(!shape.double_border().unwrap().enabled, "{}", shape.kind());
        assert_eq!(shape.stroke().unwrap().style, LineStyle::Solid, "{}", shape.kind());
    }
    for shape in &shapes[3..] {
        let ShapeVariant::Dot(dot) = shape else { panic!() };
        assert_eq!(dot.color, Color::RED);
    }
}
