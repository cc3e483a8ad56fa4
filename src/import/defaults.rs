//! Default drawing parameters (lengths in points, angles in degrees, as PSTricks states them)

/// Pixels per centimetre
pub const PPC: f64 = 50.0;
/// Maximum distance between a line end and an arc end for chord fusion, in pixels
pub const CHORD_TOLERANCE: f64 = 0.5;
/// Smallest width or height of a shape built from two corners, in pixels
pub const MIN_SIZE: f64 = 0.1;
/// Distance under which the first and last bezier points make a closed curve
pub const CLOSE_EPSILON: f64 = 1e-5;

pub const UNIT_CM: f64 = 1.0;

pub const LINE_WIDTH_PT: f64 = 0.8;
pub const DASH_BLACK_PT: f64 = 5.0;
pub const DASH_WHITE_PT: f64 = 3.0;
pub const DOT_SEP_PT: f64 = 3.0;
/// `doublesep` is this many line widths
pub const DOUBLE_SEP_FACTOR: f64 = 1.25;
pub const SHADOW_SIZE_PT: f64 = 3.0;
pub const SHADOW_ANGLE: f64 = -45.0;
pub const FRAME_ARC: f64 = 0.0;

pub const HATCH_ANGLE: f64 = 45.0;
pub const HATCH_SEP_PT: f64 = 4.0;
pub const HATCH_WIDTH_PT: f64 = 0.8;

pub const GRADIENT_BEGIN: (f64, f64, f64) = (0.0, 0.1, 0.95);
pub const GRADIENT_END: (f64, f64, f64) = (0.0, 1.0, 0.7);
pub const GRADIENT_ANGLE: f64 = 0.0;
pub const GRADIENT_MIDPOINT: f64 = 0.9;

pub const ARROW_SIZE_PT: f64 = 1.5;
pub const ARROW_SIZE_NUM: f64 = 2.0;
pub const ARROW_LENGTH: f64 = 1.4;
pub const ARROW_INSET: f64 = 0.4;
pub const TBAR_SIZE_PT: f64 = 2.0;
pub const TBAR_SIZE_NUM: f64 = 5.0;
pub const BRACKET_LENGTH: f64 = 0.15;
pub const RBRACKET_LENGTH: f64 = 0.15;
pub const ARROW_DOT_SIZE_PT: f64 = 2.0;
pub const ARROW_DOT_SIZE_NUM: f64 = 2.0;

/// `dotsize` is `DOT_SIZE_PT + DOT_SIZE_NUM * linewidth`
pub const DOT_SIZE_PT: f64 = 2.0;
pub const DOT_SIZE_NUM: f64 = 2.0;
pub const DOT_SCALE: f64 = 1.0;
pub const DOT_ANGLE: f64 = 0.0;

pub const GRID_WIDTH_PT: f64 = 0.8;
pub const GRID_LABELS_PT: f64 = 10.0;
pub const GRID_DOTS: u32 = 0;
pub const SUBGRID_DIV: u32 = 5;
pub const SUBGRID_WIDTH_PT: f64 = 0.4;
pub const SUBGRID_DOTS: u32 = 0;

pub const TICK_SIZE_PT: f64 = 3.0;
pub const AXES_INCREMENT: f64 = 1.0;

pub const PLOT_POINTS: u32 = 50;

/// Corners used by `\psgrid` without coordinates outside any pspicture
pub const PICTURE_BOUNDS: ((f64, f64), (f64, f64)) = ((0.0, 0.0), (10.0, 10.0));
