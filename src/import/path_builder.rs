//! Path merging for `\pscustom`.
//!
//! The notation spells a path as many small move/line/curve commands. The
//! merger records each as a fragment from the current cursor, then folds
//! runs of same-kind fragments into one point list per freehand shape.
//!
//! # Runs
//!
//! A run ends at a `\moveto`, at a `\closepath` (which also closes it) or
//! when the segment kind switches between lines and curves. The next
//! segment then starts a new run from its own start point, so mixing kinds
//! never loses points.

use crate::model::FreehandKind;
use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Fragment {
    Move,
    Segment {
        kind: FreehandKind,
        from: Point,
        to: Point,
    },
    Close,
}

/// One merged run, ready to become a freehand shape
#[derive(Debug, Clone, PartialEq)]
pub struct MergedPath {
    pub kind: FreehandKind,
    pub points: Vec<Point>,
    pub opened: bool,
}

/// Collects path fragments for one custom-path scope
#[derive(Debug, Clone, Default)]
pub struct PathMerger {
    cursor: Point,
    fragments: Vec<Fragment>,
}

impl PathMerger {
    /// A merger with the cursor at the origin
    pub fn new() -> Self {
        Self::default()
    }

    /// The latest point, which relative commands start from
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn move_to(&mut self, point: Point) {
        self.cursor = point;
        self.fragments.push(Fragment::Move);
    }

    pub fn line_to(&mut self, point: Point) {
        self.segment(FreehandKind::Lines, point);
    }

    /// Curve segments keep their end point only; the freehand shape smooths through it
    pub fn curve_to(&mut self, point: Point) {
        self.segment(FreehandKind::Curves, point);
    }

    pub fn close_path(&mut self) {
        self.fragments.push(Fragment::Close);
    }

    fn segment(&mut self, kind: FreehandKind, to: Point) {
        self.fragments.push(Fragment::Segment {
            kind,
            from: self.cursor,
            to,
        });
        self.cursor = to;
    }

    /// Fold the fragments into runs, in order
    pub fn finish(self) -> Vec<MergedPath> {
        let mut merged = Vec::new();
        let mut current: Option<MergedPath> = None;

        for fragment in self.fragments {
            match fragment {
                Fragment::Move => merged.extend(current.take()),
                Fragment::Close => {
                    if let Some(mut path) = current.take() {
                        path.opened = false;
                        merged.push(path);
                    }
                }
                Fragment::Segment { kind, from, to } => match current.as_mut() {
                    Some(path) if path.kind == kind => path.points.push(to),
                    _ => {
                        merged.extend(current.take());
                        current = Some(MergedPath {
                            kind,
                            points: vec![from, to],
                            opened: true,
                        });
                    }
                },
            }
        }
        merged.extend(current);
        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_line_run() {
        let mut merger = PathMerger::new();
        merger.move_to(Point::new(0.0, 0.0));
        merger.line_to(Point::new(1.0, 0.0));
        merger.line_to(Point::new(1.0, 1.0));
        merger.close_path();
        let paths = merger.finish();
        assert_eq!(
            paths,
            vec![MergedPath {
                kind: FreehandKind::Lines,
                points: vec![Point::new(0.0, 0.0), Point::new(1.0, 0.0), Point::new(1.0, 1.0)],
                opened: false,
            }]
        );
    }

    #[test]
    fn kind_change_starts_a_new_run() {
        let mut merger = PathMerger::new();
        merger.line_to(Point::new(1.0, 0.0));
        merger.curve_to(Point::new(2.0, 1.0));
        merger.curve_to(Point::new(3.0, 0.0));
        let paths = merger.finish();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[0].points, vec![Point::ORIGIN, Point::new(1.0, 0.0)]);
        assert_eq!(paths[1].kind, FreehandKind::Curves);
        assert_eq!(paths[1].points.len(), 3);
        assert!(paths.iter().all(|p| p.opened));
    }

    #[test]
    fn moveto_splits_runs() {
        let mut merger = PathMerger::new();
        merger.line_to(Point::new(1.0, 0.0));
        merger.move_to(Point::new(5.0, 5.0));
        merger.line_to(Point::new(6.0, 5.0));
        assert_eq!(merger.cursor(), Point::new(6.0, 5.0));
        let paths = merger.finish();
        assert_eq!(paths.len(), 2);
        assert_eq!(paths[1].points[0], Point::new(5.0, 5.0));
    }

    #[test]
    fn nothing_to_merge() {
        let mut merger = PathMerger::new();
        merger.move_to(Point::new(1.0, 1.0));
        merger.close_path();
        assert!(merger.finish().is_empty());
    }
}
