//! Collapse trivial groups out of the imported tree

use crate::model::{Group, ShapeVariant};

/// Flatten one shape bottom-up: empty groups vanish, single-child groups unwrap
pub fn flatten_shape(shape: ShapeVariant) -> Option<ShapeVariant> {
    let ShapeVariant::Group(group) = shape else {
        return Some(shape);
    };
    let mut shapes: Vec<ShapeVariant> = group.shapes.into_iter().filter_map(flatten_shape).collect();
    match shapes.len() {
        0 => None,
        1 => shapes.pop(),
        _ => Some(ShapeVariant::Group(Group { shapes })),
    }
}

/// Flatten a whole result list. A result that reduces to one group is
/// replaced by that group's children.
pub fn flatten(shapes: Vec<ShapeVariant>) -> Vec<ShapeVariant> {
    let mut flat: Vec<ShapeVariant> = shapes.into_iter().filter_map(flatten_shape).collect();
    if let [ShapeVariant::Group(_)] = flat.as_slice()
        && let Some(ShapeVariant::Group(group)) = flat.pop()
    {
        return group.shapes;
    }
    flat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Circle, Rectangle};

    fn group(shapes: Vec<ShapeVariant>) -> ShapeVariant {
        ShapeVariant::Group(Group { shapes })
    }

    fn circle() -> ShapeVariant {
        Circle::default().into()
    }

    #[test]
    fn empty_and_singleton_groups_collapse() {
        let tree = vec![group(vec![
            group(vec![]),
            group(vec![group(vec![circle()])]),
            Rectangle::default().into(),
        ])];
        let flat = flatten(tree);
        let kinds: Vec<_> = flat.iter().map(|s| s.kind()).collect();
        assert_eq!(kinds, ["Circle", "Rectangle"]);
    }

    #[test]
    fn nested_groups_with_several_children_survive() {
        let tree = vec![
            group(vec![circle(), circle()]),
            circle(),
        ];
        let flat = flatten(tree.clone());
        assert_eq!(flat, tree);
    }

    #[test]
    fn flattening_is_idempotent() {
        let tree = vec![group(vec![
            group(vec![circle(), group(vec![circle()])]),
            group(vec![]),
            circle(),
        ])];
        let once = flatten(tree);
        let twice = flatten(once.clone());
        assert_eq!(once, twice);
    }
}
