//! Anchor operations: pin, center, size and contain a view within its parent.
//!
//! Each operation derives descriptors with the pure functions in
//! [`constraint`](crate::constraint) and installs them into the tree:
//!
//! 1. Look up the parent. Without one the call does nothing at all.
//! 2. Turn off frame translation on the child, so the resolver does not add a
//!    conflicting frame-derived constraint.
//! 3. Hand the descriptors to the owner: the parent for edge and center
//!    constraints, the child itself for size constraints.
//!
//! Operations never fail and never deduplicate; calling one twice installs
//! the same constraints twice.
//!
//! # Example
//!
//! ```
//! use tether_layout::prelude::*;
//!
//! let mut tree = ViewTree::new();
//! let root = tree.add_root(Frame::new(0.0, 0.0, 200.0, 200.0));
//! let child = tree.add_view_with_intrinsic_size(Size::square(50.0));
//! tree.add_subview(root, child)?;
//!
//! tree.pin_to_parent_with_insets(child, Insets::new(12.0, 13.0, 20.0, 45.0));
//! resolve(&mut tree, &LayoutConfig::default())?;
//!
//! let frame = tree.frame(child).unwrap_or_default();
//! assert!(frame.approx_eq(&Frame::new(13.0, 12.0, 142.0, 168.0), 1e-6));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::constraint::{
    center_constraint, pin_constraints, size_constraints, within_constraints,
};
use crate::geometry::{Axis, EdgeSet, Insets, Size};
use crate::tree::{ViewId, ViewTree};

impl ViewTree {
    /// Parent of `child`, or `None` after logging the no-op.
    fn anchoring_parent(&self, child: ViewId, operation: &'static str) -> Option<ViewId> {
        let parent = self.parent(child);
        if parent.is_none() {
            tracing::debug!(child = %child, operation, "no parent, nothing attached");
        }
        parent
    }

    /// Pin all four edges of `child` to its parent.
    pub fn pin_to_parent(&mut self, child: ViewId) {
        self.pin_to_parent_with(child, EdgeSet::ALL, Insets::ZERO);
    }

    /// Pin the given edges of `child` to its parent without insets.
    pub fn pin_edges_to_parent(&mut self, child: ViewId, edges: EdgeSet) {
        self.pin_to_parent_with(child, edges, Insets::ZERO);
    }

    /// Pin all four edges of `child` to its parent, inset by `insets`.
    pub fn pin_to_parent_with_insets(&mut self, child: ViewId, insets: Insets) {
        self.pin_to_parent_with(child, EdgeSet::ALL, insets);
    }

    /// Pin each edge in `edges` of `child` to the same edge of its parent.
    ///
    /// Installs one equality per edge: `child.top == parent.top + insets.top`,
    /// `child.left == parent.left + insets.left`,
    /// `child.bottom == parent.bottom - insets.bottom` and
    /// `child.right == parent.right - insets.right`.
    pub fn pin_to_parent_with(&mut self, child: ViewId, edges: EdgeSet, insets: Insets) {
        let Some(parent) = self.anchoring_parent(child, "pin") else {
            return;
        };
        self.set_translates_frame_into_constraints(child, false);
        let derived = pin_constraints(child, parent, edges, insets);
        tracing::trace!(child = %child, parent = %parent, count = derived.len(), "pinned");
        self.add_constraints(parent, derived);
    }

    /// Center `child` in its parent along both axes.
    ///
    /// Same as centering horizontally, then vertically.
    pub fn center_in_parent(&mut self, child: ViewId) {
        for axis in Axis::BOTH {
            self.center_in_parent_along(child, axis);
        }
    }

    /// Center `child` in its parent along `axis`.
    pub fn center_in_parent_along(&mut self, child: ViewId, axis: Axis) {
        let Some(parent) = self.anchoring_parent(child, "center") else {
            return;
        };
        self.set_translates_frame_into_constraints(child, false);
        tracing::trace!(child = %child, parent = %parent, axis = %axis, "centered");
        self.add_constraint(parent, center_constraint(child, parent, axis));
    }

    /// Fix the width and height of `view`.
    ///
    /// Unlike the other operations this does not need a parent; the
    /// constraints are owned by `view` itself.
    pub fn constrain_to_size(&mut self, view: ViewId, size: Size) {
        if !self.contains(view) {
            tracing::debug!(view = %view, "unknown view, nothing attached");
            return;
        }
        self.set_translates_frame_into_constraints(view, false);
        self.add_constraints(view, size_constraints(view, size));
    }

    /// Keep every edge of `child` inside its parent.
    pub fn constrain_within_parent(&mut self, child: ViewId) {
        self.constrain_within_parent_with(child, EdgeSet::ALL, Insets::ZERO);
    }

    /// Keep each edge in `edges` of `child` inside its parent, inset by `insets`.
    ///
    /// Top and left are bounded from below (`child.top >= parent.top + insets.top`),
    /// bottom and right from above (`child.bottom <= parent.bottom - insets.bottom`).
    /// The child may be smaller than the bounded region.
    pub fn constrain_within_parent_with(&mut self, child: ViewId, edges: EdgeSet, insets: Insets) {
        let Some(parent) = self.anchoring_parent(child, "constrain within") else {
            return;
        };
        self.set_translates_frame_into_constraints(child, false);
        let derived = within_constraints(child, parent, edges, insets);
        tracing::trace!(child = %child, parent = %parent, count = derived.len(), "bounded");
        self.add_constraints(parent, derived);
    }
}

#[cfg(test)]
mod tests {
    use crate::constraint::{Anchor, Attribute, LayoutConstraint, Relation};
    use crate::geometry::{Axis, Edge, EdgeSet, Frame, Insets, Size};
    use crate::tree::{ViewId, ViewTree};

    fn setup() -> (ViewTree, ViewId, ViewId) {
        let mut tree = ViewTree::new();
        let root = tree.add_root(Frame::new(0.0, 0.0, 200.0, 200.0));
        let child = tree.add_view_with_intrinsic_size(Size::square(50.0));
        tree.add_subview(root, child).unwrap();
        (tree, root, child)
    }

    #[test]
    fn test_pin_attaches_one_constraint_per_edge_to_parent() {
        let (mut tree, root, child) = setup();
        let insets = Insets::new(12.0, 13.0, 20.0, 45.0);
        tree.pin_to_parent_with(child, EdgeSet::TOP | EdgeSet::RIGHT, insets);

        let installed = tree.constraints(root);
        assert_eq!(installed.len(), 2);
        assert_eq!(
            installed[0],
            LayoutConstraint::relating(child, Attribute::Top, Relation::Equal, root, 12.0)
        );
        assert_eq!(
            installed[1],
            LayoutConstraint::relating(child, Attribute::Right, Relation::Equal, root, -45.0)
        );
        assert!(tree.constraints(child).is_empty());
    }

    #[test]
    fn test_operations_disable_frame_translation() {
        let (mut tree, _, child) = setup();
        assert!(tree.translates_frame_into_constraints(child));
        tree.pin_edges_to_parent(child, EdgeSet::empty());
        assert!(!tree.translates_frame_into_constraints(child));
        assert_eq!(tree.constraint_count(), 0);

        // Idempotent when already off.
        tree.center_in_parent(child);
        assert!(!tree.translates_frame_into_constraints(child));
    }

    #[test]
    fn test_center_defaults_to_both_axes() {
        let (mut tree, root, child) = setup();
        tree.center_in_parent(child);

        let mut expected = ViewTree::new();
        let e_root = expected.add_root(Frame::new(0.0, 0.0, 200.0, 200.0));
        let e_child = expected.add_view_with_intrinsic_size(Size::square(50.0));
        expected.add_subview(e_root, e_child).unwrap();
        expected.center_in_parent_along(e_child, Axis::Horizontal);
        expected.center_in_parent_along(e_child, Axis::Vertical);

        assert_eq!(tree.constraints(root), expected.constraints(e_root));
        assert_eq!(tree.constraints(root).len(), 2);
    }

    #[test]
    fn test_center_single_axis() {
        let (mut tree, root, child) = setup();
        tree.center_in_parent_along(child, Axis::Horizontal);
        let installed = tree.constraints(root);
        assert_eq!(installed.len(), 1);
        assert_eq!(installed[0].first, Anchor::new(child, Attribute::CenterX));
        assert_eq!(installed[0].second, Some(Anchor::new(root, Attribute::CenterX)));
    }

    #[test]
    fn test_size_is_owned_by_the_view_and_needs_no_parent() {
        let mut tree = ViewTree::new();
        let lone = tree.add_view();
        tree.constrain_to_size(lone, Size::new(50.0, 40.0));

        let installed = tree.constraints(lone);
        assert_eq!(installed.len(), 2);
        assert!(installed.iter().all(|c| c.second.is_none()));
        assert_eq!(installed[0].constant, 50.0);
        assert_eq!(installed[1].constant, 40.0);
        assert!(!tree.translates_frame_into_constraints(lone));
    }

    #[test]
    fn test_within_relations() {
        let (mut tree, root, child) = setup();
        tree.constrain_within_parent(child);
        for c in tree.constraints(root) {
            let edge = match c.first.attribute {
                Attribute::Top => Edge::Top,
                Attribute::Left => Edge::Left,
                Attribute::Bottom => Edge::Bottom,
                Attribute::Right => Edge::Right,
                other => unreachable!("unexpected attribute {other}"),
            };
            assert_eq!(c.relation, edge.inward_relation());
            assert_eq!(c.constant, 0.0);
        }
        assert_eq!(tree.constraints(root).len(), 4);
    }

    #[test]
    fn test_no_parent_is_a_silent_noop() {
        let mut tree = ViewTree::new();
        let orphan = tree.add_view();

        tree.pin_to_parent(orphan);
        tree.pin_to_parent_with_insets(orphan, Insets::uniform(4.0));
        tree.center_in_parent(orphan);
        tree.constrain_within_parent(orphan);

        assert_eq!(tree.constraint_count(), 0);
        assert!(tree.translates_frame_into_constraints(orphan));
    }

    #[test]
    fn test_repeated_pin_duplicates() {
        let (mut tree, root, child) = setup();
        tree.pin_to_parent(child);
        tree.pin_to_parent(child);
        let installed = tree.constraints(root);
        assert_eq!(installed.len(), 8);
        assert_eq!(installed[..4], installed[4..]);
    }
}
