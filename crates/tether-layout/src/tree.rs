//! Arena-backed view tree.
//!
//! The tree stores parent/child links, frames, intrinsic content sizes, the
//! frame-translation flag and the constraints each view owns. It is the
//! collaborator the [`anchor`](crate::anchor) operations install into and the
//! input of [`resolve`](crate::solver::resolve).
//!
//! Views are never freed; a [`ViewId`] stays valid for the lifetime of the tree
//! that issued it.
//!
//! # Example
//!
//! ```
//! use tether_layout::geometry::{Frame, Size};
//! use tether_layout::tree::ViewTree;
//!
//! let mut tree = ViewTree::new();
//! let root = tree.add_root(Frame::new(0.0, 0.0, 200.0, 200.0));
//! let child = tree.add_view_with_intrinsic_size(Size::square(50.0));
//!
//! tree.add_subview(root, child)?;
//! assert_eq!(tree.parent(child), Some(root));
//! assert_eq!(tree.children(root), &[child]);
//! assert!(tree.translates_frame_into_constraints(child));
//! # Ok::<(), tether_layout::error::TreeError>(())
//! ```

use core::fmt;

use crate::constraint::LayoutConstraint;
use crate::error::TreeError;
use crate::geometry::{Frame, Size};

/// Handle to a view in a [`ViewTree`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ViewId(usize);

impl ViewId {
    /// Position of the view in its tree's arena.
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "view#{}", self.0)
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<ViewId>,
    children: Vec<ViewId>,
    frame: Frame,
    intrinsic_size: Option<Size>,
    translates_frame: bool,
    constraints: Vec<LayoutConstraint>,
}

impl Node {
    fn new(frame: Frame, intrinsic_size: Option<Size>) -> Self {
        Self {
            parent: None,
            children: Vec::new(),
            frame,
            intrinsic_size,
            translates_frame: true,
            constraints: Vec::new(),
        }
    }
}

/// A retained tree of views and the constraints attached to them.
#[derive(Debug, Clone, Default)]
pub struct ViewTree {
    nodes: Vec<Node>,
}

impl ViewTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, node: Node) -> ViewId {
        let id = ViewId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn node(&self, id: ViewId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    fn node_mut(&mut self, id: ViewId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Add a detached view with a fixed frame, typically a window or container root.
    pub fn add_root(&mut self, frame: Frame) -> ViewId {
        self.insert(Node::new(frame, None))
    }

    /// Add a detached view with a zero frame and no intrinsic size.
    pub fn add_view(&mut self) -> ViewId {
        self.insert(Node::new(Frame::ZERO, None))
    }

    /// Add a detached view that reports `size` as its intrinsic content size.
    pub fn add_view_with_intrinsic_size(&mut self, size: Size) -> ViewId {
        self.insert(Node::new(Frame::ZERO, Some(size)))
    }

    /// Number of views in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the tree has no views.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns `true` if `id` was issued by this tree.
    pub fn contains(&self, id: ViewId) -> bool {
        id.0 < self.nodes.len()
    }

    /// All view ids in insertion order.
    pub fn views(&self) -> impl Iterator<Item = ViewId> {
        (0..self.nodes.len()).map(ViewId)
    }

    /// Insert `child` as the last subview of `parent`.
    ///
    /// # Errors
    ///
    /// - [`TreeError::UnknownView`] if either id is not in this tree
    /// - [`TreeError::AlreadyAttached`] if `child` already has a parent
    /// - [`TreeError::WouldCreateCycle`] if `child` is `parent` or one of its ancestors
    pub fn add_subview(&mut self, parent: ViewId, child: ViewId) -> Result<(), TreeError> {
        let existing = self.node(child).ok_or(TreeError::UnknownView(child))?.parent;
        if !self.contains(parent) {
            return Err(TreeError::UnknownView(parent));
        }
        if let Some(current) = existing {
            return Err(TreeError::AlreadyAttached {
                view: child,
                parent: current,
            });
        }
        if parent == child || self.ancestors(parent).any(|ancestor| ancestor == child) {
            return Err(TreeError::WouldCreateCycle { parent, child });
        }

        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
        tracing::trace!(parent = %parent, child = %child, "subview added");
        Ok(())
    }

    /// Detach `child` from its parent.
    ///
    /// Every constraint that links the detached subtree to the rest of the tree
    /// is dropped: constraints held by former ancestors that mention the
    /// subtree, and constraints held inside the subtree that mention anything
    /// outside it. Does nothing if `child` has no parent.
    pub fn remove_from_parent(&mut self, child: ViewId) {
        let Some(parent) = self.parent(child) else {
            return;
        };

        let subtree = self.subtree(child);
        let ancestors: Vec<ViewId> = self.ancestors(child).collect();
        let mut dropped = 0usize;

        for ancestor in &ancestors {
            if let Some(node) = self.node_mut(*ancestor) {
                let before = node.constraints.len();
                node.constraints
                    .retain(|c| !subtree.iter().any(|view| c.references(*view)));
                dropped = dropped.saturating_add(before.saturating_sub(node.constraints.len()));
            }
        }
        for view in &subtree {
            if let Some(node) = self.nodes.get_mut(view.0) {
                let before = node.constraints.len();
                node.constraints.retain(|c| {
                    c.second.map_or(true, |anchor| subtree.contains(&anchor.view))
                        && subtree.contains(&c.first.view)
                });
                dropped = dropped.saturating_add(before.saturating_sub(node.constraints.len()));
            }
        }

        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|id| *id != child);
        }
        if let Some(node) = self.node_mut(child) {
            node.parent = None;
        }
        tracing::debug!(parent = %parent, child = %child, dropped, "subview removed");
    }

    /// Parent of `id`, or `None` for a detached or unknown view.
    pub fn parent(&self, id: ViewId) -> Option<ViewId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// Direct subviews of `id` in insertion order.
    pub fn children(&self, id: ViewId) -> &[ViewId] {
        self.node(id).map_or(&[], |node| node.children.as_slice())
    }

    /// Iterate from the parent of `id` up to its root.
    pub fn ancestors(&self, id: ViewId) -> impl Iterator<Item = ViewId> + '_ {
        core::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// `id` followed by all of its descendants, depth first.
    pub fn subtree(&self, id: ViewId) -> Vec<ViewId> {
        let mut out = Vec::new();
        if !self.contains(id) {
            return out;
        }
        let mut stack = vec![id];
        while let Some(view) = stack.pop() {
            out.push(view);
            stack.extend(self.children(view).iter().rev().copied());
        }
        out
    }

    /// Current frame of `id` in its parent's coordinate space.
    pub fn frame(&self, id: ViewId) -> Option<Frame> {
        self.node(id).map(|node| node.frame)
    }

    /// Replace the frame of `id`. Unknown ids are ignored.
    pub fn set_frame(&mut self, id: ViewId, frame: Frame) {
        if let Some(node) = self.node_mut(id) {
            node.frame = frame;
        }
    }

    /// Intrinsic content size of `id`, if it has one.
    pub fn intrinsic_size(&self, id: ViewId) -> Option<Size> {
        self.node(id).and_then(|node| node.intrinsic_size)
    }

    /// Set or clear the intrinsic content size of `id`.
    pub fn set_intrinsic_size(&mut self, id: ViewId, size: Option<Size>) {
        if let Some(node) = self.node_mut(id) {
            node.intrinsic_size = size;
        }
    }

    /// Whether the resolver turns the frame of `id` into required constraints.
    ///
    /// New views start with this flag on. Unknown ids report `false`.
    pub fn translates_frame_into_constraints(&self, id: ViewId) -> bool {
        self.node(id).is_some_and(|node| node.translates_frame)
    }

    /// Turn frame translation for `id` on or off. Unknown ids are ignored.
    pub fn set_translates_frame_into_constraints(&mut self, id: ViewId, translates: bool) {
        if let Some(node) = self.node_mut(id) {
            node.translates_frame = translates;
        }
    }

    /// Constraints owned by `owner`, in insertion order.
    pub fn constraints(&self, owner: ViewId) -> &[LayoutConstraint] {
        self.node(owner).map_or(&[], |node| node.constraints.as_slice())
    }

    /// Every constraint in the tree together with its owner.
    pub fn all_constraints(&self) -> impl Iterator<Item = (ViewId, &LayoutConstraint)> {
        self.nodes.iter().enumerate().flat_map(|(index, node)| {
            node.constraints.iter().map(move |c| (ViewId(index), c))
        })
    }

    /// Total number of constraints held by all views.
    pub fn constraint_count(&self) -> usize {
        self.nodes.iter().map(|node| node.constraints.len()).sum()
    }

    /// Hand `constraint` to `owner`. Unknown owners are ignored.
    pub fn add_constraint(&mut self, owner: ViewId, constraint: LayoutConstraint) {
        match self.node_mut(owner) {
            Some(node) => node.constraints.push(constraint),
            None => tracing::debug!(owner = %owner, "constraint dropped: unknown owner"),
        }
    }

    /// Hand several constraints to `owner`.
    pub fn add_constraints<I>(&mut self, owner: ViewId, constraints: I)
    where
        I: IntoIterator<Item = LayoutConstraint>,
    {
        for constraint in constraints {
            self.add_constraint(owner, constraint);
        }
    }

    /// Remove every constraint owned by `owner`.
    pub fn clear_constraints(&mut self, owner: ViewId) {
        if let Some(node) = self.node_mut(owner) {
            node.constraints.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{Attribute, Relation};

    fn tree_with_child() -> (ViewTree, ViewId, ViewId) {
        let mut tree = ViewTree::new();
        let root = tree.add_root(Frame::new(0.0, 0.0, 200.0, 200.0));
        let child = tree.add_view();
        tree.add_subview(root, child).unwrap();
        (tree, root, child)
    }

    #[test]
    fn test_new_view_translates_frame() {
        let mut tree = ViewTree::new();
        let view = tree.add_view();
        assert!(tree.translates_frame_into_constraints(view));
        assert_eq!(tree.frame(view), Some(Frame::ZERO));
        assert_eq!(tree.parent(view), None);
    }

    #[test]
    fn test_add_subview_links_both_ways() {
        let (tree, root, child) = tree_with_child();
        assert_eq!(tree.parent(child), Some(root));
        assert_eq!(tree.children(root), &[child]);
        assert_eq!(tree.ancestors(child).collect::<Vec<_>>(), vec![root]);
    }

    #[test]
    fn test_add_subview_rejects_second_parent() {
        let (mut tree, root, child) = tree_with_child();
        let other = tree.add_view();
        assert_eq!(
            tree.add_subview(other, child),
            Err(TreeError::AlreadyAttached {
                view: child,
                parent: root
            })
        );
    }

    #[test]
    fn test_add_subview_rejects_cycles() {
        let (mut tree, root, child) = tree_with_child();
        assert_eq!(
            tree.add_subview(child, root),
            Err(TreeError::WouldCreateCycle {
                parent: child,
                child: root
            })
        );

        let lone = tree.add_view();
        assert_eq!(
            tree.add_subview(lone, lone),
            Err(TreeError::WouldCreateCycle {
                parent: lone,
                child: lone
            })
        );
    }

    #[test]
    fn test_add_subview_rejects_unknown_ids() {
        let (mut tree, root, _) = tree_with_child();
        let mut other = ViewTree::new();
        other.add_view();
        other.add_view();
        other.add_view();
        let foreign = other.add_view();
        assert_eq!(tree.add_subview(root, foreign), Err(TreeError::UnknownView(foreign)));
        assert_eq!(tree.add_subview(foreign, root), Err(TreeError::UnknownView(foreign)));
    }

    #[test]
    fn test_subtree_is_depth_first() {
        let mut tree = ViewTree::new();
        let root = tree.add_root(Frame::ZERO);
        let a = tree.add_view();
        let b = tree.add_view();
        let a1 = tree.add_view();
        tree.add_subview(root, a).unwrap();
        tree.add_subview(root, b).unwrap();
        tree.add_subview(a, a1).unwrap();
        assert_eq!(tree.subtree(root), vec![root, a, a1, b]);
    }

    #[test]
    fn test_remove_from_parent_drops_linking_constraints() {
        let (mut tree, root, child) = tree_with_child();
        let sibling = tree.add_view();
        tree.add_subview(root, sibling).unwrap();

        tree.add_constraint(
            root,
            LayoutConstraint::relating(child, Attribute::Top, Relation::Equal, root, 0.0),
        );
        tree.add_constraint(
            root,
            LayoutConstraint::relating(sibling, Attribute::Top, Relation::Equal, root, 0.0),
        );
        tree.add_constraint(
            child,
            LayoutConstraint::fixed(child, Attribute::Width, Relation::Equal, 10.0),
        );

        tree.remove_from_parent(child);

        assert_eq!(tree.parent(child), None);
        assert_eq!(tree.children(root), &[sibling]);
        assert_eq!(tree.constraints(root).len(), 1);
        assert!(tree.constraints(root)[0].references(sibling));
        // Size constraints stay with the view.
        assert_eq!(tree.constraints(child).len(), 1);
    }

    #[test]
    fn test_remove_detached_view_is_noop() {
        let mut tree = ViewTree::new();
        let view = tree.add_view();
        tree.remove_from_parent(view);
        assert_eq!(tree.parent(view), None);
    }

    #[test]
    fn test_unknown_owner_is_ignored() {
        let (mut tree, root, child) = tree_with_child();
        let mut other = ViewTree::new();
        for _ in 0..5 {
            other.add_view();
        }
        let foreign = other.add_view();
        tree.add_constraint(
            foreign,
            LayoutConstraint::relating(child, Attribute::Top, Relation::Equal, root, 0.0),
        );
        assert_eq!(tree.constraint_count(), 0);
        assert!(tree.constraints(foreign).is_empty());
    }

    #[test]
    fn test_all_constraints_reports_owner() {
        let (mut tree, root, child) = tree_with_child();
        tree.add_constraint(
            child,
            LayoutConstraint::fixed(child, Attribute::Height, Relation::Equal, 4.0),
        );
        tree.add_constraint(
            root,
            LayoutConstraint::relating(child, Attribute::Left, Relation::Equal, root, 0.0),
        );
        let owners: Vec<ViewId> = tree.all_constraints().map(|(owner, _)| owner).collect();
        assert_eq!(owners, vec![root, child]);

        tree.clear_constraints(root);
        assert_eq!(tree.constraint_count(), 1);
    }
}
