//! Constraint descriptors and their derivation.
//!
//! A [`LayoutConstraint`] is a linear relation between two view attributes:
//!
//! ```text
//! first.attribute  <relation>  second.attribute * multiplier + constant
//! ```
//!
//! When `second` is `None` the right-hand side is just the constant.
//!
//! # Derivation
//!
//! The functions in this module are pure: they map an edge set, insets, an
//! axis or a size to a bounded list of descriptors. Nothing here touches a
//! [`ViewTree`](crate::tree::ViewTree); installing the descriptors is the job
//! of the [`anchor`](crate::anchor) operations.
//!
//! ```
//! use tether_layout::constraint::{pin_constraints, Attribute, Relation};
//! use tether_layout::geometry::{EdgeSet, Insets};
//! use tether_layout::tree::ViewTree;
//! use tether_layout::geometry::Frame;
//!
//! let mut tree = ViewTree::new();
//! let parent = tree.add_root(Frame::new(0.0, 0.0, 200.0, 200.0));
//! let child = tree.add_view();
//!
//! let derived = pin_constraints(
//!     child,
//!     parent,
//!     EdgeSet::TOP | EdgeSet::RIGHT,
//!     Insets::new(12.0, 13.0, 20.0, 45.0),
//! );
//!
//! assert_eq!(derived.len(), 2);
//! assert_eq!(derived[0].first.attribute, Attribute::Top);
//! assert_eq!(derived[0].constant, 12.0);
//! assert_eq!(derived[1].first.attribute, Attribute::Right);
//! assert_eq!(derived[1].constant, -45.0);
//! assert!(derived.iter().all(|c| c.relation == Relation::Equal));
//! ```

use core::fmt;
use heapless::Vec;

use crate::geometry::{Axis, Edge, EdgeSet, Insets, Size};
use crate::tree::ViewId;

/// Maximum number of descriptors a single derivation produces (one per edge).
pub const MAX_DERIVED: usize = 4;

/// Bounded list of derived descriptors.
pub type ConstraintList = Vec<LayoutConstraint, MAX_DERIVED>;

/// A geometric attribute of a view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Attribute {
    /// Top edge.
    Top,
    /// Left edge.
    Left,
    /// Bottom edge.
    Bottom,
    /// Right edge.
    Right,
    /// Horizontal center.
    CenterX,
    /// Vertical center.
    CenterY,
    /// Width.
    Width,
    /// Height.
    Height,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Top => "top",
            Attribute::Left => "left",
            Attribute::Bottom => "bottom",
            Attribute::Right => "right",
            Attribute::CenterX => "centerX",
            Attribute::CenterY => "centerY",
            Attribute::Width => "width",
            Attribute::Height => "height",
        })
    }
}

/// How the two sides of a constraint relate.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Relation {
    /// `first == second`
    #[default]
    Equal,
    /// `first >= second`
    GreaterThanOrEqual,
    /// `first <= second`
    LessThanOrEqual,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Relation::Equal => "==",
            Relation::GreaterThanOrEqual => ">=",
            Relation::LessThanOrEqual => "<=",
        })
    }
}

/// A view attribute: one side of a constraint.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Anchor {
    /// The view the attribute belongs to.
    pub view: ViewId,
    /// The attribute.
    pub attribute: Attribute,
}

impl Anchor {
    /// Creates an anchor.
    pub const fn new(view: ViewId, attribute: Attribute) -> Self {
        Self { view, attribute }
    }
}

impl fmt::Display for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.view, self.attribute)
    }
}

/// A linear layout relation between view attributes.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutConstraint {
    /// Left-hand side.
    pub first: Anchor,
    /// Relation between the sides.
    pub relation: Relation,
    /// Right-hand attribute; `None` for a constant-only right-hand side.
    pub second: Option<Anchor>,
    /// Factor applied to `second`.
    pub multiplier: f64,
    /// Offset added to the right-hand side.
    pub constant: f64,
}

impl LayoutConstraint {
    /// Creates a constraint from all of its parts.
    pub const fn new(
        first: Anchor,
        relation: Relation,
        second: Option<Anchor>,
        multiplier: f64,
        constant: f64,
    ) -> Self {
        Self {
            first,
            relation,
            second,
            multiplier,
            constant,
        }
    }

    /// Relates `attribute` of `child` to the same attribute of `parent`.
    pub const fn relating(
        child: ViewId,
        attribute: Attribute,
        relation: Relation,
        parent: ViewId,
        constant: f64,
    ) -> Self {
        Self::new(
            Anchor::new(child, attribute),
            relation,
            Some(Anchor::new(parent, attribute)),
            1.0,
            constant,
        )
    }

    /// Relates `attribute` of `view` to a constant.
    pub const fn fixed(
        view: ViewId,
        attribute: Attribute,
        relation: Relation,
        constant: f64,
    ) -> Self {
        Self::new(Anchor::new(view, attribute), relation, None, 1.0, constant)
    }

    /// Returns `true` if either side refers to `view`.
    pub fn references(&self, view: ViewId) -> bool {
        self.first.view == view || self.second.is_some_and(|anchor| anchor.view == view)
    }
}

impl fmt::Display for LayoutConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", self.first, self.relation)?;
        match self.second {
            Some(second) => {
                if (self.multiplier - 1.0).abs() > f64::EPSILON {
                    write!(f, "{} * {}", second, self.multiplier)?;
                } else {
                    write!(f, "{second}")?;
                }
                if self.constant < 0.0 {
                    write!(f, " - {}", -self.constant)
                } else if self.constant > 0.0 {
                    write!(f, " + {}", self.constant)
                } else {
                    Ok(())
                }
            }
            None => write!(f, "{}", self.constant),
        }
    }
}

/// Equality constraints pinning each edge in `edges` of `child` to `parent`.
///
/// Constants follow [`Edge::offset`]: top and left insets are added, bottom and
/// right insets are subtracted.
pub fn pin_constraints(
    child: ViewId,
    parent: ViewId,
    edges: EdgeSet,
    insets: Insets,
) -> ConstraintList {
    edge_constraints(child, parent, edges, insets, |_| Relation::Equal)
}

/// Inequality constraints keeping each edge in `edges` of `child` inside `parent`.
///
/// Top and left use `>=`, bottom and right use `<=`; the child may be smaller
/// than the inset region but never extends past it.
pub fn within_constraints(
    child: ViewId,
    parent: ViewId,
    edges: EdgeSet,
    insets: Insets,
) -> ConstraintList {
    edge_constraints(child, parent, edges, insets, Edge::inward_relation)
}

fn edge_constraints(
    child: ViewId,
    parent: ViewId,
    edges: EdgeSet,
    insets: Insets,
    relation: impl Fn(Edge) -> Relation,
) -> ConstraintList {
    let mut list = ConstraintList::new();
    for edge in edges.edges() {
        // At most four edges; the push cannot exceed MAX_DERIVED.
        list.push(LayoutConstraint::relating(
            child,
            edge.attribute(),
            relation(edge),
            parent,
            edge.offset(insets),
        ))
        .ok();
    }
    list
}

/// Aligns the center of `child` with the center of `parent` along `axis`.
pub fn center_constraint(child: ViewId, parent: ViewId, axis: Axis) -> LayoutConstraint {
    LayoutConstraint::relating(child, axis.center_attribute(), Relation::Equal, parent, 0.0)
}

/// Fixes the width and height of `view`. No parent is involved.
pub fn size_constraints(view: ViewId, size: Size) -> ConstraintList {
    let mut list = ConstraintList::new();
    list.push(LayoutConstraint::fixed(view, Attribute::Width, Relation::Equal, size.width))
        .ok();
    list.push(LayoutConstraint::fixed(view, Attribute::Height, Relation::Equal, size.height))
        .ok();
    list
}
