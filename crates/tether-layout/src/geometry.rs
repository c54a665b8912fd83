//! Geometry primitives for constraint-based layout.
//!
//! All values are logical points in `f64`, matching the solver's precision.
//!
//! # Core Types
//!
//! - [`Edge`] - One side of a rectangular view
//! - [`EdgeSet`] - Flag set of edges (defaults to all four)
//! - [`Insets`] - Per-edge offsets (top, left, bottom, right)
//! - [`Axis`] - Horizontal or vertical
//! - [`Size`] - Width and height
//! - [`Frame`] - Origin and size in the parent's coordinate space
//!
//! # Example
//!
//! ```
//! use tether_layout::geometry::*;
//!
//! let edges = EdgeSet::TOP | EdgeSet::LEFT;
//! assert!(edges.contains(Edge::Top.into()));
//! assert_eq!(edges.edges().count(), 2);
//!
//! let insets = Insets::uniform(8.0);
//! assert_eq!(insets.bottom, 8.0);
//! ```

use bitflags::bitflags;
use core::fmt;
use embedded_graphics::prelude::Point;
use embedded_graphics::primitives::Rectangle;

use crate::constraint::{Attribute, Relation};

/// One of the four sides of a rectangular view.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Edge {
    /// Top side.
    Top,
    /// Left side.
    Left,
    /// Bottom side.
    Bottom,
    /// Right side.
    Right,
}

impl Edge {
    /// All edges in derivation order.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Left, Edge::Bottom, Edge::Right];

    /// The layout attribute this edge maps to.
    pub const fn attribute(self) -> Attribute {
        match self {
            Edge::Top => Attribute::Top,
            Edge::Left => Attribute::Left,
            Edge::Bottom => Attribute::Bottom,
            Edge::Right => Attribute::Right,
        }
    }

    /// The constraint constant for this edge under `insets`.
    ///
    /// Top and left insets are added; bottom and right insets are negated so
    /// that a positive inset always moves the edge inward.
    ///
    /// ```
    /// use tether_layout::geometry::{Edge, Insets};
    ///
    /// let insets = Insets::new(12.0, 13.0, 20.0, 45.0);
    /// assert_eq!(Edge::Top.offset(insets), 12.0);
    /// assert_eq!(Edge::Left.offset(insets), 13.0);
    /// assert_eq!(Edge::Bottom.offset(insets), -20.0);
    /// assert_eq!(Edge::Right.offset(insets), -45.0);
    /// ```
    pub fn offset(self, insets: Insets) -> f64 {
        match self {
            Edge::Top => insets.top,
            Edge::Left => insets.left,
            Edge::Bottom => -insets.bottom,
            Edge::Right => -insets.right,
        }
    }

    /// The inequality that keeps this edge inside its counterpart.
    ///
    /// `child >= parent` for top and left, `child <= parent` for bottom and right.
    pub const fn inward_relation(self) -> Relation {
        match self {
            Edge::Top | Edge::Left => Relation::GreaterThanOrEqual,
            Edge::Bottom | Edge::Right => Relation::LessThanOrEqual,
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Edge::Top => "top",
            Edge::Left => "left",
            Edge::Bottom => "bottom",
            Edge::Right => "right",
        })
    }
}

bitflags! {
    /// A set of [`Edge`]s.
    ///
    /// The default is [`EdgeSet::ALL`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
    #[cfg_attr(feature = "serde", serde(transparent))]
    pub struct EdgeSet: u8 {
        /// Top edge.
        const TOP = 1 << 0;
        /// Left edge.
        const LEFT = 1 << 1;
        /// Bottom edge.
        const BOTTOM = 1 << 2;
        /// Right edge.
        const RIGHT = 1 << 3;
        /// All four edges.
        const ALL = Self::TOP.bits() | Self::LEFT.bits() | Self::BOTTOM.bits() | Self::RIGHT.bits();
    }
}

impl EdgeSet {
    /// Iterate over the contained edges in derivation order (top, left, bottom, right).
    pub fn edges(self) -> impl Iterator<Item = Edge> {
        Edge::ALL
            .into_iter()
            .filter(move |edge| self.contains(EdgeSet::from(*edge)))
    }
}

impl Default for EdgeSet {
    fn default() -> Self {
        Self::ALL
    }
}

impl From<Edge> for EdgeSet {
    fn from(edge: Edge) -> Self {
        match edge {
            Edge::Top => EdgeSet::TOP,
            Edge::Left => EdgeSet::LEFT,
            Edge::Bottom => EdgeSet::BOTTOM,
            Edge::Right => EdgeSet::RIGHT,
        }
    }
}

impl FromIterator<Edge> for EdgeSet {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        iter.into_iter()
            .fold(EdgeSet::empty(), |set, edge| set | EdgeSet::from(edge))
    }
}

/// Per-edge insets.
///
/// Unlike CSS box edges the field order is top, left, bottom, right.
/// Negative values are accepted and move the edge outward.
///
/// # Examples
///
/// ```
/// use tether_layout::geometry::Insets;
///
/// let uniform = Insets::uniform(10.0);
/// assert_eq!(uniform.left, 10.0);
///
/// let custom = Insets::new(12.0, 13.0, 20.0, 45.0);
/// assert_eq!(custom.horizontal(), 58.0);
/// assert_eq!(custom.vertical(), 32.0);
///
/// assert_eq!(Insets::default(), Insets::ZERO);
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Insets {
    /// Top inset.
    pub top: f64,

    /// Left inset.
    pub left: f64,

    /// Bottom inset.
    pub bottom: f64,

    /// Right inset.
    pub right: f64,
}

impl Insets {
    /// No inset on any edge.
    pub const ZERO: Insets = Insets::uniform(0.0);

    /// Creates insets with individual values for each edge.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Creates insets with every edge set to `value`.
    pub const fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    /// Creates insets with separate horizontal and vertical values.
    pub const fn horizontal_vertical(horizontal: f64, vertical: f64) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Total horizontal inset (left + right).
    pub fn horizontal(self) -> f64 {
        self.left + self.right
    }

    /// Total vertical inset (top + bottom).
    pub fn vertical(self) -> f64 {
        self.top + self.bottom
    }
}

/// Layout axis.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Axis {
    /// X axis.
    Horizontal,
    /// Y axis.
    Vertical,
}

impl Axis {
    /// Both axes, horizontal first.
    pub const BOTH: [Axis; 2] = [Axis::Horizontal, Axis::Vertical];

    /// The center attribute along this axis.
    pub const fn center_attribute(self) -> Attribute {
        match self {
            Axis::Horizontal => Attribute::CenterX,
            Axis::Vertical => Attribute::CenterY,
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::Horizontal => "horizontal",
            Axis::Vertical => "vertical",
        })
    }
}

/// Width and height in points.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Size {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Size {
    /// Zero-sized.
    pub const ZERO: Size = Size::new(0.0, 0.0);

    /// Creates a size.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Creates a square size.
    pub const fn square(side: f64) -> Self {
        Self::new(side, side)
    }
}

/// A view rectangle: origin in the parent's coordinate space plus size.
///
/// ```
/// use tether_layout::geometry::Frame;
///
/// let frame = Frame::new(13.0, 12.0, 142.0, 168.0);
/// assert_eq!(frame.max_x(), 155.0);
/// assert_eq!(frame.max_y(), 180.0);
/// assert_eq!(frame.bounds(), Frame::new(0.0, 0.0, 142.0, 168.0));
/// ```
#[derive(Debug, Copy, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Frame {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Frame {
    /// The zero rectangle.
    pub const ZERO: Frame = Frame::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a frame.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a frame at the origin with the given size.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Frame size.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge.
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    /// Horizontal center.
    pub fn mid_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Vertical center.
    pub fn mid_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Same size, origin at zero.
    pub const fn bounds(&self) -> Frame {
        Frame::new(0.0, 0.0, self.width, self.height)
    }

    /// Translate the frame by an offset.
    pub fn offset_by(&self, dx: f64, dy: f64) -> Frame {
        Frame::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Returns `true` if every component is within `tolerance` of `other`.
    pub fn approx_eq(&self, other: &Frame, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }

    /// Round to a pixel rectangle for drawing with `embedded-graphics`.
    ///
    /// Negative sizes clamp to zero.
    ///
    /// ```
    /// use tether_layout::geometry::Frame;
    /// use embedded_graphics::prelude::{Point, Size};
    ///
    /// let rect = Frame::new(12.6, 3.2, 49.5, 10.0).to_rectangle();
    /// assert_eq!(rect.top_left, Point::new(13, 3));
    /// assert_eq!(rect.size, Size::new(50, 10));
    /// ```
    // Frames are display coordinates; values far outside i32/u32 range are not meaningful.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.x.round() as i32, self.y.round() as i32),
            embedded_graphics::prelude::Size::new(
                self.width.round().max(0.0) as u32,
                self.height.round().max(0.0) as u32,
            ),
        )
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}; {} x {})",
            self.x, self.y, self.width, self.height
        )
    }
}
