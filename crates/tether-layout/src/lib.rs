//! Tether Layout
//!
//! Declarative constraint helpers for a retained view tree: pin a view's
//! edges to its parent, center it, give it a fixed size, or keep it inside
//! the parent's bounds.
//!
//! # Architecture
//!
//! - [`geometry`]: Edge, EdgeSet, Insets, Axis, Size, Frame
//! - [`constraint`]: constraint descriptors and their pure derivation
//! - [`tree`]: arena view tree that owns the installed constraints
//! - [`anchor`]: the pin / center / size / contain operations on [`ViewTree`](tree::ViewTree)
//! - [`solver`]: resolves the tree's constraints into frames (Cassowary via `kasuari`)
//! - [`config`]: resolver priorities
//!
//! # Example
//!
//! ```
//! use tether_layout::prelude::*;
//!
//! let mut tree = ViewTree::new();
//! let root = tree.add_root(Frame::new(0.0, 0.0, 200.0, 200.0));
//! let badge = tree.add_view_with_intrinsic_size(Size::square(50.0));
//! tree.add_subview(root, badge)?;
//!
//! tree.center_in_parent(badge);
//! resolve(&mut tree, &LayoutConfig::default())?;
//!
//! let frame = tree.frame(badge).unwrap_or_default();
//! assert!(frame.approx_eq(&Frame::new(75.0, 75.0, 50.0, 50.0), 1e-6));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in library code
#![deny(clippy::expect_used)] // no .expect() in library code
#![deny(clippy::panic)] // no panic!() in library code
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::print_stdout)] // prefer tracing over println! in lib code
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::panic, clippy::indexing_slicing))]

pub mod anchor;
pub mod config;
pub mod constraint;
pub mod error;
pub mod geometry;
pub mod solver;
pub mod tree;

pub mod prelude {
    //! Common imports.

    pub use crate::config::{LayoutConfig, Priority};
    pub use crate::constraint::{Anchor, Attribute, LayoutConstraint, Relation};
    pub use crate::error::{LayoutError, TreeError};
    pub use crate::geometry::{Axis, Edge, EdgeSet, Frame, Insets, Size};
    pub use crate::solver::{resolve, Resolution};
    pub use crate::tree::{ViewId, ViewTree};
}
