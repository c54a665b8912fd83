//! Error types for tree mutation and frame resolution.
//!
//! The anchor operations themselves never fail: a missing parent is a silent
//! no-op. Errors only come from structural tree edits and from the solver.

use thiserror::Error;

use crate::tree::ViewId;

/// Structural errors from [`ViewTree`](crate::tree::ViewTree) edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The id was not issued by this tree.
    #[error("{0} is not part of this view tree")]
    UnknownView(ViewId),

    /// The view already has a parent; detach it first.
    #[error("{view} is already a subview of {parent}")]
    AlreadyAttached {
        /// View being attached.
        view: ViewId,
        /// Its current parent.
        parent: ViewId,
    },

    /// Attaching would make a view its own ancestor.
    #[error("adding {child} under {parent} would create a cycle")]
    WouldCreateCycle {
        /// Requested parent.
        parent: ViewId,
        /// Requested child.
        child: ViewId,
    },
}

/// Errors from [`resolve`](crate::solver::resolve).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The solver reported an internal failure.
    #[error("constraint solver failure: {0}")]
    Solver(String),

    /// A constraint refers to a view that is not in the tree.
    #[error("constraint refers to unknown {0}")]
    UnknownView(ViewId),
}
