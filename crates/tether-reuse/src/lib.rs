//! Tether Reuse
//!
//! Registration and recycling of reusable views (list cells, section headers
//! and footers) keyed by a caller-defined enum.
//!
//! Each key supplies a stable string identifier and is registered with a
//! factory function or a prototype to clone. Dequeuing returns a recycled
//! instance when one is pooled, otherwise a fresh one.

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![warn(missing_docs)]
#![warn(clippy::all)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::indexing_slicing))]

pub mod error;
pub mod registry;

pub use error::ReuseError;
pub use registry::{Registration, ReuseKey, ReuseKind, ReuseRegistry, ViewSource};
