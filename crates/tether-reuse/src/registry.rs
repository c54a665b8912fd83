//! Reuse registry.
//!
//! Maps a caller-supplied key to a [`ViewSource`] and a pool of recycled
//! instances. The key's [`ReuseKey::identifier`] is the stable string under
//! which it is registered; nothing is derived from type names at runtime.
//!
//! ```
//! use tether_reuse::registry::{Registration, ReuseKey, ReuseRegistry};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Row {
//!     Title,
//!     Detail,
//! }
//!
//! impl ReuseKey for Row {
//!     fn identifier(self) -> &'static str {
//!         match self {
//!             Row::Title => "TitleRow",
//!             Row::Detail => "DetailRow",
//!         }
//!     }
//! }
//!
//! let mut registry = ReuseRegistry::new();
//! registry.register_cells([
//!     Registration::factory(Row::Title, || String::from("title")),
//!     Registration::template(Row::Detail, String::from("detail")),
//! ]);
//!
//! let cell = registry.dequeue_cell(Row::Detail)?;
//! assert_eq!(cell, "detail");
//! registry.enqueue_cell(Row::Detail, cell)?;
//! assert_eq!(registry.pooled(tether_reuse::registry::ReuseKind::Cell, Row::Detail), 1);
//! # Ok::<(), tether_reuse::error::ReuseError>(())
//! ```

use core::fmt;
use core::hash::Hash;
use std::collections::HashMap;

use crate::error::ReuseError;

/// Default number of recycled instances kept per key.
pub const DEFAULT_POOL_CAPACITY: usize = 16;

/// A key naming one kind of reusable view.
pub trait ReuseKey: Copy + Eq + Hash {
    /// Stable reuse identifier for this key.
    fn identifier(self) -> &'static str;
}

/// Slot a reusable view is registered for.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ReuseKind {
    /// Row or item cell.
    Cell,
    /// Section header.
    Header,
    /// Section footer.
    Footer,
}

impl fmt::Display for ReuseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReuseKind::Cell => "cell",
            ReuseKind::Header => "header",
            ReuseKind::Footer => "footer",
        })
    }
}

/// How fresh instances are produced.
#[derive(Debug, Clone)]
pub enum ViewSource<V> {
    /// Construct with a function.
    Factory(fn() -> V),
    /// Clone a prototype instance.
    Template(V),
}

impl<V: Clone> ViewSource<V> {
    fn instantiate(&self) -> V {
        match self {
            ViewSource::Factory(make) => make(),
            ViewSource::Template(prototype) => prototype.clone(),
        }
    }
}

/// A key paired with its source.
#[derive(Debug, Clone)]
pub struct Registration<K, V> {
    /// Reuse key.
    pub key: K,
    /// Source of fresh instances.
    pub source: ViewSource<V>,
}

impl<K, V> Registration<K, V> {
    /// Register `key` with a constructor function.
    pub fn factory(key: K, make: fn() -> V) -> Self {
        Self {
            key,
            source: ViewSource::Factory(make),
        }
    }

    /// Register `key` with a prototype that is cloned for each fresh instance.
    pub fn template(key: K, prototype: V) -> Self {
        Self {
            key,
            source: ViewSource::Template(prototype),
        }
    }
}

#[derive(Debug)]
struct Entry<V> {
    source: ViewSource<V>,
    pool: Vec<V>,
}

/// Registered view sources and their recycle pools, per [`ReuseKind`] and key.
#[derive(Debug)]
pub struct ReuseRegistry<K, V> {
    entries: HashMap<(ReuseKind, K), Entry<V>>,
    pool_capacity: usize,
}

impl<K: ReuseKey, V: Clone> ReuseRegistry<K, V> {
    /// Create an empty registry with [`DEFAULT_POOL_CAPACITY`].
    pub fn new() -> Self {
        Self::with_pool_capacity(DEFAULT_POOL_CAPACITY)
    }

    /// Create an empty registry keeping at most `capacity` recycled views per key.
    pub fn with_pool_capacity(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            pool_capacity: capacity,
        }
    }

    /// Register `registration` for `kind`.
    ///
    /// Registering a key again replaces its source and empties its pool.
    pub fn register(&mut self, kind: ReuseKind, registration: Registration<K, V>) {
        let Registration { key, source } = registration;
        let replaced = self
            .entries
            .insert(
                (kind, key),
                Entry {
                    source,
                    pool: Vec::new(),
                },
            )
            .is_some();
        tracing::debug!(kind = %kind, identifier = key.identifier(), replaced, "registered");
    }

    /// Register a cell.
    pub fn register_cell(&mut self, registration: Registration<K, V>) {
        self.register(ReuseKind::Cell, registration);
    }

    /// Register a section header.
    pub fn register_header(&mut self, registration: Registration<K, V>) {
        self.register(ReuseKind::Header, registration);
    }

    /// Register a section footer.
    pub fn register_footer(&mut self, registration: Registration<K, V>) {
        self.register(ReuseKind::Footer, registration);
    }

    /// Register several cells at once.
    pub fn register_cells<I>(&mut self, registrations: I)
    where
        I: IntoIterator<Item = Registration<K, V>>,
    {
        registrations.into_iter().for_each(|r| self.register_cell(r));
    }

    /// Register several headers at once.
    pub fn register_headers<I>(&mut self, registrations: I)
    where
        I: IntoIterator<Item = Registration<K, V>>,
    {
        registrations.into_iter().for_each(|r| self.register_header(r));
    }

    /// Register several footers at once.
    pub fn register_footers<I>(&mut self, registrations: I)
    where
        I: IntoIterator<Item = Registration<K, V>>,
    {
        registrations.into_iter().for_each(|r| self.register_footer(r));
    }

    /// Returns `true` if `key` is registered for `kind`.
    pub fn is_registered(&self, kind: ReuseKind, key: K) -> bool {
        self.entries.contains_key(&(kind, key))
    }

    /// Reuse identifier `key` is registered under for `kind`, if registered.
    pub fn identifier(&self, kind: ReuseKind, key: K) -> Option<&'static str> {
        self.is_registered(kind, key).then(|| key.identifier())
    }

    /// Number of recycled instances waiting for `key`.
    pub fn pooled(&self, kind: ReuseKind, key: K) -> usize {
        self.entries.get(&(kind, key)).map_or(0, |entry| entry.pool.len())
    }

    fn entry_mut(&mut self, kind: ReuseKind, key: K) -> Result<&mut Entry<V>, ReuseError> {
        self.entries
            .get_mut(&(kind, key))
            .ok_or(ReuseError::NotRegistered {
                kind,
                identifier: key.identifier(),
            })
    }

    /// Take a view for `key`: a recycled one if available, otherwise a fresh one.
    ///
    /// # Errors
    ///
    /// [`ReuseError::NotRegistered`] if `key` was never registered for `kind`.
    pub fn dequeue(&mut self, kind: ReuseKind, key: K) -> Result<V, ReuseError> {
        let entry = self.entry_mut(kind, key)?;
        match entry.pool.pop() {
            Some(view) => {
                tracing::trace!(kind = %kind, identifier = key.identifier(), "reused");
                Ok(view)
            }
            None => {
                tracing::trace!(kind = %kind, identifier = key.identifier(), "created");
                Ok(entry.source.instantiate())
            }
        }
    }

    /// Dequeue a cell.
    pub fn dequeue_cell(&mut self, key: K) -> Result<V, ReuseError> {
        self.dequeue(ReuseKind::Cell, key)
    }

    /// Dequeue a section header.
    pub fn dequeue_header(&mut self, key: K) -> Result<V, ReuseError> {
        self.dequeue(ReuseKind::Header, key)
    }

    /// Dequeue a section footer.
    pub fn dequeue_footer(&mut self, key: K) -> Result<V, ReuseError> {
        self.dequeue(ReuseKind::Footer, key)
    }

    /// Return `view` to the pool for `key`.
    ///
    /// When the pool is full the view is dropped.
    ///
    /// # Errors
    ///
    /// [`ReuseError::NotRegistered`] if `key` was never registered for `kind`.
    pub fn enqueue(&mut self, kind: ReuseKind, key: K, view: V) -> Result<(), ReuseError> {
        let capacity = self.pool_capacity;
        let entry = self.entry_mut(kind, key)?;
        if entry.pool.len() < capacity {
            entry.pool.push(view);
        } else {
            tracing::trace!(kind = %kind, identifier = key.identifier(), "pool full, view dropped");
        }
        Ok(())
    }

    /// Return a cell to its pool.
    pub fn enqueue_cell(&mut self, key: K, view: V) -> Result<(), ReuseError> {
        self.enqueue(ReuseKind::Cell, key, view)
    }

    /// Return a section header to its pool.
    pub fn enqueue_header(&mut self, key: K, view: V) -> Result<(), ReuseError> {
        self.enqueue(ReuseKind::Header, key, view)
    }

    /// Return a section footer to its pool.
    pub fn enqueue_footer(&mut self, key: K, view: V) -> Result<(), ReuseError> {
        self.enqueue(ReuseKind::Footer, key, view)
    }
}

impl<K: ReuseKey, V: Clone> Default for ReuseRegistry<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Key {
        Plain,
        Fancy,
    }

    impl ReuseKey for Key {
        fn identifier(self) -> &'static str {
            match self {
                Key::Plain => "PlainCell",
                Key::Fancy => "FancyCell",
            }
        }
    }

    fn plain() -> u32 {
        1
    }

    #[test]
    fn test_dequeue_unregistered_is_error() {
        let mut registry: ReuseRegistry<Key, u32> = ReuseRegistry::new();
        assert_eq!(
            registry.dequeue_cell(Key::Plain),
            Err(ReuseError::NotRegistered {
                kind: ReuseKind::Cell,
                identifier: "PlainCell"
            })
        );
    }

    #[test]
    fn test_factory_and_template() {
        let mut registry = ReuseRegistry::new();
        registry.register_cells([
            Registration::factory(Key::Plain, plain),
            Registration::template(Key::Fancy, 7u32),
        ]);
        assert_eq!(registry.dequeue_cell(Key::Plain), Ok(1));
        assert_eq!(registry.dequeue_cell(Key::Fancy), Ok(7));
    }

    #[test]
    fn test_kinds_are_separate() {
        let mut registry = ReuseRegistry::new();
        registry.register_header(Registration::factory(Key::Plain, plain));
        assert!(registry.is_registered(ReuseKind::Header, Key::Plain));
        assert!(!registry.is_registered(ReuseKind::Cell, Key::Plain));
        assert!(!registry.is_registered(ReuseKind::Footer, Key::Plain));
        assert!(registry.dequeue_footer(Key::Plain).is_err());
        assert_eq!(registry.dequeue_header(Key::Plain), Ok(1));
    }

    #[test]
    fn test_recycled_view_is_preferred() {
        let mut registry = ReuseRegistry::new();
        registry.register_cell(Registration::factory(Key::Plain, plain));
        registry.enqueue_cell(Key::Plain, 42).unwrap();
        assert_eq!(registry.pooled(ReuseKind::Cell, Key::Plain), 1);
        assert_eq!(registry.dequeue_cell(Key::Plain), Ok(42));
        assert_eq!(registry.dequeue_cell(Key::Plain), Ok(1));
    }

    #[test]
    fn test_pool_capacity_is_bounded() {
        let mut registry = ReuseRegistry::with_pool_capacity(2);
        registry.register_footer(Registration::factory(Key::Fancy, plain));
        for n in 0..5 {
            registry.enqueue(ReuseKind::Footer, Key::Fancy, n).unwrap();
        }
        assert_eq!(registry.pooled(ReuseKind::Footer, Key::Fancy), 2);
    }

    #[test]
    fn test_reregister_replaces_source_and_clears_pool() {
        let mut registry = ReuseRegistry::new();
        registry.register_cell(Registration::factory(Key::Plain, plain));
        registry.enqueue_cell(Key::Plain, 9).unwrap();
        registry.register_cell(Registration::template(Key::Plain, 5));
        assert_eq!(registry.pooled(ReuseKind::Cell, Key::Plain), 0);
        assert_eq!(registry.dequeue_cell(Key::Plain), Ok(5));
    }

    #[test]
    fn test_headers_and_footers_recycle_separately() {
        let mut registry = ReuseRegistry::new();
        registry.register_header(Registration::factory(Key::Plain, plain));
        registry.register_footer(Registration::factory(Key::Plain, plain));

        registry.enqueue_header(Key::Plain, 10).unwrap();
        registry.enqueue_footer(Key::Plain, 20).unwrap();
        assert_eq!(registry.pooled(ReuseKind::Header, Key::Plain), 1);
        assert_eq!(registry.pooled(ReuseKind::Footer, Key::Plain), 1);

        assert_eq!(registry.dequeue_footer(Key::Plain), Ok(20));
        assert_eq!(registry.dequeue_header(Key::Plain), Ok(10));
        assert_eq!(
            registry.enqueue_footer(Key::Fancy, 30),
            Err(ReuseError::NotRegistered {
                kind: ReuseKind::Footer,
                identifier: "FancyCell"
            })
        );
    }

    #[test]
    fn test_identifier_only_for_registered_keys() {
        let mut registry = ReuseRegistry::new();
        registry.register_cell(Registration::template(Key::Fancy, 0u32));
        assert_eq!(registry.identifier(ReuseKind::Cell, Key::Fancy), Some("FancyCell"));
        assert_eq!(registry.identifier(ReuseKind::Header, Key::Fancy), None);
        assert_eq!(registry.identifier(ReuseKind::Cell, Key::Plain), None);
    }

    #[test]
    fn test_enqueue_unregistered_is_error() {
        let mut registry: ReuseRegistry<Key, u32> = ReuseRegistry::new();
        assert!(registry.enqueue(ReuseKind::Header, Key::Fancy, 3).is_err());
    }
}
