//! Resolver configuration and constants
//!
//! Priorities follow the usual 0-1000 host-framework scale but are bucketed
//! into the four strengths the solver distinguishes.

/// Tolerance used when comparing solved coordinates.
pub const FRAME_TOLERANCE: f64 = 1e-6;

/// Priority level of a solver constraint.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Priority {
    /// Must hold; the solver rejects conflicting constraints.
    #[default]
    Required,
    /// High priority (compression resistance).
    Strong,
    /// Medium priority.
    Medium,
    /// Low priority (content hugging, frame preference).
    Weak,
}

impl Priority {
    /// Map a 0-1000 priority to the nearest bucket.
    ///
    /// ```
    /// use tether_layout::config::Priority;
    ///
    /// assert_eq!(Priority::from_level(1000), Priority::Required);
    /// assert_eq!(Priority::from_level(750), Priority::Strong);
    /// assert_eq!(Priority::from_level(500), Priority::Medium);
    /// assert_eq!(Priority::from_level(250), Priority::Weak);
    /// ```
    pub const fn from_level(level: u16) -> Self {
        match level {
            1000.. => Priority::Required,
            700..=999 => Priority::Strong,
            400..=699 => Priority::Medium,
            _ => Priority::Weak,
        }
    }

    /// Solver strength for this priority.
    pub(crate) fn strength(self) -> kasuari::Strength {
        match self {
            Priority::Required => kasuari::Strength::REQUIRED,
            Priority::Strong => kasuari::Strength::STRONG,
            Priority::Medium => kasuari::Strength::MEDIUM,
            Priority::Weak => kasuari::Strength::WEAK,
        }
    }
}

/// Settings for [`resolve`](crate::solver::resolve).
///
/// ```
/// use tether_layout::config::{LayoutConfig, Priority};
///
/// let config = LayoutConfig::new().content_hugging(Priority::Medium);
/// assert_eq!(config.content_hugging, Priority::Medium);
/// assert_eq!(config.compression_resistance, Priority::Strong);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct LayoutConfig {
    /// Strength of `size <= intrinsic size`.
    pub content_hugging: Priority,

    /// Strength of `size >= intrinsic size`.
    pub compression_resistance: Priority,

    /// Strength of the preference to keep a view's current size when nothing else decides it.
    pub frame_preference: Priority,
}

impl LayoutConfig {
    /// Default configuration: weak hugging, strong compression resistance.
    pub const fn new() -> Self {
        Self {
            content_hugging: Priority::Weak,
            compression_resistance: Priority::Strong,
            frame_preference: Priority::Weak,
        }
    }

    /// Builder method to set content hugging.
    pub const fn content_hugging(mut self, priority: Priority) -> Self {
        self.content_hugging = priority;
        self
    }

    /// Builder method to set compression resistance.
    pub const fn compression_resistance(mut self, priority: Priority) -> Self {
        self.compression_resistance = priority;
        self
    }

    /// Builder method to set the frame preference.
    pub const fn frame_preference(mut self, priority: Priority) -> Self {
        self.frame_preference = priority;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = LayoutConfig::default();
        assert_eq!(config, LayoutConfig::new());
        assert_eq!(config.content_hugging, Priority::Weak);
        assert_eq!(config.compression_resistance, Priority::Strong);
        assert_eq!(config.frame_preference, Priority::Weak);
    }

    #[test]
    fn test_priority_buckets() {
        assert_eq!(Priority::from_level(u16::MAX), Priority::Required);
        assert_eq!(Priority::from_level(999), Priority::Strong);
        assert_eq!(Priority::from_level(699), Priority::Medium);
        assert_eq!(Priority::from_level(0), Priority::Weak);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_config_serde() {
        let json = serde_json::to_string(&LayoutConfig::default()).unwrap();
        let back: LayoutConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, LayoutConfig::default());
    }
}
