//! Configuration for spec parsing and comparison.
//!
//! [`ParseConfig`] bounds the nesting depth of tree specs, and
//! [`CompareConfig`] decides which symbol fields take part in a comparison.
//!
//! # Example
//!
//! ```ignore
//! use gramcheck_core::config::{CompareConfig, PositionMode};
//!
//! // Compare whatever position data the expected symbols carry
//! let config = CompareConfig::default();
//!
//! // Ignore positions even for verbose specs
//! let config = CompareConfig::new().with_positions(PositionMode::Never);
//!
//! // Accept any text for STRING tokens
//! let config = CompareConfig::new().with_text_insensitive("STRING");
//! ```

use std::collections::BTreeSet;

use crate::Error;

/// Configuration for tree spec parsing.
///
/// | Setting | Default |
/// |---------|---------|
/// | `max_recursion_depth` | 128 |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParseConfig {
    /// Maximum nesting of `(` ... `)` groups in a tree spec.
    ///
    /// Default: 128
    pub max_recursion_depth: usize,
}

impl Default for ParseConfig {
    #[inline]
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl ParseConfig {
    /// Default configuration, usable in const contexts.
    pub const DEFAULT: Self = Self {
        max_recursion_depth: 128,
    };

    #[inline]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Sets the maximum recursion depth. Use `usize::MAX` to disable it.
    #[inline]
    pub const fn with_max_recursion_depth(mut self, depth: usize) -> Self {
        self.max_recursion_depth = depth;
        self
    }
}

/// Tracks nesting depth while parsing a tree spec.
///
/// ```ignore
/// self.depth.enter(self.config.max_recursion_depth)?;
/// let children = self.children()?;
/// self.depth.exit();
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RecursionGuard {
    depth: usize,
}

impl RecursionGuard {
    #[inline]
    pub const fn new() -> Self {
        Self { depth: 0 }
    }

    #[inline]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Enter a nested group, failing once the depth exceeds `limit`.
    #[inline]
    pub fn enter(&mut self, limit: usize) -> Result<(), Error> {
        self.depth = self.depth.saturating_add(1);
        if self.depth > limit {
            Err(Error::RecursionLimitExceeded {
                depth: self.depth,
                limit,
            })
        } else {
            Ok(())
        }
    }

    /// Leave a nested group. Saturates at zero.
    #[inline]
    pub fn exit(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

/// Which position fields (index, offsets, line, column, channel) a symbol
/// comparison looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PositionMode {
    /// Compare each field the expected symbol carries.
    ///
    /// Default-notation specs carry none, verbose specs carry all of them,
    /// and pattern specs carry the fields their pattern mentions.
    #[default]
    Auto,
    /// Compare every field; a field present on one side only is a mismatch.
    Always,
    /// Compare type and text only.
    Never,
}

/// Configuration for comparing symbols and trees.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompareConfig {
    /// How position fields are compared.
    pub positions: PositionMode,
    /// Token types whose text is never compared.
    pub text_insensitive: BTreeSet<String>,
}

impl CompareConfig {
    #[inline]
    pub const fn new() -> Self {
        Self {
            positions: PositionMode::Auto,
            text_insensitive: BTreeSet::new(),
        }
    }

    #[inline]
    pub fn with_positions(mut self, mode: PositionMode) -> Self {
        self.positions = mode;
        self
    }

    /// Marks a token type (as rendered, e.g. `STRING` or `'='`) as
    /// text-insensitive.
    pub fn with_text_insensitive(mut self, kind: impl Into<String>) -> Self {
        self.text_insensitive.insert(kind.into());
        self
    }

    pub fn is_text_insensitive(&self, kind: &str) -> bool {
        self.text_insensitive.contains(kind)
    }
}
