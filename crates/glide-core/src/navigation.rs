#![forbid(unsafe_code)]

//! Index state machine.
//!
//! [`Navigator`] owns the active index and the advance policy. Every change to
//! the active index goes through [`Navigator::goto`]; gestures, autoplay,
//! keyboard, and strip clicks all request moves here rather than writing the
//! index themselves.
//!
//! # Resolution
//!
//! | Mode  | `requested < 0` | `requested >= N` | otherwise   |
//! |-------|-----------------|------------------|-------------|
//! | Clamp | `0`             | `N - 1`          | `requested` |
//! | Loop  | `N - 1`         | `0`              | `requested` |
//!
//! Loop mode wraps a single step: callers only ask for `active ± 1` or an
//! explicit index, so an overshoot always lands on the opposite end.
//!
//! # Invariants
//!
//! 1. When `N > 0`, `active_index < N` after every operation.
//! 2. When `N == 0`, every operation is a no-op and emits nothing.
//! 3. `goto(active_index)` never changes state and always yields the same
//!    [`Instruction`].

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use crate::presentation::Instruction;

/// What happens when navigation runs past either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(rename_all = "lowercase"))]
pub enum NavigationMode {
    /// Stop at the first/last item.
    #[default]
    Clamp,
    /// Wrap from the last item to the first and vice versa.
    Loop,
}

impl NavigationMode {
    /// Parse a mode name (`"clamp"` or `"loop"`, case-insensitive).
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("clamp") {
            Some(Self::Clamp)
        } else if s.eq_ignore_ascii_case("loop") {
            Some(Self::Loop)
        } else {
            None
        }
    }

    /// Lowercase name, as accepted by [`from_str_opt`](Self::from_str_opt).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Clamp => "clamp",
            Self::Loop => "loop",
        }
    }

    /// Resolve `requested` against `len` items.
    ///
    /// Returns `None` when `len == 0`.
    #[must_use]
    pub fn resolve(self, requested: isize, len: usize) -> Option<usize> {
        let last = len.checked_sub(1)?;
        let resolved = if requested < 0 {
            match self {
                Self::Clamp => 0,
                Self::Loop => last,
            }
        } else if requested as usize > last {
            match self {
                Self::Clamp => last,
                Self::Loop => 0,
            }
        } else {
            requested as usize
        };
        Some(resolved)
    }
}

/// Result of a resolved navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    /// Active index before the request.
    pub previous: usize,
    /// Active index after the request.
    pub index: usize,
    /// Whether the presenter should transition.
    pub animate: bool,
}

impl Step {
    /// Whether the active index moved.
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        self.previous != self.index
    }

    /// The presentation instruction for this step.
    #[must_use]
    pub fn instruction(&self) -> Instruction {
        Instruction::Settle {
            index: self.index,
            animate: self.animate,
        }
    }
}

/// Owner of the active index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigator {
    len: usize,
    active: usize,
    mode: NavigationMode,
}

impl Navigator {
    /// Create a navigator over `len` items, starting at index 0.
    #[must_use]
    pub const fn new(len: usize, mode: NavigationMode) -> Self {
        Self {
            len,
            active: 0,
            mode,
        }
    }

    /// Move to `requested` (sanitized by the current mode).
    ///
    /// Returns `None` when there are no items.
    pub fn goto(&mut self, requested: isize, animate: bool) -> Option<Step> {
        let index = self.mode.resolve(requested, self.len)?;
        let previous = self.active;
        self.active = index;
        Some(Step {
            previous,
            index,
            animate,
        })
    }

    /// `goto(active + 1)`, animated.
    pub fn advance(&mut self) -> Option<Step> {
        let requested = self.active_isize().saturating_add(1);
        self.goto(requested, true)
    }

    /// `goto(active - 1)`, animated.
    pub fn retreat(&mut self) -> Option<Step> {
        let requested = self.active_isize().saturating_sub(1);
        self.goto(requested, true)
    }

    /// Current active index. Meaningless (always 0) when inert.
    #[inline]
    #[must_use]
    pub const fn active_index(&self) -> usize {
        self.active
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no items to navigate.
    #[inline]
    #[must_use]
    pub const fn is_inert(&self) -> bool {
        self.len == 0
    }

    /// Current advance policy.
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> NavigationMode {
        self.mode
    }

    /// Change the advance policy. The active index is already valid in both
    /// modes, so nothing is re-resolved.
    pub fn set_mode(&mut self, mode: NavigationMode) {
        self.mode = mode;
    }

    fn active_isize(&self) -> isize {
        isize::try_from(self.active).unwrap_or(isize::MAX)
    }
}
