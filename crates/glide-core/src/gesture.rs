#![forbid(unsafe_code)]

//! Swipe tracking: turns pointer samples into a commit or snap-back decision.
//!
//! [`DragTracker`] is a two-state machine:
//!
//! ```text
//!            begin_drag                 end_drag
//!   ┌──────┐ ─────────▶ ┌──────────┐ ──────────▶ ┌──────┐
//!   │ Idle │            │ Dragging │             │ Idle │
//!   └──────┘            └──────────┘             └──────┘
//!                          │    ▲
//!                          └────┘ update_drag
//! ```
//!
//! While dragging, each sample produces a live [`Instruction::Track`] that
//! follows the pointer. Nothing here touches the active index: the tracker
//! reports a [`DragOutcome`] and the caller turns it into a navigation.
//!
//! # Invariants
//!
//! 1. `update_drag` and `end_drag` outside a drag are no-ops.
//! 2. `begin_drag` during a drag is ignored; the first session wins.
//! 3. The decision depends only on the recorded start/last positions and the
//!    commit threshold (see [`decide`]).
//! 4. Non-finite positions are dropped rather than recorded.
//!
//! # Failure Modes
//!
//! - If the end signal is lost (pointer leaves the surface, focus is lost),
//!   the caller must still call `end_drag`; the outcome then uses the last
//!   sample that arrived.

use crate::presentation::Instruction;

/// Default minimum swipe distance, in pixels, for a commit.
pub const DEFAULT_COMMIT_THRESHOLD_PX: f64 = 50.0;

/// Default pointer travel, in pixels, above which a click is treated as a drag.
pub const DEFAULT_CLICK_SLOP_PX: f64 = 5.0;

/// Thresholds for swipe recognition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Minimum `|last - start|` needed to move to a neighbor (default: 50px).
    pub commit_threshold_px: f64,
    /// Maximum travel for which the interaction still counts as a click
    /// (default: 5px).
    pub click_slop_px: f64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            commit_threshold_px: DEFAULT_COMMIT_THRESHOLD_PX,
            click_slop_px: DEFAULT_CLICK_SLOP_PX,
        }
    }
}

/// Per-drag state. Exists only between `begin_drag` and `end_drag`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer position when the drag began.
    pub start_position: f64,
    /// Most recent pointer position.
    pub last_position: f64,
    /// Active index when the drag began.
    pub base_index: usize,
    max_travel: f64,
}

impl DragSession {
    /// Signed travel from the start (negative = dragged left).
    #[inline]
    #[must_use]
    pub fn delta_px(&self) -> f64 {
        self.last_position - self.start_position
    }
}

/// What a finished drag asks the navigator to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragDecision {
    /// Dragged left past the threshold: move to the next item.
    Advance,
    /// Dragged right past the threshold: move to the previous item.
    Retreat,
    /// Below the threshold: return to the base index.
    SnapBack,
}

/// Commit/cancel decision for a drag from `start` to `last`.
#[must_use]
pub fn decide(start: f64, last: f64, commit_threshold_px: f64) -> DragDecision {
    let delta = last - start;
    if delta.abs() >= commit_threshold_px {
        if delta < 0.0 {
            DragDecision::Advance
        } else {
            DragDecision::Retreat
        }
    } else {
        DragDecision::SnapBack
    }
}

/// Summary of a finished drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOutcome {
    /// What the navigator should do.
    pub decision: DragDecision,
    /// Active index when the drag began.
    pub base_index: usize,
    /// Signed distance between the first and last samples.
    pub delta_px: f64,
    /// Largest distance from the start seen during the drag.
    pub max_travel_px: f64,
}

impl DragOutcome {
    /// Whether the pointer never strayed beyond `click_slop_px`.
    #[must_use]
    pub fn is_click(&self, click_slop_px: f64) -> bool {
        self.max_travel_px < click_slop_px
    }
}

/// Stateful swipe tracker.
#[derive(Debug, Clone)]
pub struct DragTracker {
    config: DragConfig,
    viewport_width: f64,
    session: Option<DragSession>,
}

impl DragTracker {
    /// Create an idle tracker for a viewport `viewport_width` pixels wide.
    #[must_use]
    pub fn new(config: DragConfig, viewport_width: f64) -> Self {
        Self {
            config,
            viewport_width,
            session: None,
        }
    }

    /// Start a drag at `position` from `base_index`.
    ///
    /// Returns the instruction that pins the track to `base_index` without a
    /// transition, or `None` when a drag is already active.
    pub fn begin_drag(&mut self, position: f64, base_index: usize) -> Option<Instruction> {
        if self.session.is_some() || !position.is_finite() {
            return None;
        }
        self.session = Some(DragSession {
            start_position: position,
            last_position: position,
            base_index,
            max_travel: 0.0,
        });
        Some(Instruction::Track {
            offset_items: -(base_index as f64),
        })
    }

    /// Record a pointer sample and return the live track position.
    ///
    /// Returns `None` when idle.
    pub fn update_drag(&mut self, position: f64) -> Option<Instruction> {
        if !position.is_finite() {
            return None;
        }
        let session = self.session.as_mut()?;
        session.last_position = position;
        let travel = session.delta_px().abs();
        if travel > session.max_travel {
            session.max_travel = travel;
        }
        self.track()
    }

    /// Live track position for the last sample at the current viewport width.
    ///
    /// Returns `None` when idle.
    #[must_use]
    pub fn track(&self) -> Option<Instruction> {
        let session = self.session.as_ref()?;
        let fraction = delta_fraction(session.delta_px(), self.viewport_width);
        Some(Instruction::Track {
            offset_items: -(session.base_index as f64) + fraction,
        })
    }

    /// Finish the drag and report the decision.
    ///
    /// Returns `None` when idle. The tracker is idle afterwards in every case.
    pub fn end_drag(&mut self) -> Option<DragOutcome> {
        let session = self.session.take()?;
        Some(DragOutcome {
            decision: decide(
                session.start_position,
                session.last_position,
                self.config.commit_threshold_px,
            ),
            base_index: session.base_index,
            delta_px: session.delta_px(),
            max_travel_px: session.max_travel,
        })
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The active session, if dragging.
    #[inline]
    #[must_use]
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Drop any in-progress drag without producing an outcome.
    pub fn reset(&mut self) {
        self.session = None;
    }

    /// Viewport width used to convert pixels to items.
    #[inline]
    #[must_use]
    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    /// Update the viewport width. Takes effect on the next sample.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.viewport_width = width;
    }

    /// Get a reference to the current configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Update the configuration.
    pub fn set_config(&mut self, config: DragConfig) {
        self.config = config;
    }
}

/// Pixels to items. A non-positive or non-finite width yields zero.
fn delta_fraction(delta_px: f64, viewport_width: f64) -> f64 {
    if viewport_width.is_finite() && viewport_width > 0.0 {
        // Samples far apart can overflow the subtraction.
        (delta_px / viewport_width).clamp(f64::MIN, f64::MAX)
    } else {
        0.0
    }
}
