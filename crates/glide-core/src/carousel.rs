#![forbid(unsafe_code)]

//! The carousel controller.
//!
//! [`Carousel`] wires the item index, [`Navigator`], [`DragTracker`], and
//! [`Autoplay`] to a host-supplied [`Presenter`]. It is the only place that
//! turns their outputs into presentation calls.
//!
//! # Event Routing
//!
//! | Event | Effect |
//! |---|---|
//! | `PointerDown` | `begin_drag` (if swipe is enabled) |
//! | `PointerMove` | `update_drag` (ignored while idle) |
//! | `PointerUp` | last sample, then `end_drag` |
//! | `PointerCancel`, `PointerLeave`, `Focus(false)` | implicit `end_drag` at the last sample |
//! | `PointerEnter` / `PointerLeave` | hold / release autoplay ([`Hold::HOVER`]) |
//! | `Click` | `advance` (unless the press turned into a drag; ignored mid-drag) |
//! | `Key` | Left/Up retreat, Right/Down advance, Home/End jump |
//! | `Select(i)` | `goto(i)` (ignored mid-drag) |
//! | `Resize` | new viewport width; re-track the drag or re-settle without animation |
//! | `Tick` | autoplay poll |
//!
//! # Invariants
//!
//! 1. The active index is written only through [`Navigator::goto`].
//! 2. A drag always ends in exactly one `Settle`, either a neighbor or the base.
//! 3. Autoplay never fires while a drag is active or the pointer hovers.
//! 4. An inert carousel (no items) ignores every event and emits nothing.

use std::fmt;

use web_time::Instant;

use crate::autoplay::{Autoplay, Hold};
use crate::config::CarouselConfig;
use crate::event::{CarouselEvent, KeyCode, KeyEvent};
use crate::gesture::{DragDecision, DragOutcome, DragTracker};
use crate::item::ItemIndex;
use crate::navigation::{NavigationMode, Navigator, Step};
use crate::presentation::{Instruction, Presenter};

/// What [`Carousel::handle`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// The event had no effect.
    Ignored,
    /// State changed, but the carousel did not settle on an index.
    Consumed,
    /// The carousel settled on this index (possibly the one it was already on).
    Navigated(usize),
}

impl Handled {
    /// Index settled on, if any.
    #[must_use]
    pub const fn navigated(self) -> Option<usize> {
        match self {
            Self::Navigated(index) => Some(index),
            _ => None,
        }
    }

    fn from_step_index(index: Option<usize>) -> Self {
        index.map_or(Self::Ignored, Self::Navigated)
    }
}

/// Autoplay as seen from outside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayState {
    /// Not configured, or stopped.
    Off,
    /// A tick is pending.
    Scheduled,
    /// Running but suspended by these holds.
    Held(Hold),
}

/// Snapshot of a carousel for host UIs (counters, play/pause buttons).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselStatus {
    /// Built with zero items; every operation is a no-op.
    Inert,
    /// Navigable.
    Active {
        index: usize,
        len: usize,
        mode: NavigationMode,
        dragging: bool,
        autoplay: AutoplayState,
    },
}

/// Navigation and gesture engine bound to a presenter.
pub struct Carousel<S, P> {
    items: ItemIndex<S>,
    config: CarouselConfig,
    nav: Navigator,
    drag: DragTracker,
    autoplay: Autoplay,
    presenter: P,
    swallow_click: bool,
    hovering: bool,
}

impl<S, P> fmt::Debug for Carousel<S, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Carousel")
            .field("len", &self.nav.len())
            .field("active", &self.nav.active_index())
            .field("mode", &self.nav.mode())
            .field("dragging", &self.drag.is_dragging())
            .field("autoplay", &self.autoplay.is_scheduled())
            .finish()
    }
}

impl<S, P: Presenter> Carousel<S, P> {
    /// Build a carousel over `sources`.
    ///
    /// A non-empty carousel immediately settles on item 0 (no animation) and
    /// starts autoplay if configured. An empty one is inert: see
    /// [`is_inert`](Self::is_inert).
    pub fn new(
        sources: impl IntoIterator<Item = S>,
        config: CarouselConfig,
        presenter: P,
        viewport_width: f64,
        now: Instant,
    ) -> Self {
        let items = ItemIndex::new(sources);
        Self::from_index(items, config, presenter, viewport_width, now)
    }

    /// Build a carousel over an existing [`ItemIndex`].
    pub fn from_index(
        items: ItemIndex<S>,
        config: CarouselConfig,
        presenter: P,
        viewport_width: f64,
        now: Instant,
    ) -> Self {
        #[cfg(feature = "tracing")]
        for problem in config.validate() {
            tracing::warn!(problem = %problem, "carousel config adjusted");
        }
        let config = config.validated();
        let nav = Navigator::new(items.len(), config.mode);
        let drag = DragTracker::new(config.drag_config(), viewport_width);
        let autoplay = Autoplay::new(config.autoplay_interval());

        let mut carousel = Self {
            items,
            config,
            nav,
            drag,
            autoplay,
            presenter,
            swallow_click: false,
            hovering: false,
        };

        if carousel.is_inert() {
            #[cfg(feature = "tracing")]
            tracing::warn!("carousel has no items; navigation is inert");
            return carousel;
        }

        carousel.emit(Instruction::Settle {
            index: 0,
            animate: false,
        });
        carousel.autoplay.start_configured(now);
        carousel
    }

    // -----------------------------------------------------------------------
    // Navigation
    // -----------------------------------------------------------------------

    /// Move to `index`, sanitized by the navigation mode.
    ///
    /// Returns the applied index, or `None` when inert.
    pub fn goto(&mut self, index: isize, animate: bool) -> Option<usize> {
        let step = self.nav.goto(index, animate);
        self.settle(step, index)
    }

    /// Move to the next item (wrapping in loop mode).
    pub fn advance(&mut self) -> Option<usize> {
        let requested = self.requested_offset(1);
        let step = self.nav.advance();
        self.settle(step, requested)
    }

    /// Move to the previous item (wrapping in loop mode).
    pub fn retreat(&mut self) -> Option<usize> {
        let requested = self.requested_offset(-1);
        let step = self.nav.retreat();
        self.settle(step, requested)
    }

    // -----------------------------------------------------------------------
    // Gestures
    // -----------------------------------------------------------------------

    /// Start a drag at pointer position `x`.
    ///
    /// Returns `false` when swiping is disabled, the carousel is inert, or a
    /// drag is already active.
    pub fn begin_drag(&mut self, x: f64, now: Instant) -> bool {
        if self.is_inert() || !self.config.swipe_enabled {
            return false;
        }
        let Some(instruction) = self.drag.begin_drag(x, self.nav.active_index()) else {
            return false;
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(x, base_index = self.nav.active_index(), "carousel.drag_begin");
        self.autoplay.hold(Hold::DRAG, now);
        self.emit(instruction);
        true
    }

    /// Feed a pointer sample. Ignored unless a drag is active.
    pub fn update_drag(&mut self, x: f64) -> bool {
        let Some(instruction) = self.drag.update_drag(x) else {
            return false;
        };
        #[cfg(feature = "tracing")]
        tracing::trace!(x, offset_items = instruction.offset_items(), "carousel.drag_update");
        self.emit(instruction);
        true
    }

    /// Finish the active drag: commit to a neighbor or snap back.
    ///
    /// This is the explicit end of a pointer stream, so a press that turned
    /// into a drag also swallows the click the platform sends next.
    ///
    /// Returns the index settled on, or `None` when no drag was active.
    pub fn end_drag(&mut self, now: Instant) -> Option<usize> {
        self.finish_drag(now, true)
    }

    // -----------------------------------------------------------------------
    // Autoplay
    // -----------------------------------------------------------------------

    /// Suspend autoplay (e.g. while the pointer hovers a host control).
    pub fn pause(&mut self, now: Instant) {
        self.autoplay.pause(now);
    }

    /// Undo [`pause`](Self::pause). Drag and hover holds still apply.
    pub fn resume(&mut self, now: Instant) {
        self.autoplay.resume(now);
    }

    /// (Re)start autoplay with a new period.
    pub fn start_autoplay(&mut self, interval: std::time::Duration, now: Instant) {
        if self.is_inert() {
            return;
        }
        self.autoplay.start(interval, now);
    }

    /// Stop autoplay until started again.
    pub fn stop_autoplay(&mut self) {
        self.autoplay.stop();
    }

    /// Advance if the autoplay deadline has passed.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        if !self.autoplay.poll(now) {
            return None;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(from = self.nav.active_index(), "carousel.autoplay_fire");
        self.advance()
    }

    // -----------------------------------------------------------------------
    // Event routing
    // -----------------------------------------------------------------------

    /// Route one input event. Events must be fed in arrival order.
    pub fn handle(&mut self, event: &CarouselEvent, now: Instant) -> Handled {
        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("carousel.handle", event = event.name()).entered();

        if self.is_inert() {
            return Handled::Ignored;
        }

        match *event {
            CarouselEvent::PointerDown { x } => {
                self.swallow_click = false;
                if self.begin_drag(x, now) {
                    Handled::Consumed
                } else {
                    Handled::Ignored
                }
            }
            CarouselEvent::PointerMove { x } => {
                if self.update_drag(x) {
                    Handled::Consumed
                } else {
                    Handled::Ignored
                }
            }
            CarouselEvent::PointerUp { x } => {
                if !self.drag.is_dragging() {
                    return Handled::Ignored;
                }
                self.update_drag(x);
                Handled::from_step_index(self.end_drag(now))
            }
            CarouselEvent::PointerCancel | CarouselEvent::Focus(false) => {
                Handled::from_step_index(self.finish_drag(now, false))
            }
            CarouselEvent::PointerEnter => {
                if self.hovering {
                    return Handled::Ignored;
                }
                self.hovering = true;
                self.autoplay.hold(Hold::HOVER, now);
                Handled::Consumed
            }
            CarouselEvent::PointerLeave => {
                let ended = self.finish_drag(now, false);
                let was_hovering = std::mem::replace(&mut self.hovering, false);
                self.autoplay.release(Hold::HOVER, now);
                match ended {
                    Some(index) => Handled::Navigated(index),
                    None if was_hovering => Handled::Consumed,
                    None => Handled::Ignored,
                }
            }
            CarouselEvent::Click => self.on_click(),
            CarouselEvent::Key(key) => self.on_key(key),
            CarouselEvent::Focus(true) => Handled::Ignored,
            CarouselEvent::Resize { width } => self.on_resize(width),
            CarouselEvent::Select(_) if self.drag.is_dragging() => Handled::Ignored,
            CarouselEvent::Select(index) => {
                Handled::from_step_index(self.goto(to_isize(index), true))
            }
            CarouselEvent::Tick => Handled::from_step_index(self.tick(now)),
        }
    }

    fn on_click(&mut self) -> Handled {
        if self.drag.is_dragging() {
            return Handled::Ignored;
        }
        if std::mem::take(&mut self.swallow_click) {
            return Handled::Consumed;
        }
        if !self.config.click_advances {
            return Handled::Ignored;
        }
        Handled::from_step_index(self.advance())
    }

    fn on_key(&mut self, key: KeyEvent) -> Handled {
        if !self.config.keyboard_enabled || !key.is_press() || self.drag.is_dragging() {
            return Handled::Ignored;
        }
        let index = match key.code {
            KeyCode::Left | KeyCode::Up => self.retreat(),
            KeyCode::Right | KeyCode::Down => self.advance(),
            KeyCode::Home => self.goto(0, true),
            KeyCode::End => {
                let last = self.items.last_index().unwrap_or(0);
                self.goto(to_isize(last), true)
            }
            KeyCode::Other => return Handled::Ignored,
        };
        Handled::from_step_index(index)
    }

    fn on_resize(&mut self, width: f64) -> Handled {
        if !width.is_finite() || width < 0.0 {
            return Handled::Ignored;
        }
        self.drag.set_viewport_width(width);
        if let Some(track) = self.drag.track() {
            self.emit(track);
            return Handled::Consumed;
        }
        self.emit(Instruction::Settle {
            index: self.nav.active_index(),
            animate: false,
        });
        Handled::Consumed
    }

    // -----------------------------------------------------------------------
    // Lifecycle & accessors
    // -----------------------------------------------------------------------

    /// Tear the carousel down: stop autoplay, abandon any drag, and hand the
    /// presenter back.
    pub fn teardown(mut self) -> P {
        self.autoplay.stop();
        self.drag.reset();
        #[cfg(feature = "tracing")]
        tracing::debug!(len = self.nav.len(), "carousel.teardown");
        self.presenter
    }

    /// Update the viewport width used to convert drag pixels to items.
    pub fn set_viewport_width(&mut self, width: f64) {
        self.drag.set_viewport_width(width);
    }

    /// Whether the carousel has no items.
    #[inline]
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.nav.is_inert()
    }

    /// Current active index (0 when inert).
    #[inline]
    #[must_use]
    pub fn active_index(&self) -> usize {
        self.nav.active_index()
    }

    /// Number of items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.nav.len()
    }

    /// Whether a drag is in progress.
    #[inline]
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Loaded items.
    #[must_use]
    pub fn items(&self) -> &ItemIndex<S> {
        &self.items
    }

    /// The item currently shown, if any.
    #[must_use]
    pub fn active_item(&self) -> Option<&crate::item::Item<S>> {
        self.items.get(self.nav.active_index())
    }

    /// Effective (validated) configuration.
    #[must_use]
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// The autoplay timer.
    #[must_use]
    pub fn autoplay(&self) -> &Autoplay {
        &self.autoplay
    }

    /// The presenter.
    #[must_use]
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// The presenter, mutably.
    pub fn presenter_mut(&mut self) -> &mut P {
        &mut self.presenter
    }

    /// Status snapshot.
    #[must_use]
    pub fn status(&self) -> CarouselStatus {
        if self.is_inert() {
            return CarouselStatus::Inert;
        }
        let autoplay = if self.autoplay.is_scheduled() {
            AutoplayState::Scheduled
        } else if self.autoplay.is_running() {
            AutoplayState::Held(self.autoplay.holds())
        } else {
            AutoplayState::Off
        };
        CarouselStatus::Active {
            index: self.nav.active_index(),
            len: self.nav.len(),
            mode: self.nav.mode(),
            dragging: self.drag.is_dragging(),
            autoplay,
        }
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    /// End the drag. Only an explicit end arms click swallowing; an abandoned
    /// pointer stream is never followed by a platform click.
    fn finish_drag(&mut self, now: Instant, explicit: bool) -> Option<usize> {
        let outcome = self.drag.end_drag()?;
        self.autoplay.release(Hold::DRAG, now);
        self.swallow_click = explicit && !outcome.is_click(self.drag.config().click_slop_px);
        self.resolve_drag(outcome)
    }

    fn resolve_drag(&mut self, outcome: DragOutcome) -> Option<usize> {
        #[cfg(feature = "tracing")]
        if outcome.decision == DragDecision::SnapBack {
            tracing::debug!(
                delta_px = outcome.delta_px,
                base_index = outcome.base_index,
                "carousel.drag_cancel"
            );
        } else {
            tracing::debug!(
                delta_px = outcome.delta_px,
                base_index = outcome.base_index,
                "carousel.drag_commit"
            );
        }
        match outcome.decision {
            DragDecision::Advance => self.advance(),
            DragDecision::Retreat => self.retreat(),
            DragDecision::SnapBack => self.goto(to_isize(outcome.base_index), true),
        }
    }

    fn settle(&mut self, step: Option<Step>, _requested: isize) -> Option<usize> {
        let step = step?;
        #[cfg(feature = "tracing")]
        tracing::debug!(
            requested = _requested,
            applied = step.index,
            animate = step.animate,
            changed = step.changed(),
            "carousel.goto"
        );
        self.emit(step.instruction());
        Some(step.index)
    }

    fn requested_offset(&self, delta: isize) -> isize {
        to_isize(self.nav.active_index()).saturating_add(delta)
    }

    fn emit(&mut self, instruction: Instruction) {
        instruction.apply(&mut self.presenter);
    }
}

fn to_isize(index: usize) -> isize {
    isize::try_from(index).unwrap_or(isize::MAX)
}
