#![forbid(unsafe_code)]

//! Input storm generator for carousel fault-injection tests.
//!
//! Generates deterministic, timestamped [`CarouselEvent`] sequences and replays
//! them through a real [`Carousel`], checking engine invariants after every
//! event.
//!
//! # Burst Patterns
//!
//! | Pattern | Description |
//! |---------|-------------|
//! | [`BurstPattern::SwipeStorm`] | Back-to-back swipes of random length and direction |
//! | [`BurstPattern::KeyboardStorm`] | Arrow/Home/End presses, repeats, and releases |
//! | [`BurstPattern::MixedBurst`] | Interleaved pointer, key, click, hover, select, tick |
//! | [`BurstPattern::AbandonedDrags`] | Drags that end by leave/cancel/focus loss instead of pointer-up |
//!
//! # JSONL Schema
//!
//! ```json
//! {"event":"storm_start","pattern":"swipe_storm","seed":7,"event_count":400}
//! {"event":"storm_inject","idx":0,"event_type":"pointer_down","at_ms":0,"active":0}
//! {"event":"storm_complete","events_processed":400,"navigations":57,"violations":0,"final_index":3}
//! ```

use std::time::Duration;

use glide_core::carousel::{Carousel, Handled};
use glide_core::config::CarouselConfig;
use glide_core::event::{CarouselEvent, KeyCode, KeyEvent, KeyEventKind};
use glide_core::Instant;
use serde_json::json;

use crate::recording::RecordingPresenter;

// ============================================================================
// Configuration
// ============================================================================

/// Pattern type for input storm generation.
#[derive(Debug, Clone, PartialEq)]
pub enum BurstPattern {
    /// Complete swipes (down, several moves, up).
    SwipeStorm {
        /// Number of swipes.
        count: usize,
        /// Viewport width in pixels; swipe lengths stay within it.
        width: u32,
    },
    /// Keyboard navigation at impossible speed.
    KeyboardStorm {
        /// Number of key events.
        count: usize,
    },
    /// Everything at once.
    MixedBurst {
        /// Number of events.
        count: usize,
        /// Viewport width in pixels.
        width: u32,
    },
    /// Drags that never see a pointer-up.
    AbandonedDrags {
        /// Number of drags.
        count: usize,
        /// Viewport width in pixels.
        width: u32,
    },
}

impl BurstPattern {
    /// Human-readable pattern name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SwipeStorm { .. } => "swipe_storm",
            Self::KeyboardStorm { .. } => "keyboard_storm",
            Self::MixedBurst { .. } => "mixed_burst",
            Self::AbandonedDrags { .. } => "abandoned_drags",
        }
    }

    /// Parse a pattern name with the given size parameters.
    #[must_use]
    pub fn from_name(name: &str, count: usize, width: u32) -> Option<Self> {
        match name {
            "swipe_storm" => Some(Self::SwipeStorm { count, width }),
            "keyboard_storm" => Some(Self::KeyboardStorm { count }),
            "mixed_burst" => Some(Self::MixedBurst { count, width }),
            "abandoned_drags" => Some(Self::AbandonedDrags { count, width }),
            _ => None,
        }
    }
}

/// Storm generation parameters.
#[derive(Debug, Clone)]
pub struct InputStormConfig {
    /// Pattern to generate.
    pub pattern: BurstPattern,
    /// Random seed for deterministic generation.
    pub seed: u64,
}

impl InputStormConfig {
    /// Create a new config with the given pattern and seed.
    #[must_use]
    pub fn new(pattern: BurstPattern, seed: u64) -> Self {
        Self { pattern, seed }
    }
}

// ============================================================================
// Event Generation
// ============================================================================

/// Simple deterministic PRNG (xorshift64) for reproducible event sequences.
struct Rng {
    state: u64,
}

impl Rng {
    fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    fn next(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn below(&mut self, max: u64) -> u64 {
        if max == 0 {
            return 0;
        }
        self.next() % max
    }

    fn coord(&mut self, width: u32) -> f64 {
        self.below(u64::from(width.max(1))) as f64
    }

    fn key(&mut self) -> KeyEvent {
        let code = match self.below(7) {
            0 => KeyCode::Left,
            1 => KeyCode::Right,
            2 => KeyCode::Up,
            3 => KeyCode::Down,
            4 => KeyCode::Home,
            5 => KeyCode::End,
            _ => KeyCode::Other,
        };
        let kind = match self.below(6) {
            0 => KeyEventKind::Release,
            1 => KeyEventKind::Repeat,
            _ => KeyEventKind::Press,
        };
        KeyEvent::new(code).with_kind(kind)
    }
}

/// An event with its offset from the start of the storm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimedEvent {
    /// Milliseconds since the storm started.
    pub at_ms: u64,
    /// The event.
    pub event: CarouselEvent,
}

/// Generated storm result with events and metadata.
#[derive(Debug, Clone)]
pub struct InputStorm {
    /// The generated events in order.
    pub events: Vec<TimedEvent>,
    /// Pattern name for logging.
    pub pattern_name: &'static str,
    /// Seed used for generation.
    pub seed: u64,
}

/// Generate a deterministic input storm from config.
#[must_use]
pub fn generate_storm(config: &InputStormConfig) -> InputStorm {
    let mut rng = Rng::new(config.seed);
    let mut timeline = Timeline::default();
    match config.pattern {
        BurstPattern::SwipeStorm { count, width } => {
            for _ in 0..count {
                push_swipe(&mut timeline, &mut rng, width);
            }
        }
        BurstPattern::KeyboardStorm { count } => {
            for _ in 0..count {
                timeline.push(rng.below(40), CarouselEvent::Key(rng.key()));
            }
        }
        BurstPattern::MixedBurst { count, width } => {
            for _ in 0..count {
                let event = mixed_event(&mut rng, width);
                timeline.push(rng.below(250), event);
            }
        }
        BurstPattern::AbandonedDrags { count, width } => {
            for _ in 0..count {
                timeline.push(rng.below(100), CarouselEvent::PointerDown { x: rng.coord(width) });
                for _ in 0..rng.below(4) {
                    timeline.push(16, CarouselEvent::PointerMove { x: rng.coord(width) });
                }
                let end = match rng.below(3) {
                    0 => CarouselEvent::PointerLeave,
                    1 => CarouselEvent::PointerCancel,
                    _ => CarouselEvent::Focus(false),
                };
                timeline.push(16, end);
            }
        }
    }

    InputStorm {
        events: timeline.events,
        pattern_name: config.pattern.name(),
        seed: config.seed,
    }
}

#[derive(Default)]
struct Timeline {
    now_ms: u64,
    events: Vec<TimedEvent>,
}

impl Timeline {
    fn push(&mut self, gap_ms: u64, event: CarouselEvent) {
        self.now_ms += gap_ms;
        self.events.push(TimedEvent {
            at_ms: self.now_ms,
            event,
        });
    }
}

fn push_swipe(timeline: &mut Timeline, rng: &mut Rng, width: u32) {
    let start = rng.coord(width);
    timeline.push(rng.below(300), CarouselEvent::PointerDown { x: start });
    let mut x = start;
    let moves = 1 + rng.below(6);
    for _ in 0..moves {
        let step = rng.below(60) as f64 - 30.0;
        x = (x + step).clamp(0.0, f64::from(width));
        timeline.push(16, CarouselEvent::PointerMove { x });
    }
    timeline.push(16, CarouselEvent::PointerUp { x });
    if rng.below(2) == 0 {
        timeline.push(1, CarouselEvent::Click);
    }
}

fn mixed_event(rng: &mut Rng, width: u32) -> CarouselEvent {
    match rng.below(12) {
        0 => CarouselEvent::PointerDown { x: rng.coord(width) },
        1 | 2 => CarouselEvent::PointerMove { x: rng.coord(width) },
        3 => CarouselEvent::PointerUp { x: rng.coord(width) },
        4 => CarouselEvent::PointerEnter,
        5 => CarouselEvent::PointerLeave,
        6 => CarouselEvent::Click,
        7 => CarouselEvent::Key(rng.key()),
        8 => CarouselEvent::Select(rng.below(32) as usize),
        9 => CarouselEvent::Resize {
            width: rng.coord(width.saturating_mul(2)),
        },
        10 => CarouselEvent::PointerCancel,
        _ => CarouselEvent::Tick,
    }
}

// ============================================================================
// Replay
// ============================================================================

/// Outcome of replaying a storm.
#[derive(Debug, Clone)]
pub struct StormReport {
    /// Events fed to the carousel.
    pub events_processed: usize,
    /// Events that settled the carousel on an index.
    pub navigations: usize,
    /// Invariant violations, one message each. Empty on success.
    pub violations: Vec<String>,
    /// Active index after the last event.
    pub final_index: usize,
    /// JSONL evidence.
    pub log_lines: Vec<String>,
}

impl StormReport {
    /// Whether every invariant held.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Replay `storm` through a fresh carousel over `items` items.
///
/// `log_every` controls how often `storm_inject` lines are written (every
/// n-th event plus the last one); `0` logs only start and completion.
#[must_use]
pub fn run_storm(
    storm: &InputStorm,
    items: usize,
    config: CarouselConfig,
    viewport_width: f64,
    log_every: usize,
) -> StormReport {
    let start = Instant::now();
    let mut carousel = Carousel::new(
        0..items,
        config,
        RecordingPresenter::new(),
        viewport_width,
        start,
    );
    let mut log_lines = vec![
        json!({
            "event": "storm_start",
            "pattern": storm.pattern_name,
            "seed": storm.seed,
            "event_count": storm.events.len(),
            "items": items,
        })
        .to_string(),
    ];
    let mut violations = Vec::new();
    let mut navigations = 0;

    for (idx, timed) in storm.events.iter().enumerate() {
        let now = start + Duration::from_millis(timed.at_ms);
        let handled = carousel.handle(&timed.event, now);
        if handled.navigated().is_some() {
            navigations += 1;
        }
        check_invariants(&carousel, &timed.event, handled, idx, &mut violations);

        let is_last = idx + 1 == storm.events.len();
        if log_every > 0 && (idx % log_every == 0 || is_last) {
            log_lines.push(
                json!({
                    "event": "storm_inject",
                    "idx": idx,
                    "event_type": timed.event.name(),
                    "at_ms": timed.at_ms,
                    "active": carousel.active_index(),
                })
                .to_string(),
            );
        }
    }

    let final_index = carousel.active_index();
    log_lines.push(
        json!({
            "event": "storm_complete",
            "events_processed": storm.events.len(),
            "navigations": navigations,
            "violations": violations.len(),
            "final_index": final_index,
        })
        .to_string(),
    );

    StormReport {
        events_processed: storm.events.len(),
        navigations,
        violations,
        final_index,
        log_lines,
    }
}

fn check_invariants(
    carousel: &Carousel<usize, RecordingPresenter>,
    event: &CarouselEvent,
    handled: Handled,
    idx: usize,
    violations: &mut Vec<String>,
) {
    if carousel.is_inert() {
        if !carousel.presenter().is_empty() {
            violations.push(format!("#{idx}: inert carousel touched the presenter"));
        }
        return;
    }

    let active = carousel.active_index();
    if active >= carousel.len() {
        violations.push(format!(
            "#{idx}: active index {active} out of range (len {})",
            carousel.len()
        ));
    }

    if let Some(settled) = handled.navigated() {
        if settled != active {
            violations.push(format!(
                "#{idx}: reported index {settled} but active is {active}"
            ));
        }
        if carousel.presenter().highlighted() != Some(active) {
            violations.push(format!(
                "#{idx}: strip highlights {:?} but active is {active}",
                carousel.presenter().highlighted()
            ));
        }
    }

    let ends_drag = matches!(
        event,
        CarouselEvent::PointerUp { .. }
            | CarouselEvent::PointerCancel
            | CarouselEvent::PointerLeave
            | CarouselEvent::Focus(false)
    );
    if ends_drag && carousel.is_dragging() {
        violations.push(format!(
            "#{idx}: drag still active after {}",
            event.name()
        ));
    }

    if !carousel.is_dragging() {
        let expected = -(active as f64);
        let offset = carousel.presenter().offset_items();
        if (offset - expected).abs() > f64::EPSILON {
            violations.push(format!(
                "#{idx}: idle track at {offset} but active is {active}"
            ));
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
