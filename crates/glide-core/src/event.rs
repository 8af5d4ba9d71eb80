#![forbid(unsafe_code)]

//! Input events understood by a carousel.
//!
//! Hosts translate their native input (DOM pointer events, terminal mouse
//! reports, winit events) into [`CarouselEvent`] and feed them to
//! [`Carousel::handle`](crate::carousel::Carousel::handle) in arrival order.
//!
//! Pointer positions are horizontal pixel coordinates in any fixed frame;
//! only differences between samples matter.

/// Keys the carousel reacts to. Anything else maps to [`KeyCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Other,
}

/// Whether a key went down, repeated, or came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    #[default]
    Press,
    Repeat,
    Release,
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// A key press.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            kind: KeyEventKind::Press,
        }
    }

    /// Same key with a specific kind.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether this is a press or auto-repeat (not a release).
    #[must_use]
    pub const fn is_press(&self) -> bool {
        !matches!(self.kind, KeyEventKind::Release)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Canonical carousel input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselEvent {
    /// Primary button or touch went down over the viewport.
    PointerDown { x: f64 },
    /// Pointer moved (with or without a button held).
    PointerMove { x: f64 },
    /// Primary button or touch released.
    PointerUp { x: f64 },
    /// The platform aborted the pointer stream (e.g. `pointercancel`).
    PointerCancel,
    /// Pointer entered the viewport.
    PointerEnter,
    /// Pointer left the viewport.
    PointerLeave,
    /// A click landed on the viewport.
    Click,
    /// Keyboard input while the carousel has focus.
    Key(KeyEvent),
    /// Focus gained (`true`) or lost (`false`).
    Focus(bool),
    /// The viewport changed width.
    Resize { width: f64 },
    /// A navigation-strip entry was chosen.
    Select(usize),
    /// Periodic host tick; drives autoplay.
    Tick,
}

impl CarouselEvent {
    /// Short stable name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PointerDown { .. } => "pointer_down",
            Self::PointerMove { .. } => "pointer_move",
            Self::PointerUp { .. } => "pointer_up",
            Self::PointerCancel => "pointer_cancel",
            Self::PointerEnter => "pointer_enter",
            Self::PointerLeave => "pointer_leave",
            Self::Click => "click",
            Self::Key(_) => "key",
            Self::Focus(_) => "focus",
            Self::Resize { .. } => "resize",
            Self::Select(_) => "select",
            Self::Tick => "tick",
        }
    }
}

impl From<KeyEvent> for CarouselEvent {
    fn from(key: KeyEvent) -> Self {
        Self::Key(key)
    }
}
