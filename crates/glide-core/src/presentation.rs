#![forbid(unsafe_code)]

//! Presentation boundary.
//!
//! The engine never touches pixels or markup. It produces [`Instruction`]s and
//! hands them to a [`Presenter`] owned by the host, which maps item offsets to
//! a visual transform and keeps the navigation strip highlighted.
//!
//! # Invariants
//!
//! 1. A `Settle` always highlights the index it positions to.
//! 2. `Track` instructions are never animated; they follow the pointer 1:1.

/// Visual side of a carousel.
///
/// Offsets are measured in items: `0.0` shows item 0, `-2.0` shows item 2,
/// `-2.5` is halfway between items 2 and 3.
pub trait Presenter {
    /// Set the horizontal track offset, with or without a transition.
    fn apply_position(&mut self, offset_items: f64, animate: bool);

    /// Mark `index` as selected in the navigation strip and scroll it into view.
    fn highlight_active(&mut self, index: usize);
}

impl<P: Presenter + ?Sized> Presenter for &mut P {
    fn apply_position(&mut self, offset_items: f64, animate: bool) {
        (**self).apply_position(offset_items, animate);
    }

    fn highlight_active(&mut self, index: usize) {
        (**self).highlight_active(index);
    }
}

impl<P: Presenter + ?Sized> Presenter for Box<P> {
    fn apply_position(&mut self, offset_items: f64, animate: bool) {
        (**self).apply_position(offset_items, animate);
    }

    fn highlight_active(&mut self, index: usize) {
        (**self).highlight_active(index);
    }
}

/// A single presentation command produced by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    /// Rest on `index`. Emitted by every navigation, including snap-backs.
    Settle { index: usize, animate: bool },
    /// Live, non-committing track position while a drag is in progress.
    Track { offset_items: f64 },
}

impl Instruction {
    /// Track offset (in items) this instruction positions to.
    #[must_use]
    pub fn offset_items(&self) -> f64 {
        match *self {
            Self::Settle { index, .. } => -(index as f64),
            Self::Track { offset_items } => offset_items,
        }
    }

    /// Whether the presenter should transition to the new offset.
    #[must_use]
    pub fn animate(&self) -> bool {
        match *self {
            Self::Settle { animate, .. } => animate,
            Self::Track { .. } => false,
        }
    }

    /// Forward this instruction to a presenter.
    pub fn apply<P: Presenter + ?Sized>(&self, presenter: &mut P) {
        presenter.apply_position(self.offset_items(), self.animate());
        if let Self::Settle { index, .. } = *self {
            presenter.highlight_active(index);
        }
    }
}
