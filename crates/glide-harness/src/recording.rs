#![forbid(unsafe_code)]

//! A presenter that records every call for later assertions.

use glide_core::presentation::Presenter;

/// One call made on a [`Presenter`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PresenterCall {
    /// `apply_position(offset_items, animate)`.
    Position { offset_items: f64, animate: bool },
    /// `highlight_active(index)`.
    Highlight(usize),
}

/// Records presenter calls and tracks the resulting visual state.
#[derive(Debug, Clone, Default)]
pub struct RecordingPresenter {
    calls: Vec<PresenterCall>,
    offset_items: f64,
    highlighted: Option<usize>,
}

impl RecordingPresenter {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call, in order.
    #[must_use]
    pub fn calls(&self) -> &[PresenterCall] {
        &self.calls
    }

    /// Calls recorded since `mark` (a previous [`len`](Self::len)).
    #[must_use]
    pub fn calls_since(&self, mark: usize) -> &[PresenterCall] {
        self.calls.get(mark..).unwrap_or(&[])
    }

    /// Number of calls recorded.
    #[must_use]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Current track offset in items.
    #[must_use]
    pub fn offset_items(&self) -> f64 {
        self.offset_items
    }

    /// Currently highlighted strip entry.
    #[must_use]
    pub fn highlighted(&self) -> Option<usize> {
        self.highlighted
    }

    /// The most recent `apply_position` call.
    #[must_use]
    pub fn last_position(&self) -> Option<(f64, bool)> {
        self.calls.iter().rev().find_map(|call| match *call {
            PresenterCall::Position {
                offset_items,
                animate,
            } => Some((offset_items, animate)),
            PresenterCall::Highlight(_) => None,
        })
    }

    /// Forget recorded calls but keep the visual state.
    pub fn clear(&mut self) {
        self.calls.clear();
    }
}

impl Presenter for RecordingPresenter {
    fn apply_position(&mut self, offset_items: f64, animate: bool) {
        self.offset_items = offset_items;
        self.calls.push(PresenterCall::Position {
            offset_items,
            animate,
        });
    }

    fn highlight_active(&mut self, index: usize) {
        self.highlighted = Some(index);
        self.calls.push(PresenterCall::Highlight(index));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_core::presentation::Instruction;

    #[test]
    fn records_settle_as_position_then_highlight() {
        let mut rec = RecordingPresenter::new();
        Instruction::Settle {
            index: 2,
            animate: true,
        }
        .apply(&mut rec);
        assert_eq!(
            rec.calls(),
            &[
                PresenterCall::Position {
                    offset_items: -2.0,
                    animate: true
                },
                PresenterCall::Highlight(2),
            ]
        );
        assert_eq!(rec.highlighted(), Some(2));
        assert_eq!(rec.last_position(), Some((-2.0, true)));
    }

    #[test]
    fn calls_since_mark() {
        let mut rec = RecordingPresenter::new();
        rec.highlight_active(0);
        let mark = rec.len();
        rec.apply_position(-0.5, false);
        assert_eq!(rec.calls_since(mark).len(), 1);
        assert!(rec.calls_since(mark + 10).is_empty());
    }

    #[test]
    fn clear_keeps_visual_state() {
        let mut rec = RecordingPresenter::new();
        rec.apply_position(-1.0, true);
        rec.highlight_active(1);
        rec.clear();
        assert!(rec.is_empty());
        assert_eq!(rec.offset_items(), -1.0);
        assert_eq!(rec.highlighted(), Some(1));
    }
}
