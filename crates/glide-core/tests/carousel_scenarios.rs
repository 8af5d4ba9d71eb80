//! End-to-end carousel scenarios driven through `Carousel::handle`.
//!
//! Each test replays a concrete interaction and checks both the logical state
//! (active index, drag, autoplay) and the presenter calls it produced.

use std::time::Duration;

use glide_core::Instant;
use glide_core::autoplay::Hold;
use glide_core::carousel::{AutoplayState, Carousel, CarouselStatus, Handled};
use glide_core::config::CarouselConfig;
use glide_core::event::{CarouselEvent, KeyCode, KeyEvent, KeyEventKind};
use glide_core::navigation::NavigationMode;
use glide_harness::{PresenterCall, RecordingPresenter};

const SEC: Duration = Duration::from_secs(1);

fn build(len: usize, config: CarouselConfig) -> (Carousel<usize, RecordingPresenter>, Instant) {
    let now = Instant::now();
    let carousel = Carousel::new(0..len, config, RecordingPresenter::new(), 400.0, now);
    (carousel, now)
}

fn drag(c: &mut Carousel<usize, RecordingPresenter>, from: f64, to: f64, now: Instant) -> Handled {
    c.handle(&CarouselEvent::PointerDown { x: from }, now);
    c.handle(&CarouselEvent::PointerMove { x: to }, now);
    c.handle(&CarouselEvent::PointerUp { x: to }, now)
}

// ============================================================================
// Navigation
// ============================================================================

#[test]
fn loop_mode_wraps_single_step() {
    let (mut c, _) = build(5, CarouselConfig::default().with_mode(NavigationMode::Loop));
    assert_eq!(c.goto(-1, true), Some(4));
    assert_eq!(c.goto(5, true), Some(0));
}

#[test]
fn clamp_mode_pins_edges() {
    let (mut c, _) = build(5, CarouselConfig::default());
    assert_eq!(c.goto(-1, true), Some(0));
    assert_eq!(c.goto(5, true), Some(4));
    for _ in 0..3 {
        assert_eq!(c.advance(), Some(4));
    }
}

#[test]
fn repeated_goto_reemits_identical_instruction() {
    let (mut c, _) = build(4, CarouselConfig::default());
    c.goto(2, true);
    let mark = c.presenter().len();
    c.goto(2, true);
    c.goto(2, true);
    let expected = [
        PresenterCall::Position {
            offset_items: -2.0,
            animate: true,
        },
        PresenterCall::Highlight(2),
    ];
    let calls = c.presenter().calls_since(mark);
    assert_eq!(calls.len(), 4);
    assert_eq!(&calls[..2], &expected);
    assert_eq!(&calls[2..], &expected);
    assert_eq!(c.active_index(), 2);
}

#[test]
fn keyboard_repeat_counts_as_press() {
    let (mut c, now) = build(4, CarouselConfig::default());
    let repeat = KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Repeat);
    assert_eq!(c.handle(&CarouselEvent::Key(repeat), now), Handled::Navigated(1));
    assert_eq!(c.handle(&CarouselEvent::Key(repeat), now), Handled::Navigated(2));
}

// ============================================================================
// Gestures
// ============================================================================

#[test]
fn commit_swipe_from_base_two() {
    let (mut c, now) = build(5, CarouselConfig::default());
    c.goto(2, false);
    assert_eq!(drag(&mut c, 100.0, 40.0, now), Handled::Navigated(3));
    assert_eq!(c.active_index(), 3);
}

#[test]
fn short_swipe_snaps_back() {
    let (mut c, now) = build(5, CarouselConfig::default());
    c.goto(2, false);
    let mark = c.presenter().len();
    assert_eq!(drag(&mut c, 100.0, 70.0, now), Handled::Navigated(2));
    assert_eq!(c.active_index(), 2);
    let calls = c.presenter().calls_since(mark);
    assert_eq!(
        calls.last(),
        Some(&PresenterCall::Highlight(2)),
        "snap-back re-highlights the base"
    );
    assert_eq!(c.presenter().last_position(), Some((-2.0, true)));
}

#[test]
fn threshold_is_inclusive() {
    let (mut c, now) = build(5, CarouselConfig::default());
    assert_eq!(drag(&mut c, 100.0, 50.0, now), Handled::Navigated(1));
    assert_eq!(drag(&mut c, 100.0, 150.0, now), Handled::Navigated(0));
}

#[test]
fn custom_threshold_is_honored() {
    let (mut c, now) = build(5, CarouselConfig::default().with_commit_threshold_px(100));
    assert_eq!(drag(&mut c, 200.0, 120.0, now), Handled::Navigated(0));
    assert_eq!(drag(&mut c, 200.0, 100.0, now), Handled::Navigated(1));
}

#[test]
fn drag_begin_disables_animation_and_tracks_pointer() {
    let (mut c, now) = build(5, CarouselConfig::default());
    c.goto(2, false);
    let mark = c.presenter().len();
    c.handle(&CarouselEvent::PointerDown { x: 200.0 }, now);
    c.handle(&CarouselEvent::PointerMove { x: 100.0 }, now);
    assert_eq!(
        c.presenter().calls_since(mark),
        &[
            PresenterCall::Position {
                offset_items: -2.0,
                animate: false
            },
            PresenterCall::Position {
                offset_items: -2.25,
                animate: false
            },
        ]
    );
    assert_eq!(c.active_index(), 2, "live tracking never moves the index");
}

#[test]
fn stray_update_and_end_are_noops() {
    let (mut c, now) = build(5, CarouselConfig::default());
    let before = c.presenter().len();
    assert!(!c.update_drag(30.0));
    assert_eq!(c.end_drag(now), None);
    assert_eq!(c.presenter().len(), before);
    assert_eq!(c.active_index(), 0);
}

#[test]
fn second_pointer_down_does_not_restart_drag() {
    let (mut c, now) = build(5, CarouselConfig::default());
    c.handle(&CarouselEvent::PointerDown { x: 300.0 }, now);
    assert_eq!(
        c.handle(&CarouselEvent::PointerDown { x: 0.0 }, now),
        Handled::Ignored
    );
    assert_eq!(
        c.handle(&CarouselEvent::PointerUp { x: 200.0 }, now),
        Handled::Navigated(1)
    );
}

#[test]
fn abandoned_drag_never_dangles() {
    for end in [
        CarouselEvent::PointerCancel,
        CarouselEvent::PointerLeave,
        CarouselEvent::Focus(false),
    ] {
        let (mut c, now) = build(5, CarouselConfig::default());
        c.handle(&CarouselEvent::PointerDown { x: 300.0 }, now);
        c.handle(&CarouselEvent::PointerMove { x: 280.0 }, now);
        let handled = c.handle(&end, now);
        assert!(!c.is_dragging(), "{} left the drag open", end.name());
        assert_eq!(handled, Handled::Navigated(0), "{}", end.name());
    }
}

#[test]
fn loop_swipe_wraps_past_the_end() {
    let (mut c, now) = build(3, CarouselConfig::default().with_mode(NavigationMode::Loop));
    c.goto(2, false);
    assert_eq!(drag(&mut c, 300.0, 100.0, now), Handled::Navigated(0));
    assert_eq!(drag(&mut c, 100.0, 300.0, now), Handled::Navigated(2));
}

#[test]
fn select_and_click_wait_for_the_drag() {
    let (mut c, now) = build(6, CarouselConfig::default());
    c.handle(&CarouselEvent::PointerDown { x: 100.0 }, now);
    let mark = c.presenter().len();
    assert_eq!(c.handle(&CarouselEvent::Select(4), now), Handled::Ignored);
    assert_eq!(c.handle(&CarouselEvent::Click, now), Handled::Ignored);
    assert_eq!(c.active_index(), 0);
    assert_eq!(c.presenter().len(), mark, "nothing emitted mid-drag");

    assert_eq!(
        c.handle(&CarouselEvent::PointerUp { x: 90.0 }, now),
        Handled::Navigated(0)
    );
    assert_eq!(c.handle(&CarouselEvent::Select(4), now), Handled::Navigated(4));
}

#[test]
fn abandoned_drag_does_not_swallow_later_click() {
    for end in [
        CarouselEvent::PointerLeave,
        CarouselEvent::PointerCancel,
        CarouselEvent::Focus(false),
    ] {
        let (mut c, now) = build(5, CarouselConfig::default());
        c.handle(&CarouselEvent::PointerDown { x: 100.0 }, now);
        c.handle(&CarouselEvent::PointerMove { x: 0.0 }, now);
        assert_eq!(c.handle(&end, now), Handled::Navigated(1));
        assert_eq!(
            c.handle(&CarouselEvent::Key(KeyEvent::new(KeyCode::Right)), now),
            Handled::Navigated(2)
        );
        assert_eq!(
            c.handle(&CarouselEvent::Click, now),
            Handled::Navigated(3),
            "click after {} was swallowed",
            end.name()
        );
    }
}

#[test]
fn explicit_end_drag_swallows_following_click() {
    let (mut c, now) = build(5, CarouselConfig::default());
    assert!(c.begin_drag(200.0, now));
    assert!(c.update_drag(120.0));
    assert_eq!(c.end_drag(now), Some(1));
    assert_eq!(c.handle(&CarouselEvent::Click, now), Handled::Consumed);
}

#[test]
fn click_after_drag_is_swallowed_once() {
    let (mut c, now) = build(5, CarouselConfig::default());
    drag(&mut c, 100.0, 80.0, now);
    assert_eq!(c.active_index(), 0, "20px drag snaps back");
    assert_eq!(c.handle(&CarouselEvent::Click, now), Handled::Consumed);
    assert_eq!(c.handle(&CarouselEvent::Click, now), Handled::Navigated(1));
}

// ============================================================================
// Autoplay
// ============================================================================

#[test]
fn three_ticks_advance_three_in_loop() {
    let config = CarouselConfig::default()
        .with_mode(NavigationMode::Loop)
        .with_autoplay(SEC);
    let (mut c, start) = build(2, config);
    for i in 1..=3u32 {
        c.handle(&CarouselEvent::Tick, start + SEC * i);
    }
    assert_eq!(c.active_index(), 3 % 2);
}

#[test]
fn pause_blocks_and_resume_never_double_fires() {
    let (mut c, start) = build(6, CarouselConfig::default().with_autoplay(SEC));
    assert_eq!(c.tick(start + SEC), Some(1));

    c.pause(start + SEC);
    assert_eq!(c.tick(start + SEC * 2), None);
    assert_eq!(c.tick(start + SEC * 5), None);

    c.resume(start + SEC * 5);
    // One interval after resume, and only once even if polled late.
    assert_eq!(c.tick(start + SEC * 5 + SEC / 2), None);
    assert_eq!(c.tick(start + SEC * 9), Some(2));
    assert_eq!(c.tick(start + SEC * 9), None);
}

#[test]
fn repeated_pause_resume_keeps_one_schedule() {
    let (mut c, start) = build(20, CarouselConfig::default().with_autoplay(SEC));
    for _ in 0..5 {
        c.pause(start);
        c.resume(start);
        c.resume(start);
    }
    let fires = (1..=10u32)
        .filter(|i| c.tick(start + SEC * *i).is_some())
        .count();
    assert_eq!(fires, 10, "one fire per interval");
    assert_eq!(c.active_index(), 10);
}

#[test]
fn drag_and_hover_hold_independently() {
    let (mut c, start) = build(4, CarouselConfig::default().with_autoplay(SEC));
    c.handle(&CarouselEvent::PointerEnter, start);
    c.handle(&CarouselEvent::PointerDown { x: 100.0 }, start);
    assert_eq!(
        c.status(),
        CarouselStatus::Active {
            index: 0,
            len: 4,
            mode: NavigationMode::Clamp,
            dragging: true,
            autoplay: AutoplayState::Held(Hold::DRAG | Hold::HOVER),
        }
    );
    c.handle(&CarouselEvent::PointerUp { x: 100.0 }, start);
    assert_eq!(c.tick(start + SEC * 3), None, "hover still holds");
    c.handle(&CarouselEvent::PointerLeave, start + SEC * 3);
    assert_eq!(c.tick(start + SEC * 4), Some(1));
}

#[test]
fn stop_and_restart_autoplay() {
    let (mut c, start) = build(4, CarouselConfig::default().with_autoplay(SEC));
    c.stop_autoplay();
    assert_eq!(c.tick(start + SEC * 10), None);
    c.start_autoplay(SEC * 2, start + SEC * 10);
    assert_eq!(c.tick(start + SEC * 11), None);
    assert_eq!(c.tick(start + SEC * 12), Some(1));
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn inert_carousel_ignores_everything() {
    let (mut c, now) = build(0, CarouselConfig::default().with_autoplay(SEC));
    for event in [
        CarouselEvent::PointerDown { x: 0.0 },
        CarouselEvent::PointerUp { x: 100.0 },
        CarouselEvent::Click,
        CarouselEvent::Key(KeyEvent::new(KeyCode::End)),
        CarouselEvent::Select(3),
        CarouselEvent::Resize { width: 800.0 },
        CarouselEvent::Tick,
    ] {
        assert_eq!(c.handle(&event, now + SEC * 5), Handled::Ignored);
    }
    assert!(c.teardown().is_empty());
}

#[test]
fn resize_mid_drag_retracks_at_new_width() {
    let (mut c, now) = build(4, CarouselConfig::default());
    c.goto(1, false);
    c.handle(&CarouselEvent::PointerDown { x: 0.0 }, now);
    c.handle(&CarouselEvent::PointerMove { x: -100.0 }, now);
    assert_eq!(c.presenter().last_position(), Some((-1.25, false)));

    let mark = c.presenter().len();
    assert_eq!(
        c.handle(&CarouselEvent::Resize { width: 200.0 }, now),
        Handled::Consumed
    );
    assert_eq!(
        c.presenter().calls_since(mark),
        &[PresenterCall::Position {
            offset_items: -1.5,
            animate: false
        }]
    );
    assert!(c.is_dragging());
    assert_eq!(c.active_index(), 1);
}
