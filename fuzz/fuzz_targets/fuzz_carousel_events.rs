#![no_main]

use std::time::Duration;

use arbitrary::Arbitrary;
use glide_core::Instant;
use glide_core::carousel::Carousel;
use glide_core::config::CarouselConfig;
use glide_core::event::{CarouselEvent, KeyCode, KeyEvent, KeyEventKind};
use glide_core::navigation::NavigationMode;
use glide_harness::RecordingPresenter;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Input {
    Down(f64),
    Move(f64),
    Up(f64),
    Cancel,
    Enter,
    Leave,
    Click,
    Key(u8, u8),
    Focus(bool),
    Resize(f64),
    Select(u16),
    Tick,
    Pause,
    Resume,
    Goto(i16),
}

#[derive(Debug, Arbitrary)]
struct Session {
    items: u8,
    looped: bool,
    autoplay_ms: u16,
    threshold: u16,
    swipe: bool,
    inputs: Vec<(u16, Input)>,
}

fn key(code: u8, kind: u8) -> KeyEvent {
    let code = match code % 7 {
        0 => KeyCode::Left,
        1 => KeyCode::Right,
        2 => KeyCode::Up,
        3 => KeyCode::Down,
        4 => KeyCode::Home,
        5 => KeyCode::End,
        _ => KeyCode::Other,
    };
    let kind = match kind % 3 {
        0 => KeyEventKind::Press,
        1 => KeyEventKind::Repeat,
        _ => KeyEventKind::Release,
    };
    KeyEvent::new(code).with_kind(kind)
}

fuzz_target!(|session: Session| {
    let len = usize::from(session.items % 16);
    let mode = if session.looped {
        NavigationMode::Loop
    } else {
        NavigationMode::Clamp
    };
    // Threshold 0 and interval 0 go through config validation.
    let config = CarouselConfig {
        mode,
        autoplay_interval_ms: Some(u64::from(session.autoplay_ms)),
        swipe_enabled: session.swipe,
        commit_threshold_px: u32::from(session.threshold),
        ..CarouselConfig::default()
    };

    let start = Instant::now();
    let mut now = start;
    let mut c = Carousel::new(0..len, config, RecordingPresenter::new(), 400.0, now);

    for (gap_ms, input) in session.inputs.into_iter().take(512) {
        now += Duration::from_millis(u64::from(gap_ms));
        let event = match input {
            Input::Down(x) => CarouselEvent::PointerDown { x },
            Input::Move(x) => CarouselEvent::PointerMove { x },
            Input::Up(x) => CarouselEvent::PointerUp { x },
            Input::Cancel => CarouselEvent::PointerCancel,
            Input::Enter => CarouselEvent::PointerEnter,
            Input::Leave => CarouselEvent::PointerLeave,
            Input::Click => CarouselEvent::Click,
            Input::Key(code, kind) => CarouselEvent::Key(key(code, kind)),
            Input::Focus(focused) => CarouselEvent::Focus(focused),
            Input::Resize(width) => CarouselEvent::Resize { width },
            Input::Select(index) => CarouselEvent::Select(usize::from(index)),
            Input::Tick => CarouselEvent::Tick,
            Input::Pause => {
                c.pause(now);
                continue;
            }
            Input::Resume => {
                c.resume(now);
                continue;
            }
            Input::Goto(index) => {
                c.goto(isize::from(index), true);
                continue;
            }
        };
        let handled = c.handle(&event, now);

        if len == 0 {
            assert!(c.presenter().is_empty(), "inert carousel emitted");
            continue;
        }
        assert!(c.active_index() < len, "active index out of range");
        if let Some(index) = handled.navigated() {
            assert_eq!(index, c.active_index());
            assert_eq!(c.presenter().highlighted(), Some(index));
        }
        assert!(
            c.presenter().offset_items().is_finite(),
            "non-finite track offset"
        );
    }

    let presenter = c.teardown();
    if len > 0 {
        assert!(presenter.highlighted().is_some_and(|i| i < len));
    }
});
