// Forbid unsafe in production; deny (with targeted allows) in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: navigation, gesture, and autoplay engine for Glide carousels.
//!
//! # Role in Glide
//! `glide-core` owns every piece of carousel state that has edge-case policy:
//! the active index, in-progress swipes, and the auto-advance timer. It knows
//! nothing about markup or pixels beyond pointer coordinates; all visual work
//! happens behind the [`Presenter`](presentation::Presenter) trait.
//!
//! # Primary responsibilities
//! - **Navigator**: clamp or loop resolution of every index request.
//! - **DragTracker**: pointer samples to commit/snap-back decisions.
//! - **Autoplay**: a single repeating deadline, suspended by holds.
//! - **Carousel**: event routing and the single write path to the presenter.
//!
//! # Threading
//! Everything is single-threaded and synchronous. Hosts feed events in arrival
//! order and poll autoplay from their own tick; nothing here spawns or blocks.
//!
//! # Example
//!
//! ```
//! use glide_core::carousel::Carousel;
//! use glide_core::config::CarouselConfig;
//! use glide_core::event::CarouselEvent;
//! use glide_core::presentation::Presenter;
//! use glide_core::Instant;
//!
//! #[derive(Default)]
//! struct Track { offset: f64, selected: usize }
//!
//! impl Presenter for Track {
//!     fn apply_position(&mut self, offset_items: f64, _animate: bool) {
//!         self.offset = offset_items;
//!     }
//!     fn highlight_active(&mut self, index: usize) {
//!         self.selected = index;
//!     }
//! }
//!
//! let now = Instant::now();
//! let mut carousel = Carousel::new(
//!     ["a.jpg", "b.jpg", "c.jpg", "d.jpg"],
//!     CarouselConfig::default(),
//!     Track::default(),
//!     400.0,
//!     now,
//! );
//! carousel.goto(2, false);
//!
//! // Swipe left by 60px: past the 50px threshold, so it commits.
//! carousel.handle(&CarouselEvent::PointerDown { x: 100.0 }, now);
//! carousel.handle(&CarouselEvent::PointerMove { x: 40.0 }, now);
//! carousel.handle(&CarouselEvent::PointerUp { x: 40.0 }, now);
//!
//! assert_eq!(carousel.active_index(), 3);
//! assert_eq!(carousel.presenter().selected, 3);
//! assert_eq!(carousel.presenter().offset, -3.0);
//! ```

pub mod autoplay;
pub mod carousel;
pub mod config;
pub mod event;
pub mod gesture;
pub mod item;
pub mod navigation;
pub mod presentation;

pub use autoplay::{Autoplay, Hold};
pub use carousel::{AutoplayState, Carousel, CarouselStatus, Handled};
pub use config::{CarouselConfig, ConfigError};
pub use event::{CarouselEvent, KeyCode, KeyEvent, KeyEventKind};
pub use gesture::{DragConfig, DragDecision, DragOutcome, DragSession, DragTracker};
pub use item::{Item, ItemIndex};
pub use navigation::{NavigationMode, Navigator, Step};
pub use presentation::{Instruction, Presenter};

/// Monotonic clock used for autoplay deadlines (`std::time::Instant` on
/// native targets, `performance.now()` on wasm).
pub use web_time::Instant;
