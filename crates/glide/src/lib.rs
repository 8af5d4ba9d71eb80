#![forbid(unsafe_code)]

//! Glide public facade crate.
//!
//! Re-exports the engine from `glide-core` and adds [`CarouselBuilder`], which
//! gathers items, configuration, and viewport size before handing a presenter
//! over to a [`Carousel`].

#[cfg(feature = "config-file")]
use std::path::Path;

pub mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use glide_core::autoplay::{Autoplay, Hold};
pub use glide_core::carousel::{AutoplayState, Carousel, CarouselStatus, Handled};
pub use glide_core::config::{CarouselConfig, ConfigError};
pub use glide_core::event::{CarouselEvent, KeyCode, KeyEvent, KeyEventKind};
pub use glide_core::gesture::{DragDecision, DragOutcome};
pub use glide_core::item::{Item, ItemIndex};
pub use glide_core::navigation::NavigationMode;
pub use glide_core::presentation::{Instruction, Presenter};
pub use glide_core::Instant;

// --- Builder ---------------------------------------------------------------

/// Step-by-step carousel construction.
///
/// Set [`viewport_width`](Self::viewport_width) unless the host sends a
/// `Resize` before the first drag; without a width the track does not follow
/// the pointer.
///
/// ```
/// use glide::{CarouselBuilder, NavigationMode, Presenter, Instant};
///
/// struct Noop;
/// impl Presenter for Noop {
///     fn apply_position(&mut self, _: f64, _: bool) {}
///     fn highlight_active(&mut self, _: usize) {}
/// }
///
/// let carousel = CarouselBuilder::new(["a", "b", "c"])
///     .mode(NavigationMode::Loop)
///     .viewport_width(640.0)
///     .build(Noop, Instant::now())?;
/// assert_eq!(carousel.len(), 3);
/// # Ok::<(), glide::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct CarouselBuilder<S> {
    items: ItemIndex<S>,
    config: CarouselConfig,
    viewport_width: f64,
    require_items: bool,
    strict: bool,
}

impl<S> CarouselBuilder<S> {
    /// Start from a list of item sources and the default configuration.
    pub fn new(sources: impl IntoIterator<Item = S>) -> Self {
        Self {
            items: ItemIndex::new(sources),
            config: CarouselConfig::default(),
            viewport_width: 0.0,
            require_items: false,
            strict: false,
        }
    }

    /// Replace the configuration wholesale.
    #[must_use]
    pub fn config(mut self, config: CarouselConfig) -> Self {
        self.config = config;
        self
    }

    /// Take the configuration from `GLIDE_*` environment variables.
    #[must_use]
    pub fn config_from_env(mut self) -> Self {
        self.config = CarouselConfig::from_env();
        self
    }

    /// Load the configuration from a TOML file, or JSON when the extension is
    /// `.json`.
    #[cfg(feature = "config-file")]
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        self.config = if is_json {
            CarouselConfig::from_json_file(path)?
        } else {
            CarouselConfig::from_toml_file(path)?
        };
        Ok(self)
    }

    /// Navigation mode.
    #[must_use]
    pub fn mode(mut self, mode: NavigationMode) -> Self {
        self.config = self.config.with_mode(mode);
        self
    }

    /// Auto-advance period.
    #[must_use]
    pub fn autoplay(mut self, interval: std::time::Duration) -> Self {
        self.config = self.config.with_autoplay(interval);
        self
    }

    /// Viewport width in pixels, used to convert drag distance into items.
    ///
    /// Defaults to `0.0`. Until a width is set here or delivered through
    /// [`CarouselEvent::Resize`], drags still commit and snap back by pixel
    /// threshold but the live track stays pinned at the base item.
    #[must_use]
    pub fn viewport_width(mut self, width: f64) -> Self {
        self.viewport_width = width;
        self
    }

    /// Fail with [`Error::NoItems`] instead of building an inert carousel.
    #[must_use]
    pub fn require_items(mut self) -> Self {
        self.require_items = true;
        self
    }

    /// Fail on configuration problems instead of adjusting them.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Bind a presenter and build.
    ///
    /// The carousel settles on item 0 and starts autoplay immediately.
    pub fn build<P: Presenter>(self, presenter: P, now: Instant) -> Result<Carousel<S, P>> {
        if self.require_items && self.items.is_empty() {
            return Err(Error::NoItems);
        }
        if self.strict {
            let problems = self.config.validate();
            if !problems.is_empty() {
                return Err(Error::Config(ConfigError::Validation(problems)));
            }
        }
        Ok(Carousel::from_index(
            self.items,
            self.config,
            presenter,
            self.viewport_width,
            now,
        ))
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Carousel, CarouselBuilder, CarouselConfig, CarouselEvent, Error, Handled, Instant,
        KeyCode, KeyEvent, NavigationMode, Presenter, Result,
    };

    pub use crate::core;
}

pub use glide_core as core;

#[cfg(test)]
mod tests {
    use super::*;
    use glide_harness::RecordingPresenter;

    #[test]
    fn build_settles_on_first_item() {
        let carousel = CarouselBuilder::new(["a", "b"])
            .viewport_width(300.0)
            .build(RecordingPresenter::new(), Instant::now())
            .expect("builds");
        assert_eq!(carousel.active_index(), 0);
        assert_eq!(carousel.presenter().highlighted(), Some(0));
    }

    #[test]
    fn track_waits_for_a_viewport_width() {
        let now = Instant::now();
        let mut carousel = CarouselBuilder::new([1, 2, 3])
            .build(RecordingPresenter::new(), now)
            .expect("builds");
        carousel.handle(&CarouselEvent::PointerDown { x: 200.0 }, now);
        carousel.handle(&CarouselEvent::PointerMove { x: 100.0 }, now);
        assert_eq!(carousel.presenter().last_position(), Some((0.0, false)));

        carousel.handle(&CarouselEvent::Resize { width: 400.0 }, now);
        assert_eq!(carousel.presenter().last_position(), Some((-0.25, false)));
        assert_eq!(
            carousel.handle(&CarouselEvent::PointerUp { x: 100.0 }, now),
            Handled::Navigated(1)
        );
    }

    #[test]
    fn empty_builds_inert_unless_required() {
        let now = Instant::now();
        let carousel = CarouselBuilder::<&str>::new([])
            .build(RecordingPresenter::new(), now)
            .expect("inert carousel");
        assert!(carousel.is_inert());

        let err = CarouselBuilder::<&str>::new([])
            .require_items()
            .build(RecordingPresenter::new(), now)
            .expect_err("empty rejected");
        assert!(matches!(err, Error::NoItems));
    }

    #[test]
    fn strict_rejects_invalid_config() {
        let config = CarouselConfig::default().with_commit_threshold_px(0);
        let err = CarouselBuilder::new([1, 2])
            .config(config.clone())
            .strict()
            .build(RecordingPresenter::new(), Instant::now())
            .expect_err("threshold 0 rejected");
        assert!(err.validation_errors().is_some());

        let carousel = CarouselBuilder::new([1, 2])
            .config(config)
            .build(RecordingPresenter::new(), Instant::now())
            .expect("lenient build adjusts");
        assert!(carousel.config().commit_threshold_px > 0);
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn config_file_by_extension() {
        let dir = tempfile::tempdir().expect("tempdir");
        let toml_path = dir.path().join("glide.toml");
        std::fs::write(&toml_path, "mode = \"loop\"\n").expect("write");
        let builder = CarouselBuilder::new([1, 2, 3])
            .config_file(&toml_path)
            .expect("toml loads");
        let mut carousel = builder
            .build(RecordingPresenter::new(), Instant::now())
            .expect("builds");
        assert_eq!(carousel.retreat(), Some(2));

        let json_path = dir.path().join("glide.json");
        std::fs::write(&json_path, "{\"commit_threshold_px\": 0}").expect("write");
        let err = CarouselBuilder::new([1])
            .config_file(&json_path)
            .expect_err("validation failure");
        assert!(matches!(err, Error::Config(ConfigError::Validation(_))));
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn missing_config_file_is_config_io_error() {
        let err = CarouselBuilder::new([1])
            .config_file("/no/such/glide.toml")
            .expect_err("missing file");
        assert!(matches!(err, Error::Config(ConfigError::Io(_))));
    }
}
