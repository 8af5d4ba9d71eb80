#![forbid(unsafe_code)]

//! Carousel configuration.
//!
//! [`CarouselConfig`] is read once, at construction. Every field has a default,
//! so a partial TOML/JSON file (feature `config-file`) or a partial environment
//! only overrides what it names.
//!
//! ```toml
//! # glide.toml
//! mode = "loop"
//! autoplay_interval_ms = 4000
//! commit_threshold_px = 60
//! ```
//!
//! # Environment Variables
//!
//! ```bash
//! export GLIDE_MODE=loop                 # clamp | loop
//! export GLIDE_AUTOPLAY_MS=4000          # 0 or "off" disables
//! export GLIDE_SWIPE=0                   # 1/true/0/false
//! export GLIDE_CLICK_ADVANCES=true
//! export GLIDE_KEYBOARD=true
//! export GLIDE_COMMIT_THRESHOLD_PX=60
//! ```

#[cfg(feature = "config-file")]
use std::path::Path;
use std::time::Duration;

#[cfg(feature = "config-file")]
use serde::{Deserialize, Serialize};

use crate::gesture::DragConfig;
use crate::navigation::NavigationMode;

/// Default commit threshold in pixels.
pub const DEFAULT_COMMIT_THRESHOLD_PX: u32 = 50;
/// Default click slop in pixels.
pub const DEFAULT_CLICK_SLOP_PX: u32 = 5;
/// Largest accepted commit threshold.
pub const MAX_COMMIT_THRESHOLD_PX: u32 = 10_000;

/// Construction-time options for a carousel.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config-file", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config-file", serde(default))]
pub struct CarouselConfig {
    /// Clamp at the ends or wrap around. Default: clamp.
    pub mode: NavigationMode,
    /// Auto-advance period in milliseconds; `None` disables. Default: disabled.
    pub autoplay_interval_ms: Option<u64>,
    /// Whether pointer drags navigate. Default: true.
    pub swipe_enabled: bool,
    /// Whether a click on the viewport advances. Default: true.
    pub click_advances: bool,
    /// Whether arrow/Home/End keys navigate. Default: true.
    pub keyboard_enabled: bool,
    /// Minimum drag distance for a swipe to commit. Default: 50px.
    pub commit_threshold_px: u32,
    /// Pointer travel beyond which a press no longer counts as a click.
    /// Default: 5px.
    pub click_slop_px: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            mode: NavigationMode::Clamp,
            autoplay_interval_ms: None,
            swipe_enabled: true,
            click_advances: true,
            keyboard_enabled: true,
            commit_threshold_px: DEFAULT_COMMIT_THRESHOLD_PX,
            click_slop_px: DEFAULT_CLICK_SLOP_PX,
        }
    }
}

impl CarouselConfig {
    /// Set the navigation mode.
    #[must_use]
    pub fn with_mode(mut self, mode: NavigationMode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable autoplay with the given period.
    #[must_use]
    pub fn with_autoplay(mut self, interval: Duration) -> Self {
        self.autoplay_interval_ms = Some(interval.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    /// Disable autoplay.
    #[must_use]
    pub fn without_autoplay(mut self) -> Self {
        self.autoplay_interval_ms = None;
        self
    }

    /// Enable or disable swipe navigation.
    #[must_use]
    pub fn with_swipe(mut self, enabled: bool) -> Self {
        self.swipe_enabled = enabled;
        self
    }

    /// Enable or disable click-to-advance.
    #[must_use]
    pub fn with_click_advances(mut self, enabled: bool) -> Self {
        self.click_advances = enabled;
        self
    }

    /// Enable or disable keyboard navigation.
    #[must_use]
    pub fn with_keyboard(mut self, enabled: bool) -> Self {
        self.keyboard_enabled = enabled;
        self
    }

    /// Set the swipe commit threshold.
    #[must_use]
    pub fn with_commit_threshold_px(mut self, px: u32) -> Self {
        self.commit_threshold_px = px;
        self
    }

    /// Set the click slop.
    #[must_use]
    pub fn with_click_slop_px(mut self, px: u32) -> Self {
        self.click_slop_px = px;
        self
    }

    /// Autoplay period, if enabled and non-zero.
    #[must_use]
    pub fn autoplay_interval(&self) -> Option<Duration> {
        self.autoplay_interval_ms
            .filter(|&ms| ms > 0)
            .map(Duration::from_millis)
    }

    /// Gesture thresholds derived from this config.
    #[must_use]
    pub fn drag_config(&self) -> DragConfig {
        DragConfig {
            commit_threshold_px: f64::from(self.commit_threshold_px),
            click_slop_px: f64::from(self.click_slop_px),
        }
    }

    /// Load from the process environment (see module docs).
    ///
    /// Unparsable values are ignored and the result is [`validated`](Self::validated).
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup using the `GLIDE_*` names.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("GLIDE_MODE")
            && let Some(mode) = NavigationMode::from_str_opt(val.trim())
        {
            config.mode = mode;
        }

        if let Some(val) = lookup("GLIDE_AUTOPLAY_MS") {
            let val = val.trim();
            if val.eq_ignore_ascii_case("off") {
                config.autoplay_interval_ms = None;
            } else if let Ok(ms) = val.parse::<u64>() {
                config.autoplay_interval_ms = (ms > 0).then_some(ms);
            }
        }

        if let Some(enabled) = lookup("GLIDE_SWIPE").as_deref().and_then(parse_flag) {
            config.swipe_enabled = enabled;
        }
        if let Some(enabled) = lookup("GLIDE_CLICK_ADVANCES")
            .as_deref()
            .and_then(parse_flag)
        {
            config.click_advances = enabled;
        }
        if let Some(enabled) = lookup("GLIDE_KEYBOARD").as_deref().and_then(parse_flag) {
            config.keyboard_enabled = enabled;
        }

        if let Some(val) = lookup("GLIDE_COMMIT_THRESHOLD_PX")
            && let Ok(px) = val.trim().parse::<u32>()
        {
            config.commit_threshold_px = px;
        }

        config.validated()
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.autoplay_interval_ms == Some(0) {
            errors.push("autoplay_interval_ms must be > 0 (omit it to disable autoplay)".into());
        }

        if self.commit_threshold_px == 0 {
            errors.push("commit_threshold_px must be > 0".into());
        } else if self.commit_threshold_px > MAX_COMMIT_THRESHOLD_PX {
            errors.push(format!(
                "commit_threshold_px must be <= {MAX_COMMIT_THRESHOLD_PX}, got {}",
                self.commit_threshold_px
            ));
        }

        if self.click_slop_px > self.commit_threshold_px {
            errors.push(format!(
                "click_slop_px ({}) must not exceed commit_threshold_px ({})",
                self.click_slop_px, self.commit_threshold_px
            ));
        }

        errors
    }

    /// Clamp values to safe ranges.
    ///
    /// - `autoplay_interval_ms == Some(0)` becomes `None`
    /// - `commit_threshold_px` is clamped to `1..=MAX_COMMIT_THRESHOLD_PX`
    /// - `click_slop_px` is capped at `commit_threshold_px`
    #[must_use]
    pub fn validated(mut self) -> Self {
        if self.autoplay_interval_ms == Some(0) {
            self.autoplay_interval_ms = None;
        }
        self.commit_threshold_px = self.commit_threshold_px.clamp(1, MAX_COMMIT_THRESHOLD_PX);
        self.click_slop_px = self.click_slop_px.min(self.commit_threshold_px);
        self
    }

    /// Check if values are within valid ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Load from a TOML string.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.checked()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config-file")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.checked()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config-file")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Serialize as a single JSON line.
    #[cfg(feature = "config-file")]
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(ConfigError::Json)
    }

    #[cfg(feature = "config-file")]
    fn checked(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn parse_flag(val: &str) -> Option<bool> {
    let val = val.trim();
    if val == "1" || val.eq_ignore_ascii_case("true") {
        Some(true)
    } else if val == "0" || val.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a carousel configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config-file")]
    Toml(toml::de::Error),
    /// JSON parse or encode error.
    #[cfg(feature = "config-file")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config-file")]
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config-file")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
