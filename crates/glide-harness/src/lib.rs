#![forbid(unsafe_code)]

//! Test harness for Glide carousels.
//!
//! - [`recording::RecordingPresenter`] captures every presenter call for
//!   assertions.
//! - [`input_storm`] generates deterministic event storms and replays them
//!   through a real carousel, checking invariants after every event.
//! - [`cli`] backs the `glide-replay` binary.

pub mod cli;
pub mod error;
pub mod input_storm;
pub mod recording;

pub use cli::run_from_env;
pub use error::{HarnessError, Result};
pub use input_storm::{
    BurstPattern, InputStorm, InputStormConfig, StormReport, TimedEvent, generate_storm, run_storm,
};
pub use recording::{PresenterCall, RecordingPresenter};

/// Install a `tracing` subscriber filtered by `GLIDE_LOG` (default `warn`).
///
/// Logs go to stderr so JSONL on stdout stays machine-readable. Safe to call
/// more than once; later calls are no-ops.
pub fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_env("GLIDE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
