use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use glide_core::config::CarouselConfig;
use glide_core::navigation::NavigationMode;

use crate::error::{HarnessError, Result};
use crate::input_storm::{BurstPattern, InputStormConfig, generate_storm, run_storm};

pub const PATTERNS: [&str; 4] = [
    "swipe_storm",
    "keyboard_storm",
    "mixed_burst",
    "abandoned_drags",
];

#[derive(Debug, Parser)]
#[command(
    name = "glide-replay",
    about = "Replay deterministic input storms through a Glide carousel",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a storm, replay it, and emit JSONL evidence.
    Storm(StormArgs),

    /// Print the effective carousel configuration as JSON.
    Config(ConfigArgs),

    /// Print built-in storm pattern names.
    #[command(name = "list-patterns")]
    ListPatterns,
}

#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// TOML or JSON config file (by extension). Defaults to the environment.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the navigation mode (`clamp` or `loop`).
    #[arg(long)]
    pub mode: Option<String>,

    /// Override the autoplay interval in milliseconds (0 disables).
    #[arg(long)]
    pub autoplay_ms: Option<u64>,
}

#[derive(Debug, Clone, Args)]
pub struct StormArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Storm pattern; see `list-patterns`.
    #[arg(long, default_value = "mixed_burst")]
    pub pattern: String,

    /// Number of items in the carousel.
    #[arg(long, default_value_t = 6)]
    pub items: usize,

    /// PRNG seed.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Swipes, key presses, or events, depending on the pattern.
    #[arg(long, default_value_t = 200)]
    pub count: usize,

    /// Viewport width in pixels.
    #[arg(long, default_value_t = 400)]
    pub width: u32,

    /// Log every n-th injected event (0 logs only start and completion).
    #[arg(long, default_value_t = 0)]
    pub log_every: usize,

    /// Write JSONL here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

pub fn run_from_env() -> Result<()> {
    let cli = Cli::parse();
    run(cli)
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Storm(args) => run_storm_command(&args),
        Commands::Config(args) => {
            let config = load_config(&args)?;
            println!("{}", config.to_json()?);
            Ok(())
        }
        Commands::ListPatterns => {
            for name in PATTERNS {
                println!("{name}");
            }
            Ok(())
        }
    }
}

/// Resolve the carousel config: file (or environment), then CLI overrides.
pub fn load_config(args: &ConfigArgs) -> Result<CarouselConfig> {
    let mut config = match &args.config {
        Some(path) => load_config_file(path)?,
        None => CarouselConfig::from_env(),
    };
    if let Some(mode) = &args.mode {
        let mode = NavigationMode::from_str_opt(mode)
            .ok_or_else(|| HarnessError::invalid(format!("unknown mode: {mode}")))?;
        config = config.with_mode(mode);
    }
    match args.autoplay_ms {
        Some(0) => config = config.without_autoplay(),
        Some(ms) => config = config.with_autoplay(Duration::from_millis(ms)),
        None => {}
    }
    Ok(config)
}

fn load_config_file(path: &Path) -> Result<CarouselConfig> {
    if !path.exists() {
        return Err(HarnessError::MissingConfig {
            path: path.to_path_buf(),
        });
    }
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        CarouselConfig::from_json_file(path)?
    } else {
        CarouselConfig::from_toml_file(path)?
    };
    Ok(config)
}

fn run_storm_command(args: &StormArgs) -> Result<()> {
    if args.items == 0 {
        return Err(HarnessError::invalid("--items must be at least 1"));
    }
    let pattern = BurstPattern::from_name(&args.pattern, args.count, args.width).ok_or_else(
        || HarnessError::UnknownPattern {
            name: args.pattern.clone(),
        },
    )?;
    let config = load_config(&args.config)?;
    tracing::info!(
        pattern = %args.pattern,
        seed = args.seed,
        items = args.items,
        mode = config.mode.as_str(),
        "replaying storm"
    );

    let storm = generate_storm(&InputStormConfig::new(pattern, args.seed));
    let report = run_storm(
        &storm,
        args.items,
        config,
        f64::from(args.width),
        args.log_every,
    );

    let mut jsonl = report.log_lines.join("\n");
    jsonl.push('\n');
    match &args.output {
        Some(path) => fs::write(path, jsonl)?,
        None => std::io::stdout().lock().write_all(jsonl.as_bytes())?,
    }

    match report.violations.first() {
        None => Ok(()),
        Some(first) => Err(HarnessError::Violations {
            count: report.violations.len(),
            first: first.clone(),
        }),
    }
}
