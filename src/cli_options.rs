//! Command-line options.
//!
//! ```text
//! $ aipuzzle --offline --seed 42 --level 3
//! ```

use clap::Parser;
use std::path::PathBuf;

use crate::config::loader::CONFIG_ENV_VAR;
use crate::game::STARTING_LEVEL;

/// Tile-swap puzzle with generated level themes.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(about, long_about = None, version)]
pub struct Args {
    /// Seed for board shuffles, for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Never call the content service; every level uses the default theme
    #[arg(long, default_value_t = false)]
    pub offline: bool,

    /// Level to start at once the intro screens are done
    #[arg(long, default_value_t = STARTING_LEVEL, value_parser = clap::value_parser!(u32).range(1..))]
    pub level: u32,

    /// Enable debug messages in the log file
    #[arg(short, long, default_value_t = false)]
    pub debug: bool,

    /// Configuration file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Args {
    /// Log filter used when `RUST_LOG` is not set.
    #[must_use]
    pub fn default_log_filter(&self) -> &'static str {
        if self.debug { "debug" } else { "info" }
    }

    /// Points the config loader at `--config`, if given.
    ///
    /// Must run before any other thread is started.
    pub fn apply_config_override(&self) {
        if let Some(path) = &self.config {
            unsafe {
                std::env::set_var(CONFIG_ENV_VAR, path);
            }
        }
    }

    #[must_use]
    pub fn rng(&self) -> fastrand::Rng {
        self.seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed)
    }
}

#[must_use]
pub fn parse() -> Args {
    Args::parse()
}
