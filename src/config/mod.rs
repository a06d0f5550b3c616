pub mod loader;

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

use crate::shop::Currency;

// Global configuration instance with thread-safe access
pub static CONFIG: once_cell::sync::Lazy<Arc<RwLock<Config>>> =
    once_cell::sync::Lazy::new(|| Arc::new(RwLock::new(Config::default())));

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub content: ContentConfig,
    pub game: GameConfig,
    pub ui: UiConfig,
}

// Where level themes and studio copy come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    pub endpoint: String,
    pub model: String,
    pub timeout_secs: u64,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    pub offline: bool,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.5-flash".to_string(),
            timeout_secs: 15,
            api_key_env: "API_KEY".to_string(),
            offline: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub settle_delay_ms: u64,
    pub win_delay_ms: u64,
    pub purchase_delay_ms: u64,
    pub starting_balance: i64,
    pub currency: Currency,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: 300,
            win_delay_ms: 500,
            purchase_delay_ms: 1000,
            starting_balance: 0,
            currency: Currency::Rub,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub fn settle_delay(&self) -> f32 {
        millis_to_seconds(self.settle_delay_ms)
    }

    #[must_use]
    pub fn win_delay(&self) -> f32 {
        millis_to_seconds(self.win_delay_ms)
    }

    #[must_use]
    pub fn purchase_delay(&self) -> f32 {
        millis_to_seconds(self.purchase_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub tick_rate_ms: u64,
    pub game_tick_rate_ms: u64,
    pub show_tile_numbers: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: 33,     // ~30 FPS
            game_tick_rate_ms: 50,
            show_tile_numbers: true,
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn millis_to_seconds(ms: u64) -> f32 {
    ms as f32 / 1000.0
}

/// Snapshot of the active configuration.
#[must_use]
pub fn current() -> Config {
    CONFIG.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Loads the configuration file into [`CONFIG`]. On error the defaults stay active.
pub fn init() -> Result<(), loader::ConfigError> {
    let loaded = loader::load_config_from_file()?;
    *CONFIG.write().unwrap_or_else(PoisonError::into_inner) = loaded;
    Ok(())
}
