//! Generated level themes, game concepts and marketing copy.
//!
//! The hosted text model is an unreliable collaborator: every call may fail, and level
//! loading always degrades to a fixed default level so the board can be built.

pub mod gemini;
pub mod worker;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::components::{Palette, PaletteError, Rgb};
use crate::game::{PALETTE_SIZE, SMALL_GRID_SIZE, grid_size_for_level};

pub use self::gemini::GeminiClient;
pub use self::worker::{ContentJob, ContentPayload, ContentResponse, ContentWorker};

pub const FALLBACK_THEME: &str = "Базовый уровень";
pub const FALLBACK_COLORS: [&str; PALETTE_SIZE] = ["#6366f1", "#8b5cf6", "#ec4899", "#f43f5e"];
pub const FALLBACK_FUN_FACT: &str = "Вы отлично справляетесь!";
pub const FALLBACK_PALETTE: Palette = Palette::new([
    Rgb::new(0x63, 0x66, 0xf1),
    Rgb::new(0x8b, 0x5c, 0xf6),
    Rgb::new(0xec, 0x48, 0x99),
    Rgb::new(0xf4, 0x3f, 0x5e),
]);

pub const TOPIC_SUGGESTIONS: [&str; 4] = [
    "Подводная пекарня",
    "Сонные коты",
    "Неоновая геометрия",
    "Уборка в лесу",
];

const MOODBOARD_PALETTES: [[&str; PALETTE_SIZE]; 3] = [
    ["#FFD166", "#06D6A0", "#118AB2", "#EF476F"],
    ["#8EECF5", "#90DBF4", "#A3C4F3", "#CFBAF0"],
    ["#FF99C8", "#FCF6BD", "#D0F4DE", "#A9DEF9"],
];

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("content service returned status {0}")]
    Status(u16),

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed content: {0}")]
    Malformed(String),

    #[error("no API key found in ${0}")]
    MissingApiKey(String),

    #[error("content generation is offline")]
    Offline,

    #[error("content worker has stopped")]
    WorkerGone,
}

impl From<PaletteError> for ContentError {
    fn from(err: PaletteError) -> Self {
        ContentError::Malformed(err.to_string())
    }
}

/// Theme payload for one level, as produced by the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelTheme {
    pub theme: String,
    pub colors: Vec<String>,
    pub fun_fact: String,
}

impl LevelTheme {
    pub fn validate(&self) -> Result<Palette, ContentError> {
        if self.theme.trim().is_empty() {
            return Err(ContentError::Malformed("empty theme".to_string()));
        }
        Ok(Palette::from_hex(&self.colors)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelData {
    pub id: u32,
    pub theme: String,
    pub colors: Vec<String>,
    pub fun_fact: String,
    pub grid_size: usize,
}

impl LevelData {
    /// Attaches the locally derived grid size to a provider theme.
    #[must_use]
    pub fn from_theme(level: u32, theme: LevelTheme) -> Self {
        Self {
            id: level,
            theme: theme.theme,
            colors: theme.colors,
            fun_fact: theme.fun_fact,
            grid_size: grid_size_for_level(level),
        }
    }

    #[must_use]
    pub fn palette(&self) -> Palette {
        Palette::from_hex(&self.colors).unwrap_or(FALLBACK_PALETTE)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConcept {
    pub title: String,
    pub tagline: String,
    pub fun_factor: String,
    pub core_mechanic: String,
    pub visual_style: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingData {
    pub headline: String,
    pub social_post: String,
    pub target_audience: String,
    pub monetization_strategy: String,
}

pub trait ContentProvider: Send + Sync {
    fn level_theme(&self, level: u32) -> Result<LevelTheme, ContentError>;
    fn concept(&self, topic: &str) -> Result<GameConcept, ContentError>;
    fn marketing_strategy(&self, concept: &GameConcept) -> Result<MarketingData, ContentError>;
}

/// A provider that never reaches the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineProvider;

impl ContentProvider for OfflineProvider {
    fn level_theme(&self, _level: u32) -> Result<LevelTheme, ContentError> {
        Err(ContentError::Offline)
    }

    fn concept(&self, _topic: &str) -> Result<GameConcept, ContentError> {
        Err(ContentError::Offline)
    }

    fn marketing_strategy(&self, _concept: &GameConcept) -> Result<MarketingData, ContentError> {
        Err(ContentError::Offline)
    }
}

#[must_use]
pub fn fallback_level(level: u32) -> LevelData {
    LevelData {
        id: level,
        theme: FALLBACK_THEME.to_string(),
        colors: FALLBACK_COLORS.iter().map(ToString::to_string).collect(),
        fun_fact: FALLBACK_FUN_FACT.to_string(),
        grid_size: SMALL_GRID_SIZE,
    }
}

/// One attempt at the provider; any failure yields the fallback level.
pub fn load_level(provider: &dyn ContentProvider, level: u32) -> LevelData {
    let theme = provider
        .level_theme(level)
        .and_then(|theme| theme.validate().map(|_| theme));

    match theme {
        Ok(theme) => {
            debug!("Generated theme {:?} for level {level}", theme.theme);
            LevelData::from_theme(level, theme)
        }
        Err(e) => {
            warn!("Level {level} content unavailable, using fallback: {e}");
            fallback_level(level)
        }
    }
}

/// Casual palette suggested for a concept, picked by title length.
#[must_use]
pub fn moodboard_palette(concept: &GameConcept) -> Palette {
    let index = concept.title.chars().count() % MOODBOARD_PALETTES.len();
    Palette::from_hex(&MOODBOARD_PALETTES[index]).unwrap_or(FALLBACK_PALETTE)
}
