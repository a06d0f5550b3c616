#![warn(clippy::all, clippy::pedantic)]

// Board geometry
pub const MIN_GRID_SIZE: usize = 2;
pub const SMALL_GRID_SIZE: usize = 3;
pub const LARGE_GRID_SIZE: usize = 4;
pub const LAST_SMALL_GRID_LEVEL: u32 = 2; // Levels up to this one use the 3x3 grid
pub const PALETTE_SIZE: usize = 4;

// Interaction timing (seconds)
pub const SETTLE_DELAY: f32 = 0.3; // Tile clicks are blocked while a swap settles
pub const PURCHASE_DELAY: f32 = 1.0; // Simulated payment processing time
pub const NOTICE_DURATION: f32 = 3.0;

// Hints fix at most this many misplaced tiles per use
pub const HINT_TILE_LIMIT: usize = 3;

// Prices in PZZLS
pub const COST_HINT: i64 = 2_500;
pub const COST_SKIP: i64 = 5_000;
pub const COST_PREMIUM_DISCOUNT: i64 = 100_000;

// Level rewards
pub const POINTS_PER_LEVEL: u64 = 100; // Multiplied by the level number
pub const BASE_LEVEL_REWARD: i64 = 150;
pub const LEVEL_REWARD_STEP: i64 = 10; // Extra PZZLS per level number
pub const STARTING_LEVEL: u32 = 1;

// Leaderboard
pub const LEADERBOARD_SIZE: usize = 100;

// Transaction ids are short base-36 tokens
pub const TRANSACTION_ID_LEN: usize = 9;

/// Grid side length for a level. Early levels are easier.
#[must_use]
pub fn grid_size_for_level(level: u32) -> usize {
    if level <= LAST_SMALL_GRID_LEVEL {
        SMALL_GRID_SIZE
    } else {
        LARGE_GRID_SIZE
    }
}

/// Score awarded for solving `level`.
#[must_use]
pub fn level_points(level: u32) -> u64 {
    u64::from(level) * POINTS_PER_LEVEL
}

/// PZZLS awarded for solving `level`.
#[must_use]
pub fn level_pzzls(level: u32) -> i64 {
    BASE_LEVEL_REWARD + i64::from(level) * LEVEL_REWARD_STEP
}
