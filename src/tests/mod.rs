#![warn(clippy::all, clippy::pedantic)]

// Test modules
pub mod app_tests;
pub mod game_tests;
pub mod leaderboard_tests;
pub mod time_tests;
pub mod ui_tests;
