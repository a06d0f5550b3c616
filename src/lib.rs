pub mod app;
pub mod cli_options;
pub mod components;
pub mod config;
pub mod content;
pub mod game;
pub mod leaderboard;
pub mod menu;
pub mod menu_types;
pub mod progression;
pub mod shop;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::{Duration, Instant};

/// Wall-clock time between game ticks.
#[derive(Resource, Debug, Clone)]
pub struct Time {
    delta: Duration,
    last_update: Instant,
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        Self {
            delta: Duration::default(),
            last_update: Instant::now(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_update);
        self.last_update = now;
    }

    #[must_use]
    pub fn delta_seconds(&self) -> f32 {
        self.delta.as_secs_f32()
    }
}
