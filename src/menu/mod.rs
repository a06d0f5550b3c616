mod leaderboard;
pub mod onboarding;
pub mod renderer;
mod shop;
mod studio;
pub mod title;

pub use self::renderer::MenuRenderer;
pub use crate::menu_types::{Menu, Screen};
