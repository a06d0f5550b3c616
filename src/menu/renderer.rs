#![warn(clippy::all, clippy::pedantic)]

use crate::app::App;
use crate::menu_types::{Menu, Screen, ShopOption, SubscriptionOption, TermsOption};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::Color,
};
use std::time::{Duration, Instant};

use super::leaderboard::render_leaderboard;
use super::onboarding::render_onboarding_screen;
use super::shop::{render_shop, render_transactions};
use super::studio::render_studio;
use super::title::{TITLE_HEIGHT, render_ascii_title};

const TITLE_COLOR_CYCLE: Duration = Duration::from_millis(400);

pub struct MenuRenderer {
    pub title_colors: Vec<Color>,
    pub color_change_time: Instant,
    /// Animation step, advanced with every title color change.
    pub frame: usize,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self {
            // The fallback level palette, so the title matches the first board
            title_colors: vec![
                Color::Rgb(0x63, 0x66, 0xf1),
                Color::Rgb(0x8b, 0x5c, 0xf6),
                Color::Rgb(0xec, 0x48, 0x99),
                Color::Rgb(0xf4, 0x3f, 0x5e),
            ],
            color_change_time: Instant::now(),
            frame: 0,
        }
    }
}

impl MenuRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_option(&mut self, menu: &mut Menu) {
        match menu.screen {
            Screen::Terms => {
                menu.terms_selected = match menu.terms_selected {
                    TermsOption::Decline => TermsOption::Accept,
                    TermsOption::Accept => TermsOption::Decline,
                };
            }
            Screen::Subscription => {
                menu.subscription_selected = match menu.subscription_selected {
                    SubscriptionOption::Subscribe => SubscriptionOption::PlayFree,
                    SubscriptionOption::PlayFree => SubscriptionOption::Subscribe,
                };
            }
            Screen::Shop => {
                let next = (menu.shop_selected.index() + 1) % ShopOption::ALL.len();
                menu.shop_selected = ShopOption::ALL[next];
            }
            _ => {}
        }
    }

    pub fn prev_option(&mut self, menu: &mut Menu) {
        match menu.screen {
            Screen::Shop => {
                let len = ShopOption::ALL.len();
                let prev = (menu.shop_selected.index() + len - 1) % len;
                menu.shop_selected = ShopOption::ALL[prev];
            }
            // Two-option screens wrap the same way in both directions
            _ => self.next_option(menu),
        }
    }

    pub fn update(&mut self) {
        if self.color_change_time.elapsed() > TITLE_COLOR_CYCLE {
            self.color_change_time = Instant::now();
            self.title_colors.rotate_left(1);
            self.frame = self.frame.wrapping_add(1);
        }
    }

    /// Intro, about, terms and subscription screens.
    pub fn render_onboarding(f: &mut Frame, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(TITLE_HEIGHT + 2), Constraint::Min(0)])
            .split(f.area());

        render_ascii_title(f, chunks[0], &app.menu_renderer.title_colors);
        render_onboarding_screen(f, chunks[1], &app.menu, app.progression().has_premium_discount());
    }

    /// Shop, transaction history, leaderboard and studio.
    pub fn render_overlay(f: &mut Frame, app: &App) {
        let area = f.area();
        match app.menu.screen {
            Screen::Shop => render_shop(f, area, app),
            Screen::Transactions => render_transactions(f, area, app),
            Screen::Leaderboard => render_leaderboard(f, area, app),
            Screen::Studio => render_studio(f, area, app),
            _ => {}
        }
    }
}
