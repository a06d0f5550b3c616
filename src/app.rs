#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::event::Events;
use bevy_ecs::prelude::*;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::{debug, info, warn};
use ratatui::layout::Rect;
use std::sync::Arc;
use std::time::Duration;

use crate::Time;
use crate::components::{Board, LevelSolved, TileAction};
use crate::config;
use crate::content::{ContentJob, ContentPayload, ContentProvider, ContentResponse, ContentWorker};
use crate::game::{NOTICE_DURATION, STARTING_LEVEL};
use crate::menu::MenuRenderer;
use crate::menu_types::{Menu, Screen, ShopOption, StudioJob, StudioState, SubscriptionOption, TermsOption};
use crate::progression::{Progression, SpendAction};
use crate::shop::{Checkout, PACKS};
use crate::systems::{
    despawn_level, hint_system, settle_system, spawn_level, take_level_solved, tile_click_system,
};
use crate::ui;

/// A short message in the status line.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
    remaining: f32,
}

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
    pub menu_renderer: MenuRenderer,
    pub studio: StudioState,
    /// Board slot under the keyboard cursor.
    pub cursor: usize,
    pub notice: Option<Notice>,
    /// Where the board was last drawn, for mouse hit-testing.
    pub board_area: Option<Rect>,
    /// Level the onboarding flow starts at.
    pub first_level: u32,
    content: ContentWorker,
    pending_level: Option<(u64, u32)>,
    win_timer: Option<f32>,
    rng: fastrand::Rng,
}

impl App {
    pub fn new(provider: Arc<dyn ContentProvider>, mut rng: fastrand::Rng) -> Self {
        let settings = config::current();

        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Progression::with_rng(
            settings.game.starting_balance,
            rng.fork(),
        ));
        world.insert_resource(Checkout::new(settings.game.purchase_delay()));
        world.init_resource::<Events<LevelSolved>>();

        let mut menu = Menu::new();
        menu.currency = settings.game.currency;

        Self {
            world,
            should_quit: false,
            menu,
            menu_renderer: MenuRenderer::new(),
            studio: StudioState::default(),
            cursor: 0,
            notice: None,
            board_area: None,
            first_level: STARTING_LEVEL,
            content: ContentWorker::spawn(provider),
            pending_level: None,
            win_timer: None,
            rng,
        }
    }

    #[must_use]
    pub fn progression(&self) -> &Progression {
        self.world.resource::<Progression>()
    }

    #[must_use]
    pub fn board(&self) -> Option<&Board> {
        self.world.get_resource::<Board>()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.pending_level.is_some()
    }

    /// Requests content for `level` and shows the loading screen.
    pub fn start_level(&mut self, level: u32) {
        info!("Loading level {level}");
        despawn_level(&mut self.world);
        self.win_timer = None;
        self.cursor = 0;

        self.world.resource_mut::<Progression>().level = level;
        let ticket = self.content.request(ContentJob::LevelTheme(level));
        self.pending_level = Some((ticket, level));
        self.menu.screen = Screen::Loading;
    }

    /// Collects the victory reward and loads the following level.
    pub fn next_level(&mut self) {
        let reward = self.world.resource_mut::<Progression>().complete_level();
        self.show_notice(
            format!("+{} очков, +{} PZZLS", reward.points, reward.pzzls),
            false,
        );
        self.start_level(reward.level + 1);
    }

    pub fn click_tile(&mut self, tile_id: usize) -> TileAction {
        if self.menu.screen != Screen::Playing || self.win_timer.is_some() {
            return TileAction::Ignored;
        }
        tile_click_system(&mut self.world, tile_id)
    }

    pub fn click_slot(&mut self, slot: usize) -> TileAction {
        let tile_id = self.board().and_then(|board| board.tile_at(slot)).map(|tile| tile.id);
        match tile_id {
            Some(id) => {
                self.cursor = slot;
                self.click_tile(id)
            }
            None => TileAction::Ignored,
        }
    }

    /// True from the winning move until the next level is requested.
    #[must_use]
    pub fn level_won(&self) -> bool {
        self.win_timer.is_some() || self.board().is_some_and(Board::is_solved)
    }

    pub fn use_hint(&mut self) {
        if self.menu.screen != Screen::Playing || self.board().is_none() || self.level_won() {
            return;
        }
        match self.world.resource_mut::<Progression>().spend(SpendAction::Hint) {
            Ok(_) => {
                let outcome = hint_system(&mut self.world);
                debug!("Hint applied to {} tiles", outcome.fixed.len());
            }
            Err(e) => self.show_notice(format!("Недостаточно PZZLS! Посетите магазин. ({e})"), true),
        }
    }

    pub fn use_skip(&mut self) {
        if self.board().is_none() || self.pending_level.is_some() {
            return;
        }
        // A won level pays out for free on the victory screen
        if self.level_won() {
            debug!("Skip refused: level {} is already won", self.progression().level);
            return;
        }
        let skipped = self.world.resource_mut::<Progression>().skip_level();
        match skipped {
            Ok(reward) => {
                info!("Skipped level {}", reward.level);
                self.start_level(reward.level + 1);
            }
            Err(e) => self.show_notice(format!("Недостаточно PZZLS! Посетите магазин. ({e})"), true),
        }
    }

    pub fn buy_pack(&mut self, index: usize) {
        let Some(pack) = PACKS.get(index).copied() else {
            return;
        };
        let currency = self.menu.currency;
        if let Err(e) = self.world.resource_mut::<Checkout>().begin(pack, currency) {
            warn!("Purchase refused: {e}");
            self.show_notice("Покупка уже обрабатывается".to_string(), true);
        }
    }

    pub fn buy_premium_discount(&mut self) {
        let spent = self
            .world
            .resource_mut::<Progression>()
            .spend(SpendAction::PremiumDiscount);
        match spent {
            Ok(_) => self.show_notice("Скидка 50% на подписку активирована!".to_string(), false),
            Err(_) => self.show_notice("Недостаточно PZZLS!".to_string(), true),
        }
    }

    pub fn request_concept(&mut self) {
        let topic = self.studio.topic.trim().to_string();
        if topic.is_empty() || self.studio.is_busy() {
            return;
        }
        let ticket = self.content.request(ContentJob::Concept(topic));
        self.studio.pending = Some((ticket, StudioJob::Concept));
        self.studio.error = None;
    }

    pub fn request_marketing(&mut self) {
        if self.studio.is_busy() {
            return;
        }
        let Some(concept) = self.studio.concept.clone() else {
            return;
        };
        let ticket = self.content.request(ContentJob::Marketing(concept));
        self.studio.pending = Some((ticket, StudioJob::Marketing));
        self.studio.error = None;
    }

    pub fn show_notice(&mut self, text: String, is_error: bool) {
        if is_error {
            warn!("{text}");
        } else {
            info!("{text}");
        }
        self.notice = Some(Notice {
            text,
            is_error,
            remaining: NOTICE_DURATION,
        });
    }

    /// Per-frame update driven by the [`Time`] resource.
    pub fn on_tick(&mut self) {
        let delta = self.world.resource::<Time>().delta_seconds();
        self.advance(delta);
    }

    /// Advances every timer by `delta_seconds` and applies finished background work.
    pub fn advance(&mut self, delta_seconds: f32) {
        settle_system(&mut self.world, delta_seconds);

        let completed = self.world.resource_mut::<Checkout>().tick(delta_seconds);
        if let Some(purchase) = completed {
            let amount = purchase.pzzls;
            self.world
                .resource_mut::<Progression>()
                .credit_purchase(amount, purchase.description);
            self.show_notice(format!("Успешно куплено {amount} PZZLS!"), false);
        }

        if let Some(solved) = take_level_solved(&mut self.world) {
            debug!("Win signal for level {}", solved.level);
            self.win_timer = Some(config::current().game.win_delay());
        }
        if let Some(remaining) = self.win_timer {
            let remaining = remaining - delta_seconds;
            if remaining <= 0.0 {
                self.win_timer = None;
                if self.menu.screen == Screen::Playing {
                    self.menu.screen = Screen::Won;
                } else {
                    self.menu.previous = Screen::Won;
                }
            } else {
                self.win_timer = Some(remaining);
            }
        }

        self.poll_content();

        if let Some(notice) = self.notice.as_mut() {
            notice.remaining -= delta_seconds;
            if notice.remaining <= 0.0 {
                self.notice = None;
            }
        }

        self.menu_renderer.update();
    }

    /// Applies every content response that has arrived.
    pub fn poll_content(&mut self) {
        while let Some(response) = self.content.try_recv() {
            self.apply_content(response);
        }
    }

    /// Blocks up to `timeout` for one content response and applies it.
    pub fn wait_for_content(&mut self, timeout: Duration) -> bool {
        match self.content.recv_timeout(timeout) {
            Some(response) => {
                self.apply_content(response);
                true
            }
            None => false,
        }
    }

    fn apply_content(&mut self, response: ContentResponse) {
        let ContentResponse { ticket, payload } = response;
        match payload {
            ContentPayload::Level(data) => {
                let current = matches!(self.pending_level, Some((pending, _)) if pending == ticket);
                if !current {
                    debug!("Discarding stale level content #{ticket}");
                    return;
                }
                self.pending_level = None;

                let settle_delay = config::current().game.settle_delay();
                spawn_level(&mut self.world, &data, settle_delay, &mut self.rng);
                if self.menu.screen == Screen::Loading {
                    self.menu.screen = Screen::Playing;
                } else if self.menu.previous == Screen::Loading {
                    self.menu.previous = Screen::Playing;
                }
            }
            ContentPayload::Concept(result) => {
                if !self.studio_ticket_matches(ticket, StudioJob::Concept) {
                    debug!("Discarding stale concept #{ticket}");
                    return;
                }
                self.studio.pending = None;
                match result {
                    Ok(concept) => {
                        info!("Concept generated: {}", concept.title);
                        self.studio.concept = Some(concept);
                        self.studio.marketing = None;
                    }
                    Err(e) => {
                        warn!("Concept generation failed: {e}");
                        self.studio.error =
                            Some("Ой! Не удалось придумать идею. Попробуйте снова.".to_string());
                    }
                }
            }
            ContentPayload::Marketing(result) => {
                if !self.studio_ticket_matches(ticket, StudioJob::Marketing) {
                    debug!("Discarding stale marketing copy #{ticket}");
                    return;
                }
                self.studio.pending = None;
                match result {
                    Ok(marketing) => self.studio.marketing = Some(marketing),
                    Err(e) => {
                        warn!("Marketing generation failed: {e}");
                        self.studio.error =
                            Some("Не удалось составить стратегию. Попробуйте снова.".to_string());
                    }
                }
            }
        }
    }

    fn studio_ticket_matches(&self, ticket: u64, job: StudioJob) -> bool {
        self.studio.pending == Some((ticket, job))
    }

    /// Routes a key press to the current screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // The studio takes free text, so only Esc and Enter are commands there
        if self.menu.screen == Screen::Studio {
            self.handle_studio_key(key.code);
            return;
        }

        if key.code == KeyCode::Char('q') {
            self.should_quit = true;
            return;
        }

        match self.menu.screen {
            Screen::Intro => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.menu.screen = Screen::About;
                }
            }
            Screen::About => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.menu.screen = Screen::Terms,
                KeyCode::Esc => self.menu.back(),
                _ => {}
            },
            Screen::Terms => match key.code {
                KeyCode::Left | KeyCode::Right | KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                    self.menu_renderer.next_option(&mut self.menu);
                }
                KeyCode::Enter | KeyCode::Char(' ') => match self.menu.terms_selected {
                    TermsOption::Decline => self.menu.screen = Screen::Intro,
                    TermsOption::Accept => self.menu.screen = Screen::Subscription,
                },
                KeyCode::Esc => self.menu.back(),
                _ => {}
            },
            Screen::Subscription => match key.code {
                KeyCode::Up | KeyCode::Down | KeyCode::Tab => {
                    self.menu_renderer.next_option(&mut self.menu);
                }
                KeyCode::Enter | KeyCode::Char(' ') => {
                    if self.menu.subscription_selected == SubscriptionOption::Subscribe {
                        info!("Subscription chosen; payment is handled by the messenger platform");
                    }
                    self.start_level(self.first_level);
                }
                KeyCode::Esc => self.menu.back(),
                _ => {}
            },
            Screen::Loading => self.handle_overlay_key(key.code),
            Screen::Playing => self.handle_playing_key(key.code),
            Screen::Won => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.next_level(),
                other => self.handle_overlay_key(other),
            },
            Screen::Shop => self.handle_shop_key(key.code),
            Screen::Transactions | Screen::Leaderboard => match key.code {
                KeyCode::Up => self.menu.scroll = self.menu.scroll.saturating_sub(1),
                KeyCode::Down => self.menu.scroll += 1,
                KeyCode::Esc => self.go_back(),
                other => self.handle_overlay_key(other),
            },
            Screen::Studio => {}
        }
    }

    /// Left click at a terminal cell.
    pub fn handle_click(&mut self, column: u16, row: u16) {
        if self.menu.screen != Screen::Playing {
            return;
        }
        let (Some(area), Some(grid_size)) = (self.board_area, self.board().map(Board::grid_size)) else {
            return;
        };
        if let Some(slot) = ui::BoardGeometry::new(area, grid_size).slot_at(column, row) {
            self.click_slot(slot);
        }
    }

    fn handle_playing_key(&mut self, code: KeyCode) {
        let grid_size = self.board().map_or(0, Board::grid_size);
        match code {
            KeyCode::Left | KeyCode::Char('a') if grid_size > 0 => {
                if self.cursor % grid_size > 0 {
                    self.cursor -= 1;
                }
            }
            KeyCode::Right | KeyCode::Char('d') if grid_size > 0 => {
                if self.cursor % grid_size + 1 < grid_size {
                    self.cursor += 1;
                }
            }
            KeyCode::Up | KeyCode::Char('w') if grid_size > 0 => {
                if self.cursor >= grid_size {
                    self.cursor -= grid_size;
                }
            }
            KeyCode::Down | KeyCode::Char('s') if grid_size > 0 => {
                if self.cursor + grid_size < grid_size * grid_size {
                    self.cursor += grid_size;
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.click_slot(self.cursor);
            }
            KeyCode::Char('h') => self.use_hint(),
            KeyCode::Char('k') => self.use_skip(),
            other => self.handle_overlay_key(other),
        }
    }

    // Navigation keys shared by the game and overlay screens
    fn handle_overlay_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('p') => self.menu.open(Screen::Shop),
            KeyCode::Char('l') => self.menu.open(Screen::Leaderboard),
            KeyCode::Char('t') => self.menu.open(Screen::Transactions),
            KeyCode::Char('c') => self.menu.open(Screen::Studio),
            _ => {}
        }
    }

    fn handle_shop_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.menu_renderer.prev_option(&mut self.menu),
            KeyCode::Down => self.menu_renderer.next_option(&mut self.menu),
            KeyCode::Tab => self.menu.currency = self.menu.currency.toggle(),
            KeyCode::Enter | KeyCode::Char(' ') => match self.menu.shop_selected {
                ShopOption::Pack(index) => self.buy_pack(index),
                ShopOption::SkipLevel => {
                    self.use_skip();
                }
                ShopOption::PremiumDiscount => self.buy_premium_discount(),
            },
            KeyCode::Char('t') => self.menu.open(Screen::Transactions),
            KeyCode::Esc => self.go_back(),
            _ => {}
        }
    }

    fn handle_studio_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.go_back(),
            KeyCode::Enter => self.request_concept(),
            KeyCode::Tab => self.request_marketing(),
            KeyCode::Backspace => {
                self.studio.topic.pop();
            }
            KeyCode::Char(c) => self.studio.topic.push(c),
            _ => {}
        }
    }

    fn go_back(&mut self) {
        self.menu.back();
        // The level may have arrived while an overlay was open
        if self.menu.screen == Screen::Loading && self.pending_level.is_none() && self.board().is_some() {
            self.menu.screen = Screen::Playing;
        }
    }
}
