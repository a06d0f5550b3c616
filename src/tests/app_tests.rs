#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::components::{Board, CurrentLevel, TileAction};
    use crate::game::{COST_HINT, COST_SKIP};
    use crate::menu_types::{Screen, ShopOption};
    use crate::progression::TransactionKind;
    use crate::shop::{Checkout, Currency};
    use crate::tests::test_utils::{
        StubProvider, create_app_with, create_test_app, finish_loading, put_nearly_solved_board,
        start_playing, stub_concept, stub_theme,
    };
    use crate::ui::BoardGeometry;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;
    use std::time::Duration;

    fn press(app: &mut crate::app::App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn fund(app: &mut crate::app::App, amount: i64) {
        app.world
            .resource_mut::<crate::progression::Progression>()
            .credit_purchase(amount, "test".to_string());
    }

    fn win_current_board(app: &mut crate::app::App) {
        put_nearly_solved_board(app);
        assert_eq!(app.click_tile(0), TileAction::Selected(0));
        assert!(matches!(
            app.click_tile(1),
            TileAction::Swapped { solved: true, .. }
        ));
        app.advance(0.0);
        app.advance(1.0);
    }

    #[test]
    fn test_app_creation() {
        let app = create_test_app();
        assert!(!app.should_quit);
        assert_eq!(app.menu.screen, Screen::Intro);
        assert!(app.board().is_none());
        assert_eq!(app.progression().balance(), 0);
        assert_eq!(app.progression().level, 1);
    }

    #[test]
    fn test_onboarding_flow_starts_level_one() {
        let mut app = create_test_app();

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.menu.screen, Screen::About);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.menu.screen, Screen::Terms);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.menu.screen, Screen::Subscription);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.menu.screen, Screen::Loading);
        assert!(app.is_loading());

        finish_loading(&mut app);
        assert_eq!(app.menu.screen, Screen::Playing);
        let board = app.board().expect("Board must exist");
        assert_eq!(board.grid_size(), 3);
        let current = app.world.resource::<CurrentLevel>();
        assert_eq!(current.data.theme, stub_theme(1).theme);
    }

    #[test]
    fn test_declining_terms_returns_to_intro() {
        let mut app = create_test_app();
        app.menu.screen = Screen::Terms;
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.menu.screen, Screen::Intro);
    }

    #[test]
    fn test_first_level_comes_from_args() {
        let mut app = create_test_app();
        app.first_level = 3;
        app.menu.screen = Screen::Subscription;
        press(&mut app, KeyCode::Enter);
        finish_loading(&mut app);

        assert_eq!(app.progression().level, 3);
        assert_eq!(app.board().map(Board::grid_size), Some(4));
    }

    #[test]
    fn test_failing_provider_still_yields_a_level() {
        let mut app = create_app_with(StubProvider::failing());
        start_playing(&mut app, 5);
        assert_eq!(app.menu.screen, Screen::Playing);
        // Fallback level is always 3x3
        assert_eq!(app.board().map(Board::grid_size), Some(3));
    }

    #[test]
    fn test_stale_level_content_is_dropped() {
        let mut app = create_test_app();
        app.start_level(1);
        app.start_level(2);

        // Both responses arrive; only the second ticket is still wanted
        finish_loading(&mut app);
        app.wait_for_content(Duration::from_millis(200));

        let current = app.world.resource::<CurrentLevel>();
        assert_eq!(current.data.id, 2);
        assert_eq!(app.progression().level, 2);
    }

    #[test]
    fn test_q_quits() {
        let mut app = create_test_app();
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_ctrl_c_quits_from_studio() {
        let mut app = create_test_app();
        app.menu.screen = Screen::Studio;
        press(&mut app, KeyCode::Char('q'));
        assert!(!app.should_quit);
        assert_eq!(app.studio.topic, "q");

        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn test_cursor_moves_within_board() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);

        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.cursor, 0);

        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.cursor, 2);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('s'));
        press(&mut app, KeyCode::Down);
        assert_eq!(app.cursor, 8);
    }

    #[test]
    fn test_enter_selects_tile_under_cursor() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        let expected = app.board().and_then(|board| board.tile_at(0)).map(|tile| tile.id);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.board().and_then(Board::selected), expected);
    }

    #[test]
    fn test_win_shows_victory_after_delay_then_next_level() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);

        put_nearly_solved_board(&mut app);
        app.click_tile(0);
        app.click_tile(1);
        app.advance(0.1);
        assert_eq!(app.menu.screen, Screen::Playing, "Victory waits for the win delay");

        // Clicks are blocked while the win is pending
        assert_eq!(app.click_tile(4), TileAction::Ignored);

        app.advance(0.5);
        assert_eq!(app.menu.screen, Screen::Won);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.progression().score, 100);
        assert_eq!(app.progression().balance(), 160);
        assert_eq!(app.progression().level, 2);
        assert_eq!(app.menu.screen, Screen::Loading);

        finish_loading(&mut app);
        assert_eq!(app.menu.screen, Screen::Playing);
        assert_eq!(app.world.resource::<CurrentLevel>().data.id, 2);
    }

    #[test]
    fn test_win_while_overlay_open_lands_on_victory() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        put_nearly_solved_board(&mut app);
        app.click_tile(0);
        app.click_tile(1);

        press(&mut app, KeyCode::Char('l'));
        assert_eq!(app.menu.screen, Screen::Leaderboard);
        app.advance(0.0);
        app.advance(1.0);
        assert_eq!(app.menu.screen, Screen::Leaderboard);

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.menu.screen, Screen::Won);
    }

    #[test]
    fn test_hint_without_funds_shows_notice() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        let before = app.board().map(Board::positions);

        press(&mut app, KeyCode::Char('h'));

        assert_eq!(app.board().map(Board::positions), before);
        assert!(app.notice.as_ref().is_some_and(|notice| notice.is_error));
        assert!(app.progression().transactions().is_empty());
    }

    #[test]
    fn test_hint_with_funds_moves_tiles() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        put_nearly_solved_board(&mut app);
        fund(&mut app, COST_HINT);

        press(&mut app, KeyCode::Char('h'));

        assert_eq!(app.progression().balance(), 0);
        assert!(app.board().is_some_and(Board::is_solved));
        app.advance(0.0);
        app.advance(1.0);
        assert_eq!(app.menu.screen, Screen::Won);
    }

    #[test]
    fn test_skip_advances_level() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        fund(&mut app, COST_SKIP);

        press(&mut app, KeyCode::Char('k'));

        assert_eq!(app.menu.screen, Screen::Loading);
        assert_eq!(app.progression().level, 2);
        assert_eq!(app.progression().score, 100);
        finish_loading(&mut app);
        assert_eq!(app.world.resource::<CurrentLevel>().data.id, 2);
    }

    #[test]
    fn test_skip_without_funds_stays() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.menu.screen, Screen::Playing);
        assert_eq!(app.progression().level, 1);
    }

    #[test]
    fn test_skip_from_shop_refused_after_win() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        fund(&mut app, COST_SKIP);
        win_current_board(&mut app);
        assert_eq!(app.menu.screen, Screen::Won);

        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.menu.shop_selected, ShopOption::SkipLevel);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.progression().balance(), COST_SKIP);
        assert_eq!(app.progression().level, 1);
        assert_eq!(app.menu.screen, Screen::Shop);

        // The reward is still collected for free
        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.progression().balance(), COST_SKIP + 160);
        assert_eq!(app.progression().level, 2);
    }

    #[test]
    fn test_skip_refused_during_win_delay() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        fund(&mut app, COST_SKIP);
        put_nearly_solved_board(&mut app);
        app.click_tile(0);
        app.click_tile(1);

        // Before the win event is drained
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.progression().balance(), COST_SKIP);

        app.advance(0.1);
        assert!(app.level_won());
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.progression().balance(), COST_SKIP);
        assert_eq!(app.progression().level, 1);
        assert_eq!(app.progression().transactions().len(), 1);

        app.advance(1.0);
        assert_eq!(app.menu.screen, Screen::Won);
    }

    #[test]
    fn test_hint_on_solved_board_is_free() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        fund(&mut app, COST_HINT);
        // As if the level had been dealt already solved
        app.world
            .insert_resource(Board::new(3).expect("Failed to build board"));

        press(&mut app, KeyCode::Char('h'));

        assert_eq!(app.progression().balance(), COST_HINT);
        assert_eq!(app.progression().transactions().len(), 1);
    }

    #[test]
    fn test_buying_a_pack_credits_after_delay() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        press(&mut app, KeyCode::Char('p'));
        assert_eq!(app.menu.screen, Screen::Shop);

        app.menu.shop_selected = ShopOption::Pack(1);
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.menu.currency, Currency::Usd);
        press(&mut app, KeyCode::Enter);
        assert!(app.world.resource::<Checkout>().is_busy());

        // A second purchase while the first is pending is refused
        press(&mut app, KeyCode::Enter);
        assert!(app.notice.as_ref().is_some_and(|notice| notice.is_error));

        app.advance(0.5);
        assert_eq!(app.progression().balance(), 0);
        app.advance(0.6);
        assert_eq!(app.progression().balance(), 5_000);

        let latest = &app.progression().transactions()[0];
        assert_eq!(latest.kind, TransactionKind::Purchase);
        assert_eq!(latest.description, "Покупка пакета (5.00 $)");
    }

    #[test]
    fn test_premium_discount_from_shop() {
        let mut app = create_test_app();
        app.menu.open(Screen::Shop);
        app.menu.shop_selected = ShopOption::PremiumDiscount;

        press(&mut app, KeyCode::Enter);
        assert!(!app.progression().has_premium_discount());

        fund(&mut app, 100_000);
        press(&mut app, KeyCode::Enter);
        assert!(app.progression().has_premium_discount());
        assert_eq!(app.progression().balance(), 0);
    }

    #[test]
    fn test_mouse_click_selects_tile() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        let area = Rect::new(0, 0, 32, 17);
        app.board_area = Some(area);

        let geometry = BoardGeometry::new(area, 3);
        let cell = geometry.cell_rect(4).expect("Slot 4 exists");
        let expected = app.board().and_then(|board| board.tile_at(4)).map(|tile| tile.id);

        app.handle_click(cell.x + 1, cell.y + 1);

        assert_eq!(app.cursor, 4);
        assert_eq!(app.board().and_then(Board::selected), expected);
    }

    #[test]
    fn test_click_outside_board_is_ignored() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        app.board_area = Some(Rect::new(10, 5, 32, 17));

        app.handle_click(0, 0);
        assert_eq!(app.board().and_then(Board::selected), None);
    }

    #[test]
    fn test_studio_concept_and_marketing() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.menu.screen, Screen::Studio);

        for c in "коты".chars() {
            press(&mut app, KeyCode::Char(c));
        }
        press(&mut app, KeyCode::Enter);
        assert!(app.studio.is_busy());
        assert!(app.wait_for_content(Duration::from_secs(5)));

        let concept = app.studio.concept.clone().expect("Concept must arrive");
        assert_eq!(concept.title, "Пазл: коты");
        assert!(!app.studio.is_busy());

        press(&mut app, KeyCode::Tab);
        assert!(app.wait_for_content(Duration::from_secs(5)));
        let marketing = app.studio.marketing.clone().expect("Marketing must arrive");
        assert_eq!(marketing.headline, "Играйте в Пазл: коты");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.menu.screen, Screen::Playing);
    }

    #[test]
    fn test_studio_failure_keeps_previous_results() {
        let mut app = create_app_with(StubProvider::failing());
        app.menu.open(Screen::Studio);
        app.studio.topic = "коты".to_string();
        let previous = stub_concept("старое");
        app.studio.concept = Some(previous.clone());

        press(&mut app, KeyCode::Enter);
        assert!(app.wait_for_content(Duration::from_secs(5)));

        assert_eq!(app.studio.concept, Some(previous));
        assert!(app.studio.error.is_some());
    }

    #[test]
    fn test_empty_topic_makes_no_request() {
        let mut app = create_test_app();
        app.menu.open(Screen::Studio);
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Enter);
        assert!(!app.studio.is_busy());

        // Marketing needs a concept first
        press(&mut app, KeyCode::Tab);
        assert!(!app.studio.is_busy());
    }

    #[test]
    fn test_notice_expires() {
        let mut app = create_test_app();
        app.show_notice("hello".to_string(), false);
        app.advance(1.0);
        assert!(app.notice.is_some());
        app.advance(2.5);
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_won_board_overlay_navigation() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        win_current_board(&mut app);
        assert_eq!(app.menu.screen, Screen::Won);

        press(&mut app, KeyCode::Char('t'));
        assert_eq!(app.menu.screen, Screen::Transactions);
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.menu.screen, Screen::Shop);
    }
}
