#![warn(clippy::all, clippy::pedantic)]

#[cfg(test)]
mod tests {
    use crate::app::App;
    use crate::content::TOPIC_SUGGESTIONS;
    use crate::menu_types::Screen;
    use crate::tests::test_utils::{
        STUB_THEME, create_test_app, start_playing, stub_concept,
    };
    use crate::ui::{self, BoardGeometry, centered_rect};
    use ratatui::{backend::TestBackend, layout::Rect, prelude::*};

    // Helper function to create a test terminal
    fn create_test_terminal(width: u16, height: u16) -> Terminal<TestBackend> {
        let backend = TestBackend::new(width, height);
        Terminal::new(backend).unwrap()
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = create_test_terminal(width, height);
        terminal.draw(|f| ui::render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let centered = centered_rect(50, 40, area);

        assert_eq!(centered.width, 50);
        assert_eq!(centered.height, 40);
        assert_eq!(centered.x, 25); // (100 - 50) / 2
        assert_eq!(centered.y, 30); // (100 - 40) / 2
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(5, 5, 20, 10);
        let centered = centered_rect(50, 40, area);
        assert_eq!(centered, Rect::new(5, 5, 20, 10));
    }

    #[test]
    fn test_board_geometry_round_trip() {
        let geometry = BoardGeometry::new(Rect::new(3, 2, 42, 22), 4);
        for slot in 0..16 {
            let cell = geometry.cell_rect(slot).expect("Slot inside the board");
            assert_eq!(geometry.slot_at(cell.x, cell.y), Some(slot));
            assert_eq!(
                geometry.slot_at(cell.right() - 1, cell.bottom() - 1),
                Some(slot)
            );
        }
    }

    #[test]
    fn test_board_geometry_caps_cell_size() {
        let geometry = BoardGeometry::new(Rect::new(0, 0, 200, 100), 3);
        let cell = geometry.cell_rect(0).expect("Slot inside the board");
        assert_eq!(cell.width, 12);
        assert_eq!(cell.height, 5);
    }

    #[test]
    fn test_board_geometry_out_of_bounds() {
        let geometry = BoardGeometry::new(Rect::new(10, 10, 32, 17), 3);
        assert_eq!(geometry.cell_rect(9), None);
        // The border itself is not a slot
        assert_eq!(geometry.slot_at(10, 10), None);
        assert_eq!(geometry.slot_at(0, 0), None);
        assert_eq!(geometry.slot_at(200, 200), None);
    }

    #[test]
    fn test_board_geometry_degenerate_area() {
        let geometry = BoardGeometry::new(Rect::new(0, 0, 2, 2), 3);
        assert_eq!(geometry.slot_at(1, 1), None);
    }

    #[test]
    fn test_too_small_warning() {
        let mut app = create_test_app();
        let text = draw(&mut app, 40, 10);
        assert!(text.contains("Терминал слишком мал!"));
    }

    #[test]
    fn test_onboarding_screens_render() {
        let mut app = create_test_app();
        for screen in [Screen::Intro, Screen::About, Screen::Terms, Screen::Subscription] {
            app.menu.screen = screen;
            let text = draw(&mut app, 100, 40);
            assert!(!text.trim().is_empty(), "{screen:?} rendered nothing");
        }
    }

    #[test]
    fn test_loading_screen_shows_level() {
        let mut app = create_test_app();
        app.start_level(2);
        let text = draw(&mut app, 80, 24);
        assert!(text.contains("Уровень 2"));
    }

    #[test]
    fn test_game_screen_records_board_area() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        assert!(app.board_area.is_none());

        let text = draw(&mut app, 100, 30);

        let area = app.board_area.expect("Board area is recorded while drawing");
        assert!(area.width > 0 && area.height > 0);
        assert!(text.contains(STUB_THEME));
        assert!(text.contains("PZZLS"));
    }

    #[test]
    fn test_victory_popup() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        app.menu.screen = Screen::Won;
        let text = draw(&mut app, 100, 30);
        assert!(text.contains("Уровень 1 пройден"));
    }

    #[test]
    fn test_overlays_render() {
        let mut app = create_test_app();
        start_playing(&mut app, 1);
        for screen in [
            Screen::Shop,
            Screen::Transactions,
            Screen::Leaderboard,
            Screen::Studio,
        ] {
            app.menu.open(screen);
            let text = draw(&mut app, 100, 40);
            assert!(!text.trim().is_empty(), "{screen:?} rendered nothing");
        }
    }

    #[test]
    fn test_leaderboard_lists_player() {
        let mut app = create_test_app();
        app.menu.open(Screen::Leaderboard);
        let text = draw(&mut app, 100, 40);
        assert!(text.contains("Вы"));
    }

    #[test]
    fn test_studio_shows_concept() {
        let mut app = create_test_app();
        app.menu.open(Screen::Studio);
        let empty = draw(&mut app, 100, 40);
        assert!(empty.contains(TOPIC_SUGGESTIONS[0]));

        app.studio.concept = Some(stub_concept("коты"));
        let text = draw(&mut app, 100, 40);
        assert!(text.contains("Пазл: коты"));
    }

    #[test]
    fn test_notice_is_drawn() {
        let mut app = create_test_app();
        app.show_notice("Готово".to_string(), false);
        let text = draw(&mut app, 80, 24);
        assert!(text.contains("Готово"));
    }
}
