use crate::app::App;
use crate::components::{Board, CurrentLevel, PuzzleStatus, tile_decoration};
use crate::config;
use crate::menu::MenuRenderer;
use crate::menu_types::Screen;
use ratatui::{
    prelude::*,
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
};

pub const MIN_WIDTH: u16 = 60;
pub const MIN_HEIGHT: u16 = 20;
const INFO_WIDTH: u16 = 30;
const MAX_CELL_WIDTH: u16 = 12;
const MAX_CELL_HEIGHT: u16 = 5;

/// Maps board slots to terminal cells and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardGeometry {
    inner: Rect,
    grid_size: usize,
    cell_width: u16,
    cell_height: u16,
}

impl BoardGeometry {
    /// Lays out a `grid_size`×`grid_size` board inside a bordered `area`.
    #[must_use]
    pub fn new(area: Rect, grid_size: usize) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        let n = u16::try_from(grid_size.max(1)).unwrap_or(u16::MAX);
        Self {
            inner,
            grid_size,
            cell_width: (inner.width / n).min(MAX_CELL_WIDTH),
            cell_height: (inner.height / n).min(MAX_CELL_HEIGHT),
        }
    }

    #[must_use]
    pub fn cell_rect(&self, slot: usize) -> Option<Rect> {
        if self.grid_size == 0 || slot >= self.grid_size * self.grid_size {
            return None;
        }
        let col = u16::try_from(slot % self.grid_size).ok()?;
        let row = u16::try_from(slot / self.grid_size).ok()?;
        Some(Rect::new(
            self.inner.x + col * self.cell_width,
            self.inner.y + row * self.cell_height,
            self.cell_width,
            self.cell_height,
        ))
    }

    /// The slot drawn at a terminal cell, if any.
    #[must_use]
    pub fn slot_at(&self, column: u16, row: u16) -> Option<usize> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return None;
        }
        if column < self.inner.x || row < self.inner.y {
            return None;
        }
        let col = usize::from((column - self.inner.x) / self.cell_width);
        let line = usize::from((row - self.inner.y) / self.cell_height);
        if col >= self.grid_size || line >= self.grid_size {
            return None;
        }
        Some(line * self.grid_size + col)
    }
}

pub fn render(f: &mut Frame, app: &mut App) {
    if f.area().width < MIN_WIDTH || f.area().height < MIN_HEIGHT {
        let warning_text = Paragraph::new(
            "Терминал слишком мал!\nУвеличьте окно,\nчтобы продолжить.",
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("AI Puzzle"));
        let warning_area = centered_rect(30, 5, f.area());
        f.render_widget(warning_text, warning_area);
        return;
    }

    match app.menu.screen {
        Screen::Intro | Screen::About | Screen::Terms | Screen::Subscription => {
            MenuRenderer::render_onboarding(f, app);
        }
        Screen::Loading => render_loading(f, app),
        Screen::Playing => render_game(f, app),
        Screen::Won => {
            render_game(f, app);
            render_won(f, app);
        }
        Screen::Shop | Screen::Transactions | Screen::Leaderboard | Screen::Studio => {
            MenuRenderer::render_overlay(f, app);
        }
    }
    render_notice(f, app);
}

fn render_loading(f: &mut Frame, app: &App) {
    let level = app.progression().level;
    let dots = ".".repeat(app.menu_renderer.frame % 4);
    let text = vec![
        Line::from(Span::styled(
            format!("Уровень {level}"),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("ИИ генерирует уровень{dots}")),
    ];
    let area = centered_rect(40, 5, f.area());
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_game(f: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(INFO_WIDTH)])
        .split(f.area());

    let game_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Theme
            Constraint::Min(5),    // Board
            Constraint::Length(1), // Notice line
        ])
        .split(main_layout[0]);

    let theme = app
        .world
        .get_resource::<CurrentLevel>()
        .map_or_else(String::new, |current| current.data.theme.clone());
    let title = Paragraph::new(theme)
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, game_layout[0]);

    let board_area = square_area(game_layout[1]);
    app.board_area = Some(board_area);
    render_board(f, app, board_area);

    render_info(f, app, main_layout[1]);
}

// Terminal cells are about twice as tall as wide
fn square_area(area: Rect) -> Rect {
    let height = area.height.min(area.width / 2);
    let width = (height * 2).min(area.width);
    centered_rect(width, height, area)
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let (Some(board), Some(current)) = (app.board(), app.world.get_resource::<CurrentLevel>())
    else {
        return;
    };
    let border_style = if board.is_solved() {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };
    f.render_widget(
        Block::default().borders(Borders::ALL).border_style(border_style),
        area,
    );

    let show_numbers = config::current().ui.show_tile_numbers;
    let geometry = BoardGeometry::new(area, board.grid_size());
    for tile in board.tiles() {
        let Some(cell) = geometry.cell_rect(tile.current_pos) else {
            continue;
        };
        let color = tile_decoration(tile.id, board.grid_size(), &current.palette);
        let text_color = if color.is_light() { Color::Black } else { Color::White };

        let mut block = Block::default().style(Style::default().bg(color.into()));
        if board.selected() == Some(tile.id) {
            block = block
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(text_color).add_modifier(Modifier::BOLD));
        } else if app.cursor == tile.current_pos {
            block = block
                .borders(Borders::ALL)
                .border_style(Style::default().fg(text_color));
        }

        let label = if show_numbers {
            (tile.id + 1).to_string()
        } else {
            String::new()
        };
        let inner_height = block.inner(cell).height;
        let padding = "\n".repeat(usize::from(inner_height.saturating_sub(1) / 2));
        let paragraph = Paragraph::new(format!("{padding}{label}"))
            .alignment(Alignment::Center)
            .style(Style::default().fg(text_color))
            .block(block);
        f.render_widget(paragraph, cell);
    }
}

fn render_info(f: &mut Frame, app: &App, area: Rect) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Title
            Constraint::Length(6), // Stats
            Constraint::Length(2), // Palette
            Constraint::Min(3),    // Fun fact
            Constraint::Length(9), // Controls
        ])
        .split(area);

    let info_title = Paragraph::new("AI PUZZLE")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(info_title, info_layout[0]);

    let progression = app.progression();
    let status = app.board().map_or("-", |board| match board.status() {
        PuzzleStatus::Scrambled => "Перемешано",
        PuzzleStatus::InProgress => "В процессе",
        PuzzleStatus::Solved => "Собрано!",
    });
    let misplaced = app.board().map_or(0, Board::misplaced_count);
    let stats = format!(
        "Уровень: {}\nОчки: {}\nPZZLS: {}\nСтатус: {status}\nНе на месте: {misplaced}",
        progression.level,
        progression.score,
        progression.balance(),
    );
    f.render_widget(
        Paragraph::new(stats).wrap(Wrap { trim: true }),
        info_layout[1],
    );

    if let Some(current) = app.world.get_resource::<CurrentLevel>() {
        let swatches: Vec<Span> = current
            .palette
            .colors()
            .iter()
            .map(|color| Span::styled("    ", Style::default().bg((*color).into())))
            .collect();
        f.render_widget(Paragraph::new(Line::from(swatches)), info_layout[2]);

        let fun_fact = Paragraph::new(format!("💡 {}", current.data.fun_fact))
            .style(Style::default().fg(Color::Yellow))
            .block(Block::default().borders(Borders::TOP))
            .wrap(Wrap { trim: true });
        f.render_widget(fun_fact, info_layout[3]);
    }

    let controls = Paragraph::new(
        "Управление:\n\
        ←↑↓→/WASD: Курсор\n\
        Enter/Space: Выбрать\n\
        H: Подсказка (2500)\n\
        K: Пропуск (5000)\n\
        P: Магазин  L: Рейтинг\n\
        T: История  C: Студия\n\
        Q: Выход",
    )
    .block(Block::default().borders(Borders::TOP))
    .wrap(Wrap { trim: true });
    f.render_widget(controls, info_layout[4]);
}

fn render_won(f: &mut Frame, app: &App) {
    let level = app.progression().level;
    let text = vec![
        Line::from(Span::styled(
            "🎉 Отлично!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("Уровень {level} пройден")),
        Line::from(format!(
            "+{} очков  +{} PZZLS",
            crate::game::level_points(level),
            crate::game::level_pzzls(level)
        )),
        Line::from(""),
        Line::from("Enter: Следующий уровень"),
    ];
    let area = centered_rect(36, 8, f.area());
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        ),
        area,
    );
}

fn render_notice(f: &mut Frame, app: &App) {
    let Some(notice) = &app.notice else {
        return;
    };
    let area = f.area();
    let line = Rect::new(area.x, area.bottom().saturating_sub(1), area.width, 1);
    let color = if notice.is_error { Color::Red } else { Color::Green };
    f.render_widget(Clear, line);
    f.render_widget(
        Paragraph::new(notice.text.as_str())
            .alignment(Alignment::Center)
            .style(Style::default().fg(color)),
        line,
    );
}

/// Helper function to create a centered rectangle inside another rectangle
pub fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + r.width.saturating_sub(width) / 2;
    let y = r.y + r.height.saturating_sub(height) / 2;

    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
