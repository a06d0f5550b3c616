#![warn(clippy::all, clippy::pedantic)]

use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style},
    text::Text,
    widgets::Paragraph,
};

use crate::ui::centered_rect;

pub const TITLE_HEIGHT: u16 = 5;
const LETTER_SPACING: u16 = 1;

// ASCII art letters for the "PUZZLE" title
pub const TITLE_LETTERS: [&str; 6] = [
    // P
    "███ \n█  █\n███ \n█   \n█   ",
    // U
    "█  █\n█  █\n█  █\n█  █\n ██ ",
    // Z
    "████\n   █\n  █ \n █  \n████",
    // Z
    "████\n   █\n  █ \n █  \n████",
    // L
    "█   \n█   \n█   \n█   \n████",
    // E
    "████\n█   \n███ \n█   \n████",
];

fn letter_width(letter: &str) -> u16 {
    letter
        .lines()
        .next()
        .map_or(0, |line| u16::try_from(line.chars().count()).unwrap_or(0))
}

#[must_use]
pub fn title_width() -> u16 {
    let letters: u16 = TITLE_LETTERS.iter().map(|letter| letter_width(letter)).sum();
    let gaps = u16::try_from(TITLE_LETTERS.len().saturating_sub(1)).unwrap_or(0) * LETTER_SPACING;
    letters + gaps
}

/// Renders the ASCII art title, one cycling color per letter
pub fn render_ascii_title(f: &mut Frame, area: Rect, colors: &[Color]) {
    let title_area = centered_rect(title_width(), TITLE_HEIGHT, area);
    let mut current_x = title_area.x;

    for (i, letter) in TITLE_LETTERS.iter().enumerate() {
        let width = letter_width(letter);
        let letter_area = Rect::new(current_x, title_area.y, width, TITLE_HEIGHT)
            .intersection(area);

        let color = if colors.is_empty() {
            Color::White
        } else {
            colors[i % colors.len()]
        };
        let paragraph = Paragraph::new(Text::from(*letter)).style(Style::default().fg(color));
        f.render_widget(paragraph, letter_area);

        current_x = current_x.saturating_add(width + LETTER_SPACING);
    }
}
