#![warn(clippy::all, clippy::pedantic)]

use crate::app::App;
use crate::leaderboard::{Standing, medal, standings};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem},
};

fn standing_item(standing: &Standing) -> ListItem<'static> {
    let rank = medal(standing.rank).map_or_else(|| format!("{:>2}", standing.rank), str::to_string);
    let name_style = if standing.is_player {
        Style::default()
            .fg(Color::Magenta)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    ListItem::new(Line::from(vec![
        Span::styled(format!("{rank} "), Style::default().fg(Color::Yellow)),
        Span::raw(format!("{} ", standing.avatar)),
        Span::styled(format!("{:<16}", standing.name), name_style),
        Span::styled(
            format!("{:>8}", standing.score),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]))
}

pub fn render_leaderboard(f: &mut Frame, area: Rect, app: &App) {
    let all = standings(app.progression().score);
    let scroll = app.menu.scroll.min(all.len().saturating_sub(1));
    let items: Vec<ListItem> = all.iter().skip(scroll).map(standing_item).collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Топ Игроков: глобальный рейтинг (Сезон 2026) ")
        .title_bottom(" ↑/↓: Прокрутка  Esc: Назад ");
    f.render_widget(List::new(items).block(block), area);
}
