#![warn(clippy::all, clippy::pedantic)]

use crate::app::App;
use crate::content::{GameConcept, MarketingData, TOPIC_SUGGESTIONS, moodboard_palette};
use crate::menu_types::StudioJob;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

fn field(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{label}: "),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(value.to_string()),
    ])
}

fn concept_lines(concept: &GameConcept) -> Vec<Line<'static>> {
    let swatches: Vec<Span> = moodboard_palette(concept)
        .colors()
        .iter()
        .map(|color| Span::styled(format!(" {} ", color.to_hex()), Style::default().bg((*color).into())))
        .collect();

    vec![
        Line::from(Span::styled(
            concept.title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("«{}»", concept.tagline),
            Style::default().add_modifier(Modifier::ITALIC),
        )),
        Line::from(""),
        field("Механика", &concept.core_mechanic),
        field("Почему это весело", &concept.fun_factor),
        field("Стиль", &concept.visual_style),
        Line::from(""),
        Line::from(swatches),
    ]
}

fn marketing_lines(marketing: &MarketingData) -> Vec<Line<'static>> {
    vec![
        Line::from(Span::styled(
            marketing.headline.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        field("Пост", &marketing.social_post),
        field("Аудитория", &marketing.target_audience),
        field("Монетизация", &marketing.monetization_strategy),
    ]
}

pub fn render_studio(f: &mut Frame, area: Rect, app: &App) {
    let studio = &app.studio;
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),      // Topic input
            Constraint::Length(2),      // Suggestions or status
            Constraint::Percentage(50), // Concept
            Constraint::Min(4),         // Marketing
        ])
        .split(area);

    let input = Paragraph::new(format!("{}▏", studio.topic)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Студия: о чём будет игра? ")
            .title_bottom(" Enter: Идея  Tab: Маркетинг  Esc: Назад "),
    );
    f.render_widget(input, layout[0]);

    let status = match (&studio.pending, &studio.error) {
        (Some((_, StudioJob::Concept)), _) => {
            Line::from(Span::styled("Придумываем идею...", Style::default().fg(Color::Yellow)))
        }
        (Some((_, StudioJob::Marketing)), _) => {
            Line::from(Span::styled("Составляем стратегию...", Style::default().fg(Color::Yellow)))
        }
        (None, Some(error)) => {
            Line::from(Span::styled(error.clone(), Style::default().fg(Color::Red)))
        }
        (None, None) => Line::from(Span::styled(
            format!("Например: {}", TOPIC_SUGGESTIONS.join(" • ")),
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(status), layout[1]);

    let concept = studio
        .concept
        .as_ref()
        .map_or_else(|| vec![Line::from("Идея появится здесь.")], concept_lines);
    f.render_widget(
        Paragraph::new(concept)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Концепт ")),
        layout[2],
    );

    let marketing = studio
        .marketing
        .as_ref()
        .map_or_else(|| vec![Line::from("Сначала придумайте идею, затем нажмите Tab.")], marketing_lines);
    f.render_widget(
        Paragraph::new(marketing)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title(" Маркетинг ")),
        layout[3],
    );
}
