#![warn(clippy::all, clippy::pedantic)]

use crate::menu_types::{Menu, Screen, SubscriptionOption, TermsOption};
use crate::ui::centered_rect;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

const PANEL_WIDTH: u16 = 64;
const PANEL_HEIGHT: u16 = 18;

pub const SUBSCRIPTION_PRICE: u32 = 299;

const SUBSCRIPTION_PERKS: [&str; 4] = [
    "Доступ к премиум-уровням",
    "Дополнительные подсказки",
    "Отключение рекламы",
    "Бонусные PZZLS ежедневно",
];

fn option_style(selected: bool) -> Style {
    if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    ))
}

fn continue_button() -> Line<'static> {
    Line::from(Span::styled(" Далее ", option_style(true)))
}

/// Monthly subscription price after the PZZLS discount, if one was bought.
#[must_use]
pub fn subscription_price(discounted: bool) -> u32 {
    if discounted {
        SUBSCRIPTION_PRICE / 2
    } else {
        SUBSCRIPTION_PRICE
    }
}

pub fn render_onboarding_screen(f: &mut Frame, area: Rect, menu: &Menu, discounted: bool) {
    let lines = match menu.screen {
        Screen::Intro => intro_lines(),
        Screen::About => about_lines(),
        Screen::Terms => terms_lines(menu.terms_selected),
        Screen::Subscription => subscription_lines(menu.subscription_selected, discounted),
        _ => return,
    };

    let panel = centered_rect(PANEL_WIDTH, PANEL_HEIGHT, area);
    let paragraph = Paragraph::new(Text::from(lines))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, panel);
}

fn intro_lines() -> Vec<Line<'static>> {
    vec![
        heading("🧩 AI_Puzzle  12+"),
        Line::from(""),
        Line::from("Добро пожаловать в AI_Puzzle!"),
        Line::from(""),
        Line::from("Это интерактивная игра-пазл с элементами логики."),
        Line::from("Подходит для пользователей 12+ (есть внутренняя валюта и покупки)."),
        Line::from(""),
        Line::from(Span::styled(
            "Контакты разработчика: Telegram @ai_gameover",
            Style::default().fg(Color::Cyan),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Нажимая «Далее», вы соглашаетесь с Правилами использования и Политикой конфиденциальности.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        continue_button(),
    ]
}

fn about_lines() -> Vec<Line<'static>> {
    vec![
        heading("О боте"),
        Line::from(""),
        Line::from("AI_Puzzle: проходите уровни, решайте задачи и повышайте свой рейтинг."),
        Line::from(""),
        Line::from("Цель: увлекательная игра без вредоносного функционала."),
        Line::from(""),
        Line::from("• Каждый игрок получает очки за пройденные уровни"),
        Line::from("• Рейтинг показывает глобальный топ среди всех игроков"),
        Line::from(""),
        Line::from(Span::styled(
            "Название содержит «AI», но бот не использует ИИ для анализа игроков.",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        continue_button(),
    ]
}

fn terms_lines(selected: TermsOption) -> Vec<Line<'static>> {
    vec![
        heading("Соглашение"),
        Line::from(""),
        Line::from("Используя AI_Puzzle, вы подтверждаете, что:"),
        Line::from("• Бот предназначен только для развлечения."),
        Line::from("• Вы принимаете правила использования."),
        Line::from("• Ваши данные (ID, рейтинг, покупки) обрабатываются для работы бота."),
        Line::from("• Данные не передаются третьим лицам."),
        Line::from("• Подписки и покупки PZZLS прозрачны и отменяемы в любой момент."),
        Line::from(""),
        Line::from(vec![
            Span::styled(
                " Не согласен ",
                option_style(selected == TermsOption::Decline),
            ),
            Span::raw("   "),
            Span::styled(" Согласен ", option_style(selected == TermsOption::Accept)),
        ]),
    ]
}

fn subscription_lines(selected: SubscriptionOption, discounted: bool) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("⭐ AI_Puzzle+"),
        Line::from("Премиум возможности"),
        Line::from(""),
    ];
    lines.extend(
        SUBSCRIPTION_PERKS
            .iter()
            .map(|perk| Line::from(Span::styled(format!("✓ {perk}"), Style::default().fg(Color::Green)))),
    );
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        format!("{} ₽ / мес", subscription_price(discounted)),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from("Автопродление • Отмена в любой момент"));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Оформить подписку ",
        option_style(selected == SubscriptionOption::Subscribe),
    )));
    lines.push(Line::from(Span::styled(
        " Играть бесплатно с рекламой ",
        option_style(selected == SubscriptionOption::PlayFree),
    )));
    lines
}
