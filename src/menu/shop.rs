#![warn(clippy::all, clippy::pedantic)]

use crate::app::App;
use crate::game::{COST_PREMIUM_DISCOUNT, COST_SKIP};
use crate::menu_types::ShopOption;
use crate::progression::{SpendAction, Transaction};
use crate::shop::{Checkout, PACKS};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

fn option_style(selected: bool) -> Style {
    if selected {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    }
}

// Spends the balance cannot cover are dimmed
fn spend_style(selected: bool, affordable: bool) -> Style {
    let style = option_style(selected);
    if affordable {
        style
    } else {
        style.fg(Color::DarkGray)
    }
}

pub fn render_shop(f: &mut Frame, area: Rect, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Balance
            Constraint::Min(10),   // Offers
            Constraint::Length(3), // Footer
        ])
        .split(area);

    let header = Paragraph::new("Магазин PZZLS")
        .alignment(Alignment::Center)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(header, layout[0]);

    let progression = app.progression();
    let balance = Paragraph::new(Line::from(vec![
        Span::raw("Ваш баланс: "),
        Span::styled(
            format!("{} PZZLS 💎", progression.balance()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(balance, layout[1]);

    let currency = app.menu.currency;
    let selected = app.menu.shop_selected;
    let busy = app.world.resource::<Checkout>().is_busy();

    let mut lines = vec![
        Line::from(Span::styled(
            "Потратить PZZLS",
            Style::default().add_modifier(Modifier::UNDERLINED),
        )),
        Line::from(Span::styled(
            format!("⏭  Пропуск уровня (переход дальше)   {COST_SKIP} 💎"),
            spend_style(
                selected == ShopOption::SkipLevel,
                progression.can_afford(SpendAction::Skip),
            ),
        )),
    ];
    let discount_label = if progression.has_premium_discount() {
        "🏷  Скидка на подписку: активна".to_string()
    } else {
        format!("🏷  Скидка на подписку (-50% на Premium)   {COST_PREMIUM_DISCOUNT} 💎")
    };
    lines.push(Line::from(Span::styled(
        discount_label,
        spend_style(
            selected == ShopOption::PremiumDiscount,
            progression.has_premium_discount() || progression.can_afford(SpendAction::PremiumDiscount),
        ),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(
            "Купить PZZLS",
            Style::default().add_modifier(Modifier::UNDERLINED),
        ),
        Span::raw(format!("   Валюта: {} ({})", currency.code(), currency.label())),
    ]));

    for (index, pack) in PACKS.iter().enumerate() {
        let popular = if pack.popular { "  POPULAR" } else { "" };
        let price = if busy {
            "...".to_string()
        } else {
            format!("{} {}", pack.format_price(currency), currency.label())
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("💎 {} PZZLS   {price}", pack.pzzls),
                option_style(selected == ShopOption::Pack(index)),
            ),
            Span::styled(popular, Style::default().fg(Color::Green)),
        ]));
    }

    let offers = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false });
    f.render_widget(offers, layout[2]);

    let footer = Paragraph::new(
        "↑/↓: Выбор  Enter: Купить  Tab: Валюта  T: История  Esc: Назад\n\
        Покупки защищены. Возможность возврата ограничена правилами платформы.",
    )
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, layout[3]);
}

fn transaction_item(transaction: &Transaction) -> ListItem<'static> {
    let color = if transaction.amount > 0 {
        Color::Green
    } else {
        Color::Red
    };
    let sign = if transaction.amount > 0 { "+" } else { "" };
    ListItem::new(Line::from(vec![
        Span::styled(
            transaction.date.format("%H:%M:%S %d.%m.%Y ").to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:<8} ", transaction.kind.label()),
            Style::default().fg(Color::Gray),
        ),
        Span::raw(format!("{} ", transaction.description)),
        Span::styled(
            format!("{sign}{}", transaction.amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
    ]))
}

pub fn render_transactions(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" История ")
        .title_bottom(" ↑/↓: Прокрутка  Esc: Назад ");

    let transactions = app.progression().transactions();
    if transactions.is_empty() {
        let empty = Paragraph::new("🧾\nИстория пуста")
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let scroll = app.menu.scroll.min(transactions.len().saturating_sub(1));
    let items: Vec<ListItem> = transactions
        .iter()
        .skip(scroll)
        .map(transaction_item)
        .collect();
    f.render_widget(List::new(items).block(block), area);
}
