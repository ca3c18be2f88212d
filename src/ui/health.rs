// ============================================================================
// Écrans Health et Chatbot
// ============================================================================

use std::collections::BTreeSet;

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, HealthColumn};
use crate::models::{CommentTone, HealthOption};
use crate::ui::dashboard::render_message;

pub fn render_health(frame: &mut Frame, app: &App, area: Rect) {
    if app.health.conditions.is_empty() && app.health.allergens.is_empty() {
        let message = if app.is_loading_data() {
            "Loading health options..."
        } else {
            "No health options available"
        };
        render_message(frame, area, "🩺 Health profile", message, Color::Gray);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let selection = &app.health.selection;
    render_column(
        frame,
        " 🩺 Conditions ",
        &app.health.conditions,
        &selection.conditions,
        (app.health_column == HealthColumn::Conditions).then_some(app.health_selected),
        columns[0],
    );
    render_column(
        frame,
        " 🥜 Allergens ",
        &app.health.allergens,
        &selection.allergens,
        (app.health_column == HealthColumn::Allergens).then_some(app.health_selected),
        columns[1],
    );
}

fn render_column(
    frame: &mut Frame,
    title: &str,
    options: &[HealthOption],
    checked: &BTreeSet<i64>,
    cursor: Option<usize>,
    area: Rect,
) {
    let border = if cursor.is_some() { Color::Yellow } else { Color::Cyan };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title.to_string());

    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .map(|(index, option)| {
            let is_checked = checked.contains(&option.id);
            let mark = if is_checked { "[x]" } else { "[ ]" };
            let style = if is_checked {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::White)
            };

            let mut item = ListItem::new(format!(" {mark} {}", option.name)).style(style);
            if cursor == Some(index) {
                item = item.style(style.add_modifier(Modifier::BOLD).add_modifier(Modifier::REVERSED));
            }
            item
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

pub fn render_chatbot(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 🤖 Assistant ");

    let Some(commentary) = &app.commentary else {
        let message = if app.is_loading_data() {
            "Thinking..."
        } else {
            "Press [a] and enter a product id to get advice based on your health profile"
        };
        render_message(frame, area, "🤖 Assistant", message, Color::Gray);
        return;
    };

    let mut lines = vec![
        Line::from(Span::styled(
            commentary.product.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    lines.extend(commentary.comments.iter().map(|comment| {
        let color = match CommentTone::of(comment) {
            CommentTone::Warning => Color::Red,
            CommentTone::Positive => Color::Green,
            CommentTone::Neutral => Color::White,
        };
        Line::from(Span::styled(format!("• {comment}"), Style::default().fg(color)))
    }));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}
