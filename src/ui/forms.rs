// ============================================================================
// Formulaires : connexion et inscription
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Form};

pub fn render_login(frame: &mut Frame, app: &App, area: Rect) {
    render_form(frame, &app.login_form, " 🔑 Sign in ", centered(area, 60, 8));
}

pub fn render_register(frame: &mut Frame, app: &App, area: Rect) {
    render_form(frame, &app.register_form, " 📝 Create account ", centered(area, 70, 11));
}

fn render_form(frame: &mut Frame, form: &Form, title: &str, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(title);

    let mut lines = vec![Line::from("")];
    for (index, field) in form.fields().iter().enumerate() {
        let focused = index == form.focus();
        let label_style = if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };

        let mut spans = vec![
            Span::styled(if focused { "▶ " } else { "  " }, label_style),
            Span::styled(format!("{:<24}", field.label), label_style),
            Span::styled(field.display_value(), Style::default().fg(Color::White)),
        ];
        if focused {
            spans.push(Span::styled(
                "█",
                Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
            ));
        }
        lines.push(Line::from(spans));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

/// Zone centrée de `width` % de large et `height` lignes de haut
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - width) / 2),
            Constraint::Percentage(width),
            Constraint::Percentage((100 - width) / 2),
        ])
        .split(vertical[1])[1]
}
