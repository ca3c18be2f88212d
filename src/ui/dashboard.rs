// ============================================================================
// Dashboard : routage des écrans et cadre commun
// ============================================================================
// Chaque écran a la même structure :
// ┌─────────────────────────────┐
// │ Header (titre + utilisateur)│
// ├─────────────────────────────┤
// │ Contenu de l'écran          │
// ├─────────────────────────────┤
// │ Footer (alerte / raccourcis)│
// └─────────────────────────────┘
//
// CONCEPTS RUST :
// 1. Un seul point d'entrée render(), match exhaustif sur Screen
// 2. Lifetimes 'a sur Span/Line : le texte emprunte l'état de App
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{AlertKind, App, Screen};
use crate::ui::{chart, compare, forms, health, products};

/// Point d'entrée du rendu
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = create_layout(frame.size());

    render_header(frame, app, chunks[0]);

    match app.content_screen() {
        Screen::Login => forms::render_login(frame, app, chunks[1]),
        Screen::Register => forms::render_register(frame, app, chunks[1]),
        Screen::Home => render_home(frame, app, chunks[1]),
        Screen::Compare => compare::render_compare(frame, app, chunks[1]),
        Screen::ShoppingList => products::render_shopping_list(frame, app, chunks[1]),
        Screen::Profile => chart::render_profile(frame, app, chunks[1]),
        Screen::Health => health::render_health(frame, app, chunks[1]),
        Screen::Chatbot => health::render_chatbot(frame, app, chunks[1]),
        Screen::Search => products::render_search(frame, app, chunks[1]),
        Screen::ProductDetail => products::render_product_detail(frame, app, chunks[1]),
        // content_screen() ne retourne jamais InputMode
        Screen::InputMode => {}
    }

    if app.is_in_input_mode() {
        render_input_footer(frame, app, chunks[2]);
    } else {
        render_footer(frame, app, chunks[2]);
    }
}

fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Contenu
            Constraint::Length(3), // Footer
        ])
        .split(area)
        .to_vec()
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazyCart ")
        .title_alignment(Alignment::Center);

    let line = match app.session.profile() {
        Some(profile) => Line::from(vec![
            Span::styled(
                format!("👤 {}", profile.display_name()),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled("Saved: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.2}", profile.total_savings),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            Span::styled("  this month: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{:.2}", profile.monthly_savings),
                Style::default().fg(Color::Yellow),
            ),
        ]),
        None => Line::from(Span::styled(
            "🛒 Compare supermarket prices, keep the difference",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Menu principal
// ============================================================================

const MENU: [(char, &str); 7] = [
    ('s', "Scan a barcode and compare prices"),
    ('f', "Find a product"),
    ('l', "Shopping list"),
    ('p', "Profile and savings chart"),
    ('h', "Health profile"),
    ('c', "Ask the assistant about a product"),
    ('o', "Log out"),
];

fn render_home(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 🏠 Home ");

    let name = app
        .session
        .profile()
        .map(|p| p.name.clone())
        .unwrap_or_default();

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Hello {name}!"),
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Ready to shop smart? Scan a product to find the cheapest market.",
            Style::default().fg(Color::Gray),
        )),
        Line::from(""),
    ];

    lines.extend(MENU.iter().map(|(key, label)| {
        Line::from(vec![
            Span::styled(format!("[{key}]"), key_style(Color::Yellow)),
            Span::raw(format!(" {label}")),
        ])
    }));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Footer
// ============================================================================

/// Style d'un raccourci clavier dans le footer
pub(crate) fn key_style(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

/// "[touche] libellé" prêt à insérer dans une Line
pub(crate) fn hint<'a>(key: &'a str, label: &'a str, color: Color) -> [Span<'a>; 2] {
    [
        Span::styled(key, key_style(color)),
        Span::raw(format!(" {label}  ")),
    ]
}

fn warning_line<'a>(before: &'a str, key: &'a str, after: String) -> Line<'a> {
    let warn_style = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    Line::from(vec![
        Span::styled(before, warn_style),
        Span::styled(
            key,
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD)
                .add_modifier(Modifier::SLOW_BLINK),
        ),
        Span::styled(after, warn_style),
    ])
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let line = if let Some(alert) = &app.alert {
        let (icon, color) = match alert.kind {
            AlertKind::Info => ("ℹ ", Color::Green),
            AlertKind::Error => ("⚠ ", Color::Red),
        };
        Line::from(Span::styled(
            format!("{icon} {}", alert.message),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    } else if app.is_loading_data() {
        Line::from(Span::styled(
            format!(
                "⏳ {}",
                app.loading_message.as_deref().unwrap_or("Loading...")
            ),
            Style::default().fg(Color::Yellow),
        ))
    } else if app.is_awaiting_quit_confirmation() {
        warning_line(
            "⚠  Press ",
            "[q]",
            " again to quit, any other key to cancel ⚠".to_string(),
        )
    } else if app.is_awaiting_delete_confirmation() {
        let item = app
            .shopping_list
            .items()
            .get(app.list_selected)
            .map(String::as_str)
            .unwrap_or("?");
        warning_line(
            "⚠  Press ",
            "[d]",
            format!(" again to remove {item}, any other key to cancel ⚠"),
        )
    } else if app.is_awaiting_logout_confirmation() {
        warning_line(
            "⚠  Press ",
            "[o]",
            " again to log out, any other key to cancel ⚠".to_string(),
        )
    } else {
        shortcuts(app)
    };

    let paragraph = Paragraph::new(vec![line])
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}

/// Raccourcis de l'écran courant
fn shortcuts(app: &App) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut push = |key: &'static str, label: &'static str, color: Color| {
        spans.extend(hint(key, label, color));
    };

    match app.current_screen {
        Screen::Login => {
            push("[Tab]", "Next field", Color::Yellow);
            push("[Enter]", "Sign in", Color::Green);
            push("[F2]", "Create account", Color::Cyan);
            push("[Ctrl-C]", "Quit", Color::Red);
        }
        Screen::Register => {
            push("[Tab]", "Next field", Color::Yellow);
            push("[Enter]", "Register", Color::Green);
            push("[ESC]", "Back", Color::Red);
        }
        Screen::Home => {
            push("[q]", "Quit", Color::Yellow);
        }
        Screen::Compare => {
            if app.purchase.is_awaiting_confirmation() {
                push("[y]", "Yes, I bought it", Color::Green);
                push("[n]", "No", Color::Red);
            } else {
                push("[scan / type + Enter]", "Compare", Color::Yellow);
                push("[↑↓]", "Navigate", Color::Yellow);
                push("[Enter]", "Buy cheapest", Color::Green);
                push("[Tab]", "Scan again", Color::Cyan);
                push("[ESC]", "Back", Color::Red);
            }
        }
        Screen::ShoppingList => {
            push("[↑↓ / j k]", "Navigate", Color::Yellow);
            push("[a]", "Add", Color::Green);
            push("[d]", "Delete", Color::Red);
            push("[ESC]", "Back", Color::Yellow);
        }
        Screen::Profile => {
            push("[← →]", "Week / Month", Color::Yellow);
            push("[r]", "Refresh", Color::Green);
            push("[ESC]", "Back", Color::Yellow);
        }
        Screen::Health => {
            push("[← →]", "Column", Color::Yellow);
            push("[↑↓]", "Navigate", Color::Yellow);
            push("[Space]", "Toggle", Color::Cyan);
            push("[s]", "Save", Color::Green);
            push("[ESC]", "Back", Color::Yellow);
        }
        Screen::Chatbot => {
            push("[a]", "Ask about a product", Color::Green);
            push("[ESC]", "Back", Color::Yellow);
        }
        Screen::Search => {
            push("[↑↓]", "Navigate", Color::Yellow);
            push("[Enter]", "Details", Color::Green);
            push("[a]", "New search", Color::Cyan);
            push("[ESC]", "Back", Color::Yellow);
        }
        Screen::ProductDetail => {
            push("[ESC]", "Back", Color::Yellow);
        }
        Screen::InputMode => {}
    }

    Line::from(spans)
}

fn render_input_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));

    let input_line = Line::from(vec![
        Span::styled(
            app.input_prompt.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.input_buffer.as_str(), Style::default().fg(Color::White)),
        Span::styled(
            "█",
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
        Span::raw("   "),
        Span::styled("[Enter]", key_style(Color::Green)),
        Span::raw(" Confirm  "),
        Span::styled("[ESC]", key_style(Color::Red)),
        Span::raw(" Cancel"),
    ]);

    let paragraph = Paragraph::new(vec![input_line])
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

/// Message centré dans un bloc (écran vide, erreur)
pub(crate) fn render_message(frame: &mut Frame, area: Rect, title: &str, message: &str, color: Color) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(format!(" {title} "));

    let text = vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(color))),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
