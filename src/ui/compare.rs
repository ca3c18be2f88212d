// ============================================================================
// Écran Compare : session de scan + offres classées
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::App;
use crate::compare::{PriceDelta, RankedComparison};
use crate::ui::dashboard::render_message;

pub fn render_compare(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Ligne de scan
            Constraint::Min(0),    // Résultat
        ])
        .split(area);

    render_scan_line(frame, app, chunks[0]);

    match &app.comparison {
        Some(comparison) => render_comparison(frame, app, comparison, chunks[1]),
        None if app.is_loading_data() => {
            render_message(frame, chunks[1], "🔎 Comparing", "Fetching prices...", Color::Yellow)
        }
        None if app.scanner.is_latched() => render_message(
            frame,
            chunks[1],
            "📷 Scanner",
            "Press [Tab] to scan another product",
            Color::Gray,
        ),
        None => render_message(
            frame,
            chunks[1],
            "📷 Scanner",
            "Scan a barcode (or type it and press Enter)",
            Color::Gray,
        ),
    }
}

fn render_scan_line(frame: &mut Frame, app: &App, area: Rect) {
    let (status, color) = match app.scanner.current() {
        Some(token) if app.scanner.is_latched() => (format!(" Session #{} · locked ", token.id()), Color::Gray),
        Some(token) => (format!(" Session #{} · ready ", token.id()), Color::Green),
        None => (" Scanner closed ".to_string(), Color::Red),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(status);

    let line = Line::from(vec![
        Span::styled("Barcode: ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled(app.scan_buffer.as_str(), Style::default().fg(Color::White)),
        Span::styled(
            "█",
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    frame.render_widget(Paragraph::new(vec![line]).block(block), area);
}

fn render_comparison(frame: &mut Frame, app: &App, comparison: &RankedComparison, area: Rect) {
    let confirm_height = if app.purchase.is_awaiting_confirmation() { 4 } else { 0 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),              // Produit
            Constraint::Min(0),                 // Offres
            Constraint::Length(confirm_height), // Confirmation
        ])
        .split(area);

    render_product_header(frame, comparison, chunks[0]);
    render_offers(frame, app, comparison, chunks[1]);

    if app.purchase.is_awaiting_confirmation() {
        render_confirmation(frame, comparison, chunks[2]);
    }
}

fn render_product_header(frame: &mut Frame, comparison: &RankedComparison, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" {} {} ", comparison.country_flag_emoji, comparison.product_name));

    let mut lines = vec![Line::from(vec![
        Span::styled("Barcode ", Style::default().fg(Color::Gray)),
        Span::raw(comparison.barcode.as_str()),
        Span::styled("   Origin ", Style::default().fg(Color::Gray)),
        Span::raw(comparison.country_name.as_deref().unwrap_or("unknown")),
    ])];

    if let Some(savings) = comparison.potential_savings() {
        lines.push(Line::from(vec![
            Span::styled("Buying at the cheapest market saves ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{savings:.2}"),
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_offers(frame: &mut Frame, app: &App, comparison: &RankedComparison, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 🏪 Markets (cheapest first) ");

    let items: Vec<ListItem> = comparison
        .offers()
        .iter()
        .enumerate()
        .map(|(index, ranked)| {
            let style = match ranked.delta {
                PriceDelta::Cheapest => Style::default().fg(Color::Green),
                PriceDelta::Above(_) => Style::default().fg(Color::Red),
                PriceDelta::NotComparable => Style::default().fg(Color::Gray),
            };

            let badge = if index == 0 { "★" } else { " " };
            let line = format!(
                " {} {:<24} {:>10}  {}",
                badge,
                ranked.offer.market_name,
                format!("{:.2}", ranked.offer.price),
                ranked.delta.label()
            );

            let mut item = ListItem::new(line).style(style);
            if index == app.selected_offer {
                item = item.style(style.add_modifier(Modifier::BOLD).add_modifier(Modifier::REVERSED));
            }
            item
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn render_confirmation(frame: &mut Frame, comparison: &RankedComparison, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Confirm purchase ");

    let cheapest = comparison.cheapest();
    let text = vec![
        Line::from(format!(
            "Did you buy {} at {} for {:.2}?",
            comparison.product_name, cheapest.market_name, cheapest.price
        )),
        Line::from(vec![
            Span::styled("[y]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes   "),
            Span::styled("[n]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]),
    ];

    let paragraph = Paragraph::new(text)
        .block(block)
        .alignment(Alignment::Center);

    frame.render_widget(paragraph, area);
}
