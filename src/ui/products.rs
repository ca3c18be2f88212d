// ============================================================================
// Écrans produits : liste de courses, recherche, fiche nutritionnelle
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::ui::dashboard::render_message;

/// Liste d'éléments avec surlignage de la sélection
fn selectable_list<'a>(lines: Vec<String>, selected: usize, title: &'a str) -> List<'a> {
    let items: Vec<ListItem> = lines
        .into_iter()
        .enumerate()
        .map(|(index, line)| {
            let style = Style::default().fg(Color::White);
            if index == selected {
                ListItem::new(line).style(style.add_modifier(Modifier::BOLD).add_modifier(Modifier::REVERSED))
            } else {
                ListItem::new(line).style(style)
            }
        })
        .collect();

    List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(title),
    )
}

pub fn render_shopping_list(frame: &mut Frame, app: &App, area: Rect) {
    if app.shopping_list.is_empty() {
        render_message(
            frame,
            area,
            "📝 Shopping list",
            "Your list is empty, press [a] to add an item",
            Color::Gray,
        );
        return;
    }

    let lines = app
        .shopping_list
        .items()
        .iter()
        .map(|item| format!(" • {item}"))
        .collect();

    frame.render_widget(
        selectable_list(lines, app.list_selected, " 📝 Shopping list "),
        area,
    );
}

pub fn render_search(frame: &mut Frame, app: &App, area: Rect) {
    if app.search_results.is_empty() {
        render_message(frame, area, "🔎 Search", "No product found, press [a] to search again", Color::Gray);
        return;
    }

    let lines = app
        .search_results
        .iter()
        .map(|product| match &product.barcode {
            Some(barcode) => format!(" {:<40} {}", product.name, barcode),
            None => format!(" {}", product.name),
        })
        .collect();

    frame.render_widget(selectable_list(lines, app.search_selected, " 🔎 Results "), area);
}

pub fn render_product_detail(frame: &mut Frame, app: &App, area: Rect) {
    let Some(product) = &app.product else {
        render_message(frame, area, "📦 Product", "No product selected", Color::Gray);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Identité
            Constraint::Length(9), // Valeurs nutritionnelles
            Constraint::Min(0),    // Ingrédients
        ])
        .split(area);

    let header = vec![
        Line::from(vec![
            Span::styled("Category ", Style::default().fg(Color::Gray)),
            Span::raw(product.category.as_deref().unwrap_or("-")),
        ]),
        Line::from(vec![
            Span::styled("Origin   ", Style::default().fg(Color::Gray)),
            Span::raw(format!(
                "{} {}",
                product.country_flag(),
                product.country.as_deref().unwrap_or("unknown")
            )),
        ]),
    ];
    frame.render_widget(
        Paragraph::new(header).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(format!(" 📦 {} ", product.name)),
        ),
        chunks[0],
    );

    let nutrition: Vec<Line> = product
        .nutrition_rows()
        .into_iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!(" {label:<16}"), Style::default().fg(Color::Gray)),
                Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ])
        })
        .collect();
    frame.render_widget(
        Paragraph::new(nutrition).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Per 100 g "),
        ),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(product.ingredients.as_deref().unwrap_or("No ingredient list"))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan))
                    .title(" Ingredients "),
            ),
        chunks[2],
    );
}
