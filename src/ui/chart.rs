// ============================================================================
// Écran Profile : informations + graphique des économies
// ============================================================================
// Graphique ligne (semaine ou mois) dessiné avec le widget Chart de ratatui
//
// CONCEPTS RUST :
// 1. Decimal → f64 uniquement pour le dessin (ToPrimitive)
// 2. Vec<(f64, f64)> : ratatui emprunte les points, ils doivent vivre
//    jusqu'au render_widget
// ============================================================================

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::app::App;
use crate::models::{ChartPeriod, Series};
use crate::ui::dashboard::render_message;

pub fn render_profile(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Informations
            Constraint::Min(0),    // Graphique
        ])
        .split(area);

    render_profile_info(frame, app, chunks[0]);

    let series = app.chart.series(app.chart_period);
    if series.is_empty() || series.is_blank() {
        render_message(
            frame,
            chunks[1],
            &format!("📈 {} savings", app.chart_period.label()),
            "No savings yet. Scan products to start tracking!",
            Color::Gray,
        );
        return;
    }
    render_savings_chart(frame, series, app.chart_period, chunks[1]);
}

fn render_profile_info(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" 👤 Profile ");

    let Some(profile) = app.session.profile() else {
        frame.render_widget(Paragraph::new("Not signed in").block(block), area);
        return;
    };

    let label = Style::default().fg(Color::Gray);
    let amount = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" ({}) ", profile.initial()),
                Style::default().fg(Color::Black).bg(Color::Green),
            ),
            Span::raw(" "),
            Span::styled(
                profile.display_name(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Email          ", label),
            Span::raw(profile.email.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Total savings  ", label),
            Span::styled(format!("{:.2}", profile.total_savings), amount),
        ]),
        Line::from(vec![
            Span::styled("This month     ", label),
            Span::styled(format!("{:.2}", profile.monthly_savings), amount),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_savings_chart(frame: &mut Frame, series: &Series, period: ChartPeriod, area: Rect) {
    let points: Vec<(f64, f64)> = series
        .values
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, v.to_f64().unwrap_or(0.0)))
        .collect();

    let y_max = series
        .max_value()
        .and_then(|m| m.to_f64())
        .unwrap_or(0.0)
        .max(1.0)
        * 1.1;
    let x_max = (points.len().saturating_sub(1)).max(1) as f64;

    let datasets = vec![Dataset::default()
        .name(period.label())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points)];

    let x_axis = Axis::default()
        .title(match period {
            ChartPeriod::Weekly => "Day",
            ChartPeriod::Monthly => "Day of month",
        })
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, x_max])
        .labels(axis_labels(series));

    let y_axis = Axis::default()
        .title("Saved")
        .style(Style::default().fg(Color::Gray))
        .bounds([0.0, y_max])
        .labels(vec![
            Span::raw("0"),
            Span::raw(format!("{:.0}", y_max / 2.0)),
            Span::raw(format!("{:.0}", y_max)),
        ]);

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" 📈 {} savings ", period.label())),
        )
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Libellés de l'axe X : tous pour la semaine, premier / milieu / dernier sinon
fn axis_labels(series: &Series) -> Vec<Span<'static>> {
    if series.len() <= 7 {
        return series.labels.iter().map(|l| Span::raw(l.clone())).collect();
    }
    let last = series.len() - 1;
    [0, last / 2, last]
        .iter()
        .map(|&i| Span::raw(series.labels[i].clone()))
        .collect()
}
