use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::format_amount;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    render_balance(f, chunks[0], app);
    render_categories(f, chunks[1], app);
}

fn render_balance(f: &mut Frame, area: Rect, app: &App) {
    let balance_style = if app.balance < Decimal::ZERO {
        Style::default()
            .fg(theme::RED)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(theme::GREEN)
            .add_modifier(Modifier::BOLD)
    };

    let line = Line::from(vec![
        Span::styled("Balance: ", theme::normal_style()),
        Span::styled(format_amount(app.balance, &app.currency), balance_style),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY));

    f.render_widget(Paragraph::new(line).centered().block(block), area);
}

fn render_categories(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Expenses by category ",
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ));

    if app.summary_rows.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses yet", theme::dim_style())),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    // Bar chart: one row per category, bar length proportional to its share.
    let bar_width = area.width.saturating_sub(46).max(10) as usize;
    let lines: Vec<Line> = app
        .summary_rows
        .iter()
        .take(area.height.saturating_sub(2) as usize)
        .map(|(category, total, share)| {
            let ratio = (share.to_f64().unwrap_or(0.0) / 100.0).clamp(0.0, 1.0);
            let filled = (bar_width as f64 * ratio).round() as usize;
            let bar: String = "█".repeat(filled);

            Line::from(vec![
                Span::styled(format!("{category:<15}"), theme::normal_style()),
                Span::styled(
                    format!("{:>12}", format_amount(*total, &app.currency)),
                    theme::expense_style(),
                ),
                Span::styled(format!("{share:>8}% "), theme::dim_style()),
                Span::styled(bar, Style::default().fg(theme::ACCENT)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
