use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::theme;
use super::util::format_amount;

pub(crate) fn render(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(5),    // Main content
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Input bar
        ])
        .split(f.area());

    render_tab_bar(f, chunks[0], app);
    render_screen(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
    render_input_bar(f, chunks[3], app);
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let titles: Vec<Line> = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let num = format!("{}", i + 1);
            if *s == app.screen {
                Line::from(vec![
                    Span::styled(format!("{num}:"), Style::default().fg(theme::TEXT_DIM)),
                    Span::styled(
                        format!("{s}"),
                        Style::default()
                            .fg(theme::ACCENT)
                            .add_modifier(Modifier::BOLD),
                    ),
                ])
            } else {
                Line::from(Span::styled(
                    format!("{num}:{s}"),
                    Style::default().fg(theme::TEXT_DIM),
                ))
            }
        })
        .collect();

    let tabs = Tabs::new(titles)
        .divider(Span::styled(" | ", Style::default().fg(theme::OVERLAY)))
        .style(Style::default().bg(theme::HEADER_BG));

    f.render_widget(tabs, area);
}

fn render_screen(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::Feed => super::screens::feed::render(f, area, app),
        Screen::Summary => super::screens::summary::render(f, area, app),
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_label = format!(" {} ", app.input_mode);
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::ACCENT)
            .add_modifier(Modifier::BOLD),
        InputMode::Adding => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::GREEN)
            .add_modifier(Modifier::BOLD),
        InputMode::Confirm => Style::default()
            .fg(theme::HEADER_BG)
            .bg(theme::RED)
            .add_modifier(Modifier::BOLD),
    };

    let balance_style = if app.balance < rust_decimal::Decimal::ZERO {
        Style::default().fg(theme::RED).bg(theme::SURFACE)
    } else {
        Style::default().fg(theme::GREEN).bg(theme::SURFACE)
    };

    let info = format!(
        " {} | {} txns | Balance: ",
        app.screen,
        app.feed.len()
    );

    let line = Line::from(vec![
        Span::styled(mode_label, mode_style),
        Span::styled(info, theme::status_bar_style()),
        Span::styled(format_amount(app.balance, &app.currency), balance_style),
        Span::styled(format!("  {}", app.status_message), theme::status_bar_style()),
    ]);

    f.render_widget(
        Paragraph::new(line).style(theme::status_bar_style()),
        area,
    );
}

fn render_input_bar(f: &mut Frame, area: Rect, app: &App) {
    let line = match app.input_mode {
        InputMode::Adding => {
            let direction = app.add_direction.label();
            Line::from(vec![
                Span::styled(
                    format!(" add {direction} "),
                    Style::default().fg(theme::INPUT_BG).bg(theme::GREEN),
                ),
                Span::styled(" amount: ", theme::dim_style()),
                Span::styled(
                    format!("{}_", app.add_amount),
                    theme::normal_style().add_modifier(Modifier::BOLD),
                ),
                Span::styled("  category: ", theme::dim_style()),
                Span::styled(
                    format!("‹ {} ›", app.add_category()),
                    Style::default().fg(theme::ACCENT),
                ),
                Span::styled(
                    "  Tab/←→ category | Enter save | Esc cancel",
                    theme::dim_style(),
                ),
            ])
        }
        InputMode::Confirm => Line::from(vec![
            Span::styled(
                format!(" {} ", app.confirm_message),
                Style::default().fg(theme::YELLOW),
            ),
            Span::styled("(y/n)", theme::dim_style()),
        ]),
        InputMode::Normal => Line::from(Span::styled(
            " i income | e expense | D delete | c currency | 1/2/Tab screens | q quit",
            theme::dim_style(),
        )),
    };

    f.render_widget(Paragraph::new(line).style(theme::input_bar_style()), area);
}
