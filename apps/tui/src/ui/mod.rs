// UI module for ocean_dash
// Frame layout shared by every view, then one screen per view

pub mod screens;
pub mod widgets;

use crate::app::state::{slot_source, InputState, View};
use crate::app::App;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

pub fn ui(app: &App, f: &mut Frame<'_>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // View tabs
            Constraint::Min(8),    // Current view
            Constraint::Length(3), // Status area
            Constraint::Length(1), // Shortcuts hint
        ])
        .split(f.area().inner(Margin::new(1, 0)));

    render_tabs(app, f, layout[0]);

    match app.view {
        View::Dashboard => screens::dashboard::render_dashboard(app, f, layout[1]),
        View::Ocean => screens::ocean::render_ocean(app, f, layout[1]),
        View::Fisheries => screens::fisheries::render_fisheries(app, f, layout[1]),
        View::Biodiversity => screens::biodiversity::render_biodiversity(app, f, layout[1]),
    }

    render_status(app, f, layout[2]);
    render_shortcuts(app, f, layout[3]);

    if app.input_state == InputState::EnteringPath {
        screens::prompt::render_path_prompt(app, f);
    }

    if app.show_help {
        screens::help::render_help(f);
    }
}

fn render_tabs(app: &App, f: &mut Frame<'_>, area: Rect) {
    let titles = View::ALL
        .iter()
        .map(|view| TextLine::from(format!("{} {}", view.index() + 1, view.label())))
        .collect::<Vec<_>>();

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(" Ocean Dash ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .select(app.view.index())
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::raw("|"));

    f.render_widget(tabs, area);
}

/// Where each slot of the current view got its data.
fn source_summary(app: &App) -> String {
    let entries: Vec<(&str, Option<String>)> = match app.view {
        View::Dashboard => vec![("forecast", slot_source(&app.dashboard.forecast))],
        View::Ocean => vec![
            ("sst", slot_source(&app.ocean.sst)),
            ("depth", slot_source(&app.ocean.depth)),
        ],
        View::Fisheries => vec![
            ("classification", slot_source(&app.fisheries.classification)),
            ("health", slot_source(&app.fisheries.health)),
            ("metrics", slot_source(&app.fisheries.metrics)),
        ],
        View::Biodiversity => vec![("edna", slot_source(&app.biodiversity.report))],
    };

    entries
        .into_iter()
        .filter_map(|(slot, source)| source.map(|source| format!("{slot}: {source}")))
        .collect::<Vec<_>>()
        .join("  ")
}

fn render_status(app: &App, f: &mut Frame<'_>, area: Rect) {
    let updated = app.last_update.map_or_else(
        || "never".to_string(),
        |at| at.format("%H:%M:%S").to_string(),
    );

    let line = TextLine::from(vec![
        Span::styled(
            app.status_message.clone(),
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled(source_summary(app), Style::default().fg(Color::DarkGray)),
        Span::raw("  "),
        Span::styled(
            format!("updated {updated}"),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let status = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    f.render_widget(status, area);
}

fn render_shortcuts(app: &App, f: &mut Frame<'_>, area: Rect) {
    let extra = match app.view {
        View::Dashboard => "",
        View::Ocean => "  ↑/↓ or p: depth parameter",
        View::Fisheries => "  u: upload image  c: classify again",
        View::Biodiversity => "  u: upload sample  ↑/↓: scroll",
    };
    let text = format!("1-4/Tab: switch view  r: refresh{extra}  F1: help  q: quit");
    let shortcuts = Paragraph::new(text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(shortcuts, area);
}
