use crate::app::App;
use crate::ui::widgets::pending::{framed, render_slot};
use crate::ui::widgets::tables::visible_rows;
use ocean_dash::domain::EdnaReport;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Paragraph, Row, Table};
use ratatui::Frame;

pub fn render_biodiversity(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(5)])
        .split(area);

    let sample = app.biodiversity.file().map_or_else(
        || "No sample selected. Press u and enter the path of a FASTA file.".to_string(),
        |file| format!("{}: {}", file.name, file.summary()),
    );
    f.render_widget(Paragraph::new(sample).block(framed("Sample")), rows[0]);

    render_alert(app, f, rows[1]);

    let selected = app.edna_selection_index;
    render_slot(
        f,
        rows[2],
        "Detected Species",
        &app.biodiversity.report,
        app.animation_counter,
        "Upload an eDNA sample to identify species",
        |f, area, report| render_hits(f, area, report, selected),
    );
}

fn render_alert(app: &App, f: &mut Frame<'_>, area: Rect) {
    let line = app.biodiversity.alert().map_or_else(
        || TextLine::from(Span::styled("No invasive species detected", Style::default().fg(Color::Green))),
        |alert| {
            TextLine::from(Span::styled(
                format!("⚠ {alert}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ))
        },
    );
    f.render_widget(Paragraph::new(line).block(framed("Invasive Alert")), area);
}

fn render_hits(f: &mut Frame<'_>, area: Rect, report: &EdnaReport, selected: usize) {
    let hits = &report.detected_species;
    // Borders and header take three rows
    let window = visible_rows(hits.len(), usize::from(area.height.saturating_sub(3)), selected);

    let rows: Vec<Row<'_>> = hits[window.clone()]
        .iter()
        .zip(window)
        .map(|(hit, index)| {
            let mut style = if hit.invasive {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };
            if index == selected {
                style = style.add_modifier(Modifier::REVERSED);
            }
            Row::new(vec![
                hit.sequence_id.clone(),
                hit.display_name().to_string(),
                format!("{:.1}%", hit.confidence),
                if hit.invasive { "Yes" } else { "No" }.to_string(),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Min(20),
            Constraint::Length(11),
            Constraint::Length(9),
        ],
    )
    .header(
        Row::new(vec!["Sequence", "Species", "Confidence", "Invasive"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    )
    .block(framed(&format!("Detected Species ({})", hits.len())));

    f.render_widget(table, area);
}
