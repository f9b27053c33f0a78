use crate::app::App;
use crate::ui::widgets::pending::{framed, render_slot};
use ocean_dash::domain::{ClassificationResult, SustainabilityMetrics};
use ocean_dash::views::HealthPanel;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Paragraph, Wrap};
use ratatui::Frame;

pub fn render_fisheries(app: &App, f: &mut Frame<'_>, area: Rect) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(5)])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(columns[1]);

    render_upload(app, f, left[0]);
    render_slot(
        f,
        left[1],
        "Classification",
        &app.fisheries.classification,
        app.animation_counter,
        "Press u and enter the path of a fish image to classify it",
        render_classification,
    );
    render_slot(
        f,
        right[0],
        "Model Health Check",
        &app.fisheries.health,
        app.animation_counter,
        "Press r to load the health check",
        render_health,
    );
    render_slot(
        f,
        right[1],
        "Stock Sustainability",
        &app.fisheries.metrics,
        app.animation_counter,
        "Press r to load stock metrics",
        render_metrics,
    );
}

fn render_upload(app: &App, f: &mut Frame<'_>, area: Rect) {
    let lines = app.fisheries.preview().map_or_else(
        || vec![TextLine::from("No image selected")],
        |preview| {
            vec![
                TextLine::from(vec![
                    Span::styled("File: ", Style::default().fg(Color::Gray)),
                    Span::raw(preview.file_name.clone()),
                ]),
                TextLine::from(Span::styled(
                    preview.summary.clone(),
                    Style::default().fg(Color::Gray),
                )),
                TextLine::from(Span::styled(
                    app.fisheries.preview_label().unwrap_or_default(),
                    Style::default().fg(Color::DarkGray),
                )),
            ]
        },
    );

    f.render_widget(Paragraph::new(lines).block(framed("Image")), area);
}

fn label_line(label: &str, value: String, color: Color) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
        Span::styled(value, Style::default().fg(color).add_modifier(Modifier::BOLD)),
    ])
}

fn render_classification(f: &mut Frame<'_>, area: Rect, result: &ClassificationResult) {
    let text = Text::from(vec![
        TextLine::from(""),
        label_line("Species", result.species.clone(), Color::Cyan),
        label_line("Confidence", result.confidence.clone(), Color::Green),
    ]);
    let paragraph = Paragraph::new(text)
        .block(framed("Classification"))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

fn render_health(f: &mut Frame<'_>, area: Rect, panel: &HealthPanel) {
    let lines = match panel {
        HealthPanel::Image(image) => vec![
            label_line(
                "Chart",
                format!("{}x{} PNG", image.width, image.height),
                Color::Green,
            ),
            label_line("Size", format!("{} bytes", image.byte_len), Color::White),
        ],
        HealthPanel::Placeholder => vec![
            TextLine::from(""),
            TextLine::from(Span::styled(
                "Health-check chart unavailable",
                Style::default().fg(Color::Gray),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines)
        .block(framed("Model Health Check"))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

const fn status_color(status: &str) -> Color {
    match status.as_bytes() {
        b"Sustainable" => Color::Green,
        b"Fully Exploited" => Color::Yellow,
        b"Overfishing" => Color::Red,
        _ => Color::White,
    }
}

fn render_metrics(f: &mut Frame<'_>, area: Rect, metrics: &SustainabilityMetrics) {
    let text = Text::from(vec![
        label_line("Current stock", metrics.current_stock.to_string(), Color::White),
        label_line(
            "Change",
            format!("{:+.2}%", metrics.stock_change_percent),
            Color::White,
        ),
        label_line(
            "Exploitation",
            format!("{:.2}%", metrics.exploitation_rate),
            Color::White,
        ),
        label_line(
            "Status",
            metrics.sustainability_status.clone(),
            status_color(&metrics.sustainability_status),
        ),
        label_line("Trend", metrics.trend.clone(), Color::White),
        TextLine::from(""),
        TextLine::from(Span::styled(
            metrics.recommendation.clone(),
            Style::default().fg(Color::Gray),
        )),
    ]);

    let paragraph = Paragraph::new(text)
        .block(framed("Stock Sustainability"))
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}
