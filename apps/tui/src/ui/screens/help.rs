use crate::ui::widgets::popup::popup_area;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span, Text};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

fn key_line(key: &'static str, description: &'static str) -> TextLine<'static> {
    TextLine::from(vec![
        Span::styled(
            format!("  {key}"),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" - {description}")),
    ])
}

pub fn render_help(f: &mut Frame<'_>) {
    let area = popup_area(f.area(), 70, 80, 12);

    let help_block = Block::default()
        .title("== Help & Keyboard Shortcuts ==")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let help_text = vec![
        TextLine::from(Span::styled(
            "Ocean Dash",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        TextLine::from(""),
        TextLine::from("Forecasts, ocean profiles, fish classification and eDNA analysis from the marine analytics service."),
        TextLine::from("When the service cannot answer, generated sample data is shown instead; the status bar names the source."),
        TextLine::from(""),
        TextLine::from(Span::styled("Keyboard Shortcuts:", bold)),
        key_line("F1, ?", "Toggle this help screen"),
        key_line("1-4", "Dashboard / Ocean Data / Fisheries / Biodiversity"),
        key_line("Tab, ←/→", "Next / previous view"),
        key_line("r", "Reload the current view (Fisheries keeps its image)"),
        key_line("Space", "Pause animations"),
        key_line("q", "Quit application"),
        TextLine::from(""),
        TextLine::from(Span::styled("Ocean Data:", bold)),
        key_line("↑/↓, p", "Cycle the depth parameter"),
        TextLine::from(""),
        TextLine::from(Span::styled("Fisheries:", bold)),
        key_line("u", "Upload a fish image"),
        key_line("c", "Classify the current image again"),
        TextLine::from(""),
        TextLine::from(Span::styled("Biodiversity:", bold)),
        key_line("u", "Upload an eDNA sample (FASTA)"),
        key_line("↑/↓", "Scroll detected species"),
        TextLine::from(""),
        TextLine::from(Span::styled(
            "Press Esc or ? to close this help screen",
            Style::default().fg(Color::Yellow),
        )),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_text))
        .block(help_block)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(help_paragraph, area);
}
