use crate::app::state::View;
use crate::app::App;
use crate::ui::widgets::popup::popup_area;
use ratatui::style::{Color, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

pub fn render_path_prompt(app: &App, f: &mut Frame<'_>) {
    let area = popup_area(f.area(), 60, 20, 5);

    let what = if app.view == View::Fisheries {
        "fish image"
    } else {
        "eDNA sample"
    };
    // Blink the cursor with the animation clock
    let cursor = if app.animation_counter.sin() > 0.0 { "_" } else { " " };

    let lines = vec![
        TextLine::from(Span::styled(
            format!("Path to {what}:"),
            Style::default().fg(Color::Green),
        )),
        TextLine::from(format!("> {}{cursor}", app.current_input)),
        TextLine::from(Span::styled(
            "Enter to upload, Esc to cancel",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    f.render_widget(Clear, area);
    let block = Block::default()
        .title(" Upload ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green));
    f.render_widget(Paragraph::new(lines).block(block), area);
}
