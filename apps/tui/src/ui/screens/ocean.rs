use crate::app::App;
use crate::ui::widgets::charts::{render_plot, render_split_plot};
use crate::ui::widgets::pending::render_slot;
use ocean_dash::domain::DepthParameter;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line as TextLine, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

pub fn render_ocean(app: &App, f: &mut Frame<'_>, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(45), Constraint::Length(1), Constraint::Min(6)])
        .split(area);

    render_slot(
        f,
        rows[0],
        "Sea Surface Temperature Forecast",
        &app.ocean.sst,
        app.animation_counter,
        "Press r to load the forecast",
        |f, area, document| render_plot(f, area, document),
    );

    render_parameter_picker(app, f, rows[1]);

    let parameter = app.ocean.parameter();
    render_slot(
        f,
        rows[2],
        "Depth Profile",
        &app.ocean.depth,
        app.animation_counter,
        "Press r to load the profile",
        |f, area, document| {
            // The three combined series use unrelated value scales
            if parameter == DepthParameter::Combined {
                render_split_plot(f, area, document);
            } else {
                render_plot(f, area, document);
            }
        },
    );
}

fn render_parameter_picker(app: &App, f: &mut Frame<'_>, area: Rect) {
    let mut spans = vec![Span::styled("Depth parameter: ", Style::default().fg(Color::Gray))];
    for parameter in DepthParameter::ALL {
        let style = if parameter == app.ocean.parameter() {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} ", parameter.label()), style));
        spans.push(Span::raw(" "));
    }
    f.render_widget(Paragraph::new(TextLine::from(spans)), area);
}
