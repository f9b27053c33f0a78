use crate::app::App;
use crate::ui::widgets::charts::render_plot;
use crate::ui::widgets::pending::render_slot;
use ratatui::layout::Rect;
use ratatui::Frame;

pub fn render_dashboard(app: &App, f: &mut Frame<'_>, area: Rect) {
    render_slot(
        f,
        area,
        "Fish Stock Forecast",
        &app.dashboard.forecast,
        app.animation_counter,
        "Press r to load the forecast",
        |f, area, document| render_plot(f, area, document),
    );
}
