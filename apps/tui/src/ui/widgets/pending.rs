use ocean_dash::views::{Slot, SlotState};
use ratatui::layout::{Alignment, Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;
use throbber_widgets_tui::{Throbber, ThrobberState, BRAILLE_SIX};

/// Draws `slot`: a hint while empty, a spinner while loading, and the
/// `ready` renderer once data is present.
pub fn render_slot<T>(
    f: &mut Frame<'_>,
    area: Rect,
    title: &str,
    slot: &Slot<T>,
    animation: f64,
    empty_hint: &str,
    ready: impl FnOnce(&mut Frame<'_>, Rect, &T),
) {
    match slot.state() {
        SlotState::Ready(loaded) => ready(f, area, &loaded.data),
        SlotState::Loading => render_loading(f, area, title, animation),
        SlotState::Empty => {
            let paragraph = Paragraph::new(empty_hint.to_string())
                .block(framed(title))
                .style(Style::default().fg(Color::Gray))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true });
            f.render_widget(paragraph, area);
        }
    }
}

pub fn framed(title: &str) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
}

pub fn render_loading(f: &mut Frame<'_>, area: Rect, title: &str, animation: f64) {
    f.render_widget(framed(title), area);

    let inner = area.inner(Margin::new(2, 1));
    let throbber = Throbber::default()
        .label("Loading...")
        .style(Style::default().fg(Color::Gray))
        .throbber_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .throbber_set(BRAILLE_SIX);

    // Spinner frame follows the app's animation clock
    let mut state = ThrobberState::default();
    #[allow(clippy::cast_possible_truncation)]
    state.calc_step((animation * 4.0) as i8);

    f.render_stateful_widget(throbber, inner, &mut state);
}
