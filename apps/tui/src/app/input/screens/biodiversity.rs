use crate::app::state::App;
use crossterm::event::KeyCode;

#[allow(clippy::missing_const_for_fn)]
pub fn handle_biodiversity_input(app: &mut App, key: KeyCode) {
    let total_rows = app
        .biodiversity
        .report
        .ready()
        .map_or(0, |loaded| loaded.data.detected_species.len());

    match key {
        KeyCode::Up => {
            if app.edna_selection_index > 0 {
                app.edna_selection_index -= 1;
            }
        }
        KeyCode::Down => {
            if total_rows > 0 && app.edna_selection_index + 1 < total_rows {
                app.edna_selection_index += 1;
            }
        }
        KeyCode::Home => app.edna_selection_index = 0,
        KeyCode::End => app.edna_selection_index = total_rows.saturating_sub(1),
        _ => {}
    }
}
