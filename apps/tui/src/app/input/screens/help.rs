use crate::app::state::{App, InputState};
use crossterm::event::KeyCode;

/// Keys that work on top of every view. Returns `true` when `key` was used.
/// While the help overlay is open it swallows everything else.
pub fn handle_overlay_keys(app: &mut App, key: KeyCode) -> bool {
    let typing = app.input_state == InputState::EnteringPath;
    match (app.show_help, key) {
        (false, KeyCode::Char('?')) if typing => false,
        (_, KeyCode::F(1)) | (false, KeyCode::Char('?')) => {
            app.show_help = !app.show_help;
            true
        }
        (true, KeyCode::Esc | KeyCode::Char('?')) => {
            app.show_help = false;
            true
        }
        (true, _) => true,
        (false, _) => false,
    }
}

pub fn handle_animation_toggle(app: &mut App, key: KeyCode) -> bool {
    if key != KeyCode::Char(' ') {
        return false;
    }
    app.toggle_animation_pause();
    app.status_message = if app.animation_paused {
        "Animations paused".to_string()
    } else {
        "Animations resumed".to_string()
    };
    true
}
