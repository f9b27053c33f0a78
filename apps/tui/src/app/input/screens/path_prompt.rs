use crate::app::state::{App, InputState};
use crossterm::event::KeyCode;
use log::warn;
use ocean_dash::upload::UploadedFile;
use std::path::PathBuf;

pub async fn handle_path_input(app: &mut App, key: KeyCode) {
    match key {
        KeyCode::Esc => {
            app.input_state = InputState::Browsing;
            app.current_input.clear();
        }
        KeyCode::Enter => submit_path(app).await,
        KeyCode::Backspace => {
            app.current_input.pop();
        }
        KeyCode::Char(ch) => app.current_input.push(ch),
        _ => {}
    }
}

async fn submit_path(app: &mut App) {
    let input = app.current_input.trim();
    if input.is_empty() {
        app.status_message = "Enter a file path first".to_string();
        return;
    }

    let path = PathBuf::from(input);
    match UploadedFile::from_path(&path).await {
        Ok(file) => {
            app.input_state = InputState::Browsing;
            app.current_input.clear();
            app.submit_upload(file);
        }
        Err(e) => {
            // Keep the prompt open so the path can be corrected
            warn!("upload rejected: {e}");
            app.status_message = format!("Error: {e}");
        }
    }
}
