use crate::app::input::helpers::cycle;
use crate::app::state::{App, InputState, View};
use crossterm::event::KeyCode;

mod biodiversity;
mod help;
mod ocean;
mod path_prompt;

pub async fn dispatch_input(app: &mut App, key: KeyCode) {
    if help::handle_overlay_keys(app, key) {
        return;
    }

    if app.input_state == InputState::EnteringPath {
        path_prompt::handle_path_input(app, key).await;
        return;
    }

    if help::handle_animation_toggle(app, key) {
        return;
    }

    if handle_navigation(app, key) {
        return;
    }

    match app.view {
        View::Dashboard => {}
        View::Ocean => ocean::handle_ocean_input(app, key),
        View::Fisheries => handle_fisheries_input(app, key),
        View::Biodiversity => biodiversity::handle_biodiversity_input(app, key),
    }
}

fn handle_navigation(app: &mut App, key: KeyCode) -> bool {
    let count = View::ALL.len();
    let target = match key {
        KeyCode::Char('q') => {
            app.running = false;
            return true;
        }
        KeyCode::Char('r') => {
            app.refresh();
            return true;
        }
        KeyCode::Char('u') if app.view.accepts_upload() => {
            app.input_state = InputState::EnteringPath;
            app.current_input.clear();
            return true;
        }
        KeyCode::Char(ch @ '1'..='4') => {
            let index = ch as usize - '1' as usize;
            View::from_index(index)
        }
        KeyCode::Tab | KeyCode::Right => View::from_index(cycle(app.view.index(), count, 1)),
        KeyCode::BackTab | KeyCode::Left => {
            View::from_index(cycle(app.view.index(), count, -1))
        }
        _ => return false,
    };

    if let Some(view) = target {
        app.navigate(view);
    }
    true
}

fn handle_fisheries_input(app: &mut App, key: KeyCode) {
    if key == KeyCode::Char('c') {
        app.reclassify();
    }
}
