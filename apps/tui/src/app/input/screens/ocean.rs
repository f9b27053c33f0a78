use crate::app::input::helpers::cycle;
use crate::app::state::App;
use crossterm::event::KeyCode;
use ocean_dash::domain::DepthParameter;

pub fn handle_ocean_input(app: &mut App, key: KeyCode) {
    let count = DepthParameter::ALL.len();
    let current = app.ocean.parameter().index();

    let step = match key {
        KeyCode::Down | KeyCode::Char('p') => 1,
        KeyCode::Up => -1,
        _ => return,
    };

    if let Some(parameter) = DepthParameter::from_index(cycle(current, count, step)) {
        app.set_depth_parameter(parameter);
        app.status_message = format!("Depth parameter: {}", parameter.label());
    }
}
