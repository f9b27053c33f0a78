use color_eyre::eyre::{eyre, Result};
use crossterm::{
    cursor, execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{debug, info, warn};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout, Write};

pub type DashTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Raw mode, alternate screen, hidden cursor. A failing step undoes the
/// ones before it, so an error never leaves the shell in raw mode.
pub fn setup_terminal() -> Result<DashTerminal> {
    let (width, height) = crossterm::terminal::size().unwrap_or((80, 24));
    info!("setting up terminal ({width}x{height})");

    enable_raw_mode().map_err(|e| eyre!("Failed to enable raw mode: {e}"))?;

    if let Err(e) = execute!(stdout(), EnterAlternateScreen) {
        cleanup_terminal_state(true, false);
        return Err(eyre!("Failed to enter alternate screen: {e}"));
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout())) {
        Ok(terminal) => terminal,
        Err(e) => {
            cleanup_terminal_state(true, true);
            return Err(eyre!("Failed to create terminal: {e}"));
        }
    };

    if let Err(e) = terminal.clear() {
        warn!("failed to clear terminal: {e}");
    }
    if let Err(e) = execute!(stdout(), cursor::Hide) {
        warn!("failed to hide cursor: {e}");
    }

    debug!("terminal ready");
    Ok(terminal)
}

/// Undoes whichever parts of [`setup_terminal`] took effect. Failures are
/// logged, since there is no terminal left to report them on.
pub fn cleanup_terminal_state(raw_mode: bool, alternate_screen: bool) {
    let mut out = stdout();

    if let Err(e) = execute!(out, cursor::Show) {
        warn!("failed to show cursor: {e}");
    }
    if alternate_screen {
        if let Err(e) = execute!(out, LeaveAlternateScreen) {
            warn!("failed to leave alternate screen: {e}");
        }
    }
    if raw_mode {
        if let Err(e) = disable_raw_mode() {
            warn!("failed to disable raw mode: {e}");
        }
    }

    // Leave the shell prompt on a fresh line
    let _ = execute!(out, cursor::MoveToNextLine(1));
    let _ = out.flush();

    debug!("terminal restored");
}
