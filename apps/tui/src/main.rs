mod app;
mod cli;
mod event;
mod terminal;
mod ui;

use app::actions::AppActions;
use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;
use log::info;
use ocean_dash::config::AppConfig;
use ocean_dash::mock::FishClassifierMock;
use ocean_dash::{logging, ApiClient};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", CliArgs::help_text());
            return Err(e.into());
        }
    };

    logging::init(&config.log_file, args.debug)?;
    info!(
        "backend {} (timeout {})",
        config.base_url,
        config
            .timeout
            .map_or_else(|| "none".to_string(), |t| format!("{}s", t.as_secs()))
    );

    let client = ApiClient::new(&config.base_url, config.timeout)?;
    let (actions, outcomes) =
        AppActions::new(Arc::new(client), Arc::new(FishClassifierMock::new()));
    let mut app = App::new(actions, outcomes);

    // Without a terminal there is nothing to draw on
    if args.headless || !is_terminal() {
        return event::run_headless(&mut app, args.json, &config.base_url).await;
    }

    let mut terminal = terminal::setup_terminal()?;

    let result = event::run(&mut terminal, &mut app).await;

    app.shutdown();
    terminal::cleanup_terminal_state(true, true);

    result
}

fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
