use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{debug, info};
use ocean_dash::domain::{Origin, PlotDocument};
use ocean_dash::views::{HealthPanel, Slot};

use crate::app::{handle_input, App, View};
use crate::terminal::DashTerminal;
use crate::ui;

/// Run the application in headless mode (no UI): mount every view, wait
/// for all of their loads and print where each slot's data came from.
pub async fn run_headless(app: &mut App, json: bool, base_url: &str) -> Result<()> {
    for view in View::ALL {
        app.mount(view);
    }

    while app.is_loading() {
        if !app.wait_for_outcome().await {
            break;
        }
    }

    let report = build_headless_report(app, base_url);
    if json {
        render_headless_json(&report)?;
    } else {
        render_headless_stats(&report);
    }

    Ok(())
}

fn render_headless_stats(report: &HeadlessReport) {
    println!("\nOcean Dash");
    println!("==========");
    println!("Backend: {}", report.base_url);
    println!("Generated: {}", report.generated_at);

    let mut current_view = "";
    for slot in &report.slots {
        if slot.view != current_view {
            current_view = slot.view;
            println!("\n{current_view}:");
        }
        let origin = slot.origin.map_or("-", Origin::as_str);
        println!(
            "- {} [{}] {} | {}",
            slot.slot,
            origin,
            slot.source.as_deref().unwrap_or("-"),
            slot.summary
        );
    }
}

fn render_headless_json(report: &HeadlessReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}

fn plot_summary(document: &PlotDocument) -> String {
    let points: usize = document.data.iter().map(|series| series.len()).sum();
    format!(
        "{} ({} series, {points} points)",
        document.layout.title_text().unwrap_or("untitled"),
        document.data.len()
    )
}

fn slot_row<T>(
    view: View,
    slot_name: &'static str,
    slot: &Slot<T>,
    summarize: impl FnOnce(&T) -> String,
) -> HeadlessSlot {
    slot.ready().map_or_else(
        || HeadlessSlot {
            view: view.label(),
            slot: slot_name,
            origin: None,
            source: None,
            summary: "not loaded".to_string(),
        },
        |loaded| HeadlessSlot {
            view: view.label(),
            slot: slot_name,
            origin: Some(loaded.origin),
            source: Some(loaded.source.clone()),
            summary: summarize(&loaded.data),
        },
    )
}

fn build_headless_report(app: &App, base_url: &str) -> HeadlessReport {
    let slots = vec![
        slot_row(View::Dashboard, "stock forecast", &app.dashboard.forecast, plot_summary),
        slot_row(View::Ocean, "sst forecast", &app.ocean.sst, plot_summary),
        slot_row(View::Ocean, "depth profile", &app.ocean.depth, plot_summary),
        slot_row(View::Fisheries, "classification", &app.fisheries.classification, |result| {
            format!("{} ({})", result.species, result.confidence)
        }),
        slot_row(View::Fisheries, "health check", &app.fisheries.health, |panel| match panel {
            HealthPanel::Image(image) => format!("{}x{} PNG", image.width, image.height),
            HealthPanel::Placeholder => "placeholder".to_string(),
        }),
        slot_row(View::Fisheries, "stock metrics", &app.fisheries.metrics, |metrics| {
            format!(
                "{} at {:.2}% exploitation, {}",
                metrics.sustainability_status, metrics.exploitation_rate, metrics.trend
            )
        }),
        slot_row(View::Biodiversity, "edna", &app.biodiversity.report, |report| {
            format!("{} species detected", report.detected_species.len())
        }),
    ];

    HeadlessReport {
        base_url: base_url.to_string(),
        generated_at: chrono::Local::now().to_rfc3339(),
        slots,
    }
}

#[derive(serde::Serialize)]
struct HeadlessReport {
    base_url: String,
    generated_at: String,
    slots: Vec<HeadlessSlot>,
}

#[derive(serde::Serialize)]
struct HeadlessSlot {
    view: &'static str,
    slot: &'static str,
    origin: Option<Origin>,
    source: Option<String>,
    summary: String,
}

/// Run the main application event loop
pub async fn run(terminal: &mut DashTerminal, app: &mut App) -> Result<()> {
    // Configure event poll timeout (ms)
    const EVENT_POLL_TIMEOUT: u64 = 50;

    app.mount(app.view);
    info!("event loop started on the {} view", app.view.as_str());

    loop {
        // Update animations
        app.update();

        // Apply finished fetches before drawing
        app.drain_outcomes();

        if let Err(e) = terminal.draw(|f| ui::ui(app, f)) {
            return Err(color_eyre::eyre::eyre!("Terminal draw error: {e}"));
        }

        if matches!(
            event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT)),
            Ok(true)
        ) {
            match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                    handle_input(app, key.code).await;
                    if !app.running {
                        break;
                    }
                }
                Ok(Event::Resize(width, height)) => {
                    debug!("terminal resized to {width}x{height}");
                }
                Ok(_) | Err(_) => {
                    // Ignore non-key events for now
                }
            }
        }
    }

    info!("event loop finished");
    Ok(())
}
