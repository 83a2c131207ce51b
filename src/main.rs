#![forbid(unsafe_code)]

mod config;
mod constants;
mod gui;
mod hotkeys;
mod keys;
mod pointer;
mod run_state;
mod stroke;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;
use tracing::{Level as TraceLevel, debug, error, info};
use tracing_subscriber::FmtSubscriber;

use config::Settings;
use hotkeys::{ListenerEvent, TriggerKeys, spawn_listener};
use keys::TriggerKey;
use pointer::X11Pointer;
use run_state::RunState;
use stroke::{StrokeParams, run_stroke};

#[derive(Parser)]
#[command(name = "perfect-circle", version, about = "Draws a perfect circle with the mouse on a keypress")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the settings window
    Config,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse log level from environment variable
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    match cli.command {
        Some(Command::Config) => {
            info!("Opening configuration tool...");
            gui::run_settings()?;
        }
        None => run_listener()?,
    }
    Ok(())
}

/// Default mode: wait for the start key, draw, repeat until the exit key
fn run_listener() -> Result<()> {
    let settings = Settings::load();
    info!(
        radius = settings.radius,
        steps = settings.steps,
        draw_speed = settings.draw_speed,
        "Configuration loaded"
    );

    let start_key = TriggerKey::from_name_or(&settings.start_key, TriggerKey::AltLeft);
    let exit_key = TriggerKey::from_name_or(&settings.exit_key, TriggerKey::Escape);

    info!("--- Perfect Circle Drawer ---");
    info!("1. Focus the target canvas and move the pointer to the circle center.");
    info!(key = start_key.label(), "2. Press the start key to draw; the pointer returns to the center afterwards.");
    info!(key = exit_key.label(), "3. Press the exit key at any time to stop.");
    info!("To open the settings window, run with the 'config' subcommand.");

    if !hotkeys::check_permissions() {
        hotkeys::print_permission_error();
        anyhow::bail!("Cannot access {}", constants::paths::DEV_INPUT);
    }

    let triggers = TriggerKeys {
        start: start_key.key(),
        exit: exit_key.key(),
    };

    let (listener_tx, listener_rx) = mpsc::channel();
    let _listener_handles = spawn_listener(listener_tx, triggers)?;

    let state = RunState::new();
    let params = StrokeParams::from(&settings);

    // The process's terminal blocking point: wait for trigger events until
    // the exit key arrives or every listener thread is gone
    while let Ok(event) = listener_rx.recv() {
        match event {
            ListenerEvent::StartStroke => {
                let Some(slot) = state.try_begin_stroke() else {
                    debug!(stroke_in_flight = state.stroke_in_flight(), "Ignoring start trigger");
                    continue;
                };
                let state = Arc::clone(&state);
                thread::spawn(move || {
                    // Slot is freed when the stroke thread exits, whatever the path
                    let _slot = slot;
                    match X11Pointer::connect() {
                        Ok(mut pointer) => {
                            if let Err(e) = run_stroke(&mut pointer, &params, &state) {
                                error!(error = ?e, "Stroke failed");
                            }
                        }
                        Err(e) => error!(error = ?e, "Could not open pointer device"),
                    }
                });
            }
            ListenerEvent::Shutdown => {
                state.request_shutdown();
                break;
            }
        }
    }

    info!("Listener stopped. Exiting.");
    Ok(())
}
