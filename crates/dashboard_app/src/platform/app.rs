use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;

use anyhow::Context;
use clap::Parser;
use dashboard_core::{update, AppState, Msg};
use dashboard_engine::ClientSettings;
use engine_logging::{engine_debug, engine_info, engine_warn};

use super::config::Args;
use super::effects::EffectRunner;
use super::ui;

/// Everything the main loop reacts to. Only `Msg` reaches the core; the rest
/// is view-local.
pub enum AppEvent {
    Msg(Msg),
    Render,
    Help,
    Invalid(String),
    Quit,
}

pub fn run_app() -> anyhow::Result<()> {
    let args = Args::parse();
    engine_logging::initialize(&args.log_settings());

    let settings = ClientSettings::new(&args.base_url)
        .with_context(|| format!("invalid --base-url {:?}", args.base_url))?;
    engine_info!("Starting recdash against {}", settings.base_url());

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>();
    let runner =
        EffectRunner::new(settings, event_tx.clone()).context("failed to start the engine")?;

    let mut out = io::stdout().lock();
    writeln!(out, "{}", ui::commands::HELP)?;

    // Startup policy: the popular list loads once without user action.
    let _ = event_tx.send(AppEvent::Msg(Msg::Activated));
    spawn_input_reader(event_tx);

    let mut state = AppState::new();
    for event in event_rx {
        match event {
            AppEvent::Msg(msg) => {
                log_stale_completion(&state, &msg);
                let (next, effects) = update(std::mem::take(&mut state), msg);
                state = next;
                runner.enqueue(effects);
                if state.consume_dirty() {
                    write!(out, "{}", ui::render::render(&state.view()))?;
                }
            }
            AppEvent::Render => write!(out, "{}", ui::render::render(&state.view()))?,
            AppEvent::Help => writeln!(out, "{}", ui::commands::HELP)?,
            AppEvent::Invalid(message) => writeln!(out, "{message}")?,
            AppEvent::Quit => break,
        }
        out.flush()?;
    }

    engine_info!("recdash exiting");
    Ok(())
}

fn log_stale_completion(state: &AppState, msg: &Msg) {
    if let Msg::RecommendationsLoaded {
        channel,
        request_id,
        ..
    } = msg
    {
        if !state.channel(*channel).is_awaiting(*request_id) {
            engine_debug!(
                "Discarding stale {} response request_id={}",
                channel,
                request_id
            );
        }
    }
}

/// Reads commands from stdin until `quit` or end of input.
fn spawn_input_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let mut inputs = ui::commands::FormInputs::default();
        for line in io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    engine_warn!("Failed to read stdin: {}", err);
                    break;
                }
            };
            let event = match ui::commands::parse_command(&line) {
                Ok(Some(command)) => inputs.to_event(command),
                Ok(None) => continue,
                Err(err) => AppEvent::Invalid(err.to_string()),
            };
            let quit = matches!(event, AppEvent::Quit);
            if tx.send(event).is_err() || quit {
                return;
            }
        }
        let _ = tx.send(AppEvent::Quit);
    });
}
