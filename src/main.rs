// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout map, terminal edition.
//!
//! Reads commands from stdin and feeds them to a session as map clicks,
//! form submissions and list selections. Workouts are stored as JSON under
//! `WORKOUT_DATA_DIR`.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workout_map::{
    collaborators::{Collaborators, SystemClock},
    config::Config,
    db::FileStorage,
    services::{SessionController, SessionEvent},
    terminal::{
        parse_command, SharedList, StdoutNotifier, TerminalForm, TerminalGeolocation,
        TerminalHost, TerminalMap, HELP,
    },
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        key = %config.storage_key,
        "Starting workout map"
    );

    let storage = FileStorage::open(&config.data_dir).context("Failed to open storage")?;

    // Geolocation answers arrive on this channel, after the event that asked
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let (line_tx, mut line_rx) = mpsc::unbounded_channel::<String>();

    let form = TerminalForm::new();
    let list = SharedList::new();
    let collaborators = Collaborators {
        geolocation: Box::new(TerminalGeolocation::new(config.home_position, event_tx)),
        map: Box::new(TerminalMap::default()),
        list: Box::new(list.clone()),
        form: Box::new(form.clone()),
        storage: Box::new(storage),
        notifier: Box::new(StdoutNotifier),
        clock: Box::new(SystemClock),
    };

    let mut host = TerminalHost::new(SessionController::new(config, collaborators), form, list);

    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to read stdin");
                    break;
                }
            }
        }
    });

    println!("{HELP}");
    host.dispatch(SessionEvent::Startup);

    loop {
        tokio::select! {
            Some(event) = event_rx.recv() => host.dispatch(event),
            line = line_rx.recv() => {
                let Some(line) = line else { break };
                match parse_command(&line) {
                    Ok(Some(command)) => {
                        if !host.execute(command) {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => println!("! {e}"),
                }
            }
        }
    }

    tracing::info!(workouts = host.session().store().len(), "Session closed");
    Ok(())
}

/// Initialize structured JSON logging on stderr, keeping stdout for the session.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn,workout_map=info")),
        )
        .with(format)
        .init();
}
