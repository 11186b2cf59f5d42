//! `dmud tui`: run the interactive console with the connection runtime.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use dmud_constant::app::VERSION;
use dmud_core::{ConsoleCommand, ConsoleEvent};
use dmud_observability::{init, shutdown, LogSink, ObservabilityConfig};
use dmud_runtime::ConsoleRuntime;
use dmud_tui::run_console;
use tokio::sync::mpsc;

use crate::cli::LaunchArgs;
use crate::output;

use super::{resolve_launch, runtime_config};

/// How long to wait for the runtime to close the socket after the UI exits.
const RUNTIME_EXIT_TIMEOUT: Duration = Duration::from_secs(2);

pub async fn handle(args: LaunchArgs) -> Result<()> {
    let launch = resolve_launch(&args)?;
    let config = runtime_config(&args);

    // Channel for runtime logs → debug traces screen (Ctrl+D)
    let (log_tx, log_rx) = mpsc::channel::<String>(512);
    let log_sink: LogSink = Arc::new(move |line| {
        let _ = log_tx.try_send(line);
    });

    // Logging must not write to the terminal the UI owns.
    let mut obs_config = ObservabilityConfig::from_env()
        .with_version(VERSION)
        .with_console(false)
        .with_log_sink(log_sink);
    if obs_config.log_level.is_none() {
        obs_config = obs_config.with_log_level("info,dmud_runtime=debug,dmud_core=debug");
    }
    if let Err(e) = init(obs_config) {
        output::warning(&format!("Observability init failed (continuing): {}", e));
    }

    let (event_tx, event_rx) = mpsc::channel::<ConsoleEvent>(config.event_buffer);
    let (command_tx, command_rx) = mpsc::channel::<ConsoleCommand>(64);

    tracing::info!(endpoint = %launch.url, page = %launch.page_url, "starting console");
    let runtime = ConsoleRuntime::new(config, launch.url, launch.params, event_tx)?;
    let runtime_handle = tokio::spawn(runtime.run(command_rx));

    let ui_result = run_console(event_rx, command_tx, Some(log_rx));

    match tokio::time::timeout(RUNTIME_EXIT_TIMEOUT, runtime_handle).await {
        Ok(Ok(Err(e))) => output::warning(&format!("Runtime stopped with an error: {}", e)),
        Ok(Err(e)) => output::warning(&format!("Runtime task failed: {}", e)),
        Err(_) => output::warning("Runtime did not stop in time"),
        Ok(Ok(Ok(()))) => {}
    }
    shutdown();
    ui_result
}
