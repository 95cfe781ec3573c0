//! Handler for the default run command.

use std::io::IsTerminal;
use std::sync::Arc;

use tokio::signal;
use tracing::{error, info};

use crate::adapter::extractor;
use crate::adapter::ledger::FileLedger;
use crate::adapter::notifier::{ConsoleNotifier, LogNotifier, TelegramNotifier};
use crate::adapter::source;
use crate::app::{Pipeline, StreamDriver};
use crate::cli::Cli;
use crate::config::{Config, LogInput};
use crate::error::Result;
use crate::port::NotifierRegistry;

/// Wire adapters from `config` and run until a shutdown signal arrives or
/// the source fails for good.
pub async fn execute(cli: &Cli, config: Config) -> Result<()> {
    let extractor = extractor::for_format(config.line_format)?;
    let ledger = Arc::new(FileLedger::open(&config.ledger_path)?);

    let console = console_for_stderr();

    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(console.clone()));
    registry.register(Box::new(LogNotifier));
    registry.register(Box::new(TelegramNotifier::new(config.telegram.clone())?));
    let registry = Arc::new(registry);

    let pipeline = Arc::new(
        Pipeline::new(extractor, ledger, registry).with_status(Arc::new(console.clone())),
    );
    let source = source::from_input(&config.input);
    let driver = StreamDriver::new(source, pipeline, config.monitor);

    info!(
        input = %describe_input(&config.input),
        format = ?config.line_format,
        ledger = %config.ledger_path.display(),
        mode = ?cli.mode(),
        "solver-watch starting"
    );

    let result = tokio::select! {
        result = driver.run(cli.mode()) => result,
        () = shutdown_signal() => {
            info!("Shutdown signal received");
            Ok(())
        }
    };

    console.finish();
    if let Err(e) = &result {
        error!(error = %e, "Log source failed");
    }
    info!("solver-watch stopped");
    result
}

/// The spinner status line only makes sense on an interactive terminal.
fn console_for_stderr() -> ConsoleNotifier {
    if std::io::stderr().is_terminal() {
        ConsoleNotifier::new()
    } else {
        ConsoleNotifier::hidden()
    }
}

fn describe_input(input: &LogInput) -> String {
    match input {
        LogInput::File(path) => format!("file {}", path.display()),
        LogInput::Container(name) => format!("container {name}"),
    }
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        let mut term = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(term) => term,
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                let _ = signal::ctrl_c().await;
                return;
            }
        };
        tokio::select! {
            _ = signal::ctrl_c() => {}
            _ = term.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = signal::ctrl_c().await;
    }
}
