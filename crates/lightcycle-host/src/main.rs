use std::process::ExitCode;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use lightcycle_arena::RoundController;
use lightcycle_core::RoundEvent;
use lightcycle_host::config::HostConfig;
use lightcycle_host::presenter::LogPresenter;
use lightcycle_host::session::{SessionBroadcast, SessionCommand, spawn_session};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LIGHTCYCLE_LOG_JSON")
        .is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    tracing::info!("Lightcycle host starting");

    let config = HostConfig::load();
    let start_key = config.arena.start_key.clone();
    let controller = match RoundController::new(config.arena) {
        Ok(controller) => controller,
        Err(e) => {
            tracing::error!(error = %e, "Invalid arena configuration");
            return ExitCode::FAILURE;
        },
    };

    let (cmd_tx, mut broadcast_rx, handle) =
        spawn_session(controller, LogPresenter::new(config.log.frames));

    tracing::info!("Type key codes one per line (KeyW, ArrowUp, ...), {start_key} starts a round, `quit` exits");

    let reader = tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let code = line.trim();
                    if code.is_empty() {
                        continue;
                    }
                    if code == "quit" {
                        break;
                    }
                    if cmd_tx.send(SessionCommand::Key(code.to_string())).is_err() {
                        return;
                    }
                },
                Ok(None) => break,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read stdin");
                    break;
                },
            }
        }
        let _ = cmd_tx.send(SessionCommand::Stop);
    });

    while let Some(broadcast) = broadcast_rx.recv().await {
        match broadcast {
            SessionBroadcast::Event(RoundEvent::RoundStarted { round }) => {
                tracing::info!(round, "GO!");
            },
            SessionBroadcast::Event(RoundEvent::RoundEnded { outcome, .. }) => {
                tracing::info!("{outcome} Press {start_key} to play again");
            },
            SessionBroadcast::Event(_) => {},
            SessionBroadcast::SessionEnded => break,
        }
    }

    reader.abort();
    if let Err(e) = handle.await {
        tracing::error!(error = %e, "Session task failed");
        return ExitCode::FAILURE;
    }

    tracing::info!("Lightcycle host stopped");
    ExitCode::SUCCESS
}
