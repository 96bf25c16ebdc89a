use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, Interval, MissedTickBehavior};

use lightcycle_arena::RoundController;
use lightcycle_arena::ports::Ports;
use lightcycle_core::RoundEvent;

/// Commands sent from the input reader to the session loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// A raw key code such as `KeyW` or `ArrowUp`.
    Key(String),
    /// Start a round without going through the key table.
    RequestStart,
    Stop,
}

/// Broadcasts sent from the session loop to whoever is watching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBroadcast {
    Event(RoundEvent),
    /// The loop has exited. Always the last broadcast.
    SessionEnded,
}

/// Spawn a session loop as a tokio task.
/// Returns the command sender, broadcast receiver and task handle.
pub fn spawn_session<P>(
    controller: RoundController,
    ports: P,
) -> (
    mpsc::UnboundedSender<SessionCommand>,
    mpsc::UnboundedReceiver<SessionBroadcast>,
    JoinHandle<()>,
)
where
    P: Ports + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (broadcast_tx, broadcast_rx) = mpsc::unbounded_channel();

    let handle = tokio::spawn(async move {
        run_session(controller, ports, cmd_rx, broadcast_tx).await;
    });

    (cmd_tx, broadcast_rx, handle)
}

/// Single-owner loop: every controller operation runs here, so ticks and key presses
/// never interleave. The tick clock exists only while a round is running.
async fn run_session<P: Ports>(
    mut controller: RoundController,
    mut ports: P,
    mut cmd_rx: mpsc::UnboundedReceiver<SessionCommand>,
    broadcast_tx: mpsc::UnboundedSender<SessionBroadcast>,
) {
    let period = controller.tick_period();
    let mut clock: Option<Interval> = None;

    tracing::info!(tick_ms = period.as_millis() as u64, "Session started");

    loop {
        let events = tokio::select! {
            _ = next_tick(&mut clock) => controller.tick(),
            cmd = cmd_rx.recv() => match cmd {
                Some(SessionCommand::Key(code)) => controller.submit_key(&code),
                Some(SessionCommand::RequestStart) => controller.request_start(),
                Some(SessionCommand::Stop) | None => break,
            },
        };

        if events.is_empty() {
            continue;
        }

        controller.dispatch(&events, &mut ports);
        sync_clock(&controller, &mut clock, period);

        for event in events {
            let _ = broadcast_tx.send(SessionBroadcast::Event(event));
        }
    }

    // Cancel any pending tick before announcing the end.
    drop(clock);
    tracing::info!(rounds = controller.scores().rounds(), "Session stopped");
    let _ = broadcast_tx.send(SessionBroadcast::SessionEnded);
}

/// Resolves on the next clock tick, or never when no round is running.
async fn next_tick(clock: &mut Option<Interval>) {
    match clock {
        Some(interval) => {
            interval.tick().await;
        },
        None => std::future::pending::<()>().await,
    }
}

/// Arm the clock when a round begins and drop it when the round ends. The first tick
/// fires one full period after the start.
fn sync_clock(controller: &RoundController, clock: &mut Option<Interval>, period: Duration) {
    match (controller.is_running(), clock.is_some()) {
        (true, false) => {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            *clock = Some(interval);
            tracing::debug!("Tick clock armed");
        },
        (false, true) => {
            *clock = None;
            tracing::debug!("Tick clock stopped");
        },
        _ => {},
    }
}

#[cfg(test)]
mod tests {
    use lightcycle_arena::test_helpers::{RecordingPorts, facing_config, make_controller};
    use lightcycle_core::Outcome;

    use super::*;

    fn fast_controller() -> RoundController {
        let mut config = facing_config();
        config.tick_period_ms = 5;
        make_controller(config)
    }

    #[tokio::test]
    async fn stop_before_any_round_ends_session() {
        let (cmd_tx, mut broadcast_rx, handle) =
            spawn_session(fast_controller(), RecordingPorts::default());

        cmd_tx.send(SessionCommand::Stop).unwrap();
        assert_eq!(broadcast_rx.recv().await, Some(SessionBroadcast::SessionEnded));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn dropping_the_sender_ends_session() {
        let (cmd_tx, mut broadcast_rx, handle) =
            spawn_session(fast_controller(), RecordingPorts::default());

        drop(cmd_tx);
        assert_eq!(broadcast_rx.recv().await, Some(SessionBroadcast::SessionEnded));
        handle.await.unwrap();
    }

    #[tokio::test]
    async fn no_ticks_before_start() {
        let (cmd_tx, mut broadcast_rx, handle) =
            spawn_session(fast_controller(), RecordingPorts::default());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(broadcast_rx.try_recv().is_err(), "idle session must stay silent");

        cmd_tx.send(SessionCommand::Stop).unwrap();
        let _ = handle.await;
    }

    #[tokio::test]
    async fn started_round_runs_to_draw() {
        let (cmd_tx, mut broadcast_rx, handle) =
            spawn_session(fast_controller(), RecordingPorts::default());

        cmd_tx.send(SessionCommand::RequestStart).unwrap();
        assert_eq!(
            broadcast_rx.recv().await,
            Some(SessionBroadcast::Event(RoundEvent::RoundStarted { round: 1 }))
        );

        let mut frames = 0;
        let outcome = loop {
            match broadcast_rx.recv().await {
                Some(SessionBroadcast::Event(RoundEvent::FrameAdvanced { .. })) => frames += 1,
                Some(SessionBroadcast::Event(RoundEvent::RoundEnded { outcome, .. })) => {
                    break outcome;
                },
                other => panic!("unexpected broadcast: {other:?}"),
            }
        };
        assert_eq!(outcome, Outcome::Draw);
        assert_eq!(frames, 4);

        cmd_tx.send(SessionCommand::Stop).unwrap();
        assert_eq!(broadcast_rx.recv().await, Some(SessionBroadcast::SessionEnded));
        let _ = handle.await;
    }
}
