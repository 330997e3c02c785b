//! Sync session
//!
//! Wraps the drift monitor in a cooperatively scheduled tick loop with an
//! explicit cancellation handle. There is no implicit always-running
//! timer: the loop is a single spawned task, stopped through
//! [`SyncSession::stop`], and dropping the session aborts it outright.
//! Either way the monitor is dropped with it, which aborts any correction
//! still in flight - a late resync can never act on a torn-down session.

use crate::monitor::DriftMonitor;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use unison_core::PlayerEvent;

/// Handle to a running sync loop
pub struct SyncSession {
    handle: Option<JoinHandle<()>>,
    shutdown: watch::Sender<bool>,
}

impl SyncSession {
    /// Spawn the tick loop
    ///
    /// `player_events` carries asynchronous device notifications
    /// (track-ended, device errors) into the monitor between ticks.
    pub fn spawn(mut monitor: DriftMonitor, mut player_events: mpsc::Receiver<PlayerEvent>) -> Self {
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(monitor.config().tick_interval());
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut events_open = true;

            loop {
                tokio::select! {
                    _ = ticker.tick() => monitor.tick().await,
                    event = player_events.recv(), if events_open => match event {
                        Some(event) => monitor.handle_player_event(event),
                        None => events_open = false,
                    },
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow() {
                            break;
                        }
                    }
                }
            }
            debug!("sync session stopped");
        });

        Self {
            handle: Some(handle),
            shutdown,
        }
    }

    /// Stop the loop and wait for it to finish
    pub async fn stop(mut self) {
        let _ = self.shutdown.send(true);
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }

    /// Whether the loop is still running
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }
}

impl Drop for SyncSession {
    fn drop(&mut self) {
        // Graceful stop takes the handle first; a plain drop must still
        // cancel the timer task and, through the monitor, any outstanding
        // corrections.
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }
}
