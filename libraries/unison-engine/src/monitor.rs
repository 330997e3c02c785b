//! Drift monitor
//!
//! The one stateful piece of the engine. Each tick it recomputes the
//! expected timeline position, compares it with what the device reports,
//! and issues corrections when they disagree. It also watches for the
//! daily seed to change and rotates to the new day's order - but only
//! once the track the listener is hearing has finished.
//!
//! All persistent state here ("seed in use", "active order", "pending
//! rotation", correction bookkeeping) is owned by this struct and written
//! only from within its own tick or event handler; the session loop is
//! the single caller. Corrections run as spawned tasks because device
//! operations may complete long after the tick that issued them; each is
//! tagged with a sequence number, and outcomes arriving for a superseded
//! sequence are discarded.

use crate::clock::{self, Clock};
use crate::config::SyncConfig;
use crate::events::SyncEvent;
use crate::seed;
use crate::shuffle::shuffle_playlist;
use crate::timeline::locate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, error, info, warn};
use unison_core::{
    DriftSample, PlaybackController, PlaybackPosition, PlaybackSnapshot, PlayerError, PlayerEvent,
    Playlist, PlaylistProvider, Track,
};

/// States of the drift machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SyncState {
    /// No playlist loaded / playback not yet started
    Uninitialized,

    /// Device position agrees with the computed position
    Synced,

    /// Disagreement detected, correction not yet in flight
    Drifted,

    /// Correction issued, awaiting a confirming reported position
    Resyncing,
}

/// A shuffled order together with the seed that produced it
struct ActiveRotation {
    seed: u64,
    playlist: Playlist,
}

/// A rotation waiting for the listener's current track to finish
struct PendingRotation {
    rotation: ActiveRotation,
    awaiting_end_of: String,
}

/// The drift-detection/correction state machine
pub struct DriftMonitor {
    config: SyncConfig,
    clock: Arc<dyn Clock>,
    provider: Arc<dyn PlaylistProvider>,
    controller: Arc<dyn PlaybackController>,
    events: mpsc::Sender<SyncEvent>,

    state: SyncState,
    active: Option<ActiveRotation>,
    pending: Option<PendingRotation>,
    rotation_due: bool,
    clock_suspect: bool,
    last_actual_track_id: Option<String>,

    correction_seq: u64,
    corrections: JoinSet<(u64, Result<(), PlayerError>)>,
    consecutive_failures: u32,
    next_attempt_at: Option<DateTime<Utc>>,
    resync_deadline: Option<DateTime<Utc>>,
}

impl DriftMonitor {
    /// Create a monitor; nothing runs until [`tick`](Self::tick) is called
    pub fn new(
        config: SyncConfig,
        clock: Arc<dyn Clock>,
        provider: Arc<dyn PlaylistProvider>,
        controller: Arc<dyn PlaybackController>,
        events: mpsc::Sender<SyncEvent>,
    ) -> Self {
        Self {
            config,
            clock,
            provider,
            controller,
            events,
            state: SyncState::Uninitialized,
            active: None,
            pending: None,
            rotation_due: false,
            clock_suspect: false,
            last_actual_track_id: None,
            correction_seq: 0,
            corrections: JoinSet::new(),
            consecutive_failures: 0,
            next_attempt_at: None,
            resync_deadline: None,
        }
    }

    /// Current state of the drift machine
    pub fn state(&self) -> SyncState {
        self.state
    }

    /// Monitor configuration
    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// The shuffled order currently driving playback
    pub fn active_playlist(&self) -> Option<&Playlist> {
        self.active.as_ref().map(|a| &a.playlist)
    }

    /// Whether a day-boundary rotation is waiting for the track to end
    pub fn has_pending_rotation(&self) -> bool {
        self.pending.is_some()
    }

    /// One pass of the monitor loop
    pub async fn tick(&mut self) {
        let now = self.clock.now();

        if let Err(e) = clock::check(now) {
            if !self.clock_suspect {
                warn!(error = %e, "synchronization suspended");
                self.clock_suspect = true;
                self.emit(SyncEvent::ClockSuspect { reading: now });
            }
            return;
        }
        if self.clock_suspect {
            self.clock_suspect = false;
            info!("clock reading sane again, synchronization resumed");
            self.emit(SyncEvent::ClockRecovered);
        }

        self.drain_corrections(now);
        self.refresh_rotation(now).await;

        if self.active.is_none() {
            // Initial fetch failed; retried next tick
            return;
        }

        if self.state == SyncState::Uninitialized {
            self.start_playback(now).await;
            return;
        }

        let snapshot = match self.controller.report().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "device cannot report a position");
                self.emit(SyncEvent::PlayerError {
                    message: e.to_string(),
                });
                return;
            }
        };

        self.maybe_apply_rotation(&snapshot);
        self.evaluate(now, &snapshot);
    }

    /// Feed an asynchronous device notification into the machine
    pub fn handle_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::TrackEnded { track_id } => {
                debug!(track = %track_id, "device reported track end");
                if self
                    .pending
                    .as_ref()
                    .is_some_and(|p| p.awaiting_end_of == track_id)
                {
                    self.rotation_due = true;
                }
            }
            PlayerEvent::Error { message } => {
                warn!(message = %message, "device reported an error");
                self.emit(SyncEvent::PlayerError { message });
            }
        }
    }

    /// Collect outcomes of previously issued corrections
    ///
    /// Outcomes tagged with a superseded sequence number are discarded so
    /// a late completion can never close a newer drifted state.
    fn drain_corrections(&mut self, now: DateTime<Utc>) {
        while let Some(joined) = self.corrections.try_join_next() {
            match joined {
                Ok((sequence, result)) => {
                    if sequence != self.correction_seq {
                        debug!(
                            sequence,
                            current = self.correction_seq,
                            "stale correction outcome discarded"
                        );
                        continue;
                    }
                    match result {
                        Ok(()) => {
                            debug!(sequence, "correction accepted, awaiting confirmation");
                        }
                        Err(e) => {
                            self.emit(SyncEvent::PlayerError {
                                message: e.to_string(),
                            });
                            if self.state == SyncState::Resyncing {
                                self.record_correction_failure(now, "device rejected correction");
                            }
                        }
                    }
                }
                Err(e) => debug!(error = %e, "correction task cancelled"),
            }
        }
    }

    /// Keep the active order in step with the daily seed
    ///
    /// Fetch failures leave the current order in place; the fetch is
    /// retried on every subsequent tick until it succeeds.
    async fn refresh_rotation(&mut self, now: DateTime<Utc>) {
        let seed_now = seed::daily_seed(now);
        let date = seed::rotation_date(now);

        let needs_fetch = match (&self.active, &self.pending) {
            (None, _) => true,
            (Some(active), None) => active.seed != seed_now,
            (Some(active), Some(pending)) => {
                active.seed != seed_now && pending.rotation.seed != seed_now
            }
        };
        if !needs_fetch {
            return;
        }

        let playlist = match self.provider.fetch(date).await {
            Ok(playlist) => playlist,
            Err(e) => {
                warn!(error = %e, date = %date, "playlist fetch failed");
                self.emit(SyncEvent::ProviderUnavailable {
                    message: e.to_string(),
                });
                return;
            }
        };

        let rotation = ActiveRotation {
            seed: seed_now,
            playlist: shuffle_playlist(&playlist, seed_now),
        };

        if let Some(active) = &self.active {
            // Defer the new order until the track being heard completes
            let awaiting_end_of = match &self.last_actual_track_id {
                Some(id) => id.clone(),
                None => match locate(&active.playlist, seed::elapsed_seconds(now)) {
                    Ok(position) => active.playlist.tracks()[position.track_index].id.clone(),
                    Err(_) => return,
                },
            };
            info!(date = %date, awaiting = %awaiting_end_of, "rotation ready, deferred to end of current track");
            self.pending = Some(PendingRotation {
                rotation,
                awaiting_end_of,
            });
            self.emit(SyncEvent::RotationPending {
                rotation_date: date,
            });
        } else {
            debug!(date = %date, tracks = rotation.playlist.len(), "initial playlist loaded");
            self.active = Some(rotation);
        }
    }

    /// Swap in the pending rotation once the awaited track is done
    fn maybe_apply_rotation(&mut self, snapshot: &PlaybackSnapshot) {
        let due = self.rotation_due
            || self
                .pending
                .as_ref()
                .is_some_and(|p| snapshot.track_id != p.awaiting_end_of);
        if !due {
            return;
        }
        self.rotation_due = false;

        if let Some(pending) = self.pending.take() {
            let rotation_date = pending.rotation.playlist.rotation_date;
            let track_count = pending.rotation.playlist.len();
            info!(date = %rotation_date, tracks = track_count, "day-boundary rotation applied");
            self.active = Some(pending.rotation);
            self.emit(SyncEvent::PlaylistRotated {
                rotation_date,
                track_count,
            });
        }
    }

    /// First load: locate the shared position and start the device there
    async fn start_playback(&mut self, now: DateTime<Utc>) {
        let (track, offset, rotation_date, track_count) = {
            let Some(active) = &self.active else { return };
            let expected = match locate(&active.playlist, seed::elapsed_seconds(now)) {
                Ok(position) => position,
                Err(e) => {
                    error!(error = %e, "cannot locate a timeline position");
                    return;
                }
            };
            (
                active.playlist.tracks()[expected.track_index].clone(),
                expected.offset,
                active.playlist.rotation_date,
                active.playlist.len(),
            )
        };

        match self.controller.load(&track, offset).await {
            Ok(()) => {
                info!(track = %track.id, offset = offset.as_secs(), "playback started on shared timeline");
                self.last_actual_track_id = Some(track.id.clone());
                self.set_state(SyncState::Synced);
                self.emit(SyncEvent::Started {
                    rotation_date,
                    track_count,
                });
            }
            Err(e) => {
                warn!(error = %e, "initial load failed, retrying next tick");
                self.emit(SyncEvent::PlayerError {
                    message: e.to_string(),
                });
            }
        }
    }

    /// Compare expected and actual positions and run the state machine
    fn evaluate(&mut self, now: DateTime<Utc>, snapshot: &PlaybackSnapshot) {
        let (expected, expected_track, track_mismatch) = {
            let Some(active) = &self.active else { return };
            let expected = match locate(&active.playlist, seed::elapsed_seconds(now)) {
                Ok(position) => position,
                Err(e) => {
                    error!(error = %e, "cannot locate a timeline position");
                    return;
                }
            };
            let actual_index = active.playlist.index_of(&snapshot.track_id);
            (
                expected,
                active.playlist.tracks()[expected.track_index].clone(),
                actual_index != Some(expected.track_index),
            )
        };

        self.last_actual_track_id = Some(snapshot.track_id.clone());

        let sample = DriftSample {
            expected: expected.offset,
            actual: snapshot.offset,
            measured_at: now,
        };
        let in_sync = !track_mismatch && !sample.exceeds(self.config.drift_threshold());

        match self.state {
            SyncState::Uninitialized => {}
            SyncState::Synced => {
                if in_sync {
                    return;
                }
                info!(
                    expected = sample.expected.as_secs(),
                    actual = sample.actual.as_secs(),
                    track_mismatch,
                    "drift detected"
                );
                self.emit(SyncEvent::DriftDetected {
                    expected_secs: sample.expected.as_secs(),
                    actual_secs: sample.actual.as_secs(),
                    track_mismatch,
                });
                self.set_state(SyncState::Drifted);
                self.try_correct(now, expected, expected_track, track_mismatch);
            }
            SyncState::Drifted => {
                if in_sync {
                    debug!("drift resolved without correction");
                    self.consecutive_failures = 0;
                    self.next_attempt_at = None;
                    self.set_state(SyncState::Synced);
                    return;
                }
                self.try_correct(now, expected, expected_track, track_mismatch);
            }
            SyncState::Resyncing => {
                if in_sync {
                    info!(sequence = self.correction_seq, "resync confirmed");
                    self.emit(SyncEvent::Resynced {
                        sequence: self.correction_seq,
                    });
                    self.consecutive_failures = 0;
                    self.next_attempt_at = None;
                    self.resync_deadline = None;
                    self.set_state(SyncState::Synced);
                } else if self.resync_deadline.is_some_and(|deadline| now >= deadline) {
                    self.record_correction_failure(now, "confirmation timeout");
                }
            }
        }
    }

    /// Issue a correction unless backoff says to wait
    fn try_correct(
        &mut self,
        now: DateTime<Utc>,
        expected: PlaybackPosition,
        track: Track,
        need_load: bool,
    ) {
        if self.next_attempt_at.is_some_and(|at| now < at) {
            debug!("in backoff, correction deferred");
            return;
        }

        self.correction_seq += 1;
        let sequence = self.correction_seq;
        let controller = Arc::clone(&self.controller);
        let offset = expected.offset;
        self.corrections.spawn(async move {
            let result = if need_load {
                controller.load(&track, offset).await
            } else {
                controller.seek(offset).await
            };
            (sequence, result)
        });

        self.resync_deadline =
            Some(now + chrono::Duration::seconds(self.config.resync_timeout_secs as i64));
        info!(
            sequence,
            track_index = expected.track_index,
            offset = offset.as_secs(),
            need_load,
            "correction issued"
        );
        self.emit(SyncEvent::CorrectionIssued {
            sequence,
            track_index: expected.track_index,
            offset_secs: offset.as_secs(),
        });
        self.set_state(SyncState::Resyncing);
    }

    /// Book a failed correction: backoff, escalate if persistent, retry
    ///
    /// Never fatal; the machine drops back to `Drifted` and keeps trying.
    fn record_correction_failure(&mut self, now: DateTime<Utc>, reason: &str) {
        self.consecutive_failures += 1;
        warn!(
            sequence = self.correction_seq,
            failures = self.consecutive_failures,
            reason,
            "correction failed"
        );
        self.emit(SyncEvent::CorrectionFailed {
            sequence: self.correction_seq,
            consecutive_failures: self.consecutive_failures,
        });

        if self.consecutive_failures >= self.config.escalation_after {
            warn!(
                failures = self.consecutive_failures,
                "persistent desync, retries continue"
            );
            self.emit(SyncEvent::PersistentDesync {
                consecutive_failures: self.consecutive_failures,
            });
        }

        let delay = self.config.backoff_delay(self.consecutive_failures);
        self.next_attempt_at = Some(now + chrono::Duration::seconds(delay.as_secs() as i64));
        self.resync_deadline = None;
        self.set_state(SyncState::Drifted);
    }

    fn set_state(&mut self, state: SyncState) {
        if self.state != state {
            debug!(from = ?self.state, to = ?state, "sync state changed");
            self.state = state;
            self.emit(SyncEvent::StateChanged { state });
        }
    }

    /// Events are advisory; a full or closed channel never blocks a tick
    fn emit(&self, event: SyncEvent) {
        if let Err(e) = self.events.try_send(event) {
            debug!(error = %e, "sync event dropped");
        }
    }
}
