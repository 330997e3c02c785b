/// Simulated playback device
///
/// Stands in for a real media element in headless runs. It advances its
/// reported position in real time from the instant a track is loaded, at
/// a configurable rate - a rate below 1.0 makes the device fall behind
/// the shared timeline, which is a convenient way to watch the drift
/// monitor earn its keep.
use std::sync::Mutex;
use std::time::Duration;
use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::Instant;
use tracing::info;
use unison_core::{PlaybackController, PlaybackSnapshot, PlayerError, PlayerEvent, Track};

struct Loaded {
    track: Track,
    base_offset: Duration,
    started_at: Instant,
    ended_notified: bool,
}

pub struct SimulatedPlayer {
    inner: Mutex<Option<Loaded>>,
    events: mpsc::Sender<PlayerEvent>,
    rate: f64,
}

impl SimulatedPlayer {
    pub fn new(events: mpsc::Sender<PlayerEvent>, rate: f64) -> Self {
        Self {
            inner: Mutex::new(None),
            events,
            rate,
        }
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<Loaded>>, PlayerError> {
        self.inner
            .lock()
            .map_err(|_| PlayerError::Unavailable("simulated device poisoned".into()))
    }
}

#[async_trait]
impl PlaybackController for SimulatedPlayer {
    async fn load(&self, track: &Track, offset: Duration) -> Result<(), PlayerError> {
        info!(track = %track.id, title = %track.title, offset = offset.as_secs(), "sim: load");
        *self.lock()? = Some(Loaded {
            track: track.clone(),
            base_offset: offset,
            started_at: Instant::now(),
            ended_notified: false,
        });
        Ok(())
    }

    async fn seek(&self, offset: Duration) -> Result<(), PlayerError> {
        let mut guard = self.lock()?;
        let loaded = guard
            .as_mut()
            .ok_or_else(|| PlayerError::Seek("nothing loaded".into()))?;
        info!(track = %loaded.track.id, offset = offset.as_secs(), "sim: seek");
        loaded.base_offset = offset;
        loaded.started_at = Instant::now();
        loaded.ended_notified = false;
        Ok(())
    }

    async fn report(&self) -> Result<PlaybackSnapshot, PlayerError> {
        let mut guard = self.lock()?;
        let loaded = guard
            .as_mut()
            .ok_or_else(|| PlayerError::Unavailable("nothing loaded".into()))?;

        let played = loaded.started_at.elapsed().mul_f64(self.rate);
        let mut offset = loaded.base_offset + played;

        if offset >= loaded.track.duration() {
            // The device idles at the end of the track until told otherwise
            offset = loaded.track.duration();
            if !loaded.ended_notified {
                loaded.ended_notified = true;
                let _ = self.events.try_send(PlayerEvent::TrackEnded {
                    track_id: loaded.track.id.clone(),
                });
            }
        }

        Ok(PlaybackSnapshot {
            track_id: loaded.track.id.clone(),
            offset,
        })
    }
}
