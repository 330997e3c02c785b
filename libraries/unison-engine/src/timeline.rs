//! Timeline position calculation
//!
//! Maps elapsed time onto (track index, intra-track offset). The timeline
//! loops: elapsed time is folded into one playlist cycle, then the track
//! containing that cycle position is found by walking cumulative
//! durations. A cumulative boundary instant belongs to the *next* track at
//! offset zero, never to the previous track's final second.

use crate::error::Result;
use std::time::Duration;
use unison_core::{CoreError, PlaybackPosition, Playlist};

/// Position on the shared timeline after `elapsed_seconds` from the anchor
///
/// Pure: equal inputs always produce equal positions. Negative elapsed
/// values fold into the cycle the same way (`rem_euclid`), which is what
/// makes `locate(P, t) == locate(P, t + k * total)` hold for any integer
/// `k`.
pub fn locate(playlist: &Playlist, elapsed_seconds: i64) -> Result<PlaybackPosition> {
    let total = playlist.total_duration_secs();
    if total == 0 {
        return Err(CoreError::ZeroTotalDuration(playlist.rotation_date).into());
    }

    let cycle = elapsed_seconds.rem_euclid(total as i64) as u64;

    let mut lower = 0u64;
    for (track_index, track) in playlist.tracks().iter().enumerate() {
        let upper = lower + track.duration_secs;
        if cycle < upper {
            return Ok(PlaybackPosition {
                track_index,
                offset: Duration::from_secs(cycle - lower),
            });
        }
        lower = upper;
    }

    unreachable!("cycle position {cycle} is below the final cumulative bound {total}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use unison_core::Track;

    fn track(id: &str, duration_secs: u64) -> Track {
        Track {
            id: id.to_string(),
            title: format!("Title {id}"),
            artist: "Artist".to_string(),
            duration_secs,
            media_uri: format!("https://cdn.example.com/{id}.mp3"),
            artwork_uri: format!("https://cdn.example.com/{id}.jpg"),
        }
    }

    fn playlist() -> Playlist {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Playlist::new(date, vec![track("a", 180), track("b", 120), track("c", 90)]).unwrap()
    }

    fn at(elapsed: i64) -> (usize, u64) {
        let position = locate(&playlist(), elapsed).unwrap();
        (position.track_index, position.offset.as_secs())
    }

    #[test]
    fn walks_cumulative_bounds() {
        assert_eq!(at(0), (0, 0));
        assert_eq!(at(179), (0, 179));
        assert_eq!(at(300), (2, 0));
        assert_eq!(at(389), (2, 89));
    }

    #[test]
    fn boundary_belongs_to_next_track() {
        // Second 180 is the first instant of track b, not the last of a
        assert_eq!(at(180), (1, 0));
        // Wrapping the full cycle lands back on track a
        assert_eq!(at(390), (0, 0));
    }

    #[test]
    fn periodic_in_total_duration() {
        for t in [0, 17, 179, 180, 389] {
            assert_eq!(at(t), at(t + 390));
            assert_eq!(at(t), at(t + 390 * 1000));
            assert_eq!(at(t), at(t - 390 * 3));
        }
    }

    #[test]
    fn offset_within_track_duration() {
        let playlist = playlist();
        for t in 0..800 {
            let position = locate(&playlist, t).unwrap();
            let duration = playlist.tracks()[position.track_index].duration();
            assert!(position.offset < duration);
        }
    }
}
