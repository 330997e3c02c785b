//! Property-based tests for the synchronization math
//!
//! Uses proptest to verify the invariants every client depends on: the
//! shuffle is a deterministic permutation, and locate is periodic with
//! in-bounds offsets. These properties are what make lockstep playback
//! possible without any client-to-client messaging.

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use unison_core::{Playlist, Track};
use unison_engine::{daily_seed, locate, shuffle};

// ===== Helpers =====

fn track(id: usize, duration_secs: u64) -> Track {
    Track {
        id: format!("track-{id}"),
        title: format!("Title {id}"),
        artist: format!("Artist {}", id % 7),
        duration_secs,
        media_uri: format!("https://cdn.example.com/{id}.mp3"),
        artwork_uri: format!("https://cdn.example.com/{id}.jpg"),
    }
}

fn arbitrary_playlist() -> impl Strategy<Value = Playlist> {
    prop::collection::vec(1u64..600, 1..40).prop_map(|durations| {
        let tracks = durations
            .into_iter()
            .enumerate()
            .map(|(id, duration_secs)| track(id, duration_secs))
            .collect();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        Playlist::new(date, tracks).unwrap()
    })
}

// ===== Property Tests =====

proptest! {
    /// Property: shuffle output is a permutation - same ids, same count
    #[test]
    fn shuffle_is_a_permutation(
        playlist in arbitrary_playlist(),
        seed in any::<u64>()
    ) {
        let shuffled = shuffle(playlist.tracks(), seed);

        prop_assert_eq!(shuffled.len(), playlist.len());

        let mut original_ids: Vec<&str> = playlist.tracks().iter().map(|t| t.id.as_str()).collect();
        let mut shuffled_ids: Vec<&str> = shuffled.iter().map(|t| t.id.as_str()).collect();
        original_ids.sort_unstable();
        shuffled_ids.sort_unstable();
        prop_assert_eq!(original_ids, shuffled_ids);
    }

    /// Property: equal (input, seed) pairs always yield identical output
    #[test]
    fn shuffle_is_deterministic(
        playlist in arbitrary_playlist(),
        seed in any::<u64>()
    ) {
        let first = shuffle(playlist.tracks(), seed);
        let second = shuffle(playlist.tracks(), seed);
        prop_assert_eq!(first, second);
    }

    /// Property: locate(P, t) == locate(P, t + k * total) for any integer k
    #[test]
    fn locate_is_periodic(
        playlist in arbitrary_playlist(),
        elapsed in -1_000_000i64..1_000_000,
        k in -3i64..=3
    ) {
        let total = playlist.total_duration_secs() as i64;
        let base = locate(&playlist, elapsed).unwrap();
        let wrapped = locate(&playlist, elapsed + k * total).unwrap();
        prop_assert_eq!(base, wrapped);
    }

    /// Property: the located offset always lies inside the located track
    #[test]
    fn locate_offset_in_bounds(
        playlist in arbitrary_playlist(),
        elapsed in -1_000_000i64..1_000_000
    ) {
        let position = locate(&playlist, elapsed).unwrap();
        prop_assert!(position.track_index < playlist.len());

        let duration = playlist.tracks()[position.track_index].duration();
        prop_assert!(position.offset < duration);
    }

    /// Property: any two instants in the same UTC day share a seed
    #[test]
    fn daily_seed_constant_within_day(
        first_second in 0u32..86_400,
        second_second in 0u32..86_400
    ) {
        let midnight = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let a = midnight + chrono::Duration::seconds(i64::from(first_second));
        let b = midnight + chrono::Duration::seconds(i64::from(second_second));
        prop_assert_eq!(daily_seed(a), daily_seed(b));

        // And the next day never shares it
        let next_day = b + chrono::Duration::days(1);
        prop_assert_ne!(daily_seed(a), daily_seed(next_day));
    }
}
