//! Deterministic daily shuffle
//!
//! Fisher-Yates driven by a fixed-constant linear-congruential generator.
//! Referentially transparent: the generator state is a local value seeded
//! per call, so equal `(input, seed)` pairs yield bit-identical output on
//! every conforming client, and concurrent shuffles of different playlists
//! cannot interfere.
//!
//! The constants and the high-to-low iteration order are load-bearing
//! protocol surface. Any client that varies either diverges from the rest
//! of the world.

use unison_core::Playlist;

/// LCG multiplier. Never varied.
const LCG_MULTIPLIER: u64 = 9301;

/// LCG increment. Never varied.
const LCG_INCREMENT: u64 = 49297;

/// LCG modulus. Never varied.
const LCG_MODULUS: u64 = 233280;

/// Advance the generator: `state = (state * A + C) mod M`
///
/// The incoming state is reduced first, which is congruent mod M and keeps
/// the multiplication inside u64 for arbitrary seeds.
fn lcg_next(state: u64) -> u64 {
    ((state % LCG_MODULUS) * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS
}

/// A draw in `[0, 1)` from the current generator state
fn draw(state: u64) -> f64 {
    state as f64 / LCG_MODULUS as f64
}

/// Shuffle a slice in place with the given seed
pub fn shuffle_in_place<T>(items: &mut [T], seed: u64) {
    let mut state = seed;
    for i in (1..items.len()).rev() {
        state = lcg_next(state);
        let j = (draw(state) * (i as f64 + 1.0)) as usize;
        items.swap(i, j);
    }
}

/// Shuffled copy of a slice
pub fn shuffle<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut out = items.to_vec();
    shuffle_in_place(&mut out, seed);
    out
}

/// Playlist with its track order permuted for the day
pub fn shuffle_playlist(playlist: &Playlist, seed: u64) -> Playlist {
    playlist.with_order(shuffle(playlist.tracks(), seed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn lcg_step_is_fixed() {
        // (42 * 9301 + 49297) mod 233280
        assert_eq!(lcg_next(42), 206_659);
        // Huge seeds reduce first instead of overflowing
        assert_eq!(lcg_next(u64::MAX % LCG_MODULUS), lcg_next(u64::MAX));
    }

    #[test]
    fn known_permutation() {
        // seed 1: first draw swaps index 2 with 0, second leaves 1 alone
        let mut items = vec![0, 1, 2];
        shuffle_in_place(&mut items, 1);
        assert_eq!(items, vec![2, 1, 0]);
    }

    #[test]
    fn same_seed_same_order() {
        let items: Vec<u32> = (0..40).collect();
        assert_eq!(shuffle(&items, 12345), shuffle(&items, 12345));
    }

    #[test]
    fn output_is_a_permutation() {
        let items: Vec<u32> = (0..40).collect();
        let shuffled = shuffle(&items, 987);

        assert_eq!(shuffled.len(), items.len());
        let ids: HashSet<u32> = shuffled.iter().copied().collect();
        assert_eq!(ids.len(), items.len());
    }

    #[test]
    fn different_seeds_usually_differ() {
        let items: Vec<u32> = (0..40).collect();
        assert_ne!(shuffle(&items, 1), shuffle(&items, 2));
    }

    #[test]
    fn degenerate_inputs() {
        let mut empty: Vec<u32> = vec![];
        shuffle_in_place(&mut empty, 7);
        assert!(empty.is_empty());

        let mut single = vec![42];
        shuffle_in_place(&mut single, 7);
        assert_eq!(single, vec![42]);
    }
}
