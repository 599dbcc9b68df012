//! Blink state machine
//!
//! Tracks eye-closure runs across frames with a raw consecutive-frame
//! counter: OPEN→CLOSED when the mean EAR drops below the threshold, and a
//! reopen commits exactly one blink iff the preceding closed run lasted at
//! least `blink_commit_frames`. That rejects partial squints and single-frame
//! jitter while still catching fast genuine blinks.
//!
//! The rolling EAR window feeds only the rapid-blink flag and UI smoothing
//! context, never the commit decision.

use crate::config::EngineConfig;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Outcome of feeding one EAR sample to the tracker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlinkUpdate {
    /// A blink was committed on this frame's reopen
    pub committed: bool,
    /// Eyes are closed on this frame
    pub eyes_closed: bool,
    /// Blink rate over the EAR window exceeds the ceiling
    pub rapid: bool,
}

/// Per-session blink tracking state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlinkTracker {
    /// Rolling EAR samples, newest last
    window: VecDeque<f64>,
    /// Length of the current low-EAR run
    closed_run: u32,
    /// Cumulative blinks, never decreases
    blink_count: u32,
    /// Eyes-closed flag from the most recent sample
    eyes_closed: bool,
}

impl BlinkTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cumulative blink count for the session
    pub fn blink_count(&self) -> u32 {
        self.blink_count
    }

    /// Eyes-closed flag from the most recent measured frame
    pub fn eyes_closed(&self) -> bool {
        self.eyes_closed
    }

    /// Smoothed EAR over the rolling window, for UI context only
    pub fn smoothed_ear(&self) -> Option<f64> {
        if self.window.is_empty() {
            return None;
        }
        Some(self.window.iter().sum::<f64>() / self.window.len() as f64)
    }

    /// Feed one mean-EAR sample and advance the state machine
    pub fn update(&mut self, ear: f64, config: &EngineConfig) -> BlinkUpdate {
        self.window.push_back(ear);
        while self.window.len() > config.ear_window {
            self.window.pop_front();
        }

        let closed = ear < config.blink_ear_threshold;
        let mut committed = false;

        if closed {
            self.closed_run += 1;
        } else {
            if self.closed_run >= config.blink_commit_frames {
                self.blink_count += 1;
                committed = true;
            }
            self.closed_run = 0;
        }
        self.eyes_closed = closed;

        let rapid = self.window.len() == config.ear_window
            && self
                .window
                .iter()
                .filter(|&&sample| sample < config.blink_ear_threshold)
                .count()
                > config.rapid_blink_low_samples;

        BlinkUpdate {
            committed,
            eyes_closed: closed,
            rapid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn feed(tracker: &mut BlinkTracker, config: &EngineConfig, samples: &[f64]) -> Vec<BlinkUpdate> {
        samples.iter().map(|&e| tracker.update(e, config)).collect()
    }

    #[test]
    fn test_three_frame_closure_commits_one_blink() {
        let config = EngineConfig::default();
        let mut tracker = BlinkTracker::new();
        let updates = feed(&mut tracker, &config, &[0.15, 0.15, 0.15, 0.4]);
        assert_eq!(tracker.blink_count(), 1);
        assert!(updates[3].committed);
        assert!(!updates[3].eyes_closed);
        assert!(updates[2].eyes_closed);
    }

    #[test]
    fn test_two_frame_closure_never_commits() {
        let config = EngineConfig::default();
        let mut tracker = BlinkTracker::new();
        feed(&mut tracker, &config, &[0.15, 0.15, 0.4]);
        assert_eq!(tracker.blink_count(), 0);
    }

    #[test]
    fn test_blink_count_is_monotonic() {
        let config = EngineConfig::default();
        let mut tracker = BlinkTracker::new();
        let mut last = 0;
        // alternate long closures, short closures, and open stretches
        let samples = [
            0.1, 0.1, 0.1, 0.4, 0.4, 0.1, 0.4, 0.1, 0.1, 0.1, 0.1, 0.4, 0.4, 0.4,
        ];
        for &ear in &samples {
            tracker.update(ear, &config);
            assert!(tracker.blink_count() >= last);
            last = tracker.blink_count();
        }
        // two qualifying closures in the sequence
        assert_eq!(tracker.blink_count(), 2);
    }

    #[test]
    fn test_sustained_closure_commits_on_reopen_only() {
        let config = EngineConfig::default();
        let mut tracker = BlinkTracker::new();
        for _ in 0..30 {
            let update = tracker.update(0.1, &config);
            assert!(!update.committed);
        }
        let update = tracker.update(0.4, &config);
        assert!(update.committed);
        assert_eq!(tracker.blink_count(), 1);
    }

    #[test]
    fn test_rapid_flag_needs_full_window() {
        let config = EngineConfig::default();
        let mut tracker = BlinkTracker::new();
        // five low samples, but the window is not full yet
        let updates = feed(&mut tracker, &config, &[0.1, 0.1, 0.1, 0.1, 0.1]);
        assert!(updates.iter().all(|u| !u.rapid));

        // fill the window; 5 of the last 12 are low
        let updates = feed(&mut tracker, &config, &[0.4; 7]);
        assert!(updates.last().unwrap().rapid);

        // the low samples age out of the window
        let updates = feed(&mut tracker, &config, &[0.4; 12]);
        assert!(!updates.last().unwrap().rapid);
    }

    #[test]
    fn test_exactly_threshold_counts_as_open() {
        let config = EngineConfig::default();
        let mut tracker = BlinkTracker::new();
        let update = tracker.update(0.25, &config);
        assert!(!update.eyes_closed);
    }

    #[test]
    fn test_smoothed_ear_tracks_window() {
        let config = EngineConfig::default();
        let mut tracker = BlinkTracker::new();
        assert!(tracker.smoothed_ear().is_none());
        feed(&mut tracker, &config, &[0.2, 0.4]);
        assert!((tracker.smoothed_ear().unwrap() - 0.3).abs() < 1e-9);
    }
}
