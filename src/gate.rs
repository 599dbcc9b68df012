//! Warning gate
//!
//! Rate-limits user-facing warnings so a burst of bad frames produces one
//! salient notice per category, not a flood. Each category keeps its own
//! frames-since-emission counter; at most one warning surfaces per snapshot,
//! priority gaze > movement > blink.

use crate::config::EngineConfig;
use crate::types::{Warning, WarningCategory};
use serde::{Deserialize, Serialize};

/// Conditions active on the current frame
#[derive(Debug, Clone, Copy, Default)]
pub struct Triggers {
    pub gaze_away: bool,
    pub movement: bool,
    pub rapid_blink: bool,
}

/// Per-session warning rate-limiter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarningGate {
    frames_since_gaze: u32,
    frames_since_movement: u32,
    frames_since_blink: u32,
}

impl WarningGate {
    /// A fresh gate may emit on the first triggering frame
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            frames_since_gaze: config.gaze_warning_cooldown,
            frames_since_movement: config.movement_warning_cooldown,
            frames_since_blink: config.blink_warning_cooldown,
        }
    }

    /// Advance all cooldown counters and surface at most one warning
    pub fn evaluate(&mut self, triggers: Triggers, config: &EngineConfig) -> Option<Warning> {
        self.frames_since_gaze = self.frames_since_gaze.saturating_add(1);
        self.frames_since_movement = self.frames_since_movement.saturating_add(1);
        self.frames_since_blink = self.frames_since_blink.saturating_add(1);

        if triggers.gaze_away && self.frames_since_gaze > config.gaze_warning_cooldown {
            self.frames_since_gaze = 0;
            return Some(Warning::new(WarningCategory::GazeAway));
        }
        if triggers.movement && self.frames_since_movement > config.movement_warning_cooldown {
            self.frames_since_movement = 0;
            return Some(Warning::new(WarningCategory::HeadMovement));
        }
        if triggers.rapid_blink && self.frames_since_blink > config.blink_warning_cooldown {
            self.frames_since_blink = 0;
            return Some(Warning::new(WarningCategory::RapidBlink));
        }
        None
    }
}
