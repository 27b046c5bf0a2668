//! Fixed tuning constants for the capture interaction.

use crate::model::validation::MAX_CHARACTERS;
use std::time::Duration;

/// Multiplier applied to raw vertical drag translation.
pub const DRAG_DAMPING_FACTOR: f64 = 0.5;
/// Damped offset below which the "ready to save" indicator turns on.
pub const READY_THRESHOLD: f64 = -50.0;
/// Raw translation below which releasing the drag commits a save.
pub const COMMIT_THRESHOLD: f64 = -150.0;
/// Pause between the commit gesture and the persistence write.
pub const SAVE_FEEDBACK_DELAY: Duration = Duration::from_millis(300);
/// How long the "saved" confirmation stays visible.
pub const CONFIRMATION_DISMISS_DELAY: Duration = Duration::from_millis(1500);

/// Capture session tuning.
///
/// Thresholds are negative because only upward drags save.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptureConfig {
    /// Cap applied while typing; excess input is truncated.
    pub max_characters: usize,
    pub drag_damping_factor: f64,
    /// Compared against the damped offset.
    pub ready_threshold: f64,
    /// Compared against the raw translation at release.
    pub commit_threshold: f64,
    pub save_feedback_delay: Duration,
    pub confirmation_dismiss_delay: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            max_characters: MAX_CHARACTERS,
            drag_damping_factor: DRAG_DAMPING_FACTOR,
            ready_threshold: READY_THRESHOLD,
            commit_threshold: COMMIT_THRESHOLD,
            save_feedback_delay: SAVE_FEEDBACK_DELAY,
            confirmation_dismiss_delay: CONFIRMATION_DISMISS_DELAY,
        }
    }
}
