//! Error debouncing with hysteresis
//!
//! A subject who steps out of the pose fails every frame until they step
//! back. That is one balance error, not thirty. Two counters handle this:
//!
//! - [`ErrorDebouncer`] for the pose failure mask
//! - [`EyesOpenMonitor`] for the eyes-open signal during an eyes-closed trial
//!
//! ## Pose Errors
//!
//! ```text
//! frame   1 ........ 16   17   18 ........... 46   47 ...
//! mask    LF LF ..   LF   ok   LF LF ......   LF   LF ...
//! run     1  2  ..   16   0    -  -  ......   1    2  ...
//! count              +1        (LF suppressed)
//! skip    30 ─────────────────────────────────► 0
//! ```
//!
//! - A run counts frames carrying the *same* mask. A different mask or a
//!   passing frame restarts it.
//! - The error is counted on the frame where the run exceeds the threshold.
//! - After a count the mask is held until a fully passing frame. Until
//!   then it is never recounted, even if other failures flicker in between.
//! - The counted mask is then suppressed for a skip window. Foot failures
//!   get the long window because stepping back into place disturbs the hands
//!   and trunk for a while.
//! - A different mask inside the window accumulates normally.

use crate::{
    config::SessionConfig,
    constants::{ERROR_FRAME_THRESHOLD, FOOT_SKIP_FRAMES, OTHER_SKIP_FRAMES},
};

use super::FailureMask;

/// Counts sustained pose failures once each
#[derive(Debug, Clone)]
pub struct ErrorDebouncer {
    threshold: u32,
    foot_skip_frames: u32,
    other_skip_frames: u32,

    run: u32,
    run_mask: FailureMask,
    // Counted mask, held until a passing frame
    held: Option<FailureMask>,
    suppressed: FailureMask,
    skip_remaining: u32,

    errors: u32,
    last_counted: Option<FailureMask>,
}

impl Default for ErrorDebouncer {
    fn default() -> Self {
        Self::new(ERROR_FRAME_THRESHOLD, FOOT_SKIP_FRAMES, OTHER_SKIP_FRAMES)
    }
}

impl ErrorDebouncer {
    /// Debouncer counting after `threshold` failing frames
    pub fn new(threshold: u32, foot_skip_frames: u32, other_skip_frames: u32) -> Self {
        Self {
            threshold,
            foot_skip_frames,
            other_skip_frames,
            run: 0,
            run_mask: FailureMask::empty(),
            held: None,
            suppressed: FailureMask::empty(),
            skip_remaining: 0,
            errors: 0,
            last_counted: None,
        }
    }

    /// Debouncer using the thresholds of a session
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new(
            config.error_frame_threshold,
            config.foot_skip_frames,
            config.other_skip_frames,
        )
    }

    /// Feed one frame's mask; true when this frame counted an error
    pub fn update(&mut self, mask: FailureMask) -> bool {
        self.skip_remaining = self.skip_remaining.saturating_sub(1);

        if mask.is_empty() {
            self.run = 0;
            self.run_mask = FailureMask::empty();
            self.held = None;
            return false;
        }

        if mask != self.run_mask {
            self.run_mask = mask;
            self.run = 0;
        }

        if self.held == Some(mask) {
            return false;
        }
        if mask == self.suppressed && self.skip_remaining > 0 {
            return false;
        }

        self.run += 1;
        if self.run <= self.threshold {
            return false;
        }

        self.errors += 1;
        self.run = 0;
        self.held = Some(mask);
        self.suppressed = mask;
        self.skip_remaining = if mask.is_foot() {
            self.foot_skip_frames
        } else {
            self.other_skip_frames
        };
        self.last_counted = Some(mask);

        log_info!("Balance error counted: mask {} (total {})", mask, self.errors);
        true
    }

    /// Errors counted since creation or the last reset
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// Mask of the most recently counted error
    pub fn last_counted(&self) -> Option<FailureMask> {
        self.last_counted
    }

    /// Frames left in the current suppression window
    pub fn skip_remaining(&self) -> u32 {
        self.skip_remaining
    }

    /// Length of the current failure run
    pub fn run_length(&self) -> u32 {
        self.run
    }

    /// Clear counts and windows for a new trial
    pub fn reset(&mut self) {
        *self = Self::new(self.threshold, self.foot_skip_frames, self.other_skip_frames);
    }
}

/// Counts eyes opening during an eyes-closed trial
///
/// Same run/threshold rule as [`ErrorDebouncer`], with a one-shot latch
/// instead of a skip window: after a count nothing more is counted until the
/// eyes close again.
#[derive(Debug, Clone)]
pub struct EyesOpenMonitor {
    threshold: u32,
    run: u32,
    armed: bool,
    errors: u32,
}

impl Default for EyesOpenMonitor {
    fn default() -> Self {
        Self::new(ERROR_FRAME_THRESHOLD)
    }
}

impl EyesOpenMonitor {
    /// Monitor counting after `threshold` open-eye frames
    pub fn new(threshold: u32) -> Self {
        Self {
            threshold,
            run: 0,
            armed: true,
            errors: 0,
        }
    }

    /// Feed one frame; true when this frame counted an error
    pub fn update(&mut self, eyes_open: bool) -> bool {
        if !eyes_open {
            self.run = 0;
            self.armed = true;
            return false;
        }
        if !self.armed {
            return false;
        }

        self.run += 1;
        if self.run <= self.threshold {
            return false;
        }

        self.errors += 1;
        self.run = 0;
        self.armed = false;

        log_info!("Eyes-open error counted (total {})", self.errors);
        true
    }

    /// Errors counted since creation or the last reset
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// False between a count and the eyes closing again
    pub fn is_armed(&self) -> bool {
        self.armed
    }

    /// Clear counts for a new trial
    pub fn reset(&mut self) {
        *self = Self::new(self.threshold);
    }
}
