//! Pose Tracking and Error Counting
//!
//! ## Overview
//!
//! Each live frame goes through three layers:
//!
//! ```text
//! BodyFrame ──► PoseValidator ──► PoseTracker ──► Tracker (edges)
//!                    │
//!                    └── mask ──► ErrorDebouncer ──► counted errors
//! ```
//!
//! 1. A [`PoseValidator`] compares the frame against the baseline and
//!    returns a [`Validation`]: which checks failed and by how much.
//! 2. [`PoseTracker`] turns the pass/fail stream into a [`TrackingState`]
//!    that reaches `Identified` only after an unbroken run of passing frames.
//! 3. [`ErrorDebouncer`] turns sustained failures into counted errors without
//!    recounting the same failure every frame.
//!
//! ## State Machine
//!
//! ```text
//!                 pass, counter < threshold
//!                 (counter += 1)
//!               ┌──────────────┐
//!               ▼              │
//! NotIdentified ──pass──► Ongoing ──pass, counter == threshold──► Identified
//!      ▲                      │                                      │
//!      └───────fail───────────┴───────────────fail───────────────────┘
//!              (counter = 0)
//! ```
//!
//! Any failure resets the counter, so `Identified` requires `threshold`
//! consecutive passing frames.

mod debounce;
mod double_stance;
mod mask;
mod tracker;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::skeleton::BodyFrame;

pub use debounce::{ErrorDebouncer, EyesOpenMonitor};
pub use double_stance::{Deviations, DoubleStanceValidator};
pub use mask::{BodyPart, FailureMask};
pub use tracker::Tracker;

/// Progress toward confirming a pose
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TrackingState {
    /// Last frame failed, or nothing seen yet
    #[default]
    NotIdentified,
    /// Frames are passing, threshold not reached yet
    Ongoing,
    /// Threshold reached with no failures in between
    Identified,
}

/// Outcome of validating one frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Validation {
    /// Failed checks; empty when the frame passed
    pub mask: FailureMask,
    /// How far each checked part is from the baseline
    pub deviations: Deviations,
}

impl Validation {
    /// True when every check passed
    pub fn is_valid(&self) -> bool {
        self.mask.is_empty()
    }
}

/// Pose-specific frame check
///
/// Implementations hold whatever reference data they compare against.
/// `&mut self` lets stateful validators keep per-frame history.
pub trait PoseValidator {
    /// Check one frame
    fn validate(&mut self, frame: &BodyFrame) -> Validation;
}

/// Consecutive-success threshold machine around a validator
#[derive(Debug, Clone)]
pub struct PoseTracker<V> {
    validator: V,
    threshold: u32,
    counter: u32,
    state: TrackingState,
    last: Validation,
}

impl<V: PoseValidator> PoseTracker<V> {
    /// Track `validator` until `threshold` consecutive frames pass
    pub fn new(validator: V, threshold: u32) -> Self {
        Self {
            validator,
            threshold,
            counter: 0,
            state: TrackingState::NotIdentified,
            last: Validation::default(),
        }
    }

    /// Validate one frame and advance the state machine
    pub fn step(&mut self, frame: &BodyFrame) -> TrackingState {
        self.last = self.validator.validate(frame);

        self.state = if !self.last.is_valid() {
            self.counter = 0;
            TrackingState::NotIdentified
        } else if self.counter >= self.threshold {
            TrackingState::Identified
        } else {
            self.counter += 1;
            TrackingState::Ongoing
        };

        self.state
    }

    /// State after the last frame
    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// Validation of the last frame
    pub fn last_validation(&self) -> &Validation {
        &self.last
    }

    /// Consecutive passing frames counted so far
    pub fn counter(&self) -> u32 {
        self.counter
    }

    /// Identification threshold
    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    /// Progress toward identification, 0 to 100
    pub fn progress(&self) -> u8 {
        if self.threshold == 0 {
            return 100;
        }
        ((self.counter.min(self.threshold) as u64 * 100) / self.threshold as u64) as u8
    }

    /// Back to `NotIdentified` with a zero counter
    pub fn reset(&mut self) {
        self.counter = 0;
        self.state = TrackingState::NotIdentified;
        self.last = Validation::default();
    }

    /// Wrapped validator
    pub fn validator(&self) -> &V {
        &self.validator
    }

    /// Wrapped validator, mutably (e.g. to swap its baseline)
    pub fn validator_mut(&mut self) -> &mut V {
        &mut self.validator
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Validator replaying a scripted sequence of masks
    pub struct Scripted<'a> {
        pub masks: &'a [FailureMask],
        pub at: usize,
    }

    impl<'a> Scripted<'a> {
        pub fn new(masks: &'a [FailureMask]) -> Self {
            Self { masks, at: 0 }
        }
    }

    impl PoseValidator for Scripted<'_> {
        fn validate(&mut self, _frame: &BodyFrame) -> Validation {
            let mask = self.masks.get(self.at).copied().unwrap_or_default();
            self.at += 1;
            Validation { mask, deviations: Deviations::default() }
        }
    }
}
