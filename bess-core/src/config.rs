//! Session Configuration
//!
//! Every tunable of a balance test in one `Copy` struct. Defaults come from
//! [`crate::constants`] and reproduce the standard protocol: a 5 s
//! calibration, ±3 cm per axis, ±3° of trunk tilt, 15-frame error debounce
//! and a 30 s trial.
//!
//! ```rust
//! use bess_core::config::SessionConfig;
//!
//! let config = SessionConfig::default()
//!     .with_joint_tolerance_m(0.05)
//!     .with_test_duration_s(20);
//! config.validate()?;
//! # Ok::<(), bess_core::PoseError>(())
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::*,
    errors::{PoseError, PoseResult},
};

/// Tunables for one balance test
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Frames averaged into the baseline (at most [`MAX_FRAMES_REFERENCE`])
    pub calibration_frames: usize,

    /// Allowed drift of a foot or hand on each axis, metres
    pub joint_tolerance_m: f32,

    /// Allowed change of the trunk angle, degrees
    pub trunk_angle_tolerance_deg: f32,

    /// Consecutive failing frames tolerated before an error is counted
    pub error_frame_threshold: u32,

    /// Frames a counted foot failure stays suppressed
    pub foot_skip_frames: u32,

    /// Frames any other counted failure stays suppressed
    pub other_skip_frames: u32,

    /// Trial length, seconds
    pub test_duration_s: u32,

    /// Consecutive passing frames before the pose is confirmed
    pub identification_frames: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            calibration_frames: MAX_FRAMES_REFERENCE,
            joint_tolerance_m: JOINT_AXIS_TOLERANCE_M,
            trunk_angle_tolerance_deg: TRUNK_ANGLE_TOLERANCE_DEG,
            error_frame_threshold: ERROR_FRAME_THRESHOLD,
            foot_skip_frames: FOOT_SKIP_FRAMES,
            other_skip_frames: OTHER_SKIP_FRAMES,
            test_duration_s: TEST_DURATION_S,
            identification_frames: IDENTIFICATION_FRAMES,
        }
    }
}

impl SessionConfig {
    /// Set the calibration window
    pub fn with_calibration_frames(mut self, frames: usize) -> Self {
        self.calibration_frames = frames;
        self
    }

    /// Set the per-axis joint tolerance
    pub fn with_joint_tolerance_m(mut self, metres: f32) -> Self {
        self.joint_tolerance_m = metres;
        self
    }

    /// Set the trunk angle tolerance
    pub fn with_trunk_angle_tolerance_deg(mut self, degrees: f32) -> Self {
        self.trunk_angle_tolerance_deg = degrees;
        self
    }

    /// Set the debounce threshold
    pub fn with_error_frame_threshold(mut self, frames: u32) -> Self {
        self.error_frame_threshold = frames;
        self
    }

    /// Set both suppression windows
    pub fn with_skip_frames(mut self, foot: u32, other: u32) -> Self {
        self.foot_skip_frames = foot;
        self.other_skip_frames = other;
        self
    }

    /// Set the trial length
    pub fn with_test_duration_s(mut self, seconds: u32) -> Self {
        self.test_duration_s = seconds;
        self
    }

    /// Set the identification threshold
    pub fn with_identification_frames(mut self, frames: u32) -> Self {
        self.identification_frames = frames;
        self
    }

    /// Trial length in milliseconds
    pub fn test_duration_ms(&self) -> u64 {
        self.test_duration_s as u64 * 1000
    }

    /// Check every value is in its legal range
    pub fn validate(&self) -> PoseResult<()> {
        let reject = |reason: &'static str| {
            log_warn!("Session config rejected: {}", reason);
            Err(PoseError::InvalidConfig { reason })
        };

        if self.calibration_frames == 0 || self.calibration_frames > MAX_FRAMES_REFERENCE {
            return reject("calibration_frames must be between 1 and 150");
        }
        if !(self.joint_tolerance_m.is_finite() && self.joint_tolerance_m > 0.0) {
            return reject("joint_tolerance_m must be a positive number");
        }
        if !(self.trunk_angle_tolerance_deg.is_finite() && self.trunk_angle_tolerance_deg > 0.0) {
            return reject("trunk_angle_tolerance_deg must be a positive number");
        }
        if self.error_frame_threshold == 0 {
            return reject("error_frame_threshold must be at least 1");
        }
        if self.test_duration_s == 0 {
            return reject("test_duration_s must be at least 1");
        }
        if self.identification_frames == 0 {
            return reject("identification_frames must be at least 1");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_protocol() {
        let config = SessionConfig::default();
        assert_eq!(config.calibration_frames, 150);
        assert_eq!(config.joint_tolerance_m, 0.03);
        assert_eq!(config.trunk_angle_tolerance_deg, 3.0);
        assert_eq!(config.error_frame_threshold, 15);
        assert_eq!(config.foot_skip_frames, 30);
        assert_eq!(config.other_skip_frames, 0);
        assert_eq!(config.test_duration_ms(), 30_000);
        assert_eq!(config.identification_frames, 900);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        let base = SessionConfig::default();

        assert!(base.with_calibration_frames(0).validate().is_err());
        assert!(base.with_calibration_frames(151).validate().is_err());
        assert!(base.with_joint_tolerance_m(-0.01).validate().is_err());
        assert!(base.with_joint_tolerance_m(f32::NAN).validate().is_err());
        assert!(base.with_trunk_angle_tolerance_deg(0.0).validate().is_err());
        assert!(base.with_error_frame_threshold(0).validate().is_err());
        assert!(base.with_test_duration_s(0).validate().is_err());
        assert!(base.with_identification_frames(0).validate().is_err());
    }

    #[test]
    fn zero_skip_windows_are_allowed() {
        assert!(SessionConfig::default().with_skip_frames(0, 0).validate().is_ok());
    }
}
