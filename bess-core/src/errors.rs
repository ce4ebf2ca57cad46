//! Error Types for Pose Calibration and Tracking
//!
//! ## Design Philosophy
//!
//! The engine runs inside a sensor callback at ~30 Hz, so errors follow the
//! same rules as the rest of the hot path:
//!
//! 1. **Small Size**: Every variant is a handful of bytes and the enum is `Copy`.
//! 2. **No Heap Allocation**: Context is carried as `&'static str` or small
//!    inline values, never `String`.
//! 3. **Local and Recoverable**: Nothing here is fatal. A failed check marks
//!    one joint or one frame as failing, and processing continues with the
//!    next frame.
//!
//! ## Error Categories
//!
//! ### Frame Problems
//! - `MissingJoint`: the sensor did not deliver a usable position (occlusion)
//! - `InvalidValue`: NaN or infinite coordinate
//! - `DegenerateGeometry`: coincident joints, so no angle can be formed
//!
//! ### Lifecycle Problems
//! - `BaselineMissing`: a trial was started before any calibration finished
//! - `CalibrationEmpty` / `CalibrationFull`: accumulator misuse
//! - `PhaseViolation`: an operation was called in the wrong test phase
//!
//! ### Setup Problems
//! - `InvalidConfig`: a configuration value is out of its legal range
//!
//! ## Handling Strategy
//!
//! ```rust
//! use bess_core::{PoseError, skeleton::{BodyFrame, JointType}};
//!
//! let frame = BodyFrame::new();
//! match frame.joint(JointType::FootLeft) {
//!     Ok(_position) => {}
//!     Err(PoseError::MissingJoint { joint }) => {
//!         // Occluded joint: fail this check only, keep going
//!         let _ = joint;
//!     }
//!     Err(_) => {}
//! }
//! ```

use thiserror_no_std::Error;

use crate::skeleton::JointType;

/// Result type for pose operations
pub type PoseResult<T> = Result<T, PoseError>;

/// Pose engine errors - kept small for per-frame use
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PoseError {
    /// A joint needed by the computation was not reported in the frame
    #[error("Joint {} missing from frame", .joint.name())]
    MissingJoint {
        /// The joint that could not be read
        joint: JointType,
    },

    /// Coincident points produced a zero-length segment
    #[error("Degenerate geometry: zero-length segment")]
    DegenerateGeometry,

    /// Value makes no physical sense (NaN, infinity)
    #[error("Invalid value: not a valid number")]
    InvalidValue,

    /// No calibrated baseline is available for comparison
    #[error("Baseline missing: calibration has not been completed")]
    BaselineMissing,

    /// Calibration finished without a single recorded frame
    #[error("Calibration finished with no recorded frames")]
    CalibrationEmpty,

    /// Calibration window already holds its maximum number of frames
    #[error("Calibration window full ({capacity} frames)")]
    CalibrationFull {
        /// Configured capacity of the window
        capacity: usize,
    },

    /// Configuration value outside its legal range
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Which setting was rejected
        reason: &'static str,
    },

    /// Operation is not allowed in the current test phase
    #[error("Phase violation: {reason}")]
    PhaseViolation {
        /// What was attempted
        reason: &'static str,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for PoseError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::MissingJoint { joint } =>
                defmt::write!(fmt, "Joint {} missing", joint.name()),
            Self::DegenerateGeometry =>
                defmt::write!(fmt, "Degenerate geometry"),
            Self::InvalidValue =>
                defmt::write!(fmt, "Invalid value"),
            Self::BaselineMissing =>
                defmt::write!(fmt, "Baseline missing"),
            Self::CalibrationEmpty =>
                defmt::write!(fmt, "Calibration empty"),
            Self::CalibrationFull { capacity } =>
                defmt::write!(fmt, "Calibration full ({})", capacity),
            Self::InvalidConfig { reason } =>
                defmt::write!(fmt, "Invalid config: {}", reason),
            Self::PhaseViolation { reason } =>
                defmt::write!(fmt, "Phase violation: {}", reason),
        }
    }
}
