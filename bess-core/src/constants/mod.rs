//! Constants for the BESS Core
//!
//! Centralised, documented constants used throughout the engine. Every
//! numeric default of the balance test lives here with its unit and source.
//!
//! ## Organization
//!
//! Constants are grouped by domain:
//! - **Anthropometry**: segment centre-of-gravity ratios and mass fractions
//! - **Tolerances**: how far a joint or the trunk may drift before a check fails
//! - **Timing**: frame rates, windows and debounce lengths
//! - **Plate**: force-plate geometry and smoothing windows
//!
//! ## Usage Guidelines
//!
//! 1. Always use these constants instead of magic numbers
//! 2. Include the unit in the name
//! 3. Reference the source table or protocol where one exists

/// Segment centre-of-gravity ratios and body-mass fractions.
pub mod anthropometry;

/// Default joint and trunk tolerances.
pub mod tolerances;

/// Frame-rate, window and debounce constants.
pub mod timing;

/// Force-plate geometry and filter windows.
pub mod plate;

pub use tolerances::{JOINT_AXIS_TOLERANCE_M, TRUNK_ANGLE_TOLERANCE_DEG};

pub use timing::{
    SENSOR_FRAME_RATE_HZ, FRAME_INTERVAL_MS, MAX_FRAMES_REFERENCE,
    ERROR_FRAME_THRESHOLD, FOOT_SKIP_FRAMES, OTHER_SKIP_FRAMES,
    TEST_DURATION_S, IDENTIFICATION_FRAMES,
};

pub use plate::{
    PLATE_FILTER_WINDOW, PLATE_COP_FILTER_WINDOW, ZERO_CALIBRATION_SAMPLES,
};
