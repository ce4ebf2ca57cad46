//! Timing Constants
//!
//! Frame counts are expressed at the body sensor's nominal rate. Changing
//! the rate means revisiting every frame-denominated constant below.

/// Nominal body-frame rate of the depth sensor (Hz).
pub const SENSOR_FRAME_RATE_HZ: u32 = 30;

/// Time accounted per calibration frame when reporting progress (ms).
///
/// Matches the 50 ms display tick used while recording the reference pose.
pub const FRAME_INTERVAL_MS: u64 = 50;

/// Frames averaged into the reference pose.
///
/// 150 frames is five seconds at 30 fps.
pub const MAX_FRAMES_REFERENCE: usize = 150;

/// Consecutive failing frames tolerated before an error is counted.
///
/// The error is counted on the first frame that exceeds this, so with the
/// default a failure must persist for 16 frames (~0.5 s).
pub const ERROR_FRAME_THRESHOLD: u32 = 15;

/// Frames during which a counted foot failure is not counted again (~1 s).
///
/// Stepping back into place after a foot shift disturbs hand and trunk
/// readings for a moment.
pub const FOOT_SKIP_FRAMES: u32 = 30;

/// Suppression window after a counted hand or trunk failure.
pub const OTHER_SKIP_FRAMES: u32 = 0;

/// Length of one stance trial (s).
pub const TEST_DURATION_S: u32 = 30;

/// Consecutive good frames that confirm the stance was held (30 s at 30 fps).
pub const IDENTIFICATION_FRAMES: u32 = 900;
