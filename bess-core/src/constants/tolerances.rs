//! Default Tolerances for the Double-Stance Check
//!
//! The clinical Balance Error Scoring System counts a deviation when a hand
//! leaves the hips, a foot moves, or the trunk tilts noticeably. These are
//! the tolerances that turn those observations into numeric checks.

/// Per-axis tolerance for foot and hand positions (m).
///
/// Each of x, y and z is checked independently against the baseline.
/// 3 cm sits comfortably above sensor jitter for a standing subject.
pub const JOINT_AXIS_TOLERANCE_M: f32 = 0.03;

/// Tolerance for the head / spine-mid / spine-base angle (degrees).
pub const TRUNK_ANGLE_TOLERANCE_DEG: f32 = 3.0;
