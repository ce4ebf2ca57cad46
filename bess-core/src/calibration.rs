//! Reference-Pose Calibration
//!
//! ## Overview
//!
//! Before a test the subject holds the target pose for a few seconds while
//! the sensor records it. [`CalibrationSession`] collects the seven tracked
//! joints from each of those frames and reduces them to a [`Baseline`]:
//!
//! - one mean position per tracked joint, averaged per axis
//! - one mean trunk angle, averaged over the per-frame angles
//!
//! ```text
//! start() ──► record() × n ──► finish() ──► Baseline
//!   │            │                 │
//!   clears       rejects frames    averages once,
//!   window       missing a joint   leaves window empty
//! ```
//!
//! ## Trunk Angle
//!
//! The trunk angle is computed on every recorded frame and those angles are
//! averaged. It is not the angle of the averaged positions.
//!
//! ## Capacity
//!
//! The window is a fixed-capacity `heapless::Vec`. `N` is the hard upper
//! bound (150 frames ≈ 5 s at 30 fps by default) and a runtime target may be
//! set lower. Recording past the target fails with
//! [`PoseError::CalibrationFull`].
//!
//! ## Usage Example
//!
//! ```rust
//! use bess_core::calibration::CalibrationSession;
//! use bess_core::geometry::Point3;
//! use bess_core::skeleton::{BodyFrame, JointType};
//!
//! let frame = BodyFrame::new()
//!     .with_joint(JointType::FootLeft, Point3::new(0.0, 0.0, 2.0))
//!     .with_joint(JointType::FootRight, Point3::new(0.2, 0.0, 2.0))
//!     .with_joint(JointType::HandLeft, Point3::new(0.3, 0.9, 2.0))
//!     .with_joint(JointType::HandRight, Point3::new(-0.3, 0.9, 2.0))
//!     .with_joint(JointType::Head, Point3::new(0.1, 1.7, 2.0))
//!     .with_joint(JointType::SpineMid, Point3::new(0.1, 1.3, 2.05))
//!     .with_joint(JointType::SpineBase, Point3::new(0.12, 1.0, 2.05));
//!
//! let mut session: CalibrationSession = CalibrationSession::new();
//! session.start();
//! for _ in 0..30 {
//!     session.record(&frame)?;
//! }
//!
//! let baseline = session.finish()?;
//! assert_eq!(baseline.foot_right, Point3::new(0.2, 0.0, 2.0));
//! # Ok::<(), bess_core::PoseError>(())
//! ```

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::{FRAME_INTERVAL_MS, MAX_FRAMES_REFERENCE},
    errors::{PoseError, PoseResult},
    geometry::{inter_joint_angle, Point3},
    skeleton::{BodyFrame, JointType},
};

/// Joints recorded during calibration, in storage order
pub const TRACKED_JOINTS: [JointType; 7] = [
    JointType::FootLeft,
    JointType::FootRight,
    JointType::HandLeft,
    JointType::HandRight,
    JointType::Head,
    JointType::SpineMid,
    JointType::SpineBase,
];

/// Calibrated reference pose
///
/// Immutable once produced. A new calibration produces a new value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Baseline {
    /// Mean left foot position
    pub foot_left: Point3,
    /// Mean right foot position
    pub foot_right: Point3,
    /// Mean left hand position
    pub hand_left: Point3,
    /// Mean right hand position
    pub hand_right: Point3,
    /// Mean head position
    pub head: Point3,
    /// Mean spine-mid position
    pub spine_mid: Point3,
    /// Mean spine-base position
    pub spine_base: Point3,
    /// Mean of the per-frame head/spine-mid/spine-base angles, degrees
    pub trunk_angle_deg: f32,
    /// Frames averaged into the positions
    pub frames: u32,
}

impl Baseline {
    /// Reference position for a tracked joint, `None` for untracked joints
    pub fn position(&self, joint: JointType) -> Option<Point3> {
        match joint {
            JointType::FootLeft => Some(self.foot_left),
            JointType::FootRight => Some(self.foot_right),
            JointType::HandLeft => Some(self.hand_left),
            JointType::HandRight => Some(self.hand_right),
            JointType::Head => Some(self.head),
            JointType::SpineMid => Some(self.spine_mid),
            JointType::SpineBase => Some(self.spine_base),
            _ => None,
        }
    }
}

/// Where a calibration window stands after a recorded frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalibrationProgress {
    /// Frames stored so far
    pub recorded: usize,
    /// Frames the window is aiming for
    pub target: usize,
    /// True once `recorded == target`
    pub complete: bool,
}

impl CalibrationProgress {
    /// Completion as a whole percentage
    pub fn percent(&self) -> u8 {
        if self.target == 0 {
            return 100;
        }
        ((self.recorded.min(self.target) * 100) / self.target) as u8
    }

    /// Recording time covered so far, at the nominal frame interval
    pub fn elapsed_ms(&self) -> u64 {
        self.recorded as u64 * FRAME_INTERVAL_MS
    }
}

#[derive(Debug, Clone, Copy)]
struct CalibrationSample {
    positions: [Point3; TRACKED_JOINTS.len()],
    // None when head, spine-mid and spine-base were degenerate on this frame
    trunk_angle_deg: Option<f32>,
}

/// Caller-owned calibration accumulator
///
/// `N` bounds storage at compile time; [`CalibrationSession::with_target`]
/// picks a smaller runtime window.
#[derive(Debug, Clone)]
pub struct CalibrationSession<const N: usize = MAX_FRAMES_REFERENCE> {
    samples: Vec<CalibrationSample, N>,
    target: usize,
    active: bool,
}

impl<const N: usize> Default for CalibrationSession<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> CalibrationSession<N> {
    /// Session whose window is the full capacity `N`
    pub fn new() -> Self {
        Self {
            samples: Vec::new(),
            target: N,
            active: false,
        }
    }

    /// Session that completes after `target` frames
    pub fn with_target(target: usize) -> PoseResult<Self> {
        if target == 0 || target > N {
            return Err(PoseError::InvalidConfig {
                reason: "calibration window must be between 1 and the session capacity",
            });
        }

        Ok(Self {
            target,
            ..Self::new()
        })
    }

    /// Clear any previous samples and begin recording
    pub fn start(&mut self) {
        self.samples.clear();
        self.active = true;
        log_info!("Calibration started, window of {} frames", self.target);
    }

    /// Discard samples and stop recording
    pub fn abort(&mut self) {
        self.samples.clear();
        self.active = false;
    }

    /// True between [`start`](Self::start) and [`finish`](Self::finish)
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Configured window length
    pub fn target(&self) -> usize {
        self.target
    }

    /// Frames recorded so far
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True when nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Current progress
    pub fn progress(&self) -> CalibrationProgress {
        CalibrationProgress {
            recorded: self.samples.len(),
            target: self.target,
            complete: self.samples.len() >= self.target,
        }
    }

    /// Record one frame of the reference pose
    ///
    /// A frame missing any tracked joint is rejected and nothing is stored.
    /// A frame with a degenerate trunk still contributes its positions.
    pub fn record(&mut self, frame: &BodyFrame) -> PoseResult<CalibrationProgress> {
        if !self.active {
            return Err(PoseError::PhaseViolation {
                reason: "calibration frame recorded before start",
            });
        }
        if self.samples.len() >= self.target {
            return Err(PoseError::CalibrationFull { capacity: self.target });
        }

        let mut positions = [Point3::ZERO; TRACKED_JOINTS.len()];
        for (slot, joint) in positions.iter_mut().zip(TRACKED_JOINTS) {
            *slot = frame.joint(joint).map_err(|e| {
                log_debug!("Calibration frame rejected: {}", e);
                e
            })?;
        }

        let [.., head, spine_mid, spine_base] = positions;
        let trunk_angle_deg = inter_joint_angle(head, spine_mid, spine_base).ok();

        self.samples
            .push(CalibrationSample { positions, trunk_angle_deg })
            .map_err(|_| PoseError::CalibrationFull { capacity: N })?;

        Ok(self.progress())
    }

    /// Average the window into a baseline
    ///
    /// Consumes the samples: the session is left empty and inactive whether
    /// or not averaging succeeds.
    ///
    /// ## Errors
    ///
    /// - [`PoseError::CalibrationEmpty`] if no frame was recorded
    /// - [`PoseError::DegenerateGeometry`] if no frame produced a trunk angle
    pub fn finish(&mut self) -> PoseResult<Baseline> {
        self.active = false;
        let result = self.average();
        self.samples.clear();

        match &result {
            Ok(baseline) => {
                log_info!(
                    "Calibration finished: {} frames, trunk angle {:.2} deg",
                    baseline.frames,
                    baseline.trunk_angle_deg
                );
            }
            Err(e) => {
                log_warn!("Calibration failed: {}", e);
            }
        }

        result
    }

    fn average(&self) -> PoseResult<Baseline> {
        if self.samples.is_empty() {
            return Err(PoseError::CalibrationEmpty);
        }

        // f64 sums of f32 samples are exact here, so identical frames
        // average back to the recorded value.
        let mut sums = [[0.0f64; 3]; TRACKED_JOINTS.len()];
        let mut angle_sum = 0.0f64;
        let mut angle_count = 0u32;

        for sample in &self.samples {
            for (sum, p) in sums.iter_mut().zip(sample.positions.iter()) {
                sum[0] += p.x as f64;
                sum[1] += p.y as f64;
                sum[2] += p.z as f64;
            }
            if let Some(angle) = sample.trunk_angle_deg {
                angle_sum += angle as f64;
                angle_count += 1;
            }
        }

        if angle_count == 0 {
            return Err(PoseError::DegenerateGeometry);
        }

        let n = self.samples.len() as f64;
        let mean = |sum: [f64; 3]| Point3::new((sum[0] / n) as f32, (sum[1] / n) as f32, (sum[2] / n) as f32);

        Ok(Baseline {
            foot_left: mean(sums[0]),
            foot_right: mean(sums[1]),
            hand_left: mean(sums[2]),
            hand_right: mean(sums[3]),
            head: mean(sums[4]),
            spine_mid: mean(sums[5]),
            spine_base: mean(sums[6]),
            trunk_angle_deg: (angle_sum / angle_count as f64) as f32,
            frames: self.samples.len() as u32,
        })
    }
}
