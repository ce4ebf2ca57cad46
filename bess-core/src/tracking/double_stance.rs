//! Double-stance pose validator
//!
//! Feet together, hands on hips, eyes closed. Five checks per frame:
//!
//! | Check      | Compared against               | Tolerance           | Bit |
//! |------------|--------------------------------|---------------------|-----|
//! | Left foot  | baseline position, per axis    | `joint_tolerance_m` | 16  |
//! | Right foot | baseline position, per axis    | `joint_tolerance_m` | 8   |
//! | Left hand  | baseline position, per axis    | `joint_tolerance_m` | 4   |
//! | Right hand | baseline position, per axis    | `joint_tolerance_m` | 2   |
//! | Trunk      | baseline head/spine angle      | `trunk_tolerance`   | 1   |
//!
//! A joint the sensor lost fails its own check and nothing else. Without a
//! baseline every check fails.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    calibration::Baseline,
    config::SessionConfig,
    constants::{JOINT_AXIS_TOLERANCE_M, TRUNK_ANGLE_TOLERANCE_DEG},
    geometry::{inter_joint_angle, within_margin, within_margin_3d, Point3},
    skeleton::{BodyFrame, JointType},
};

use super::{BodyPart, FailureMask, PoseValidator, Validation};

/// Signed live-minus-baseline deltas for one frame
///
/// `None` where the value could not be computed (missing joint, degenerate
/// trunk, no baseline).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Deviations {
    /// Left foot displacement, metres
    pub left_foot: Option<Point3>,
    /// Right foot displacement, metres
    pub right_foot: Option<Point3>,
    /// Left hand displacement, metres
    pub left_hand: Option<Point3>,
    /// Right hand displacement, metres
    pub right_hand: Option<Point3>,
    /// Trunk angle change, degrees
    pub trunk_angle_deg: Option<f32>,
}

impl Deviations {
    /// Displacement of a limb; always `None` for [`BodyPart::Trunk`]
    pub fn limb(&self, part: BodyPart) -> Option<Point3> {
        match part {
            BodyPart::LeftFoot => self.left_foot,
            BodyPart::RightFoot => self.right_foot,
            BodyPart::LeftHand => self.left_hand,
            BodyPart::RightHand => self.right_hand,
            BodyPart::Trunk => None,
        }
    }

    fn limb_mut(&mut self, part: BodyPart) -> Option<&mut Option<Point3>> {
        match part {
            BodyPart::LeftFoot => Some(&mut self.left_foot),
            BodyPart::RightFoot => Some(&mut self.right_foot),
            BodyPart::LeftHand => Some(&mut self.left_hand),
            BodyPart::RightHand => Some(&mut self.right_hand),
            BodyPart::Trunk => None,
        }
    }
}

const LIMBS: [(BodyPart, JointType); 4] = [
    (BodyPart::LeftFoot, JointType::FootLeft),
    (BodyPart::RightFoot, JointType::FootRight),
    (BodyPart::LeftHand, JointType::HandLeft),
    (BodyPart::RightHand, JointType::HandRight),
];

/// Compares live frames against a calibrated double-stance baseline
#[derive(Debug, Clone)]
pub struct DoubleStanceValidator {
    baseline: Option<Baseline>,

    /// Per-axis limb tolerance, metres
    joint_tolerance_m: f32,

    /// Trunk angle tolerance, degrees
    trunk_tolerance_deg: f32,
}

impl Default for DoubleStanceValidator {
    fn default() -> Self {
        Self {
            baseline: None,
            joint_tolerance_m: JOINT_AXIS_TOLERANCE_M,
            trunk_tolerance_deg: TRUNK_ANGLE_TOLERANCE_DEG,
        }
    }
}

impl DoubleStanceValidator {
    /// Validator with default tolerances against `baseline`
    pub fn new(baseline: Baseline) -> Self {
        Self {
            baseline: Some(baseline),
            ..Self::default()
        }
    }

    /// Validator without a baseline and custom tolerances
    ///
    /// Negative tolerances are taken by magnitude.
    pub fn new_with_limits(joint_tolerance_m: f32, trunk_tolerance_deg: f32) -> Self {
        Self {
            baseline: None,
            joint_tolerance_m: joint_tolerance_m.abs(),
            trunk_tolerance_deg: trunk_tolerance_deg.abs(),
        }
    }

    /// Validator using the tolerances of a session
    pub fn from_config(config: &SessionConfig) -> Self {
        Self::new_with_limits(config.joint_tolerance_m, config.trunk_angle_tolerance_deg)
    }

    /// Replace the baseline
    pub fn set_baseline(&mut self, baseline: Baseline) {
        self.baseline = Some(baseline);
    }

    /// Drop the baseline; every check fails until a new one is set
    pub fn clear_baseline(&mut self) {
        self.baseline = None;
    }

    /// Current baseline
    pub fn baseline(&self) -> Option<&Baseline> {
        self.baseline.as_ref()
    }

    /// Per-axis limb tolerance in metres
    pub fn joint_tolerance_m(&self) -> f32 {
        self.joint_tolerance_m
    }

    /// Trunk tolerance in degrees
    pub fn trunk_tolerance_deg(&self) -> f32 {
        self.trunk_tolerance_deg
    }

    /// Run the five checks against the baseline
    pub fn check(&self, frame: &BodyFrame) -> Validation {
        let Some(baseline) = self.baseline.as_ref() else {
            return Validation {
                mask: FailureMask::ALL,
                deviations: Deviations::default(),
            };
        };

        let mut mask = FailureMask::empty();
        let mut deviations = Deviations::default();

        for (part, joint) in LIMBS {
            let reference = baseline.position(joint).unwrap_or(Point3::ZERO);
            match frame.joint(joint) {
                Ok(live) => {
                    if let Some(slot) = deviations.limb_mut(part) {
                        *slot = Some(live - reference);
                    }
                    if !within_margin_3d(self.joint_tolerance_m, reference, live) {
                        mask.insert(part.mask());
                    }
                }
                Err(_) => mask.insert(part.mask()),
            }
        }

        match trunk_angle(frame) {
            Some(angle) => {
                deviations.trunk_angle_deg = Some(angle - baseline.trunk_angle_deg);
                if !within_margin(self.trunk_tolerance_deg, baseline.trunk_angle_deg, angle) {
                    mask.insert(FailureMask::TRUNK);
                }
            }
            None => mask.insert(FailureMask::TRUNK),
        }

        Validation { mask, deviations }
    }
}

impl PoseValidator for DoubleStanceValidator {
    fn validate(&mut self, frame: &BodyFrame) -> Validation {
        self.check(frame)
    }
}

fn trunk_angle(frame: &BodyFrame) -> Option<f32> {
    let head = frame.joint(JointType::Head).ok()?;
    let spine_mid = frame.joint(JointType::SpineMid).ok()?;
    let spine_base = frame.joint(JointType::SpineBase).ok()?;

    inter_joint_angle(head, spine_mid, spine_base).ok()
}
