//! Skeleton frame generators
//!
//! Positions are in metres, camera space, subject standing ~2 m from the
//! sensor facing it. x grows to the sensor's left, so the subject's left
//! side has the smaller x.

use bess_core::{
    geometry::Point3,
    skeleton::{BodyFrame, JointType},
};

/// Depth of the subject from the sensor
pub const STANCE_DEPTH: f32 = 2.0;

/// Canonical double-stance body: feet together, hands on hips
pub fn double_stance() -> BodyFrame {
    let z = STANCE_DEPTH;
    BodyFrame::new()
        .with_joint(JointType::Head, Point3::new(0.10, 1.70, z))
        .with_joint(JointType::Neck, Point3::new(0.10, 1.52, z))
        .with_joint(JointType::SpineShoulder, Point3::new(0.10, 1.45, z + 0.02))
        .with_joint(JointType::SpineMid, Point3::new(0.12, 1.30, z + 0.05))
        .with_joint(JointType::SpineBase, Point3::new(0.10, 1.00, z + 0.05))
        .with_joint(JointType::ShoulderLeft, Point3::new(-0.08, 1.42, z))
        .with_joint(JointType::ElbowLeft, Point3::new(-0.18, 1.18, z))
        .with_joint(JointType::WristLeft, Point3::new(-0.10, 1.02, z))
        .with_joint(JointType::HandLeft, Point3::new(-0.06, 1.00, z))
        .with_joint(JointType::HandTipLeft, Point3::new(-0.02, 0.98, z))
        .with_joint(JointType::ThumbLeft, Point3::new(-0.05, 1.03, z - 0.02))
        .with_joint(JointType::ShoulderRight, Point3::new(0.28, 1.42, z))
        .with_joint(JointType::ElbowRight, Point3::new(0.38, 1.18, z))
        .with_joint(JointType::WristRight, Point3::new(0.30, 1.02, z))
        .with_joint(JointType::HandRight, Point3::new(0.26, 1.00, z))
        .with_joint(JointType::HandTipRight, Point3::new(0.22, 0.98, z))
        .with_joint(JointType::ThumbRight, Point3::new(0.25, 1.03, z - 0.02))
        .with_joint(JointType::HipLeft, Point3::new(0.02, 0.95, z + 0.03))
        .with_joint(JointType::KneeLeft, Point3::new(0.04, 0.52, z))
        .with_joint(JointType::AnkleLeft, Point3::new(0.05, 0.10, z + 0.02))
        .with_joint(JointType::FootLeft, Point3::new(0.05, 0.03, z - 0.08))
        .with_joint(JointType::HipRight, Point3::new(0.18, 0.95, z + 0.03))
        .with_joint(JointType::KneeRight, Point3::new(0.16, 0.52, z))
        .with_joint(JointType::AnkleRight, Point3::new(0.15, 0.10, z + 0.02))
        .with_joint(JointType::FootRight, Point3::new(0.15, 0.03, z - 0.08))
}

/// Minimal calibration body from the protocol worked example
///
/// Feet at (0,0,0)/(0.2,0,0), hands at (0.3,0.4,0)/(-0.3,0.4,0).
pub fn worked_example() -> BodyFrame {
    BodyFrame::new()
        .with_joint(JointType::FootLeft, Point3::new(0.0, 0.0, 0.0))
        .with_joint(JointType::FootRight, Point3::new(0.2, 0.0, 0.0))
        .with_joint(JointType::HandLeft, Point3::new(0.3, 0.4, 0.0))
        .with_joint(JointType::HandRight, Point3::new(-0.3, 0.4, 0.0))
        .with_joint(JointType::Head, Point3::new(0.1, 1.7, 0.0))
        .with_joint(JointType::SpineMid, Point3::new(0.12, 1.3, 0.05))
        .with_joint(JointType::SpineBase, Point3::new(0.1, 1.0, 0.05))
}

/// Copy of `frame` with one joint moved by `delta`
pub fn shifted(frame: &BodyFrame, joint: JointType, delta: Point3) -> BodyFrame {
    match frame.joint(joint) {
        Ok(p) => frame.clone().with_joint(joint, p + delta),
        Err(_) => frame.clone(),
    }
}

/// Copy of `frame` with the head pushed forward (toward the sensor) by `metres`
pub fn leaning(frame: &BodyFrame, metres: f32) -> BodyFrame {
    shifted(frame, JointType::Head, Point3::new(0.0, 0.0, -metres))
}

/// Copy of `frame` with one joint dropped, as on occlusion
pub fn occluded(frame: &BodyFrame, joint: JointType) -> BodyFrame {
    let mut copy = frame.clone();
    copy.clear_joint(joint);
    copy
}

/// Deterministic per-frame jitter source
///
/// A tiny LCG keeps tests reproducible without a rand dependency.
pub struct Jitter {
    state: u32,
    amplitude: f32,
}

impl Jitter {
    /// Jitter of at most `amplitude` metres per axis
    pub fn new(seed: u32, amplitude: f32) -> Self {
        Self { state: seed, amplitude }
    }

    fn next_unit(&mut self) -> f32 {
        self.state = self.state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        (self.state >> 8) as f32 / (1u32 << 24) as f32 * 2.0 - 1.0
    }

    /// `frame` with every joint nudged independently
    pub fn apply(&mut self, frame: &BodyFrame) -> BodyFrame {
        let mut out = frame.clone();
        for joint in JointType::ALL {
            if let Ok(p) = frame.joint(joint) {
                let noise = Point3::new(self.next_unit(), self.next_unit(), self.next_unit());
                out.set_joint(joint, p + noise * self.amplitude);
            }
        }
        out
    }
}
