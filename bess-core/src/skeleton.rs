//! Skeleton Frames from the Body Sensor
//!
//! The engine does not segment bodies itself. It consumes one [`BodyFrame`]
//! per sensor tick holding already-resolved camera-space positions for the
//! sensor's fixed 25-joint taxonomy.
//!
//! Joints can be missing: the sensor drops occluded joints, and drivers
//! occasionally emit NaN coordinates. [`BodyFrame::joint`] turns both into an
//! error so the caller can fail the affected check and carry on with the rest
//! of the frame.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    errors::{PoseError, PoseResult},
    geometry::Point3,
};

/// Joint identifiers, in the sensor's native index order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum JointType {
    SpineBase = 0,
    SpineMid = 1,
    Neck = 2,
    Head = 3,
    ShoulderLeft = 4,
    ElbowLeft = 5,
    WristLeft = 6,
    HandLeft = 7,
    ShoulderRight = 8,
    ElbowRight = 9,
    WristRight = 10,
    HandRight = 11,
    HipLeft = 12,
    KneeLeft = 13,
    AnkleLeft = 14,
    FootLeft = 15,
    HipRight = 16,
    KneeRight = 17,
    AnkleRight = 18,
    FootRight = 19,
    SpineShoulder = 20,
    HandTipLeft = 21,
    ThumbLeft = 22,
    HandTipRight = 23,
    ThumbRight = 24,
}

impl JointType {
    /// Number of joints in the taxonomy
    pub const COUNT: usize = 25;

    /// Every joint, in index order
    pub const ALL: [JointType; Self::COUNT] = [
        JointType::SpineBase,
        JointType::SpineMid,
        JointType::Neck,
        JointType::Head,
        JointType::ShoulderLeft,
        JointType::ElbowLeft,
        JointType::WristLeft,
        JointType::HandLeft,
        JointType::ShoulderRight,
        JointType::ElbowRight,
        JointType::WristRight,
        JointType::HandRight,
        JointType::HipLeft,
        JointType::KneeLeft,
        JointType::AnkleLeft,
        JointType::FootLeft,
        JointType::HipRight,
        JointType::KneeRight,
        JointType::AnkleRight,
        JointType::FootRight,
        JointType::SpineShoulder,
        JointType::HandTipLeft,
        JointType::ThumbLeft,
        JointType::HandTipRight,
        JointType::ThumbRight,
    ];

    /// Slot of this joint inside a frame
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Snake-case name for logs and reports
    pub const fn name(self) -> &'static str {
        match self {
            JointType::SpineBase => "spine_base",
            JointType::SpineMid => "spine_mid",
            JointType::Neck => "neck",
            JointType::Head => "head",
            JointType::ShoulderLeft => "shoulder_left",
            JointType::ElbowLeft => "elbow_left",
            JointType::WristLeft => "wrist_left",
            JointType::HandLeft => "hand_left",
            JointType::ShoulderRight => "shoulder_right",
            JointType::ElbowRight => "elbow_right",
            JointType::WristRight => "wrist_right",
            JointType::HandRight => "hand_right",
            JointType::HipLeft => "hip_left",
            JointType::KneeLeft => "knee_left",
            JointType::AnkleLeft => "ankle_left",
            JointType::FootLeft => "foot_left",
            JointType::HipRight => "hip_right",
            JointType::KneeRight => "knee_right",
            JointType::AnkleRight => "ankle_right",
            JointType::FootRight => "foot_right",
            JointType::SpineShoulder => "spine_shoulder",
            JointType::HandTipLeft => "hand_tip_left",
            JointType::ThumbLeft => "thumb_left",
            JointType::HandTipRight => "hand_tip_right",
            JointType::ThumbRight => "thumb_right",
        }
    }
}

/// One body as reported by the sensor for a single tick
///
/// Owned by the caller and only read by the engine.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BodyFrame {
    joints: [Option<Point3>; JointType::COUNT],
}

impl BodyFrame {
    /// Frame with no joints reported
    pub const fn new() -> Self {
        Self {
            joints: [None; JointType::COUNT],
        }
    }

    /// Builder-style joint assignment
    pub fn with_joint(mut self, joint: JointType, position: Point3) -> Self {
        self.set_joint(joint, position);
        self
    }

    /// Store a joint position
    pub fn set_joint(&mut self, joint: JointType, position: Point3) {
        self.joints[joint.index()] = Some(position);
    }

    /// Mark a joint as not tracked
    pub fn clear_joint(&mut self, joint: JointType) {
        self.joints[joint.index()] = None;
    }

    /// Position of a joint
    ///
    /// Fails with [`PoseError::MissingJoint`] when the joint was not reported
    /// and [`PoseError::InvalidValue`] when its coordinates are not finite.
    pub fn joint(&self, joint: JointType) -> PoseResult<Point3> {
        let position = self.joints[joint.index()].ok_or(PoseError::MissingJoint { joint })?;

        if !position.is_finite() {
            return Err(PoseError::InvalidValue);
        }

        Ok(position)
    }

    /// Number of joints with a position
    pub fn tracked_count(&self) -> usize {
        self.joints.iter().filter(|j| j.is_some()).count()
    }

    /// Shift every reported joint by `offset`
    pub fn translated(&self, offset: Point3) -> Self {
        let mut moved = self.clone();
        for slot in moved.joints.iter_mut().flatten() {
            *slot = *slot + offset;
        }
        moved
    }
}
