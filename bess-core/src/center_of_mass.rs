//! Segmental Centre-of-Mass Estimation
//!
//! ## Method
//!
//! The body is split into fourteen rigid segments, each spanning a proximal
//! and a distal joint. For every segment:
//!
//! 1. Locate the segment's own centre of mass on the proximal→distal line:
//!    `proximal - ratio · (proximal - distal)`
//! 2. Express it relative to a reference plane anchored at spine-base
//! 3. Weight it by the segment's share of body mass
//! 4. Accumulate
//!
//! The reference-plane position is added back at the end. This is the
//! moment balance `Σ mᵢ·rᵢ = M·R` taken about spine-base.
//!
//! ```text
//!   segment          proximal         distal        ratio  mass
//!   head             head             neck          -      0.073
//!   trunk            spine_shoulder   spine_base    0.438  0.507
//!   upper arm ×2     shoulder         elbow         0.491  0.026
//!   forearm ×2       elbow            wrist         0.418  0.016
//!   hand ×2          wrist            hand          0.82   0.007
//!   thigh ×2         hip              knee          0.4    0.103
//!   calf ×2          knee             ankle         0.418  0.043
//!   foot ×2          ankle            foot          0.449  0.015
//! ```
//!
//! ## The Head Segment
//!
//! The sensor reports the centre of the head, not the vertex the cadaver
//! ratio is measured from. The reported head position is used as the
//! segment's centre of mass as-is.
//!
//! ## Usage Example
//!
//! ```rust
//! use bess_core::center_of_mass::SegmentModel;
//! use bess_core::geometry::Point3;
//! use bess_core::skeleton::{BodyFrame, JointType};
//!
//! let mut frame = BodyFrame::new();
//! for joint in JointType::ALL {
//!     frame.set_joint(joint, Point3::new(0.0, 1.0, 2.0));
//! }
//!
//! let com = SegmentModel::default().estimate(&frame)?;
//! assert!((com.y - 1.0).abs() < 1e-5);
//! # Ok::<(), bess_core::PoseError>(())
//! ```

use crate::{
    constants::anthropometry::*,
    errors::PoseResult,
    geometry::Point3,
    skeleton::{BodyFrame, JointType},
};

/// One rigid body segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Joint nearer the trunk
    pub proximal: JointType,
    /// Joint further from the trunk
    pub distal: JointType,
    /// Centre-of-gravity position along the segment, from the proximal end.
    /// Zero keeps the proximal position unchanged.
    pub cog_ratio: f32,
    /// Share of total body mass
    pub mass_fraction: f32,
}

impl Segment {
    const fn new(proximal: JointType, distal: JointType, cog_ratio: f32, mass_fraction: f32) -> Self {
        Self { proximal, distal, cog_ratio, mass_fraction }
    }

    /// Centre of mass of this segment in camera space
    pub fn center(&self, proximal: Point3, distal: Point3) -> Point3 {
        proximal - (proximal - distal) * self.cog_ratio
    }
}

/// Number of segments in the standard model
pub const SEGMENT_COUNT: usize = 14;

/// Clauser et al. segment table
pub const CLAUSER_SEGMENTS: [Segment; SEGMENT_COUNT] = [
    Segment::new(JointType::Head, JointType::Neck, 0.0, MASS_HEAD),
    Segment::new(JointType::SpineShoulder, JointType::SpineBase, COG_TRUNK, MASS_TRUNK),
    Segment::new(JointType::ShoulderLeft, JointType::ElbowLeft, COG_UPPER_ARM, MASS_UPPER_ARM),
    Segment::new(JointType::ShoulderRight, JointType::ElbowRight, COG_UPPER_ARM, MASS_UPPER_ARM),
    Segment::new(JointType::ElbowLeft, JointType::WristLeft, COG_FOREARM, MASS_FOREARM),
    Segment::new(JointType::ElbowRight, JointType::WristRight, COG_FOREARM, MASS_FOREARM),
    Segment::new(JointType::WristLeft, JointType::HandLeft, COG_HAND, MASS_HAND),
    Segment::new(JointType::WristRight, JointType::HandRight, COG_HAND, MASS_HAND),
    Segment::new(JointType::HipLeft, JointType::KneeLeft, COG_THIGH, MASS_THIGH),
    Segment::new(JointType::HipRight, JointType::KneeRight, COG_THIGH, MASS_THIGH),
    Segment::new(JointType::KneeLeft, JointType::AnkleLeft, COG_CALF, MASS_CALF),
    Segment::new(JointType::KneeRight, JointType::AnkleRight, COG_CALF, MASS_CALF),
    Segment::new(JointType::AnkleLeft, JointType::FootLeft, COG_FOOT, MASS_FOOT),
    Segment::new(JointType::AnkleRight, JointType::FootRight, COG_FOOT, MASS_FOOT),
];

/// Whole-body centre-of-mass estimator
#[derive(Debug, Clone)]
pub struct SegmentModel {
    segments: [Segment; SEGMENT_COUNT],
    reference: JointType,
}

impl Default for SegmentModel {
    fn default() -> Self {
        Self {
            segments: CLAUSER_SEGMENTS,
            reference: JointType::SpineBase,
        }
    }
}

impl SegmentModel {
    /// Model with a custom segment table, e.g. population-specific ratios
    pub fn with_segments(segments: [Segment; SEGMENT_COUNT]) -> Self {
        Self {
            segments,
            ..Self::default()
        }
    }

    /// Segment table in use
    pub fn segments(&self) -> &[Segment; SEGMENT_COUNT] {
        &self.segments
    }

    /// Estimate the whole-body centre of mass
    ///
    /// Every joint referenced by the table must be present; the first
    /// missing one is returned as [`crate::PoseError::MissingJoint`].
    pub fn estimate(&self, frame: &BodyFrame) -> PoseResult<Point3> {
        let plane = frame.joint(self.reference)?;

        let mut moments = Point3::ZERO;
        for segment in &self.segments {
            let proximal = frame.joint(segment.proximal)?;
            let distal = frame.joint(segment.distal)?;

            let relative = segment.center(proximal, distal) - plane;
            moments = moments + relative * segment.mass_fraction;
        }

        Ok(moments + plane)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PoseError;

    fn uniform_frame(p: Point3) -> BodyFrame {
        let mut frame = BodyFrame::new();
        for joint in JointType::ALL {
            frame.set_joint(joint, p);
        }
        frame
    }

    #[test]
    fn collapsed_body_sits_on_its_point() {
        let p = Point3::new(0.3, 0.9, 2.1);
        let com = SegmentModel::default().estimate(&uniform_frame(p)).unwrap();

        assert!((com - p).magnitude() < 1e-5);
    }

    #[test]
    fn head_uses_reported_position() {
        let frame = uniform_frame(Point3::ZERO).with_joint(JointType::Head, Point3::new(0.0, 1.0, 0.0));
        let com = SegmentModel::default().estimate(&frame).unwrap();

        assert!((com.y - MASS_HEAD).abs() < 1e-6);
        assert_eq!(com.x, 0.0);
    }

    #[test]
    fn trunk_centre_sits_below_spine_shoulder() {
        let frame = uniform_frame(Point3::ZERO)
            .with_joint(JointType::SpineShoulder, Point3::new(0.0, 0.5, 0.0));
        let com = SegmentModel::default().estimate(&frame).unwrap();

        let expected = (0.5 - COG_TRUNK * 0.5) * MASS_TRUNK;
        assert!((com.y - expected).abs() < 1e-6);
    }

    #[test]
    fn estimate_follows_translation() {
        let frame = uniform_frame(Point3::ZERO)
            .with_joint(JointType::Head, Point3::new(0.0, 0.7, 0.0))
            .with_joint(JointType::SpineShoulder, Point3::new(0.0, 0.5, 0.1));
        let offset = Point3::new(0.25, -0.1, 1.5);

        let model = SegmentModel::default();
        let before = model.estimate(&frame).unwrap();
        let after = model.estimate(&frame.translated(offset)).unwrap();

        assert!(((after - before) - offset).magnitude() < 1e-5);
    }

    #[test]
    fn missing_joint_aborts_estimate() {
        let mut frame = uniform_frame(Point3::ZERO);
        frame.clear_joint(JointType::KneeRight);

        assert_eq!(
            SegmentModel::default().estimate(&frame),
            Err(PoseError::MissingJoint { joint: JointType::KneeRight })
        );
    }
}
