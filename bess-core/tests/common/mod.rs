//! Common test utilities for integration tests
//!
//! This module provides:
//! - A canonical double-stance body with all 25 joints populated
//! - Perturbation helpers (shift a limb, tilt the trunk, drop a joint)
//! - Small deterministic jitter for calibration windows
//! - Ready-made sessions at each trial phase

#![allow(dead_code)]

pub mod generators;
pub mod scenarios;

use bess_core::{
    calibration::Baseline,
    geometry::Point3,
    skeleton::{BodyFrame, JointType},
    tracking::FailureMask,
};

/// Assert two points agree to within `eps` on every axis
pub fn assert_point_near(actual: Point3, expected: Point3, eps: f32) {
    assert!(
        (actual.x - expected.x).abs() <= eps
            && (actual.y - expected.y).abs() <= eps
            && (actual.z - expected.z).abs() <= eps,
        "expected {:?} within {} of {:?}",
        actual,
        eps,
        expected
    );
}

/// Assert the baseline matches the joints of `frame`
pub fn assert_baseline_matches(baseline: &Baseline, frame: &BodyFrame, eps: f32) {
    for joint in bess_core::calibration::TRACKED_JOINTS {
        let expected = frame.joint(joint).expect("frame has every tracked joint");
        let actual = baseline.position(joint).expect("tracked joint has a baseline");
        assert_point_near(actual, expected, eps);
    }
}

/// Count frames whose mask contains `part`
pub fn count_with(masks: &[FailureMask], part: FailureMask) -> usize {
    masks.iter().filter(|m| m.contains(part)).count()
}

/// Joints of the lower body, used to check CoM sensitivity
pub const LOWER_BODY: [JointType; 8] = [
    JointType::HipLeft,
    JointType::KneeLeft,
    JointType::AnkleLeft,
    JointType::FootLeft,
    JointType::HipRight,
    JointType::KneeRight,
    JointType::AnkleRight,
    JointType::FootRight,
];
