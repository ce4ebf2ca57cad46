//! End-of-trial report

use bess_core::{session::TestSummary, tracking::BodyPart};
use serde::{Deserialize, Serialize};

use crate::error::ReportResult;

/// Counted pose errors each body part took part in
///
/// One error can involve several parts, so these may sum to more than
/// [`TestReport::pose_errors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartErrors {
    /// Left foot
    pub left_foot: u32,
    /// Right foot
    pub right_foot: u32,
    /// Left hand
    pub left_hand: u32,
    /// Right hand
    pub right_hand: u32,
    /// Trunk angle
    pub trunk: u32,
}

/// Serializable outcome of one trial
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    /// Errors from pose failures
    pub pose_errors: u32,
    /// Errors from open eyes
    pub eyes_errors: u32,
    /// Both combined, the BESS score for this stance
    pub total_errors: u32,
    /// Per-part breakdown of the pose errors
    pub part_errors: PartErrors,
    /// Frames processed
    pub frames: u32,
    /// Trial length, milliseconds
    pub duration_ms: u64,
    /// Pose confirmed before time ran out
    pub completed: bool,
}

impl TestReport {
    /// Build from the engine's running totals
    pub fn from_summary(summary: &TestSummary) -> Self {
        Self {
            pose_errors: summary.pose_errors,
            eyes_errors: summary.eyes_errors,
            total_errors: summary.total_errors(),
            part_errors: PartErrors {
                left_foot: summary.part_errors(BodyPart::LeftFoot),
                right_foot: summary.part_errors(BodyPart::RightFoot),
                left_hand: summary.part_errors(BodyPart::LeftHand),
                right_hand: summary.part_errors(BodyPart::RightHand),
                trunk: summary.part_errors(BodyPart::Trunk),
            },
            frames: summary.frames,
            duration_ms: summary.elapsed_ms,
            completed: summary.identified,
        }
    }

    /// Mean frame rate over the trial; zero before any time has passed
    pub fn frame_rate_hz(&self) -> f32 {
        if self.duration_ms == 0 {
            return 0.0;
        }
        self.frames as f32 * 1000.0 / self.duration_ms as f32
    }

    /// Compact JSON
    pub fn to_json(&self) -> ReportResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Indented JSON, for files meant to be read
    pub fn to_json_pretty(&self) -> ReportResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read a report written by [`to_json`](Self::to_json)
    pub fn from_json(json: &str) -> ReportResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<&TestSummary> for TestReport {
    fn from(summary: &TestSummary) -> Self {
        Self::from_summary(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> TestSummary {
        TestSummary {
            pose_errors: 3,
            eyes_errors: 1,
            part_errors: [2, 0, 1, 1, 0],
            frames: 600,
            elapsed_ms: 20_000,
            identified: false,
        }
    }

    #[test]
    fn test_totals_split_by_cause() {
        let report = TestReport::from_summary(&summary());
        assert_eq!(report.total_errors, 4);
        assert_eq!(report.pose_errors, 3);
        assert_eq!(report.eyes_errors, 1);
        assert_eq!(report.part_errors.left_foot, 2);
        assert_eq!(report.part_errors.left_hand, 1);
        assert_eq!(report.part_errors.right_hand, 1);
        assert_eq!(report.part_errors.trunk, 0);
        assert!(!report.completed);
        assert_eq!(report.frame_rate_hz(), 30.0);
    }

    #[test]
    fn test_json_fields() {
        let json = TestReport::from_summary(&summary()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_errors"], 4);
        assert_eq!(value["part_errors"]["left_foot"], 2);
        assert_eq!(value["duration_ms"], 20_000);
        assert_eq!(value["completed"], false);
    }

    #[test]
    fn test_reads_back() {
        let report = TestReport::from(&summary());
        let pretty = report.to_json_pretty().unwrap();
        assert_eq!(TestReport::from_json(&pretty).unwrap(), report);
    }

    #[test]
    fn test_empty_trial() {
        let report = TestReport::from_summary(&TestSummary::default());
        assert_eq!(report.total_errors, 0);
        assert_eq!(report.frame_rate_hz(), 0.0);
    }
}
