//! Balance Test Session
//!
//! ## Overview
//!
//! [`BalanceTest`] owns everything one trial needs (calibration window,
//! tracker, debouncers, clock) and walks through the trial phases:
//!
//! ```text
//!         start_calibration        finish_calibration       start_test
//!  Idle ─────────────────► Calibrating ──────────────► Ready ──────────► Testing
//!   ▲                          │ stop                    ▲                 │
//!   └──────────────────────────┘                         │   identified,   │
//!                                                        │   time up, stop │
//!                                              start_test│                 ▼
//!                                                        └──────────── Finished
//! ```
//!
//! Starting a new calibration from any phase but `Testing` drops the
//! current baseline.
//!
//! ## Frame Processing
//!
//! [`BalanceTest::process_frame`] is called once per sensor frame and runs
//! to completion without blocking. It returns a [`FrameReport`] with plain
//! data; turning that into display text is left to the caller.
//!
//! ## Usage Example
//!
//! ```rust
//! use bess_core::config::SessionConfig;
//! use bess_core::session::{BalanceTest, TestPhase};
//! use bess_core::time::FixedTime;
//!
//! let config = SessionConfig::default().with_calibration_frames(10);
//! let mut test = BalanceTest::new(config, FixedTime::new(0))?;
//!
//! test.start_calibration()?;
//! assert_eq!(test.phase(), TestPhase::Calibrating);
//! # Ok::<(), bess_core::PoseError>(())
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    calibration::{Baseline, CalibrationProgress, CalibrationSession},
    center_of_mass::SegmentModel,
    config::SessionConfig,
    constants::MAX_FRAMES_REFERENCE,
    errors::{PoseError, PoseResult},
    events::{FrameEvents, SessionEvent},
    geometry::Point3,
    skeleton::BodyFrame,
    time::{elapsed_ms, TimeSource, Timestamp},
    tracking::{
        BodyPart, Deviations, DoubleStanceValidator, ErrorDebouncer, EyesOpenMonitor,
        FailureMask, Tracker, TrackingState,
    },
};

/// Where a trial stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TestPhase {
    /// No baseline
    #[default]
    Idle,
    /// Recording the reference pose
    Calibrating,
    /// Baseline available, trial not running
    Ready,
    /// Trial running
    Testing,
    /// Trial over; baseline kept for a retest
    Finished,
}

/// Everything the engine knows after one frame
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct FrameReport {
    /// Tracking state after this frame
    pub state: TrackingState,
    /// Checks that failed on this frame
    pub mask: FailureMask,
    /// Per-part distance from the baseline
    pub deviations: Deviations,
    /// Counted errors so far, pose and eyes combined
    pub error_count: u32,
    /// Notifications raised by this frame
    pub events: FrameEvents,
    /// Time since the trial started
    pub elapsed_ms: u64,
    /// Identification progress, 0 to 100
    pub progress: u8,
    /// True on the frame that ended the trial
    pub finished: bool,
    /// Eyes signal supplied with the frame
    pub eyes_open: Option<bool>,
    /// Whole-body centre of mass, when enabled and computable
    pub center_of_mass: Option<Point3>,
}

impl FrameReport {
    /// True when this frame counted an eyes-open error
    pub fn eyes_error(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, SessionEvent::EyesOpenError { .. }))
    }
}

/// Totals for a trial, for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TestSummary {
    /// Errors counted from pose failures
    pub pose_errors: u32,
    /// Errors counted from open eyes
    pub eyes_errors: u32,
    /// Counted pose errors each part took part in, indexed by [`BodyPart::index`]
    pub part_errors: [u32; 5],
    /// Frames processed during the trial
    pub frames: u32,
    /// Trial duration so far
    pub elapsed_ms: u64,
    /// True when the pose was confirmed before time ran out
    pub identified: bool,
}

impl TestSummary {
    /// Pose and eyes errors combined
    pub fn total_errors(&self) -> u32 {
        self.pose_errors + self.eyes_errors
    }

    /// Counted pose errors involving `part`
    pub fn part_errors(&self, part: BodyPart) -> u32 {
        self.part_errors[part.index()]
    }
}

/// One subject, one pose, one trial at a time
#[derive(Debug)]
pub struct BalanceTest<T> {
    config: SessionConfig,
    clock: T,
    phase: TestPhase,

    calibration: CalibrationSession<MAX_FRAMES_REFERENCE>,
    tracker: Tracker<DoubleStanceValidator>,
    debouncer: ErrorDebouncer,
    eyes: EyesOpenMonitor,
    com_model: Option<SegmentModel>,

    started_at: Timestamp,
    summary: TestSummary,
}

impl<T: TimeSource> BalanceTest<T> {
    /// New session in `Idle`
    ///
    /// Fails with [`PoseError::InvalidConfig`] if `config` does not validate.
    pub fn new(config: SessionConfig, clock: T) -> PoseResult<Self> {
        config.validate()?;

        Ok(Self {
            calibration: CalibrationSession::with_target(config.calibration_frames)?,
            tracker: Tracker::new(
                DoubleStanceValidator::from_config(&config),
                config.identification_frames,
            ),
            debouncer: ErrorDebouncer::from_config(&config),
            eyes: EyesOpenMonitor::new(config.error_frame_threshold),
            com_model: None,
            started_at: 0,
            summary: TestSummary::default(),
            phase: TestPhase::Idle,
            config,
            clock,
        })
    }

    /// Also estimate the centre of mass on every frame
    pub fn with_center_of_mass(mut self, model: SegmentModel) -> Self {
        self.com_model = Some(model);
        self
    }

    /// Begin recording the reference pose
    ///
    /// Drops any existing baseline. Not allowed while a trial runs.
    pub fn start_calibration(&mut self) -> PoseResult<()> {
        if self.phase == TestPhase::Testing {
            return Err(PoseError::PhaseViolation {
                reason: "cannot calibrate during a trial",
            });
        }

        self.tracker.validator_mut().clear_baseline();
        self.tracker.reset();
        self.calibration.start();
        self.phase = TestPhase::Calibrating;
        Ok(())
    }

    /// Record one calibration frame
    ///
    /// Frames missing a tracked joint are rejected with the joint's error
    /// and nothing is stored.
    pub fn record_calibration_frame(&mut self, frame: &BodyFrame) -> PoseResult<CalibrationProgress> {
        if self.phase != TestPhase::Calibrating {
            return Err(PoseError::PhaseViolation {
                reason: "calibration frame outside calibration",
            });
        }
        self.calibration.record(frame)
    }

    /// Calibration progress
    pub fn calibration_progress(&self) -> CalibrationProgress {
        self.calibration.progress()
    }

    /// Average the recorded frames into the baseline
    ///
    /// May be called before the window is full; the baseline then averages
    /// the frames recorded so far. On failure the session returns to `Idle`
    /// without a baseline.
    pub fn finish_calibration(&mut self) -> PoseResult<Baseline> {
        if self.phase != TestPhase::Calibrating {
            return Err(PoseError::PhaseViolation {
                reason: "calibration was not started",
            });
        }

        match self.calibration.finish() {
            Ok(baseline) => {
                self.tracker.validator_mut().set_baseline(baseline);
                self.phase = TestPhase::Ready;
                Ok(baseline)
            }
            Err(e) => {
                self.phase = TestPhase::Idle;
                Err(e)
            }
        }
    }

    /// Start the trial clock and clear all counters
    ///
    /// Fails with [`PoseError::BaselineMissing`] before any calibration has
    /// finished, and with [`PoseError::PhaseViolation`] while calibrating or
    /// testing.
    pub fn start_test(&mut self) -> PoseResult<()> {
        match self.phase {
            TestPhase::Ready | TestPhase::Finished => {}
            TestPhase::Idle => return Err(PoseError::BaselineMissing),
            TestPhase::Calibrating | TestPhase::Testing => {
                return Err(PoseError::PhaseViolation {
                    reason: "trial cannot start while calibrating or testing",
                })
            }
        }
        if self.tracker.validator().baseline().is_none() {
            return Err(PoseError::BaselineMissing);
        }

        self.tracker.reset();
        self.debouncer.reset();
        self.eyes.reset();
        self.summary = TestSummary::default();
        self.started_at = self.clock.now();
        self.phase = TestPhase::Testing;

        log_info!("Trial started, {} s", self.config.test_duration_s);
        Ok(())
    }

    /// Process one live frame
    ///
    /// `eyes_open` is the eyes signal for this frame when the host has one;
    /// `None` skips the eyes check.
    pub fn process_frame(&mut self, frame: &BodyFrame, eyes_open: Option<bool>) -> PoseResult<FrameReport> {
        if self.phase != TestPhase::Testing {
            return Err(PoseError::PhaseViolation {
                reason: "frame processed outside a trial",
            });
        }

        let mut events = FrameEvents::new();

        if let Some(event) = self.tracker.update(frame) {
            let _ = events.push(event.into());
        }
        let state = self.tracker.state();
        let validation = *self.tracker.last_validation();

        if self.debouncer.update(validation.mask) {
            self.summary.pose_errors += 1;
            for part in validation.mask.iter() {
                self.summary.part_errors[part.index()] += 1;
            }
            let _ = events.push(SessionEvent::BalanceError {
                mask: validation.mask,
                total: self.summary.total_errors(),
            });
        }

        if let Some(open) = eyes_open {
            if self.eyes.update(open) {
                self.summary.eyes_errors += 1;
                let _ = events.push(SessionEvent::EyesOpenError {
                    total: self.summary.total_errors(),
                });
            }
        }

        let elapsed = elapsed_ms(self.started_at, self.clock.now());
        self.summary.frames += 1;
        self.summary.elapsed_ms = elapsed;

        let identified = state == TrackingState::Identified;
        let finished = identified || elapsed >= self.config.test_duration_ms();
        if finished {
            self.summary.identified = identified;
            self.phase = TestPhase::Finished;
            let _ = events.push(SessionEvent::TestFinished { identified });
            log_info!(
                "Trial finished after {} ms: {} errors, identified: {}",
                elapsed,
                self.summary.total_errors(),
                identified
            );
        }

        let center_of_mass = self
            .com_model
            .as_ref()
            .and_then(|model| model.estimate(frame).ok());

        Ok(FrameReport {
            state,
            mask: validation.mask,
            deviations: validation.deviations,
            error_count: self.summary.total_errors(),
            events,
            elapsed_ms: elapsed,
            progress: self.tracker.progress(),
            finished,
            eyes_open,
            center_of_mass,
        })
    }

    /// Abort calibration or end the trial early
    ///
    /// Stopping during calibration discards the recorded frames and returns
    /// to `Idle`. To end calibration early and keep what was recorded, call
    /// [`finish_calibration`](Self::finish_calibration) instead: it averages
    /// whatever the window holds.
    pub fn stop(&mut self) {
        match self.phase {
            TestPhase::Calibrating => {
                self.calibration.abort();
                self.phase = TestPhase::Idle;
            }
            TestPhase::Testing => {
                self.summary.elapsed_ms = elapsed_ms(self.started_at, self.clock.now());
                self.phase = TestPhase::Finished;
                log_info!("Trial stopped after {} ms", self.summary.elapsed_ms);
            }
            _ => {}
        }
    }

    /// Current phase
    pub fn phase(&self) -> TestPhase {
        self.phase
    }

    /// Active configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Current baseline, if calibrated
    pub fn baseline(&self) -> Option<&Baseline> {
        self.tracker.validator().baseline()
    }

    /// Errors counted in the current or last trial
    pub fn error_count(&self) -> u32 {
        self.summary.total_errors()
    }

    /// Totals of the current or last trial
    pub fn summary(&self) -> TestSummary {
        self.summary
    }

    /// The session clock
    pub fn clock(&self) -> &T {
        &self.clock
    }

    /// The session clock, mutably (to drive a [`crate::time::FixedTime`])
    pub fn clock_mut(&mut self) -> &mut T {
        &mut self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{skeleton::JointType, time::FixedTime};

    fn stance() -> BodyFrame {
        BodyFrame::new()
            .with_joint(JointType::FootLeft, Point3::new(0.0, 0.0, 2.0))
            .with_joint(JointType::FootRight, Point3::new(0.2, 0.0, 2.0))
            .with_joint(JointType::HandLeft, Point3::new(0.3, 0.9, 2.0))
            .with_joint(JointType::HandRight, Point3::new(-0.3, 0.9, 2.0))
            .with_joint(JointType::Head, Point3::new(0.1, 1.7, 2.0))
            .with_joint(JointType::SpineMid, Point3::new(0.12, 1.3, 2.05))
            .with_joint(JointType::SpineBase, Point3::new(0.1, 1.0, 2.05))
    }

    fn ready_test(config: SessionConfig) -> BalanceTest<FixedTime> {
        let mut test = BalanceTest::new(config, FixedTime::new(0)).unwrap();
        test.start_calibration().unwrap();
        for _ in 0..config.calibration_frames {
            test.record_calibration_frame(&stance()).unwrap();
        }
        test.finish_calibration().unwrap();
        test
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = SessionConfig::default().with_test_duration_s(0);
        assert!(matches!(
            BalanceTest::new(config, FixedTime::new(0)),
            Err(PoseError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn phases_are_enforced() {
        let mut test = BalanceTest::new(SessionConfig::default(), FixedTime::new(0)).unwrap();

        assert_eq!(test.start_test(), Err(PoseError::BaselineMissing));
        assert!(test.process_frame(&stance(), None).is_err());
        assert!(test.record_calibration_frame(&stance()).is_err());
        assert!(test.finish_calibration().is_err());
    }

    #[test]
    fn empty_calibration_returns_to_idle() {
        let mut test = BalanceTest::new(SessionConfig::default(), FixedTime::new(0)).unwrap();
        test.start_calibration().unwrap();

        assert_eq!(test.finish_calibration(), Err(PoseError::CalibrationEmpty));
        assert_eq!(test.phase(), TestPhase::Idle);
        assert!(test.baseline().is_none());
        assert_eq!(test.start_test(), Err(PoseError::BaselineMissing));
    }

    #[test]
    fn recalibration_drops_baseline() {
        let mut test = ready_test(SessionConfig::default().with_calibration_frames(5));
        assert!(test.baseline().is_some());

        test.start_calibration().unwrap();
        assert!(test.baseline().is_none());

        test.stop();
        assert_eq!(test.phase(), TestPhase::Idle);
    }

    #[test]
    fn early_finish_keeps_frames_but_stop_discards_them() {
        let mut test = BalanceTest::new(SessionConfig::default(), FixedTime::new(0)).unwrap();

        test.start_calibration().unwrap();
        for _ in 0..40 {
            test.record_calibration_frame(&stance()).unwrap();
        }
        assert!(!test.calibration_progress().complete);
        let baseline = test.finish_calibration().unwrap();
        assert_eq!(baseline.frames, 40);
        assert_eq!(test.phase(), TestPhase::Ready);

        test.start_calibration().unwrap();
        for _ in 0..40 {
            test.record_calibration_frame(&stance()).unwrap();
        }
        test.stop();
        assert_eq!(test.phase(), TestPhase::Idle);
        assert_eq!(test.calibration_progress().recorded, 0);
        assert!(test.baseline().is_none());
    }

    #[test]
    fn holding_the_pose_finishes_identified() {
        let config = SessionConfig::default()
            .with_calibration_frames(5)
            .with_identification_frames(3);
        let mut test = ready_test(config);
        test.start_test().unwrap();

        let first = test.process_frame(&stance(), Some(false)).unwrap();
        assert_eq!(first.state, TrackingState::Ongoing);
        assert_eq!(first.events.as_slice(), &[SessionEvent::PoseOngoing]);

        test.process_frame(&stance(), Some(false)).unwrap();
        test.process_frame(&stance(), Some(false)).unwrap();
        let last = test.process_frame(&stance(), Some(false)).unwrap();

        assert_eq!(last.state, TrackingState::Identified);
        assert!(last.finished);
        assert_eq!(
            last.events.as_slice(),
            &[SessionEvent::PoseIdentified, SessionEvent::TestFinished { identified: true }]
        );
        assert_eq!(test.phase(), TestPhase::Finished);
        assert!(test.summary().identified);
    }

    #[test]
    fn time_limit_ends_the_trial() {
        let config = SessionConfig::default()
            .with_calibration_frames(5)
            .with_test_duration_s(1);
        let mut test = ready_test(config);
        test.start_test().unwrap();

        test.clock_mut().advance(999);
        assert!(!test.process_frame(&stance(), None).unwrap().finished);

        test.clock_mut().advance(1);
        let report = test.process_frame(&stance(), None).unwrap();
        assert!(report.finished);
        assert_eq!(report.elapsed_ms, 1_000);
        assert!(!test.summary().identified);
        assert!(test.process_frame(&stance(), None).is_err());
    }

    #[test]
    fn sustained_foot_shift_counts_one_error() {
        let mut test = ready_test(SessionConfig::default().with_calibration_frames(5));
        test.start_test().unwrap();

        let shifted = stance().with_joint(JointType::FootLeft, Point3::new(0.1, 0.0, 2.0));
        let mut counted = 0;
        for _ in 0..40 {
            let report = test.process_frame(&shifted, None).unwrap();
            assert_eq!(report.mask, FailureMask::LEFT_FOOT);
            counted += report.events.iter().filter(|e| e.is_error()).count();
        }

        assert_eq!(counted, 1);
        assert_eq!(test.error_count(), 1);
        assert_eq!(test.summary().part_errors(BodyPart::LeftFoot), 1);
    }

    #[test]
    fn open_eyes_count_separately() {
        let mut test = ready_test(SessionConfig::default().with_calibration_frames(5));
        test.start_test().unwrap();

        let mut flagged = 0;
        for _ in 0..16 {
            if test.process_frame(&stance(), Some(true)).unwrap().eyes_error() {
                flagged += 1;
            }
        }

        assert_eq!(flagged, 1);
        assert_eq!(test.summary().eyes_errors, 1);
        assert_eq!(test.summary().pose_errors, 0);
        assert_eq!(test.error_count(), 1);
    }

    #[test]
    fn retest_clears_counters() {
        let mut test = ready_test(SessionConfig::default().with_calibration_frames(5));
        test.start_test().unwrap();
        for _ in 0..16 {
            test.process_frame(&stance(), Some(true)).unwrap();
        }
        test.stop();
        assert_eq!(test.phase(), TestPhase::Finished);

        test.start_test().unwrap();
        assert_eq!(test.error_count(), 0);
    }

    #[test]
    fn center_of_mass_is_optional() {
        let mut test = ready_test(SessionConfig::default().with_calibration_frames(5))
            .with_center_of_mass(SegmentModel::default());
        test.start_test().unwrap();

        // The stance frame lacks the limb joints the segment model needs
        let report = test.process_frame(&stance(), None).unwrap();
        assert_eq!(report.center_of_mass, None);
        assert_eq!(report.state, TrackingState::Ongoing);
    }
}
