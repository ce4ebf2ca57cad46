//! Sessions prepared up to a given phase

use bess_core::{
    config::SessionConfig,
    session::BalanceTest,
    skeleton::BodyFrame,
    time::FixedTime,
};

use super::generators::double_stance;

/// Frame interval used when replaying a trial
pub const FRAME_MS: u64 = 33;

/// Session calibrated on `frame` and ready to start
pub fn calibrated_on(frame: &BodyFrame, config: SessionConfig) -> BalanceTest<FixedTime> {
    let mut test = BalanceTest::new(config, FixedTime::new(10_000)).expect("valid config");
    test.start_calibration().expect("idle session calibrates");
    for _ in 0..config.calibration_frames {
        test.record_calibration_frame(frame).expect("complete frame");
    }
    test.finish_calibration().expect("non-degenerate calibration");
    test
}

/// Session calibrated on the canonical body with the trial already running
pub fn running(config: SessionConfig) -> BalanceTest<FixedTime> {
    let mut test = calibrated_on(&double_stance(), config);
    test.start_test().expect("calibrated session starts");
    test
}
