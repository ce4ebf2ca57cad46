//! Double Stance Trial Example
//!
//! Runs a complete simulated balance trial: calibration, a few seconds of
//! steady stance, one foot slipping out of place, recovery, and eyes
//! opening briefly near the end.
//!
//! ## What You'll Learn
//!
//! - Configuring and creating a `BalanceTest`
//! - Recording calibration frames and reading the baseline
//! - Feeding live frames and reacting to `SessionEvent`s
//! - Reading per-part deviations from a `FrameReport`
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example 01_double_stance
//! ```

use bess_core::{
    config::SessionConfig,
    events::SessionEvent,
    geometry::Point3,
    session::BalanceTest,
    skeleton::{BodyFrame, JointType},
    time::FixedTime,
    tracking::BodyPart,
    PoseError,
};

const FRAME_MS: u64 = 33;

fn stance() -> BodyFrame {
    BodyFrame::new()
        .with_joint(JointType::FootLeft, Point3::new(0.05, 0.03, 1.92))
        .with_joint(JointType::FootRight, Point3::new(0.15, 0.03, 1.92))
        .with_joint(JointType::HandLeft, Point3::new(-0.06, 1.00, 2.00))
        .with_joint(JointType::HandRight, Point3::new(0.26, 1.00, 2.00))
        .with_joint(JointType::Head, Point3::new(0.10, 1.70, 2.00))
        .with_joint(JointType::SpineMid, Point3::new(0.12, 1.30, 2.05))
        .with_joint(JointType::SpineBase, Point3::new(0.10, 1.00, 2.05))
}

fn main() -> Result<(), PoseError> {
    println!("BESS Double Stance Example");
    println!("==========================\n");

    let config = SessionConfig::default()
        .with_calibration_frames(90)
        .with_test_duration_s(10);
    let mut test = BalanceTest::new(config, FixedTime::new(0))?;

    // Calibration: the subject holds the pose for 3 seconds
    test.start_calibration()?;
    let frame = stance();
    for _ in 0..config.calibration_frames {
        test.record_calibration_frame(&frame)?;
    }
    let baseline = test.finish_calibration()?;

    println!("Baseline from {} frames:", baseline.frames);
    println!("  left foot  {:?}", baseline.foot_left);
    println!("  right foot {:?}", baseline.foot_right);
    println!("  trunk angle {:.2}°\n", baseline.trunk_angle_deg);

    // Trial
    test.start_test()?;
    let slipped = stance().with_joint(JointType::FootLeft, Point3::new(-0.05, 0.03, 1.92));

    let mut n = 0u32;
    loop {
        n += 1;
        let live = match n {
            60..=90 => &slipped,
            _ => &frame,
        };
        let eyes_open = (200..=220).contains(&n);

        test.clock_mut().advance(FRAME_MS);
        let report = test.process_frame(live, Some(eyes_open))?;

        for event in &report.events {
            match event {
                SessionEvent::PoseOngoing => println!("[{:5} ms] pose entered", report.elapsed_ms),
                SessionEvent::PoseIdentified => println!("[{:5} ms] pose confirmed", report.elapsed_ms),
                SessionEvent::BalanceError { mask, total } => {
                    println!("[{:5} ms] balance error #{} (mask {})", report.elapsed_ms, total, mask);
                    for part in mask.iter() {
                        if let Some(d) = report.deviations.limb(part) {
                            println!("           {:<10} dx={:+.3} dy={:+.3} dz={:+.3}", part.name(), d.x, d.y, d.z);
                        }
                    }
                }
                SessionEvent::EyesOpenError { total } => {
                    println!("[{:5} ms] eyes open, error #{}", report.elapsed_ms, total)
                }
                SessionEvent::TestFinished { identified } => {
                    println!("[{:5} ms] trial over (identified: {})", report.elapsed_ms, identified)
                }
            }
        }

        if report.finished {
            break;
        }
    }

    let summary = test.summary();
    println!("\nSummary");
    println!("  frames      {}", summary.frames);
    println!("  pose errors {}", summary.pose_errors);
    println!("  eyes errors {}", summary.eyes_errors);
    for part in BodyPart::ALL {
        println!("  {:<11} {}", part.name(), summary.part_errors(part));
    }

    Ok(())
}
