//! Pose calibration and deviation tracking for the Balance Error Scoring System
//!
//! Compares a live stream of skeleton frames against a calibrated reference
//! pose and counts balance errors while a timed trial runs.
//!
//! Key constraints:
//! - One call per sensor frame (~30 Hz), no blocking, no allocation
//! - Bounded work per frame: O(segments) or O(filter window)
//! - Every failure is local; a bad frame never aborts a trial
//!
//! ```no_run
//! use bess_core::{BalanceTest, SessionConfig, skeleton::BodyFrame, time::MonotonicTime};
//!
//! # fn next_frame() -> BodyFrame { BodyFrame::new() }
//! let mut test = BalanceTest::new(SessionConfig::default(), MonotonicTime::new())?;
//!
//! test.start_calibration()?;
//! for _ in 0..150 {
//!     let _ = test.record_calibration_frame(&next_frame());
//! }
//! test.finish_calibration()?;
//!
//! test.start_test()?;
//! loop {
//!     let report = test.process_frame(&next_frame(), Some(false))?;
//!     if report.finished {
//!         break;
//!     }
//! }
//! # Ok::<(), bess_core::PoseError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[macro_use]
mod macros;

pub mod calibration;
pub mod center_of_mass;
pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod filters;
pub mod force_plate;
pub mod geometry;
pub mod session;
pub mod skeleton;
pub mod time;
pub mod tracking;

// Public API
pub use calibration::{Baseline, CalibrationSession};
pub use config::SessionConfig;
pub use errors::{PoseError, PoseResult};
pub use events::{PoseEvent, SessionEvent};
pub use geometry::Point3;
pub use session::{BalanceTest, FrameReport, TestPhase, TestSummary};
pub use skeleton::{BodyFrame, JointType};
pub use tracking::{DoubleStanceValidator, FailureMask, Tracker, TrackingState};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
