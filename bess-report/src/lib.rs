//! Presentation and reporting for bess-core trials
//!
//! Everything here runs on the host side of the engine: turning per-frame
//! results into operator-facing text, building the end-of-trial report and
//! loading session configuration from JSON.
//!
//! ```
//! use bess_report::{load_config, TestReport};
//! use bess_core::TestSummary;
//!
//! let config = load_config(r#"{ "test_duration_s": 20 }"#)?;
//! assert_eq!(config.test_duration_s, 20);
//!
//! let report = TestReport::from_summary(&TestSummary::default());
//! let json = report.to_json()?;
//! assert!(json.contains("\"total_errors\":0"));
//! # Ok::<(), bess_report::ReportError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod report;
pub mod status;

pub use config::{load_config, to_json as config_to_json};
pub use error::ReportError;
pub use report::{PartErrors, TestReport};
pub use status::{eyes_text, limb_lines, status_text};
