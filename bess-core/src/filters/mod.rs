//! Signal Smoothing Filters
//!
//! ## Overview
//!
//! Two filters are provided, one for each way signals are consumed:
//!
//! - [`MovingAverage`]: streaming, fixed-window mean used on every force-plate
//!   poll. Constant memory, no allocation, O(N) per sample.
//! - [`butterworth`]: offline, zero-lag second-order low-pass for smoothing a
//!   recorded series after a trial. Needs the `alloc` feature.
//!
//! ## Choosing a Window
//!
//! The moving average delays the signal by roughly half its window. At the
//! board's 50 ms polling tick a window of 10 lags by ~250 ms, which is fine
//! for display and for the zero-load calibration but too slow for detecting
//! sway onsets. Use the Butterworth filter on the recorded series for that.
//!
//! ```rust
//! use bess_core::filters::MovingAverage;
//!
//! let mut filter: MovingAverage<2> = MovingAverage::new();
//! filter.push(0.0);
//! assert_eq!(filter.push(10.0), 5.0);
//! ```

mod moving_average;

#[cfg(feature = "alloc")]
mod butterworth;

pub use moving_average::MovingAverage;

#[cfg(feature = "alloc")]
pub use butterworth::butterworth;
