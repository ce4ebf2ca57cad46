//! Force-Plate Constants
//!
//! Geometry and smoothing parameters for a four-cell balance board
//! (Wii Balance Board form factor).

/// Distance between left and right load cells (cm).
pub const PLATE_LENGTH_CM: f32 = 43.3;

/// Distance between front and back load cells (cm).
pub const PLATE_WIDTH_CM: f32 = 22.8;

/// Moving-average window for raw load-cell channels.
///
/// At the 50 ms polling tick this smooths over half a second.
pub const PLATE_FILTER_WINDOW: usize = 10;

/// Moving-average window for the centre-of-pressure coordinates.
pub const PLATE_COP_FILTER_WINDOW: usize = 20;

/// Samples averaged while the board is unloaded to find the zero offset.
pub const ZERO_CALIBRATION_SAMPLES: u32 = 120;

/// Nominal polling interval of the board (ms).
pub const PLATE_POLL_INTERVAL_MS: u64 = 50;
