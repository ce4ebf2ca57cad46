//! Force-Plate Signal Processing
//!
//! ## Overview
//!
//! A four-cell balance board reports the load on each corner plus the total,
//! in kilograms, on a ~50 ms poll. [`PlateProcessor`] turns each raw
//! [`PlateSample`] into a [`PlateReading`]:
//!
//! ```text
//! raw corners ──► moving average (10) ──► smoothed corners ──► CoP ──► moving average (20)
//!      │
//!      └──► negative floor ──► centre offset ──► loaded gate ──► offset corners
//! raw total ──► moving average (10) ──► minus zero load ──► zeroed total
//! ```
//!
//! ## Centre of Pressure
//!
//! With board length `L` (left/right) and width `W` (front/back):
//!
//! ```text
//! CoPx = (L/2) · ((TR + BR) − (TL + BL)) / Σ
//! CoPy = (W/2) · ((TL + TR) − (BL + BR)) / Σ
//! ```
//!
//! An unloaded board (Σ = 0) reports the centre, (0, 0).
//!
//! ## Corrections
//!
//! - **Zero load**: the board is read unloaded for a fixed number of samples
//!   and the mean total is subtracted from later totals.
//! - **Negative floor**: cells can drift below zero. The lowest corner value
//!   ever seen becomes a floor subtracted from every corner.
//! - **Centre offset**: on request, per-corner offsets are captured so the
//!   current load reads as evenly spread. They are applied only while the
//!   board is loaded, so an empty board reads zero everywhere.
//! - **Negative total**: stepping off or jumping produces negative spikes;
//!   these read as zero.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    constants::plate::*,
    errors::{PoseError, PoseResult},
    filters::MovingAverage,
};

/// Raw board reading, kilograms
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlateSample {
    /// Front-left cell
    pub top_left: f32,
    /// Front-right cell
    pub top_right: f32,
    /// Back-left cell
    pub bottom_left: f32,
    /// Back-right cell
    pub bottom_right: f32,
    /// Total load as reported by the board
    pub total: f32,
}

impl PlateSample {
    /// Sample with the total set to the sum of the corners
    pub fn from_corners(top_left: f32, top_right: f32, bottom_left: f32, bottom_right: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
            total: top_left + top_right + bottom_left + bottom_right,
        }
    }

    /// Sum of the four corners
    pub fn corner_sum(&self) -> f32 {
        self.top_left + self.top_right + self.bottom_left + self.bottom_right
    }

    fn is_finite(&self) -> bool {
        self.corners().iter().all(|c| c.is_finite()) && self.total.is_finite()
    }

    fn corners(&self) -> [f32; 4] {
        [self.top_left, self.top_right, self.bottom_left, self.bottom_right]
    }

    fn with_corners(corners: [f32; 4], total: f32) -> Self {
        let [top_left, top_right, bottom_left, bottom_right] = corners;
        Self { top_left, top_right, bottom_left, bottom_right, total }
    }
}

/// Centre of pressure, centimetres from the board centre
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CenterOfPressure {
    /// Positive toward the right edge
    pub x_cm: f32,
    /// Positive toward the front edge
    pub y_cm: f32,
}

/// Zero-load calibration status
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ZeroCalibration {
    /// Never run; totals are not corrected
    #[default]
    NotDone,
    /// Collecting unloaded samples
    InProgress {
        /// Samples collected
        recorded: u32,
        /// Samples needed
        target: u32,
    },
    /// Finished
    Done {
        /// Mean unloaded total, kilograms
        zero_kg: f32,
    },
}

/// Processed board reading
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlateReading {
    /// Moving-average smoothed corners and total
    pub smoothed: PlateSample,
    /// Smoothed centre of pressure
    pub center_of_pressure: CenterOfPressure,
    /// Smoothed total minus the zero load
    pub zeroed_total: f32,
    /// Floor- and offset-corrected corners, zero while unloaded
    pub offset: PlateSample,
    /// Zero-load calibration status after this sample
    pub zero_calibration: ZeroCalibration,
}

/// Board geometry and calibration length
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlateConfig {
    /// Unloaded samples averaged by the zero-load calibration
    pub zero_samples: u32,
    /// Left-to-right board length, centimetres
    pub length_cm: f32,
    /// Front-to-back board width, centimetres
    pub width_cm: f32,
}

impl Default for PlateConfig {
    fn default() -> Self {
        Self {
            zero_samples: ZERO_CALIBRATION_SAMPLES,
            length_cm: PLATE_LENGTH_CM,
            width_cm: PLATE_WIDTH_CM,
        }
    }
}

impl PlateConfig {
    /// How long the board must stay unloaded for the zero-load calibration,
    /// at the nominal polling interval
    pub fn zero_calibration_ms(&self) -> u64 {
        self.zero_samples as u64 * PLATE_POLL_INTERVAL_MS
    }

    /// Check every value is in its legal range
    pub fn validate(&self) -> PoseResult<()> {
        if self.zero_samples == 0 {
            return Err(PoseError::InvalidConfig {
                reason: "zero_samples must be at least 1",
            });
        }
        if !(self.length_cm.is_finite() && self.length_cm > 0.0)
            || !(self.width_cm.is_finite() && self.width_cm > 0.0)
        {
            return Err(PoseError::InvalidConfig {
                reason: "board dimensions must be positive",
            });
        }
        Ok(())
    }
}

/// Streaming balance-board processor
#[derive(Debug, Clone)]
pub struct PlateProcessor {
    config: PlateConfig,

    corner_filters: [MovingAverage<PLATE_FILTER_WINDOW>; 4],
    total_filter: MovingAverage<PLATE_FILTER_WINDOW>,
    cop_x: MovingAverage<PLATE_COP_FILTER_WINDOW>,
    cop_y: MovingAverage<PLATE_COP_FILTER_WINDOW>,

    zero: ZeroCalibration,
    zero_sum: f64,

    negative_floor: f32,
    corner_offsets: [f32; 4],
    capture_offsets: bool,
}

impl Default for PlateProcessor {
    fn default() -> Self {
        Self {
            config: PlateConfig::default(),
            corner_filters: core::array::from_fn(|_| MovingAverage::new()),
            total_filter: MovingAverage::new(),
            cop_x: MovingAverage::new(),
            cop_y: MovingAverage::new(),
            zero: ZeroCalibration::NotDone,
            zero_sum: 0.0,
            negative_floor: 0.0,
            corner_offsets: [0.0; 4],
            capture_offsets: false,
        }
    }
}

impl PlateProcessor {
    /// Processor for a board described by `config`
    pub fn new(config: PlateConfig) -> PoseResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ..Self::default()
        })
    }

    /// Begin averaging the unloaded board
    ///
    /// Clears every filter so the calibration does not see loaded samples.
    pub fn start_zero_calibration(&mut self) {
        self.clear_filters();
        self.zero_sum = 0.0;
        self.zero = ZeroCalibration::InProgress {
            recorded: 0,
            target: self.config.zero_samples,
        };
        log_info!("Plate zero calibration started ({} samples)", self.config.zero_samples);
    }

    /// Capture centre offsets from the next sample
    pub fn request_center_offset(&mut self) {
        self.capture_offsets = true;
    }

    /// Zero-load calibration status
    pub fn zero_calibration(&self) -> ZeroCalibration {
        self.zero
    }

    /// Mean unloaded total, once calibrated
    pub fn zero_weight(&self) -> Option<f32> {
        match self.zero {
            ZeroCalibration::Done { zero_kg } => Some(zero_kg),
            _ => None,
        }
    }

    /// Lowest corner value seen so far (never above zero)
    pub fn negative_floor(&self) -> f32 {
        self.negative_floor
    }

    /// Process one raw sample
    ///
    /// Fails with [`PoseError::InvalidValue`] on NaN or infinite input; the
    /// processor state is left untouched.
    pub fn process(&mut self, sample: PlateSample) -> PoseResult<PlateReading> {
        if !sample.is_finite() {
            return Err(PoseError::InvalidValue);
        }

        self.accumulate_zero(sample.total);

        let raw = sample.corners();
        let mut smoothed = [0.0f32; 4];
        for ((out, filter), value) in smoothed.iter_mut().zip(self.corner_filters.iter_mut()).zip(raw) {
            *out = filter.push(value);
        }
        let smoothed_total = self.total_filter.push(sample.total);

        let center_of_pressure = self.center_of_pressure(smoothed);
        let zeroed_total = smoothed_total - self.zero_weight().unwrap_or(0.0);
        let offset = self.offset_corners(raw, sample.total);

        Ok(PlateReading {
            smoothed: PlateSample::with_corners(smoothed, smoothed_total),
            center_of_pressure,
            zeroed_total,
            offset,
            zero_calibration: self.zero,
        })
    }

    /// Clear filters, zero calibration, floor and offsets
    pub fn reset(&mut self) {
        *self = Self {
            config: self.config,
            ..Self::default()
        };
    }

    fn clear_filters(&mut self) {
        for filter in &mut self.corner_filters {
            filter.reset();
        }
        self.total_filter.reset();
        self.cop_x.reset();
        self.cop_y.reset();
    }

    fn accumulate_zero(&mut self, total: f32) {
        let ZeroCalibration::InProgress { recorded, target } = self.zero else {
            return;
        };

        self.zero_sum += total as f64;
        let recorded = recorded + 1;

        self.zero = if recorded >= target {
            let zero_kg = (self.zero_sum / target as f64) as f32;
            log_info!("Plate zero calibration finished: {:.3} kg", zero_kg);
            ZeroCalibration::Done { zero_kg }
        } else {
            ZeroCalibration::InProgress { recorded, target }
        };
    }

    fn center_of_pressure(&mut self, corners: [f32; 4]) -> CenterOfPressure {
        let [tl, tr, bl, br] = corners;
        let sum = tl + tr + bl + br;

        let (x, y) = if sum == 0.0 {
            (0.0, 0.0)
        } else {
            (
                self.config.length_cm / 2.0 * ((tr + br) - (tl + bl)) / sum,
                self.config.width_cm / 2.0 * ((tl + tr) - (bl + br)) / sum,
            )
        };

        CenterOfPressure {
            x_cm: self.cop_x.push(x),
            y_cm: self.cop_y.push(y),
        }
    }

    fn offset_corners(&mut self, raw: [f32; 4], total: f32) -> PlateSample {
        for &value in &raw {
            if value < self.negative_floor {
                self.negative_floor = value;
            }
        }

        let total = total.max(0.0);
        let mut corners = raw.map(|value| value - self.negative_floor);

        if self.capture_offsets {
            self.capture_offsets = false;
            let highest = corners.iter().copied().fold(f32::MIN, f32::max);
            for (offset, value) in self.corner_offsets.iter_mut().zip(corners) {
                *offset = highest - value;
            }
        }

        if total > 0.0 {
            for (value, offset) in corners.iter_mut().zip(self.corner_offsets) {
                *value += offset;
            }
        } else {
            corners = [0.0; 4];
        }

        PlateSample::with_corners(corners, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(processor: &mut PlateProcessor, sample: PlateSample, n: usize) -> PlateReading {
        let mut reading = processor.process(sample).unwrap();
        for _ in 1..n {
            reading = processor.process(sample).unwrap();
        }
        reading
    }

    #[test]
    fn even_load_is_centred() {
        let mut processor = PlateProcessor::default();
        let reading = settle(&mut processor, PlateSample::from_corners(10.0, 10.0, 10.0, 10.0), 25);

        assert!(reading.center_of_pressure.x_cm.abs() < 1e-5);
        assert!(reading.center_of_pressure.y_cm.abs() < 1e-5);
    }

    #[test]
    fn right_side_load_reaches_half_length() {
        let mut processor = PlateProcessor::default();
        let reading = settle(&mut processor, PlateSample::from_corners(0.0, 20.0, 0.0, 20.0), 25);

        assert!((reading.center_of_pressure.x_cm - PLATE_LENGTH_CM / 2.0).abs() < 1e-3);
        assert!(reading.center_of_pressure.y_cm.abs() < 1e-5);
    }

    #[test]
    fn front_load_reaches_half_width() {
        let mut processor = PlateProcessor::default();
        let reading = settle(&mut processor, PlateSample::from_corners(15.0, 15.0, 0.0, 0.0), 25);

        assert!((reading.center_of_pressure.y_cm - PLATE_WIDTH_CM / 2.0).abs() < 1e-3);
    }

    #[test]
    fn unloaded_board_reports_centre() {
        let mut processor = PlateProcessor::default();
        let reading = processor.process(PlateSample::default()).unwrap();

        assert_eq!(reading.center_of_pressure, CenterOfPressure::default());
        assert_eq!(reading.offset, PlateSample::default());
    }

    #[test]
    fn zero_calibration_subtracts_unloaded_total() {
        let mut processor = PlateProcessor::new(PlateConfig {
            zero_samples: 4,
            ..PlateConfig::default()
        })
        .unwrap();
        let idle = PlateSample { total: 1.5, ..PlateSample::default() };

        processor.start_zero_calibration();
        for _ in 0..3 {
            let reading = processor.process(idle).unwrap();
            assert!(matches!(reading.zero_calibration, ZeroCalibration::InProgress { .. }));
        }
        let reading = processor.process(idle).unwrap();
        assert_eq!(reading.zero_calibration, ZeroCalibration::Done { zero_kg: 1.5 });
        assert_eq!(processor.zero_weight(), Some(1.5));
        assert!(reading.zeroed_total.abs() < 1e-6);
    }

    #[test]
    fn negative_corners_raise_the_floor() {
        let mut processor = PlateProcessor::default();
        processor.process(PlateSample::from_corners(-2.0, 0.0, 0.0, 0.0)).unwrap();
        assert_eq!(processor.negative_floor(), -2.0);

        let reading = processor.process(PlateSample::from_corners(5.0, 5.0, 5.0, 5.0)).unwrap();
        assert_eq!(reading.offset.top_left, 7.0);
        assert_eq!(reading.offset.bottom_right, 7.0);
    }

    #[test]
    fn negative_total_reads_as_empty() {
        let mut processor = PlateProcessor::default();
        let spike = PlateSample { total: -3.0, ..PlateSample::from_corners(1.0, 1.0, 1.0, 1.0) };

        let reading = processor.process(spike).unwrap();
        assert_eq!(reading.offset.total, 0.0);
        assert_eq!(reading.offset.top_left, 0.0);
    }

    #[test]
    fn centre_offset_equalises_corners() {
        let mut processor = PlateProcessor::default();
        processor.request_center_offset();

        let reading = processor.process(PlateSample::from_corners(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(reading.offset.top_left, 4.0);
        assert_eq!(reading.offset.top_right, 4.0);
        assert_eq!(reading.offset.bottom_left, 4.0);
        assert_eq!(reading.offset.bottom_right, 4.0);

        // Offsets stay, but vanish while the board is empty
        let empty = processor.process(PlateSample::default()).unwrap();
        assert_eq!(empty.offset.top_left, 0.0);
    }

    #[test]
    fn non_finite_samples_are_rejected() {
        let mut processor = PlateProcessor::default();
        let bad = PlateSample::from_corners(f32::NAN, 1.0, 1.0, 1.0);
        assert_eq!(processor.process(bad), Err(PoseError::InvalidValue));
    }

    #[test]
    fn reset_forgets_calibration() {
        let mut processor = PlateProcessor::new(PlateConfig { zero_samples: 1, ..PlateConfig::default() }).unwrap();
        processor.start_zero_calibration();
        processor.process(PlateSample { total: 2.0, ..PlateSample::default() }).unwrap();
        processor.process(PlateSample::from_corners(-1.0, 0.0, 0.0, 0.0)).unwrap();

        processor.reset();
        assert_eq!(processor.zero_weight(), None);
        assert_eq!(processor.negative_floor(), 0.0);
    }

    #[test]
    fn zero_calibration_lasts_six_seconds() {
        assert_eq!(PlateConfig::default().zero_calibration_ms(), 6_000);

        let short = PlateConfig { zero_samples: 20, ..PlateConfig::default() };
        assert_eq!(short.zero_calibration_ms(), 1_000);
    }

    #[test]
    fn bad_geometry_is_rejected() {
        let config = PlateConfig { width_cm: 0.0, ..PlateConfig::default() };
        assert!(PlateProcessor::new(config).is_err());
    }
}
