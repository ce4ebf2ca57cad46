//! Joint Geometry Utilities
//!
//! ## Overview
//!
//! Small, pure functions over 3D camera-space points: segment vectors, dot
//! products, the angle between two body segments and tolerance checks.
//! Everything here is `Copy`, allocation free and safe to call from the
//! sensor callback.
//!
//! ## Segment Vectors Are Unsigned
//!
//! [`segment_vector`] does **not** return `b - a`. Each axis holds the
//! unsigned distance along that axis alone:
//!
//! ```text
//! segment_vector(a, b) = (|a.x - b.x|, |a.y - b.y|, |a.z - b.z|)
//! ```
//!
//! Both vectors fed into [`inter_joint_angle`] therefore live in the
//! positive octant, and the angle is always in `[0°, 90°]`. The trunk
//! baseline is calibrated with the same definition, so comparisons stay
//! consistent. Switching to signed vectors would change every calibrated
//! angle.
//!
//! ## Degenerate Segments
//!
//! When two joints coincide one vector has zero length and the angle is
//! undefined. Instead of leaking a NaN into later comparisons,
//! [`inter_joint_angle`] returns [`PoseError::DegenerateGeometry`] and the
//! caller treats the trunk check as failed for that frame.
//!
//! ## Usage Example
//!
//! ```rust
//! use bess_core::geometry::{Point3, inter_joint_angle, within_margin_3d};
//!
//! let head = Point3::new(0.0, 1.6, 2.0);
//! let spine_mid = Point3::new(0.02, 1.2, 2.0);
//! let spine_base = Point3::new(0.02, 0.9, 2.05);
//!
//! let angle = inter_joint_angle(head, spine_mid, spine_base)?;
//! assert!(angle >= 0.0 && angle <= 90.0);
//!
//! let baseline = Point3::new(0.0, 0.0, 2.0);
//! assert!(within_margin_3d(0.03, baseline, Point3::new(0.01, -0.02, 2.03)));
//! # Ok::<(), bess_core::PoseError>(())
//! ```

use core::ops::{Add, Mul, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{PoseError, PoseResult};

/// Point in sensor camera space (metres)
///
/// x grows to the sensor's left, y up, z away from the sensor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point3 {
    /// Horizontal axis
    pub x: f32,
    /// Vertical axis
    pub y: f32,
    /// Depth axis
    pub z: f32,
}

impl Point3 {
    /// Origin
    pub const ZERO: Self = Self { x: 0.0, y: 0.0, z: 0.0 };

    /// Create a point from its coordinates
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// True when every coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Euclidean length
    pub fn magnitude(&self) -> f32 {
        libm::sqrtf(self.x * self.x + self.y * self.y + self.z * self.z)
    }
}

impl Add for Point3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f32> for Point3 {
    type Output = Self;

    fn mul(self, scale: f32) -> Self {
        Self::new(self.x * scale, self.y * scale, self.z * scale)
    }
}

/// Per-axis unsigned distance between two points
pub fn segment_vector(a: Point3, b: Point3) -> Point3 {
    Point3::new(
        (a.x - b.x).abs(),
        (a.y - b.y).abs(),
        (a.z - b.z).abs(),
    )
}

/// Dot product
pub fn dot(v: Point3, w: Point3) -> f32 {
    dot_f64(v, w) as f32
}

/// Product of the two Euclidean norms, `|v|·|w|`
pub fn magnitude_product(v: Point3, w: Point3) -> f32 {
    magnitude_product_f64(v, w) as f32
}

// f32 components are exact in f64, so the products below only round once.
fn dot_f64(v: Point3, w: Point3) -> f64 {
    v.x as f64 * w.x as f64 + v.y as f64 * w.y as f64 + v.z as f64 * w.z as f64
}

fn magnitude_product_f64(v: Point3, w: Point3) -> f64 {
    libm::sqrt(dot_f64(v, v) * dot_f64(w, w))
}

/// Angle at `middle` between the distal and proximal segments, in degrees
///
/// Forms `segment_vector(distal, middle)` and `segment_vector(middle, proximal)`
/// and returns `acos(dot / magnitude_product)`.
///
/// ## Errors
///
/// - [`PoseError::InvalidValue`] if any coordinate is NaN or infinite
/// - [`PoseError::DegenerateGeometry`] if either segment has zero length
pub fn inter_joint_angle(distal: Point3, middle: Point3, proximal: Point3) -> PoseResult<f32> {
    if !(distal.is_finite() && middle.is_finite() && proximal.is_finite()) {
        return Err(PoseError::InvalidValue);
    }

    let v = segment_vector(distal, middle);
    let w = segment_vector(middle, proximal);

    let norms = magnitude_product_f64(v, w);
    if norms <= 0.0 || !norms.is_finite() {
        return Err(PoseError::DegenerateGeometry);
    }

    // Rounding can push the cosine a hair past 1.0 for parallel segments
    let cosine = (dot_f64(v, w) / norms).clamp(-1.0, 1.0);
    let radians = libm::acos(cosine);

    Ok((radians * 180.0 / core::f64::consts::PI) as f32)
}

/// True iff `reference - margin <= value <= reference + margin`
pub fn within_margin(margin: f32, reference: f32, value: f32) -> bool {
    value >= reference - margin && value <= reference + margin
}

/// Independent [`within_margin`] on all three axes
pub fn within_margin_3d(margin: f32, reference: Point3, value: Point3) -> bool {
    within_margin(margin, reference.x, value.x)
        && within_margin(margin, reference.y, value.y)
        && within_margin(margin, reference.z, value.z)
}
