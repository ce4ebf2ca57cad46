//! Zero-lag second-order Butterworth low-pass
//!
//! The series is run through a recursive second-order section forwards and
//! then backwards, cancelling the phase lag. Two copies of each end sample
//! are padded on so the recursion has history at the boundaries.

use alloc::vec::Vec;

use crate::errors::{PoseError, PoseResult};

/// Low-pass `data` sampled every `dt_s` seconds at `cutoff_hz`
///
/// A cutoff of zero returns the input unchanged.
///
/// ## Errors
///
/// [`PoseError::InvalidConfig`] when `dt_s` is not positive, or the cutoff
/// is negative or at/above the Nyquist frequency.
pub fn butterworth(data: &[f32], dt_s: f32, cutoff_hz: f32) -> PoseResult<Vec<f32>> {
    if cutoff_hz == 0.0 || data.is_empty() {
        return Ok(data.to_vec());
    }

    if !(dt_s > 0.0) {
        return Err(PoseError::InvalidConfig { reason: "sample interval must be positive" });
    }

    let sampling_rate = 1.0 / dt_s as f64;
    let cutoff = cutoff_hz as f64;
    if !(cutoff > 0.0) || cutoff >= sampling_rate / 2.0 {
        return Err(PoseError::InvalidConfig { reason: "cutoff must be below Nyquist" });
    }

    let wc = libm::tan(cutoff * core::f64::consts::PI / sampling_rate);
    let k1 = core::f64::consts::SQRT_2 * wc;
    let k2 = wc * wc;
    let a = k2 / (1.0 + k1 + k2);
    let b = 2.0 * a;
    let c = a;
    let k3 = b / k2;
    let d = -2.0 * a + k3;
    let e = 1.0 - 2.0 * a - k3;

    let n = data.len();
    let first = data[0] as f64;
    let last = data[n - 1] as f64;

    let mut padded = Vec::with_capacity(n + 4);
    padded.push(first);
    padded.push(first);
    padded.extend(data.iter().map(|&v| v as f64));
    padded.push(last);
    padded.push(last);

    // Forward pass
    let mut forward = alloc::vec![0.0f64; n + 4];
    forward[0] = first;
    forward[1] = first;
    for s in 2..n + 2 {
        forward[s] = a * padded[s] + b * padded[s - 1] + c * padded[s - 2]
            + d * forward[s - 1] + e * forward[s - 2];
    }
    forward[n + 2] = forward[n + 1];
    forward[n + 3] = forward[n + 1];

    // Backward pass
    let mut backward = alloc::vec![0.0f64; n + 2];
    backward[n] = forward[n + 2];
    backward[n + 1] = forward[n + 3];
    for i in (0..n).rev() {
        backward[i] = a * forward[i + 2] + b * forward[i + 3] + c * forward[i + 4]
            + d * backward[i + 1] + e * backward[i + 2];
    }

    Ok(backward[..n].iter().map(|&v| v as f32).collect())
}
