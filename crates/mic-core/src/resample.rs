//! Fold irregularly time-stamped samples of a periodic signal onto one
//! uniformly sampled period.

use crate::error::{SimError, SimResult};
use interp::{interp_slice, InterpMode};

/// Number of points [`resample`] produces per period.
pub const RESAMPLE_POINTS: usize = 100;

/// Resample onto [`RESAMPLE_POINTS`] uniform points covering `[0, period)`.
pub fn resample(times: &[f64], amplitudes: &[f64], period: f64) -> SimResult<Vec<f64>> {
    resample_to(times, amplitudes, period, RESAMPLE_POINTS)
}

/// Resample onto `n` uniform points covering `[0, period)`.
///
/// Every timestamp is wrapped into one period and the samples are ordered by
/// wrapped time (stable for ties). The first sample is repeated at `period`
/// to close the cycle, then the uniform grid is linearly interpolated; grid
/// points before the earliest sample take its amplitude. Of several samples
/// sharing one wrapped time, the last in input order wins.
pub fn resample_to(
    times: &[f64],
    amplitudes: &[f64],
    period: f64,
    n: usize,
) -> SimResult<Vec<f64>> {
    if !(period.is_finite() && period > 0.0) {
        return Err(SimError::InvalidPeriod { period });
    }
    if times.len() != amplitudes.len() {
        return Err(SimError::LengthMismatch {
            times: times.len(),
            amplitudes: amplitudes.len(),
        });
    }
    if times.is_empty() {
        return Err(SimError::EmptySignal);
    }
    if let Some(t) = times.iter().find(|t| !t.is_finite()) {
        return Err(SimError::InvalidParameter {
            name: "times".into(),
            message: format!("non-finite timestamp {t}"),
        });
    }

    let mut points: Vec<(f64, f64)> = times
        .iter()
        .zip(amplitudes)
        .map(|(&t, &a)| (wrap(t, period), a))
        .collect();
    points.sort_by(|a, b| a.0.total_cmp(&b.0));

    let closing = points[0].1;
    points.push((period, closing));
    points.dedup_by(|later, kept| {
        if later.0 == kept.0 {
            kept.1 = later.1;
            true
        } else {
            false
        }
    });

    let (xs, ys): (Vec<f64>, Vec<f64>) = points.into_iter().unzip();
    let grid: Vec<f64> = (0..n).map(|i| period * i as f64 / n as f64).collect();
    Ok(interp_slice(&xs, &ys, &grid, &InterpMode::FirstLast))
}

/// `t` folded into `[0, period)`. Tiny negative times can round up to
/// exactly `period`, which is the same phase as zero.
fn wrap(t: f64, period: f64) -> f64 {
    let folded = t - (t / period).floor() * period;
    if folded >= period {
        0.0
    } else {
        folded
    }
}
