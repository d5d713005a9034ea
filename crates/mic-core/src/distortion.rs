//! Harmonic distortion of one period of a periodic signal.
//!
//! All functions expect `samples` to hold exactly one period, equally spaced
//! in time and starting at phase zero of the analysis window.

use crate::error::{SimError, SimResult};
use realfft::RealFftPlanner;
use std::f64::consts::PI;

/// Summary of one analysed period.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistortionReport {
    pub rms: f64,
    pub dc: f64,
    /// Peak amplitude of the fundamental.
    pub fundamental: f64,
    /// Total harmonic distortion as a ratio (not percent).
    pub thd: f64,
}

fn non_empty(samples: &[f64]) -> SimResult<()> {
    if samples.is_empty() {
        Err(SimError::EmptySignal)
    } else {
        Ok(())
    }
}

/// Root mean square.
pub fn rms(samples: &[f64]) -> SimResult<f64> {
    non_empty(samples)?;
    let sum: f64 = samples.iter().map(|s| s * s).sum();
    Ok((sum / samples.len() as f64).sqrt())
}

/// Mean value.
pub fn dc(samples: &[f64]) -> SimResult<f64> {
    non_empty(samples)?;
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Peak amplitude of the component at one cycle per window, by synchronous
/// detection against a cosine and a sine.
pub fn fundamental_amplitude(samples: &[f64]) -> SimResult<f64> {
    non_empty(samples)?;
    let n = samples.len() as f64;
    let (mut a, mut b) = (0.0, 0.0);
    for (t, &x) in samples.iter().enumerate() {
        let phase = 2.0 * PI * t as f64 / n;
        a += x * phase.cos();
        b += x * phase.sin();
    }
    a *= 2.0 / n;
    b *= 2.0 / n;
    Ok((a * a + b * b).sqrt())
}

/// RMS, DC, fundamental and THD of one period.
///
/// THD is `sqrt(2·RMS² − 2·DC² − Af²) / Af`: everything that is neither DC
/// nor fundamental, relative to the fundamental.
pub fn analyze(samples: &[f64]) -> SimResult<DistortionReport> {
    let rms = rms(samples)?;
    let dc = dc(samples)?;
    let fundamental = fundamental_amplitude(samples)?;

    // A DC-only window leaves rounding residue in the detector rather than
    // an exact zero.
    if !(fundamental > 1e-12 * rms) {
        return Err(SimError::ZeroFundamental);
    }

    // Rounding can push the radicand of a pure tone a few ulps below zero.
    let residue = (2.0 * rms * rms - 2.0 * dc * dc - fundamental * fundamental).max(0.0);
    Ok(DistortionReport {
        rms,
        dc,
        fundamental,
        thd: residue.sqrt() / fundamental,
    })
}

/// Total harmonic distortion ratio of one period.
pub fn thd(samples: &[f64]) -> SimResult<f64> {
    Ok(analyze(samples)?.thd)
}

/// Peak amplitudes of harmonics `1..=orders`.
///
/// Orders above the Nyquist limit of the window are reported as zero.
pub fn harmonic_amplitudes(samples: &[f64], orders: usize) -> SimResult<Vec<f64>> {
    non_empty(samples)?;
    let n = samples.len();

    let mut planner = RealFftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let mut input = samples.to_vec();
    let mut spectrum = fft.make_output_vec();
    fft.process(&mut input, &mut spectrum)
        .map_err(|e| SimError::Fft(e.to_string()))?;

    let amplitudes = (1..=orders)
        .map(|k| match spectrum.get(k) {
            // The Nyquist bin of an even window has no mirrored half.
            Some(bin) if 2 * k == n => bin.norm() / n as f64,
            Some(bin) => 2.0 * bin.norm() / n as f64,
            None => 0.0,
        })
        .collect();
    Ok(amplitudes)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// One period of `Σ amp·sin(order·θ)` plus `offset`, `n` samples.
    fn period(n: usize, offset: f64, partials: &[(f64, f64)]) -> Vec<f64> {
        (0..n)
            .map(|t| {
                let theta = 2.0 * PI * t as f64 / n as f64;
                offset
                    + partials
                        .iter()
                        .map(|&(order, amp)| amp * (order * theta).sin())
                        .sum::<f64>()
            })
            .collect()
    }

    #[test]
    fn test_pure_sine_has_no_distortion() {
        let x = period(100, 0.0, &[(1.0, 0.8)]);
        let report = analyze(&x).unwrap();
        assert!((report.fundamental - 0.8).abs() < 1e-12);
        assert!((report.rms - 0.8 / 2f64.sqrt()).abs() < 1e-12);
        assert!(report.thd < 1e-6, "thd = {}", report.thd);
    }

    #[test]
    fn test_dc_offset_is_excluded() {
        let x = period(100, 0.5, &[(1.0, 1.0)]);
        let report = analyze(&x).unwrap();
        assert!((report.dc - 0.5).abs() < 1e-12);
        assert!(report.thd < 1e-6, "thd = {}", report.thd);
    }

    #[test]
    fn test_twenty_percent_third_harmonic() {
        let x = period(100, 0.0, &[(1.0, 1.0), (3.0, 0.2)]);
        let d = thd(&x).unwrap();
        assert!((d - 0.2).abs() < 1e-9, "thd = {d}");
    }

    #[test]
    fn test_coarse_window_still_resolves_low_harmonics() {
        let x = period(16, 0.0, &[(1.0, 1.0), (3.0, 0.2)]);
        let d = thd(&x).unwrap();
        assert!((d - 0.2).abs() < 1e-9, "thd = {d}");
    }

    #[test]
    fn test_stepped_waveform_with_third_harmonic() {
        // sin θ + 0.2·sin 3θ, each value held for four samples
        let n = 192;
        let x: Vec<f64> = (0..n)
            .map(|t| {
                let theta = 2.0 * PI * (t / 4 * 4) as f64 / n as f64;
                theta.sin() + 0.2 * (3.0 * theta).sin()
            })
            .collect();
        let d = thd(&x).unwrap();
        assert!((d - 0.2).abs() < 0.01, "thd = {d}");
    }

    #[test]
    fn test_square_wave() {
        // Continuous limit: sqrt(π²/8 − 1) ≈ 0.483
        let x: Vec<f64> = (0..100).map(|t| if t < 50 { 1.0 } else { -1.0 }).collect();
        let d = thd(&x).unwrap();
        let expected = (PI * PI / 8.0 - 1.0).sqrt();
        assert!((d - expected).abs() < 0.005, "thd = {d}, expected {expected}");
    }

    #[test]
    fn test_no_fundamental_is_an_error() {
        assert_eq!(thd(&[0.0; 64]), Err(SimError::ZeroFundamental));
        assert_eq!(thd(&[0.3; 64]), Err(SimError::ZeroFundamental));
        let only_second = period(64, 0.0, &[(2.0, 1.0)]);
        assert_eq!(thd(&only_second), Err(SimError::ZeroFundamental));
    }

    #[test]
    fn test_empty_signal_is_an_error() {
        assert_eq!(rms(&[]), Err(SimError::EmptySignal));
        assert_eq!(thd(&[]), Err(SimError::EmptySignal));
        assert!(harmonic_amplitudes(&[], 3).is_err());
    }

    #[test]
    fn test_harmonic_amplitudes() {
        let x = period(100, 0.25, &[(1.0, 1.0), (3.0, 0.2), (5.0, 0.05)]);
        let h = harmonic_amplitudes(&x, 6).unwrap();
        let expected = [1.0, 0.0, 0.2, 0.0, 0.05, 0.0];
        for (order, (&got, &want)) in h.iter().zip(expected.iter()).enumerate() {
            assert!((got - want).abs() < 1e-9, "H{} = {got}, expected {want}", order + 1);
        }
    }

    #[test]
    fn test_harmonics_beyond_nyquist_are_zero() {
        let x = period(8, 0.0, &[(1.0, 1.0)]);
        let h = harmonic_amplitudes(&x, 10).unwrap();
        assert_eq!(h.len(), 10);
        assert!(h[4..].iter().all(|&a| a == 0.0), "{h:?}");
    }
}
