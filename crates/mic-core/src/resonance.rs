//! Closed-form results for a single mass–spring–damper resonator.
//!
//! `compliance`, `inertance` and `resistance` are the lumped C, M and R of
//! the resonator; any consistent unit system works.

use crate::constants::AirState;
use std::f64::consts::PI;

/// Angular frequency ω = 2πf.
pub fn omega(freq: f64) -> f64 {
    2.0 * PI * freq
}

/// Viscous boundary-layer thickness `sqrt(ν/ω)` at `freq`.
pub fn boundary_layer_thickness(freq: f64, air: &AirState) -> f64 {
    (air.kinematic_viscosity / omega(freq)).sqrt()
}

/// Magnitude of a first-order high-pass with corner `f_rolloff`, at `freq`.
pub fn rolloff(freq: f64, f_rolloff: f64) -> f64 {
    1.0 / (1.0 + (f_rolloff / freq).powi(2)).sqrt()
}

/// Undamped natural frequency `1 / (2π·sqrt(CM))`.
pub fn natural_frequency(compliance: f64, inertance: f64) -> f64 {
    1.0 / (2.0 * PI * (compliance * inertance).sqrt())
}

/// Mechanical quality factor `sqrt(M/C) / R`.
pub fn quality_factor(compliance: f64, inertance: f64, resistance: f64) -> f64 {
    (inertance / compliance).sqrt() / resistance
}

/// Frequency of the displacement-response peak.
///
/// NaN when `Qm < 1/sqrt(2)`: the response has no peak.
pub fn resonance_frequency(compliance: f64, inertance: f64, resistance: f64) -> f64 {
    let q = quality_factor(compliance, inertance, resistance);
    natural_frequency(compliance, inertance) * (1.0 - 1.0 / (2.0 * q * q)).sqrt()
}

/// Height of the resonance peak relative to the static response.
pub fn resonance_peak(compliance: f64, inertance: f64, resistance: f64) -> f64 {
    let q = quality_factor(compliance, inertance, resistance);
    2.0 * q * q / (4.0 * q * q - 1.0).sqrt()
}

/// Normalised resonator magnitude at frequency ratio `z = f/f0`.
pub fn harmonic_response(z: f64, q: f64) -> f64 {
    q / (z * z + (z * z - 1.0).powi(2) * q * q).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_frequency() {
        // C·M = 1/(2π·1000)² → f0 = 1 kHz
        let m = 1.0;
        let c = 1.0 / (2.0 * PI * 1000.0).powi(2);
        assert!((natural_frequency(c, m) - 1000.0).abs() < 1e-9);
    }

    #[test]
    fn test_peak_matches_harmonic_response() {
        let (c, m, r) = (1e-6, 1e-2, 5.0);
        let q = quality_factor(c, m, r);
        let f0 = natural_frequency(c, m);
        let fr = resonance_frequency(c, m, r);
        // the static response is unity, so the peak height is the response at fr
        let peak = harmonic_response(fr / f0, q);
        assert!((harmonic_response(0.0, q) - 1.0).abs() < 1e-12);
        assert!(
            (peak - resonance_peak(c, m, r)).abs() / peak < 1e-9,
            "peak = {peak}, expected {}",
            resonance_peak(c, m, r)
        );
    }

    #[test]
    fn test_heavily_damped_has_no_peak() {
        assert!(resonance_frequency(1.0, 1.0, 10.0).is_nan());
    }

    #[test]
    fn test_rolloff_is_minus_three_db_at_corner() {
        let a = rolloff(100.0, 100.0);
        assert!((a - 1.0 / 2f64.sqrt()).abs() < 1e-12);
        assert!(rolloff(1e6, 100.0) > 0.9999);
    }

    #[test]
    fn test_boundary_layer_shrinks_with_frequency() {
        let air = AirState::default();
        let low = boundary_layer_thickness(100.0, &air);
        let high = boundary_layer_thickness(10_000.0, &air);
        assert!((low / high - 10.0).abs() < 1e-9);
        assert!(low > 1e-4 && low < 1e-3, "beta(100) = {low}");
    }
}
