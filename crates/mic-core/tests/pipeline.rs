//! End-to-end tests over the public API.
//!
//! Two independent flows are exercised:
//!   component values → MicrophoneModel → sweep → dB series
//!   irregular (time, amplitude) samples → resample → THD

use std::f64::consts::PI;

use mic_core::constants::{AirConditions, AirState};
use mic_core::distortion::{analyze, harmonic_amplitudes, thd};
use mic_core::elements::{AcousticElement, FrequencyPoint, MicroTube};
use mic_core::frequency_response::{log_spaced, sweep};
use mic_core::network::{ElementRole, MicrophoneModel, MicrophoneNetwork};
use mic_core::resample::{resample, RESAMPLE_POINTS};
use mic_core::weighting::a_weight;
use mic_core::{MicParams, SimError};

// ─── Helpers ───────────────────────────────────────────────────────────────

/// Samples of `sin(θ) + h3·sin(3θ)` at scattered times over several periods.
fn scattered_capture(period: f64, h3: f64, count: usize) -> (Vec<f64>, Vec<f64>) {
    let times: Vec<f64> = (0..count)
        .map(|i| (i as f64 * 0.754_877_666_2).fract() * period + (i % 7) as f64 * period)
        .collect();
    let amps = times
        .iter()
        .map(|t| {
            let theta = 2.0 * PI * t / period;
            theta.sin() + h3 * (3.0 * theta).sin()
        })
        .collect();
    (times, amps)
}

// ─── Frequency response ────────────────────────────────────────────────────

#[test]
fn default_network_smoke_test() {
    let air = AirState::default();
    let point = FrequencyPoint::new(1000.0).unwrap();
    let r = MicrophoneNetwork::default().response(point, &air).unwrap();

    assert!(r.sensitivity() > 0.0 && r.sensitivity().is_finite());
    for n in [r.noise_inlet, r.noise_vent, r.noise_backplate] {
        assert!(n.is_finite() && n >= 0.0, "noise = {n}");
    }
    let power = r.noise_inlet.powi(2) + r.noise_vent.powi(2) + r.noise_backplate.powi(2);
    assert!((r.noise_total().powi(2) - power).abs() <= 1e-12 * power);
}

#[test]
fn per_frequency_inlet_matches_micro_tube_model() {
    let air = AirState::default();
    let tube = MicroTube::new(0.3e-3, 0.2e-3);

    // the caller-side loop of overwriting R and M before each point ...
    let mut network = MicrophoneNetwork::default();
    let freqs = log_spaced(2.0, 4.5, 25);
    let manual: Vec<f64> = freqs
        .iter()
        .map(|&f| {
            let point = FrequencyPoint::new(f).unwrap();
            network.inlet.resistance = tube.resistance(point, &air);
            network.inlet.inertance = tube.inertance(point, &air);
            network.sensitivity(point, &air).unwrap()
        })
        .collect();

    // ... is what a model with a frequency-dependent inlet does
    let model = MicrophoneModel::default().with_element(ElementRole::Inlet, Box::new(tube));
    let swept = sweep(&model, &freqs, &air).unwrap();
    for (i, s) in manual.iter().enumerate() {
        let db = 20.0 * s.log10();
        assert!(
            (db - swept.sensitivity_db[i]).abs() < 1e-12,
            "mismatch at {} Hz",
            freqs[i]
        );
    }
}

#[test]
fn closure_element_drives_the_sweep() {
    let air = AirState::default();
    let model = MicrophoneModel::default().with_element(
        ElementRole::Vent,
        Box::new(|p: FrequencyPoint| AcousticElement::new(275e9 * (1.0 + p.freq() / 1e4), 0.0)),
    );
    let result = sweep(&model, &[100.0, 1000.0, 10_000.0], &air).unwrap();
    assert!(result.sensitivity_db.iter().all(|s| s.is_finite()));
}

#[test]
fn air_temperature_changes_inlet_losses() {
    let freqs = [15_000.0];
    let params = MicParams::default();
    let cold = AirState::new(AirConditions::from_celsius(-20.0)).unwrap();
    let hot = AirState::new(AirConditions::from_celsius(60.0)).unwrap();
    let a = sweep(&MicrophoneModel::from_params(&params, &cold).unwrap(), &freqs, &cold).unwrap();
    let b = sweep(&MicrophoneModel::from_params(&params, &hot).unwrap(), &freqs, &hot).unwrap();
    assert_ne!(a.sensitivity_db[0], b.sensitivity_db[0]);
}

#[test]
fn a_weighting_reference_point() {
    assert!(a_weight(1000.0).unwrap().abs() < 1e-12);
    assert!(a_weight(100.0).unwrap() < -19.0);
    assert!(matches!(a_weight(0.0), Err(SimError::InvalidFrequency { .. })));
}

// ─── Distortion ────────────────────────────────────────────────────────────

#[test]
fn scattered_capture_to_thd() {
    let period = 1.0 / 440.0;
    let (times, amps) = scattered_capture(period, 0.2, 1000);
    let uniform = resample(&times, &amps, period).unwrap();
    assert_eq!(uniform.len(), RESAMPLE_POINTS);

    let d = thd(&uniform).unwrap();
    assert!((d - 0.2).abs() < 0.01, "thd = {d}");

    let harmonics = harmonic_amplitudes(&uniform, 3).unwrap();
    assert!((harmonics[0] - 1.0).abs() < 0.01, "H1 = {}", harmonics[0]);
    assert!((harmonics[2] - 0.2).abs() < 0.01, "H3 = {}", harmonics[2]);
}

#[test]
fn clean_capture_has_negligible_thd() {
    let period = 0.02;
    let (times, amps) = scattered_capture(period, 0.0, 2000);
    let report = analyze(&resample(&times, &amps, period).unwrap()).unwrap();
    assert!(report.thd < 0.005, "thd = {}", report.thd);
    assert!(report.dc.abs() < 0.01, "dc = {}", report.dc);
}

#[test]
fn flat_capture_has_no_fundamental() {
    let uniform = resample(&[0.1, 0.6], &[0.5, 0.5], 1.0).unwrap();
    assert_eq!(thd(&uniform), Err(SimError::ZeroFundamental));
}
