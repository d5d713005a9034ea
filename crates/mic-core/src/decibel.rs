//! Level conversions.

use crate::constants::REFERENCE_PRESSURE;

/// Amplitude ratio to dB: `20·log₁₀(x)`.
pub fn db(x: f64) -> f64 {
    20.0 * x.log10()
}

/// Combine levels given in dB.
///
/// Coherent sources add in amplitude, incoherent ones in power.
pub fn db_sum(levels: &[f64], coherent: bool) -> f64 {
    if coherent {
        20.0 * levels.iter().map(|l| 10f64.powf(l / 20.0)).sum::<f64>().log10()
    } else {
        10.0 * levels.iter().map(|l| 10f64.powf(l / 10.0)).sum::<f64>().log10()
    }
}

/// Sound pressure level in dB re 20 µPa.
pub fn spl(pressure: f64) -> f64 {
    db(pressure / REFERENCE_PRESSURE)
}
