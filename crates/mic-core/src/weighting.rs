//! IEC 61672-1 frequency weightings.
//!
//! Pole frequencies are solved from the standard's defining constants.

use crate::decibel::db;
use crate::error::{SimError, SimResult};
use std::sync::OnceLock;

/// Reference frequency where every weighting is 0 dB.
pub const REFERENCE_FREQUENCY: f64 = 1000.0;

/// Pole and zero frequencies of the A/C weighting network, in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeightingCurve {
    pub f1: f64,
    pub f2: f64,
    pub f3: f64,
    pub f4: f64,
}

impl WeightingCurve {
    /// Solve the standard's defining equations for f1..f4.
    pub fn standard() -> Self {
        let damping = 0.5f64.sqrt();
        let fr = REFERENCE_FREQUENCY;
        let f_low = 10f64.powf(1.5);
        let f_high = 10f64.powf(3.9);
        let f_a = 10f64.powf(2.45);

        let c = f_low.powi(2) * f_high.powi(2);
        let b = 1.0 / (1.0 - damping)
            * (fr.powi(2) + c / fr.powi(2) - damping * (f_low.powi(2) + f_high.powi(2)));
        let root = (b * b - 4.0 * c).sqrt();

        let sqrt5 = 5f64.sqrt();
        Self {
            f1: ((-b - root) / 2.0).sqrt(),
            f2: (3.0 - sqrt5) / 2.0 * f_a,
            f3: (3.0 + sqrt5) / 2.0 * f_a,
            f4: ((-b + root) / 2.0).sqrt(),
        }
    }

    /// Unnormalised C-weighting in dB.
    fn c_raw(&self, f: f64) -> f64 {
        let f_sq = f * f;
        db(self.f4.powi(2) * f_sq / ((f_sq + self.f1.powi(2)) * (f_sq + self.f4.powi(2))))
    }

    /// Unnormalised A-weighting in dB.
    fn a_raw(&self, f: f64) -> f64 {
        let f_sq = f * f;
        self.c_raw(f)
            + db(f_sq / ((f_sq + self.f2.powi(2)) * (f_sq + self.f3.powi(2))).sqrt())
    }

    /// A-weighting at `freq`, 0 dB at 1 kHz.
    pub fn a_weight(&self, freq: f64) -> SimResult<f64> {
        check_frequency(freq)?;
        Ok(self.a_raw(freq) - self.a_raw(REFERENCE_FREQUENCY))
    }

    /// C-weighting at `freq`, 0 dB at 1 kHz.
    pub fn c_weight(&self, freq: f64) -> SimResult<f64> {
        check_frequency(freq)?;
        Ok(self.c_raw(freq) - self.c_raw(REFERENCE_FREQUENCY))
    }
}

impl Default for WeightingCurve {
    fn default() -> Self {
        Self::standard()
    }
}

fn check_frequency(freq: f64) -> SimResult<()> {
    if freq.is_finite() && freq > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidFrequency { freq })
    }
}

/// The standard curve, solved on first use.
pub fn standard_curve() -> &'static WeightingCurve {
    static CURVE: OnceLock<WeightingCurve> = OnceLock::new();
    CURVE.get_or_init(WeightingCurve::standard)
}

/// A-weighting in dB at `freq` Hz.
pub fn a_weight(freq: f64) -> SimResult<f64> {
    standard_curve().a_weight(freq)
}

/// C-weighting in dB at `freq` Hz.
pub fn c_weight(freq: f64) -> SimResult<f64> {
    standard_curve().c_weight(freq)
}
