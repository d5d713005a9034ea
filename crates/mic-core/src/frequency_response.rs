use crate::constants::AirState;
use crate::decibel::db;
use crate::elements::FrequencyPoint;
use crate::error::{SimError, SimResult};
use crate::network::MicrophoneModel;
use num_complex::Complex64;

/// Frequency responses of a microphone, each positionally aligned with
/// `frequencies`.
#[derive(Debug, Clone, Default)]
pub struct SweepResult {
    /// Frequencies in Hz, in input order.
    pub frequencies: Vec<f64>,
    /// Complex pressure-to-output transfer function.
    pub transfer_function: Vec<Complex64>,
    /// Sensitivity in dB (re unity transfer).
    pub sensitivity_db: Vec<f64>,
    /// Phase of the transfer function in radians.
    pub phase: Vec<f64>,
    /// Output-referred noise from the inlet resistance, in dB.
    pub noise_inlet_db: Vec<f64>,
    /// Output-referred noise from the vent resistance, in dB.
    pub noise_vent_db: Vec<f64>,
    /// Output-referred noise from the backplate resistance, in dB.
    pub noise_backplate_db: Vec<f64>,
    /// Power sum of the three noise sources, in dB.
    pub noise_total_db: Vec<f64>,
}

/// `n` logarithmically spaced values from `10^start_exp` to `10^end_exp`
/// inclusive.
pub fn log_spaced(start_exp: f64, end_exp: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![10f64.powf(start_exp)],
        _ => {
            let step = (end_exp - start_exp) / (n - 1) as f64;
            (0..n)
                .map(|i| 10f64.powf(start_exp + step * i as f64))
                .collect()
        }
    }
}

/// Evaluate `model` at every frequency in `frequencies`.
///
/// Any non-positive frequency rejects the whole sweep before evaluation
/// starts.
pub fn sweep(model: &MicrophoneModel, frequencies: &[f64], air: &AirState) -> SimResult<SweepResult> {
    let points = frequencies
        .iter()
        .map(|&f| FrequencyPoint::new(f))
        .collect::<SimResult<Vec<_>>>()?;

    log::debug!(
        "sweeping {} points from {:?} to {:?} Hz",
        points.len(),
        frequencies.first(),
        frequencies.last()
    );

    let n = points.len();
    let mut result = SweepResult {
        frequencies: frequencies.to_vec(),
        transfer_function: Vec::with_capacity(n),
        sensitivity_db: Vec::with_capacity(n),
        phase: Vec::with_capacity(n),
        noise_inlet_db: Vec::with_capacity(n),
        noise_vent_db: Vec::with_capacity(n),
        noise_backplate_db: Vec::with_capacity(n),
        noise_total_db: Vec::with_capacity(n),
    };

    let mut non_finite = 0usize;
    for point in points {
        let r = model.response(point, air)?;
        if !r.is_finite() {
            non_finite += 1;
        }

        result.transfer_function.push(r.transfer);
        result.sensitivity_db.push(db(r.sensitivity()));
        result.phase.push(r.phase());
        result.noise_inlet_db.push(db(r.noise_inlet));
        result.noise_vent_db.push(db(r.noise_vent));
        result.noise_backplate_db.push(db(r.noise_backplate));
        result.noise_total_db.push(db(r.noise_total()));
    }

    if non_finite > 0 {
        log::warn!("{non_finite} of {n} sweep points have non-finite sensitivity or noise");
    }

    Ok(result)
}

impl SweepResult {
    /// Index of the sensitivity maximum, ignoring non-finite points.
    pub fn peak_index(&self) -> Option<usize> {
        self.sensitivity_db
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_finite())
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
    }

    /// Sensitivity relative to the value at the frequency closest to
    /// `reference` Hz.
    pub fn normalized_sensitivity_db(&self, reference: f64) -> SimResult<Vec<f64>> {
        let index = self
            .frequencies
            .iter()
            .enumerate()
            .min_by(|a, b| (a.1 - reference).abs().total_cmp(&(b.1 - reference).abs()))
            .map(|(i, _)| i)
            .ok_or_else(|| SimError::InvalidParameter {
                name: "frequencies".into(),
                message: "sweep has no points".into(),
            })?;
        let offset = *self
            .sensitivity_db
            .get(index)
            .ok_or_else(|| SimError::InvalidParameter {
                name: "sensitivity_db".into(),
                message: format!(
                    "{} values for {} frequencies",
                    self.sensitivity_db.len(),
                    self.frequencies.len()
                ),
            })?;
        Ok(self.sensitivity_db.iter().map(|s| s - offset).collect())
    }
}
