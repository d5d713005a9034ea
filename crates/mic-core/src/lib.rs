pub mod constants;
pub mod decibel;
pub mod distortion;
pub mod elements;
pub mod error;
pub mod frequency_response;
pub mod network;
pub mod resample;
pub mod resonance;
pub mod weighting;

pub use error::{SimError, SimResult};

use constants::AirState;
use elements::{AcousticElement, FrequencyPoint};
use frequency_response::SweepResult;
use network::MicrophoneModel;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Shared interface types
// ---------------------------------------------------------------------------

/// User-facing description of a microphone, in the units a datasheet or
/// layout drawing uses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MicParams {
    /// Acoustic inlet diameter in mm.
    pub inlet_diameter: f64,
    /// Acoustic inlet length in mm.
    pub inlet_length: f64,
    /// Front cavity volume in mm³.
    pub front_volume: f64,
    /// Back cavity volume in mm³.
    pub back_volume: f64,
    /// Diaphragm compliance in fF (1e-15 m³/Pa).
    pub diaphragm_compliance: f64,
    /// Vent resistance in GΩ (1e9 Pa·s/m³).
    pub vent_resistance: f64,
    /// Backplate squeeze-film resistance in MΩ (1e6 Pa·s/m³).
    pub backplate_resistance: f64,
    /// Backplate squeeze-film inertance in units of 1e3 kg/m⁴.
    pub backplate_inertance: f64,
}

impl Default for MicParams {
    fn default() -> Self {
        Self {
            inlet_diameter: 0.3,
            inlet_length: 0.2,
            front_volume: 0.15,
            back_volume: 1.3,
            diaphragm_compliance: 1.85,
            vent_resistance: 180.0,
            backplate_resistance: 280.0,
            backplate_inertance: 6.0,
        }
    }
}

impl MicParams {
    const FIELDS: [&'static str; 8] = [
        "inlet_diameter",
        "inlet_length",
        "front_volume",
        "back_volume",
        "diaphragm_compliance",
        "vent_resistance",
        "backplate_resistance",
        "backplate_inertance",
    ];

    fn values(&self) -> [f64; 8] {
        [
            self.inlet_diameter,
            self.inlet_length,
            self.front_volume,
            self.back_volume,
            self.diaphragm_compliance,
            self.vent_resistance,
            self.backplate_resistance,
            self.backplate_inertance,
        ]
    }

    /// Geometry, volumes and compliance must be positive; resistances and
    /// inertance non-negative.
    pub fn validate(&self) -> SimResult<()> {
        for (i, (name, value)) in Self::FIELDS.iter().zip(self.values()).enumerate() {
            let positive_required = i < 5;
            let in_range = if positive_required { value > 0.0 } else { value >= 0.0 };
            if !(value.is_finite() && in_range) {
                return Err(SimError::InvalidParameter {
                    name: (*name).to_string(),
                    message: if positive_required {
                        format!("must be positive, got {value}")
                    } else {
                        format!("must be non-negative, got {value}")
                    },
                });
            }
        }
        Ok(())
    }
}

impl FromStr for MicParams {
    type Err = SimError;

    /// Parse one comma-separated row of the eight parameters, in field order.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells: Vec<&str> = s.split(',').map(str::trim).collect();
        if cells.len() != Self::FIELDS.len() {
            return Err(SimError::InvalidParameter {
                name: "row".into(),
                message: format!("expected {} values, found {}", Self::FIELDS.len(), cells.len()),
            });
        }

        let mut v = [0.0; 8];
        for (i, cell) in cells.iter().enumerate() {
            v[i] = cell.parse().map_err(|_| SimError::InvalidParameter {
                name: Self::FIELDS[i].into(),
                message: format!("'{cell}' is not a number"),
            })?;
        }

        let params = Self {
            inlet_diameter: v[0],
            inlet_length: v[1],
            front_volume: v[2],
            back_volume: v[3],
            diaphragm_compliance: v[4],
            vent_resistance: v[5],
            backplate_resistance: v[6],
            backplate_inertance: v[7],
        };
        params.validate()?;
        Ok(params)
    }
}

/// Anything that yields a lumped element at a given frequency: a fixed
/// element, a closure, or a physical model such as a micro-tube.
pub trait ElementModel: Send + Sync {
    /// The element's R, M and C at `point` in air of state `air`.
    fn element_at(&self, point: FrequencyPoint, air: &AirState) -> AcousticElement;
}

/// Build a microphone from `params` and sweep it over `frequencies` in
/// standard air.
pub fn compute(params: &MicParams, frequencies: &[f64]) -> SimResult<SweepResult> {
    let air = AirState::default();
    let model = MicrophoneModel::from_params(params, &air)?;
    frequency_response::sweep(&model, frequencies, &air)
}
