use crate::constants::AirState;
use crate::elements::{
    cavity_compliance, johnson_noise, parallel, AcousticElement, Compliance, FrequencyPoint,
    MicroTube,
};
use crate::error::{SimError, SimResult};
use crate::{ElementModel, MicParams};
use num_complex::Complex64;

/// Topological position of an element in the microphone circuit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
    Diaphragm,
    /// Acoustic inlet (front vent).
    Inlet,
    /// Static-pressure leak through the diaphragm.
    Vent,
    /// Air flow through the backplate perforation.
    Backplate,
    FrontCavity,
    BackCavity,
}

impl ElementRole {
    pub const ALL: [ElementRole; 6] = [
        ElementRole::Diaphragm,
        ElementRole::Inlet,
        ElementRole::Vent,
        ElementRole::Backplate,
        ElementRole::FrontCavity,
        ElementRole::BackCavity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ElementRole::Diaphragm => "diaphragm",
            ElementRole::Inlet => "acoustic inlet",
            ElementRole::Vent => "vent hole",
            ElementRole::Backplate => "backplate hole",
            ElementRole::FrontCavity => "front cavity",
            ElementRole::BackCavity => "back cavity",
        }
    }
}

/// Lumped circuit of a capacitive MEMS microphone at one frequency.
///
/// ```text
///  p ── Z_inlet ──┬──────────── Z_back_cavity ──┬── Z_diaphragm + Z_backplate ──┐
///                 │                             │                               │
///           Z_front_cavity                   Z_vent                             │
///                 │                             │                               │
///  ⏚ ─────────────┴─────────────────────────────┴───────────────────────────────┘
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MicrophoneNetwork {
    pub diaphragm: AcousticElement,
    pub inlet: AcousticElement,
    pub vent: AcousticElement,
    pub backplate: AcousticElement,
    pub front_cavity: AcousticElement,
    pub back_cavity: AcousticElement,
}

impl Default for MicrophoneNetwork {
    fn default() -> Self {
        Self {
            diaphragm: AcousticElement::from_parts(0.0, 0.0, Compliance::Finite(1.84e-15)),
            inlet: AcousticElement::new(110e6, 40e3),
            vent: AcousticElement::new(275_000e6, 0.0),
            backplate: AcousticElement::new(286e6, 5.826e3),
            front_cavity: AcousticElement::from_parts(0.0, 0.0, Compliance::Finite(0.98e-15)),
            back_cavity: AcousticElement::from_parts(0.0, 0.0, Compliance::Finite(9.2e-15)),
        }
    }
}

/// Intermediate branch impedances of the nodal solution.
#[derive(Debug, Clone, Copy)]
struct NodalSolution {
    z_inlet: Complex64,
    z_vent: Complex64,
    z1: Complex64,
    z2: Complex64,
    z3: Complex64,
    zm: Complex64,
}

/// Complex response of the network at one frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NetworkResponse {
    /// Pressure-to-output transfer function.
    pub transfer: Complex64,
    /// Noise from the inlet resistance, referred to the output.
    pub noise_inlet: f64,
    /// Noise from the vent resistance.
    pub noise_vent: f64,
    /// Noise from the backplate resistance.
    pub noise_backplate: f64,
}

impl NetworkResponse {
    pub fn sensitivity(&self) -> f64 {
        self.transfer.norm()
    }

    /// Phase of the transfer function in radians.
    pub fn phase(&self) -> f64 {
        self.transfer.arg()
    }

    /// Power sum of the three uncorrelated noise sources.
    pub fn noise_total(&self) -> f64 {
        (self.noise_inlet.powi(2) + self.noise_vent.powi(2) + self.noise_backplate.powi(2)).sqrt()
    }

    /// True when the transfer function and every noise source are finite.
    pub fn is_finite(&self) -> bool {
        self.transfer.is_finite()
            && [self.noise_inlet, self.noise_vent, self.noise_backplate]
                .iter()
                .all(|v| v.is_finite())
    }
}

impl MicrophoneNetwork {
    pub fn element(&self, role: ElementRole) -> &AcousticElement {
        match role {
            ElementRole::Diaphragm => &self.diaphragm,
            ElementRole::Inlet => &self.inlet,
            ElementRole::Vent => &self.vent,
            ElementRole::Backplate => &self.backplate,
            ElementRole::FrontCavity => &self.front_cavity,
            ElementRole::BackCavity => &self.back_cavity,
        }
    }

    pub fn element_mut(&mut self, role: ElementRole) -> &mut AcousticElement {
        match role {
            ElementRole::Diaphragm => &mut self.diaphragm,
            ElementRole::Inlet => &mut self.inlet,
            ElementRole::Vent => &mut self.vent,
            ElementRole::Backplate => &mut self.backplate,
            ElementRole::FrontCavity => &mut self.front_cavity,
            ElementRole::BackCavity => &mut self.back_cavity,
        }
    }

    fn required_compliance(&self, role: ElementRole) -> SimResult<f64> {
        self.element(role)
            .compliance()
            .value()
            .ok_or(SimError::MissingCompliance { role: role.name() })
    }

    /// Reduce the circuit to the impedances the outputs are built from.
    ///
    /// The order of combination is the circuit itself and must not change.
    fn solve(&self, point: FrequencyPoint) -> SimResult<NodalSolution> {
        let c_diaphragm = self.required_compliance(ElementRole::Diaphragm)?;
        let c_back = self.required_compliance(ElementRole::BackCavity)?;

        let z_inlet = self.inlet.impedance(point);
        let z_vent = self.vent.impedance(point);

        let z0 = self.diaphragm.impedance(point) + self.backplate.impedance(point);
        let z1 = parallel(z_inlet, self.front_cavity.impedance(point));
        let z2 = z1 + self.back_cavity.impedance(point);
        let z3 = z2 + z_vent;
        let zm = Complex64::new(0.0, point.omega() * parallel(c_diaphragm, c_back))
            * (z0 * z3 + z2 * z_vent);

        Ok(NodalSolution {
            z_inlet,
            z_vent,
            z1,
            z2,
            z3,
            zm,
        })
    }

    /// Sensitivity, phase and noise at `point`.
    ///
    /// Degenerate component values can make the results non-finite; they are
    /// returned unchanged.
    pub fn response(&self, point: FrequencyPoint, air: &AirState) -> SimResult<NetworkResponse> {
        let s = self.solve(point)?;
        let transfer = s.z1 * s.z_vent / (s.z_inlet * s.zm);

        Ok(NetworkResponse {
            transfer,
            noise_inlet: transfer.norm() * johnson_noise(self.inlet.resistance, air),
            noise_vent: (s.z2 / s.zm).norm() * johnson_noise(self.vent.resistance, air),
            noise_backplate: (s.z3 / s.zm).norm() * johnson_noise(self.backplate.resistance, air),
        })
    }

    pub fn sensitivity(&self, point: FrequencyPoint, air: &AirState) -> SimResult<f64> {
        Ok(self.response(point, air)?.sensitivity())
    }

    pub fn phase(&self, point: FrequencyPoint, air: &AirState) -> SimResult<f64> {
        Ok(self.response(point, air)?.phase())
    }

    pub fn noise_total(&self, point: FrequencyPoint, air: &AirState) -> SimResult<f64> {
        Ok(self.response(point, air)?.noise_total())
    }
}

/// A microphone whose elements may depend on frequency.
///
/// Each role is backed by an [`ElementModel`]; [`MicrophoneModel::network_at`]
/// evaluates all six into a concrete [`MicrophoneNetwork`].
pub struct MicrophoneModel {
    diaphragm: Box<dyn ElementModel>,
    inlet: Box<dyn ElementModel>,
    vent: Box<dyn ElementModel>,
    backplate: Box<dyn ElementModel>,
    front_cavity: Box<dyn ElementModel>,
    back_cavity: Box<dyn ElementModel>,
}

impl MicrophoneModel {
    /// A model whose elements are the (constant) elements of `network`.
    pub fn from_network(network: MicrophoneNetwork) -> Self {
        Self {
            diaphragm: Box::new(network.diaphragm),
            inlet: Box::new(network.inlet),
            vent: Box::new(network.vent),
            backplate: Box::new(network.backplate),
            front_cavity: Box::new(network.front_cavity),
            back_cavity: Box::new(network.back_cavity),
        }
    }

    /// Build a microphone from user-facing parameters: the inlet is a
    /// micro-tube, cavities are air volumes under `air`.
    pub fn from_params(params: &MicParams, air: &AirState) -> SimResult<Self> {
        params.validate()?;

        let inlet = MicroTube::new(params.inlet_diameter * 1e-3, params.inlet_length * 1e-3);
        let front_cavity =
            AcousticElement::compliant(cavity_compliance(params.front_volume * 1e-9, air))?;
        let back_cavity =
            AcousticElement::compliant(cavity_compliance(params.back_volume * 1e-9, air))?;
        let diaphragm = AcousticElement::compliant(params.diaphragm_compliance * 1e-15)?;
        let vent = AcousticElement::new(params.vent_resistance * 1e9, 0.0);
        let backplate = AcousticElement::new(
            params.backplate_resistance * 1e6,
            params.backplate_inertance * 1e3,
        );

        Ok(Self {
            diaphragm: Box::new(diaphragm),
            inlet: Box::new(inlet),
            vent: Box::new(vent),
            backplate: Box::new(backplate),
            front_cavity: Box::new(front_cavity),
            back_cavity: Box::new(back_cavity),
        })
    }

    /// Replace the model behind `role`.
    pub fn with_element(mut self, role: ElementRole, model: Box<dyn ElementModel>) -> Self {
        let slot = match role {
            ElementRole::Diaphragm => &mut self.diaphragm,
            ElementRole::Inlet => &mut self.inlet,
            ElementRole::Vent => &mut self.vent,
            ElementRole::Backplate => &mut self.backplate,
            ElementRole::FrontCavity => &mut self.front_cavity,
            ElementRole::BackCavity => &mut self.back_cavity,
        };
        *slot = model;
        self
    }

    /// Evaluate every element at `point`.
    pub fn network_at(&self, point: FrequencyPoint, air: &AirState) -> MicrophoneNetwork {
        MicrophoneNetwork {
            diaphragm: self.diaphragm.element_at(point, air),
            inlet: self.inlet.element_at(point, air),
            vent: self.vent.element_at(point, air),
            backplate: self.backplate.element_at(point, air),
            front_cavity: self.front_cavity.element_at(point, air),
            back_cavity: self.back_cavity.element_at(point, air),
        }
    }

    pub fn response(&self, point: FrequencyPoint, air: &AirState) -> SimResult<NetworkResponse> {
        self.network_at(point, air).response(point, air)
    }
}

impl Default for MicrophoneModel {
    fn default() -> Self {
        Self::from_network(MicrophoneNetwork::default())
    }
}
