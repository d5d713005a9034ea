use crate::constants::{area_from_diameter, AirState, BOLTZMANN};
use crate::error::{SimError, SimResult};
use crate::ElementModel;
use num_complex::Complex64;
use std::f64::consts::{PI, SQRT_2};
use std::ops::{Add, Div, Mul};

/// A validated analysis frequency together with its angular frequency.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPoint {
    freq: f64,
    omega: f64,
}

impl FrequencyPoint {
    /// Fails unless `freq` is strictly positive and finite.
    pub fn new(freq: f64) -> SimResult<Self> {
        if !(freq.is_finite() && freq > 0.0) {
            return Err(SimError::InvalidFrequency { freq });
        }
        Ok(Self {
            freq,
            omega: 2.0 * PI * freq,
        })
    }

    /// Frequency in Hz.
    pub fn freq(&self) -> f64 {
        self.freq
    }

    /// Angular frequency in rad/s.
    pub fn omega(&self) -> f64 {
        self.omega
    }
}

/// Reactive storage of an element.
///
/// An absent compliance contributes no reactance at all (an acoustic short
/// for the spring term), not an infinite one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Compliance {
    Absent,
    Finite(f64),
}

impl Compliance {
    /// Fails unless `value` is strictly positive and finite.
    pub fn finite(value: f64) -> SimResult<Self> {
        if !(value.is_finite() && value > 0.0) {
            return Err(SimError::InvalidCompliance { value });
        }
        Ok(Compliance::Finite(value))
    }

    fn validated(self) -> SimResult<Self> {
        match self {
            Compliance::Absent => Ok(self),
            Compliance::Finite(value) => Compliance::finite(value),
        }
    }

    /// Stiffness `1/C`, zero when absent.
    pub fn stiffness(&self) -> f64 {
        match self {
            Compliance::Absent => 0.0,
            Compliance::Finite(c) => 1.0 / c,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Compliance::Absent => None,
            Compliance::Finite(c) => Some(*c),
        }
    }
}

/// A lumped two-terminal branch: resistance, inertance and compliance in
/// series.
///
/// Resistance and inertance are free to be overwritten between evaluations;
/// compliance goes through [`AcousticElement::set_compliance`] so that a
/// present compliance is always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AcousticElement {
    /// Acoustic resistance in Pa·s/m³.
    pub resistance: f64,
    /// Acoustic inertance in kg/m⁴.
    pub inertance: f64,
    compliance: Compliance,
}

impl AcousticElement {
    /// Element without compliance.
    pub fn new(resistance: f64, inertance: f64) -> Self {
        Self {
            resistance,
            inertance,
            compliance: Compliance::Absent,
        }
    }

    /// Unvalidated constructor for built-in component values.
    pub(crate) const fn from_parts(resistance: f64, inertance: f64, compliance: Compliance) -> Self {
        Self {
            resistance,
            inertance,
            compliance,
        }
    }

    pub fn with_compliance(resistance: f64, inertance: f64, compliance: f64) -> SimResult<Self> {
        Ok(Self {
            resistance,
            inertance,
            compliance: Compliance::finite(compliance)?,
        })
    }

    /// Pure compliance, e.g. an enclosed air volume or a diaphragm.
    pub fn compliant(compliance: f64) -> SimResult<Self> {
        Self::with_compliance(0.0, 0.0, compliance)
    }

    pub fn compliance(&self) -> Compliance {
        self.compliance
    }

    pub fn set_compliance(&mut self, compliance: Compliance) -> SimResult<()> {
        self.compliance = compliance.validated()?;
        Ok(())
    }

    /// Complex impedance `R + j(ωM − 1/(ωC))`.
    pub fn impedance(&self, point: FrequencyPoint) -> Complex64 {
        let omega = point.omega();
        Complex64::new(
            self.resistance,
            omega * self.inertance - self.compliance.stiffness() / omega,
        )
    }
}

impl ElementModel for AcousticElement {
    fn element_at(&self, _point: FrequencyPoint, _air: &AirState) -> AcousticElement {
        *self
    }
}

impl<F> ElementModel for F
where
    F: Fn(FrequencyPoint) -> AcousticElement + Send + Sync,
{
    fn element_at(&self, point: FrequencyPoint, _air: &AirState) -> AcousticElement {
        self(point)
    }
}

/// Two branches in parallel: `ab / (a + b)`.
pub fn parallel<T>(a: T, b: T) -> T
where
    T: Copy + Add<Output = T> + Mul<Output = T> + Div<Output = T>,
{
    a * b / (a + b)
}

/// Johnson–Nyquist pressure noise density `sqrt(4·kB·T·R)` of a resistance.
pub fn johnson_noise(resistance: f64, air: &AirState) -> f64 {
    (4.0 * BOLTZMANN * air.temperature * resistance).sqrt()
}

/// Acoustic compliance of an enclosed volume (m³): `V / (ρc²)`.
pub fn cavity_compliance(volume: f64, air: &AirState) -> f64 {
    volume / (air.density * air.speed_of_sound * air.speed_of_sound)
}

/// A cylindrical micro-tube such as an acoustic inlet or a perforation.
///
/// Resistance and inertance follow Maa's micro-perforation theory with
/// end corrections, so both depend on frequency through the viscous
/// boundary layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MicroTube {
    /// Inner diameter in metres.
    pub diameter: f64,
    /// Length in metres.
    pub length: f64,
}

impl MicroTube {
    pub fn new(diameter: f64, length: f64) -> Self {
        Self { diameter, length }
    }

    /// Perforate constant `x = d·sqrt(ωρ/4η)`.
    fn perforate_constant(&self, point: FrequencyPoint, air: &AirState) -> f64 {
        self.diameter * (point.omega() * air.density / (4.0 * air.dynamic_viscosity)).sqrt()
    }

    /// Poiseuille resistance `128ηL / (πd⁴)` of fully developed flow.
    pub fn poiseuille_resistance(&self, air: &AirState) -> f64 {
        128.0 * air.dynamic_viscosity * self.length / (PI * self.diameter.powi(4))
    }

    pub fn resistance(&self, point: FrequencyPoint, air: &AirState) -> f64 {
        let x = self.perforate_constant(point, air);
        let aspect = self.diameter / self.length;
        self.poiseuille_resistance(air) * ((1.0 + x * x / 32.0).sqrt() + SQRT_2 / 32.0 * x * aspect)
    }

    pub fn inertance(&self, point: FrequencyPoint, air: &AirState) -> f64 {
        let x = self.perforate_constant(point, air);
        let aspect = self.diameter / self.length;
        let plug = air.density * self.length / area_from_diameter(self.diameter);
        plug * (1.0 + 1.0 / (9.0 + x * x / 2.0).sqrt() + 0.85 * aspect)
    }
}

impl ElementModel for MicroTube {
    fn element_at(&self, point: FrequencyPoint, air: &AirState) -> AcousticElement {
        AcousticElement::new(self.resistance(point, air), self.inertance(point, air))
    }
}
