use crate::error::{SimError, SimResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boltzmann constant (J/K).
pub const BOLTZMANN: f64 = 1.380_648_53e-23;
/// Avogadro constant (1/mol).
pub const AVOGADRO: f64 = 6.022_140_857e23;
/// Molar gas constant (J/(mol·K)).
pub const GAS_CONSTANT: f64 = BOLTZMANN * AVOGADRO;
/// Ratio of specific heats for air.
pub const GAMMA: f64 = 1.4;
/// Molar mass of dry air (kg/mol).
pub const MOLAR_MASS: f64 = 0.028_965_2;
/// Reference sound pressure for SPL (Pa).
pub const REFERENCE_PRESSURE: f64 = 20e-6;

/// Standard laboratory temperature (K).
pub const STANDARD_TEMPERATURE: f64 = 293.15;
/// Standard atmospheric pressure (Pa).
pub const STANDARD_PRESSURE: f64 = 101_325.0;

/// Specific heat at constant volume (J/(kg·K)).
pub fn specific_heat_cv() -> f64 {
    GAS_CONSTANT / (GAMMA - 1.0) / MOLAR_MASS
}

/// Specific heat at constant pressure (J/(kg·K)).
pub fn specific_heat_cp() -> f64 {
    GAMMA * specific_heat_cv()
}

/// Ambient conditions the air state is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AirConditions {
    /// Absolute temperature in K.
    pub temperature: f64,
    /// Static pressure in Pa.
    pub pressure: f64,
}

impl AirConditions {
    pub fn new(temperature: f64, pressure: f64) -> Self {
        Self {
            temperature,
            pressure,
        }
    }

    /// Conditions at `celsius` °C and standard pressure.
    pub fn from_celsius(celsius: f64) -> Self {
        Self::new(celsius + 273.15, STANDARD_PRESSURE)
    }
}

impl Default for AirConditions {
    fn default() -> Self {
        Self::new(STANDARD_TEMPERATURE, STANDARD_PRESSURE)
    }
}

/// Thermodynamic and transport properties of air under fixed conditions.
///
/// Ideal-gas relations for density and sound speed; empirical polynomial
/// fits for thermal conductivity and viscosity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AirState {
    /// Absolute temperature in K.
    pub temperature: f64,
    /// Static pressure in Pa.
    pub pressure: f64,
    /// Density in kg/m³.
    pub density: f64,
    /// Adiabatic bulk modulus γ·p in Pa.
    pub bulk_modulus: f64,
    /// Speed of sound in m/s.
    pub speed_of_sound: f64,
    /// Characteristic impedance ρc in Pa·s/m.
    pub characteristic_impedance: f64,
    /// Thermal conductivity in W/(m·K).
    pub thermal_conductivity: f64,
    /// Thermal diffusivity in m²/s.
    pub thermal_diffusivity: f64,
    /// Dynamic viscosity in Pa·s.
    pub dynamic_viscosity: f64,
    /// Kinematic viscosity in m²/s.
    pub kinematic_viscosity: f64,
}

impl AirState {
    pub fn new(conditions: AirConditions) -> SimResult<Self> {
        let AirConditions {
            temperature: t,
            pressure: p,
        } = conditions;
        if !(t.is_finite() && t > 0.0) {
            return Err(SimError::InvalidCondition {
                name: "temperature",
                value: t,
            });
        }
        if !(p.is_finite() && p > 0.0) {
            return Err(SimError::InvalidCondition {
                name: "pressure",
                value: p,
            });
        }

        let state = Self::derive(t, p);
        log::debug!(
            "air state at {t} K / {p} Pa: rho = {:.4}, c = {:.2}",
            state.density,
            state.speed_of_sound
        );
        Ok(state)
    }

    fn derive(t: f64, p: f64) -> Self {
        let density = p * MOLAR_MASS / GAS_CONSTANT / t;
        let thermal_conductivity =
            -0.000_393_33 + 0.000_101_84 * t - 4.8574e-8 * t.powi(2) + 1.5207e-11 * t.powi(3);
        let dynamic_viscosity = 2.791e-7 * t.powf(0.7355);
        let speed_of_sound = (GAMMA * GAS_CONSTANT * t / MOLAR_MASS).sqrt();

        Self {
            temperature: t,
            pressure: p,
            density,
            bulk_modulus: GAMMA * p,
            speed_of_sound,
            characteristic_impedance: density * speed_of_sound,
            thermal_conductivity,
            thermal_diffusivity: thermal_conductivity / density / specific_heat_cp(),
            dynamic_viscosity,
            kinematic_viscosity: dynamic_viscosity / density,
        }
    }
}

impl Default for AirState {
    fn default() -> Self {
        Self::derive(STANDARD_TEMPERATURE, STANDARD_PRESSURE)
    }
}

impl fmt::Display for AirState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "temperature:              {} K", self.temperature)?;
        writeln!(f, "pressure:                 {} Pa", self.pressure)?;
        writeln!(f, "density:                  {:.3} kg/m3", self.density)?;
        writeln!(
            f,
            "thermal conductivity:     {:.3e} W/(m K)",
            self.thermal_conductivity
        )?;
        writeln!(f, "dynamic viscosity:        {:.3e} Pa s", self.dynamic_viscosity)?;
        writeln!(f, "speed of sound:           {:.1} m/s", self.speed_of_sound)?;
        write!(
            f,
            "characteristic impedance: {:.1} N s/m3",
            self.characteristic_impedance
        )
    }
}

/// Cross-sectional area from diameter (both in metres).
pub fn area_from_diameter(diameter: f64) -> f64 {
    std::f64::consts::PI * (diameter / 2.0).powi(2)
}
