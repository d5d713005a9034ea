//! Error types for the simulation library.

use thiserror::Error;

/// Result type for simulation operations.
pub type SimResult<T> = Result<T, SimError>;

/// Caller-input contract violations.
///
/// Degenerate but well-formed inputs (extreme impedances, a network whose
/// nodal determinant vanishes) are not errors; they come back as non-finite
/// numbers inside `Ok`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Frequency must be strictly positive and finite.
    #[error("invalid frequency: {freq} Hz")]
    InvalidFrequency {
        /// The rejected frequency.
        freq: f64,
    },

    /// Resampling period must be strictly positive and finite.
    #[error("invalid period: {period} s")]
    InvalidPeriod {
        /// The rejected period.
        period: f64,
    },

    /// Compliance must be strictly positive and finite when present.
    #[error("invalid compliance: {value} m^3/Pa")]
    InvalidCompliance {
        /// The rejected compliance.
        value: f64,
    },

    /// An element whose compliance enters the nodal solution has none.
    #[error("{role} has no compliance")]
    MissingCompliance {
        /// Topological role of the offending element.
        role: &'static str,
    },

    /// The analysed period carries no fundamental component.
    #[error("signal has no fundamental component")]
    ZeroFundamental,

    /// No samples were supplied.
    #[error("signal is empty")]
    EmptySignal,

    /// Time and amplitude arrays disagree in length.
    #[error("length mismatch: {times} times, {amplitudes} amplitudes")]
    LengthMismatch {
        /// Number of timestamps.
        times: usize,
        /// Number of amplitudes.
        amplitudes: usize,
    },

    /// Temperature or pressure outside the physical range.
    #[error("invalid {name}: {value}")]
    InvalidCondition {
        /// Condition name.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Invalid configuration parameter.
    #[error("invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Error message.
        message: String,
    },

    /// Spectrum computation failed.
    #[error("FFT error: {0}")]
    Fft(String),
}
