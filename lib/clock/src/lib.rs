//! Allfreqs Clock
//!
//! Frequency arithmetic for clocks built from a base frequency, an integer multiplier and an integer divisor

/// Enumerates every in band frequency a clock can produce
pub mod enumerate;
/// Frequency and multiplier/divisor types
pub mod frequency;
/// Picks the best multiplier/divisor pair for a single target frequency
pub mod solve;

pub use enumerate::RatioEnumerator;
pub use frequency::{Band, ClockPair, Frequency, VcoWindow};
pub use solve::{ClockSetting, ClockSolver, RegisterValues};

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
/// Errors produced when configuring or solving a clock
pub enum Error {
    #[error("Base frequency must be positive and finite, got {0}")]
    InvalidBaseFrequency(f64),
    #[error("Desired frequency must be positive and finite, got {0}")]
    InvalidDesiredFrequency(f64),
    #[error("Frequency band {min}..={max} is invalid")]
    /// Band bounds must be finite and ordered
    InvalidBand { min: f64, max: f64 },
    #[error("VCO window {min}..{max} is invalid")]
    /// Window bounds must be finite, non negative and ordered
    InvalidWindow { min: f64, max: f64 },
    #[error("Base frequency {base} needs multipliers or divisors that do not fit in 32 bits")]
    MultiplierOverflow { base: f64 },
    #[error("Divisor span must be at least 1")]
    InvalidDivisorSpan,
    #[error("No multiplier/divisor pair reaches {desired} or below")]
    Unreachable { desired: f64 },
    #[error("Multiplier {multiplier} or divisor {divisor} does not fit in a clock register")]
    RegisterOverflow { multiplier: u32, divisor: u32 },
}

/// Checks a frequency that the arithmetic will divide by or scale with
pub(crate) fn check_positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
