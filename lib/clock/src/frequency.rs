use crate::{Error, check_positive};
use num::{ToPrimitive, rational::Ratio};
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt::Display};

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(transparent)]
/// A frequency in whatever unit the base clock was given in
///
/// Ordered with [f64::total_cmp] so it can key sorted sets and maps
pub struct Frequency(pub f64);

impl Frequency {
    pub fn get(self) -> f64 {
        self.0
    }
}

impl PartialEq for Frequency {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frequency {}

impl PartialOrd for Frequency {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frequency {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for Frequency {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl Display for Frequency {
    // Debug formatting is the shortest representation that round trips, and keeps the trailing `.0`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// One multiplier/divisor point of the clock
pub struct ClockPair {
    pub multiplier: u32,
    /// Never zero for pairs produced by this crate
    pub divisor: u32,
}

impl ClockPair {
    pub fn new(multiplier: u32, divisor: u32) -> Self {
        Self {
            multiplier,
            divisor,
        }
    }

    /// Frequency this pair produces from `base`
    ///
    /// Multiplies before dividing, which matters for the last bit of the result
    pub fn frequency(&self, base: f64) -> Frequency {
        Frequency(base * self.multiplier as f64 / self.divisor as f64)
    }

    /// Reduced M/D ratio
    ///
    /// # Panics
    ///
    /// If the divisor is zero
    pub fn ratio(&self) -> Ratio<u32> {
        Ratio::new(self.multiplier, self.divisor)
    }
}

impl Display for ClockPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.multiplier, self.divisor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Inclusive band of accepted output frequencies
pub struct Band {
    pub min: f64,
    pub max: f64,
}

impl Band {
    pub fn new(min: f64, max: f64) -> Result<Self, Error> {
        let band = Self { min, max };
        band.validate()?;
        Ok(band)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min > self.max {
            return Err(Error::InvalidBand {
                min: self.min,
                max: self.max,
            });
        }

        Ok(())
    }

    /// Both ends are accepted
    pub fn contains(&self, frequency: Frequency) -> bool {
        self.min <= frequency.0 && frequency.0 <= self.max
    }
}

impl Default for Band {
    fn default() -> Self {
        Self {
            min: 50.0,
            max: 210.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
/// Range the PLL may run in, which bounds `base * M`
pub struct VcoWindow {
    pub min: f64,
    pub max: f64,
}

impl VcoWindow {
    pub fn new(min: f64, max: f64) -> Result<Self, Error> {
        let window = Self { min, max };
        window.validate()?;
        Ok(window)
    }

    pub fn validate(&self) -> Result<(), Error> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min < 0.0 || self.min > self.max
        {
            return Err(Error::InvalidWindow {
                min: self.min,
                max: self.max,
            });
        }

        Ok(())
    }

    /// `(floor(min / base), floor(max / base))`
    pub fn multiplier_bounds(&self, base: f64) -> Result<(u32, u32), Error> {
        if !check_positive(base) {
            return Err(Error::InvalidBaseFrequency(base));
        }

        match (
            (self.min / base).floor().to_u32(),
            (self.max / base).floor().to_u32(),
        ) {
            (Some(min), Some(max)) => Ok((min, max)),
            _ => Err(Error::MultiplierOverflow { base }),
        }
    }
}

impl Default for VcoWindow {
    fn default() -> Self {
        Self {
            min: 400.0,
            max: 1000.0,
        }
    }
}
