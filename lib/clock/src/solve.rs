use crate::{ClockPair, Error, Frequency, VcoWindow, check_positive};
use std::{fmt::Display, ops::Range};

#[derive(Debug, Clone, Copy, PartialEq)]
/// A chosen multiplier/divisor pair and the frequency it really runs at
pub struct ClockSetting {
    pub pair: ClockPair,
    pub frequency: Frequency,
}

impl ClockSetting {
    /// The clock registers hold each value minus one
    pub fn register_values(&self) -> Result<RegisterValues, Error> {
        let encode = |value: u32| value.checked_sub(1).and_then(|value| u8::try_from(value).ok());

        match (encode(self.pair.multiplier), encode(self.pair.divisor)) {
            (Some(multiplier), Some(divisor)) => Ok(RegisterValues {
                multiplier,
                divisor,
            }),
            _ => Err(Error::RegisterOverflow {
                multiplier: self.pair.multiplier,
                divisor: self.pair.divisor,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegisterValues {
    pub multiplier: u8,
    pub divisor: u8,
}

impl Display for RegisterValues {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.multiplier, self.divisor)
    }
}

#[derive(Debug, Clone)]
/// Finds the fastest clock not above a requested frequency
///
/// Searches a narrower space than [crate::RatioEnumerator]: the lowest multiplier is skipped and divisors stop at
/// `divisor_span * M`
pub struct ClockSolver {
    base: f64,
    divisor_span: u32,
    multipliers: Range<u32>,
}

impl ClockSolver {
    pub const DEFAULT_DIVISOR_SPAN: u32 = 20;

    pub fn new(base: f64) -> Result<Self, Error> {
        if !check_positive(base) {
            return Err(Error::InvalidBaseFrequency(base));
        }

        Self {
            base,
            divisor_span: Self::DEFAULT_DIVISOR_SPAN,
            multipliers: 0..0,
        }
        .with_window(VcoWindow::default())
    }

    pub fn with_window(mut self, window: VcoWindow) -> Result<Self, Error> {
        window.validate()?;
        let (min, max) = window.multiplier_bounds(self.base)?;

        self.multipliers = min.saturating_add(1)..max;
        self.check_divisors()?;
        Ok(self)
    }

    pub fn with_divisor_span(mut self, divisor_span: u32) -> Result<Self, Error> {
        if divisor_span == 0 {
            return Err(Error::InvalidDivisorSpan);
        }

        self.divisor_span = divisor_span;
        self.check_divisors()?;
        Ok(self)
    }

    fn check_divisors(&self) -> Result<(), Error> {
        self.multipliers
            .end
            .checked_mul(self.divisor_span)
            .map(|_| ())
            .ok_or(Error::MultiplierOverflow { base: self.base })
    }

    pub fn multiplier_range(&self) -> Range<u32> {
        self.multipliers.clone()
    }

    #[tracing::instrument(skip(self))]
    pub fn solve(&self, desired: f64) -> Result<ClockSetting, Error> {
        if !check_positive(desired) {
            return Err(Error::InvalidDesiredFrequency(desired));
        }

        let mut best: Option<ClockSetting> = None;

        for multiplier in self.multiplier_range() {
            // Divisors below this one overshoot the target
            let start = (self.base * multiplier as f64 / desired - 1.0).max(0.0) as u32;
            let limit = multiplier * self.divisor_span;

            for divisor in start.saturating_add(1)..limit {
                let pair = ClockPair::new(multiplier, divisor);
                let frequency = pair.frequency(self.base);

                if frequency.get() <= desired
                    && best.is_none_or(|best| best.frequency < frequency)
                {
                    best = Some(ClockSetting { pair, frequency });
                }
            }
        }

        let setting = best.ok_or(Error::Unreachable { desired })?;

        tracing::info!(
            "Will run at {} (M: {} D: {}, ratio {})",
            setting.frequency,
            setting.pair.multiplier,
            setting.pair.divisor,
            setting.pair.ratio()
        );

        Ok(setting)
    }
}
