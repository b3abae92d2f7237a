use crate::{Band, ClockPair, Error, Frequency, VcoWindow, check_positive};
use std::{
    collections::{BTreeMap, BTreeSet},
    ops::Range,
};

#[derive(Debug, Clone)]
/// Walks every multiplier/divisor pair a clock allows and keeps the frequencies that land in a band
///
/// Multipliers cover `[floor(window.min / base), floor(window.max / base))` and each multiplier `M` is
/// paired with divisors in `[1, divisor_span * M)`
pub struct RatioEnumerator {
    base: f64,
    window: VcoWindow,
    band: Band,
    divisor_span: u32,
    multipliers: Range<u32>,
}

impl RatioEnumerator {
    pub const DEFAULT_DIVISOR_SPAN: u32 = 30;

    pub fn new(base: f64) -> Result<Self, Error> {
        if !check_positive(base) {
            return Err(Error::InvalidBaseFrequency(base));
        }

        Self {
            base,
            window: VcoWindow::default(),
            band: Band::default(),
            divisor_span: Self::DEFAULT_DIVISOR_SPAN,
            multipliers: 0..0,
        }
        .with_window(VcoWindow::default())
    }

    pub fn with_window(mut self, window: VcoWindow) -> Result<Self, Error> {
        window.validate()?;
        let (min, max) = window.multiplier_bounds(self.base)?;

        self.window = window;
        self.multipliers = min..max;
        self.check_divisors()?;
        Ok(self)
    }

    pub fn with_band(mut self, band: Band) -> Result<Self, Error> {
        band.validate()?;

        self.band = band;
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

    /// The largest divisor bound, `divisor_span * M`, must fit as well
    fn check_divisors(&self) -> Result<(), Error> {
        self.multipliers
            .end
            .checked_mul(self.divisor_span)
            .map(|_| ())
            .ok_or(Error::MultiplierOverflow { base: self.base })
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    pub fn window(&self) -> VcoWindow {
        self.window
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub fn divisor_span(&self) -> u32 {
        self.divisor_span
    }

    /// Multipliers visited by the outer loop, possibly empty
    pub fn multiplier_range(&self) -> Range<u32> {
        self.multipliers.clone()
    }

    /// Divisors visited for `multiplier`, starting at 1
    pub fn divisor_range(&self, multiplier: u32) -> Range<u32> {
        1..multiplier * self.divisor_span
    }

    /// Every in band point in loop order, duplicates included
    pub fn candidates(&self) -> impl Iterator<Item = (ClockPair, Frequency)> + '_ {
        self.multiplier_range()
            .flat_map(move |multiplier| {
                self.divisor_range(multiplier)
                    .map(move |divisor| ClockPair::new(multiplier, divisor))
            })
            .map(move |pair| (pair, pair.frequency(self.base)))
            .filter(move |(_, frequency)| self.band.contains(*frequency))
    }

    /// Unique in band frequencies, ascending
    pub fn frequencies(&self) -> Vec<Frequency> {
        self.log_range();

        let frequencies: BTreeSet<_> = self
            .candidates()
            .map(|(_, frequency)| frequency)
            .collect();

        tracing::debug!(
            "Found {} unique frequencies in {}..={}",
            frequencies.len(),
            self.band.min,
            self.band.max
        );

        frequencies.into_iter().collect()
    }

    /// Unique in band frequencies, each with every pair producing it
    pub fn frequencies_with_pairs(&self) -> BTreeMap<Frequency, Vec<ClockPair>> {
        self.log_range();

        let mut frequencies: BTreeMap<_, Vec<_>> = BTreeMap::new();

        for (pair, frequency) in self.candidates() {
            frequencies.entry(frequency).or_default().push(pair);
        }

        frequencies
    }

    fn log_range(&self) {
        if self.multipliers.is_empty() {
            tracing::debug!(
                "Multiplier range {:?} is empty for a base of {}, nothing to enumerate",
                self.multipliers,
                self.base
            );
        } else {
            tracing::info!(
                "Enumerating multipliers {:?} over a base of {} with divisors up to {}x",
                self.multipliers,
                self.base,
                self.divisor_span
            );
        }
    }
}
