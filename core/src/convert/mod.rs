pub mod fraction;
pub mod length;
pub mod metric;
pub mod musical;
pub mod registry;
pub mod ticks;
pub mod time;

use std::fmt;

use crate::error::{ConversionError, Result};
use crate::tempo_map::TempoMap;
use crate::time::{BarsTime, FractionTime, MetricTime, TicksTime};

pub use self::length::LengthConverter;
pub use self::registry::ConverterRegistry;
pub use self::time::TimeConverter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RepresentationKind {
  Ticks,
  Metric,
  Musical,
  Fraction,
}

impl RepresentationKind {
  pub const ALL: [RepresentationKind; 4] = [
    RepresentationKind::Ticks,
    RepresentationKind::Metric,
    RepresentationKind::Musical,
    RepresentationKind::Fraction,
  ];
}

/// A timeline position or length in one of the supported representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
  Ticks(TicksTime),
  Metric(MetricTime),
  Musical(BarsTime),
  Fraction(FractionTime),
}

impl Representation {
  pub fn kind(&self) -> RepresentationKind {
    match self {
      Representation::Ticks(_) => RepresentationKind::Ticks,
      Representation::Metric(_) => RepresentationKind::Metric,
      Representation::Musical(_) => RepresentationKind::Musical,
      Representation::Fraction(_) => RepresentationKind::Fraction,
    }
  }
}

impl fmt::Display for Representation {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Representation::Ticks(ticks) => write!(f, "{}", ticks),
      Representation::Metric(metric) => write!(f, "{}", metric),
      Representation::Musical(bars) => write!(f, "{}", bars),
      Representation::Fraction(fraction) => write!(f, "{}", fraction),
    }
  }
}

impl From<TicksTime> for Representation {
  fn from(item: TicksTime) -> Self {
    Representation::Ticks(item)
  }
}

impl From<MetricTime> for Representation {
  fn from(item: MetricTime) -> Self {
    Representation::Metric(item)
  }
}

impl From<BarsTime> for Representation {
  fn from(item: BarsTime) -> Self {
    Representation::Musical(item)
  }
}

impl From<FractionTime> for Representation {
  fn from(item: FractionTime) -> Self {
    Representation::Fraction(item)
  }
}

/// Conversion strategy between ticks and a single representation kind.
///
/// Implementations hold no state; every call acts only on its arguments, so one instance can
/// serve any number of threads.
pub trait Converter: Send + Sync {
  fn kind(&self) -> RepresentationKind;

  fn time_to(&self, time: TicksTime, tempo_map: &TempoMap) -> Result<Representation>;

  fn time_from(&self, time: &Representation, tempo_map: &TempoMap) -> Result<TicksTime>;

  fn length_to(
    &self,
    length: TicksTime,
    start: TicksTime,
    tempo_map: &TempoMap,
  ) -> Result<Representation>;

  fn length_from(
    &self,
    length: &Representation,
    start: TicksTime,
    tempo_map: &TempoMap,
  ) -> Result<TicksTime>;
}

pub(crate) fn end_of(start: TicksTime, length: TicksTime) -> Result<TicksTime> {
  start.checked_add(length).ok_or_else(|| {
    ConversionError::argument(
      "length",
      format!("{} ticks from {} overflows the timeline", length, start),
    )
  })
}

/// Nearest integer of `numerator / denominator`, halves rounded up.
pub(crate) fn round_div(numerator: u128, denominator: u128) -> u128 {
  (2 * numerator + denominator) / (2 * denominator)
}

pub(crate) fn mismatch(expected: RepresentationKind, found: &Representation) -> ConversionError {
  ConversionError::malformed(format!(
    "expected a {:?} value, found {:?}",
    expected,
    found.kind()
  ))
}
