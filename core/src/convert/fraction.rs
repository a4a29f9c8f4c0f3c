use std::convert::TryFrom;

use crate::convert::{mismatch, round_div, Converter, Representation, RepresentationKind};
use crate::error::{ConversionError, Result};
use crate::tempo_map::TempoMap;
use crate::time::{FractionTime, TicksTime};

/// Whole note fractions. Tempo and signature independent, only the time division matters.
pub struct FractionConverter;

pub static FRACTION: FractionConverter = FractionConverter;

fn to_fraction(ticks: TicksTime, tempo_map: &TempoMap) -> Result<Representation> {
  let ticks_per_whole_note = tempo_map.division().ticks_per_whole_note();
  FractionTime::new(u64::from(ticks), ticks_per_whole_note).map(Representation::Fraction)
}

fn from_fraction(fraction: &Representation, tempo_map: &TempoMap) -> Result<TicksTime> {
  match fraction {
    Representation::Fraction(fraction) => {
      let ticks_per_whole_note = u128::from(tempo_map.division().ticks_per_whole_note());
      let ticks = round_div(
        u128::from(fraction.get_numerator()) * ticks_per_whole_note,
        u128::from(fraction.get_denominator()),
      );
      u64::try_from(ticks)
        .map(TicksTime::new)
        .map_err(|_| {
          ConversionError::argument("fraction", format!("{} overflows the timeline", fraction))
        })
    }
    other => Err(mismatch(RepresentationKind::Fraction, other)),
  }
}

impl Converter for FractionConverter {
  fn kind(&self) -> RepresentationKind {
    RepresentationKind::Fraction
  }

  fn time_to(&self, time: TicksTime, tempo_map: &TempoMap) -> Result<Representation> {
    to_fraction(time, tempo_map)
  }

  fn time_from(&self, time: &Representation, tempo_map: &TempoMap) -> Result<TicksTime> {
    from_fraction(time, tempo_map)
  }

  fn length_to(
    &self,
    length: TicksTime,
    _start: TicksTime,
    tempo_map: &TempoMap,
  ) -> Result<Representation> {
    to_fraction(length, tempo_map)
  }

  fn length_from(
    &self,
    length: &Representation,
    _start: TicksTime,
    tempo_map: &TempoMap,
  ) -> Result<TicksTime> {
    from_fraction(length, tempo_map)
  }
}
