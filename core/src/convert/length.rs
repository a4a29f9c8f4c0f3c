use log::trace;

use crate::convert::{ConverterRegistry, Representation, RepresentationKind, TimeConverter};
use crate::error::Result;
use crate::tempo_map::TempoMap;
use crate::time::TicksTime;

/// Converts lengths anchored at a start position.
///
/// Metric lengths are the difference between the real times of both ends. Musical lengths lay
/// bars out from the start, so the same number of ticks can span a different number of bars
/// depending on where it begins.
#[derive(Debug, Clone, Default)]
pub struct LengthConverter {
  time: TimeConverter,
}

impl LengthConverter {
  pub fn new(registry: ConverterRegistry) -> LengthConverter {
    LengthConverter {
      time: TimeConverter::new(registry),
    }
  }

  pub fn registry(&self) -> &ConverterRegistry {
    self.time.registry()
  }

  pub fn to_representation(
    &self,
    length: TicksTime,
    start: TicksTime,
    kind: RepresentationKind,
    tempo_map: &TempoMap,
  ) -> Result<Representation> {
    let converter = self.registry().resolve(kind)?;
    let converted = converter.length_to(length, start, tempo_map)?;
    trace!("Length {} at {} converted to {:?} {}", length, start, kind, converted);
    Ok(converted)
  }

  pub fn from_representation(
    &self,
    length: &Representation,
    start: TicksTime,
    tempo_map: &TempoMap,
  ) -> Result<TicksTime> {
    self
      .registry()
      .resolve(length.kind())?
      .length_from(length, start, tempo_map)
  }

  /// As `to_representation` with the start given in any representation.
  pub fn to_representation_at(
    &self,
    length: TicksTime,
    start: &Representation,
    kind: RepresentationKind,
    tempo_map: &TempoMap,
  ) -> Result<Representation> {
    let start = self.time.from_representation(start, tempo_map)?;
    self.to_representation(length, start, kind, tempo_map)
  }

  /// As `from_representation` with the start given in any representation.
  pub fn from_representation_at(
    &self,
    length: &Representation,
    start: &Representation,
    tempo_map: &TempoMap,
  ) -> Result<TicksTime> {
    let start = self.time.from_representation(start, tempo_map)?;
    self.from_representation(length, start, tempo_map)
  }

  /// Converts a length from one representation to another through ticks.
  pub fn convert(
    &self,
    length: &Representation,
    start: TicksTime,
    kind: RepresentationKind,
    tempo_map: &TempoMap,
  ) -> Result<Representation> {
    self.registry().resolve(kind)?;
    let ticks = self.from_representation(length, start, tempo_map)?;
    self.to_representation(ticks, start, kind, tempo_map)
  }
}
