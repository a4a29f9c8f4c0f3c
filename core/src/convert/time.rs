use log::trace;

use crate::convert::{ConverterRegistry, Representation, RepresentationKind};
use crate::error::Result;
use crate::tempo_map::TempoMap;
use crate::time::TicksTime;

/// Converts absolute positions between ticks and the registered representations.
#[derive(Debug, Clone, Default)]
pub struct TimeConverter {
  registry: ConverterRegistry,
}

impl TimeConverter {
  pub fn new(registry: ConverterRegistry) -> TimeConverter {
    TimeConverter { registry }
  }

  pub fn registry(&self) -> &ConverterRegistry {
    &self.registry
  }

  pub fn to_representation(
    &self,
    time: TicksTime,
    kind: RepresentationKind,
    tempo_map: &TempoMap,
  ) -> Result<Representation> {
    let converter = self.registry.resolve(kind)?;
    let converted = converter.time_to(time, tempo_map)?;
    trace!("Time {} converted to {:?} {}", time, kind, converted);
    Ok(converted)
  }

  pub fn from_representation(
    &self,
    time: &Representation,
    tempo_map: &TempoMap,
  ) -> Result<TicksTime> {
    self.registry.resolve(time.kind())?.time_from(time, tempo_map)
  }

  /// Converts a position from one representation to another through ticks.
  pub fn convert(
    &self,
    time: &Representation,
    kind: RepresentationKind,
    tempo_map: &TempoMap,
  ) -> Result<Representation> {
    let target = self.registry.resolve(kind)?;
    let ticks = self.from_representation(time, tempo_map)?;
    target.time_to(ticks, tempo_map)
  }
}
