use crate::convert::{mismatch, Converter, Representation, RepresentationKind};
use crate::error::Result;
use crate::tempo_map::TempoMap;
use crate::time::TicksTime;

pub struct TicksConverter;

pub static TICKS: TicksConverter = TicksConverter;

impl Converter for TicksConverter {
  fn kind(&self) -> RepresentationKind {
    RepresentationKind::Ticks
  }

  fn time_to(&self, time: TicksTime, _tempo_map: &TempoMap) -> Result<Representation> {
    Ok(Representation::Ticks(time))
  }

  fn time_from(&self, time: &Representation, _tempo_map: &TempoMap) -> Result<TicksTime> {
    match time {
      Representation::Ticks(ticks) => Ok(*ticks),
      other => Err(mismatch(RepresentationKind::Ticks, other)),
    }
  }

  fn length_to(
    &self,
    length: TicksTime,
    _start: TicksTime,
    _tempo_map: &TempoMap,
  ) -> Result<Representation> {
    Ok(Representation::Ticks(length))
  }

  fn length_from(
    &self,
    length: &Representation,
    _start: TicksTime,
    tempo_map: &TempoMap,
  ) -> Result<TicksTime> {
    self.time_from(length, tempo_map)
  }
}

#[cfg(test)]
mod test {

  use super::TICKS;
  use crate::convert::{Converter, Representation};
  use crate::tempo_map::TempoMap;
  use crate::time::{MetricTime, TicksTime};

  #[test]
  pub fn identity() {
    let tempo_map = TempoMap::default();
    let time = TICKS.time_to(TicksTime::new(1234), &tempo_map).unwrap();
    assert_eq!(time, Representation::Ticks(TicksTime::new(1234)));
    assert_eq!(TICKS.time_from(&time, &tempo_map).unwrap(), TicksTime::new(1234));
    assert_eq!(
      TICKS
        .length_to(TicksTime::new(10), TicksTime::new(99), &tempo_map)
        .unwrap(),
      Representation::Ticks(TicksTime::new(10))
    );
  }

  #[test]
  pub fn rejects_other_kinds() {
    let tempo_map = TempoMap::default();
    let metric = Representation::Metric(MetricTime::new(5));
    assert!(TICKS.time_from(&metric, &tempo_map).is_err());
  }
}
