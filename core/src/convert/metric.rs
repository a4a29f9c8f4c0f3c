use std::convert::TryFrom;

use log::trace;

use crate::convert::{end_of, mismatch, round_div, Converter, Representation, RepresentationKind};
use crate::error::{ConversionError, Result};
use crate::tempo_map::TempoMap;
use crate::time::{MetricTime, TicksTime};

/// Real time conversions.
///
/// Elapsed time is integrated exactly as the sum of `ticks × µs per quarter note` over the
/// segments from the origin and is divided by the time division once, rounding to the nearest
/// microsecond. The inverse walks the same segments, so positions round trip as long as one
/// tick lasts at least a microsecond.
pub struct MetricConverter;

pub static METRIC: MetricConverter = MetricConverter;

/// Time elapsed from the origin up to `tick`, in tick-microseconds per quarter note.
fn weight_at(tempo_map: &TempoMap, tick: TicksTime) -> u128 {
  tempo_map
    .segments(TicksTime::zero(), tick)
    .filter_map(|segment| segment.span().map(|span| u128::from(span) * u128::from(segment.tempo)))
    .sum()
}

fn metric_at(tempo_map: &TempoMap, tick: TicksTime) -> Result<MetricTime> {
  let weight = weight_at(tempo_map, tick);
  let division = u128::from(tempo_map.division().ticks_per_quarter_note());
  to_metric(round_div(weight, division))
}

fn to_metric(micros: u128) -> Result<MetricTime> {
  u64::try_from(micros)
    .map(MetricTime::new)
    .map_err(|_| ConversionError::argument("time", "the metric time overflows 64 bits"))
}

/// Walks forward from `from`, whose integrated weight is `from_weight`, to the tick closest to
/// `target` microseconds.
fn tick_at(
  tempo_map: &TempoMap,
  from: TicksTime,
  from_weight: u128,
  target: MetricTime,
) -> Result<TicksTime> {
  let division = u128::from(tempo_map.division().ticks_per_quarter_note());
  let target_weight = u128::from(target.micros()) * division;
  let mut weight = from_weight;
  let mut position = from;

  for segment in tempo_map.segments_from(from) {
    let tempo = u128::from(segment.tempo);
    position = segment.start;
    if let Some(span) = segment.span() {
      let segment_weight = u128::from(span) * tempo;
      if target_weight >= weight + segment_weight {
        weight += segment_weight;
        continue;
      }
    }
    let offset = round_div(target_weight.saturating_sub(weight), tempo);
    trace!(
      "Metric {} resolved in segment starting at {} with offset {}",
      target.micros(),
      segment.start,
      offset
    );
    return u64::try_from(offset)
      .ok()
      .and_then(|offset| position.checked_add(TicksTime::new(offset)))
      .ok_or_else(|| ConversionError::argument("time", "the resolved tick overflows 64 bits"));
  }

  Ok(position)
}

impl Converter for MetricConverter {
  fn kind(&self) -> RepresentationKind {
    RepresentationKind::Metric
  }

  fn time_to(&self, time: TicksTime, tempo_map: &TempoMap) -> Result<Representation> {
    metric_at(tempo_map, time).map(Representation::Metric)
  }

  fn time_from(&self, time: &Representation, tempo_map: &TempoMap) -> Result<TicksTime> {
    match time {
      Representation::Metric(metric) => tick_at(tempo_map, TicksTime::zero(), 0, *metric),
      other => Err(mismatch(RepresentationKind::Metric, other)),
    }
  }

  fn length_to(
    &self,
    length: TicksTime,
    start: TicksTime,
    tempo_map: &TempoMap,
  ) -> Result<Representation> {
    let end = end_of(start, length)?;
    let start_metric = metric_at(tempo_map, start)?;
    let end_metric = metric_at(tempo_map, end)?;
    Ok(Representation::Metric(end_metric - start_metric))
  }

  fn length_from(
    &self,
    length: &Representation,
    start: TicksTime,
    tempo_map: &TempoMap,
  ) -> Result<TicksTime> {
    match length {
      Representation::Metric(metric) => {
        let start_weight = weight_at(tempo_map, start);
        let division = u128::from(tempo_map.division().ticks_per_quarter_note());
        let start_metric = to_metric(round_div(start_weight, division))?;
        let end_metric = start_metric
          .checked_add(*metric)
          .ok_or_else(|| ConversionError::argument("length", "the metric end overflows 64 bits"))?;
        let end = tick_at(tempo_map, start, start_weight, end_metric)?;
        Ok(end - start)
      }
      other => Err(mismatch(RepresentationKind::Metric, other)),
    }
  }
}

#[cfg(test)]
mod test {

  use super::METRIC;
  use crate::convert::{Converter, Representation};
  use crate::tempo_map::TempoMap;
  use crate::time::{MetricTime, Tempo, TicksTime};

  fn ticks(value: u64) -> TicksTime {
    TicksTime::new(value)
  }

  fn metric(micros: u64) -> Representation {
    Representation::Metric(MetricTime::new(micros))
  }

  fn changing_map() -> TempoMap {
    let mut tempo_map = TempoMap::default();
    tempo_map.set_tempo(ticks(480), Tempo::new(1_000_000).unwrap()).unwrap();
    tempo_map.set_tempo(ticks(1440), Tempo::new(250_000).unwrap()).unwrap();
    tempo_map.set_tempo(ticks(2000), Tempo::new(777_777).unwrap()).unwrap();
    tempo_map
  }

  #[test]
  pub fn default_tempo_quarter_note_is_half_a_second() {
    let tempo_map = TempoMap::default();
    assert_eq!(
      METRIC.length_to(ticks(480), ticks(0), &tempo_map).unwrap(),
      metric(500_000)
    );
    assert_eq!(METRIC.time_to(ticks(480), &tempo_map).unwrap(), metric(500_000));
  }

  #[test]
  pub fn integrates_across_tempo_changes() {
    let tempo_map = changing_map();
    // 1 quarter at 0.5s, 2 quarters at 1s, 1 quarter at 0.25s
    assert_eq!(
      METRIC.time_to(ticks(1920), &tempo_map).unwrap(),
      metric(500_000 + 2_000_000 + 250_000)
    );
    // the last tempo extrapolates forever
    assert_eq!(
      METRIC.length_to(ticks(4800), ticks(2000), &tempo_map).unwrap(),
      metric(7_777_770)
    );
  }

  #[test]
  pub fn positions_round_trip() {
    let tempo_map = changing_map();
    for tick in (0..5000).step_by(7) {
      let time = METRIC.time_to(ticks(tick), &tempo_map).unwrap();
      assert_eq!(METRIC.time_from(&time, &tempo_map).unwrap(), ticks(tick));
    }
  }

  #[test]
  pub fn ticks_shorter_than_a_microsecond_collapse() {
    let mut tempo_map = TempoMap::default();
    tempo_map.set_tempo(ticks(0), Tempo::new(480).unwrap()).unwrap();
    for tick in 0..2000 {
      let time = METRIC.time_to(ticks(tick), &tempo_map).unwrap();
      assert_eq!(time, metric(tick));
      assert_eq!(METRIC.time_from(&time, &tempo_map).unwrap(), ticks(tick));
    }

    tempo_map.set_tempo(ticks(0), Tempo::new(100).unwrap()).unwrap();
    let time = METRIC.time_to(ticks(1), &tempo_map).unwrap();
    assert_eq!(time, metric(0));
    assert_eq!(METRIC.time_from(&time, &tempo_map).unwrap(), ticks(0));
  }

  #[test]
  pub fn conversion_is_monotonic() {
    let tempo_map = changing_map();
    let mut previous = MetricTime::zero();
    for tick in 0..3000 {
      match METRIC.time_to(ticks(tick), &tempo_map).unwrap() {
        Representation::Metric(current) => {
          assert!(previous <= current);
          previous = current;
        }
        other => panic!("unexpected {:?}", other),
      }
    }
  }

  #[test]
  pub fn lengths_are_additive() {
    let tempo_map = changing_map();
    let start = ticks(300);
    for (a, b) in [(0u64, 10u64), (150, 1200), (1000, 1000), (2999, 1)].iter() {
      let whole = METRIC.length_to(ticks(a + b), start, &tempo_map).unwrap();
      let first = METRIC.length_to(ticks(*a), start, &tempo_map).unwrap();
      let second = METRIC.length_to(ticks(*b), start + ticks(*a), &tempo_map).unwrap();
      match (whole, first, second) {
        (
          Representation::Metric(whole),
          Representation::Metric(first),
          Representation::Metric(second),
        ) => assert_eq!(whole, first + second),
        other => panic!("unexpected {:?}", other),
      }
    }
  }

  #[test]
  pub fn lengths_round_trip_from_any_start() {
    let tempo_map = changing_map();
    for start in [0u64, 100, 479, 480, 1500, 2600].iter() {
      for length in [0u64, 1, 333, 960, 2500].iter() {
        let metric_length = METRIC.length_to(ticks(*length), ticks(*start), &tempo_map).unwrap();
        assert_eq!(
          METRIC
            .length_from(&metric_length, ticks(*start), &tempo_map)
            .unwrap(),
          ticks(*length)
        );
      }
    }
  }

  #[test]
  pub fn resolves_between_ticks_to_nearest() {
    let tempo_map = TempoMap::default();
    // one tick lasts 1041.67µs
    assert_eq!(METRIC.time_from(&metric(1_500), &tempo_map).unwrap(), ticks(1));
    assert_eq!(METRIC.time_from(&metric(1_600), &tempo_map).unwrap(), ticks(2));
  }

  #[test]
  pub fn rejects_overflowing_length() {
    let tempo_map = TempoMap::default();
    assert!(METRIC
      .length_to(ticks(2), ticks(u64::max_value()), &tempo_map)
      .is_err());
  }
}
