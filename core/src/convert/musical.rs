use std::convert::TryFrom;

use crate::convert::{end_of, mismatch, Converter, Representation, RepresentationKind};
use crate::error::{ConversionError, Result};
use crate::tempo_map::TempoMap;
use crate::time::{BarsTime, Signature, TicksTime};

/// Bars, beats and ticks conversions.
///
/// Bars are laid out one after another from an anchor tick; a bar takes the length of the
/// signature in effect at the tick where it starts, so a signature change falling inside a bar
/// applies from the following bar. Positions are lengths anchored at the origin.
pub struct MusicalConverter;

pub static MUSICAL: MusicalConverter = MusicalConverter;

fn div_ceil(value: u64, divisor: u64) -> u64 {
  value / divisor + if value % divisor == 0 { 0 } else { 1 }
}

fn overflow() -> ConversionError {
  ConversionError::argument("time", "the musical position overflows the timeline")
}

/// Bars of `[start, end)` that complete before `end`, with the start tick and signature of the
/// bar in progress at `end`.
fn complete_bars(
  tempo_map: &TempoMap,
  start: TicksTime,
  end: TicksTime,
) -> (u64, TicksTime, Signature) {
  let division = tempo_map.division();
  let mut position = start;
  let mut bars = 0;

  for segment in tempo_map.segments_from(start) {
    if !segment.contains(position) {
      continue;
    }
    let ticks_per_bar = segment.signature.ticks_per_bar(division);
    let fitting = u64::from(end - position) / ticks_per_bar;
    let starting_here = segment
      .end
      .map_or(u64::max_value(), |segment_end| {
        div_ceil(u64::from(segment_end - position), ticks_per_bar)
      });
    let count = fitting.min(starting_here);
    position += TicksTime::new(count * ticks_per_bar);
    bars += count;
    if count < starting_here {
      return (bars, position, segment.signature);
    }
  }

  (bars, position, tempo_map.signature_at(position))
}

fn to_bars(tempo_map: &TempoMap, start: TicksTime, end: TicksTime) -> Result<BarsTime> {
  let (bars, bar_start, signature) = complete_bars(tempo_map, start, end);
  let ticks_per_beat = signature.ticks_per_beat(tempo_map.division());
  let remaining = u64::from(end - bar_start);
  let beats = u32::try_from(remaining / ticks_per_beat).map_err(|_| overflow())?;
  let ticks = u32::try_from(remaining % ticks_per_beat).map_err(|_| overflow())?;
  Ok(BarsTime::new(bars, beats, ticks))
}

/// Tick where `bars` bars laid out from `start` end, plus the signature of the following bar.
fn skip_bars(tempo_map: &TempoMap, start: TicksTime, bars: u64) -> Result<(TicksTime, Signature)> {
  let division = tempo_map.division();
  let mut position = start;
  let mut remaining = bars;

  for segment in tempo_map.segments_from(start) {
    if !segment.contains(position) {
      continue;
    }
    let ticks_per_bar = segment.signature.ticks_per_bar(division);
    let starting_here = segment
      .end
      .map_or(u64::max_value(), |segment_end| {
        div_ceil(u64::from(segment_end - position), ticks_per_bar)
      });
    let count = remaining.min(starting_here);
    let skipped = count.checked_mul(ticks_per_bar).ok_or_else(overflow)?;
    position = position
      .checked_add(TicksTime::new(skipped))
      .ok_or_else(overflow)?;
    remaining -= count;
    if remaining == 0 && count < starting_here {
      return Ok((position, segment.signature));
    }
  }

  Ok((position, tempo_map.signature_at(position)))
}

fn from_bars(tempo_map: &TempoMap, start: TicksTime, time: &BarsTime) -> Result<TicksTime> {
  let (bar_start, signature) = skip_bars(tempo_map, start, time.get_bars())?;
  let ticks_per_beat = signature.ticks_per_beat(tempo_map.division());

  if u64::from(time.get_beats()) >= u64::from(signature.get_num_beats()) {
    return Err(ConversionError::malformed(format!(
      "beat {} does not exist in a {} bar",
      time.get_beats(),
      signature
    )));
  }
  if u64::from(time.get_ticks()) >= ticks_per_beat {
    return Err(ConversionError::malformed(format!(
      "tick {} exceeds the {} ticks of a {} beat",
      time.get_ticks(),
      ticks_per_beat,
      signature
    )));
  }

  let offset = u64::from(time.get_beats()) * ticks_per_beat + u64::from(time.get_ticks());
  bar_start
    .checked_add(TicksTime::new(offset))
    .ok_or_else(overflow)
}

impl Converter for MusicalConverter {
  fn kind(&self) -> RepresentationKind {
    RepresentationKind::Musical
  }

  fn time_to(&self, time: TicksTime, tempo_map: &TempoMap) -> Result<Representation> {
    to_bars(tempo_map, TicksTime::zero(), time).map(Representation::Musical)
  }

  fn time_from(&self, time: &Representation, tempo_map: &TempoMap) -> Result<TicksTime> {
    match time {
      Representation::Musical(bars) => from_bars(tempo_map, TicksTime::zero(), bars),
      other => Err(mismatch(RepresentationKind::Musical, other)),
    }
  }

  fn length_to(
    &self,
    length: TicksTime,
    start: TicksTime,
    tempo_map: &TempoMap,
  ) -> Result<Representation> {
    let end = end_of(start, length)?;
    to_bars(tempo_map, start, end).map(Representation::Musical)
  }

  fn length_from(
    &self,
    length: &Representation,
    start: TicksTime,
    tempo_map: &TempoMap,
  ) -> Result<TicksTime> {
    match length {
      Representation::Musical(bars) => Ok(from_bars(tempo_map, start, bars)? - start),
      other => Err(mismatch(RepresentationKind::Musical, other)),
    }
  }
}

#[cfg(test)]
mod test {

  use super::MUSICAL;
  use crate::convert::{Converter, Representation};
  use crate::error::ConversionError;
  use crate::tempo_map::TempoMap;
  use crate::time::{BarsTime, Signature, Tempo, TicksTime};

  fn ticks(value: u64) -> TicksTime {
    TicksTime::new(value)
  }

  fn bars(bars: u64, beats: u32, ticks: u32) -> Representation {
    Representation::Musical(BarsTime::new(bars, beats, ticks))
  }

  /// 4/4 for two bars, 3/4 from tick 3840, 6/8 from tick 5280.
  fn changing_map() -> TempoMap {
    let mut tempo_map = TempoMap::default();
    tempo_map
      .set_signature(ticks(3840), Signature::new(3, 4).unwrap())
      .unwrap();
    tempo_map
      .set_signature(ticks(5280), Signature::new(6, 8).unwrap())
      .unwrap();
    tempo_map.set_tempo(ticks(1000), Tempo::new(300_000).unwrap()).unwrap();
    tempo_map
  }

  #[test]
  pub fn positions_in_default_signature() {
    let tempo_map = TempoMap::default();
    assert_eq!(MUSICAL.time_to(ticks(0), &tempo_map).unwrap(), bars(0, 0, 0));
    assert_eq!(
      MUSICAL
        .time_to(ticks(1920 * 3 + 480 * 2 + 17), &tempo_map)
        .unwrap(),
      bars(3, 2, 17)
    );
  }

  #[test]
  pub fn positions_across_signature_changes() {
    let tempo_map = changing_map();
    assert_eq!(MUSICAL.time_to(ticks(3840), &tempo_map).unwrap(), bars(2, 0, 0));
    assert_eq!(MUSICAL.time_to(ticks(3840 + 1440 + 5), &tempo_map).unwrap(), bars(3, 0, 5));
    // a 6/8 bar is 1440 ticks of 240 tick beats
    assert_eq!(
      MUSICAL
        .time_to(ticks(5280 + 1440 * 2 + 240 * 5 + 239), &tempo_map)
        .unwrap(),
      bars(5, 5, 239)
    );
  }

  #[test]
  pub fn signature_change_inside_a_bar_applies_to_the_next_bar() {
    let mut tempo_map = TempoMap::default();
    tempo_map
      .set_signature(ticks(960), Signature::new(3, 4).unwrap())
      .unwrap();
    // the first 4/4 bar runs until 1920, then 3/4 bars of 1440 ticks follow
    assert_eq!(MUSICAL.time_to(ticks(1919), &tempo_map).unwrap(), bars(0, 3, 479));
    assert_eq!(MUSICAL.time_to(ticks(1920), &tempo_map).unwrap(), bars(1, 0, 0));
    assert_eq!(MUSICAL.time_to(ticks(3360), &tempo_map).unwrap(), bars(2, 0, 0));
    assert_eq!(MUSICAL.time_from(&bars(2, 0, 0), &tempo_map).unwrap(), ticks(3360));
  }

  #[test]
  pub fn positions_round_trip() {
    let tempo_map = changing_map();
    for tick in (0..12_000).step_by(37) {
      let time = MUSICAL.time_to(ticks(tick), &tempo_map).unwrap();
      assert_eq!(MUSICAL.time_from(&time, &tempo_map).unwrap(), ticks(tick));
    }
  }

  #[test]
  pub fn lengths_are_anchored_at_start() {
    let tempo_map = changing_map();
    // from the last 4/4 bar into the 3/4 section
    let length = MUSICAL
      .length_to(ticks(1920 + 1440 + 100), ticks(1920), &tempo_map)
      .unwrap();
    assert_eq!(length, bars(2, 0, 100));
    assert_eq!(
      MUSICAL.length_from(&length, ticks(1920), &tempo_map).unwrap(),
      ticks(1920 + 1440 + 100)
    );
  }

  #[test]
  pub fn lengths_round_trip_from_any_start() {
    let tempo_map = changing_map();
    for start in [0u64, 100, 3839, 3840, 5000, 9000].iter() {
      for length in [0u64, 1, 479, 1440, 4000, 7777].iter() {
        let musical = MUSICAL.length_to(ticks(*length), ticks(*start), &tempo_map).unwrap();
        assert_eq!(
          MUSICAL.length_from(&musical, ticks(*start), &tempo_map).unwrap(),
          ticks(*length)
        );
      }
    }
  }

  #[test]
  pub fn rejects_beats_beyond_signature() {
    let tempo_map = changing_map();
    // bar 2 is in 3/4
    match MUSICAL.time_from(&bars(2, 3, 0), &tempo_map) {
      Err(ConversionError::MalformedRepresentation { .. }) => {}
      other => panic!("unexpected {:?}", other),
    }
    assert!(MUSICAL.time_from(&bars(1, 3, 0), &tempo_map).is_ok());
    match MUSICAL.time_from(&bars(4, 0, 240), &tempo_map) {
      Err(ConversionError::MalformedRepresentation { .. }) => {}
      other => panic!("unexpected {:?}", other),
    }
  }
}
