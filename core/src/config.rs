use failure::Error;

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

use crate::error::{ConversionError, Result};
use crate::tempo_map::TempoMap;
use crate::time::{
  signature::DEFAULT_TICKS_PER_QUARTER_NOTE, Signature, Tempo, TicksTime, TimeDivision,
};

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct TempoEvent {
  pub tick: u64,
  pub bpm: Option<f64>,
  pub micros_per_quarter_note: Option<u32>,
}

impl TempoEvent {
  pub fn tempo(&self) -> Result<Tempo> {
    match (self.bpm, self.micros_per_quarter_note) {
      (Some(bpm), None) => Tempo::from_bpm(bpm),
      (None, Some(micros)) => Tempo::new(micros),
      _ => Err(ConversionError::argument(
        "tempo",
        format!(
          "the tempo at tick {} needs exactly one of bpm or micros_per_quarter_note",
          self.tick
        ),
      )),
    }
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct SignatureEvent {
  pub tick: u64,
  pub numerator: u8,
  pub denominator: u8,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Timeline {
  pub ticks_per_quarter_note: u16,
  pub tempo: Vec<TempoEvent>,
  pub signature: Vec<SignatureEvent>,
}

impl Default for Timeline {
  fn default() -> Timeline {
    Timeline {
      ticks_per_quarter_note: DEFAULT_TICKS_PER_QUARTER_NOTE,
      tempo: Vec::new(),
      signature: Vec::new(),
    }
  }
}

impl Timeline {
  pub fn tempo_map(&self) -> Result<TempoMap> {
    let division = TimeDivision::new(self.ticks_per_quarter_note)?;
    let tempos = self
      .tempo
      .iter()
      .map(|event| event.tempo().map(|tempo| (TicksTime::new(event.tick), tempo)))
      .collect::<Result<Vec<_>>>()?;
    let signatures = self
      .signature
      .iter()
      .map(|event| {
        Signature::new(event.numerator, event.denominator)
          .map(|signature| (TicksTime::new(event.tick), signature))
      })
      .collect::<Result<Vec<_>>>()?;
    TempoMap::from_changes(division, tempos, signatures)
  }
}

#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
  pub timeline: Timeline,
}

impl Config {
  pub fn from_file<'a, T>(path: T) -> std::result::Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
  }

  pub fn from_str<'a, T>(content: T) -> std::result::Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    Ok(config)
  }
}

#[cfg(test)]
mod test {

  use super::Config;
  use crate::error::ConversionError;
  use crate::time::{Signature, Tempo, TicksTime};

  #[test]
  pub fn defaults_when_empty() {
    let config = Config::from_str("").unwrap();
    assert_eq!(config.timeline.ticks_per_quarter_note, 480);
    let tempo_map = config.timeline.tempo_map().unwrap();
    assert_eq!(tempo_map.tempo_changes().count(), 0);
  }

  #[test]
  pub fn parses_timeline() {
    let config = Config::from_str(
      r#"
      [timeline]
      ticks_per_quarter_note = 96

      [[timeline.tempo]]
      tick = 0
      bpm = 100.0

      [[timeline.tempo]]
      tick = 384
      micros_per_quarter_note = 400000

      [[timeline.signature]]
      tick = 384
      numerator = 7
      denominator = 8
      "#,
    )
    .unwrap();

    let tempo_map = config.timeline.tempo_map().unwrap();
    assert_eq!(tempo_map.division().ticks_per_quarter_note(), 96);
    assert_eq!(tempo_map.tempo_at(TicksTime::new(0)), Tempo::new(600_000).unwrap());
    assert_eq!(tempo_map.tempo_at(TicksTime::new(400)), Tempo::new(400_000).unwrap());
    assert_eq!(
      tempo_map.signature_at(TicksTime::new(384)),
      Signature::new(7, 8).unwrap()
    );
  }

  #[test]
  pub fn rejects_ambiguous_tempo() {
    let config = Config::from_str(
      r#"
      [[timeline.tempo]]
      tick = 0
      bpm = 100.0
      micros_per_quarter_note = 400000
      "#,
    )
    .unwrap();
    match config.timeline.tempo_map() {
      Err(ConversionError::Argument { name, .. }) => assert_eq!(name, "tempo"),
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  pub fn rejects_malformed_signature() {
    let config = Config::from_str(
      r#"
      [[timeline.signature]]
      tick = 0
      numerator = 3
      denominator = 5
      "#,
    )
    .unwrap();
    assert!(config.timeline.tempo_map().is_err());
  }

  #[test]
  pub fn rejects_unparseable_toml() {
    assert!(Config::from_str("[timeline").is_err());
  }
}
