use crate::error::{ConversionError, Result};
use crate::time::metric::MICROS_PER_MINUTE;

/// 120 BPM, the tempo in effect until the first tempo change.
pub const DEFAULT_TEMPO: u32 = 500_000;

/// Playback rate in microseconds per quarter note.
///
/// Below the map's ticks per quarter note a tick lasts less than a microsecond, so several ticks
/// share one metric time and `tick -> µs -> tick` no longer gives back every tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tempo(u32);

impl Tempo {
  pub fn new(micros_per_quarter_note: u32) -> Result<Tempo> {
    if micros_per_quarter_note == 0 {
      return Err(ConversionError::argument(
        "tempo",
        "microseconds per quarter note must be positive",
      ));
    }
    Ok(Tempo(micros_per_quarter_note))
  }

  pub fn from_bpm(bpm: f64) -> Result<Tempo> {
    if !bpm.is_finite() || bpm <= 0.0 {
      return Err(ConversionError::argument(
        "bpm",
        format!("{} is not a positive number of beats per minute", bpm),
      ));
    }
    let micros = (MICROS_PER_MINUTE as f64 / bpm).round();
    if micros < 1.0 || micros > f64::from(u32::max_value()) {
      return Err(ConversionError::argument(
        "bpm",
        format!("{} is out of the representable tempo range", bpm),
      ));
    }
    Ok(Tempo(micros as u32))
  }

  pub fn get_value(&self) -> u32 {
    self.0
  }

  pub fn bpm(&self) -> f64 {
    MICROS_PER_MINUTE as f64 / f64::from(self.0)
  }
}

impl Default for Tempo {
  fn default() -> Tempo {
    Tempo(DEFAULT_TEMPO)
  }
}

impl From<Tempo> for u64 {
  fn from(item: Tempo) -> Self {
    u64::from(item.0)
  }
}

impl From<Tempo> for u128 {
  fn from(item: Tempo) -> Self {
    u128::from(item.0)
  }
}
