use std::fmt;

use crate::error::{ConversionError, Result};

pub const DEFAULT_SIGNATURE_NUM_BEATS: u8 = 4;
pub const DEFAULT_SIGNATURE_NOTE_VALUE: u8 = 4;

const QUARTERS_PER_WHOLE_NOTE: u64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
  num_beats: u8,  // numerator
  note_value: u8, // denominator
}

impl Signature {
  pub fn new(num_beats: u8, note_value: u8) -> Result<Signature> {
    if num_beats == 0 {
      return Err(ConversionError::argument(
        "numerator",
        "the number of beats must be positive",
      ));
    }
    if !note_value.is_power_of_two() {
      return Err(ConversionError::argument(
        "denominator",
        format!("{} is not a positive power of two", note_value),
      ));
    }
    Ok(Signature {
      num_beats,
      note_value,
    })
  }

  pub fn get_num_beats(&self) -> u8 {
    self.num_beats
  }

  pub fn get_note_value(&self) -> u8 {
    self.note_value
  }

  /// Whether a beat of this signature is a whole number of ticks.
  pub fn fits(&self, division: TimeDivision) -> bool {
    division.ticks_per_whole_note() % u64::from(self.note_value) == 0
  }

  pub fn ticks_per_beat(&self, division: TimeDivision) -> u64 {
    division.ticks_per_whole_note() / u64::from(self.note_value)
  }

  pub fn ticks_per_bar(&self, division: TimeDivision) -> u64 {
    self.ticks_per_beat(division) * u64::from(self.num_beats)
  }
}

impl Default for Signature {
  fn default() -> Signature {
    Signature {
      num_beats: DEFAULT_SIGNATURE_NUM_BEATS,
      note_value: DEFAULT_SIGNATURE_NOTE_VALUE,
    }
  }
}

impl fmt::Display for Signature {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}/{}", self.num_beats, self.note_value)
  }
}

/// Ticks per quarter note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeDivision(u16);

pub const DEFAULT_TICKS_PER_QUARTER_NOTE: u16 = 480;

impl TimeDivision {
  pub fn new(ticks_per_quarter_note: u16) -> Result<TimeDivision> {
    if ticks_per_quarter_note == 0 {
      return Err(ConversionError::argument(
        "ticks_per_quarter_note",
        "the time division must be positive",
      ));
    }
    Ok(TimeDivision(ticks_per_quarter_note))
  }

  pub fn ticks_per_quarter_note(&self) -> u64 {
    u64::from(self.0)
  }

  pub fn ticks_per_whole_note(&self) -> u64 {
    self.ticks_per_quarter_note() * QUARTERS_PER_WHOLE_NOTE
  }
}

impl Default for TimeDivision {
  fn default() -> TimeDivision {
    TimeDivision(DEFAULT_TICKS_PER_QUARTER_NOTE)
  }
}
