use std::fmt;

use crate::convert::end_of;
use crate::error::{ConversionError, Result};
use crate::time::TicksTime;

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

pub const DEFAULT_VELOCITY: u8 = 100;

/// 7 bit MIDI data value, used for keys and velocities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SevenBit(u8);

impl SevenBit {
  pub const MAX: u8 = 127;

  pub fn new(value: u8) -> Result<SevenBit> {
    if value > SevenBit::MAX {
      return Err(ConversionError::argument(
        "value",
        format!("{} does not fit in 7 bits", value),
      ));
    }
    Ok(SevenBit(value))
  }

  pub fn get_value(&self) -> u8 {
    self.0
  }
}

pub type Key = SevenBit;
pub type Velocity = SevenBit;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Channel(u8);

impl Channel {
  pub const MAX: u8 = 15;

  pub fn new(channel: u8) -> Result<Channel> {
    if channel > Channel::MAX {
      return Err(ConversionError::argument(
        "channel",
        format!("{} does not fit in 4 bits", channel),
      ));
    }
    Ok(Channel(channel))
  }

  pub fn get_value(&self) -> u8 {
    self.0
  }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct Note {
  key: Key,
  channel: Channel,
  velocity: Velocity,
  off_velocity: Velocity,
  time: TicksTime,
  length: TicksTime,
}

impl Note {
  pub fn new(key: Key, time: TicksTime, length: TicksTime) -> Note {
    Note {
      key,
      channel: Channel::default(),
      velocity: SevenBit(DEFAULT_VELOCITY),
      off_velocity: SevenBit::default(),
      time,
      length,
    }
  }

  pub fn with_channel(mut self, channel: Channel) -> Note {
    self.channel = channel;
    self
  }

  pub fn with_velocity(mut self, velocity: Velocity) -> Note {
    self.velocity = velocity;
    self
  }

  pub fn with_off_velocity(mut self, off_velocity: Velocity) -> Note {
    self.off_velocity = off_velocity;
    self
  }

  pub fn key(&self) -> Key {
    self.key
  }

  pub fn channel(&self) -> Channel {
    self.channel
  }

  pub fn set_channel(&mut self, channel: Channel) {
    self.channel = channel;
  }

  pub fn velocity(&self) -> Velocity {
    self.velocity
  }

  pub fn set_velocity(&mut self, velocity: Velocity) {
    self.velocity = velocity;
  }

  pub fn off_velocity(&self) -> Velocity {
    self.off_velocity
  }

  pub fn set_off_velocity(&mut self, off_velocity: Velocity) {
    self.off_velocity = off_velocity;
  }

  pub fn time(&self) -> TicksTime {
    self.time
  }

  pub fn set_time(&mut self, time: TicksTime) {
    self.time = time;
  }

  pub fn length(&self) -> TicksTime {
    self.length
  }

  pub fn set_length(&mut self, length: TicksTime) {
    self.length = length;
  }

  /// Fails when the note would end past the last representable tick.
  pub fn end(&self) -> Result<TicksTime> {
    end_of(self.time, self.length)
  }
}

/// Scientific pitch name, `C4` being key 60.
impl fmt::Display for Note {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let key = i16::from(self.key.get_value());
    write!(f, "{}{}", NOTE_NAMES[(key % 12) as usize], key / 12 - 1)
  }
}

#[cfg(test)]
mod test {

  use super::{Channel, Note, SevenBit};
  use crate::error::ConversionError;
  use crate::time::TicksTime;

  #[test]
  pub fn new_uses_defaults() {
    let note = Note::new(SevenBit::new(60).unwrap(), TicksTime::new(10), TicksTime::new(20));
    assert_eq!(note.channel(), Channel::new(0).unwrap());
    assert_eq!(note.velocity().get_value(), 100);
    assert_eq!(note.off_velocity().get_value(), 0);
    assert_eq!(note.end(), Ok(TicksTime::new(30)));
  }

  #[test]
  pub fn end_past_the_timeline() {
    let key = SevenBit::new(60).unwrap();
    let note = Note::new(key, TicksTime::new(u64::max_value() - 5), TicksTime::new(5));
    assert_eq!(note.end(), Ok(TicksTime::new(u64::max_value())));
    let mut longer = note;
    longer.set_length(TicksTime::new(10));
    match longer.end() {
      Err(ConversionError::Argument { name, .. }) => assert_eq!(name, "length"),
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  pub fn data_ranges() {
    assert!(SevenBit::new(127).is_ok());
    assert!(SevenBit::new(128).is_err());
    assert!(Channel::new(15).is_ok());
    assert!(Channel::new(16).is_err());
  }

  #[test]
  pub fn display_pitch_name() {
    let note = |key| Note::new(SevenBit::new(key).unwrap(), TicksTime::zero(), TicksTime::zero());
    assert_eq!(note(60).to_string(), "C4");
    assert_eq!(note(61).to_string(), "C#4");
    assert_eq!(note(0).to_string(), "C-1");
    assert_eq!(note(127).to_string(), "G9");
  }
}
