use std::fmt;

/// Musical position or length: whole bars, beats within the bar and ticks within the beat.
///
/// Whether `beats` and `ticks` are in range depends on the signature in effect where the value
/// is resolved, so it is only checked by the conversions.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct BarsTime {
  bars: u64,
  beats: u32,
  ticks: u32,
}

impl BarsTime {
  pub fn new(bars: u64, beats: u32, ticks: u32) -> BarsTime {
    BarsTime { bars, beats, ticks }
  }

  pub fn get_bars(&self) -> u64 {
    self.bars
  }

  pub fn get_beats(&self) -> u32 {
    self.beats
  }

  pub fn get_ticks(&self) -> u32 {
    self.ticks
  }
}

impl fmt::Debug for BarsTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{:05}:{:02}:{:03}", self.bars + 1, self.beats + 1, self.ticks)
  }
}

impl fmt::Display for BarsTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}.{}.{}", self.bars, self.beats, self.ticks)
  }
}
