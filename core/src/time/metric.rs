use std::{
  fmt,
  ops::{Add, AddAssign, Sub, SubAssign},
};

pub const MICROS_PER_MILLI: u64 = 1_000;
pub const MICROS_PER_SECOND: u64 = 1_000_000;
const SECONDS_PER_MINUTE: u64 = 60;
const MINUTES_PER_HOUR: u64 = 60;
pub const MICROS_PER_MINUTE: u64 = MICROS_PER_SECOND * SECONDS_PER_MINUTE;

///! Elapsed real time in microseconds
#[derive(Debug, PartialOrd, Ord, PartialEq, Eq, Hash, Clone, Copy, Default)]
pub struct MetricTime(u64);

impl MetricTime {
  pub fn zero() -> MetricTime {
    MetricTime(0)
  }

  pub fn new(micros: u64) -> MetricTime {
    MetricTime(micros)
  }

  pub fn from_millis(millis: u64) -> MetricTime {
    MetricTime(millis * MICROS_PER_MILLI)
  }

  pub fn from_seconds(seconds: f64) -> MetricTime {
    MetricTime((seconds * MICROS_PER_SECOND as f64).round() as u64)
  }

  pub fn micros(&self) -> u64 {
    self.0
  }

  pub fn to_millis(&self) -> u64 {
    self.0 / MICROS_PER_MILLI
  }

  pub fn to_seconds(&self) -> f64 {
    self.0 as f64 / MICROS_PER_SECOND as f64
  }

  pub fn checked_add(self, rhs: MetricTime) -> Option<MetricTime> {
    self.0.checked_add(rhs.0).map(MetricTime)
  }
}

impl Add for MetricTime {
  type Output = MetricTime;

  fn add(self, rhs: MetricTime) -> MetricTime {
    MetricTime(self.0 + rhs.0)
  }
}

impl AddAssign for MetricTime {
  fn add_assign(&mut self, rhs: MetricTime) {
    *self = *self + rhs;
  }
}

/// Saturates at zero.
impl Sub for MetricTime {
  type Output = MetricTime;

  fn sub(self, rhs: MetricTime) -> MetricTime {
    MetricTime(self.0.saturating_sub(rhs.0))
  }
}

impl SubAssign for MetricTime {
  fn sub_assign(&mut self, rhs: MetricTime) {
    *self = *self - rhs;
  }
}

impl From<MetricTime> for u64 {
  fn from(item: MetricTime) -> Self {
    item.0
  }
}

/// Formats as `hh:mm:ss.uuuuuu`.
impl fmt::Display for MetricTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let total_seconds = self.0 / MICROS_PER_SECOND;
    let micros = self.0 % MICROS_PER_SECOND;
    let minutes = total_seconds / SECONDS_PER_MINUTE;
    write!(
      f,
      "{:02}:{:02}:{:02}.{:06}",
      minutes / MINUTES_PER_HOUR,
      minutes % MINUTES_PER_HOUR,
      total_seconds % SECONDS_PER_MINUTE,
      micros
    )
  }
}
