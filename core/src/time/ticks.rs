use std::{
  cmp::min,
  fmt,
  ops::{Add, AddAssign, Sub, SubAssign},
};

/// Absolute position or length on the timeline, in ticks of the map's time division.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Copy, Clone, Default)]
pub struct TicksTime(u64);

impl TicksTime {
  pub fn new(ticks: u64) -> TicksTime {
    TicksTime(ticks)
  }

  pub fn zero() -> TicksTime {
    TicksTime(0)
  }

  pub fn get_ticks(&self) -> u64 {
    self.0
  }

  pub fn checked_add(self, rhs: TicksTime) -> Option<TicksTime> {
    self.0.checked_add(rhs.0).map(TicksTime)
  }

  pub fn checked_sub(self, rhs: TicksTime) -> Option<TicksTime> {
    self.0.checked_sub(rhs.0).map(TicksTime)
  }
}

impl Add for TicksTime {
  type Output = TicksTime;
  fn add(self, rhs: TicksTime) -> Self {
    TicksTime::new(self.0 + rhs.0)
  }
}

impl AddAssign for TicksTime {
  fn add_assign(&mut self, rhs: TicksTime) {
    *self = *self + rhs;
  }
}

/// Saturates at zero.
impl Sub for TicksTime {
  type Output = TicksTime;
  fn sub(self, rhs: TicksTime) -> Self {
    TicksTime::new(self.0 - min(self.0, rhs.0))
  }
}

impl SubAssign for TicksTime {
  fn sub_assign(&mut self, rhs: TicksTime) {
    *self = *self - rhs;
  }
}

impl From<u64> for TicksTime {
  fn from(ticks: u64) -> Self {
    TicksTime(ticks)
  }
}

impl From<TicksTime> for u64 {
  fn from(item: TicksTime) -> Self {
    item.0
  }
}

impl From<TicksTime> for u128 {
  fn from(item: TicksTime) -> Self {
    u128::from(item.0)
  }
}

impl fmt::Display for TicksTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

#[cfg(test)]
mod test {

  use super::TicksTime;

  #[test]
  pub fn new() {
    let ticks_time = TicksTime::new(1234);
    assert_eq!(ticks_time.get_ticks(), 1234);
    assert_eq!(TicksTime::zero().get_ticks(), 0);
  }

  #[test]
  pub fn ordering() {
    let time1 = TicksTime::new(1234);
    let time2 = TicksTime::new(1235);
    assert!(time1 < time2);
    assert_eq!(time1.max(time2), time2);
  }

  #[test]
  pub fn add() {
    let mut time = TicksTime::new(100) + TicksTime::new(50);
    assert_eq!(time, TicksTime(150));
    time += TicksTime::new(10);
    assert_eq!(time, TicksTime(160));
  }

  #[test]
  pub fn sub_saturates() {
    assert_eq!(TicksTime::new(100) - TicksTime::new(30), TicksTime(70));
    assert_eq!(TicksTime::new(30) - TicksTime::new(100), TicksTime(0));
  }

  #[test]
  pub fn checked() {
    assert_eq!(TicksTime::new(u64::max_value()).checked_add(TicksTime::new(1)), None);
    assert_eq!(TicksTime::new(3).checked_sub(TicksTime::new(4)), None);
    assert_eq!(TicksTime::new(3).checked_add(TicksTime::new(4)), Some(TicksTime(7)));
  }
}
