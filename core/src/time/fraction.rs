use std::fmt;

use crate::error::{ConversionError, Result};

/// Tempo-independent length expressed as a fraction of a whole note, always kept reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FractionTime {
  numerator: u64,
  denominator: u64,
}

impl FractionTime {
  pub fn new(numerator: u64, denominator: u64) -> Result<FractionTime> {
    if denominator == 0 {
      return Err(ConversionError::argument(
        "denominator",
        "a fraction denominator must be positive",
      ));
    }
    let divisor = gcd(numerator, denominator);
    Ok(FractionTime {
      numerator: numerator / divisor,
      denominator: denominator / divisor,
    })
  }

  pub fn zero() -> FractionTime {
    FractionTime {
      numerator: 0,
      denominator: 1,
    }
  }

  pub fn get_numerator(&self) -> u64 {
    self.numerator
  }

  pub fn get_denominator(&self) -> u64 {
    self.denominator
  }
}

impl Default for FractionTime {
  fn default() -> FractionTime {
    FractionTime::zero()
  }
}

impl fmt::Display for FractionTime {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "{}/{}", self.numerator, self.denominator)
  }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
  while b != 0 {
    let r = a % b;
    a = b;
    b = r;
  }
  a
}
