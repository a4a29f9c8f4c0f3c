use failure::Fail;

use crate::convert::RepresentationKind;

#[derive(Debug, Fail, Clone, PartialEq)]
pub enum ConversionError {
  #[fail(display = "Invalid argument {}: {}", name, reason)]
  Argument { name: &'static str, reason: String },

  #[fail(display = "No converter registered for {:?} representations", kind)]
  UnsupportedRepresentation { kind: RepresentationKind },

  #[fail(display = "Malformed representation: {}", reason)]
  MalformedRepresentation { reason: String },

  #[fail(display = "Chord's notes have different values of the {} property", property)]
  InconsistentChordProperty { property: &'static str },

  #[fail(display = "Chord doesn't contain notes")]
  EmptyChord,
}

impl ConversionError {
  pub(crate) fn argument<T>(name: &'static str, reason: T) -> ConversionError
  where
    T: Into<String>,
  {
    ConversionError::Argument {
      name,
      reason: reason.into(),
    }
  }

  pub(crate) fn malformed<T>(reason: T) -> ConversionError
  where
    T: Into<String>,
  {
    ConversionError::MalformedRepresentation {
      reason: reason.into(),
    }
  }
}

pub type Result<T> = std::result::Result<T, ConversionError>;
