pub mod chord;
pub mod config;
pub mod convert;
pub mod error;
pub mod tempo_map;
pub mod time;

pub use crate::convert::{
  Converter, ConverterRegistry, LengthConverter, Representation, RepresentationKind, TimeConverter,
};
pub use crate::error::ConversionError;
pub use crate::tempo_map::{TempoMap, TempoMapLock};
