use std::collections::BTreeMap;
use std::fmt;

use log::trace;

use crate::convert::{
  fraction::FRACTION, metric::METRIC, musical::MUSICAL, ticks::TICKS, Converter, RepresentationKind,
};
use crate::error::{ConversionError, Result};

/// Built-in strategy for every kind.
pub fn builtin(kind: RepresentationKind) -> &'static dyn Converter {
  match kind {
    RepresentationKind::Ticks => &TICKS,
    RepresentationKind::Metric => &METRIC,
    RepresentationKind::Musical => &MUSICAL,
    RepresentationKind::Fraction => &FRACTION,
  }
}

/// Table of conversion strategies by representation kind.
#[derive(Clone)]
pub struct ConverterRegistry {
  converters: BTreeMap<RepresentationKind, &'static dyn Converter>,
}

impl ConverterRegistry {
  pub fn empty() -> ConverterRegistry {
    ConverterRegistry {
      converters: BTreeMap::new(),
    }
  }

  /// Registers a strategy for the kind it reports, replacing any previous one.
  pub fn register(&mut self, converter: &'static dyn Converter) -> &mut Self {
    trace!("Registering a {:?} converter", converter.kind());
    self.converters.insert(converter.kind(), converter);
    self
  }

  pub fn resolve(&self, kind: RepresentationKind) -> Result<&'static dyn Converter> {
    self
      .converters
      .get(&kind)
      .cloned()
      .ok_or(ConversionError::UnsupportedRepresentation { kind })
  }

  pub fn kinds<'a>(&'a self) -> impl Iterator<Item = RepresentationKind> + 'a {
    self.converters.keys().cloned()
  }
}

impl Default for ConverterRegistry {
  fn default() -> ConverterRegistry {
    let mut registry = ConverterRegistry::empty();
    for kind in RepresentationKind::ALL.iter() {
      registry.register(builtin(*kind));
    }
    registry
  }
}

impl fmt::Debug for ConverterRegistry {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_list().entries(self.converters.keys()).finish()
  }
}

#[cfg(test)]
mod test {

  use super::ConverterRegistry;
  use crate::convert::{ticks::TICKS, RepresentationKind};
  use crate::error::ConversionError;

  #[test]
  pub fn default_registers_every_kind() {
    let registry = ConverterRegistry::default();
    assert_eq!(
      registry.kinds().collect::<Vec<_>>(),
      RepresentationKind::ALL.to_vec()
    );
    for kind in RepresentationKind::ALL.iter() {
      assert_eq!(registry.resolve(*kind).unwrap().kind(), *kind);
    }
  }

  #[test]
  pub fn unregistered_kind_is_unsupported() {
    let mut registry = ConverterRegistry::empty();
    registry.register(&TICKS);
    assert!(registry.resolve(RepresentationKind::Ticks).is_ok());
    match registry.resolve(RepresentationKind::Metric) {
      Err(ConversionError::UnsupportedRepresentation { kind }) => {
        assert_eq!(kind, RepresentationKind::Metric)
      }
      Ok(_) => panic!("metric should not be registered"),
      Err(other) => panic!("unexpected {:?}", other),
    }
  }
}
