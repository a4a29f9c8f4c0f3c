pub mod segments;

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use log::{debug, trace};

use crate::error::{ConversionError, Result};
use crate::time::{Signature, Tempo, TicksTime, TimeDivision};

pub use self::segments::{Segment, Segments};

/// Readers share the map while a writer holding the write guard gets exclusive access.
pub type TempoMapLock = Arc<RwLock<TempoMap>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TempoChange {
  pub tick: TicksTime,
  pub tempo: Tempo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignatureChange {
  pub tick: TicksTime,
  pub signature: Signature,
}

/// Timeline of tempo and time signature changes.
///
/// Until the first change of each kind the default tempo (120 BPM) and signature (4/4) apply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TempoMap {
  division: TimeDivision,
  tempos: BTreeMap<TicksTime, Tempo>,
  signatures: BTreeMap<TicksTime, Signature>,
}

impl TempoMap {
  pub fn new(division: TimeDivision) -> TempoMap {
    TempoMap {
      division,
      tempos: BTreeMap::new(),
      signatures: BTreeMap::new(),
    }
  }

  /// Builds a map from the changes extracted from an event stream.
  ///
  /// Later pairs at the same tick replace earlier ones.
  pub fn from_changes<T, S>(division: TimeDivision, tempos: T, signatures: S) -> Result<TempoMap>
  where
    T: IntoIterator<Item = (TicksTime, Tempo)>,
    S: IntoIterator<Item = (TicksTime, Signature)>,
  {
    let mut tempo_map = TempoMap::new(division);
    for (tick, tempo) in tempos {
      tempo_map.set_tempo(tick, tempo)?;
    }
    for (tick, signature) in signatures {
      tempo_map.set_signature(tick, signature)?;
    }
    Ok(tempo_map)
  }

  pub fn division(&self) -> TimeDivision {
    self.division
  }

  pub fn tempo_at(&self, tick: TicksTime) -> Tempo {
    self
      .tempos
      .range(..=tick)
      .next_back()
      .map(|(_, tempo)| *tempo)
      .unwrap_or_default()
  }

  pub fn signature_at(&self, tick: TicksTime) -> Signature {
    self
      .signatures
      .range(..=tick)
      .next_back()
      .map(|(_, signature)| *signature)
      .unwrap_or_default()
  }

  /// A tempo under one microsecond per tick makes metric times lossy, see `Tempo`.
  pub fn set_tempo(&mut self, tick: TicksTime, tempo: Tempo) -> Result<()> {
    if let Some(previous) = self.tempos.insert(tick, tempo) {
      trace!("Replaced tempo {:?} at tick {}", previous, tick);
    }
    debug!("Tempo at tick {} set to {} BPM", tick, tempo.bpm());
    Ok(())
  }

  /// Fails when a beat of `signature` is not a whole number of ticks at this map's division.
  pub fn set_signature(&mut self, tick: TicksTime, signature: Signature) -> Result<()> {
    if !signature.fits(self.division) {
      return Err(ConversionError::argument(
        "denominator",
        format!(
          "a 1/{} beat is not a whole number of ticks at {} ticks per quarter note",
          signature.get_note_value(),
          self.division.ticks_per_quarter_note()
        ),
      ));
    }
    if let Some(previous) = self.signatures.insert(tick, signature) {
      trace!("Replaced signature {} at tick {}", previous, tick);
    }
    debug!("Signature at tick {} set to {}", tick, signature);
    Ok(())
  }

  pub fn remove_tempo(&mut self, tick: TicksTime) -> Option<TempoChange> {
    self
      .tempos
      .remove(&tick)
      .map(|tempo| TempoChange { tick, tempo })
  }

  pub fn remove_signature(&mut self, tick: TicksTime) -> Option<SignatureChange> {
    self
      .signatures
      .remove(&tick)
      .map(|signature| SignatureChange { tick, signature })
  }

  pub fn clear_tempo(&mut self) {
    self.tempos.clear();
  }

  pub fn clear_signatures(&mut self) {
    self.signatures.clear();
  }

  pub fn tempo_changes<'a>(&'a self) -> impl Iterator<Item = TempoChange> + 'a {
    self
      .tempos
      .iter()
      .map(|(tick, tempo)| TempoChange {
        tick: *tick,
        tempo: *tempo,
      })
  }

  pub fn signature_changes<'a>(&'a self) -> impl Iterator<Item = SignatureChange> + 'a {
    self
      .signatures
      .iter()
      .map(|(tick, signature)| SignatureChange {
        tick: *tick,
        signature: *signature,
      })
  }

  /// Constant tempo and signature sub-intervals covering `[from, to)`.
  pub fn segments(&self, from: TicksTime, to: TicksTime) -> Segments {
    Segments::new(self, from, Some(to))
  }

  /// Like `segments` without an upper bound: the last segment is open and extends forever.
  pub fn segments_from(&self, from: TicksTime) -> Segments {
    Segments::new(self, from, None)
  }

  pub(crate) fn tempos(&self) -> &BTreeMap<TicksTime, Tempo> {
    &self.tempos
  }

  pub(crate) fn signatures(&self) -> &BTreeMap<TicksTime, Signature> {
    &self.signatures
  }
}
