pub mod note;
pub mod notes;

use std::fmt;

use crate::convert::{end_of, LengthConverter, Representation, RepresentationKind, TimeConverter};
use crate::error::{ConversionError, Result};
use crate::tempo_map::TempoMap;
use crate::time::TicksTime;

pub use self::note::{Channel, Key, Note, SevenBit, Velocity};
pub use self::notes::{NotesCallback, NotesCollection, NotesCollectionChanged, SubscriptionId};

/// Group of notes handled as one object.
///
/// Time and length are derived from the notes: the earliest start and the distance to the
/// latest end.
#[derive(Debug, Default, PartialEq)]
pub struct Chord {
  notes: NotesCollection,
}

impl Chord {
  pub fn new<T>(notes: T) -> Chord
  where
    T: IntoIterator<Item = Note>,
  {
    Chord {
      notes: NotesCollection::new(notes),
    }
  }

  pub fn with_time<T>(notes: T, time: TicksTime) -> Result<Chord>
  where
    T: IntoIterator<Item = Note>,
  {
    let mut chord = Chord::new(notes);
    chord.set_time(time)?;
    Ok(chord)
  }

  pub fn notes(&self) -> &NotesCollection {
    &self.notes
  }

  pub fn notes_mut(&mut self) -> &mut NotesCollection {
    &mut self.notes
  }

  pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
  where
    F: FnMut(&NotesCollectionChanged) + Send + 'static,
  {
    self.notes.subscribe(callback)
  }

  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    self.notes.unsubscribe(id)
  }

  pub fn time(&self) -> TicksTime {
    self
      .notes
      .iter()
      .map(Note::time)
      .min()
      .unwrap_or_else(TicksTime::zero)
  }

  /// Moves every note by the same offset, keeping their relative onsets.
  ///
  /// No note is moved when any of them would end past the last representable tick.
  pub fn set_time(&mut self, time: TicksTime) -> Result<()> {
    let current = self.time();
    let mut moved = Vec::with_capacity(self.notes.len());
    for note in self.notes.iter() {
      let offset = note.time() - current;
      let start = time.checked_add(offset).ok_or_else(|| {
        ConversionError::argument(
          "time",
          format!("moving a note {} ticks after {} overflows the timeline", offset, time),
        )
      })?;
      end_of(start, note.length())?;
      moved.push(start);
    }
    for (note, start) in self.notes.iter_mut().zip(moved) {
      note.set_time(start);
    }
    Ok(())
  }

  pub fn length(&self) -> Result<TicksTime> {
    let mut latest = TicksTime::zero();
    for note in self.notes.iter() {
      latest = latest.max(note.end()?);
    }
    Ok(latest - self.time())
  }

  /// Changes the length of every note by the same amount.
  ///
  /// Fails without changing any note when one of them would get a negative length or end past
  /// the last representable tick.
  pub fn set_length(&mut self, length: TicksTime) -> Result<()> {
    let current = self.length()?;
    if length >= current {
      let grow = length - current;
      for note in self.notes.iter() {
        end_of(note.end()?, grow)?;
      }
      for note in self.notes.iter_mut() {
        let grown = note.length() + grow;
        note.set_length(grown);
      }
      return Ok(());
    }

    let shrink = current - length;
    if self.notes.iter().any(|note| note.length() < shrink) {
      return Err(ConversionError::argument(
        "length",
        format!("shrinking by {} ticks would make a note length negative", shrink),
      ));
    }
    for note in self.notes.iter_mut() {
      let shrunk = note.length() - shrink;
      note.set_length(shrunk);
    }
    Ok(())
  }

  pub fn channel(&self) -> Result<Channel> {
    self.common("channel", Note::channel)
  }

  pub fn set_channel(&mut self, channel: Channel) {
    self.notes.iter_mut().for_each(|note| note.set_channel(channel));
  }

  pub fn velocity(&self) -> Result<Velocity> {
    self.common("velocity", Note::velocity)
  }

  pub fn set_velocity(&mut self, velocity: Velocity) {
    self.notes.iter_mut().for_each(|note| note.set_velocity(velocity));
  }

  pub fn off_velocity(&self) -> Result<Velocity> {
    self.common("off_velocity", Note::off_velocity)
  }

  pub fn set_off_velocity(&mut self, off_velocity: Velocity) {
    self
      .notes
      .iter_mut()
      .for_each(|note| note.set_off_velocity(off_velocity));
  }

  pub fn time_as(
    &self,
    kind: RepresentationKind,
    tempo_map: &TempoMap,
  ) -> Result<Representation> {
    TimeConverter::default().to_representation(self.time(), kind, tempo_map)
  }

  pub fn length_as(
    &self,
    kind: RepresentationKind,
    tempo_map: &TempoMap,
  ) -> Result<Representation> {
    LengthConverter::default().to_representation(self.length()?, self.time(), kind, tempo_map)
  }

  fn common<T, F>(&self, property: &'static str, value_of: F) -> Result<T>
  where
    T: PartialEq,
    F: Fn(&Note) -> T,
  {
    let mut values = self.notes.iter().map(value_of);
    let first = values.next().ok_or(ConversionError::EmptyChord)?;
    if values.any(|value| value != first) {
      return Err(ConversionError::InconsistentChordProperty { property });
    }
    Ok(first)
  }
}

/// Notes ordered by key.
impl fmt::Display for Chord {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    if self.notes.is_empty() {
      return write!(f, "Empty notes collection");
    }
    let mut notes: Vec<&Note> = self.notes.iter().collect();
    notes.sort_by_key(|note| note.key());
    let names: Vec<String> = notes.iter().map(|note| note.to_string()).collect();
    write!(f, "{}", names.join(" "))
  }
}
