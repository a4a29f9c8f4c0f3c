use std::fmt;

use log::trace;
use uuid::Uuid;

use crate::chord::note::Note;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
  fn new() -> SubscriptionId {
    SubscriptionId(Uuid::new_v4())
  }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NotesCollectionChanged {
  pub added: Vec<Note>,
  pub removed: Vec<Note>,
}

pub type NotesCallback = Box<dyn FnMut(&NotesCollectionChanged) + Send>;

/// Notes of a chord. Membership changes are reported synchronously to every subscriber.
#[derive(Default)]
pub struct NotesCollection {
  notes: Vec<Note>,
  subscribers: Vec<(SubscriptionId, NotesCallback)>,
}

impl NotesCollection {
  pub fn new<T>(notes: T) -> NotesCollection
  where
    T: IntoIterator<Item = Note>,
  {
    NotesCollection {
      notes: notes.into_iter().collect(),
      subscribers: Vec::new(),
    }
  }

  pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
  where
    F: FnMut(&NotesCollectionChanged) + Send + 'static,
  {
    let id = SubscriptionId::new();
    self.subscribers.push((id, Box::new(callback)));
    id
  }

  pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
    let count = self.subscribers.len();
    self.subscribers.retain(|(subscriber, _)| *subscriber != id);
    self.subscribers.len() != count
  }

  pub fn add(&mut self, note: Note) {
    self.add_all(vec![note]);
  }

  pub fn add_all<T>(&mut self, notes: T)
  where
    T: IntoIterator<Item = Note>,
  {
    let added: Vec<Note> = notes.into_iter().collect();
    if added.is_empty() {
      return;
    }
    self.notes.extend(added.iter().cloned());
    self.notify(NotesCollectionChanged {
      added,
      removed: Vec::new(),
    });
  }

  /// Removes the first note equal to `note`.
  pub fn remove(&mut self, note: &Note) -> bool {
    match self.notes.iter().position(|existing| existing == note) {
      Some(index) => {
        let removed = self.notes.remove(index);
        self.notify(NotesCollectionChanged {
          added: Vec::new(),
          removed: vec![removed],
        });
        true
      }
      None => false,
    }
  }

  pub fn clear(&mut self) {
    if self.notes.is_empty() {
      return;
    }
    let removed = std::mem::replace(&mut self.notes, Vec::new());
    self.notify(NotesCollectionChanged {
      added: Vec::new(),
      removed,
    });
  }

  pub fn len(&self) -> usize {
    self.notes.len()
  }

  pub fn is_empty(&self) -> bool {
    self.notes.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &Note> {
    self.notes.iter()
  }

  /// Mutating notes in place does not change membership and is not reported.
  pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Note> {
    self.notes.iter_mut()
  }

  fn notify(&mut self, change: NotesCollectionChanged) {
    trace!(
      "Notes collection changed: {} added, {} removed",
      change.added.len(),
      change.removed.len()
    );
    for (_, callback) in self.subscribers.iter_mut() {
      (*callback)(&change);
    }
  }
}

impl PartialEq for NotesCollection {
  fn eq(&self, other: &NotesCollection) -> bool {
    self.notes == other.notes
  }
}

impl fmt::Debug for NotesCollection {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("NotesCollection")
      .field("notes", &self.notes)
      .field("subscribers", &self.subscribers.len())
      .finish()
  }
}
