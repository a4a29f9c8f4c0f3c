use std::collections::btree_map::Range;
use std::iter::Peekable;
use std::ops::Bound::{Excluded, Unbounded};

use crate::tempo_map::TempoMap;
use crate::time::{Signature, Tempo, TicksTime};

/// Half-open `[start, end)` interval with constant tempo and signature.
///
/// `end` is `None` for the open segment following the last change of an unbounded walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
  pub start: TicksTime,
  pub end: Option<TicksTime>,
  pub tempo: Tempo,
  pub signature: Signature,
}

impl Segment {
  pub fn span(&self) -> Option<u64> {
    self.end.map(|end| u64::from(end - self.start))
  }

  pub fn contains(&self, tick: TicksTime) -> bool {
    self.start <= tick && self.end.map_or(true, |end| tick < end)
  }
}

pub struct Segments<'a> {
  tempos: Peekable<Range<'a, TicksTime, Tempo>>,
  signatures: Peekable<Range<'a, TicksTime, Signature>>,
  position: TicksTime,
  limit: Option<TicksTime>,
  tempo: Tempo,
  signature: Signature,
  finished: bool,
}

impl<'a> Segments<'a> {
  pub(crate) fn new(
    tempo_map: &'a TempoMap,
    from: TicksTime,
    limit: Option<TicksTime>,
  ) -> Segments<'a> {
    Segments {
      tempos: tempo_map.tempos().range((Excluded(from), Unbounded)).peekable(),
      signatures: tempo_map
        .signatures()
        .range((Excluded(from), Unbounded))
        .peekable(),
      position: from,
      limit,
      tempo: tempo_map.tempo_at(from),
      signature: tempo_map.signature_at(from),
      finished: false,
    }
  }

  fn next_change(&mut self) -> Option<TicksTime> {
    let next_tempo = self.tempos.peek().map(|(tick, _)| **tick);
    let next_signature = self.signatures.peek().map(|(tick, _)| **tick);
    match (next_tempo, next_signature) {
      (Some(tempo), Some(signature)) => Some(tempo.min(signature)),
      (tempo, signature) => tempo.or(signature),
    }
  }

  fn advance_to(&mut self, tick: TicksTime) {
    while let Some((_, tempo)) = self.tempos.peek().filter(|(at, _)| **at <= tick) {
      self.tempo = **tempo;
      self.tempos.next();
    }
    while let Some((_, signature)) = self.signatures.peek().filter(|(at, _)| **at <= tick) {
      self.signature = **signature;
      self.signatures.next();
    }
    self.position = tick;
  }
}

impl<'a> Iterator for Segments<'a> {
  type Item = Segment;

  fn next(&mut self) -> Option<Segment> {
    if self.finished {
      return None;
    }
    if let Some(limit) = self.limit {
      if self.position >= limit {
        self.finished = true;
        return None;
      }
    }

    let end = match (self.next_change(), self.limit) {
      (Some(change), Some(limit)) => Some(change.min(limit)),
      (change, limit) => change.or(limit),
    };

    let segment = Segment {
      start: self.position,
      end,
      tempo: self.tempo,
      signature: self.signature,
    };

    match end {
      Some(end) => self.advance_to(end),
      None => self.finished = true,
    }

    Some(segment)
  }
}
