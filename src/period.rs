use log::debug;

use crate::midi::{Key, NoteEvent, NoteOff, NoteOn, MAX_KEY};
use crate::time::{Seconds, TempoOracle, Tick};

/// A note period is the pairing of a note-on with its note-off: the block
/// you would see in a piano roll editor, with its tick range converted to
/// playback seconds.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct NotePeriod {
  pub note: Key,
  pub start_time: Seconds,
  pub end_time: Seconds,
  pub note_on: NoteOn,
  pub note_off: NoteOff,
}

impl NotePeriod {
  pub fn start_tick(&self) -> Tick {
    self.note_on.time
  }

  pub fn end_tick(&self) -> Tick {
    self.note_off.time
  }

  pub fn duration(&self) -> Seconds {
    self.end_time - self.start_time
  }

  pub fn is_playing_at(&self, time: Seconds) -> bool {
    time >= self.start_time && time <= self.end_time
  }

  /// Whether the period spans the given tick. The end tick is exclusive so
  /// that back-to-back notes do not count as overlapping.
  pub fn spans_tick(&self, tick: Tick) -> bool {
    tick >= self.start_tick() && tick < self.end_tick()
  }
}

/// Pairs each note-on with the first following note-off of the same pitch
/// and returns the resulting periods in note-off order.
///
/// Malformed data never fails the build: note-ons without a matching
/// note-off, note-offs without a preceding note-on and zero-length periods
/// are dropped, and exact duplicates (same pitch and tick range, a common
/// authoring redundancy that would double-animate a strike) are removed.
pub fn build_note_periods(events: &[NoteEvent], oracle: &dyn TempoOracle) -> Vec<NotePeriod> {
  let mut periods: Vec<NotePeriod> = Vec::new();
  let mut on_events: [Option<NoteOn>; MAX_KEY + 1] = [None; MAX_KEY + 1];
  let mut orphan_offs = 0;

  for event in events {
    match event {
      NoteEvent::On(on) => {
        on_events[on.key as usize] = Some(*on);
      }
      NoteEvent::Off(off) => match on_events[off.key as usize].take() {
        Some(on) => {
          periods.push(NotePeriod {
            note: off.key,
            start_time: oracle.tick_to_seconds(on.time),
            end_time: oracle.tick_to_seconds(off.time),
            note_on: on,
            note_off: *off,
          });
        }
        None => orphan_offs += 1,
      },
    }
  }

  let unmatched_ons = on_events.iter().filter(|on| on.is_some()).count();
  if unmatched_ons > 0 || orphan_offs > 0 {
    debug!(
      "Dropped {} unmatched note-ons and {} orphan note-offs",
      unmatched_ons, orphan_offs
    );
  }

  let before = periods.len();
  periods.retain(|period| period.start_time < period.end_time);
  if periods.len() < before {
    debug!("Dropped {} zero-length note periods", before - periods.len());
  }

  dedup_note_periods(&mut periods);
  periods
}

/// Removes consecutive periods with identical pitch and tick range.
/// Idempotent: a second pass finds nothing left to remove.
pub fn dedup_note_periods(periods: &mut Vec<NotePeriod>) {
  periods.dedup_by(|a, b| {
    a.note == b.note && a.start_tick() == b.start_tick() && a.end_tick() == b.end_tick()
  });
}
