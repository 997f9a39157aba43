//! Destructive, forward-only draining of time-sorted queues.
//!
//! Every helper here permanently removes the events it returns, so each
//! queue must be drained by a single owner, once per tick, with
//! monotonically increasing time.

use crate::midi::{NoteEvent, Timed};
use crate::period::NotePeriod;
use crate::time::{Seconds, TempoOracle};

/// Seconds by which note-offs are released ahead of their nominal time, so
/// repeated notes stay visually distinct.
pub const OFF_GAP: Seconds = 1.0 / 30.0;

/// Removes and returns every event due at `time`.
pub fn collect<T: Timed>(events: &mut Vec<T>, time: Seconds, oracle: &dyn TempoOracle) -> Vec<T> {
  let due = events
    .iter()
    .take_while(|event| oracle.tick_to_seconds(event.time()) <= time)
    .count();
  events.drain(..due).collect()
}

/// Removes every note period that has started by `time` and returns the
/// last of them: the period a monophonic part should be animating now.
pub fn collect_one_period(periods: &mut Vec<NotePeriod>, time: Seconds) -> Option<NotePeriod> {
  let due = periods
    .iter()
    .take_while(|period| period.start_time <= time)
    .count();
  periods.drain(..due).last()
}

/// Like [`collect`], but note-offs are considered due [`OFF_GAP`] seconds
/// early.
pub fn collect_with_off_gap(
  events: &mut Vec<NoteEvent>,
  time: Seconds,
  oracle: &dyn TempoOracle,
) -> Vec<NoteEvent> {
  let due = events
    .iter()
    .take_while(|event| {
      let event_time = oracle.tick_to_seconds(event.time());
      event_time <= time || (event.is_off() && event_time <= time + OFF_GAP)
    })
    .count();
  events.drain(..due).collect()
}
