use log::debug;

use crate::period::NotePeriod;
use crate::queue;
use crate::time::{Seconds, Tick};

/// One visual instance of a monophonic instrument.
///
/// MIDI lifts the physical one-note-at-a-time limitation, so polyphony on
/// a monophonic instrument is shown by standing up extra instances, each
/// responsible for a disjoint, non-overlapping subset of the note periods.
pub struct InstrumentClone {
  periods: Vec<NotePeriod>,
  current: Option<NotePeriod>,
  last: Option<NotePeriod>,
}

impl InstrumentClone {
  fn new() -> InstrumentClone {
    InstrumentClone {
      periods: Vec::new(),
      current: None,
      last: None,
    }
  }

  fn assign(&mut self, period: NotePeriod) {
    self.periods.push(period);
  }

  /// Whether any assigned period spans the given tick.
  pub fn is_playing_at(&self, tick: Tick) -> bool {
    self.periods.iter().any(|period| period.spans_tick(tick))
  }

  pub fn is_playing(&self) -> bool {
    self.current.is_some()
  }

  pub fn current(&self) -> Option<&NotePeriod> {
    self.current.as_ref()
  }

  pub fn periods(&self) -> &[NotePeriod] {
    &self.periods
  }

  /// Advances the pending queue to `time`: the latest started period
  /// becomes current, and an elapsed current period is retired.
  pub fn advance(&mut self, time: Seconds) {
    if let Some(period) = queue::collect_one_period(&mut self.periods, time) {
      self.current = Some(period);
    }

    if let Some(current) = self.current {
      if current.end_time <= time {
        self.last = self.current.take();
      }
    }
  }

  /// Whether this clone should be shown. The clone at index 0 shares the
  /// instrument's visibility and is always shown; any other clone is shown
  /// while playing, or in between two of its notes closer than `gap` ticks.
  pub fn is_visible(&self, index: usize, gap: Tick) -> bool {
    if index == 0 || self.current.is_some() {
      return true;
    }
    match (&self.last, self.periods.first()) {
      (Some(last), Some(next)) => next.start_tick() - last.end_tick() <= gap,
      _ => false,
    }
  }

  /// Rotation angle while playing: proportional to the remaining fraction
  /// of the current period.
  pub fn playing_angle(&self, time: Seconds, rotation_factor: f32) -> f32 {
    match &self.current {
      Some(period) => {
        -(((period.end_time - time) / period.duration()) as f32) * rotation_factor
      }
      None => 0.0,
    }
  }
}

/// Partitions note periods into the fewest clones such that no clone ever
/// plays two overlapping periods.
///
/// The assignment is greedy: each period is compared against every other,
/// and a period found to overlap goes to the first clone that is free at
/// its start tick plus `lookahead`. The lookahead treats a clone that is
/// about to start another note as still busy, so two clones never switch
/// roles within a visual instant. Periods in conflict with nothing go to
/// clone 0. A new clone is only stood up when every existing one is busy.
///
/// There is always at least one clone, even for an empty period list, so
/// idle-pose logic has something to drive.
pub fn allocate_clones(periods: &[NotePeriod], lookahead: Tick) -> Vec<InstrumentClone> {
  let mut clones = vec![InstrumentClone::new()];

  for (i, period) in periods.iter().enumerate() {
    let mut assigned = false;

    for (j, other) in periods.iter().enumerate() {
      if i == j {
        continue;
      }
      if period.start_tick() > other.end_tick() {
        continue;
      }
      if period.end_tick() < other.start_tick() {
        clones[0].assign(*period);
        assigned = true;
        break;
      }
      if period.start_tick() >= other.start_tick() && period.start_tick() <= other.end_tick() {
        let probe = period.start_tick() + lookahead;
        match clones.iter_mut().find(|clone| !clone.is_playing_at(probe)) {
          Some(clone) => clone.assign(*period),
          None => {
            let mut clone = InstrumentClone::new();
            clone.assign(*period);
            clones.push(clone);
          }
        }
      } else {
        clones[0].assign(*period);
      }
      assigned = true;
      break;
    }

    if !assigned {
      clones[0].assign(*period);
    }
  }

  debug!(
    "Allocated {} clones for {} note periods",
    clones.len(),
    periods.len()
  );
  clones
}

#[cfg(test)]
mod test {

  use super::{allocate_clones, InstrumentClone};
  use crate::midi::{NoteOff, NoteOn};
  use crate::period::NotePeriod;
  use crate::time::Tick;

  const LOOKAHEAD: Tick = Tick::new(120);

  fn period(note: u8, start: u64, end: u64) -> NotePeriod {
    NotePeriod {
      note,
      start_time: start as f64 / 960.0,
      end_time: end as f64 / 960.0,
      note_on: NoteOn::new(Tick::new(start), 0, note, 100),
      note_off: NoteOff::new(Tick::new(end), 0, note),
    }
  }

  fn overlap_free(clone: &InstrumentClone) -> bool {
    let periods = clone.periods();
    periods.iter().enumerate().all(|(i, a)| {
      periods
        .iter()
        .skip(i + 1)
        .all(|b| a.end_tick() <= b.start_tick() || b.end_tick() <= a.start_tick())
    })
  }

  #[test]
  pub fn no_periods_still_get_one_clone() {
    let clones = allocate_clones(&[], LOOKAHEAD);
    assert_eq!(clones.len(), 1);
    assert!(clones[0].periods().is_empty());
  }

  #[test]
  pub fn single_period_goes_to_clone_zero() {
    let clones = allocate_clones(&[period(60, 0, 960)], LOOKAHEAD);
    assert_eq!(clones.len(), 1);
    assert_eq!(clones[0].periods().len(), 1);
  }

  #[test]
  pub fn disjoint_periods_share_clone_zero() {
    let clones = allocate_clones(&[period(60, 0, 400), period(62, 800, 1200)], LOOKAHEAD);
    assert_eq!(clones.len(), 1);
    assert_eq!(clones[0].periods().len(), 2);
  }

  #[test]
  pub fn overlapping_pair_allocates_a_second_clone() {
    let clones = allocate_clones(&[period(60, 0, 960), period(64, 480, 1440)], LOOKAHEAD);
    assert_eq!(clones.len(), 2);
    assert_eq!(clones[0].periods()[0].note, 60);
    assert_eq!(clones[1].periods()[0].note, 64);
  }

  #[test]
  pub fn mutually_overlapping_triangle_needs_three_clones() {
    let clones = allocate_clones(
      &[period(60, 0, 960), period(64, 480, 1440), period(67, 800, 2000)],
      LOOKAHEAD,
    );
    assert_eq!(clones.len(), 3);
  }

  #[test]
  pub fn no_clone_ever_holds_overlapping_periods() {
    let periods = vec![
      period(60, 0, 960),
      period(64, 480, 1440),
      period(67, 800, 2000),
      period(69, 2200, 2600),
      period(71, 2400, 3000),
      period(72, 3200, 3600),
    ];
    let clones = allocate_clones(&periods, LOOKAHEAD);
    assert!(clones.iter().all(overlap_free));
    let assigned: usize = clones.iter().map(|clone| clone.periods().len()).sum();
    assert_eq!(assigned, periods.len());
  }

  #[test]
  pub fn advance_tracks_current_and_last() {
    let mut clones = allocate_clones(&[period(60, 0, 400), period(62, 800, 1200)], LOOKAHEAD);
    let clone = &mut clones[0];

    clone.advance(0.1);
    assert_eq!(clone.current().unwrap().note, 60);

    clone.advance(0.5);
    assert!(clone.current().is_none());

    clone.advance(0.9);
    assert_eq!(clone.current().unwrap().note, 62);
  }

  #[test]
  pub fn clone_zero_is_always_visible() {
    let clones = allocate_clones(&[], LOOKAHEAD);
    assert!(clones[0].is_visible(0, Tick::new(960)));
  }

  #[test]
  pub fn secondary_clone_lingers_within_the_gap() {
    let clones = allocate_clones(
      &[
        period(60, 0, 2000),
        period(64, 480, 960),
        period(65, 1400, 1800),
      ],
      LOOKAHEAD,
    );
    assert_eq!(clones.len(), 2);
    let mut second = clones.into_iter().nth(1).unwrap();
    assert_eq!(second.periods().len(), 2);

    // Past the first note, before the next one, gap is 440 ticks
    second.advance(1.1 / 960.0 * 1000.0);
    assert!(!second.is_playing());
    assert!(second.is_visible(1, Tick::new(960)));
    assert!(!second.is_visible(1, Tick::new(200)));
  }
}
