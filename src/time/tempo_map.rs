use std::cmp::min;

use crate::time::{Seconds, Tempo, TempoOracle, Tick};

///! A tempo change taking effect at a given tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempoChange {
  pub time: Tick,
  pub tempo: Tempo,
}

impl TempoChange {
  pub fn new(time: Tick, tempo: Tempo) -> TempoChange {
    TempoChange { time, tempo }
  }
}

/// A concrete tempo oracle built from the tempo changes of a loaded file.
///
/// The changes are kept sorted by tick; a default 120 BPM change at tick
/// zero is inserted when the file declares none, as sequencers do.
pub struct TempoMap {
  division: u16,
  changes: Vec<TempoChange>,
}

impl TempoMap {
  pub fn new(division: u16, mut changes: Vec<TempoChange>) -> TempoMap {
    changes.sort_by_key(|change| change.time);
    if changes.first().map_or(true, |change| change.time > Tick::zero()) {
      changes.insert(0, TempoChange::new(Tick::zero(), Tempo::default()));
    }
    TempoMap { division, changes }
  }

  pub fn with_constant_tempo(division: u16, tempo: Tempo) -> TempoMap {
    TempoMap::new(division, vec![TempoChange::new(Tick::zero(), tempo)])
  }

  fn ticks_to_beats(&self, ticks: Tick) -> f64 {
    f64::from(ticks) / f64::from(self.division)
  }
}

impl TempoOracle for TempoMap {
  fn division(&self) -> u16 {
    self.division
  }

  fn tick_to_seconds(&self, tick: Tick) -> Seconds {
    if self.changes.len() == 1 {
      return self.changes[0].tempo.seconds_per_beat() * self.ticks_to_beats(tick);
    }

    let mut seconds = 0.0;
    for (index, change) in self.changes.iter().enumerate() {
      if change.time >= tick {
        break;
      }
      let span_end = match self.changes.get(index + 1) {
        Some(next) => min(next.time, tick),
        None => tick,
      };
      seconds += self.ticks_to_beats(span_end - change.time) * change.tempo.seconds_per_beat();
    }
    seconds
  }

  fn tempo_before(&self, tick: Tick) -> Tempo {
    if self.changes.len() == 1 || tick == Tick::zero() {
      return self.changes[0].tempo;
    }
    self
      .changes
      .iter()
      .rev()
      .find(|change| change.time < tick)
      .unwrap_or(&self.changes[0])
      .tempo
  }
}
