use crate::config::Config;
use crate::midi::Timed;
use crate::time::{Seconds, Tempo, TempoOracle, Tick};

/// Per-playback context threaded through every tick call.
///
/// Owns the tempo oracle and the engine configuration for one loaded file.
/// There is no global state anywhere in the engine; everything an
/// instrument needs at runtime comes through here.
pub struct Session {
  oracle: Box<dyn TempoOracle>,
  config: Config,
}

impl Session {
  pub fn new(oracle: Box<dyn TempoOracle>, config: Config) -> Session {
    Session { oracle, config }
  }

  pub fn config(&self) -> &Config {
    &self.config
  }

  pub fn oracle(&self) -> &dyn TempoOracle {
    &*self.oracle
  }

  pub fn division(&self) -> u16 {
    self.oracle.division()
  }

  pub fn tick_to_seconds(&self, tick: Tick) -> Seconds {
    self.oracle.tick_to_seconds(tick)
  }

  pub fn event_in_seconds<E: Timed>(&self, event: &E) -> Seconds {
    self.oracle.tick_to_seconds(event.time())
  }

  pub fn tempo_before(&self, tick: Tick) -> Tempo {
    self.oracle.tempo_before(tick)
  }

  ///! Ticks a note may start ahead of a busy clone and still count as
  ///! overlapping it
  pub fn clone_lookahead(&self) -> Tick {
    Tick::new(u64::from(self.division()) / self.config.animation.clone_lookahead_divisor)
  }

  ///! Maximum gap, in ticks, between two notes of a clone that keeps the
  ///! clone visible in between
  pub fn clone_gap(&self) -> Tick {
    self.beats_to_ticks(self.config.animation.clone_gap_beats)
  }

  ///! Window, in ticks, within which an upcoming strike keeps a sticky
  ///! stick visible
  pub fn sticky_window_ticks(&self) -> f64 {
    f64::from(self.division()) * self.config.stick.sticky_beats
  }

  pub fn beats_to_ticks(&self, beats: f64) -> Tick {
    Tick::new((f64::from(self.division()) * beats).round() as u64)
  }
}
