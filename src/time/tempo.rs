///! The MIDI default tempo: 120 beats per minute
pub const DEFAULT_MICROS_PER_BEAT: u32 = 500_000;

const MICROS_PER_MINUTE: f64 = 60_000_000.0;
const MICROS_PER_SECOND: f64 = 1_000_000.0;

///! A tempo expressed the way MIDI files express it: microseconds per quarter note
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tempo(u32);

impl Tempo {
  pub fn new(micros_per_beat: u32) -> Tempo {
    Tempo(micros_per_beat)
  }

  pub fn get_micros_per_beat(&self) -> u32 {
    self.0
  }

  pub fn beats_per_minute(&self) -> f64 {
    MICROS_PER_MINUTE / f64::from(self.0)
  }

  pub fn seconds_per_beat(&self) -> f64 {
    f64::from(self.0) / MICROS_PER_SECOND
  }
}

impl Default for Tempo {
  fn default() -> Tempo {
    Tempo(DEFAULT_MICROS_PER_BEAT)
  }
}

impl From<Tempo> for u32 {
  fn from(item: Tempo) -> Self {
    item.0
  }
}

impl From<Tempo> for f64 {
  fn from(item: Tempo) -> Self {
    f64::from(item.0)
  }
}
