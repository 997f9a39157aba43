pub mod tempo;
pub mod tempo_map;
pub mod tick;

pub use self::tempo::Tempo;
pub use self::tempo_map::{TempoChange, TempoMap};
pub use self::tick::Tick;

pub type Seconds = f64;

///! The narrow interface of the external tempo/time collaborator.
///! Converts raw MIDI ticks into playback seconds and reports the tempo
///! in effect before a given tick.
pub trait TempoOracle {
  fn division(&self) -> u16;
  fn tick_to_seconds(&self, tick: Tick) -> Seconds;
  fn tempo_before(&self, tick: Tick) -> Tempo;
}
