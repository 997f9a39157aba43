use crate::time::Tick;

pub type Channel = u8;
pub type Key = u8;
pub type Velocity = u8;

pub const MAX_KEY: usize = 127;

/// Anything that happens at a tick.
pub trait Timed {
  fn time(&self) -> Tick;
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NoteOn {
  pub time: Tick,
  pub channel: Channel,
  pub key: Key,
  pub velocity: Velocity,
}

impl NoteOn {
  pub fn new(time: Tick, channel: Channel, key: Key, velocity: Velocity) -> NoteOn {
    NoteOn {
      time,
      channel,
      key,
      velocity,
    }
  }
}

impl Timed for NoteOn {
  fn time(&self) -> Tick {
    self.time
  }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct NoteOff {
  pub time: Tick,
  pub channel: Channel,
  pub key: Key,
}

impl NoteOff {
  pub fn new(time: Tick, channel: Channel, key: Key) -> NoteOff {
    NoteOff { time, channel, key }
  }
}

impl Timed for NoteOff {
  fn time(&self) -> Tick {
    self.time
  }
}

///! A note event of either kind, as they appear interleaved in a track
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum NoteEvent {
  On(NoteOn),
  Off(NoteOff),
}

impl NoteEvent {
  pub fn key(&self) -> Key {
    match self {
      NoteEvent::On(event) => event.key,
      NoteEvent::Off(event) => event.key,
    }
  }

  pub fn is_off(&self) -> bool {
    match self {
      NoteEvent::On(_) => false,
      NoteEvent::Off(_) => true,
    }
  }
}

impl Timed for NoteEvent {
  fn time(&self) -> Tick {
    match self {
      NoteEvent::On(event) => event.time,
      NoteEvent::Off(event) => event.time,
    }
  }
}

impl From<NoteOn> for NoteEvent {
  fn from(item: NoteOn) -> Self {
    NoteEvent::On(item)
  }
}

impl From<NoteOff> for NoteEvent {
  fn from(item: NoteOff) -> Self {
    NoteEvent::Off(item)
  }
}
