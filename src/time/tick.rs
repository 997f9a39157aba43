use std::{
  cmp::{min, Ordering},
  ops::{Add, AddAssign, Div, Sub, SubAssign},
};

///! A point in time expressed in raw MIDI ticks
#[derive(Debug, Eq, Copy, Clone)]
pub struct Tick(u64);

impl Tick {
  pub const fn new(ticks: u64) -> Tick {
    Tick(ticks)
  }

  pub const fn zero() -> Tick {
    Tick(0)
  }
}

impl Ord for Tick {
  fn cmp(&self, other: &Tick) -> Ordering {
    self.0.cmp(&other.0)
  }
}

impl PartialOrd for Tick {
  fn partial_cmp(&self, other: &Tick) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl PartialEq for Tick {
  fn eq(&self, other: &Tick) -> bool {
    self.0 == other.0
  }
}

impl Add for Tick {
  type Output = Tick;
  fn add(self, rhs: Tick) -> Self {
    Tick::new(self.0 + rhs.0)
  }
}

impl AddAssign for Tick {
  fn add_assign(&mut self, rhs: Tick) {
    *self = *self + rhs;
  }
}

impl Sub for Tick {
  type Output = Tick;
  fn sub(self, rhs: Tick) -> Self {
    Tick::new(self.0 - min(self.0, rhs.0))
  }
}

impl SubAssign for Tick {
  fn sub_assign(&mut self, rhs: Tick) {
    *self = *self - rhs;
  }
}

impl Div<u64> for Tick {
  type Output = Tick;
  fn div(self, rhs: u64) -> Self {
    Tick::new(self.0 / rhs)
  }
}

impl From<u64> for Tick {
  fn from(item: u64) -> Self {
    Tick::new(item)
  }
}

impl From<Tick> for u64 {
  fn from(item: Tick) -> Self {
    item.0
  }
}

impl From<Tick> for f64 {
  fn from(item: Tick) -> Self {
    item.0 as f64
  }
}
