pub mod activity;
pub mod fretted;
pub mod mallet;
pub mod monophonic;
pub mod percussion;

pub use self::activity::{Activity, Placement};

use crate::pose::PoseBuffer;
use crate::session::Session;
use crate::time::Seconds;

/// A per-instrument animation driver.
///
/// Drivers are ticked once per rendered frame, on the thread that owns the
/// scene, with a non-decreasing playback time. Re-ticking at the same time
/// is harmless: queue draining is keyed on time, so nothing is consumed
/// twice.
pub trait InstrumentDriver {
  fn tick(&mut self, time: Seconds, delta: f64, session: &Session, out: &mut PoseBuffer);
}
