use crate::midi::NoteOn;
use crate::period::NotePeriod;
use crate::pose::{PartId, Vec3};
use crate::session::Session;
use crate::time::Seconds;

/// Coarse state of an instrument at a point in time: off stage, standing
/// idle, or playing a note.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Activity {
  Dormant,
  Idle,
  Playing,
}

impl Activity {
  pub fn is_visible(&self) -> bool {
    *self != Activity::Dormant
  }
}

/// Activity of a sustained instrument, judged against its full, unconsumed
/// period timeline: playing while inside a period, idle-visible shortly
/// before a period starts and for a while after one ends, dormant
/// otherwise.
pub fn activity_at(time: Seconds, periods: &[NotePeriod], session: &Session) -> Activity {
  let config = &session.config().animation;
  let mut idle = false;
  for period in periods {
    if period.is_playing_at(time) {
      return Activity::Playing;
    }
    if (time - period.start_time).abs() < config.start_buffer
      || ((time - period.end_time).abs() < config.end_buffer && time > period.end_time)
    {
      idle = true;
    }
  }
  if idle {
    Activity::Idle
  } else {
    Activity::Dormant
  }
}

/// Visibility of a decayed instrument, whose notes are instants rather
/// than spans: shown shortly before an upcoming hit and for a while after
/// the last one.
pub fn visible_by_hits(time: Seconds, hits: &[NoteOn], session: &Session) -> bool {
  let config = &session.config().animation;
  hits.iter().any(|hit| {
    let hit_time = session.event_in_seconds(hit);
    if hit_time >= time {
      hit_time - time < config.start_buffer
    } else {
      time - hit_time < config.end_buffer
    }
  })
}

/// Stage placement of one instrument among multiple instances of its type.
///
/// Instances do not snap to their slot; the offset glides towards the
/// target rank so entering and leaving instruments slide into place.
pub struct Placement {
  part: PartId,
  direction: Vec3,
  index: f64,
  target: usize,
  count: usize,
}

impl Placement {
  pub fn new(direction: Vec3) -> Placement {
    Placement {
      part: PartId::new(),
      direction,
      index: 0.0,
      target: 0,
      count: 0,
    }
  }

  /// The root part this placement moves.
  pub fn part(&self) -> PartId {
    self.part
  }

  /// Sets where this instance currently ranks among the visible instances
  /// of its type, and how many instances exist in total.
  pub fn set_stage_rank(&mut self, target: usize, count: usize) {
    self.target = target;
    self.count = count;
  }

  pub fn tick(&mut self, delta: Seconds) -> Vec3 {
    self.index += delta * 5.0 * (self.target as f64 - self.index);
    self.index = self.index.min(self.count as f64);
    self.direction * self.index as f32
  }
}
