use crate::midi::{NoteOn, Velocity};
use crate::pose::{rad, Axis, PartId};
use crate::queue;
use crate::session::Session;
use crate::time::{Seconds, Tick};

const SQUARE_ROOT_OF_127: f64 = 11.269427;

/// What the stick has been up to on this tick.
pub struct StickStatus {
  strike: Option<NoteOn>,
  rotation_angle: f64,
  striking_for: Option<NoteOn>,
  visible: bool,
}

impl StickStatus {
  /// The strike whose time was crossed on this tick, if any. Non-empty for
  /// at most the single tick in which that happened.
  pub fn strike(&self) -> Option<&NoteOn> {
    self.strike.as_ref()
  }

  pub fn just_struck(&self) -> bool {
    self.strike.is_some()
  }

  /// Current angle in radians, within `[0, max_angle]`.
  pub fn rotation_angle(&self) -> f64 {
    self.rotation_angle
  }

  /// The strike the stick is currently rotating down towards, if any.
  pub fn striking_for(&self) -> Option<&NoteOn> {
    self.striking_for.as_ref()
  }

  pub fn is_visible(&self) -> bool {
    self.visible
  }
}

/// Kinematics for one drum stick, mallet or similar striker.
///
/// Owns its pending-strike queue and its rotation state, so each animated
/// striker carries its own history and no bookkeeping is shared between
/// parts. Must be ticked at most once per frame with non-decreasing time:
/// consumed strikes are gone for good.
pub struct Striker {
  part: PartId,
  strikes: Vec<NoteOn>,
  angle: f64,
  last_hit: Option<Tick>,
  strike_speed: f64,
  max_angle: f64,
  axis: Axis,
  sticky: bool,
}

impl Striker {
  pub fn new(strikes: Vec<NoteOn>, session: &Session) -> Striker {
    let config = &session.config().stick;
    Striker {
      part: PartId::new(),
      strikes,
      angle: 0.0,
      last_hit: None,
      strike_speed: config.strike_speed,
      max_angle: config.max_angle,
      axis: Axis::X,
      sticky: true,
    }
  }

  pub fn with_axis(mut self, axis: Axis) -> Striker {
    self.axis = axis;
    self
  }

  pub fn with_speed_and_angle(mut self, strike_speed: f64, max_angle: f64) -> Striker {
    self.strike_speed = strike_speed;
    self.max_angle = max_angle;
    self
  }

  pub fn non_sticky(mut self) -> Striker {
    self.sticky = false;
    self
  }

  pub fn part(&self) -> PartId {
    self.part
  }

  pub fn axis(&self) -> Axis {
    self.axis
  }

  pub fn pending_strikes(&self) -> usize {
    self.strikes.len()
  }

  /// Advances the striker to `time` and computes its status.
  ///
  /// Strikes whose time has passed are drained from the queue; when
  /// several fall within one tick the last drained wins, since only one
  /// stick position can be shown anyway. The approach ramp is scaled by
  /// the tempo in effect before the strike, so a strike at 180 BPM falls
  /// faster than one at 60. While no strike is close the angle eases back
  /// to the resting maximum instead of snapping.
  pub fn tick(&mut self, time: Seconds, delta: f64, session: &Session) -> StickStatus {
    let mut next_hit: Option<NoteOn> = self.strikes.first().copied();
    if let Some(last_drained) = queue::collect(&mut self.strikes, time, session.oracle()).pop() {
      next_hit = Some(last_drained);
    }

    let strike = next_hit
      .as_ref()
      .map_or(false, |hit| session.event_in_seconds(hit) <= time);

    let proposed = self.proposed_rotation(time, next_hit.as_ref(), session);
    let max_angle_rad = rad(self.max_angle);

    if proposed > self.max_angle {
      // Not yet ready to strike: recoil towards the resting angle
      if self.angle <= max_angle_rad {
        self.angle =
          (self.angle + session.config().stick.recoil_rate * delta).min(max_angle_rad);
      }
    } else {
      // Striking: the angle tracks the ramp directly, unsmoothed
      self.angle = rad(proposed.max(0.0).min(self.max_angle));
    }

    let mut visible = self.angle < max_angle_rad;

    if self.sticky {
      if strike {
        self.last_hit = next_hit.as_ref().map(|hit| hit.time);
      }
      if let (Some(first), Some(last_hit)) = (self.strikes.first(), self.last_hit) {
        if f64::from(first.time - last_hit) <= session.sticky_window_ticks() {
          visible = true;
        }
      }
    }

    StickStatus {
      strike: if strike { next_hit } else { None },
      rotation_angle: self.angle,
      striking_for: if proposed > self.max_angle { None } else { next_hit },
      visible,
    }
  }

  fn proposed_rotation(&self, time: Seconds, next_hit: Option<&NoteOn>, session: &Session) -> f64 {
    match next_hit {
      // Nothing to hit: idle just above the resting angle
      None => self.max_angle + 1.0,
      Some(hit) => {
        let tempo = session.tempo_before(hit.time);
        (session.event_in_seconds(hit) - time) * tempo.beats_per_minute() * self.strike_speed
      }
    }
  }
}

/// Scales recoil by note velocity. A square root ramp reads better than a
/// linear one: soft notes still produce a visible dip.
pub fn velocity_recoil_dampening(velocity: Velocity) -> f64 {
  f64::from(velocity).sqrt() / SQUARE_ROOT_OF_127
}

/// Translation state of a drum body that dips when hit and travels back to
/// rest at a constant rate.
pub struct DrumRecoil {
  offset: f32,
}

impl DrumRecoil {
  pub fn new() -> DrumRecoil {
    DrumRecoil { offset: 0.0 }
  }

  pub fn offset(&self) -> f32 {
    self.offset
  }

  /// Advances the comeback and, when `velocity` is present, snaps the drum
  /// down in proportion to it.
  pub fn tick(&mut self, velocity: Option<Velocity>, delta: f32, session: &Session) -> f32 {
    let config = &session.config().drum;
    self.offset = (self.offset + config.recoil_comeback * delta).min(0.0);
    if let Some(velocity) = velocity {
      self.offset =
        (velocity_recoil_dampening(velocity) * f64::from(-config.recoil_distance.abs())) as f32;
    }
    self.offset
  }
}
