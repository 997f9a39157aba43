use crate::instrument::activity::{visible_by_hits, Placement};
use crate::instrument::InstrumentDriver;
use crate::midi::{NoteEvent, NoteOn};
use crate::pose::{PartId, Pose, PoseBuffer, Rotation, Vec3};
use crate::session::Session;
use crate::stick::{DrumRecoil, Striker};
use crate::time::Seconds;

/// Driver for one stick-struck percussion piece: a drum body plus the
/// stick that hits it.
///
/// The stick is sticky: it stays on screen between strikes that are close
/// together instead of flickering in and out. The drum dips on each strike
/// in proportion to velocity.
pub struct PercussionInstrument {
  placement: Placement,
  drum_part: PartId,
  striker: Striker,
  recoil: DrumRecoil,
  hits: Vec<NoteOn>,
}

impl PercussionInstrument {
  pub fn new(events: &[NoteEvent], session: &Session, stage_direction: Vec3) -> PercussionInstrument {
    let hits: Vec<NoteOn> = events
      .iter()
      .filter_map(|event| match event {
        NoteEvent::On(on) => Some(*on),
        NoteEvent::Off(_) => None,
      })
      .collect();

    PercussionInstrument {
      placement: Placement::new(stage_direction),
      drum_part: PartId::new(),
      striker: Striker::new(hits.clone(), session),
      recoil: DrumRecoil::new(),
      hits,
    }
  }

  pub fn root_part(&self) -> PartId {
    self.placement.part()
  }

  pub fn drum_part(&self) -> PartId {
    self.drum_part
  }

  pub fn stick_part(&self) -> PartId {
    self.striker.part()
  }

  pub fn set_stage_rank(&mut self, target: usize, count: usize) {
    self.placement.set_stage_rank(target, count);
  }
}

impl InstrumentDriver for PercussionInstrument {
  fn tick(&mut self, time: Seconds, delta: f64, session: &Session, out: &mut PoseBuffer) {
    let stage_offset = self.placement.tick(delta);
    out.push(
      self.placement.part(),
      Pose {
        translation: stage_offset,
        visible: visible_by_hits(time, &self.hits, session),
        ..Pose::default()
      },
    );

    let status = self.striker.tick(time, delta, session);
    let velocity = status.strike().map(|strike| strike.velocity);
    let dip = self.recoil.tick(velocity, delta as f32, session);

    out.push(
      self.drum_part,
      Pose {
        translation: Vec3::new(0.0, dip, 0.0),
        ..Pose::default()
      },
    );
    out.push(
      self.striker.part(),
      Pose {
        rotation: Rotation::new(self.striker.axis(), status.rotation_angle() as f32),
        visible: status.is_visible(),
        ..Pose::default()
      },
    );
  }
}
