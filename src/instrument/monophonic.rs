use crate::instrument::activity::{activity_at, Placement};
use crate::instrument::InstrumentDriver;
use crate::midi::NoteEvent;
use crate::period::{build_note_periods, NotePeriod};
use crate::polyphony::{allocate_clones, InstrumentClone};
use crate::pose::{Axis, PartId, Pose, PoseBuffer, Rotation, Vec3};
use crate::session::Session;
use crate::time::Seconds;

/// Driver for instruments with one visual voice per note (saxophones,
/// clarinets, ocarinas and their kin).
///
/// Polyphony in the file is shown by clones: extra instances of the
/// instrument, allocated up front, each animating a non-overlapping subset
/// of the note periods. While playing, a clone leans by a rotation
/// proportional to how much of its current note remains.
pub struct MonophonicInstrument {
  placement: Placement,
  timeline: Vec<NotePeriod>,
  clones: Vec<InstrumentClone>,
  clone_parts: Vec<PartId>,
  rotation_factor: f32,
  rotation_axis: Axis,
  polyphony_offset: Vec3,
}

impl MonophonicInstrument {
  pub fn new(
    events: &[NoteEvent],
    session: &Session,
    rotation_factor: f32,
    rotation_axis: Axis,
    polyphony_offset: Vec3,
    stage_direction: Vec3,
  ) -> MonophonicInstrument {
    let periods = build_note_periods(events, session.oracle());
    let clones = allocate_clones(&periods, session.clone_lookahead());
    let clone_parts = clones.iter().map(|_| PartId::new()).collect();

    MonophonicInstrument {
      placement: Placement::new(stage_direction),
      timeline: periods,
      clones,
      clone_parts,
      rotation_factor,
      rotation_axis,
      polyphony_offset,
    }
  }

  pub fn clones(&self) -> &[InstrumentClone] {
    &self.clones
  }

  pub fn clone_parts(&self) -> &[PartId] {
    &self.clone_parts
  }

  pub fn root_part(&self) -> PartId {
    self.placement.part()
  }

  pub fn set_stage_rank(&mut self, target: usize, count: usize) {
    self.placement.set_stage_rank(target, count);
  }
}

impl InstrumentDriver for MonophonicInstrument {
  fn tick(&mut self, time: Seconds, delta: f64, session: &Session, out: &mut PoseBuffer) {
    let activity = activity_at(time, &self.timeline, session);
    let stage_offset = self.placement.tick(delta);
    out.push(
      self.placement.part(),
      Pose {
        translation: stage_offset,
        visible: activity.is_visible(),
        ..Pose::default()
      },
    );

    for clone in self.clones.iter_mut() {
      clone.advance(time);
    }

    let gap = session.clone_gap();
    let visibility: Vec<bool> = self
      .clones
      .iter()
      .enumerate()
      .map(|(index, clone)| clone.is_visible(index, gap))
      .collect();

    for (index, clone) in self.clones.iter().enumerate() {
      // Visible clones pack towards slot zero so there is never a hole
      // between two instances
      let slot = if visibility[index] {
        visibility[..index].iter().filter(|visible| **visible).count()
      } else {
        0
      };

      out.push(
        self.clone_parts[index],
        Pose {
          translation: self.polyphony_offset * slot as f32,
          rotation: Rotation::new(
            self.rotation_axis,
            clone.playing_angle(time, self.rotation_factor),
          ),
          visible: visibility[index],
          ..Pose::default()
        },
      );
    }
  }
}
