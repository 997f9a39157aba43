use crate::instrument::activity::{visible_by_hits, Placement};
use crate::instrument::InstrumentDriver;
use crate::midi::{Key, NoteEvent, NoteOn};
use crate::pose::{PartId, Pose, PoseBuffer, Rotation, Vec3};
use crate::session::Session;
use crate::stick::{DrumRecoil, Striker};
use crate::time::Seconds;

/// The lowest note a mallet instrument can play.
pub const MALLET_RANGE_LOW: Key = 21;

/// The highest note a mallet instrument can play.
pub const MALLET_RANGE_HIGH: Key = 108;

const MALLET_BAR_COUNT: usize = 88;

struct MalletBar {
  note: Key,
  bar_part: PartId,
  striker: Striker,
  recoil: DrumRecoil,
}

/// Driver for vibraphone, marimba, glockenspiel and xylophone.
///
/// One bar and one mallet per chromatic key across the 88-key range. Each
/// mallet owns the strikes for its pitch; a struck bar dips in proportion
/// to velocity and travels back up.
pub struct MalletInstrument {
  placement: Placement,
  hits: Vec<NoteOn>,
  bars: Vec<MalletBar>,
}

impl MalletInstrument {
  pub fn new(events: &[NoteEvent], session: &Session, stage_direction: Vec3) -> MalletInstrument {
    let hits: Vec<NoteOn> = events
      .iter()
      .filter_map(|event| match event {
        NoteEvent::On(on) => Some(*on),
        NoteEvent::Off(_) => None,
      })
      .collect();

    let bars = (0..MALLET_BAR_COUNT)
      .map(|index| {
        let note = MALLET_RANGE_LOW + index as Key;
        let strikes = hits.iter().filter(|hit| hit.key == note).cloned().collect();
        MalletBar {
          note,
          bar_part: PartId::new(),
          striker: Striker::new(strikes, session).non_sticky(),
          recoil: DrumRecoil::new(),
        }
      })
      .collect();

    MalletInstrument {
      placement: Placement::new(stage_direction),
      hits,
      bars,
    }
  }

  pub fn root_part(&self) -> PartId {
    self.placement.part()
  }

  pub fn bar_part(&self, note: Key) -> Option<PartId> {
    self.bars.iter().find(|bar| bar.note == note).map(|bar| bar.bar_part)
  }

  pub fn striker_part(&self, note: Key) -> Option<PartId> {
    self
      .bars
      .iter()
      .find(|bar| bar.note == note)
      .map(|bar| bar.striker.part())
  }

  pub fn set_stage_rank(&mut self, target: usize, count: usize) {
    self.placement.set_stage_rank(target, count);
  }
}

impl InstrumentDriver for MalletInstrument {
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

    for bar in self.bars.iter_mut() {
      let status = bar.striker.tick(time, delta, session);
      let velocity = status.strike().map(|strike| strike.velocity);
      let dip = bar.recoil.tick(velocity, delta as f32, session);

      out.push(
        bar.striker.part(),
        Pose {
          rotation: Rotation::new(bar.striker.axis(), status.rotation_angle() as f32),
          visible: status.is_visible(),
          ..Pose::default()
        },
      );
      out.push(
        bar.bar_part,
        Pose {
          translation: Vec3::new(0.0, dip, 0.0),
          ..Pose::default()
        },
      );
    }
  }
}
