use std::collections::HashMap;

use log::debug;

use crate::fretting::FrettingEngine;
use crate::instrument::activity::{activity_at, Placement};
use crate::instrument::InstrumentDriver;
use crate::midi::{Key, NoteEvent};
use crate::period::{build_note_periods, NotePeriod};
use crate::pose::{PartId, Pose, PoseBuffer, Vec3};
use crate::queue;
use crate::session::Session;
use crate::time::Seconds;

/// Driver for instruments with strings that are pressed to change pitch
/// (guitar, bass guitar, banjo).
///
/// Positions are resolved when a note-on drains and the string is released
/// when its note-off drains, a thirtieth of a second ahead of the nominal
/// end so repeated notes stay visually distinct. Notes starting on the
/// same tick are resolved in increasing pitch order, so lower notes claim
/// lower strings first, the way a player fingers a chord. A note that
/// finds no free string is simply not visualised.
pub struct FrettedInstrument {
  placement: Placement,
  engine: FrettingEngine,
  timeline: Vec<NotePeriod>,
  events: Vec<NoteEvent>,
  note_strings: HashMap<Key, usize>,
  string_parts: Vec<PartId>,
}

impl FrettedInstrument {
  pub fn new(
    events: &[NoteEvent],
    session: &Session,
    engine: FrettingEngine,
    stage_direction: Vec3,
  ) -> FrettedInstrument {
    let timeline = build_note_periods(events, session.oracle());

    // Only validated pairs reach the runtime queue, so every occupied
    // string is guaranteed a matching release
    let mut events: Vec<NoteEvent> = Vec::with_capacity(timeline.len() * 2);
    for period in &timeline {
      events.push(NoteEvent::from(period.note_on));
      events.push(NoteEvent::from(period.note_off));
    }
    // Note-offs sort ahead of note-ons on the same tick so a repeated
    // note frees its string before the next one claims it
    events.sort_by(|a, b| {
      a.time()
        .cmp(&b.time())
        .then_with(|| b.is_off().cmp(&a.is_off()))
        .then_with(|| a.key().cmp(&b.key()))
    });

    let string_parts = (0..engine.number_of_strings()).map(|_| PartId::new()).collect();

    FrettedInstrument {
      placement: Placement::new(stage_direction),
      engine,
      timeline,
      events,
      note_strings: HashMap::new(),
      string_parts,
    }
  }

  pub fn guitar(events: &[NoteEvent], session: &Session, stage_direction: Vec3) -> FrettedInstrument {
    FrettedInstrument::new(
      events,
      session,
      FrettingEngine::new(6, 22, vec![40, 45, 50, 55, 59, 64], 40, 79),
      stage_direction,
    )
  }

  pub fn bass_guitar(
    events: &[NoteEvent],
    session: &Session,
    stage_direction: Vec3,
  ) -> FrettedInstrument {
    FrettedInstrument::new(
      events,
      session,
      FrettingEngine::new(4, 22, vec![28, 33, 38, 43], 28, 65),
      stage_direction,
    )
  }

  pub fn banjo(events: &[NoteEvent], session: &Session, stage_direction: Vec3) -> FrettedInstrument {
    FrettedInstrument::new(
      events,
      session,
      FrettingEngine::new(4, 17, vec![48, 55, 62, 69], 48, 86),
      stage_direction,
    )
  }

  pub fn frets(&self) -> &[i32] {
    self.engine.frets()
  }

  pub fn string_parts(&self) -> &[PartId] {
    &self.string_parts
  }

  pub fn root_part(&self) -> PartId {
    self.placement.part()
  }

  pub fn set_stage_rank(&mut self, target: usize, count: usize) {
    self.placement.set_stage_rank(target, count);
  }
}

impl InstrumentDriver for FrettedInstrument {
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

    for event in queue::collect_with_off_gap(&mut self.events, time, session.oracle()) {
      match event {
        NoteEvent::On(on) => match self.engine.best_fretboard_position(on.key) {
          Some(position) => {
            self.engine.apply_fretboard_position(position);
            self.note_strings.insert(on.key, position.string);
          }
          None => debug!("No fretboard position for note {}", on.key),
        },
        NoteEvent::Off(off) => {
          // Notes that never found a string have nothing to release
          if let Some(string) = self.note_strings.remove(&off.key) {
            self.engine.release_string(string);
          }
        }
      }
    }

    let number_of_frets = self.engine.number_of_frets();
    for (string, part) in self.string_parts.iter().enumerate() {
      let fret = self.engine.frets()[string];
      out.push(
        *part,
        Pose {
          // Fraction of the neck the finger sits at; 0 is the nut
          translation: Vec3::new(fret.max(0) as f32 / number_of_frets as f32, 0.0, 0.0),
          visible: fret != -1,
          ..Pose::default()
        },
      );
    }
  }
}

#[cfg(test)]
mod test {

  use super::FrettedInstrument;
  use crate::config::Config;
  use crate::instrument::InstrumentDriver;
  use crate::midi::{NoteEvent, NoteOff, NoteOn};
  use crate::pose::{PoseBuffer, Vec3};
  use crate::session::Session;
  use crate::time::{Tempo, TempoMap, Tick};

  fn session() -> Session {
    let oracle = TempoMap::with_constant_tempo(480, Tempo::default());
    Session::new(Box::new(oracle), Config::default())
  }

  fn note(start: u64, end: u64, key: u8) -> Vec<NoteEvent> {
    vec![
      NoteEvent::from(NoteOn::new(Tick::new(start), 0, key, 100)),
      NoteEvent::from(NoteOff::new(Tick::new(end), 0, key)),
    ]
  }

  #[test]
  pub fn open_a_string_claims_string_one() {
    let session = session();
    let mut guitar = FrettedInstrument::guitar(&note(0, 960, 45), &session, Vec3::zero());
    let mut out = PoseBuffer::new();

    guitar.tick(0.1, 0.016, &session, &mut out);
    assert_eq!(guitar.frets(), &[-1, 0, -1, -1, -1, -1]);

    let part = guitar.string_parts()[1];
    assert!(out.pose_for(part).unwrap().visible);
  }

  #[test]
  pub fn string_is_released_when_the_note_ends() {
    let session = session();
    let mut guitar = FrettedInstrument::guitar(&note(0, 960, 45), &session, Vec3::zero());
    let mut out = PoseBuffer::new();

    guitar.tick(0.1, 0.016, &session, &mut out);
    out.reset();
    guitar.tick(1.1, 0.016, &session, &mut out);

    assert_eq!(guitar.frets(), &[-1; 6]);
    let part = guitar.string_parts()[1];
    assert!(!out.pose_for(part).unwrap().visible);
  }

  #[test]
  pub fn repeated_notes_leave_a_visible_gap() {
    let session = session();
    // The same pitch back to back: 0-960 and 960-1920 ticks
    let mut events = Vec::new();
    events.extend(note(0, 960, 45));
    events.extend(note(960, 1920, 45));
    let mut guitar = FrettedInstrument::guitar(&events, &session, Vec3::zero());
    let mut out = PoseBuffer::new();

    // Just before the boundary the note-off has already drained, a
    // thirtieth of a second early, and the string sits free
    guitar.tick(0.98, 0.016, &session, &mut out);
    assert_eq!(guitar.frets(), &[-1; 6]);

    // At the boundary the second note claims the string again
    out.reset();
    guitar.tick(1.0, 0.016, &session, &mut out);
    assert_eq!(guitar.frets(), &[-1, 0, -1, -1, -1, -1]);
  }

  #[test]
  pub fn chord_notes_claim_strings_in_pitch_order() {
    let session = session();
    // E major shape: 40, 47, 52 starting on the same tick, authored
    // high-to-low
    let mut events = Vec::new();
    events.extend(note(0, 960, 52));
    events.extend(note(0, 960, 47));
    events.extend(note(0, 960, 40));
    let mut guitar = FrettedInstrument::guitar(&events, &session, Vec3::zero());
    let mut out = PoseBuffer::new();

    guitar.tick(0.1, 0.016, &session, &mut out);

    // 40 takes the low E open; 47 sits on the A string; 52 on the D string
    assert_eq!(guitar.frets()[0], 0);
    assert_eq!(guitar.frets()[1], 2);
    assert_eq!(guitar.frets()[2], 2);
  }

  #[test]
  pub fn unplaceable_note_is_skipped_silently() {
    let session = session();
    // Pitches 40 and 41 both fit only the lowest string; 40 claims it
    // first, leaving 41 with nowhere to go
    let mut events = Vec::new();
    events.extend(note(0, 960, 40));
    events.extend(note(0, 960, 41));
    let mut guitar = FrettedInstrument::guitar(&events, &session, Vec3::zero());
    let mut out = PoseBuffer::new();

    guitar.tick(0.1, 0.016, &session, &mut out);
    assert_eq!(guitar.frets(), &[0, -1, -1, -1, -1, -1]);

    // The skipped note's off must not disturb the occupied string
    out.reset();
    guitar.tick(0.98, 0.016, &session, &mut out);
    assert_eq!(guitar.frets(), &[-1; 6]);
  }

  #[test]
  pub fn bass_and_banjo_presets_cover_their_ranges() {
    let session = session();
    let bass = FrettedInstrument::bass_guitar(&[], &session, Vec3::zero());
    assert_eq!(bass.frets().len(), 4);

    let banjo = FrettedInstrument::banjo(&[], &session, Vec3::zero());
    assert_eq!(banjo.frets().len(), 4);
  }
}
