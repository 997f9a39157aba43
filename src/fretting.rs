use std::cmp::Ordering;

use crate::midi::Key;

/// Number of recently applied positions kept for the temporal-locality
/// heuristic.
const RUNNING_AVERAGE_COUNT: usize = 10;

/// A location on the fretboard: fret 0 is the open string.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct FretboardPosition {
  pub string: usize,
  pub fret: i32,
}

impl FretboardPosition {
  pub fn new(string: usize, fret: i32) -> FretboardPosition {
    FretboardPosition { string, fret }
  }

  pub fn distance(&self, other: &FretboardPosition) -> f64 {
    let string_delta = self.string as f64 - other.string as f64;
    let fret_delta = f64::from(self.fret) - f64::from(other.fret);
    (string_delta * string_delta + fret_delta * fret_delta).sqrt()
  }
}

/// Resolves pitches to (string, fret) positions while honouring string
/// exclusivity.
///
/// Among the strings a pitch fits on, the engine picks the one closest to
/// the running average of the last few positions used. This biases the
/// animation toward staying in one hand position rather than leaping
/// across the fretboard, which is what a real player does. The flip side
/// is that identical pitch sequences may fret differently depending on
/// what was played before.
pub struct FrettingEngine {
  frets: Vec<i32>,
  open_string_notes: Vec<Key>,
  range_low: Key,
  range_high: Key,
  number_of_frets: i32,
  running_average: Vec<FretboardPosition>,
}

impl FrettingEngine {
  /// Panics if the number of open string notes does not match the number
  /// of strings.
  pub fn new(
    number_of_strings: usize,
    number_of_frets: i32,
    open_string_notes: Vec<Key>,
    range_low: Key,
    range_high: Key,
  ) -> FrettingEngine {
    assert_eq!(
      open_string_notes.len(),
      number_of_strings,
      "the number of open string notes does not match the number of strings"
    );
    FrettingEngine {
      frets: vec![-1; number_of_strings],
      open_string_notes,
      range_low,
      range_high,
      number_of_frets,
      running_average: Vec::new(),
    }
  }

  pub fn number_of_strings(&self) -> usize {
    self.frets.len()
  }

  pub fn number_of_frets(&self) -> i32 {
    self.number_of_frets
  }

  pub fn range_low(&self) -> Key {
    self.range_low
  }

  pub fn range_high(&self) -> Key {
    self.range_high
  }

  /// The best free position for the given pitch, or `None` when the pitch
  /// is out of range or every string it fits on is occupied. Does not
  /// mutate the engine.
  pub fn best_fretboard_position(&self, note: Key) -> Option<FretboardPosition> {
    let mut candidates: Vec<FretboardPosition> = Vec::new();

    if note >= self.range_low && note <= self.range_high {
      for (string, open_note) in self.open_string_notes.iter().enumerate() {
        let fret = i32::from(note) - i32::from(*open_note);
        if fret < 0 || fret > self.number_of_frets || self.frets[string] != -1 {
          continue;
        }
        candidates.push(FretboardPosition::new(string, fret));
      }
    }

    let average = self.running_average_position();
    candidates.sort_by(|a, b| {
      a.distance(&average)
        .partial_cmp(&b.distance(&average))
        .unwrap_or(Ordering::Equal)
    });
    candidates.first().copied()
  }

  /// Occupies the string of the given position and records it in the
  /// running average. Panics if the string is already occupied: that means
  /// the caller's apply/release sequencing is broken, and carrying on
  /// would silently desynchronise the animation.
  pub fn apply_fretboard_position(&mut self, position: FretboardPosition) {
    assert!(
      self.frets[position.string] == -1,
      "string {} is already occupied",
      position.string
    );

    self.frets[position.string] = position.fret;
    self.running_average.push(position);
    if self.running_average.len() > RUNNING_AVERAGE_COUNT {
      self.running_average.remove(0);
    }
  }

  /// Frees a string for reuse. Panics if the string does not exist.
  pub fn release_string(&mut self, string: usize) {
    assert!(
      string < self.frets.len(),
      "can't release string {} on a {}-string instrument",
      string,
      self.frets.len()
    );
    self.frets[string] = -1;
  }

  /// The current fret held on each string, -1 for a free string.
  pub fn frets(&self) -> &[i32] {
    &self.frets
  }

  /// Rounded arithmetic mean of the recent positions, or the open lowest
  /// string when nothing has been played yet. The mean may land on a shape
  /// no hand ever played; that is accepted behaviour.
  fn running_average_position(&self) -> FretboardPosition {
    if self.running_average.is_empty() {
      return FretboardPosition::new(0, 0);
    }
    let string_sum: f64 = self
      .running_average
      .iter()
      .map(|position| position.string as f64)
      .sum();
    let fret_sum: f64 = self
      .running_average
      .iter()
      .map(|position| f64::from(position.fret))
      .sum();
    let count = self.running_average.len() as f64;
    FretboardPosition::new(
      (string_sum / count).round() as usize,
      (fret_sum / count).round() as i32,
    )
  }
}

#[cfg(test)]
mod test {

  use super::{FretboardPosition, FrettingEngine};

  fn guitar() -> FrettingEngine {
    FrettingEngine::new(6, 22, vec![40, 45, 50, 55, 59, 64], 40, 79)
  }

  #[test]
  pub fn open_string_wins_with_no_history() {
    let engine = guitar();
    assert_eq!(
      engine.best_fretboard_position(45),
      Some(FretboardPosition::new(1, 0))
    );
  }

  #[test]
  pub fn out_of_range_pitches_have_no_position() {
    let engine = guitar();
    assert_eq!(engine.best_fretboard_position(39), None);
    assert_eq!(engine.best_fretboard_position(80), None);
    assert_eq!(engine.best_fretboard_position(40).unwrap(), FretboardPosition::new(0, 0));
    assert!(engine.best_fretboard_position(79).is_some());
  }

  #[test]
  pub fn occupied_strings_are_skipped() {
    let mut engine = guitar();
    let first = engine.best_fretboard_position(45).unwrap();
    engine.apply_fretboard_position(first);
    let second = engine.best_fretboard_position(45).unwrap();
    assert_ne!(second.string, first.string);
  }

  #[test]
  pub fn all_valid_strings_occupied_yields_none() {
    let mut engine = guitar();
    // Pitch 40 only fits the lowest string
    engine.apply_fretboard_position(FretboardPosition::new(0, 0));
    assert_eq!(engine.best_fretboard_position(40), None);
  }

  #[test]
  pub fn frets_reflect_applied_positions_exactly() {
    let mut engine = guitar();
    engine.apply_fretboard_position(FretboardPosition::new(0, 3));
    engine.apply_fretboard_position(FretboardPosition::new(2, 5));
    assert_eq!(engine.frets(), &[3, -1, 5, -1, -1, -1]);

    engine.release_string(0);
    assert_eq!(engine.frets(), &[-1, -1, 5, -1, -1, -1]);

    engine.release_string(2);
    assert_eq!(engine.frets(), &[-1; 6]);
  }

  #[test]
  #[should_panic(expected = "already occupied")]
  pub fn double_occupying_a_string_panics() {
    let mut engine = guitar();
    engine.apply_fretboard_position(FretboardPosition::new(1, 0));
    engine.apply_fretboard_position(FretboardPosition::new(1, 5));
  }

  #[test]
  #[should_panic(expected = "can't release string")]
  pub fn releasing_a_missing_string_panics() {
    let mut engine = guitar();
    engine.release_string(6);
  }

  #[test]
  pub fn running_average_pulls_positions_together() {
    let mut engine = guitar();
    // Establish a hand position high up the neck
    engine.apply_fretboard_position(FretboardPosition::new(4, 10));
    engine.apply_fretboard_position(FretboardPosition::new(5, 10));
    engine.release_string(4);
    engine.release_string(5);

    // Pitch 69 fits string 1 fret 24 (too high), string 2 fret 19,
    // string 3 fret 14, string 4 fret 10 and string 5 fret 5. With the
    // average near (4.5, 10), string 4 fret 10 is the closest.
    assert_eq!(
      engine.best_fretboard_position(69),
      Some(FretboardPosition::new(4, 10))
    );
  }

  #[test]
  pub fn euclidean_distance_trades_strings_against_frets() {
    let engine = guitar();
    // Pitch 59 fits five strings; the open B string is four strings away
    // from the default average but zero frets, beating string 3 fret 4.
    assert_eq!(
      engine.best_fretboard_position(59),
      Some(FretboardPosition::new(4, 0))
    );
  }

  #[test]
  pub fn running_average_window_evicts_the_oldest_entry() {
    let mut engine = guitar();
    engine.apply_fretboard_position(FretboardPosition::new(5, 22));
    engine.release_string(5);
    for _ in 0..10 {
      engine.apply_fretboard_position(FretboardPosition::new(1, 1));
      engine.release_string(1);
    }
    // The high outlier has been pushed out of the ten-entry window, so the
    // average sits at (1, 1) and pitch 50 resolves to the open D string.
    // With the outlier still in the window it would resolve to (1, 5).
    assert_eq!(
      engine.best_fretboard_position(50),
      Some(FretboardPosition::new(2, 0))
    );
  }
}
