use failure::Error;

use serde_derive::Deserialize;

use std::fs::File;
use std::io::Read;

/// Tunables for the note-to-animation mapping.
///
/// The defaults reproduce the empirically tuned values the animation was
/// designed around; they are exposed here rather than hardcoded so they can
/// be adjusted without touching the engine.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Animation {
  /// Clone lookahead margin, as a divisor of the file division.
  /// A note starting within division/N ticks of a busy clone counts as
  /// overlapping it.
  pub clone_lookahead_divisor: u64,
  /// A non-primary clone stays visible between two of its notes when the
  /// gap is at most this many beats.
  pub clone_gap_beats: f64,
  /// Seconds before its first upcoming note that an instrument becomes
  /// visible in its idle pose.
  pub start_buffer: f64,
  /// Seconds after a note ends that an instrument stays visible.
  pub end_buffer: f64,
}

impl Default for Animation {
  fn default() -> Animation {
    Animation {
      clone_lookahead_divisor: 4,
      clone_gap_beats: 2.0,
      start_buffer: 1.0,
      end_buffer: 4.0,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Stick {
  /// Relative, unitless speed at which a stick rotates into a strike.
  pub strike_speed: f64,
  /// Resting angle of a raised stick, in degrees.
  pub max_angle: f64,
  /// Angular rate of the recoil easing, in radians per second.
  pub recoil_rate: f64,
  /// A sticky stick stays visible between two strikes closer than this
  /// many beats.
  pub sticky_beats: f64,
}

impl Default for Stick {
  fn default() -> Stick {
    Stick {
      strike_speed: 4.0,
      max_angle: 50.0,
      recoil_rate: 5.0,
      sticky_beats: 1.0,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Drum {
  /// Rate at which a struck drum travels back to rest, units per second.
  pub recoil_comeback: f32,
  /// How far a drum travels when hit at full velocity.
  pub recoil_distance: f32,
}

impl Default for Drum {
  fn default() -> Drum {
    Drum {
      recoil_comeback: 22.0,
      recoil_distance: -2.0,
    }
  }
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Config {
  pub animation: Animation,
  pub stick: Stick,
  pub drum: Drum,
}

impl Default for Config {
  fn default() -> Config {
    Config {
      animation: Animation::default(),
      stick: Stick::default(),
      drum: Drum::default(),
    }
  }
}

impl Config {
  pub fn from_file<'a, T>(path: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let mut content = String::new();
    let path_str = path.into();
    let mut file = File::open(path_str)?;
    file.read_to_string(&mut content)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
  }

  pub fn from_str<'a, T>(content: T) -> Result<Config, Error>
  where
    T: Into<&'a str>,
  {
    let config: Config = toml::from_str(content.into())?;
    Ok(config)
  }
}
