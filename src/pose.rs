use std::ops::{Add, AddAssign, Mul};

use uuid::Uuid;

pub fn rad(degrees: f64) -> f64 {
  degrees * std::f64::consts::PI / 180.0
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Vec3 {
  pub x: f32,
  pub y: f32,
  pub z: f32,
}

impl Vec3 {
  pub fn new(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3 { x, y, z }
  }

  pub fn zero() -> Vec3 {
    Vec3::new(0.0, 0.0, 0.0)
  }

  pub fn one() -> Vec3 {
    Vec3::new(1.0, 1.0, 1.0)
  }
}

impl Add for Vec3 {
  type Output = Vec3;
  fn add(self, rhs: Vec3) -> Vec3 {
    Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
  }
}

impl AddAssign for Vec3 {
  fn add_assign(&mut self, rhs: Vec3) {
    *self = *self + rhs;
  }
}

impl Mul<f32> for Vec3 {
  type Output = Vec3;
  fn mul(self, rhs: f32) -> Vec3 {
    Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
  }
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Axis {
  X,
  Y,
  Z,
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Rotation {
  pub axis: Axis,
  pub angle: f32,
}

impl Rotation {
  pub fn new(axis: Axis, angle: f32) -> Rotation {
    Rotation { axis, angle }
  }

  pub fn none() -> Rotation {
    Rotation::new(Axis::X, 0.0)
  }
}

/// The abstract transform directive emitted for one animated part on one
/// tick. How it maps onto a scene graph is up to the rendering layer.
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Pose {
  pub translation: Vec3,
  pub rotation: Rotation,
  pub scale: Vec3,
  pub visible: bool,
}

impl Default for Pose {
  fn default() -> Pose {
    Pose {
      translation: Vec3::zero(),
      rotation: Rotation::none(),
      scale: Vec3::one(),
      visible: true,
    }
  }
}

///! A stable handle identifying one animated part to the rendering layer
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub struct PartId(Uuid);

impl PartId {
  pub fn new() -> PartId {
    PartId(Uuid::new_v4())
  }
}

pub struct Directive {
  pub part: PartId,
  pub pose: Pose,
}

/// The per-tick sink of pose directives. Drivers push into it and the
/// rendering layer drains it once per frame.
pub struct PoseBuffer {
  directives: Vec<Directive>,
}

impl PoseBuffer {
  pub fn new() -> PoseBuffer {
    PoseBuffer {
      directives: Vec::new(),
    }
  }

  pub fn with_capacity(capacity: usize) -> PoseBuffer {
    PoseBuffer {
      directives: Vec::with_capacity(capacity),
    }
  }

  pub fn reset(&mut self) -> &mut Self {
    self.directives.clear();
    self
  }

  pub fn push(&mut self, part: PartId, pose: Pose) {
    self.directives.push(Directive { part, pose });
  }

  pub fn iter(&self) -> impl Iterator<Item = &Directive> {
    self.directives.iter()
  }

  pub fn len(&self) -> usize {
    self.directives.len()
  }

  pub fn is_empty(&self) -> bool {
    self.directives.is_empty()
  }

  pub fn pose_for(&self, part: PartId) -> Option<&Pose> {
    self
      .directives
      .iter()
      .find(|directive| directive.part == part)
      .map(|directive| &directive.pose)
  }
}

#[cfg(test)]
mod test {

  use super::{Axis, PartId, Pose, PoseBuffer, Rotation, Vec3};

  #[test]
  pub fn vec3_ops() {
    let v = Vec3::new(1.0, 2.0, 3.0) + Vec3::new(3.0, 2.0, 1.0);
    assert_eq!(v, Vec3::new(4.0, 4.0, 4.0));
    assert_eq!(v * 0.5, Vec3::new(2.0, 2.0, 2.0));
  }

  #[test]
  pub fn rad_converts_degrees() {
    assert!((super::rad(180.0) - std::f64::consts::PI).abs() < 1e-12);
  }

  #[test]
  pub fn pose_default_is_identity() {
    let pose = Pose::default();
    assert_eq!(pose.translation, Vec3::zero());
    assert_eq!(pose.scale, Vec3::one());
    assert!(pose.visible);
  }

  #[test]
  pub fn buffer_push_and_reset() {
    let part = PartId::new();
    let mut buffer = PoseBuffer::new();
    buffer.push(
      part,
      Pose {
        rotation: Rotation::new(Axis::Z, 0.5),
        ..Pose::default()
      },
    );
    assert_eq!(buffer.len(), 1);
    assert_eq!(buffer.pose_for(part).unwrap().rotation.angle, 0.5);
    buffer.reset();
    assert!(buffer.is_empty());
  }
}
