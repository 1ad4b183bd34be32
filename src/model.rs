//! Core data types shared by the globe state modules and the components.
//! Screen coordinates are CSS pixels relative to the canvas, world coordinates are
//! scene units, angles are radians unless a name says otherwise.

use glam::{DMat3, DVec2, DVec3};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerKind {
    /// Mouse and pen: always a single pointer, never part of a pinch.
    Mouse,
    Touch,
}

impl PointerKind {
    /// Map a DOM `pointerType` ("mouse", "pen", "touch").
    pub fn from_pointer_type(pointer_type: &str) -> Self {
        if pointer_type == "touch" {
            PointerKind::Touch
        } else {
            PointerKind::Mouse
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerSample {
    pub id: i32,
    pub x: f64,
    pub y: f64,
    pub kind: PointerKind,
}

impl PointerSample {
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// One pointer event as delivered by the input boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InputEvent {
    pub pointer_id: i32,
    pub kind: PointerKind,
    pub phase: PointerPhase,
    pub x: f64,
    pub y: f64,
    /// World-space point where the event ray met the sphere, when it did.
    pub hit_point: Option<DVec3>,
}

impl InputEvent {
    pub fn new(pointer_id: i32, kind: PointerKind, phase: PointerPhase, x: f64, y: f64) -> Self {
        Self {
            pointer_id,
            kind,
            phase,
            x,
            y,
            hit_point: None,
        }
    }

    pub fn with_hit(mut self, hit_point: Option<DVec3>) -> Self {
        self.hit_point = hit_point;
        self
    }
}

/// What the caller should do with the originating platform event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Keep the event away from any other listener (camera rig, page scroll).
    pub stop_propagation: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GestureState {
    #[default]
    Idle,
    Dragging,
    Pinching,
}

/// Rotation rate: `x` drives yaw, `y` drives pitch. Radians per frame.
pub type AngularVelocity = DVec2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    /// Rotation about the vertical axis.
    pub yaw: f64,
    /// Rotation about the horizontal axis.
    pub pitch: f64,
}

impl Orientation {
    #[cfg(test)]
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// Local → world rotation. Pitch is applied outermost, matching an XYZ Euler order.
    pub fn rotation(&self) -> DMat3 {
        DMat3::from_rotation_x(self.pitch) * DMat3::from_rotation_y(self.yaw)
    }

    /// World → local rotation.
    pub fn inverse_rotation(&self) -> DMat3 {
        self.rotation().transpose()
    }
}

/// Placement of the sphere in the scene for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlobeTransform {
    pub center: DVec3,
    pub orientation: Orientation,
    /// Uniform scale applied to the unit-radius sphere (radius × rendered scale).
    pub radius: f64,
}

impl GlobeTransform {
    pub fn world_to_local(&self, world: DVec3) -> DVec3 {
        self.orientation.inverse_rotation() * (world - self.center)
    }

    pub fn local_to_world(&self, local: DVec3) -> DVec3 {
        self.center + self.orientation.rotation() * local
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceCoordinate {
    /// Degrees in [-90, 90].
    pub latitude: f64,
    /// Degrees in (-180, 180].
    pub longitude: f64,
}

/// Everything the renderer and overlays consume after a frame step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameOutput {
    pub transform: GlobeTransform,
    /// Rendered scale including the base scale and hover boost.
    pub scale: f64,
    pub readout: SurfaceCoordinate,
    pub atmosphere_angle: f64,
    pub gesture: GestureState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_orientation_is_identity_rotation() {
        let o = Orientation::default();
        let p = DVec3::new(0.3, -0.4, 0.5);
        assert!((o.rotation() * p - p).length() < 1e-12);
    }

    #[test]
    fn world_local_round_trip() {
        let t = GlobeTransform {
            center: DVec3::new(3.5, 0.0, 0.0),
            orientation: Orientation::new(1.2, -0.7),
            radius: 1.8,
        };
        let local = DVec3::new(0.2, 0.9, -0.1);
        let back = t.world_to_local(t.local_to_world(local));
        assert!((back - local).length() < 1e-12);
    }

    #[test]
    fn yaw_turns_about_vertical_axis() {
        let o = Orientation::new(std::f64::consts::FRAC_PI_2, 0.0);
        let up = o.rotation() * DVec3::Y;
        assert!((up - DVec3::Y).length() < 1e-12);
    }

    #[test]
    fn pen_counts_as_mouse() {
        assert_eq!(PointerKind::from_pointer_type("touch"), PointerKind::Touch);
        assert_eq!(PointerKind::from_pointer_type("pen"), PointerKind::Mouse);
        assert_eq!(PointerKind::from_pointer_type("mouse"), PointerKind::Mouse);
        assert_eq!(PointerKind::from_pointer_type(""), PointerKind::Mouse);
    }
}
