// The globe's interaction core. Input callbacks call `handle_input`/`set_hovered`
// between frames; the animation loop calls `frame` once per rendered frame.
use glam::DVec3;

use super::clock::FrameClock;
use super::gesture::{GestureEffect, GestureTracker};
use super::inertia::InertiaIntegrator;
use super::projector::{Ray, SurfaceProjector};
use super::scale::ScaleSmoother;
use crate::config::{GlobeConfig, ProjectionMode};
use crate::model::{EventResponse, FrameOutput, GlobeTransform, InputEvent, PointerPhase};

#[derive(Debug, Clone)]
pub struct GlobeController {
    config: GlobeConfig,
    gestures: GestureTracker,
    inertia: InertiaIntegrator,
    scale: ScaleSmoother,
    projector: SurfaceProjector,
    clock: FrameClock,
    center: DVec3,
    atmosphere_angle: f64,
}

impl GlobeController {
    pub fn new(config: GlobeConfig) -> Self {
        let config = config.validated();
        Self {
            gestures: GestureTracker::new(config.rotation_sensitivity),
            inertia: InertiaIntegrator::new(
                config.velocity_decay,
                config.decay_mode,
                config.velocity_deadband,
                config.idle_spin_rate,
            ),
            scale: ScaleSmoother::new(
                config.scale_smoothing,
                config.min_scale,
                config.max_scale,
                config.hover_boost,
            ),
            projector: SurfaceProjector::new(config.projection_mode, config.axis_convention),
            clock: FrameClock::new(config.max_frame_dt),
            center: DVec3::from_array(config.globe_center),
            atmosphere_angle: 0.0,
            config,
        }
    }

    #[cfg(test)]
    pub fn gesture_state(&self) -> crate::model::GestureState {
        self.gestures.state()
    }

    #[cfg(test)]
    pub fn orientation(&self) -> crate::model::Orientation {
        self.inertia.orientation()
    }

    #[cfg(test)]
    pub fn velocity(&self) -> glam::DVec2 {
        self.inertia.velocity()
    }

    #[cfg(test)]
    pub fn scale(&self) -> &ScaleSmoother {
        &self.scale
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.projector.mode()
    }

    pub fn set_center(&mut self, center: DVec3) {
        self.center = center;
    }

    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Rendered scale including the page's base scale and the hover boost.
    pub fn rendered_scale(&self) -> f64 {
        self.config.base_scale * self.scale.rendered()
    }

    pub fn transform(&self) -> GlobeTransform {
        GlobeTransform {
            center: self.center,
            orientation: self.inertia.orientation(),
            radius: self.config.sphere_radius * self.rendered_scale(),
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.scale.set_hovered(hovered);
    }

    pub fn handle_input(&mut self, event: &InputEvent) -> EventResponse {
        if let Some(hit) = event.hit_point {
            self.projector.record_hit(hit);
        }
        let effect = match event.phase {
            PointerPhase::Down => self.gestures.on_pointer_down(
                event.pointer_id,
                event.kind,
                event.x,
                event.y,
                &mut self.scale,
            ),
            PointerPhase::Move => {
                self.gestures
                    .on_pointer_move(event.pointer_id, event.x, event.y, &mut self.scale)
            }
            PointerPhase::Up => self.gestures.on_pointer_up(event.pointer_id, &mut self.scale),
            PointerPhase::Cancel => self
                .gestures
                .on_pointer_cancel(event.pointer_id, &mut self.scale),
        };
        match effect {
            GestureEffect::DragStarted => self.inertia.reset_velocity(),
            GestureEffect::Rotate(delta) => self.inertia.apply_drag(delta),
            GestureEffect::None => {}
        }
        EventResponse {
            stop_propagation: event.phase == PointerPhase::Down,
        }
    }

    /// Frame entry point for the animation loop (`now_ms` from `performance.now()`).
    pub fn frame(&mut self, now_ms: f64, ray: Option<&Ray>) -> FrameOutput {
        let dt = self.clock.tick(now_ms);
        self.advance(dt, ray)
    }

    /// Advance by an explicit delta; clamped the same way as `frame`.
    #[cfg(test)]
    pub fn step(&mut self, dt: f64, ray: Option<&Ray>) -> FrameOutput {
        let dt = self.clock.clamp(dt);
        self.advance(dt, ray)
    }

    fn advance(&mut self, dt: f64, ray: Option<&Ray>) -> FrameOutput {
        self.inertia.step(dt, self.gestures.is_dragging());
        self.scale.step();
        self.atmosphere_angle += dt * self.config.atmosphere_spin_rate;
        let transform = self.transform();
        let readout = self.projector.update(&transform, ray);
        FrameOutput {
            transform,
            scale: self.rendered_scale(),
            readout,
            atmosphere_angle: self.atmosphere_angle,
            gesture: self.gestures.state(),
        }
    }
}
