// Momentum rotation: drag deltas set the velocity, idle frames bleed it off and
// fall back to a slow resting spin.
use glam::DVec2;

use crate::config::DecayMode;
use crate::model::{AngularVelocity, Orientation};

#[derive(Debug, Clone)]
pub struct InertiaIntegrator {
    orientation: Orientation,
    velocity: AngularVelocity,
    decay: f64,
    decay_mode: DecayMode,
    deadband: f64,
    idle_spin_rate: f64,
}

impl InertiaIntegrator {
    pub fn new(decay: f64, decay_mode: DecayMode, deadband: f64, idle_spin_rate: f64) -> Self {
        Self {
            orientation: Orientation::default(),
            velocity: DVec2::ZERO,
            decay,
            decay_mode,
            deadband,
            idle_spin_rate,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[cfg(test)]
    pub fn velocity(&self) -> AngularVelocity {
        self.velocity
    }

    pub fn reset_velocity(&mut self) {
        self.velocity = DVec2::ZERO;
    }

    /// Apply a drag delta right away and keep it as the carry-over velocity.
    pub fn apply_drag(&mut self, delta: DVec2) {
        self.orientation.yaw += delta.x;
        self.orientation.pitch += delta.y;
        self.velocity = delta;
    }

    /// Decay factor for a frame of `dt` seconds.
    pub fn decay_factor(&self, dt: f64) -> f64 {
        match self.decay_mode {
            DecayMode::PerFrame => self.decay,
            DecayMode::TimeScaled { reference_dt } => self.decay.powf(dt / reference_dt),
        }
    }

    pub fn has_momentum(&self) -> bool {
        self.velocity.x.abs() > self.deadband || self.velocity.y.abs() > self.deadband
    }

    /// Advance one frame. While dragging the gesture already moved the globe.
    pub fn step(&mut self, dt: f64, dragging: bool) {
        if dragging {
            return;
        }
        self.velocity *= self.decay_factor(dt);
        if self.has_momentum() {
            self.orientation.yaw += self.velocity.x;
            self.orientation.pitch += self.velocity.y;
        } else {
            self.orientation.yaw += dt * self.idle_spin_rate;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn integrator() -> InertiaIntegrator {
        InertiaIntegrator::new(0.95, DecayMode::PerFrame, 0.0001, 0.1)
    }

    #[test]
    fn velocity_decays_geometrically() {
        let mut it = integrator();
        it.apply_drag(DVec2::new(0.25, -0.1));
        for n in 1..=40 {
            it.step(1.0 / 60.0, false);
            let expected = 0.25 * 0.95f64.powi(n);
            assert!((it.velocity().x - expected).abs() < 1e-12);
            assert!((it.velocity().y + 0.1 * 0.95f64.powi(n)).abs() < 1e-12);
        }
    }

    #[test]
    fn momentum_advances_both_axes() {
        let mut it = integrator();
        it.apply_drag(DVec2::new(0.2, 0.1));
        let before = it.orientation();
        it.step(0.016, false);
        let after = it.orientation();
        assert!((after.yaw - before.yaw - 0.19).abs() < 1e-12);
        assert!((after.pitch - before.pitch - 0.095).abs() < 1e-12);
    }

    #[test]
    fn exhausted_momentum_switches_to_idle_spin() {
        let mut it = integrator();
        it.apply_drag(DVec2::new(0.25, 0.0));
        let mut frames = 0;
        while it.has_momentum() {
            it.step(0.016, false);
            frames += 1;
            assert!(frames < 1000);
        }
        let pitch = it.orientation().pitch;
        let yaw = it.orientation().yaw;
        it.step(0.05, false);
        assert!((it.orientation().yaw - yaw - 0.005).abs() < 1e-12);
        assert_eq!(it.orientation().pitch, pitch);
    }

    #[test]
    fn at_rest_spins_slowly() {
        let mut it = integrator();
        for _ in 0..10 {
            it.step(0.1, false);
        }
        assert!((it.orientation().yaw - 0.1).abs() < 1e-12);
        assert_eq!(it.orientation().pitch, 0.0);
    }

    #[test]
    fn dragging_freezes_integration() {
        let mut it = integrator();
        it.apply_drag(DVec2::new(0.3, 0.0));
        it.step(0.016, true);
        assert_eq!(it.velocity(), DVec2::new(0.3, 0.0));
        assert!((it.orientation().yaw - 0.3).abs() < 1e-12);
    }

    #[test]
    fn time_scaled_decay_matches_per_frame_at_reference_rate() {
        let mut a = integrator();
        let mut b = InertiaIntegrator::new(0.95, DecayMode::TimeScaled { reference_dt: 0.02 }, 0.0001, 0.1);
        a.apply_drag(DVec2::new(0.1, 0.0));
        b.apply_drag(DVec2::new(0.1, 0.0));
        a.step(0.02, false);
        b.step(0.02, false);
        assert!((a.velocity().x - b.velocity().x).abs() < 1e-12);
        // Two half-length frames lose as much as one full frame.
        let mut c = InertiaIntegrator::new(0.95, DecayMode::TimeScaled { reference_dt: 0.02 }, 0.0001, 0.1);
        c.apply_drag(DVec2::new(0.1, 0.0));
        c.step(0.01, false);
        c.step(0.01, false);
        assert!((c.velocity().x - b.velocity().x).abs() < 1e-12);
    }
}
