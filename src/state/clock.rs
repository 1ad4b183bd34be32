// Frame timing: turns requestAnimationFrame timestamps into a clamped delta.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last_ms: f64,
    max_dt: f64,
}

impl FrameClock {
    /// The first tick measures from time zero, so it is normally clamped to `max_dt`.
    pub fn new(max_dt: f64) -> Self {
        Self { last_ms: 0.0, max_dt }
    }

    /// Seconds since the previous tick, clamped to `[0, max_dt]`.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let dt = ((now_ms - self.last_ms) / 1000.0).clamp(0.0, self.max_dt);
        self.last_ms = now_ms;
        dt
    }

    #[cfg(test)]
    pub fn clamp(&self, dt: f64) -> f64 {
        if dt.is_finite() { dt.clamp(0.0, self.max_dt) } else { 0.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stall_is_clamped() {
        let mut c = FrameClock::new(0.1);
        assert_eq!(c.tick(5_000.0), 0.1);
        assert!((c.tick(5_016.0) - 0.016).abs() < 1e-12);
        assert_eq!(c.tick(65_016.0), 0.1);
    }

    #[test]
    fn clock_going_backwards_yields_zero() {
        let mut c = FrameClock::new(0.1);
        c.tick(1_000.0);
        assert_eq!(c.tick(900.0), 0.0);
    }

    #[test]
    fn clamp_rejects_non_finite() {
        let c = FrameClock::new(0.1);
        assert_eq!(c.clamp(f64::NAN), 0.0);
        assert_eq!(c.clamp(3.0), 0.1);
    }
}
