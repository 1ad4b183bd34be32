// Zoom state: pinch writes the target, each frame eases the current value toward it.
#[derive(Debug, Clone)]
pub struct ScaleSmoother {
    current: f64,
    target: f64,
    /// Scale at the moment the active pinch began.
    initial: f64,
    /// What the renderer sees: eased toward `target`, times the hover boost.
    rendered: f64,
    pinching: bool,
    hovered: bool,
    smoothing: f64,
    min: f64,
    max: f64,
    hover_boost: f64,
}

impl ScaleSmoother {
    pub fn new(smoothing: f64, min: f64, max: f64, hover_boost: f64) -> Self {
        Self {
            current: 1.0,
            target: 1.0,
            initial: 1.0,
            rendered: 1.0,
            pinching: false,
            hovered: false,
            smoothing,
            min,
            max,
            hover_boost,
        }
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn rendered(&self) -> f64 {
        self.rendered
    }

    pub fn is_pinching(&self) -> bool {
        self.pinching
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target.clamp(self.min, self.max);
        }
    }

    pub fn begin_pinch(&mut self) {
        self.initial = self.current;
        self.pinching = true;
        log::debug!("pinch start at scale {:.3}", self.initial);
    }

    /// `ratio` is current finger distance over the distance when the pinch began.
    pub fn pinch_to(&mut self, ratio: f64) {
        if self.pinching {
            self.set_target(self.initial * ratio);
        }
    }

    /// Restart the pinch ratio from the current target, e.g. when the finger pair changes.
    pub fn rebase_pinch(&mut self) {
        if self.pinching {
            self.initial = self.target;
        }
    }

    pub fn end_pinch(&mut self) {
        self.pinching = false;
        self.current = self.target;
        log::debug!("pinch end at scale {:.3}", self.current);
    }

    pub fn step(&mut self) {
        self.current += (self.target - self.current) * self.smoothing;
        let boost = if self.hovered && !self.pinching {
            self.hover_boost
        } else {
            1.0
        };
        self.rendered += (self.target * boost - self.rendered) * self.smoothing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn smoother() -> ScaleSmoother {
        ScaleSmoother::new(0.15, 0.5, 3.0, 1.05)
    }

    #[test]
    fn converges_monotonically_without_overshoot() {
        for target in [3.0, 0.5, 1.7, 0.9] {
            let mut s = smoother();
            s.set_target(target);
            let mut prev_gap = (target - s.current()).abs();
            let above = s.current() > target;
            for _ in 0..200 {
                s.step();
                let gap = (target - s.current()).abs();
                assert!(gap <= prev_gap);
                assert_eq!(s.current() > target, above && gap > 0.0);
                prev_gap = gap;
            }
            assert!(prev_gap < 1e-9);
        }
    }

    #[test]
    fn single_step_moves_fifteen_percent() {
        let mut s = smoother();
        s.set_target(2.0);
        s.step();
        assert!((s.current() - 1.15).abs() < 1e-12);
    }

    #[test]
    fn target_is_clamped() {
        let mut s = smoother();
        s.set_target(10.0);
        assert_eq!(s.target(), 3.0);
        s.set_target(0.01);
        assert_eq!(s.target(), 0.5);
        s.set_target(f64::NAN);
        assert_eq!(s.target(), 0.5);
        s.set_target(f64::INFINITY);
        assert_eq!(s.target(), 0.5);
    }

    #[test]
    fn pinch_ratio_scales_from_baseline() {
        let mut s = smoother();
        s.set_target(2.0);
        for _ in 0..300 {
            s.step();
        }
        s.begin_pinch();
        s.pinch_to(1.25);
        assert!((s.target() - 2.5).abs() < 1e-6);
        s.pinch_to(100.0);
        assert_eq!(s.target(), 3.0);
        s.end_pinch();
        assert_eq!(s.current(), 3.0);
        assert!(!s.is_pinching());
    }

    #[test]
    fn pinch_ratio_ignored_outside_pinch() {
        let mut s = smoother();
        s.pinch_to(2.0);
        assert_eq!(s.target(), 1.0);
    }

    #[test]
    fn hover_boost_only_when_not_pinching() {
        let mut s = smoother();
        s.set_hovered(true);
        for _ in 0..300 {
            s.step();
        }
        assert!((s.rendered() - 1.05).abs() < 1e-9);
        assert!((s.current() - 1.0).abs() < 1e-12);

        s.begin_pinch();
        for _ in 0..300 {
            s.step();
        }
        assert!((s.rendered() - 1.0).abs() < 1e-9);
    }
}
