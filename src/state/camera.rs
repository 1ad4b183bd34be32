// Fixed perspective camera looking down -z, used for pointer picking, the ray-cast
// readout and the canvas projection.
use glam::{DVec2, DVec3};

use super::projector::Ray;
use crate::config::RaySample;

#[derive(Debug, Clone)]
pub struct SceneCamera {
    pub position: DVec3,
    /// Vertical field of view in radians.
    pub fov_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Default for SceneCamera {
    fn default() -> Self {
        Self {
            position: DVec3::new(0.0, 0.0, 10.0),
            fov_y: 60f64.to_radians(),
            width: 800.0,
            height: 600.0,
        }
    }
}

impl SceneCamera {
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width.max(1.0);
        self.height = height.max(1.0);
    }

    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    fn half_extent(&self) -> DVec2 {
        let t = (self.fov_y * 0.5).tan();
        DVec2::new(t * self.aspect(), t)
    }

    /// Canvas pixels → normalised device coordinates (+y up).
    pub fn to_ndc(&self, x: f64, y: f64) -> DVec2 {
        DVec2::new(2.0 * x / self.width - 1.0, 1.0 - 2.0 * y / self.height)
    }

    pub fn ray_through_ndc(&self, ndc: DVec2) -> Ray {
        let h = self.half_extent();
        Ray::new(self.position, DVec3::new(ndc.x * h.x, ndc.y * h.y, -1.0))
    }

    /// Ray from the eye through a canvas pixel.
    pub fn ray_through(&self, x: f64, y: f64) -> Ray {
        self.ray_through_ndc(self.to_ndc(x, y))
    }

    /// World → canvas pixels. `None` for points at or behind the eye plane.
    pub fn project(&self, world: DVec3) -> Option<DVec2> {
        let rel = world - self.position;
        let depth = -rel.z;
        if depth <= 1e-9 {
            return None;
        }
        let h = self.half_extent();
        let ndc = DVec2::new(rel.x / depth / h.x, rel.y / depth / h.y);
        Some(DVec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        ))
    }

    /// Apparent on-screen radius of a sphere, in pixels.
    pub fn screen_radius(&self, center: DVec3, radius: f64) -> f64 {
        let dist = (center - self.position).length();
        if dist <= radius {
            return self.height;
        }
        let angular = (radius / dist).asin();
        angular.tan() / (self.fov_y * 0.5).tan() * self.height * 0.5
    }

    /// Ray for the ray-cast readout plus the screen point it passes through.
    pub fn sample_ray(&self, sample: RaySample, globe_center: DVec3) -> Option<(Ray, DVec2)> {
        let ndc = match sample {
            RaySample::ViewportCenter => DVec2::ZERO,
            RaySample::Ndc { x, y } => DVec2::new(x, y),
            RaySample::GlobeCenter => {
                let p = self.project(globe_center)?;
                self.to_ndc(p.x, p.y)
            }
        };
        let screen = DVec2::new(
            (ndc.x + 1.0) * 0.5 * self.width,
            (1.0 - ndc.y) * 0.5 * self.height,
        );
        Some((self.ray_through_ndc(ndc), screen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_pixel_looks_straight_ahead() {
        let cam = SceneCamera::default();
        let ray = cam.ray_through(400.0, 300.0);
        assert!((ray.direction - DVec3::NEG_Z).length() < 1e-12);
        assert_eq!(ray.origin, cam.position);
    }

    #[test]
    fn project_inverts_ray() {
        let mut cam = SceneCamera::default();
        cam.resize(1280.0, 720.0);
        for (x, y) in [(10.0, 20.0), (640.0, 360.0), (1200.0, 700.0)] {
            let ray = cam.ray_through(x, y);
            let p = cam.project(ray.at(7.5)).unwrap();
            assert!((p.x - x).abs() < 1e-6 && (p.y - y).abs() < 1e-6);
        }
    }

    #[test]
    fn points_behind_are_not_projected() {
        let cam = SceneCamera::default();
        assert!(cam.project(DVec3::new(0.0, 0.0, 11.0)).is_none());
    }

    #[test]
    fn screen_radius_shrinks_with_distance() {
        let cam = SceneCamera::default();
        let near = cam.screen_radius(DVec3::ZERO, 1.0);
        let far = cam.screen_radius(DVec3::new(0.0, 0.0, -10.0), 1.0);
        assert!(near > far && far > 0.0);
    }

    #[test]
    fn globe_center_sample_passes_through_center() {
        let cam = SceneCamera::default();
        let center = DVec3::new(3.5, 0.0, 0.0);
        let (ray, screen) = cam.sample_ray(RaySample::GlobeCenter, center).unwrap();
        let to_center = (center - ray.origin).normalize();
        assert!((ray.direction - to_center).length() < 1e-9);
        assert!(screen.x > 400.0 && (screen.y - 300.0).abs() < 1e-9);
        let (_, mid) = cam.sample_ray(RaySample::ViewportCenter, center).unwrap();
        assert_eq!(mid, DVec2::new(400.0, 300.0));
    }
}
