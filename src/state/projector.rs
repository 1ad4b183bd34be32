//! Screen/world → latitude and longitude on the globe surface.
//!
//! The default axis convention is y-up: the north pole is local +y, longitude 0 lies
//! on local +x and longitude +90° on local +z. The z-up convention maps the pole to
//! +z and longitude +90° to +y.

use glam::DVec3;

use crate::config::{AxisConvention, ProjectionMode};
use crate::model::{GlobeTransform, SurfaceCoordinate};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    /// Unit length.
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }
}

/// Nearest intersection in front of the ray origin.
pub fn intersect_sphere(ray: &Ray, center: DVec3, radius: f64) -> Option<DVec3> {
    if ray.direction == DVec3::ZERO || radius <= 0.0 {
        return None;
    }
    let oc = ray.origin - center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let near = -b - sq;
    let far = -b + sq;
    let t = if near >= 0.0 {
        near
    } else if far >= 0.0 {
        far
    } else {
        return None;
    };
    Some(ray.at(t))
}

/// Spherical coordinates of a local-frame point. `None` at the origin.
pub fn cartesian_to_surface(local: DVec3, convention: AxisConvention) -> Option<SurfaceCoordinate> {
    let r = local.length();
    if !(r > 0.0) || !r.is_finite() {
        return None;
    }
    let (up, a, b) = match convention {
        AxisConvention::YUp => (local.y, local.z, local.x),
        AxisConvention::ZUp => (local.z, local.y, local.x),
    };
    let latitude = (up / r).clamp(-1.0, 1.0).asin().to_degrees();
    let mut longitude = a.atan2(b).to_degrees();
    if longitude <= -180.0 {
        longitude += 360.0;
    }
    Some(SurfaceCoordinate {
        latitude,
        longitude,
    })
}

/// Inverse of [`cartesian_to_surface`] on the unit sphere.
pub fn surface_to_cartesian(coord: SurfaceCoordinate, convention: AxisConvention) -> DVec3 {
    let lat = coord.latitude.to_radians();
    let lng = coord.longitude.to_radians();
    let (up, a, b) = (lat.sin(), lat.cos() * lng.sin(), lat.cos() * lng.cos());
    match convention {
        AxisConvention::YUp => DVec3::new(b, up, a),
        AxisConvention::ZUp => DVec3::new(b, a, up),
    }
}

#[derive(Debug, Clone)]
pub struct SurfaceProjector {
    mode: ProjectionMode,
    convention: AxisConvention,
    anchor: Option<DVec3>,
    readout: SurfaceCoordinate,
}

impl SurfaceProjector {
    pub fn new(mode: ProjectionMode, convention: AxisConvention) -> Self {
        Self {
            mode,
            convention,
            anchor: None,
            readout: SurfaceCoordinate::default(),
        }
    }

    pub fn mode(&self) -> ProjectionMode {
        self.mode
    }

    /// Remember where a pointer last met the sphere (world space).
    pub fn record_hit(&mut self, world: DVec3) {
        self.anchor = Some(world);
    }

    /// Recompute the readout for this frame. `ray` is only used in ray-cast mode;
    /// a miss or missing anchor keeps the previous value.
    pub fn update(&mut self, globe: &GlobeTransform, ray: Option<&Ray>) -> SurfaceCoordinate {
        let sample = match self.mode {
            ProjectionMode::AnchorPoint => self.anchor,
            ProjectionMode::RayCast => {
                ray.and_then(|r| intersect_sphere(r, globe.center, globe.radius))
            }
        };
        if let Some(world) = sample {
            if let Some(coord) = cartesian_to_surface(globe.world_to_local(world), self.convention) {
                self.readout = coord;
            }
        }
        self.readout
    }
}
