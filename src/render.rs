// Canvas2D drawing of the globe scene. Pure presentation: reads a FrameOutput and
// never touches controller state.
use glam::{DVec2, DVec3};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::config::AxisConvention;
use crate::model::{FrameOutput, GlobeTransform, SurfaceCoordinate};
use crate::state::SceneCamera;
use crate::state::projector::surface_to_cartesian;

const BACKGROUND: &str = "#0a0e27";
const OCEAN: &str = "#0b2545";
const GRID_LIT: &str = "rgba(0,212,255,0.55)";
const GRID_DARK: &str = "rgba(0,212,255,0.12)";
const NORTH: &str = "#00d4ff";
const SOUTH: &str = "#ff6b6b";

const GRID_STEP_DEG: i32 = 15;
const SAMPLE_STEP_DEG: i32 = 3;

pub struct DrawParams<'a> {
    pub camera: &'a SceneCamera,
    pub frame: &'a FrameOutput,
    pub convention: AxisConvention,
    /// Unit vector toward the sun in the globe's local frame.
    pub sun_local: DVec3,
    /// Screen point of the ray-cast sample, when that mode is active.
    pub crosshair: Option<DVec2>,
}

pub fn draw_scene(ctx: &CanvasRenderingContext2d, p: &DrawParams) {
    let cam = p.camera;
    ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
    ctx.set_fill_style_str(BACKGROUND);
    ctx.fill_rect(0.0, 0.0, cam.width, cam.height);

    let globe = &p.frame.transform;
    let Some(c) = cam.project(globe.center) else {
        return;
    };
    let r_px = cam.screen_radius(globe.center, globe.radius);

    fill_circle(ctx, c, r_px * 1.2, "rgba(0,212,255,0.05)");
    fill_circle(ctx, c, r_px * 1.1, "rgba(0,212,255,0.15)");
    draw_atmosphere_ring(ctx, c, r_px * 1.06, p.frame.atmosphere_angle);

    let north = surface_to_cartesian(
        SurfaceCoordinate { latitude: 90.0, longitude: 0.0 },
        p.convention,
    );
    let north_visible = faces_camera(globe, cam, north);
    // Poles on the far side sit behind the disk.
    draw_axis(ctx, cam, globe, north, north_visible, false);

    fill_circle(ctx, c, r_px, OCEAN);
    draw_graticule(ctx, cam, globe, p.convention, p.sun_local, true);
    draw_graticule(ctx, cam, globe, p.convention, p.sun_local, false);

    draw_axis(ctx, cam, globe, north, north_visible, true);

    if let Some(x) = p.crosshair {
        draw_crosshair(ctx, x);
    }
}

fn fill_circle(ctx: &CanvasRenderingContext2d, c: DVec2, r: f64, color: &str) {
    ctx.begin_path();
    ctx.set_fill_style_str(color);
    ctx.arc(c.x, c.y, r.max(0.0), 0.0, std::f64::consts::PI * 2.0).ok();
    ctx.fill();
}

fn draw_atmosphere_ring(ctx: &CanvasRenderingContext2d, c: DVec2, r: f64, angle: f64) {
    let dash = js_sys::Array::of2(&JsValue::from_f64(2.0), &JsValue::from_f64(10.0));
    ctx.set_line_dash(&dash).ok();
    ctx.set_line_dash_offset(-angle * r);
    ctx.set_stroke_style_str("rgba(0,212,255,0.35)");
    ctx.set_line_width(1.5);
    ctx.begin_path();
    ctx.arc(c.x, c.y, r.max(0.0), 0.0, std::f64::consts::PI * 2.0).ok();
    ctx.stroke();
    ctx.set_line_dash(&js_sys::Array::new()).ok();
}

fn faces_camera(globe: &GlobeTransform, cam: &SceneCamera, local_unit: DVec3) -> bool {
    let world = globe.local_to_world(local_unit * globe.radius);
    (world - globe.center).dot(cam.position - world) > 0.0
}

fn graticule_lines(convention: AxisConvention) -> Vec<Vec<DVec3>> {
    let point = |lat: i32, lng: i32| {
        surface_to_cartesian(
            SurfaceCoordinate {
                latitude: lat as f64,
                longitude: lng as f64,
            },
            convention,
        )
    };
    let mut lines = Vec::new();
    for lng in (-180..180).step_by(GRID_STEP_DEG as usize) {
        lines.push(
            (-90..=90)
                .step_by(SAMPLE_STEP_DEG as usize)
                .map(|lat| point(lat, lng))
                .collect(),
        );
    }
    for lat in (-90 + GRID_STEP_DEG..90).step_by(GRID_STEP_DEG as usize) {
        lines.push(
            (-180..=180)
                .step_by(SAMPLE_STEP_DEG as usize)
                .map(|lng| point(lat, lng))
                .collect(),
        );
    }
    lines
}

/// One pass per tint so each pass is a single stroked path.
fn draw_graticule(
    ctx: &CanvasRenderingContext2d,
    cam: &SceneCamera,
    globe: &GlobeTransform,
    convention: AxisConvention,
    sun_local: DVec3,
    lit_pass: bool,
) {
    ctx.set_stroke_style_str(if lit_pass { GRID_LIT } else { GRID_DARK });
    ctx.set_line_width(1.0);
    ctx.begin_path();
    for line in graticule_lines(convention) {
        let mut prev: Option<DVec2> = None;
        for local in line {
            let visible = faces_camera(globe, cam, local);
            let lit = local.dot(sun_local) > 0.0;
            let screen = if visible && lit == lit_pass {
                cam.project(globe.local_to_world(local * globe.radius))
            } else {
                None
            };
            match (prev, screen) {
                (Some(_), Some(s)) => ctx.line_to(s.x, s.y),
                (None, Some(s)) => ctx.move_to(s.x, s.y),
                _ => {}
            }
            prev = screen;
        }
    }
    ctx.stroke();
}

fn draw_axis(
    ctx: &CanvasRenderingContext2d,
    cam: &SceneCamera,
    globe: &GlobeTransform,
    north: DVec3,
    north_visible: bool,
    front_pass: bool,
) {
    for (dir, len, color, label, visible) in [
        (north, 1.6, NORTH, "N", north_visible),
        (-north, 1.25, SOUTH, "S", !north_visible),
    ] {
        if visible != front_pass {
            continue;
        }
        let base = cam.project(globe.local_to_world(dir * globe.radius));
        let tip = cam.project(globe.local_to_world(dir * globe.radius * len));
        let (Some(base), Some(tip)) = (base, tip) else {
            continue;
        };
        ctx.set_stroke_style_str(color);
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.move_to(base.x, base.y);
        ctx.line_to(tip.x, tip.y);
        ctx.stroke();
        ctx.set_fill_style_str(color);
        ctx.set_font("bold 13px 'JetBrains Mono', monospace");
        ctx.fill_text(label, tip.x + 8.0, tip.y + 4.0).ok();
    }
}

fn draw_crosshair(ctx: &CanvasRenderingContext2d, at: DVec2) {
    ctx.set_stroke_style_str(NORTH);
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(at.x - 8.0, at.y);
    ctx.line_to(at.x + 8.0, at.y);
    ctx.move_to(at.x, at.y - 8.0);
    ctx.line_to(at.x, at.y + 8.0);
    ctx.stroke();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn graticule_has_meridians_and_parallels() {
        let lines = graticule_lines(AxisConvention::YUp);
        // 24 meridians plus parallels at -75..=75.
        assert_eq!(lines.len(), 24 + 11);
        assert!(lines.iter().flatten().all(|p| (p.length() - 1.0).abs() < 1e-9));
    }

    #[test]
    fn near_side_faces_camera() {
        let cam = SceneCamera::default();
        let globe = GlobeTransform {
            center: DVec3::ZERO,
            orientation: Default::default(),
            radius: 2.0,
        };
        assert!(faces_camera(&globe, &cam, DVec3::Z));
        assert!(!faces_camera(&globe, &cam, DVec3::NEG_Z));
    }
}
