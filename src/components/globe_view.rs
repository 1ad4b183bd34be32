use std::cell::RefCell;
use std::rc::Rc;

use glam::{DVec2, DVec3};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, PointerEvent};
use yew::prelude::*;

use crate::config::{GlobeConfig, ProjectionMode};
use crate::model::{InputEvent as GlobeInput, PointerKind, PointerPhase, SurfaceCoordinate};
use crate::render::{DrawParams, draw_scene};
use crate::state::projector::intersect_sphere;
use crate::state::{GlobeController, SceneCamera};
use crate::util::format_degrees;

/// Globe centre used when the viewport is taller than it is wide.
const PORTRAIT_CENTER: DVec3 = DVec3::new(0.0, -2.0, 0.0);

#[derive(Properties, PartialEq, Clone)]
pub struct GlobeViewProps {
    pub config: GlobeConfig,
    /// Sun direction in the globe's local frame.
    pub sun: DVec3,
    pub latitude_ref: NodeRef,
    pub longitude_ref: NodeRef,
}

struct Scene {
    controller: GlobeController,
    camera: SceneCamera,
    landscape_center: DVec3,
    shown: Option<SurfaceCoordinate>,
}

impl Scene {
    fn hit_test(&self, p: DVec2) -> Option<DVec3> {
        let ray = self.camera.ray_through(p.x, p.y);
        let t = self.controller.transform();
        intersect_sphere(&ray, t.center, t.radius)
    }

    fn resize(&mut self, width: f64, height: f64) {
        self.camera.resize(width, height);
        let center = if self.camera.aspect() < 1.0 {
            PORTRAIT_CENTER
        } else {
            self.landscape_center
        };
        self.controller.set_center(center);
    }
}

fn pointer_kind(e: &PointerEvent) -> PointerKind {
    PointerKind::from_pointer_type(&e.pointer_type())
}

fn canvas_point(canvas: &HtmlCanvasElement, e: &PointerEvent) -> DVec2 {
    let rect = canvas.get_bounding_client_rect();
    DVec2::new(
        e.client_x() as f64 - rect.left(),
        e.client_y() as f64 - rect.top(),
    )
}

fn set_text(node: &NodeRef, text: &str) {
    if let Some(el) = node.cast::<HtmlElement>() {
        el.set_inner_text(text);
    }
}

#[function_component]
pub fn GlobeView(props: &GlobeViewProps) -> Html {
    let canvas_ref = use_node_ref();
    let sun = use_mut_ref(|| props.sun);
    *sun.borrow_mut() = props.sun;

    {
        let canvas_ref = canvas_ref.clone();
        let config = props.config.clone();
        let lat_ref = props.latitude_ref.clone();
        let lng_ref = props.longitude_ref.clone();
        let sun = sun.clone();
        use_effect_with((), move |_| {
            let teardown = mount(canvas_ref, config, sun, lat_ref, lng_ref);
            move || {
                if let Some(teardown) = teardown {
                    teardown();
                }
            }
        });
    }

    html! {
        <canvas ref={canvas_ref}
            style="position:absolute; inset:0; width:100%; height:100%; display:block; touch-action:none;" />
    }
}

/// Wire the canvas up: animation loop, pointer listeners and resize handling.
/// Returns the teardown, or `None` when the DOM is not usable.
fn mount(
    canvas_ref: NodeRef,
    config: GlobeConfig,
    sun: Rc<RefCell<DVec3>>,
    lat_ref: NodeRef,
    lng_ref: NodeRef,
) -> Option<Box<dyn FnOnce()>> {
    let Some(window) = web_sys::window() else {
        log::error!("globe: no window");
        return None;
    };
    let Some(canvas) = canvas_ref.cast::<HtmlCanvasElement>() else {
        log::error!("globe: canvas not mounted");
        return None;
    };
    let Some(ctx) = canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|o| o.dyn_into::<CanvasRenderingContext2d>().ok())
    else {
        log::error!("globe: 2d context unavailable");
        return None;
    };

    let convention = config.axis_convention;
    let ray_sample = config.ray_sample;
    let scene = Rc::new(RefCell::new(Scene {
        landscape_center: DVec3::from_array(config.globe_center),
        controller: GlobeController::new(config),
        camera: SceneCamera::default(),
        shown: None,
    }));

    let apply_size = {
        let canvas = canvas.clone();
        let scene = scene.clone();
        move || {
            let w = canvas.client_width().max(1) as u32;
            let h = canvas.client_height().max(1) as u32;
            canvas.set_width(w);
            canvas.set_height(h);
            scene.borrow_mut().resize(w as f64, h as f64);
        }
    };
    apply_size();

    // RAF loop
    let raf_id = Rc::new(RefCell::new(None::<i32>));
    let raf_cell: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    {
        let raf_cell_loop = raf_cell.clone();
        let raf_id = raf_id.clone();
        let window_loop = window.clone();
        let scene = scene.clone();
        *raf_cell.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let now = window_loop.performance().map(|p| p.now()).unwrap_or(0.0);
            {
                let mut s = scene.borrow_mut();
                let sample = if s.controller.projection_mode() == ProjectionMode::RayCast {
                    s.camera.sample_ray(ray_sample, s.controller.center())
                } else {
                    None
                };
                let out = s.controller.frame(now, sample.as_ref().map(|(ray, _)| ray));
                draw_scene(
                    &ctx,
                    &DrawParams {
                        camera: &s.camera,
                        frame: &out,
                        convention,
                        sun_local: *sun.borrow(),
                        crosshair: sample.map(|(_, at)| at),
                    },
                );
                if s.shown != Some(out.readout) {
                    set_text(&lat_ref, &format_degrees(out.readout.latitude));
                    set_text(&lng_ref, &format_degrees(out.readout.longitude));
                    s.shown = Some(out.readout);
                }
            }
            if let Some(cb) = raf_cell_loop.borrow().as_ref() {
                if let Ok(id) = window_loop.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    *raf_id.borrow_mut() = Some(id);
                }
            }
        }) as Box<dyn FnMut()>));
    }
    if let Some(cb) = raf_cell.borrow().as_ref() {
        if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            *raf_id.borrow_mut() = Some(id);
        }
    }

    // Pointer down only counts when it lands on the sphere.
    let down_cb = {
        let canvas = canvas.clone();
        let scene = scene.clone();
        Closure::wrap(Box::new(move |e: PointerEvent| {
            let p = canvas_point(&canvas, &e);
            let mut s = scene.borrow_mut();
            let Some(hit) = s.hit_test(p) else {
                return;
            };
            let input = GlobeInput::new(e.pointer_id(), pointer_kind(&e), PointerPhase::Down, p.x, p.y)
                .with_hit(Some(hit));
            let response = s.controller.handle_input(&input);
            let _ = canvas.set_pointer_capture(e.pointer_id());
            if response.stop_propagation {
                e.stop_propagation();
            }
        }) as Box<dyn FnMut(_)>)
    };
    let move_cb = {
        let canvas = canvas.clone();
        let scene = scene.clone();
        Closure::wrap(Box::new(move |e: PointerEvent| {
            let p = canvas_point(&canvas, &e);
            let mut s = scene.borrow_mut();
            let hit = s.hit_test(p);
            s.controller.set_hovered(hit.is_some());
            let input = GlobeInput::new(e.pointer_id(), pointer_kind(&e), PointerPhase::Move, p.x, p.y)
                .with_hit(hit);
            s.controller.handle_input(&input);
        }) as Box<dyn FnMut(_)>)
    };
    let leave_cb = {
        let scene = scene.clone();
        Closure::wrap(Box::new(move |_e: PointerEvent| {
            scene.borrow_mut().controller.set_hovered(false);
        }) as Box<dyn FnMut(_)>)
    };
    // Releases are window-level so a drag that ends off the canvas still ends.
    let release = |phase: PointerPhase| {
        let canvas = canvas.clone();
        let scene = scene.clone();
        Closure::wrap(Box::new(move |e: PointerEvent| {
            let p = canvas_point(&canvas, &e);
            let input = GlobeInput::new(e.pointer_id(), pointer_kind(&e), phase, p.x, p.y);
            scene.borrow_mut().controller.handle_input(&input);
        }) as Box<dyn FnMut(_)>)
    };
    let up_cb = release(PointerPhase::Up);
    let cancel_cb = release(PointerPhase::Cancel);
    let resize_cb = Closure::wrap(Box::new(move |_e: web_sys::Event| apply_size()) as Box<dyn FnMut(_)>);

    let _ = canvas.add_event_listener_with_callback("pointerdown", down_cb.as_ref().unchecked_ref());
    let _ = canvas.add_event_listener_with_callback("pointermove", move_cb.as_ref().unchecked_ref());
    let _ = canvas.add_event_listener_with_callback("pointerleave", leave_cb.as_ref().unchecked_ref());
    let _ = window.add_event_listener_with_callback("pointerup", up_cb.as_ref().unchecked_ref());
    let _ = window.add_event_listener_with_callback("pointercancel", cancel_cb.as_ref().unchecked_ref());
    let _ = window.add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
    log::info!("globe mounted");

    Some(Box::new(move || {
        let _ = canvas.remove_event_listener_with_callback("pointerdown", down_cb.as_ref().unchecked_ref());
        let _ = canvas.remove_event_listener_with_callback("pointermove", move_cb.as_ref().unchecked_ref());
        let _ = canvas.remove_event_listener_with_callback("pointerleave", leave_cb.as_ref().unchecked_ref());
        let _ = window.remove_event_listener_with_callback("pointerup", up_cb.as_ref().unchecked_ref());
        let _ = window.remove_event_listener_with_callback("pointercancel", cancel_cb.as_ref().unchecked_ref());
        let _ = window.remove_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref());
        if let Some(id) = *raf_id.borrow() {
            let _ = window.cancel_animation_frame(id);
        }
        // Drop the loop closure; it holds a handle to its own cell.
        raf_cell.borrow_mut().take();
        log::info!("globe unmounted");
    }))
}
