use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use yew::prelude::*;

use super::{
    coordinate_readout::CoordinateReadout, globe_view::GlobeView, hero::Hero,
    navigation::Navigation, time_controller::TimeController,
};
use crate::config;
use crate::state::{TimeAction, TimeOfDay};

const TICK_MS: i32 = 1000;

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| config::load());
    let time = use_reducer(TimeOfDay::now);
    let lat_ref = use_node_ref();
    let lng_ref = use_node_ref();

    // Playback clock; the reducer ignores ticks while paused.
    {
        let time = time.clone();
        use_effect_with((), move |_| {
            let window = web_sys::window();
            let tick = Closure::wrap(Box::new(move || {
                time.dispatch(TimeAction::Tick(TICK_MS as f64 / 1000.0));
            }) as Box<dyn FnMut()>);
            let id = window.as_ref().and_then(|w| {
                w.set_interval_with_callback_and_timeout_and_arguments_0(
                    tick.as_ref().unchecked_ref(),
                    TICK_MS,
                )
                .ok()
            });
            move || {
                if let (Some(w), Some(id)) = (window, id) {
                    w.clear_interval_with_handle(id);
                }
                drop(tick);
            }
        });
    }

    let sun = time.sun_direction(config.axis_convention);

    html! {
        <div style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0a0e27; color:#ffffff; font-family:'Inter', system-ui, sans-serif;">
            <GlobeView config={(*config).clone()} {sun} latitude_ref={lat_ref.clone()} longitude_ref={lng_ref.clone()} />
            <Navigation active={0} />
            <Hero />
            <CoordinateReadout latitude_ref={lat_ref} longitude_ref={lng_ref} />
            <TimeController time={time} />
        </div>
    }
}
