use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::state::daylight::SPEEDS;
use crate::state::{TimeAction, TimeOfDay};
use crate::util::{format_clock, format_date, format_hours};

#[derive(Properties, PartialEq, Clone)]
pub struct TimeControllerProps {
    pub time: UseReducerHandle<TimeOfDay>,
}

fn input_value(e: &InputEvent) -> Option<f64> {
    let input: HtmlInputElement = e.target()?.unchecked_into();
    input.value().parse().ok()
}

#[function_component]
pub fn TimeController(props: &TimeControllerProps) -> Html {
    let t = &*props.time;
    let on_day = {
        let time = props.time.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(v) = input_value(&e) {
                time.dispatch(TimeAction::SetDay(v as u32));
            }
        })
    };
    let on_hour = {
        let time = props.time.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(v) = input_value(&e) {
                time.dispatch(TimeAction::SetHours(v));
            }
        })
    };
    let on_play = {
        let time = props.time.clone();
        Callback::from(move |_| time.dispatch(TimeAction::TogglePlaying))
    };
    let label_style = "font-size:10px; letter-spacing:2px; color:rgba(255,255,255,0.5);";
    let button_style = |active: bool| {
        format!(
            "padding:4px 10px; font-size:12px; cursor:pointer; border:1px solid #00d4ff; border-radius:4px; background:{}; color:{};",
            if active { "#00d4ff" } else { "transparent" },
            if active { "#0a0e27" } else { "#00d4ff" }
        )
    };
    html! {
        <div style="position:absolute; bottom:32px; left:48px; background:rgba(10,14,39,0.8); border:1px solid rgba(0,212,255,0.3); border-radius:6px; padding:14px 18px; min-width:260px; display:flex; flex-direction:column; gap:10px; font-family:'JetBrains Mono', monospace; color:#ffffff; z-index:10;">
            <div style="display:flex; justify-content:space-between; align-items:baseline;">
                <span style="font-size:14px;">{ format_date(&t.time) }</span>
                <span style="font-size:12px; color:#00d4ff;">{ t.season().label() }</span>
                <span style="font-size:18px; font-variant-numeric:tabular-nums;">{ format_clock(&t.time) }</span>
            </div>
            <label style="display:flex; flex-direction:column; gap:4px;">
                <span style={label_style}>{ format!("DAY {}", t.day_of_year()) }</span>
                <input type="range" min="1" max={t.days_in_year().to_string()} step="1"
                    value={t.day_of_year().to_string()} oninput={on_day} />
            </label>
            <label style="display:flex; flex-direction:column; gap:4px;">
                <span style={label_style}>{ format!("HOUR {}", format_hours(t.hours())) }</span>
                <input type="range" min="0" max="23.9" step="0.1"
                    value={format!("{:.1}", t.hours())} oninput={on_hour} />
            </label>
            <div style="display:flex; gap:6px; align-items:center;">
                <button onclick={on_play} style={button_style(t.playing)}>
                    { if t.playing { "Pause" } else { "Play" } }
                </button>
                { for SPEEDS.iter().map(|&s| {
                    let time = props.time.clone();
                    let onclick = Callback::from(move |_| time.dispatch(TimeAction::SetSpeed(s)));
                    html! { <button {onclick} style={button_style(t.speed == s)}>{ format!("{}x", s) }</button> }
                }) }
            </div>
        </div>
    }
}
