use yew::prelude::*;

/// Lat/lng panel. The text nodes are written directly by the animation loop through
/// the node refs, so the panel itself never re-renders per frame.
#[derive(Properties, PartialEq, Clone)]
pub struct CoordinateReadoutProps {
    pub latitude_ref: NodeRef,
    pub longitude_ref: NodeRef,
}

#[function_component]
pub fn CoordinateReadout(props: &CoordinateReadoutProps) -> Html {
    let label_style = "font-size:10px; letter-spacing:2px; color:rgba(255,255,255,0.5);";
    let value_style = "font-size:16px; font-variant-numeric:tabular-nums; color:#00d4ff;";
    html! {
        <div style="position:absolute; bottom:32px; right:48px; background:rgba(10,14,39,0.8); border:1px solid rgba(0,212,255,0.3); border-radius:6px; padding:12px 18px; display:flex; gap:24px; font-family:'JetBrains Mono', monospace; z-index:10;">
            <div>
                <div style={label_style}>{"LATITUDE"}</div>
                <div ref={props.latitude_ref.clone()} style={value_style}>{"0.0000°"}</div>
            </div>
            <div>
                <div style={label_style}>{"LONGITUDE"}</div>
                <div ref={props.longitude_ref.clone()} style={value_style}>{"0.0000°"}</div>
            </div>
        </div>
    }
}
