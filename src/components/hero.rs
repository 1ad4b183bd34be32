use yew::prelude::*;

#[function_component]
pub fn Hero() -> Html {
    html! {
        <section style="position:absolute; left:8%; top:50%; transform:translateY(-50%); max-width:520px; z-index:5; pointer-events:none;">
            <h1 style="margin:0; font-size:72px; line-height:1.0; font-weight:800; color:#ffffff;">{"CREATIVE"}</h1>
            <h1 style="margin:0 0 24px 0; font-size:72px; line-height:1.0; font-weight:800; color:#00d4ff;">{"DEVELOPER"}</h1>
            <p style="margin:0 0 32px 0; font-size:16px; line-height:1.6; color:rgba(255,255,255,0.7);">
                {"Building immersive digital experiences at the intersection of design and technology."}
            </p>
            <a href="#projects" style="pointer-events:auto; display:inline-block; padding:14px 32px; border:1px solid #00d4ff; color:#00d4ff; text-decoration:none; letter-spacing:2px; font-size:13px;">
                {"VIEW WORK"}
            </a>
        </section>
    }
}
