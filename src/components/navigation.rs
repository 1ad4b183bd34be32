use yew::prelude::*;

const LINKS: [&str; 4] = ["Home", "About", "Projects", "Contact"];

#[derive(Properties, PartialEq, Clone)]
pub struct NavigationProps {
    #[prop_or_default]
    pub active: usize,
}

#[function_component]
pub fn Navigation(props: &NavigationProps) -> Html {
    html! {
        <nav style="position:absolute; top:0; left:0; right:0; display:flex; justify-content:space-between; align-items:center; padding:24px 48px; z-index:10;">
            <div style="font-size:20px; font-weight:700; letter-spacing:4px; color:#ffffff;">{"PORTFOLIO"}</div>
            <div style="display:flex; gap:32px;">
                { for LINKS.iter().enumerate().map(|(i, label)| {
                    let color = if i == props.active { "#00d4ff" } else { "rgba(255,255,255,0.7)" };
                    html! {
                        <a href={format!("#{}", label.to_lowercase())}
                           style={format!("color:{}; text-decoration:none; font-size:14px; letter-spacing:1px;", color)}>
                            { *label }
                        </a>
                    }
                }) }
            </div>
        </nav>
    }
}
