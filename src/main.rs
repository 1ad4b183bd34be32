mod components;
mod config;
mod model;
mod render;
mod state;
mod util;

use components::app::App;

fn main() {
    // A second init (hot reload) just fails; the first logger stays.
    let _ = console_log::init_with_level(log::Level::Info);
    yew::Renderer::<App>::new().render();
}
