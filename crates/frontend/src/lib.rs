pub mod app;
pub mod domain;
pub mod shared;
pub mod system;

use wasm_bindgen::prelude::wasm_bindgen;

use crate::shared::config::load_config_or_default;
use crate::system::auth::session::Session;

#[wasm_bindgen]
pub fn hydrate() {
    let config = load_config_or_default();
    // initializes logging using the `log` crate
    _ = console_log::init_with_level(config.logging.level());
    console_error_panic_hook::set_once();

    let session = Session::from_browser(&config);
    log::info!("API root: {}", session.api_root);

    leptos::mount::mount_to_body(move || leptos::view! { <app::App session=session /> });
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
