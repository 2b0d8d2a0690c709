pub mod app;
pub mod domain;
pub mod shared;

use shared::config::{self, AppConfig};
use wasm_bindgen::prelude::wasm_bindgen;

#[wasm_bindgen]
pub fn hydrate() {
    let app_config = AppConfig::from_document();

    // initializes logging using the `log` crate
    _ = console_log::init_with_level(app_config.log_level);
    console_error_panic_hook::set_once();

    log::debug!("config: {:?}", app_config);
    config::init(app_config);

    app::mount_islands();
}

#[wasm_bindgen(start)]
pub fn start() {
    hydrate();
}
