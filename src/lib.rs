use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, get_logger};
use crate::infrastructure::config::ClientConfig;

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Install panic hook, logger and clock
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let config = ClientConfig::load();
    let console_logger = Box::new(infrastructure::services::ConsoleLogger::new(config.log_level));
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::services::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!("🚀 Point stream client ready (endpoint {})", config.endpoint_path),
    );
}

/// Mount the Leptos app into the page body
#[wasm_bindgen(js_name = mountApp)]
pub fn mount_app() {
    app::mount();
}
