use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::domain::{
    chart::ChartConfig,
    errors::{ConfigError, ConnectionError},
    logging::{LogComponent, LogLevel, get_logger},
};

/// Global JS object that may override any subset of [`ClientConfig`]
pub const CONFIG_GLOBAL: &str = "POINT_STREAM_CONFIG";

/// Client settings. Every field has a default; `window.POINT_STREAM_CONFIG`
/// may override some of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Path (or absolute `ws://`/`wss://` URL) of the stream endpoint
    pub endpoint_path: String,
    pub canvas_id: String,
    pub width: u32,
    pub height: u32,
    pub log_level: LogLevel,
    /// Drive the chart from the local segment producer instead of a socket
    pub demo_feed: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint_path: "/ws".to_string(),
            canvas_id: "chart-canvas".to_string(),
            width: 360,
            height: 360,
            log_level: LogLevel::Info,
            demo_feed: false,
        }
    }
}

impl ClientConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(raw).map_err(|e| ConfigError(e.to_string()))
    }

    /// Read the override object from the page, if any
    pub fn from_window() -> Result<Self, ConfigError> {
        let window = web_sys::window().ok_or_else(|| ConfigError("no window".to_string()))?;
        let value = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
            .map_err(|e| ConfigError(format!("{e:?}")))?;

        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        if let Some(raw) = value.as_string() {
            return Self::from_json(&raw);
        }
        let raw: String = js_sys::JSON::stringify(&value)
            .map_err(|e| ConfigError(format!("{e:?}")))?
            .into();
        Self::from_json(&raw)
    }

    /// Page override if readable, defaults otherwise
    pub fn load() -> Self {
        match Self::from_window() {
            Ok(config) => config,
            Err(e) => {
                get_logger().warn(
                    LogComponent::Infrastructure("Config"),
                    &format!("⚠️ {e}; using defaults"),
                );
                Self::default()
            }
        }
    }

    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig::with_size(self.width, self.height)
    }

    /// Absolute WebSocket URL for the current page
    pub fn endpoint_url(&self) -> Result<String, ConnectionError> {
        let location = web_sys::window()
            .ok_or_else(|| ConnectionError::NoBrowserContext("no window".to_string()))?
            .location();
        let protocol = location
            .protocol()
            .map_err(|e| ConnectionError::NoBrowserContext(format!("{e:?}")))?;
        let host =
            location.host().map_err(|e| ConnectionError::NoBrowserContext(format!("{e:?}")))?;
        Ok(resolve_endpoint(&protocol, &host, &self.endpoint_path))
    }
}

/// `("https:", "example.org", "/ws")` → `"wss://example.org/ws"`.
/// Absolute `ws://` / `wss://` paths are returned unchanged.
pub fn resolve_endpoint(protocol: &str, host: &str, path: &str) -> String {
    if path.starts_with("ws://") || path.starts_with("wss://") {
        return path.to_string();
    }
    let scheme = if protocol.trim_end_matches(':') == "https" { "wss" } else { "ws" };
    if path.starts_with('/') {
        format!("{scheme}://{host}{path}")
    } else {
        format!("{scheme}://{host}/{path}")
    }
}
