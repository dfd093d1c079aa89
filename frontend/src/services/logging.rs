use gloo::net::http::Request;
use shared::{LogRequest, LOGS_PATH};
use wasm_bindgen_futures::spawn_local;

/// Forwards browser log lines to the gateway and echoes them to the console
pub struct Logger;

impl Logger {
    pub fn debug_with_component(component: &str, message: &str) {
        gloo::console::debug!(format!("[{}] {}", component, message));
        Self::log("debug", message, Some(component.to_string()));
    }

    pub fn info_with_component(component: &str, message: &str) {
        gloo::console::info!(format!("[{}] {}", component, message));
        Self::log("info", message, Some(component.to_string()));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        gloo::console::warn!(format!("[{}] {}", component, message));
        Self::log("warn", message, Some(component.to_string()));
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(format!("[{}] {}", component, message));
        Self::log("error", message, Some(component.to_string()));
    }

    fn log(level: &str, message: &str, component: Option<String>) {
        let request = LogRequest {
            level: level.to_string(),
            message: message.to_string(),
            component,
        };
        let url = format!("{}{}", super::api::GatewayClient::new().base_url(), LOGS_PATH);

        // Fire and forget; a dead gateway must not break the page
        spawn_local(async move {
            let Ok(request) = Request::post(&url).json(&request) else {
                return;
            };
            let _ = request.send().await;
        });
    }
}
