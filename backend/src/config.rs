use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_FIXTURES: &str = "fixtures/sample.json";
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_STATIC_DIR: &str = "../frontend/dist";

/// Gateway settings, read from `ASM_GATEWAY_*` environment variables
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayConfig {
    pub addr: SocketAddr,
    pub fixtures_path: PathBuf,
    pub cors_origin: String,
    /// Built dashboard served for every non-API path
    pub static_dir: PathBuf,
}

impl GatewayConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any variable lookup; unset or blank variables take defaults
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let read = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let addr = read("ASM_GATEWAY_ADDR", DEFAULT_ADDR);
        let addr = addr
            .parse::<SocketAddr>()
            .with_context(|| format!("ASM_GATEWAY_ADDR is not a socket address: {}", addr))?;

        Ok(Self {
            addr,
            fixtures_path: PathBuf::from(read("ASM_GATEWAY_FIXTURES", DEFAULT_FIXTURES)),
            cors_origin: read("ASM_GATEWAY_CORS_ORIGIN", DEFAULT_CORS_ORIGIN),
            static_dir: PathBuf::from(read("ASM_GATEWAY_STATIC_DIR", DEFAULT_STATIC_DIR)),
        })
    }
}
