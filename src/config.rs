//! Environment-driven service configuration.
//!
//! The upstream credential is the only hard gate: without it the render
//! entry point reports service-unavailable. Everything else has a workable
//! default for local runs.

use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct Config {
    /// Credential for the base-image collaborator. `None` disables rendering.
    pub api_key: Option<String>,
    /// Base URL of the base-image collaborator's task API.
    pub upstream_url: String,
    pub host: String,
    pub port: u16,
    /// Optional prefix for reverse-proxy deployments (e.g. `/pinforge`).
    pub path_prefix: String,
    /// Directory holding bundled font files.
    pub font_dir: PathBuf,
    /// Primary output directory for rendered PNGs.
    pub output_dir: PathBuf,
    /// Fallback output directory used when the primary is not writable.
    pub fallback_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            upstream_url: "https://api.runware.ai/v1".to_string(),
            host: "0.0.0.0".to_string(),
            port: 5000,
            path_prefix: String::new(),
            font_dir: PathBuf::from("assets/fonts"),
            output_dir: PathBuf::from("static"),
            fallback_dir: std::env::temp_dir().join("pinforge"),
        }
    }
}

impl Config {
    /// Read `PINFORGE_*` variables, falling back to defaults.
    pub fn from_env() -> Self {
        let d = Self::default();
        Self {
            api_key: env_nonempty("PINFORGE_API_KEY"),
            upstream_url: env_nonempty("PINFORGE_UPSTREAM_URL").unwrap_or(d.upstream_url),
            host: env_nonempty("PINFORGE_HOST").unwrap_or(d.host),
            port: env_nonempty("PINFORGE_PORT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.port),
            path_prefix: env_nonempty("PINFORGE_PATH_PREFIX").unwrap_or(d.path_prefix),
            font_dir: env_nonempty("PINFORGE_FONT_DIR")
                .map(PathBuf::from)
                .unwrap_or(d.font_dir),
            output_dir: env_nonempty("PINFORGE_OUTPUT_DIR")
                .map(PathBuf::from)
                .unwrap_or(d.output_dir),
            fallback_dir: env_nonempty("PINFORGE_FALLBACK_DIR")
                .map(PathBuf::from)
                .unwrap_or(d.fallback_dir),
        }
    }

    /// Whether the render entry point is usable at all.
    pub fn render_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }
}

fn env_nonempty(key: &str) -> Option<String> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => Some(v),
        _ => None,
    }
}
