//! Client configuration resolved at build time.
//!
//! The only knob is the API base URL, overridable through the `API_BASE`
//! environment variable when the WASM bundle is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 10_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: String,
    pub request_timeout_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base: DEFAULT_API_BASE.to_owned(), request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS }
    }
}

impl ClientConfig {
    /// Build config from the `API_BASE` variable captured at compile time.
    pub fn from_build_env() -> Self {
        Self::from_override(option_env!("API_BASE"))
    }

    /// Build config from an optional base URL override.
    ///
    /// Blank overrides fall back to [`DEFAULT_API_BASE`]; trailing slashes
    /// are trimmed so [`ClientConfig::endpoint`] can join with a single `/`.
    pub fn from_override(raw: Option<&str>) -> Self {
        let api_base = raw
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_owned();
        Self { api_base, ..Self::default() }
    }

    /// Join an API path onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base, path.trim_start_matches('/'))
    }
}
