use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from halograph.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Address the HTTP server binds to
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// URL prefixes the fetcher will accept; anything else is rejected
    #[serde(default = "default_allowed_url_prefixes")]
    pub allowed_url_prefixes: Vec<String>,

    /// Largest remote image accepted, in bytes
    #[serde(default = "default_max_fetch_bytes")]
    pub max_fetch_bytes: usize,

    /// Seconds before an upstream fetch is abandoned
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Render settings applied when a request omits the parameter
    #[serde(default)]
    pub render: RenderDefaults,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_allowed_url_prefixes() -> Vec<String> {
    vec![
        "https://".to_string(),
        "http://localhost".to_string(),
        "http://127.0.0.1".to_string(),
    ]
}

fn default_max_fetch_bytes() -> usize {
    20 * 1024 * 1024
}

fn default_fetch_timeout_secs() -> u64 {
    30
}

/// Server-side render defaults, merged under request parameters.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct RenderDefaults {
    pub dot_type: Option<String>,
    pub effect_type: Option<String>,
    pub color_mode: Option<String>,
    pub color: Option<String>,
    pub gradient_colors: Option<Vec<String>>,
    pub gradient_angle: Option<f32>,
    pub spacing: Option<f32>,
    pub max_width: Option<u32>,
    pub max_height: Option<u32>,
    pub smoothing: Option<bool>,
    pub trim: Option<bool>,
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the file is missing or unparseable.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<Self>(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        prefixes = config.allowed_url_prefixes.len(),
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Whether a source URL matches the fetch allowlist.
    pub fn is_url_allowed(&self, url: &str) -> bool {
        self.allowed_url_prefixes
            .iter()
            .any(|prefix| url.starts_with(prefix.as_str()))
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            allowed_url_prefixes: default_allowed_url_prefixes(),
            max_fetch_bytes: default_max_fetch_bytes(),
            fetch_timeout_secs: default_fetch_timeout_secs(),
            render: RenderDefaults::default(),
        }
    }
}
