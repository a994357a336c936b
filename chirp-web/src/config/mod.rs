use serde::Deserialize;
use service_core::config::{load_layered, ServerConfig};
use service_core::error::AppError;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name of this crate inside the workspace.
const CRATE_DIR: &str = "chirp-web";

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub assets: AssetSettings,
    #[serde(default)]
    pub realtime: RealtimeSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct AssetSettings {
    /// Directory holding the page, manifest, service worker and `icons/`.
    /// Relative paths are resolved against the crate directory.
    #[serde(default = "default_asset_root")]
    pub root: PathBuf,
    /// File name of the page served at `/`.
    #[serde(default = "default_index")]
    pub index: String,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            root: default_asset_root(),
            index: default_index(),
        }
    }
}

impl AssetSettings {
    pub fn index_path(&self) -> PathBuf {
        self.root.join(&self.index)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root.join("manifest.json")
    }

    pub fn service_worker_path(&self) -> PathBuf {
        self.root.join("service-worker.js")
    }

    pub fn icons_dir(&self) -> PathBuf {
        self.root.join("icons")
    }
}

fn default_asset_root() -> PathBuf {
    PathBuf::from("static")
}

fn default_index() -> String {
    "realtime.html".to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct RealtimeSettings {
    /// Upstream endpoint that mints realtime sessions.
    #[serde(default = "default_sessions_url")]
    pub sessions_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Value of the `OpenAI-Beta` opt-in header.
    #[serde(default = "default_beta_header")]
    pub beta_header: String,
    /// Environment variable holding the upstream API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_model")]
    pub default_model: String,
    #[serde(default = "default_voice")]
    pub default_voice: String,
}

impl Default for RealtimeSettings {
    fn default() -> Self {
        Self {
            sessions_url: default_sessions_url(),
            timeout_secs: default_timeout_secs(),
            beta_header: default_beta_header(),
            api_key_env: default_api_key_env(),
            default_model: default_model(),
            default_voice: default_voice(),
        }
    }
}

impl RealtimeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_sessions_url() -> String {
    "https://api.openai.com/v1/realtime/sessions".to_string()
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_beta_header() -> String {
    "realtime=v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_model() -> String {
    "gpt-4o-realtime-preview".to_string()
}

fn default_voice() -> String {
    "verse".to_string()
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP/gRPC collector, e.g. `http://tempo:4317`. Export is off when unset.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Load settings from `chirp-web/config/base.yaml` and `APP_*` overrides.
///
/// Works both from the workspace root and from inside the crate directory.
pub fn get_configuration() -> Result<Settings, AppError> {
    let base_path = std::env::current_dir()?;
    let crate_dir = crate_dir(&base_path);

    let mut settings: Settings = load_layered(&crate_dir.join("config"))?;
    if settings.assets.root.is_relative() {
        settings.assets.root = crate_dir.join(&settings.assets.root);
    }

    Ok(settings)
}

fn crate_dir(base_path: &Path) -> PathBuf {
    if base_path.ends_with(CRATE_DIR) {
        base_path.to_path_buf()
    } else {
        base_path.join(CRATE_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_upstream_contract() {
        let realtime = RealtimeSettings::default();
        assert_eq!(
            realtime.sessions_url,
            "https://api.openai.com/v1/realtime/sessions"
        );
        assert_eq!(realtime.timeout(), Duration::from_secs(15));
        assert_eq!(realtime.beta_header, "realtime=v1");
        assert_eq!(realtime.api_key_env, "OPENAI_API_KEY");
        assert_eq!(realtime.default_model, "gpt-4o-realtime-preview");
        assert_eq!(realtime.default_voice, "verse");
    }

    #[test]
    fn asset_paths_hang_off_root() {
        let assets = AssetSettings {
            root: PathBuf::from("/srv/chirp"),
            index: "index.html".to_string(),
        };
        assert_eq!(assets.index_path(), PathBuf::from("/srv/chirp/index.html"));
        assert_eq!(assets.icons_dir(), PathBuf::from("/srv/chirp/icons"));
        assert_eq!(
            assets.service_worker_path(),
            PathBuf::from("/srv/chirp/service-worker.js")
        );
    }

    #[test]
    fn crate_dir_resolves_from_workspace_or_crate() {
        assert_eq!(
            crate_dir(Path::new("/work/chirp-web")),
            PathBuf::from("/work/chirp-web")
        );
        assert_eq!(
            crate_dir(Path::new("/work")),
            PathBuf::from("/work/chirp-web")
        );
    }
}
