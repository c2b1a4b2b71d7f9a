use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Limits;

const DEFAULT_PORT: u16 = 7071;
const DEFAULT_BODY_LIMIT_MB: usize = 100;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub limits: Option<LimitsConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub body_limit_mb: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_pages: Option<usize>,
    pub max_page_chars: Option<usize>,
    pub raw_page_chars: Option<usize>,
    pub min_pdf_bytes: Option<usize>,
    pub fetch_timeout_secs: Option<u64>,
    pub max_download_mb: Option<usize>,
}

/// Resolved listener settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerSettings {
    pub bind: String,
    pub port: u16,
    pub body_limit_bytes: usize,
}

impl ConfigFile {
    /// Page and fetch limits, with defaults for anything unset.
    pub fn limits(&self) -> Limits {
        let defaults = Limits::default();
        let Some(l) = self.limits.as_ref() else {
            return defaults;
        };
        Limits {
            max_pages: l.max_pages.unwrap_or(defaults.max_pages),
            max_page_chars: l.max_page_chars.unwrap_or(defaults.max_page_chars),
            raw_page_chars: l.raw_page_chars.unwrap_or(defaults.raw_page_chars),
            min_pdf_bytes: l.min_pdf_bytes.unwrap_or(defaults.min_pdf_bytes),
            fetch_timeout: l
                .fetch_timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
            max_download_bytes: l
                .max_download_mb
                .map(|mb| mb * 1024 * 1024)
                .unwrap_or(defaults.max_download_bytes),
        }
    }

    /// Listener settings, with defaults for anything unset.
    pub fn server(&self) -> ServerSettings {
        let s = self.server.as_ref();
        ServerSettings {
            bind: s
                .and_then(|s| s.bind.clone())
                .unwrap_or_else(|| "0.0.0.0".to_string()),
            port: s.and_then(|s| s.port).unwrap_or(DEFAULT_PORT),
            body_limit_bytes: s.and_then(|s| s.body_limit_mb).unwrap_or(DEFAULT_BODY_LIMIT_MB)
                * 1024
                * 1024,
        }
    }
}

/// Platform config directory path: `<config_dir>/pagesplit/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("pagesplit").join("config.toml"))
}

/// Load config by cascading CWD `.pagesplit.toml` over platform config.
/// CWD values override platform values. Unreadable or malformed files are
/// logged and skipped.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_or_warn(&p));
    let cwd = load_or_warn(Path::new(".pagesplit.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_or_warn(path: &Path) -> Option<ConfigFile> {
    match load_from_path(path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "ignoring config file");
            None
        }
    }
}

/// Load a config from a specific path. Returns `Ok(None)` if the file
/// doesn't exist.
pub fn load_from_path(path: &Path) -> Result<Option<ConfigFile>, ConfigError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    let config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "loaded config file");
    Ok(Some(config))
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let bs = base.server.unwrap_or_default();
    let os = overlay.server.unwrap_or_default();
    let bl = base.limits.unwrap_or_default();
    let ol = overlay.limits.unwrap_or_default();

    ConfigFile {
        server: Some(ServerConfig {
            bind: os.bind.or(bs.bind),
            port: os.port.or(bs.port),
            body_limit_mb: os.body_limit_mb.or(bs.body_limit_mb),
        }),
        limits: Some(LimitsConfig {
            max_pages: ol.max_pages.or(bl.max_pages),
            max_page_chars: ol.max_page_chars.or(bl.max_page_chars),
            raw_page_chars: ol.raw_page_chars.or(bl.raw_page_chars),
            min_pdf_bytes: ol.min_pdf_bytes.or(bl.min_pdf_bytes),
            fetch_timeout_secs: ol.fetch_timeout_secs.or(bl.fetch_timeout_secs),
            max_download_mb: ol.max_download_mb.or(bl.max_download_mb),
        }),
    }
}
