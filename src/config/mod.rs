use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::symbols::DEFAULT_ENDPOINT;

pub const PROJECT_CONFIG_DIR: &str = ".symbol-map";
pub const DEFAULT_LOG_FILE: &str = "./symap.log";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: String,
    pub theme: String,
    pub log_level: String,
    pub log_file: PathBuf,
    pub http: HttpConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            theme: "dark".to_string(),
            log_level: "info".to_string(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
            http: HttpConfig::default(),
        }
    }
}

/// HTTP settings for the symbol service. Timeouts are off unless configured.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HttpConfig {
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: None,
            request_timeout_ms: None,
            user_agent: concat!("symbol-map/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    pub endpoint: Option<String>,
    pub theme: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub http: Option<PartialHttpConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct PartialHttpConfig {
    pub connect_timeout_ms: Option<u64>,
    pub request_timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub endpoint: Option<String>,
    pub theme: Option<String>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Overrides {
    pub fn from_env() -> Self {
        Self {
            endpoint: std::env::var("SYMAP_ENDPOINT").ok(),
            theme: std::env::var("SYMAP_THEME").ok(),
            log_level: std::env::var("SYMAP_LOG").ok(),
            log_file: std::env::var("SYMAP_LOG_FILE").ok().map(PathBuf::from),
        }
    }

    /// Fields set in `self` win over `other`.
    pub fn or(self, other: Overrides) -> Self {
        Self {
            endpoint: self.endpoint.or(other.endpoint),
            theme: self.theme.or(other.theme),
            log_level: self.log_level.or(other.log_level),
            log_file: self.log_file.or(other.log_file),
        }
    }
}

/// Something that happened while reading config files.
///
/// Config is read before the subscriber is installed, so these are kept and
/// logged once logging is up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigNote {
    Loaded { path: PathBuf },
    ParseFailed { path: PathBuf, error: String },
    ReadFailed { error: String },
}

impl ConfigNote {
    pub fn log(&self) {
        match self {
            ConfigNote::Loaded { path } => info!(path=%path.display(), "loaded config file"),
            ConfigNote::ParseFailed { path, error } => {
                warn!(path=%path.display(), %error, "parse config failed; ignoring file")
            }
            ConfigNote::ReadFailed { error } => {
                warn!(%error, "read config failed; ignoring file")
            }
        }
    }
}

impl AppConfig {
    /// CLI > environment > project file > global file > defaults.
    pub fn load(cli: Overrides) -> Result<(Self, Vec<ConfigNote>)> {
        let project_root = std::env::current_dir().context("resolve current dir")?;
        let mut notes = Vec::new();
        let project_cfg = load_project_config(&project_root, &mut notes);
        let project_cfg = or_note(project_cfg, &mut notes);
        let file_cfg = load_file_config(&mut notes);
        let file_cfg = or_note(file_cfg, &mut notes);
        let cfg = Self::layered(cli.or(Overrides::from_env()), project_cfg, file_cfg);
        Ok((cfg, notes))
    }

    pub fn layered(overrides: Overrides, project_cfg: FileConfig, file_cfg: FileConfig) -> Self {
        let defaults = AppConfig::default();

        let http = {
            let mut http = defaults.http.clone();
            for partial in [file_cfg.http.as_ref(), project_cfg.http.as_ref()]
                .into_iter()
                .flatten()
            {
                if let Some(ms) = partial.connect_timeout_ms {
                    http.connect_timeout_ms = Some(ms);
                }
                if let Some(ms) = partial.request_timeout_ms {
                    http.request_timeout_ms = Some(ms);
                }
                if let Some(ua) = &partial.user_agent {
                    http.user_agent = ua.clone();
                }
            }
            http
        };

        Self {
            endpoint: overrides
                .endpoint
                .filter(|s| !s.is_empty())
                .or(project_cfg.endpoint)
                .or(file_cfg.endpoint)
                .unwrap_or(defaults.endpoint),
            theme: overrides
                .theme
                .or(project_cfg.theme)
                .or(file_cfg.theme)
                .unwrap_or(defaults.theme),
            log_level: overrides
                .log_level
                .or(project_cfg.log_level)
                .or(file_cfg.log_level)
                .unwrap_or(defaults.log_level),
            log_file: overrides
                .log_file
                .or(project_cfg.log_file)
                .or(file_cfg.log_file)
                .unwrap_or(defaults.log_file),
            http,
        }
    }
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut v = Vec::new();
    if let Ok(p) = std::env::var("SYMAP_CONFIG") {
        v.push(PathBuf::from(p));
    }
    if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
        v.push(Path::new(&xdg_home).join("symbol-map/config.toml"));
    }
    if let Some(dir) = dirs::config_dir() {
        let p = dir.join("symbol-map/config.toml");
        if !v.contains(&p) {
            v.push(p);
        }
    }
    v
}

/// A read error becomes a note and the layer falls back to empty.
pub(crate) fn or_note(res: Result<FileConfig>, notes: &mut Vec<ConfigNote>) -> FileConfig {
    res.unwrap_or_else(|e| {
        notes.push(ConfigNote::ReadFailed {
            error: format!("{e:#}"),
        });
        FileConfig::default()
    })
}

fn parse_file(path: &Path, s: &str, notes: &mut Vec<ConfigNote>) -> Option<FileConfig> {
    match toml::from_str::<FileConfig>(s) {
        Ok(cfg) => {
            notes.push(ConfigNote::Loaded {
                path: path.to_path_buf(),
            });
            Some(cfg)
        }
        Err(e) => {
            notes.push(ConfigNote::ParseFailed {
                path: path.to_path_buf(),
                error: e.to_string(),
            });
            None
        }
    }
}

/// Load the first parseable global config file.
pub fn load_file_config(notes: &mut Vec<ConfigNote>) -> Result<FileConfig> {
    for p in candidate_paths() {
        if p.exists() {
            let s = fs::read_to_string(&p)
                .with_context(|| format!("read config file: {}", p.display()))?;
            if let Some(cfg) = parse_file(&p, &s, notes) {
                return Ok(cfg);
            }
        }
    }
    Ok(FileConfig::default())
}

/// Load `.symbol-map/config.toml` under `project_root`, if present.
pub fn load_project_config(
    project_root: &Path,
    notes: &mut Vec<ConfigNote>,
) -> Result<FileConfig> {
    let path = project_root.join(PROJECT_CONFIG_DIR).join("config.toml");
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let s = fs::read_to_string(&path)
        .with_context(|| format!("read project config file: {}", path.display()))?;
    Ok(parse_file(&path, &s, notes).unwrap_or_default())
}

#[cfg(test)]
mod tests;
