use crate::config::{
    AppConfig, ConfigNote, FileConfig, Overrides, PROJECT_CONFIG_DIR, PartialHttpConfig,
    load_project_config, or_note,
};
use crate::logging::LogCapture;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_load_project_config() {
    let temp_dir = TempDir::new().unwrap();
    let project_root = temp_dir.path();

    let cfg_dir = project_root.join(PROJECT_CONFIG_DIR);
    fs::create_dir_all(&cfg_dir).unwrap();

    let config_content = r#"
endpoint = "http://localhost:8080/SearchSymbols"
theme = "light"

[http]
connect_timeout_ms = 1500
"#;
    fs::write(cfg_dir.join("config.toml"), config_content).unwrap();

    let mut notes = Vec::new();
    let project_cfg = load_project_config(project_root, &mut notes).unwrap();
    assert_eq!(
        notes,
        vec![ConfigNote::Loaded {
            path: cfg_dir.join("config.toml")
        }]
    );
    assert_eq!(
        project_cfg.endpoint.as_deref(),
        Some("http://localhost:8080/SearchSymbols")
    );
    assert_eq!(project_cfg.theme.as_deref(), Some("light"));
    let http = project_cfg.http.unwrap();
    assert_eq!(http.connect_timeout_ms, Some(1500));
    assert_eq!(http.request_timeout_ms, None);
}

#[test]
fn test_load_project_config_not_exists() {
    let temp_dir = TempDir::new().unwrap();
    let mut notes = Vec::new();
    let project_cfg = load_project_config(temp_dir.path(), &mut notes).unwrap();
    assert_eq!(project_cfg, FileConfig::default());
    assert!(notes.is_empty());
}

#[test]
fn test_load_project_config_invalid_is_ignored_and_logged() {
    let temp_dir = TempDir::new().unwrap();
    let cfg_dir = temp_dir.path().join(PROJECT_CONFIG_DIR);
    fs::create_dir_all(&cfg_dir).unwrap();
    fs::write(cfg_dir.join("config.toml"), "theme = [not toml").unwrap();

    let mut notes = Vec::new();
    let project_cfg = load_project_config(temp_dir.path(), &mut notes).unwrap();
    assert_eq!(project_cfg, FileConfig::default());
    assert_eq!(notes.len(), 1);
    let ConfigNote::ParseFailed { path, error } = &notes[0] else {
        panic!("expected a parse failure, got {:?}", notes[0]);
    };
    assert_eq!(path, &cfg_dir.join("config.toml"));
    assert!(!error.is_empty());

    let logs = LogCapture::start();
    notes[0].log();
    let line = logs.line_with("parse config failed").unwrap();
    assert!(line.contains("WARN"));
    assert!(line.contains("config.toml"));
}

#[test]
fn test_unreadable_project_config_is_logged_and_ignored() {
    let temp_dir = TempDir::new().unwrap();
    // A directory where the file should be exists but cannot be read as text.
    let cfg_path = temp_dir.path().join(PROJECT_CONFIG_DIR).join("config.toml");
    fs::create_dir_all(&cfg_path).unwrap();

    let mut notes = Vec::new();
    let res = load_project_config(temp_dir.path(), &mut notes);
    assert!(res.is_err());
    let cfg = or_note(res, &mut notes);
    assert_eq!(cfg, FileConfig::default());
    let [ConfigNote::ReadFailed { error }] = notes.as_slice() else {
        panic!("expected one read failure, got {notes:?}");
    };
    assert!(error.contains("read project config file"));

    let logs = LogCapture::start();
    notes[0].log();
    let line = logs.line_with("read config failed").unwrap();
    assert!(line.contains("WARN"));
}

#[test]
fn test_defaults_have_no_timeouts() {
    let cfg = AppConfig::layered(
        Overrides::default(),
        FileConfig::default(),
        FileConfig::default(),
    );
    assert!(cfg.endpoint.ends_with("/SearchSymbols"));
    assert_eq!(cfg.theme, "dark");
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.http.connect_timeout_ms, None);
    assert_eq!(cfg.http.request_timeout_ms, None);
}

#[test]
fn test_layer_precedence() {
    let global = FileConfig {
        endpoint: Some("http://global/".into()),
        theme: Some("light".into()),
        log_level: Some("warn".into()),
        log_file: Some(PathBuf::from("/tmp/global.log")),
        http: Some(PartialHttpConfig {
            connect_timeout_ms: Some(100),
            request_timeout_ms: Some(200),
            user_agent: Some("global-agent".into()),
        }),
    };
    let project = FileConfig {
        endpoint: Some("http://project/".into()),
        http: Some(PartialHttpConfig {
            request_timeout_ms: Some(900),
            ..Default::default()
        }),
        ..Default::default()
    };
    let overrides = Overrides {
        log_level: Some("debug".into()),
        ..Default::default()
    };

    let cfg = AppConfig::layered(overrides, project, global);
    assert_eq!(cfg.endpoint, "http://project/");
    assert_eq!(cfg.theme, "light");
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.log_file, PathBuf::from("/tmp/global.log"));
    assert_eq!(cfg.http.connect_timeout_ms, Some(100));
    assert_eq!(cfg.http.request_timeout_ms, Some(900));
    assert_eq!(cfg.http.user_agent, "global-agent");
}

#[test]
fn test_cli_overrides_env() {
    let cli = Overrides {
        endpoint: Some("http://cli/".into()),
        ..Default::default()
    };
    let env = Overrides {
        endpoint: Some("http://env/".into()),
        theme: Some("light".into()),
        ..Default::default()
    };
    let merged = cli.or(env);
    assert_eq!(merged.endpoint.as_deref(), Some("http://cli/"));
    assert_eq!(merged.theme.as_deref(), Some("light"));
}
