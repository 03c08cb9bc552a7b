use std::{fs, path::Path};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "deepctl.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub session: String,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://./data/deepctl.db".into(),
            session: "default".into(),
            log_filter: "info".into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    database_url: Option<String>,
    session: Option<String>,
    log: Option<String>,
}

pub fn load_settings() -> Settings {
    load_settings_from(Path::new(CONFIG_FILE), |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file if it parses, then environment variables.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        if let Ok(file_cfg) = toml::from_str::<FileSettings>(&raw) {
            if let Some(v) = file_cfg.database_url {
                settings.database_url = v;
            }
            if let Some(v) = file_cfg.session {
                settings.session = v;
            }
            if let Some(v) = file_cfg.log {
                settings.log_filter = v;
            }
        }
    }

    if let Some(v) = env("DEEPCTL_DATABASE_URL") {
        settings.database_url = v;
    }
    if let Some(v) = env("APP__DATABASE_URL") {
        settings.database_url = v;
    }

    if let Some(v) = env("DEEPCTL_SESSION") {
        settings.session = v;
    }
    if let Some(v) = env("APP__SESSION") {
        settings.session = v;
    }

    if let Some(v) = env("DEEPCTL_LOG") {
        settings.log_filter = v;
    }
    if let Some(v) = env("APP__LOG") {
        settings.log_filter = v;
    }

    settings
}

/// Plain file paths become `sqlite://` URLs; anything with a scheme passes through.
pub fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
