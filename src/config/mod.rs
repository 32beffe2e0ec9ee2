use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::domain::Page;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HR server root the endpoint paths are resolved against
    pub base_url: String,

    /// Page shown on start-up (employee or recruitment)
    pub page: String,

    pub request_timeout_secs: u64,

    pub tick_rate_ms: u64,

    /// Fallback filter when HRDASH_LOG is unset
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            page: "employee".to_string(),
            request_timeout_secs: 10,
            tick_rate_ms: 200,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    pub fn start_page(&self) -> Page {
        self.page.parse().unwrap_or(Page::Employee)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms.max(10))
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    parse(&content)
}

pub fn parse(content: &str) -> Config {
    toml::from_str::<Config>(content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("HRDASH_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("hrdash").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("hrdash").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "hrdash", "hrdash")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

pub fn data_dir() -> Option<PathBuf> {
    if let Some(xdg) = std::env::var_os("XDG_DATA_HOME").map(PathBuf::from) {
        return Some(xdg.join("hrdash"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".local").join("share").join("hrdash"));
    }
    directories::ProjectDirs::from("io", "hrdash", "hrdash")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

pub fn log_dir() -> PathBuf {
    data_dir()
        .map(|dir| dir.join("logs"))
        .unwrap_or_else(|| PathBuf::from(".hrdash").join("logs"))
}

pub fn export_dir() -> PathBuf {
    data_dir()
        .map(|dir| dir.join("exports"))
        .unwrap_or_else(|| PathBuf::from(".hrdash").join("exports"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = parse("base_url = \"https://hr.example.com\"\npage = \"recruitment\"\n");
        assert_eq!(config.base_url, "https://hr.example.com");
        assert_eq!(config.start_page(), Page::Recruitment);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_broken_file_falls_back_to_defaults() {
        let config = parse("base_url = [");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.start_page(), Page::Employee);
    }

    #[test]
    fn test_unknown_page_falls_back_to_employee() {
        let config = parse("page = \"payroll\"");
        assert_eq!(config.start_page(), Page::Employee);
    }
}
