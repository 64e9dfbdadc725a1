use eframe::egui;

pub mod android_activity;
#[cfg(target_os = "android")]
pub mod android_jni;
#[cfg(target_os = "android")]
pub mod android_packagemanager;
pub mod boot_receiver;
pub mod boot_receiver_stt;
pub mod calc_icon;
pub mod calc_launcherapps;
pub mod calc_launcherapps_stt;
pub mod log_capture;
pub mod models;
mod screen_about;
pub mod screen_about_stt;
mod screen_appselector;
pub mod screen_appselector_stt;
mod screen_home;
pub mod screen_home_stt;
mod screen_settings;
pub mod screen_settings_stt;
pub mod shared_prefs;
pub mod shared_prefs_stt;

pub use android_activity::{
    open_default_home_settings, ActivityStarter, HomeSettingsOutcome, UnavailableActivityStarter,
    ACTION_HOME_SETTINGS, ACTION_SETTINGS,
};
pub use tv_launcher_app::{AppView, TvLauncherApp, View};
pub mod tv_launcher_app;
pub mod tv_launcher_app_stt;

#[cfg(target_os = "android")]
mod main_android;

use anyhow::{Context, Result};
#[cfg(not(target_os = "android"))]
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    #[default]
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn from_name(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "warn" => LogLevel::Warn,
            "info" => LogLevel::Info,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Error,
        }
    }

    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Lower is more severe.
    pub fn priority(&self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub config_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub show_logs: bool,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default = "default_grid_columns")]
    pub grid_columns: usize,
}

fn default_log_level() -> String {
    "Error".to_string()
}

fn default_language() -> String {
    "Auto".to_string()
}

fn default_grid_columns() -> usize {
    6
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            show_logs: false,
            language: default_language(),
            grid_columns: default_grid_columns(),
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        #[cfg(target_os = "android")]
        let config_dir = PathBuf::from("/data/data/com.tvlauncher/files");

        #[cfg(not(target_os = "android"))]
        let config_dir = ProjectDirs::from("com", "tvlauncher", "tv_launcher")
            .context("Failed to get project directories")?
            .config_dir()
            .to_path_buf();

        Self::with_dir(config_dir)
    }

    /// Use an explicit directory, e.g. a scratch dir in tests.
    pub fn with_dir(config_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config dir {:?}", config_dir))?;
        log::debug!("Config dir: {:?}", config_dir);
        Ok(Config { config_dir })
    }

    pub fn load_settings(&self) -> Result<Settings> {
        let settings_path = self.config_dir.join("settings.txt");

        if !settings_path.exists() {
            return Ok(Settings::default());
        }

        let contents =
            fs::read_to_string(&settings_path).context("Failed to read settings file")?;

        let settings: Settings =
            serde_json::from_str(&contents).context("Failed to parse settings JSON")?;

        Ok(settings)
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<()> {
        let settings_path = self.config_dir.join("settings.txt");

        let json =
            serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;

        fs::write(&settings_path, json).context("Failed to write settings file")?;

        log::info!("Settings saved to {:?}", settings_path);
        Ok(())
    }
}

pub fn init_i18n(language: &str) {
    let en_us = String::from_utf8_lossy(include_bytes!("../assets/languages/fluent/en-US.ftl"));
    let zh_cn = String::from_utf8_lossy(include_bytes!("../assets/languages/fluent/zh-CN.ftl"));

    if let Err(e) = egui_i18n::load_translations_from_text("en-US", en_us) {
        log::error!("Failed to load en-US translations: {:?}", e);
    }
    if let Err(e) = egui_i18n::load_translations_from_text("zh-CN", zh_cn) {
        log::error!("Failed to load zh-CN translations: {:?}", e);
    }

    egui_i18n::set_language(&resolve_language(language, sys_locale::get_locale().as_deref()));
    egui_i18n::set_fallback("en-US");
}

/// Map the configured language (or `Auto` plus the system locale) to a bundled translation.
pub fn resolve_language(configured: &str, system_locale: Option<&str>) -> String {
    let wanted = if configured == "Auto" {
        system_locale.unwrap_or("en-US")
    } else {
        configured
    };
    if wanted.starts_with("zh") {
        "zh-CN".to_string()
    } else {
        "en-US".to_string()
    }
}

/// Narrow viewports get a smaller grid.
pub fn is_narrow(ctx: &egui::Context) -> bool {
    ctx.screen_rect().width() < 900.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_defaults_when_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_dir(dir.path().to_path_buf()).unwrap();
        let settings = config.load_settings().unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.grid_columns, 6);
    }

    #[test]
    fn test_settings_partial_json_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_dir(dir.path().to_path_buf()).unwrap();
        fs::write(dir.path().join("settings.txt"), r#"{ "show_logs": true }"#).unwrap();

        let settings = config.load_settings().unwrap();
        assert!(settings.show_logs);
        assert_eq!(settings.log_level, "Error");
        assert_eq!(settings.language, "Auto");
    }

    #[test]
    fn test_settings_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::with_dir(dir.path().to_path_buf()).unwrap();
        let settings = Settings {
            log_level: "Debug".to_string(),
            show_logs: true,
            language: "zh-CN".to_string(),
            grid_columns: 4,
        };
        config.save_settings(&settings).unwrap();
        assert_eq!(config.load_settings().unwrap(), settings);
    }

    #[test]
    fn test_resolve_language() {
        assert_eq!(resolve_language("Auto", Some("zh-TW")), "zh-CN");
        assert_eq!(resolve_language("Auto", Some("de-DE")), "en-US");
        assert_eq!(resolve_language("Auto", None), "en-US");
        assert_eq!(resolve_language("zh-CN", Some("en-US")), "zh-CN");
    }

    #[test]
    fn test_log_level_from_name() {
        assert_eq!(LogLevel::from_name("Debug"), LogLevel::Debug);
        assert_eq!(LogLevel::from_name("WARN"), LogLevel::Warn);
        assert_eq!(LogLevel::from_name("nonsense"), LogLevel::Error);
        assert!(LogLevel::Error.priority() < LogLevel::Trace.priority());
    }
}
