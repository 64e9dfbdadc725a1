use crate::android_activity::ActivityStarter;
use crate::calc_launcherapps_stt::ApplicationRegistry;
use crate::screen_about_stt::ScreenAbout;
use crate::screen_appselector_stt::ScreenAppSelector;
use crate::screen_home_stt::ScreenHome;
use crate::screen_settings_stt::ScreenSettings;
use crate::shared_prefs_stt::PreferenceStore;
use crate::Config;
use crate::LogLevel;
use crate::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppView {
    Home,
    Settings,
    AppSelector,
    About,
}

#[derive(Debug, Clone, Default)]
pub struct LogSettings {
    pub show_logs: bool,
    pub log_level: LogLevel,
}

pub struct TvLauncherApp {
    pub config: Option<Config>,
    pub settings: Settings,

    pub registry: Box<dyn ApplicationRegistry>,
    pub starter: Box<dyn ActivityStarter>,
    pub prefs: Box<dyn PreferenceStore>,

    /// Bottom entry is always `AppView::Home`.
    pub nav_stack: Vec<AppView>,

    pub screen_home: ScreenHome,
    pub screen_settings: ScreenSettings,
    pub screen_appselector: ScreenAppSelector,
    pub screen_about: ScreenAbout,
}
