#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AutoStartLabel {
    #[default]
    Unset,
    /// Configured package is no longer installed.
    Unknown(String),
    App(String),
}

pub enum SettingsAction {
    ChangeAutoStart,
    SetDefaultHome,
    ToggleLogs,
    About,
    Back,
}

#[derive(Default)]
pub struct ScreenSettings {
    pub auto_start: AutoStartLabel,
    /// Mirrors `Settings::show_logs`; set by the app on enter and on toggle.
    pub show_logs: bool,
    pub focus_pending: bool,
}
