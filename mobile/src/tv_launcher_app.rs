pub use crate::tv_launcher_app_stt::*;
use crate::android_activity::{open_default_home_settings, ActivityStarter};
use crate::calc_launcherapps::ApplicationRegistry;
use crate::screen_about_stt::{AboutAction, ScreenAbout};
use crate::screen_appselector_stt::{ScreenAppSelector, SelectorAction};
use crate::screen_home_stt::{HomeAction, ScreenHome};
use crate::screen_settings_stt::{ScreenSettings, SettingsAction};
use crate::shared_prefs::PreferenceStore;
use crate::{Config, LogLevel, Settings};
use eframe::egui;
use eframe::egui::Context;
use egui_i18n::tr;
use egui_material3::theme::{load_fonts, load_themes, setup_local_fonts, update_window_background};
use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock};

/// System fonts with CJK coverage, tried in order for the zh-CN translation.
const CJK_FONT_CANDIDATES: &[&str] = &[
    "/system/fonts/NotoSansCJK-Regular.ttc",
    "/system/fonts/NotoSansSC-Regular.otf",
    "/system/fonts/DroidSansFallback.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "/System/Library/Fonts/PingFang.ttc",
];

const LOG_BUFFER_LIMIT: usize = 10000;

/// Initialize i18n and the captured-log filter.
/// Call this early in main() before creating the app.
pub fn init_common(settings: &Settings) {
    crate::init_i18n(&settings.language);
    update_log_settings(LogSettings {
        show_logs: settings.show_logs,
        log_level: LogLevel::from_name(&settings.log_level),
    });
}

/// Initialize egui context with fonts and themes.
/// Call this in the eframe app creation callback.
pub fn init_egui(ctx: &Context) {
    if let Some(path) = CJK_FONT_CANDIDATES
        .iter()
        .copied()
        .find(|path| Path::new(path).exists())
    {
        log::debug!("Using CJK font {}", path);
        setup_local_fonts(Some(path));
    }
    load_fonts(ctx);
    load_themes();
    update_window_background(ctx);

    // large text for viewing from the couch
    ctx.style_mut(|style| {
        for font_id in style.text_styles.values_mut() {
            font_id.size *= 1.25;
        }
        style.spacing.button_padding = egui::vec2(16.0, 12.0);
    });
}

static LOG_BUFFER: OnceLock<Arc<Mutex<String>>> = OnceLock::new();
static LOG_SETTINGS: OnceLock<Arc<Mutex<LogSettings>>> = OnceLock::new();

fn get_log_buffer() -> &'static Arc<Mutex<String>> {
    LOG_BUFFER.get_or_init(|| Arc::new(Mutex::new(String::new())))
}

fn get_log_settings() -> &'static Arc<Mutex<LogSettings>> {
    LOG_SETTINGS.get_or_init(|| Arc::new(Mutex::new(LogSettings::default())))
}

pub fn update_log_settings(settings: LogSettings) {
    if let Ok(mut log_settings) = get_log_settings().lock() {
        *log_settings = settings;
    }
}

/// Append a captured line if `level` is at least as severe as the selected level.
pub fn append_log(level: LogLevel, message: String) {
    let should_log = match get_log_settings().lock() {
        Ok(settings) => level.priority() <= settings.log_level.priority(),
        Err(_) => false,
    };
    if !should_log {
        return;
    }

    if let Ok(mut buffer) = get_log_buffer().lock() {
        buffer.push_str(&message);
        buffer.push('\n');

        if buffer.len() > LOG_BUFFER_LIMIT {
            let mut cut = buffer.len() - LOG_BUFFER_LIMIT;
            while !buffer.is_char_boundary(cut) {
                cut += 1;
            }
            buffer.drain(..cut);
        }
    }
}

pub fn get_log_text() -> String {
    match get_log_buffer().lock() {
        Ok(buffer) => buffer.clone(),
        Err(_) => String::from("Unable to access logs"),
    }
}

/// Narrow viewports cap the grid at three columns.
pub fn effective_columns(configured: usize, narrow: bool) -> usize {
    let columns = configured.max(1);
    if narrow {
        columns.min(3)
    } else {
        columns
    }
}

pub trait View {
    fn ui(&mut self, ui: &mut egui::Ui);
}

impl TvLauncherApp {
    pub fn new(
        config: Option<Config>,
        registry: Box<dyn ApplicationRegistry>,
        starter: Box<dyn ActivityStarter>,
        prefs: Box<dyn PreferenceStore>,
    ) -> Self {
        let settings = match &config {
            Some(config) => config.load_settings().unwrap_or_else(|e| {
                log::warn!("Failed to load settings, using defaults: {:#}", e);
                Settings::default()
            }),
            None => Settings::default(),
        };

        let mut app = Self {
            config,
            settings,
            registry,
            starter,
            prefs,
            nav_stack: vec![AppView::Home],
            screen_home: ScreenHome::new(),
            screen_settings: ScreenSettings::new(),
            screen_appselector: ScreenAppSelector::new(),
            screen_about: ScreenAbout::new(),
        };
        app.enter(AppView::Home);
        app
    }

    pub fn current_view(&self) -> AppView {
        self.nav_stack.last().copied().unwrap_or(AppView::Home)
    }

    pub fn navigate_to(&mut self, view: AppView) {
        log::debug!("navigate {:?} -> {:?}", self.current_view(), view);
        self.nav_stack.push(view);
        self.enter(view);
    }

    /// Pop one screen and refresh the revealed one. Home is never popped.
    pub fn go_back(&mut self) -> bool {
        if self.nav_stack.len() <= 1 {
            return false;
        }
        self.nav_stack.pop();
        let view = self.current_view();
        self.enter(view);
        true
    }

    fn enter(&mut self, view: AppView) {
        match view {
            AppView::Home => self.screen_home.on_enter(self.registry.as_ref()),
            AppView::Settings => {
                self.screen_settings
                    .on_enter(self.registry.as_ref(), self.prefs.as_ref());
                self.screen_settings.show_logs = self.settings.show_logs;
            }
            AppView::AppSelector => self
                .screen_appselector
                .on_enter(self.registry.as_ref(), self.prefs.as_ref()),
            AppView::About => self.screen_about.on_enter(),
        }
    }

    pub fn handle_home_action(&mut self, action: HomeAction) {
        match action {
            HomeAction::Launch(intent) => {
                let package_id = intent.package_id().unwrap_or_default().to_string();
                log::info!("Launching {}", package_id);
                if let Err(e) = self.starter.start(&intent, false) {
                    log::error!("Failed to launch {}: {:#}", package_id, e);
                }
            }
            HomeAction::MarkAutoStart(package_id) => {
                if let Err(e) = self
                    .screen_home
                    .mark_auto_start(&package_id, self.prefs.as_ref())
                {
                    log::error!("Failed to set auto-start app: {:#}", e);
                }
            }
            HomeAction::OpenSettings => self.navigate_to(AppView::Settings),
        }
    }

    pub fn handle_settings_action(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::ChangeAutoStart => self.navigate_to(AppView::AppSelector),
            SettingsAction::SetDefaultHome => {
                match open_default_home_settings(self.starter.as_ref()) {
                    Ok(outcome) => log::info!("Opened default home settings: {:?}", outcome),
                    Err(e) => log::error!("Failed to open default home settings: {:#}", e),
                }
            }
            SettingsAction::ToggleLogs => self.toggle_logs(),
            SettingsAction::About => self.navigate_to(AppView::About),
            SettingsAction::Back => {
                self.go_back();
            }
        }
    }

    /// Flip the log panel and persist the choice to `settings.txt`.
    pub fn toggle_logs(&mut self) {
        self.settings.show_logs = !self.settings.show_logs;
        self.screen_settings.show_logs = self.settings.show_logs;
        update_log_settings(LogSettings {
            show_logs: self.settings.show_logs,
            log_level: LogLevel::from_name(&self.settings.log_level),
        });
        log::info!("Log panel {}", if self.settings.show_logs { "shown" } else { "hidden" });

        if let Some(config) = &self.config {
            if let Err(e) = config.save_settings(&self.settings) {
                log::error!("Failed to save settings: {:#}", e);
            }
        }
    }

    pub fn handle_selector_action(&mut self, action: SelectorAction) {
        if let SelectorAction::Select(package_id) = &action {
            if let Err(e) = self
                .screen_appselector
                .select(package_id, self.prefs.as_ref())
            {
                log::error!("Failed to set auto-start app: {:#}", e);
            }
        }
        // the selector closes after a pick as well as on back
        self.go_back();
    }

    pub fn handle_about_action(&mut self, action: AboutAction) {
        match action {
            AboutAction::Back => {
                self.go_back();
            }
        }
    }

    fn back_requested(ctx: &egui::Context) -> bool {
        ctx.input(|i| i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::BrowserBack))
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) {
        match self.current_view() {
            AppView::Home => {
                let columns =
                    effective_columns(self.settings.grid_columns, crate::is_narrow(ui.ctx()));
                if let Some(action) = self.screen_home.ui(ui, columns) {
                    self.handle_home_action(action);
                }
            }
            AppView::Settings => {
                if let Some(action) = self.screen_settings.ui(ui) {
                    self.handle_settings_action(action);
                }
            }
            AppView::AppSelector => {
                if let Some(action) = self.screen_appselector.ui(ui) {
                    self.handle_selector_action(action);
                }
            }
            AppView::About => {
                if let Some(action) = self.screen_about.ui(ui) {
                    self.handle_about_action(action);
                }
            }
        }
    }

    fn render_logs(&mut self, ui: &mut egui::Ui) {
        let log_text = get_log_text();

        ui.label(tr!("logs"));
        egui::ScrollArea::vertical()
            .id_salt("logs_scroll")
            .max_height(150.0)
            .min_scrolled_height(150.0)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut log_text.as_str())
                        .desired_width(f32::INFINITY)
                        .font(egui::TextStyle::Monospace)
                        .interactive(false)
                        .desired_rows(10),
                );
            });
    }
}

impl View for TvLauncherApp {
    fn ui(&mut self, ui: &mut egui::Ui) {
        self.ui(ui);
    }
}

impl eframe::App for TvLauncherApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if Self::back_requested(ctx) {
            self.go_back();
        }

        if self.settings.show_logs {
            egui::TopBottomPanel::bottom("logs_panel")
                .resizable(true)
                .show(ctx, |ui| self.render_logs(ui));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui);
        });
    }
}
