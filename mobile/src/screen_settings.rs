pub use crate::screen_settings_stt::*;
use crate::calc_launcherapps::{find_app, load_installed_apps, ApplicationRegistry, EnumerateMode};
use crate::models::AppInfo;
use crate::shared_prefs::{get_auto_start_app, PreferenceStore};
use eframe::egui;
use egui_i18n::tr;
use egui_material3::MaterialButton;

/// Display name of the configured auto-start app.
pub fn describe_auto_start(selection: Option<&str>, apps: &[AppInfo]) -> AutoStartLabel {
    match selection {
        None => AutoStartLabel::Unset,
        Some(package_id) => match find_app(apps, package_id) {
            Some(app) => AutoStartLabel::App(app.name.clone()),
            None => AutoStartLabel::Unknown(package_id.to_string()),
        },
    }
}

impl ScreenSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(&mut self, registry: &dyn ApplicationRegistry, prefs: &dyn PreferenceStore) {
        let selection = get_auto_start_app(prefs);
        let apps = if selection.is_some() {
            load_installed_apps(registry, EnumerateMode::Minimal).unwrap_or_else(|e| {
                log::error!("Failed to load installed apps: {:#}", e);
                Vec::new()
            })
        } else {
            Vec::new()
        };
        self.auto_start = describe_auto_start(selection.as_deref(), &apps);
        self.focus_pending = true;
    }

    pub fn auto_start_text(&self) -> String {
        match &self.auto_start {
            AutoStartLabel::Unset => tr!("auto-start-unset"),
            AutoStartLabel::Unknown(package_id) => {
                tr!("auto-start-unknown", { package: package_id.clone() })
            }
            AutoStartLabel::App(name) => name.clone(),
        }
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<SettingsAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if ui.add(MaterialButton::outlined(tr!("back"))).clicked() {
                action = Some(SettingsAction::Back);
            }
            ui.add_space(16.0);
            ui.label(egui::RichText::new(tr!("settings")).size(24.0).strong());
        });
        ui.add_space(24.0);

        let row_size = [ui.available_width().min(720.0), 64.0];

        ui.label(
            egui::RichText::new(format!(
                "{}: {}",
                tr!("auto-start-app"),
                self.auto_start_text()
            ))
            .size(22.0),
        );
        ui.add_space(16.0);

        let change = ui.add_sized(
            row_size,
            egui::Button::new(egui::RichText::new(tr!("change-auto-start")).size(22.0)),
        );
        if self.focus_pending {
            change.request_focus();
            self.focus_pending = false;
        }
        if change.clicked() {
            action = Some(SettingsAction::ChangeAutoStart);
        }
        ui.add_space(8.0);

        if ui
            .add_sized(
                row_size,
                egui::Button::new(egui::RichText::new(tr!("set-default-home")).size(22.0)),
            )
            .clicked()
        {
            action = Some(SettingsAction::SetDefaultHome);
        }
        ui.add_space(8.0);

        let logs_label = if self.show_logs {
            format!("✔ {}", tr!("show-logs"))
        } else {
            tr!("show-logs")
        };
        if ui
            .add_sized(
                row_size,
                egui::Button::new(egui::RichText::new(logs_label).size(22.0))
                    .selected(self.show_logs),
            )
            .clicked()
        {
            action = Some(SettingsAction::ToggleLogs);
        }
        ui.add_space(8.0);

        if ui
            .add_sized(
                row_size,
                egui::Button::new(egui::RichText::new(tr!("about")).size(22.0)),
            )
            .clicked()
        {
            action = Some(SettingsAction::About);
        }

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_launcherapps::StaticRegistry;
    use crate::shared_prefs::{set_auto_start_app, FilePreferenceStore};

    fn scratch_prefs() -> (tempfile::TempDir, FilePreferenceStore) {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferenceStore::with_path(dir.path().join("launcher_prefs.json"));
        (dir, prefs)
    }

    #[test]
    fn test_unset_when_no_preference() {
        let registry = StaticRegistry::from_pairs(&[("Kodi", "org.kodi")]);
        let (_dir, prefs) = scratch_prefs();
        let mut screen = ScreenSettings::new();
        screen.on_enter(&registry, &prefs);
        assert_eq!(screen.auto_start, AutoStartLabel::Unset);
    }

    #[test]
    fn test_resolves_installed_app_name() {
        let registry = StaticRegistry::from_pairs(&[("Kodi", "org.kodi"), ("Plex", "com.plex")]);
        let (_dir, prefs) = scratch_prefs();
        set_auto_start_app(&prefs, "com.plex").unwrap();

        let mut screen = ScreenSettings::new();
        screen.on_enter(&registry, &prefs);
        assert_eq!(screen.auto_start, AutoStartLabel::App("Plex".to_string()));
    }

    #[test]
    fn test_unknown_when_package_uninstalled() {
        let registry = StaticRegistry::from_pairs(&[("Kodi", "org.kodi")]);
        let (_dir, prefs) = scratch_prefs();
        set_auto_start_app(&prefs, "com.unknown.pkg").unwrap();

        let mut screen = ScreenSettings::new();
        screen.on_enter(&registry, &prefs);
        assert_eq!(
            screen.auto_start,
            AutoStartLabel::Unknown("com.unknown.pkg".to_string())
        );
    }

    #[test]
    fn test_describe_auto_start() {
        assert_eq!(describe_auto_start(None, &[]), AutoStartLabel::Unset);
        assert_eq!(
            describe_auto_start(Some("com.a"), &[]),
            AutoStartLabel::Unknown("com.a".to_string())
        );
    }
}
