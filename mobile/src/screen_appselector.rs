pub use crate::screen_appselector_stt::*;
use crate::calc_launcherapps::{load_installed_apps, ApplicationRegistry, EnumerateMode};
use crate::shared_prefs::{get_auto_start_app, set_auto_start_app, PreferenceStore};
use anyhow::Result;
use eframe::egui;
use egui_i18n::tr;
use egui_material3::MaterialButton;

impl ScreenAppSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(&mut self, registry: &dyn ApplicationRegistry, prefs: &dyn PreferenceStore) {
        self.apps = match load_installed_apps(registry, EnumerateMode::Minimal) {
            Ok(apps) => apps,
            Err(e) => {
                log::error!("Failed to load installed apps: {:#}", e);
                Vec::new()
            }
        };
        self.selected_app = get_auto_start_app(prefs);
        self.focus_pending = true;
    }

    /// Persist `package_id` as the auto-start app.
    pub fn select(&mut self, package_id: &str, prefs: &dyn PreferenceStore) -> Result<()> {
        set_auto_start_app(prefs, package_id)?;
        self.selected_app = Some(package_id.to_string());
        log::info!("Auto-start app set to {}", package_id);
        Ok(())
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<SelectorAction> {
        let mut action = None;

        ui.horizontal(|ui| {
            if ui.add(MaterialButton::outlined(tr!("back"))).clicked() {
                action = Some(SelectorAction::Back);
            }
            ui.add_space(16.0);
            ui.label(egui::RichText::new(tr!("choose-auto-start")).size(24.0).strong());
        });
        ui.add_space(16.0);

        if self.apps.is_empty() {
            ui.label(egui::RichText::new(tr!("no-apps")).size(20.0));
            return action;
        }

        let row_size = [ui.available_width().min(720.0), 56.0];

        egui::ScrollArea::vertical()
            .id_salt("appselector_scroll")
            .show(ui, |ui| {
                for (index, app) in self.apps.iter().enumerate() {
                    let is_selected = self.selected_app.as_deref() == Some(&app.package_id);
                    let label = if is_selected {
                        format!("✔ {}", app.name)
                    } else {
                        app.name.clone()
                    };

                    let response = ui.add_sized(
                        row_size,
                        egui::Button::new(egui::RichText::new(label).size(20.0))
                            .selected(is_selected),
                    );

                    // focus the current selection, or the first row
                    let wants_focus = match &self.selected_app {
                        Some(_) => is_selected,
                        None => index == 0,
                    };
                    if self.focus_pending && wants_focus {
                        response.request_focus();
                        response.scroll_to_me(Some(egui::Align::Center));
                        self.focus_pending = false;
                    }

                    if response.clicked() {
                        action = Some(SelectorAction::Select(app.package_id.clone()));
                    }
                    ui.add_space(8.0);
                }
            });

        action
    }
}
