pub use crate::screen_home_stt::*;
use crate::calc_launcherapps::{find_app, load_installed_apps, ApplicationRegistry, EnumerateMode};
use crate::models::AppInfo;
use crate::shared_prefs::{set_auto_start_app, PreferenceStore};
use anyhow::Result;
use eframe::egui;
use egui_i18n::tr;
use egui_material3::MaterialButton;
use std::collections::HashMap;

impl ScreenHome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-query installed apps; icon textures are rebuilt lazily.
    pub fn on_enter(&mut self, registry: &dyn ApplicationRegistry) {
        self.apps = match load_installed_apps(registry, EnumerateMode::Full) {
            Ok(apps) => apps,
            Err(e) => {
                log::error!("Failed to load installed apps: {:#}", e);
                Vec::new()
            }
        };
        self.textures.clear();
        self.focused_app = None;
        self.focus_pending = true;
    }

    pub fn mark_auto_start(&mut self, package_id: &str, prefs: &dyn PreferenceStore) -> Result<()> {
        set_auto_start_app(prefs, package_id)?;
        self.selected_app = Some(package_id.to_string());
        log::info!("Auto-start app set to {}", package_id);
        Ok(())
    }

    fn texture_for(
        textures: &mut HashMap<String, egui::TextureHandle>,
        ctx: &egui::Context,
        app: &AppInfo,
    ) -> Option<egui::TextureHandle> {
        if let Some(texture) = textures.get(&app.package_id) {
            return Some(texture.clone());
        }
        let icon = app.icon.as_ref()?;

        let size = [icon.width() as usize, icon.height() as usize];
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, icon.as_raw());
        let texture = ctx.load_texture(
            format!("icon_{}", app.package_id),
            color_image,
            Default::default(),
        );
        textures.insert(app.package_id.clone(), texture.clone());
        Some(texture)
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, columns: usize) -> Option<HomeAction> {
        let mut action = None;
        let columns = columns.max(1);
        let ctx = ui.ctx().clone();

        egui::ScrollArea::vertical()
            .id_salt("home_scroll")
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(16.0);
                    ui.label(egui::RichText::new(tr!("app-title")).size(32.0).strong());
                    ui.add_space(16.0);
                });

                if self.apps.is_empty() {
                    ui.vertical_centered(|ui| {
                        ui.label(egui::RichText::new(tr!("no-apps")).size(20.0));
                    });
                }

                egui::Grid::new("home_grid")
                    .num_columns(columns)
                    .spacing([16.0, 16.0])
                    .show(ui, |ui| {
                        for (index, app) in self.apps.iter().enumerate() {
                            let is_selected = self.selected_app.as_deref() == Some(&app.package_id);
                            let label = if is_selected {
                                format!("★ {}", app.name)
                            } else {
                                app.name.clone()
                            };
                            let text = egui::RichText::new(label).size(16.0);

                            let button = match Self::texture_for(&mut self.textures, &ctx, app) {
                                Some(texture) => egui::Button::image_and_text(
                                    egui::Image::new(&texture)
                                        .fit_to_exact_size(egui::vec2(TILE_ICON_SIZE, TILE_ICON_SIZE)),
                                    text,
                                ),
                                None => egui::Button::new(text),
                            };
                            let response = ui.add(
                                button
                                    .min_size(egui::vec2(TILE_SIZE, TILE_SIZE))
                                    .selected(is_selected),
                            );

                            if index == 0 && self.focus_pending {
                                response.request_focus();
                                self.focus_pending = false;
                            }
                            if response.has_focus() {
                                self.focused_app = Some(app.package_id.clone());
                            }

                            if response.clicked() {
                                match &app.launch_intent {
                                    Some(intent) => action = Some(HomeAction::Launch(intent.clone())),
                                    None => log::warn!("{} has no launch intent", app.package_id),
                                }
                            }

                            response.context_menu(|ui| {
                                if ui.button(tr!("set-auto-start")).clicked() {
                                    action = Some(HomeAction::MarkAutoStart(app.package_id.clone()));
                                }
                            });

                            if (index + 1) % columns == 0 {
                                ui.end_row();
                            }
                        }
                    });

                ui.add_space(16.0);
                // D-pad route: remotes cannot open the tile context menu
                let focused = self
                    .focused_app
                    .as_deref()
                    .and_then(|package_id| find_app(&self.apps, package_id));
                let auto_start_label = match focused {
                    Some(app) => format!("{}: {}", tr!("set-auto-start"), app.name),
                    None => tr!("set-auto-start"),
                };
                let auto_start = ui.add_enabled(
                    focused.is_some(),
                    egui::Button::new(egui::RichText::new(auto_start_label).size(20.0))
                        .min_size(egui::vec2(ui.available_width(), 56.0)),
                );
                if auto_start.clicked() {
                    if let Some(app) = focused {
                        action = Some(HomeAction::MarkAutoStart(app.package_id.clone()));
                    }
                }
                ui.add_space(8.0);

                if ui
                    .add_sized(
                        [ui.available_width(), 56.0],
                        MaterialButton::filled(tr!("settings")),
                    )
                    .clicked()
                {
                    action = Some(HomeAction::OpenSettings);
                }
                ui.add_space(16.0);
            });

        action
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_launcherapps::StaticRegistry;
    use crate::shared_prefs::{get_auto_start_app, FilePreferenceStore};

    #[test]
    fn test_on_enter_loads_sorted_apps_with_intents() {
        let registry = StaticRegistry::from_pairs(&[("YouTube", "com.yt"), ("Kodi", "org.kodi")]);
        let mut screen = ScreenHome::new();
        screen.on_enter(&registry);

        let names: Vec<_> = screen.apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Kodi", "YouTube"]);
        assert!(screen.apps.iter().all(|a| a.launch_intent.is_some()));
    }

    #[test]
    fn test_mark_auto_start_persists_and_highlights() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferenceStore::with_path(dir.path().join("launcher_prefs.json"));
        let mut screen = ScreenHome::new();

        screen.mark_auto_start("org.kodi", &prefs).unwrap();
        assert_eq!(screen.selected_app.as_deref(), Some("org.kodi"));
        assert_eq!(get_auto_start_app(&prefs).as_deref(), Some("org.kodi"));
    }

    fn key_press(key: egui::Key) -> Vec<egui::Event> {
        [true, false]
            .into_iter()
            .map(|pressed| egui::Event::Key {
                key,
                physical_key: None,
                pressed,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            })
            .collect()
    }

    fn run_frame(
        ctx: &egui::Context,
        screen: &mut ScreenHome,
        events: Vec<egui::Event>,
    ) -> Vec<HomeAction> {
        let mut actions = Vec::new();
        let input = egui::RawInput {
            events,
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                actions.extend(screen.ui(ui, 6));
            });
        });
        actions
    }

    #[test]
    fn test_remote_can_mark_focused_tile_as_auto_start() {
        crate::init_i18n("en-US");
        let registry = StaticRegistry::from_pairs(&[("Kodi", "org.kodi")]);
        let mut screen = ScreenHome::new();
        screen.on_enter(&registry);

        let ctx = egui::Context::default();
        run_frame(&ctx, &mut screen, Vec::new());
        run_frame(&ctx, &mut screen, Vec::new());
        assert_eq!(screen.focused_app.as_deref(), Some("org.kodi"));

        // Tab moves focus from the tile to the auto-start button, Enter presses it
        let mut actions = run_frame(&ctx, &mut screen, key_press(egui::Key::Tab));
        actions.extend(run_frame(&ctx, &mut screen, key_press(egui::Key::Enter)));

        assert_eq!(
            actions,
            vec![HomeAction::MarkAutoStart("org.kodi".to_string())]
        );
    }

    #[test]
    fn test_focused_tile_resets_on_enter() {
        let registry = StaticRegistry::from_pairs(&[("Kodi", "org.kodi")]);
        let mut screen = ScreenHome::new();
        screen.focused_app = Some("org.kodi".to_string());
        screen.on_enter(&registry);
        assert_eq!(screen.focused_app, None);
    }

    #[test]
    fn test_highlight_is_not_restored_on_recreation() {
        let registry = StaticRegistry::from_pairs(&[("Kodi", "org.kodi")]);
        let dir = tempfile::tempdir().unwrap();
        let prefs = FilePreferenceStore::with_path(dir.path().join("launcher_prefs.json"));

        let mut screen = ScreenHome::new();
        screen.on_enter(&registry);
        screen.mark_auto_start("org.kodi", &prefs).unwrap();

        let mut recreated = ScreenHome::new();
        recreated.on_enter(&registry);
        assert_eq!(recreated.selected_app, None);
    }
}
