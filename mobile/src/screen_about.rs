pub use crate::screen_about_stt::*;
use eframe::egui;
use egui_i18n::tr;
use egui_material3::MaterialButton;

impl ScreenAbout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_enter(&mut self) {
        self.focus_pending = true;
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> Option<AboutAction> {
        let mut action = None;

        let version = env!("CARGO_PKG_VERSION");
        let description = tr!("about-description");

        ui.horizontal(|ui| {
            let back = ui.add(MaterialButton::outlined(tr!("back")));
            if self.focus_pending {
                back.request_focus();
                self.focus_pending = false;
            }
            if back.clicked() {
                action = Some(AboutAction::Back);
            }
            ui.add_space(16.0);
            ui.label(egui::RichText::new(tr!("about")).size(24.0).strong());
        });
        ui.add_space(16.0);

        egui::ScrollArea::vertical()
            .id_salt("about_scroll")
            .show(ui, |ui| {
                ui.heading(tr!("app-title"));
                ui.add_space(8.0);
                ui.label(egui::RichText::new(tr!("about-version", { version: version })).size(20.0));
                ui.label(egui::RichText::new(tr!("about-author", { author: AUTHOR })).size(20.0));

                ui.add_space(12.0);
                ui.add(egui::Label::new(egui::RichText::new(&description).size(20.0)).wrap());

                ui.add_space(12.0);
                ui.label(egui::RichText::new(tr!("about-features")).size(20.0).strong());
                ui.add_space(4.0);
                let features = [
                    tr!("about-feature-large-ui"),
                    tr!("about-feature-remote"),
                    tr!("about-feature-autostart"),
                ];
                for feature in features {
                    ui.label(egui::RichText::new(format!("• {}", feature)).size(18.0));
                }

                ui.add_space(12.0);
                ui.horizontal_wrapped(|ui| {
                    ui.label(format!("{}: ", tr!("about-website")));
                    ui.hyperlink(PROJECT_URL);
                });

                ui.add_space(12.0);
                ui.label(tr!("about-copyright", { author: AUTHOR }));
            });

        action
    }
}
