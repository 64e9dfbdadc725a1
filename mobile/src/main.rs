use eframe::egui;
use tv_launcher::calc_launcherapps::StaticRegistry;
use tv_launcher::shared_prefs::FilePreferenceStore;
use tv_launcher::tv_launcher_app::{self, TvLauncherApp};
use tv_launcher::{Config, UnavailableActivityStarter};

/// Desktop preview: apps come from `apps.json` in the config dir when present.
fn load_registry(config: &Config) -> StaticRegistry {
    let apps_path = config.config_dir.join("apps.json");
    if !apps_path.exists() {
        log::info!("No {:?}, starting with an empty app list", apps_path);
        return StaticRegistry::default();
    }
    StaticRegistry::load(&apps_path).unwrap_or_else(|e| {
        log::error!("Failed to load {:?}: {:#}", apps_path, e);
        StaticRegistry::default()
    })
}

fn main() -> eframe::Result<()> {
    let config = Config::new().ok();
    let settings = config
        .as_ref()
        .and_then(|config| config.load_settings().ok())
        .unwrap_or_default();

    if let Err(e) = tv_launcher::log_capture::init_tracing(&settings.log_level.to_lowercase()) {
        eprintln!("{:#}", e);
    }
    tv_launcher::log_capture::install_panic_hook();

    tv_launcher_app::init_common(&settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([480.0, 320.0]),
        ..Default::default()
    };

    eframe::run_native(
        "TV Launcher",
        options,
        Box::new(move |cc| {
            tv_launcher_app::init_egui(&cc.egui_ctx);

            let app = match config {
                Some(config) => {
                    let registry = load_registry(&config);
                    let prefs = FilePreferenceStore::launcher(&config);
                    TvLauncherApp::new(
                        Some(config),
                        Box::new(registry),
                        Box::new(UnavailableActivityStarter),
                        Box::new(prefs),
                    )
                }
                None => {
                    log::error!("Config dir unavailable, using a temporary preference file");
                    let scratch = std::env::temp_dir().join("tv_launcher_prefs.json");
                    TvLauncherApp::new(
                        None,
                        Box::new(StaticRegistry::default()),
                        Box::new(UnavailableActivityStarter),
                        Box::new(FilePreferenceStore::with_path(scratch)),
                    )
                }
            };
            Ok(Box::new(app))
        }),
    )
}
