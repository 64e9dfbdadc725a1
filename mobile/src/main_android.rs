use android_activity::AndroidApp;
use eframe::NativeOptions;
use std::sync::Arc;

use crate::android_activity::{ActivityStarter, AndroidActivityStarter, UnavailableActivityStarter};
use crate::android_jni::JniContext;
use crate::android_packagemanager::PackageManagerRegistry;
use crate::calc_launcherapps::{ApplicationRegistry, StaticRegistry};
use crate::log_capture;
use crate::shared_prefs::FilePreferenceStore;
use crate::tv_launcher_app::{self, TvLauncherApp};
use crate::{Config, Settings};

fn platform_seams() -> (Box<dyn ApplicationRegistry>, Box<dyn ActivityStarter>) {
    match JniContext::from_ndk_context() {
        Ok(ctx) => {
            let ctx = Arc::new(ctx);
            (
                Box::new(PackageManagerRegistry::new(ctx.clone())),
                Box::new(AndroidActivityStarter::new(ctx)),
            )
        }
        Err(e) => {
            log::error!("JNI context unavailable: {:#}", e);
            (
                Box::new(StaticRegistry::default()),
                Box::new(UnavailableActivityStarter),
            )
        }
    }
}

// Android entry point
#[no_mangle]
pub fn android_main(app: AndroidApp) {
    let config = Config::new();
    let settings = match &config {
        Ok(config) => config.load_settings().unwrap_or_default(),
        Err(_) => Settings::default(),
    };

    // also routes `log` records to logcat and the log panel
    if let Err(e) = log_capture::init_tracing(&settings.log_level.to_lowercase()) {
        eprintln!("{:#}", e);
    }
    log_capture::install_panic_hook();
    tv_launcher_app::init_common(&settings);

    log::info!("Starting TV Launcher");

    let options = NativeOptions {
        android_app: Some(app),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    let result = eframe::run_native(
        "TV Launcher",
        options,
        Box::new(move |cc| {
            tv_launcher_app::init_egui(&cc.egui_ctx);

            let (registry, starter) = platform_seams();
            let config = config?;
            let prefs = FilePreferenceStore::launcher(&config);
            Ok(Box::new(TvLauncherApp::new(
                Some(config),
                registry,
                starter,
                Box::new(prefs),
            )))
        }),
    );

    match result {
        Ok(_) => log::info!("TvLauncherApp exited"),
        Err(e) => log::error!("TvLauncherApp failed: {}", e),
    }
}
