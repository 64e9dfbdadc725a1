use tv_launcher::boot_receiver::{BootOutcome, BootReceiver, ACTION_BOOT_COMPLETED};
use tv_launcher::calc_launcherapps::StaticRegistry;
use tv_launcher::log_capture::init_tracing;
use tv_launcher::shared_prefs::{set_auto_start_app, FilePreferenceStore};
use tv_launcher::tv_launcher_app::{get_log_text, update_log_settings, LogSettings};
use tv_launcher::{LogLevel, UnavailableActivityStarter};

#[test]
fn test_log_and_tracing_records_reach_log_panel() {
    init_tracing("trace").unwrap();
    update_log_settings(LogSettings {
        show_logs: true,
        log_level: LogLevel::Trace,
    });

    log::error!("failed launch via log facade");
    tracing::error!("failed launch via tracing");

    let text = get_log_text();
    assert!(text.contains("failed launch via log facade"), "{}", text);
    assert!(text.contains("failed launch via tracing"), "{}", text);

    // boot handler output lands in the same panel
    let dir = tempfile::tempdir().unwrap();
    let prefs = FilePreferenceStore::with_path(dir.path().join("launcher_prefs.json"));
    set_auto_start_app(&prefs, "com.removed.app").unwrap();
    let registry = StaticRegistry::from_pairs(&[("Kodi", "org.kodi")]);
    let outcome = BootReceiver::new().on_receive(
        ACTION_BOOT_COMPLETED,
        &prefs,
        &registry,
        &UnavailableActivityStarter,
    );
    assert_eq!(outcome, BootOutcome::NotResolvable("com.removed.app".to_string()));
    let text = get_log_text();
    assert!(text.contains("Device boot completed"), "{}", text);
    assert!(
        text.contains("No launch intent found for package: com.removed.app"),
        "{}",
        text
    );

    // the bridge owns `log`, so a later logger cannot steal its records
    struct Other;
    impl log::Log for Other {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }
        fn log(&self, _: &log::Record) {}
        fn flush(&self) {}
    }
    static OTHER: Other = Other;
    assert!(log::set_logger(&OTHER).is_err());
}
