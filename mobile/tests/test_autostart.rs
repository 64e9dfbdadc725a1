use anyhow::Result;
use std::cell::RefCell;
use tv_launcher::boot_receiver::{BootOutcome, BootReceiver, ACTION_BOOT_COMPLETED};
use tv_launcher::calc_launcherapps::StaticRegistry;
use tv_launcher::models::LaunchIntent;
use tv_launcher::shared_prefs::{get_auto_start_app, set_auto_start_app, FilePreferenceStore};
use tv_launcher::{ActivityStarter, Config};

#[derive(Default)]
struct RecordingStarter {
    started: RefCell<Vec<(LaunchIntent, bool)>>,
}

impl ActivityStarter for RecordingStarter {
    fn start(&self, intent: &LaunchIntent, new_task: bool) -> Result<()> {
        self.started.borrow_mut().push((intent.clone(), new_task));
        Ok(())
    }
}

#[test]
fn test_selection_survives_reopen_and_launches_at_boot() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_dir(dir.path().to_path_buf()).unwrap();

    set_auto_start_app(&FilePreferenceStore::launcher(&config), "org.xbmc.kodi").unwrap();
    assert!(dir.path().join("shared_prefs").join("launcher_prefs.json").exists());

    // fresh handle, as the boot path would open it
    let prefs = FilePreferenceStore::launcher(&config);
    assert_eq!(get_auto_start_app(&prefs).as_deref(), Some("org.xbmc.kodi"));

    let registry = StaticRegistry::from_pairs(&[("Kodi", "org.xbmc.kodi")]);
    let starter = RecordingStarter::default();
    let mut receiver = BootReceiver::new();

    let outcome = receiver.on_receive(ACTION_BOOT_COMPLETED, &prefs, &registry, &starter);
    assert_eq!(outcome, BootOutcome::Launched("org.xbmc.kodi".to_string()));
    assert_eq!(
        *starter.started.borrow(),
        vec![(
            LaunchIntent::Package {
                package_id: "org.xbmc.kodi".to_string()
            },
            true
        )]
    );
}

#[test]
fn test_unknown_package_is_skipped_at_boot() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_dir(dir.path().to_path_buf()).unwrap();
    let prefs = FilePreferenceStore::launcher(&config);
    set_auto_start_app(&prefs, "com.unknown.pkg").unwrap();

    let registry = StaticRegistry::from_pairs(&[("Kodi", "org.xbmc.kodi")]);
    let starter = RecordingStarter::default();
    let mut receiver = BootReceiver::new();

    let outcome = receiver.on_receive(ACTION_BOOT_COMPLETED, &prefs, &registry, &starter);
    assert_eq!(outcome, BootOutcome::NotResolvable("com.unknown.pkg".to_string()));
    assert!(starter.started.borrow().is_empty());
}

#[test]
fn test_no_selection_means_no_launch() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::with_dir(dir.path().to_path_buf()).unwrap();
    let prefs = FilePreferenceStore::launcher(&config);

    let registry = StaticRegistry::from_pairs(&[("Kodi", "org.xbmc.kodi")]);
    let starter = RecordingStarter::default();
    let mut receiver = BootReceiver::new();

    let outcome = receiver.on_receive(ACTION_BOOT_COMPLETED, &prefs, &registry, &starter);
    assert_eq!(outcome, BootOutcome::NoSelection);
    assert!(starter.started.borrow().is_empty());
}
