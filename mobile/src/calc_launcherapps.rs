pub use crate::calc_launcherapps_stt::*;
use crate::calc_icon::{drawable_to_bitmap, BitmapDrawable, Drawable};
use crate::models::{AppDescriptor, AppInfo, IconBitmap, LaunchIntent};
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Query the registry and build the name-sorted list of launchable apps.
///
/// Package ids are unique in the result: when a package exposes several launcher
/// activities only the first one in registry order is kept. Ties on the display
/// name keep registry order. A failed icon only clears that entry's icon.
pub fn load_installed_apps(
    registry: &dyn ApplicationRegistry,
    mode: EnumerateMode,
) -> Result<Vec<AppInfo>> {
    let descriptors = registry
        .list_launchable()
        .context("Failed to query launcher activities")?;

    let mut seen = HashSet::new();
    let mut apps = Vec::with_capacity(descriptors.len());

    for descriptor in descriptors {
        if !seen.insert(descriptor.package_id.clone()) {
            log::debug!(
                "Skipping extra launcher activity of {}",
                descriptor.package_id
            );
            continue;
        }

        let app = match mode {
            EnumerateMode::Full => full_app_info(registry, descriptor),
            EnumerateMode::Minimal => AppInfo {
                name: descriptor.label,
                package_id: descriptor.package_id,
                launch_intent: None,
                icon: None,
            },
        };
        apps.push(app);
    }

    // stable
    apps.sort_by(|a, b| a.name.cmp(&b.name));

    log::debug!("Enumerated {} launchable apps ({:?})", apps.len(), mode);
    Ok(apps)
}

fn full_app_info(registry: &dyn ApplicationRegistry, descriptor: AppDescriptor) -> AppInfo {
    let AppDescriptor {
        label,
        package_id,
        icon,
        launch_intent,
    } = descriptor;

    let launch_intent = match launch_intent {
        Some(intent) => Some(intent),
        None => match registry.launch_intent_for(&package_id) {
            Ok(intent) => intent,
            Err(e) => {
                log::warn!("Failed to resolve launch intent for {}: {:#}", package_id, e);
                None
            }
        },
    };

    let icon = icon.and_then(|drawable| materialize_icon(&package_id, drawable.as_ref()));

    AppInfo {
        name: label,
        package_id,
        launch_intent,
        icon,
    }
}

fn materialize_icon(package_id: &str, drawable: &dyn Drawable) -> Option<IconBitmap> {
    match drawable_to_bitmap(drawable) {
        Ok(bitmap) => Some(bitmap),
        Err(e) => {
            log::warn!("Failed to load icon for {}: {:#}", package_id, e);
            None
        }
    }
}

pub fn find_app<'a>(apps: &'a [AppInfo], package_id: &str) -> Option<&'a AppInfo> {
    apps.iter().find(|app| app.package_id == package_id)
}

impl StaticRegistry {
    pub fn new(apps: Vec<StaticApp>) -> Self {
        Self {
            apps,
            base_dir: None,
        }
    }

    /// Convenience for (label, package) pairs without icons.
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|(label, package_id)| StaticApp {
                    label: label.to_string(),
                    package_id: package_id.to_string(),
                    class_name: None,
                    icon_path: None,
                })
                .collect(),
        )
    }

    /// Read an `apps.json` array; icon paths resolve against the file's directory.
    pub fn load(path: &Path) -> Result<Self> {
        let contents =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let apps: Vec<StaticApp> =
            serde_json::from_str(&contents).context("Failed to parse apps JSON")?;
        Ok(Self {
            apps,
            base_dir: path.parent().map(Path::to_path_buf),
        })
    }

    fn resolve_icon_path(&self, icon_path: &Path) -> PathBuf {
        match &self.base_dir {
            Some(base) if icon_path.is_relative() => base.join(icon_path),
            _ => icon_path.to_path_buf(),
        }
    }

    fn intent_for(app: &StaticApp) -> LaunchIntent {
        match &app.class_name {
            Some(class_name) => LaunchIntent::Component {
                package_id: app.package_id.clone(),
                class_name: class_name.clone(),
            },
            None => LaunchIntent::Package {
                package_id: app.package_id.clone(),
            },
        }
    }
}

impl ApplicationRegistry for StaticRegistry {
    fn list_launchable(&self) -> Result<Vec<AppDescriptor>> {
        Ok(self
            .apps
            .iter()
            .map(|app| AppDescriptor {
                label: app.label.clone(),
                package_id: app.package_id.clone(),
                icon: app.icon_path.as_ref().map(|p| {
                    Box::new(IconFile {
                        path: self.resolve_icon_path(p),
                    }) as Box<dyn Drawable>
                }),
                launch_intent: Some(Self::intent_for(app)),
            })
            .collect())
    }

    fn launch_intent_for(&self, package_id: &str) -> Result<Option<LaunchIntent>> {
        Ok(self
            .apps
            .iter()
            .find(|app| app.package_id == package_id)
            .map(Self::intent_for))
    }
}

/// Encoded image on disk, decoded on first use.
struct IconFile {
    path: PathBuf,
}

impl IconFile {
    fn decode(&self) -> Result<BitmapDrawable> {
        let bytes = fs::read(&self.path).with_context(|| format!("Failed to read {:?}", self.path))?;
        BitmapDrawable::from_encoded(&bytes)
    }
}

impl Drawable for IconFile {
    fn bitmap(&self) -> Result<Option<IconBitmap>> {
        Ok(Some(self.decode()?.bitmap))
    }

    fn intrinsic_size(&self) -> (i32, i32) {
        match image::image_dimensions(&self.path) {
            Ok((w, h)) => (w as i32, h as i32),
            Err(_) => (0, 0),
        }
    }

    fn draw(&self, canvas: &mut IconBitmap) -> Result<()> {
        self.decode()?.draw(canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::Cell;

    struct BrokenIcon;

    impl Drawable for BrokenIcon {
        fn bitmap(&self) -> Result<Option<IconBitmap>> {
            Ok(None)
        }

        fn intrinsic_size(&self) -> (i32, i32) {
            (0, 0)
        }

        fn draw(&self, _canvas: &mut IconBitmap) -> Result<()> {
            bail!("unreachable for zero-size icons")
        }
    }

    struct GoodIcon;

    impl Drawable for GoodIcon {
        fn bitmap(&self) -> Result<Option<IconBitmap>> {
            Ok(Some(IconBitmap::new(4, 4)))
        }

        fn intrinsic_size(&self) -> (i32, i32) {
            (4, 4)
        }

        fn draw(&self, _canvas: &mut IconBitmap) -> Result<()> {
            Ok(())
        }
    }

    /// Registry returning hand-built descriptors and counting icon-free lookups.
    struct FakeRegistry {
        lookups: Cell<usize>,
        build: fn() -> Vec<AppDescriptor>,
    }

    impl ApplicationRegistry for FakeRegistry {
        fn list_launchable(&self) -> Result<Vec<AppDescriptor>> {
            Ok((self.build)())
        }

        fn launch_intent_for(&self, package_id: &str) -> Result<Option<LaunchIntent>> {
            self.lookups.set(self.lookups.get() + 1);
            Ok(Some(LaunchIntent::Package {
                package_id: package_id.to_string(),
            }))
        }
    }

    fn descriptor(label: &str, package_id: &str, icon: Option<Box<dyn Drawable>>) -> AppDescriptor {
        AppDescriptor {
            label: label.to_string(),
            package_id: package_id.to_string(),
            icon,
            launch_intent: None,
        }
    }

    #[test]
    fn test_sorted_by_name() {
        let registry = StaticRegistry::from_pairs(&[("Camera", "com.a"), ("Browser", "com.b")]);
        let apps = load_installed_apps(&registry, EnumerateMode::Minimal).unwrap();
        let names: Vec<_> = apps.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Browser", "Camera"]);
        assert_eq!(apps[0].package_id, "com.b");
    }

    #[test]
    fn test_equal_names_keep_registry_order() {
        let registry = StaticRegistry::from_pairs(&[
            ("Player", "com.z.player"),
            ("Clock", "com.clock"),
            ("Player", "com.a.player"),
        ]);
        let apps = load_installed_apps(&registry, EnumerateMode::Minimal).unwrap();
        let packages: Vec<_> = apps.iter().map(|a| a.package_id.as_str()).collect();
        assert_eq!(packages, vec!["com.clock", "com.z.player", "com.a.player"]);
    }

    #[test]
    fn test_duplicate_package_keeps_first_activity() {
        let registry = StaticRegistry::from_pairs(&[
            ("Settings", "com.android.tv.settings"),
            ("Network", "com.android.tv.settings"),
        ]);
        let apps = load_installed_apps(&registry, EnumerateMode::Minimal).unwrap();
        assert_eq!(apps.len(), 1);
        assert_eq!(apps[0].name, "Settings");
    }

    #[test]
    fn test_empty_registry_is_valid() {
        let registry = StaticRegistry::default();
        assert!(load_installed_apps(&registry, EnumerateMode::Full)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_minimal_mode_skips_icon_and_intent() {
        let registry = FakeRegistry {
            lookups: Cell::new(0),
            build: || vec![descriptor("Video", "com.video", Some(Box::new(GoodIcon)))],
        };
        let apps = load_installed_apps(&registry, EnumerateMode::Minimal).unwrap();
        assert!(apps[0].icon.is_none());
        assert!(apps[0].launch_intent.is_none());
        assert_eq!(registry.lookups.get(), 0);
    }

    #[test]
    fn test_full_mode_icon_failure_is_per_entry() {
        let registry = FakeRegistry {
            lookups: Cell::new(0),
            build: || {
                vec![
                    descriptor("Broken", "com.broken", Some(Box::new(BrokenIcon))),
                    descriptor("Fine", "com.fine", Some(Box::new(GoodIcon))),
                    descriptor("Plain", "com.plain", None),
                ]
            },
        };
        let apps = load_installed_apps(&registry, EnumerateMode::Full).unwrap();
        assert_eq!(apps.len(), 3);
        assert!(find_app(&apps, "com.broken").unwrap().icon.is_none());
        assert_eq!(
            find_app(&apps, "com.fine").unwrap().icon.as_ref().unwrap().dimensions(),
            (4, 4)
        );
        assert!(find_app(&apps, "com.plain").unwrap().icon.is_none());
        // every entry lacked a descriptor-provided intent
        assert_eq!(registry.lookups.get(), 3);
        assert!(apps.iter().all(|a| a.launch_intent.is_some()));
    }

    #[test]
    fn test_static_registry_missing_icon_file() {
        let registry = StaticRegistry::new(vec![StaticApp {
            label: "Music".to_string(),
            package_id: "com.music".to_string(),
            class_name: Some("com.music.Main".to_string()),
            icon_path: Some(PathBuf::from("/nonexistent/music.png")),
        }]);
        let apps = load_installed_apps(&registry, EnumerateMode::Full).unwrap();
        assert!(apps[0].icon.is_none());
        assert_eq!(
            apps[0].launch_intent,
            Some(LaunchIntent::Component {
                package_id: "com.music".to_string(),
                class_name: "com.music.Main".to_string(),
            })
        );
    }

    #[test]
    fn test_static_registry_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("apps.json");
        fs::write(
            &path,
            r#"[{ "label": "News", "package_id": "com.news", "icon_path": "news.png" }]"#,
        )
        .unwrap();

        let registry = StaticRegistry::load(&path).unwrap();
        assert_eq!(registry.apps.len(), 1);
        assert_eq!(
            registry.resolve_icon_path(Path::new("news.png")),
            dir.path().join("news.png")
        );
        assert_eq!(
            registry.launch_intent_for("com.news").unwrap(),
            Some(LaunchIntent::Package {
                package_id: "com.news".to_string()
            })
        );
        assert!(registry.launch_intent_for("com.other").unwrap().is_none());
    }
}
