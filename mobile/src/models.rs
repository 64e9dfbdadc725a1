use crate::calc_icon::Drawable;
use serde::{Deserialize, Serialize};

/// RGBA8 pixels, the single bitmap format icons are materialized into.
pub type IconBitmap = image::RgbaImage;

/// Opaque handle used to start an application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchIntent {
    /// Explicit launcher activity of an installed package.
    Component {
        package_id: String,
        class_name: String,
    },
    /// Resolved to the package's default launch activity when started.
    Package { package_id: String },
    /// Implicit intent identified only by its action.
    Action(String),
}

impl LaunchIntent {
    pub fn package_id(&self) -> Option<&str> {
        match self {
            LaunchIntent::Component { package_id, .. } | LaunchIntent::Package { package_id } => {
                Some(package_id)
            }
            LaunchIntent::Action(_) => None,
        }
    }
}

/// One launcher activity as reported by the application registry.
pub struct AppDescriptor {
    pub label: String,
    pub package_id: String,
    pub icon: Option<Box<dyn Drawable>>,
    pub launch_intent: Option<LaunchIntent>,
}

impl std::fmt::Debug for AppDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppDescriptor")
            .field("label", &self.label)
            .field("package_id", &self.package_id)
            .field("has_icon", &self.icon.is_some())
            .field("launch_intent", &self.launch_intent)
            .finish()
    }
}

/// A launchable application as shown on screen. Recomputed on every screen entry.
#[derive(Debug, Clone)]
pub struct AppInfo {
    pub name: String,
    pub package_id: String,
    pub launch_intent: Option<LaunchIntent>,
    pub icon: Option<IconBitmap>,
}
