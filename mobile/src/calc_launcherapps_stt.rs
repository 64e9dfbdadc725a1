use crate::models::{AppDescriptor, LaunchIntent};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// OS application registry: every activity advertising main/launcher.
pub trait ApplicationRegistry {
    /// All launcher activities, in registry order.
    fn list_launchable(&self) -> Result<Vec<AppDescriptor>>;

    /// Launch descriptor for an installed package, `None` when it has none.
    fn launch_intent_for(&self, package_id: &str) -> Result<Option<LaunchIntent>>;
}

/// Which parts of each entry the enumerator resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumerateMode {
    /// Name, package, launch descriptor and icon.
    Full,
    /// Name and package only; skips icon decoding.
    Minimal,
}

/// Entry of an in-memory registry, also the `apps.json` schema for the desktop preview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaticApp {
    pub label: String,
    pub package_id: String,
    #[serde(default)]
    pub class_name: Option<String>,
    /// PNG file with the icon, relative to the registry's base dir.
    #[serde(default)]
    pub icon_path: Option<PathBuf>,
}

/// Fixed list of applications standing in for the OS registry.
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    pub apps: Vec<StaticApp>,
    pub base_dir: Option<PathBuf>,
}
