use crate::models::{AppInfo, LaunchIntent};
use eframe::egui;
use std::collections::HashMap;

pub const TILE_SIZE: f32 = 160.0;
pub const TILE_ICON_SIZE: f32 = 80.0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HomeAction {
    Launch(LaunchIntent),
    MarkAutoStart(String),
    OpenSettings,
}

pub struct ScreenHome {
    pub apps: Vec<AppInfo>,
    /// Package starred as auto-start during this session; not restored on recreation.
    pub selected_app: Option<String>,
    /// Tile that last held keyboard focus; target of the auto-start button.
    pub focused_app: Option<String>,
    pub textures: HashMap<String, egui::TextureHandle>,
    pub focus_pending: bool,
}

impl Default for ScreenHome {
    fn default() -> Self {
        Self {
            apps: Vec::new(),
            selected_app: None,
            focused_app: None,
            textures: HashMap::new(),
            focus_pending: true,
        }
    }
}
