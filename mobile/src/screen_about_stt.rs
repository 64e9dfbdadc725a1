pub const PROJECT_URL: &str = "https://github.com/RamSong/tvlauncher/";
pub const AUTHOR: &str = "RamSong";

pub enum AboutAction {
    Back,
}

#[derive(Default)]
pub struct ScreenAbout {
    pub focus_pending: bool,
}
