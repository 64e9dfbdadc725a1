use crate::models::AppInfo;

pub enum SelectorAction {
    Select(String),
    Back,
}

#[derive(Default)]
pub struct ScreenAppSelector {
    pub apps: Vec<AppInfo>,
    /// Currently configured auto-start package.
    pub selected_app: Option<String>,
    pub focus_pending: bool,
}
