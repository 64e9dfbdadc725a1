/// Broadcast action delivered once the device has finished booting.
pub const ACTION_BOOT_COMPLETED: &str = "android.intent.action.BOOT_COMPLETED";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BootState {
    #[default]
    Idle,
    Triggered,
}

/// What one broadcast delivery did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BootOutcome {
    /// Not a boot broadcast, or boot was already handled.
    Ignored,
    /// No auto-start app configured.
    NoSelection,
    /// Configured package has no launch descriptor (uninstalled or not launchable).
    NotResolvable(String),
    Launched(String),
    /// An error was caught and logged.
    Failed(String),
}

#[derive(Debug, Default)]
pub struct BootReceiver {
    pub state: BootState,
}
