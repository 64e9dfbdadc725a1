pub use crate::boot_receiver_stt::*;
use crate::android_activity::ActivityStarter;
use crate::calc_launcherapps_stt::ApplicationRegistry;
use crate::shared_prefs::{get_auto_start_app, PreferenceStore};
use anyhow::{Context, Result};

impl BootReceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle one broadcast. Only the first boot-completed delivery does any
    /// work; every error is logged and reported as [`BootOutcome::Failed`].
    pub fn on_receive(
        &mut self,
        action: &str,
        prefs: &dyn PreferenceStore,
        registry: &dyn ApplicationRegistry,
        starter: &dyn ActivityStarter,
    ) -> BootOutcome {
        if action != ACTION_BOOT_COMPLETED {
            log::debug!("Ignoring broadcast {}", action);
            return BootOutcome::Ignored;
        }
        if self.state == BootState::Triggered {
            log::debug!("Boot already handled");
            return BootOutcome::Ignored;
        }
        self.state = BootState::Triggered;
        log::info!("Device boot completed");

        match launch_auto_start_app(prefs, registry, starter) {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Error launching auto-start app: {:#}", e);
                BootOutcome::Failed(format!("{:#}", e))
            }
        }
    }
}

fn launch_auto_start_app(
    prefs: &dyn PreferenceStore,
    registry: &dyn ApplicationRegistry,
    starter: &dyn ActivityStarter,
) -> Result<BootOutcome> {
    let Some(package_id) = get_auto_start_app(prefs) else {
        log::debug!("No auto-start app configured");
        return Ok(BootOutcome::NoSelection);
    };

    let Some(intent) = registry
        .launch_intent_for(&package_id)
        .with_context(|| format!("Failed to resolve {}", package_id))?
    else {
        log::warn!("No launch intent found for package: {}", package_id);
        return Ok(BootOutcome::NotResolvable(package_id));
    };

    starter
        .start(&intent, true)
        .with_context(|| format!("Failed to start {}", package_id))?;
    log::info!("Auto-started app: {}", package_id);
    Ok(BootOutcome::Launched(package_id))
}

#[cfg(target_os = "android")]
mod jni_entry {
    use super::*;
    use crate::android_activity::AndroidActivityStarter;
    use crate::android_jni::{get_rust_string, JniContext};
    use crate::android_packagemanager::PackageManagerRegistry;
    use crate::shared_prefs::FilePreferenceStore;
    use crate::Config;
    use jni::objects::{JClass, JObject, JString};
    use jni::JNIEnv;
    use std::sync::{Arc, Mutex, OnceLock};

    static BOOT_RECEIVER: OnceLock<Mutex<BootReceiver>> = OnceLock::new();

    fn run(env: &mut JNIEnv<'_>, context: &JObject<'_>, action: &JString<'_>) -> Result<BootOutcome> {
        let action = get_rust_string(env, action)?;
        let ctx = Arc::new(JniContext::from_env(env, context)?);
        let prefs = FilePreferenceStore::launcher(&Config::new()?);
        let registry = PackageManagerRegistry::new(ctx.clone());
        let starter = AndroidActivityStarter::new(ctx);

        let receiver = BOOT_RECEIVER.get_or_init(|| Mutex::new(BootReceiver::new()));
        let mut receiver = receiver
            .lock()
            .map_err(|_| anyhow::anyhow!("Boot receiver lock poisoned"))?;
        Ok(receiver.on_receive(&action, &prefs, &registry, &starter))
    }

    /// Called from `com.tvlauncher.BootReceiver.onReceive`. Never throws into the JVM.
    #[no_mangle]
    pub extern "system" fn Java_com_tvlauncher_BootReceiver_onBootCompleted<'local>(
        mut env: JNIEnv<'local>,
        _class: JClass<'local>,
        context: JObject<'local>,
        action: JString<'local>,
    ) {
        let log_level = Config::new()
            .and_then(|config| config.load_settings())
            .map(|settings| settings.log_level.to_lowercase())
            .unwrap_or_else(|_| "error".to_string());
        // fails harmlessly when the launcher activity already installed it
        let _ = crate::log_capture::init_tracing(&log_level);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            run(&mut env, &context, &action)
        }));

        match result {
            Ok(Ok(outcome)) => log::debug!("Boot receiver finished: {:?}", outcome),
            Ok(Err(e)) => log::error!("Boot receiver failed: {:#}", e),
            Err(_) => log::error!("Boot receiver panicked"),
        }

        if env.exception_check().unwrap_or(false) {
            let _ = env.exception_clear();
        }
    }
}
