// Starting activities: launching apps and opening system settings screens.
// On Android this goes through JNI `Context.startActivity`; without one the
// unavailable starter only logs and fails.

use crate::models::LaunchIntent;
use anyhow::Result;

#[cfg(target_os = "android")]
use crate::android_jni::JniContext;
#[cfg(target_os = "android")]
use anyhow::{anyhow, bail};
#[cfg(target_os = "android")]
use jni::objects::{JObject, JValue};
#[cfg(target_os = "android")]
use std::sync::Arc;

/// System screen for choosing the default home app.
pub const ACTION_HOME_SETTINGS: &str = "android.settings.HOME_SETTINGS";
/// Top-level system settings, used when the home chooser is missing.
pub const ACTION_SETTINGS: &str = "android.settings.SETTINGS";

pub const ACTION_MAIN: &str = "android.intent.action.MAIN";
pub const CATEGORY_LAUNCHER: &str = "android.intent.category.LAUNCHER";
pub const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;

pub trait ActivityStarter {
    /// Hand `intent` to the OS. `new_task` is required when starting from a
    /// non-activity context such as a broadcast receiver.
    fn start(&self, intent: &LaunchIntent, new_task: bool) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeSettingsOutcome {
    HomeSettings,
    /// The home chooser was unavailable; general settings were opened instead.
    FallbackSettings,
}

/// Open the OS "default home app" screen, falling back to general settings.
pub fn open_default_home_settings(starter: &dyn ActivityStarter) -> Result<HomeSettingsOutcome> {
    let primary = LaunchIntent::Action(ACTION_HOME_SETTINGS.to_string());
    match starter.start(&primary, false) {
        Ok(()) => Ok(HomeSettingsOutcome::HomeSettings),
        Err(e) => {
            log::warn!("Home settings unavailable ({:#}), opening settings", e);
            let fallback = LaunchIntent::Action(ACTION_SETTINGS.to_string());
            starter.start(&fallback, false)?;
            Ok(HomeSettingsOutcome::FallbackSettings)
        }
    }
}

#[cfg(target_os = "android")]
pub struct AndroidActivityStarter {
    ctx: Arc<JniContext>,
}

#[cfg(target_os = "android")]
impl AndroidActivityStarter {
    pub fn new(ctx: Arc<JniContext>) -> Self {
        Self { ctx }
    }
}

#[cfg(target_os = "android")]
impl ActivityStarter for AndroidActivityStarter {
    fn start(&self, intent: &LaunchIntent, new_task: bool) -> Result<()> {
        self.ctx.with_env(|env, context| {
            let intent_class = env.find_class("android/content/Intent")?;

            let j_intent = match intent {
                LaunchIntent::Component {
                    package_id,
                    class_name,
                } => {
                    let action = env.new_string(ACTION_MAIN)?;
                    let j_intent = env.new_object(
                        &intent_class,
                        "(Ljava/lang/String;)V",
                        &[JValue::Object(&action)],
                    )?;
                    let category = env.new_string(CATEGORY_LAUNCHER)?;
                    env.call_method(
                        &j_intent,
                        "addCategory",
                        "(Ljava/lang/String;)Landroid/content/Intent;",
                        &[JValue::Object(&category)],
                    )?;
                    let j_package = env.new_string(package_id)?;
                    let j_class = env.new_string(class_name)?;
                    env.call_method(
                        &j_intent,
                        "setClassName",
                        "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
                        &[JValue::Object(&j_package), JValue::Object(&j_class)],
                    )?;
                    j_intent
                }
                LaunchIntent::Package { package_id } => {
                    let pm = env
                        .call_method(
                            context,
                            "getPackageManager",
                            "()Landroid/content/pm/PackageManager;",
                            &[],
                        )?
                        .l()?;
                    let j_package = env.new_string(package_id)?;
                    let j_intent = env
                        .call_method(
                            &pm,
                            "getLaunchIntentForPackage",
                            "(Ljava/lang/String;)Landroid/content/Intent;",
                            &[JValue::Object(&j_package)],
                        )?
                        .l()?;
                    if j_intent.is_null() {
                        bail!("No launch intent for package {}", package_id);
                    }
                    j_intent
                }
                LaunchIntent::Action(action) => {
                    let j_action = env.new_string(action)?;
                    env.new_object(
                        &intent_class,
                        "(Ljava/lang/String;)V",
                        &[JValue::Object(&j_action)],
                    )?
                }
            };

            if new_task {
                env.call_method(
                    &j_intent,
                    "addFlags",
                    "(I)Landroid/content/Intent;",
                    &[JValue::Int(FLAG_ACTIVITY_NEW_TASK)],
                )?;
            }

            start_activity(env, context, &j_intent)
                .map_err(|e| anyhow!("startActivity failed for {:?}: {}", intent, e))
        })
    }
}

#[cfg(target_os = "android")]
fn start_activity(
    env: &mut jni::JNIEnv<'_>,
    context: &JObject<'_>,
    intent: &JObject<'_>,
) -> jni::errors::Result<()> {
    env.call_method(
        context,
        "startActivity",
        "(Landroid/content/Intent;)V",
        &[JValue::Object(intent)],
    )?;
    Ok(())
}

/// Used on desktop, and on Android when no JNI context could be obtained.
#[derive(Default)]
pub struct UnavailableActivityStarter;

impl ActivityStarter for UnavailableActivityStarter {
    fn start(&self, intent: &LaunchIntent, _new_task: bool) -> Result<()> {
        log::debug!("start {:?}: no activity manager available", intent);
        anyhow::bail!("Starting activities is only available on Android")
    }
}
