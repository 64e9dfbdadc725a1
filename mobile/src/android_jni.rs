// Shared JNI plumbing: a JavaVM plus a global reference to an Android Context.
// The activity path builds it from ndk_context; the boot receiver builds it from
// the Context passed into the native method.

use anyhow::{Context as _, Result};
use jni::objects::{GlobalRef, JObject};
use jni::{JNIEnv, JavaVM};

pub struct JniContext {
    vm: JavaVM,
    context: GlobalRef,
}

impl JniContext {
    /// Context of the running NativeActivity.
    pub fn from_ndk_context() -> Result<Self> {
        let ctx = ndk_context::android_context();
        let vm = unsafe { JavaVM::from_raw(ctx.vm() as _) }
            .context("Expected to find JVM via ndk_context crate")?;

        let context = {
            let env = vm
                .attach_current_thread()
                .context("Failed to attach current thread")?;
            let activity = unsafe { JObject::from_raw(ctx.context() as _) };
            env.new_global_ref(&activity)
                .context("Failed to create global ref for activity")?
        };

        Ok(Self { vm, context })
    }

    /// Context handed to a native method by Java code.
    pub fn from_env(env: &mut JNIEnv<'_>, context: &JObject<'_>) -> Result<Self> {
        let vm = env.get_java_vm().context("Failed to get JavaVM")?;
        let context = env
            .new_global_ref(context)
            .context("Failed to create global ref for context")?;
        Ok(Self { vm, context })
    }

    /// Run `f` on an attached thread inside a local reference frame. A pending
    /// Java exception left behind by a failed call is logged and cleared.
    pub fn with_env<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> Result<T>,
    {
        let mut env = self
            .vm
            .attach_current_thread()
            .context("Failed to attach current thread")?;

        let result = env.with_local_frame(64, |env| f(env, self.context.as_obj()));

        if result.is_err() && env.exception_check().unwrap_or(false) {
            let _ = env.exception_describe();
            let _ = env.exception_clear();
        }
        result
    }
}

/// Read a `java.lang.String` (or any `CharSequence` after `toString`) into Rust.
pub fn get_rust_string(env: &mut JNIEnv<'_>, obj: &JObject<'_>) -> Result<String> {
    let j_str = env
        .call_method(obj, "toString", "()Ljava/lang/String;", &[])?
        .l()?;
    let value: String = env.get_string(&jni::objects::JString::from(j_str))?.into();
    Ok(value)
}
