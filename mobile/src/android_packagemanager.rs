// usage
// PackageManagerRegistry::new(ctx).list_launchable()
// PackageManagerRegistry::new(ctx).launch_intent_for("com.example")

// reference
// https://developer.android.com/reference/android/content/pm/PackageManager
// queryIntentActivities
// getLaunchIntentForPackage
// https://developer.android.com/reference/android/content/pm/PackageItemInfo
// loadLabel
// loadIcon

use crate::android_activity::{ACTION_MAIN, CATEGORY_LAUNCHER};
use crate::android_jni::{get_rust_string, JniContext};
use crate::calc_icon::{pixel_count, Drawable};
use crate::calc_launcherapps_stt::ApplicationRegistry;
use crate::models::{AppDescriptor, IconBitmap, LaunchIntent};
use anyhow::{bail, Result};
use jni::objects::{GlobalRef, JObject, JValue};
use jni::JNIEnv;
use std::sync::Arc;

pub struct PackageManagerRegistry {
    ctx: Arc<JniContext>,
}

impl PackageManagerRegistry {
    pub fn new(ctx: Arc<JniContext>) -> Self {
        Self { ctx }
    }
}

fn package_manager<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject<'_>,
) -> Result<JObject<'local>> {
    Ok(env
        .call_method(
            context,
            "getPackageManager",
            "()Landroid/content/pm/PackageManager;",
            &[],
        )?
        .l()?)
}

fn string_field(env: &mut JNIEnv<'_>, obj: &JObject<'_>, name: &str) -> Result<String> {
    let value = env.get_field(obj, name, "Ljava/lang/String;")?.l()?;
    get_rust_string(env, &value)
}

impl ApplicationRegistry for PackageManagerRegistry {
    fn list_launchable(&self) -> Result<Vec<AppDescriptor>> {
        self.ctx.with_env(|env, context| {
            let pm = package_manager(env, context)?;

            let intent_class = env.find_class("android/content/Intent")?;
            let action = env.new_string(ACTION_MAIN)?;
            let intent = env.new_object(
                &intent_class,
                "(Ljava/lang/String;)V",
                &[JValue::Object(&action)],
            )?;
            let category = env.new_string(CATEGORY_LAUNCHER)?;
            env.call_method(
                &intent,
                "addCategory",
                "(Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&category)],
            )?;

            let activities = env
                .call_method(
                    &pm,
                    "queryIntentActivities",
                    "(Landroid/content/Intent;I)Ljava/util/List;",
                    &[JValue::Object(&intent), JValue::Int(0)],
                )?
                .l()?;
            let size = env.call_method(&activities, "size", "()I", &[])?.i()?;

            let mut descriptors = Vec::with_capacity(size.max(0) as usize);
            for i in 0..size {
                let descriptor = env.with_local_frame(16, |env| -> Result<AppDescriptor> {
                    let resolve_info = env
                        .call_method(&activities, "get", "(I)Ljava/lang/Object;", &[JValue::Int(i)])?
                        .l()?;
                    let activity_info = env
                        .get_field(
                            &resolve_info,
                            "activityInfo",
                            "Landroid/content/pm/ActivityInfo;",
                        )?
                        .l()?;

                    let label_obj = env
                        .call_method(
                            &activity_info,
                            "loadLabel",
                            "(Landroid/content/pm/PackageManager;)Ljava/lang/CharSequence;",
                            &[JValue::Object(&pm)],
                        )?
                        .l()?;
                    let label = get_rust_string(env, &label_obj)?;
                    let package_id = string_field(env, &activity_info, "packageName")?;
                    let class_name = string_field(env, &activity_info, "name")?;

                    let icon_obj = env
                        .call_method(
                            &activity_info,
                            "loadIcon",
                            "(Landroid/content/pm/PackageManager;)Landroid/graphics/drawable/Drawable;",
                            &[JValue::Object(&pm)],
                        )?
                        .l()?;
                    let icon = if icon_obj.is_null() {
                        None
                    } else {
                        Some(Box::new(JniDrawable {
                            ctx: self.ctx.clone(),
                            drawable: env.new_global_ref(&icon_obj)?,
                        }) as Box<dyn Drawable>)
                    };

                    Ok(AppDescriptor {
                        label,
                        launch_intent: Some(LaunchIntent::Component {
                            package_id: package_id.clone(),
                            class_name,
                        }),
                        package_id,
                        icon,
                    })
                })?;
                descriptors.push(descriptor);
            }

            log::debug!("queryIntentActivities returned {} activities", descriptors.len());
            Ok(descriptors)
        })
    }

    fn launch_intent_for(&self, package_id: &str) -> Result<Option<LaunchIntent>> {
        self.ctx.with_env(|env, context| {
            let pm = package_manager(env, context)?;
            let j_package = env.new_string(package_id)?;
            let intent = env
                .call_method(
                    &pm,
                    "getLaunchIntentForPackage",
                    "(Ljava/lang/String;)Landroid/content/Intent;",
                    &[JValue::Object(&j_package)],
                )?
                .l()?;
            if intent.is_null() {
                return Ok(None);
            }

            let component = env
                .call_method(&intent, "getComponent", "()Landroid/content/ComponentName;", &[])?
                .l()?;
            if component.is_null() {
                return Ok(Some(LaunchIntent::Package {
                    package_id: package_id.to_string(),
                }));
            }

            let class_obj = env
                .call_method(&component, "getClassName", "()Ljava/lang/String;", &[])?
                .l()?;
            Ok(Some(LaunchIntent::Component {
                package_id: package_id.to_string(),
                class_name: get_rust_string(env, &class_obj)?,
            }))
        })
    }
}

/// `android.graphics.drawable.Drawable` held across JNI calls.
struct JniDrawable {
    ctx: Arc<JniContext>,
    drawable: GlobalRef,
}

/// Copy an `android.graphics.Bitmap` into RGBA8 pixels.
fn read_bitmap(env: &mut JNIEnv<'_>, bitmap: &JObject<'_>) -> Result<IconBitmap> {
    let width = env.call_method(bitmap, "getWidth", "()I", &[])?.i()?;
    let height = env.call_method(bitmap, "getHeight", "()I", &[])?.i()?;
    let count = pixel_count(width, height)?;
    let len = count as usize;
    let pixels = env.new_int_array(count)?;
    env.call_method(
        bitmap,
        "getPixels",
        "([IIIIIII)V",
        &[
            JValue::Object(&*pixels),
            JValue::Int(0),
            JValue::Int(width),
            JValue::Int(0),
            JValue::Int(0),
            JValue::Int(width),
            JValue::Int(height),
        ],
    )?;

    let mut argb = vec![0i32; len];
    env.get_int_array_region(&pixels, 0, &mut argb)?;

    let mut rgba = Vec::with_capacity(len * 4);
    for pixel in argb {
        let [a, r, g, b] = (pixel as u32).to_be_bytes();
        rgba.extend_from_slice(&[r, g, b, a]);
    }

    match IconBitmap::from_raw(width as u32, height as u32, rgba) {
        Some(image) => Ok(image),
        None => bail!("Pixel buffer does not match {}x{}", width, height),
    }
}

impl Drawable for JniDrawable {
    fn bitmap(&self) -> Result<Option<IconBitmap>> {
        self.ctx.with_env(|env, _context| {
            let drawable = self.drawable.as_obj();
            if !env.is_instance_of(drawable, "android/graphics/drawable/BitmapDrawable")? {
                return Ok(None);
            }
            let bitmap = env
                .call_method(drawable, "getBitmap", "()Landroid/graphics/Bitmap;", &[])?
                .l()?;
            if bitmap.is_null() {
                return Ok(None);
            }
            read_bitmap(env, &bitmap).map(Some)
        })
    }

    fn intrinsic_size(&self) -> (i32, i32) {
        let size = self.ctx.with_env(|env, _context| {
            let drawable = self.drawable.as_obj();
            let width = env.call_method(drawable, "getIntrinsicWidth", "()I", &[])?.i()?;
            let height = env.call_method(drawable, "getIntrinsicHeight", "()I", &[])?.i()?;
            Ok((width, height))
        });
        match size {
            Ok(size) => size,
            Err(e) => {
                log::debug!("Failed to read drawable size: {:#}", e);
                (0, 0)
            }
        }
    }

    fn draw(&self, canvas: &mut IconBitmap) -> Result<()> {
        let width = canvas.width() as i32;
        let height = canvas.height() as i32;

        let drawn = self.ctx.with_env(|env, _context| {
            let drawable = self.drawable.as_obj();

            let config = env
                .get_static_field(
                    "android/graphics/Bitmap$Config",
                    "ARGB_8888",
                    "Landroid/graphics/Bitmap$Config;",
                )?
                .l()?;
            let bitmap = env
                .call_static_method(
                    "android/graphics/Bitmap",
                    "createBitmap",
                    "(IILandroid/graphics/Bitmap$Config;)Landroid/graphics/Bitmap;",
                    &[JValue::Int(width), JValue::Int(height), JValue::Object(&config)],
                )?
                .l()?;
            let j_canvas = env.new_object(
                "android/graphics/Canvas",
                "(Landroid/graphics/Bitmap;)V",
                &[JValue::Object(&bitmap)],
            )?;

            env.call_method(
                drawable,
                "setBounds",
                "(IIII)V",
                &[
                    JValue::Int(0),
                    JValue::Int(0),
                    JValue::Int(width),
                    JValue::Int(height),
                ],
            )?;
            env.call_method(
                drawable,
                "draw",
                "(Landroid/graphics/Canvas;)V",
                &[JValue::Object(&j_canvas)],
            )?;

            read_bitmap(env, &bitmap)
        })?;

        *canvas = drawn;
        Ok(())
    }
}
