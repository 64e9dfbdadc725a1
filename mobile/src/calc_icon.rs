// Turns platform icon resources into fixed-format bitmaps for display.

use crate::models::IconBitmap;
use anyhow::{bail, Context, Result};

/// An icon resource as handed out by the application registry.
pub trait Drawable {
    /// Decoded pixels when the resource is already bitmap-backed.
    fn bitmap(&self) -> Result<Option<IconBitmap>>;

    /// Natural size in pixels; zero or negative when unknown.
    fn intrinsic_size(&self) -> (i32, i32);

    /// Rasterize onto `canvas`, filling its whole area.
    fn draw(&self, canvas: &mut IconBitmap) -> Result<()>;
}

/// Bitmap-backed drawable.
#[derive(Debug, Clone)]
pub struct BitmapDrawable {
    pub bitmap: IconBitmap,
}

impl BitmapDrawable {
    pub fn new(bitmap: IconBitmap) -> Self {
        Self { bitmap }
    }

    /// Decode an encoded image (PNG) into a bitmap drawable.
    pub fn from_encoded(bytes: &[u8]) -> Result<Self> {
        let image = image::load_from_memory(bytes).context("Failed to decode icon image")?;
        Ok(Self::new(image.to_rgba8()))
    }
}

impl Drawable for BitmapDrawable {
    fn bitmap(&self) -> Result<Option<IconBitmap>> {
        Ok(Some(self.bitmap.clone()))
    }

    fn intrinsic_size(&self) -> (i32, i32) {
        (self.bitmap.width() as i32, self.bitmap.height() as i32)
    }

    fn draw(&self, canvas: &mut IconBitmap) -> Result<()> {
        let scaled = image::imageops::resize(
            &self.bitmap,
            canvas.width(),
            canvas.height(),
            image::imageops::FilterType::Triangle,
        );
        image::imageops::replace(canvas, &scaled, 0, 0);
        Ok(())
    }
}

/// Number of pixels in a `width`x`height` ARGB buffer.
///
/// Fails for non-positive sizes and for sizes whose pixel count does not fit a
/// Java `int[]` or whose RGBA byte length does not fit `usize`.
pub fn pixel_count(width: i32, height: i32) -> Result<i32> {
    if width <= 0 || height <= 0 {
        bail!("Invalid icon size {}x{}", width, height);
    }
    let count = match width.checked_mul(height) {
        Some(count) => count,
        None => bail!("Icon size {}x{} overflows the pixel buffer", width, height),
    };
    if (count as usize).checked_mul(4).is_none() {
        bail!("Icon size {}x{} overflows the pixel buffer", width, height);
    }
    Ok(count)
}

/// Bitmap-backed resources are returned unchanged; anything else is drawn onto a
/// transparent canvas of its intrinsic size.
pub fn drawable_to_bitmap(drawable: &dyn Drawable) -> Result<IconBitmap> {
    if let Some(bitmap) = drawable.bitmap()? {
        return Ok(bitmap);
    }

    let (width, height) = drawable.intrinsic_size();
    if width <= 0 || height <= 0 {
        bail!("Drawable has no intrinsic size ({}x{})", width, height);
    }
    pixel_count(width, height)?;

    let mut canvas = IconBitmap::new(width as u32, height as u32);
    drawable.draw(&mut canvas)?;
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    /// Vector-like drawable that paints a solid colour.
    struct SolidDrawable {
        size: (i32, i32),
        color: Rgba<u8>,
    }

    impl Drawable for SolidDrawable {
        fn bitmap(&self) -> Result<Option<IconBitmap>> {
            Ok(None)
        }

        fn intrinsic_size(&self) -> (i32, i32) {
            self.size
        }

        fn draw(&self, canvas: &mut IconBitmap) -> Result<()> {
            for pixel in canvas.pixels_mut() {
                *pixel = self.color;
            }
            Ok(())
        }
    }

    #[test]
    fn test_bitmap_drawable_is_returned_unchanged() {
        let mut bitmap = IconBitmap::new(3, 2);
        bitmap.put_pixel(1, 1, Rgba([10, 20, 30, 40]));
        let drawable = BitmapDrawable::new(bitmap.clone());

        let result = drawable_to_bitmap(&drawable).unwrap();
        assert_eq!(result.dimensions(), (3, 2));
        assert_eq!(result.as_raw(), bitmap.as_raw());
    }

    #[test]
    fn test_non_bitmap_drawable_uses_intrinsic_size() {
        let drawable = SolidDrawable {
            size: (48, 32),
            color: Rgba([255, 0, 0, 255]),
        };

        let result = drawable_to_bitmap(&drawable).unwrap();
        assert_eq!(result.dimensions(), (48, 32));
        assert_eq!(*result.get_pixel(47, 31), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_zero_size_drawable_is_an_error() {
        for size in [(0, 10), (10, 0), (-1, -1)] {
            let drawable = SolidDrawable {
                size,
                color: Rgba([0, 0, 0, 255]),
            };
            assert!(drawable_to_bitmap(&drawable).is_err());
        }
    }

    #[test]
    fn test_pixel_count_accepts_icon_sizes() {
        assert_eq!(pixel_count(1, 1).unwrap(), 1);
        assert_eq!(pixel_count(320, 180).unwrap(), 57_600);
    }

    #[test]
    fn test_pixel_count_rejects_overflowing_sizes() {
        assert!(pixel_count(i32::MAX, 2).is_err());
        assert!(pixel_count(65_536, 65_536).is_err());
        assert!(pixel_count(0, 10).is_err());
        assert!(pixel_count(10, -3).is_err());
    }

    #[test]
    fn test_huge_intrinsic_size_fails_before_allocating() {
        let drawable = SolidDrawable {
            size: (i32::MAX, i32::MAX),
            color: Rgba([0, 0, 0, 255]),
        };
        let err = drawable_to_bitmap(&drawable).unwrap_err();
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_from_encoded_rejects_garbage() {
        assert!(BitmapDrawable::from_encoded(b"not a png").is_err());
    }

    #[test]
    fn test_bitmap_drawable_draw_scales_to_canvas() {
        let mut bitmap = IconBitmap::new(2, 2);
        for pixel in bitmap.pixels_mut() {
            *pixel = Rgba([0, 255, 0, 255]);
        }
        let drawable = BitmapDrawable::new(bitmap);
        let mut canvas = IconBitmap::new(8, 8);
        drawable.draw(&mut canvas).unwrap();
        assert_eq!(*canvas.get_pixel(4, 4), Rgba([0, 255, 0, 255]));
    }
}
