use grabtext_types::ScreenRect;
use image::{RgbaImage, imageops};
use xcap::Monitor;

use crate::error::CaptureError;

/// Pixels copied from the screen. Always non-empty and fully opaque.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pixels: RgbaImage,
}

impl CapturedImage {
    pub fn new(mut pixels: RgbaImage) -> Result<Self, CaptureError> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(CaptureError::EmptyImage { width, height });
        }

        for pixel in pixels.pixels_mut() {
            pixel.0[3] = u8::MAX;
        }

        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }
}

/// Copies a rectangle of the screen into memory, 1:1 with no scaling
pub trait ScreenRasterizer: Send + Sync {
    fn rasterize(&self, rect: ScreenRect) -> Result<CapturedImage, CaptureError>;
}

/// Rasterizer backed by `xcap` monitor capture
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapRasterizer;

impl XcapRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl ScreenRasterizer for XcapRasterizer {
    fn rasterize(&self, rect: ScreenRect) -> Result<CapturedImage, CaptureError> {
        let monitors = Monitor::all().map_err(|e| CaptureError::Denied(e.to_string()))?;
        if monitors.is_empty() {
            return Err(CaptureError::NoMonitor);
        }

        let mut parts = Vec::new();
        for monitor in &monitors {
            let bounds =
                ScreenRect::new(monitor.x(), monitor.y(), monitor.width(), monitor.height());
            if rect.intersect(&bounds).is_empty() {
                continue;
            }

            let image = monitor
                .capture_image()
                .map_err(|e| CaptureError::Denied(e.to_string()))?;
            let (width, height) = image.dimensions();
            let pixels = RgbaImage::from_raw(width, height, image.into_raw())
                .ok_or_else(|| CaptureError::Denied("pixel buffer size mismatch".to_string()))?;

            tracing::debug!("Captured monitor {} for {}", bounds, rect);
            parts.push((bounds, pixels));
        }

        CapturedImage::new(stitch(rect, &parts)?)
    }
}

/// Assemble `rect` from whole-monitor screenshots, each paired with its virtual-screen bounds.
///
/// Every pixel of `rect` must come from some monitor, otherwise the selection reached past the
/// desktop and the copy fails.
fn stitch(
    rect: ScreenRect,
    parts: &[(ScreenRect, RgbaImage)],
) -> Result<RgbaImage, CaptureError> {
    let row_len = rect.width as usize;
    let mut canvas = RgbaImage::new(rect.width, rect.height);
    let mut covered = vec![false; row_len * rect.height as usize];

    for (bounds, pixels) in parts {
        let overlap = rect.intersect(bounds);
        if overlap.is_empty() {
            continue;
        }

        let piece = imageops::crop_imm(
            pixels,
            (overlap.x as i64 - bounds.x as i64) as u32,
            (overlap.y as i64 - bounds.y as i64) as u32,
            overlap.width,
            overlap.height,
        )
        .to_image();
        if piece.dimensions() != (overlap.width, overlap.height) {
            return Err(CaptureError::Denied(format!(
                "monitor {} returned a {}x{} image",
                bounds,
                pixels.width(),
                pixels.height()
            )));
        }

        let dx = (overlap.x as i64 - rect.x as i64) as usize;
        let dy = (overlap.y as i64 - rect.y as i64) as usize;
        imageops::replace(&mut canvas, &piece, dx as i64, dy as i64);
        for row in dy..dy + overlap.height as usize {
            let start = row * row_len + dx;
            covered[start..start + overlap.width as usize].fill(true);
        }
    }

    if covered.contains(&false) {
        return Err(CaptureError::OutsideScreen(rect));
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use image::Rgba;

    use super::*;

    #[test]
    fn test_captured_image_rejects_empty() {
        let err = CapturedImage::new(RgbaImage::new(0, 12)).unwrap_err();
        assert!(matches!(
            err,
            CaptureError::EmptyImage {
                width: 0,
                height: 12
            }
        ));
    }

    #[test]
    fn test_captured_image_forces_opaque_alpha() {
        let pixels = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 0]));
        let image = CapturedImage::new(pixels).unwrap();

        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert!(image.pixels().pixels().all(|p| *p == Rgba([10, 20, 30, 255])));
    }

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn side_by_side() -> Vec<(ScreenRect, RgbaImage)> {
        vec![
            (ScreenRect::new(0, 0, 4, 2), RgbaImage::from_pixel(4, 2, RED)),
            (ScreenRect::new(4, 0, 4, 2), RgbaImage::from_pixel(4, 2, BLUE)),
        ]
    }

    #[test]
    fn test_stitch_across_monitor_seam() {
        let pixels = stitch(ScreenRect::new(2, 0, 4, 2), &side_by_side()).unwrap();

        assert_eq!(pixels.dimensions(), (4, 2));
        for (x, _, pixel) in pixels.enumerate_pixels() {
            let expected = if x < 2 { RED } else { BLUE };
            assert_eq!(*pixel, expected, "column {x}");
        }
    }

    #[test]
    fn test_stitch_single_monitor_is_plain_crop() {
        let mut screen = RgbaImage::from_pixel(4, 2, RED);
        screen.put_pixel(3, 1, BLUE);
        let parts = vec![(ScreenRect::new(-4, 0, 4, 2), screen)];

        let pixels = stitch(ScreenRect::new(-2, 1, 2, 1), &parts).unwrap();
        assert_eq!(pixels.dimensions(), (2, 1));
        assert_eq!(*pixels.get_pixel(0, 0), RED);
        assert_eq!(*pixels.get_pixel(1, 0), BLUE);
    }

    #[test]
    fn test_stitch_rejects_rect_outside_monitors() {
        for rect in [ScreenRect::new(20, 0, 2, 2), ScreenRect::new(6, 0, 4, 2)] {
            let err = stitch(rect, &side_by_side()).unwrap_err();
            assert!(matches!(err, CaptureError::OutsideScreen(r) if r == rect), "{rect}");
        }
    }

    #[test]
    fn test_stitch_rejects_short_screenshot() {
        let parts = vec![(ScreenRect::new(0, 0, 8, 2), RgbaImage::from_pixel(4, 2, RED))];
        let err = stitch(ScreenRect::new(2, 0, 4, 2), &parts).unwrap_err();
        assert!(matches!(err, CaptureError::Denied(_)));
    }
}
