use std::borrow::Cow;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

use crate::error::NormalizationError;

/// Smallest width/height the recognition service accepts
pub const MIN_DIM: u32 = 50;

pub const PADDING_COLOR: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Pad `image` up to [`MIN_DIM`] on each side, centered on a white canvas.
///
/// Images already large enough are returned borrowed, untouched. The blit is unscaled.
pub fn normalize(image: &RgbaImage) -> Result<Cow<'_, RgbaImage>, NormalizationError> {
    let (width, height) = image.dimensions();
    if width >= MIN_DIM && height >= MIN_DIM {
        return Ok(Cow::Borrowed(image));
    }

    let canvas_width = width.max(MIN_DIM);
    let canvas_height = height.max(MIN_DIM);
    let mut canvas = blank_canvas(canvas_width, canvas_height)?;

    let x = (canvas_width - width) / 2;
    let y = (canvas_height - height) / 2;
    image::imageops::replace(&mut canvas, image, x as i64, y as i64);

    tracing::debug!(
        "Padded {}x{} capture to {}x{} at ({}, {})",
        width,
        height,
        canvas_width,
        canvas_height,
        x,
        y
    );
    Ok(Cow::Owned(canvas))
}

fn blank_canvas(width: u32, height: u32) -> Result<RgbaImage, NormalizationError> {
    let error = || NormalizationError::Allocation { width, height };
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(error)?;

    let mut buffer = Vec::new();
    buffer.try_reserve_exact(len).map_err(|_| error())?;
    buffer.extend(PADDING_COLOR.0.iter().copied().cycle().take(len));

    RgbaImage::from_raw(width, height, buffer).ok_or_else(error)
}

/// Lossless PNG byte stream for the upload body
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, image::ImageError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer).write_image(
        image.as_raw(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(buffer)
}
