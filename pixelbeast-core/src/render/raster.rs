use std::io::Cursor;

use anyhow::Context;
use image::{
    RgbaImage,
    imageops::{self, FilterType},
};

use crate::foundation::{
    core::LogicalImage,
    data_uri,
    error::{BeastError, BeastResult},
};

/// Nearest-neighbor resize: every output pixel copies exactly one source pixel.
///
/// Shared by [`rasterize`] and [`pixelate`]. Integer magnification factors replicate each
/// source pixel into an exact square block.
pub fn upscale_nearest(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    imageops::resize(src, width, height, FilterType::Nearest)
}

/// Source index that [`upscale_nearest`] reads for destination index `dst`.
///
/// Mirrors `imageops` sampling: pixel centers, `f32` ratio, clamped to the last index.
fn nearest_source(dst: u32, dst_len: u32, src_len: u32) -> u32 {
    let ratio = src_len as f32 / dst_len as f32;
    (((dst as f32 + 0.5) * ratio).floor() as u32).min(src_len - 1)
}

/// Magnify the logical canvas to the fixed output resolution.
pub fn rasterize(canvas: &LogicalImage, output_size: u32) -> BeastResult<RgbaImage> {
    if output_size == 0 {
        return Err(BeastError::validation("output size must be > 0"));
    }
    let src = canvas.to_rgba_image().ok_or_else(|| {
        BeastError::generation("logical canvas buffer does not match its dimensions")
    })?;
    Ok(upscale_nearest(&src, output_size, output_size))
}

/// Blocky restyle of an arbitrary image: area-average down to
/// `(max(1, w / block), max(1, h / block))`, then nearest-neighbor back to `(w, h)`.
pub fn pixelate(img: &RgbaImage, block: u32) -> BeastResult<RgbaImage> {
    if block == 0 {
        return Err(BeastError::validation("pixel block size must be > 0"));
    }
    let (w, h) = img.dimensions();
    if w == 0 || h == 0 {
        return Ok(img.clone());
    }
    let small = downsample_area(img, (w / block).max(1), (h / block).max(1));
    Ok(upscale_nearest(&small, w, h))
}

/// Box-filter downsample, alpha-weighted so transparent pixels do not darken their
/// neighbors.
///
/// Output pixel `i` averages exactly the source pixels that [`upscale_nearest`] would fill
/// from `i` when resizing back, so downsample-then-upscale settles after one pass. Output
/// pixels that own no source pixel (when enlarging) take the nearest source pixel.
pub fn downsample_area(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (sw, sh) = src.dimensions();
    if sw == 0 || sh == 0 || width == 0 || height == 0 {
        return RgbaImage::new(width, height);
    }
    let cols: Vec<u32> = (0..sw).map(|sx| nearest_source(sx, sw, width)).collect();
    let rows: Vec<u32> = (0..sh).map(|sy| nearest_source(sy, sh, height)).collect();

    // r·a, g·a, b·a, a, count
    let mut acc = vec![[0u64; 5]; width as usize * height as usize];
    for (sx, sy, px) in src.enumerate_pixels() {
        let [r, g, b, a] = px.0;
        let a64 = u64::from(a);
        let idx = rows[sy as usize] as usize * width as usize + cols[sx as usize] as usize;
        let cell = &mut acc[idx];
        cell[0] += u64::from(r) * a64;
        cell[1] += u64::from(g) * a64;
        cell[2] += u64::from(b) * a64;
        cell[3] += a64;
        cell[4] += 1;
    }

    RgbaImage::from_fn(width, height, |x, y| {
        let [r, g, b, a, n] = acc[y as usize * width as usize + x as usize];
        if n == 0 {
            return *src.get_pixel(nearest_source(x, width, sw), nearest_source(y, height, sh));
        }
        if a == 0 {
            return image::Rgba([0, 0, 0, 0]);
        }
        let c = |v: u64| ((v + a / 2) / a).min(255) as u8;
        let alpha = ((a + n / 2) / n).min(255) as u8;
        image::Rgba([c(r), c(g), c(b), alpha])
    })
}

/// Encode as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> BeastResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Decode any supported encoded image to straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> BeastResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// `data:image/png;base64,…` for an already encoded PNG.
pub fn png_data_uri(png: &[u8]) -> String {
    data_uri::encode("image/png", png)
}

#[cfg(test)]
#[path = "../../tests/unit/render/raster.rs"]
mod tests;
