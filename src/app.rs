//! The `exult-scale` program: load an image, scale it, save it.

use std::path::Path;

use anyhow::{Context, Result};
use image::RgbaImage;

use crate::config::Options;
use crate::graphics::scaling::ScalerSet;
use crate::graphics::surface::{Palette, PixelFormat, Surface};

/// 3-3-2 bit color cube used when quantizing to an indexed surface
pub fn rgb332_palette() -> Palette {
    let mut pal = Palette::new();
    for i in 0..=255u8 {
        let r = ((i >> 5) & 7) as u32;
        let g = ((i >> 2) & 7) as u32;
        let b = (i & 3) as u32;
        pal.set(i, [(r * 255 / 7) as u8, (g * 255 / 7) as u8, (b * 85) as u8]);
    }
    pal
}

/// Convert an RGBA image to a surface of `format`. Alpha is dropped;
/// indexed surfaces get the 3-3-2 palette.
pub fn surface_from_image(img: &RgbaImage, format: PixelFormat) -> Result<Surface> {
    let mut surface = Surface::new(img.width() as usize, img.height() as usize, format)
        .context("Image cannot be held in a surface")?;
    if format.is_indexed() {
        surface.set_palette(rgb332_palette());
    }
    for (x, y, px) in img.enumerate_pixels() {
        surface.set_pixel_rgb(x as usize, y as usize, [px[0], px[1], px[2]]);
    }
    Ok(surface)
}

/// Convert any surface back to an opaque RGBA image
pub fn surface_to_image(surface: &Surface) -> RgbaImage {
    RgbaImage::from_fn(surface.width() as u32, surface.height() as u32, |x, y| {
        let [r, g, b] = surface
            .pixel_rgb(x as usize, y as usize)
            .unwrap_or_default();
        image::Rgba([r, g, b, 255])
    })
}

/// Format of the scaled surface for a source format. Indexed sources are
/// expanded to 32-bit output.
pub fn output_format(src: PixelFormat) -> PixelFormat {
    match src {
        PixelFormat::Indexed8 => PixelFormat::RGBA32,
        other => other,
    }
}

/// Scale `src` to `dw x dh` with the scaler and kernel chosen in `options`.
pub fn scale_surface(src: &Surface, dw: usize, dh: usize, options: &Options) -> Result<Surface> {
    let mut dst = Surface::new(dw, dh, output_format(src.format()))
        .with_context(|| format!("Invalid output size {}x{}", dw, dh))?;

    let scalers = ScalerSet::with_kernel(options.kernel.unwrap_or_default());
    let requested = options.scaler.unwrap_or_default();
    let bounds = dst.bounds();
    let used = scalers.scale(
        requested,
        src,
        src.bounds(),
        &mut dst,
        bounds,
        options.clamp_src.unwrap_or(false),
    )?;
    if used != requested {
        log::info!("{} scaler unavailable, used {}", requested.name(), used.name());
    }
    Ok(dst)
}

/// Scale the image at `input` and write the result to `output`.
pub fn run(input: &Path, output: &Path, options: &Options) -> Result<()> {
    let img = image::open(input)
        .with_context(|| format!("Failed to open image {}", input.display()))?
        .to_rgba8();

    let format = options.pixel_format.unwrap_or(PixelFormat::RGBA32);
    let src = surface_from_image(&img, format)?;
    let (dw, dh) = options.output_size(src.width(), src.height())?;

    log::info!(
        "Scaling {} ({}x{}) to {}x{} with {} scaler",
        input.display(),
        src.width(),
        src.height(),
        dw,
        dh,
        options.scaler.unwrap_or_default().name()
    );
    let dst = scale_surface(&src, dw, dh, options)?;

    surface_to_image(&dst)
        .save(output)
        .with_context(|| format!("Failed to write image {}", output.display()))?;
    log::info!("Wrote {}", output.display());
    Ok(())
}
