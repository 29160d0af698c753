//! Scaler front end
//!
//! Wraps the bilinear and point kernels behind the [`ArbScaler`] trait.
//! Each call resolves the (source format, destination format) pair once and
//! runs the kernel monomorphized for the matching pixel manipulator, so
//! there is no format branching inside the pixel loops.
//!
//! [`ScalerSet`] owns one instance of every scaler and falls back to point
//! sampling when the requested scaler cannot handle a format pair.

use crate::graphics::bilinear::{scale_bilinear_with, KernelChoice};
use crate::graphics::manip::{
    Manip16to16, Manip32to32, Manip555to555, Manip565to565, Manip8to16, Manip8to32, Manip8to555,
    Manip8to565, PixelManip,
};
use crate::graphics::point::{scale_point, scale_point_with};
use crate::graphics::surface::{
    ChannelLayout, DestView, PixelFormat, Rect, SourceView, Surface, SurfaceError,
};

// ==============================================================================
// Errors
// ==============================================================================

/// Scaling errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScaleError {
    #[error("{scaler} scaler cannot convert {src:?} to {dst:?}")]
    UnsupportedFormats {
        scaler: &'static str,
        src: PixelFormat,
        dst: PixelFormat,
    },

    #[error("indexed source surface has no palette")]
    MissingPalette,

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

// ==============================================================================
// Scaler types
// ==============================================================================

/// Selectable scalers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScalerType {
    /// Nearest-neighbour sampling
    Point,
    /// Bilinear filtering
    #[default]
    Bilinear,
}

impl ScalerType {
    pub const ALL: [ScalerType; 2] = [ScalerType::Point, ScalerType::Bilinear];

    pub fn name(&self) -> &'static str {
        match self {
            ScalerType::Point => "point",
            ScalerType::Bilinear => "bilinear",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(name))
    }
}

/// Arbitrary ratio scaler
pub trait ArbScaler: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn copyright(&self) -> &'static str;

    /// Whether this scaler can convert `src` pixels to `dst` pixels
    fn supports(&self, src: PixelFormat, dst: PixelFormat) -> bool;

    /// Scale `src_rect` of `src` onto the whole of `dst`, whose pixels are
    /// encoded as `dst_format`.
    fn scale_into(
        &self,
        src: &Surface,
        src_rect: Rect,
        dst: &mut DestView<'_>,
        dst_format: PixelFormat,
        clamp_src: bool,
    ) -> Result<(), ScaleError>;

    /// Scale `src_rect` of `src` onto `dst_rect` of `dst`.
    fn scale(
        &self,
        src: &Surface,
        src_rect: Rect,
        dst: &mut Surface,
        dst_rect: Rect,
        clamp_src: bool,
    ) -> Result<(), ScaleError> {
        let format = dst.format();
        let mut view = dst.dest_view(dst_rect)?;
        self.scale_into(src, src_rect, &mut view, format, clamp_src)
    }
}

// ==============================================================================
// Format dispatch
// ==============================================================================

/// A kernel entry point generic over the pixel manipulator
trait KernelEntry {
    fn run<M: PixelManip>(
        &self,
        manip: &M,
        src: &SourceView<'_>,
        rect: Rect,
        dst: &mut DestView<'_>,
        clamp_src: bool,
    );
}

/// Manipulator family for a format pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManipKind {
    Indexed8To32(ChannelLayout),
    Indexed8To565,
    Indexed8To555,
    Indexed8To16(ChannelLayout),
    Rgb565,
    Rgb555,
    Rgb16(ChannelLayout),
    Rgb32(ChannelLayout, ChannelLayout),
}

impl ManipKind {
    fn resolve(src: PixelFormat, dst: PixelFormat) -> Option<Self> {
        use PixelFormat::*;
        Some(match (src, dst) {
            (Indexed8, Rgb32(layout)) => ManipKind::Indexed8To32(layout),
            (Indexed8, Rgb16(ChannelLayout::RGB565)) => ManipKind::Indexed8To565,
            (Indexed8, Rgb16(ChannelLayout::RGB555)) => ManipKind::Indexed8To555,
            (Indexed8, Rgb16(layout)) => ManipKind::Indexed8To16(layout),
            (Rgb16(ChannelLayout::RGB565), Rgb16(ChannelLayout::RGB565)) => ManipKind::Rgb565,
            (Rgb16(ChannelLayout::RGB555), Rgb16(ChannelLayout::RGB555)) => ManipKind::Rgb555,
            (Rgb16(a), Rgb16(b)) if a == b => ManipKind::Rgb16(a),
            (Rgb32(a), Rgb32(b)) => ManipKind::Rgb32(a, b),
            _ => return None,
        })
    }
}

/// Build the manipulator for `src` -> `dst_format` and run `entry` with it.
fn run_with_manip<E: KernelEntry>(
    entry: &E,
    scaler: &'static str,
    src: &Surface,
    rect: Rect,
    dst: &mut DestView<'_>,
    dst_format: PixelFormat,
    clamp_src: bool,
) -> Result<(), ScaleError> {
    let kind = ManipKind::resolve(src.format(), dst_format).ok_or(ScaleError::UnsupportedFormats {
        scaler,
        src: src.format(),
        dst: dst_format,
    })?;
    let view = src.source_view();
    let palette = || src.palette().ok_or(ScaleError::MissingPalette);

    match kind {
        ManipKind::Indexed8To32(layout) => {
            entry.run(&Manip8to32::new(palette()?, layout), &view, rect, dst, clamp_src)
        }
        ManipKind::Indexed8To565 => entry.run(&Manip8to565::new(palette()?), &view, rect, dst, clamp_src),
        ManipKind::Indexed8To555 => entry.run(&Manip8to555::new(palette()?), &view, rect, dst, clamp_src),
        ManipKind::Indexed8To16(layout) => {
            entry.run(&Manip8to16::new(palette()?, layout), &view, rect, dst, clamp_src)
        }
        ManipKind::Rgb565 => entry.run(&Manip565to565, &view, rect, dst, clamp_src),
        ManipKind::Rgb555 => entry.run(&Manip555to555, &view, rect, dst, clamp_src),
        ManipKind::Rgb16(layout) => entry.run(&Manip16to16::new(layout), &view, rect, dst, clamp_src),
        ManipKind::Rgb32(from, to) => entry.run(&Manip32to32::new(from, to), &view, rect, dst, clamp_src),
    }
    Ok(())
}

// ==============================================================================
// Bilinear Scaler
// ==============================================================================

/// Bilinear filtering scaler
#[derive(Debug, Clone, Copy, Default)]
pub struct BilinearScaler {
    kernel: KernelChoice,
}

impl BilinearScaler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scaler that prefers `kernel` over the automatic choice
    pub fn with_kernel(kernel: KernelChoice) -> Self {
        Self { kernel }
    }

    pub fn kernel(&self) -> KernelChoice {
        self.kernel
    }
}

impl KernelEntry for BilinearScaler {
    fn run<M: PixelManip>(
        &self,
        manip: &M,
        src: &SourceView<'_>,
        rect: Rect,
        dst: &mut DestView<'_>,
        clamp_src: bool,
    ) {
        scale_bilinear_with(manip, src, rect, dst, clamp_src, self.kernel);
    }
}

impl ArbScaler for BilinearScaler {
    fn name(&self) -> &'static str {
        "bilinear"
    }

    fn description(&self) -> &'static str {
        "Bilinear filtering scaler with 2x and aspect correcting fast paths"
    }

    fn copyright(&self) -> &'static str {
        "Copyright (C) 2005 The Pentagram Team, 2010-2022 The Exult Team"
    }

    fn supports(&self, src: PixelFormat, dst: PixelFormat) -> bool {
        ManipKind::resolve(src, dst).is_some()
    }

    fn scale_into(
        &self,
        src: &Surface,
        src_rect: Rect,
        dst: &mut DestView<'_>,
        dst_format: PixelFormat,
        clamp_src: bool,
    ) -> Result<(), ScaleError> {
        run_with_manip(self, self.name(), src, src_rect, dst, dst_format, clamp_src)
    }
}

// ==============================================================================
// Point Scaler
// ==============================================================================

/// Nearest-neighbour scaler
#[derive(Debug, Clone, Copy, Default)]
pub struct PointScaler;

impl PointScaler {
    pub fn new() -> Self {
        Self
    }
}

impl KernelEntry for PointScaler {
    fn run<M: PixelManip>(
        &self,
        manip: &M,
        src: &SourceView<'_>,
        rect: Rect,
        dst: &mut DestView<'_>,
        _clamp_src: bool,
    ) {
        scale_point(manip, src, rect, dst);
    }
}

impl ArbScaler for PointScaler {
    fn name(&self) -> &'static str {
        "point"
    }

    fn description(&self) -> &'static str {
        "Point sampling scaler"
    }

    fn copyright(&self) -> &'static str {
        "Copyright (C) 2005 The Pentagram Team"
    }

    fn supports(&self, src: PixelFormat, dst: PixelFormat) -> bool {
        src == dst || ManipKind::resolve(src, dst).is_some()
    }

    fn scale_into(
        &self,
        src: &Surface,
        src_rect: Rect,
        dst: &mut DestView<'_>,
        dst_format: PixelFormat,
        clamp_src: bool,
    ) -> Result<(), ScaleError> {
        // Palette to palette copies the indices unchanged
        if src.format() == PixelFormat::Indexed8 && dst_format == PixelFormat::Indexed8 {
            scale_point_with(&src.source_view(), src_rect, dst, |px: u8| px);
            return Ok(());
        }
        run_with_manip(self, self.name(), src, src_rect, dst, dst_format, clamp_src)
    }
}

// ==============================================================================
// Scaler Set
// ==============================================================================

/// One instance of every scaler, selected per call
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalerSet {
    point: PointScaler,
    bilinear: BilinearScaler,
}

impl ScalerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set with the bilinear scaler preferring `kernel`
    pub fn with_kernel(kernel: KernelChoice) -> Self {
        Self {
            point: PointScaler::new(),
            bilinear: BilinearScaler::with_kernel(kernel),
        }
    }

    pub fn get(&self, kind: ScalerType) -> &dyn ArbScaler {
        match kind {
            ScalerType::Point => &self.point,
            ScalerType::Bilinear => &self.bilinear,
        }
    }

    /// Scale with `kind`, falling back to point sampling when `kind` does
    /// not support the format pair. Returns the scaler that ran.
    pub fn scale_into(
        &self,
        kind: ScalerType,
        src: &Surface,
        src_rect: Rect,
        dst: &mut DestView<'_>,
        dst_format: PixelFormat,
        clamp_src: bool,
    ) -> Result<ScalerType, ScaleError> {
        let scaler = self.get(kind);
        if kind != ScalerType::Point && !scaler.supports(src.format(), dst_format) {
            log::debug!(
                "{} scaler cannot convert {:?} to {:?}, using point",
                scaler.name(),
                src.format(),
                dst_format
            );
            self.point.scale_into(src, src_rect, dst, dst_format, clamp_src)?;
            return Ok(ScalerType::Point);
        }
        scaler.scale_into(src, src_rect, dst, dst_format, clamp_src)?;
        Ok(kind)
    }

    /// Scale `src_rect` of `src` onto `dst_rect` of `dst`, see
    /// [`ScalerSet::scale_into`].
    pub fn scale(
        &self,
        kind: ScalerType,
        src: &Surface,
        src_rect: Rect,
        dst: &mut Surface,
        dst_rect: Rect,
        clamp_src: bool,
    ) -> Result<ScalerType, ScaleError> {
        let format = dst.format();
        let mut view = dst.dest_view(dst_rect)?;
        self.scale_into(kind, src, src_rect, &mut view, format, clamp_src)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::bilinear::BilinearKernel;
    use crate::graphics::surface::Palette;

    fn checker(format: PixelFormat) -> Surface {
        let mut s = Surface::new(4, 4, format).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                let c = if (x + y) % 2 == 0 { [255, 255, 255] } else { [0, 0, 0] };
                s.set_pixel_rgb(x, y, c);
            }
        }
        s
    }

    #[test]
    fn test_scaler_type_names() {
        assert_eq!(ScalerType::from_name("Bilinear"), Some(ScalerType::Bilinear));
        assert_eq!(ScalerType::from_name(" point "), Some(ScalerType::Point));
        assert_eq!(ScalerType::from_name("hq2x"), None);
        assert_eq!(ScalerType::default(), ScalerType::Bilinear);
    }

    #[test]
    fn test_supported_pairs() {
        let b = BilinearScaler::new();
        assert!(b.supports(PixelFormat::Indexed8, PixelFormat::RGBA32));
        assert!(b.supports(PixelFormat::Indexed8, PixelFormat::RGB565));
        assert!(b.supports(PixelFormat::RGB555, PixelFormat::RGB555));
        assert!(b.supports(PixelFormat::RGBA32, PixelFormat::ARGB32));
        assert!(!b.supports(PixelFormat::RGB565, PixelFormat::RGB555));
        assert!(!b.supports(PixelFormat::Indexed8, PixelFormat::Indexed8));
        assert!(!b.supports(PixelFormat::RGBA32, PixelFormat::RGB565));

        let p = PointScaler::new();
        assert!(p.supports(PixelFormat::Indexed8, PixelFormat::Indexed8));
        assert!(!p.supports(PixelFormat::RGB565, PixelFormat::RGB555));
    }

    #[test]
    fn test_bilinear_rgba_to_argb() {
        let src = checker(PixelFormat::RGBA32);
        let mut dst = Surface::new(8, 8, PixelFormat::ARGB32).unwrap();
        let bounds = dst.bounds();
        BilinearScaler::new()
            .scale(&src, src.bounds(), &mut dst, bounds, true)
            .unwrap();
        assert_eq!(dst.pixel(0, 0), Some(0xffff_ffff));
        assert_eq!(dst.pixel_rgb(1, 0), Some([127, 127, 127]));
        assert_eq!(dst.pixel_rgb(2, 0), Some([0, 0, 0]));
    }

    #[test]
    fn test_point_rgba_to_bgra() {
        let mut src = Surface::new(1, 1, PixelFormat::RGBA32).unwrap();
        src.set_pixel_rgb(0, 0, [255, 0, 0]);
        let mut dst = Surface::new(2, 2, PixelFormat::BGRA32).unwrap();
        let bounds = dst.bounds();
        PointScaler::new()
            .scale(&src, src.bounds(), &mut dst, bounds, false)
            .unwrap();
        assert_eq!(dst.pixel(1, 1), Some(0x0000_ffff));
        assert_eq!(dst.pixel_rgb(0, 1), Some([255, 0, 0]));
    }

    #[test]
    fn test_indexed_source_to_565() {
        let mut src = Surface::new(2, 2, PixelFormat::Indexed8).unwrap();
        let mut pal = Palette::new();
        pal.set(1, [255, 0, 0]);
        src.set_palette(pal);
        src.set_pixel(0, 0, 1);
        let mut dst = Surface::new(4, 4, PixelFormat::RGB565).unwrap();
        let bounds = dst.bounds();
        let ran = ScalerSet::new()
            .scale(ScalerType::Bilinear, &src, src.bounds(), &mut dst, bounds, true)
            .unwrap();
        assert_eq!(ran, ScalerType::Bilinear);
        assert_eq!(dst.pixel(0, 0), Some(0xf800));
        assert_eq!(dst.pixel(3, 3), Some(0));
    }

    #[test]
    fn test_missing_palette() {
        let mut src = Surface::new(2, 2, PixelFormat::Indexed8).unwrap();
        src.clear_palette();
        let mut dst = Surface::new(4, 4, PixelFormat::RGBA32).unwrap();
        let bounds = dst.bounds();
        let err = BilinearScaler::new()
            .scale(&src, src.bounds(), &mut dst, bounds, true)
            .unwrap_err();
        assert_eq!(err, ScaleError::MissingPalette);

        // Index copies never need one
        let mut indexed = Surface::new(4, 4, PixelFormat::Indexed8).unwrap();
        let indexed_bounds = indexed.bounds();
        assert!(PointScaler::new()
            .scale(&src, src.bounds(), &mut indexed, indexed_bounds, true)
            .is_ok());
    }

    #[test]
    fn test_fallback_to_point_for_indexed_output() {
        let mut src = Surface::new(2, 1, PixelFormat::Indexed8).unwrap();
        src.set_pixel(0, 0, 5);
        src.set_pixel(1, 0, 9);
        let mut dst = Surface::new(4, 2, PixelFormat::Indexed8).unwrap();
        let bounds = dst.bounds();
        let ran = ScalerSet::new()
            .scale(ScalerType::Bilinear, &src, src.bounds(), &mut dst, bounds, false)
            .unwrap();
        assert_eq!(ran, ScalerType::Point);
        let row: Vec<u32> = (0..4).filter_map(|x| dst.pixel(x, 1)).collect();
        assert_eq!(row, vec![5, 5, 9, 9]);
    }

    #[test]
    fn test_unsupported_pair_is_an_error() {
        let src = checker(PixelFormat::RGB565);
        let mut dst = Surface::new(4, 4, PixelFormat::RGB555).unwrap();
        let bounds = dst.bounds();
        let err = ScalerSet::new()
            .scale(ScalerType::Bilinear, &src, src.bounds(), &mut dst, bounds, true)
            .unwrap_err();
        assert!(matches!(err, ScaleError::UnsupportedFormats { scaler: "point", .. }));
    }

    #[test]
    fn test_dest_rect_out_of_bounds() {
        let src = checker(PixelFormat::RGBA32);
        let mut dst = Surface::new(4, 4, PixelFormat::RGBA32).unwrap();
        let err = ScalerSet::new()
            .scale(ScalerType::Point, &src, src.bounds(), &mut dst, Rect::new(2, 2, 4, 4), true)
            .unwrap_err();
        assert!(matches!(err, ScaleError::Surface(SurfaceError::RectOutOfBounds(_))));
    }

    #[test]
    fn test_forced_kernel_scaler_set() {
        let src = checker(PixelFormat::RGBA32);
        let mut auto = Surface::new(8, 8, PixelFormat::RGBA32).unwrap();
        let auto_bounds = auto.bounds();
        let mut forced = Surface::new(8, 8, PixelFormat::RGBA32).unwrap();
        let forced_bounds = forced.bounds();
        ScalerSet::new()
            .scale(ScalerType::Bilinear, &src, src.bounds(), &mut auto, auto_bounds, true)
            .unwrap();
        ScalerSet::with_kernel(KernelChoice::Force(BilinearKernel::Arbitrary))
            .scale(ScalerType::Bilinear, &src, src.bounds(), &mut forced, forced_bounds, true)
            .unwrap();
        assert_eq!(auto.pixels(), forced.pixels());
    }
}
