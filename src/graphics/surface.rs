//! Pixel surfaces and the borrowed views the scalers operate on
//!
//! A [`Surface`] owns a pixel buffer together with its dimensions, row pitch
//! and [`PixelFormat`]. The scaler kernels never touch a `Surface` directly;
//! they read through a [`SourceView`] and write through a [`DestView`], both
//! of which are plain byte slices plus geometry. Every access goes through
//! slice indexing, so a geometry mistake panics instead of scribbling over
//! unrelated memory.

use std::fmt::Debug;

// ==============================================================================
// Errors
// ==============================================================================

/// Surface construction and view errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SurfaceError {
    #[error("invalid surface dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("pitch {pitch} is smaller than a row of {row_bytes} bytes")]
    PitchTooSmall { pitch: usize, row_bytes: usize },

    #[error("buffer of {len} bytes is too small, need {needed}")]
    BufferTooSmall { len: usize, needed: usize },

    #[error("rectangle {0:?} does not fit inside the surface")]
    RectOutOfBounds(Rect),
}

/// Largest width or height the 16.16 fixed-point scalers can address.
pub const MAX_DIMENSION: usize = 0x7fff;

// ==============================================================================
// Geometry
// ==============================================================================

/// Axis aligned rectangle in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    pub x: usize,
    pub y: usize,
    pub w: usize,
    pub h: usize,
}

impl Rect {
    pub const fn new(x: usize, y: usize, w: usize, h: usize) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle at the origin covering `w` by `h` pixels
    pub const fn sized(w: usize, h: usize) -> Self {
        Self { x: 0, y: 0, w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    pub fn right(&self) -> usize {
        self.x + self.w
    }

    pub fn bottom(&self) -> usize {
        self.y + self.h
    }

    /// Clip a source rectangle to a `width` x `height` surface, shrinking
    /// the destination size `(dw, dh)` in proportion.
    ///
    /// Returns `None` when nothing is left to scale.
    pub fn clip_scaled(
        self,
        width: usize,
        height: usize,
        dw: usize,
        dh: usize,
    ) -> Option<(Rect, usize, usize)> {
        if self.is_empty() || dw == 0 || dh == 0 {
            return None;
        }
        let (mut rect, mut dw, mut dh) = (self, dw, dh);
        if rect.bottom() > height {
            let nsh = height.saturating_sub(rect.y);
            dh = dh * nsh / rect.h;
            rect.h = nsh;
        }
        if rect.right() > width {
            let nsw = width.saturating_sub(rect.x);
            dw = dw * nsw / rect.w;
            rect.w = nsw;
        }
        if rect.is_empty() || dw == 0 || dh == 0 {
            return None;
        }
        Some((rect, dw, dh))
    }
}

// ==============================================================================
// Pixel formats
// ==============================================================================

/// Bit layout of a packed 16 or 32 bit truecolor pixel
///
/// A channel is stored as `(value >> loss) << shift`; `alpha` is OR'd into
/// every encoded pixel so 32-bit outputs come out opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelLayout {
    pub r_shift: u8,
    pub g_shift: u8,
    pub b_shift: u8,
    pub r_loss: u8,
    pub g_loss: u8,
    pub b_loss: u8,
    pub alpha: u32,
}

impl ChannelLayout {
    pub const RGB565: Self = Self::new16(11, 5, 0, 3, 2, 3);
    pub const RGB555: Self = Self::new16(10, 5, 0, 3, 3, 3);
    pub const BGR565: Self = Self::new16(0, 5, 11, 3, 2, 3);

    /// R in the low byte; matches `R G B A` in memory on little endian hosts.
    pub const RGBA8888: Self = Self::new32(0, 8, 16, 0xff00_0000);
    pub const ARGB8888: Self = Self::new32(16, 8, 0, 0xff00_0000);
    pub const BGRA8888: Self = Self::new32(8, 16, 24, 0x0000_00ff);

    const fn new16(r_shift: u8, g_shift: u8, b_shift: u8, r_loss: u8, g_loss: u8, b_loss: u8) -> Self {
        Self {
            r_shift,
            g_shift,
            b_shift,
            r_loss,
            g_loss,
            b_loss,
            alpha: 0,
        }
    }

    const fn new32(r_shift: u8, g_shift: u8, b_shift: u8, alpha: u32) -> Self {
        Self {
            r_shift,
            g_shift,
            b_shift,
            r_loss: 0,
            g_loss: 0,
            b_loss: 0,
            alpha,
        }
    }

    #[inline(always)]
    pub const fn encode(&self, r: u8, g: u8, b: u8) -> u32 {
        (((r >> self.r_loss) as u32) << self.r_shift)
            | (((g >> self.g_loss) as u32) << self.g_shift)
            | (((b >> self.b_loss) as u32) << self.b_shift)
            | self.alpha
    }

    #[inline(always)]
    pub const fn decode(&self, px: u32) -> [u8; 3] {
        [
            (((px >> self.r_shift) & (0xff >> self.r_loss)) << self.r_loss) as u8,
            (((px >> self.g_shift) & (0xff >> self.g_loss)) << self.g_loss) as u8,
            (((px >> self.b_shift) & (0xff >> self.b_loss)) << self.b_loss) as u8,
        ]
    }
}

/// Pixel encoding of a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8-bit palette index
    Indexed8,
    /// 16-bit packed truecolor
    Rgb16(ChannelLayout),
    /// 32-bit packed truecolor
    Rgb32(ChannelLayout),
}

impl PixelFormat {
    pub const RGB565: Self = PixelFormat::Rgb16(ChannelLayout::RGB565);
    pub const RGB555: Self = PixelFormat::Rgb16(ChannelLayout::RGB555);
    pub const RGBA32: Self = PixelFormat::Rgb32(ChannelLayout::RGBA8888);
    pub const ARGB32: Self = PixelFormat::Rgb32(ChannelLayout::ARGB8888);
    pub const BGRA32: Self = PixelFormat::Rgb32(ChannelLayout::BGRA8888);

    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            PixelFormat::Indexed8 => 1,
            PixelFormat::Rgb16(_) => 2,
            PixelFormat::Rgb32(_) => 4,
        }
    }

    pub fn is_indexed(&self) -> bool {
        matches!(self, PixelFormat::Indexed8)
    }

    /// Encode an RGB triple, `None` for indexed formats
    pub fn encode(&self, rgb: [u8; 3]) -> Option<u32> {
        match self {
            PixelFormat::Indexed8 => None,
            PixelFormat::Rgb16(layout) | PixelFormat::Rgb32(layout) => {
                Some(layout.encode(rgb[0], rgb[1], rgb[2]))
            }
        }
    }
}

// ==============================================================================
// Palette
// ==============================================================================

/// 256 entry RGB lookup table used by indexed surfaces
#[derive(Clone, PartialEq, Eq)]
pub struct Palette {
    colors: [[u8; 3]; 256],
}

impl Debug for Palette {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Palette").finish_non_exhaustive()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::grayscale()
    }
}

impl Palette {
    /// All black palette
    pub fn new() -> Self {
        Self {
            colors: [[0; 3]; 256],
        }
    }

    /// Index `i` maps to `(i, i, i)`
    pub fn grayscale() -> Self {
        let mut colors = [[0; 3]; 256];
        for (i, c) in colors.iter_mut().enumerate() {
            *c = [i as u8; 3];
        }
        Self { colors }
    }

    #[inline(always)]
    pub fn get(&self, index: u8) -> [u8; 3] {
        self.colors[index as usize]
    }

    pub fn set(&mut self, index: u8, rgb: [u8; 3]) {
        self.colors[index as usize] = rgb;
    }

    /// Index of the entry closest to `rgb` (squared distance)
    pub fn nearest(&self, rgb: [u8; 3]) -> u8 {
        let dist = |c: &[u8; 3]| {
            c.iter()
                .zip(rgb.iter())
                .map(|(&a, &b)| {
                    let d = a as i32 - b as i32;
                    (d * d) as u32
                })
                .sum::<u32>()
        };
        self.colors
            .iter()
            .enumerate()
            .min_by_key(|(_, c)| dist(c))
            .map(|(i, _)| i as u8)
            .unwrap_or(0)
    }
}

// ==============================================================================
// Pixel words
// ==============================================================================

/// Integer type holding one stored pixel
pub trait PixelWord: Copy + Debug + Default + Eq + Send + Sync + 'static {
    const SIZE: usize;

    fn load(bytes: &[u8]) -> Self;
    fn store(self, bytes: &mut [u8]);
    fn to_u32(self) -> u32;
    fn from_u32(value: u32) -> Self;
}

impl PixelWord for u8 {
    const SIZE: usize = 1;

    #[inline(always)]
    fn load(bytes: &[u8]) -> Self {
        bytes[0]
    }

    #[inline(always)]
    fn store(self, bytes: &mut [u8]) {
        bytes[0] = self;
    }

    fn to_u32(self) -> u32 {
        self as u32
    }

    fn from_u32(value: u32) -> Self {
        value as u8
    }
}

impl PixelWord for u16 {
    const SIZE: usize = 2;

    #[inline(always)]
    fn load(bytes: &[u8]) -> Self {
        u16::from_ne_bytes([bytes[0], bytes[1]])
    }

    #[inline(always)]
    fn store(self, bytes: &mut [u8]) {
        bytes[..2].copy_from_slice(&self.to_ne_bytes());
    }

    fn to_u32(self) -> u32 {
        self as u32
    }

    fn from_u32(value: u32) -> Self {
        value as u16
    }
}

impl PixelWord for u32 {
    const SIZE: usize = 4;

    #[inline(always)]
    fn load(bytes: &[u8]) -> Self {
        u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    #[inline(always)]
    fn store(self, bytes: &mut [u8]) {
        bytes[..4].copy_from_slice(&self.to_ne_bytes());
    }

    fn to_u32(self) -> u32 {
        self
    }

    fn from_u32(value: u32) -> Self {
        value
    }
}

// ==============================================================================
// Views
// ==============================================================================

fn check_geometry(
    len: usize,
    width: usize,
    height: usize,
    pitch: usize,
    bpp: usize,
) -> Result<(), SurfaceError> {
    let row_bytes = width * bpp;
    if pitch < row_bytes {
        return Err(SurfaceError::PitchTooSmall { pitch, row_bytes });
    }
    let needed = if height == 0 {
        0
    } else {
        (height - 1) * pitch + row_bytes
    };
    if len < needed {
        return Err(SurfaceError::BufferTooSmall { len, needed });
    }
    Ok(())
}

/// Read-only view of a whole source surface
#[derive(Debug, Clone, Copy)]
pub struct SourceView<'a> {
    pixels: &'a [u8],
    pitch: usize,
    width: usize,
    height: usize,
}

impl<'a> SourceView<'a> {
    /// `pitch` is in bytes; `bpp` is only used to validate the geometry.
    pub fn new(
        pixels: &'a [u8],
        width: usize,
        height: usize,
        pitch: usize,
        bpp: usize,
    ) -> Result<Self, SurfaceError> {
        check_geometry(pixels.len(), width, height, pitch, bpp)?;
        Ok(Self {
            pixels,
            pitch,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Load the pixel at `(x, y)`
    #[inline(always)]
    pub fn texel<P: PixelWord>(&self, x: usize, y: usize) -> P {
        debug_assert!(x < self.width && y < self.height, "read at {x},{y}");
        let off = y * self.pitch + x * P::SIZE;
        P::load(&self.pixels[off..off + P::SIZE])
    }
}

/// Writable view of a destination rectangle
///
/// `(0, 0)` is the top-left pixel of the rectangle. `width` and `height` are
/// the destination size the source is mapped onto.
#[derive(Debug)]
pub struct DestView<'a> {
    pixels: &'a mut [u8],
    pitch: usize,
    width: usize,
    height: usize,
}

impl<'a> DestView<'a> {
    pub fn new(
        pixels: &'a mut [u8],
        width: usize,
        height: usize,
        pitch: usize,
        bpp: usize,
    ) -> Result<Self, SurfaceError> {
        check_geometry(pixels.len(), width, height, pitch, bpp)?;
        Ok(Self {
            pixels,
            pitch,
            width,
            height,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    /// Reborrow the top-left `width` x `height` corner of this view
    pub fn shrink(&mut self, width: usize, height: usize) -> DestView<'_> {
        DestView {
            pixels: &mut *self.pixels,
            pitch: self.pitch,
            width: width.min(self.width),
            height: height.min(self.height),
        }
    }

    /// Split into two views at row `y` so both halves can be written at once
    pub fn split_at_row(self, y: usize) -> (DestView<'a>, DestView<'a>) {
        let y = y.min(self.height);
        let at = (y * self.pitch).min(self.pixels.len());
        let (top, bottom) = self.pixels.split_at_mut(at);
        (
            DestView {
                pixels: top,
                pitch: self.pitch,
                width: self.width,
                height: y,
            },
            DestView {
                pixels: bottom,
                pitch: self.pitch,
                width: self.width,
                height: self.height - y,
            },
        )
    }

    /// Store a pixel on a path whose geometry is exact
    #[inline(always)]
    pub fn put<P: PixelWord>(&mut self, x: usize, y: usize, px: P) {
        debug_assert!(x < self.width && y < self.height, "write at {x},{y}");
        let off = y * self.pitch + x * P::SIZE;
        px.store(&mut self.pixels[off..off + P::SIZE]);
    }

    /// Store a pixel only if it lands inside the view
    #[inline(always)]
    pub fn put_clipped<P: PixelWord>(&mut self, x: usize, y: usize, px: P) {
        if x >= self.width || y >= self.height {
            return;
        }
        let off = y * self.pitch + x * P::SIZE;
        if let Some(slot) = self.pixels.get_mut(off..off + P::SIZE) {
            px.store(slot);
        }
    }

    pub fn get<P: PixelWord>(&self, x: usize, y: usize) -> Option<P> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = y * self.pitch + x * P::SIZE;
        self.pixels.get(off..off + P::SIZE).map(P::load)
    }
}

// ==============================================================================
// Surface
// ==============================================================================

/// Owned pixel buffer
#[derive(Debug, Clone)]
pub struct Surface {
    width: usize,
    height: usize,
    pitch: usize,
    format: PixelFormat,
    palette: Option<Palette>,
    pixels: Vec<u8>,
}

impl Surface {
    /// Zeroed surface with a tightly packed pitch
    pub fn new(width: usize, height: usize, format: PixelFormat) -> Result<Self, SurfaceError> {
        Self::with_pitch(width, height, width * format.bytes_per_pixel(), format)
    }

    /// Zeroed surface with an explicit row pitch in bytes
    pub fn with_pitch(
        width: usize,
        height: usize,
        pitch: usize,
        format: PixelFormat,
    ) -> Result<Self, SurfaceError> {
        Self::validate(width, height)?;
        let bpp = format.bytes_per_pixel();
        if pitch < width * bpp {
            return Err(SurfaceError::PitchTooSmall {
                pitch,
                row_bytes: width * bpp,
            });
        }
        Ok(Self {
            width,
            height,
            pitch,
            format,
            palette: format.is_indexed().then(Palette::default),
            pixels: vec![0; pitch * height],
        })
    }

    /// Wrap an existing buffer of `pitch * height` bytes
    pub fn from_bytes(
        width: usize,
        height: usize,
        pitch: usize,
        format: PixelFormat,
        pixels: Vec<u8>,
    ) -> Result<Self, SurfaceError> {
        Self::validate(width, height)?;
        check_geometry(pixels.len(), width, height, pitch, format.bytes_per_pixel())?;
        Ok(Self {
            width,
            height,
            pitch,
            format,
            palette: format.is_indexed().then(Palette::default),
            pixels,
        })
    }

    fn validate(width: usize, height: usize) -> Result<(), SurfaceError> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(SurfaceError::InvalidDimensions { width, height });
        }
        Ok(())
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pitch(&self) -> usize {
        self.pitch
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn bounds(&self) -> Rect {
        Rect::sized(self.width, self.height)
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = Some(palette);
    }

    pub fn clear_palette(&mut self) {
        self.palette = None;
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    pub fn source_view(&self) -> SourceView<'_> {
        SourceView {
            pixels: &self.pixels,
            pitch: self.pitch,
            width: self.width,
            height: self.height,
        }
    }

    /// Writable view of `rect`, which must lie inside the surface
    pub fn dest_view(&mut self, rect: Rect) -> Result<DestView<'_>, SurfaceError> {
        if rect.right() > self.width || rect.bottom() > self.height {
            return Err(SurfaceError::RectOutOfBounds(rect));
        }
        let start = rect.y * self.pitch + rect.x * self.format.bytes_per_pixel();
        Ok(DestView {
            pixels: &mut self.pixels[start..],
            pitch: self.pitch,
            width: rect.w,
            height: rect.h,
        })
    }

    /// Raw stored value of the pixel at `(x, y)`
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let view = self.source_view();
        Some(match self.format {
            PixelFormat::Indexed8 => view.texel::<u8>(x, y) as u32,
            PixelFormat::Rgb16(_) => view.texel::<u16>(x, y) as u32,
            PixelFormat::Rgb32(_) => view.texel::<u32>(x, y),
        })
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, value: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let off = y * self.pitch + x * self.format.bytes_per_pixel();
        let slot = &mut self.pixels[off..];
        match self.format {
            PixelFormat::Indexed8 => u8::from_u32(value).store(slot),
            PixelFormat::Rgb16(_) => u16::from_u32(value).store(slot),
            PixelFormat::Rgb32(_) => value.store(slot),
        }
    }

    /// Decoded color of the pixel at `(x, y)`, looked up through the
    /// palette for indexed surfaces
    pub fn pixel_rgb(&self, x: usize, y: usize) -> Option<[u8; 3]> {
        let raw = self.pixel(x, y)?;
        match self.format {
            PixelFormat::Indexed8 => self.palette.as_ref().map(|p| p.get(raw as u8)),
            PixelFormat::Rgb16(layout) | PixelFormat::Rgb32(layout) => Some(layout.decode(raw)),
        }
    }

    /// Store an RGB color; indexed surfaces use the nearest palette entry.
    pub fn set_pixel_rgb(&mut self, x: usize, y: usize, rgb: [u8; 3]) {
        let value = match (self.format.encode(rgb), &self.palette) {
            (Some(v), _) => v,
            (None, Some(palette)) => palette.nearest(rgb) as u32,
            (None, None) => return,
        };
        self.set_pixel(x, y, value);
    }

    /// Fill every pixel with one color
    pub fn fill_rgb(&mut self, rgb: [u8; 3]) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.set_pixel_rgb(x, y, rgb);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_round_trip_565() {
        let layout = ChannelLayout::RGB565;
        let px = layout.encode(0xff, 0x80, 0x08);
        assert_eq!(px, 0xfc01);
        assert_eq!(layout.decode(px), [0xf8, 0x80, 0x08]);
    }

    #[test]
    fn test_layout_rgba_is_opaque() {
        let px = ChannelLayout::RGBA8888.encode(1, 2, 3);
        assert_eq!(px, 0xff03_0201);
        assert_eq!(ChannelLayout::RGBA8888.decode(px), [1, 2, 3]);
    }

    #[test]
    fn test_clip_scaled() {
        let inside = Rect::new(2, 2, 4, 4);
        assert_eq!(inside.clip_scaled(10, 10, 8, 8), Some((inside, 8, 8)));
        assert_eq!(
            Rect::new(0, 6, 10, 8).clip_scaled(10, 10, 20, 16),
            Some((Rect::new(0, 6, 10, 4), 20, 8))
        );
        assert_eq!(
            Rect::new(7, 0, 6, 4).clip_scaled(10, 10, 12, 4),
            Some((Rect::new(7, 0, 3, 4), 6, 4))
        );
        assert_eq!(Rect::new(12, 0, 4, 4).clip_scaled(10, 10, 8, 8), None);
        assert_eq!(Rect::new(0, 0, 4, 4).clip_scaled(10, 10, 0, 8), None);
    }

    #[test]
    fn test_surface_rejects_bad_geometry() {
        assert!(matches!(
            Surface::new(0, 4, PixelFormat::RGBA32),
            Err(SurfaceError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Surface::with_pitch(4, 4, 8, PixelFormat::RGBA32),
            Err(SurfaceError::PitchTooSmall { .. })
        ));
        assert!(matches!(
            Surface::from_bytes(4, 4, 16, PixelFormat::RGBA32, vec![0; 20]),
            Err(SurfaceError::BufferTooSmall { .. })
        ));
    }

    #[test]
    fn test_surface_pixel_access() {
        let mut s = Surface::with_pitch(3, 2, 16, PixelFormat::RGB565).unwrap();
        s.set_pixel_rgb(2, 1, [0xff, 0, 0]);
        assert_eq!(s.pixel(2, 1), Some(0xf800));
        assert_eq!(s.pixel_rgb(2, 1), Some([0xf8, 0, 0]));
        assert_eq!(s.pixel(3, 0), None);
    }

    #[test]
    fn test_indexed_surface_uses_palette() {
        let mut s = Surface::new(2, 2, PixelFormat::Indexed8).unwrap();
        let mut pal = Palette::new();
        pal.set(7, [10, 20, 30]);
        s.set_palette(pal);
        s.set_pixel_rgb(1, 1, [11, 19, 31]);
        assert_eq!(s.pixel(1, 1), Some(7));
        assert_eq!(s.pixel_rgb(1, 1), Some([10, 20, 30]));
    }

    #[test]
    fn test_dest_view_clipped_write() {
        let mut buf = vec![0u8; 8];
        let mut dst = DestView::new(&mut buf, 2, 2, 4, 2).unwrap();
        dst.put_clipped::<u16>(1, 1, 0xabcd);
        dst.put_clipped::<u16>(2, 1, 0x1111);
        dst.put_clipped::<u16>(0, 2, 0x2222);
        assert_eq!(dst.get::<u16>(1, 1), Some(0xabcd));
        assert_eq!(buf[..4], [0, 0, 0, 0]);
    }

    #[test]
    fn test_dest_view_split_rows() {
        let mut buf = vec![0u8; 4 * 3];
        let dst = DestView::new(&mut buf, 1, 3, 4, 4).unwrap();
        let (mut top, mut bottom) = dst.split_at_row(1);
        top.put::<u32>(0, 0, 1);
        bottom.put::<u32>(0, 1, 2);
        assert_eq!(top.height(), 1);
        assert_eq!(bottom.height(), 2);
        assert_eq!(u32::load(&buf[8..12]), 2);
    }

    #[test]
    fn test_palette_nearest() {
        let pal = Palette::grayscale();
        assert_eq!(pal.nearest([100, 100, 100]), 100);
        assert_eq!(pal.nearest([0, 0, 3]), 1);
    }
}
