//! Pixel manipulators
//!
//! A manipulator converts between a stored source pixel and an unpacked RGB
//! [`Texel`], and packs RGB back into the destination encoding. The scaler
//! kernels are generic over a manipulator, so each (source format, dest
//! format) pair gets its own monomorphized kernel with the conversion
//! inlined into the pixel loop.

use crate::graphics::surface::{ChannelLayout, Palette, PixelWord};

/// Unpacked `[r, g, b]` source pixel
pub type Texel = [u8; 3];

/// Conversion strategy between a source and a destination pixel encoding
pub trait PixelManip {
    type Source: PixelWord;
    type Dest: PixelWord;

    /// Unpack a stored source pixel
    fn split_source(&self, px: Self::Source) -> Texel;

    /// Pack three channels into the destination encoding
    fn rgb(&self, r: u8, g: u8, b: u8) -> Self::Dest;
}

// ==============================================================================
// Indexed sources
// ==============================================================================

/// Palette index to 32-bit truecolor
#[derive(Debug, Clone, Copy)]
pub struct Manip8to32<'p> {
    palette: &'p Palette,
    layout: ChannelLayout,
}

impl<'p> Manip8to32<'p> {
    pub fn new(palette: &'p Palette, layout: ChannelLayout) -> Self {
        Self { palette, layout }
    }
}

impl PixelManip for Manip8to32<'_> {
    type Source = u8;
    type Dest = u32;

    #[inline(always)]
    fn split_source(&self, px: u8) -> Texel {
        self.palette.get(px)
    }

    #[inline(always)]
    fn rgb(&self, r: u8, g: u8, b: u8) -> u32 {
        self.layout.encode(r, g, b)
    }
}

/// Palette index to an arbitrary 16-bit layout
#[derive(Debug, Clone, Copy)]
pub struct Manip8to16<'p> {
    palette: &'p Palette,
    layout: ChannelLayout,
}

impl<'p> Manip8to16<'p> {
    pub fn new(palette: &'p Palette, layout: ChannelLayout) -> Self {
        Self { palette, layout }
    }
}

impl PixelManip for Manip8to16<'_> {
    type Source = u8;
    type Dest = u16;

    #[inline(always)]
    fn split_source(&self, px: u8) -> Texel {
        self.palette.get(px)
    }

    #[inline(always)]
    fn rgb(&self, r: u8, g: u8, b: u8) -> u16 {
        self.layout.encode(r, g, b) as u16
    }
}

/// Palette index to RGB565
#[derive(Debug, Clone, Copy)]
pub struct Manip8to565<'p> {
    palette: &'p Palette,
}

impl<'p> Manip8to565<'p> {
    pub fn new(palette: &'p Palette) -> Self {
        Self { palette }
    }
}

impl PixelManip for Manip8to565<'_> {
    type Source = u8;
    type Dest = u16;

    #[inline(always)]
    fn split_source(&self, px: u8) -> Texel {
        self.palette.get(px)
    }

    #[inline(always)]
    fn rgb(&self, r: u8, g: u8, b: u8) -> u16 {
        (((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3)
    }
}

/// Palette index to RGB555
#[derive(Debug, Clone, Copy)]
pub struct Manip8to555<'p> {
    palette: &'p Palette,
}

impl<'p> Manip8to555<'p> {
    pub fn new(palette: &'p Palette) -> Self {
        Self { palette }
    }
}

impl PixelManip for Manip8to555<'_> {
    type Source = u8;
    type Dest = u16;

    #[inline(always)]
    fn split_source(&self, px: u8) -> Texel {
        self.palette.get(px)
    }

    #[inline(always)]
    fn rgb(&self, r: u8, g: u8, b: u8) -> u16 {
        (((r as u16) >> 3) << 10) | (((g as u16) >> 3) << 5) | ((b as u16) >> 3)
    }
}

// ==============================================================================
// Truecolor sources
// ==============================================================================

/// RGB565 to RGB565
#[derive(Debug, Clone, Copy, Default)]
pub struct Manip565to565;

impl PixelManip for Manip565to565 {
    type Source = u16;
    type Dest = u16;

    #[inline(always)]
    fn split_source(&self, px: u16) -> Texel {
        [
            ((px >> 8) & 0xf8) as u8,
            ((px >> 3) & 0xfc) as u8,
            ((px << 3) & 0xf8) as u8,
        ]
    }

    #[inline(always)]
    fn rgb(&self, r: u8, g: u8, b: u8) -> u16 {
        (((r as u16) >> 3) << 11) | (((g as u16) >> 2) << 5) | ((b as u16) >> 3)
    }
}

/// RGB555 to RGB555
#[derive(Debug, Clone, Copy, Default)]
pub struct Manip555to555;

impl PixelManip for Manip555to555 {
    type Source = u16;
    type Dest = u16;

    #[inline(always)]
    fn split_source(&self, px: u16) -> Texel {
        [
            ((px >> 7) & 0xf8) as u8,
            ((px >> 2) & 0xf8) as u8,
            ((px << 3) & 0xf8) as u8,
        ]
    }

    #[inline(always)]
    fn rgb(&self, r: u8, g: u8, b: u8) -> u16 {
        (((r as u16) >> 3) << 10) | (((g as u16) >> 3) << 5) | ((b as u16) >> 3)
    }
}

/// Any 16-bit layout to the same layout
#[derive(Debug, Clone, Copy)]
pub struct Manip16to16 {
    layout: ChannelLayout,
}

impl Manip16to16 {
    pub fn new(layout: ChannelLayout) -> Self {
        Self { layout }
    }
}

impl PixelManip for Manip16to16 {
    type Source = u16;
    type Dest = u16;

    #[inline(always)]
    fn split_source(&self, px: u16) -> Texel {
        self.layout.decode(px as u32)
    }

    #[inline(always)]
    fn rgb(&self, r: u8, g: u8, b: u8) -> u16 {
        self.layout.encode(r, g, b) as u16
    }
}

/// 32-bit truecolor to 32-bit truecolor, possibly swizzling channels
#[derive(Debug, Clone, Copy)]
pub struct Manip32to32 {
    src: ChannelLayout,
    dst: ChannelLayout,
}

impl Manip32to32 {
    pub fn new(src: ChannelLayout, dst: ChannelLayout) -> Self {
        Self { src, dst }
    }
}

impl PixelManip for Manip32to32 {
    type Source = u32;
    type Dest = u32;

    #[inline(always)]
    fn split_source(&self, px: u32) -> Texel {
        self.src.decode(px)
    }

    #[inline(always)]
    fn rgb(&self, r: u8, g: u8, b: u8) -> u32 {
        self.dst.encode(r, g, b)
    }
}
