//! Fixed-point interpolation primitives shared by every bilinear kernel

use crate::graphics::manip::{PixelManip, Texel};
use crate::graphics::surface::DestView;

/// Unsigned 16.16 fixed-point value
pub type Fixed1616 = u32;

/// One source pixel in 16.16
pub const FIXED_ONE: Fixed1616 = 1 << 16;

/// Linear blend with an 8-bit factor, result shifted left by 8.
///
/// `fac == 256` yields `a`, `fac == 0` yields `b`.
#[inline(always)]
pub fn lerp8(a: u32, b: u32, fac: u32) -> u32 {
    (b << 8).wrapping_add(a.wrapping_sub(b).wrapping_mul(fac))
}

/// Linear blend with a 16-bit factor, result shifted left by 16.
///
/// `fac == 65536` yields `a`, `fac == 0` yields `b`.
#[inline(always)]
pub fn lerp16(a: u32, b: u32, fac: u32) -> u32 {
    (b << 16).wrapping_add(a.wrapping_sub(b).wrapping_mul(fac))
}

/// Blend the 2x2 block `tl tr / bl br` at `(fx, fy)`, both in `0..=256`.
#[inline(always)]
pub fn interpolate_one<M: PixelManip>(
    manip: &M,
    tl: &Texel,
    bl: &Texel,
    tr: &Texel,
    br: &Texel,
    fx: u32,
    fy: u32,
) -> M::Dest {
    let ch = |i: usize| {
        let top = lerp8(tl[i] as u32, tr[i] as u32, fx);
        let bottom = lerp8(bl[i] as u32, br[i] as u32, fx);
        (lerp8(top, bottom, fy) >> 16) as u8
    };
    manip.rgb(ch(0), ch(1), ch(2))
}

/// Like [`interpolate_one`] with a full 16-bit horizontal factor
/// (`0..=65536`), as derived from 16.16 position deltas.
#[inline(always)]
pub fn interpolate_one_fine<M: PixelManip>(
    manip: &M,
    tl: &Texel,
    bl: &Texel,
    tr: &Texel,
    br: &Texel,
    fx: u32,
    fy: u32,
) -> M::Dest {
    let ch = |i: usize| {
        let top = lerp16(tl[i] as u32, tr[i] as u32, fx) >> 8;
        let bottom = lerp16(bl[i] as u32, br[i] as u32, fx) >> 8;
        (lerp8(top, bottom, fy) >> 16) as u8
    };
    manip.rgb(ch(0), ch(1), ch(2))
}

/// Store one pixel; `CLIP` selects the limit-checked store.
#[inline(always)]
pub fn write_pixel<M: PixelManip, const CLIP: bool>(
    dst: &mut DestView<'_>,
    x: usize,
    y: usize,
    px: M::Dest,
) {
    if CLIP {
        dst.put_clipped(x, y, px);
    } else {
        dst.put(x, y, px);
    }
}

/// Write two horizontally adjacent pixels at `(x, y)` and `(x + 1, y)` with
/// separate horizontal factors and a shared vertical factor.
#[inline(always)]
#[allow(clippy::too_many_arguments)]
pub fn interpolate_run2<M: PixelManip, const CLIP: bool>(
    manip: &M,
    dst: &mut DestView<'_>,
    x: usize,
    y: usize,
    (tl, bl, tr, br): (&Texel, &Texel, &Texel, &Texel),
    fx1: u32,
    fx2: u32,
    fy: u32,
) {
    let left = interpolate_one(manip, tl, bl, tr, br, fx1, fy);
    write_pixel::<M, CLIP>(dst, x, y, left);
    let right = interpolate_one(manip, tl, bl, tr, br, fx2, fy);
    write_pixel::<M, CLIP>(dst, x + 1, y, right);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::manip::Manip32to32;
    use crate::graphics::surface::ChannelLayout;

    fn manip() -> Manip32to32 {
        Manip32to32::new(ChannelLayout::RGBA8888, ChannelLayout::RGBA8888)
    }

    #[test]
    fn test_lerp8_endpoints() {
        assert_eq!(lerp8(200, 10, 256), 200 << 8);
        assert_eq!(lerp8(200, 10, 0), 10 << 8);
        assert_eq!(lerp8(10, 200, 128), 105 << 8);
    }

    #[test]
    fn test_lerp16_endpoints() {
        assert_eq!(lerp16(200, 10, 65536), 200 << 16);
        assert_eq!(lerp16(200, 10, 0), 10 << 16);
        assert_eq!(lerp16(0, 255, 32768), 255 << 15);
    }

    #[test]
    fn test_nested_lerp_recovers_channel() {
        let v = lerp8(lerp8(77, 3, 256), lerp8(1, 2, 256), 256) >> 16;
        assert_eq!(v, 77);
    }

    #[test]
    fn test_interpolate_corners() {
        let m = manip();
        let (tl, bl, tr, br) = ([255, 0, 0], [0, 255, 0], [0, 0, 255], [9, 9, 9]);
        let decode = |px| ChannelLayout::RGBA8888.decode(px);
        assert_eq!(decode(interpolate_one(&m, &tl, &bl, &tr, &br, 256, 256)), tl);
        assert_eq!(decode(interpolate_one(&m, &tl, &bl, &tr, &br, 0, 256)), tr);
        assert_eq!(decode(interpolate_one(&m, &tl, &bl, &tr, &br, 256, 0)), bl);
        assert_eq!(decode(interpolate_one(&m, &tl, &bl, &tr, &br, 0, 0)), br);
        assert_eq!(decode(interpolate_one(&m, &tl, &tl, &tr, &tr, 128, 77)), [127, 0, 127]);
    }

    #[test]
    fn test_fine_matches_coarse_on_whole_steps() {
        let m = manip();
        let (tl, bl, tr, br) = ([200, 17, 3], [0, 99, 250], [41, 41, 41], [255, 255, 0]);
        for fx in [0u32, 64, 128, 255, 256] {
            for fy in [0u32, 1, 128, 256] {
                assert_eq!(
                    interpolate_one_fine(&m, &tl, &bl, &tr, &br, fx << 8, fy),
                    interpolate_one(&m, &tl, &bl, &tr, &br, fx, fy)
                );
            }
        }
    }

    #[test]
    fn test_run2_writes_two_pixels() {
        let m = manip();
        let mut buf = vec![0u8; 4 * 3];
        let mut dst = DestView::new(&mut buf, 3, 1, 12, 4).unwrap();
        let t = [50, 60, 70];
        interpolate_run2::<_, true>(&m, &mut dst, 1, 0, (&t, &t, &t, &t), 256, 128, 256);
        interpolate_run2::<_, true>(&m, &mut dst, 2, 0, (&t, &t, &t, &t), 256, 128, 256);
        assert_eq!(dst.get::<u32>(0, 0), Some(0));
        assert_eq!(dst.get::<u32>(1, 0), Some(0xff46_3c32));
        assert_eq!(dst.get::<u32>(2, 0), Some(0xff46_3c32));
    }
}
