//! Nearest-neighbour scaling at any ratio
//!
//! Used as the fallback scaler whenever bilinear filtering cannot handle a
//! format pair, e.g. palette-to-palette output.

use crate::graphics::manip::PixelManip;
use crate::graphics::surface::{DestView, PixelWord, Rect, SourceView};

/// Sample `rect` of `src` onto the whole of `dst`, converting each pixel
/// with `convert`.
///
/// Source positions advance in 16.16 steps and sample pixel centers, so
/// integer upscales replicate pixels exactly.
pub fn scale_point_with<S, D, F>(src: &SourceView<'_>, rect: Rect, dst: &mut DestView<'_>, convert: F) -> bool
where
    S: PixelWord,
    D: PixelWord,
    F: Fn(S) -> D,
{
    let Some((rect, dw, dh)) = rect.clip_scaled(src.width(), src.height(), dst.width(), dst.height())
    else {
        return true;
    };

    let add_x = ((rect.w as u32) << 16) / dw as u32;
    let add_y = ((rect.h as u32) << 16) / dh as u32;

    let mut pos_y = add_y / 2;
    for y in 0..dh {
        let sy = rect.y + ((pos_y >> 16) as usize).min(rect.h - 1);
        let mut pos_x = add_x / 2;
        for x in 0..dw {
            let sx = rect.x + ((pos_x >> 16) as usize).min(rect.w - 1);
            dst.put(x, y, convert(src.texel::<S>(sx, sy)));
            pos_x += add_x;
        }
        pos_y += add_y;
    }
    true
}

/// Nearest-neighbour scale through a pixel manipulator.
pub fn scale_point<M: PixelManip>(manip: &M, src: &SourceView<'_>, rect: Rect, dst: &mut DestView<'_>) -> bool {
    scale_point_with(src, rect, dst, |px: M::Source| {
        let [r, g, b] = manip.split_source(px);
        manip.rgb(r, g, b)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale_bytes(px: &[u8], w: usize, h: usize, dw: usize, dh: usize) -> Vec<u8> {
        let src = SourceView::new(px, w, h, w, 1).unwrap();
        let mut out = vec![0u8; dw * dh];
        let mut dst = DestView::new(&mut out, dw, dh, dw, 1).unwrap();
        assert!(scale_point_with(&src, Rect::sized(w, h), &mut dst, |p: u8| p));
        out
    }

    #[test]
    fn test_point_identity() {
        let px: Vec<u8> = (0..12).collect();
        assert_eq!(scale_bytes(&px, 4, 3, 4, 3), px);
    }

    #[test]
    fn test_point_doubles() {
        assert_eq!(scale_bytes(&[1, 2, 3, 4], 2, 2, 4, 4), vec![1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]);
    }

    #[test]
    fn test_point_halves() {
        assert_eq!(scale_bytes(&[1, 2, 3, 4, 5, 6], 6, 1, 3, 1), vec![2, 4, 6]);
    }

    #[test]
    fn test_point_odd_ratio_stays_in_rect() {
        let px: Vec<u8> = (0..5).collect();
        let out = scale_bytes(&px, 5, 1, 13, 1);
        assert_eq!(out[0], 0);
        assert_eq!(out[12], 4);
        assert!(out.windows(2).all(|w| w[0] <= w[1]));
    }
}
