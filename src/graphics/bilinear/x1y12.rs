//! 1x horizontal, 1.2x vertical bilinear scaling
//!
//! Aspect correction without zoom: every column is streamed on its own and
//! five source lines become six destination rows.

use super::block::{stream_columns, BlockEmitter, BlockPlan, TexelColumn};
use super::interp::{interpolate_one, write_pixel};
use crate::graphics::manip::PixelManip;
use crate::graphics::surface::{DestView, Rect, SourceView};

const LINES: usize = 5;
const DEST_ROWS: usize = 6;

const fn factor(k: u32) -> u32 {
    (0x500 * k / 6) & 0xff
}

const ROWS: [(usize, u32); DEST_ROWS] = [
    (0, 256),
    (0, factor(5)),
    (1, factor(4)),
    (2, factor(3)),
    (3, factor(2)),
    (4, factor(1)),
];

struct X1Y12Emitter {
    col: usize,
    row: usize,
}

impl<M: PixelManip> BlockEmitter<M, { LINES + 1 }> for X1Y12Emitter {
    #[inline(always)]
    fn emit<const CLIP: bool>(
        &mut self,
        manip: &M,
        dst: &mut DestView<'_>,
        column: &TexelColumn<{ LINES + 1 }>,
        _: &TexelColumn<{ LINES + 1 }>,
    ) {
        for (i, &(pair, fy)) in ROWS.iter().enumerate() {
            let (top, bottom) = column.pair(pair);
            // fx = 256 takes only the left column
            let px = interpolate_one(manip, top, bottom, top, bottom, 256, fy);
            write_pixel::<M, CLIP>(dst, self.col, self.row + i, px);
        }
        self.col += 1;
    }

    fn end_band(&mut self) {
        self.row += DEST_ROWS;
        self.col = 0;
    }
}

/// Scale `rect` by 1.2 vertically into `dst`, keeping its width.
///
/// `rect.h` must be a multiple of 5.
pub fn scale_x1y12<M: PixelManip>(
    manip: &M,
    src: &SourceView<'_>,
    rect: Rect,
    dst: &mut DestView<'_>,
    clamp_src: bool,
) -> bool {
    debug_assert!(rect.w == dst.width() && dst.height() * 5 == rect.h * 6);
    let plan = BlockPlan::new(src, rect, LINES, 1, clamp_src);
    let mut emitter = X1Y12Emitter { col: 0, row: 0 };
    stream_columns::<M, _, { LINES + 1 }>(manip, src, rect, &plan, dst, &mut emitter);
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::manip::Manip32to32;
    use crate::graphics::surface::ChannelLayout;

    #[test]
    fn test_row_factors() {
        let factors: Vec<u32> = ROWS.iter().map(|&(_, f)| f).collect();
        assert_eq!(factors, [256, 42, 85, 128, 170, 213]);
    }

    #[test]
    fn test_x1y12_ten_by_five() {
        let layout = ChannelLayout::RGBA8888;
        let m = Manip32to32::new(layout, layout);
        let mut px = Vec::new();
        for y in 0..5u8 {
            for x in 0..10u8 {
                px.extend_from_slice(&layout.encode(x * 20, y * 50, 7).to_ne_bytes());
            }
        }
        let src = SourceView::new(&px, 10, 5, 40, 4).unwrap();
        let mut out = vec![0u8; 10 * 6 * 4];
        let mut dst = DestView::new(&mut out, 10, 6, 40, 4).unwrap();
        assert!(scale_x1y12(&m, &src, Rect::sized(10, 5), &mut dst, false));

        for x in 0..10 {
            let top = layout.decode(dst.get::<u32>(x, 0).unwrap());
            assert_eq!(top, [x as u8 * 20, 0, 7]);
            let bottom = layout.decode(dst.get::<u32>(x, 5).unwrap());
            assert_eq!(bottom, [x as u8 * 20, 200, 7]);
        }
    }

    #[test]
    fn test_x1y12_padded_source_band() {
        // 10 source lines of a taller surface: one full band then the final one
        let layout = ChannelLayout::RGBA8888;
        let m = Manip32to32::new(layout, layout);
        let px: Vec<u8> = (0..4 * 12)
            .flat_map(|i| layout.encode(0, (i / 4) as u8 * 10, 0).to_ne_bytes())
            .collect();
        let src = SourceView::new(&px, 4, 12, 16, 4).unwrap();
        let mut out = vec![0u8; 4 * 12 * 4];
        let mut dst = DestView::new(&mut out, 4, 12, 16, 4).unwrap();
        assert!(scale_x1y12(&m, &src, Rect::sized(4, 10), &mut dst, false));
        let green: Vec<u8> = (0..12).map(|y| layout.decode(dst.get::<u32>(2, y).unwrap())[1]).collect();
        assert_eq!(green[0], 0);
        assert_eq!(green[6], 50);
        assert!(green.windows(2).all(|w| w[0] <= w[1]), "{green:?}");
    }
}
