//! Exact 2x bilinear scaling
//!
//! At 2x there are only two fractional positions per source pixel, so every
//! 2x2 source block expands to 2x2 destination pixels per source line pair
//! with the constant factors 256 and 128.

use super::block::{stream_pairs, BlockEmitter, BlockPlan, TexelColumn};
use super::interp::interpolate_run2;
use crate::graphics::manip::PixelManip;
use crate::graphics::surface::{DestView, Rect, SourceView};

const LINES: usize = 4;

struct X2Emitter {
    col: usize,
    row: usize,
}

impl<M: PixelManip> BlockEmitter<M, { LINES + 1 }> for X2Emitter {
    #[inline(always)]
    fn emit<const CLIP: bool>(
        &mut self,
        manip: &M,
        dst: &mut DestView<'_>,
        left: &TexelColumn<{ LINES + 1 }>,
        right: &TexelColumn<{ LINES + 1 }>,
    ) {
        for pair in 0..LINES {
            let (tl, bl) = left.pair(pair);
            let (tr, br) = right.pair(pair);
            let y = self.row + pair * 2;
            interpolate_run2::<M, CLIP>(manip, dst, self.col, y, (tl, bl, tr, br), 256, 128, 256);
            interpolate_run2::<M, CLIP>(manip, dst, self.col, y + 1, (tl, bl, tr, br), 256, 128, 128);
        }
        self.col += 2;
    }

    fn end_band(&mut self) {
        self.row += LINES * 2;
        self.col = 0;
    }
}

/// Scale `rect` to exactly twice its size into `dst`.
pub fn scale_x2<M: PixelManip>(
    manip: &M,
    src: &SourceView<'_>,
    rect: Rect,
    dst: &mut DestView<'_>,
    clamp_src: bool,
) -> bool {
    debug_assert!(rect.w * 2 == dst.width() && rect.h * 2 == dst.height());
    let plan = BlockPlan::new(src, rect, LINES, 2, clamp_src);
    let mut emitter = X2Emitter { col: 0, row: 0 };
    stream_pairs::<M, _, { LINES + 1 }>(manip, src, rect, &plan, dst, &mut emitter);
    true
}
