//! 2x horizontal, 2.4x vertical bilinear scaling
//!
//! Aspect correction for 320x200 style sources: five source lines become
//! twelve destination rows. Destination row `k` of a band samples source
//! position `k * 5 / 12`, so the vertical factors are known constants.

use super::block::{stream_pairs, BlockEmitter, BlockPlan, TexelColumn};
use super::interp::interpolate_run2;
use crate::graphics::manip::PixelManip;
use crate::graphics::surface::{DestView, Rect, SourceView};

const LINES: usize = 5;
const DEST_ROWS: usize = 12;

const fn factor(k: u32) -> u32 {
    (0x500 * k / 12) & 0xff
}

/// `(source pair, vertical factor)` for each destination row of a band
const ROWS: [(usize, u32); DEST_ROWS] = [
    (0, 256),
    (0, factor(11)),
    (0, factor(10)),
    (1, factor(9)),
    (1, factor(8)),
    (2, factor(7)),
    (2, factor(6)),
    (2, factor(5)),
    (3, factor(4)),
    (3, factor(3)),
    (4, factor(2)),
    (4, factor(1)),
];

struct X2Y24Emitter {
    col: usize,
    row: usize,
}

impl<M: PixelManip> BlockEmitter<M, { LINES + 1 }> for X2Y24Emitter {
    #[inline(always)]
    fn emit<const CLIP: bool>(
        &mut self,
        manip: &M,
        dst: &mut DestView<'_>,
        left: &TexelColumn<{ LINES + 1 }>,
        right: &TexelColumn<{ LINES + 1 }>,
    ) {
        for (i, &(pair, fy)) in ROWS.iter().enumerate() {
            let (tl, bl) = left.pair(pair);
            let (tr, br) = right.pair(pair);
            interpolate_run2::<M, CLIP>(manip, dst, self.col, self.row + i, (tl, bl, tr, br), 256, 128, fy);
        }
        self.col += 2;
    }

    fn end_band(&mut self) {
        self.row += DEST_ROWS;
        self.col = 0;
    }
}

/// Scale `rect` by 2 horizontally and 2.4 vertically into `dst`.
///
/// `rect.h` must be a multiple of 5.
pub fn scale_x2y24<M: PixelManip>(
    manip: &M,
    src: &SourceView<'_>,
    rect: Rect,
    dst: &mut DestView<'_>,
    clamp_src: bool,
) -> bool {
    debug_assert!(rect.w * 2 == dst.width() && dst.height() * 5 == rect.h * 12);
    let plan = BlockPlan::new(src, rect, LINES, 2, clamp_src);
    let mut emitter = X2Y24Emitter { col: 0, row: 0 };
    stream_pairs::<M, _, { LINES + 1 }>(manip, src, rect, &plan, dst, &mut emitter);
    true
}
