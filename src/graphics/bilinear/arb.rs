//! Arbitrary ratio bilinear scaling
//!
//! Destination pixels are placed by 16.16 source positions advancing by
//! `add = (s << 16) / d` per destination pixel. Positions start at
//! `(s << 16) - add * d` so the last destination pixel lands exactly on the
//! last source pixel. A block between source columns `i` and `i + 1` owns
//! every destination column whose position lies before `end_x`; the same
//! holds vertically for each line pair with `end_y`. Filter factors come from
//! the distance to that end.

use super::block::{stream_pairs, BlockEmitter, BlockPlan, TexelColumn};
use super::interp::{interpolate_one_fine, write_pixel, Fixed1616, FIXED_ONE};
use crate::graphics::manip::PixelManip;
use crate::graphics::surface::{DestView, Rect, SourceView, MAX_DIMENSION};

const LINES: usize = 4;

/// Position increment and start offset for mapping `s` source pixels onto `d`
fn axis_step(s: usize, d: usize) -> (Fixed1616, Fixed1616) {
    let span = (s as Fixed1616) << 16;
    let add = span / d as Fixed1616;
    // The truncation remainder of `add`. It can leave the first sample just
    // short of a whole texel (fy 255 on row 0 at 5 -> 12), so the aspect
    // kernels, which start on exact factors, agree with this one within 1.
    let mut start = span - add * d as Fixed1616;
    // Center the samples on exact 2:1 reductions
    if s == d * 2 {
        start += 0x8000;
    }
    (add, start)
}

struct ArbEmitter {
    add_x: Fixed1616,
    add_y: Fixed1616,
    start_x: Fixed1616,

    end_x: Fixed1616,
    end_y: Fixed1616,
    block_start_x: Fixed1616,
    block_start_y: Fixed1616,
    pos_y: Fixed1616,

    col: usize,
    band_row: usize,
    band_rows: usize,
}

impl ArbEmitter {
    fn new(sw: usize, sh: usize, dw: usize, dh: usize) -> Self {
        let (add_x, start_x) = axis_step(sw, dw);
        let (add_y, start_y) = axis_step(sh, dh);
        Self {
            add_x,
            add_y,
            start_x,
            end_x: FIXED_ONE,
            end_y: FIXED_ONE,
            block_start_x: start_x,
            block_start_y: start_y,
            pos_y: start_y,
            col: 0,
            band_row: 0,
            band_rows: 0,
        }
    }
}

impl<M: PixelManip> BlockEmitter<M, { LINES + 1 }> for ArbEmitter {
    fn emit<const CLIP: bool>(
        &mut self,
        manip: &M,
        dst: &mut DestView<'_>,
        left: &TexelColumn<{ LINES + 1 }>,
        right: &TexelColumn<{ LINES + 1 }>,
    ) {
        // Destination columns owned by this block
        let mut cols = 0;
        let mut next_x = self.block_start_x;
        while next_x < self.end_x {
            next_x += self.add_x;
            cols += 1;
        }

        let mut posy = self.block_start_y;
        let mut row = self.band_row;
        for pair in 0..LINES {
            let (tl, bl) = left.pair(pair);
            let (tr, br) = right.pair(pair);
            while posy < self.end_y && (!CLIP || row < dst.height()) {
                let fy = (self.end_y - posy) >> 8;
                let mut posx = self.block_start_x;
                for c in 0..cols {
                    let px = interpolate_one_fine(manip, tl, bl, tr, br, self.end_x - posx, fy);
                    write_pixel::<M, CLIP>(dst, self.col + c, row, px);
                    posx += self.add_x;
                }
                row += 1;
                posy += self.add_y;
            }
            self.end_y += FIXED_ONE;
        }

        self.pos_y = posy;
        self.band_rows = row - self.band_row;
        self.end_y -= FIXED_ONE * LINES as Fixed1616;
        self.block_start_x = next_x;
        self.end_x += FIXED_ONE;
        self.col += cols;
    }

    fn end_band(&mut self) {
        self.block_start_y = self.pos_y;
        self.end_y += FIXED_ONE * LINES as Fixed1616;
        self.end_x = FIXED_ONE;
        self.block_start_x = self.start_x;
        self.band_row += self.band_rows;
        self.col = 0;
    }
}

/// Scale `rect` onto the full size of `dst` at any ratio.
pub fn scale_arbitrary<M: PixelManip>(
    manip: &M,
    src: &SourceView<'_>,
    rect: Rect,
    dst: &mut DestView<'_>,
    clamp_src: bool,
) -> bool {
    let (dw, dh) = (dst.width(), dst.height());
    debug_assert!(rect.w.max(rect.h).max(dw).max(dh) <= MAX_DIMENSION);
    let plan = BlockPlan::new(src, rect, LINES, 2, clamp_src);
    let mut emitter = ArbEmitter::new(rect.w, rect.h, dw, dh);
    stream_pairs::<M, _, { LINES + 1 }>(manip, src, rect, &plan, dst, &mut emitter);
    true
}
