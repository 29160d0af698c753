//! Texel windows and the band/block streaming shared by the kernels
//!
//! Every kernel walks the source rectangle in horizontal bands of `LINES`
//! source lines. Inside a band it reads one column of `LINES + 1` texels at a
//! time (the extra texel is the first line of the next band) and hands the
//! previous and the new column to an emitter, which writes the destination
//! pixels generated by that 2-column block. The right column then becomes
//! the left column of the next block, so every source column is read once
//! per band.

use crate::graphics::manip::{PixelManip, Texel};
use crate::graphics::surface::{DestView, Rect, SourceView};

/// One source column of `N` vertically adjacent texels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TexelColumn<const N: usize> {
    texels: [Texel; N],
}

impl<const N: usize> TexelColumn<N> {
    /// Read up to `available` texels downward from `(x, y)`.
    ///
    /// Slots that cannot be read repeat the last texel that was read, which
    /// clamps the bottom edge. `available` must be at least 1.
    #[inline(always)]
    pub fn read<M: PixelManip>(
        manip: &M,
        src: &SourceView<'_>,
        x: usize,
        y: usize,
        available: usize,
    ) -> Self {
        debug_assert!(available >= 1);
        let mut texels = [[0u8; 3]; N];
        let count = available.min(N);
        for (i, slot) in texels.iter_mut().enumerate().take(count) {
            *slot = manip.split_source(src.texel::<M::Source>(x, y + i));
        }
        for i in count.max(1)..N {
            texels[i] = texels[i - 1];
        }
        Self { texels }
    }

    /// Texels `i` and `i + 1`, the top and bottom of source pair `i`
    #[inline(always)]
    pub fn pair(&self, i: usize) -> (&Texel, &Texel) {
        (&self.texels[i], &self.texels[i + 1])
    }
}

impl<const N: usize> std::ops::Index<usize> for TexelColumn<N> {
    type Output = Texel;

    fn index(&self, i: usize) -> &Texel {
        &self.texels[i]
    }
}

/// Loop counts and clipping decisions for one kernel invocation
///
/// Computed once up front; the loops never re-evaluate them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockPlan {
    /// Bands streamed without any destination limit checks
    pub bands: usize,
    /// Two-column blocks per band in the unchecked part of a row
    pub blocks: usize,
    /// Right edge needs the duplicated-column tail
    pub clip_x: bool,
    /// Bottom edge needs the final limit-checked band
    pub clip_y: bool,
    /// Lines that may be read for the final band
    pub final_lines: usize,
}

impl BlockPlan {
    /// Plan a kernel that advances `lines` source lines and `block_width`
    /// source columns per block.
    ///
    /// With `clamp_src` unset the plan may read one column right of and one
    /// line below the rectangle when the surface has them.
    pub fn new(
        src: &SourceView<'_>,
        rect: Rect,
        lines: usize,
        block_width: usize,
        clamp_src: bool,
    ) -> Self {
        let (tex_w, tex_h) = (src.width(), src.height());
        let height = lines + 1;

        let mut bands = (rect.h - 1) / lines;
        let xloops = (rect.w - 1) / 2;

        let (blocks, clip_x) = if block_width == 1 {
            (rect.w, false)
        } else if rect.x + 3 + xloops * 2 < tex_w && !clamp_src && rect.w % 2 == 0 {
            (rect.w, false)
        } else {
            (xloops * 2, true)
        };

        let mut clip_y = true;
        if rect.y + height + bands * lines < tex_h && !clamp_src && rect.h % lines == 0 {
            bands += 1;
            clip_y = false;
        }
        // A full band needs `height` lines
        if rect.y + height > tex_h {
            bands = 0;
            clip_y = true;
        }

        let mut final_lines = 0;
        if clip_y {
            final_lines = match rect.h % lines {
                0 => lines,
                n => n,
            };
            let band_y = rect.y + bands * lines;
            if band_y + final_lines < tex_h && !clamp_src {
                final_lines = height.min(tex_h - band_y);
            }
        }

        Self {
            bands,
            blocks,
            clip_x,
            clip_y,
            final_lines,
        }
    }
}

/// Receives the 2-column blocks of a band
pub trait BlockEmitter<M: PixelManip, const N: usize> {
    /// Write the destination pixels between `left` and `right`.
    fn emit<const CLIP: bool>(
        &mut self,
        manip: &M,
        dst: &mut DestView<'_>,
        left: &TexelColumn<N>,
        right: &TexelColumn<N>,
    );

    /// Called after the last block of every band.
    fn end_band(&mut self);
}

/// Stream `rect` through `emitter` as 2-column blocks of `N` lines.
pub fn stream_pairs<M, E, const N: usize>(
    manip: &M,
    src: &SourceView<'_>,
    rect: Rect,
    plan: &BlockPlan,
    dst: &mut DestView<'_>,
    emitter: &mut E,
) where
    M: PixelManip,
    E: BlockEmitter<M, N>,
{
    let lines = N - 1;
    for band in 0..plan.bands {
        stream_band::<M, E, N, false>(manip, src, rect, rect.y + band * lines, N, plan, dst, emitter);
    }
    if plan.clip_y {
        let y = rect.y + plan.bands * lines;
        stream_band::<M, E, N, true>(manip, src, rect, y, plan.final_lines, plan, dst, emitter);
    }
}

#[allow(clippy::too_many_arguments)]
fn stream_band<M, E, const N: usize, const CLIP: bool>(
    manip: &M,
    src: &SourceView<'_>,
    rect: Rect,
    y: usize,
    available: usize,
    plan: &BlockPlan,
    dst: &mut DestView<'_>,
    emitter: &mut E,
) where
    M: PixelManip,
    E: BlockEmitter<M, N>,
{
    let mut left = TexelColumn::<N>::read(manip, src, rect.x, y, available);
    for i in 1..=plan.blocks {
        let right = TexelColumn::read(manip, src, rect.x + i, y, available);
        emitter.emit::<CLIP>(manip, dst, &left, &right);
        left = right;
    }
    if plan.clip_x {
        // Even widths still have the last column to pair with
        let last = plan.blocks + 1;
        if last < rect.w {
            let right = TexelColumn::read(manip, src, rect.x + last, y, available);
            emitter.emit::<true>(manip, dst, &left, &right);
            left = right;
        }
        emitter.emit::<true>(manip, dst, &left, &left);
    }
    emitter.end_band();
}

/// Stream `rect` one column at a time for kernels that do not blend
/// horizontally. `emitter` receives the same column as left and right.
pub fn stream_columns<M, E, const N: usize>(
    manip: &M,
    src: &SourceView<'_>,
    rect: Rect,
    plan: &BlockPlan,
    dst: &mut DestView<'_>,
    emitter: &mut E,
) where
    M: PixelManip,
    E: BlockEmitter<M, N>,
{
    let lines = N - 1;
    for band in 0..plan.bands {
        let y = rect.y + band * lines;
        for x in rect.x..rect.right() {
            let column = TexelColumn::<N>::read(manip, src, x, y, N);
            emitter.emit::<false>(manip, dst, &column, &column);
        }
        emitter.end_band();
    }
    if plan.clip_y {
        let y = rect.y + plan.bands * lines;
        for x in rect.x..rect.right() {
            let column = TexelColumn::<N>::read(manip, src, x, y, plan.final_lines);
            emitter.emit::<true>(manip, dst, &column, &column);
        }
        emitter.end_band();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphics::manip::Manip8to32;
    use crate::graphics::surface::{ChannelLayout, Palette};

    fn gray_source(w: usize, h: usize) -> Vec<u8> {
        (0..w * h).map(|i| i as u8).collect()
    }

    #[test]
    fn test_column_duplicates_unreadable_slots() {
        let pixels = gray_source(2, 3);
        let src = SourceView::new(&pixels, 2, 3, 2, 1).unwrap();
        let pal = Palette::grayscale();
        let m = Manip8to32::new(&pal, ChannelLayout::RGBA8888);
        let col = TexelColumn::<5>::read(&m, &src, 1, 1, 2);
        assert_eq!(col[0], [3, 3, 3]);
        assert_eq!(col[1], [5, 5, 5]);
        assert_eq!(col[2], [5, 5, 5]);
        assert_eq!(col[4], [5, 5, 5]);
        assert_eq!(col.pair(0), (&[3, 3, 3], &[5, 5, 5]));
    }

    #[test]
    fn test_plan_exact_source_is_clipped() {
        let pixels = gray_source(8, 8);
        let src = SourceView::new(&pixels, 8, 8, 8, 1).unwrap();
        let plan = BlockPlan::new(&src, Rect::sized(8, 8), 4, 2, false);
        assert_eq!(
            plan,
            BlockPlan {
                bands: 1,
                blocks: 6,
                clip_x: true,
                clip_y: true,
                final_lines: 4,
            }
        );
    }

    #[test]
    fn test_plan_padded_source_runs_unclipped() {
        let pixels = gray_source(16, 16);
        let src = SourceView::new(&pixels, 16, 16, 16, 1).unwrap();
        let plan = BlockPlan::new(&src, Rect::sized(8, 8), 4, 2, false);
        assert_eq!(plan.bands, 2);
        assert_eq!(plan.blocks, 8);
        assert!(!plan.clip_x);
        assert!(!plan.clip_y);

        let clamped = BlockPlan::new(&src, Rect::sized(8, 8), 4, 2, true);
        assert!(clamped.clip_x && clamped.clip_y);
        assert_eq!(clamped.final_lines, 4);
    }

    #[test]
    fn test_plan_short_source_has_no_bands() {
        let pixels = gray_source(4, 3);
        let src = SourceView::new(&pixels, 4, 3, 4, 1).unwrap();
        let plan = BlockPlan::new(&src, Rect::sized(4, 3), 4, 2, false);
        assert_eq!(plan.bands, 0);
        assert!(plan.clip_y);
        assert_eq!(plan.final_lines, 3);
    }

    #[test]
    fn test_plan_final_band_reads_past_rect_when_allowed() {
        let pixels = gray_source(4, 10);
        let src = SourceView::new(&pixels, 4, 10, 4, 1).unwrap();
        let plan = BlockPlan::new(&src, Rect::sized(4, 6), 4, 2, false);
        assert_eq!(plan.bands, 1);
        assert_eq!(plan.final_lines, 5);
    }
}
