//! Bilinear scaler kernels and their dispatcher
//!
//! Four kernels share one streaming skeleton (see [`block`]):
//! - [`BilinearKernel::X2`]: exactly 2x in both axes
//! - [`BilinearKernel::X2Y24`]: 2x horizontal, 2.4x vertical
//! - [`BilinearKernel::X1Y12`]: 1x horizontal, 1.2x vertical
//! - [`BilinearKernel::Arbitrary`]: any ratio, the universal fallback
//!
//! The fixed-ratio kernels bake their filter factors in as constants; the
//! arbitrary kernel derives them from 16.16 source positions. All kernels
//! are reentrant and allocation free, so disjoint destination views may be
//! scaled from several threads at once.

mod arb;
mod block;
mod interp;
mod x1y12;
mod x2;
mod x2y24;

pub use interp::{interpolate_one, lerp16, lerp8, Fixed1616, FIXED_ONE};

use crate::graphics::manip::PixelManip;
use crate::graphics::surface::{DestView, Rect, SourceView};

// ==============================================================================
// Kernel selection
// ==============================================================================

/// One of the bilinear kernels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BilinearKernel {
    X2,
    X2Y24,
    X1Y12,
    Arbitrary,
}

impl BilinearKernel {
    pub const ALL: [BilinearKernel; 4] = [
        BilinearKernel::X2,
        BilinearKernel::X2Y24,
        BilinearKernel::X1Y12,
        BilinearKernel::Arbitrary,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            BilinearKernel::X2 => "2x",
            BilinearKernel::X2Y24 => "2x2.4",
            BilinearKernel::X1Y12 => "1x1.2",
            BilinearKernel::Arbitrary => "arbitrary",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.name().eq_ignore_ascii_case(name))
    }

    /// Whether this kernel can map `sw x sh` onto `dw x dh`
    pub fn accepts(&self, sw: usize, sh: usize, dw: usize, dh: usize) -> bool {
        match self {
            BilinearKernel::X2 => sw * 2 == dw && sh * 2 == dh,
            BilinearKernel::X2Y24 => sw * 2 == dw && dh * 5 == sh * 12,
            BilinearKernel::X1Y12 => sw == dw && dh * 5 == sh * 6,
            BilinearKernel::Arbitrary => true,
        }
    }
}

impl std::fmt::Display for BilinearKernel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Pick the kernel for a scale, first exact match wins.
pub fn select_kernel(sw: usize, sh: usize, dw: usize, dh: usize) -> BilinearKernel {
    if sw * 2 == dw && sh * 2 == dh {
        BilinearKernel::X2
    } else if sw * 2 == dw && dh * 5 == sh * 12 {
        BilinearKernel::X2Y24
    } else if sw == dw && dh * 5 == sh * 6 && sh % 5 == 0 && sw % 4 == 0 {
        BilinearKernel::X1Y12
    } else {
        BilinearKernel::Arbitrary
    }
}

/// How the kernel for a scale is chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KernelChoice {
    /// Let [`select_kernel`] decide
    #[default]
    Auto,
    /// Use this kernel when its ratio matches, otherwise the arbitrary one
    Force(BilinearKernel),
}

impl KernelChoice {
    pub fn resolve(&self, sw: usize, sh: usize, dw: usize, dh: usize) -> BilinearKernel {
        match *self {
            KernelChoice::Auto => select_kernel(sw, sh, dw, dh),
            KernelChoice::Force(kernel) if kernel.accepts(sw, sh, dw, dh) => kernel,
            KernelChoice::Force(_) => BilinearKernel::Arbitrary,
        }
    }
}

// ==============================================================================
// Entry points
// ==============================================================================

/// Scale `rect` of `src` onto the whole of `dst`.
///
/// The destination size is `dst.width() x dst.height()`. With `clamp_src`
/// unset the kernels may read one column right of and one line below `rect`
/// when the surface has them. Always returns `true`; an empty source or
/// destination is a no-op.
pub fn scale_bilinear<M: PixelManip>(
    manip: &M,
    src: &SourceView<'_>,
    rect: Rect,
    dst: &mut DestView<'_>,
    clamp_src: bool,
) -> bool {
    scale_bilinear_with(manip, src, rect, dst, clamp_src, KernelChoice::Auto)
}

/// [`scale_bilinear`] with an explicit kernel choice.
pub fn scale_bilinear_with<M: PixelManip>(
    manip: &M,
    src: &SourceView<'_>,
    rect: Rect,
    dst: &mut DestView<'_>,
    clamp_src: bool,
    choice: KernelChoice,
) -> bool {
    let Some((rect, dw, dh)) = rect.clip_scaled(src.width(), src.height(), dst.width(), dst.height())
    else {
        return true;
    };

    let kernel = choice.resolve(rect.w, rect.h, dw, dh);
    log::trace!(
        "bilinear {}x{}+{}+{} -> {}x{} with {} kernel",
        rect.w,
        rect.h,
        rect.x,
        rect.y,
        dw,
        dh,
        kernel
    );

    let mut dst = dst.shrink(dw, dh);
    match kernel {
        BilinearKernel::X2 => x2::scale_x2(manip, src, rect, &mut dst, clamp_src),
        BilinearKernel::X2Y24 => x2y24::scale_x2y24(manip, src, rect, &mut dst, clamp_src),
        BilinearKernel::X1Y12 => x1y12::scale_x1y12(manip, src, rect, &mut dst, clamp_src),
        BilinearKernel::Arbitrary => arb::scale_arbitrary(manip, src, rect, &mut dst, clamp_src),
    }
}
