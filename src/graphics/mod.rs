//! Graphics: surfaces, pixel format conversion and the arbitrary ratio
//! scalers.
//!
//! # Architecture
//!
//! - `surface` - Owned surfaces, borrowed source/destination views, formats
//! - `manip` - Pixel manipulators converting source pixels to output pixels
//! - `bilinear` - Bilinear kernels and the kernel dispatcher
//! - `point` - Nearest-neighbour scaling
//! - `scaling` - `ArbScaler` front end with format dispatch

pub mod bilinear;
pub mod manip;
pub mod point;
pub mod scaling;
pub mod surface;

pub use bilinear::{scale_bilinear, scale_bilinear_with, select_kernel, BilinearKernel, KernelChoice};
pub use manip::{
    Manip16to16, Manip32to32, Manip555to555, Manip565to565, Manip8to16, Manip8to32, Manip8to555,
    Manip8to565, PixelManip, Texel,
};
pub use point::{scale_point, scale_point_with};
pub use scaling::{ArbScaler, BilinearScaler, PointScaler, ScaleError, ScalerSet, ScalerType};
pub use surface::{
    ChannelLayout, DestView, Palette, PixelFormat, PixelWord, Rect, SourceView, Surface,
    SurfaceError, MAX_DIMENSION,
};
