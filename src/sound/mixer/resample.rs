// resample.rs - Cubic resampling

//! Fixed-point cubic interpolation used to resample channel data to the
//! output rate.
//!
//! The interpolator keeps a sliding window of four samples `x0..x3` and
//! evaluates the curve between `x1` and `x2` at a 16.16 fraction.

/// Four-point cubic interpolator over integer samples
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CubicInterpolator {
    x0: i32,
    x1: i32,
    x2: i32,
    x3: i32,
    a: i32,
    b: i32,
    c: i32,
    d: i32,
}

impl CubicInterpolator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Window `x0..x3`
    pub fn init(&mut self, x0: i32, x1: i32, x2: i32, x3: i32) {
        self.x0 = x0;
        self.x1 = x1;
        self.x2 = x2;
        self.x3 = x3;
        self.update_coefficients();
    }

    /// Window starting at `x1`; `x0` is extrapolated linearly
    pub fn init3(&mut self, x1: i32, x2: i32, x3: i32) {
        self.init(2 * x1 - x2, x1, x2, x3);
    }

    /// Shift in a new sample
    pub fn feed(&mut self, x: i32) {
        self.x0 = self.x1;
        self.x1 = self.x2;
        self.x2 = self.x3;
        self.x3 = x;
        self.update_coefficients();
    }

    /// Shift in a linearly extrapolated sample, used once the data runs out
    pub fn feed_extrapolated(&mut self) {
        let next = 2 * self.x3 - self.x2;
        self.feed(next);
    }

    /// Value between `x1` and `x2` at `fp_pos` (16.16, below `0x10000`)
    #[inline]
    pub fn interpolate(&self, fp_pos: u32) -> i32 {
        let t = (fp_pos >> 8) as i32;
        let mut r = (self.a * t + self.b) >> 8;
        r = (r * t + self.c) >> 8;
        r = (r * t + self.d) >> 8;
        (r / 3 + 1) >> 1
    }

    fn update_coefficients(&mut self) {
        let (x0, x1, x2, x3) = (self.x0, self.x1, self.x2, self.x3);
        self.a = -2 * x0 + 5 * x1 - 4 * x2 + x3;
        self.b = ((x0 + x2 - 2 * x1) * 6) << 8;
        self.c = (-4 * x0 + x1 + 4 * x2 - x3) << 8;
        self.d = (x1 * 6) << 8;
    }
}
