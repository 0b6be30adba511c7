//! Lane abstraction over `wide` vectors plus hardware capability and run partitioning.
//!
//! Kernels are written once against [`Lanes`] and instantiated for `f32x4` or `f32x8`
//! depending on the [`LaneWidth`] resolved from a [`Capability`].

pub mod capability;
pub mod dispatch;

use std::ops::{Add, Div, Mul, Sub};
use wide::{CmpGt, f32x4, f32x8};

pub use capability::{Capability, DispatchOpts};
pub use dispatch::{Partition, Segment, dispatch_split};

/// Channel count of one packed RGBA pixel inside a lane vector.
pub const RGBA_CHANNELS: usize = 4;

/// A packed vector of `f32` lanes.
///
/// Every operation is lane-wise and matches the corresponding scalar `f32` operation, so a
/// kernel written against this trait agrees with its scalar twin as long as both evaluate
/// the same expression tree.
pub trait Lanes:
    Copy
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Number of `f32` lanes.
    const LANES: usize;

    fn splat(v: f32) -> Self;

    /// Load the first `LANES` elements of `src`.
    fn load(src: &[f32]) -> Self;

    /// Store into the first `LANES` elements of `dst`.
    fn store(self, dst: &mut [f32]);

    fn min(self, rhs: Self) -> Self;

    fn max(self, rhs: Self) -> Self;

    /// Round to nearest, ties to even (`f32::round_ties_even` per lane).
    fn round_even(self) -> Self;

    /// Per lane: `if self > threshold { on_true } else { on_false }`.
    fn select_gt(self, threshold: Self, on_true: Self, on_false: Self) -> Self;

    /// Broadcast the alpha lane of each packed RGBA pixel over that pixel's four lanes.
    fn alpha_splat(self) -> Self;

    /// Keep color lanes of `self` and take the alpha lane of each pixel from `alpha`.
    fn with_alpha_of(self, alpha: Self) -> Self;
}

macro_rules! impl_lanes {
    ($ty:ident, $n:literal) => {
        impl Lanes for $ty {
            const LANES: usize = $n;

            #[inline(always)]
            fn splat(v: f32) -> Self {
                $ty::splat(v)
            }

            #[inline(always)]
            fn load(src: &[f32]) -> Self {
                let mut arr = [0.0f32; $n];
                arr.copy_from_slice(&src[..$n]);
                $ty::from(arr)
            }

            #[inline(always)]
            fn store(self, dst: &mut [f32]) {
                dst[..$n].copy_from_slice(&self.to_array());
            }

            #[inline(always)]
            fn min(self, rhs: Self) -> Self {
                $ty::min(self, rhs)
            }

            #[inline(always)]
            fn max(self, rhs: Self) -> Self {
                $ty::max(self, rhs)
            }

            #[inline(always)]
            fn round_even(self) -> Self {
                $ty::round(self)
            }

            #[inline(always)]
            fn select_gt(self, threshold: Self, on_true: Self, on_false: Self) -> Self {
                self.cmp_gt(threshold).blend(on_true, on_false)
            }

            #[inline(always)]
            fn alpha_splat(self) -> Self {
                let src = self.to_array();
                let mut out = [0.0f32; $n];
                for (px_out, px_in) in out
                    .chunks_exact_mut(RGBA_CHANNELS)
                    .zip(src.chunks_exact(RGBA_CHANNELS))
                {
                    px_out.fill(px_in[3]);
                }
                $ty::from(out)
            }

            #[inline(always)]
            fn with_alpha_of(self, alpha: Self) -> Self {
                alpha_mask::<$ty>().blend(alpha, self)
            }
        }
    };
}

impl_lanes!(f32x4, 4);
impl_lanes!(f32x8, 8);

/// All-ones in every alpha lane, zero elsewhere, as produced by a lane comparison.
#[inline(always)]
fn alpha_mask<V: Lanes + CmpGt<Output = V>>() -> V {
    let mut pattern = [0.0f32; 8];
    for px in pattern.chunks_exact_mut(RGBA_CHANNELS) {
        px[3] = 1.0;
    }
    V::load(&pattern).cmp_gt(V::splat(0.5))
}

/// Vector type a lane dispatch instantiates kernels with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LaneWidth {
    /// `wide::f32x4`.
    X4,
    /// `wide::f32x8`.
    X8,
}

impl LaneWidth {
    /// Widest supported vector whose lane count divides `lanes`.
    pub fn for_lanes(lanes: usize) -> Option<Self> {
        if lanes == 0 {
            None
        } else if lanes.is_multiple_of(8) {
            Some(Self::X8)
        } else if lanes.is_multiple_of(4) {
            Some(Self::X4)
        } else {
            None
        }
    }

    pub fn lanes(self) -> usize {
        match self {
            Self::X4 => 4,
            Self::X8 => 8,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simd/lanes.rs"]
mod tests;
