use crate::foundation::error::{LanemixError, LanemixResult};
use smallvec::SmallVec;
use std::ops::{Add, Div, Mul, Range, Sub};

/// Lower bound for every divisor derived from alpha.
///
/// Unpremultiplying by `max(alpha, EPSILON)` keeps fully transparent results finite.
pub const EPSILON: f32 = 0.001;

/// Maximum number of planes in one [`ComponentValues`] run.
pub const MAX_COMPONENTS: usize = 4;

/// Straight-alpha RGBA color with `f32` channels nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel (not premultiplied into r/g/b).
    pub a: f32,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::splat(0.0);
    /// Opaque white with every channel at one.
    pub const ONE: Self = Self::splat(1.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn splat(v: f32) -> Self {
        Self {
            r: v,
            g: v,
            b: v,
            a: v,
        }
    }

    pub const fn from_array(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }

    pub const fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Read one pixel from an interleaved RGBA slice (at least 4 elements).
    pub fn load(px: &[f32]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }

    /// Write this pixel into an interleaved RGBA slice (at least 4 elements).
    pub fn store(self, px: &mut [f32]) {
        px[..4].copy_from_slice(&self.to_array());
    }

    /// Alpha broadcast to all four channels.
    pub const fn alpha_splat(self) -> Self {
        Self::splat(self.a)
    }

    /// Same color with the alpha channel replaced by `w.a`.
    pub const fn with_alpha_of(self, w: Self) -> Self {
        Self { a: w.a, ..self }
    }

    pub fn min(self, rhs: Self) -> Self {
        self.zip(rhs, f32::min)
    }

    pub fn max(self, rhs: Self) -> Self {
        self.zip(rhs, f32::max)
    }

    fn zip(self, rhs: Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(f(self.r, rhs.r), f(self.g, rhs.g), f(self.b, rhs.b), f(self.a, rhs.a))
    }
}

impl From<[f32; 4]> for Rgba {
    fn from(v: [f32; 4]) -> Self {
        Self::from_array(v)
    }
}

impl From<Rgba> for [f32; 4] {
    fn from(c: Rgba) -> Self {
        c.to_array()
    }
}

macro_rules! rgba_binop {
    ($tr:ident, $method:ident, $op:tt) => {
        impl $tr for Rgba {
            type Output = Rgba;

            fn $method(self, rhs: Rgba) -> Rgba {
                self.zip(rhs, |a, b| a $op b)
            }
        }
    };
}

rgba_binop!(Add, add, +);
rgba_binop!(Sub, sub, -);
rgba_binop!(Mul, mul, *);
rgba_binop!(Div, div, /);

/// A run of planar channel samples sharing one length.
///
/// Holds between one and [`MAX_COMPONENTS`] mutable planes. The run is borrowed for the
/// duration of a call only.
#[derive(Debug)]
pub struct ComponentValues<'a> {
    planes: SmallVec<[&'a mut [f32]; MAX_COMPONENTS]>,
    len: usize,
}

impl<'a> ComponentValues<'a> {
    /// Build a run from planes of identical length.
    pub fn new(planes: impl IntoIterator<Item = &'a mut [f32]>) -> LanemixResult<Self> {
        let planes: SmallVec<[&'a mut [f32]; MAX_COMPONENTS]> = planes.into_iter().collect();
        if planes.is_empty() || planes.len() > MAX_COMPONENTS {
            return Err(LanemixError::validation(format!(
                "component run expects 1..={MAX_COMPONENTS} planes, got {}",
                planes.len()
            )));
        }
        let len = planes[0].len();
        if planes.iter().any(|p| p.len() != len) {
            return Err(LanemixError::validation(
                "component planes must share identical length",
            ));
        }
        Ok(Self { planes, len })
    }

    /// Number of samples per plane.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn component_count(&self) -> usize {
        self.planes.len()
    }

    pub fn component(&self, idx: usize) -> &[f32] {
        &*self.planes[idx]
    }

    pub fn component_mut(&mut self, idx: usize) -> &mut [f32] {
        &mut *self.planes[idx]
    }

    /// All planes, for kernels that destructure them at once.
    pub fn planes_mut(&mut self) -> &mut [&'a mut [f32]] {
        &mut self.planes
    }

    /// Reborrow the sub-run `range` of every plane.
    pub fn slice_mut(&mut self, range: Range<usize>) -> ComponentValues<'_> {
        let len = range.len();
        let planes = self
            .planes
            .iter_mut()
            .map(|p| &mut p[range.clone()])
            .collect();
        ComponentValues { planes, len }
    }
}

/// Read-only normalized RGB planes, each the same length.
#[derive(Clone, Copy, Debug)]
pub struct RgbPlanes<'a> {
    pub r: &'a [f32],
    pub g: &'a [f32],
    pub b: &'a [f32],
}

impl<'a> RgbPlanes<'a> {
    pub fn new(r: &'a [f32], g: &'a [f32], b: &'a [f32]) -> LanemixResult<Self> {
        if r.len() != g.len() || r.len() != b.len() {
            return Err(LanemixError::validation(
                "rgb planes must share identical length",
            ));
        }
        Ok(Self { r, g, b })
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    pub fn slice(&self, range: Range<usize>) -> RgbPlanes<'a> {
        RgbPlanes {
            r: &self.r[range.clone()],
            g: &self.g[range.clone()],
            b: &self.b[range],
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
