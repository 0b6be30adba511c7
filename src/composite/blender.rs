use crate::composite::{AlphaComposition, BlendMode, porter_duff, wide};
use crate::foundation::core::Rgba;
use crate::foundation::error::{LanemixError, LanemixResult};
use crate::simd::{Capability, LaneWidth, Lanes, RGBA_CHANNELS, Segment, dispatch_split};
use ::wide::{f32x4, f32x8};

/// A blend mode paired with an alpha composition.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PixelBlender {
    pub mode: BlendMode,
    pub composition: AlphaComposition,
}

impl PixelBlender {
    pub fn new(mode: BlendMode, composition: AlphaComposition) -> Self {
        Self { mode, composition }
    }

    /// Blend one pixel. `opacity` is clamped to `[0, 1]` and scales the source alpha.
    pub fn apply(self, backdrop: Rgba, source: Rgba, opacity: f32) -> Rgba {
        let source = source.with_alpha_of(source * Rgba::splat(clamp_opacity(opacity)));
        match self.composition {
            AlphaComposition::Src => source,
            AlphaComposition::SrcAtop => {
                porter_duff::atop(backdrop, source, self.mode.apply(backdrop, source))
            }
            AlphaComposition::SrcOver => {
                porter_duff::over(backdrop, source, self.mode.apply(backdrop, source))
            }
            AlphaComposition::SrcIn => porter_duff::in_(backdrop, source),
            AlphaComposition::SrcOut => porter_duff::out(backdrop, source),
            AlphaComposition::Dest => backdrop,
            AlphaComposition::DestAtop => {
                porter_duff::atop(source, backdrop, self.mode.apply(source, backdrop))
            }
            AlphaComposition::DestOver => {
                porter_duff::over(source, backdrop, self.mode.apply(source, backdrop))
            }
            AlphaComposition::DestIn => porter_duff::in_(source, backdrop),
            AlphaComposition::DestOut => porter_duff::out(source, backdrop),
            AlphaComposition::Clear => porter_duff::clear(backdrop, source),
            AlphaComposition::Xor => porter_duff::xor(backdrop, source),
        }
    }

    /// Lane form of [`PixelBlender::apply`] over `V::LANES / 4` packed pixels.
    #[inline]
    pub fn apply_wide<V: Lanes>(self, backdrop: V, source: V, opacity: f32) -> V {
        let source = source.with_alpha_of(source * V::splat(clamp_opacity(opacity)));
        match self.composition {
            AlphaComposition::Src => source,
            AlphaComposition::SrcAtop => {
                wide::atop(backdrop, source, self.mode.apply_wide(backdrop, source))
            }
            AlphaComposition::SrcOver => {
                wide::over(backdrop, source, self.mode.apply_wide(backdrop, source))
            }
            AlphaComposition::SrcIn => wide::in_(backdrop, source),
            AlphaComposition::SrcOut => wide::out(backdrop, source),
            AlphaComposition::Dest => backdrop,
            AlphaComposition::DestAtop => {
                wide::atop(source, backdrop, self.mode.apply_wide(source, backdrop))
            }
            AlphaComposition::DestOver => {
                wide::over(source, backdrop, self.mode.apply_wide(source, backdrop))
            }
            AlphaComposition::DestIn => wide::in_(source, backdrop),
            AlphaComposition::DestOut => wide::out(source, backdrop),
            AlphaComposition::Clear => wide::clear(backdrop, source),
            AlphaComposition::Xor => wide::xor(backdrop, source),
        }
    }

    /// Bind this blender to a capability for row processing.
    pub fn rows(self, capability: Capability) -> RowBlender {
        RowBlender {
            blender: self,
            capability,
        }
    }
}

fn clamp_opacity(opacity: f32) -> f32 {
    if opacity.is_nan() {
        return 0.0;
    }
    opacity.clamp(0.0, 1.0)
}

/// A [`PixelBlender`] with vector vs scalar execution resolved from a [`Capability`].
///
/// Rows are interleaved RGBA `f32` samples, four per pixel.
#[derive(Clone, Copy, Debug)]
pub struct RowBlender {
    blender: PixelBlender,
    capability: Capability,
}

impl RowBlender {
    pub fn blender(&self) -> PixelBlender {
        self.blender
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    pub fn is_vectorized(&self) -> bool {
        self.capability.is_available()
    }

    /// Blend `source` over `backdrop`, writing the result into `backdrop`.
    #[tracing::instrument(
        level = "trace",
        skip_all,
        fields(mode = ?self.blender.mode, composition = ?self.blender.composition, len = backdrop.len())
    )]
    pub fn blend_in_place(
        &self,
        backdrop: &mut [f32],
        source: &[f32],
        opacity: f32,
    ) -> LanemixResult<()> {
        check_row("source", backdrop.len(), source.len())?;

        if !self.capability.is_available() {
            self.blend_scalar(backdrop, source, opacity);
            return Ok(());
        }

        dispatch_split(self.capability, backdrop.len(), |segment| match segment {
            Segment::Vector { range, width } => self.blend_lanes(
                &mut backdrop[range.clone()],
                &source[range],
                opacity,
                width,
            ),
            Segment::Scalar { range } => {
                self.blend_scalar(&mut backdrop[range.clone()], &source[range], opacity)
            }
        });
        Ok(())
    }

    /// Blend `source` over `backdrop` into `out`, leaving `backdrop` untouched.
    pub fn blend_row(
        &self,
        backdrop: &[f32],
        source: &[f32],
        out: &mut [f32],
        opacity: f32,
    ) -> LanemixResult<()> {
        check_row("source", backdrop.len(), source.len())?;
        check_row("output", backdrop.len(), out.len())?;
        out.copy_from_slice(backdrop);
        self.blend_in_place(out, source, opacity)
    }

    fn blend_lanes(&self, backdrop: &mut [f32], source: &[f32], opacity: f32, width: LaneWidth) {
        match width {
            LaneWidth::X4 => self.blend_vector::<f32x4>(backdrop, source, opacity),
            LaneWidth::X8 => self.blend_vector::<f32x8>(backdrop, source, opacity),
        }
    }

    fn blend_vector<V: Lanes>(&self, backdrop: &mut [f32], source: &[f32], opacity: f32) {
        debug_assert!(backdrop.len().is_multiple_of(V::LANES));
        for (dst, src) in backdrop
            .chunks_exact_mut(V::LANES)
            .zip(source.chunks_exact(V::LANES))
        {
            self.blender
                .apply_wide(V::load(dst), V::load(src), opacity)
                .store(dst);
        }
    }

    fn blend_scalar(&self, backdrop: &mut [f32], source: &[f32], opacity: f32) {
        for (dst, src) in backdrop
            .chunks_exact_mut(RGBA_CHANNELS)
            .zip(source.chunks_exact(RGBA_CHANNELS))
        {
            self.blender
                .apply(Rgba::load(dst), Rgba::load(src), opacity)
                .store(dst);
        }
    }
}

pub(crate) fn check_row(what: &str, backdrop_len: usize, other_len: usize) -> LanemixResult<()> {
    if !backdrop_len.is_multiple_of(RGBA_CHANNELS) {
        return Err(LanemixError::validation(format!(
            "rgba rows must hold a multiple of {RGBA_CHANNELS} samples, got {backdrop_len}"
        )));
    }
    if backdrop_len != other_len {
        return Err(LanemixError::validation(format!(
            "{what} row holds {other_len} samples but the backdrop holds {backdrop_len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/composite/blender.rs"]
mod tests;
