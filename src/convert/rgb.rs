use crate::convert::{
    ColorSpace, ConversionKernels, SampleScale, quantize_lanes, quantize_scalar,
};
use crate::foundation::core::{ComponentValues, RgbPlanes};
use crate::simd::Lanes;

/// Kernels for planes that already hold RGB samples; only the sample domain changes.
#[derive(Debug, Clone, Copy)]
pub struct RgbKernels {
    scale: SampleScale,
}

impl RgbKernels {
    pub fn new(scale: SampleScale) -> Self {
        Self { scale }
    }
}

impl ConversionKernels for RgbKernels {
    fn color_space(&self) -> ColorSpace {
        ColorSpace::Rgb
    }

    fn sample_scale(&self) -> SampleScale {
        self.scale
    }

    fn to_rgb_vector<V: Lanes>(&self, values: &mut ComponentValues<'_>) {
        let maximum = V::splat(self.scale.maximum());
        let scale = V::splat(self.scale.scale());
        for plane in values.planes_mut() {
            debug_assert!(plane.len().is_multiple_of(V::LANES));
            for chunk in plane.chunks_exact_mut(V::LANES) {
                quantize_lanes(V::load(chunk), maximum, scale).store(chunk);
            }
        }
    }

    fn to_rgb_scalar(&self, values: &mut ComponentValues<'_>) {
        let maximum = self.scale.maximum();
        let scale = self.scale.scale();
        for plane in values.planes_mut() {
            for v in plane.iter_mut() {
                *v = quantize_scalar(*v, maximum, scale);
            }
        }
    }

    fn from_rgb_vector<V: Lanes>(&self, values: &mut ComponentValues<'_>, rgb: RgbPlanes<'_>) {
        let maximum = V::splat(self.scale.maximum());
        for (plane, src) in values.planes_mut().iter_mut().zip([rgb.r, rgb.g, rgb.b]) {
            debug_assert!(plane.len().is_multiple_of(V::LANES));
            for (dst, src) in plane
                .chunks_exact_mut(V::LANES)
                .zip(src.chunks_exact(V::LANES))
            {
                (V::load(src) * maximum).store(dst);
            }
        }
    }

    fn from_rgb_scalar(&self, values: &mut ComponentValues<'_>, rgb: RgbPlanes<'_>) {
        let maximum = self.scale.maximum();
        for (plane, src) in values.planes_mut().iter_mut().zip([rgb.r, rgb.g, rgb.b]) {
            for (dst, src) in plane.iter_mut().zip(src) {
                *dst = src * maximum;
            }
        }
    }
}
