use crate::convert::ycbcr::{Y_FROM_B, Y_FROM_G, Y_FROM_R};
use crate::convert::{
    ColorSpace, ConversionKernels, SampleScale, quantize_lanes, quantize_scalar,
};
use crate::foundation::core::{ComponentValues, RgbPlanes};
use crate::simd::Lanes;

/// Kernels for a single luma plane.
#[derive(Debug, Clone, Copy)]
pub struct GrayscaleKernels {
    scale: SampleScale,
}

impl GrayscaleKernels {
    pub fn new(scale: SampleScale) -> Self {
        Self { scale }
    }
}

impl ConversionKernels for GrayscaleKernels {
    fn color_space(&self) -> ColorSpace {
        ColorSpace::Grayscale
    }

    fn sample_scale(&self) -> SampleScale {
        self.scale
    }

    fn to_rgb_vector<V: Lanes>(&self, values: &mut ComponentValues<'_>) {
        let maximum = V::splat(self.scale.maximum());
        let scale = V::splat(self.scale.scale());
        let luma = values.component_mut(0);
        debug_assert!(luma.len().is_multiple_of(V::LANES));

        for chunk in luma.chunks_exact_mut(V::LANES) {
            quantize_lanes(V::load(chunk), maximum, scale).store(chunk);
        }
    }

    fn to_rgb_scalar(&self, values: &mut ComponentValues<'_>) {
        let maximum = self.scale.maximum();
        let scale = self.scale.scale();
        for v in values.component_mut(0) {
            *v = quantize_scalar(*v, maximum, scale);
        }
    }

    fn from_rgb_vector<V: Lanes>(&self, values: &mut ComponentValues<'_>, rgb: RgbPlanes<'_>) {
        let maximum = V::splat(self.scale.maximum());
        let (y_r, y_g, y_b) = (V::splat(Y_FROM_R), V::splat(Y_FROM_G), V::splat(Y_FROM_B));
        let luma = values.component_mut(0);
        debug_assert!(luma.len().is_multiple_of(V::LANES));

        for (i, chunk) in luma.chunks_exact_mut(V::LANES).enumerate() {
            let at = i * V::LANES;
            let r = V::load(&rgb.r[at..]) * maximum;
            let g = V::load(&rgb.g[at..]) * maximum;
            let b = V::load(&rgb.b[at..]) * maximum;
            (r * y_r + g * y_g + b * y_b).store(chunk);
        }
    }

    fn from_rgb_scalar(&self, values: &mut ComponentValues<'_>, rgb: RgbPlanes<'_>) {
        let maximum = self.scale.maximum();
        for (i, v) in values.component_mut(0).iter_mut().enumerate() {
            let r = rgb.r[i] * maximum;
            let g = rgb.g[i] * maximum;
            let b = rgb.b[i] * maximum;
            *v = r * Y_FROM_R + g * Y_FROM_G + b * Y_FROM_B;
        }
    }
}
