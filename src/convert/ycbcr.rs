//! BT.601 YCbCr, the full-range variant used by JFIF.

use crate::convert::{
    ColorSpace, ConversionKernels, SampleScale, quantize_lanes, quantize_scalar,
};
use crate::foundation::core::{ComponentValues, RgbPlanes};
use crate::simd::Lanes;

const R_FROM_CR: f32 = 1.402;
const G_FROM_CB: f32 = 0.344_136;
const G_FROM_CR: f32 = 0.714_136;
const B_FROM_CB: f32 = 1.772;

pub(crate) const Y_FROM_R: f32 = 0.299;
pub(crate) const Y_FROM_G: f32 = 0.587;
pub(crate) const Y_FROM_B: f32 = 0.114;

const CB_FROM_R: f32 = 0.168_736;
const CB_FROM_G: f32 = 0.331_264;
const CB_FROM_B: f32 = 0.5;

const CR_FROM_R: f32 = 0.5;
const CR_FROM_G: f32 = 0.418_688;
const CR_FROM_B: f32 = 0.081_312;

/// Kernels for `Y, Cb, Cr` planes.
#[derive(Debug, Clone, Copy)]
pub struct YCbCrKernels {
    scale: SampleScale,
}

impl YCbCrKernels {
    pub fn new(scale: SampleScale) -> Self {
        Self { scale }
    }
}

impl ConversionKernels for YCbCrKernels {
    fn color_space(&self) -> ColorSpace {
        ColorSpace::YCbCr
    }

    fn sample_scale(&self) -> SampleScale {
        self.scale
    }

    fn to_rgb_vector<V: Lanes>(&self, values: &mut ComponentValues<'_>) {
        let [c0, c1, c2] = values.planes_mut() else {
            return;
        };
        debug_assert!(c0.len().is_multiple_of(V::LANES));

        let maximum = V::splat(self.scale.maximum());
        let half = V::splat(self.scale.half());
        let scale = V::splat(self.scale.scale());
        let r_cr = V::splat(R_FROM_CR);
        let g_cb = V::splat(G_FROM_CB);
        let g_cr = V::splat(G_FROM_CR);
        let b_cb = V::splat(B_FROM_CB);

        for i in (0..c0.len()).step_by(V::LANES) {
            let y = V::load(&c0[i..]);
            let cb = V::load(&c1[i..]) - half;
            let cr = V::load(&c2[i..]) - half;

            let r = y + cr * r_cr;
            let g = y - cb * g_cb - cr * g_cr;
            let b = y + cb * b_cb;

            quantize_lanes(r, maximum, scale).store(&mut c0[i..]);
            quantize_lanes(g, maximum, scale).store(&mut c1[i..]);
            quantize_lanes(b, maximum, scale).store(&mut c2[i..]);
        }
    }

    fn to_rgb_scalar(&self, values: &mut ComponentValues<'_>) {
        let [c0, c1, c2] = values.planes_mut() else {
            return;
        };

        let maximum = self.scale.maximum();
        let half = self.scale.half();
        let scale = self.scale.scale();

        for ((c0, c1), c2) in c0.iter_mut().zip(c1.iter_mut()).zip(c2.iter_mut()) {
            let y = *c0;
            let cb = *c1 - half;
            let cr = *c2 - half;

            let r = y + cr * R_FROM_CR;
            let g = y - cb * G_FROM_CB - cr * G_FROM_CR;
            let b = y + cb * B_FROM_CB;

            *c0 = quantize_scalar(r, maximum, scale);
            *c1 = quantize_scalar(g, maximum, scale);
            *c2 = quantize_scalar(b, maximum, scale);
        }
    }

    fn from_rgb_vector<V: Lanes>(&self, values: &mut ComponentValues<'_>, rgb: RgbPlanes<'_>) {
        let [c0, c1, c2] = values.planes_mut() else {
            return;
        };
        debug_assert!(c0.len().is_multiple_of(V::LANES));

        let maximum = V::splat(self.scale.maximum());
        let half = V::splat(self.scale.half());
        let (y_r, y_g, y_b) = (V::splat(Y_FROM_R), V::splat(Y_FROM_G), V::splat(Y_FROM_B));
        let (cb_r, cb_g, cb_b) = (
            V::splat(CB_FROM_R),
            V::splat(CB_FROM_G),
            V::splat(CB_FROM_B),
        );
        let (cr_r, cr_g, cr_b) = (
            V::splat(CR_FROM_R),
            V::splat(CR_FROM_G),
            V::splat(CR_FROM_B),
        );

        for i in (0..c0.len()).step_by(V::LANES) {
            let r = V::load(&rgb.r[i..]) * maximum;
            let g = V::load(&rgb.g[i..]) * maximum;
            let b = V::load(&rgb.b[i..]) * maximum;

            let y = r * y_r + g * y_g + b * y_b;
            let cb = half - r * cb_r - g * cb_g + b * cb_b;
            let cr = half + r * cr_r - g * cr_g - b * cr_b;

            y.store(&mut c0[i..]);
            cb.store(&mut c1[i..]);
            cr.store(&mut c2[i..]);
        }
    }

    fn from_rgb_scalar(&self, values: &mut ComponentValues<'_>, rgb: RgbPlanes<'_>) {
        let [c0, c1, c2] = values.planes_mut() else {
            return;
        };

        let maximum = self.scale.maximum();
        let half = self.scale.half();

        for (i, ((c0, c1), c2)) in c0
            .iter_mut()
            .zip(c1.iter_mut())
            .zip(c2.iter_mut())
            .enumerate()
        {
            let r = rgb.r[i] * maximum;
            let g = rgb.g[i] * maximum;
            let b = rgb.b[i] * maximum;

            *c0 = r * Y_FROM_R + g * Y_FROM_G + b * Y_FROM_B;
            *c1 = half - r * CB_FROM_R - g * CB_FROM_G + b * CB_FROM_B;
            *c2 = half + r * CR_FROM_R - g * CR_FROM_G - b * CR_FROM_B;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/convert/ycbcr.rs"]
mod tests;
