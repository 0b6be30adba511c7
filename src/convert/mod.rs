//! Color converters over planar component runs.
//!
//! A converter is a pair of kernels for each direction (a vector kernel written against
//! [`Lanes`] and a scalar kernel) plus the shared partition routine from
//! [`crate::simd::dispatch_split`]. Concrete transforms only implement
//! [`ConversionKernels`]; [`VectorConverter`] and [`ScalarConverter`] own the dispatch.

pub mod grayscale;
pub mod rgb;
pub mod ycbcr;

use crate::foundation::core::{ComponentValues, RgbPlanes};
use crate::foundation::error::{LanemixError, LanemixResult};
use crate::simd::{Capability, LaneWidth, Lanes, Segment, dispatch_split};
use wide::{f32x4, f32x8};

pub use grayscale::GrayscaleKernels;
pub use rgb::RgbKernels;
pub use ycbcr::YCbCrKernels;

/// Source color space of a component run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorSpace {
    /// Single luma plane.
    Grayscale,
    /// BT.601 luma plus blue/red chroma planes.
    #[serde(rename = "ycbcr")]
    YCbCr,
    /// Red, green and blue planes.
    Rgb,
}

impl ColorSpace {
    pub fn component_count(self) -> usize {
        match self {
            Self::Grayscale => 1,
            Self::YCbCr | Self::Rgb => 3,
        }
    }
}

/// Sample domain for a bit precision: `[0, maximum]` with chroma centered on `half`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleScale {
    precision: u32,
    maximum: f32,
    half: f32,
    scale: f32,
}

impl SampleScale {
    pub const MIN_PRECISION: u32 = 2;
    pub const MAX_PRECISION: u32 = 16;

    pub fn new(precision: u32) -> LanemixResult<Self> {
        if !(Self::MIN_PRECISION..=Self::MAX_PRECISION).contains(&precision) {
            return Err(LanemixError::validation(format!(
                "sample precision must be in {}..={} bits, got {precision}",
                Self::MIN_PRECISION,
                Self::MAX_PRECISION
            )));
        }
        let maximum = ((1u32 << precision) - 1) as f32;
        Ok(Self {
            precision,
            maximum,
            half: (maximum / 2.0).ceil(),
            scale: 1.0 / maximum,
        })
    }

    pub fn precision(self) -> u32 {
        self.precision
    }

    /// Largest representable sample, `2^precision - 1`.
    pub fn maximum(self) -> f32 {
        self.maximum
    }

    /// Chroma zero point, `ceil(maximum / 2)`.
    pub fn half(self) -> f32 {
        self.half
    }

    /// `1 / maximum`, maps samples into `[0, 1]`.
    pub fn scale(self) -> f32 {
        self.scale
    }
}

/// Vector and scalar kernels of one color transform.
///
/// For every element the vector and scalar forms of a direction must evaluate the same
/// expression so the two paths agree to the bit. Vector kernels are only handed runs whose
/// length is a multiple of `V::LANES`.
pub trait ConversionKernels: Send + Sync {
    fn color_space(&self) -> ColorSpace;

    fn sample_scale(&self) -> SampleScale;

    /// Original color space samples to normalized RGB, in place.
    fn to_rgb_vector<V: Lanes>(&self, values: &mut ComponentValues<'_>);

    fn to_rgb_scalar(&self, values: &mut ComponentValues<'_>);

    /// Normalized RGB in `rgb` to original color space samples written into `values`.
    fn from_rgb_vector<V: Lanes>(&self, values: &mut ComponentValues<'_>, rgb: RgbPlanes<'_>);

    fn from_rgb_scalar(&self, values: &mut ComponentValues<'_>, rgb: RgbPlanes<'_>);
}

/// Object-safe converter surface handed to the wider conversion pipeline.
pub trait ColorConverter: Send + Sync {
    fn color_space(&self) -> ColorSpace;

    fn precision(&self) -> u32;

    /// Whether this converter may run on the current capability.
    fn is_available(&self) -> bool;

    /// Convert `values` to normalized RGB in place.
    fn convert_in_place(&self, values: &mut ComponentValues<'_>) -> LanemixResult<()>;

    /// Convert normalized `r`/`g`/`b` planes back into the original color space, writing the
    /// component planes of `values`.
    fn convert_back(
        &self,
        values: &mut ComponentValues<'_>,
        r: &[f32],
        g: &[f32],
        b: &[f32],
    ) -> LanemixResult<()>;
}

/// Converter that runs vector kernels over the lane-aligned prefix and scalar kernels over
/// the remainder.
///
/// Requires [`Capability::is_available`]; use [`select_converter`] to fall back to
/// [`ScalarConverter`] on hardware without a usable lane facility.
#[derive(Debug, Clone)]
pub struct VectorConverter<K> {
    kernels: K,
    capability: Capability,
}

impl<K: ConversionKernels> VectorConverter<K> {
    pub fn new(kernels: K, capability: Capability) -> Self {
        Self {
            kernels,
            capability,
        }
    }

    pub fn kernels(&self) -> &K {
        &self.kernels
    }

    pub fn capability(&self) -> Capability {
        self.capability
    }

    fn assert_available(&self) {
        debug_assert!(
            self.capability.is_available(),
            "{:?} converter is not supported on current hardware",
            self.kernels.color_space()
        );
    }
}

impl<K: ConversionKernels> ColorConverter for VectorConverter<K> {
    fn color_space(&self) -> ColorSpace {
        self.kernels.color_space()
    }

    fn precision(&self) -> u32 {
        self.kernels.sample_scale().precision()
    }

    fn is_available(&self) -> bool {
        self.capability.is_available()
    }

    #[tracing::instrument(level = "trace", skip_all, fields(space = ?self.color_space(), len = values.len()))]
    fn convert_in_place(&self, values: &mut ComponentValues<'_>) -> LanemixResult<()> {
        self.assert_available();
        check_components(self.kernels.color_space(), values)?;

        let len = values.len();
        dispatch_split(self.capability, len, |segment| match segment {
            Segment::Vector { range, width } => {
                to_rgb_lanes(&self.kernels, &mut values.slice_mut(range), width)
            }
            Segment::Scalar { range } => self.kernels.to_rgb_scalar(&mut values.slice_mut(range)),
        });
        Ok(())
    }

    #[tracing::instrument(level = "trace", skip_all, fields(space = ?self.color_space(), len = values.len()))]
    fn convert_back(
        &self,
        values: &mut ComponentValues<'_>,
        r: &[f32],
        g: &[f32],
        b: &[f32],
    ) -> LanemixResult<()> {
        self.assert_available();
        check_components(self.kernels.color_space(), values)?;
        let rgb = check_rgb(values, r, g, b)?;

        let len = values.len();
        dispatch_split(self.capability, len, |segment| match segment {
            Segment::Vector { range, width } => from_rgb_lanes(
                &self.kernels,
                &mut values.slice_mut(range.clone()),
                rgb.slice(range),
                width,
            ),
            Segment::Scalar { range } => self
                .kernels
                .from_rgb_scalar(&mut values.slice_mut(range.clone()), rgb.slice(range)),
        });
        Ok(())
    }
}

/// Converter that runs only the scalar kernels, for hardware without lane support.
#[derive(Debug, Clone)]
pub struct ScalarConverter<K> {
    kernels: K,
}

impl<K: ConversionKernels> ScalarConverter<K> {
    pub fn new(kernels: K) -> Self {
        Self { kernels }
    }

    pub fn kernels(&self) -> &K {
        &self.kernels
    }
}

impl<K: ConversionKernels> ColorConverter for ScalarConverter<K> {
    fn color_space(&self) -> ColorSpace {
        self.kernels.color_space()
    }

    fn precision(&self) -> u32 {
        self.kernels.sample_scale().precision()
    }

    fn is_available(&self) -> bool {
        true
    }

    fn convert_in_place(&self, values: &mut ComponentValues<'_>) -> LanemixResult<()> {
        check_components(self.kernels.color_space(), values)?;
        self.kernels.to_rgb_scalar(values);
        Ok(())
    }

    fn convert_back(
        &self,
        values: &mut ComponentValues<'_>,
        r: &[f32],
        g: &[f32],
        b: &[f32],
    ) -> LanemixResult<()> {
        check_components(self.kernels.color_space(), values)?;
        let rgb = check_rgb(values, r, g, b)?;
        self.kernels.from_rgb_scalar(values, rgb);
        Ok(())
    }
}

/// Build the converter for `color_space`, resolving vector vs scalar execution once.
pub fn select_converter(
    color_space: ColorSpace,
    precision: u32,
    capability: Capability,
) -> LanemixResult<Box<dyn ColorConverter>> {
    let scale = SampleScale::new(precision)?;
    let converter = match color_space {
        ColorSpace::Grayscale => boxed(GrayscaleKernels::new(scale), capability),
        ColorSpace::YCbCr => boxed(YCbCrKernels::new(scale), capability),
        ColorSpace::Rgb => boxed(RgbKernels::new(scale), capability),
    };
    tracing::debug!(
        ?color_space,
        precision,
        vectorized = capability.is_available(),
        lanes = capability.lanes(),
        "selected color converter"
    );
    Ok(converter)
}

fn boxed<K: ConversionKernels + 'static>(
    kernels: K,
    capability: Capability,
) -> Box<dyn ColorConverter> {
    if capability.is_available() {
        Box::new(VectorConverter::new(kernels, capability))
    } else {
        Box::new(ScalarConverter::new(kernels))
    }
}

fn to_rgb_lanes<K: ConversionKernels>(
    kernels: &K,
    values: &mut ComponentValues<'_>,
    width: LaneWidth,
) {
    match width {
        LaneWidth::X4 => kernels.to_rgb_vector::<f32x4>(values),
        LaneWidth::X8 => kernels.to_rgb_vector::<f32x8>(values),
    }
}

fn from_rgb_lanes<K: ConversionKernels>(
    kernels: &K,
    values: &mut ComponentValues<'_>,
    rgb: RgbPlanes<'_>,
    width: LaneWidth,
) {
    match width {
        LaneWidth::X4 => kernels.from_rgb_vector::<f32x4>(values, rgb),
        LaneWidth::X8 => kernels.from_rgb_vector::<f32x8>(values, rgb),
    }
}

fn check_components(space: ColorSpace, values: &ComponentValues<'_>) -> LanemixResult<()> {
    if values.component_count() != space.component_count() {
        return Err(LanemixError::validation(format!(
            "{space:?} conversion expects {} components, got {}",
            space.component_count(),
            values.component_count()
        )));
    }
    Ok(())
}

fn check_rgb<'a>(
    values: &ComponentValues<'_>,
    r: &'a [f32],
    g: &'a [f32],
    b: &'a [f32],
) -> LanemixResult<RgbPlanes<'a>> {
    let rgb = RgbPlanes::new(r, g, b)?;
    if rgb.len() != values.len() {
        return Err(LanemixError::validation(format!(
            "rgb planes hold {} samples but the component run holds {}",
            rgb.len(),
            values.len()
        )));
    }
    Ok(rgb)
}

/// Round half-to-even, clamp into `[0, maximum]`, normalize into `[0, 1]`.
///
/// Adding `+0.0` after rounding folds a rounded `-0.0` into `+0.0`, so a saturated zero has
/// the same bits whichever kernel produced it.
#[inline(always)]
pub(crate) fn quantize_lanes<V: Lanes>(v: V, maximum: V, scale: V) -> V {
    let zero = V::splat(0.0);
    (v.round_even() + zero).max(zero).min(maximum) * scale
}

#[inline(always)]
pub(crate) fn quantize_scalar(v: f32, maximum: f32, scale: f32) -> f32 {
    (v.round_ties_even() + 0.0).max(0.0).min(maximum) * scale
}

#[cfg(test)]
#[path = "../../tests/unit/convert/mod.rs"]
mod tests;
