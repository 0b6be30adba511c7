//! Lanemix evaluates per-pixel color transforms and alpha compositing over float samples,
//! once per hardware lane batch with a scalar tail.
//!
//! # Overview
//!
//! 1. **Detect**: [`Capability::detect`] reports whether a usable vector facility exists and
//!    its lane count. [`DispatchOpts`] can force the scalar path or cap the lane count.
//! 2. **Convert**: [`select_converter`] resolves vector vs scalar execution once and returns a
//!    [`ColorConverter`] for planar [`ComponentValues`] runs.
//! 3. **Composite**: [`BlendMode`] and the [`composite::porter_duff`] operators exist as scalar
//!    forms on [`Rgba`] and as lane forms in [`composite::wide`]. [`PixelBlender`] drives
//!    interleaved RGBA rows through the same lane dispatch.
//!
//! Constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate. Lane arithmetic goes through `wide`.
//! - **Vector equals scalar**: every vector kernel evaluates the same expression tree as its
//!   scalar twin, so results agree regardless of where a run is split.
//! - **Finite compositing**: divisions by a derived alpha use `max(alpha, EPSILON)`.
#![forbid(unsafe_code)]

mod foundation;

pub mod composite;
pub mod convert;
pub mod simd;

pub use crate::foundation::core::{ComponentValues, EPSILON, MAX_COMPONENTS, RgbPlanes, Rgba};
pub use crate::foundation::error::{LanemixError, LanemixResult};

pub use crate::composite::{
    AlphaComposition, BlendMode, ParallelOpts, PixelBlender, RowBlender, blend_rows_par,
    build_thread_pool,
};
pub use crate::convert::{
    ColorConverter, ColorSpace, ConversionKernels, SampleScale, ScalarConverter, VectorConverter,
    select_converter,
};
pub use crate::simd::{
    Capability, DispatchOpts, LaneWidth, Lanes, Partition, Segment, dispatch_split,
};
