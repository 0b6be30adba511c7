//! Blend modes and Porter-Duff composition over straight-alpha RGBA.
//!
//! Every equation exists twice: [`porter_duff`] on one [`Rgba`] and [`wide`] on packed
//! pixels inside a [`Lanes`] vector. [`PixelBlender`] pairs a [`BlendMode`] with an
//! [`AlphaComposition`] and drives whole rows through the shared lane dispatch.

pub mod blender;
pub mod parallel;
pub mod porter_duff;
pub mod wide;

use crate::foundation::core::Rgba;
use crate::simd::Lanes;

pub use blender::{PixelBlender, RowBlender};
pub use parallel::{ParallelOpts, blend_rows_par, build_thread_pool};

/// Color blend applied where source and backdrop overlap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Add,
    Subtract,
    Screen,
    Darken,
    Lighten,
    Overlay,
    HardLight,
    Clear,
}

impl BlendMode {
    pub const ALL: [Self; 10] = [
        Self::Normal,
        Self::Multiply,
        Self::Add,
        Self::Subtract,
        Self::Screen,
        Self::Darken,
        Self::Lighten,
        Self::Overlay,
        Self::HardLight,
        Self::Clear,
    ];

    pub fn apply(self, backdrop: Rgba, source: Rgba) -> Rgba {
        match self {
            Self::Normal => porter_duff::normal(backdrop, source),
            Self::Multiply => porter_duff::multiply(backdrop, source),
            Self::Add => porter_duff::add(backdrop, source),
            Self::Subtract => porter_duff::subtract(backdrop, source),
            Self::Screen => porter_duff::screen(backdrop, source),
            Self::Darken => porter_duff::darken(backdrop, source),
            Self::Lighten => porter_duff::lighten(backdrop, source),
            Self::Overlay => porter_duff::overlay(backdrop, source),
            Self::HardLight => porter_duff::hard_light(backdrop, source),
            Self::Clear => porter_duff::clear(backdrop, source),
        }
    }

    #[inline]
    pub fn apply_wide<V: Lanes>(self, backdrop: V, source: V) -> V {
        match self {
            Self::Normal => wide::normal(backdrop, source),
            Self::Multiply => wide::multiply(backdrop, source),
            Self::Add => wide::add(backdrop, source),
            Self::Subtract => wide::subtract(backdrop, source),
            Self::Screen => wide::screen(backdrop, source),
            Self::Darken => wide::darken(backdrop, source),
            Self::Lighten => wide::lighten(backdrop, source),
            Self::Overlay => wide::overlay(backdrop, source),
            Self::HardLight => wide::hard_light(backdrop, source),
            Self::Clear => wide::clear(backdrop, source),
        }
    }
}

/// How source and backdrop coverage combine.
///
/// `Src*` variants place the source over the backdrop; `Dest*` variants swap the roles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaComposition {
    /// Source only, backdrop discarded.
    Src,
    SrcAtop,
    #[default]
    SrcOver,
    SrcIn,
    SrcOut,
    /// Backdrop only, source discarded.
    Dest,
    DestAtop,
    DestOver,
    DestIn,
    DestOut,
    /// Transparent regardless of inputs.
    Clear,
    Xor,
}

impl AlphaComposition {
    pub const ALL: [Self; 12] = [
        Self::Src,
        Self::SrcAtop,
        Self::SrcOver,
        Self::SrcIn,
        Self::SrcOut,
        Self::Dest,
        Self::DestAtop,
        Self::DestOver,
        Self::DestIn,
        Self::DestOut,
        Self::Clear,
        Self::Xor,
    ];
}

#[cfg(test)]
#[path = "../../tests/unit/composite/mod.rs"]
mod tests;
