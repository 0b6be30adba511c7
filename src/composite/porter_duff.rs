//! Single-pixel blend and alpha-composition equations over straight-alpha colors.
//!
//! [`crate::composite::wide`] mirrors every function here lane-wise with the same
//! expression tree, so the two forms agree to the bit for finite inputs.

use crate::foundation::core::{EPSILON, Rgba};

/// `source`, unchanged.
pub fn normal(_backdrop: Rgba, source: Rgba) -> Rgba {
    source
}

/// `backdrop · source` per channel.
pub fn multiply(backdrop: Rgba, source: Rgba) -> Rgba {
    backdrop * source
}

/// `min(1, backdrop + source)` per channel.
pub fn add(backdrop: Rgba, source: Rgba) -> Rgba {
    Rgba::ONE.min(backdrop + source)
}

/// `max(0, backdrop - source)` per channel.
pub fn subtract(backdrop: Rgba, source: Rgba) -> Rgba {
    Rgba::TRANSPARENT.max(backdrop - source)
}

/// `1 - (1 - backdrop) · (1 - source)` per channel.
pub fn screen(backdrop: Rgba, source: Rgba) -> Rgba {
    Rgba::ONE - (Rgba::ONE - backdrop) * (Rgba::ONE - source)
}

/// Per-channel minimum.
pub fn darken(backdrop: Rgba, source: Rgba) -> Rgba {
    backdrop.min(source)
}

/// Per-channel maximum.
pub fn lighten(backdrop: Rgba, source: Rgba) -> Rgba {
    backdrop.max(source)
}

/// Overlay on RGB; alpha is the source alpha, as with [`normal`].
pub fn overlay(backdrop: Rgba, source: Rgba) -> Rgba {
    Rgba::new(
        overlay_value(backdrop.r, source.r),
        overlay_value(backdrop.g, source.g),
        overlay_value(backdrop.b, source.b),
        0.0,
    )
    .min(Rgba::ONE)
    .with_alpha_of(source)
}

/// [`overlay`] with backdrop and source swapped on RGB; alpha is the source alpha.
pub fn hard_light(backdrop: Rgba, source: Rgba) -> Rgba {
    Rgba::new(
        overlay_value(source.r, backdrop.r),
        overlay_value(source.g, backdrop.g),
        overlay_value(source.b, backdrop.b),
        0.0,
    )
    .min(Rgba::ONE)
    .with_alpha_of(source)
}

/// Transparent black regardless of inputs.
pub fn clear(_backdrop: Rgba, _source: Rgba) -> Rgba {
    Rgba::TRANSPARENT
}

/// Single-channel overlay shared by [`overlay`] and [`hard_light`].
///
/// For inputs in `[0, 1]` the result is never negative, so only the upper bound is clamped
/// by the callers.
pub fn overlay_value(backdrop: f32, source: f32) -> f32 {
    if backdrop <= 0.5 {
        (backdrop + backdrop) * source
    } else {
        let inv_source = 1.0 - source;
        1.0 - (inv_source + inv_source) * (1.0 - backdrop)
    }
}

/// Source over destination, with `blend` filling the region both cover.
pub fn over(destination: Rgba, source: Rgba, blend: Rgba) -> Rgba {
    let sw = source.alpha_splat();
    let dw = destination.alpha_splat();

    let blend_w = sw * dw;
    let dst_w = dw - blend_w;
    let src_w = sw - blend_w;

    let alpha = dst_w + sw;
    let color = destination * dst_w + source * src_w + blend * blend_w;

    unpremultiply(color, alpha)
}

/// Source atop destination: coverage of the destination, `blend` where both overlap.
pub fn atop(destination: Rgba, source: Rgba, blend: Rgba) -> Rgba {
    let sw = source.alpha_splat();
    let alpha = destination.alpha_splat();

    let blend_w = sw * alpha;
    let dst_w = alpha - blend_w;

    let color = destination * dst_w + blend * blend_w;

    unpremultiply(color, alpha)
}

/// Source kept only where the destination has coverage.
pub fn in_(destination: Rgba, source: Rgba) -> Rgba {
    let alpha = destination.alpha_splat() * source.alpha_splat();
    unpremultiply(source * alpha, alpha)
}

/// Source kept only where the destination has no coverage.
pub fn out(destination: Rgba, source: Rgba) -> Rgba {
    let alpha = (Rgba::ONE - destination.alpha_splat()) * source.alpha_splat();
    unpremultiply(source * alpha, alpha)
}

/// Source and destination each kept where the other has no coverage.
pub fn xor(destination: Rgba, source: Rgba) -> Rgba {
    let sw = source.alpha_splat();
    let dw = destination.alpha_splat();

    let src_w = Rgba::ONE - dw;
    let dst_w = Rgba::ONE - sw;

    let alpha = sw * src_w + dw * dst_w;
    let color = sw * source * src_w + dw * destination * dst_w;

    unpremultiply(color, alpha)
}

/// Divide by `max(alpha, EPSILON)` and write `alpha` into the alpha channel undivided.
fn unpremultiply(color: Rgba, alpha: Rgba) -> Rgba {
    (color / alpha.max(Rgba::splat(EPSILON))).with_alpha_of(alpha)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/porter_duff.rs"]
mod tests;
