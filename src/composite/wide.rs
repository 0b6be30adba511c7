//! Lane forms of [`crate::composite::porter_duff`].
//!
//! Each vector packs `V::LANES / 4` RGBA pixels; every function acts on each packed pixel
//! exactly like the scalar function of the same name.

use crate::foundation::core::EPSILON;
use crate::simd::Lanes;

#[inline(always)]
fn one<V: Lanes>() -> V {
    V::splat(1.0)
}

/// Lane form of [`porter_duff::normal`](super::porter_duff::normal).
#[inline(always)]
pub fn normal<V: Lanes>(_backdrop: V, source: V) -> V {
    source
}

/// Lane form of [`porter_duff::multiply`](super::porter_duff::multiply).
#[inline(always)]
pub fn multiply<V: Lanes>(backdrop: V, source: V) -> V {
    backdrop * source
}

/// Lane form of [`porter_duff::add`](super::porter_duff::add).
#[inline(always)]
pub fn add<V: Lanes>(backdrop: V, source: V) -> V {
    one::<V>().min(backdrop + source)
}

/// Lane form of [`porter_duff::subtract`](super::porter_duff::subtract).
#[inline(always)]
pub fn subtract<V: Lanes>(backdrop: V, source: V) -> V {
    V::splat(0.0).max(backdrop - source)
}

/// Lane form of [`porter_duff::screen`](super::porter_duff::screen).
#[inline(always)]
pub fn screen<V: Lanes>(backdrop: V, source: V) -> V {
    let one = one::<V>();
    one - (one - backdrop) * (one - source)
}

/// Lane form of [`porter_duff::darken`](super::porter_duff::darken).
#[inline(always)]
pub fn darken<V: Lanes>(backdrop: V, source: V) -> V {
    backdrop.min(source)
}

/// Lane form of [`porter_duff::lighten`](super::porter_duff::lighten).
#[inline(always)]
pub fn lighten<V: Lanes>(backdrop: V, source: V) -> V {
    backdrop.max(source)
}

/// Lane form of [`porter_duff::overlay`](super::porter_duff::overlay); the alpha lane takes the source alpha.
#[inline(always)]
pub fn overlay<V: Lanes>(backdrop: V, source: V) -> V {
    overlay_value(backdrop, source)
        .min(one())
        .with_alpha_of(source)
}

/// Lane form of [`porter_duff::hard_light`](super::porter_duff::hard_light); the alpha lane takes the source alpha.
#[inline(always)]
pub fn hard_light<V: Lanes>(backdrop: V, source: V) -> V {
    overlay_value(source, backdrop)
        .min(one())
        .with_alpha_of(source)
}

/// Lane form of [`porter_duff::clear`](super::porter_duff::clear).
#[inline(always)]
pub fn clear<V: Lanes>(_backdrop: V, _source: V) -> V {
    V::splat(0.0)
}

/// Per-lane [`porter_duff::overlay_value`](super::porter_duff::overlay_value): `backdrop > 0.5` selects the screen-like branch.
#[inline(always)]
pub fn overlay_value<V: Lanes>(backdrop: V, source: V) -> V {
    let one = one::<V>();
    let low = (backdrop + backdrop) * source;
    let inv_source = one - source;
    let high = one - (inv_source + inv_source) * (one - backdrop);
    backdrop.select_gt(V::splat(0.5), high, low)
}

/// Lane form of [`porter_duff::over`](super::porter_duff::over).
#[inline(always)]
pub fn over<V: Lanes>(destination: V, source: V, blend: V) -> V {
    let sw = source.alpha_splat();
    let dw = destination.alpha_splat();

    let blend_w = sw * dw;
    let dst_w = dw - blend_w;
    let src_w = sw - blend_w;

    let alpha = dst_w + sw;
    let color = destination * dst_w + source * src_w + blend * blend_w;

    unpremultiply(color, alpha)
}

/// Lane form of [`porter_duff::atop`](super::porter_duff::atop).
#[inline(always)]
pub fn atop<V: Lanes>(destination: V, source: V, blend: V) -> V {
    let sw = source.alpha_splat();
    let alpha = destination.alpha_splat();

    let blend_w = sw * alpha;
    let dst_w = alpha - blend_w;

    let color = destination * dst_w + blend * blend_w;

    unpremultiply(color, alpha)
}

/// Lane form of [`porter_duff::in_`](super::porter_duff::in_).
#[inline(always)]
pub fn in_<V: Lanes>(destination: V, source: V) -> V {
    let alpha = destination.alpha_splat() * source.alpha_splat();
    unpremultiply(source * alpha, alpha)
}

/// Lane form of [`porter_duff::out`](super::porter_duff::out).
#[inline(always)]
pub fn out<V: Lanes>(destination: V, source: V) -> V {
    let alpha = (one::<V>() - destination.alpha_splat()) * source.alpha_splat();
    unpremultiply(source * alpha, alpha)
}

/// Lane form of [`porter_duff::xor`](super::porter_duff::xor).
#[inline(always)]
pub fn xor<V: Lanes>(destination: V, source: V) -> V {
    let sw = source.alpha_splat();
    let dw = destination.alpha_splat();

    let one = one::<V>();
    let src_w = one - dw;
    let dst_w = one - sw;

    let alpha = sw * src_w + dw * dst_w;
    let color = sw * source * src_w + dw * destination * dst_w;

    unpremultiply(color, alpha)
}

#[inline(always)]
fn unpremultiply<V: Lanes>(color: V, alpha: V) -> V {
    (color / alpha.max(V::splat(EPSILON))).with_alpha_of(alpha)
}

#[cfg(test)]
#[path = "../../tests/unit/composite/wide.rs"]
mod tests;
