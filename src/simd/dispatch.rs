use crate::simd::{Capability, LaneWidth};
use std::ops::Range;

/// Split of a run into a lane-aligned prefix and a scalar tail.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Partition {
    /// Elements handled by the vector kernel, a multiple of the lane count.
    pub vector_len: usize,
    /// Trailing elements handled by the scalar kernel, always `< lanes`.
    pub remainder: usize,
}

impl Partition {
    pub fn new(len: usize, lanes: usize) -> Self {
        debug_assert!(lanes > 0, "lane count must be non-zero");
        let remainder = len % lanes.max(1);
        Self {
            vector_len: len - remainder,
            remainder,
        }
    }

    pub fn len(self) -> usize {
        self.vector_len + self.remainder
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn vector_range(self) -> Range<usize> {
        0..self.vector_len
    }

    pub fn scalar_range(self) -> Range<usize> {
        self.vector_len..self.len()
    }
}

/// One kernel invocation produced by [`dispatch_split`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment {
    /// Run the vector kernel instantiated for `width` over `range`.
    Vector { range: Range<usize>, width: LaneWidth },
    /// Run the scalar kernel over `range`.
    Scalar { range: Range<usize> },
}

/// Partition `len` elements for `capability` and hand each non-empty segment to `run`.
///
/// The vector prefix `[0, vector_len)` is emitted first, then the scalar tail
/// `[vector_len, len)`. Segments never overlap and together cover the run exactly once;
/// `len == 0` emits nothing.
///
/// Calling this without an available capability is a contract violation and asserts in
/// debug builds. Release builds degrade to a single scalar segment.
pub fn dispatch_split(
    capability: Capability,
    len: usize,
    mut run: impl FnMut(Segment),
) -> Partition {
    debug_assert!(
        capability.is_available(),
        "vector dispatch requires an available lane capability, got {capability:?}"
    );

    let Some(width) = capability.lane_width() else {
        let partition = Partition {
            vector_len: 0,
            remainder: len,
        };
        if len > 0 {
            run(Segment::Scalar { range: 0..len });
        }
        return partition;
    };

    let partition = Partition::new(len, capability.lanes());
    if partition.vector_len > 0 {
        run(Segment::Vector {
            range: partition.vector_range(),
            width,
        });
    }
    if partition.remainder > 0 {
        run(Segment::Scalar {
            range: partition.scalar_range(),
        });
    }
    partition
}

#[cfg(test)]
#[path = "../../tests/unit/simd/dispatch.rs"]
mod tests;
