use crate::foundation::error::{LanemixError, LanemixResult};
use crate::simd::LaneWidth;
use std::sync::OnceLock;

const ENV_FORCE_SCALAR: &str = "LANEMIX_FORCE_SCALAR";
const ENV_MAX_LANES: &str = "LANEMIX_MAX_LANES";

static DETECTED: OnceLock<Capability> = OnceLock::new();

/// Whether wide-vector execution is usable, and its native `f32` lane count.
///
/// Hardware capability never changes while the process runs, so [`Capability::detect`] is
/// computed once and shared.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Capability {
    accelerated: bool,
    lanes: usize,
}

impl Capability {
    /// Explicit capability, e.g. supplied by an embedding runtime.
    ///
    /// `lanes` must be a non-zero power of two.
    pub fn new(accelerated: bool, lanes: usize) -> LanemixResult<Self> {
        if !lanes.is_power_of_two() {
            return Err(LanemixError::validation(format!(
                "lane count must be a non-zero power of two, got {lanes}"
            )));
        }
        Ok(Self { accelerated, lanes })
    }

    /// No wide-vector facility: one lane, scalar kernels only.
    pub const fn scalar() -> Self {
        Self {
            accelerated: false,
            lanes: 1,
        }
    }

    /// Process-wide hardware capability.
    pub fn detect() -> Self {
        *DETECTED.get_or_init(|| {
            let cap = detect_hardware();
            tracing::debug!(
                accelerated = cap.accelerated,
                lanes = cap.lanes,
                "detected lane capability"
            );
            cap
        })
    }

    /// Hardware capability with `opts` overrides applied.
    pub fn detect_with(opts: DispatchOpts) -> Self {
        opts.apply(Self::detect())
    }

    pub fn is_accelerated(self) -> bool {
        self.accelerated
    }

    pub fn lanes(self) -> usize {
        self.lanes
    }

    /// True iff vector kernels may run: accelerated, with a lane count that is a multiple
    /// of four so packed RGBA pixels never straddle a register.
    pub fn is_available(self) -> bool {
        self.accelerated && self.lanes.is_multiple_of(4)
    }

    /// Kernel vector type for this capability, `None` when vector kernels may not run.
    pub fn lane_width(self) -> Option<LaneWidth> {
        if !self.is_available() {
            return None;
        }
        LaneWidth::for_lanes(self.lanes)
    }
}

fn detect_hardware() -> Capability {
    #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
    {
        if is_x86_feature_detected!("avx512f") {
            return accelerated(16);
        }
        if is_x86_feature_detected!("avx") {
            return accelerated(8);
        }
        if is_x86_feature_detected!("sse2") {
            return accelerated(4);
        }
    }

    #[cfg(target_arch = "aarch64")]
    {
        if std::arch::is_aarch64_feature_detected!("neon") {
            return accelerated(4);
        }
    }

    #[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
    {
        return accelerated(4);
    }

    #[allow(unreachable_code)]
    Capability::scalar()
}

#[allow(dead_code)]
fn accelerated(lanes: usize) -> Capability {
    Capability {
        accelerated: true,
        lanes,
    }
}

/// Overrides applied on top of detected hardware capability.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DispatchOpts {
    /// Report no acceleration regardless of hardware.
    pub force_scalar: bool,
    /// Cap the lane count (power of two). Caps below four disable acceleration.
    pub max_lanes: Option<usize>,
}

impl DispatchOpts {
    /// Read `LANEMIX_FORCE_SCALAR` and `LANEMIX_MAX_LANES`.
    pub fn from_env() -> LanemixResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(get: impl Fn(&str) -> Option<String>) -> LanemixResult<Self> {
        let force_scalar = match get(ENV_FORCE_SCALAR) {
            None => false,
            Some(v) => match v.trim().to_ascii_lowercase().as_str() {
                "" | "0" | "false" | "no" => false,
                "1" | "true" | "yes" => true,
                other => {
                    return Err(LanemixError::config(format!(
                        "{ENV_FORCE_SCALAR} expects a boolean, got {other:?}"
                    )));
                }
            },
        };

        let max_lanes = match get(ENV_MAX_LANES) {
            None => None,
            Some(v) => {
                let n = v.trim().parse::<usize>().map_err(|e| {
                    LanemixError::config(format!("{ENV_MAX_LANES} is not a lane count: {e}"))
                })?;
                if !n.is_power_of_two() {
                    return Err(LanemixError::config(format!(
                        "{ENV_MAX_LANES} must be a non-zero power of two, got {n}"
                    )));
                }
                Some(n)
            }
        };

        Ok(Self {
            force_scalar,
            max_lanes,
        })
    }

    pub fn apply(self, cap: Capability) -> Capability {
        if self.force_scalar || !cap.accelerated {
            return Capability::scalar();
        }
        let lanes = match self.max_lanes {
            Some(max) => cap.lanes.min(max),
            None => cap.lanes,
        };
        if lanes < 4 {
            return Capability::scalar();
        }
        Capability {
            accelerated: true,
            lanes,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/simd/capability.rs"]
mod tests;
