use crate::composite::RowBlender;
use crate::composite::blender::check_row;
use crate::foundation::error::{LanemixError, LanemixResult};
use crate::simd::RGBA_CHANNELS;
use rayon::prelude::*;

/// Options for [`blend_rows_par`].
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ParallelOpts {
    /// Worker threads; `None` lets rayon pick.
    pub threads: Option<usize>,
    /// Rows handed to one task at a time.
    pub min_rows_per_task: usize,
}

impl Default for ParallelOpts {
    fn default() -> Self {
        Self {
            threads: None,
            min_rows_per_task: 16,
        }
    }
}

/// Blend an image of `width`-pixel rows, fanning row groups out over a rayon pool.
///
/// `backdrop` and `source` hold whole rows of interleaved RGBA. Rows are disjoint so
/// each task mutates only its own slice of `backdrop`.
#[tracing::instrument(
    level = "trace",
    skip_all,
    fields(width = width, row_count = backdrop.len() / width.saturating_mul(RGBA_CHANNELS).max(1), threads = ?opts.threads)
)]
pub fn blend_rows_par(
    rows: &RowBlender,
    backdrop: &mut [f32],
    source: &[f32],
    width: usize,
    opacity: f32,
    opts: &ParallelOpts,
) -> LanemixResult<()> {
    check_row("source", backdrop.len(), source.len())?;
    if width == 0 {
        return Err(LanemixError::validation("row width must be >= 1 pixel"));
    }
    let Some(stride) = width.checked_mul(RGBA_CHANNELS) else {
        return Err(LanemixError::validation(format!(
            "row width of {width} pixels overflows the sample count"
        )));
    };
    if !backdrop.len().is_multiple_of(stride) {
        return Err(LanemixError::validation(format!(
            "buffer of {} samples is not a whole number of {width}-pixel rows",
            backdrop.len()
        )));
    }
    if opts.min_rows_per_task == 0 {
        return Err(LanemixError::validation(
            "parallel 'min_rows_per_task' must be >= 1",
        ));
    }
    if backdrop.is_empty() {
        return Ok(());
    }

    let chunk = stride.saturating_mul(opts.min_rows_per_task);
    let pool = build_thread_pool(opts.threads)?;
    pool.install(|| {
        backdrop
            .par_chunks_mut(chunk)
            .zip(source.par_chunks(chunk))
            .try_for_each(|(dst, src)| rows.blend_in_place(dst, src, opacity))
    })
}

/// Build a rayon pool with `threads` workers, or rayon's default when `None`.
pub fn build_thread_pool(threads: Option<usize>) -> LanemixResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(LanemixError::validation(
            "parallel 'threads' must be >= 1 when set",
        ));
    }
    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder.build().map_err(|e| {
        LanemixError::Other(anyhow::Error::new(e).context("failed to build rayon thread pool"))
    })
}

#[cfg(test)]
#[path = "../../tests/unit/composite/parallel.rs"]
mod tests;
