/// Convenience result type used across lanemix.
pub type LanemixResult<T> = Result<T, LanemixError>;

/// Errors returned by conversion, blending and configuration APIs.
///
/// Contract violations (running a vector kernel without an available capability) are debug
/// assertions, not variants here.
#[derive(thiserror::Error, Debug)]
pub enum LanemixError {
    /// Caller data rejected before anything was written: mismatched plane or row lengths,
    /// wrong component counts, out-of-range precision or lane counts.
    #[error("validation error: {0}")]
    Validation(String),

    /// Unparsable or out-of-range configuration, such as a bad `LANEMIX_*` variable.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies, e.g. thread-pool construction.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LanemixError {
    /// Build a [`LanemixError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LanemixError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
