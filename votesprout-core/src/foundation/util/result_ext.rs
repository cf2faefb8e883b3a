//! Result/Option helper traits.
//!
//! Storage lookups return `Result<Option<T>>`; the repository usually wants a
//! `NotFound` error instead of `None`.

use crate::foundation::VoteSproutError;

/// Extension for converting `Result<Option<T>>` into `Result<T>`.
pub trait ResultExt<T> {
    /// Convert `Ok(None)` into an error.
    fn required(self, error: impl FnOnce() -> VoteSproutError) -> Result<T, VoteSproutError>;
}

impl<T> ResultExt<T> for Result<Option<T>, VoteSproutError> {
    fn required(self, error: impl FnOnce() -> VoteSproutError) -> Result<T, VoteSproutError> {
        self?.ok_or_else(error)
    }
}
