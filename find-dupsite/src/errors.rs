//! Error definitions.
use std::result;

/// A specialized Result type for this library.
pub type Result<T, E = FindDupsiteError> = result::Result<T, E>;

/// Errors in this library.
///
/// Documents whose text cannot be fingerprinted are not errors;
/// see [`Exclusion`](crate::fingerprint::Exclusion).
#[derive(Debug, thiserror::Error)]
pub enum FindDupsiteError {
    /// Contains [`InputError`].
    #[error(transparent)]
    Input(#[from] InputError),
}

impl FindDupsiteError {
    pub(crate) fn input<M>(msg: M) -> Self
    where
        M: Into<String>,
    {
        Self::Input(InputError { msg: msg.into() })
    }
}

/// Error used when the input argument is invalid.
#[derive(Debug, thiserror::Error)]
#[error("InputError: {msg}")]
pub struct InputError {
    msg: String,
}
