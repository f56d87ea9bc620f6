//! Error types for pagination requests and storage execution.

use std::borrow::Cow;

use strum::{AsRefStr, IntoStaticStr};

use crate::types::CursorError;

/// Type-erased error type used to carry storage failures unchanged.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Specialized [`Result`] type for catalog operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Categories of errors surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorKind {
    /// The request was rejected before any query was issued.
    InvalidArgument,
    /// The storage executor failed.
    Store,
    /// A single entity lookup found nothing.
    NotFound,
}

/// Error type for all pagination and storage operations.
#[derive(Debug, thiserror::Error)]
#[must_use = "pagination errors should be handled appropriately"]
pub enum Error {
    /// The request is malformed: non-positive limit or page, both cursors set,
    /// or a sort field the pagination mode cannot honour.
    #[error("Invalid argument: {0}")]
    InvalidArgument(Cow<'static, str>),

    /// A cursor token could not be decoded.
    ///
    /// Reported as [`ErrorKind::InvalidArgument`].
    #[error("Invalid argument: malformed cursor: {0}")]
    MalformedCursor(#[from] CursorError),

    /// The storage executor failed.
    ///
    /// The original error is kept as the source and is never retried here;
    /// retry policy belongs to the caller.
    #[error("Store error: {0}")]
    Store(#[source] BoxError),

    /// The requested entity does not exist.
    #[error("Not found: {0}")]
    NotFound(Cow<'static, str>),
}

impl Error {
    /// Creates a new invalid argument error.
    pub fn invalid_argument(message: impl Into<Cow<'static, str>>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Wraps a storage failure.
    pub fn store(error: impl Into<BoxError>) -> Self {
        Self::Store(error.into())
    }

    /// Creates a new not found error.
    pub fn not_found(message: impl Into<Cow<'static, str>>) -> Self {
        Self::NotFound(message.into())
    }

    /// Returns the error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) | Self::MalformedCursor(_) => ErrorKind::InvalidArgument,
            Self::Store(_) => ErrorKind::Store,
            Self::NotFound(_) => ErrorKind::NotFound,
        }
    }

    /// Returns the error kind as a string.
    pub fn kind_str(&self) -> &'static str {
        self.kind().into()
    }

    /// Returns whether the caller sent a request that can never succeed as is.
    pub fn is_invalid_argument(&self) -> bool {
        self.kind() == ErrorKind::InvalidArgument
    }

    /// Returns the storage failure, if this is one.
    pub fn store_source(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        match self {
            Self::Store(source) => Some(source.as_ref()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("connection reset")]
    struct ConnectionReset;

    #[test]
    fn malformed_cursor_is_invalid_argument() {
        let error = Error::from(CursorError::Encoding);
        assert!(error.is_invalid_argument());
        assert_eq!(error.kind_str(), "invalid_argument");
    }

    #[test]
    fn store_error_keeps_original() {
        let error = Error::store(ConnectionReset);
        assert_eq!(error.kind(), ErrorKind::Store);

        let source = error.store_source().expect("store error has a source");
        assert!(source.downcast_ref::<ConnectionReset>().is_some());
        assert_eq!(error.to_string(), "Store error: connection reset");
    }
}
