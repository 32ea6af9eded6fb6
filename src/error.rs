//! Error types for the syscall binding.
//!
//! Error handling here is deliberately two-tier:
//!
//! - The resource-allocating operations (`socket`, `socketpair`) and the
//!   address encoders surface a structured [`Error`] carrying the captured
//!   errno and a human-readable message.
//! - Every other operation returns the raw native result code uninterpreted;
//!   callers query [`syscall::last_error`](crate::syscall::last_error)
//!   themselves. No error at this layer is raised for those.
//!
//! Callers branch on raw errno values (e.g. `EINPROGRESS` after a
//! non-blocking connect) and must see them unfiltered, so the raw-return
//! operations never wrap their result codes.

use core::fmt;
use libc::c_int;
use std::sync::Arc;

/// The kind of error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    // === Allocation ===
    /// `socket(2)` returned a negative descriptor.
    SocketCreate,
    /// `socketpair(2)` failed to produce a connected pair.
    SocketPair,

    // === Address marshaling ===
    /// Path does not fit in the `sun_path` field.
    PathTooLong,
    /// Path contains a byte the address encoding cannot represent.
    InvalidAddress,
}

impl ErrorKind {
    /// Returns the error category for this kind.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::SocketCreate | Self::SocketPair => ErrorCategory::Allocation,
            Self::PathTooLong | Self::InvalidAddress => ErrorCategory::Address,
        }
    }
}

/// High-level error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// A syscall that allocates a descriptor failed.
    Allocation,
    /// An address could not be encoded; no syscall was attempted.
    Address,
}

/// The error type for binding operations that can fail structurally.
#[derive(Debug, Clone)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    errno: Option<c_int>,
    source: Option<Arc<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            errno: None,
            source: None,
        }
    }

    /// Returns the error kind.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error category.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    /// Returns the errno captured when the native call failed, if any.
    ///
    /// Address-marshaling errors never reach the OS and carry no errno.
    #[must_use]
    pub const fn errno(&self) -> Option<c_int> {
        self.errno
    }

    /// Returns the error message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns true if a descriptor-allocating syscall failed.
    #[must_use]
    pub const fn is_allocation(&self) -> bool {
        matches!(self.kind.category(), ErrorCategory::Allocation)
    }

    /// Adds a message description to the error.
    #[must_use]
    pub fn with_message(mut self, msg: impl Into<String>) -> Self {
        self.message = Some(msg.into());
        self
    }

    /// Records the errno captured after the failing call.
    #[must_use]
    pub const fn with_errno(mut self, errno: c_int) -> Self {
        self.errno = Some(errno);
        self
    }

    /// Adds a source error to the chain.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Arc::new(source));
        self
    }

    /// Creates a `socket(2)` failure from a captured errno and its strerror text.
    #[must_use]
    pub fn socket_create(errno: c_int, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::SocketCreate)
            .with_errno(errno)
            .with_message(detail)
    }

    /// Creates a `socketpair(2)` failure from a captured errno and its strerror text.
    #[must_use]
    pub fn socket_pair(errno: c_int, detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::SocketPair)
            .with_errno(errno)
            .with_message(format!("socketpair(2) failed: {}", detail.into()))
    }

    /// Creates a path-too-long error.
    #[must_use]
    pub fn path_too_long(actual: usize, max: usize) -> Self {
        Self::new(ErrorKind::PathTooLong)
            .with_message(format!("path length {actual} exceeds sun_path capacity {max}"))
    }

    /// Creates an invalid-address error.
    #[must_use]
    pub fn invalid_address(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidAddress).with_message(detail)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(msg) = &self.message {
            write!(f, ": {msg}")?;
        }
        if let Some(errno) = self.errno {
            write!(f, " (errno {errno})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e.as_ref() as _)
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        match e.errno {
            // Preserve the OS error kind so `?` chains classify correctly.
            Some(code) => {
                let kind = Self::from_raw_os_error(code).kind();
                Self::new(kind, e)
            }
            None => Self::new(std::io::ErrorKind::InvalidInput, e),
        }
    }
}

/// A specialized Result type for binding operations.
pub type Result<T> = core::result::Result<T, Error>;
