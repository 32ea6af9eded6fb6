//! Thin Unix-domain-socket syscall binding.
//!
//! This crate exposes the POSIX Unix-socket syscalls (socket, bind, listen,
//! accept, connect, socketpair, getsockopt/setsockopt, fcntl,
//! getsockname/getpeername, strerror) as a leaf FFI adapter for higher-level
//! socket code. There is no protocol state machine and no scheduler here;
//! the engineering content is the native ABI surface itself: signature
//! declarations, in/out buffer marshaling for variable-length socket
//! addresses, byte-order-correct option buffers, and errno capture.
//!
//! # Modules
//!
//! - [`ffi`]: raw `extern "C"` declarations and native-library selection
//! - [`addr`]: [`SockAddrUnix`], the `sockaddr_un`-exact address buffer
//! - [`sockopt`]: option level/name constants and the boolean option buffer
//! - [`syscall`]: the marshaling wrappers consumed by callers
//! - [`error`]: structured failures for the resource-allocating operations
//!
//! # Example
//!
//! ```ignore
//! use udsock::{syscall, Domain, Type};
//!
//! let mut pair = [0; 2];
//! syscall::socketpair(Domain::UNIX, Type::STREAM, 0, &mut pair)?;
//! // pair[0] and pair[1] are connected descriptors owned by the caller.
//! ```
//!
//! # Error contract
//!
//! Only `socket` and `socketpair` translate a negative native return into a
//! structured [`Error`]. Every other operation returns the raw native result
//! code, leaving interpretation (including `EINPROGRESS` branching after a
//! non-blocking connect) to the caller. See [`syscall`] for the rationale.
//!
//! # Platform Support
//!
//! Unix-like platforms only. Abstract namespace addresses are Linux-only.
//! On Solaris/illumos the socket symbols are resolved from
//! `libsocket`/`libnsl`; elsewhere the single C library carries them.

pub mod addr;
pub mod error;
pub mod ffi;
pub mod sockopt;
pub mod syscall;
pub mod test_utils;

pub use addr::SockAddrUnix;
pub use error::{Error, ErrorKind, Result};
pub use sockopt::{BoolOpt, Level, OptName};
pub use syscall::{Domain, Type};
