//! The marshaling layer over the raw native declarations.
//!
//! Each function here is thin over exactly one syscall from [`crate::ffi`]:
//! it arranges buffers and pointers, makes the call, and hands the result
//! back under the binding's two-tier error contract:
//!
//! - [`socket`] and [`socketpair`] allocate descriptors; a negative native
//!   return becomes a structured [`Error`] whose message comes from
//!   [`strerror`] keyed by the errno captured immediately after the call.
//! - Everything else returns the raw native result code. Callers that need
//!   a reason query [`last_error`] / [`last_error_string`] themselves,
//!   before making any other native call on the same thread (errno is
//!   thread-local and the next call overwrites it).
//!
//! Blocking behavior is entirely the OS's: nothing here suspends, times
//! out, retries, or owns a descriptor.
//!
//! # Example
//!
//! ```ignore
//! use udsock::{syscall, Domain, SockAddrUnix, Type};
//!
//! let fd = syscall::socket(Domain::UNIX, Type::STREAM, 0)?;
//! let (addr, len) = SockAddrUnix::new("/run/app.sock")?;
//! if syscall::connect(fd, &addr, len) < 0 {
//!     let errno = syscall::last_error();
//!     // non-blocking sockets report EINPROGRESS here; that is not a failure
//! }
//! ```

use crate::addr::SockAddrUnix;
use crate::error::{Error, Result};
use crate::ffi;
use crate::sockopt::{BoolOpt, Level, OptName};
use libc::{c_int, socklen_t};
use std::ffi::CStr;
use std::io;
use std::os::unix::io::RawFd;
use tracing::{debug, trace};

/// A protocol family for [`socket`] / [`socketpair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Domain(c_int);

impl Domain {
    /// `AF_UNIX`, the Unix (local) domain.
    pub const UNIX: Self = Self(libc::AF_UNIX);

    /// Wraps a raw domain value.
    #[must_use]
    pub const fn from_raw(raw: c_int) -> Self {
        Self(raw)
    }

    /// Returns the raw domain value.
    #[must_use]
    pub const fn raw(self) -> c_int {
        self.0
    }
}

/// A socket type for [`socket`] / [`socketpair`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Type(c_int);

impl Type {
    /// `SOCK_STREAM`: connection-oriented byte stream.
    pub const STREAM: Self = Self(libc::SOCK_STREAM);
    /// `SOCK_DGRAM`: connectionless datagrams.
    pub const DGRAM: Self = Self(libc::SOCK_DGRAM);
    /// `SOCK_SEQPACKET`: connection-oriented datagrams.
    pub const SEQPACKET: Self = Self(libc::SOCK_SEQPACKET);

    /// Wraps a raw type value.
    #[must_use]
    pub const fn from_raw(raw: c_int) -> Self {
        Self(raw)
    }

    /// Returns the raw type value.
    #[must_use]
    pub const fn raw(self) -> c_int {
        self.0
    }
}

/// Creates a socket, returning the new descriptor.
///
/// The descriptor is owned by the caller; this layer never closes one.
///
/// # Errors
///
/// A negative native return becomes
/// [`ErrorKind::SocketCreate`](crate::ErrorKind::SocketCreate) carrying the
/// captured errno and its description.
pub fn socket(domain: Domain, ty: Type, protocol: c_int) -> Result<RawFd> {
    let fd = unsafe { ffi::socket(domain.raw(), ty.raw(), protocol) };
    if fd < 0 {
        let errno = last_error();
        return Err(Error::socket_create(errno, strerror(errno)));
    }
    trace!(fd, domain = domain.raw(), ty = ty.raw(), protocol, "socket created");
    Ok(fd)
}

/// Creates a pair of connected sockets, filling `sv`.
///
/// # Errors
///
/// A negative native return becomes
/// [`ErrorKind::SocketPair`](crate::ErrorKind::SocketPair) carrying the
/// captured errno and its description. On error `sv` is unspecified.
pub fn socketpair(domain: Domain, ty: Type, protocol: c_int, sv: &mut [RawFd; 2]) -> Result<()> {
    let rc = unsafe { ffi::socketpair(domain.raw(), ty.raw(), protocol, sv.as_mut_ptr()) };
    if rc < 0 {
        let errno = last_error();
        return Err(Error::socket_pair(errno, strerror(errno)));
    }
    trace!(a = sv[0], b = sv[1], "socketpair created");
    Ok(())
}

/// Binds `fd` to `addr`. Returns the raw native result (0 on success).
#[must_use]
pub fn bind(fd: RawFd, addr: &SockAddrUnix, len: socklen_t) -> c_int {
    unsafe { ffi::bind(fd, addr.as_sockaddr_ptr(), len) }
}

/// Marks `fd` as a passive socket. Returns the raw native result.
#[must_use]
pub fn listen(fd: RawFd, backlog: c_int) -> c_int {
    unsafe { ffi::listen(fd, backlog) }
}

/// Connects `fd` to the peer at `addr`. Returns the raw native result.
///
/// On a non-blocking descriptor a negative return with
/// `last_error() == EINPROGRESS` means the connection attempt is underway,
/// not failed; the caller decides how to wait.
#[must_use]
pub fn connect(fd: RawFd, addr: &SockAddrUnix, len: socklen_t) -> c_int {
    unsafe { ffi::connect(fd, addr.as_sockaddr_ptr(), len) }
}

/// Accepts a pending connection on a listening `fd`.
///
/// `addr` receives the peer address; `len` must hold the buffer capacity on
/// entry ([`SockAddrUnix::capacity`]) and holds the encoded length on
/// return. Returns the new descriptor, or a negative raw result.
#[must_use]
pub fn accept(fd: RawFd, addr: &mut SockAddrUnix, len: &mut socklen_t) -> c_int {
    unsafe { ffi::accept(fd, addr.as_mut_sockaddr_ptr(), len) }
}

/// Reads the local address of `fd`. Same buffer contract as [`accept`];
/// returns the raw native result.
#[must_use]
pub fn getsockname(fd: RawFd, addr: &mut SockAddrUnix, len: &mut socklen_t) -> c_int {
    unsafe { ffi::getsockname(fd, addr.as_mut_sockaddr_ptr(), len) }
}

/// Reads the peer address of `fd`. Same buffer contract as [`accept`];
/// returns the raw native result.
#[must_use]
pub fn getpeername(fd: RawFd, addr: &mut SockAddrUnix, len: &mut socklen_t) -> c_int {
    unsafe { ffi::getpeername(fd, addr.as_mut_sockaddr_ptr(), len) }
}

/// Reads a socket option into `buf`.
///
/// `len` must hold the usable buffer capacity on entry and holds the bytes
/// written on return. Returns the raw native result.
#[must_use]
pub fn getsockopt(
    fd: RawFd,
    level: Level,
    name: OptName,
    buf: &mut [u8],
    len: &mut socklen_t,
) -> c_int {
    unsafe { ffi::getsockopt(fd, level.raw(), name.raw(), buf.as_mut_ptr().cast(), len) }
}

/// Writes a socket option from `buf`. Returns the raw native result.
#[must_use]
pub fn setsockopt(fd: RawFd, level: Level, name: OptName, buf: &[u8]) -> c_int {
    unsafe {
        ffi::setsockopt(
            fd,
            level.raw(),
            name.raw(),
            buf.as_ptr().cast(),
            buf.len() as socklen_t,
        )
    }
}

/// Sets a boolean option through the 4-byte big-endian buffer.
///
/// Returns the raw native result of `setsockopt(2)`.
#[must_use]
pub fn set_bool_opt(fd: RawFd, level: Level, name: OptName, enabled: bool) -> c_int {
    let opt = BoolOpt::new(enabled);
    setsockopt(fd, level, name, opt.as_bytes())
}

/// `fcntl(2)` with an integer argument. Returns the command-specific raw
/// result (callers do not always check it).
#[must_use]
pub fn fcntl(fd: RawFd, cmd: c_int, arg: c_int) -> c_int {
    unsafe { ffi::fcntl(fd, cmd, arg) }
}

/// Captures the calling thread's errno.
///
/// Must be called immediately after the failing native call: errno is
/// thread-local and any intervening native call may overwrite it.
#[must_use]
pub fn last_error() -> c_int {
    io::Error::last_os_error().raw_os_error().unwrap_or(0)
}

/// Returns the description for an error code. Never fails; unknown codes
/// yield the platform's "unknown error" text.
///
/// The native message is copied into an owned `String` before returning;
/// `strerror(3)` may reuse a static buffer on the next call.
#[must_use]
pub fn strerror(code: c_int) -> String {
    let ptr = unsafe { ffi::strerror(code) };
    if ptr.is_null() {
        return format!("Unknown error {code}");
    }
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Returns the description for the calling thread's current errno.
#[must_use]
pub fn last_error_string() -> String {
    strerror(last_error())
}

/// Switches `fd` between blocking and non-blocking mode.
///
/// Reads the flag word with `F_GETFL`, sets or clears `O_NONBLOCK`, and
/// writes it back with `F_SETFL`. Other flags are untouched.
///
/// Failures of either fcntl are silently ignored, a known limitation of
/// the binding's contract. The ignored failure is recorded at debug level
/// only.
pub fn set_blocking(fd: RawFd, block: bool) {
    let flags = fcntl(fd, libc::F_GETFL, 0);
    if flags < 0 {
        debug!(fd, errno = last_error(), "fcntl(F_GETFL) failed; blocking mode unchanged");
        return;
    }
    let flags = if block {
        flags & !libc::O_NONBLOCK
    } else {
        flags | libc::O_NONBLOCK
    };
    if fcntl(fd, libc::F_SETFL, flags) < 0 {
        debug!(fd, errno = last_error(), "fcntl(F_SETFL) failed; blocking mode unchanged");
    }
}
