//! Raw native declarations for the Unix-socket syscall surface.
//!
//! One declaration per syscall, typed with the platform libc's ABI types.
//! Nothing in this module interprets results or touches errno; that is the
//! job of [`crate::syscall`]. Pointer parameters follow a strict direction
//! discipline enforced at the wrapper layer:
//!
//! - `*const sockaddr`: read-only in. The OS copies the bytes during the
//!   call and retains nothing.
//! - `*mut sockaddr`: write-only out (`accept`, `getsockname`,
//!   `getpeername`). The paired `*mut socklen_t` cell carries capacity in
//!   and the encoded length out.
//! - `*mut c_void` / `*const c_void`: option buffers, in/out per operation.
//!
//! # Library resolution
//!
//! On Solaris and illumos the socket symbols live in `libsocket`/`libnsl`
//! rather than the C library, so those are named on the extern block there;
//! everywhere else the single C library already linked by std carries every
//! symbol. Resolution happens once when the dynamic linker maps the process
//! image and is never torn down, so the binding carries no library handle
//! of its own.

use libc::{c_char, c_int, c_void, sockaddr, socklen_t};

#[cfg(any(target_os = "solaris", target_os = "illumos"))]
#[link(name = "socket")]
#[link(name = "nsl")]
extern "C" {}

extern "C" {
    /// `socket(2)`. Returns a new descriptor, or a negative value.
    pub fn socket(domain: c_int, ty: c_int, protocol: c_int) -> c_int;

    /// `socketpair(2)`. `sv` must point at two writable `c_int`s.
    pub fn socketpair(domain: c_int, ty: c_int, protocol: c_int, sv: *mut c_int) -> c_int;

    /// `bind(2)`. `addr` is read-only for the duration of the call.
    pub fn bind(fd: c_int, addr: *const sockaddr, len: socklen_t) -> c_int;

    /// `listen(2)`.
    pub fn listen(fd: c_int, backlog: c_int) -> c_int;

    /// `connect(2)`. Same read-only `addr` contract as `bind`.
    pub fn connect(fd: c_int, addr: *const sockaddr, len: socklen_t) -> c_int;

    /// `accept(2)`. Writes the peer address into `addr`; `len` carries the
    /// buffer capacity in and the encoded length out.
    pub fn accept(fd: c_int, addr: *mut sockaddr, len: *mut socklen_t) -> c_int;

    /// `getsockname(2)`. Same out-buffer contract as `accept`.
    pub fn getsockname(fd: c_int, addr: *mut sockaddr, len: *mut socklen_t) -> c_int;

    /// `getpeername(2)`. Same out-buffer contract as `accept`.
    pub fn getpeername(fd: c_int, addr: *mut sockaddr, len: *mut socklen_t) -> c_int;

    /// `getsockopt(2)`. `optlen` is in/out: capacity on entry, bytes
    /// written on return.
    pub fn getsockopt(
        fd: c_int,
        level: c_int,
        optname: c_int,
        optval: *mut c_void,
        optlen: *mut socklen_t,
    ) -> c_int;

    /// `setsockopt(2)`. `optval` is read-only.
    pub fn setsockopt(
        fd: c_int,
        level: c_int,
        optname: c_int,
        optval: *const c_void,
        optlen: socklen_t,
    ) -> c_int;

    /// `fcntl(2)` with an integer argument, the only form this binding
    /// needs: `F_GETFL` takes 0, `F_SETFL` takes the flag word.
    pub fn fcntl(fd: c_int, cmd: c_int, arg: c_int) -> c_int;

    /// `strerror(3)`. The returned pointer aims into a native buffer that
    /// the next call may reuse; copy the bytes out immediately.
    pub fn strerror(code: c_int) -> *const c_char;
}
