//! The Unix-socket address buffer.
//!
//! [`SockAddrUnix`] is a caller-owned buffer with the exact
//! `libc::sockaddr_un` layout: family tag followed by the path field. The
//! binding reads from it on outbound calls (`bind`, `connect`) and the OS
//! writes into it on inbound calls (`accept`, `getsockname`,
//! `getpeername`). The encoded length travels separately, in the caller's
//! in/out length cell, so decoding accessors take the reported length as an
//! argument rather than trusting the buffer contents alone.
//!
//! # Encoding conventions
//!
//! - Pathname addresses are NUL-terminated inside the buffer; the encoded
//!   length covers the family field, the path bytes, and the terminator.
//! - Unnamed addresses (unbound sockets, `socketpair` peers) report a
//!   length that covers at most the family field.
//! - Abstract addresses (Linux) put a leading NUL in the path field; the
//!   name may contain arbitrary bytes and there is no terminator.

use crate::error::{Error, Result};
use libc::{sa_family_t, sockaddr, sockaddr_un, socklen_t};
use std::ffi::OsStr;
use std::mem;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

/// A Unix-domain socket address with `sockaddr_un`-exact layout.
///
/// The wrapper is `repr(transparent)`, so a `*const SockAddrUnix` is a
/// `*const sockaddr_un` as far as the ABI is concerned. Lengths are not
/// stored here; they live in the caller's length cell (see module docs).
#[repr(transparent)]
#[derive(Clone, Copy)]
pub struct SockAddrUnix {
    storage: sockaddr_un,
}

impl SockAddrUnix {
    /// Byte offset of the path field within the native structure.
    fn sun_path_offset() -> usize {
        mem::offset_of!(sockaddr_un, sun_path)
    }

    /// Total buffer capacity, as passed to the OS on inbound calls.
    #[must_use]
    pub fn capacity() -> socklen_t {
        mem::size_of::<sockaddr_un>() as socklen_t
    }

    /// Creates an all-zero buffer for the OS to fill (`accept`,
    /// `getsockname`, `getpeername`).
    #[must_use]
    pub fn zeroed() -> Self {
        Self {
            // sockaddr_un is plain-old-data; all-zero is a valid value.
            storage: unsafe { mem::zeroed() },
        }
    }

    /// Encodes a filesystem path, returning the buffer and its encoded
    /// length.
    ///
    /// # Errors
    ///
    /// - [`ErrorKind::InvalidAddress`](crate::ErrorKind::InvalidAddress) if
    ///   the path contains an interior NUL byte.
    /// - [`ErrorKind::PathTooLong`](crate::ErrorKind::PathTooLong) if the
    ///   path does not leave room for the terminating NUL in `sun_path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<(Self, socklen_t)> {
        let bytes = path.as_ref().as_os_str().as_bytes();
        if bytes.contains(&0) {
            return Err(Error::invalid_address(
                "paths may not contain interior NUL bytes",
            ));
        }

        let mut addr = Self::zeroed();
        let capacity = addr.storage.sun_path.len();
        if bytes.len() >= capacity {
            return Err(Error::path_too_long(bytes.len(), capacity));
        }
        addr.storage.sun_family = libc::AF_UNIX as sa_family_t;
        for (dst, src) in addr.storage.sun_path.iter_mut().zip(bytes) {
            *dst = *src as libc::c_char;
        }

        // The terminating NUL is already present from zeroing and is
        // counted in the encoded length; an empty path encodes unnamed.
        let mut len = Self::sun_path_offset() + bytes.len();
        if !bytes.is_empty() {
            len += 1;
        }
        Ok((addr, len as socklen_t))
    }

    /// Encodes a Linux abstract-namespace name (without the leading NUL).
    ///
    /// # Errors
    ///
    /// [`ErrorKind::PathTooLong`](crate::ErrorKind::PathTooLong) if the name
    /// plus the leading NUL exceeds `sun_path`.
    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub fn new_abstract(name: &[u8]) -> Result<(Self, socklen_t)> {
        let mut addr = Self::zeroed();
        let capacity = addr.storage.sun_path.len();
        if name.len() + 1 > capacity {
            return Err(Error::path_too_long(name.len() + 1, capacity));
        }
        addr.storage.sun_family = libc::AF_UNIX as sa_family_t;
        // sun_path[0] stays NUL; the name follows without a terminator.
        for (dst, src) in addr.storage.sun_path[1..].iter_mut().zip(name) {
            *dst = *src as libc::c_char;
        }
        let len = Self::sun_path_offset() + 1 + name.len();
        Ok((addr, len as socklen_t))
    }

    /// Returns the address family tag.
    #[must_use]
    pub fn family(&self) -> sa_family_t {
        self.storage.sun_family
    }

    /// Returns true if the reported length describes an unnamed address.
    #[must_use]
    pub fn is_unnamed(&self, len: socklen_t) -> bool {
        len as usize <= Self::sun_path_offset()
    }

    /// Decodes the pathname for a filesystem address.
    ///
    /// Returns `None` for unnamed and abstract addresses. The path bytes
    /// are taken up to the reported length, honoring the NUL-termination
    /// convention (a terminator inside the reported range ends the path).
    #[must_use]
    pub fn path(&self, len: socklen_t) -> Option<&Path> {
        let bytes = self.path_bytes(len)?;
        if bytes.first() == Some(&0) {
            return None;
        }
        let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
        Some(Path::new(OsStr::from_bytes(&bytes[..end])))
    }

    /// Decodes the name of a Linux abstract-namespace address.
    ///
    /// Returns `None` for unnamed and pathname addresses.
    #[cfg(any(target_os = "linux", target_os = "android"))]
    #[must_use]
    pub fn abstract_name(&self, len: socklen_t) -> Option<&[u8]> {
        let bytes = self.path_bytes(len)?;
        if bytes.first() != Some(&0) {
            return None;
        }
        Some(&bytes[1..])
    }

    /// The in-range portion of `sun_path` for a reported length, viewed as
    /// bytes. `None` when the length covers no path bytes at all.
    fn path_bytes(&self, len: socklen_t) -> Option<&[u8]> {
        let offset = Self::sun_path_offset();
        let len = len as usize;
        if len <= offset {
            return None;
        }
        let n = (len - offset).min(self.storage.sun_path.len());
        // sun_path is c_char, which is i8 on some targets; reinterpret as
        // bytes without copying.
        Some(unsafe { std::slice::from_raw_parts(self.storage.sun_path.as_ptr().cast::<u8>(), n) })
    }

    /// Read-only pointer for outbound calls. Valid only for the duration of
    /// the native call; the OS must not retain it.
    #[must_use]
    pub fn as_sockaddr_ptr(&self) -> *const sockaddr {
        std::ptr::from_ref(&self.storage).cast()
    }

    /// Writable pointer for inbound calls. Same transience contract.
    #[must_use]
    pub fn as_mut_sockaddr_ptr(&mut self) -> *mut sockaddr {
        std::ptr::from_mut(&mut self.storage).cast()
    }
}

impl std::fmt::Debug for SockAddrUnix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Without the length cell the path extent is unknowable; show the
        // family and the NUL-terminated prefix as a best effort.
        let guess = self.path(Self::capacity());
        f.debug_struct("SockAddrUnix")
            .field("family", &self.storage.sun_family)
            .field("path", &guess)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test(name: &str) {
        crate::test_utils::init_test_logging();
        crate::test_phase!(name);
    }

    #[test]
    fn pathname_encode_layout() {
        init_test("pathname_encode_layout");
        let (addr, len) = SockAddrUnix::new("/tmp/udsock_addr_test.sock").expect("encode failed");

        let expected_len =
            SockAddrUnix::sun_path_offset() + "/tmp/udsock_addr_test.sock".len() + 1;
        crate::assert_with_log!(
            addr.family() == libc::AF_UNIX as sa_family_t,
            "family tag",
            libc::AF_UNIX,
            addr.family()
        );
        crate::assert_with_log!(len as usize == expected_len, "encoded len", expected_len, len);
        crate::assert_with_log!(
            len <= SockAddrUnix::capacity(),
            "len within capacity",
            true,
            len <= SockAddrUnix::capacity()
        );
        crate::test_complete!("pathname_encode_layout");
    }

    #[test]
    fn pathname_decode_round_trip() {
        init_test("pathname_decode_round_trip");
        let original = Path::new("/run/udsock/echo.sock");
        let (addr, len) = SockAddrUnix::new(original).expect("encode failed");

        let decoded = addr.path(len).expect("decode returned None");
        crate::assert_with_log!(decoded == original, "decoded path", original, decoded);
        crate::assert_with_log!(
            !addr.is_unnamed(len),
            "not unnamed",
            false,
            addr.is_unnamed(len)
        );
        crate::test_complete!("pathname_decode_round_trip");
    }

    #[test]
    fn empty_path_encodes_unnamed() {
        init_test("empty_path_encodes_unnamed");
        let (addr, len) = SockAddrUnix::new("").expect("encode failed");

        crate::assert_with_log!(
            len as usize == SockAddrUnix::sun_path_offset(),
            "family-only length",
            SockAddrUnix::sun_path_offset(),
            len
        );
        crate::assert_with_log!(addr.is_unnamed(len), "unnamed", true, addr.is_unnamed(len));
        crate::assert_with_log!(
            addr.path(len).is_none(),
            "no path",
            true,
            addr.path(len).is_none()
        );
        crate::test_complete!("empty_path_encodes_unnamed");
    }

    #[test]
    fn overlong_path_is_rejected() {
        init_test("overlong_path_is_rejected");
        let long = "x".repeat(mem::size_of::<sockaddr_un>());
        let err = SockAddrUnix::new(&long).expect_err("encode should fail");
        crate::assert_with_log!(
            err.kind() == crate::ErrorKind::PathTooLong,
            "error kind",
            crate::ErrorKind::PathTooLong,
            err.kind()
        );
        crate::test_complete!("overlong_path_is_rejected");
    }

    #[test]
    fn interior_nul_is_rejected() {
        init_test("interior_nul_is_rejected");
        let path = Path::new(OsStr::from_bytes(b"/tmp/bad\0name"));
        let err = SockAddrUnix::new(path).expect_err("encode should fail");
        crate::assert_with_log!(
            err.kind() == crate::ErrorKind::InvalidAddress,
            "error kind",
            crate::ErrorKind::InvalidAddress,
            err.kind()
        );
        crate::test_complete!("interior_nul_is_rejected");
    }

    #[test]
    fn zeroed_buffer_is_unnamed() {
        init_test("zeroed_buffer_is_unnamed");
        let addr = SockAddrUnix::zeroed();
        crate::assert_with_log!(addr.is_unnamed(0), "len 0 unnamed", true, addr.is_unnamed(0));
        crate::assert_with_log!(addr.path(0).is_none(), "no path", true, addr.path(0).is_none());
        crate::test_complete!("zeroed_buffer_is_unnamed");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn abstract_round_trip() {
        init_test("abstract_round_trip");
        let name = b"udsock_abstract_test";
        let (addr, len) = SockAddrUnix::new_abstract(name).expect("encode failed");

        let expected_len = SockAddrUnix::sun_path_offset() + 1 + name.len();
        crate::assert_with_log!(len as usize == expected_len, "encoded len", expected_len, len);
        let decoded = addr.abstract_name(len).expect("decode returned None");
        crate::assert_with_log!(decoded == name.as_slice(), "decoded name", name, decoded);
        crate::assert_with_log!(
            addr.path(len).is_none(),
            "no pathname view",
            true,
            addr.path(len).is_none()
        );
        crate::test_complete!("abstract_round_trip");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn abstract_overlong_name_is_rejected() {
        init_test("abstract_overlong_name_is_rejected");
        let name = vec![b'a'; mem::size_of::<sockaddr_un>()];
        let err = SockAddrUnix::new_abstract(&name).expect_err("encode should fail");
        crate::assert_with_log!(
            err.kind() == crate::ErrorKind::PathTooLong,
            "error kind",
            crate::ErrorKind::PathTooLong,
            err.kind()
        );
        crate::test_complete!("abstract_overlong_name_is_rejected");
    }
}
