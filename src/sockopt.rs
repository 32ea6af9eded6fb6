//! Socket-option identifiers and the boolean option buffer.
//!
//! Options are addressed by a ([`Level`], [`OptName`]) pair, both thin
//! newtypes over the platform constants so callers can name the common ones
//! without giving up raw interop for the rest.
//!
//! [`BoolOpt`] is the fixed 4-byte buffer used for boolean options. Its
//! encoding is a network-byte-order (big-endian) integer regardless of host
//! endianness; any nonzero bit pattern reads back as enabled, so the
//! set-then-get round trip holds on every host.

use libc::{c_int, socklen_t};

/// A socket-option level (`SOL_SOCKET`, protocol levels, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Level(c_int);

impl Level {
    /// `SOL_SOCKET`: options at the socket API level.
    pub const SOCKET: Self = Self(libc::SOL_SOCKET);

    /// Wraps a raw level value.
    #[must_use]
    pub const fn from_raw(raw: c_int) -> Self {
        Self(raw)
    }

    /// Returns the raw level value.
    #[must_use]
    pub const fn raw(self) -> c_int {
        self.0
    }
}

/// A socket-option name within a level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct OptName(c_int);

impl OptName {
    /// `SO_REUSEADDR`.
    pub const REUSEADDR: Self = Self(libc::SO_REUSEADDR);
    /// `SO_KEEPALIVE`.
    pub const KEEPALIVE: Self = Self(libc::SO_KEEPALIVE);
    /// `SO_SNDBUF`.
    pub const SNDBUF: Self = Self(libc::SO_SNDBUF);
    /// `SO_RCVBUF`.
    pub const RCVBUF: Self = Self(libc::SO_RCVBUF);
    /// `SO_ERROR`: the pending error on the socket, cleared by reading.
    pub const ERROR: Self = Self(libc::SO_ERROR);
    /// `SO_PASSCRED` (Linux): receive peer credentials as ancillary data.
    #[cfg(any(target_os = "linux", target_os = "android"))]
    pub const PASSCRED: Self = Self(libc::SO_PASSCRED);

    /// Wraps a raw option name.
    #[must_use]
    pub const fn from_raw(raw: c_int) -> Self {
        Self(raw)
    }

    /// Returns the raw option name.
    #[must_use]
    pub const fn raw(self) -> c_int {
        self.0
    }
}

/// The fixed 4-byte big-endian buffer for boolean socket options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoolOpt([u8; 4]);

impl BoolOpt {
    /// Encodes a boolean as a big-endian 0/1 integer.
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self(i32::from(enabled).to_be_bytes())
    }

    /// An all-zero buffer, for reading an option back.
    #[must_use]
    pub const fn zeroed() -> Self {
        Self([0; 4])
    }

    /// Interprets the buffer: any nonzero pattern is enabled.
    #[must_use]
    pub fn get(&self) -> bool {
        i32::from_be_bytes(self.0) != 0
    }

    /// The buffer bytes, for `setsockopt`.
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }

    /// The buffer bytes, for `getsockopt` to write into.
    pub fn as_mut_bytes(&mut self) -> &mut [u8; 4] {
        &mut self.0
    }

    /// The buffer length as the OS counts it.
    #[must_use]
    pub const fn len() -> socklen_t {
        4
    }
}

impl Default for BoolOpt {
    fn default() -> Self {
        Self::zeroed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bool_opt_true_is_big_endian_one() {
        let opt = BoolOpt::new(true);
        assert_eq!(opt.as_bytes(), &[0, 0, 0, 1]);
        assert!(opt.get());
    }

    #[test]
    fn bool_opt_false_is_all_zero() {
        let opt = BoolOpt::new(false);
        assert_eq!(opt.as_bytes(), &[0, 0, 0, 0]);
        assert!(!opt.get());
    }

    #[test]
    fn bool_opt_nonzero_pattern_reads_enabled() {
        // A little-endian kernel writing host-order 1 produces this pattern;
        // it must still read back as enabled.
        let mut opt = BoolOpt::zeroed();
        opt.as_mut_bytes()[0] = 1;
        assert!(opt.get());
    }

    #[test]
    fn bool_opt_len_matches_buffer() {
        assert_eq!(BoolOpt::len() as usize, BoolOpt::zeroed().as_bytes().len());
    }

    #[test]
    fn level_and_name_raw_round_trip() {
        assert_eq!(Level::SOCKET.raw(), libc::SOL_SOCKET);
        assert_eq!(Level::from_raw(41).raw(), 41);
        assert_eq!(OptName::REUSEADDR.raw(), libc::SO_REUSEADDR);
        assert_eq!(OptName::from_raw(7).raw(), 7);
    }
}
