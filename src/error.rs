use std::fmt;

#[cfg(unix)]
use std::ffi::CStr;

use thiserror::Error;

/// A raw platform error code, captured from `errno` on POSIX targets and
/// `GetLastError` on Windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemError(pub(crate) i32);

impl std::error::Error for SystemError {}

impl fmt::Display for SystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        #[cfg(unix)]
        {
            let str = unsafe {
                // Safety: this string will stay alive on this thread until the next call to
                // `strerror`.
                CStr::from_ptr(libc::strerror(self.0))
            };
            write!(f, "system error {:?}: {str:?}", self.0)
        }
        #[cfg(not(unix))]
        {
            write!(f, "system error {:?}", self.0)
        }
    }
}

impl SystemError {
    #[cfg(unix)]
    pub(crate) fn from_errno() -> Self {
        Self(std::io::Error::last_os_error().raw_os_error().unwrap_or(0))
    }

    /// The untranslated platform error code.
    pub fn code(self) -> i32 {
        self.0
    }
}

/// Everything that can go wrong while reserving or releasing a range of
/// address space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReservationError {
    /// A non-null requested address was not a multiple of the platform
    /// allocation granularity.
    #[error("address {addr:#x} is not a multiple of {granularity}")]
    AddressUnaligned { addr: usize, granularity: usize },

    /// The requested length was not a multiple of the platform allocation
    /// granularity.
    #[error("length {len} is not a multiple of {granularity}")]
    LengthUnaligned { len: usize, granularity: usize },

    /// A fixed-address request overlapped an existing mapping or
    /// reservation.
    #[error("mapping exists in the given address range")]
    MappingExists,

    /// Any other failure reported by the operating system, with the raw
    /// platform code attached.
    #[error("{0}")]
    Os(SystemError),

    /// Allocation of a reservation handle failed.
    #[error("out of memory")]
    OutOfMemory,
}
