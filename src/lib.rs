//! Vmreserve exposes mechanisms for claiming contiguous ranges of the process' virtual address
//! space ([`Reservation`]s) without granting access permissions and without committing any
//! memory, and for releasing them again on demand. A reservation is a hole punched in the
//! address space, not memory: reading or writing through it faults, and it contributes nothing
//! to the process' commit charge.
//!
//! ## Terminology
//!
//! - A **reserved** region of address space is a region which is guaranteed not to be handed out
//!   by any other system allocation mechanism until it is released. The operating system is the
//!   arbiter of that guarantee, not this library.
//!
//! - The **allocation granularity** is the platform-defined unit for address-space operations:
//!   the page size on POSIX systems, and the coarser `dwAllocationGranularity` on Windows (a
//!   multiple of the page size). Requested addresses and lengths must be multiples of it; an
//!   address acceptable on one platform may be unacceptable on the other. The value can be
//!   queried at runtime through [`allocation_granularity`].
//!
//! - **Fixed no-replace placement** means requesting a specific base address and failing with
//!   [`ReservationError::MappingExists`], rather than silently relocating, when that address is
//!   unavailable.
//!
//! ## Concurrency
//!
//! All calls are synchronous and the library takes no locks; concurrent reservations race for
//! the address space and the OS arbitrates. On Windows a placeholder reservation is a single
//! atomic call, so of two threads requesting the same fixed range exactly one succeeds. On POSIX
//! targets fixed placement is emulated by probing with a plain anonymous mapping and rolling it
//! back when the kernel relocates it, leaving a narrow window in which another allocator can
//! observe or claim part of the range. Callers that need strict mutual exclusion across threads
//! must serialize their own reservation calls.

mod error;
mod sys;
mod validate;

#[cfg(test)]
mod tests;

use std::ptr::NonNull;

use lazy_static::lazy_static;

pub use error::{ReservationError, SystemError};

lazy_static! {
    static ref GRANULARITY: usize = sys::granularity();
}

/// Returns the platform allocation granularity, the unit every reservation
/// address and length must be a multiple of.
///
/// The value is queried from the OS once and cached for the lifetime of the
/// process.
pub fn allocation_granularity() -> usize {
    *GRANULARITY
}

/// An owned, permission-less, unbacked range of virtual address space.
///
/// A reservation is created by [`Reservation::new`] and lives until
/// [`Reservation::delete`] consumes it. There is no destructor: a value that
/// is dropped without being deleted leaks its range for the remainder of the
/// process' lifetime.
#[derive(Debug)]
pub struct Reservation {
    addr: NonNull<()>,
    len: usize,
}

// Safety: a reservation is only an address range; nothing in it is tied to
// the thread that created it.
unsafe impl Send for Reservation {}
unsafe impl Sync for Reservation {}

impl Reservation {
    /// Reserves `length` bytes of virtual address space.
    ///
    /// With an `addr` of `None` the OS chooses the base address. A present
    /// `addr` requests fixed no-replace placement: the call either reserves
    /// exactly at `addr` or fails with
    /// [`ReservationError::MappingExists`], leaving any existing mapping
    /// untouched. Both `addr` and `length` must be multiples of
    /// [`allocation_granularity`].
    ///
    /// On POSIX targets fixed placement is emulated and carries a race
    /// window against concurrent allocators; see the crate docs.
    pub fn new(addr: Option<NonNull<()>>, length: usize) -> Result<Self, ReservationError> {
        let granularity = allocation_granularity();

        validate::validate_addr_alignment(addr, granularity)?;
        validate::validate_len_alignment(length, granularity)?;

        let addr = sys::reserve(addr, length)?;

        Ok(Self { addr, len: length })
    }

    /// Releases the reserved range back to the OS and consumes the handle.
    ///
    /// The reservation is gone either way: an `Err` reports the OS-level
    /// release failure for diagnostics, but destruction is not retryable
    /// and the range must not be considered owned afterwards.
    pub fn delete(self) -> Result<(), ReservationError> {
        unsafe {
            // Safety: the handle uniquely owns the range and is consumed
            // here, so the range cannot be released twice.
            sys::release(self.addr, self.len)
        }
    }

    /// Base address of the reserved range.
    pub fn address(&self) -> NonNull<()> {
        self.addr
    }

    /// Size of the reserved range in bytes.
    pub fn length(&self) -> usize {
        self.len
    }
}
