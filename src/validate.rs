//! Alignment checks for requested reservation addresses and lengths.
//!
//! Both checks are pure: the caller queries the platform granularity and
//! passes it in, so the functions themselves never touch the OS.

use std::ptr::NonNull;

use crate::ReservationError;

/// A `None` address is always valid; it asks the OS to choose the base. Any
/// other address must be an exact multiple of `granularity`.
pub(crate) fn validate_addr_alignment(
    addr: Option<NonNull<()>>,
    granularity: usize,
) -> Result<(), ReservationError> {
    let Some(addr) = addr else {
        return Ok(());
    };

    let addr = addr.as_ptr() as usize;
    if addr % granularity != 0 {
        return Err(ReservationError::AddressUnaligned { addr, granularity });
    }

    Ok(())
}

/// `len` must be a multiple of `granularity`. Zero is not special-cased
/// here; a zero-length request is left to fail at the OS call.
pub(crate) fn validate_len_alignment(
    len: usize,
    granularity: usize,
) -> Result<(), ReservationError> {
    if len % granularity != 0 {
        return Err(ReservationError::LengthUnaligned { len, granularity });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRANULARITY: usize = 0x1000;

    #[test]
    fn null_addr_is_valid() {
        assert_eq!(validate_addr_alignment(None, GRANULARITY), Ok(()));
    }

    #[test]
    fn aligned_addr_is_valid() {
        let addr = NonNull::new((4 * GRANULARITY) as *mut ()).unwrap();
        assert_eq!(validate_addr_alignment(Some(addr), GRANULARITY), Ok(()));
    }

    #[test]
    fn unaligned_addr_is_rejected() {
        let addr = NonNull::new(0x12345 as *mut ()).unwrap();
        assert_eq!(
            validate_addr_alignment(Some(addr), GRANULARITY),
            Err(ReservationError::AddressUnaligned {
                addr: 0x12345,
                granularity: GRANULARITY,
            })
        );
    }

    #[test]
    fn aligned_len_is_valid() {
        assert_eq!(validate_len_alignment(3 * GRANULARITY, GRANULARITY), Ok(()));
    }

    #[test]
    fn zero_len_passes_validation() {
        // Zero is a multiple of the granularity; it is the OS call that
        // rejects empty reservations.
        assert_eq!(validate_len_alignment(0, GRANULARITY), Ok(()));
    }

    #[test]
    fn unaligned_len_is_rejected() {
        assert_eq!(
            validate_len_alignment(12345, GRANULARITY),
            Err(ReservationError::LengthUnaligned {
                len: 12345,
                granularity: GRANULARITY,
            })
        );
    }
}
