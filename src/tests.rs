use std::ptr::NonNull;

use super::*;

#[test]
fn granularity_is_sane() {
    let granularity = allocation_granularity();
    assert!(granularity > 0);
    assert!(granularity.is_power_of_two());
}

#[test]
fn unaligned_addr_is_rejected() {
    // "randomly" chosen misaligned address
    let addr = NonNull::new(0x12345 as *mut ()).unwrap();
    let len = allocation_granularity();

    let err = Reservation::new(Some(addr), len).unwrap_err();
    assert!(matches!(err, ReservationError::AddressUnaligned { .. }));

    // The same bad input always fails the same way.
    let again = Reservation::new(Some(addr), len).unwrap_err();
    assert_eq!(err, again);
}

#[test]
fn unaligned_len_is_rejected() {
    // The address hint is aligned, so the length check is the one that
    // fires.
    let addr = NonNull::new(allocation_granularity() as *mut ()).unwrap();

    let err = Reservation::new(Some(addr), 12345).unwrap_err();
    assert!(matches!(err, ReservationError::LengthUnaligned { .. }));
}

#[test]
fn reserve_with_kernel_chosen_address() {
    let granularity = allocation_granularity();

    let rsv = Reservation::new(None, granularity).unwrap();
    assert_eq!(rsv.address().as_ptr() as usize % granularity, 0);
    assert_eq!(rsv.length(), granularity);

    rsv.delete().unwrap();
}

#[test]
fn reserve_occupied_range_fails() {
    let len = 4 * allocation_granularity();
    let existing = Reservation::new(None, len).unwrap();

    let err = Reservation::new(Some(existing.address()), len).unwrap_err();
    assert_eq!(err, ReservationError::MappingExists);

    // The pre-existing reservation is untouched and can still be released.
    existing.delete().unwrap();
}

#[test]
fn released_range_can_be_reserved_again() {
    let len = 8 * allocation_granularity();

    let first = Reservation::new(None, len).unwrap();
    let addr = first.address();
    first.delete().unwrap();

    // The range was truly freed, so a fixed request lands exactly there.
    let again = Reservation::new(Some(addr), len).unwrap();
    assert_eq!(again.address(), addr);
    assert_eq!(again.length(), len);

    again.delete().unwrap();
}

#[test]
fn repeated_reservations_do_not_overlap() {
    let len = 4 * allocation_granularity();

    let first = Reservation::new(None, len).unwrap();
    let second = Reservation::new(None, len).unwrap();

    let first_range = first.address().as_ptr() as usize..first.address().as_ptr() as usize + len;
    let second_base = second.address().as_ptr() as usize;
    assert!(second_base >= first_range.end || second_base + len <= first_range.start);

    first.delete().unwrap();
    second.delete().unwrap();
}

#[test]
fn zero_length_fails_at_the_os() {
    // Zero passes the alignment checks and is rejected by the OS call.
    let err = Reservation::new(None, 0).unwrap_err();
    assert!(matches!(err, ReservationError::Os(_)));
}

#[test]
#[cfg(target_pointer_width = "64")]
fn no_commit_on_reserve() {
    // Far more than physical memory; succeeds because a reservation
    // consumes address space, not commit charge.
    let len = 1usize << 34;
    assert_eq!(len % allocation_granularity(), 0);

    let rsv = Reservation::new(None, len).unwrap();
    assert_eq!(rsv.length(), len);

    rsv.delete().unwrap();
}
