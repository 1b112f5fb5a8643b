// mmap(2) quick reference:
// https://man7.org/linux/man-pages/man2/mmap.2.html
// https://man7.org/linux/man-pages/man3/sysconf.3.html

use std::ptr::{null_mut, NonNull};

use log::error;

use crate::{ReservationError, SystemError};

pub(crate) fn granularity() -> usize {
    unsafe { libc::sysconf(libc::_SC_PAGESIZE) as usize }
}

pub(crate) fn reserve(
    addr: Option<NonNull<()>>,
    len: usize,
) -> Result<NonNull<()>, ReservationError> {
    let hint = addr.map_or(null_mut(), |addr| addr.as_ptr().cast());

    // A private anonymous PROT_NONE mapping reserves the range without
    // granting access or consuming commit charge.
    let reserv_addr = unsafe {
        libc::mmap(
            hint,
            len,
            libc::PROT_NONE,
            libc::MAP_PRIVATE | libc::MAP_ANONYMOUS,
            -1,
            0,
        )
    };

    if reserv_addr == libc::MAP_FAILED {
        let err = SystemError::from_errno();
        error!("mmap failed to reserve {len} bytes: {err}");
        return Err(ReservationError::Os(err));
    }

    // Fixed no-replace placement is emulated here: glibc only exposes
    // MAP_FIXED_NOREPLACE from Linux 4.17 on. Without MAP_FIXED the kernel
    // treats an occupied hint as a hint only and relocates the mapping, so
    // a relocated address means the requested range is taken. Undo the
    // stray mapping and fail. A concurrent allocator can slip into the
    // range between these two calls; see the crate docs.
    if let Some(requested) = addr {
        if reserv_addr != requested.as_ptr().cast() {
            unsafe { libc::munmap(reserv_addr, len) };
            error!("mapping exists at {:p}", requested.as_ptr());
            return Err(ReservationError::MappingExists);
        }
    }

    // mmap never hands back the null page for a hinted or kernel-chosen
    // request.
    Ok(NonNull::new(reserv_addr).unwrap().cast())
}

pub(crate) unsafe fn release(addr: NonNull<()>, len: usize) -> Result<(), ReservationError> {
    if unsafe { libc::munmap(addr.as_ptr().cast(), len) } != 0 {
        let err = SystemError::from_errno();
        error!("munmap failed for {:p}: {err}", addr.as_ptr());
        return Err(ReservationError::Os(err));
    }

    Ok(())
}
