// win32 quick reference:
// https://docs.rs/windows-sys/latest/windows_sys/index.html
// https://learn.microsoft.com/en-us/windows/win32/api/memoryapi/nf-memoryapi-virtualalloc2
// https://learn.microsoft.com/en-us/windows/win32/api/memoryapi/nf-memoryapi-virtualfree

use std::{
    mem::MaybeUninit,
    ptr::{null, null_mut, NonNull},
};

use log::error;
use windows_sys::Win32::{
    Foundation::{GetLastError, ERROR_INVALID_ADDRESS, INVALID_HANDLE_VALUE},
    System::{
        Memory::{
            VirtualAlloc2, VirtualFree, MEM_RELEASE, MEM_RESERVE, MEM_RESERVE_PLACEHOLDER,
            PAGE_NOACCESS,
        },
        SystemInformation::{GetSystemInfo, SYSTEM_INFO},
    },
};

use crate::{ReservationError, SystemError};

pub(crate) fn granularity() -> usize {
    let sys_info = unsafe {
        let mut sys_info = MaybeUninit::<SYSTEM_INFO>::uninit();
        GetSystemInfo(sys_info.as_mut_ptr());
        sys_info.assume_init()
    };

    // Base addresses of fresh reservations round to dwAllocationGranularity
    // rather than dwPageSize, so the coarser unit governs both addresses
    // and lengths here.
    sys_info.dwAllocationGranularity as usize
}

pub(crate) fn reserve(
    addr: Option<NonNull<()>>,
    len: usize,
) -> Result<NonNull<()>, ReservationError> {
    let hint = addr.map_or(null(), |addr| addr.as_ptr().cast_const().cast());

    // A placeholder reservation claims the range atomically: with a hinted
    // base the call either lands exactly there or fails, so no rollback
    // step exists on this backend.
    let reserv_addr = unsafe {
        VirtualAlloc2(
            /* process */ INVALID_HANDLE_VALUE,
            hint,
            len,
            MEM_RESERVE | MEM_RESERVE_PLACEHOLDER,
            PAGE_NOACCESS,
            /* ExtendedParameters + Count */ null_mut(),
            0,
        )
    };

    let Some(reserv_addr) = NonNull::new(reserv_addr) else {
        let code = unsafe {
            // Safety: `GetLastError`'s internal errno is stored using TLS.
            GetLastError()
        };

        // An occupied hinted range comes back as ERROR_INVALID_ADDRESS.
        if code == ERROR_INVALID_ADDRESS {
            error!("mapping exists at {hint:p}");
            return Err(ReservationError::MappingExists);
        }

        let err = SystemError(code as i32);
        error!("VirtualAlloc2 failed to reserve {len} bytes: {err}");
        return Err(ReservationError::Os(err));
    };

    Ok(reserv_addr.cast())
}

pub(crate) unsafe fn release(addr: NonNull<()>, _len: usize) -> Result<(), ReservationError> {
    // dwSize must be zero when MEM_RELEASE is used.
    if unsafe { VirtualFree(addr.as_ptr().cast(), 0, MEM_RELEASE) } == 0 {
        let err = SystemError(unsafe { GetLastError() } as i32);
        error!("VirtualFree failed for {:p}: {err}", addr.as_ptr());
        return Err(ReservationError::Os(err));
    }

    Ok(())
}
