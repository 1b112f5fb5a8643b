// Platform reservation backends. Each backend module must export:
// * pub(crate) fn granularity() -> usize;
// * pub(crate) fn reserve(addr: Option<NonNull<()>>, len: usize)
//       -> Result<NonNull<()>, ReservationError>;
// * pub(crate) unsafe fn release(addr: NonNull<()>, len: usize)
//       -> Result<(), ReservationError>;

cfg_if::cfg_if! {
    if #[cfg(unix)] {
        mod unix;
        pub(crate) use self::unix::*;
    } else if #[cfg(windows)] {
        mod windows;
        pub(crate) use self::windows::*;
    } else {
        compile_error!("unsupported platform!");
    }
}
