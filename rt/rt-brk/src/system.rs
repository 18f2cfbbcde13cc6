use crate::{BreakError, ProgramBreak};

/// The real process break, driven through `brk(2)`/`sbrk(2)`.
///
/// Queries go through `sbrk(0)`, which returns the current break; moves go
/// through `brk`, which returns zero on success. The allocator assumes it
/// has exclusive control of the break from its start address onwards, so a
/// process using this source must not also allocate through another
/// break-based allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsBreak;

impl OsBreak {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProgramBreak for OsBreak {
    fn set_break(&mut self, target: usize) -> Result<usize, BreakError> {
        if target == 0 {
            // SAFETY: sbrk(0) only reads the current break.
            let current = unsafe { libc::sbrk(0) };
            if current as usize == usize::MAX {
                return Err(BreakError::Exhausted);
            }
            return Ok(current as usize);
        }

        // SAFETY: moving the break is the whole point; the caller owns the
        // region above the heap start per the trait contract.
        let rc = unsafe { libc::brk(target as *mut libc::c_void) };
        if rc != 0 {
            return Err(BreakError::Exhausted);
        }
        Ok(target)
    }
}
