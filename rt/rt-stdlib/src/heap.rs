//! The process-wide heap: reserved storage, one-shot placement
//! construction, and the C-style allocation surface.

use core::alloc::{GlobalAlloc, Layout};
use core::cell::UnsafeCell;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};
use core::sync::atomic::{AtomicBool, Ordering};

use rt_brk::ProgramBreak;
use rt_heap::{HEAP_ALIGN, UserHeap, align_up};
use rt_sync::SpinLock;

#[cfg(not(test))]
type BootBreak = rt_brk::OsBreak;
#[cfg(test)]
type BootBreak = rt_brk::RegionBreak;

type Heap = UserHeap<BootBreak>;

/// Storage reserved for the heap object itself.
///
/// The allocator's own memory cannot come from any heap, so the object is
/// constructed in place on this static. `MaybeUninit` keeps the region
/// const-initialisable; nothing reads it before [`initialize_runtime`]
/// writes it, exactly once, under the heap lock.
struct HeapSlot(UnsafeCell<MaybeUninit<Heap>>);

// Safety: the slot is written exactly once, before the pointer to it is
// published; afterwards all access goes through the heap lock.
unsafe impl Sync for HeapSlot {}

static HEAP_SLOT: HeapSlot = HeapSlot(UnsafeCell::new(MaybeUninit::uninit()));

/// Pointer to the constructed heap; null until the initialisation hook has
/// run, and forever when bootstrap could not even query the break.
struct HeapHandle(*mut Heap);

// Safety: the handle points into `HEAP_SLOT`, which lives for the whole
// process; the surrounding lock serialises all access.
unsafe impl Send for HeapHandle {}

/// The heap singleton, guarded by a spin lock for the life of the process.
static HEAP: SpinLock<HeapHandle> = SpinLock::new(HeapHandle(ptr::null_mut()));

/// One-time initialisation flag; set once the hook has run, whatever the
/// outcome.
static DID_INIT: AtomicBool = AtomicBool::new(false);

/// Runtime bootstrap failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InitError {
    /// The program break could not even be queried.
    #[error("program break is unavailable")]
    BreakUnavailable,
    /// The first break request failed; the allocator is permanently
    /// disabled.
    #[error("heap bootstrap failed; allocator is disabled")]
    HeapDisabled,
}

#[cfg(not(test))]
fn boot_break() -> BootBreak {
    rt_brk::OsBreak::new()
}

#[cfg(test)]
fn boot_break() -> BootBreak {
    test_arena::region()
}

/// Initialise the runtime's heap.
///
/// Must run before any allocation is attempted — in a freestanding build
/// this is called from the startup hook, before `main` and before the
/// standard streams come up. Idempotent: later calls re-report the outcome
/// of the first.
///
/// # Errors
/// - [`InitError::BreakUnavailable`] when the current break cannot be
///   queried at all.
/// - [`InitError::HeapDisabled`] when the heap's first break request
///   failed; the allocator then stays disabled for the life of the
///   process and every allocation returns null.
pub fn initialize_runtime() -> Result<(), InitError> {
    if !DID_INIT.load(Ordering::Acquire) {
        HEAP.with_lock(|handle| {
            // Re-check under the lock; a racing caller may have won.
            if DID_INIT.load(Ordering::Acquire) {
                return;
            }

            let mut brk = boot_break();
            match brk.set_break(0) {
                Ok(raw_start) => {
                    let start = align_up(raw_start, HEAP_ALIGN);
                    let slot = HEAP_SLOT.0.get();
                    // SAFETY: `DID_INIT` is still clear and the lock is
                    // held, so this is the only writer the slot ever sees.
                    // `start` is aligned and the break source owns the
                    // region above it.
                    unsafe {
                        (*slot).write(UserHeap::new(start, brk));
                        handle.0 = (*slot).as_mut_ptr();
                    }
                    log::debug!("runtime heap constructed in place at {start:#x}");
                }
                Err(_) => {
                    log::error!("runtime init: program break query failed");
                }
            }
            DID_INIT.store(true, Ordering::Release);
        });
    }

    HEAP.with_lock(|handle| {
        if handle.0.is_null() {
            return Err(InitError::BreakUnavailable);
        }
        // SAFETY: non-null handles point at the initialised slot; the lock
        // is held.
        if unsafe { (*handle.0).is_ready() } {
            Ok(())
        } else {
            Err(InitError::HeapDisabled)
        }
    })
}

/// Run `f` against the heap singleton; `None` before initialisation or
/// when bootstrap failed outright.
fn with_heap<R>(f: impl FnOnce(&mut Heap) -> R) -> Option<R> {
    HEAP.with_lock(|handle| {
        if handle.0.is_null() {
            None
        } else {
            // SAFETY: the handle points at the initialised slot and the
            // lock gives us exclusive access for the duration of `f`.
            Some(f(unsafe { &mut *handle.0 }))
        }
    })
}

/// Allocate `size` bytes from the process heap.
///
/// Null on failure (zero size, disabled or uninitialised heap, or memory
/// exhaustion). The returned address is 16-byte aligned.
#[must_use]
pub fn malloc(size: usize) -> *mut u8 {
    with_heap(|heap| heap.allocate(size).map_or(ptr::null_mut(), NonNull::as_ptr))
        .unwrap_or(ptr::null_mut())
}

/// Allocate zero-filled storage for `count` elements of `size` bytes.
#[must_use]
pub fn calloc(count: usize, size: usize) -> *mut u8 {
    with_heap(|heap| {
        heap.allocate_zeroed(count, size)
            .map_or(ptr::null_mut(), NonNull::as_ptr)
    })
    .unwrap_or(ptr::null_mut())
}

/// Release storage previously returned by this allocation surface.
///
/// Null pointers are ignored.
///
/// # Safety
/// `ptr` must be null or an address returned by [`malloc`], [`calloc`] or
/// [`realloc`] and not freed since.
pub unsafe fn free(ptr: *mut u8) {
    let _ = with_heap(|heap| {
        // SAFETY: forwarded caller contract.
        unsafe { heap.free(ptr) };
    });
}

/// Resize storage previously returned by this allocation surface.
///
/// Null `ptr` allocates fresh storage; `size == 0` frees `ptr` and
/// returns null; otherwise the contents are moved to a new block and the
/// old one is released. On failure the old block is untouched and null is
/// returned.
///
/// # Safety
/// `ptr` must be null or an address returned by [`malloc`], [`calloc`] or
/// [`realloc`] and not freed since.
#[must_use]
pub unsafe fn realloc(ptr: *mut u8, size: usize) -> *mut u8 {
    with_heap(|heap| {
        // SAFETY: forwarded caller contract.
        unsafe { heap.reallocate(ptr, size) }.map_or(ptr::null_mut(), NonNull::as_ptr)
    })
    .unwrap_or(ptr::null_mut())
}

/// `GlobalAlloc` adapter over the runtime heap.
///
/// Lets a freestanding build route Rust's own collections through the
/// runtime allocator:
///
/// ```ignore
/// #[global_allocator]
/// static ALLOCATOR: rt_stdlib::RuntimeAllocator = rt_stdlib::RuntimeAllocator;
/// ```
///
/// The heap hands out 16-byte-aligned blocks; requests for larger
/// alignments fail with null.
pub struct RuntimeAllocator;

// Safety: the adapter forwards to the locked heap singleton, which never
// hands out overlapping live blocks and tolerates foreign-free of null
// only; the GlobalAlloc contract forbids the rest.
unsafe impl GlobalAlloc for RuntimeAllocator {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if layout.align() > HEAP_ALIGN {
            return ptr::null_mut();
        }
        malloc(layout.size())
    }

    unsafe fn dealloc(&self, ptr: *mut u8, _layout: Layout) {
        // SAFETY: the GlobalAlloc contract guarantees `ptr` came from
        // `alloc` on this allocator.
        unsafe { free(ptr) };
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        if layout.align() > HEAP_ALIGN {
            return ptr::null_mut();
        }
        calloc(layout.size(), 1)
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if layout.align() > HEAP_ALIGN {
            return ptr::null_mut();
        }
        // SAFETY: the GlobalAlloc contract guarantees `ptr` came from
        // `alloc` on this allocator.
        unsafe { realloc(ptr, new_size) }
    }
}

#[cfg(test)]
mod test_arena {
    use rt_brk::RegionBreak;

    pub const ARENA_SIZE: usize = 1 << 20;

    #[repr(align(16))]
    pub struct Arena(pub [u8; ARENA_SIZE]);

    pub static mut ARENA: Arena = Arena([0; ARENA_SIZE]);

    pub fn base() -> usize {
        // SAFETY: only taking the address of the static, not reading through it.
        unsafe { (&raw const ARENA.0).cast::<u8>() as usize }
    }

    pub fn region() -> RegionBreak {
        // SAFETY: the arena is a static reserved exclusively for the test
        // heap; `region` is only called once, from the init hook.
        unsafe { RegionBreak::from_raw_parts((&raw mut ARENA.0).cast::<u8>(), ARENA_SIZE) }
    }
}
