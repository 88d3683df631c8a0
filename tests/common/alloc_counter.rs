use std::alloc::{GlobalAlloc, Layout, System};
use std::sync::atomic::{AtomicIsize, AtomicUsize, Ordering};

/// Global allocator that counts allocations and tracks live bytes.
pub struct AllocCounter {
    live: AtomicIsize,
    allocations: AtomicUsize,
}

/// Counter values at one point in time.
#[derive(Clone, Copy, Debug)]
pub struct AllocSnapshot {
    pub live_bytes: isize,
    pub allocations: usize,
}

impl AllocCounter {
    pub const fn new() -> Self {
        Self {
            live: AtomicIsize::new(0),
            allocations: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self) -> AllocSnapshot {
        AllocSnapshot {
            live_bytes: self.live.load(Ordering::SeqCst),
            allocations: self.allocations.load(Ordering::SeqCst),
        }
    }

    /// Allocations made and live bytes retained since `before`.
    pub fn since(&self, before: AllocSnapshot) -> AllocSnapshot {
        let now = self.snapshot();
        AllocSnapshot {
            live_bytes: now.live_bytes - before.live_bytes,
            allocations: now.allocations - before.allocations,
        }
    }

    fn grew(&self, bytes: usize) {
        self.live.fetch_add(bytes as isize, Ordering::SeqCst);
        self.allocations.fetch_add(1, Ordering::SeqCst);
    }

    fn shrank(&self, bytes: usize) {
        self.live.fetch_sub(bytes as isize, Ordering::SeqCst);
    }
}

unsafe impl GlobalAlloc for AllocCounter {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc(layout) };
        if !ptr.is_null() {
            self.grew(layout.size());
        }
        ptr
    }

    unsafe fn alloc_zeroed(&self, layout: Layout) -> *mut u8 {
        let ptr = unsafe { System.alloc_zeroed(layout) };
        if !ptr.is_null() {
            self.grew(layout.size());
        }
        ptr
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) };
        self.shrank(layout.size());
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        let new_ptr = unsafe { System.realloc(ptr, layout, new_size) };
        if !new_ptr.is_null() {
            self.shrank(layout.size());
            self.grew(new_size);
        }
        new_ptr
    }
}
