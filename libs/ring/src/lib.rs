//! # Splice Ring - Lock-Free SPSC Hand-Off
//!
//! ## Purpose
//!
//! The bounded single-producer/single-consumer ring that decouples the
//! receive stage from the send stage. Its whole job is to keep kernel
//! read-side jitter off the send-side critical path: the producer never
//! takes a lock, the consumer never takes a lock, and the uncontended path
//! is a handful of atomic loads and stores.
//!
//! ## Protocol
//!
//! Head and tail are slot indices advanced modulo the capacity, with one
//! slot always held open so full/empty are distinguishable:
//!
//! - producer: relaxed-load own head, acquire-load tail for the fullness
//!   check, write the slot, release-store the new head
//! - consumer: relaxed-load own tail, acquire-load head for the emptiness
//!   check, read the slot, release-store the new tail
//!
//! A ring of capacity `CAP` therefore carries at most `CAP - 1` items in
//! flight. No other synchronisation primitive touches the data path;
//! backpressure is expressed by the caller busy-waiting on a failed push
//! (see [`SpinWait`]).

mod spin;

pub use spin::SpinWait;

use std::cell::UnsafeCell;
use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Pads the two indices onto separate cache lines so the producer and
/// consumer cores never false-share.
#[repr(align(64))]
struct CachePadded<T> {
    value: T,
}

struct Shared<T, const CAP: usize> {
    head: CachePadded<AtomicUsize>,
    tail: CachePadded<AtomicUsize>,
    slots: Box<[UnsafeCell<MaybeUninit<T>>]>,
}

// SAFETY: slots are only ever accessed by the single producer (writes) and
// the single consumer (reads), and every hand-off is ordered by the
// release-store/acquire-load pair on the index that publishes it.
unsafe impl<T: Send, const CAP: usize> Sync for Shared<T, CAP> {}

impl<T, const CAP: usize> Drop for Shared<T, CAP> {
    fn drop(&mut self) {
        if std::mem::needs_drop::<T>() {
            let mut tail = *self.tail.value.get_mut();
            let head = *self.head.value.get_mut();
            while tail != head {
                // SAFETY: slots in [tail, head) were written by the
                // producer and never consumed.
                unsafe { (*self.slots[tail].get()).assume_init_drop() };
                tail = (tail + 1) % CAP;
            }
        }
    }
}

/// Write half of the ring. Exactly one thread may hold this.
pub struct Producer<T, const CAP: usize> {
    shared: Arc<Shared<T, CAP>>,
}

/// Read half of the ring. Exactly one thread may hold this.
pub struct Consumer<T, const CAP: usize> {
    shared: Arc<Shared<T, CAP>>,
}

/// Create a connected producer/consumer pair over a fresh ring.
///
/// `CAP` must be at least 2; one slot is reserved by the index protocol.
pub fn channel<T, const CAP: usize>() -> (Producer<T, CAP>, Consumer<T, CAP>) {
    assert!(CAP >= 2, "ring capacity must be at least 2");
    let slots = (0..CAP)
        .map(|_| UnsafeCell::new(MaybeUninit::uninit()))
        .collect::<Vec<_>>()
        .into_boxed_slice();
    let shared = Arc::new(Shared {
        head: CachePadded {
            value: AtomicUsize::new(0),
        },
        tail: CachePadded {
            value: AtomicUsize::new(0),
        },
        slots,
    });
    (
        Producer {
            shared: Arc::clone(&shared),
        },
        Consumer { shared },
    )
}

impl<T, const CAP: usize> Producer<T, CAP> {
    /// Push one item. Fails and returns the item when the ring already
    /// holds `CAP - 1` unpopped items.
    #[inline]
    pub fn push(&mut self, item: T) -> Result<(), T> {
        let shared = &*self.shared;
        let head = shared.head.value.load(Ordering::Relaxed);
        let next = (head + 1) % CAP;
        if next == shared.tail.value.load(Ordering::Acquire) {
            return Err(item);
        }
        // SAFETY: the slot at `head` is not visible to the consumer until
        // the release store below, and the fullness check guarantees the
        // consumer has vacated it.
        unsafe { (*shared.slots[head].get()).write(item) };
        shared.head.value.store(next, Ordering::Release);
        Ok(())
    }
}

impl<T, const CAP: usize> Consumer<T, CAP> {
    /// Pop the oldest item, or `None` when the ring is empty.
    #[inline]
    pub fn pop(&mut self) -> Option<T> {
        let shared = &*self.shared;
        let tail = shared.tail.value.load(Ordering::Relaxed);
        if tail == shared.head.value.load(Ordering::Acquire) {
            return None;
        }
        // SAFETY: the acquire load above observed the producer's release
        // store, so the slot at `tail` is initialised and unaliased.
        let item = unsafe { (*shared.slots[tail].get()).assume_init_read() };
        shared.tail.value.store((tail + 1) % CAP, Ordering::Release);
        Some(item)
    }

    /// Whether a pop would currently return `None`. Advisory only; the
    /// producer may publish concurrently.
    #[inline]
    pub fn is_empty(&self) -> bool {
        let shared = &*self.shared;
        shared.tail.value.load(Ordering::Relaxed) == shared.head.value.load(Ordering::Acquire)
    }
}
