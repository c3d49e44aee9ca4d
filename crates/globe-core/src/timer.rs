//! One-shot deferred events on the driver's clock.
//!
//! Instead of storing closures, callers schedule a payload and receive it back
//! from `advance` once its due time has passed. Every pending event has a
//! handle that can cancel it, which is what lets ripple chains be stopped.

use fnv::FnvHashMap;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

/// An event whose due time has been reached.
#[derive(Clone, Debug, PartialEq)]
pub struct Fired<T> {
    pub handle: TimerHandle,
    pub due_sec: f64,
    pub payload: T,
}

#[derive(Clone, Copy, Debug)]
struct Key {
    due_sec: f64,
    seq: u64,
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Key {}

impl PartialOrd for Key {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Key {
    // Reversed so the std max-heap pops the earliest due time first, ties by insertion order.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due_sec
            .total_cmp(&self.due_sec)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

pub struct TimerQueue<T> {
    now_sec: f64,
    next_seq: u64,
    heap: BinaryHeap<Key>,
    pending: FnvHashMap<u64, (f64, T)>,
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            now_sec: 0.0,
            next_seq: 0,
            heap: BinaryHeap::new(),
            pending: FnvHashMap::default(),
        }
    }

    pub fn now_sec(&self) -> f64 {
        self.now_sec
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.contains_key(&handle.0)
    }

    pub fn schedule_after(&mut self, delay_sec: f32, payload: T) -> TimerHandle {
        let due = self.now_sec + delay_sec.max(0.0) as f64;
        self.schedule_at(due, payload)
    }

    /// Schedule at an absolute clock time. Times in the past fire on the next `advance`.
    pub fn schedule_at(&mut self, due_sec: f64, payload: T) -> TimerHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Key { due_sec, seq });
        self.pending.insert(seq, (due_sec, payload));
        TimerHandle(seq)
    }

    /// Cancel a pending event, returning its payload. Fired or unknown handles return `None`.
    pub fn cancel(&mut self, handle: TimerHandle) -> Option<T> {
        self.pending.remove(&handle.0).map(|(_, payload)| payload)
    }

    /// Move the clock forward and collect every event due at or before the new time, in due order.
    pub fn advance(&mut self, dt_sec: f64, out: &mut Vec<Fired<T>>) {
        self.now_sec += dt_sec.max(0.0);
        while let Some(key) = self.heap.peek().copied() {
            if key.due_sec > self.now_sec {
                break;
            }
            self.heap.pop();
            // Cancelled entries stay in the heap until they surface here.
            if let Some((due_sec, payload)) = self.pending.remove(&key.seq) {
                out.push(Fired {
                    handle: TimerHandle(key.seq),
                    due_sec,
                    payload,
                });
            }
        }
    }
}
