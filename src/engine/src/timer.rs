//! 定时任务注册表
//!
//! 每个引擎持有一个自己的注册表：所有延时/周期事件都经由它排队，
//! 引擎退出或锁存终局标志时整体取消，杜绝过期回调继续改写状态。
//!
//! 顺序保证：`advance` 按（触发时刻，登记序号）排出到期事件，
//! 同一引擎内短延时先于长延时被观察到。

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

/// Opaque handle for a scheduled event; feed it back to [`TimerRegistry::cancel`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

struct Entry<E> {
    fire_at: u64,
    seq: u64,
    id: u64,
    every: Option<u64>,
    event: E,
}

// BinaryHeap is a max-heap; reverse the comparison so the earliest
// (fire_at, seq) pair pops first.
impl<E> Ord for Entry<E> {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<E> PartialOrd for Entry<E> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<E> PartialEq for Entry<E> {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at == other.fire_at && self.seq == other.seq
    }
}

impl<E> Eq for Entry<E> {}

/// Single-threaded event scheduler over virtual time.
///
/// The payload type `E` is the owning engine's event enum; draining returns
/// plain values, so handling them never borrows the registry.
pub struct TimerRegistry<E> {
    queue: BinaryHeap<Entry<E>>,
    cancelled: HashSet<u64>,
    next_id: u64,
    next_seq: u64,
}

impl<E: Clone> TimerRegistry<E> {
    pub fn new() -> Self {
        Self {
            queue: BinaryHeap::new(),
            cancelled: HashSet::new(),
            next_id: 0,
            next_seq: 0,
        }
    }

    /// Schedule a one-shot event `delay_ms` after `now_ms`.
    pub fn schedule(&mut self, now_ms: u64, delay_ms: u64, event: E) -> TimerHandle {
        self.push(now_ms + delay_ms, None, event)
    }

    /// Schedule a periodic event; the first firing is one interval out.
    /// A zero interval is clamped to 1 ms so re-arming always advances.
    pub fn schedule_repeating(&mut self, now_ms: u64, interval_ms: u64, event: E) -> TimerHandle {
        let interval = interval_ms.max(1);
        self.push(now_ms + interval, Some(interval), event)
    }

    fn push(&mut self, fire_at: u64, every: Option<u64>, event: E) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Entry {
            fire_at,
            seq,
            id,
            every,
            event,
        });
        TimerHandle(id)
    }

    /// Drop a single pending event. Unknown or already-fired handles are
    /// ignored.
    pub fn cancel(&mut self, handle: TimerHandle) {
        self.cancelled.insert(handle.0);
    }

    /// Drop every pending event at once (engine teardown / terminal latch).
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.cancelled.clear();
    }

    /// Number of events still armed.
    pub fn pending(&self) -> usize {
        self.queue
            .iter()
            .filter(|entry| !self.cancelled.contains(&entry.id))
            .count()
    }

    /// Pop every event due at or before `now_ms`, in (fire-time, sequence)
    /// order. Periodic events re-arm themselves at `fire_at + interval`, so a
    /// late caller drains each missed period.
    pub fn advance(&mut self, now_ms: u64) -> Vec<E> {
        let mut due = Vec::new();
        loop {
            match self.queue.peek() {
                Some(head) if head.fire_at <= now_ms => {}
                _ => break,
            }
            let Some(entry) = self.queue.pop() else {
                break;
            };
            if self.cancelled.remove(&entry.id) {
                continue;
            }
            if let Some(interval) = entry.every {
                self.queue.push(Entry {
                    fire_at: entry.fire_at + interval,
                    seq: self.next_seq,
                    id: entry.id,
                    every: entry.every,
                    event: entry.event.clone(),
                });
                self.next_seq += 1;
            }
            due.push(entry.event);
        }
        due
    }
}

impl<E: Clone> Default for TimerRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}
