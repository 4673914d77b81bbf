//! 游戏时钟抽象
//!
//! 引擎内部从不直接读取系统时间：所有公共操作都接收毫秒时间戳，
//! 时间的来源由外层注入，便于测试中手动推进。

use std::cell::Cell;
use std::time::Instant;

/// Monotonic millisecond clock injected into the outer loop.
pub trait Clock {
    /// Milliseconds elapsed since the clock's origin.
    fn now_ms(&self) -> u64;
}

/// Wall clock anchored at construction time.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-driven clock for tests. Single-threaded by design.
pub struct ManualClock {
    ms: Cell<u64>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self { ms: Cell::new(0) }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.ms.set(self.ms.get() + delta_ms);
    }

    pub fn set(&self, now_ms: u64) {
        self.ms.set(now_ms);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.ms.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_advances_only_by_hand() {
        let clock = ManualClock::new();
        assert_eq!(clock.now_ms(), 0);

        clock.advance(120);
        assert_eq!(clock.now_ms(), 120);

        clock.set(50);
        assert_eq!(clock.now_ms(), 50);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let clock = SystemClock::new();
        let a = clock.now_ms();
        let b = clock.now_ms();
        assert!(b >= a);
    }
}
