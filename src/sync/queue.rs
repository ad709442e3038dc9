use std::collections::VecDeque;

/// Queue of deferred sync evaluations.
///
/// Each admitted keystroke schedules one evaluation that becomes due
/// `delay_ms` later, giving the buffer time to reflect the keystroke
/// before it is inspected. Entries are deliberately not coalesced and
/// cannot be cancelled: a burst of keystrokes queues a burst of
/// evaluations and every one of them runs against the then-current buffer
/// state, so the final write is whichever evaluation runs last. Callers
/// supply timestamps, keeping the queue free of clock reads and easy to
/// test.
#[derive(Debug)]
pub struct EvalQueue {
    delay_ms: u64,
    pending: VecDeque<u64>,
}

impl EvalQueue {
    /// Delay between a keystroke and its evaluation.
    pub const DEFAULT_DELAY_MS: u64 = 50;

    pub const fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            pending: VecDeque::new(),
        }
    }

    /// Enqueue one evaluation at `now_ms`.
    pub fn schedule(&mut self, now_ms: u64) {
        self.pending.push_back(now_ms);
    }

    /// Dequeue every evaluation whose delay has elapsed and return how
    /// many are due.
    pub fn take_ready(&mut self, now_ms: u64) -> usize {
        let mut ready = 0;
        while let Some(&queued_at) = self.pending.front() {
            if now_ms.saturating_sub(queued_at) >= self.delay_ms {
                self.pending.pop_front();
                ready += 1;
            } else {
                break;
            }
        }
        ready
    }

    pub fn is_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

impl Default for EvalQueue {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY_MS)
    }
}
