/// Single-slot cancellable scheduled callback driven by a host clock.
///
/// The pending deadline lives in the owner (one per chart instance), so
/// scheduling again always replaces the previous call instead of stacking a
/// second one. Time is whatever monotonic millisecond clock the host passes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Debouncer {
    delay_ms: u64,
    due_at_ms: Option<u64>,
}

impl Debouncer {
    #[must_use]
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            due_at_ms: None,
        }
    }

    #[must_use]
    pub fn delay_ms(self) -> u64 {
        self.delay_ms
    }

    /// Schedules the callback `delay_ms` after `now_ms`, cancelling any
    /// pending one. Returns the new deadline.
    pub fn schedule(&mut self, now_ms: u64) -> u64 {
        let due = now_ms.saturating_add(self.delay_ms);
        self.due_at_ms = Some(due);
        due
    }

    pub fn cancel(&mut self) -> bool {
        self.due_at_ms.take().is_some()
    }

    #[must_use]
    pub fn is_pending(self) -> bool {
        self.due_at_ms.is_some()
    }

    #[must_use]
    pub fn due_at_ms(self) -> Option<u64> {
        self.due_at_ms
    }

    /// Consumes the pending call if its deadline has passed.
    pub fn fire_if_due(&mut self, now_ms: u64) -> bool {
        match self.due_at_ms {
            Some(due) if now_ms >= due => {
                self.due_at_ms = None;
                true
            }
            _ => false,
        }
    }
}
