//! Correlation slots
//!
//! A slot hands one category of reply from the I/O thread to the application
//! thread blocked on it. There is one slot per [`ResponseCategory`] per
//! connection, shared by every call that expects that category.
//!
//! Deposits queue rather than overwrite, and `take` returns the oldest value.
//! Callers clear the slot before sending so leftovers from an earlier
//! exchange are discarded, but a stray reply that arrives between the clear
//! and the real reply is still handed to the waiter. Nothing in the protocol
//! can tell the two apart.

use mage_net_bridge::ResponseCategory;
use mage_net_core::{MageNetError, Result};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{debug, trace, warn};

struct SlotState<T> {
    values: VecDeque<T>,
    /// Set by `interrupt`, consumed only by the next `take`
    interrupted: bool,
    /// Sticky: the connection is gone
    poisoned: bool,
    waiters: usize,
}

/// Single-category blocking handoff between the I/O thread and a caller
pub struct CorrelationSlot<T> {
    category: ResponseCategory,
    state: Mutex<SlotState<T>>,
    ready: Condvar,
}

impl<T: Send> CorrelationSlot<T> {
    pub fn new(category: ResponseCategory) -> Self {
        Self {
            category,
            state: Mutex::new(SlotState {
                values: VecDeque::new(),
                interrupted: false,
                poisoned: false,
                waiters: 0,
            }),
            ready: Condvar::new(),
        }
    }

    pub fn category(&self) -> ResponseCategory {
        self.category
    }

    /// Discard buffered values
    ///
    /// Returns how many stale values were dropped. Poison and a pending
    /// interrupt both survive.
    pub fn clear(&self) -> usize {
        let mut state = self.state.lock();
        let discarded = state.values.len();
        state.values.clear();
        if discarded > 0 {
            debug!(category = %self.category, discarded, "Discarded stale replies");
        }
        discarded
    }

    /// Make `value` available to the next `take`; never blocks
    pub fn deposit(&self, value: T) {
        let mut state = self.state.lock();
        if state.poisoned {
            trace!(category = %self.category, "Dropping reply deposited after close");
            return;
        }
        state.values.push_back(value);
        if state.values.len() > 1 {
            debug!(
                category = %self.category,
                queued = state.values.len(),
                "Reply queued behind an unconsumed one"
            );
        }
        self.ready.notify_one();
    }

    /// Block until a value, an interrupt, or poison arrives
    pub fn take(&self) -> Result<T> {
        self.wait(None)
    }

    /// Like [`take`](Self::take), giving up with `Timeout` after `timeout`
    pub fn take_timeout(&self, timeout: Duration) -> Result<T> {
        self.wait(Some((Instant::now() + timeout, timeout)))
    }

    /// Release the current waiter with `Interrupted` and empty the slot
    ///
    /// With no waiter the interrupt is held until the next `take` consumes it,
    /// so a call that has not reached its wait yet is still cancelled.
    pub fn interrupt(&self) {
        let mut state = self.state.lock();
        state.interrupted = true;
        self.ready.notify_all();
    }

    /// Release every current and future waiter with `ConnectionLost`
    pub fn poison(&self) {
        let mut state = self.state.lock();
        state.poisoned = true;
        self.ready.notify_all();
    }

    pub fn is_poisoned(&self) -> bool {
        self.state.lock().poisoned
    }

    /// Number of buffered values
    pub fn len(&self) -> usize {
        self.state.lock().values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn wait(&self, deadline: Option<(Instant, Duration)>) -> Result<T> {
        let mut state = self.state.lock();
        if state.waiters > 0 {
            warn!(
                category = %self.category,
                "Concurrent calls share this reply slot; replies may be crossed"
            );
        }
        state.waiters += 1;

        let result = loop {
            if state.interrupted {
                state.interrupted = false;
                state.values.clear();
                break Err(MageNetError::Interrupted);
            }
            if let Some(value) = state.values.pop_front() {
                break Ok(value);
            }
            if state.poisoned {
                break Err(MageNetError::ConnectionLost);
            }
            match deadline {
                None => self.ready.wait(&mut state),
                Some((at, timeout)) => {
                    if self.ready.wait_until(&mut state, at).timed_out()
                        && state.values.is_empty()
                        && !state.interrupted
                        && !state.poisoned
                    {
                        break Err(MageNetError::Timeout(timeout));
                    }
                }
            }
        };

        state.waiters -= 1;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::mpsc;
    use std::thread;

    const QUIET: Duration = Duration::from_millis(100);
    const BOUND: Duration = Duration::from_secs(5);

    fn spawn_take(slot: &Arc<CorrelationSlot<u32>>) -> mpsc::Receiver<Result<u32>> {
        let slot = slot.clone();
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let _ = tx.send(slot.take());
        });
        rx
    }

    #[test]
    fn test_deposit_then_take() {
        let slot = CorrelationSlot::new(ResponseCategory::Id);
        slot.deposit(7u32);

        assert_eq!(slot.take().unwrap(), 7);
        assert!(slot.is_empty());
    }

    #[test]
    fn test_take_wakes_on_later_deposit() {
        let slot = Arc::new(CorrelationSlot::new(ResponseCategory::Id));
        let rx = spawn_take(&slot);

        thread::sleep(Duration::from_millis(20));
        slot.deposit(42);

        assert_eq!(rx.recv_timeout(BOUND).unwrap().unwrap(), 42);
        assert!(slot.is_empty());
    }

    #[test]
    fn test_queued_deposits_come_out_oldest_first() {
        let slot = CorrelationSlot::new(ResponseCategory::Boolean);
        slot.deposit(1u32);
        slot.deposit(2);

        assert_eq!(slot.len(), 2);
        assert_eq!(slot.take().unwrap(), 1);
        assert_eq!(slot.take().unwrap(), 2);
    }

    #[test]
    fn test_clear_then_take_blocks_until_poison() {
        let slot = Arc::new(CorrelationSlot::new(ResponseCategory::RoomView));
        slot.deposit(1);
        assert_eq!(slot.clear(), 1);

        let rx = spawn_take(&slot);
        assert!(matches!(
            rx.recv_timeout(QUIET),
            Err(mpsc::RecvTimeoutError::Timeout)
        ));

        slot.poison();
        assert!(matches!(
            rx.recv_timeout(BOUND).unwrap(),
            Err(MageNetError::ConnectionLost)
        ));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let slot = CorrelationSlot::<u32>::new(ResponseCategory::Id);
        assert_eq!(slot.clear(), 0);
        assert_eq!(slot.clear(), 0);
        assert!(slot.is_empty());
    }

    #[test]
    fn test_poison_releases_every_waiter() {
        let slot = Arc::new(CorrelationSlot::new(ResponseCategory::TableView));
        let waiters: Vec<_> = (0..3).map(|_| spawn_take(&slot)).collect();

        thread::sleep(Duration::from_millis(20));
        slot.poison();

        for rx in waiters {
            assert!(matches!(
                rx.recv_timeout(BOUND).unwrap(),
                Err(MageNetError::ConnectionLost)
            ));
        }
    }

    #[test]
    fn test_poison_is_sticky_and_drops_deposits() {
        let slot = CorrelationSlot::new(ResponseCategory::StringList);
        slot.poison();
        slot.clear();
        slot.deposit(5u32);

        assert!(slot.is_poisoned());
        assert!(slot.is_empty());
        assert!(matches!(slot.take(), Err(MageNetError::ConnectionLost)));
    }

    #[test]
    fn test_interrupt_releases_waiter_and_empties_slot() {
        let slot = Arc::new(CorrelationSlot::new(ResponseCategory::Boolean));
        let rx = spawn_take(&slot);

        thread::sleep(Duration::from_millis(20));
        slot.interrupt();
        assert!(matches!(
            rx.recv_timeout(BOUND).unwrap(),
            Err(MageNetError::Interrupted)
        ));

        // A late reply for the cancelled call must not reach the next caller
        slot.deposit(99);
        slot.clear();
        slot.deposit(1);
        assert_eq!(slot.take().unwrap(), 1);
        assert!(slot.is_empty());
    }

    #[test]
    fn test_interrupt_before_take_is_held() {
        let slot = CorrelationSlot::new(ResponseCategory::Boolean);
        slot.deposit(3u32);
        slot.interrupt();

        assert!(matches!(slot.take(), Err(MageNetError::Interrupted)));
        assert!(slot.is_empty());
    }

    #[test]
    fn test_pending_interrupt_survives_clear() {
        let slot = CorrelationSlot::new(ResponseCategory::Id);
        slot.interrupt();
        slot.clear();
        slot.deposit(8u32);

        assert!(matches!(slot.take(), Err(MageNetError::Interrupted)));

        // Consumed: the next exchange is unaffected
        slot.deposit(9);
        assert_eq!(slot.take().unwrap(), 9);
    }

    #[test]
    fn test_take_timeout_expires_with_distinct_error() {
        let slot = CorrelationSlot::<u32>::new(ResponseCategory::RoomView);

        match slot.take_timeout(Duration::from_millis(30)) {
            Err(MageNetError::Timeout(waited)) => assert_eq!(waited, Duration::from_millis(30)),
            other => panic!("Expected timeout, got {:?}", other),
        }
        assert!(slot.is_empty());
    }

    #[test]
    fn test_take_timeout_returns_value_in_time() {
        let slot = Arc::new(CorrelationSlot::new(ResponseCategory::RoomView));
        let depositor = slot.clone();
        let handle = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            depositor.deposit(11u32);
        });

        assert_eq!(slot.take_timeout(BOUND).unwrap(), 11);
        handle.join().unwrap();
    }
}
