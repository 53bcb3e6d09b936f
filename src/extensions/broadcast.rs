//! Application-wide named signals.
//!
//! Producers call [`BroadcastBus::broadcast`]; each live subscription to that
//! name gets one pending delivery queued in its inbox and, when it was
//! registered with [`BroadcastBus::subscribe_with`], its waker runs before
//! `broadcast` returns. A waker that cannot act right away (its consumer is
//! mid-mutation) leaves the delivery queued for the consumer to drain.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::trace;

/// Asks every trendline engine on the bus to remove all its trendlines.
pub const CLEAR_ALL_TRENDLINES_SIGNAL: &str = "clearAllTrendlines";

#[derive(Default)]
struct BusInner {
    next_id: u64,
    subscribers: Vec<Subscriber>,
}

type Waker = Rc<dyn Fn()>;

struct Subscriber {
    id: u64,
    signal: String,
    inbox: Rc<Cell<u32>>,
    waker: Option<Waker>,
}

/// Single-threaded signal bus. Clones share the same subscriber set.
#[derive(Clone, Default)]
pub struct BroadcastBus {
    inner: Rc<RefCell<BusInner>>,
}

impl BroadcastBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers interest in `signal`. Dropping the subscription unregisters.
    #[must_use]
    pub fn subscribe(&self, signal: &str) -> BroadcastSubscription {
        self.register(signal, None)
    }

    /// Like [`subscribe`](Self::subscribe), and `waker` runs synchronously on
    /// every delivery, after the delivery is queued.
    #[must_use]
    pub fn subscribe_with<F>(&self, signal: &str, waker: F) -> BroadcastSubscription
    where
        F: Fn() + 'static,
    {
        self.register(signal, Some(Rc::new(waker)))
    }

    fn register(&self, signal: &str, waker: Option<Waker>) -> BroadcastSubscription {
        let inbox = Rc::new(Cell::new(0));
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.subscribers.push(Subscriber {
            id,
            signal: signal.to_owned(),
            inbox: Rc::clone(&inbox),
            waker,
        });
        BroadcastSubscription {
            id,
            signal: signal.to_owned(),
            inbox,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Queues `signal` for every subscriber; returns how many received it.
    pub fn broadcast(&self, signal: &str) -> usize {
        let mut delivered = 0;
        let mut wakers = Vec::new();
        {
            let inner = self.inner.borrow();
            for subscriber in inner.subscribers.iter().filter(|sub| sub.signal == signal) {
                subscriber.inbox.set(subscriber.inbox.get().saturating_add(1));
                delivered += 1;
                wakers.extend(subscriber.waker.clone());
            }
        }
        trace!(signal, delivered, "broadcast signal");
        // The bus is released here, so wakers may subscribe, drop or broadcast.
        for waker in wakers {
            waker();
        }
        delivered
    }

    #[must_use]
    pub fn subscriber_count(&self, signal: &str) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|sub| sub.signal == signal)
            .count()
    }
}

impl fmt::Debug for BroadcastBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadcastBus")
            .field("subscribers", &self.inner.borrow().subscribers.len())
            .finish()
    }
}

/// Live registration for one signal name.
pub struct BroadcastSubscription {
    id: u64,
    signal: String,
    inbox: Rc<Cell<u32>>,
    bus: Weak<RefCell<BusInner>>,
}

impl BroadcastSubscription {
    #[must_use]
    pub fn signal(&self) -> &str {
        &self.signal
    }

    #[must_use]
    pub fn pending(&self) -> u32 {
        self.inbox.get()
    }

    /// Returns the number of deliveries since the last drain and resets it.
    pub fn drain(&self) -> u32 {
        self.inbox.replace(0)
    }
}

impl fmt::Debug for BroadcastSubscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BroadcastSubscription")
            .field("id", &self.id)
            .field("signal", &self.signal)
            .field("pending", &self.inbox.get())
            .finish()
    }
}

impl Drop for BroadcastSubscription {
    fn drop(&mut self) {
        let Some(bus) = self.bus.upgrade() else {
            return;
        };
        if let Ok(mut inner) = bus.try_borrow_mut() {
            inner.subscribers.retain(|sub| sub.id != self.id);
        }
    }
}
