//! Subscriber channels
//!
//! A `Channel<T>` is a single-threaded list of typed callbacks. Subscribing
//! returns a [`Subscription`] handle that detaches the callback again.
//!
//! Callbacks may subscribe, unsubscribe or close the channel while it is
//! dispatching. Each callback is taken out of its slot for the duration of its
//! call, so no `RefCell` borrow is held across user code.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;

new_key_type! {
    /// Unique identifier for a subscriber within a channel
    pub struct SubscriberId;
}

type Callback<T> = Box<dyn FnMut(&T)>;

struct ChannelInner<T> {
    /// `None` while the callback is being invoked
    subscribers: RefCell<SlotMap<SubscriberId, Option<Callback<T>>>>,
    closed: Cell<bool>,
}

trait Detach {
    fn detach(&self, id: SubscriberId);
}

impl<T> Detach for ChannelInner<T> {
    fn detach(&self, id: SubscriberId) {
        self.subscribers.borrow_mut().remove(id);
    }
}

/// Typed subscriber registry
pub struct Channel<T: 'static> {
    inner: Rc<ChannelInner<T>>,
}

impl<T: 'static> Channel<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(ChannelInner {
                subscribers: RefCell::new(SlotMap::with_key()),
                closed: Cell::new(false),
            }),
        }
    }

    /// Register a callback. Subscribing to a closed channel returns an inert handle.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(&T) + 'static,
    {
        if self.inner.closed.get() {
            tracing::debug!("subscribe on closed channel ignored");
            return Subscription::inert();
        }

        let id = self
            .inner
            .subscribers
            .borrow_mut()
            .insert(Some(Box::new(callback)));
        let weak: Weak<ChannelInner<T>> = Rc::downgrade(&self.inner);
        let weak: Weak<dyn Detach> = weak;
        Subscription {
            channel: Some(weak),
            id,
        }
    }

    /// Invoke every subscriber with `value`
    pub fn emit(&self, value: &T) {
        if self.inner.closed.get() {
            return;
        }

        let keys: SmallVec<[SubscriberId; 8]> =
            self.inner.subscribers.borrow().keys().collect();

        for key in keys {
            // A callback may have closed the channel
            if self.inner.closed.get() {
                break;
            }

            let callback = self
                .inner
                .subscribers
                .borrow_mut()
                .get_mut(key)
                .and_then(Option::take);
            let Some(mut callback) = callback else {
                continue;
            };

            callback(value);

            // Slot is gone if the callback unsubscribed itself or closed the channel
            if let Some(slot) = self.inner.subscribers.borrow_mut().get_mut(key) {
                *slot = Some(callback);
            }
        }
    }

    /// Drop every callback and silence all future emits
    pub fn close(&self) {
        self.inner.closed.set(true);
        let dropped = std::mem::take(&mut *self.inner.subscribers.borrow_mut());
        // Callbacks are dropped outside the borrow in case their captures touch the channel
        drop(dropped);
    }

    pub fn is_closed(&self) -> bool {
        self.inner.closed.get()
    }

    /// Number of live subscribers
    pub fn len(&self) -> usize {
        self.inner.subscribers.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Channel<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`Channel::subscribe`]
///
/// Dropping the handle keeps the callback registered; call
/// [`Subscription::unsubscribe`] to detach it.
pub struct Subscription {
    channel: Option<Weak<dyn Detach>>,
    id: SubscriberId,
}

impl Subscription {
    fn inert() -> Self {
        Self {
            channel: None,
            id: SubscriberId::default(),
        }
    }

    pub fn id(&self) -> SubscriberId {
        self.id
    }

    /// Detach the callback. No-op if the channel is gone or closed.
    pub fn unsubscribe(self) {
        if let Some(channel) = self.channel.as_ref().and_then(Weak::upgrade) {
            channel.detach(self.id);
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("attached", &self.channel.is_some())
            .finish()
    }
}
