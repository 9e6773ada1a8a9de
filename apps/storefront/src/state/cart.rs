//! # Cart Store
//!
//! Owns the session's cart and tells the UI about every change.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Store Operations                                │
//! │                                                                         │
//! │  UI Action            Store Call            Effect                      │
//! │  ─────────            ──────────            ──────                      │
//! │                                                                         │
//! │  Add to Cart ───────► add_item() ─────────► AddItem                    │
//! │                                                                         │
//! │  - / + buttons ─────► update_quantity() ──► UpdateQuantity             │
//! │                                                                         │
//! │  Trash icon ────────► remove_item() ──────► RemoveItem                 │
//! │                                                                         │
//! │  Cart view / badge ─► read() ─────────────► (snapshot, no change)      │
//! │                                                                         │
//! │  dispatch():                                                            │
//! │    1. lock, apply command to current snapshot, swap new Arc in, unlock  │
//! │    2. call every listener, in subscription order, with the new Arc      │
//! │    3. return                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Snapshots are `Arc<CartState>`: a reader holding one never sees it change,
//! and a transition is a single pointer swap. Ignored commands do not notify.
//!
//! Listeners run after the lock is released, so a listener may read the store
//! or dispatch again without deadlocking.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use techstore_core::{CartCommand, CartState, Ignored, LineItemInput, ProductId, Transition};
use tracing::debug;

/// A read-only view of the cart at one point in time.
pub type CartSnapshot = Arc<CartState>;

/// Callback invoked with the new snapshot after each applied transition.
pub type CartListener = dyn Fn(&CartSnapshot) + Send + Sync;

type ListenerEntry = (u64, Arc<CartListener>);

/// What a dispatch did.
#[derive(Debug, Clone)]
pub enum Dispatched {
    /// The cart changed; listeners have already been notified.
    Applied(CartSnapshot),

    /// The command was a no-op; `current` is the unchanged snapshot.
    Ignored { current: CartSnapshot, reason: Ignored },
}

impl Dispatched {
    /// The cart as it stands after the dispatch.
    pub fn snapshot(&self) -> &CartSnapshot {
        match self {
            Dispatched::Applied(snapshot) => snapshot,
            Dispatched::Ignored { current, .. } => current,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Dispatched::Applied(_))
    }
}

struct Inner {
    state: Mutex<CartSnapshot>,
    listeners: Mutex<Vec<ListenerEntry>>,
    next_listener_id: AtomicU64,
}

/// Session-scoped cart store.
///
/// Cloning is cheap and every clone refers to the same cart; hand clones to
/// whichever parts of the UI need the cart instead of reaching for a global.
#[derive(Clone)]
pub struct CartStore {
    inner: Arc<Inner>,
}

impl CartStore {
    /// Creates a store holding an empty cart.
    pub fn new() -> Self {
        CartStore {
            inner: Arc::new(Inner {
                state: Mutex::new(Arc::new(CartState::empty())),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// The current snapshot. Reflects every dispatch that has returned.
    pub fn read(&self) -> CartSnapshot {
        Arc::clone(&self.lock_state())
    }

    /// Adds one unit of a product.
    pub fn add_item(&self, input: LineItemInput) -> Dispatched {
        self.dispatch(CartCommand::AddItem(input))
    }

    /// Sets a line's quantity. Values below one and unknown ids are ignored.
    pub fn update_quantity(&self, id: ProductId, quantity: i64) -> Dispatched {
        self.dispatch(CartCommand::UpdateQuantity { id, quantity })
    }

    /// Removes a line if present.
    pub fn remove_item(&self, id: ProductId) -> Dispatched {
        self.dispatch(CartCommand::RemoveItem(id))
    }

    /// Moves a line's quantity by `delta` (the `+` / `-` buttons).
    ///
    /// The current quantity is read under the same lock that applies the
    /// update, so concurrent steps on cloned stores never lose a unit. An
    /// absent line or a result outside `1..=MAX_ITEM_QUANTITY` is ignored.
    pub fn step_quantity(&self, id: ProductId, delta: i64) -> Dispatched {
        self.dispatch_with(|cart| {
            let current = cart.get(id).map_or(0, |line| line.quantity);
            CartCommand::UpdateQuantity {
                id,
                quantity: current.saturating_add(delta),
            }
        })
    }

    /// Applies `command` and notifies listeners if the cart changed.
    pub fn dispatch(&self, command: CartCommand) -> Dispatched {
        self.dispatch_with(|_| command)
    }

    // `build` sees the state the command will be applied to.
    fn dispatch_with<F>(&self, build: F) -> Dispatched
    where
        F: FnOnce(&CartState) -> CartCommand,
    {
        let (command, snapshot) = {
            let mut current = self.lock_state();
            let command = build(&**current);
            match current.apply(&command) {
                Transition::Applied(next) => {
                    let next = Arc::new(next);
                    *current = Arc::clone(&next);
                    (command, next)
                }
                Transition::Ignored(reason) => {
                    debug!(
                        command = command.name(),
                        product_id = %command.product_id(),
                        %reason,
                        "cart command ignored"
                    );
                    return Dispatched::Ignored {
                        current: Arc::clone(&current),
                        reason,
                    };
                }
            }
        };

        debug!(
            command = command.name(),
            product_id = %command.product_id(),
            items = snapshot.item_count(),
            total = %snapshot.total(),
            "cart transition applied"
        );

        let listeners: Vec<Arc<CartListener>> = self
            .lock_listeners()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }

        Dispatched::Applied(snapshot)
    }

    /// Registers `listener` for every future applied transition.
    ///
    /// Listeners are called in the order they subscribed. The listener stays
    /// registered until [`Subscription::unsubscribe`] is called, even if the
    /// `Subscription` is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&CartSnapshot) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.lock_listeners().push((id, Arc::new(listener)));
        debug!(listener_id = id, "cart listener subscribed");

        Subscription {
            id,
            store: Arc::downgrade(&self.inner),
        }
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.lock_listeners().len()
    }

    // A panicking listener never runs while these locks are held, and `apply`
    // does not mutate in place, so a poisoned guard still holds a valid cart.
    fn lock_state(&self) -> MutexGuard<'_, CartSnapshot> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_listeners(&self) -> MutexGuard<'_, Vec<ListenerEntry>> {
        self.inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("state", &*self.lock_state())
            .field("listeners", &self.listener_count())
            .finish()
    }
}

/// Handle returned by [`CartStore::subscribe`].
#[must_use = "keep the Subscription to be able to unsubscribe later"]
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    store: Weak<Inner>,
}

impl Subscription {
    /// Stops further notifications. Consumes the handle, so it runs once.
    ///
    /// A notification already in progress when this is called still reaches
    /// the listener.
    pub fn unsubscribe(self) {
        let Some(inner) = self.store.upgrade() else {
            return;
        };
        let mut listeners = inner
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.retain(|(id, _)| *id != self.id);
        debug!(listener_id = self.id, "cart listener unsubscribed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use techstore_core::Money;

    fn input(id: u32, name: &str, dollars: i64) -> LineItemInput {
        LineItemInput::new(ProductId::new(id), name, Money::from_dollars(dollars), "x")
    }

    /// Records (total_quantity, total cents) of every notification.
    fn recorder(store: &CartStore) -> (Arc<Mutex<Vec<(i64, i64)>>>, Subscription) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let subscription = store.subscribe(move |snapshot| {
            sink.lock()
                .unwrap()
                .push((snapshot.total_quantity(), snapshot.total().cents()));
        });
        (seen, subscription)
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = CartStore::new();
        assert!(store.read().is_empty());
        assert_eq!(store.listener_count(), 0);
    }

    #[test]
    fn test_reference_scenario_through_store() {
        let store = CartStore::new();

        store.add_item(input(1, "A", 10));
        assert_eq!(store.read().total(), Money::from_dollars(10));

        store.add_item(input(1, "A", 10));
        store.add_item(input(2, "B", 5));
        assert_eq!(store.read().total(), Money::from_dollars(25));

        let outcome = store.update_quantity(ProductId::new(1), 0);
        assert!(!outcome.is_applied());
        assert_eq!(store.read().total(), Money::from_dollars(25));

        store.remove_item(ProductId::new(2));
        let cart = store.read();
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 2);
        assert_eq!(cart.total(), Money::from_dollars(20));
    }

    #[test]
    fn test_listeners_see_every_applied_transition() {
        let store = CartStore::new();
        let (seen, _subscription) = recorder(&store);

        store.add_item(input(1, "A", 10));
        store.add_item(input(1, "A", 10));
        store.update_quantity(ProductId::new(1), 5);

        assert_eq!(*seen.lock().unwrap(), vec![(1, 1000), (2, 2000), (5, 5000)]);
    }

    #[test]
    fn test_ignored_commands_do_not_notify() {
        let store = CartStore::new();
        store.add_item(input(1, "A", 10));
        let (seen, _subscription) = recorder(&store);

        store.update_quantity(ProductId::new(1), -1);
        store.update_quantity(ProductId::new(9), 5);
        store.remove_item(ProductId::new(9));

        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_listener_sees_new_state_before_dispatch_returns() {
        let store = CartStore::new();
        let reader = store.clone();
        let matched = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&matched);
        let _subscription = store.subscribe(move |snapshot| {
            // read() from inside a listener already returns the new state
            sink.lock().unwrap().push(Arc::ptr_eq(snapshot, &reader.read()));
        });

        let outcome = store.add_item(input(1, "A", 10));

        assert_eq!(*matched.lock().unwrap(), vec![true]);
        assert!(Arc::ptr_eq(outcome.snapshot(), &store.read()));
    }

    #[test]
    fn test_listeners_called_in_subscription_order() {
        let store = CartStore::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let subscriptions: Vec<Subscription> = (0..3)
            .map(|n| {
                let order = Arc::clone(&order);
                store.subscribe(move |_| order.lock().unwrap().push(n))
            })
            .collect();

        store.add_item(input(1, "A", 10));
        assert_eq!(*order.lock().unwrap(), vec![0, 1, 2]);
        assert_eq!(subscriptions.len(), 3);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let store = CartStore::new();
        let (seen, subscription) = recorder(&store);
        let (other, _keep) = recorder(&store);

        store.add_item(input(1, "A", 10));
        subscription.unsubscribe();
        store.add_item(input(1, "A", 10));

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(other.lock().unwrap().len(), 2);
        assert_eq!(store.listener_count(), 1);
    }

    #[test]
    fn test_unsubscribe_after_store_dropped_is_harmless() {
        let store = CartStore::new();
        let (_seen, subscription) = recorder(&store);
        drop(store);
        subscription.unsubscribe();
    }

    #[test]
    fn test_old_snapshots_are_never_mutated() {
        let store = CartStore::new();
        store.add_item(input(1, "A", 10));
        let before = store.read();

        store.add_item(input(1, "A", 10));
        store.remove_item(ProductId::new(1));

        assert_eq!(before.get(ProductId::new(1)).unwrap().quantity, 1);
        assert!(store.read().is_empty());
    }

    #[test]
    fn test_listener_may_dispatch_again() {
        let store = CartStore::new();
        let inner = store.clone();
        let _subscription = store.subscribe(move |snapshot| {
            // Cap the line at 3 units.
            if let Some(line) = snapshot.get(ProductId::new(1)) {
                if line.quantity > 3 {
                    inner.update_quantity(ProductId::new(1), 3);
                }
            }
        });

        for _ in 0..5 {
            store.add_item(input(1, "A", 10));
        }
        assert_eq!(store.read().get(ProductId::new(1)).unwrap().quantity, 3);
    }

    #[test]
    fn test_step_quantity() {
        let store = CartStore::new();
        store.add_item(input(1, "A", 10));

        assert!(store.step_quantity(ProductId::new(1), 1).is_applied());
        assert_eq!(store.read().get(ProductId::new(1)).unwrap().quantity, 2);

        store.step_quantity(ProductId::new(1), -1);
        let outcome = store.step_quantity(ProductId::new(1), -1);
        assert!(!outcome.is_applied());
        assert_eq!(store.read().total_quantity(), 1);

        assert!(!store.step_quantity(ProductId::new(9), 1).is_applied());
    }

    #[test]
    fn test_concurrent_steps_lose_no_units() {
        let store = CartStore::new();
        store.add_item(input(1, "A", 10));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        store.step_quantity(ProductId::new(1), 1);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let cart = store.read();
        assert_eq!(cart.get(ProductId::new(1)).unwrap().quantity, 401);
        assert_eq!(cart.total(), Money::from_dollars(4010));
    }

    #[test]
    fn test_huge_quantity_leaves_store_usable() {
        let store = CartStore::new();
        store.add_item(input(1, "iPhone 15 Pro", 999));

        let outcome = store.update_quantity(ProductId::new(1), i64::MAX);
        assert!(!outcome.is_applied());

        store.add_item(input(1, "iPhone 15 Pro", 999));
        assert_eq!(store.read().total(), Money::from_dollars(1998));
    }

    #[test]
    fn test_clones_share_one_cart() {
        let store = CartStore::new();
        let other = store.clone();

        other.add_item(input(1, "A", 10));
        store.add_item(input(1, "A", 10));

        assert_eq!(store.read().total_quantity(), 2);
        assert!(Arc::ptr_eq(&store.read(), &other.read()));
    }
}
