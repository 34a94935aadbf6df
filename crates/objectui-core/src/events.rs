//! Synchronous observer signals.
//!
//! [`Signal`] is the notification primitive used by the registries: observers
//! connect closures, mutations emit events, and every connected slot is
//! invoked synchronously at the point of the state change. Connections are
//! identified by [`ConnectionId`] keys and can be dropped individually or
//! through an RAII [`ConnectionGuard`].
//!
//! # Example
//!
//! ```
//! use objectui_core::events::Signal;
//!
//! let signal = Signal::<String>::new();
//! let id = signal.connect(|name| println!("loaded: {name}"));
//! signal.emit(&"crm-card".to_string());
//! assert!(signal.disconnect(id));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Identifies one connection on a [`Signal`].
    pub struct ConnectionId;
}

type Slot<E> = Arc<dyn Fn(&E) + Send + Sync>;

/// A synchronous observer list.
///
/// Emission clones the connected slots out of the lock before invoking them,
/// so a slot may connect or disconnect observers on the same signal without
/// deadlocking. Slots connected during an emission are not invoked for that
/// emission.
pub struct Signal<E> {
    connections: Mutex<SlotMap<ConnectionId, Slot<E>>>,
    blocked: AtomicBool,
}

impl<E> Default for Signal<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Signal<E> {
    /// Create a signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot. Returns the id used to disconnect it later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Connect a slot and tie its lifetime to the returned guard.
    ///
    /// The connection is dropped when the guard goes out of scope, unless
    /// [`ConnectionGuard::detach`] is called first.
    pub fn connect_guarded<F>(&self, slot: F) -> ConnectionGuard<'_, E>
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        ConnectionGuard {
            signal: self,
            id: Some(self.connect(slot)),
        }
    }

    /// Remove a connection. Returns `true` if it existed.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Invoke every connected slot with the event.
    ///
    /// Does nothing while the signal is blocked.
    pub fn emit(&self, event: &E) {
        if self.blocked.load(Ordering::Relaxed) {
            return;
        }
        let slots: Vec<Slot<E>> = self.connections.lock().values().cloned().collect();
        for slot in slots {
            slot(event);
        }
    }

    /// Suppress emissions until [`unblock`](Self::unblock) is called.
    pub fn block(&self) {
        self.blocked.store(true, Ordering::Relaxed);
    }

    /// Resume emissions after a [`block`](Self::block).
    pub fn unblock(&self) {
        self.blocked.store(false, Ordering::Relaxed);
    }

    /// Whether emissions are currently suppressed.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::Relaxed)
    }

    /// The number of active connections.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }
}

impl<E> std::fmt::Debug for Signal<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("connections", &self.connection_count())
            .field("blocked", &self.is_blocked())
            .finish()
    }
}

/// RAII handle that disconnects its slot on drop.
pub struct ConnectionGuard<'a, E> {
    signal: &'a Signal<E>,
    id: Option<ConnectionId>,
}

impl<E> ConnectionGuard<'_, E> {
    /// The id of the guarded connection.
    pub fn id(&self) -> Option<ConnectionId> {
        self.id
    }

    /// Release the guard without disconnecting, leaving the connection alive
    /// for the lifetime of the signal.
    pub fn detach(mut self) -> Option<ConnectionId> {
        self.id.take()
    }
}

impl<E> Drop for ConnectionGuard<'_, E> {
    fn drop(&mut self) {
        if let Some(id) = self.id.take() {
            self.signal.disconnect(id);
        }
    }
}
