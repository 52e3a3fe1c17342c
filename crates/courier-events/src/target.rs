// ABOUTME: In-process event target tree: listener registry, synchronous dispatch and bubbling
// ABOUTME: Stands in for the host platform's event dispatch primitive

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use courier_logging::{debug, debug_span, trace, warn};

use crate::event::{Event, Phase};

/// Errors raised while dispatching an event.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("cannot dispatch {event_type}: target is detached")]
    Detached { event_type: String },
}

/// Errors raised while building a target tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    #[error("appending the node would make it its own ancestor")]
    Cycle,
}

/// Anything events can be dispatched on.
pub trait EventTarget {
    /// Dispatches the event synchronously.
    ///
    /// Returns `false` when the event is cancelable and a listener called
    /// [`Event::prevent_default`], `true` otherwise.
    fn dispatch_event(&self, event: Event) -> Result<bool, DispatchError>;
}

pub type Listener = Arc<dyn Fn(&Event) + Send + Sync>;

/// Identifies a registered listener for later removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListenerOptions {
    /// Remove the listener after its first invocation
    pub once: bool,
}

struct Registration {
    id: ListenerId,
    event_type: String,
    listener: Listener,
    once: bool,
}

struct NodeInner {
    name: Option<String>,
    parent: Mutex<Option<Node>>,
    listeners: Mutex<Vec<Registration>>,
}

static NEXT_LISTENER_ID: AtomicU64 = AtomicU64::new(1);

/// A node events are dispatched on. Cloning yields another handle to the same node.
///
/// A node keeps its parent alive; parents do not track their children.
#[derive(Clone)]
pub struct Node {
    inner: Arc<NodeInner>,
}

impl Node {
    pub fn new() -> Self {
        Self::with_name(None)
    }

    /// A node with a name used in dispatch logs.
    pub fn named(name: impl Into<String>) -> Self {
        Self::with_name(Some(name.into()))
    }

    fn with_name(name: Option<String>) -> Self {
        Self {
            inner: Arc::new(NodeInner {
                name,
                parent: Mutex::new(None),
                listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Creates a named node appended to this one.
    pub fn child(&self, name: impl Into<String>) -> Node {
        let child = Node::named(name);
        *child.inner.parent.lock() = Some(self.clone());
        child
    }

    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    pub fn parent(&self) -> Option<Node> {
        self.inner.parent.lock().clone()
    }

    /// Moves this node under `parent`.
    pub fn append_to(&self, parent: &Node) -> Result<(), HierarchyError> {
        let mut ancestor = Some(parent.clone());
        while let Some(node) = ancestor {
            if node.ptr_eq(self) {
                return Err(HierarchyError::Cycle);
            }
            ancestor = node.parent();
        }

        *self.inner.parent.lock() = Some(parent.clone());
        Ok(())
    }

    /// Removes this node from its parent. Events dispatched on it no longer bubble up.
    pub fn detach(&self) {
        self.inner.parent.lock().take();
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn downgrade(&self) -> WeakNode {
        WeakNode {
            inner: Arc::downgrade(&self.inner),
        }
    }

    pub fn add_event_listener<F>(&self, event_type: impl Into<String>, listener: F) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.add_event_listener_with_options(event_type, listener, ListenerOptions::default())
    }

    pub fn add_event_listener_with_options<F>(
        &self,
        event_type: impl Into<String>,
        listener: F,
        options: ListenerOptions,
    ) -> ListenerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = ListenerId(NEXT_LISTENER_ID.fetch_add(1, Ordering::Relaxed));
        let event_type = event_type.into();
        trace!(node = ?self.name(), event_type = %event_type, once = options.once, "Listener added");

        self.inner.listeners.lock().push(Registration {
            id,
            event_type,
            listener: Arc::new(listener),
            once: options.once,
        });
        id
    }

    /// Returns whether the listener was registered on this node.
    pub fn remove_event_listener(&self, id: ListenerId) -> bool {
        let mut listeners = self.inner.listeners.lock();
        let before = listeners.len();
        listeners.retain(|registration| registration.id != id);
        listeners.len() != before
    }

    pub fn listener_count(&self, event_type: &str) -> usize {
        self.inner
            .listeners
            .lock()
            .iter()
            .filter(|registration| registration.event_type == event_type)
            .count()
    }

    fn dispatch(&self, event: &Event) -> bool {
        let span = debug_span!(
            "dispatch",
            event_type = %event.event_type(),
            node = ?self.name(),
            bubbles = event.bubbles(),
            cancelable = event.cancelable(),
        );
        let _enter = span.enter();

        event.set_target(self.downgrade());
        event.set_phase(Phase::AtTarget);
        let mut invoked = self.invoke_listeners(event);

        if event.bubbles() {
            event.set_phase(Phase::Bubbling);
            let mut current = self.parent();
            while let Some(node) = current {
                if event.propagation_stopped() {
                    break;
                }
                invoked += node.invoke_listeners(event);
                current = node.parent();
            }
        }
        event.set_phase(Phase::None);
        event.set_current_target(None);

        debug!(
            listeners = invoked,
            default_prevented = event.default_prevented(),
            "Event dispatched"
        );
        !event.default_prevented()
    }

    /// Runs the listeners registered on this node for the event's type.
    ///
    /// The matching listeners are collected before any of them runs, and the
    /// lock is released, so a listener may add or remove listeners or dispatch
    /// other events. Listeners removed during the dispatch are skipped.
    fn invoke_listeners(&self, event: &Event) -> usize {
        let matching: Vec<(ListenerId, Listener, bool)> = self
            .inner
            .listeners
            .lock()
            .iter()
            .filter(|registration| registration.event_type == event.event_type())
            .map(|registration| (registration.id, registration.listener.clone(), registration.once))
            .collect();

        event.set_current_target(Some(self.downgrade()));

        let mut invoked = 0;
        for (id, listener, once) in matching {
            if event.immediate_propagation_stopped() {
                break;
            }
            if !self.claim(id, once) {
                continue;
            }
            listener(event);
            invoked += 1;
        }
        invoked
    }

    /// Whether the listener is still registered. A `once` registration is
    /// removed here, right before its only invocation.
    fn claim(&self, id: ListenerId, once: bool) -> bool {
        let mut listeners = self.inner.listeners.lock();
        match listeners.iter().position(|registration| registration.id == id) {
            Some(index) => {
                if once {
                    listeners.remove(index);
                }
                true
            }
            None => false,
        }
    }
}

impl Default for Node {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.name())
            .field("listeners", &self.inner.listeners.lock().len())
            .finish()
    }
}

impl EventTarget for Node {
    fn dispatch_event(&self, event: Event) -> Result<bool, DispatchError> {
        Ok(self.dispatch(&event))
    }
}

/// A handle that does not keep its node alive.
#[derive(Clone)]
pub struct WeakNode {
    inner: Weak<NodeInner>,
}

impl WeakNode {
    pub fn upgrade(&self) -> Option<Node> {
        self.inner.upgrade().map(|inner| Node { inner })
    }
}

impl fmt::Debug for WeakNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WeakNode")
            .field("alive", &(self.inner.strong_count() > 0))
            .finish()
    }
}

impl EventTarget for WeakNode {
    fn dispatch_event(&self, event: Event) -> Result<bool, DispatchError> {
        match self.upgrade() {
            Some(node) => node.dispatch_event(event),
            None => {
                warn!(event_type = %event.event_type(), "Dispatch on a detached target");
                Err(DispatchError::Detached {
                    event_type: event.event_type().to_string(),
                })
            }
        }
    }
}
