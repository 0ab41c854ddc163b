//! Typed event bus used to decouple the navigator from its listeners

use std::any::{Any, TypeId};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use parking_lot::Mutex;
use ahash::AHashMap;

/// Identifier handed out for every attached handler
pub type SubscriptionId = u64;

type SharedHandler = Arc<Mutex<Box<dyn EventHandler>>>;
type HandlerMap = AHashMap<TypeId, Vec<(SubscriptionId, SharedHandler)>>;

/// System-wide event bus
///
/// Events published from inside a handler are queued and delivered after the
/// current event has reached every handler, so a handler never runs re-entrantly.
pub struct EventBus {
    handlers: Arc<Mutex<HandlerMap>>,
    next_id: AtomicU64,
    queue: Mutex<VecDeque<(TypeId, Box<dyn Event>)>>,
    dispatching: AtomicBool,
}

/// Event trait that all events must implement
pub trait Event: Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
}

/// Handler trait for event handlers
pub trait EventHandler: Send {
    fn handle(&mut self, event: &dyn Event);
}

/// Events emitted by the portfolio
pub mod events {
    use super::Event;
    use crate::navigation::Direction;
    use crate::theme::ThemeMode;

    /// A directional advance was attempted past the first or last item
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ScrollEnd {
        pub direction: Direction,
    }

    /// The active index moved
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct IndexChanged {
        pub from: usize,
        pub to: usize,
    }

    /// The theme was toggled
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ThemeChanged {
        pub mode: ThemeMode,
    }

    /// The visible page section changed
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct SectionChanged {
        pub from: usize,
        pub to: usize,
    }

    macro_rules! impl_event {
        ($($t:ty),*) => {
            $(
                impl Event for $t {
                    fn as_any(&self) -> &dyn std::any::Any {
                        self
                    }
                }
            )*
        }
    }

    impl_event!(
        ScrollEnd,
        IndexChanged,
        ThemeChanged,
        SectionChanged
    );
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Mutex::new(AHashMap::new())),
            next_id: AtomicU64::new(1),
            queue: Mutex::new(VecDeque::new()),
            dispatching: AtomicBool::new(false),
        }
    }

    /// Subscribe to events of a specific type
    pub fn subscribe<E: Event>(&self, handler: Box<dyn EventHandler>) -> SubscriptionId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let type_id = TypeId::of::<E>();
        let mut handlers = self.handlers.lock();
        handlers
            .entry(type_id)
            .or_insert_with(Vec::new)
            .push((id, Arc::new(Mutex::new(handler))));
        id
    }

    /// Subscribe a closure that receives the concrete event type
    pub fn on<E, F>(&self, mut f: F) -> SubscriptionId
    where
        E: Event,
        F: FnMut(&E) + Send + 'static,
    {
        self.subscribe::<E>(handler_from_fn(move |event: &dyn Event| {
            if let Some(event) = event.as_any().downcast_ref::<E>() {
                f(event);
            }
        }))
    }

    /// Subscribe and get a guard that detaches the handler when dropped
    pub fn subscribe_scoped<E, F>(&self, f: F) -> Subscription
    where
        E: Event,
        F: FnMut(&E) + Send + 'static,
    {
        let id = self.on::<E, F>(f);
        Subscription {
            handlers: Arc::downgrade(&self.handlers),
            type_id: TypeId::of::<E>(),
            id,
        }
    }

    /// Detach a handler. Returns false if it was not attached.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        remove_handler(&mut self.handlers.lock(), None, id)
    }

    /// Number of handlers attached for an event type
    pub fn handler_count<E: Event>(&self) -> usize {
        self.handlers
            .lock()
            .get(&TypeId::of::<E>())
            .map(|h| h.len())
            .unwrap_or(0)
    }

    /// Publish an event
    pub fn publish<E: Event>(&self, event: E) {
        self.queue.lock().push_back((TypeId::of::<E>(), Box::new(event)));

        loop {
            // Whoever is already dispatching will drain the queue
            if self.dispatching.swap(true, Ordering::AcqRel) {
                return;
            }

            {
                let _dispatching = DispatchGuard(&self.dispatching);
                while let Some((type_id, event)) = self.pop_queued() {
                    self.dispatch(type_id, event.as_ref());
                }
            }

            // An event may have been queued between the last pop and the flag reset
            if self.queue.lock().is_empty() {
                return;
            }
        }
    }

    fn pop_queued(&self) -> Option<(TypeId, Box<dyn Event>)> {
        self.queue.lock().pop_front()
    }

    fn dispatch(&self, type_id: TypeId, event: &dyn Event) {
        // Snapshot so handlers may subscribe or unsubscribe while running
        let event_handlers: Vec<SharedHandler> = match self.handlers.lock().get(&type_id) {
            Some(handlers) => handlers.iter().map(|(_, h)| h.clone()).collect(),
            None => return,
        };

        for handler in event_handlers {
            handler.lock().handle(event);
        }
    }
}

/// Clears the dispatching flag even if a handler panics
struct DispatchGuard<'a>(&'a AtomicBool);

impl Drop for DispatchGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let handlers = self.handlers.lock();
        f.debug_struct("EventBus")
            .field("event_types", &handlers.len())
            .field("handlers", &handlers.values().map(Vec::len).sum::<usize>())
            .finish()
    }
}

fn remove_handler(handlers: &mut HandlerMap, type_id: Option<TypeId>, id: SubscriptionId) -> bool {
    let mut removed = false;
    for (key, list) in handlers.iter_mut() {
        if type_id.map_or(true, |t| t == *key) {
            let before = list.len();
            list.retain(|(handler_id, _)| *handler_id != id);
            removed |= list.len() != before;
        }
    }
    handlers.retain(|_, list| !list.is_empty());
    removed
}

/// Scoped subscription. The handler stays attached for the guard's lifetime.
#[must_use = "dropping the subscription detaches the handler immediately"]
pub struct Subscription {
    handlers: Weak<Mutex<HandlerMap>>,
    type_id: TypeId,
    id: SubscriptionId,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        // Bus already gone, nothing left to detach from
        if let Some(handlers) = self.handlers.upgrade() {
            remove_handler(&mut handlers.lock(), Some(self.type_id), self.id);
            tracing::debug!(subscription = self.id, "Detached scoped subscription");
        }
    }
}

/// Helper struct for creating event handlers from closures
pub struct ClosureEventHandler<F> {
    handler: F,
}

impl<F> EventHandler for ClosureEventHandler<F>
where
    F: FnMut(&dyn Event) + Send,
{
    fn handle(&mut self, event: &dyn Event) {
        (self.handler)(event);
    }
}

/// Create an event handler from a closure
pub fn handler_from_fn<F>(f: F) -> Box<dyn EventHandler>
where
    F: FnMut(&dyn Event) + Send + 'static,
{
    Box::new(ClosureEventHandler { handler: f })
}
