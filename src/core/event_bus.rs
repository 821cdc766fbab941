//! Event queue for decoupled component communication.
//!
//! Widgets and background workers emit events; the main loop drains them
//! once per frame with poll() and dispatches. Events are plain structs,
//! type-erased in the queue and recovered with [`downcast_event`].
//!
//! Queue order is FIFO. Emitting never blocks the UI thread.

use log::warn;
use std::any::Any;
use std::sync::{Arc, Mutex};

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

/// Marker trait for events. Events must be Send + Sync + 'static.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

// Blanket impl for all qualifying types
impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

/// Shared event queue with deferred processing.
///
/// emit() enqueues; poll() drains everything emitted since the last poll.
/// Cheap-to-clone handles via [`EventBus::emitter`] go to widgets and worker
/// threads.
#[derive(Clone)]
pub struct EventBus {
    queue: Arc<Mutex<Vec<BoxedEvent>>>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            queue: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queue an event for the next poll().
    pub fn emit<E: Event>(&self, event: E) {
        push(&self.queue, Box::new(event));
    }

    /// Drain all queued events for batch processing in the main loop.
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Get an emitter handle for passing to UI components and workers.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            queue: Arc::clone(&self.queue),
        }
    }

    /// Check queue length
    pub fn queue_len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Lightweight emitter handle.
///
/// Can be cloned into widgets and background threads for emitting events.
#[derive(Clone)]
pub struct EventEmitter {
    queue: Arc<Mutex<Vec<BoxedEvent>>>,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("queue_len", &self.queue.lock().map(|q| q.len()).unwrap_or(0))
            .finish()
    }
}

impl EventEmitter {
    /// Queue an event for the next poll() on the owning bus.
    pub fn emit<E: Event>(&self, event: E) {
        push(&self.queue, Box::new(event));
    }
}

fn push(queue: &Mutex<Vec<BoxedEvent>>, event: BoxedEvent) {
    let mut queue = queue.lock().unwrap_or_else(|e| e.into_inner());
    if queue.len() >= MAX_QUEUE_SIZE {
        let evict_count = queue.len() / 2;
        warn!(
            "EventBus queue full ({} events), evicting oldest {}",
            queue.len(),
            evict_count
        );
        queue.drain(0..evict_count);
    }
    queue.push(event);
}

/// Helper: downcast BoxedEvent to concrete type
///
/// IMPORTANT: Must explicitly deref to `dyn Event` before calling `as_any()`.
/// Without explicit deref, the blanket impl `Event for Box<dyn Event>`
/// intercepts the call and returns `&dyn Any` containing `Box<dyn Event>`
/// instead of the original type, causing downcast to always fail.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}
