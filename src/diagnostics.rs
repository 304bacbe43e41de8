//! Structured diagnostic event publisher.
//!
//! A [`DiagnosticsSender`] fans messages out to any number of subscribers,
//! each with a minimum severity level. The session publishes events such as
//! peer-initiated closures and transport loss through its sender; nothing
//! is written anywhere unless a subscriber asks for it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

/// Informational messages (connection lifecycle events).
pub const LEVEL_INFO: usize = 1;

/// Conditions worth attention but not fatal to the process.
pub const LEVEL_WARNING: usize = 5;

/// Errors that terminated a session.
pub const LEVEL_ERROR: usize = 10;

/// Receives `(sender_name, level, message)` for each published event.
pub type DiagnosticDelegate = Arc<dyn Fn(&str, usize, &str) + Send + Sync>;

struct Subscriber {
    min_level: usize,
    delegate: DiagnosticDelegate,
}

#[derive(Default)]
struct Registry {
    next_id: usize,
    subscribers: HashMap<usize, Subscriber>,
}

/// Publishes diagnostic messages on behalf of a named component.
pub struct DiagnosticsSender {
    name: String,
    registry: Arc<Mutex<Registry>>,
}

impl DiagnosticsSender {
    /// Create a sender whose messages carry the given component name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            registry: Arc::new(Mutex::new(Registry::default())),
        }
    }

    /// The component name attached to published messages.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subscribe to messages at or above `min_level`.
    ///
    /// The returned handle keeps the subscription alive until
    /// [`Subscription::unsubscribe`] is called; dropping the handle does
    /// not cancel it.
    pub fn subscribe<F>(&self, delegate: F, min_level: usize) -> Subscription
    where
        F: Fn(&str, usize, &str) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock().expect("diagnostics registry poisoned");
        let id = registry.next_id;
        registry.next_id += 1;
        registry.subscribers.insert(
            id,
            Subscriber {
                min_level,
                delegate: Arc::new(delegate),
            },
        );
        Subscription {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    /// Publish a message to every subscriber whose minimum level permits it.
    pub fn send(&self, level: usize, message: &str) {
        // Delegates run outside the lock so they may subscribe or
        // unsubscribe from within the callback.
        let delegates: Vec<DiagnosticDelegate> = {
            let registry = self.registry.lock().expect("diagnostics registry poisoned");
            registry
                .subscribers
                .values()
                .filter(|s| level >= s.min_level)
                .map(|s| Arc::clone(&s.delegate))
                .collect()
        };
        for delegate in delegates {
            delegate(&self.name, level, message);
        }
    }
}

impl std::fmt::Debug for DiagnosticsSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DiagnosticsSender")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Handle returned by [`DiagnosticsSender::subscribe`].
#[must_use = "dropping the handle does not cancel the subscription"]
pub struct Subscription {
    id: usize,
    registry: Weak<Mutex<Registry>>,
}

impl Subscription {
    /// Terminate the subscription.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            registry
                .lock()
                .expect("diagnostics registry poisoned")
                .subscribers
                .remove(&self.id);
        }
    }
}
