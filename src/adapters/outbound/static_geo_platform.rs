//! Static Geolocation Platform
//!
//! A `GeoPlatform` whose answers are fixed up front: a known position, a
//! platform error, silence, or no geolocation at all. The binary uses it
//! with a position taken from configuration; tests use it to script the
//! platform and inspect which watches were started and cleared.

use crate::domain::ports::{ErrorCallback, GeoPlatform, PlatformError, PositionCallback, WatchId};
use crate::domain::value_objects::Coordinates;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

/// What the platform does when a watch is started.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformBehavior {
    /// Geolocation is not available.
    Unsupported,
    /// Report each position in order.
    Positions(Vec<Coordinates>),
    /// Report an error.
    Fail(PlatformError),
    /// Accept the watch and stay quiet until `emit_*` is called.
    Silent,
}

struct Watcher {
    on_update: Arc<dyn Fn(Coordinates) + Send + Sync>,
    on_error: Arc<dyn Fn(PlatformError) + Send + Sync>,
}

/// Scripted geolocation platform.
pub struct StaticGeoPlatform {
    behavior: PlatformBehavior,
    watchers: Mutex<HashMap<WatchId, Watcher>>,
    next_id: AtomicU64,
    watches_started: AtomicUsize,
}

impl StaticGeoPlatform {
    pub fn new(behavior: PlatformBehavior) -> Self {
        Self {
            behavior,
            watchers: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            watches_started: AtomicUsize::new(0),
        }
    }

    /// Platform that always reports `coords`.
    pub fn fixed(coords: Coordinates) -> Self {
        Self::new(PlatformBehavior::Positions(vec![coords]))
    }

    /// Platform without geolocation.
    pub fn unsupported() -> Self {
        Self::new(PlatformBehavior::Unsupported)
    }

    /// Platform where the user declines the permission prompt.
    pub fn denied() -> Self {
        Self::new(PlatformBehavior::Fail(PlatformError::PermissionDenied))
    }

    /// Number of watches ever started (i.e. permission prompts shown).
    pub fn watches_started(&self) -> usize {
        self.watches_started.load(Ordering::SeqCst)
    }

    /// Number of watches not yet cleared.
    pub fn active_watches(&self) -> usize {
        self.watchers.lock().len()
    }

    /// Push a position to every active watch.
    pub fn emit_position(&self, coords: Coordinates) {
        let callbacks: Vec<_> = self
            .watchers
            .lock()
            .values()
            .map(|w| w.on_update.clone())
            .collect();
        for callback in callbacks {
            callback(coords);
        }
    }

    /// Push an error to every active watch.
    pub fn emit_error(&self, error: PlatformError) {
        let callbacks: Vec<_> = self
            .watchers
            .lock()
            .values()
            .map(|w| w.on_error.clone())
            .collect();
        for callback in callbacks {
            callback(error.clone());
        }
    }
}

impl GeoPlatform for StaticGeoPlatform {
    fn supported(&self) -> bool {
        self.behavior != PlatformBehavior::Unsupported
    }

    fn watch_position(&self, on_update: PositionCallback, on_error: ErrorCallback) -> WatchId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        self.watches_started.fetch_add(1, Ordering::SeqCst);

        let on_update: Arc<dyn Fn(Coordinates) + Send + Sync> = Arc::from(on_update);
        let on_error: Arc<dyn Fn(PlatformError) + Send + Sync> = Arc::from(on_error);
        self.watchers.lock().insert(
            id,
            Watcher {
                on_update: on_update.clone(),
                on_error: on_error.clone(),
            },
        );

        match &self.behavior {
            PlatformBehavior::Unsupported => on_error(PlatformError::PositionUnavailable(
                "geolocation is not available".to_string(),
            )),
            PlatformBehavior::Positions(positions) => {
                for coords in positions {
                    on_update(*coords);
                }
            }
            PlatformBehavior::Fail(error) => on_error(error.clone()),
            PlatformBehavior::Silent => {}
        }

        id
    }

    fn clear_watch(&self, id: WatchId) {
        self.watchers.lock().remove(&id);
    }
}
