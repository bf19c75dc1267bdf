//! Lock-free parameter value store
//!
//! Holds the current target of every parameter as an `f32` bit pattern in an
//! `AtomicU32`. The control side writes targets and receives change
//! notifications; the audio side only ever performs atomic loads.
use crate::params::{ParamId, PARAMETER_LAYOUT};
use crate::state::PluginState;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;

/// Observer of parameter target changes
///
/// Called on the thread that wrote the value, never from the audio path.
pub trait ParameterListener: Send + Sync {
    fn parameter_changed(&self, id: ParamId, value: f32);
}

/// Handle returned by `subscribe`, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerHandle(u64);

pub struct ParameterStore {
    targets: [AtomicU32; 2],
    listeners: RwLock<Vec<(ListenerHandle, Arc<dyn ParameterListener>)>>,
    next_handle: AtomicU64,
}

impl ParameterStore {
    /// Create a store with every parameter at its default
    pub fn new() -> Self {
        Self {
            targets: PARAMETER_LAYOUT.map(|spec| AtomicU32::new(spec.default.to_bits())),
            listeners: RwLock::new(Vec::new()),
            next_handle: AtomicU64::new(1),
        }
    }

    /// Current target value. Safe to call from the real-time context.
    #[inline]
    pub fn target(&self, id: ParamId) -> f32 {
        f32::from_bits(self.targets[id.index()].load(Ordering::Relaxed))
    }

    /// Current target mapped to `[0, 1]`
    pub fn normalized(&self, id: ParamId) -> f32 {
        id.spec().normalize(self.target(id))
    }

    /// Set a target value, clamped and snapped through the layout table.
    ///
    /// Listeners are notified only when the stored value changes. Returns the
    /// value actually stored.
    pub fn set_target(&self, id: ParamId, value: f32) -> f32 {
        let value = id.spec().clamp(value);
        let previous = self.targets[id.index()].swap(value.to_bits(), Ordering::Relaxed);

        if previous != value.to_bits() {
            self.notify(id, value);
        }
        value
    }

    /// Set a target from a host-normalized `[0, 1]` value
    pub fn set_normalized(&self, id: ParamId, normalized: f32) -> f32 {
        self.set_target(id, id.spec().denormalize(normalized))
    }

    /// Restore every parameter to its layout default
    pub fn reset_to_defaults(&self) {
        for id in ParamId::ALL {
            self.set_target(id, id.spec().default);
        }
    }

    /// Register a change listener
    pub fn subscribe(&self, listener: Arc<dyn ParameterListener>) -> ListenerHandle {
        let handle = ListenerHandle(self.next_handle.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((handle, listener));
        handle
    }

    /// Remove a previously registered listener. Returns false if unknown.
    pub fn unsubscribe(&self, handle: ListenerHandle) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(h, _)| *h != handle);
        listeners.len() != before
    }

    /// Snapshot of the current targets for persistence
    pub fn snapshot(&self) -> PluginState {
        PluginState::new(self.target(ParamId::Drive), self.target(ParamId::Mix))
    }

    /// Apply a persisted snapshot (values are clamped on the way in)
    pub fn restore(&self, state: &PluginState) {
        self.set_target(ParamId::Drive, state.drive);
        self.set_target(ParamId::Mix, state.mix);
    }

    fn notify(&self, id: ParamId, value: f32) {
        for (_, listener) in self.listeners.read().iter() {
            listener.parameter_changed(id, value);
        }
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterStore")
            .field("drive", &self.target(ParamId::Drive))
            .field("mix", &self.target(ParamId::Mix))
            .field("listeners", &self.listeners.read().len())
            .finish()
    }
}
