//! Shared state cell synchronized across peers through diff envelopes.

use std::collections::HashMap;

use serde_json::Value;

use crate::envelope::DiffEnvelope;
use crate::error::SyncError;
use crate::transport::DiffTransport;

/// A value paired with its logical timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct StateValue {
    pub value: Value,
    pub time: u64,
}

impl Default for StateValue {
    fn default() -> Self {
        Self { value: Value::Null, time: 0 }
    }
}

pub type CallbackId = u64;

type OnUpdate = Box<dyn FnMut(&StateValue)>;

/// Outcome of one [`StateVar::sync`] pass.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Peers brought up to the current state.
    pub synced: usize,
    /// Peers skipped because diffing or sending failed.
    pub failed: Vec<(String, SyncError)>,
}

/// A shared variable replicated across peers by transmitting deltas
/// instead of full snapshots.
///
/// Tracks, per peer, the last state known to have been delivered; `sync`
/// transmits the delta from that state to the current one, and `receive`
/// applies incoming deltas, dropping stale ones by logical timestamp. The
/// codec assumes a single authoritative old/new pair per call, so a
/// `StateVar` must only be driven from its owning loop.
pub struct StateVar {
    state: StateValue,
    peer_states: HashMap<String, StateValue>,
    transports: Vec<Box<dyn DiffTransport>>,
    on_update: HashMap<CallbackId, OnUpdate>,
    next_callback_id: CallbackId,
}

impl Default for StateVar {
    fn default() -> Self {
        Self::new()
    }
}

impl StateVar {
    pub fn new() -> Self {
        Self {
            state: StateValue::default(),
            peer_states: HashMap::new(),
            transports: Vec::new(),
            on_update: HashMap::new(),
            next_callback_id: 0,
        }
    }

    pub fn state(&self) -> &StateValue {
        &self.state
    }

    pub fn add_transport(&mut self, transport: Box<dyn DiffTransport>) {
        self.transports.push(transport);
    }

    /// Replace the local state. Peers learn about it on the next `sync`.
    pub fn update(&mut self, value: Value, time: u64) {
        self.state = StateValue { value, time };
    }

    /// Register a callback fired whenever `receive` adopts a new state.
    pub fn on_update(&mut self, callback: OnUpdate) -> CallbackId {
        let id = self.next_callback_id;
        self.next_callback_id += 1;
        self.on_update.insert(id, callback);
        id
    }

    pub fn remove_on_update(&mut self, id: CallbackId) {
        self.on_update.remove(&id);
    }

    /// Push the current state to every peer that is behind it.
    ///
    /// A peer that fails to diff or send is skipped and reported; the pass
    /// still visits the remaining peers.
    pub fn sync(&mut self) -> SyncReport {
        let mut report = SyncReport::default();
        for transport in &self.transports {
            for peer_id in transport.peers() {
                let peer_state = self.peer_states.entry(peer_id.clone()).or_default();
                if peer_state.time >= self.state.time {
                    continue;
                }
                let delta = match json_delta::diff(&peer_state.value, &self.state.value) {
                    Ok(delta) => delta,
                    Err(err) => {
                        report.failed.push((peer_id, SyncError::Codec(err)));
                        continue;
                    }
                };
                let envelope = DiffEnvelope::new(self.state.time, delta);
                if let Err(err) = transport.send_diff(&peer_id, &envelope) {
                    report.failed.push((peer_id, err));
                    continue;
                }
                *peer_state = self.state.clone();
                report.synced += 1;
            }
        }
        report
    }

    /// Apply an incoming envelope from `peer_id` and adopt the result as
    /// the local state.
    ///
    /// Envelopes not newer than the peer's recorded time are dropped. On a
    /// patch failure the peer's recorded time is left untouched, so the
    /// peer can recover by sending a full replacement later.
    pub fn receive(&mut self, peer_id: &str, envelope: &DiffEnvelope) -> Result<(), SyncError> {
        let updated = {
            let peer_state = self.peer_states.entry(peer_id.to_string()).or_default();
            if envelope.time <= peer_state.time {
                return Ok(());
            }
            json_delta::patch(&mut peer_state.value, &envelope.diff)?;
            peer_state.time = envelope.time;
            peer_state.clone()
        };
        self.state = updated;
        for callback in self.on_update.values_mut() {
            callback(&self.state);
        }
        Ok(())
    }
}
