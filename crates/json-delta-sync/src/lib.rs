//! Peer state synchronization over `json-delta` diffs.
//!
//! Wraps the delta codec with the machinery needed to keep a shared JSON
//! value aligned across peers: a wire envelope pairing a diff with a
//! logical timestamp, a transport trait for peer enumeration and delivery,
//! and a [`StateVar`] cell that decides when to diff, whom to send to, and
//! which incoming deltas are stale.
//!
//! The layer is synchronous and callback driven; it owns no sockets and
//! performs no I/O beyond what a [`DiffTransport`] implementation does.

mod envelope;
mod error;
mod state;
mod transport;

pub use envelope::DiffEnvelope;
pub use error::SyncError;
pub use state::{CallbackId, StateValue, StateVar, SyncReport};
pub use transport::DiffTransport;
