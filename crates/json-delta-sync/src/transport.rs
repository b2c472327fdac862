//! Transport boundary: peer enumeration and diff delivery.

use crate::envelope::DiffEnvelope;
use crate::error::SyncError;

/// A connection layer able to enumerate currently reachable peers and
/// deliver diff envelopes to one of them.
///
/// Incoming envelopes are not part of this trait; the integration hands
/// them to [`StateVar::receive`](crate::StateVar::receive) as they arrive.
pub trait DiffTransport {
    fn peers(&self) -> Vec<String>;

    fn send_diff(&self, peer_id: &str, envelope: &DiffEnvelope) -> Result<(), SyncError>;
}
