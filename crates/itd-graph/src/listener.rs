//! Notification listeners

use itd_model::MetadataId;

/// Receives every `(upstream, downstream)` notification after the
/// metadata service has handled it
pub trait NotificationListener: Send + Sync {
    /// `downstream` is the instance that was recomputed because `upstream` changed
    fn notify(&self, upstream: &MetadataId, downstream: &MetadataId);
}

impl<F> NotificationListener for F
where
    F: Fn(&MetadataId, &MetadataId) + Send + Sync,
{
    fn notify(&self, upstream: &MetadataId, downstream: &MetadataId) {
        self(upstream, downstream);
    }
}
