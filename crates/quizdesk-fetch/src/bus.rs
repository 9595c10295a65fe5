use std::sync::Arc;

use tokio::sync::watch;

/// Counts successful mutations so unrelated queries can refetch after them.
///
/// Cloning yields another handle to the same counter. Hand the bus to each
/// [`Mutation`](crate::Mutation) that should announce itself and to each
/// [`Query`](crate::Query) that should react.
#[derive(Clone, Debug)]
pub struct MutationBus {
    count: Arc<watch::Sender<u64>>,
}

impl Default for MutationBus {
    fn default() -> Self {
        MutationBus::new()
    }
}

impl MutationBus {
    pub fn new() -> MutationBus {
        let (count, _) = watch::channel(0);
        MutationBus {
            count: Arc::new(count),
        }
    }

    /// Records one successful mutation and wakes every subscriber
    pub fn bump(&self) {
        self.count.send_modify(|count| *count += 1);
        tracing::trace!(count = self.count(), "mutation recorded");
    }

    pub fn count(&self) -> u64 {
        *self.count.borrow()
    }

    /// A receiver that sees every change after this call
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.count.subscribe()
    }
}
