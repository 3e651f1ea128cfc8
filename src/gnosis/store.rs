//! Sinks that receive published load states.

use std::sync::Mutex;

use tokio::sync::watch;

use crate::gnosis::state::GnosisLoadResult;

/// Receives every state a load publishes, in order.
pub trait GnosisStore: Send + Sync {
    fn publish(&self, state: GnosisLoadResult);
}

/// In-memory store keeping the latest state and the publish history.
#[derive(Debug, Default)]
pub struct GnosisSlice {
    history: Mutex<Vec<GnosisLoadResult>>,
}

impl GnosisSlice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest published state; `None` before the first load.
    pub fn current(&self) -> Option<GnosisLoadResult> {
        self.lock().last().cloned()
    }

    /// Every state published so far.
    pub fn history(&self) -> Vec<GnosisLoadResult> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<GnosisLoadResult>> {
        // A panicked publisher cannot leave the Vec half-written.
        self.history.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl GnosisStore for GnosisSlice {
    fn publish(&self, state: GnosisLoadResult) {
        tracing::debug!(state = state.state(), "Publishing Safe state");
        self.lock().push(state);
    }
}

/// Subscribers of the channel observe the latest state.
impl GnosisStore for watch::Sender<Option<GnosisLoadResult>> {
    fn publish(&self, state: GnosisLoadResult) {
        self.send_replace(Some(state));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_tracks_history() {
        let slice = GnosisSlice::new();
        assert!(slice.current().is_none());

        slice.publish(GnosisLoadResult::Loading);
        slice.publish(GnosisLoadResult::Error {
            message: "boom".to_string(),
        });

        assert_eq!(slice.history().len(), 2);
        assert_eq!(
            slice.current(),
            Some(GnosisLoadResult::Error {
                message: "boom".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_watch_sender_store() {
        let (tx, mut rx) = watch::channel::<Option<GnosisLoadResult>>(None);
        tx.publish(GnosisLoadResult::Loading);

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(GnosisLoadResult::Loading));
    }
}
