use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::flow::FlowState;

/// Receives checkout state transitions as they happen.
///
/// The UI layer implements this to render progress; the flow itself never
/// knows what a screen is. `detail` carries the human-facing string for the
/// transition: the gateway's customer message when confirmation starts, the
/// receipt reference on completion, the failure reason on failure.
#[async_trait]
pub trait FlowObserver: Send + Sync {
    async fn on_transition(&self, state: FlowState, detail: Option<&str>);
}

/// Observer that ignores everything.
#[derive(Debug, Default)]
pub struct NullObserver;

#[async_trait]
impl FlowObserver for NullObserver {
    async fn on_transition(&self, _state: FlowState, _detail: Option<&str>) {}
}

/// Observer that keeps every transition for later assertions.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    transitions: Mutex<Vec<(FlowState, Option<String>)>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn transitions(&self) -> Vec<(FlowState, Option<String>)> {
        self.transitions.lock().await.clone()
    }

    /// Just the states, in emission order.
    pub async fn states(&self) -> Vec<FlowState> {
        self.transitions
            .lock()
            .await
            .iter()
            .map(|(state, _)| *state)
            .collect()
    }

    pub async fn last_state(&self) -> Option<FlowState> {
        self.transitions.lock().await.last().map(|(state, _)| *state)
    }
}

#[async_trait]
impl FlowObserver for RecordingObserver {
    async fn on_transition(&self, state: FlowState, detail: Option<&str>) {
        self.transitions
            .lock()
            .await
            .push((state, detail.map(str::to_string)));
    }
}
