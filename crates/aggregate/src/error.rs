use thiserror::Error;

use rentflow_client::ClientError;

#[derive(Debug, Error)]
pub enum AggregateError {
    /// The seed fetch itself failed; nothing could even be attempted.
    /// Distinct from an empty portfolio, which is a successful snapshot.
    #[error("stage {stage} unavailable: {source}")]
    Unavailable {
        stage: &'static str,
        #[source]
        source: ClientError,
    },

    /// Every fetch in a stage failed. Partial failure is tolerated and
    /// recorded; total failure means the snapshot would be fiction.
    #[error("stage {stage} produced no data: all {attempted} fetches failed")]
    NoData {
        stage: &'static str,
        attempted: usize,
    },

    /// The tenant has no active lease to report on.
    #[error("no active lease for this tenant")]
    NoActiveLease,
}
