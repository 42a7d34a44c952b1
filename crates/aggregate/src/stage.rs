use std::future::Future;

use rentflow_client::ClientError;

/// One failed fetch within a stage, kept for the final report.
#[derive(Debug)]
pub struct StageFailure {
    pub stage: &'static str,
    /// Key of the parent whose fetch failed, e.g. a property id.
    pub parent: String,
    pub error: ClientError,
}

/// What a stage produced after every fetch completed.
#[derive(Debug)]
pub struct StageOutcome<T> {
    /// Successful items, merged in parent input order.
    pub items: Vec<T>,
    /// Number of fetches issued, successful or not.
    pub attempted: usize,
    pub failures: Vec<StageFailure>,
}

impl<T> StageOutcome<T> {
    pub fn successes(&self) -> usize {
        self.attempted - self.failures.len()
    }

    /// True when fetches were issued and none of them succeeded.
    /// Zero parents is an empty stage, not a failed one.
    pub fn is_total_failure(&self) -> bool {
        self.attempted > 0 && self.failures.len() == self.attempted
    }
}

/// Issue one fetch per parent concurrently and wait for all of them.
///
/// The join completes exactly once, after every fetch has resolved; an empty
/// parent list resolves immediately. A failed fetch never aborts the stage
/// and is never retried here: it is logged and recorded as a [`StageFailure`]
/// keyed by `key(parent)`. All accumulation is local to this call, so
/// concurrent runs cannot see each other's counters.
pub async fn fan_out<P, T, K, F, Fut>(
    stage: &'static str,
    parents: &[P],
    key: K,
    fetch: F,
) -> StageOutcome<T>
where
    K: Fn(&P) -> String,
    F: Fn(&P) -> Fut,
    Fut: Future<Output = Result<Vec<T>, ClientError>>,
{
    let fetches: Vec<_> = parents.iter().map(|parent| fetch(parent)).collect();
    let results = futures::future::join_all(fetches).await;

    let mut items = Vec::new();
    let mut failures = Vec::new();
    for (parent, result) in parents.iter().zip(results) {
        match result {
            Ok(mut batch) => items.append(&mut batch),
            Err(error) => {
                tracing::warn!(stage, parent = %key(parent), %error, "Stage fetch failed");
                failures.push(StageFailure {
                    stage,
                    parent: key(parent),
                    error,
                });
            }
        }
    }

    StageOutcome {
        items,
        attempted: parents.len(),
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fan_out_merges_in_parent_order() {
        let parents = vec![1u32, 2, 3];
        let outcome = fan_out("units", &parents, |p| p.to_string(), |p| {
            let p = *p;
            async move { Ok(vec![p * 10, p * 10 + 1]) }
        })
        .await;

        assert_eq!(outcome.items, vec![10, 11, 20, 21, 30, 31]);
        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.successes(), 3);
        assert!(outcome.failures.is_empty());
    }

    #[tokio::test]
    async fn test_fan_out_zero_parents_resolves_immediately() {
        let parents: Vec<u32> = vec![];
        let outcome: StageOutcome<u32> = fan_out("units", &parents, |p| p.to_string(), |_| async {
            Ok(vec![])
        })
        .await;

        assert_eq!(outcome.attempted, 0);
        assert!(outcome.items.is_empty());
        assert!(!outcome.is_total_failure());
    }

    #[tokio::test]
    async fn test_fan_out_records_failures_without_aborting() {
        let parents = vec![1u32, 2, 3];
        let outcome = fan_out("leases", &parents, |p| p.to_string(), |p| {
            let p = *p;
            async move {
                if p == 2 {
                    Err(ClientError::transport("connection reset"))
                } else {
                    Ok(vec![p])
                }
            }
        })
        .await;

        assert_eq!(outcome.items, vec![1, 3]);
        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.successes(), 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].parent, "2");
        assert_eq!(outcome.failures[0].stage, "leases");
        assert!(!outcome.is_total_failure());
    }

    #[tokio::test]
    async fn test_fan_out_total_failure_detected() {
        let parents = vec![1u32, 2];
        let outcome: StageOutcome<u32> =
            fan_out("payments", &parents, |p| p.to_string(), |_| async {
                Err(ClientError::transport("server unreachable"))
            })
            .await;

        assert_eq!(outcome.successes(), 0);
        assert!(outcome.is_total_failure());
    }

    #[tokio::test]
    async fn test_fan_out_fetches_each_parent_exactly_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let parents = vec![1u32, 2, 3, 4];

        let counter = calls.clone();
        let outcome = fan_out("units", &parents, |p| p.to_string(), move |p| {
            let counter = counter.clone();
            let p = *p;
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(vec![p])
            }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(outcome.attempted, 4);
    }
}
