use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, Semaphore};

/// Time source for the checkout flow.
///
/// The flow never calls `tokio::time` directly; everything that waits goes
/// through this trait so tests can run a ten-poll timeout in microseconds.
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);

    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the tokio timer.
#[derive(Debug, Default)]
pub struct SystemClock;

#[async_trait]
impl Clock for SystemClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test clock with a virtual timeline.
///
/// Two modes: `instant` completes every sleep immediately, `gated` parks each
/// sleep until the test hands out a permit with [`MockClock::release`], which
/// lets a test stop the world between polls. Every requested sleep is
/// recorded, and `now` advances by the durations of completed sleeps.
#[derive(Debug)]
pub struct MockClock {
    base: DateTime<Utc>,
    elapsed_ms: AtomicU64,
    sleeps: Mutex<Vec<Duration>>,
    gate: Option<Semaphore>,
}

impl MockClock {
    /// Every sleep returns at once.
    pub fn instant() -> Self {
        Self {
            base: Utc::now(),
            elapsed_ms: AtomicU64::new(0),
            sleeps: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Every sleep waits for one permit from [`MockClock::release`].
    pub fn gated() -> Self {
        Self {
            base: Utc::now(),
            elapsed_ms: AtomicU64::new(0),
            sleeps: Mutex::new(Vec::new()),
            gate: Some(Semaphore::new(0)),
        }
    }

    /// Let `n` parked (or future) sleeps complete.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(n);
        }
    }

    /// Durations handed to `sleep` so far, in request order. Includes sleeps
    /// still parked at the gate.
    pub async fn requested_sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().await.clone()
    }

    pub async fn sleep_count(&self) -> usize {
        self.sleeps.lock().await.len()
    }
}

#[async_trait]
impl Clock for MockClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().await.push(duration);
        if let Some(gate) = &self.gate {
            match gate.acquire().await {
                Ok(permit) => permit.forget(),
                // A closed gate never releases anyone.
                Err(_) => std::future::pending::<()>().await,
            }
        }
        self.elapsed_ms
            .fetch_add(duration.as_millis() as u64, Ordering::SeqCst);
    }

    fn now(&self) -> DateTime<Utc> {
        let elapsed = self.elapsed_ms.load(Ordering::SeqCst);
        self.base + chrono::Duration::milliseconds(elapsed as i64)
    }
}
