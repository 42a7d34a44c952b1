use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;

use rentflow_client::PaymentGateway;
use rentflow_types::{Amount, LeaseId, Msisdn, PaymentIntent, PaymentStatus, RemoteAttemptId};

use crate::clock::Clock;
use crate::error::FlowError;
use crate::observer::FlowObserver;

// ═══════════════════════════════════════════════════════════════════════════
// STATES & CONFIG
// ═══════════════════════════════════════════════════════════════════════════

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(3);
pub const DEFAULT_POLL_BUDGET: u32 = 10;

/// Where a checkout attempt currently stands.
///
/// `TimedOut` is deliberately distinct from `Failed`: the poll budget ran out
/// with the outcome still unknown, so the payer must verify out-of-band
/// before retrying.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    Idle,
    Initiating,
    AwaitingConfirmation,
    Completed,
    Failed,
    TimedOut,
}

impl FlowState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::TimedOut)
    }

    /// Only an idle or settled controller may take a new attempt.
    pub fn accepts_new_attempt(&self) -> bool {
        !matches!(self, Self::Initiating | Self::AwaitingConfirmation)
    }
}

/// Polling policy for one controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowConfig {
    /// Pause between status polls.
    pub poll_interval: Duration,
    /// Status polls allowed per attempt before giving up.
    pub poll_budget: u32,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            poll_budget: DEFAULT_POLL_BUDGET,
        }
    }
}

impl FlowConfig {
    pub fn from_secs(interval_secs: u64, poll_budget: u32) -> Self {
        Self {
            poll_interval: Duration::from_secs(interval_secs),
            poll_budget,
        }
    }

    pub fn validate(&self) -> Result<(), FlowError> {
        if self.poll_interval.is_zero() {
            return Err(FlowError::InvalidConfig {
                reason: "poll_interval must be positive".to_string(),
            });
        }
        if self.poll_budget == 0 {
            return Err(FlowError::InvalidConfig {
                reason: "poll_budget must be positive".to_string(),
            });
        }
        Ok(())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// ATTEMPT
// ═══════════════════════════════════════════════════════════════════════════

/// Locally generated id for one checkout attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AttemptId(uuid::Uuid);

impl AttemptId {
    fn generate() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl fmt::Display for AttemptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the caller hands to `start`. The phone arrives as raw user input
/// and is validated before anything leaves the process.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckoutRequest {
    pub lease_id: LeaseId,
    pub amount: Amount,
    pub payer_phone: String,
}

/// Live record of one checkout attempt.
///
/// Created at initiation with a fresh poll budget, mutated only by the drive
/// task, dropped on cancel.
#[derive(Debug, Clone)]
pub struct PaymentAttempt {
    pub attempt_id: AttemptId,
    pub intent: PaymentIntent,
    /// Gateway handle, known once initiation succeeds.
    pub remote_id: Option<RemoteAttemptId>,
    pub state: FlowState,
    pub polls_used: u32,
    pub last_status: Option<PaymentStatus>,
    /// Receipt reference, set on completion.
    pub reference: Option<String>,
    /// Human-readable reason, set on failure.
    pub failure: Option<String>,
    pub started_at: DateTime<Utc>,
}

struct ActiveAttempt {
    record: PaymentAttempt,
    cancelled: Arc<AtomicBool>,
}

// ═══════════════════════════════════════════════════════════════════════════
// FLOW CONTROLLER
// ═══════════════════════════════════════════════════════════════════════════

/// Drives one mobile-money checkout at a time.
///
/// `start` validates input, records the attempt and returns immediately; a
/// spawned drive task owns initiation and polling. At most one non-terminal
/// attempt exists per controller, and every attempt carries its own
/// cancellation flag so a cancelled task can never touch a successor.
pub struct PaymentFlow {
    gateway: Arc<dyn PaymentGateway>,
    clock: Arc<dyn Clock>,
    config: FlowConfig,
    slot: Arc<RwLock<Option<ActiveAttempt>>>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl PaymentFlow {
    /// Controller on the system clock.
    pub fn new(gateway: Arc<dyn PaymentGateway>, config: FlowConfig) -> Self {
        Self::with_clock(gateway, Arc::new(crate::clock::SystemClock), config)
    }

    /// Controller with an injected clock.
    pub fn with_clock(
        gateway: Arc<dyn PaymentGateway>,
        clock: Arc<dyn Clock>,
        config: FlowConfig,
    ) -> Self {
        Self {
            gateway,
            clock,
            config,
            slot: Arc::new(RwLock::new(None)),
            task: Mutex::new(None),
        }
    }

    /// Begin a checkout attempt.
    ///
    /// The payer phone is validated first: a bad number returns
    /// [`FlowError::InvalidPhone`] with the controller untouched. A
    /// non-terminal attempt in the slot returns
    /// [`FlowError::AttemptInFlight`]. On success the attempt id is returned
    /// and the drive task continues in the background.
    pub async fn start(
        &self,
        request: CheckoutRequest,
        observer: Arc<dyn FlowObserver>,
    ) -> Result<AttemptId, FlowError> {
        let payer = Msisdn::parse(&request.payer_phone)?;
        self.config.validate()?;

        let intent = PaymentIntent::new(request.lease_id, request.amount, payer);
        let attempt_id = AttemptId::generate();
        let cancelled = Arc::new(AtomicBool::new(false));

        {
            let mut slot = self.slot.write().await;
            if let Some(active) = slot.as_ref() {
                if !active.record.state.accepts_new_attempt() {
                    return Err(FlowError::AttemptInFlight);
                }
            }
            *slot = Some(ActiveAttempt {
                record: PaymentAttempt {
                    attempt_id,
                    intent: intent.clone(),
                    remote_id: None,
                    state: FlowState::Initiating,
                    polls_used: 0,
                    last_status: None,
                    reference: None,
                    failure: None,
                    started_at: self.clock.now(),
                },
                cancelled: cancelled.clone(),
            });
        }

        tracing::info!(
            %attempt_id,
            lease_id = %intent.lease_id,
            amount = %intent.amount,
            "Starting checkout attempt"
        );
        if !cancelled.load(Ordering::SeqCst) {
            observer.on_transition(FlowState::Initiating, None).await;
        }

        let driver = Driver {
            attempt_id,
            gateway: self.gateway.clone(),
            clock: self.clock.clone(),
            config: self.config.clone(),
            slot: self.slot.clone(),
            cancelled,
            observer,
            intent,
        };
        let mut task = self.task.lock().await;
        if let Some(stale) = task.take() {
            stale.abort();
        }
        *task = Some(tokio::spawn(driver.run()));

        Ok(attempt_id)
    }

    /// Abandon the current attempt, if any.
    ///
    /// The attempt's cancellation flag is set and the drive task aborted, so
    /// no poll is issued and no observer callback fires afterwards. The slot
    /// is emptied; the controller reads as `Idle` again. Cancelling with no
    /// attempt in flight is a no-op.
    pub async fn cancel(&self) {
        {
            let mut slot = self.slot.write().await;
            if let Some(active) = slot.take() {
                active.cancelled.store(true, Ordering::SeqCst);
                tracing::info!(
                    attempt_id = %active.record.attempt_id,
                    "Checkout attempt cancelled"
                );
            }
        }
        if let Some(task) = self.task.lock().await.take() {
            task.abort();
        }
    }

    /// Current state; `Idle` when no attempt occupies the slot.
    pub async fn state(&self) -> FlowState {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|active| active.record.state)
            .unwrap_or(FlowState::Idle)
    }

    /// Snapshot of the current attempt.
    pub async fn attempt(&self) -> Option<PaymentAttempt> {
        self.slot
            .read()
            .await
            .as_ref()
            .map(|active| active.record.clone())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// DRIVE TASK
// ═══════════════════════════════════════════════════════════════════════════

struct Driver {
    attempt_id: AttemptId,
    gateway: Arc<dyn PaymentGateway>,
    clock: Arc<dyn Clock>,
    config: FlowConfig,
    slot: Arc<RwLock<Option<ActiveAttempt>>>,
    cancelled: Arc<AtomicBool>,
    observer: Arc<dyn FlowObserver>,
    intent: PaymentIntent,
}

impl Driver {
    async fn run(self) {
        if self.is_cancelled() {
            return;
        }
        match self.gateway.initiate(&self.intent).await {
            Ok(ack) => {
                if self.is_cancelled() {
                    return;
                }
                tracing::info!(
                    attempt_id = %self.attempt_id,
                    remote_id = %ack.remote_id,
                    "Initiation accepted; awaiting payer confirmation"
                );
                self.update(|rec| {
                    rec.remote_id = Some(ack.remote_id.clone());
                    rec.state = FlowState::AwaitingConfirmation;
                })
                .await;
                self.emit(FlowState::AwaitingConfirmation, ack.customer_message.as_deref())
                    .await;
                self.poll_until_settled(&ack.remote_id).await;
            }
            Err(error) => {
                tracing::warn!(
                    attempt_id = %self.attempt_id,
                    %error,
                    "Payment initiation failed"
                );
                self.fail(error.to_string()).await;
            }
        }
    }

    /// The poll loop. The first poll goes out immediately; between
    /// non-terminal polls one interval is slept. A transport error consumes
    /// the poll but causes no transition. The budget bounds the loop: the
    /// attempt times out straight after the final pending poll, with no
    /// trailing sleep.
    async fn poll_until_settled(&self, remote_id: &RemoteAttemptId) {
        let mut polls_used: u32 = 0;
        while polls_used < self.config.poll_budget {
            if self.is_cancelled() {
                return;
            }
            polls_used += 1;
            self.update(|rec| rec.polls_used = polls_used).await;

            match self.gateway.status_of(remote_id).await {
                Ok(report) => {
                    self.update(|rec| rec.last_status = Some(report.status)).await;
                    match report.status {
                        PaymentStatus::Completed => {
                            tracing::info!(
                                attempt_id = %self.attempt_id,
                                polls = polls_used,
                                "Payment completed"
                            );
                            let reference = report.reference;
                            self.update(|rec| {
                                rec.state = FlowState::Completed;
                                rec.reference = reference.clone();
                            })
                            .await;
                            self.emit(FlowState::Completed, reference.as_deref()).await;
                            return;
                        }
                        PaymentStatus::Failed => {
                            self.fail("gateway reported failure".to_string()).await;
                            return;
                        }
                        PaymentStatus::Pending => {}
                    }
                }
                Err(error) if error.is_transient() => {
                    tracing::warn!(
                        attempt_id = %self.attempt_id,
                        poll = polls_used,
                        %error,
                        "Status poll failed; retrying on next interval"
                    );
                }
                Err(error) => {
                    tracing::warn!(
                        attempt_id = %self.attempt_id,
                        %error,
                        "Status poll hit a fatal error"
                    );
                    self.fail(error.to_string()).await;
                    return;
                }
            }

            if polls_used < self.config.poll_budget {
                if self.is_cancelled() {
                    return;
                }
                self.clock.sleep(self.config.poll_interval).await;
            }
        }

        tracing::warn!(
            attempt_id = %self.attempt_id,
            polls = polls_used,
            "Payment outcome still unknown after full poll budget"
        );
        self.update(|rec| rec.state = FlowState::TimedOut).await;
        self.emit(FlowState::TimedOut, None).await;
    }

    async fn fail(&self, reason: String) {
        if self.is_cancelled() {
            return;
        }
        self.update(|rec| {
            rec.state = FlowState::Failed;
            rec.failure = Some(reason.clone());
        })
        .await;
        self.emit(FlowState::Failed, Some(&reason)).await;
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Mutate the record, but only while the slot still holds this attempt.
    /// The write guard never survives into an observer call or a sleep.
    async fn update(&self, apply: impl FnOnce(&mut PaymentAttempt)) {
        let mut slot = self.slot.write().await;
        if let Some(active) = slot.as_mut() {
            if active.record.attempt_id == self.attempt_id {
                apply(&mut active.record);
            }
        }
    }

    async fn emit(&self, state: FlowState, detail: Option<&str>) {
        if self.is_cancelled() {
            return;
        }
        self.observer.on_transition(state, detail).await;
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::MockClock;
    use crate::observer::RecordingObserver;
    use rentflow_client::{Fault, MockGateway};
    use rentflow_types::StatusReport;

    fn request(phone: &str) -> CheckoutRequest {
        CheckoutRequest {
            lease_id: LeaseId::new(42),
            amount: Amount::new(25_000),
            payer_phone: phone.to_string(),
        }
    }

    async fn until_terminal(flow: &PaymentFlow) -> FlowState {
        for _ in 0..10_000 {
            let state = flow.state().await;
            if state.is_terminal() {
                return state;
            }
            tokio::task::yield_now().await;
        }
        panic!("flow never reached a terminal state");
    }

    async fn until_status_calls(gateway: &MockGateway, n: usize) {
        for _ in 0..10_000 {
            if gateway.status_calls() >= n {
                // One extra turn so the drive task reaches the gate.
                tokio::task::yield_now().await;
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("gateway never reached {n} status calls");
    }

    #[tokio::test]
    async fn test_happy_path_transitions_and_receipt() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_pending_polls(2)
                .with_status(Ok(StatusReport::completed("QGH7RT2XKP"))),
        );
        let observer = Arc::new(RecordingObserver::new());
        let flow = PaymentFlow::with_clock(
            gateway.clone(),
            Arc::new(MockClock::instant()),
            FlowConfig::default(),
        );

        flow.start(request("0712345678"), observer.clone())
            .await
            .unwrap();
        let state = until_terminal(&flow).await;

        assert_eq!(state, FlowState::Completed);
        assert_eq!(
            observer.states().await,
            vec![
                FlowState::Initiating,
                FlowState::AwaitingConfirmation,
                FlowState::Completed
            ]
        );

        let attempt = flow.attempt().await.unwrap();
        assert_eq!(attempt.polls_used, 3);
        assert_eq!(attempt.reference.as_deref(), Some("QGH7RT2XKP"));
        assert_eq!(gateway.status_calls(), 3);

        // The receipt travels to the observer as the completion detail.
        let transitions = observer.transitions().await;
        assert_eq!(
            transitions.last().unwrap().1.as_deref(),
            Some("QGH7RT2XKP")
        );
    }

    #[tokio::test]
    async fn test_phone_is_normalized_into_the_intent() {
        let gateway = Arc::new(
            MockGateway::new().with_status(Ok(StatusReport::completed("RCT01"))),
        );
        let flow = PaymentFlow::with_clock(
            gateway.clone(),
            Arc::new(MockClock::instant()),
            FlowConfig::default(),
        );

        flow.start(request("0712345678"), Arc::new(RecordingObserver::new()))
            .await
            .unwrap();
        until_terminal(&flow).await;

        let intents = gateway.recorded_intents().await;
        assert_eq!(intents.len(), 1);
        assert_eq!(intents[0].payer.as_str(), "254712345678");
        assert_eq!(intents[0].amount, Amount::new(25_000));
        assert_eq!(intents[0].lease_id, LeaseId::new(42));
    }

    #[tokio::test]
    async fn test_invalid_phone_rejected_before_any_network_call() {
        let gateway = Arc::new(MockGateway::new());
        let flow = PaymentFlow::with_clock(
            gateway.clone(),
            Arc::new(MockClock::instant()),
            FlowConfig::default(),
        );

        let err = flow
            .start(request("12345"), Arc::new(RecordingObserver::new()))
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::InvalidPhone(_)));
        assert_eq!(flow.state().await, FlowState::Idle);
        assert!(gateway.recorded_intents().await.is_empty());
        assert_eq!(gateway.status_calls(), 0);
    }

    #[tokio::test]
    async fn test_timeout_after_exactly_ten_polls() {
        // An unscripted gateway reports pending forever.
        let gateway = Arc::new(MockGateway::new());
        let clock = Arc::new(MockClock::instant());
        let observer = Arc::new(RecordingObserver::new());
        let flow =
            PaymentFlow::with_clock(gateway.clone(), clock.clone(), FlowConfig::default());

        flow.start(request("0712345678"), observer.clone())
            .await
            .unwrap();
        let state = until_terminal(&flow).await;

        assert_eq!(state, FlowState::TimedOut);
        assert_eq!(gateway.status_calls(), 10);
        assert_eq!(flow.attempt().await.unwrap().polls_used, 10);
        assert_eq!(observer.last_state().await, Some(FlowState::TimedOut));

        // Ten polls with nine intervals between them, none after the last.
        let sleeps = clock.requested_sleeps().await;
        assert_eq!(sleeps.len(), 9);
        assert!(sleeps.iter().all(|d| *d == Duration::from_secs(3)));
    }

    #[tokio::test]
    async fn test_transport_error_consumes_poll_without_transition() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_status(Err(Fault::transport("socket timeout")))
                .with_status(Ok(StatusReport::completed("RCT77"))),
        );
        let observer = Arc::new(RecordingObserver::new());
        let flow = PaymentFlow::with_clock(
            gateway.clone(),
            Arc::new(MockClock::instant()),
            FlowConfig::default(),
        );

        flow.start(request("0712345678"), observer.clone())
            .await
            .unwrap();
        let state = until_terminal(&flow).await;

        assert_eq!(state, FlowState::Completed);
        // The dropped poll shows up in the budget, not in the transitions.
        assert_eq!(flow.attempt().await.unwrap().polls_used, 2);
        assert_eq!(
            observer.states().await,
            vec![
                FlowState::Initiating,
                FlowState::AwaitingConfirmation,
                FlowState::Completed
            ]
        );
    }

    #[tokio::test]
    async fn test_rejected_initiation_fails_the_attempt() {
        let gateway = Arc::new(
            MockGateway::new().fail_initiate(Fault::rejected(400, "invalid account")),
        );
        let observer = Arc::new(RecordingObserver::new());
        let flow = PaymentFlow::with_clock(
            gateway.clone(),
            Arc::new(MockClock::instant()),
            FlowConfig::default(),
        );

        flow.start(request("0712345678"), observer.clone())
            .await
            .unwrap();
        let state = until_terminal(&flow).await;

        assert_eq!(state, FlowState::Failed);
        assert_eq!(gateway.status_calls(), 0);
        assert_eq!(
            observer.states().await,
            vec![FlowState::Initiating, FlowState::Failed]
        );
        let attempt = flow.attempt().await.unwrap();
        assert!(attempt.failure.as_deref().unwrap().contains("rejected"));
    }

    #[tokio::test]
    async fn test_protocol_error_during_poll_is_fatal() {
        let gateway = Arc::new(
            MockGateway::new().with_status(Err(Fault::protocol("status field missing"))),
        );
        let flow = PaymentFlow::with_clock(
            gateway.clone(),
            Arc::new(MockClock::instant()),
            FlowConfig::default(),
        );

        flow.start(request("0712345678"), Arc::new(RecordingObserver::new()))
            .await
            .unwrap();
        let state = until_terminal(&flow).await;

        assert_eq!(state, FlowState::Failed);
        assert_eq!(gateway.status_calls(), 1);
    }

    #[tokio::test]
    async fn test_gateway_reported_failure_settles_the_attempt() {
        let gateway = Arc::new(MockGateway::new().with_status(Ok(StatusReport::failed())));
        let flow = PaymentFlow::with_clock(
            gateway.clone(),
            Arc::new(MockClock::instant()),
            FlowConfig::default(),
        );

        flow.start(request("0712345678"), Arc::new(RecordingObserver::new()))
            .await
            .unwrap();
        let state = until_terminal(&flow).await;

        assert_eq!(state, FlowState::Failed);
        assert_eq!(flow.attempt().await.unwrap().polls_used, 1);
    }

    #[tokio::test]
    async fn test_second_start_rejected_while_in_flight() {
        let gateway = Arc::new(MockGateway::new());
        let clock = Arc::new(MockClock::gated());
        let flow =
            PaymentFlow::with_clock(gateway.clone(), clock.clone(), FlowConfig::default());

        flow.start(request("0712345678"), Arc::new(RecordingObserver::new()))
            .await
            .unwrap();
        until_status_calls(&gateway, 1).await;

        let err = flow
            .start(request("0712345678"), Arc::new(RecordingObserver::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::AttemptInFlight));

        flow.cancel().await;
    }

    #[tokio::test]
    async fn test_cancel_stops_polling_and_emissions() {
        let gateway = Arc::new(MockGateway::new());
        let clock = Arc::new(MockClock::gated());
        let observer = Arc::new(RecordingObserver::new());
        let flow =
            PaymentFlow::with_clock(gateway.clone(), clock.clone(), FlowConfig::default());

        flow.start(request("0712345678"), observer.clone())
            .await
            .unwrap();

        // Walk the attempt through three polls, parking before the fourth.
        until_status_calls(&gateway, 1).await;
        clock.release(1);
        until_status_calls(&gateway, 2).await;
        clock.release(1);
        until_status_calls(&gateway, 3).await;

        flow.cancel().await;

        // Releasing the clock afterwards must not wake a fourth poll.
        clock.release(5);
        for _ in 0..50 {
            tokio::task::yield_now().await;
        }

        assert_eq!(gateway.status_calls(), 3);
        assert_eq!(flow.state().await, FlowState::Idle);
        assert!(flow.attempt().await.is_none());
        assert_eq!(
            observer.last_state().await,
            Some(FlowState::AwaitingConfirmation)
        );
    }

    #[tokio::test]
    async fn test_new_attempt_allowed_after_terminal_state() {
        let gateway = Arc::new(
            MockGateway::new()
                .with_status(Ok(StatusReport::completed("RCT-FIRST")))
                .with_status(Ok(StatusReport::completed("RCT-SECOND"))),
        );
        let flow = PaymentFlow::with_clock(
            gateway.clone(),
            Arc::new(MockClock::instant()),
            FlowConfig::default(),
        );

        let first = flow
            .start(request("0712345678"), Arc::new(RecordingObserver::new()))
            .await
            .unwrap();
        until_terminal(&flow).await;

        let second = flow
            .start(request("0712345678"), Arc::new(RecordingObserver::new()))
            .await
            .unwrap();
        until_terminal(&flow).await;

        assert_ne!(first, second);
        let attempt = flow.attempt().await.unwrap();
        assert_eq!(attempt.attempt_id, second);
        // The second attempt gets a budget of its own.
        assert_eq!(attempt.polls_used, 1);
        assert_eq!(attempt.reference.as_deref(), Some("RCT-SECOND"));
    }

    #[tokio::test]
    async fn test_cancel_without_attempt_is_a_no_op() {
        let flow = PaymentFlow::with_clock(
            Arc::new(MockGateway::new()),
            Arc::new(MockClock::instant()),
            FlowConfig::default(),
        );

        flow.cancel().await;
        assert_eq!(flow.state().await, FlowState::Idle);
    }

    #[test]
    fn test_config_validation() {
        assert!(FlowConfig::default().validate().is_ok());
        assert!(matches!(
            FlowConfig::from_secs(0, 10).validate(),
            Err(FlowError::InvalidConfig { .. })
        ));
        assert!(matches!(
            FlowConfig::from_secs(3, 0).validate(),
            Err(FlowError::InvalidConfig { .. })
        ));
    }

    #[tokio::test]
    async fn test_invalid_config_rejected_at_start() {
        let flow = PaymentFlow::with_clock(
            Arc::new(MockGateway::new()),
            Arc::new(MockClock::instant()),
            FlowConfig::from_secs(3, 0),
        );

        let err = flow
            .start(request("0712345678"), Arc::new(RecordingObserver::new()))
            .await
            .unwrap_err();
        assert!(matches!(err, FlowError::InvalidConfig { .. }));
        assert_eq!(flow.state().await, FlowState::Idle);
    }
}
