/// Example demonstrating the checkout flow against a scripted gateway
///
/// This drives one payment from initiation through confirmation polling to
/// completion, printing each state transition the way a UI layer would
/// render it. The mock clock makes the three-second poll intervals free.
use async_trait::async_trait;
use rentflow_client::MockGateway;
use rentflow_payment::{
    CheckoutRequest, FlowConfig, FlowObserver, FlowState, MockClock, PaymentFlow,
};
use rentflow_types::{Amount, LeaseId, StatusReport};
use std::sync::Arc;

struct PrintingObserver;

#[async_trait]
impl FlowObserver for PrintingObserver {
    async fn on_transition(&self, state: FlowState, detail: Option<&str>) {
        match detail {
            Some(detail) => println!("  -> {state:?}: {detail}"),
            None => println!("  -> {state:?}"),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Checkout Flow Demo ===\n");

    // A gateway that reports pending twice before confirming the payment.
    let gateway = Arc::new(
        MockGateway::new()
            .with_pending_polls(2)
            .with_status(Ok(StatusReport::completed("QGH7RT2XKP"))),
    );
    let clock = Arc::new(MockClock::instant());
    let flow = PaymentFlow::with_clock(gateway.clone(), clock.clone(), FlowConfig::default());

    println!("1. Starting checkout for lease 42, KES 25000:");
    let attempt_id = flow
        .start(
            CheckoutRequest {
                lease_id: LeaseId::new(42),
                amount: Amount::new(25_000),
                payer_phone: "0712345678".to_string(),
            },
            Arc::new(PrintingObserver),
        )
        .await?;
    println!("  attempt id: {attempt_id}");

    while !flow.state().await.is_terminal() {
        tokio::task::yield_now().await;
    }

    println!("\n2. Final attempt record:");
    if let Some(attempt) = flow.attempt().await {
        println!("  state:     {:?}", attempt.state);
        println!("  payer:     {}", attempt.intent.payer);
        println!("  polls:     {}", attempt.polls_used);
        println!("  reference: {}", attempt.reference.as_deref().unwrap_or("-"));
    }

    println!("\n3. Virtual time spent polling:");
    let sleeps = clock.requested_sleeps().await;
    println!("  {} intervals of {:?}", sleeps.len(), sleeps.first());

    Ok(())
}
