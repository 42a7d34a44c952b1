//! In-memory test doubles for the collaborator traits.
//!
//! Shipped as part of the crate so every consumer tests against the same
//! doubles. `MockResourceClient` is a directory of records with per-parent
//! failure injection; `MockGateway` replays a scripted initiation result and
//! a FIFO queue of poll results.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use rentflow_types::{
    InitiateAck, Lease, LeaseId, PaymentIntent, PaymentRecord, Property, PropertyId,
    RemoteAttemptId, StatusReport, Unit, UnitId,
};

use crate::error::ClientError;
use crate::gateway::PaymentGateway;
use crate::resources::ResourceClient;

/// A failure a mock should produce every time the matching call is made.
///
/// [`ClientError`] itself is not `Clone`, so the mocks store this shape and
/// materialize a fresh error per call.
#[derive(Debug, Clone)]
pub enum Fault {
    Transport { reason: String },
    Rejected { status: u16, message: String },
    Protocol { detail: String },
}

impl Fault {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    pub fn protocol(detail: impl Into<String>) -> Self {
        Self::Protocol {
            detail: detail.into(),
        }
    }

    fn materialize(&self) -> ClientError {
        match self {
            Self::Transport { reason } => ClientError::transport(reason.clone()),
            Self::Rejected { status, message } => ClientError::rejected(*status, message.clone()),
            Self::Protocol { detail } => ClientError::protocol(detail.clone()),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// RESOURCE CLIENT MOCK
// ═══════════════════════════════════════════════════════════════════════════

/// Call counts per resource listing, for asserting fan-out behavior.
#[derive(Debug, Default)]
pub struct CallCounters {
    properties: AtomicUsize,
    units: AtomicUsize,
    leases: AtomicUsize,
    payments: AtomicUsize,
    tenant_leases: AtomicUsize,
}

/// Directory-backed [`ResourceClient`].
///
/// Populate with the `with_*` builders, inject failures with the `fail_*`
/// builders, then share behind an `Arc`. A configured fault fires on every
/// call for that parent until the mock is rebuilt.
#[derive(Debug, Default)]
pub struct MockResourceClient {
    properties: RwLock<Vec<Property>>,
    units: RwLock<HashMap<PropertyId, Vec<Unit>>>,
    leases: RwLock<HashMap<UnitId, Vec<Lease>>>,
    payments: RwLock<HashMap<LeaseId, Vec<PaymentRecord>>>,
    tenant: RwLock<Vec<Lease>>,
    property_fault: RwLock<Option<Fault>>,
    unit_faults: RwLock<HashMap<PropertyId, Fault>>,
    lease_faults: RwLock<HashMap<UnitId, Fault>>,
    payment_faults: RwLock<HashMap<LeaseId, Fault>>,
    tenant_fault: RwLock<Option<Fault>>,
    calls: CallCounters,
}

impl MockResourceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_properties(mut self, properties: Vec<Property>) -> Self {
        *self.properties.get_mut() = properties;
        self
    }

    pub fn with_units(mut self, property: PropertyId, units: Vec<Unit>) -> Self {
        self.units.get_mut().insert(property, units);
        self
    }

    pub fn with_leases(mut self, unit: UnitId, leases: Vec<Lease>) -> Self {
        self.leases.get_mut().insert(unit, leases);
        self
    }

    pub fn with_payments(mut self, lease: LeaseId, payments: Vec<PaymentRecord>) -> Self {
        self.payments.get_mut().insert(lease, payments);
        self
    }

    pub fn with_tenant_leases(mut self, leases: Vec<Lease>) -> Self {
        *self.tenant.get_mut() = leases;
        self
    }

    pub fn fail_properties(mut self, fault: Fault) -> Self {
        *self.property_fault.get_mut() = Some(fault);
        self
    }

    pub fn fail_units_of(mut self, property: PropertyId, fault: Fault) -> Self {
        self.unit_faults.get_mut().insert(property, fault);
        self
    }

    pub fn fail_leases_of(mut self, unit: UnitId, fault: Fault) -> Self {
        self.lease_faults.get_mut().insert(unit, fault);
        self
    }

    pub fn fail_payments_of(mut self, lease: LeaseId, fault: Fault) -> Self {
        self.payment_faults.get_mut().insert(lease, fault);
        self
    }

    pub fn fail_tenant_leases(mut self, fault: Fault) -> Self {
        *self.tenant_fault.get_mut() = Some(fault);
        self
    }

    pub fn properties_calls(&self) -> usize {
        self.calls.properties.load(Ordering::SeqCst)
    }

    pub fn units_calls(&self) -> usize {
        self.calls.units.load(Ordering::SeqCst)
    }

    pub fn leases_calls(&self) -> usize {
        self.calls.leases.load(Ordering::SeqCst)
    }

    pub fn payments_calls(&self) -> usize {
        self.calls.payments.load(Ordering::SeqCst)
    }

    pub fn tenant_leases_calls(&self) -> usize {
        self.calls.tenant_leases.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceClient for MockResourceClient {
    async fn properties(&self) -> Result<Vec<Property>, ClientError> {
        self.calls.properties.fetch_add(1, Ordering::SeqCst);
        if let Some(fault) = self.property_fault.read().await.as_ref() {
            return Err(fault.materialize());
        }
        Ok(self.properties.read().await.clone())
    }

    async fn units_of(&self, property: PropertyId) -> Result<Vec<Unit>, ClientError> {
        self.calls.units.fetch_add(1, Ordering::SeqCst);
        if let Some(fault) = self.unit_faults.read().await.get(&property) {
            return Err(fault.materialize());
        }
        Ok(self
            .units
            .read()
            .await
            .get(&property)
            .cloned()
            .unwrap_or_default())
    }

    async fn leases_of(&self, unit: UnitId) -> Result<Vec<Lease>, ClientError> {
        self.calls.leases.fetch_add(1, Ordering::SeqCst);
        if let Some(fault) = self.lease_faults.read().await.get(&unit) {
            return Err(fault.materialize());
        }
        Ok(self
            .leases
            .read()
            .await
            .get(&unit)
            .cloned()
            .unwrap_or_default())
    }

    async fn payments_of(&self, lease: LeaseId) -> Result<Vec<PaymentRecord>, ClientError> {
        self.calls.payments.fetch_add(1, Ordering::SeqCst);
        if let Some(fault) = self.payment_faults.read().await.get(&lease) {
            return Err(fault.materialize());
        }
        Ok(self
            .payments
            .read()
            .await
            .get(&lease)
            .cloned()
            .unwrap_or_default())
    }

    async fn tenant_leases(&self) -> Result<Vec<Lease>, ClientError> {
        self.calls.tenant_leases.fetch_add(1, Ordering::SeqCst);
        if let Some(fault) = self.tenant_fault.read().await.as_ref() {
            return Err(fault.materialize());
        }
        Ok(self.tenant.read().await.clone())
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// PAYMENT GATEWAY MOCK
// ═══════════════════════════════════════════════════════════════════════════

/// Scripted [`PaymentGateway`].
///
/// `initiate` replays the configured result (default: a fresh ack with a
/// generated remote id) and records the intent it received. `status_of` pops
/// the front of the poll script; an exhausted script reports pending forever,
/// which is exactly what a timeout test wants.
#[derive(Debug, Default)]
pub struct MockGateway {
    initiate_fault: RwLock<Option<Fault>>,
    initiate_ack: RwLock<Option<InitiateAck>>,
    status_script: RwLock<VecDeque<Result<StatusReport, Fault>>>,
    intents: RwLock<Vec<PaymentIntent>>,
    initiate_seq: AtomicUsize,
    status_calls: AtomicUsize,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the generated ack with a fixed one.
    pub fn with_initiate_ack(mut self, ack: InitiateAck) -> Self {
        *self.initiate_ack.get_mut() = Some(ack);
        self
    }

    /// Make every `initiate` call fail.
    pub fn fail_initiate(mut self, fault: Fault) -> Self {
        *self.initiate_fault.get_mut() = Some(fault);
        self
    }

    /// Append one poll result to the FIFO script.
    pub fn with_status(mut self, result: Result<StatusReport, Fault>) -> Self {
        self.status_script.get_mut().push_back(result);
        self
    }

    /// Append `n` pending reports, the filler of most scripts.
    pub fn with_pending_polls(mut self, n: usize) -> Self {
        let script = self.status_script.get_mut();
        for _ in 0..n {
            script.push_back(Ok(StatusReport::pending()));
        }
        self
    }

    /// Every intent `initiate` has received, in call order.
    pub async fn recorded_intents(&self) -> Vec<PaymentIntent> {
        self.intents.read().await.clone()
    }

    pub fn status_calls(&self) -> usize {
        self.status_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PaymentGateway for MockGateway {
    async fn initiate(&self, intent: &PaymentIntent) -> Result<InitiateAck, ClientError> {
        self.intents.write().await.push(intent.clone());
        if let Some(fault) = self.initiate_fault.read().await.as_ref() {
            return Err(fault.materialize());
        }
        if let Some(ack) = self.initiate_ack.read().await.as_ref() {
            return Ok(ack.clone());
        }
        let seq = self.initiate_seq.fetch_add(1, Ordering::SeqCst);
        Ok(InitiateAck::new(
            RemoteAttemptId::new(format!("mock-ckt-{seq}")),
            Some("Enter your PIN to complete the payment".to_string()),
        ))
    }

    async fn status_of(&self, _remote_id: &RemoteAttemptId) -> Result<StatusReport, ClientError> {
        self.status_calls.fetch_add(1, Ordering::SeqCst);
        match self.status_script.write().await.pop_front() {
            Some(Ok(report)) => Ok(report),
            Some(Err(fault)) => Err(fault.materialize()),
            None => Ok(StatusReport::pending()),
        }
    }
}
