use std::sync::Arc;

use serde::{Deserialize, Serialize};

use rentflow_client::ResourceClient;
use rentflow_types::{Amount, Lease, PaymentRecord};

use crate::error::AggregateError;
use crate::period::BillingPeriod;

/// What the tenant-facing dashboard shows about their own tenancy.
///
/// Derived strictly from records the tenant's token can fetch; fields the
/// remote side cannot serve for this role are absent rather than invented.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TenantOverview {
    pub lease: Lease,
    /// Completed payments dated inside the period.
    pub rent_paid: Amount,
    pub paid_in_period: bool,
    /// Most recent dated payment of any status.
    pub last_payment: Option<PaymentRecord>,
}

/// Builds [`TenantOverview`]s from the tenant's own lease listing.
pub struct TenantReporter {
    client: Arc<dyn ResourceClient>,
}

impl TenantReporter {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self { client }
    }

    /// Overview for the tenant's active lease.
    ///
    /// A tenant without an active lease gets
    /// [`AggregateError::NoActiveLease`]; callers render that as an explicit
    /// empty state, never as placeholder numbers.
    pub async fn overview(&self, period: BillingPeriod) -> Result<TenantOverview, AggregateError> {
        let leases =
            self.client
                .tenant_leases()
                .await
                .map_err(|source| AggregateError::Unavailable {
                    stage: "tenant_leases",
                    source,
                })?;

        let lease = leases
            .into_iter()
            .find(Lease::is_active)
            .ok_or(AggregateError::NoActiveLease)?;

        let payments = self
            .client
            .payments_of(lease.id)
            .await
            .map_err(|source| AggregateError::Unavailable {
                stage: "payments",
                source,
            })?;

        let mut rent_paid = Amount::ZERO;
        for payment in payments.iter().filter(|p| p.is_completed()) {
            if payment.created_at.is_some_and(|at| period.contains(at)) {
                rent_paid = rent_paid.saturating_add(payment.amount);
            }
        }

        let last_payment = payments
            .iter()
            .filter(|p| p.created_at.is_some())
            .max_by_key(|p| p.created_at)
            .cloned();

        tracing::debug!(
            lease_id = %lease.id,
            rent_paid = %rent_paid,
            "Tenant overview assembled"
        );

        Ok(TenantOverview {
            lease,
            rent_paid,
            paid_in_period: !rent_paid.is_zero(),
            last_payment,
        })
    }
}
