use std::collections::HashSet;
use std::sync::Arc;

use rentflow_client::ResourceClient;
use rentflow_types::{Amount, Lease, PaymentRecord, Property, Unit, UnitId};

use crate::error::AggregateError;
use crate::period::BillingPeriod;
use crate::stage::{fan_out, StageFailure, StageOutcome};

/// How many payments a snapshot lists, newest first.
pub const DEFAULT_RECENT_PAYMENTS: usize = 5;

/// Everything the landlord dashboard shows, derived in one pass.
///
/// Rebuilt from scratch on every run; there is no incremental patching, so a
/// snapshot is always internally consistent.
#[derive(Debug)]
pub struct PortfolioSnapshot {
    pub period: BillingPeriod,
    pub total_properties: usize,
    pub total_units: usize,
    /// Units with at least one active lease.
    pub occupied_units: usize,
    /// Whole percent in [0, 100]; 0 when there are no units.
    pub occupancy_pct: u8,
    pub active_leases: usize,
    /// Sum of completed payments dated inside `period`.
    pub monthly_revenue: Amount,
    /// Newest dated payments, any status, capped at the configured limit.
    pub recent_payments: Vec<PaymentRecord>,
    /// Completed payments carrying no usable date: counted, never guessed at.
    pub undated_payments: usize,
    /// Per-parent fetch failures tolerated during the run.
    pub failures: Vec<StageFailure>,
}

impl PortfolioSnapshot {
    fn empty(period: BillingPeriod) -> Self {
        Self {
            period,
            total_properties: 0,
            total_units: 0,
            occupied_units: 0,
            occupancy_pct: 0,
            active_leases: 0,
            monthly_revenue: Amount::ZERO,
            recent_payments: Vec::new(),
            undated_payments: 0,
            failures: Vec::new(),
        }
    }
}

/// Builds [`PortfolioSnapshot`]s by fanning out over the resource tree:
/// properties, then their units, then leases, then payments. A stage starts
/// only after the previous one has fully joined.
pub struct PortfolioAggregator {
    client: Arc<dyn ResourceClient>,
    recent_limit: usize,
}

impl PortfolioAggregator {
    pub fn new(client: Arc<dyn ResourceClient>) -> Self {
        Self {
            client,
            recent_limit: DEFAULT_RECENT_PAYMENTS,
        }
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// One full aggregation run for the given period.
    ///
    /// A failed seed fetch is [`AggregateError::Unavailable`]; an owner with
    /// zero properties gets an empty snapshot, which callers must not render
    /// as an error. Partial stage failures are tolerated and recorded; a
    /// stage in which every fetch failed aborts the run with
    /// [`AggregateError::NoData`].
    pub async fn snapshot(
        &self,
        period: BillingPeriod,
    ) -> Result<PortfolioSnapshot, AggregateError> {
        let properties =
            self.client
                .properties()
                .await
                .map_err(|source| AggregateError::Unavailable {
                    stage: "properties",
                    source,
                })?;

        if properties.is_empty() {
            tracing::info!("Portfolio has no properties; returning empty snapshot");
            return Ok(PortfolioSnapshot::empty(period));
        }

        let units = fan_out("units", &properties, |p| p.id.to_string(), |p| {
            self.client.units_of(p.id)
        })
        .await;
        guard("units", &units)?;

        let leases = fan_out("leases", &units.items, |u| u.id.to_string(), |u| {
            self.client.leases_of(u.id)
        })
        .await;
        guard("leases", &leases)?;

        let payments = fan_out("payments", &leases.items, |l| l.id.to_string(), |l| {
            self.client.payments_of(l.id)
        })
        .await;
        guard("payments", &payments)?;

        Ok(self.build(period, &properties, units, leases, payments))
    }

    fn build(
        &self,
        period: BillingPeriod,
        properties: &[Property],
        units: StageOutcome<Unit>,
        leases: StageOutcome<Lease>,
        payments: StageOutcome<PaymentRecord>,
    ) -> PortfolioSnapshot {
        let occupied: HashSet<UnitId> = leases
            .items
            .iter()
            .filter(|lease| lease.is_active())
            .map(|lease| lease.unit_id)
            .collect();
        let active_leases = leases.items.iter().filter(|l| l.is_active()).count();

        let mut monthly_revenue = Amount::ZERO;
        let mut undated_payments = 0usize;
        for payment in payments.items.iter().filter(|p| p.is_completed()) {
            match payment.created_at {
                Some(at) if period.contains(at) => {
                    monthly_revenue = monthly_revenue.saturating_add(payment.amount);
                }
                Some(_) => {}
                None => {
                    undated_payments += 1;
                    tracing::warn!(
                        payment_id = %payment.id,
                        "Completed payment has no timestamp; excluded from revenue"
                    );
                }
            }
        }

        let mut recent: Vec<PaymentRecord> = payments
            .items
            .iter()
            .filter(|p| p.created_at.is_some())
            .cloned()
            .collect();
        recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        recent.truncate(self.recent_limit);

        let mut failures = units.failures;
        failures.extend(leases.failures);
        failures.extend(payments.failures);

        let snapshot = PortfolioSnapshot {
            period,
            total_properties: properties.len(),
            total_units: units.items.len(),
            occupied_units: occupied.len(),
            occupancy_pct: occupancy_pct(occupied.len(), units.items.len()),
            active_leases,
            monthly_revenue,
            recent_payments: recent,
            undated_payments,
            failures,
        };

        tracing::info!(
            properties = snapshot.total_properties,
            units = snapshot.total_units,
            occupancy_pct = snapshot.occupancy_pct,
            revenue = %snapshot.monthly_revenue,
            partial_failures = snapshot.failures.len(),
            "Portfolio snapshot complete"
        );

        snapshot
    }
}

fn guard<T>(stage: &'static str, outcome: &StageOutcome<T>) -> Result<(), AggregateError> {
    if outcome.is_total_failure() {
        return Err(AggregateError::NoData {
            stage,
            attempted: outcome.attempted,
        });
    }
    Ok(())
}

fn occupancy_pct(occupied: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (occupied * 100 / total).min(100) as u8
}
