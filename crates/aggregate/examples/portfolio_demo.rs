/// Example demonstrating the portfolio aggregation pipeline
///
/// This shows how to run a snapshot over a small in-memory portfolio,
/// how partial fetch failures are tolerated and recorded, and how the
/// tenant overview reports on a single active lease.
use chrono::{TimeZone, Utc};
use rentflow_aggregate::{BillingPeriod, PortfolioAggregator, TenantReporter};
use rentflow_client::{Fault, MockResourceClient};
use rentflow_types::{
    Amount, Lease, LeaseId, LeaseStatus, PaymentId, PaymentMethod, PaymentRecord, PaymentStatus,
    Property, PropertyId, TenantId, Unit, UnitId,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Portfolio Aggregation Demo ===\n");

    let august = Utc.with_ymd_and_hms(2026, 8, 3, 10, 0, 0).unwrap();
    let period = BillingPeriod::containing(august);

    // 1. A small portfolio: two properties, one of which is unreachable.
    let client = Arc::new(
        MockResourceClient::new()
            .with_properties(vec![
                Property {
                    id: PropertyId::new(1),
                    name: "Greenview Court".to_string(),
                    address: Some("Ngong Road, Nairobi".to_string()),
                    created_at: None,
                },
                Property {
                    id: PropertyId::new(2),
                    name: "Riverside Flats".to_string(),
                    address: None,
                    created_at: None,
                },
            ])
            .with_units(
                PropertyId::new(1),
                vec![
                    Unit {
                        id: UnitId::new(10),
                        property_id: PropertyId::new(1),
                        code: "A-101".to_string(),
                        rent_amount: Amount::new(25_000),
                    },
                    Unit {
                        id: UnitId::new(11),
                        property_id: PropertyId::new(1),
                        code: "A-102".to_string(),
                        rent_amount: Amount::new(25_000),
                    },
                ],
            )
            .fail_units_of(PropertyId::new(2), Fault::transport("socket timeout"))
            .with_leases(
                UnitId::new(10),
                vec![Lease {
                    id: LeaseId::new(100),
                    unit_id: UnitId::new(10),
                    tenant_id: TenantId::new(7),
                    start_date: None,
                    end_date: None,
                    status: LeaseStatus::Active,
                }],
            )
            .with_payments(
                LeaseId::new(100),
                vec![PaymentRecord {
                    id: PaymentId::new(1000),
                    lease_id: LeaseId::new(100),
                    method: PaymentMethod::Mpesa,
                    amount: Amount::new(25_000),
                    status: PaymentStatus::Completed,
                    reference: Some("QGH7RT2XKP".to_string()),
                    created_at: Some(august),
                }],
            )
            .with_tenant_leases(vec![Lease {
                id: LeaseId::new(100),
                unit_id: UnitId::new(10),
                tenant_id: TenantId::new(7),
                start_date: None,
                end_date: None,
                status: LeaseStatus::Active,
            }]),
    );

    // 2. One snapshot run over the whole tree.
    println!("1. Landlord snapshot for {period}:");
    let aggregator = PortfolioAggregator::new(client.clone());
    let snapshot = aggregator.snapshot(period).await?;
    println!("  Properties:      {}", snapshot.total_properties);
    println!("  Units:           {}", snapshot.total_units);
    println!("  Occupancy:       {}%", snapshot.occupancy_pct);
    println!("  Active leases:   {}", snapshot.active_leases);
    println!("  Revenue:         KES {}", snapshot.monthly_revenue);
    println!("  Recent payments: {}", snapshot.recent_payments.len());

    // 3. The unreachable property is a recorded failure, not an error.
    println!("\n2. Tolerated fetch failures:");
    for failure in &snapshot.failures {
        println!("  stage={} parent={} error={}", failure.stage, failure.parent, failure.error);
    }

    // 4. The same client serves the tenant-side overview.
    println!("\n3. Tenant overview:");
    let reporter = TenantReporter::new(client);
    let overview = reporter.overview(period).await?;
    println!("  Lease:          {}", overview.lease.id);
    println!("  Paid in period: {}", overview.paid_in_period);
    println!("  Rent paid:      KES {}", overview.rent_paid);

    Ok(())
}
