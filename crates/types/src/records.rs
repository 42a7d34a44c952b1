use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Amount, LeaseId, PaymentId, PaymentStatus, PropertyId, TenantId, UnitId};

/// A property owned by the authenticated landlord.
///
/// All records in this module are remote-authoritative snapshots: they are
/// fetched on demand, held only for the lifetime of the view that requested
/// them, and never persisted locally.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Property {
    pub id: PropertyId,
    pub name: String,
    pub address: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// A rentable unit within a property.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Unit {
    pub id: UnitId,
    pub property_id: PropertyId,
    /// Human-facing unit code, e.g. "A-102".
    pub code: String,
    pub rent_amount: Amount,
}

/// Lease lifecycle as reported by the backend.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeaseStatus {
    Active,
    Ended,
    /// Any status string this client does not know about.
    #[serde(other)]
    Unknown,
}

/// A lease binding a tenant to a unit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Lease {
    pub id: LeaseId,
    pub unit_id: UnitId,
    pub tenant_id: TenantId,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub status: LeaseStatus,
}

impl Lease {
    /// Only active leases count toward occupancy.
    pub fn is_active(&self) -> bool {
        self.status == LeaseStatus::Active
    }
}

/// How a payment was made.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Mpesa,
    Bank,
    #[serde(other)]
    Other,
}

/// A payment as recorded by the backend.
///
/// `created_at` is `None` when the backend omitted the timestamp or the
/// transport could not parse it; consumers must surface that as a recorded
/// anomaly instead of silently dropping the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PaymentRecord {
    pub id: PaymentId,
    pub lease_id: LeaseId,
    pub method: PaymentMethod,
    pub amount: Amount,
    pub status: PaymentStatus,
    /// Receipt number assigned by the gateway on success.
    pub reference: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

impl PaymentRecord {
    /// True when this payment should count toward realized revenue.
    pub fn is_completed(&self) -> bool {
        self.status == PaymentStatus::Completed
    }
}
