use async_trait::async_trait;
use rentflow_types::{Lease, LeaseId, PaymentRecord, Property, PropertyId, Unit, UnitId};

use crate::error::ClientError;

/// Read access to the remote portfolio resources.
///
/// Implemented by the HTTP transport in production and by
/// [`MockResourceClient`](crate::mock::MockResourceClient) in tests. Every
/// call is one remote request; callers own retry and fan-out policy.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Properties owned by the authenticated landlord. Seed of every
    /// portfolio aggregation.
    async fn properties(&self) -> Result<Vec<Property>, ClientError>;

    /// Units belonging to one property.
    async fn units_of(&self, property: PropertyId) -> Result<Vec<Unit>, ClientError>;

    /// Leases attached to one unit, active or not.
    async fn leases_of(&self, unit: UnitId) -> Result<Vec<Lease>, ClientError>;

    /// Payments recorded against one lease.
    async fn payments_of(&self, lease: LeaseId) -> Result<Vec<PaymentRecord>, ClientError>;

    /// Leases visible to the authenticated tenant.
    async fn tenant_leases(&self) -> Result<Vec<Lease>, ClientError>;
}
