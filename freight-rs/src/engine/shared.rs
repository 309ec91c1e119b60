use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::FreightError;
use crate::engine::{Depot, OptimizeOutcome};
use crate::entities::{Shipment, ShipmentForm, ShipmentStatus};
use crate::routing::DistanceProvider;

/// Handle to a [`Depot`] shared between concurrent callers.
///
/// Every operation runs under the lock, so each check and the mutation depending on it
/// are observed atomically. The lock is not held during the route lookup of a submission:
/// checks are repeated once the route is known.
#[derive(Clone)]
pub struct SharedDepot {
    inner: Arc<Mutex<Depot>>,
}

impl SharedDepot {
    pub fn new(depot: Depot) -> Self {
        Self {
            inner: Arc::new(Mutex::new(depot)),
        }
    }

    pub async fn submit_shipment<P: DistanceProvider>(
        &self,
        form: &ShipmentForm,
        provider: &P,
    ) -> Result<Shipment, FreightError> {
        let (request, origin) = {
            let depot = self.lock();
            (depot.precheck(form)?, depot.origin().to_string())
        };
        let route = provider.route(&origin, &request.destination).await;
        self.lock().stage_quote(request, route)
    }

    pub fn confirm_shipment(&self, order_id: &str) -> Result<Shipment, FreightError> {
        self.lock().confirm_shipment(order_id)
    }

    pub fn cancel_quote(&self, order_id: &str) -> Result<Shipment, FreightError> {
        self.lock().cancel_quote(order_id)
    }

    pub fn set_shipment_status(
        &self,
        order_id: &str,
        status: ShipmentStatus,
    ) -> Result<Shipment, FreightError> {
        self.lock().set_shipment_status(order_id, status)
    }

    pub fn optimize_containers(&self) -> OptimizeOutcome {
        self.lock().optimize_containers()
    }

    pub fn track_shipment(&self, order_id: &str) -> Result<Shipment, FreightError> {
        self.lock().track_shipment(order_id).cloned()
    }

    pub fn restock(&self, category: &str, qty: i64) -> Result<u64, FreightError> {
        self.lock().restock(category, qty)
    }

    /// Runs `f` with exclusive access to the depot
    pub fn with_depot<R>(&self, f: impl FnOnce(&mut Depot) -> R) -> R {
        f(&mut *self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, Depot> {
        //a panic under the lock leaves the depot in the state of its last completed operation
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
