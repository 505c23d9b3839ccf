use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::clients::{InventoryClient, OrderClient, PharmacyClient, SupplierClient};
use crate::domain::{Pharmacy, Supplier};
use crate::inventory_service::InventoryService;
use crate::order_service::OrderService;

const CHANNEL_BUFFER: usize = 32;

fn counter_ids(prefix: &'static str) -> impl Fn() -> String + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(1));
    move || {
        let n = counter.fetch_add(1, Ordering::SeqCst);
        format!("{}_{}", prefix, n)
    }
}

/// The composition root of the system.
///
/// Spawns every actor, wires the clients together, and owns shutdown. All
/// storage is injected through the clients; there are no process-wide
/// singletons.
pub struct PharmacySystem {
    pub inventory_client: InventoryClient,
    pub pharmacy_client: PharmacyClient,
    pub supplier_client: SupplierClient,
    pub order_client: OrderClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PharmacySystem {
    pub fn new() -> Self {
        let (inventory_service, inventory_client) = InventoryService::new(CHANNEL_BUFFER);
        let inventory_handle = tokio::spawn(inventory_service.run());

        let (pharmacy_actor, pharmacy_resource) =
            ResourceActor::<Pharmacy>::new(CHANNEL_BUFFER, counter_ids("ph"));
        let pharmacy_client = PharmacyClient::new(pharmacy_resource);
        let pharmacy_handle = tokio::spawn(pharmacy_actor.run());

        let (supplier_actor, supplier_resource) =
            ResourceActor::<Supplier>::new(CHANNEL_BUFFER, counter_ids("sup"));
        let supplier_client = SupplierClient::new(supplier_resource);
        let supplier_handle = tokio::spawn(supplier_actor.run());

        let (order_service, order_client) = OrderService::new(
            CHANNEL_BUFFER,
            inventory_client.clone(),
            pharmacy_client.clone(),
            supplier_client.clone(),
        );
        let order_handle = tokio::spawn(order_service.run());

        Self {
            inventory_client,
            pharmacy_client,
            supplier_client,
            order_client,
            handles: vec![
                inventory_handle,
                pharmacy_handle,
                supplier_handle,
                order_handle,
            ],
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        // Stop the lifecycle service before the inventory it depends on.
        let _ = self.order_client.shutdown().await;
        let _ = self.inventory_client.shutdown().await;

        // Resource actors stop when their last sender drops.
        drop(self.order_client);
        drop(self.inventory_client);
        drop(self.pharmacy_client);
        drop(self.supplier_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}

impl Default for PharmacySystem {
    fn default() -> Self {
        Self::new()
    }
}
