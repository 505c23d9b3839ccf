use std::collections::HashMap;
use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

use crate::clients::{InventoryClient, OrderClient, PharmacyClient, SupplierClient};
use crate::domain::{Decision, Order, OrderLine, OrderStatus, PartyRole};
use crate::error::{InventoryError, OrderError};
use crate::messages::{OrderRequest, ServiceResponse};

/// Actor owning all order records and the order lifecycle.
///
/// Every request is processed serially from one channel, which makes the
/// pending-check and status-write of `ResolveOrder` atomic per order: of two
/// racing resolves, the second always observes the terminal status and fails
/// with `AlreadyResolved`. Stock for an accepted order is therefore applied
/// at most once.
pub struct OrderService {
    receiver: mpsc::Receiver<OrderRequest>,
    inventory_client: InventoryClient,
    orders: HashMap<String, Order>,
    next_id: u64,
}

impl OrderService {
    pub fn new(
        buffer_size: usize,
        inventory_client: InventoryClient,
        pharmacy_client: PharmacyClient,
        supplier_client: SupplierClient,
    ) -> (Self, OrderClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            inventory_client,
            orders: HashMap::new(),
            next_id: 1,
        };
        let client = OrderClient::new(sender, pharmacy_client, supplier_client);
        (service, client)
    }

    #[instrument(name = "order_service", skip(self))]
    pub async fn run(mut self) {
        info!("OrderService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                OrderRequest::PlaceOrder { pharmacy, supplier, lines, respond_to } => {
                    self.handle_place_order(pharmacy, supplier, lines, respond_to).await;
                }
                OrderRequest::ResolveOrder { order_id, supplier, decision, reason, respond_to } => {
                    self.handle_resolve_order(order_id, supplier, decision, reason, respond_to)
                        .await;
                }
                OrderRequest::GetOrder { id, respond_to } => {
                    self.handle_get_order(id, respond_to);
                }
                OrderRequest::ListFor { party_id, role, respond_to } => {
                    self.handle_list_for(party_id, role, respond_to);
                }
                OrderRequest::ListOrders { respond_to } => {
                    let _ = respond_to.send(Ok(sorted_newest_first(
                        self.orders.values().cloned().collect(),
                    )));
                }
                OrderRequest::Shutdown => {
                    info!("OrderService shutting down");
                    break;
                }
            }
        }
        info!("OrderService stopped");
    }

    #[instrument(fields(pharmacy = %pharmacy), skip(self, pharmacy, supplier, lines, respond_to))]
    async fn handle_place_order(
        &mut self,
        pharmacy: String,
        supplier: Option<String>,
        lines: Vec<OrderLine>,
        respond_to: ServiceResponse<Order, OrderError>,
    ) {
        info!(lines = lines.len(), "Processing place_order request");

        if let Err(e) = validate_lines(&lines) {
            error!(error = %e, "Order validation failed");
            let _ = respond_to.send(Err(e));
            return;
        }

        // Every line must reference stock that exists; placement has no
        // effect on quantities.
        let ids: Vec<String> = lines.iter().map(|l| l.medicine.clone()).collect();
        match self.inventory_client.verify_medicines(ids).await {
            Ok(()) => {}
            Err(InventoryError::NotFound(id)) => {
                error!(medicine_id = %id, "Order references unknown medicine");
                let _ = respond_to.send(Err(OrderError::UnknownMedicine(id)));
                return;
            }
            Err(e) => {
                error!(error = %e, "Medicine verification failed");
                let _ = respond_to.send(Err(OrderError::ActorCommunicationError(e.to_string())));
                return;
            }
        }

        let order = Order {
            id: format!("order_{}", self.next_id),
            pharmacy,
            supplier,
            lines,
            status: OrderStatus::Pending,
            rejection_reason: None,
            created_at: Utc::now(),
        };
        self.next_id += 1;
        self.orders.insert(order.id.clone(), order.clone());
        info!(order_id = %order.id, "Order placed");
        let _ = respond_to.send(Ok(order));
    }

    #[instrument(fields(order_id = %order_id, supplier = %supplier), skip(self, order_id, supplier, reason, respond_to))]
    async fn handle_resolve_order(
        &mut self,
        order_id: String,
        supplier: String,
        decision: Decision,
        reason: Option<String>,
        respond_to: ServiceResponse<Order, OrderError>,
    ) {
        info!(?decision, "Processing resolve_order request");

        let mut order = match self.orders.get(&order_id) {
            Some(order) => order.clone(),
            None => {
                error!("Order not found");
                let _ = respond_to.send(Err(OrderError::NotFound(order_id)));
                return;
            }
        };

        if let Some(expected) = &order.supplier {
            if expected != &supplier {
                error!(expected = %expected, "Acting supplier does not match order");
                let _ = respond_to.send(Err(OrderError::Unauthorized {
                    order_id,
                    acting: supplier,
                }));
                return;
            }
        }

        if !order.is_pending() {
            debug!(status = %order.status, "Order already resolved");
            let _ = respond_to.send(Err(OrderError::AlreadyResolved {
                id: order_id,
                status: order.status.to_string(),
            }));
            return;
        }

        match decision {
            Decision::Accept => {
                // The restock is all-or-nothing inside the inventory actor;
                // the order flips to Confirmed only after it succeeds, so a
                // refused batch leaves both order and stock untouched.
                if let Err(e) = self.inventory_client.restock(order.lines.clone()).await {
                    error!(error = %e, "Restock failed, order stays pending");
                    let _ = respond_to.send(Err(match e {
                        InventoryError::NotFound(id) => OrderError::UnknownMedicine(id),
                        InventoryError::ActorCommunicationError(msg) => {
                            OrderError::ActorCommunicationError(msg)
                        }
                        other => OrderError::ValidationError(other.to_string()),
                    }));
                    return;
                }
                order.status = OrderStatus::Confirmed;
                info!("Order confirmed, stock applied");
            }
            Decision::Reject => {
                order.status = OrderStatus::Rejected;
                order.rejection_reason = Some(reason.unwrap_or_default());
                info!("Order rejected");
            }
        }

        self.orders.insert(order.id.clone(), order.clone());
        let _ = respond_to.send(Ok(order));
    }

    #[instrument(fields(order_id = %id), skip(self, respond_to))]
    fn handle_get_order(&self, id: String, respond_to: ServiceResponse<Option<Order>, OrderError>) {
        debug!("Processing get_order request");
        let _ = respond_to.send(Ok(self.orders.get(&id).cloned()));
    }

    #[instrument(fields(party_id = %party_id), skip(self, party_id, respond_to))]
    fn handle_list_for(
        &self,
        party_id: String,
        role: PartyRole,
        respond_to: ServiceResponse<Vec<Order>, OrderError>,
    ) {
        debug!("Processing list_for request");
        let matching = self
            .orders
            .values()
            .filter(|order| match role {
                PartyRole::Pharmacy => order.pharmacy == party_id,
                PartyRole::Supplier => order.supplier.as_deref() == Some(party_id.as_str()),
            })
            .cloned()
            .collect();
        let _ = respond_to.send(Ok(sorted_newest_first(matching)));
    }
}

fn validate_lines(lines: &[OrderLine]) -> Result<(), OrderError> {
    if lines.is_empty() {
        return Err(OrderError::ValidationError(
            "order must contain at least one line".to_string(),
        ));
    }
    for line in lines {
        if line.quantity == 0 {
            return Err(OrderError::ValidationError(format!(
                "quantity for {} must be at least 1",
                line.medicine
            )));
        }
    }
    Ok(())
}

/// The numeric suffix of an order id, i.e. its placement counter.
fn placement_rank(id: &str) -> u64 {
    id.rsplit_once('_')
        .and_then(|(_, n)| n.parse().ok())
        .unwrap_or(0)
}

fn sorted_newest_first(mut orders: Vec<Order>) -> Vec<Order> {
    // created_at ties fall back to placement order.
    orders.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| placement_rank(&b.id).cmp(&placement_rank(&a.id)))
    });
    orders
}
