use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, instrument};

use super::{client_method, PharmacyClient, SupplierClient};
use crate::domain::{Decision, Order, OrderLine, PartyRole};
use crate::error::OrderError;
use crate::messages::OrderRequest;

/// Client for the order lifecycle service.
///
/// Placement validates the ordering pharmacy and the addressed supplier
/// before dispatching, so the lifecycle actor only ever sees orders between
/// known parties.
#[derive(Clone)]
pub struct OrderClient {
    sender: mpsc::Sender<OrderRequest>,
    pharmacy_client: PharmacyClient,
    supplier_client: SupplierClient,
}

impl OrderClient {
    pub fn new(
        sender: mpsc::Sender<OrderRequest>,
        pharmacy_client: PharmacyClient,
        supplier_client: SupplierClient,
    ) -> Self {
        Self {
            sender,
            pharmacy_client,
            supplier_client,
        }
    }

    pub async fn shutdown(&self) -> Result<(), OrderError> {
        self.sender
            .send(OrderRequest::Shutdown)
            .await
            .map_err(|_| OrderError::ActorCommunicationError("Actor closed".to_string()))
    }

    #[instrument(skip(self, lines), fields(pharmacy = %pharmacy, lines = lines.len()))]
    pub async fn place_order(
        &self,
        pharmacy: String,
        supplier: Option<String>,
        lines: Vec<OrderLine>,
    ) -> Result<Order, OrderError> {
        info!("Processing place_order request");

        match self.pharmacy_client.get_pharmacy(pharmacy.clone()).await {
            Ok(Some(found)) => info!(pharmacy_name = %found.name, "Pharmacy validation successful"),
            Ok(None) => {
                error!("Pharmacy not found");
                return Err(OrderError::InvalidPharmacy(pharmacy));
            }
            Err(e) => {
                error!(error = %e, "Pharmacy validation failed");
                return Err(OrderError::ActorCommunicationError(e.to_string()));
            }
        }

        if let Some(supplier_id) = &supplier {
            match self.supplier_client.get_supplier(supplier_id.clone()).await {
                Ok(Some(found)) => {
                    info!(supplier_name = %found.name, "Supplier validation successful")
                }
                Ok(None) => {
                    error!("Supplier not found");
                    return Err(OrderError::InvalidSupplier(supplier_id.clone()));
                }
                Err(e) => {
                    error!(error = %e, "Supplier validation failed");
                    return Err(OrderError::ActorCommunicationError(e.to_string()));
                }
            }
        }

        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(OrderRequest::PlaceOrder {
                pharmacy,
                supplier,
                lines,
                respond_to,
            })
            .await
            .map_err(|_| OrderError::ActorCommunicationError("Actor closed".to_string()))?;
        response
            .await
            .map_err(|_| OrderError::ActorCommunicationError("Actor dropped".to_string()))?
    }
}

client_method!(OrderClient => fn resolve_order(order_id: String, supplier: String, decision: Decision, reason: Option<String>) -> Order as OrderRequest::ResolveOrder, Error = OrderError);
client_method!(OrderClient => fn get_order(id: String) -> Option<Order> as OrderRequest::GetOrder, Error = OrderError);
client_method!(OrderClient => fn list_orders_for(party_id: String, role: PartyRole) -> Vec<Order> as OrderRequest::ListFor, Error = OrderError);
client_method!(OrderClient => fn list_orders() -> Vec<Order> as OrderRequest::ListOrders, Error = OrderError);
