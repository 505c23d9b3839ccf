//! Utilities for testing clients in isolation.
//!
//! Instead of spinning up a real actor, a mock client sends its requests to a
//! channel the test controls. The test inspects each request with the
//! `expect_*` helpers and answers through the bundled responder, simulating
//! the actor's behavior (success, failure) deterministically.

use tokio::sync::{mpsc, oneshot};

use crate::actor_framework::{Entity, ResourceClient, ResourceRequest};
use crate::clients::{InventoryClient, OrderClient, PharmacyClient, SupplierClient};
use crate::domain::{Order, OrderLine, Pharmacy, Supplier};
use crate::error::{FrameworkError, InventoryError, OrderError};
use crate::messages::{InventoryRequest, OrderRequest};

pub fn create_mock_client<T: Entity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

pub fn create_mock_inventory(
    buffer_size: usize,
) -> (InventoryClient, mpsc::Receiver<InventoryRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (InventoryClient::new(sender), receiver)
}

/// Builds an [`OrderClient`] whose three collaborators are all mock channels.
pub fn create_mock_order_client(
    buffer_size: usize,
) -> (
    OrderClient,
    mpsc::Receiver<OrderRequest>,
    mpsc::Receiver<ResourceRequest<Pharmacy>>,
    mpsc::Receiver<ResourceRequest<Supplier>>,
) {
    let (order_sender, order_rx) = mpsc::channel(buffer_size);
    let (pharmacy_inner, pharmacy_rx) = create_mock_client::<Pharmacy>(buffer_size);
    let (supplier_inner, supplier_rx) = create_mock_client::<Supplier>(buffer_size);
    let client = OrderClient::new(
        order_sender,
        PharmacyClient::new(pharmacy_inner),
        SupplierClient::new(supplier_inner),
    );
    (client, order_rx, pharmacy_rx, supplier_rx)
}

/// Helper to verify that the next resource request is a Get.
pub async fn expect_get<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, oneshot::Sender<Result<Option<T>, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next resource request is a Create.
pub async fn expect_create<T: Entity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::CreatePayload, oneshot::Sender<Result<T::Id, FrameworkError>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { payload, respond_to }) => Some((payload, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next inventory request is an existence check.
pub async fn expect_verify_medicines(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(Vec<String>, oneshot::Sender<Result<(), InventoryError>>)> {
    match receiver.recv().await {
        Some(InventoryRequest::VerifyMedicines { ids, respond_to }) => Some((ids, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next inventory request is a batch restock.
pub async fn expect_restock(
    receiver: &mut mpsc::Receiver<InventoryRequest>,
) -> Option<(Vec<OrderLine>, oneshot::Sender<Result<(), InventoryError>>)> {
    match receiver.recv().await {
        Some(InventoryRequest::Restock { lines, respond_to }) => Some((lines, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next order request is a placement.
#[allow(clippy::type_complexity)]
pub async fn expect_place_order(
    receiver: &mut mpsc::Receiver<OrderRequest>,
) -> Option<(
    String,
    Option<String>,
    Vec<OrderLine>,
    oneshot::Sender<Result<Order, OrderError>>,
)> {
    match receiver.recv().await {
        Some(OrderRequest::PlaceOrder {
            pharmacy,
            supplier,
            lines,
            respond_to,
        }) => Some((pharmacy, supplier, lines, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Medicine, MedicineCreate};

    #[tokio::test]
    async fn mock_inventory_answers_requests() {
        let (client, mut receiver) = create_mock_inventory(10);

        let create_task = tokio::spawn(async move {
            client
                .create_medicine(MedicineCreate {
                    name: "Test".to_string(),
                    price: 1.0,
                    stock_available: 3,
                    expiry_date: None,
                })
                .await
        });

        match receiver.recv().await {
            Some(InventoryRequest::CreateMedicine { payload, respond_to }) => {
                assert_eq!(payload.name, "Test");
                let medicine = Medicine::from_create("med_1", payload);
                respond_to.send(Ok(medicine)).unwrap();
            }
            other => panic!("Unexpected request: {:?}", other),
        }

        let created = create_task.await.unwrap().unwrap();
        assert_eq!(created.id, "med_1");
        assert_eq!(created.stock_available, 3);
    }

    #[tokio::test]
    async fn mock_resource_client_answers_create() {
        use crate::domain::{Address, PharmacyCreate};

        let (inner, mut receiver) = create_mock_client::<Pharmacy>(10);
        let client = PharmacyClient::new(inner);

        let create_task = tokio::spawn(async move {
            client
                .create_pharmacy(PharmacyCreate {
                    name: "City Care Pharmacy".to_string(),
                    phone: "8887776666".to_string(),
                    address: Address::default(),
                })
                .await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create");
        assert_eq!(payload.name, "City Care Pharmacy");
        responder.send(Ok("ph_1".to_string())).unwrap();

        let id = create_task.await.unwrap().unwrap();
        assert_eq!(id, "ph_1");
    }
}
