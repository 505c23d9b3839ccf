use tokio::sync::oneshot;
use tracing::{debug, instrument};

use crate::domain::{
    Medicine, MedicineCreate, MedicinePatch, OrderLine, Pharmacy, PharmacyCreate, PharmacyPatch,
    Supplier, SupplierCreate, SupplierPatch,
};
use crate::error::{FrameworkError, InventoryError, PharmacyError, SupplierError};
use crate::messages::InventoryRequest;
use crate::{impl_basic_client, impl_client_methods, impl_client_new};

mod macros;
mod order_client;
pub use order_client::OrderClient;

/// Conversion from the generic framework error into a domain error.
pub trait FromFramework {
    fn from_framework(err: FrameworkError) -> Self;
}

impl FromFramework for PharmacyError {
    fn from_framework(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => PharmacyError::NotFound(id),
            FrameworkError::Invalid(msg) => PharmacyError::ValidationError(msg),
            other => PharmacyError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl FromFramework for SupplierError {
    fn from_framework(err: FrameworkError) -> Self {
        match err {
            FrameworkError::NotFound(id) => SupplierError::NotFound(id),
            FrameworkError::Invalid(msg) => SupplierError::ValidationError(msg),
            other => SupplierError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// Generates a client method that sends one typed request variant and awaits
/// the oneshot response.
macro_rules! client_method {
    ($client:ty => fn $method:ident($($param:ident: $param_type:ty),*) -> $return_type:ty as $request:ident::$variant:ident, Error = $error_type:ty) => {
        impl $client {
            #[instrument(skip(self))]
            pub async fn $method(&self, $($param: $param_type),*) -> Result<$return_type, $error_type> {
                debug!("Sending request");
                let (respond_to, response) = oneshot::channel();
                self.sender.send($request::$variant {
                    $($param,)*
                    respond_to,
                }).await.map_err(|_| <$error_type>::ActorCommunicationError("Actor closed".to_string()))?;

                response.await.map_err(|_| <$error_type>::ActorCommunicationError("Actor dropped".to_string()))?
            }
        }
    };
}
pub(crate) use client_method;

// =============================================================================
// Inventory client (typed request channel)
// =============================================================================

#[derive(Clone)]
pub struct InventoryClient {
    sender: tokio::sync::mpsc::Sender<InventoryRequest>,
}

impl InventoryClient {
    pub fn new(sender: tokio::sync::mpsc::Sender<InventoryRequest>) -> Self {
        Self { sender }
    }

    pub async fn shutdown(&self) -> Result<(), InventoryError> {
        self.sender
            .send(InventoryRequest::Shutdown)
            .await
            .map_err(|_| InventoryError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(InventoryClient => fn create_medicine(payload: MedicineCreate) -> Medicine as InventoryRequest::CreateMedicine, Error = InventoryError);
client_method!(InventoryClient => fn get_medicine(id: String) -> Option<Medicine> as InventoryRequest::GetMedicine, Error = InventoryError);
client_method!(InventoryClient => fn list_medicines() -> Vec<Medicine> as InventoryRequest::ListMedicines, Error = InventoryError);
client_method!(InventoryClient => fn update_medicine(id: String, patch: MedicinePatch) -> Medicine as InventoryRequest::UpdateMedicine, Error = InventoryError);
client_method!(InventoryClient => fn verify_medicines(ids: Vec<String>) -> () as InventoryRequest::VerifyMedicines, Error = InventoryError);
client_method!(InventoryClient => fn restock(lines: Vec<OrderLine>) -> () as InventoryRequest::Restock, Error = InventoryError);
client_method!(InventoryClient => fn record_sale(lines: Vec<OrderLine>) -> () as InventoryRequest::RecordSale, Error = InventoryError);

// =============================================================================
// Pharmacy client (generic resource actor)
// =============================================================================

#[derive(Clone)]
pub struct PharmacyClient {
    inner: crate::actor_framework::ResourceClient<Pharmacy>,
}

impl PharmacyClient {
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_pharmacy(&self, payload: PharmacyCreate) -> Result<String, PharmacyError> {
        debug!("Sending request");
        self.inner
            .create(payload)
            .await
            .map_err(PharmacyError::from_framework)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_pharmacy(
        &self,
        id: String,
        patch: PharmacyPatch,
    ) -> Result<Pharmacy, PharmacyError> {
        debug!("Sending request");
        self.inner
            .update(id, patch)
            .await
            .map_err(PharmacyError::from_framework)
    }
}

impl_basic_client!(PharmacyClient, Pharmacy, PharmacyError, pharmacy, pharmacies);

// =============================================================================
// Supplier client (generic resource actor)
// =============================================================================

#[derive(Clone)]
pub struct SupplierClient {
    inner: crate::actor_framework::ResourceClient<Supplier>,
}

impl SupplierClient {
    #[instrument(skip(self, payload), fields(name = %payload.name))]
    pub async fn create_supplier(&self, payload: SupplierCreate) -> Result<String, SupplierError> {
        debug!("Sending request");
        self.inner
            .create(payload)
            .await
            .map_err(SupplierError::from_framework)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_supplier(
        &self,
        id: String,
        patch: SupplierPatch,
    ) -> Result<Supplier, SupplierError> {
        debug!("Sending request");
        self.inner
            .update(id, patch)
            .await
            .map_err(SupplierError::from_framework)
    }
}

impl_basic_client!(SupplierClient, Supplier, SupplierError, supplier, suppliers);
