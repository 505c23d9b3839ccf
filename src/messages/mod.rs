use tokio::sync::oneshot;

use crate::domain::{Decision, Medicine, MedicineCreate, MedicinePatch, Order, OrderLine, PartyRole};
use crate::error::{InventoryError, OrderError};

/// Generic type aliases for service communication.
pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Requests handled by the inventory service. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum InventoryRequest {
    CreateMedicine {
        payload: MedicineCreate,
        respond_to: ServiceResponse<Medicine, InventoryError>,
    },
    GetMedicine {
        id: String,
        respond_to: ServiceResponse<Option<Medicine>, InventoryError>,
    },
    ListMedicines {
        respond_to: ServiceResponse<Vec<Medicine>, InventoryError>,
    },
    UpdateMedicine {
        id: String,
        patch: MedicinePatch,
        respond_to: ServiceResponse<Medicine, InventoryError>,
    },
    /// Check that every id references an existing medicine.
    VerifyMedicines {
        ids: Vec<String>,
        respond_to: ServiceResponse<(), InventoryError>,
    },
    /// Increment stock for each line, all lines or none.
    Restock {
        lines: Vec<OrderLine>,
        respond_to: ServiceResponse<(), InventoryError>,
    },
    /// Decrement stock for each line, all lines or none.
    RecordSale {
        lines: Vec<OrderLine>,
        respond_to: ServiceResponse<(), InventoryError>,
    },
    Shutdown,
}

/// Requests handled by the order lifecycle service.
#[derive(Debug)]
pub enum OrderRequest {
    PlaceOrder {
        pharmacy: String,
        supplier: Option<String>,
        lines: Vec<OrderLine>,
        respond_to: ServiceResponse<Order, OrderError>,
    },
    ResolveOrder {
        order_id: String,
        supplier: String,
        decision: Decision,
        reason: Option<String>,
        respond_to: ServiceResponse<Order, OrderError>,
    },
    GetOrder {
        id: String,
        respond_to: ServiceResponse<Option<Order>, OrderError>,
    },
    ListFor {
        party_id: String,
        role: PartyRole,
        respond_to: ServiceResponse<Vec<Order>, OrderError>,
    },
    ListOrders {
        respond_to: ServiceResponse<Vec<Order>, OrderError>,
    },
    Shutdown,
}
