use thiserror::Error;

/// Errors surfaced by the generic resource actor plumbing.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Invalid request: {0}")]
    Invalid(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

/// Errors that can occur during order lifecycle operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(String),
    #[error("Supplier {acting} is not the fulfiller of order {order_id}")]
    Unauthorized { order_id: String, acting: String },
    #[error("Order already resolved: {id} is {status}")]
    AlreadyResolved { id: String, status: String },
    #[error("Unknown medicine: {0}")]
    UnknownMedicine(String),
    #[error("Invalid pharmacy: {0}")]
    InvalidPharmacy(String),
    #[error("Invalid supplier: {0}")]
    InvalidSupplier(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors that can occur during inventory operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    #[error("Medicine not found: {0}")]
    NotFound(String),
    #[error("Insufficient stock for {id}: requested {requested}, available {available}")]
    InsufficientStock {
        id: String,
        requested: u32,
        available: u32,
    },
    #[error("Stock overflow for {0}")]
    StockOverflow(String),
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors that can occur during pharmacy operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PharmacyError {
    #[error("Pharmacy not found: {0}")]
    NotFound(String),
    #[error("Pharmacy validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Errors that can occur during supplier operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SupplierError {
    #[error("Supplier not found: {0}")]
    NotFound(String),
    #[error("Supplier validation error: {0}")]
    ValidationError(String),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
