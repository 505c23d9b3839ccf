use super::pharmacy::Address;

/// A supplier: the fulfilling side of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub license_number: String,
    pub address: Address,
}

/// Payload for registering a new supplier.
#[derive(Debug, Clone)]
pub struct SupplierCreate {
    pub name: String,
    pub phone: String,
    pub license_number: String,
    pub address: Address,
}

/// Payload for updating an existing supplier.
#[derive(Debug, Clone, Default)]
pub struct SupplierPatch {
    pub phone: Option<String>,
    pub address: Option<Address>,
}
