/// Postal address, one shape for every party type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// A pharmacy: the requesting side of an order.
#[derive(Debug, Clone, PartialEq)]
pub struct Pharmacy {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub address: Address,
}

/// Payload for registering a new pharmacy.
#[derive(Debug, Clone)]
pub struct PharmacyCreate {
    pub name: String,
    pub phone: String,
    pub address: Address,
}

/// Payload for updating an existing pharmacy.
#[derive(Debug, Clone, Default)]
pub struct PharmacyPatch {
    pub phone: Option<String>,
    pub address: Option<Address>,
}
