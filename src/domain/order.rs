use chrono::{DateTime, Utc};

/// Lifecycle state of an order.
///
/// The only legal transitions are `Pending -> Confirmed` and
/// `Pending -> Rejected`. Once an order leaves `Pending` it is immutable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Rejected,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// One (medicine, quantity) pair within an order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub medicine: String,
    pub quantity: u32,
}

impl OrderLine {
    pub fn new(medicine: impl Into<String>, quantity: u32) -> Self {
        Self {
            medicine: medicine.into(),
            quantity,
        }
    }
}

/// A pharmacy's demand for stock, optionally addressed to a specific supplier.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    /// The requesting pharmacy.
    pub pharmacy: String,
    /// The supplier expected to fulfill the order, when addressed.
    pub supplier: Option<String>,
    pub lines: Vec<OrderLine>,
    pub status: OrderStatus,
    /// Set only when `status == Rejected`.
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn is_pending(&self) -> bool {
        self.status == OrderStatus::Pending
    }
}

/// Supplier's verdict on a pending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject,
}

/// Which side of an order a party id refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyRole {
    Pharmacy,
    Supplier,
}
