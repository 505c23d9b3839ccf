use chrono::{DateTime, Utc};

/// An inventory unit with a mutable available quantity.
#[derive(Debug, Clone, PartialEq)]
pub struct Medicine {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub stock_available: u32,
    pub expiry_date: Option<DateTime<Utc>>,
}

/// Payload for registering a new medicine.
#[derive(Debug, Clone)]
pub struct MedicineCreate {
    pub name: String,
    pub price: f64,
    pub stock_available: u32,
    pub expiry_date: Option<DateTime<Utc>>,
}

/// Payload for a direct edit of an existing medicine.
#[derive(Debug, Clone, Default)]
pub struct MedicinePatch {
    pub price: Option<f64>,
    pub stock_available: Option<u32>,
    pub expiry_date: Option<DateTime<Utc>>,
}

impl Medicine {
    pub fn from_create(id: impl Into<String>, payload: MedicineCreate) -> Self {
        Self {
            id: id.into(),
            name: payload.name,
            price: payload.price,
            stock_available: payload.stock_available,
            expiry_date: payload.expiry_date,
        }
    }

    pub fn apply_patch(&mut self, patch: MedicinePatch) {
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(stock) = patch.stock_available {
            self.stock_available = stock;
        }
        if let Some(expiry) = patch.expiry_date {
            self.expiry_date = Some(expiry);
        }
    }
}
