use crate::actor_framework::Entity;
use crate::domain::{Supplier, SupplierCreate, SupplierPatch};

impl Entity for Supplier {
    type Id = String;
    type CreatePayload = SupplierCreate;
    type Patch = SupplierPatch;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: SupplierCreate) -> Result<Self, String> {
        if payload.name.trim().is_empty() {
            return Err("supplier name must not be empty".to_string());
        }
        if payload.license_number.trim().is_empty() {
            return Err("supplier license number must not be empty".to_string());
        }
        Ok(Self {
            id,
            name: payload.name,
            phone: payload.phone,
            license_number: payload.license_number,
            address: payload.address,
        })
    }

    fn on_update(&mut self, patch: SupplierPatch) -> Result<(), String> {
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        Ok(())
    }
}
