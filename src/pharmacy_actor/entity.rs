use crate::actor_framework::Entity;
use crate::domain::{Pharmacy, PharmacyCreate, PharmacyPatch};

impl Entity for Pharmacy {
    type Id = String;
    type CreatePayload = PharmacyCreate;
    type Patch = PharmacyPatch;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create(id: String, payload: PharmacyCreate) -> Result<Self, String> {
        if payload.name.trim().is_empty() {
            return Err("pharmacy name must not be empty".to_string());
        }
        Ok(Self {
            id,
            name: payload.name,
            phone: payload.phone,
            address: payload.address,
        })
    }

    fn on_update(&mut self, patch: PharmacyPatch) -> Result<(), String> {
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        if let Some(address) = patch.address {
            self.address = address;
        }
        Ok(())
    }
}
