use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use crate::clients::InventoryClient;
use crate::domain::{Medicine, MedicineCreate, MedicinePatch, OrderLine};
use crate::error::InventoryError;
use crate::messages::{InventoryRequest, ServiceResponse};

/// Actor owning all medicine records.
///
/// The batch operations (`VerifyMedicines`, `Restock`, `RecordSale`) validate
/// every line before touching any quantity, so a failed batch leaves stock
/// exactly as it was. Serial message processing makes each batch atomic with
/// respect to other inventory requests.
pub struct InventoryService {
    receiver: mpsc::Receiver<InventoryRequest>,
    medicines: HashMap<String, Medicine>,
    next_id: u64,
}

impl InventoryService {
    pub fn new(buffer_size: usize) -> (Self, InventoryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            medicines: HashMap::new(),
            next_id: 1,
        };
        (service, InventoryClient::new(sender))
    }

    #[instrument(name = "inventory_service", skip(self))]
    pub async fn run(mut self) {
        info!("InventoryService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                InventoryRequest::CreateMedicine { payload, respond_to } => {
                    self.handle_create_medicine(payload, respond_to);
                }
                InventoryRequest::GetMedicine { id, respond_to } => {
                    self.handle_get_medicine(id, respond_to);
                }
                InventoryRequest::ListMedicines { respond_to } => {
                    let _ = respond_to.send(Ok(self.medicines.values().cloned().collect()));
                }
                InventoryRequest::UpdateMedicine { id, patch, respond_to } => {
                    self.handle_update_medicine(id, patch, respond_to);
                }
                InventoryRequest::VerifyMedicines { ids, respond_to } => {
                    let _ = respond_to.send(self.verify_lines_exist(ids.iter()));
                }
                InventoryRequest::Restock { lines, respond_to } => {
                    self.handle_restock(lines, respond_to);
                }
                InventoryRequest::RecordSale { lines, respond_to } => {
                    self.handle_record_sale(lines, respond_to);
                }
                InventoryRequest::Shutdown => {
                    info!("InventoryService shutting down");
                    break;
                }
            }
        }
        info!("InventoryService stopped");
    }

    #[instrument(fields(name = %payload.name), skip(self, payload, respond_to))]
    fn handle_create_medicine(
        &mut self,
        payload: MedicineCreate,
        respond_to: ServiceResponse<Medicine, InventoryError>,
    ) {
        let id = format!("med_{}", self.next_id);
        self.next_id += 1;
        let medicine = Medicine::from_create(id.clone(), payload);
        self.medicines.insert(id, medicine.clone());
        info!(medicine_id = %medicine.id, stock = medicine.stock_available, "Medicine registered");
        let _ = respond_to.send(Ok(medicine));
    }

    #[instrument(fields(medicine_id = %id), skip(self, respond_to))]
    fn handle_get_medicine(
        &self,
        id: String,
        respond_to: ServiceResponse<Option<Medicine>, InventoryError>,
    ) {
        debug!("Processing get_medicine request");
        let _ = respond_to.send(Ok(self.medicines.get(&id).cloned()));
    }

    #[instrument(fields(medicine_id = %id), skip(self, patch, respond_to))]
    fn handle_update_medicine(
        &mut self,
        id: String,
        patch: MedicinePatch,
        respond_to: ServiceResponse<Medicine, InventoryError>,
    ) {
        let result = match self.medicines.get_mut(&id) {
            Some(medicine) => {
                medicine.apply_patch(patch);
                info!(stock = medicine.stock_available, "Medicine updated");
                Ok(medicine.clone())
            }
            None => Err(InventoryError::NotFound(id)),
        };
        let _ = respond_to.send(result);
    }

    #[instrument(fields(lines = lines.len()), skip(self, lines, respond_to))]
    fn handle_restock(
        &mut self,
        lines: Vec<OrderLine>,
        respond_to: ServiceResponse<(), InventoryError>,
    ) {
        let result = self.check_restock(&lines).map(|_| {
            for line in &lines {
                if let Some(medicine) = self.medicines.get_mut(&line.medicine) {
                    medicine.stock_available += line.quantity;
                    info!(medicine_id = %line.medicine, added = line.quantity,
                          stock = medicine.stock_available, "Stock incremented");
                }
            }
        });
        if let Err(e) = &result {
            warn!(error = %e, "Restock refused, stock untouched");
        }
        let _ = respond_to.send(result);
    }

    #[instrument(fields(lines = lines.len()), skip(self, lines, respond_to))]
    fn handle_record_sale(
        &mut self,
        lines: Vec<OrderLine>,
        respond_to: ServiceResponse<(), InventoryError>,
    ) {
        let result = self.check_sale(&lines).map(|_| {
            for line in &lines {
                if let Some(medicine) = self.medicines.get_mut(&line.medicine) {
                    medicine.stock_available -= line.quantity;
                    info!(medicine_id = %line.medicine, sold = line.quantity,
                          stock = medicine.stock_available, "Stock decremented");
                }
            }
        });
        if let Err(e) = &result {
            warn!(error = %e, "Sale refused, stock untouched");
        }
        let _ = respond_to.send(result);
    }

    fn verify_lines_exist<'a>(
        &self,
        ids: impl Iterator<Item = &'a String>,
    ) -> Result<(), InventoryError> {
        for id in ids {
            if !self.medicines.contains_key(id) {
                return Err(InventoryError::NotFound(id.clone()));
            }
        }
        Ok(())
    }

    fn check_restock(&self, lines: &[OrderLine]) -> Result<(), InventoryError> {
        for line in lines {
            if line.quantity == 0 {
                return Err(InventoryError::InvalidQuantity(line.quantity));
            }
            let medicine = self
                .medicines
                .get(&line.medicine)
                .ok_or_else(|| InventoryError::NotFound(line.medicine.clone()))?;
            if medicine.stock_available.checked_add(line.quantity).is_none() {
                return Err(InventoryError::StockOverflow(line.medicine.clone()));
            }
        }
        Ok(())
    }

    fn check_sale(&self, lines: &[OrderLine]) -> Result<(), InventoryError> {
        for line in lines {
            if line.quantity == 0 {
                return Err(InventoryError::InvalidQuantity(line.quantity));
            }
            let medicine = self
                .medicines
                .get(&line.medicine)
                .ok_or_else(|| InventoryError::NotFound(line.medicine.clone()))?;
            if medicine.stock_available < line.quantity {
                return Err(InventoryError::InsufficientStock {
                    id: line.medicine.clone(),
                    requested: line.quantity,
                    available: medicine.stock_available,
                });
            }
        }
        Ok(())
    }
}
