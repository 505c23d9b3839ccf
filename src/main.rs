mod actor_framework;
mod app_system;
mod clients;
mod domain;
mod error;
mod inventory_service;
mod messages;
mod order_service;
mod pharmacy_actor;
mod supplier_actor;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod mock_framework;

use tracing::{error, info, Instrument};

use crate::app_system::{setup_tracing, PharmacySystem};
use crate::domain::{
    Address, Decision, MedicineCreate, OrderLine, PharmacyCreate, PharmacyPatch, SupplierCreate,
    SupplierPatch,
};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    info!("Starting pharmacy inventory system");

    let system = PharmacySystem::new();

    let medicine = system
        .inventory_client
        .create_medicine(MedicineCreate {
            name: "Paracetamol 500mg".to_string(),
            price: 30.0,
            stock_available: 100,
            expiry_date: None,
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(medicine_id = %medicine.id, stock = medicine.stock_available, "Medicine registered");

    let pharmacy_id = system
        .pharmacy_client
        .create_pharmacy(PharmacyCreate {
            name: "City Care Pharmacy".to_string(),
            phone: "8887776666".to_string(),
            address: Address {
                street: "7 Wellness Ave".to_string(),
                city: "HealTown".to_string(),
                state: "DL".to_string(),
                pincode: "110001".to_string(),
            },
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(pharmacy_id = %pharmacy_id, "Pharmacy registered");

    let supplier_id = system
        .supplier_client
        .create_supplier(SupplierCreate {
            name: "Acme Med Supplies".to_string(),
            phone: "9998887777".to_string(),
            license_number: "LIC-ACME-001".to_string(),
            address: Address {
                street: "42 Health Park".to_string(),
                city: "MedCity".to_string(),
                state: "MH".to_string(),
                pincode: "400001".to_string(),
            },
        })
        .await
        .map_err(|e| e.to_string())?;
    info!(supplier_id = %supplier_id, "Supplier registered");

    let pharmacies = system
        .pharmacy_client
        .list_pharmacies()
        .await
        .map_err(|e| e.to_string())?;
    let suppliers = system
        .supplier_client
        .list_suppliers()
        .await
        .map_err(|e| e.to_string())?;
    info!(
        pharmacies = pharmacies.len(),
        suppliers = suppliers.len(),
        "Parties registered"
    );

    let updated = system
        .pharmacy_client
        .update_pharmacy(
            pharmacy_id.clone(),
            PharmacyPatch {
                phone: Some("8887770000".to_string()),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| e.to_string())?;
    info!(phone = %updated.phone, "Pharmacy contact updated");

    let updated = system
        .supplier_client
        .update_supplier(
            supplier_id.clone(),
            SupplierPatch {
                phone: Some("9998880000".to_string()),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| e.to_string())?;
    info!(phone = %updated.phone, "Supplier contact updated");

    let span = tracing::info_span!("order_workflow");
    let workflow = async {
        info!("Placing restock order");
        let order = system
            .order_client
            .place_order(
                pharmacy_id.clone(),
                Some(supplier_id.clone()),
                vec![OrderLine::new(medicine.id.clone(), 15)],
            )
            .await?;
        info!(order_id = %order.id, status = %order.status, "Order placed");

        info!("Supplier accepting the order");
        system
            .order_client
            .resolve_order(order.id, supplier_id.clone(), Decision::Accept, None)
            .await
    }
    .instrument(span)
    .await;

    match workflow {
        Ok(order) => info!(order_id = %order.id, status = %order.status, "Order confirmed"),
        Err(e) => error!(error = %e, "Order workflow failed"),
    }

    info!("Recording a walk-in sale");
    system
        .inventory_client
        .record_sale(vec![OrderLine::new(medicine.id.clone(), 20)])
        .await
        .map_err(|e| e.to_string())?;

    let restocked = system
        .inventory_client
        .get_medicine(medicine.id)
        .await
        .map_err(|e| e.to_string())?;
    if let Some(medicine) = restocked {
        info!(stock = medicine.stock_available, "Stock after confirmation and sale");
    }

    let catalog = system
        .inventory_client
        .list_medicines()
        .await
        .map_err(|e| e.to_string())?;
    info!(medicines = catalog.len(), "Medicines in catalog");

    let history = system
        .order_client
        .list_orders_for(supplier_id, crate::domain::PartyRole::Supplier)
        .await
        .map_err(|e| e.to_string())?;
    info!(orders = history.len(), "Supplier order history");

    if let Some(latest) = history.first() {
        let fetched = system
            .order_client
            .get_order(latest.id.clone())
            .await
            .map_err(|e| e.to_string())?;
        if let Some(order) = fetched {
            info!(order_id = %order.id, status = %order.status, "Latest supplier order");
        }
    }

    let all_orders = system
        .order_client
        .list_orders()
        .await
        .map_err(|e| e.to_string())?;
    info!(orders = all_orders.len(), "Orders on record");

    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
