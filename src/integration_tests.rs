#[cfg(test)]
mod tests {
    use crate::app_system::PharmacySystem;
    use crate::clients::{PharmacyClient, SupplierClient};
    use crate::domain::{
        Address, Decision, Medicine, MedicineCreate, OrderLine, OrderStatus, PartyRole, Pharmacy,
        PharmacyCreate, PharmacyPatch, Supplier, SupplierCreate, SupplierPatch,
    };
    use crate::error::{InventoryError, OrderError, PharmacyError};
    use crate::mock_framework::{
        create_mock_inventory, create_mock_client, create_mock_order_client, expect_get,
        expect_place_order, expect_restock, expect_verify_medicines,
    };
    use crate::order_service::OrderService;

    fn pharmacy(id: &str) -> Pharmacy {
        Pharmacy {
            id: id.to_string(),
            name: "City Care Pharmacy".to_string(),
            phone: "8887776666".to_string(),
            address: Address::default(),
        }
    }

    fn supplier(id: &str) -> Supplier {
        Supplier {
            id: id.to_string(),
            name: "Acme Med Supplies".to_string(),
            phone: "9998887777".to_string(),
            license_number: "LIC-ACME-001".to_string(),
            address: Address::default(),
        }
    }

    fn medicine_payload(name: &str, stock: u32) -> MedicineCreate {
        MedicineCreate {
            name: name.to_string(),
            price: 30.0,
            stock_available: stock,
            expiry_date: None,
        }
    }

    /// End-to-end: stock 100, order 15 through the full system, accept by the
    /// addressed supplier, expect 115 and a confirmed order.
    #[tokio::test]
    async fn accepted_order_restocks_the_medicine() {
        let system = PharmacySystem::new();

        let med = system
            .inventory_client
            .create_medicine(medicine_payload("Paracetamol 500mg", 100))
            .await
            .unwrap();

        let pharmacy_id = system
            .pharmacy_client
            .create_pharmacy(PharmacyCreate {
                name: "City Care Pharmacy".to_string(),
                phone: "8887776666".to_string(),
                address: Address::default(),
            })
            .await
            .unwrap();

        let supplier_id = system
            .supplier_client
            .create_supplier(SupplierCreate {
                name: "Acme Med Supplies".to_string(),
                phone: "9998887777".to_string(),
                license_number: "LIC-ACME-001".to_string(),
                address: Address::default(),
            })
            .await
            .unwrap();

        let order = system
            .order_client
            .place_order(
                pharmacy_id.clone(),
                Some(supplier_id.clone()),
                vec![OrderLine::new(med.id.clone(), 15)],
            )
            .await
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);

        let resolved = system
            .order_client
            .resolve_order(order.id.clone(), supplier_id.clone(), Decision::Accept, None)
            .await
            .unwrap();
        assert_eq!(resolved.status, OrderStatus::Confirmed);

        let fetched = system
            .order_client
            .get_order(order.id.clone())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.status, OrderStatus::Confirmed);

        let restocked: Medicine = system
            .inventory_client
            .get_medicine(med.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(restocked.stock_available, 115);

        let history = system
            .order_client
            .list_orders_for(supplier_id, PartyRole::Supplier)
            .await
            .unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, order.id);

        let mine = system
            .order_client
            .list_orders_for(pharmacy_id, PartyRole::Pharmacy)
            .await
            .unwrap();
        assert_eq!(mine.len(), 1);

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn party_patches_update_stored_records() {
        let system = PharmacySystem::new();

        let pharmacy_id = system
            .pharmacy_client
            .create_pharmacy(PharmacyCreate {
                name: "City Care Pharmacy".to_string(),
                phone: "8887776666".to_string(),
                address: Address::default(),
            })
            .await
            .unwrap();

        let supplier_id = system
            .supplier_client
            .create_supplier(SupplierCreate {
                name: "Acme Med Supplies".to_string(),
                phone: "9998887777".to_string(),
                license_number: "LIC-ACME-001".to_string(),
                address: Address::default(),
            })
            .await
            .unwrap();
        system
            .supplier_client
            .create_supplier(SupplierCreate {
                name: "Beta Pharma Dist".to_string(),
                phone: "9998887778".to_string(),
                license_number: "LIC-BETA-002".to_string(),
                address: Address::default(),
            })
            .await
            .unwrap();

        let new_address = Address {
            street: "12 Relief Road".to_string(),
            city: "MedCity".to_string(),
            state: "MH".to_string(),
            pincode: "400002".to_string(),
        };
        let updated = system
            .pharmacy_client
            .update_pharmacy(
                pharmacy_id.clone(),
                PharmacyPatch {
                    phone: Some("7776665555".to_string()),
                    address: Some(new_address.clone()),
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.phone, "7776665555");
        assert_eq!(updated.address, new_address);

        let stored = system
            .pharmacy_client
            .get_pharmacy(pharmacy_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.phone, "7776665555");
        assert_eq!(stored.address.city, "MedCity");

        let moved = Address {
            street: "9 Depot Lane".to_string(),
            city: "HealTown".to_string(),
            state: "DL".to_string(),
            pincode: "110002".to_string(),
        };
        let updated = system
            .supplier_client
            .update_supplier(
                supplier_id,
                SupplierPatch {
                    address: Some(moved.clone()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.address, moved);
        // A patch never touches identity fields.
        assert_eq!(updated.name, "Acme Med Supplies");
        assert_eq!(updated.license_number, "LIC-ACME-001");

        let suppliers = system.supplier_client.list_suppliers().await.unwrap();
        assert_eq!(suppliers.len(), 2);
        let pharmacies = system.pharmacy_client.list_pharmacies().await.unwrap();
        assert_eq!(pharmacies.len(), 1);
        assert_eq!(pharmacies[0].phone, "7776665555");

        let err = system
            .pharmacy_client
            .update_pharmacy("ph_404".to_string(), PharmacyPatch::default())
            .await
            .unwrap_err();
        assert_eq!(err, PharmacyError::NotFound("ph_404".to_string()));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn sales_decrement_stock_through_the_system() {
        let system = PharmacySystem::new();

        let med = system
            .inventory_client
            .create_medicine(medicine_payload("Amoxicillin 250mg", 60))
            .await
            .unwrap();

        let catalog = system.inventory_client.list_medicines().await.unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].id, med.id);

        system
            .inventory_client
            .record_sale(vec![OrderLine::new(med.id.clone(), 25)])
            .await
            .unwrap();

        let err = system
            .inventory_client
            .record_sale(vec![OrderLine::new(med.id.clone(), 40)])
            .await
            .unwrap_err();
        assert_eq!(
            err,
            InventoryError::InsufficientStock {
                id: med.id.clone(),
                requested: 40,
                available: 35,
            }
        );

        let remaining = system
            .inventory_client
            .get_medicine(med.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(remaining.stock_available, 35);

        system.shutdown().await.unwrap();
    }

    /// Client-side placement orchestration against mocks, verifying the
    /// pharmacy and supplier are looked up before the order is dispatched.
    #[tokio::test]
    async fn placement_validates_parties_before_dispatch() {
        let (order_client, mut order_rx, mut pharmacy_rx, mut supplier_rx) =
            create_mock_order_client(10);

        let place_task = tokio::spawn(async move {
            order_client
                .place_order(
                    "ph_1".to_string(),
                    Some("sup_1".to_string()),
                    vec![OrderLine::new("med_1", 5)],
                )
                .await
        });

        let (pharmacy_id, responder) = expect_get(&mut pharmacy_rx).await.expect("Expected pharmacy Get");
        assert_eq!(pharmacy_id, "ph_1");
        responder.send(Ok(Some(pharmacy("ph_1")))).unwrap();

        let (supplier_id, responder) = expect_get(&mut supplier_rx).await.expect("Expected supplier Get");
        assert_eq!(supplier_id, "sup_1");
        responder.send(Ok(Some(supplier("sup_1")))).unwrap();

        let (pharmacy_id, supplier_id, lines, responder) =
            expect_place_order(&mut order_rx).await.expect("Expected PlaceOrder");
        assert_eq!(pharmacy_id, "ph_1");
        assert_eq!(supplier_id.as_deref(), Some("sup_1"));
        assert_eq!(lines, vec![OrderLine::new("med_1", 5)]);
        responder
            .send(Err(OrderError::UnknownMedicine("med_1".to_string())))
            .unwrap();

        let result = place_task.await.unwrap();
        assert_eq!(result, Err(OrderError::UnknownMedicine("med_1".to_string())));
    }

    #[tokio::test]
    async fn placement_stops_at_unknown_pharmacy() {
        let (order_client, _order_rx, mut pharmacy_rx, _supplier_rx) =
            create_mock_order_client(10);

        let place_task = tokio::spawn(async move {
            order_client
                .place_order("ph_404".to_string(), None, vec![OrderLine::new("med_1", 1)])
                .await
        });

        let (pharmacy_id, responder) = expect_get(&mut pharmacy_rx).await.expect("Expected pharmacy Get");
        assert_eq!(pharmacy_id, "ph_404");
        responder.send(Ok(None)).unwrap();

        let result = place_task.await.unwrap();
        assert_eq!(result, Err(OrderError::InvalidPharmacy("ph_404".to_string())));
    }

    /// Lifecycle service against a mock inventory: accept issues exactly one
    /// batch restock, and the second resolve never reaches the inventory.
    #[tokio::test]
    async fn accept_issues_one_restock_batch() {
        let (inventory_client, mut inventory_rx) = create_mock_inventory(10);
        let (pharmacy_inner, mut pharmacy_rx) = create_mock_client::<Pharmacy>(10);
        let (supplier_inner, mut supplier_rx) = create_mock_client::<Supplier>(10);

        let (service, order_client) = OrderService::new(
            10,
            inventory_client,
            PharmacyClient::new(pharmacy_inner),
            SupplierClient::new(supplier_inner),
        );
        tokio::spawn(service.run());

        // Placement: party lookups, then line verification in the service.
        let placing = {
            let order_client = order_client.clone();
            tokio::spawn(async move {
                order_client
                    .place_order(
                        "ph_1".to_string(),
                        Some("sup_1".to_string()),
                        vec![OrderLine::new("med_1", 15)],
                    )
                    .await
            })
        };

        let (_, responder) = expect_get(&mut pharmacy_rx).await.expect("Expected pharmacy Get");
        responder.send(Ok(Some(pharmacy("ph_1")))).unwrap();
        let (_, responder) = expect_get(&mut supplier_rx).await.expect("Expected supplier Get");
        responder.send(Ok(Some(supplier("sup_1")))).unwrap();

        let (ids, responder) = expect_verify_medicines(&mut inventory_rx)
            .await
            .expect("Expected VerifyMedicines");
        assert_eq!(ids, vec!["med_1".to_string()]);
        responder.send(Ok(())).unwrap();

        let order = placing.await.unwrap().unwrap();
        assert_eq!(order.status, OrderStatus::Pending);

        // Accept: exactly one restock with the order's lines.
        let resolving = {
            let order_client = order_client.clone();
            let order_id = order.id.clone();
            tokio::spawn(async move {
                order_client
                    .resolve_order(order_id, "sup_1".to_string(), Decision::Accept, None)
                    .await
            })
        };

        let (lines, responder) = expect_restock(&mut inventory_rx).await.expect("Expected Restock");
        assert_eq!(lines, vec![OrderLine::new("med_1", 15)]);
        responder.send(Ok(())).unwrap();

        let resolved = resolving.await.unwrap().unwrap();
        assert_eq!(resolved.status, OrderStatus::Confirmed);

        // A second accept fails before any inventory traffic.
        let err = order_client
            .resolve_order(order.id, "sup_1".to_string(), Decision::Accept, None)
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::AlreadyResolved { .. }));
        assert!(inventory_rx.try_recv().is_err());
    }
}
