//! Phone-verified return flow.

mod common;

use std::sync::Arc;

use stockroom_core::error::ErrorKind;
use stockroom_entity::borrow::BorrowLineInput;
use stockroom_service::borrow::{BorrowRequest, BorrowService};
use stockroom_service::catalog::CatalogService;
use stockroom_service::returns::ReturnService;
use uuid::Uuid;

use common::{MemoryCatalog, MemoryLedger, admin_session, new_borrower, new_item};

struct Harness {
    catalog_svc: CatalogService,
    borrow_svc: Arc<BorrowService>,
    return_svc: ReturnService,
}

fn harness() -> Harness {
    let catalog = Arc::new(MemoryCatalog::default());
    let ledger = Arc::new(MemoryLedger::new(Arc::clone(&catalog)));
    let borrow_svc = Arc::new(BorrowService::new(ledger.clone(), catalog.clone()));
    Harness {
        catalog_svc: CatalogService::new(catalog),
        return_svc: ReturnService::new(ledger, borrow_svc.clone()),
        borrow_svc,
    }
}

/// Borrows two units of a fresh item under the given phone number and
/// returns the record id.
async fn borrow_with_phone(h: &Harness, phone: &str) -> Uuid {
    let item = h
        .catalog_svc
        .create_item(&admin_session(), new_item("SKU001", "Safety boots", 10))
        .await
        .unwrap();
    let record = h
        .borrow_svc
        .create_borrow_record(BorrowRequest {
            borrower: new_borrower(phone),
            lines: vec![BorrowLineInput {
                item_id: item.id,
                quantity: 2,
            }],
        })
        .await
        .unwrap();
    record.id
}

#[tokio::test]
async fn test_formatting_differences_do_not_block_return() {
    let h = harness();
    let record_id = borrow_with_phone(&h, "081-234-5678").await;

    h.return_svc
        .verify_and_return(record_id, "0812345678")
        .await
        .unwrap();

    let after = h.catalog_svc.find_by_code("SKU001").await.unwrap();
    assert_eq!(after.lent_quantity, 0);
}

#[tokio::test]
async fn test_wrong_phone_is_rejected() {
    let h = harness();
    let record_id = borrow_with_phone(&h, "081-234-5678").await;

    let err = h
        .return_svc
        .verify_and_return(record_id, "0899999999")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::PhoneMismatch);

    // Nothing released on a failed verification.
    let after = h.catalog_svc.find_by_code("SKU001").await.unwrap();
    assert_eq!(after.lent_quantity, 2);
}

#[tokio::test]
async fn test_empty_phone_is_rejected() {
    let h = harness();
    let record_id = borrow_with_phone(&h, "081-234-5678").await;

    let err = h
        .return_svc
        .verify_and_return(record_id, " --- ")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::EmptyInput);
}

#[tokio::test]
async fn test_unknown_record_is_rejected() {
    let h = harness();
    let err = h
        .return_svc
        .verify_and_return(Uuid::new_v4(), "0812345678")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn test_second_verified_return_conflicts() {
    let h = harness();
    let record_id = borrow_with_phone(&h, "081-234-5678").await;

    h.return_svc
        .verify_and_return(record_id, "0812345678")
        .await
        .unwrap();
    let err = h
        .return_svc
        .verify_and_return(record_id, "0812345678")
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let after = h.catalog_svc.find_by_code("SKU001").await.unwrap();
    assert_eq!(after.lent_quantity, 0);
}
