//! Borrow submission and return sequencing against the ledger.
//!
//! A borrow touches two stores: the ledger rows are written first, then
//! the catalog's `lent_quantity` counters move. There is no transaction
//! spanning the two; a counter step that fails mid-sequence leaves the
//! earlier writes in place and surfaces the error (see `DESIGN.md`).

use std::collections::HashSet;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use stockroom_core::AppResult;
use stockroom_core::error::AppError;
use stockroom_entity::borrow::{BorrowLineInput, BorrowRecord, BorrowRecordDetail, NewBorrower};
use stockroom_entity::store::{CatalogStore, LedgerStore};

/// A borrow submission: who is borrowing, and what.
#[derive(Debug, Clone)]
pub struct BorrowRequest {
    /// Borrower details, typed in or auto-filled from the session.
    pub borrower: NewBorrower,
    /// The requested (item, quantity) lines.
    pub lines: Vec<BorrowLineInput>,
}

/// Manages the borrow ledger.
#[derive(Clone)]
pub struct BorrowService {
    /// Ledger persistence.
    ledger: Arc<dyn LedgerStore>,
    /// Catalog persistence, for the lent-quantity counters.
    catalog: Arc<dyn CatalogStore>,
}

impl BorrowService {
    /// Creates a new borrow service.
    pub fn new(ledger: Arc<dyn LedgerStore>, catalog: Arc<dyn CatalogStore>) -> Self {
        Self { ledger, catalog }
    }

    /// Submits a borrow: validates the request, writes the borrower,
    /// record, and lines, then moves each item's lent counter.
    ///
    /// The counter move is conditional at the store level, so a concurrent
    /// submission racing for the last units fails here with
    /// `InsufficientStock` rather than overshooting `max_quantity`.
    pub async fn create_borrow_record(&self, request: BorrowRequest) -> AppResult<BorrowRecord> {
        Self::validate_borrower(&request.borrower)?;
        self.validate_lines(&request.lines).await?;

        let borrower = self.ledger.insert_borrower(&request.borrower).await?;
        let record = self
            .ledger
            .insert_record(borrower.id, Utc::now().date_naive())
            .await?;
        self.ledger.insert_lines(record.id, &request.lines).await?;

        for line in &request.lines {
            if let Err(e) = self.catalog.increment_lent(line.item_id, line.quantity).await {
                warn!(
                    record_id = %record.id,
                    item_id = %line.item_id,
                    error = %e,
                    "Inventory counter update failed after ledger write; record kept"
                );
                return Err(e);
            }
        }

        info!(
            record_id = %record.id,
            borrower = %borrower.fullname,
            lines = request.lines.len(),
            "Borrow record created"
        );
        Ok(record)
    }

    /// All borrow records with borrower and lines joined, newest first.
    pub async fn list_records(&self) -> AppResult<Vec<BorrowRecordDetail>> {
        self.ledger.list_details().await
    }

    /// Records still out.
    pub async fn borrowed(&self) -> AppResult<Vec<BorrowRecordDetail>> {
        let records = self.ledger.list_details().await?;
        Ok(records.into_iter().filter(|r| !r.is_returned()).collect())
    }

    /// Records already returned.
    pub async fn returned(&self) -> AppResult<Vec<BorrowRecordDetail>> {
        let records = self.ledger.list_details().await?;
        Ok(records.into_iter().filter(|r| r.is_returned()).collect())
    }

    /// Marks a record returned and releases its units back to the catalog.
    ///
    /// Returning an already-returned record fails with `Conflict` before
    /// any counter moves, so a double submission never double-releases.
    pub async fn return_items(&self, record_id: Uuid) -> AppResult<()> {
        let record = self
            .ledger
            .find_record(record_id)
            .await?
            .ok_or_else(|| AppError::not_found("Borrow record not found"))?;

        if record.is_returned() {
            return Err(AppError::conflict("This record has already been returned"));
        }

        // Read the lines before flipping the status; a failure here leaves
        // the record untouched and fully retryable.
        let lines = self.ledger.find_lines(record_id).await?;

        self.ledger
            .mark_returned(record_id, Utc::now().date_naive())
            .await?;

        for line in &lines {
            if let Err(e) = self.catalog.decrement_lent(line.item_id, line.quantity).await {
                warn!(
                    record_id = %record_id,
                    item_id = %line.item_id,
                    error = %e,
                    "Inventory release failed after record marked returned"
                );
                return Err(AppError::return_failed(format!(
                    "Return recorded but inventory release failed: {e}"
                )));
            }
        }

        info!(record_id = %record_id, lines = lines.len(), "Borrow record returned");
        Ok(())
    }

    fn validate_borrower(borrower: &NewBorrower) -> AppResult<()> {
        if borrower.fullname.trim().is_empty() {
            return Err(AppError::validation("Borrower name is required"));
        }
        if borrower.department.trim().is_empty() {
            return Err(AppError::validation("Department is required"));
        }
        if borrower.phone.trim().is_empty() {
            return Err(AppError::validation("Phone number is required"));
        }
        Ok(())
    }

    async fn validate_lines(&self, lines: &[BorrowLineInput]) -> AppResult<()> {
        if lines.is_empty() {
            return Err(AppError::validation("At least one item is required"));
        }

        let mut seen = HashSet::new();
        for line in lines {
            if line.quantity < 1 {
                return Err(AppError::validation("Quantity must be at least 1"));
            }
            if !seen.insert(line.item_id) {
                return Err(AppError::validation(
                    "The same item appears more than once",
                ));
            }

            let item = self
                .catalog
                .find_by_id(line.item_id)
                .await?
                .ok_or_else(|| AppError::not_found("Item not found"))?;

            if !item.is_active {
                return Err(AppError::validation(format!(
                    "Item '{}' is no longer available",
                    item.code
                )));
            }
            if item.available_quantity() < line.quantity {
                return Err(AppError::insufficient_stock(format!(
                    "Only {} unit(s) of '{}' available",
                    item.available_quantity(),
                    item.code
                )));
            }
        }
        Ok(())
    }
}
