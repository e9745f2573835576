//! Borrow ledger repository implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use stockroom_core::error::{AppError, ErrorKind};
use stockroom_core::result::AppResult;
use stockroom_entity::borrow::{
    BorrowLine, BorrowLineDetail, BorrowLineInput, BorrowRecord, BorrowRecordDetail, BorrowStatus,
    Borrower, NewBorrower,
};
use stockroom_entity::store::LedgerStore;

/// Repository for borrowers, borrow records, and borrow lines.
#[derive(Debug, Clone)]
pub struct BorrowRepository {
    pool: PgPool,
}

impl BorrowRepository {
    /// Create a new borrow repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Row shape for the line-with-item join used by `list_details`.
#[derive(Debug, sqlx::FromRow)]
struct LineDetailRow {
    borrow_record_id: Uuid,
    item_id: Uuid,
    code: String,
    name: String,
    model: Option<String>,
    location: Option<String>,
    image_url: Option<String>,
    quantity: i32,
}

impl From<LineDetailRow> for BorrowLineDetail {
    fn from(row: LineDetailRow) -> Self {
        Self {
            item_id: row.item_id,
            code: row.code,
            name: row.name,
            model: row.model,
            location: row.location,
            image_url: row.image_url,
            quantity: row.quantity,
        }
    }
}

#[async_trait]
impl LedgerStore for BorrowRepository {
    async fn insert_borrower(&self, borrower: &NewBorrower) -> AppResult<Borrower> {
        sqlx::query_as::<_, Borrower>(
            "INSERT INTO borrowers (fullname, department, phone, email) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&borrower.fullname)
        .bind(&borrower.department)
        .bind(&borrower.phone)
        .bind(&borrower.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to create borrower", e)
        })
    }

    async fn insert_record(
        &self,
        borrower_id: Uuid,
        borrow_date: NaiveDate,
    ) -> AppResult<BorrowRecord> {
        sqlx::query_as::<_, BorrowRecord>(
            "INSERT INTO borrow_records (borrower_id, borrow_date, status) \
             VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(borrower_id)
        .bind(borrow_date)
        .bind(BorrowStatus::Lent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                "Failed to create borrow record",
                e,
            )
        })
    }

    async fn insert_lines(&self, record_id: Uuid, lines: &[BorrowLineInput]) -> AppResult<()> {
        for line in lines {
            sqlx::query(
                "INSERT INTO borrow_lines (borrow_record_id, item_id, quantity) \
                 VALUES ($1, $2, $3)",
            )
            .bind(record_id)
            .bind(line.item_id)
            .bind(line.quantity)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::StoreUnavailable,
                    "Failed to create borrow line",
                    e,
                )
            })?;
        }
        Ok(())
    }

    async fn find_record(&self, id: Uuid) -> AppResult<Option<BorrowRecord>> {
        sqlx::query_as::<_, BorrowRecord>("SELECT * FROM borrow_records WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::StoreUnavailable,
                    "Failed to find borrow record",
                    e,
                )
            })
    }

    async fn find_record_borrower(&self, record_id: Uuid) -> AppResult<Option<Borrower>> {
        sqlx::query_as::<_, Borrower>(
            "SELECT b.* FROM borrowers b \
             JOIN borrow_records r ON r.borrower_id = b.id \
             WHERE r.id = $1",
        )
        .bind(record_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                "Failed to find record borrower",
                e,
            )
        })
    }

    async fn find_lines(&self, record_id: Uuid) -> AppResult<Vec<BorrowLine>> {
        sqlx::query_as::<_, BorrowLine>(
            "SELECT * FROM borrow_lines WHERE borrow_record_id = $1 ORDER BY id",
        )
        .bind(record_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to find borrow lines", e)
        })
    }

    async fn list_details(&self) -> AppResult<Vec<BorrowRecordDetail>> {
        let records = sqlx::query_as::<_, BorrowRecord>(
            "SELECT * FROM borrow_records ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                "Failed to list borrow records",
                e,
            )
        })?;

        let borrowers = sqlx::query_as::<_, Borrower>("SELECT * FROM borrowers")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::StoreUnavailable, "Failed to list borrowers", e)
            })?;
        let mut borrowers: HashMap<Uuid, Borrower> =
            borrowers.into_iter().map(|b| (b.id, b)).collect();

        // Deliberately no is_active filter: history referencing deactivated
        // items must keep resolving.
        let line_rows = sqlx::query_as::<_, LineDetailRow>(
            "SELECT bl.borrow_record_id, bl.item_id, i.code, i.name, i.model, \
                    i.location, i.image_url, bl.quantity \
             FROM borrow_lines bl \
             JOIN items i ON i.id = bl.item_id \
             ORDER BY bl.id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::StoreUnavailable, "Failed to list borrow lines", e)
        })?;

        let mut lines_by_record: HashMap<Uuid, Vec<BorrowLineDetail>> = HashMap::new();
        for row in line_rows {
            lines_by_record
                .entry(row.borrow_record_id)
                .or_default()
                .push(row.into());
        }

        let mut details = Vec::with_capacity(records.len());
        for record in records {
            let borrower = borrowers.remove(&record.borrower_id).ok_or_else(|| {
                AppError::not_found(format!(
                    "Borrower {} of record {} not found",
                    record.borrower_id, record.id
                ))
            })?;
            details.push(BorrowRecordDetail {
                id: record.id,
                borrower,
                lines: lines_by_record.remove(&record.id).unwrap_or_default(),
                borrow_date: record.borrow_date,
                actual_return_date: record.actual_return_date,
                status: record.status,
            });
        }
        Ok(details)
    }

    async fn mark_returned(&self, record_id: Uuid, returned_on: NaiveDate) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE borrow_records SET status = $2, actual_return_date = $3 WHERE id = $1",
        )
        .bind(record_id)
        .bind(BorrowStatus::Returned)
        .bind(returned_on)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                "Failed to mark record returned",
                e,
            )
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Borrow record {record_id} not found"
            )));
        }
        Ok(())
    }
}
