//! Return verification: the borrower's phone number acts as the shared
//! secret gating a return.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use stockroom_core::AppResult;
use stockroom_core::error::AppError;
use stockroom_entity::store::LedgerStore;

use crate::borrow::BorrowService;

/// Verifies a caller-supplied phone number against a record's borrower
/// before delegating to the return sequence.
#[derive(Clone)]
pub struct ReturnService {
    /// Ledger persistence, for the borrower lookup.
    ledger: Arc<dyn LedgerStore>,
    /// The return sequence itself.
    borrows: Arc<BorrowService>,
}

impl ReturnService {
    /// Creates a new return service.
    pub fn new(ledger: Arc<dyn LedgerStore>, borrows: Arc<BorrowService>) -> Self {
        Self { ledger, borrows }
    }

    /// Returns a record after checking the supplied phone number against
    /// the one stored with the borrower.
    ///
    /// Both numbers are compared digits-only, so "081-234-5678" matches
    /// "0812345678".
    pub async fn verify_and_return(&self, record_id: Uuid, phone: &str) -> AppResult<()> {
        let borrower = self
            .ledger
            .find_record_borrower(record_id)
            .await?
            .ok_or_else(|| AppError::not_found("Borrow record not found"))?;

        let supplied = normalize_phone(phone);
        let stored = normalize_phone(&borrower.phone);

        if supplied.is_empty() {
            return Err(AppError::empty_input("Phone number must not be empty"));
        }
        if supplied != stored {
            return Err(AppError::phone_mismatch(
                "Phone number does not match this record's borrower",
            ));
        }

        self.borrows.return_items(record_id).await?;
        info!(record_id = %record_id, "Phone-verified return completed");
        Ok(())
    }
}

/// Strips everything but ASCII digits, so formatting differences (dashes,
/// spaces, dots) never block a legitimate return.
fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_formatting() {
        assert_eq!(normalize_phone("081-234-5678"), "0812345678");
        assert_eq!(normalize_phone("081 234 5678"), "0812345678");
        assert_eq!(normalize_phone("(081) 234.5678"), "0812345678");
    }

    #[test]
    fn test_normalize_empty_after_stripping() {
        assert_eq!(normalize_phone("---"), "");
        assert_eq!(normalize_phone(""), "");
    }
}
