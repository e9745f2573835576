//! Borrow record status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of a borrow record.
///
/// A two-state machine: records start `Lent` and transition one-way to
/// `Returned` when the items come back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "borrow_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BorrowStatus {
    /// Items are out with the borrower.
    Lent,
    /// Items have been returned. Terminal.
    Returned,
}

impl BorrowStatus {
    /// Return the status as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lent => "lent",
            Self::Returned => "returned",
        }
    }
}

impl fmt::Display for BorrowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BorrowStatus {
    type Err = stockroom_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lent" => Ok(Self::Lent),
            "returned" => Ok(Self::Returned),
            _ => Err(stockroom_core::AppError::validation(format!(
                "Invalid borrow status: '{s}'. Expected one of: lent, returned"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("lent".parse::<BorrowStatus>().unwrap(), BorrowStatus::Lent);
        assert_eq!(
            "RETURNED".parse::<BorrowStatus>().unwrap(),
            BorrowStatus::Returned
        );
        assert!("pending".parse::<BorrowStatus>().is_err());
    }
}
