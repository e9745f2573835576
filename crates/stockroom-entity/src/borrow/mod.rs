//! Borrow ledger entities: borrower profiles, borrow records, and lines.

pub mod borrower;
pub mod line;
pub mod model;
pub mod status;

pub use borrower::{Borrower, NewBorrower};
pub use line::{BorrowLine, BorrowLineInput};
pub use model::{BorrowLineDetail, BorrowRecord, BorrowRecordDetail};
pub use status::BorrowStatus;
