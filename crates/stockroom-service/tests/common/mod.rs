//! In-memory store doubles shared by the service tests.
//!
//! They implement the same consistency rules the real repositories do,
//! including the conditional lent-counter increment, so the service-level
//! guarantees can be exercised without a database.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use stockroom_core::AppResult;
use stockroom_core::error::AppError;
use stockroom_entity::borrow::{
    BorrowLine, BorrowLineDetail, BorrowLineInput, BorrowRecord, BorrowRecordDetail, BorrowStatus,
    Borrower, NewBorrower,
};
use stockroom_entity::item::{CreateItem, Item, UpdateItem};
use stockroom_entity::session::{Role, Session};
use stockroom_entity::store::{CatalogStore, LedgerStore, UserStore};
use stockroom_entity::user::User;

/// In-memory catalog with the same conditional counter semantics as the
/// SQL repository.
#[derive(Default)]
pub struct MemoryCatalog {
    items: Mutex<Vec<Item>>,
}

impl MemoryCatalog {
    fn snapshot(&self) -> Vec<Item> {
        self.items.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
    async fn list_active(&self) -> AppResult<Vec<Item>> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().rev().filter(|i| i.is_active).cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Item>> {
        let items = self.items.lock().unwrap();
        Ok(items.iter().find(|i| i.id == id).cloned())
    }

    async fn find_by_code(&self, code: &str) -> AppResult<Option<Item>> {
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .find(|i| i.is_active && i.code.eq_ignore_ascii_case(code))
            .cloned())
    }

    async fn search(&self, query: &str) -> AppResult<Vec<Item>> {
        let needle = query.to_lowercase();
        let matches = |field: &Option<String>| {
            field
                .as_deref()
                .is_some_and(|v| v.to_lowercase().contains(&needle))
        };
        let items = self.items.lock().unwrap();
        Ok(items
            .iter()
            .rev()
            .filter(|i| {
                i.is_active
                    && (i.code.to_lowercase().contains(&needle)
                        || i.name.to_lowercase().contains(&needle)
                        || matches(&i.model)
                        || matches(&i.location))
            })
            .cloned()
            .collect())
    }

    async fn create(&self, item: &CreateItem) -> AppResult<Item> {
        let mut items = self.items.lock().unwrap();
        if items.iter().any(|i| i.code.eq_ignore_ascii_case(&item.code)) {
            return Err(AppError::conflict(format!(
                "Item code '{}' already exists",
                item.code
            )));
        }
        let now = Utc::now();
        let created = Item {
            id: Uuid::new_v4(),
            code: item.code.clone(),
            name: item.name.clone(),
            model: item.model.clone(),
            color_code: item.color_code.clone(),
            season: item.season.clone(),
            location: item.location.clone(),
            max_quantity: item.effective_max_quantity(),
            lent_quantity: 0,
            image_url: item.image_url.clone(),
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        items.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: Uuid, fields: &UpdateItem) -> AppResult<Item> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| AppError::not_found("Item not found"))?;
        item.code = fields.code.clone();
        item.name = fields.name.clone();
        item.model = fields.model.clone();
        item.color_code = fields.color_code.clone();
        item.season = fields.season.clone();
        item.location = fields.location.clone();
        item.max_quantity = fields.effective_max_quantity();
        item.image_url = fields.image_url.clone();
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    async fn deactivate(&self, id: Uuid) -> AppResult<()> {
        let mut items = self.items.lock().unwrap();
        if let Some(item) = items.iter_mut().find(|i| i.id == id) {
            item.is_active = false;
            item.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn increment_lent(&self, item_id: Uuid, amount: i32) -> AppResult<()> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::not_found("Item not found"))?;
        if item.lent_quantity + amount > item.max_quantity {
            return Err(AppError::insufficient_stock(format!(
                "Only {} unit(s) of '{}' remain",
                item.available_quantity(),
                item.code
            )));
        }
        item.lent_quantity += amount;
        Ok(())
    }

    async fn decrement_lent(&self, item_id: Uuid, amount: i32) -> AppResult<()> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::not_found("Item not found"))?;
        item.lent_quantity = (item.lent_quantity - amount).max(0);
        Ok(())
    }
}

/// In-memory borrow ledger. Holds the catalog so `list_details` can join
/// item fields the way the SQL repository does.
pub struct MemoryLedger {
    catalog: Arc<MemoryCatalog>,
    borrowers: Mutex<HashMap<Uuid, Borrower>>,
    records: Mutex<Vec<BorrowRecord>>,
    lines: Mutex<Vec<BorrowLine>>,
}

impl MemoryLedger {
    pub fn new(catalog: Arc<MemoryCatalog>) -> Self {
        Self {
            catalog,
            borrowers: Mutex::new(HashMap::new()),
            records: Mutex::new(Vec::new()),
            lines: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LedgerStore for MemoryLedger {
    async fn insert_borrower(&self, borrower: &NewBorrower) -> AppResult<Borrower> {
        let created = Borrower {
            id: Uuid::new_v4(),
            fullname: borrower.fullname.clone(),
            department: borrower.department.clone(),
            phone: borrower.phone.clone(),
            email: borrower.email.clone(),
            created_at: Utc::now(),
        };
        self.borrowers
            .lock()
            .unwrap()
            .insert(created.id, created.clone());
        Ok(created)
    }

    async fn insert_record(
        &self,
        borrower_id: Uuid,
        borrow_date: NaiveDate,
    ) -> AppResult<BorrowRecord> {
        let record = BorrowRecord {
            id: Uuid::new_v4(),
            borrower_id,
            borrow_date,
            actual_return_date: None,
            status: BorrowStatus::Lent,
            created_at: Utc::now(),
        };
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn insert_lines(&self, record_id: Uuid, lines: &[BorrowLineInput]) -> AppResult<()> {
        let mut stored = self.lines.lock().unwrap();
        for line in lines {
            stored.push(BorrowLine {
                id: Uuid::new_v4(),
                borrow_record_id: record_id,
                item_id: line.item_id,
                quantity: line.quantity,
            });
        }
        Ok(())
    }

    async fn find_record(&self, id: Uuid) -> AppResult<Option<BorrowRecord>> {
        let records = self.records.lock().unwrap();
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn find_record_borrower(&self, record_id: Uuid) -> AppResult<Option<Borrower>> {
        let records = self.records.lock().unwrap();
        let Some(record) = records.iter().find(|r| r.id == record_id) else {
            return Ok(None);
        };
        let borrowers = self.borrowers.lock().unwrap();
        Ok(borrowers.get(&record.borrower_id).cloned())
    }

    async fn find_lines(&self, record_id: Uuid) -> AppResult<Vec<BorrowLine>> {
        let lines = self.lines.lock().unwrap();
        Ok(lines
            .iter()
            .filter(|l| l.borrow_record_id == record_id)
            .cloned()
            .collect())
    }

    async fn list_details(&self) -> AppResult<Vec<BorrowRecordDetail>> {
        let records = self.records.lock().unwrap().clone();
        let borrowers = self.borrowers.lock().unwrap().clone();
        let lines = self.lines.lock().unwrap().clone();
        let items = self.catalog.snapshot();

        let mut details = Vec::new();
        // Deactivated items still resolve; history stays readable.
        for record in records.iter().rev() {
            let borrower = borrowers
                .get(&record.borrower_id)
                .cloned()
                .ok_or_else(|| AppError::internal("Record without borrower"))?;
            let record_lines = lines
                .iter()
                .filter(|l| l.borrow_record_id == record.id)
                .map(|l| {
                    let item = items
                        .iter()
                        .find(|i| i.id == l.item_id)
                        .ok_or_else(|| AppError::internal("Line without item"))?;
                    Ok(BorrowLineDetail {
                        item_id: item.id,
                        code: item.code.clone(),
                        name: item.name.clone(),
                        model: item.model.clone(),
                        location: item.location.clone(),
                        image_url: item.image_url.clone(),
                        quantity: l.quantity,
                    })
                })
                .collect::<AppResult<Vec<_>>>()?;
            details.push(BorrowRecordDetail {
                id: record.id,
                borrower,
                lines: record_lines,
                borrow_date: record.borrow_date,
                actual_return_date: record.actual_return_date,
                status: record.status,
            });
        }
        Ok(details)
    }

    async fn mark_returned(&self, record_id: Uuid, returned_on: NaiveDate) -> AppResult<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| AppError::not_found("Borrow record not found"))?;
        record.status = BorrowStatus::Returned;
        record.actual_return_date = Some(returned_on);
        Ok(())
    }
}

/// In-memory user store with case-insensitive unique usernames.
#[derive(Default)]
pub struct MemoryUsers {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserStore for MemoryUsers {
    async fn list(&self) -> AppResult<Vec<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_username(&self, username: &str) -> AppResult<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users
            .iter()
            .find(|u| u.username.eq_ignore_ascii_case(username))
            .cloned())
    }

    async fn create(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }
        users.push(user.clone());
        Ok(user.clone())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        if users
            .iter()
            .any(|u| u.id != user.id && u.username.eq_ignore_ascii_case(&user.username))
        {
            return Err(AppError::conflict(format!(
                "Username '{}' already exists",
                user.username
            )));
        }
        let stored = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        *stored = user.clone();
        Ok(user.clone())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| AppError::not_found("User not found"))?;
        user.is_active = active;
        user.updated_at = Utc::now();
        Ok(user.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

pub fn admin_session() -> Session {
    Session {
        user_id: None,
        username: "admin".to_string(),
        fullname: "Administrator".to_string(),
        department: None,
        phone: None,
        email: None,
        role: Role::Admin,
        started_at: Utc::now(),
    }
}

pub fn borrower_session() -> Session {
    Session {
        user_id: Some(Uuid::new_v4()),
        username: "somchai".to_string(),
        fullname: "Somchai J.".to_string(),
        department: Some("QA".to_string()),
        phone: Some("081-234-5678".to_string()),
        email: None,
        role: Role::Borrower,
        started_at: Utc::now(),
    }
}

pub fn new_item(code: &str, name: &str, max_quantity: i32) -> CreateItem {
    CreateItem {
        code: code.to_string(),
        name: name.to_string(),
        model: None,
        color_code: None,
        season: None,
        location: None,
        max_quantity: Some(max_quantity),
        image_url: None,
    }
}

pub fn new_borrower(phone: &str) -> NewBorrower {
    NewBorrower {
        fullname: "Somchai J.".to_string(),
        department: "QA".to_string(),
        phone: phone.to_string(),
        email: None,
    }
}
