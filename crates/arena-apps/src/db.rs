//! Generic database app
//!
//! Manages keyed entries with contact-style fields. Identifiers are
//! caller-supplied; creating with an existing id overwrites (last write
//! wins). Partial updates touch only the supplied fields and advance
//! `updated_at`.

use crate::app::App;
use crate::error::AppError;
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub(crate) const APP_NAME: &str = "DbApp";

/// One database entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DbEntry {
    pub entry_id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbEntry {
    /// Create an entry with empty fields and current timestamps
    #[must_use]
    pub fn new(entry_id: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            entry_id: entry_id.into(),
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    #[must_use]
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    #[must_use]
    pub fn with_location(
        mut self,
        city: impl Into<String>,
        state: impl Into<String>,
        zip_code: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        self.city = city.into();
        self.state = state.into();
        self.zip_code = zip_code.into();
        self.country = country.into();
        self
    }
}

/// Partial update for a database entry; `None` fields are preserved
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbEntryPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub country: Option<String>,
}

impl DbEntryPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    #[must_use]
    pub fn phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }

    #[must_use]
    pub fn address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }
}

/// In-memory database app
#[derive(Debug, Default)]
pub struct DbApp {
    data: IndexMap<String, DbEntry>,
}

impl DbApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new entry; an existing id is overwritten (last write wins)
    pub fn create_db_entry(&mut self, entry: DbEntry) -> String {
        let id = entry.entry_id.clone();
        self.data.insert(id.clone(), entry);
        id
    }

    /// Get an entry by id
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn get_db_entry(&self, entry_id: &str) -> Result<DbEntry, AppError> {
        self.data
            .get(entry_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(APP_NAME, entry_id))
    }

    /// Update the supplied fields of an entry; omitted fields keep their
    /// values and `updated_at` strictly advances.
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn update_db_entry(
        &mut self,
        entry_id: &str,
        patch: DbEntryPatch,
    ) -> Result<String, AppError> {
        let entry = self
            .data
            .get_mut(entry_id)
            .ok_or_else(|| AppError::not_found(APP_NAME, entry_id))?;

        if let Some(name) = patch.name {
            entry.name = name;
        }
        if let Some(email) = patch.email {
            entry.email = email;
        }
        if let Some(phone) = patch.phone {
            entry.phone = phone;
        }
        if let Some(address) = patch.address {
            entry.address = address;
        }
        if let Some(city) = patch.city {
            entry.city = city;
        }
        if let Some(state) = patch.state {
            entry.state = state;
        }
        if let Some(zip_code) = patch.zip_code {
            entry.zip_code = zip_code;
        }
        if let Some(country) = patch.country {
            entry.country = country;
        }

        // Strictly monotone even when the wall clock is coarser than two
        // consecutive updates.
        entry.updated_at = Utc::now().max(entry.updated_at + Duration::milliseconds(1));
        Ok(entry_id.to_string())
    }

    /// Delete an entry by id
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn delete_db_entry(&mut self, entry_id: &str) -> Result<String, AppError> {
        self.data
            .shift_remove(entry_id)
            .map(|e| e.entry_id)
            .ok_or_else(|| AppError::not_found(APP_NAME, entry_id))
    }

    /// All entries in insertion order
    #[must_use]
    pub fn get_all_db_entries(&self) -> Vec<DbEntry> {
        self.data.values().cloned().collect()
    }
}

impl App for DbApp {
    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn reset(&mut self) {
        self.data.clear();
    }

    fn state(&self) -> Value {
        serde_json::to_value(&self.data).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample(id: &str, name: &str) -> DbEntry {
        DbEntry::new(id, name)
            .with_email(format!("{name}@example.com"))
            .with_phone("1234567890")
            .with_location("Anytown", "CA", "12345", "USA")
    }

    #[test]
    fn create_then_get_round_trips() {
        let mut db = DbApp::new();
        let id = db.create_db_entry(sample("1", "John Doe"));

        let entry = db.get_db_entry(&id).unwrap();
        assert_eq!(entry.name, "John Doe");
        assert_eq!(entry.email, "John Doe@example.com");
    }

    #[test]
    fn get_unknown_fails_not_found() {
        let db = DbApp::new();
        assert_eq!(
            db.get_db_entry("missing"),
            Err(AppError::not_found("DbApp", "missing"))
        );
    }

    #[test]
    fn duplicate_create_overwrites() {
        let mut db = DbApp::new();
        db.create_db_entry(sample("1", "John Doe"));
        db.create_db_entry(sample("1", "Jane Doe"));

        assert_eq!(db.get_all_db_entries().len(), 1);
        assert_eq!(db.get_db_entry("1").unwrap().name, "Jane Doe");
    }

    #[test]
    fn partial_update_preserves_omitted_fields() {
        let mut db = DbApp::new();
        db.create_db_entry(sample("1", "John Doe"));
        let before = db.get_db_entry("1").unwrap();

        db.update_db_entry("1", DbEntryPatch::new().phone("5550001111"))
            .unwrap();

        let after = db.get_db_entry("1").unwrap();
        assert_eq!(after.phone, "5550001111");
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn updated_at_advances_monotonically() {
        let mut db = DbApp::new();
        db.create_db_entry(sample("1", "John Doe"));

        let mut last = db.get_db_entry("1").unwrap().updated_at;
        for _ in 0..3 {
            db.update_db_entry("1", DbEntryPatch::new().name("John Doe"))
                .unwrap();
            let now = db.get_db_entry("1").unwrap().updated_at;
            assert!(now > last);
            last = now;
        }
    }

    #[test]
    fn delete_then_get_fails() {
        let mut db = DbApp::new();
        db.create_db_entry(sample("1", "John Doe"));

        assert_eq!(db.delete_db_entry("1").unwrap(), "1");
        assert!(db.get_db_entry("1").is_err());
        assert!(db.delete_db_entry("1").is_err());
    }
}
