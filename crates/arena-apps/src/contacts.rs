//! Contacts app
//!
//! Keyed contact records with a case-insensitive substring search over
//! names, email and phone.

use crate::app::App;
use crate::error::AppError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub(crate) const APP_NAME: &str = "ContactsApp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Employed,
    Student,
    Retired,
    Unemployed,
}

/// One contact record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Empty means auto-assign on add
    pub contact_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub gender: Gender,
    pub status: Status,
    pub job: Option<String>,
    pub city_living: Option<String>,
    pub country: Option<String>,
    pub age: Option<u32>,
}

impl Contact {
    #[must_use]
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            contact_id: String::new(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: String::new(),
            phone: String::new(),
            gender: Gender::Unknown,
            status: Status::Employed,
            job: None,
            city_living: None,
            country: None,
            age: None,
        }
    }

    #[must_use]
    pub fn with_id(mut self, contact_id: impl Into<String>) -> Self {
        self.contact_id = contact_id.into();
        self
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
    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub fn with_job(mut self, job: impl Into<String>) -> Self {
        self.job = Some(job.into());
        self
    }

    /// Full display name
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// In-memory contacts app
#[derive(Debug, Default)]
pub struct ContactsApp {
    contacts: IndexMap<String, Contact>,
}

impl ContactsApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contact, assigning an id when none was supplied
    pub fn add_contact(&mut self, mut contact: Contact) -> String {
        if contact.contact_id.is_empty() {
            contact.contact_id = Uuid::new_v4().simple().to_string();
        }
        let id = contact.contact_id.clone();
        self.contacts.insert(id.clone(), contact);
        id
    }

    /// Get a contact by id
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn get_contact(&self, contact_id: &str) -> Result<Contact, AppError> {
        self.contacts
            .get(contact_id)
            .cloned()
            .ok_or_else(|| AppError::not_found(APP_NAME, contact_id))
    }

    /// Case-insensitive substring search over name, email and phone
    #[must_use]
    pub fn search_contacts(&self, query: &str) -> Vec<Contact> {
        let needle = query.to_lowercase();
        self.contacts
            .values()
            .filter(|c| {
                c.full_name().to_lowercase().contains(&needle)
                    || c.email.to_lowercase().contains(&needle)
                    || c.phone.contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Replace a contact's record
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn update_contact(&mut self, contact_id: &str, contact: Contact) -> Result<String, AppError> {
        let slot = self
            .contacts
            .get_mut(contact_id)
            .ok_or_else(|| AppError::not_found(APP_NAME, contact_id))?;
        let mut contact = contact;
        contact.contact_id = contact_id.to_string();
        *slot = contact;
        Ok(contact_id.to_string())
    }

    /// Delete a contact by id
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn delete_contact(&mut self, contact_id: &str) -> Result<String, AppError> {
        self.contacts
            .shift_remove(contact_id)
            .map(|c| c.contact_id)
            .ok_or_else(|| AppError::not_found(APP_NAME, contact_id))
    }

    /// All contacts in insertion order
    #[must_use]
    pub fn list_contacts(&self) -> Vec<Contact> {
        self.contacts.values().cloned().collect()
    }
}

impl App for ContactsApp {
    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn reset(&mut self) {
        self.contacts.clear();
    }

    fn state(&self) -> Value {
        serde_json::to_value(&self.contacts).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_assigns_id_when_missing() {
        let mut app = ContactsApp::new();
        let id = app.add_contact(Contact::new("Jane", "Smith"));
        assert!(!id.is_empty());
        assert_eq!(app.get_contact(&id).unwrap().first_name, "Jane");
    }

    #[test]
    fn add_keeps_supplied_id() {
        let mut app = ContactsApp::new();
        let id = app.add_contact(Contact::new("Jane", "Smith").with_id("2"));
        assert_eq!(id, "2");
    }

    #[test]
    fn search_is_case_insensitive() {
        let mut app = ContactsApp::new();
        app.add_contact(
            Contact::new("Jane", "Smith").with_email("jane.smith@example.com"),
        );
        app.add_contact(Contact::new("Jim", "Brown"));

        let hits = app.search_contacts("jane smith");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].last_name, "Smith");

        assert!(app.search_contacts("nobody").is_empty());
    }

    #[test]
    fn search_matches_email_and_phone() {
        let mut app = ContactsApp::new();
        app.add_contact(
            Contact::new("Jane", "Smith")
                .with_email("jane.smith@example.com")
                .with_phone("0987654321"),
        );

        assert_eq!(app.search_contacts("jane.smith@").len(), 1);
        assert_eq!(app.search_contacts("0987").len(), 1);
    }

    #[test]
    fn delete_unknown_fails() {
        let mut app = ContactsApp::new();
        assert!(app.delete_contact("missing").is_err());
    }
}
