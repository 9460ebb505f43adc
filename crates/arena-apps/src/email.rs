//! Email client app
//!
//! Folder-organized mailbox. `get_email_by_id` searches every folder so
//! validators can match on the id alone.

use crate::app::App;
use crate::error::AppError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

pub(crate) const APP_NAME: &str = "EmailApp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmailFolder {
    Inbox,
    Sent,
    Drafts,
    Trash,
}

/// One email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub email_id: String,
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub content: String,
    /// Simulated seconds; scenario-relative
    pub timestamp: f64,
}

impl Email {
    #[must_use]
    pub fn new(
        sender: impl Into<String>,
        recipients: Vec<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            email_id: String::new(),
            sender: sender.into(),
            recipients,
            subject: subject.into(),
            content: content.into(),
            timestamp: 0.0,
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// In-memory email app
#[derive(Debug)]
pub struct EmailApp {
    folders: IndexMap<EmailFolder, IndexMap<String, Email>>,
    /// Address mail is sent from
    user_address: String,
}

impl Default for EmailApp {
    fn default() -> Self {
        let mut folders = IndexMap::new();
        for folder in [
            EmailFolder::Inbox,
            EmailFolder::Sent,
            EmailFolder::Drafts,
            EmailFolder::Trash,
        ] {
            folders.insert(folder, IndexMap::new());
        }
        Self {
            folders,
            user_address: "user@example.com".to_string(),
        }
    }
}

impl EmailApp {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an email in a folder, assigning an id when none was supplied
    pub fn add_email(&mut self, mut email: Email, folder: EmailFolder) -> String {
        if email.email_id.is_empty() {
            email.email_id = Uuid::new_v4().simple().to_string();
        }
        let id = email.email_id.clone();
        self.folders
            .entry(folder)
            .or_default()
            .insert(id.clone(), email);
        id
    }

    /// Get an email by id, searching all folders
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn get_email_by_id(&self, email_id: &str) -> Result<Email, AppError> {
        self.folders
            .values()
            .find_map(|f| f.get(email_id))
            .cloned()
            .ok_or_else(|| AppError::not_found(APP_NAME, email_id))
    }

    /// Page through the inbox in arrival order
    #[must_use]
    pub fn list_emails(&self, offset: usize, limit: usize) -> Vec<Email> {
        self.folders
            .get(&EmailFolder::Inbox)
            .map(|inbox| inbox.values().skip(offset).take(limit).cloned().collect())
            .unwrap_or_default()
    }

    /// Send an email (lands in the Sent folder) and return its id
    pub fn send_email(
        &mut self,
        recipients: Vec<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> String {
        let email = Email::new(self.user_address.clone(), recipients, subject, content);
        self.add_email(email, EmailFolder::Sent)
    }

    /// Move an email to Trash
    ///
    /// # Errors
    /// `AppError::NotFound` if the id is unknown.
    pub fn delete_email(&mut self, email_id: &str) -> Result<String, AppError> {
        for (folder, emails) in &mut self.folders {
            if *folder == EmailFolder::Trash {
                continue;
            }
            if let Some(email) = emails.shift_remove(email_id) {
                self.folders
                    .entry(EmailFolder::Trash)
                    .or_default()
                    .insert(email_id.to_string(), email);
                return Ok(email_id.to_string());
            }
        }
        Err(AppError::not_found(APP_NAME, email_id))
    }
}

impl App for EmailApp {
    fn name(&self) -> &'static str {
        APP_NAME
    }

    fn reset(&mut self) {
        for folder in self.folders.values_mut() {
            folder.clear();
        }
    }

    fn state(&self) -> Value {
        serde_json::to_value(&self.folders).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inbox_mail(subject: &str) -> Email {
        Email::new(
            "sender@example.com",
            vec!["user@example.com".to_string()],
            subject,
            "body",
        )
    }

    #[test]
    fn add_and_get_by_id() {
        let mut app = EmailApp::new();
        let id = app.add_email(inbox_mail("Important Meeting"), EmailFolder::Inbox);

        let email = app.get_email_by_id(&id).unwrap();
        assert_eq!(email.subject, "Important Meeting");
    }

    #[test]
    fn list_emails_pages_inbox() {
        let mut app = EmailApp::new();
        for i in 0..5 {
            app.add_email(inbox_mail(&format!("Mail {i}")), EmailFolder::Inbox);
        }

        let page = app.list_emails(1, 2);
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].subject, "Mail 1");
    }

    #[test]
    fn send_lands_in_sent_folder() {
        let mut app = EmailApp::new();
        let id = app.send_email(
            vec!["recipient@example.com".to_string()],
            "Meeting Request",
            "Can we schedule a meeting?",
        );

        let email = app.get_email_by_id(&id).unwrap();
        assert_eq!(email.sender, "user@example.com");
        assert!(app.list_emails(0, 10).is_empty());
    }

    #[test]
    fn delete_moves_to_trash_and_unknown_fails() {
        let mut app = EmailApp::new();
        let id = app.add_email(inbox_mail("Spam"), EmailFolder::Inbox);

        app.delete_email(&id).unwrap();
        // Still findable by id (in Trash), but no longer in the inbox.
        assert!(app.get_email_by_id(&id).is_ok());
        assert!(app.list_emails(0, 10).is_empty());

        assert!(app.delete_email("missing").is_err());
    }
}
