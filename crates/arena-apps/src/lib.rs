//! Arena Apps - mock tool applications
//!
//! In-memory CRUD surfaces the simulated agent operates on:
//! - [`DbApp`]: generic keyed database entries
//! - [`ContactsApp`], [`CalendarApp`], [`EmailApp`], [`MessagingApp`]:
//!   personal-information apps
//! - [`ShoppingApp`], [`ReminderApp`], [`ApartmentApp`], [`CabApp`]:
//!   task apps (some used as scenario distractors)
//! - [`AgentUserInterface`]: the user/agent message channel
//!
//! Every app enforces the same contract: identifiers are unique within
//! the app's own store, and a lookup by unknown identifier fails with
//! [`AppError::NotFound`] rather than silently no-opping.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod agui;
pub mod apartment;
pub mod app;
pub mod cab;
pub mod calendar;
pub mod contacts;
pub mod db;
pub mod email;
pub mod error;
pub mod messaging;
pub mod reminder;
pub mod shopping;

pub use agui::{AgentUserInterface, ChatMessage, Sender};
pub use apartment::{Apartment, ApartmentApp};
pub use app::App;
pub use cab::{CabApp, Ride, ServiceType};
pub use calendar::{CalendarApp, CalendarEvent};
pub use contacts::{Contact, ContactsApp, Gender, Status};
pub use db::{DbApp, DbEntry, DbEntryPatch};
pub use email::{Email, EmailApp, EmailFolder};
pub use error::AppError;
pub use messaging::{Conversation, Message, MessagingApp};
pub use reminder::{Reminder, ReminderApp};
pub use shopping::{Item, Product, ShoppingApp};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
