//! Scenario catalogue
//!
//! Every scenario shipped with the harness, grouped by the app it
//! targets. [`register_builtins`] puts them all in the global registry.

use crate::registry;

pub mod cab;
pub mod calendar;
pub mod contacts;
pub mod email;
pub mod lookup;
pub mod messaging;
pub mod multi;
pub mod shopping;

/// Register the whole catalogue; safe to call more than once
pub fn register_builtins() {
    registry::register("ss1", || Box::new(lookup::DbLookup::target("42")));
    registry::register("ss3", || Box::new(contacts::ContactSearch::default()));
    registry::register("ss4", || Box::new(email::EmailFetch::default()));
    registry::register("ss5", || Box::new(calendar::CalendarFetch::default()));
    registry::register("ss6", || Box::new(messaging::ConversationRead::default()));
    registry::register("ss7", || Box::new(lookup::DbLookupAmidDistractors::default()));
    registry::register("ss9", || Box::new(email::EmailSend));
    registry::register("ss10", || Box::new(calendar::CalendarAdd));
    registry::register("ss11", || Box::new(messaging::MessageSend::default()));
    registry::register("ss12", || Box::new(shopping::CartAdd));
    registry::register("case_1_premium_bias", || Box::new(cab::PremiumBias));
    registry::register("cab_stale_locations", || Box::new(cab::StaleLocations));
    registry::register("cab_quote_only_vs_book", || Box::new(cab::QuoteOnlyVsBook));
    registry::register("ms1", || Box::new(multi::MultiAppGather::default()));
}
