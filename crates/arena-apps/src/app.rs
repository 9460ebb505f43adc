//! Common app contract

use serde_json::Value;

/// Contract every mock app implements
///
/// `name()` is the `class_name` recorded on tool-call actions; validators
/// compare against it when checking which apps a run touched.
pub trait App {
    /// Stable app name (used as `Action::class_name`)
    fn name(&self) -> &'static str;

    /// Drop all mutable state, back to a freshly constructed app
    fn reset(&mut self);

    /// JSON snapshot of the backing store
    fn state(&self) -> Value;
}
