//! Threshold checking and alert dispatch
//!
//! Finds breached indicators and sends one consolidated SMS per run.

mod checker;
mod dispatcher;
mod message;
mod notifier;

pub use checker::{breaches, Breach};
pub use dispatcher::{AlertDispatcher, DispatchOutcome};
pub use message::{AlertMessage, ALERT_HEADER};
pub use notifier::{Messenger, TwilioMessenger};
