//! Turn controller.
//!
//! Consumes card selections, runs the two-card comparison protocol and
//! gates input while a mismatched pair is on display.

mod resolver;

pub use resolver::{RejectReason, Selection, TurnPhase, TurnResolver};
